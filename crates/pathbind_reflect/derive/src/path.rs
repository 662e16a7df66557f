//! Paths into `pathbind_reflect` used by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the access path to the `pathbind_reflect` crate.
///
/// 1. For crates that depend on `pathbind_reflect`, returns `::pathbind_reflect`.
/// 2. For crates that depend on `pathbind`, returns `::pathbind::reflect`.
/// 3. Otherwise returns `::pathbind_reflect`.
///
/// This reads the caller's manifest, so it is called once per derive.
pub(crate) fn pathbind_reflect() -> syn::Path {
    pathbind_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("pathbind_reflect"))
}

#[inline]
pub(crate) fn reflect_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::Reflect }
}

#[inline]
pub(crate) fn info_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::info }
}

#[inline]
pub(crate) fn ops_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::ops }
}

#[inline]
pub(crate) fn registry_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::registry }
}

/// `TypePath` for a non-generic type.
pub(crate) fn impl_type_path(krate: &syn::Path, ident: &syn::Ident) -> TokenStream {
    let info_ = info_(krate);
    let name = ident.to_string();
    quote! {
        impl #info_::TypePath for #ident {
            #[inline]
            fn type_path() -> &'static str {
                ::core::concat!(::core::module_path!(), "::", #name)
            }

            #[inline]
            fn type_name() -> &'static str {
                #name
            }
        }
    }
}

/// The common part of `Reflect`, everything except the kind dispatch.
pub(crate) fn reflect_common(krate: &syn::Path) -> TokenStream {
    let reflect_ = reflect_(krate);
    quote! {
        #[inline]
        fn as_reflect(&self) -> &dyn #reflect_ {
            self
        }

        #[inline]
        fn as_reflect_mut(&mut self) -> &mut dyn #reflect_ {
            self
        }

        #[inline]
        fn into_reflect(self: ::std::boxed::Box<Self>) -> ::std::boxed::Box<dyn #reflect_> {
            self
        }

        #[inline]
        fn set(
            &mut self,
            value: ::std::boxed::Box<dyn #reflect_>,
        ) -> ::core::result::Result<(), ::std::boxed::Box<dyn #reflect_>> {
            *self = value.take::<Self>()?;
            ::core::result::Result::Ok(())
        }
    }
}
