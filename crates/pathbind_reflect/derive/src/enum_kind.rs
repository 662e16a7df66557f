use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataEnum, DeriveInput, Fields};

use crate::attributes::TypeAttributes;
use crate::path;

pub(crate) fn expand(ast: &DeriveInput, data: &DataEnum) -> syn::Result<TokenStream> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`Reflect` cannot be derived for generic types",
        ));
    }
    if data.variants.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Reflect` cannot be derived for enums without variants",
        ));
    }
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "`Reflect` can only be derived for enums whose variants carry no data",
            ));
        }
    }

    let attrs = TypeAttributes::parse(&ast.attrs)?;
    if let Some(method) = attrs.methods.first() {
        return Err(syn::Error::new_spanned(
            &method.name,
            "`method(..)` is only supported on structs",
        ));
    }

    let krate = path::pathbind_reflect();
    let ident = &ast.ident;
    let reflect_ = path::reflect_(&krate);
    let info_ = path::info_(&krate);
    let ops_ = path::ops_(&krate);
    let registry_ = path::registry_(&krate);

    let variants: Vec<_> = data.variants.iter().map(|variant| &variant.ident).collect();
    let names: Vec<_> = variants.iter().map(|ident| ident.to_string()).collect();
    let indices: Vec<_> = (0..variants.len()).collect();

    let type_path = path::impl_type_path(&krate, ident);
    let common = path::reflect_common(&krate);
    let inserts = attrs.type_trait_inserts(&registry_);

    Ok(quote! {
        #type_path

        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #info_::NonGenericTypeInfoCell = #info_::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    #info_::TypeInfo::Enum(#info_::EnumInfo::new::<Self>(
                        &[#(#names),*],
                        |index| match index {
                            #(#indices => ::core::option::Option::Some(
                                ::std::boxed::Box::new(Self::#variants) as ::std::boxed::Box<dyn #reflect_>
                            ),)*
                            _ => ::core::option::Option::None,
                        },
                    ))
                })
            }
        }

        impl #reflect_ for #ident {
            #common

            #[inline]
            fn reflect_kind(&self) -> #info_::ReflectKind {
                #info_::ReflectKind::Enum
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::Enum(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #ops_::ReflectMut::Enum(self)
            }

            #[inline]
            fn reflect_owned(self: ::std::boxed::Box<Self>) -> #ops_::ReflectOwned {
                #ops_::ReflectOwned::Enum(self)
            }
        }

        impl #ops_::Enum for #ident {
            fn variant_name(&self) -> &'static str {
                match self {
                    #(Self::#variants => #names,)*
                }
            }

            fn variant_index(&self) -> usize {
                match self {
                    #(Self::#variants => #indices,)*
                }
            }
        }

        impl #registry_::GetTypeMeta for #ident {
            fn get_type_meta() -> #registry_::TypeMeta {
                #[allow(unused_mut)]
                let mut meta = #registry_::TypeMeta::of::<Self>();
                #inserts
                meta
            }
        }
    })
}
