use proc_macro2::TokenStream;
use quote::quote;
use syn::{DataStruct, DeriveInput, Fields, Ident, Type};

use crate::attributes::{FieldAttributes, TypeAttributes};
use crate::path;

/// A reflected field: not `#[reflect(skip)]`.
struct ActiveField<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    readonly: bool,
}

pub(crate) fn expand(ast: &DeriveInput, data: &DataStruct) -> syn::Result<TokenStream> {
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &ast.generics,
            "`Reflect` cannot be derived for generic types",
        ));
    }

    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new_spanned(
            &ast.ident,
            "`Reflect` can only be derived for structs with named fields",
        ));
    };

    let attrs = TypeAttributes::parse(&ast.attrs)?;

    let mut fields = Vec::with_capacity(named.named.len());
    for field in &named.named {
        let field_attrs = FieldAttributes::parse(&field.attrs)?;
        if field_attrs.skip {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        fields.push(ActiveField {
            ident,
            ty: &field.ty,
            readonly: field_attrs.readonly,
        });
    }

    let krate = path::pathbind_reflect();
    let ident = &ast.ident;

    let type_path = path::impl_type_path(&krate, ident);
    let typed = impl_typed(&krate, ident, &fields, &attrs);
    let reflect = impl_reflect(&krate, ident);
    let struct_ops = impl_struct(&krate, ident, &fields);
    let get_type_meta = impl_get_type_meta(&krate, ident, &fields, &attrs);

    Ok(quote! {
        #type_path
        #typed
        #reflect
        #struct_ops
        #get_type_meta
    })
}

fn impl_typed(
    krate: &syn::Path,
    ident: &Ident,
    fields: &[ActiveField],
    attrs: &TypeAttributes,
) -> TokenStream {
    let info_ = path::info_(krate);

    let named_fields = fields.iter().map(|field| {
        let name = field.ident.to_string();
        let ty = field.ty;
        let readonly = field.readonly.then(|| quote! { .read_only() });
        quote! { #info_::NamedField::new::<#ty>(#name) #readonly }
    });

    let with_methods = (!attrs.methods.is_empty()).then(|| {
        let methods = attrs.methods.iter().map(|method| {
            let name = &method.name;
            let name_str = name.to_string();
            if method.has_arg {
                quote! { #info_::MethodInfo::one_arg::<Self, _, _>(#name_str, Self::#name) }
            } else {
                quote! { #info_::MethodInfo::zero_arg::<Self, _>(#name_str, Self::#name) }
            }
        });
        quote! { .with_methods([#(#methods),*]) }
    });

    quote! {
        impl #info_::Typed for #ident {
            fn type_info() -> &'static #info_::TypeInfo {
                static CELL: #info_::NonGenericTypeInfoCell = #info_::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    #info_::TypeInfo::Struct(
                        #info_::StructInfo::new::<Self>(&[#(#named_fields),*])
                            #with_methods
                    )
                })
            }
        }
    }
}

fn impl_reflect(krate: &syn::Path, ident: &Ident) -> TokenStream {
    let reflect_ = path::reflect_(krate);
    let info_ = path::info_(krate);
    let ops_ = path::ops_(krate);
    let common = path::reflect_common(krate);

    quote! {
        impl #reflect_ for #ident {
            #common

            #[inline]
            fn reflect_kind(&self) -> #info_::ReflectKind {
                #info_::ReflectKind::Struct
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::Struct(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #ops_::ReflectMut::Struct(self)
            }

            #[inline]
            fn reflect_owned(self: ::std::boxed::Box<Self>) -> #ops_::ReflectOwned {
                #ops_::ReflectOwned::Struct(self)
            }
        }
    }
}

fn impl_struct(krate: &syn::Path, ident: &Ident, fields: &[ActiveField]) -> TokenStream {
    let reflect_ = path::reflect_(krate);
    let ops_ = path::ops_(krate);

    let idents: Vec<_> = fields.iter().map(|field| field.ident).collect();
    let names: Vec<_> = idents.iter().map(|ident| ident.to_string()).collect();
    let indices: Vec<_> = (0..fields.len()).collect();
    let len = fields.len();

    let into_field_at = if fields.is_empty() {
        quote! {
            let _ = (self, index);
            ::core::option::Option::None
        }
    } else {
        quote! {
            let this = *self;
            match index {
                #(#indices => ::core::option::Option::Some(
                    ::std::boxed::Box::new(this.#idents) as ::std::boxed::Box<dyn #reflect_>
                ),)*
                _ => ::core::option::Option::None,
            }
        }
    };

    quote! {
        impl #ops_::Struct for #ident {
            fn field(&self, name: &str) -> ::core::option::Option<&dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(&self.#idents as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn #reflect_> {
                match name {
                    #(#names => ::core::option::Option::Some(&mut self.#idents as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at(&self, index: usize) -> ::core::option::Option<&dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&self.#idents as &dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn field_at_mut(&mut self, index: usize) -> ::core::option::Option<&mut dyn #reflect_> {
                match index {
                    #(#indices => ::core::option::Option::Some(&mut self.#idents as &mut dyn #reflect_),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn name_at(&self, index: usize) -> ::core::option::Option<&'static str> {
                match index {
                    #(#indices => ::core::option::Option::Some(#names),)*
                    _ => ::core::option::Option::None,
                }
            }

            #[inline]
            fn field_len(&self) -> usize {
                #len
            }

            fn into_field_at(
                self: ::std::boxed::Box<Self>,
                index: usize,
            ) -> ::core::option::Option<::std::boxed::Box<dyn #reflect_>> {
                #into_field_at
            }
        }
    }
}

fn impl_get_type_meta(
    krate: &syn::Path,
    ident: &Ident,
    fields: &[ActiveField],
    attrs: &TypeAttributes,
) -> TokenStream {
    let registry_ = path::registry_(krate);
    let inserts = attrs.type_trait_inserts(&registry_);
    let field_types = fields.iter().map(|field| field.ty);

    quote! {
        impl #registry_::GetTypeMeta for #ident {
            fn get_type_meta() -> #registry_::TypeMeta {
                #[allow(unused_mut)]
                let mut meta = #registry_::TypeMeta::of::<Self>();
                #inserts
                meta
            }

            #[allow(unused_variables)]
            fn register_dependencies(registry: &mut #registry_::TypeRegistry) {
                #(registry.register::<#field_types>();)*
            }
        }
    }
}
