//! Parsing of `#[reflect(...)]`.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{Attribute, Ident, Token, parenthesized};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Container

/// A method exposed through `#[reflect(method(name))]`.
pub(crate) struct MethodAttr {
    pub name: Ident,
    pub has_arg: bool,
}

#[derive(Default)]
pub(crate) struct TypeAttributes {
    pub default: Option<Span>,
    pub from_str: Option<Span>,
    pub methods: Vec<MethodAttr>,
}

impl TypeAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    result.default = Some(meta.path.require_ident()?.span());
                    Ok(())
                } else if meta.path.is_ident("from_str") {
                    result.from_str = Some(meta.path.require_ident()?.span());
                    Ok(())
                } else if meta.path.is_ident("method") {
                    let content;
                    parenthesized!(content in meta.input);
                    let name: Ident = content.parse()?;
                    let mut has_arg = false;
                    if content.parse::<Option<Token![,]>>()?.is_some() {
                        let flag: Ident = content.parse()?;
                        if flag != "arg" {
                            return Err(syn::Error::new_spanned(flag, "expected `arg`"));
                        }
                        has_arg = true;
                    }
                    result.methods.push(MethodAttr { name, has_arg });
                    Ok(())
                } else {
                    Err(meta.error("unknown reflect attribute, expected `default`, `from_str` or `method(..)`"))
                }
            })?;
        }

        Ok(result)
    }

    /// Statements inserting the requested type traits into `meta`.
    pub fn type_trait_inserts(&self, registry_: &TokenStream) -> TokenStream {
        let default = self.default.map(|_| {
            quote! {
                meta.insert_trait(<#registry_::TypeTraitDefault as #registry_::FromType<Self>>::from_type());
            }
        });
        let from_str = self.from_str.map(|_| {
            quote! {
                meta.insert_trait(<#registry_::TypeTraitFromStr as #registry_::FromType<Self>>::from_type());
            }
        });
        quote! { #default #from_str }
    }
}

// -----------------------------------------------------------------------------
// Field

#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub readonly: bool,
}

impl FieldAttributes {
    pub fn parse(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(REFLECT_ATTRIBUTE_NAME) {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    result.skip = true;
                    Ok(())
                } else if meta.path.is_ident("readonly") {
                    result.readonly = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown field attribute, expected `skip` or `readonly`"))
                }
            })?;
        }

        Ok(result)
    }
}
