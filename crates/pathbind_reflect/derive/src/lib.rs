//! `#[derive(Reflect)]` for `pathbind_reflect`.

use proc_macro::TokenStream;
use syn::{Data, DeriveInput, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod enum_kind;
mod path;
mod struct_kind;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection Derivation
///
/// `#[derive(Reflect)]` implements `TypePath`, `Typed`, `Reflect`,
/// `GetTypeMeta`, and one kind trait:
///
/// - `Struct` for structs with named fields;
/// - `Enum` for enums whose variants carry no data.
///
/// Generic types, tuple structs and unit structs are rejected.
///
/// ## Container attributes
///
/// - `#[reflect(default)]`: the type implements `Default`; registers
///   `TypeTraitDefault`, which binders need to build fresh instances.
/// - `#[reflect(from_str)]`: the type implements `FromStr`; registers
///   `TypeTraitFromStr`, used by the construct-from-string conversion.
/// - `#[reflect(method(name))]`: exposes `fn name(&self) -> R` to paths.
/// - `#[reflect(method(name, arg))]`: exposes `fn name(&self, a: A) -> R`;
///   `A` must be an owned, cloneable reflected type.
///
/// ## Field attributes
///
/// - `#[reflect(readonly)]`: the field can be read through paths but not
///   written, and binders skip it.
/// - `#[reflect(skip)]`: the field is invisible to reflection.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Reflect, Default)]
/// #[reflect(default, method(full_name))]
/// struct Person {
///     first: String,
///     last: String,
///     #[reflect(readonly)]
///     id: u64,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    let result = match &ast.data {
        Data::Struct(data) => struct_kind::expand(&ast, data),
        Data::Enum(data) => enum_kind::expand(&ast, data),
        Data::Union(_) => Err(syn::Error::new_spanned(
            &ast.ident,
            "`Reflect` cannot be derived for unions",
        )),
    };

    result.unwrap_or_else(syn::Error::into_compile_error).into()
}
