//! Static type descriptions.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod enum_info;
mod list_info;
mod method_info;
mod nullable_info;
mod opaque_info;
mod struct_info;
mod ty;
mod type_info;
mod typed;

// -----------------------------------------------------------------------------
// Exports

pub use cell::{GenericTypeInfoCell, GenericTypePathCell, NonGenericTypeInfoCell};
pub use enum_info::EnumInfo;
pub use list_info::ListInfo;
pub use method_info::{ArgInfo, MethodFn, MethodInfo};
pub use nullable_info::NullableInfo;
pub use opaque_info::OpaqueInfo;
pub use struct_info::{NamedField, StructInfo};
pub use ty::{DynamicTypePath, Type, TypePath};
pub use type_info::{ReflectKind, TypeInfo};
pub use typed::{DynamicTyped, Typed};
