use crate::info::Typed;
use crate::registry::{TypeMeta, TypeRegistry};

/// Provides the [`TypeMeta`] of a type for registration.
///
/// Implemented by `#[derive(Reflect)]`.
pub trait GetTypeMeta: Typed {
    fn get_type_meta() -> TypeMeta;

    /// Registers types this type refers to, such as field types.
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
