use core::fmt;
use core::hash::{Hash, Hasher};
use std::borrow::Cow;
use std::sync::Arc;

use pathbind_reflect::Reflect;
use pathbind_reflect::info::{ListInfo, MethodInfo, NamedField, StructInfo, Type, TypeInfo};
use pathbind_reflect::ops::{ReflectMut, ReflectOwned, ReflectRef};

use crate::{ConstructionError, Value};

// -----------------------------------------------------------------------------
// Constant

/// A folded method argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Constant {
    Int(i128),
    Str(String),
    Bool(bool),
}

impl Constant {
    /// Short description of the constant's kind, used in errors.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::Bool(_) => "boolean",
        }
    }

    /// Builds a value of the type described by `info`.
    ///
    /// Integers convert to any integer type they fit in; strings only to
    /// `String` and booleans only to `bool`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_access::Constant;
    /// use pathbind_reflect::info::Typed;
    ///
    /// let value = Constant::Int(7).to_reflect(u8::type_info()).unwrap();
    /// assert_eq!(value.downcast_ref::<u8>(), Some(&7));
    ///
    /// assert!(Constant::Int(-1).to_reflect(u8::type_info()).is_none());
    /// assert!(Constant::Bool(true).to_reflect(String::type_info()).is_none());
    /// ```
    pub fn to_reflect(&self, info: &TypeInfo) -> Option<Box<dyn Reflect>> {
        macro_rules! int_to {
            ($value:ident: $($ty:ty),*) => {$(
                if info.is::<$ty>() {
                    return <$ty>::try_from(*$value).ok().map(|v| Box::new(v) as Box<dyn Reflect>);
                }
            )*};
        }

        match self {
            Self::Int(value) => {
                int_to!(value: u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);
                None
            }
            Self::Str(value) if info.is::<String>() => Some(Box::new(value.clone())),
            Self::Bool(value) if info.is::<bool>() => Some(Box::new(*value)),
            _ => None,
        }
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => fmt::Display::fmt(value, f),
            Self::Str(value) => fmt::Debug::fmt(value, f),
            Self::Bool(value) => fmt::Display::fmt(value, f),
        }
    }
}

// -----------------------------------------------------------------------------
// Step

/// One atomic hop of a path.
///
/// Steps are validated against [`TypeInfo`] when built and immutable
/// afterwards. Equality and hashing consider the owner type and the member
/// name, the index, or the method name and argument.
#[derive(Clone)]
pub enum Step {
    Member(MemberStep),
    Index(IndexStep),
    Method(MethodStep),
}

/// A named field.
#[derive(Clone)]
pub struct MemberStep {
    owner: &'static StructInfo,
    field: &'static NamedField,
    index: usize,
}

/// An element of a list or array at a fixed position.
#[derive(Clone)]
pub struct IndexStep {
    owner: &'static ListInfo,
    index: usize,
}

/// A zero or one argument method with its folded argument.
#[derive(Clone)]
pub struct MethodStep {
    owner: &'static StructInfo,
    method: &'static MethodInfo,
    arg: Option<Argument>,
}

#[derive(Clone)]
struct Argument {
    constant: Constant,
    value: Arc<dyn Reflect>,
}

impl Step {
    /// A field of the struct described by `owner`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_access::Step;
    /// use pathbind_reflect::{derive::Reflect, info::Typed};
    ///
    /// #[derive(Reflect)]
    /// struct Person {
    ///     name: String,
    /// }
    ///
    /// let step = Step::member(Person::type_info(), "name").unwrap();
    /// assert_eq!(step.token(), "name");
    /// assert!(step.value_type().is::<String>());
    /// assert!(Step::member(Person::type_info(), "age").is_err());
    /// ```
    pub fn member(owner: &'static TypeInfo, name: &str) -> Result<Self, ConstructionError> {
        let unknown = || ConstructionError::UnknownMember {
            owner: owner.type_path(),
            name: name.to_owned(),
        };

        let info = owner.as_struct().ok_or_else(unknown)?;
        let index = info.index_of(name).ok_or_else(unknown)?;
        let field = info.field_at(index).ok_or_else(unknown)?;

        Ok(Self::Member(MemberStep {
            owner: info,
            field,
            index,
        }))
    }

    /// The element at `index` of the list or array described by `owner`.
    ///
    /// Arrays reject indices beyond their length; lists accept any index and
    /// read as absent when it is out of range.
    pub fn index(owner: &'static TypeInfo, index: usize) -> Result<Self, ConstructionError> {
        let info = owner.as_list().ok_or(ConstructionError::NotIndexable {
            owner: owner.type_path(),
        })?;

        if let Some(capacity) = info.capacity()
            && index >= capacity
        {
            return Err(ConstructionError::IndexOutOfRange {
                owner: owner.type_path(),
                index,
            });
        }

        Ok(Self::Index(IndexStep { owner: info, index }))
    }

    /// A method of the struct described by `owner`, with its argument.
    pub fn method(
        owner: &'static TypeInfo,
        name: &str,
        arg: Option<Constant>,
    ) -> Result<Self, ConstructionError> {
        let unknown = || ConstructionError::UnknownMethod {
            owner: owner.type_path(),
            name: name.to_owned(),
        };

        let info = owner.as_struct().ok_or_else(unknown)?;
        let method = info.method(name).ok_or_else(unknown)?;

        let found = usize::from(arg.is_some());
        if found != method.arity() {
            return Err(ConstructionError::ArgumentCount {
                method: method.name(),
                expected: method.arity(),
                found,
            });
        }

        let arg = match (arg, method.argument()) {
            (Some(constant), Some(expected)) => {
                let Some(value) = constant.to_reflect(expected.type_info()) else {
                    return Err(ConstructionError::ArgumentType {
                        method: method.name(),
                        expected: expected.ty().path(),
                        found: format!("{} `{constant}`", constant.kind()),
                    });
                };
                Some(Argument {
                    constant,
                    value: Arc::from(value),
                })
            }
            _ => None,
        };

        Ok(Self::Method(MethodStep {
            owner: info,
            method,
            arg,
        }))
    }

    /// The type this step is read from.
    #[inline]
    pub fn owner_type(&self) -> &'static Type {
        match self {
            Self::Member(step) => step.owner.ty(),
            Self::Index(step) => step.owner.ty(),
            Self::Method(step) => step.owner.ty(),
        }
    }

    /// The type this step produces.
    #[inline]
    pub fn value_type(&self) -> &'static Type {
        self.value_info().ty()
    }

    pub fn value_info(&self) -> &'static TypeInfo {
        match self {
            Self::Member(step) => step.field.type_info(),
            Self::Index(step) => step.owner.item_info(),
            Self::Method(step) => step.method.return_info(),
        }
    }

    /// Display token: the member or method name, or `[index]`.
    pub fn token(&self) -> Cow<'static, str> {
        match self {
            Self::Member(step) => Cow::Borrowed(step.field.name()),
            Self::Index(step) => Cow::Owned(format!("[{}]", step.index)),
            Self::Method(step) => Cow::Borrowed(step.method.name()),
        }
    }

    /// Method steps and read-only fields cannot be assigned.
    #[inline]
    pub fn is_writable(&self) -> bool {
        match self {
            Self::Member(step) => step.field.is_writable(),
            Self::Index(_) => true,
            Self::Method(_) => false,
        }
    }

    /// Reads this step off an already settled value.
    pub(crate) fn read<'r>(&self, target: Value<'r>) -> Option<Value<'r>> {
        match self {
            Self::Member(step) => read_field(target, step.index),
            Self::Index(step) => read_item(target, step.index),
            Self::Method(step) => step.method.invoke(&*target, step.argument()).map(Value::Owned),
        }
    }

    /// Mutable counterpart of [`read`](Self::read); `None` for methods.
    pub(crate) fn read_mut<'a>(&self, target: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        match (self, target.reflect_mut()) {
            (Self::Member(step), ReflectMut::Struct(data)) => data.field_at_mut(step.index),
            (Self::Index(step), ReflectMut::List(data)) => data.get_mut(step.index),
            _ => None,
        }
    }

    /// Writes the path syntax of this step.
    pub(crate) fn write_path(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Member(step) => write!(f, ".{}", step.field.name()),
            Self::Index(step) => write!(f, "[{}]", step.index),
            Self::Method(step) => match &step.arg {
                Some(arg) => write!(f, ".{}({})", step.method.name(), arg.constant),
                None => write!(f, ".{}()", step.method.name()),
            },
        }
    }
}

impl MemberStep {
    #[inline]
    pub fn field(&self) -> &'static NamedField {
        self.field
    }

    #[inline]
    pub fn field_index(&self) -> usize {
        self.index
    }
}

impl IndexStep {
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}

impl MethodStep {
    #[inline]
    pub fn method(&self) -> &'static MethodInfo {
        self.method
    }

    #[inline]
    pub fn constant(&self) -> Option<&Constant> {
        self.arg.as_ref().map(|arg| &arg.constant)
    }

    #[inline]
    pub(crate) fn argument(&self) -> Option<&dyn Reflect> {
        self.arg.as_ref().map(|arg| &*arg.value)
    }

    #[inline]
    pub(crate) fn argument_value(&self) -> Option<Arc<dyn Reflect>> {
        self.arg.as_ref().map(|arg| arg.value.clone())
    }
}

/// Field `index` of a struct value.
pub(crate) fn read_field(target: Value<'_>, index: usize) -> Option<Value<'_>> {
    match target {
        Value::Borrowed(value) => match value.reflect_ref() {
            ReflectRef::Struct(data) => data.field_at(index).map(Value::Borrowed),
            _ => None,
        },
        Value::Owned(value) => match value.reflect_owned() {
            ReflectOwned::Struct(data) => data.into_field_at(index).map(Value::Owned),
            _ => None,
        },
    }
}

/// Item `index` of a list value, `None` when out of range.
pub(crate) fn read_item(target: Value<'_>, index: usize) -> Option<Value<'_>> {
    match target {
        Value::Borrowed(value) => match value.reflect_ref() {
            ReflectRef::List(data) => data.get(index).map(Value::Borrowed),
            _ => None,
        },
        Value::Owned(value) => match value.reflect_owned() {
            ReflectOwned::List(data) => data.into_item(index).map(Value::Owned),
            _ => None,
        },
    }
}

impl PartialEq for Step {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Member(a), Self::Member(b)) => {
                a.owner.ty() == b.owner.ty() && a.field.name() == b.field.name()
            }
            (Self::Index(a), Self::Index(b)) => a.owner.ty() == b.owner.ty() && a.index == b.index,
            (Self::Method(a), Self::Method(b)) => {
                a.owner.ty() == b.owner.ty()
                    && a.method.name() == b.method.name()
                    && a.constant() == b.constant()
            }
            _ => false,
        }
    }
}

impl Eq for Step {}

impl Hash for Step {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        self.owner_type().hash(state);
        match self {
            Self::Member(step) => step.field.name().hash(state),
            Self::Index(step) => step.index.hash(state),
            Self::Method(step) => {
                step.method.name().hash(state);
                step.constant().hash(state);
            }
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.owner_type().name())?;
        self.write_path(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use pathbind_reflect::info::Typed;

    use super::{Constant, Step};
    use crate::ConstructionError;
    use crate::tests::{Child, GrandChild, Target};

    #[test]
    fn member_steps() {
        let step = Step::member(Target::type_info(), "child").unwrap();
        assert!(step.owner_type().is::<Target>());
        assert!(step.value_type().is::<Option<Child>>());
        assert!(step.is_writable());

        let id = Step::member(Target::type_info(), "id").unwrap();
        assert!(!id.is_writable());

        assert!(matches!(
            Step::member(<Vec<u8>>::type_info(), "len"),
            Err(ConstructionError::UnknownMember { .. })
        ));
    }

    #[test]
    fn index_steps() {
        let step = Step::index(<Vec<GrandChild>>::type_info(), 9).unwrap();
        assert_eq!(step.token(), "[9]");
        assert!(step.value_type().is::<GrandChild>());

        assert!(Step::index(<[u8; 2]>::type_info(), 1).is_ok());
        assert!(matches!(
            Step::index(<[u8; 2]>::type_info(), 2),
            Err(ConstructionError::IndexOutOfRange { index: 2, .. })
        ));
        assert!(matches!(
            Step::index(Target::type_info(), 0),
            Err(ConstructionError::NotIndexable { .. })
        ));
    }

    #[test]
    fn method_steps() {
        let step = Step::method(GrandChild::type_info(), "plus_days", Some(Constant::Int(3))).unwrap();
        assert!(!step.is_writable());
        assert!(step.value_type().is::<u32>());
        assert_eq!(format!("{step:?}"), "GrandChild.plus_days(3)");

        assert!(matches!(
            Step::method(GrandChild::type_info(), "plus_days", None),
            Err(ConstructionError::ArgumentCount { expected: 1, found: 0, .. })
        ));
        assert!(matches!(
            Step::method(GrandChild::type_info(), "plus_days", Some(Constant::Int(-3))),
            Err(ConstructionError::ArgumentType { .. })
        ));
        assert!(matches!(
            Step::method(GrandChild::type_info(), "describe", Some(Constant::Bool(true))),
            Err(ConstructionError::ArgumentCount { expected: 0, found: 1, .. })
        ));
    }

    #[test]
    fn structural_equality() {
        let a = Step::member(Target::type_info(), "name").unwrap();
        let b = Step::member(Target::type_info(), "name").unwrap();
        let c = Step::member(Target::type_info(), "age").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        let m1 = Step::method(GrandChild::type_info(), "plus_days", Some(Constant::Int(1))).unwrap();
        let m2 = Step::method(GrandChild::type_info(), "plus_days", Some(Constant::Int(2))).unwrap();
        assert_ne!(m1, m2);
    }
}
