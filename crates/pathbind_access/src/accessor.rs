use core::fmt;
use core::hash::{Hash, Hasher};
use std::borrow::Cow;
use std::sync::Arc;

use pathbind_reflect::Reflect;
use pathbind_reflect::info::{ReflectKind, Type, TypeInfo, Typed};
use pathbind_reflect::ops::ReflectMut;

use crate::parser::{self, Captures};
use crate::{AccessError, CompiledGetter, Constant, ConstructionError, Step, Value};

// -----------------------------------------------------------------------------
// AccessorKind

/// The shape of an [`Accessor`].
///
/// A single step is never stored as a chain.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum AccessorKind {
    Member(Step),
    Index(Step),
    Method(Step),
    Chain(Arc<[Step]>),
}

// -----------------------------------------------------------------------------
// Accessor

/// A validated path from a root type to a member, element or method result.
///
/// Built once, evaluated many times. Reads navigate safely: an absent
/// `Option` or an out-of-range index anywhere on the way reads as `None`,
/// and writes through such a path are no-ops.
///
/// # Examples
///
/// ```
/// use pathbind_access::Accessor;
/// use pathbind_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct Order {
///     customer: Option<Customer>,
/// }
///
/// #[derive(Reflect)]
/// struct Customer {
///     name: String,
/// }
///
/// let name = Accessor::parse::<Order>("|o| o.customer.name").unwrap();
/// assert_eq!(name.name(), "customername");
/// assert!(name.declaring_type().is::<Order>());
/// assert!(name.owner_type().is::<Customer>());
///
/// let mut order = Order { customer: None };
/// assert!(name.get_value(&order).is_none());
///
/// // no intermediate object is created
/// name.set_value(&mut order, Box::new(String::from("Ada"))).unwrap();
/// assert!(order.customer.is_none());
///
/// order.customer = Some(Customer { name: String::new() });
/// name.set_value(&mut order, Box::new(String::from("Ada"))).unwrap();
/// assert_eq!(order.customer.unwrap().name, "Ada");
/// ```
#[derive(Clone)]
pub struct Accessor {
    kind: AccessorKind,
    name: Arc<str>,
}

impl Accessor {
    /// Builds an accessor from steps in traversal order.
    ///
    /// Each step must be declared on the value type of the previous one,
    /// ignoring `Option` wrappers.
    pub fn from_steps(steps: impl IntoIterator<Item = Step>) -> Result<Self, ConstructionError> {
        let steps: Vec<Step> = steps.into_iter().collect();
        if steps.is_empty() {
            return Err(ConstructionError::EmptyPath);
        }

        for (index, pair) in steps.windows(2).enumerate() {
            let expected = pair[0].value_info().strip_nullable().ty();
            let found = pair[1].owner_type();
            if expected != found {
                return Err(ConstructionError::Disconnected {
                    index: index + 1,
                    expected: expected.path(),
                    found: found.path(),
                });
            }
        }

        Ok(Self::assemble(steps))
    }

    fn assemble(mut steps: Vec<Step>) -> Self {
        let name: String = steps.iter().map(Step::token).collect();
        let kind = match steps.len() {
            1 => match steps.pop() {
                Some(step @ Step::Member(_)) => AccessorKind::Member(step),
                Some(step @ Step::Index(_)) => AccessorKind::Index(step),
                Some(step @ Step::Method(_)) => AccessorKind::Method(step),
                None => unreachable!("length was checked"),
            },
            _ => AccessorKind::Chain(steps.into()),
        };

        Self {
            kind,
            name: name.into(),
        }
    }

    /// A single field of `T`.
    pub fn member<T: Typed>(name: &str) -> Result<Self, ConstructionError> {
        Step::member(T::type_info(), name).map(|step| Self::assemble(vec![step]))
    }

    /// A single element of the list or array type `L`.
    pub fn index<L: Typed>(index: usize) -> Result<Self, ConstructionError> {
        Step::index(L::type_info(), index).map(|step| Self::assemble(vec![step]))
    }

    /// A single method of `T`.
    pub fn method<T: Typed>(name: &str, arg: Option<Constant>) -> Result<Self, ConstructionError> {
        Step::method(T::type_info(), name, arg).map(|step| Self::assemble(vec![step]))
    }

    /// Parses a path over `T` without captured variables.
    ///
    /// See [`parse_with`](Self::parse_with) for the syntax.
    pub fn parse<T: Typed>(path: &str) -> Result<Self, ConstructionError> {
        Self::parse_with::<T>(path, &Captures::new())
    }

    /// Parses a path over `T`.
    ///
    /// The path is either a closure, `|x| x.child.items[i + 1]`, or a rooted
    /// shorthand, `.child.items[i + 1]`. Index expressions and method
    /// arguments are folded to constants now, reading captured variables
    /// from `captures`; later changes to those variables do not affect the
    /// accessor.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_access::{Accessor, Captures};
    /// use pathbind_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect)]
    /// struct Scores {
    ///     values: Vec<u32>,
    /// }
    ///
    /// #[derive(Reflect)]
    /// struct Cursor {
    ///     position: usize,
    /// }
    ///
    /// let mut cursor = Cursor { position: 1 };
    /// let second = Accessor::parse_with::<Scores>(
    ///     "|s| s.values[cursor.position]",
    ///     &Captures::new().with("cursor", &cursor),
    /// )
    /// .unwrap();
    /// cursor.position = 0;
    ///
    /// let scores = Scores { values: vec![10, 20] };
    /// assert_eq!(second.name(), "values[1]");
    /// assert_eq!(second.get_value(&scores).unwrap().downcast_ref::<u32>(), Some(&20));
    /// ```
    pub fn parse_with<T: Typed>(path: &str, captures: &Captures<'_>) -> Result<Self, ConstructionError> {
        Self::parse_for(T::type_info(), path, captures)
    }

    /// Parses a path over the type described by `root`.
    pub fn parse_for(
        root: &'static TypeInfo,
        path: &str,
        captures: &Captures<'_>,
    ) -> Result<Self, ConstructionError> {
        parser::parse_steps(root, path, captures).map(Self::assemble)
    }

    // -------------------------------------------------------------------------
    // Shape

    #[inline]
    pub fn kind(&self) -> &AccessorKind {
        &self.kind
    }

    /// Steps in traversal order, never empty.
    #[inline]
    pub fn steps(&self) -> &[Step] {
        match &self.kind {
            AccessorKind::Member(step) | AccessorKind::Index(step) | AccessorKind::Method(step) => {
                core::slice::from_ref(step)
            }
            AccessorKind::Chain(steps) => steps,
        }
    }

    #[inline]
    fn first(&self) -> &Step {
        &self.steps()[0]
    }

    #[inline]
    fn last(&self) -> &Step {
        let steps = self.steps();
        &steps[steps.len() - 1]
    }

    /// Step tokens concatenated in traversal order, e.g. `childitems[2]`.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The final member name, prefixed with the previous token when the
    /// path ends in an index or method.
    pub fn field_name(&self) -> Cow<'_, str> {
        let steps = self.steps();
        match (steps, self.last()) {
            (_, Step::Member(_)) | ([_], _) => self.last().token(),
            (_, last) => {
                let previous = steps[steps.len() - 2].token();
                Cow::Owned(format!("{previous}{}", last.token()))
            }
        }
    }

    /// The type the accessor is evaluated against.
    #[inline]
    pub fn declaring_type(&self) -> &'static Type {
        self.first().owner_type()
    }

    /// The type declaring the final step.
    #[inline]
    pub fn owner_type(&self) -> &'static Type {
        self.last().owner_type()
    }

    /// The declared type of the final value, possibly an `Option`.
    #[inline]
    pub fn value_type(&self) -> &'static Type {
        self.last().value_type()
    }

    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        self.last().value_info()
    }

    /// Whether [`set_value`](Self::set_value) can succeed.
    ///
    /// The final step must be writable and no step may be a method, since
    /// method results are temporaries.
    pub fn is_writable(&self) -> bool {
        self.last().is_writable() && !self.steps().iter().any(|step| matches!(step, Step::Method(_)))
    }

    // -------------------------------------------------------------------------
    // Composition

    /// This path with `step` in front.
    pub fn prepend(&self, step: Step) -> Result<Self, ConstructionError> {
        Self::from_steps(core::iter::once(step).chain(self.steps().iter().cloned()))
    }

    /// This path with all of `parent`'s steps in front.
    pub fn prepend_accessor(&self, parent: &Accessor) -> Result<Self, ConstructionError> {
        parent.child_accessor(self)
    }

    /// This path followed by all of `child`'s steps.
    pub fn child_accessor(&self, child: &Accessor) -> Result<Self, ConstructionError> {
        Self::from_steps(self.steps().iter().chain(child.steps()).cloned())
    }

    /// This path followed by `path`, parsed against this accessor's value
    /// type.
    ///
    /// # Examples
    ///
    /// ```
    /// use pathbind_access::{Accessor, Captures};
    /// use pathbind_reflect::derive::Reflect;
    ///
    /// #[derive(Reflect)]
    /// struct Outer {
    ///     inner: Inner,
    /// }
    ///
    /// #[derive(Reflect)]
    /// struct Inner {
    ///     flags: Vec<bool>,
    /// }
    ///
    /// let inner = Accessor::parse::<Outer>(".inner").unwrap();
    /// let flag = inner.child_path(".flags[0]", &Captures::new()).unwrap();
    /// assert_eq!(flag, Accessor::parse::<Outer>(".inner.flags[0]").unwrap());
    /// ```
    pub fn child_path(&self, path: &str, captures: &Captures<'_>) -> Result<Self, ConstructionError> {
        let child = Self::parse_for(self.value_info().strip_nullable(), path, captures)?;
        self.child_accessor(&child)
    }

    // -------------------------------------------------------------------------
    // Evaluation

    /// Reads the value at the end of the path.
    ///
    /// Returns `None` if any value on the way is absent, if an index is out
    /// of range, or if `root` is not of the declaring type. A final `Option`
    /// is unwrapped.
    pub fn get_value<'r>(&self, root: &'r dyn Reflect) -> Option<Value<'r>> {
        if root.ty_id() != self.declaring_type().id() {
            return None;
        }

        let mut current = Value::Borrowed(root);
        for step in self.steps() {
            current = step.read(current.settle()?)?;
        }
        current.settle()
    }

    /// Writes `value` at the end of the path.
    ///
    /// A value of `T` is accepted for a final `Option<T>` and wrapped in
    /// `Some`. If any value on the way is absent nothing happens and `Ok` is
    /// returned; intermediate values are never created.
    ///
    /// # Errors
    ///
    /// Errors that do not depend on the data, checked before anything is
    /// touched: the path is not [writable](Self::is_writable), `root` is not
    /// of the declaring type, or `value` has the wrong type.
    pub fn set_value(&self, root: &mut dyn Reflect, value: Box<dyn Reflect>) -> Result<(), AccessError> {
        if !self.is_writable() {
            return Err(AccessError::ReadOnly {
                name: self.name.to_string(),
            });
        }

        let expected = self.declaring_type();
        if root.ty_id() != expected.id() {
            return Err(AccessError::RootMismatch {
                expected: expected.path(),
                found: root.reflect_type_path(),
            });
        }

        let value = self.prepare(value)?;

        let (last, init) = match self.steps().split_last() {
            Some(split) => split,
            None => return Ok(()),
        };

        let mut current = root;
        for step in init {
            let Some(next) = settle_mut(current).and_then(|target| step.read_mut(target)) else {
                return Ok(());
            };
            current = next;
        }

        let Some(slot) = settle_mut(current).and_then(|target| last.read_mut(target)) else {
            return Ok(());
        };

        slot.set(value).map_err(|value| AccessError::TypeMismatch {
            expected: self.value_type().path(),
            found: value.reflect_type_path(),
        })
    }

    /// Checks `value` against the value type, wrapping a bare `T` for a
    /// final `Option<T>`.
    fn prepare(&self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, AccessError> {
        let expected = self.value_info();
        if value.ty_id() == expected.type_id() {
            return Ok(value);
        }

        let mismatch = |found: &dyn Reflect| AccessError::TypeMismatch {
            expected: expected.type_path(),
            found: found.reflect_type_path(),
        };

        match expected.as_nullable() {
            Some(nullable) if value.ty_id() == nullable.inner().id() => {
                nullable.some(value).map_err(|value| mismatch(&*value))
            }
            _ => Err(mismatch(&*value)),
        }
    }

    /// A getter with each step specialised up front.
    ///
    /// Behaves exactly like [`get_value`](Self::get_value).
    pub fn to_compiled_callable(&self) -> CompiledGetter {
        CompiledGetter::compile(self)
    }
}

/// Unwraps every `Option` layer of a mutable value.
fn settle_mut(mut current: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
    while current.reflect_kind() == ReflectKind::Nullable {
        current = match current.reflect_mut() {
            ReflectMut::Nullable(nullable) => nullable.get_mut()?,
            _ => return None,
        };
    }
    Some(current)
}

impl PartialEq for Accessor {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.steps() == other.steps()
    }
}

impl Eq for Accessor {}

impl Hash for Accessor {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.steps().hash(state);
    }
}

/// Renders the rooted path syntax, e.g. `.child.items[2].describe()`.
impl fmt::Display for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.steps().iter().try_for_each(|step| step.write_path(f))
    }
}

impl fmt::Debug for Accessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Accessor({}{self})", self.declaring_type().name())
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use pathbind_reflect::info::Typed;
    use pathbind_utils::hash::FixedHashState;

    use super::{Accessor, AccessorKind};
    use crate::tests::{Child, GrandChild, Target};
    use crate::{AccessError, Constant, ConstructionError, Step};

    fn populated() -> Target {
        Target {
            name: String::from("root"),
            child: Some(Child {
                grand_child: Some(GrandChild {
                    birthday: 10,
                    name: String::from("gc"),
                }),
                items: vec![GrandChild::default(), GrandChild {
                    birthday: 2,
                    name: String::from("second"),
                }],
                ..Child::default()
            }),
            ..Target::default()
        }
    }

    #[test]
    fn single_step_shapes() {
        let member = Accessor::member::<Target>("name").unwrap();
        assert!(matches!(member.kind(), AccessorKind::Member(_)));

        let index = Accessor::index::<Vec<i32>>(3).unwrap();
        assert!(matches!(index.kind(), AccessorKind::Index(_)));
        assert_eq!(index.name(), "[3]");

        let method = Accessor::method::<GrandChild>("describe", None).unwrap();
        assert!(matches!(method.kind(), AccessorKind::Method(_)));
        assert!(!method.is_writable());
    }

    #[test]
    fn types_of_a_chain() {
        let accessor = Accessor::parse::<Target>(".child.grand_child.birthday").unwrap();
        assert!(matches!(accessor.kind(), AccessorKind::Chain(_)));
        assert_eq!(accessor.name(), "childgrand_childbirthday");
        assert_eq!(accessor.to_string(), ".child.grand_child.birthday");
        assert_eq!(format!("{accessor:?}"), "Accessor(Target.child.grand_child.birthday)");
        assert!(accessor.declaring_type().is::<Target>());
        assert!(accessor.owner_type().is::<GrandChild>());
        assert!(accessor.value_type().is::<u32>());
        assert_eq!(accessor.field_name(), "birthday");

        let item = Accessor::parse::<Target>(".numbers[1]").unwrap();
        assert_eq!(item.field_name(), "numbers[1]");
        assert!(item.owner_type().is::<Vec<i32>>());
    }

    #[test]
    fn safe_navigation() {
        let accessor = Accessor::parse::<Target>(".child.grand_child.birthday").unwrap();

        let empty = Target::default();
        assert!(accessor.get_value(&empty).is_none());

        let mut partial = Target::default();
        partial.child = Some(Child::default());
        assert!(accessor.get_value(&partial).is_none());

        let full = populated();
        assert_eq!(accessor.get_value(&full).unwrap().downcast_ref::<u32>(), Some(&10));

        let out_of_range = Accessor::parse::<Target>(".child.items[7].name").unwrap();
        assert!(out_of_range.get_value(&full).is_none());

        let wrong_root = 5_u8;
        assert!(accessor.get_value(&wrong_root).is_none());
    }

    #[test]
    fn final_option_is_unwrapped() {
        let accessor = Accessor::parse::<Target>(".child").unwrap();
        let full = populated();
        let child = accessor.get_value(&full).unwrap();
        assert!(child.is::<Child>());
        assert!(accessor.get_value(&Target::default()).is_none());
    }

    #[test]
    fn methods_produce_owned_values() {
        let accessor = Accessor::parse::<Target>(".child.items[1].plus_days(5)").unwrap();
        let root = populated();
        let value = accessor.get_value(&root).unwrap();
        assert!(value.is_owned());
        assert_eq!(value.downcast_ref::<u32>(), Some(&7));

        let describe = Accessor::parse::<Target>(".child.grand_child.describe()").unwrap();
        assert_eq!(
            describe.get_value(&root).unwrap().downcast_ref::<String>().map(String::as_str),
            Some("gc@10")
        );
    }

    #[test]
    fn set_through_chain() {
        let accessor = Accessor::parse::<Target>(".child.grand_child.birthday").unwrap();

        let mut target = Target::default();
        accessor.set_value(&mut target, Box::new(3_u32)).unwrap();
        assert!(target.child.is_none());

        target = populated();
        accessor.set_value(&mut target, Box::new(3_u32)).unwrap();
        assert_eq!(target.child.unwrap().grand_child.unwrap().birthday, 3);
    }

    #[test]
    fn set_list_items() {
        let accessor = Accessor::parse::<Target>(".numbers[1]").unwrap();
        let mut target = Target {
            numbers: vec![1, 2, 3],
            ..Target::default()
        };
        accessor.set_value(&mut target, Box::new(20_i32)).unwrap();
        assert_eq!(target.numbers, [1, 20, 3]);

        target.numbers.truncate(1);
        accessor.set_value(&mut target, Box::new(30_i32)).unwrap();
        assert_eq!(target.numbers, [1]);
    }

    #[test]
    fn set_optional_slot() {
        let accessor = Accessor::parse::<Target>(".child.grand_child").unwrap();
        let mut target = populated();

        accessor.set_value(&mut target, Box::new(None::<GrandChild>)).unwrap();
        assert!(target.child.as_ref().unwrap().grand_child.is_none());

        accessor
            .set_value(&mut target, Box::new(GrandChild { birthday: 4, name: String::new() }))
            .unwrap();
        assert_eq!(target.child.unwrap().grand_child.unwrap().birthday, 4);
    }

    #[test]
    fn structural_write_errors() {
        let mut target = populated();

        let read_only = Accessor::parse::<Target>(".id").unwrap();
        assert!(matches!(
            read_only.set_value(&mut target, Box::new(1_u32)),
            Err(AccessError::ReadOnly { .. })
        ));

        let method = Accessor::parse::<Target>(".child.grand_child.describe()").unwrap();
        assert!(matches!(
            method.set_value(&mut target, Box::new(String::new())),
            Err(AccessError::ReadOnly { .. })
        ));

        let name = Accessor::parse::<Target>(".name").unwrap();
        assert!(matches!(
            name.set_value(&mut target, Box::new(1_u8)),
            Err(AccessError::TypeMismatch { .. })
        ));

        let mut other = GrandChild::default();
        assert!(matches!(
            name.set_value(&mut other, Box::new(String::new())),
            Err(AccessError::RootMismatch { .. })
        ));

        // a type error is reported even when the path is absent
        let deep = Accessor::parse::<Target>(".child.grand_child.birthday").unwrap();
        let mut empty = Target::default();
        assert!(deep.set_value(&mut empty, Box::new(1_i64)).is_err());
    }

    #[test]
    fn structural_equality() {
        let a = Accessor::parse::<Target>("|x| x.child.grand_child.birthday").unwrap();
        let b = Accessor::parse::<Target>(".child.grand_child.birthday").unwrap();
        let shorter = Accessor::parse::<Target>(".child.grand_child").unwrap();
        let other = Accessor::parse::<Target>(".child.second.birthday").unwrap();

        assert_eq!(a, b);
        assert_eq!(FixedHashState.hash_one(&a), FixedHashState.hash_one(&b));
        assert_ne!(a, shorter);
        assert_ne!(a, other);
    }

    #[test]
    fn composition() {
        let child = Accessor::member::<Target>("child").unwrap();
        let birthday = Accessor::parse::<Child>(".grand_child.birthday").unwrap();

        let full = child.child_accessor(&birthday).unwrap();
        assert_eq!(full, Accessor::parse::<Target>(".child.grand_child.birthday").unwrap());
        assert_eq!(birthday.prepend_accessor(&child).unwrap(), full);

        let step = Step::member(Target::type_info(), "child").unwrap();
        assert_eq!(birthday.prepend(step).unwrap(), full);

        let promoted = Accessor::member::<GrandChild>("birthday")
            .unwrap()
            .prepend(Step::member(Child::type_info(), "second").unwrap())
            .unwrap();
        assert!(matches!(promoted.kind(), AccessorKind::Chain(_)));

        assert!(matches!(
            birthday.child_accessor(&child),
            Err(ConstructionError::Disconnected { index: 2, .. })
        ));
        assert!(matches!(Accessor::from_steps([]), Err(ConstructionError::EmptyPath)));
    }

    #[test]
    fn display_round_trips() {
        for path in [".child.items[1].plus_days(5)", ".child.second.describe()", ".numbers[0]"] {
            let accessor = Accessor::parse::<Target>(path).unwrap();
            assert_eq!(accessor.to_string(), path);
            assert_eq!(Accessor::parse::<Target>(&accessor.to_string()).unwrap(), accessor);
        }

        let method = Accessor::method::<Child>("label", Some(Constant::Str("a\"b".into()))).unwrap();
        assert_eq!(method.to_string(), r#".label("a\"b")"#);
        assert_eq!(Accessor::parse::<Child>(&method.to_string()).unwrap(), method);
    }
}
