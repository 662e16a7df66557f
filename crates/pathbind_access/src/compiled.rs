use core::any::TypeId;
use core::fmt;

use pathbind_reflect::Reflect;
use pathbind_reflect::info::MethodFn;

use crate::step::{read_field, read_item};
use crate::{Accessor, Step, Value};

type Stage = Box<dyn for<'r> Fn(Value<'r>) -> Option<Value<'r>> + Send + Sync>;

/// A getter as a plain closure, see [`CompiledGetter::into_fn`].
pub type GetterFn = dyn for<'r> Fn(&'r dyn Reflect) -> Option<Value<'r>> + Send + Sync;

#[inline]
fn stage<F>(f: F) -> Stage
where
    F: for<'r> Fn(Value<'r>) -> Option<Value<'r>> + Send + Sync + 'static,
{
    Box::new(f)
}

/// A reusable getter equivalent to [`Accessor::get_value`].
///
/// Each step is turned into a closure holding only what it needs, so a call
/// does not dispatch on the step kind.
///
/// # Examples
///
/// ```
/// use pathbind_access::Accessor;
/// use pathbind_reflect::derive::Reflect;
///
/// #[derive(Reflect)]
/// struct Line {
///     points: Vec<Point>,
/// }
///
/// #[derive(Reflect)]
/// struct Point {
///     x: i32,
/// }
///
/// let getter = Accessor::parse::<Line>(".points[1].x").unwrap().to_compiled_callable();
///
/// let line = Line { points: vec![Point { x: 1 }, Point { x: 2 }] };
/// assert_eq!(getter.call(&line).unwrap().downcast_ref::<i32>(), Some(&2));
/// assert!(getter.call(&Line { points: vec![] }).is_none());
/// ```
pub struct CompiledGetter {
    root: TypeId,
    stages: Box<[Stage]>,
}

impl CompiledGetter {
    pub(crate) fn compile(accessor: &Accessor) -> Self {
        let stages = accessor.steps().iter().map(compile_step).collect();
        Self {
            root: accessor.declaring_type().id(),
            stages,
        }
    }

    pub fn call<'r>(&self, root: &'r dyn Reflect) -> Option<Value<'r>> {
        if root.ty_id() != self.root {
            return None;
        }

        let mut current = Value::Borrowed(root);
        for stage in &self.stages {
            current = stage(current)?;
        }
        current.settle()
    }

    /// Converts into a plain boxed closure.
    pub fn into_fn(self) -> Box<GetterFn> {
        getter_fn(move |root| self.call(root))
    }
}

#[inline]
fn getter_fn<F>(f: F) -> Box<GetterFn>
where
    F: for<'r> Fn(&'r dyn Reflect) -> Option<Value<'r>> + Send + Sync + 'static,
{
    Box::new(f)
}

fn compile_step(step: &Step) -> Stage {
    match step {
        Step::Member(member) => {
            let index = member.field_index();
            stage(move |value| read_field(value.settle()?, index))
        }
        Step::Index(item) => {
            let index = item.index();
            stage(move |value| read_item(value.settle()?, index))
        }
        Step::Method(method) => {
            let func: MethodFn = method.method().func().clone();
            let arg = method.argument_value();
            stage(move |value| {
                let target = value.settle()?;
                func(&*target, arg.as_deref()).map(Value::Owned)
            })
        }
    }
}

impl fmt::Debug for CompiledGetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledGetter")
            .field("stages", &self.stages.len())
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Accessor;
    use crate::tests::{Child, GrandChild, Target};

    #[test]
    fn matches_get_value() {
        let target = Target {
            child: Some(Child {
                items: vec![GrandChild {
                    birthday: 4,
                    name: String::from("a"),
                }],
                ..Child::default()
            }),
            ..Target::default()
        };

        for path in [
            ".child.items[0].birthday",
            ".child.items[0].plus_days(2)",
            ".child.items[3].birthday",
            ".child.grand_child.birthday",
            ".name",
        ] {
            let accessor = Accessor::parse::<Target>(path).unwrap();
            let getter = accessor.to_compiled_callable();
            let expected = accessor.get_value(&target).map(|value| format!("{value:?}"));
            let compiled = getter.call(&target).map(|value| format!("{value:?}"));
            assert_eq!(expected, compiled, "{path}");
        }
    }

    #[test]
    fn boxed_fn() {
        let getter = Accessor::parse::<Target>(".age").unwrap().to_compiled_callable().into_fn();
        let target = Target {
            age: 41,
            ..Target::default()
        };
        assert_eq!(getter(&target).unwrap().downcast_ref::<i32>(), Some(&41));
        assert!(getter(&5_u8).is_none());
    }
}
