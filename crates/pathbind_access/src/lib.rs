//! Typed paths into reflected values.
//!
//! An [`Accessor`] is a validated chain of [steps](Step) from a root type to
//! a member, a list element or the result of a method. It is built once,
//! either from steps or by parsing a path such as `|x| x.child.items[i]`,
//! and then read from or written to any number of roots.
//!
//! Index expressions and method arguments inside a path are folded to
//! constants when the accessor is built, reading captured variables from
//! [`Captures`].
//!
//! Reads are safe-navigating: an absent `Option` or an out-of-range list
//! index on the way reads as `None`, and writes through it do nothing.
//!
//! # Examples
//!
//! ```
//! use pathbind_access::{Accessor, Captures};
//! use pathbind_reflect::derive::Reflect;
//!
//! #[derive(Reflect)]
//! struct Team {
//!     members: Vec<Member>,
//! }
//!
//! #[derive(Reflect)]
//! struct Member {
//!     name: String,
//! }
//!
//! let last = 1_usize;
//! let accessor = Accessor::parse_with::<Team>(
//!     "|t| t.members[last].name",
//!     &Captures::new().with("last", &last),
//! )
//! .unwrap();
//!
//! let mut team = Team {
//!     members: vec![
//!         Member { name: "Ada".into() },
//!         Member { name: "Grace".into() },
//!     ],
//! };
//! assert_eq!(accessor.get_value(&team).unwrap().downcast_ref::<String>().unwrap(), "Grace");
//!
//! accessor.set_value(&mut team, Box::new(String::from("Barbara"))).unwrap();
//! assert_eq!(team.members[1].name, "Barbara");
//!
//! let getter = accessor.to_compiled_callable();
//! assert_eq!(getter.call(&team).unwrap().downcast_ref::<String>().unwrap(), "Barbara");
//! ```

// -----------------------------------------------------------------------------
// Modules

mod accessor;
mod compiled;
mod error;
mod parser;
mod step;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use accessor::{Accessor, AccessorKind};
pub use compiled::{CompiledGetter, GetterFn};
pub use error::{AccessError, ConstructionError, FoldError, ParseError};
pub use parser::Captures;
pub use step::{Constant, IndexStep, MemberStep, MethodStep, Step};
pub use value::Value;

// -----------------------------------------------------------------------------
// Test models

#[cfg(test)]
pub(crate) mod tests {
    use pathbind_reflect::derive::Reflect;

    #[derive(Reflect, Default, Debug, Clone, PartialEq)]
    #[reflect(default)]
    pub struct Target {
        pub name: String,
        pub age: i32,
        pub child: Option<Child>,
        pub numbers: Vec<i32>,
        #[reflect(readonly)]
        pub id: u32,
    }

    #[derive(Reflect, Default, Debug, Clone, PartialEq)]
    #[reflect(default, method(label, arg))]
    pub struct Child {
        pub grand_child: Option<GrandChild>,
        pub second: GrandChild,
        pub items: Vec<GrandChild>,
    }

    impl Child {
        pub fn label(&self, prefix: String) -> String {
            format!("{prefix}{}", self.items.len())
        }
    }

    #[derive(Reflect, Default, Debug, Clone, PartialEq)]
    #[reflect(default, method(describe), method(plus_days, arg))]
    pub struct GrandChild {
        pub birthday: u32,
        pub name: String,
    }

    impl GrandChild {
        pub fn describe(&self) -> String {
            format!("{}@{}", self.name, self.birthday)
        }

        pub fn plus_days(&self, days: u32) -> u32 {
            self.birthday + days
        }
    }
}
