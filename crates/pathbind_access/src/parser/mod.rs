//! Path text to steps.
//!
//! A path is parsed into an expression tree, decomposed right-to-left into
//! raw steps with every index and argument folded to a constant, then
//! resolved left-to-right against the root [`TypeInfo`].

// -----------------------------------------------------------------------------
// Modules

mod ast;
mod captures;
mod fold;
mod lexer;
mod syntax;

// -----------------------------------------------------------------------------
// Exports

pub use captures::Captures;

use pathbind_reflect::info::TypeInfo;

use crate::{Constant, ConstructionError, FoldError, Step};
use ast::{Expr, ExprKind, is_pass_through};
use fold::{Folder, to_index};

/// A step before type resolution.
enum RawStep {
    Member(String),
    Index(usize),
    Call {
        name: String,
        args: Vec<Constant>,
        offset: usize,
    },
}

/// Parses `path` over `root` into validated steps in traversal order.
pub(crate) fn parse_steps(
    root: &'static TypeInfo,
    path: &str,
    captures: &Captures<'_>,
) -> Result<Vec<Step>, ConstructionError> {
    let body = syntax::parse(path)?;
    let raw = decompose(&body, path, captures)?;
    let steps = resolve(root, raw, path)?;
    log::trace!("parsed `{path}` over `{}` into {} step(s)", root.type_path(), steps.len());
    Ok(steps)
}

fn fold_error(expr: &Expr, path: &str, source: FoldError) -> ConstructionError {
    ConstructionError::Fold {
        offset: expr.offset,
        path: path.to_owned(),
        source,
    }
}

/// Removes pass-through coercions around `expr`.
fn strip(mut expr: &Expr) -> Result<&Expr, ConstructionError> {
    while let ExprKind::Cast { expr: inner, ty } = &expr.kind {
        if !is_pass_through(ty) {
            return Err(ConstructionError::UnsupportedCoercion { ty: ty.clone() });
        }
        expr = &**inner;
    }
    Ok(expr)
}

/// Walks from the outermost node down to the root, collecting raw steps.
fn decompose(body: &Expr, path: &str, captures: &Captures<'_>) -> Result<Vec<RawStep>, ConstructionError> {
    let folder = Folder::new(captures);

    let mut node = strip(body)?;
    if !matches!(
        node.kind,
        ExprKind::Field { .. } | ExprKind::Index { .. } | ExprKind::Call { .. }
    ) {
        return Err(ConstructionError::NotMemberAccess {
            shape: node.kind.shape(),
        });
    }

    let mut raw = Vec::new();
    loop {
        node = match &node.kind {
            ExprKind::Field { base, name } => {
                raw.push(RawStep::Member(name.clone()));
                strip(base)?
            }
            ExprKind::Index { base, index } => {
                let folded = folder.index(index).map_err(|err| fold_error(index, path, err))?;
                raw.push(RawStep::Index(folded));
                strip(base)?
            }
            ExprKind::Call { base, name, args } => {
                let folded = args
                    .iter()
                    .map(|arg| folder.constant(arg).map_err(|err| fold_error(arg, path, err)))
                    .collect::<Result<Vec<_>, _>>()?;
                raw.push(RawStep::Call {
                    name: name.clone(),
                    args: folded,
                    offset: args.first().map_or(node.offset, |arg| arg.offset),
                });
                strip(base)?
            }
            ExprKind::Root => break,
            other => {
                return Err(ConstructionError::Unrooted {
                    shape: other.shape(),
                });
            }
        };
    }

    raw.reverse();
    Ok(raw)
}

/// Resolves raw steps against the type reached so far.
fn resolve(root: &'static TypeInfo, raw: Vec<RawStep>, path: &str) -> Result<Vec<Step>, ConstructionError> {
    let mut owner = root;
    let mut steps = Vec::with_capacity(raw.len());

    for raw in raw {
        let current = owner.strip_nullable();
        let step = match raw {
            RawStep::Member(name) => Step::member(current, &name)?,
            RawStep::Index(index) => Step::index(current, index)?,
            RawStep::Call { name, args, offset } if name == "get" && current.as_list().is_some() => {
                list_get(current, args, offset, path)?
            }
            RawStep::Call { name, mut args, .. } => {
                if args.len() > 1 {
                    return Err(too_many_arguments(current, &name, args.len()));
                }
                Step::method(current, &name, args.pop())?
            }
        };
        owner = step.value_info();
        steps.push(step);
    }

    Ok(steps)
}

/// `list.get(i)` is an index step.
fn list_get(
    owner: &'static TypeInfo,
    args: Vec<Constant>,
    offset: usize,
    path: &str,
) -> Result<Step, ConstructionError> {
    let index = match <[Constant; 1]>::try_from(args) {
        Ok([Constant::Int(index)]) => to_index(index).map_err(|source| ConstructionError::Fold {
            offset,
            path: path.to_owned(),
            source,
        })?,
        Ok([other]) => {
            return Err(ConstructionError::ArgumentType {
                method: "get",
                expected: "usize",
                found: format!("{} `{other}`", other.kind()),
            });
        }
        Err(args) => {
            return Err(ConstructionError::ArgumentCount {
                method: "get",
                expected: 1,
                found: args.len(),
            });
        }
    };
    Step::index(owner, index)
}

fn too_many_arguments(owner: &'static TypeInfo, name: &str, found: usize) -> ConstructionError {
    match owner.as_struct().and_then(|info| info.method(name)) {
        Some(method) => ConstructionError::ArgumentCount {
            method: method.name(),
            expected: method.arity(),
            found,
        },
        None => ConstructionError::UnknownMethod {
            owner: owner.type_path(),
            name: name.to_owned(),
        },
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use pathbind_reflect::info::Typed;

    use super::{Captures, parse_steps};
    use crate::tests::{Child, GrandChild, Target};
    use crate::{Accessor, ConstructionError, FoldError, Step};

    fn parse(path: &str) -> Result<Vec<Step>, ConstructionError> {
        parse_steps(Target::type_info(), path, &Captures::new())
    }

    #[test]
    fn resolves_left_to_right() {
        let steps = parse("|x| x.child.items[1].birthday").unwrap();
        let tokens: Vec<_> = steps.iter().map(Step::token).collect();
        assert_eq!(tokens, ["child", "items", "[1]", "birthday"]);
        assert!(steps[0].owner_type().is::<Target>());
        assert!(steps[1].owner_type().is::<Child>());
        assert!(steps[3].owner_type().is::<GrandChild>());
    }

    #[test]
    fn coercions_are_stripped() {
        let plain = parse("|x| x.child.second").unwrap();
        assert!(parse("|x| x.child.second as _").unwrap() == plain);
        assert!(parse("|x| (x.child as _).second as &dyn Reflect").unwrap() == plain);
        assert!(matches!(
            parse("|x| x.age as u64"),
            Err(ConstructionError::UnsupportedCoercion { .. })
        ));
    }

    #[test]
    fn get_is_an_indexer() {
        let by_get = parse("|x| x.numbers.get(2)").unwrap();
        let by_index = parse("|x| x.numbers[2]").unwrap();
        assert!(by_get == by_index);

        assert!(matches!(
            parse("|x| x.numbers.get(\"a\")"),
            Err(ConstructionError::ArgumentType { .. })
        ));
        assert!(matches!(
            parse("|x| x.numbers.get(1, 2)"),
            Err(ConstructionError::ArgumentCount { expected: 1, found: 2, .. })
        ));
        assert!(matches!(
            parse("|x| x.numbers.get(-1)"),
            Err(ConstructionError::Fold {
                source: FoldError::NegativeIndex { value: -1 },
                ..
            })
        ));
    }

    #[test]
    fn not_member_access() {
        for (path, shape) in [
            ("|x| x", "the bare parameter"),
            ("|x| x.age > 3", "a comparison"),
            ("|x| x is Target", "a type test"),
            ("|x| 42", "an integer literal"),
            (".age + 1", "an arithmetic operation"),
        ] {
            match parse(path) {
                Err(ConstructionError::NotMemberAccess { shape: found }) => assert_eq!(found, shape),
                other => panic!("`{path}` gave {other:?}"),
            }
        }

        assert!(matches!(
            parse("|x| other.age"),
            Err(ConstructionError::Unrooted { .. })
        ));
    }

    #[test]
    fn unknown_members_and_methods() {
        assert!(matches!(
            parse(".child.nope"),
            Err(ConstructionError::UnknownMember { owner, .. }) if owner.ends_with("Child")
        ));
        assert!(matches!(parse(".child.nope()"), Err(ConstructionError::UnknownMethod { .. })));
        assert!(matches!(parse(".name[0]"), Err(ConstructionError::NotIndexable { .. })));
        assert!(matches!(
            parse(".child.second.plus_days(1, 2)"),
            Err(ConstructionError::ArgumentCount { expected: 1, found: 2, .. })
        ));
        assert!(matches!(
            parse(".child.second.plus_days(true)"),
            Err(ConstructionError::ArgumentType { .. })
        ));
    }

    #[test]
    fn fold_errors_carry_offsets() {
        let err = parse("|x| x.numbers[x.age]").unwrap_err();
        let ConstructionError::Fold { offset, path, source } = err else {
            panic!("expected a fold error");
        };
        assert_eq!(offset, 14);
        assert_eq!(path, "|x| x.numbers[x.age]");
        assert_eq!(source, FoldError::RootDependent);

        assert!(matches!(
            parse(".numbers[i]"),
            Err(ConstructionError::Fold {
                source: FoldError::UnknownCapture { .. },
                ..
            })
        ));
        assert!(matches!(
            parse(".numbers[1 / 0]"),
            Err(ConstructionError::Fold {
                source: FoldError::DivisionByZero,
                ..
            })
        ));
    }

    #[test]
    fn parse_errors_surface() {
        let err = Accessor::parse::<Target>("|x| x.").unwrap_err();
        assert!(matches!(err, ConstructionError::Parse(ref parse) if parse.offset == 6));
        assert_eq!(
            err.to_string(),
            "expected a member name, found end of path at offset 6 in `|x| x.`"
        );
    }

    #[test]
    fn folding_happens_once() {
        let mut i = 2_usize;
        let accessor = Accessor::parse_with::<Target>(
            "|x| x.numbers[i]",
            &Captures::new().with("i", &i),
        )
        .unwrap();
        i = 5;

        let target = Target {
            numbers: vec![0, 10, 20, 30, 40, 50],
            ..Target::default()
        };
        assert_eq!(i, 5);
        assert_eq!(accessor.name(), "numbers[2]");
        assert_eq!(accessor.get_value(&target).unwrap().downcast_ref::<i32>(), Some(&20));
    }
}
