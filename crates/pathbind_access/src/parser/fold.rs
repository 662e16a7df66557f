use pathbind_reflect::Reflect;
use pathbind_reflect::ops::ReflectRef;

use super::Captures;
use super::ast::{BinaryOp, Expr, ExprKind, UnaryOp, is_pass_through};
use crate::{Constant, FoldError};

/// An intermediate folding result: a constant, or a captured value that is
/// read further.
enum Folded<'a> {
    Const(Constant),
    Ref(&'a dyn Reflect),
}

/// Reduces sub-expressions to constants, reading captured values.
pub(crate) struct Folder<'c, 'a> {
    captures: &'c Captures<'a>,
}

impl<'c, 'a> Folder<'c, 'a> {
    #[inline]
    pub(crate) fn new(captures: &'c Captures<'a>) -> Self {
        Self { captures }
    }

    pub(crate) fn constant(&self, expr: &Expr) -> Result<Constant, FoldError> {
        match self.fold(expr)? {
            Folded::Const(constant) => Ok(constant),
            Folded::Ref(value) => reflect_constant(settle(value).ok_or(FoldError::AbsentValue)?),
        }
    }

    pub(crate) fn index(&self, expr: &Expr) -> Result<usize, FoldError> {
        match self.constant(expr)? {
            Constant::Int(value) => to_index(value),
            other => Err(FoldError::Expected {
                expected: "an integer index",
                found: other.kind(),
            }),
        }
    }

    fn fold(&self, expr: &Expr) -> Result<Folded<'a>, FoldError> {
        match &expr.kind {
            ExprKind::Root => Err(FoldError::RootDependent),
            ExprKind::Ident(name) => self
                .captures
                .get(name)
                .map(Folded::Ref)
                .ok_or_else(|| FoldError::UnknownCapture { name: name.clone() }),
            ExprKind::Int(value) => Ok(Folded::Const(Constant::Int(*value))),
            ExprKind::Str(value) => Ok(Folded::Const(Constant::Str(value.clone()))),
            ExprKind::Bool(value) => Ok(Folded::Const(Constant::Bool(*value))),
            ExprKind::Field { base, name } => self.field(base, name),
            ExprKind::Index { base, index } => {
                let index = self.index(index)?;
                self.item(base, index)
            }
            ExprKind::Unary { op, operand } => unary(*op, self.constant(operand)?).map(Folded::Const),
            ExprKind::Binary { op, lhs, rhs } => self.binary(*op, lhs, rhs).map(Folded::Const),
            ExprKind::Cast { expr, ty } => {
                if is_pass_through(ty) {
                    self.fold(expr)
                } else {
                    cast(self.constant(expr)?, ty).map(Folded::Const)
                }
            }
            ExprKind::Call { .. } | ExprKind::TypeTest { .. } => Err(FoldError::NotConstant {
                shape: expr.kind.shape(),
            }),
        }
    }

    fn field(&self, base: &Expr, name: &str) -> Result<Folded<'a>, FoldError> {
        let value = match self.fold(base)? {
            Folded::Ref(value) => value,
            Folded::Const(constant) => {
                return Err(FoldError::NoField {
                    owner: constant.kind(),
                    name: name.to_owned(),
                });
            }
        };

        let value = settle(value).ok_or_else(|| FoldError::Absent {
            name: name.to_owned(),
        })?;
        let no_field = || FoldError::NoField {
            owner: value.reflect_type_path(),
            name: name.to_owned(),
        };

        match value.reflect_ref() {
            ReflectRef::Struct(data) => data.field(name).map(Folded::Ref).ok_or_else(no_field),
            _ => Err(no_field()),
        }
    }

    fn item(&self, base: &Expr, index: usize) -> Result<Folded<'a>, FoldError> {
        let value = match self.fold(base)? {
            Folded::Ref(value) => value,
            Folded::Const(constant) => {
                return Err(FoldError::Expected {
                    expected: "a list",
                    found: constant.kind(),
                });
            }
        };

        let value = settle(value).ok_or_else(|| FoldError::Absent {
            name: format!("[{index}]"),
        })?;

        match value.reflect_ref() {
            ReflectRef::List(data) => data.get(index).map(Folded::Ref).ok_or(FoldError::OutOfRange {
                index,
                len: data.len(),
            }),
            _ => Err(FoldError::Expected {
                expected: "a list",
                found: value.reflect_type_path(),
            }),
        }
    }

    fn binary(&self, op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Result<Constant, FoldError> {
        let lhs = self.constant(lhs)?;

        if matches!(op, BinaryOp::And | BinaryOp::Or) {
            let Constant::Bool(left) = lhs else {
                return Err(operand(op, lhs.kind()));
            };
            // short-circuits
            if left == matches!(op, BinaryOp::Or) {
                return Ok(Constant::Bool(left));
            }
            return match self.constant(rhs)? {
                Constant::Bool(right) => Ok(Constant::Bool(right)),
                other => Err(operand(op, other.kind())),
            };
        }

        binary(op, lhs, self.constant(rhs)?)
    }
}

/// Unwraps every `Option` layer of a captured value.
fn settle(mut value: &dyn Reflect) -> Option<&dyn Reflect> {
    loop {
        match value.reflect_ref() {
            ReflectRef::Nullable(nullable) => value = nullable.get()?,
            _ => return Some(value),
        }
    }
}

fn reflect_constant(value: &dyn Reflect) -> Result<Constant, FoldError> {
    macro_rules! read_int {
        ($($ty:ty),*) => {$(
            if let Some(value) = value.downcast_ref::<$ty>() {
                return i128::try_from(*value)
                    .map(Constant::Int)
                    .map_err(|_| FoldError::Overflow);
            }
        )*};
    }

    read_int!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

    if let Some(value) = value.downcast_ref::<String>() {
        return Ok(Constant::Str(value.clone()));
    }
    if let Some(value) = value.downcast_ref::<bool>() {
        return Ok(Constant::Bool(*value));
    }
    Err(FoldError::Unreadable {
        ty: value.reflect_type_path(),
    })
}

pub(crate) fn to_index(value: i128) -> Result<usize, FoldError> {
    if value < 0 {
        return Err(FoldError::NegativeIndex { value });
    }
    usize::try_from(value).map_err(|_| FoldError::Overflow)
}

#[inline]
fn operand(op: BinaryOp, found: &str) -> FoldError {
    FoldError::Operand {
        op: op.symbol(),
        found: found.to_owned(),
    }
}

fn unary(op: UnaryOp, value: Constant) -> Result<Constant, FoldError> {
    match (op, value) {
        (UnaryOp::Neg, Constant::Int(value)) => {
            value.checked_neg().map(Constant::Int).ok_or(FoldError::Overflow)
        }
        (UnaryOp::Not, Constant::Bool(value)) => Ok(Constant::Bool(!value)),
        (op, value) => Err(FoldError::Operand {
            op: op.symbol(),
            found: value.kind().to_owned(),
        }),
    }
}

fn binary(op: BinaryOp, lhs: Constant, rhs: Constant) -> Result<Constant, FoldError> {
    use core::cmp::Ordering;

    let ordering = match (&lhs, &rhs) {
        (Constant::Int(a), Constant::Int(b)) => {
            let (a, b) = (*a, *b);
            let arithmetic = match op {
                BinaryOp::Add => Some(a.checked_add(b)),
                BinaryOp::Sub => Some(a.checked_sub(b)),
                BinaryOp::Mul => Some(a.checked_mul(b)),
                BinaryOp::Div | BinaryOp::Rem if b == 0 => return Err(FoldError::DivisionByZero),
                BinaryOp::Div => Some(a.checked_div(b)),
                BinaryOp::Rem => Some(a.checked_rem(b)),
                _ => None,
            };
            if let Some(result) = arithmetic {
                return result.map(Constant::Int).ok_or(FoldError::Overflow);
            }
            Some(a.cmp(&b))
        }
        (Constant::Str(a), Constant::Str(b)) => Some(a.cmp(b)),
        (Constant::Bool(a), Constant::Bool(b)) if matches!(op, BinaryOp::Eq | BinaryOp::Ne) => {
            Some(a.cmp(b))
        }
        _ => None,
    };

    let result = match (op, ordering) {
        (BinaryOp::Eq, Some(ordering)) => ordering == Ordering::Equal,
        (BinaryOp::Ne, Some(ordering)) => ordering != Ordering::Equal,
        (BinaryOp::Lt, Some(ordering)) => ordering == Ordering::Less,
        (BinaryOp::Le, Some(ordering)) => ordering != Ordering::Greater,
        (BinaryOp::Gt, Some(ordering)) => ordering == Ordering::Greater,
        (BinaryOp::Ge, Some(ordering)) => ordering != Ordering::Less,
        _ => {
            let found = if lhs.kind() == rhs.kind() {
                lhs.kind().to_owned()
            } else {
                format!("{} and {}", lhs.kind(), rhs.kind())
            };
            return Err(operand(op, &found));
        }
    };
    Ok(Constant::Bool(result))
}

/// Checked integer coercion; the value must fit the target type.
fn cast(value: Constant, ty: &str) -> Result<Constant, FoldError> {
    macro_rules! fits {
        ($value:ident, $ty:ident: $($int:ident),*) => {
            match $ty {
                $(stringify!($int) => $int::try_from($value).is_ok(),)*
                _ => return Err(FoldError::UnsupportedCoercion { ty: $ty.to_owned() }),
            }
        };
    }

    let value = match value {
        Constant::Int(value) => value,
        Constant::Bool(value) => i128::from(value),
        Constant::Str(_) => return Err(FoldError::UnsupportedCoercion { ty: ty.to_owned() }),
    };

    if fits!(value, ty: u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize) {
        Ok(Constant::Int(value))
    } else {
        Err(FoldError::Overflow)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use pathbind_reflect::Reflect;

    use super::Folder;
    use crate::parser::Captures;
    use crate::parser::ast::ExprKind;
    use crate::parser::syntax::parse;
    use crate::tests::{Child, GrandChild};
    use crate::{Constant, FoldError};

    fn index_expr(expr: &str) -> crate::parser::ast::Expr {
        let ExprKind::Index { index, .. } = parse(&format!("|x| x.a[{expr}]")).unwrap().kind else {
            panic!("expected an index");
        };
        *index
    }

    fn fold(expr: &str, captures: &Captures<'_>) -> Result<Constant, FoldError> {
        Folder::new(captures).constant(&index_expr(expr))
    }

    #[test]
    fn literals_and_arithmetic() {
        let none = Captures::new();
        assert_eq!(fold("1 + 2 * 3", &none), Ok(Constant::Int(7)));
        assert_eq!(fold("(1 + 2) * 3", &none), Ok(Constant::Int(9)));
        assert_eq!(fold("-7 % 3", &none), Ok(Constant::Int(-1)));
        assert_eq!(fold("\"a\" == \"a\"", &none), Ok(Constant::Bool(true)));
        assert_eq!(fold("1 < 2 && !false", &none), Ok(Constant::Bool(true)));
        assert_eq!(fold("300 as u16", &none), Ok(Constant::Int(300)));
    }

    #[test]
    fn captured_values() {
        let position = 4_u8;
        let child = Child {
            grand_child: Some(GrandChild {
                birthday: 12,
                ..GrandChild::default()
            }),
            items: vec![GrandChild::default(), GrandChild {
                birthday: 3,
                ..GrandChild::default()
            }],
            ..Child::default()
        };
        let captures = Captures::new()
            .with("position", &position)
            .with("child", &child as &dyn Reflect);

        assert_eq!(fold("position + 1", &captures), Ok(Constant::Int(5)));
        assert_eq!(fold("child.grand_child.birthday", &captures), Ok(Constant::Int(12)));
        assert_eq!(fold("child.items[position - 3].birthday", &captures), Ok(Constant::Int(3)));
        assert_eq!(
            fold("child.items[9].birthday", &captures),
            Err(FoldError::OutOfRange { index: 9, len: 2 })
        );
        assert!(matches!(
            fold("child.missing", &captures),
            Err(FoldError::NoField { .. })
        ));
        assert!(matches!(
            fold("child.second", &captures),
            Err(FoldError::Unreadable { .. })
        ));
    }

    #[test]
    fn absent_captures() {
        let child = Child::default();
        let captures = Captures::new().with("child", &child);
        assert!(matches!(
            fold("child.grand_child.birthday", &captures),
            Err(FoldError::Absent { .. })
        ));
        assert_eq!(fold("child.grand_child", &captures), Err(FoldError::AbsentValue));
    }

    #[test]
    fn failures() {
        let none = Captures::new();
        assert_eq!(fold("x.b", &none), Err(FoldError::RootDependent));
        assert!(matches!(fold("missing", &none), Err(FoldError::UnknownCapture { .. })));
        assert_eq!(fold("1 / 0", &none), Err(FoldError::DivisionByZero));
        assert_eq!(fold("1 % (2 - 2)", &none), Err(FoldError::DivisionByZero));
        assert_eq!(
            fold("170141183460469231731687303715884105727 + 1", &none),
            Err(FoldError::Overflow)
        );
        assert_eq!(fold("300 as u8", &none), Err(FoldError::Overflow));
        assert!(matches!(fold("1 as f64", &none), Err(FoldError::UnsupportedCoercion { .. })));
        assert!(matches!(fold("1 + true", &none), Err(FoldError::Operand { .. })));
        assert!(matches!(fold("x.len()", &none), Err(FoldError::NotConstant { .. })));
    }

    #[test]
    fn indices() {
        let none = Captures::new();
        let folder = Folder::new(&none);
        assert_eq!(folder.index(&index_expr("2 - 3")), Err(FoldError::NegativeIndex { value: -1 }));
        assert!(matches!(
            folder.index(&index_expr("true")),
            Err(FoldError::Expected { .. })
        ));
        assert_eq!(folder.index(&index_expr("6 / 2")), Ok(3));
    }
}
