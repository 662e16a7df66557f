/// A node of a parsed path, with the byte offset it starts at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Expr {
    pub kind: ExprKind,
    pub offset: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ExprKind {
    /// The closure parameter, or the implicit root of a rooted path.
    Root,
    Ident(String),
    Int(i128),
    Str(String),
    Bool(bool),
    Field {
        base: Box<Expr>,
        name: String,
    },
    Index {
        base: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        base: Box<Expr>,
        name: String,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Cast {
        expr: Box<Expr>,
        ty: String,
    },
    TypeTest {
        expr: Box<Expr>,
        ty: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
}

impl UnaryOp {
    pub(crate) const fn symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "!",
        }
    }
}

impl BinaryOp {
    pub(crate) const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Eq => "==",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
            Self::And => "&&",
            Self::Or => "||",
        }
    }
}

impl ExprKind {
    /// Human readable node shape, used in errors.
    pub(crate) const fn shape(&self) -> &'static str {
        match self {
            Self::Root => "the bare parameter",
            Self::Ident(_) => "a captured variable",
            Self::Int(_) => "an integer literal",
            Self::Str(_) => "a string literal",
            Self::Bool(_) => "a boolean literal",
            Self::Field { .. } => "a member access",
            Self::Index { .. } => "an index",
            Self::Call { .. } => "a method call",
            Self::Unary { .. } => "a unary operation",
            Self::Binary { op, .. } => match op {
                BinaryOp::Eq
                | BinaryOp::Ne
                | BinaryOp::Lt
                | BinaryOp::Le
                | BinaryOp::Gt
                | BinaryOp::Ge => "a comparison",
                BinaryOp::And | BinaryOp::Or => "a logical operation",
                _ => "an arithmetic operation",
            },
            Self::Cast { .. } => "a coercion",
            Self::TypeTest { .. } => "a type test",
        }
    }
}

/// Coercions that only unify the result type and are stripped from paths.
pub(crate) fn is_pass_through(ty: &str) -> bool {
    let ty = ty.trim_start_matches('&');
    ty == "_" || ty == "dyn Reflect" || (ty.starts_with("dyn ") && ty.ends_with("::Reflect"))
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::is_pass_through;

    #[test]
    fn pass_through_coercions() {
        assert!(is_pass_through("_"));
        assert!(is_pass_through("dyn Reflect"));
        assert!(is_pass_through("&dyn Reflect"));
        assert!(is_pass_through("dyn pathbind_reflect::Reflect"));
        assert!(!is_pass_through("u8"));
        assert!(!is_pass_through("Box<dyn Reflect>"));
    }
}
