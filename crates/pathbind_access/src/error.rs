use thiserror::Error;

// -----------------------------------------------------------------------------
// ParseError

/// Lexical or syntax error in a path text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{message} at offset {offset} in `{path}`")]
pub struct ParseError {
    pub offset: usize,
    pub path: String,
    pub message: String,
}

// -----------------------------------------------------------------------------
// FoldError

/// A sub-expression could not be reduced to a constant.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FoldError {
    #[error("the expression depends on the root parameter")]
    RootDependent,

    #[error("no captured variable named `{name}`")]
    UnknownCapture { name: String },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("division by zero")]
    DivisionByZero,

    #[error("index {value} is negative")]
    NegativeIndex { value: i128 },

    #[error("index {index} is out of range for length {len}")]
    OutOfRange { index: usize, len: usize },

    #[error("cannot read `{name}` through an absent value")]
    Absent { name: String },

    #[error("the value is absent")]
    AbsentValue,

    #[error("`{owner}` has no field `{name}`")]
    NoField { owner: &'static str, name: String },

    #[error("{shape} is not a constant")]
    NotConstant { shape: &'static str },

    #[error("`{ty}` cannot be used as a constant")]
    Unreadable { ty: &'static str },

    #[error("`{op}` cannot be applied to {found}")]
    Operand { op: &'static str, found: String },

    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: &'static str,
    },

    #[error("unsupported coercion to `{ty}`")]
    UnsupportedCoercion { ty: String },
}

// -----------------------------------------------------------------------------
// ConstructionError

/// An accessor could not be built.
///
/// Raised only while building an accessor, never by reads or writes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructionError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("expected a member access, found {shape}")]
    NotMemberAccess { shape: &'static str },

    #[error("path must start at the root parameter, found {shape}")]
    Unrooted { shape: &'static str },

    #[error("unsupported coercion to `{ty}` in path")]
    UnsupportedCoercion { ty: String },

    #[error("cannot fold expression at offset {offset} in `{path}`")]
    Fold {
        offset: usize,
        path: String,
        #[source]
        source: FoldError,
    },

    #[error("`{owner}` has no member `{name}`")]
    UnknownMember { owner: &'static str, name: String },

    #[error("`{owner}` has no method `{name}`")]
    UnknownMethod { owner: &'static str, name: String },

    #[error("`{owner}` cannot be indexed")]
    NotIndexable { owner: &'static str },

    #[error("index {index} is out of range for `{owner}`")]
    IndexOutOfRange { owner: &'static str, index: usize },

    #[error("method `{method}` takes {expected} argument(s), found {found}")]
    ArgumentCount {
        method: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("method `{method}` expects `{expected}`, found {found}")]
    ArgumentType {
        method: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("an accessor needs at least one step")]
    EmptyPath,

    #[error("step {index} is declared on `{found}` but follows a value of `{expected}`")]
    Disconnected {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },
}

// -----------------------------------------------------------------------------
// AccessError

/// A write that is invalid regardless of the data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessError {
    #[error("`{name}` is read-only")]
    ReadOnly { name: String },

    #[error("accessor is declared on `{expected}`, found `{found}`")]
    RootMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected a value of `{expected}`, found `{found}`")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
}
