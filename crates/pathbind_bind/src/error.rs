use pathbind_convert::ConversionError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// ConstructionError

/// A binder could not be built, or could not build a value.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConstructionError {
    #[error("`{ty}` is not a struct with named fields")]
    NotAStruct { ty: &'static str },

    #[error("`{ty}` has no default constructor, add `#[reflect(default)]` to build it")]
    NoDefaultConstructor { ty: &'static str },
}

// -----------------------------------------------------------------------------
// BindError

/// One member could not be bound.
///
/// The member keeps the value it had before the bind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum BindError {
    #[error("cannot convert `{key}`: {source}")]
    Conversion {
        key: String,
        #[source]
        source: ConversionError,
    },

    #[error("cannot assign a `{found}` to `{key}` of type `{expected}`")]
    Assign {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl BindError {
    /// The full source key of the failed member.
    pub fn key(&self) -> &str {
        match self {
            Self::Conversion { key, .. } | Self::Assign { key, .. } => key,
        }
    }
}
