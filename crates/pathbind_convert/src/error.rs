use thiserror::Error;

/// A raw string could not be converted to its destination type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConversionError {
    #[error("cannot convert `{raw}` to `{target}`: {message}")]
    Malformed {
        target: &'static str,
        raw: String,
        message: String,
    },

    #[error("element {index} of the sequence is invalid")]
    Element {
        index: usize,
        #[source]
        source: Box<ConversionError>,
    },

    #[error("no converter is available for `{target}`")]
    NoConverter { target: String },

    #[error("converter produced `{found}` where `{expected}` was expected")]
    TargetMismatch {
        expected: &'static str,
        found: &'static str,
    },
}

impl ConversionError {
    #[inline]
    pub(crate) fn malformed(target: &'static str, raw: &str, message: impl ToString) -> Self {
        Self::Malformed {
            target,
            raw: raw.to_owned(),
            message: message.to_string(),
        }
    }
}
