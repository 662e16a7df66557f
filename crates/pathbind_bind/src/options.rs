use crate::DEFAULT_SEPARATOR;

/// Runtime configuration of a [`Binder`](crate::Binder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinderOptions {
    /// Joins a nested member's name and its own keys, `.` by default.
    pub separator: &'static str,
    /// Whether struct-typed members without a converter are bound
    /// recursively. On by default.
    pub nested: bool,
}

impl BinderOptions {
    #[inline]
    pub const fn with_separator(mut self, separator: &'static str) -> Self {
        self.separator = separator;
        self
    }

    #[inline]
    pub const fn with_nested(mut self, nested: bool) -> Self {
        self.nested = nested;
        self
    }
}

impl Default for BinderOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR,
            nested: true,
        }
    }
}
