use core::fmt;

use pathbind_reflect::info::Type;

/// How a member is bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// Converted from the raw value under the member's name.
    Value,
    /// Bound recursively from the keys under the member's name.
    Nested,
}

/// A member a [`Binder`](crate::Binder) assigns.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberDescriptor {
    name: &'static str,
    index: usize,
    owner: Type,
    value_type: Type,
    kind: MemberKind,
}

impl MemberDescriptor {
    #[inline]
    pub(crate) const fn new(
        name: &'static str,
        index: usize,
        owner: Type,
        value_type: Type,
        kind: MemberKind,
    ) -> Self {
        Self {
            name,
            index,
            owner,
            value_type,
            kind,
        }
    }

    /// The field name, also the key in the data source.
    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Position of the field in its struct.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// The struct declaring the field.
    #[inline]
    pub const fn owner(&self) -> &Type {
        &self.owner
    }

    /// The declared type of the field.
    #[inline]
    pub const fn value_type(&self) -> &Type {
        &self.value_type
    }

    #[inline]
    pub const fn kind(&self) -> MemberKind {
        self.kind
    }
}

impl fmt::Display for MemberDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.owner.name(), self.name)
    }
}
