use core::fmt;
use core::ops::Deref;

use pathbind_reflect::Reflect;
use pathbind_reflect::info::ReflectKind;
use pathbind_reflect::ops::{ReflectOwned, ReflectRef};

/// The result of reading through an accessor.
///
/// Members and items are borrowed from the root; method results are owned.
/// Derefs to the underlying [`Reflect`] value.
pub enum Value<'r> {
    Borrowed(&'r dyn Reflect),
    Owned(Box<dyn Reflect>),
}

impl<'r> Value<'r> {
    #[inline]
    pub fn as_reflect(&self) -> &dyn Reflect {
        match self {
            Self::Borrowed(value) => *value,
            Self::Owned(value) => &**value,
        }
    }

    #[inline]
    pub const fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Returns the owned box, or the borrow back.
    #[inline]
    pub fn into_owned(self) -> Result<Box<dyn Reflect>, &'r dyn Reflect> {
        match self {
            Self::Borrowed(value) => Err(value),
            Self::Owned(value) => Ok(value),
        }
    }

    /// Unwraps every `Option` layer, or `None` on an absent one.
    pub(crate) fn settle(mut self) -> Option<Self> {
        while self.reflect_kind() == ReflectKind::Nullable {
            self = match self {
                Self::Borrowed(value) => match value.reflect_ref() {
                    ReflectRef::Nullable(nullable) => Self::Borrowed(nullable.get()?),
                    _ => return None,
                },
                Self::Owned(value) => match value.reflect_owned() {
                    ReflectOwned::Nullable(nullable) => Self::Owned(nullable.into_inner()?),
                    _ => return None,
                },
            };
        }
        Some(self)
    }
}

impl Deref for Value<'_> {
    type Target = dyn Reflect;

    #[inline]
    fn deref(&self) -> &Self::Target {
        self.as_reflect()
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_reflect().fmt(f)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use pathbind_reflect::Reflect;

    use super::Value;

    #[test]
    fn settle_unwraps_options() {
        let value = Some(Some(3_u8));
        let settled = Value::Borrowed(&value).settle().unwrap();
        assert_eq!(settled.downcast_ref::<u8>(), Some(&3));

        let absent: Option<u8> = None;
        assert!(Value::Borrowed(&absent).settle().is_none());

        let owned = Value::Owned(Box::new(Some(String::from("x"))));
        let settled = owned.settle().unwrap();
        assert!(settled.is_owned());
        assert_eq!(settled.into_owned().unwrap().take::<String>().unwrap(), "x");
    }

    #[test]
    fn plain_values_are_kept() {
        let value = 5_i32;
        let settled = Value::Borrowed(&value as &dyn Reflect).settle().unwrap();
        assert!(!settled.is_owned());
        assert_eq!(format!("{settled:?}"), "5");
    }
}
