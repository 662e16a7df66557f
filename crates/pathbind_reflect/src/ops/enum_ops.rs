use crate::Reflect;

/// A unit-only enum.
pub trait Enum: Reflect {
    fn variant_name(&self) -> &'static str;

    fn variant_index(&self) -> usize;
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use crate::derive::Reflect;
    use crate::info::Typed;
    use crate::ops::{Enum, ReflectRef};
    use crate::Reflect;
    use crate::registry::{GetTypeMeta, TypeTraitFromStr};

    #[derive(Reflect, Debug, PartialEq)]
    #[reflect(from_str)]
    enum Level {
        Low,
        High,
    }

    impl FromStr for Level {
        type Err = String;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "lo" => Ok(Self::Low),
                "hi" => Ok(Self::High),
                other => Err(format!("unknown level `{other}`")),
            }
        }
    }

    #[test]
    fn variants() {
        let info = Level::type_info().as_enum().unwrap();
        assert_eq!(info.variants(), &["Low", "High"]);
        let high = info.from_index(1).unwrap();
        assert_eq!(high.take::<Level>().unwrap(), Level::High);
        assert!(info.from_index(2).is_none());

        assert_eq!(Level::High.variant_name(), "High");
        let low = Level::Low;
        let ReflectRef::Enum(e) = low.reflect_ref() else {
            panic!("expected enum");
        };
        assert_eq!(e.variant_index(), 0);
        assert_eq!(format!("{:?}", Level::High.as_reflect()), "High");
    }

    #[test]
    fn from_str_trait() {
        let meta = Level::get_type_meta();
        let parse = meta.get_trait::<TypeTraitFromStr>().unwrap();
        assert_eq!(parse.parse("hi").unwrap().take::<Level>().unwrap(), Level::High);
        assert_eq!(parse.parse("mid").unwrap_err(), "unknown level `mid`");
    }
}
