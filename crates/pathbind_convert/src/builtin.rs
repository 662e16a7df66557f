use core::convert::Infallible;

use crate::Conversions;

/// Converted to the empty string by the built-in `String` converter.
pub const EMPTY_LITERAL: &str = "EMPTY";

/// Converted to `None` by the nullable provider.
pub const NULL_LITERAL: &str = "NULL";

fn parse_bool(raw: &str) -> Result<bool, &'static str> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err("expected `true` or `false`")
    }
}

fn parse_string(raw: &str) -> Result<String, Infallible> {
    if raw == EMPTY_LITERAL {
        Ok(String::new())
    } else {
        Ok(raw.to_owned())
    }
}

macro_rules! register_trimmed {
    ($conversions:ident: $($ty:ty),*) => {$(
        $conversions.register(|raw: &str| raw.trim().parse::<$ty>());
    )*};
}

/// Explicit converters for primitives and `String`.
pub(crate) fn install(conversions: &mut Conversions) {
    conversions.register(parse_bool);
    conversions.register(|raw: &str| raw.parse::<char>());
    conversions.register(parse_string);

    register_trimmed!(conversions: u8, u16, u32, u64, u128, usize);
    register_trimmed!(conversions: i8, i16, i32, i64, i128, isize);
    register_trimmed!(conversions: f32, f64);
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{parse_bool, parse_string};
    use crate::Conversions;

    #[test]
    fn bool_is_case_insensitive() {
        assert_eq!(parse_bool("TRUE"), Ok(true));
        assert_eq!(parse_bool(" False "), Ok(false));
        assert!(parse_bool("yes").is_err());
    }

    #[test]
    fn empty_literal_only_for_strings() {
        assert_eq!(parse_string("EMPTY").unwrap(), "");
        assert_eq!(parse_string("empty").unwrap(), "empty");

        let conversions = Conversions::new();
        assert!(conversions.convert_to::<char>("EMPTY").is_err());
        assert_eq!(conversions.convert_to::<Vec<String>>("a,EMPTY").unwrap(), vec!["a", ""]);
    }

    #[test]
    fn numbers_round_trip() {
        let conversions = Conversions::new();
        for value in [0_i64, -7, 42, i64::MAX] {
            assert_eq!(conversions.convert_to::<i64>(&value.to_string()).unwrap(), value);
        }
        for value in [0.5_f64, -1.25, 1e10] {
            assert_eq!(conversions.convert_to::<f64>(&value.to_string()).unwrap(), value);
        }
        for value in [true, false] {
            assert_eq!(conversions.convert_to::<bool>(&value.to_string()).unwrap(), value);
        }
        assert_eq!(conversions.convert_to::<char>("x").unwrap(), 'x');
    }
}
