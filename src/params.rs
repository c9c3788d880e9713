//! Parsing of textual parameter input, as typed into a UI field.
//!
//! Input is taken verbatim: surrounding whitespace, empty strings and non-finite floats are
//! rejected rather than coerced.

use crate::error::{Error, Result};

/// Parse an oscillation frequency in whole hertz.
///
/// Text that isn't an integer fails with [`Error::Parse`]. A well-formed negative integer fails
/// with [`Error::InvalidConfiguration`].
pub fn parse_hertz(text: &str) -> Result<u32> {
    let value: i64 = text.parse().map_err(|_| parse_error("hertz", text))?;

    if value < 0 {
        return Err(Error::InvalidConfiguration(format!(
            "frequency must not be negative, got {value}"
        )));
    }

    u32::try_from(value).map_err(|_| {
        Error::InvalidConfiguration(format!("frequency {value} is out of range"))
    })
}

/// Parse a finite floating point parameter such as an amplitude or a size.
pub fn parse_scalar(parameter: &'static str, text: &str) -> Result<f64> {
    match text.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(parse_error(parameter, text)),
    }
}

fn parse_error(parameter: &'static str, text: &str) -> Error {
    Error::Parse {
        parameter,
        input: text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hertz() {
        assert_eq!(parse_hertz("5"), Ok(5));
        assert_eq!(parse_hertz("0"), Ok(0));
        assert_eq!(parse_hertz("+12"), Ok(12));

        for bad in ["abc", "", " 5", "5 ", "5.0", "1e3", "five"] {
            assert!(
                matches!(parse_hertz(bad), Err(Error::Parse { parameter: "hertz", .. })),
                "{bad:?} should not parse"
            );
        }

        assert!(matches!(parse_hertz("-3"), Err(Error::InvalidConfiguration(_))));
        assert!(matches!(parse_hertz("99999999999"), Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_parse_scalar() {
        assert_eq!(parse_scalar("amplitude", "2.5"), Ok(2.5));
        assert_eq!(parse_scalar("amplitude", "-1"), Ok(-1.0));
        assert_eq!(parse_scalar("amplitude", "0"), Ok(0.0));

        for bad in ["", "abc", " 1.0", "1.0\n", "NaN", "inf", "-inf", "1,5"] {
            let err = parse_scalar("amplitude", bad).unwrap_err();
            assert_eq!(
                err,
                Error::Parse { parameter: "amplitude", input: bad.to_string() }
            );
        }
    }
}
