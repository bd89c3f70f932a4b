use std::env::{self, VarError};
use std::fmt::Display;
use std::ops::RangeInclusive;
use std::str::FromStr;

use crate::error::{ConfigError, FolioError, Result};

/// `FOLIO_*` variables read on top of the config file.
pub struct EnvVars;

impl EnvVars {
    pub const MODE: &'static str = "FOLIO_MODE";
    pub const STATIC_BASE: &'static str = "FOLIO_STATIC_BASE";
    pub const API_BASE_URL: &'static str = "FOLIO_API_BASE_URL";
    pub const REQUEST_TIMEOUT_SECS: &'static str = "FOLIO_REQUEST_TIMEOUT_SECS";
    pub const SIMULATED_LATENCY_MS: &'static str = "FOLIO_SIMULATED_LATENCY_MS";
    pub const CAREER_START_YEAR: &'static str = "FOLIO_CAREER_START_YEAR";
    pub const PAGE_SIZE: &'static str = "FOLIO_PAGE_SIZE";
    pub const AVAILABLE_FOR_HIRE: &'static str = "FOLIO_AVAILABLE_FOR_HIRE";
}

pub struct EnvParser;

impl EnvParser {
    /// Trimmed value of `name`. Unset and blank both read as `None`.
    pub fn string(name: &str) -> Result<Option<String>> {
        match env::var(name) {
            Ok(raw) => Ok(Some(raw.trim().to_string()).filter(|value| !value.is_empty())),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(raw)) => Err(invalid(name, raw.to_string_lossy(), "valid UTF-8")),
        }
    }

    pub fn flag(name: &str) -> Result<Option<bool>> {
        Self::string(name)?
            .map(|raw| match raw.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Ok(true),
                "false" | "0" | "no" | "off" => Ok(false),
                _ => Err(invalid(name, &raw, "true/false, 1/0, yes/no or on/off")),
            })
            .transpose()
    }

    pub fn number<T>(name: &str, range: RangeInclusive<T>) -> Result<Option<T>>
    where
        T: FromStr + PartialOrd + Display,
    {
        Self::string(name)?
            .map(|raw| {
                let value: T = raw.parse().map_err(|_| invalid(name, &raw, "a whole number"))?;
                if !range.contains(&value) {
                    let expected = format!("between {} and {}", range.start(), range.end());
                    return Err(invalid(name, &raw, &expected));
                }
                Ok(value)
            })
            .transpose()
    }

    /// Every `FOLIO_*` variable currently set, sorted, for `config show`.
    pub fn folio_vars() -> Vec<(String, String)> {
        let mut vars: Vec<(String, String)> = env::vars().filter(|(key, _)| key.starts_with("FOLIO_")).collect();
        vars.sort();
        vars
    }
}

fn invalid(name: &str, value: impl Display, expected: &str) -> FolioError {
    ConfigError::InvalidValue {
        field: name.to_string(),
        value: format!("'{}' (expected {})", value, expected),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_flag_values() {
        env::set_var("FOLIO_TEST_FLAG_ON", "Yes");
        env::set_var("FOLIO_TEST_FLAG_OFF", "0");
        env::set_var("FOLIO_TEST_FLAG_BAD", "maybe");

        assert_eq!(EnvParser::flag("FOLIO_TEST_FLAG_ON").unwrap(), Some(true));
        assert_eq!(EnvParser::flag("FOLIO_TEST_FLAG_OFF").unwrap(), Some(false));
        assert!(EnvParser::flag("FOLIO_TEST_FLAG_BAD").is_err());
        assert_eq!(EnvParser::flag("FOLIO_TEST_FLAG_UNSET").unwrap(), None);

        env::remove_var("FOLIO_TEST_FLAG_ON");
        env::remove_var("FOLIO_TEST_FLAG_OFF");
        env::remove_var("FOLIO_TEST_FLAG_BAD");
    }

    #[test]
    fn test_number_is_typed_and_range_checked() {
        env::set_var("FOLIO_TEST_YEAR", "2019");
        env::set_var("FOLIO_TEST_YEAR_EARLY", "1900");
        env::set_var("FOLIO_TEST_YEAR_TEXT", "last year");

        assert_eq!(EnvParser::number::<i32>("FOLIO_TEST_YEAR", 1950..=2100).unwrap(), Some(2019));
        let err = EnvParser::number::<i32>("FOLIO_TEST_YEAR_EARLY", 1950..=2100).unwrap_err();
        assert!(err.to_string().contains("between 1950 and 2100"));
        assert!(EnvParser::number::<u32>("FOLIO_TEST_YEAR_TEXT", 1..=100).is_err());
        assert_eq!(EnvParser::number::<u64>("FOLIO_TEST_YEAR_UNSET", 0..=10).unwrap(), None);

        env::remove_var("FOLIO_TEST_YEAR");
        env::remove_var("FOLIO_TEST_YEAR_EARLY");
        env::remove_var("FOLIO_TEST_YEAR_TEXT");
    }

    #[test]
    fn test_blank_string_is_unset() {
        env::set_var("FOLIO_TEST_BLANK", "   ");
        env::set_var("FOLIO_TEST_PADDED", "  rest ");
        assert_eq!(EnvParser::string("FOLIO_TEST_BLANK").unwrap(), None);
        assert_eq!(EnvParser::string("FOLIO_TEST_PADDED").unwrap().as_deref(), Some("rest"));
        env::remove_var("FOLIO_TEST_BLANK");
        env::remove_var("FOLIO_TEST_PADDED");
    }
}
