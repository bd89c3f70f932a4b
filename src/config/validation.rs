use url::Url;
use crate::error::{Result, FolioError};

/// Centralized configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate an http(s) URL string
    pub fn validate_url(url: &str, field_name: &str) -> Result<()> {
        let parsed = Url::parse(url).map_err(|e| {
            FolioError::Validation(format!("Invalid {} URL '{}': {}", field_name, url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(FolioError::Validation(format!(
                "{} URL must use http or https, got: {}",
                field_name, url
            )));
        }
        Ok(())
    }

    /// Validate numeric range
    pub fn validate_range<T>(value: T, min: T, max: T, field_name: &str) -> Result<()>
    where
        T: PartialOrd + std::fmt::Display + Copy,
    {
        if value < min || value > max {
            return Err(FolioError::Validation(format!(
                "{} must be between {} and {}, got {}",
                field_name, min, max, value
            )));
        }
        Ok(())
    }

    /// Static base must be an http(s) URL, a local `file://` URL or a directory path
    pub fn validate_static_base(base: &str) -> Result<()> {
        if base.trim().is_empty() {
            return Err(FolioError::Validation("Static base must not be empty".to_string()));
        }

        match Url::parse(base) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Ok(()),
            Ok(url) if url.scheme() == "file" => url.to_file_path().map(|_| ()).map_err(|()| {
                FolioError::Validation(format!("Static base is not a local file URL: {}", base))
            }),
            // Single-letter schemes are Windows drive letters
            Ok(url) if url.scheme().len() > 1 => Err(FolioError::Validation(format!(
                "Static base must be an http(s) URL or a directory, got: {}",
                base
            ))),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(ConfigValidator::validate_url("http://localhost:8000/api/v1", "API").is_ok());
        assert!(ConfigValidator::validate_url("not-a-url", "API").is_err());
        assert!(ConfigValidator::validate_url("ftp://example.com", "API").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(ConfigValidator::validate_range(5u64, 1u64, 10u64, "test").is_ok());
        assert!(ConfigValidator::validate_range(15u64, 1u64, 10u64, "test").is_err());
        assert!(ConfigValidator::validate_range(0u64, 1u64, 10u64, "test").is_err());
    }

    #[test]
    fn test_validate_static_base() {
        assert!(ConfigValidator::validate_static_base("./data").is_ok());
        assert!(ConfigValidator::validate_static_base("https://cdn.example.com/data").is_ok());
        assert!(ConfigValidator::validate_static_base("").is_err());
        assert!(ConfigValidator::validate_static_base("ftp://example.com/data").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_validate_static_base_file_urls() {
        assert!(ConfigValidator::validate_static_base("file:///srv/portfolio").is_ok());
        assert!(ConfigValidator::validate_static_base("file://fileserver/portfolio").is_err());
    }
}
