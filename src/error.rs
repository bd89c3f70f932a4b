//! Error handling for the folio data-access layer
//!
//! Every failure surfaces as a [`FolioError`]. Loading failures keep the
//! resource name next to the transport-level cause so consumers can report
//! which document could not be fetched. Nothing in this crate retries on its
//! own; callers decide.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Failed to load {resource}: {source}")]
    Load {
        resource: String,
        #[source]
        source: LoadError,
    },

    #[error("Request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: LoadError,
    },

    #[error("{0}")]
    Validation(String),

    #[error("{entity} with id/slug {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Transport and decoding failures for a single document.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("malformed JSON body: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("not served by the {source_kind} source")]
    Unavailable { source_kind: &'static str },
}

impl LoadError {
    /// HTTP status of the failed response, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            LoadError::Status(code) => Some(*code),
            LoadError::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Invalid config format: {0}")]
    InvalidFormat(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to determine project directories")]
    NoProjectDirs,
}

pub type Result<T> = std::result::Result<T, FolioError>;

impl FolioError {
    pub fn load(resource: impl Into<String>, source: impl Into<LoadError>) -> Self {
        FolioError::Load {
            resource: resource.into(),
            source: source.into(),
        }
    }

    pub fn request(endpoint: impl Into<String>, source: impl Into<LoadError>) -> Self {
        FolioError::Request {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, FolioError::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FolioError::NotFound { .. })
    }
}

impl From<tokio::task::JoinError> for FolioError {
    fn from(err: tokio::task::JoinError) -> Self {
        FolioError::Internal(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_carries_resource_and_status() {
        let err = FolioError::load("skills", LoadError::Status(503));
        assert_eq!(err.to_string(), "Failed to load skills: unexpected status 503");
        match err {
            FolioError::Load { resource, source } => {
                assert_eq!(resource, "skills");
                assert_eq!(source.status(), Some(503));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_not_found_message() {
        let err = FolioError::NotFound { entity: "Project", id: "42".into() };
        assert_eq!(err.to_string(), "Project with id/slug 42 not found");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }
}
