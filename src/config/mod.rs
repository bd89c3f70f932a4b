use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;
use url::Url;

pub mod env;
pub mod validation;

use crate::core::services::aggregate::OverviewLimits;
use crate::core::services::portfolio::ApiSettings;
use crate::error::{ConfigError, Result};
use env::{EnvParser, EnvVars};
use validation::ConfigValidator;

/// Where portfolio documents come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    /// `<static_base>/<resource>.json`, over HTTP or from a local directory
    Static,
    /// `<api_base_url>/<route>/`
    Rest,
}

impl FromStr for SourceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "static" => Ok(SourceMode::Static),
            "rest" | "api" => Ok(SourceMode::Rest),
            other => Err(format!("unknown source mode '{}', use static or rest", other)),
        }
    }
}

impl fmt::Display for SourceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceMode::Static => f.write_str("static"),
            SourceMode::Rest => f.write_str("rest"),
        }
    }
}

/// Resolved form of `static_base`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticLocation {
    Http(String),
    Directory(PathBuf),
}

fn default_featured_projects_limit() -> usize {
    3
}

fn default_skills_summary_limit() -> usize {
    6
}

fn default_recent_posts_limit() -> usize {
    5
}

fn default_available_for_hire() -> bool {
    true
}

fn default_response_time() -> String {
    "Within 24 hours".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Static documents or REST backend
    pub mode: SourceMode,

    /// Base URL or directory holding `<resource>.json` documents
    pub static_base: String,

    /// REST API base, also used for form submissions and uploads
    pub api_base_url: String,

    /// HTTP timeout in seconds
    pub request_timeout_secs: u64,

    /// Artificial delay added to every API call, in milliseconds
    #[serde(default)]
    pub simulated_latency_ms: u64,

    /// First year of professional experience
    pub career_start_year: i32,

    #[serde(default = "default_featured_projects_limit")]
    pub featured_projects_limit: usize,

    #[serde(default = "default_skills_summary_limit")]
    pub skills_summary_limit: usize,

    #[serde(default = "default_recent_posts_limit")]
    pub recent_posts_limit: usize,

    /// Default blog page size
    pub page_size: u32,

    #[serde(default = "default_available_for_hire")]
    pub available_for_hire: bool,

    #[serde(default = "default_response_time")]
    pub response_time: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: SourceMode::Static,
            static_base: "./data".to_string(),
            api_base_url: "http://localhost:8000/api/v1".to_string(),
            request_timeout_secs: 10,
            simulated_latency_ms: 0,
            career_start_year: 2019,
            featured_projects_limit: default_featured_projects_limit(),
            skills_summary_limit: default_skills_summary_limit(),
            recent_posts_limit: default_recent_posts_limit(),
            page_size: 10,
            available_for_hire: default_available_for_hire(),
            response_time: default_response_time(),
        }
    }
}

impl Config {
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Pick up a local .env during development
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        let config_file = Self::config_path(config_path)?;
        if config_path.is_some() && !config_file.exists() {
            return Err(ConfigError::FileNotFound { path: config_file }.into());
        }

        if config_file.exists() {
            debug!("Reading config from {}", config_file.display());
            let content = fs::read_to_string(&config_file).map_err(ConfigError::from)?;
            config = toml::from_str(&content).map_err(ConfigError::from)?;
        }

        // Environment variables have the highest priority
        config.load_from_env()?;
        config.validate()?;

        if !config_file.exists() {
            if let Some(parent) = config_file.parent() {
                fs::create_dir_all(parent).map_err(ConfigError::from)?;
            }
            config.save(&config_file)?;
        }

        Ok(config)
    }

    fn load_from_env(&mut self) -> Result<()> {
        if let Some(mode) = EnvParser::string(EnvVars::MODE)? {
            self.mode = mode.parse::<SourceMode>().map_err(|_| ConfigError::InvalidValue {
                field: EnvVars::MODE.to_string(),
                value: mode.clone(),
            })?;
        }
        if let Some(base) = EnvParser::string(EnvVars::STATIC_BASE)? {
            self.static_base = base;
        }
        // URL shape is checked by `validate` once every layer is applied
        if let Some(url) = EnvParser::string(EnvVars::API_BASE_URL)? {
            self.api_base_url = url;
        }
        if let Some(timeout) = EnvParser::number(EnvVars::REQUEST_TIMEOUT_SECS, 1..=300)? {
            self.request_timeout_secs = timeout;
        }
        if let Some(latency) = EnvParser::number(EnvVars::SIMULATED_LATENCY_MS, 0..=10_000)? {
            self.simulated_latency_ms = latency;
        }
        if let Some(year) = EnvParser::number(EnvVars::CAREER_START_YEAR, 1950..=2100)? {
            self.career_start_year = year;
        }
        if let Some(size) = EnvParser::number(EnvVars::PAGE_SIZE, 1..=100)? {
            self.page_size = size;
        }
        if let Some(available) = EnvParser::flag(EnvVars::AVAILABLE_FOR_HIRE)? {
            self.available_for_hire = available;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        ConfigValidator::validate_url(&self.api_base_url, "API base")?;
        if self.mode == SourceMode::Static {
            ConfigValidator::validate_static_base(&self.static_base)?;
        }
        ConfigValidator::validate_range(self.request_timeout_secs, 1, 300, "request timeout seconds")?;
        ConfigValidator::validate_range(self.page_size, 1, 100, "page size")?;
        ConfigValidator::validate_range(self.career_start_year, 1950, 2100, "career start year")?;
        Ok(())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::from)?;
        fs::write(path, content).map_err(ConfigError::from)?;
        Ok(())
    }

    fn default_config_path() -> Result<PathBuf> {
        let project_dirs = ProjectDirs::from("dev", "folio", "folio-cli").ok_or(ConfigError::NoProjectDirs)?;
        Ok(project_dirs.config_dir().join("config.toml"))
    }

    /// The file `load` reads: the explicit path when given, otherwise the
    /// per-user config directory.
    pub fn config_path(explicit: Option<&str>) -> Result<PathBuf> {
        match explicit {
            Some(path) => Ok(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// `http(s)://` bases are fetched over the network, `file://` URLs and
    /// plain paths are directories on disk.
    pub fn static_location(&self) -> StaticLocation {
        match Url::parse(&self.static_base) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
                StaticLocation::Http(self.static_base.clone())
            }
            Ok(url) if url.scheme() == "file" => match url.to_file_path() {
                Ok(path) => StaticLocation::Directory(path),
                Err(()) => StaticLocation::Directory(PathBuf::from(&self.static_base)),
            },
            _ => StaticLocation::Directory(PathBuf::from(&self.static_base)),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            overview: OverviewLimits {
                featured_projects: self.featured_projects_limit,
                skills_summary: self.skills_summary_limit,
                career_start_year: self.career_start_year,
            },
            recent_posts_limit: self.recent_posts_limit,
            page_size: self.page_size,
            simulated_latency: Duration::from_millis(self.simulated_latency_ms),
            available_for_hire: self.available_for_hire,
            response_time: self.response_time.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.static_location(), StaticLocation::Directory(PathBuf::from("./data")));
        assert_eq!(config.api_settings().overview.career_start_year, 2019);
        assert_eq!(config.api_settings().page_size, 10);
    }

    #[test]
    fn test_static_location_detects_http() {
        let config = Config {
            static_base: "https://example.com/data".into(),
            ..Default::default()
        };
        assert_eq!(
            config.static_location(),
            StaticLocation::Http("https://example.com/data".into())
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_static_location_maps_file_urls_to_paths() {
        let config = Config {
            static_base: "file:///tmp/portfolio%20data".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(
            config.static_location(),
            StaticLocation::Directory(PathBuf::from("/tmp/portfolio data"))
        );
    }

    #[test]
    fn test_source_mode_parse() {
        assert_eq!("REST".parse::<SourceMode>().unwrap(), SourceMode::Rest);
        assert_eq!("static".parse::<SourceMode>().unwrap(), SourceMode::Static);
        assert!("graphql".parse::<SourceMode>().is_err());
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let config = Config {
            mode: SourceMode::Rest,
            page_size: 25,
            ..Default::default()
        };
        config.save(&path).unwrap();

        let loaded = Config::load(Some(path.to_str().unwrap())).unwrap();
        assert_eq!(loaded.page_size, 25);
        // FOLIO_MODE may be set in the developer's environment
        if std::env::var(EnvVars::MODE).is_err() {
            assert_eq!(loaded.mode, SourceMode::Rest);
        }
    }

    #[test]
    fn test_config_path_prefers_explicit_file() {
        assert_eq!(
            Config::config_path(Some("/etc/folio/site.toml")).unwrap(),
            PathBuf::from("/etc/folio/site.toml")
        );
        if let Ok(default) = Config::config_path(None) {
            assert!(default.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = Config::load(Some("/definitely/not/here/folio.toml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_out_of_range_is_rejected() {
        let config = Config { page_size: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
