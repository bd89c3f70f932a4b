//! Command Line Interface module
//!
//! - `portfolio`: profile, skills, projects, experience, education, testimonials
//! - `blog`: listings, single posts and blog statistics
//! - `contact`: contact details, messages and newsletter
//! - `upload`: resume and image uploads
//! - `config`, `export`: configuration and data export

pub mod blog;
pub mod config;
pub mod contact;
pub mod export;
pub mod portfolio;
pub mod upload;

use serde::Serialize;
use std::future::Future;

use folio::error::{FolioError, Result};
use folio::utils::progress::ProgressUtils;

/// Runs `fut` behind a spinner; JSON output stays free of terminal noise.
pub(crate) async fn fetching<T, F>(message: &str, json: bool, fut: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let pb = ProgressUtils::create_fetch_spinner(message, json);
    let result = fut.await;
    pb.finish_and_clear();
    result
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).map_err(|e| FolioError::Internal(e.into()))?;
    println!("{}", output);
    Ok(())
}

/// Truncates on a character boundary and marks the cut with an ellipsis.
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}
