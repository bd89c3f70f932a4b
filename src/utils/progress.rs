use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress helpers shared by CLI commands
pub struct ProgressUtils;

impl ProgressUtils {
    /// Spinner shown while documents are being fetched; hidden for JSON output
    pub fn create_fetch_spinner(message: &str, hidden: bool) -> ProgressBar {
        if hidden {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .expect("valid spinner template"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    /// Bar counting resources during an export
    pub fn create_export_progress(total: u64) -> ProgressBar {
        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("📦 [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .expect("valid export template")
                .progress_chars("#>-"),
        );
        pb
    }
}
