//! Utility modules for common functionality
//!
//! - `logging`: Logging configuration and setup
//! - `progress`: Spinners and progress bars for CLI feedback

pub mod logging;
pub mod progress;
