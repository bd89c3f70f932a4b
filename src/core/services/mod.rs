//! Portfolio services
//!
//! This module contains everything built on top of the loader:
//! - Pure aggregations (overview, blog queries, certificates)
//! - The portfolio API used by the CLI and by hooks
//! - Hooks exposing `{loading, data, error}` per resource
//! - Resume and image uploads

pub mod aggregate;
pub mod hooks;
pub mod portfolio;
pub mod upload;

// Re-export main types
pub use aggregate::{BlogOverview, BlogQuery, ContactOverview, Page, PortfolioOverview};
pub use portfolio::{ApiSettings, ContactMessage, PortfolioApi, SharedApi};
pub use upload::{UploadKind, UploadReceipt, Uploader};
