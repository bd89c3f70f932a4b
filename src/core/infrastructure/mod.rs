//! Infrastructure and cross-cutting concerns
//!
//! This module contains infrastructure components:
//! - Document sources (static HTTP, REST, local directory)
//! - Session cache
//! - Caching loader with in-flight request sharing

pub mod cache;
pub mod loader;
pub mod source;

// Re-export main types
pub use cache::{CacheStats, DocumentCache, SessionCache};
pub use loader::DataLoader;
pub use source::{build_http_client, DirectorySource, DocumentSource, RestSource, StaticHttpSource};
