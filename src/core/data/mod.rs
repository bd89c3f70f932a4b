//! Portfolio records and the logical resources they are loaded from

pub mod models;
pub mod resource;

pub use models::*;
pub use resource::Resource;
