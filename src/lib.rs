//! Data access, caching and aggregation for a personal portfolio site.
//!
//! - `core::infrastructure`: document sources, the session cache and the loader
//! - `core::services`: aggregations, the portfolio API, hooks and uploads
//! - `config`: layered configuration
//! - `services`: wiring from a `Config` to a ready-to-use API

pub mod config;
pub mod core;
pub mod error;
pub mod services;
pub mod utils;
