//! Core functionality modules
//!
//! This module contains the data-access layer organized into logical layers:
//! - `data`: Portfolio records and the resources they are loaded from
//! - `infrastructure`: Transports, session cache and the caching loader
//! - `services`: Aggregations, the portfolio API, hooks and uploads

pub mod data;
pub mod infrastructure;
pub mod services;
