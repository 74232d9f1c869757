//! Core types for oxidized-ra
//!
//! This crate provides the shared error types, configuration,
//! and logging infrastructure used by the achievement integration.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{Config, Feature, SharedConfig};
pub use error::{CoreError, Result, ServiceError};
