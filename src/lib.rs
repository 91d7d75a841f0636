//! journey-audit library
//!
//! Exposes the CLI building blocks for integration testing

pub mod cli;
pub mod config;
pub mod errors;

pub use config::AppConfig;
