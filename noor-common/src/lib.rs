//! # Noor Common Library
//!
//! Shared code for the Noor companion crates:
//! - Error type
//! - TOML configuration loading
//! - Logging initialization
//! - Event types (NoorEvent enum) and the EventBus

pub mod config;
pub mod error;
pub mod events;
pub mod logging;

pub use config::NoorConfig;
pub use error::{Error, Result};
