//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for ReDrive:
//! - Configuration (API version, bridges, endpoints)
//! - Logging and tracing infrastructure
//!
//! ## Overview
//!
//! The Drive API version is not global state. It is fixed when a
//! [`DriveConfig`](config::DriveConfig) is built and travels with every
//! handle created from it.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{ApiVersion, DriveConfig, DriveConfigBuilder};
pub use error::{Error, Result};
