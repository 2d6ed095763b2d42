//! Workspace facade crate.
//!
//! Re-exports the ReDrive API together with the configuration and bridge
//! types needed to build it, so hosts can depend on `redrive-workspace` alone.
//! The `desktop-shims` feature (on by default) adds the reqwest transport and
//! the environment-backed session.

pub use bridge_traits::{HttpClient, SessionProvider};
pub use core_runtime::{logging, ApiVersion, DriveConfig, DriveConfigBuilder};
pub use redrive::*;

#[cfg(feature = "desktop-shims")]
pub use bridge_desktop::{ReqwestHttpClient, StaticSession};
