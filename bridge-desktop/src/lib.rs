//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux).
//!
//! ## Overview
//!
//! - `HttpClient` using `reqwest` (one attempt per call)
//! - `SessionProvider` backed by a fixed token, optionally read from the
//!   environment
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{ReqwestHttpClient, StaticSession};
//! use std::sync::Arc;
//!
//! let http_client = Arc::new(ReqwestHttpClient::new()?);
//! let session = Arc::new(StaticSession::from_env()?);
//! ```

mod http;
mod session;

pub use http::ReqwestHttpClient;
pub use session::{StaticSession, ACCESS_TOKEN_ENV, USER_EMAIL_ENV};
