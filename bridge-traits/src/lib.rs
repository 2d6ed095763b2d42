//! # Host Bridge Traits
//!
//! Capability contracts the ReDrive core consumes but does not implement.
//!
//! ## Overview
//!
//! The core never talks to the network or to an OAuth provider directly. It
//! issues requests through the traits below, and each host wires in its own
//! implementation (`bridge-desktop` ships reqwest-based defaults).
//!
//! ## Traits
//!
//! - [`HttpClient`](http::HttpClient) - Async request/response transport
//! - [`SessionProvider`](session::SessionProvider) - Reduced-scope OAuth token
//!   and the effective user's e-mail address
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Error Handling
//!
//! All bridge traits use [`BridgeError`](error::BridgeError). Implementations
//! should convert transport-specific failures into it with an actionable
//! message and let the caller decide what to surface.
//!
//! ## Example
//!
//! ```ignore
//! use bridge_traits::http::{HttpClient, HttpRequest, HttpResponse};
//! use bridge_traits::error::Result;
//! use async_trait::async_trait;
//!
//! pub struct MyHttpClient {
//!     client: reqwest::Client,
//! }
//!
//! #[async_trait]
//! impl HttpClient for MyHttpClient {
//!     async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
//!         todo!()
//!     }
//! }
//! ```

pub mod error;
pub mod http;
pub mod log;
pub mod session;

pub use error::BridgeError;

pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
pub use log::{LogEntry, LogLevel, LoggerSink};
pub use session::SessionProvider;
