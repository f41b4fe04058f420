//! # GTTX Infrastructure
//!
//! I/O side of the GTTX anti-DDoS API client.
//!
//! This crate contains:
//! - The authenticated request pipeline and resource methods ([`api`])
//! - The reqwest-based transport wrapper ([`http`])
//! - Settings loading from environment or file ([`config`])
//! - Clock abstraction for session expiry ([`clock`])
//! - Tracing subscriber helpers ([`logging`])
//!
//! ## Architecture
//! - Pure types and errors live in `gttx-domain`
//! - Everything that touches the network, filesystem or wall clock is here

pub mod api;
pub mod clock;
pub mod config;
pub mod errors;
pub mod http;
pub mod logging;

// Re-export commonly used items
pub use api::{AccessTokenProvider, Authenticator, GttxClient, GttxClientBuilder, RequestSpec};
pub use clock::{Clock, MockClock, SystemClock};
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
