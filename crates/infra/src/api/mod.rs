//! GTTX API client
//!
//! Authenticated request pipeline plus the resource methods built on it.
//!
//! # Architecture
//!
//! - [`session::TokenCache`] holds the current session and judges its
//!   25-minute validity through a [`crate::clock::Clock`]
//! - [`auth::Authenticator`] exchanges credentials for a token,
//!   single-flight under concurrency
//! - [`classify`] turns `apiStatus == 1` envelopes into typed errors
//! - [`client::GttxClient`] dispatches requests with the token in the
//!   `Authorization` header and retries code-4 rejections via
//!   [`retry::RetryPolicy`]
//! - [`endpoints`] declares every resource method in one table

pub mod auth;
pub mod classify;
pub mod client;
pub mod endpoints;
pub mod request;
pub mod response;
pub mod retry;
pub mod session;

pub use auth::{AccessTokenProvider, Authenticator};
pub use classify::{classify, classify_for, CallKind};
pub use client::{GttxClient, GttxClientBuilder};
pub use endpoints::{EndpointInfo, RESOURCE_ENDPOINTS};
pub use request::RequestSpec;
pub use retry::RetryPolicy;
pub use session::TokenCache;
