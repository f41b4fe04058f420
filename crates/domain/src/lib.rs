//! # GTTX Domain
//!
//! Domain types for the GTTX DDoS-mitigation API client.
//!
//! This crate contains:
//! - Error taxonomy and the crate-wide `Result` alias
//! - Client configuration structures
//! - Credentials, session and response envelope types
//! - Parameter shapes for the resource endpoints
//! - Provider constants
//!
//! ## Architecture
//! - No dependencies on other GTTX crates
//! - No I/O and no async: pure data and the rules attached to it

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
