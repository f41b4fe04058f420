//! Domain types and models

pub mod credentials;
pub mod envelope;
pub mod resources;
pub mod session;

pub use credentials::Credentials;
pub use envelope::{ClassifiedResult, ProviderFailure};
pub use resources::*;
pub use session::Session;
