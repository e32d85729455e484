//! Server module for building the HTTP service
//!
//! `ServerBuilder` assembles a `ServerHost` from configuration and exposes it
//! through `RestExposure`, which registers:
//! - the encoder and viewer pages
//! - the JSON encode/decode API
//! - health checks

pub mod builder;
pub mod exposure;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use exposure::RestExposure;
pub use host::ServerHost;
