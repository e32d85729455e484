//! JSON API over the encoder and decoder

pub mod handlers;

pub use handlers::EncodeResponse;
