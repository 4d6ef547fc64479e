//! `datetime-client` is an async HTTP client for servers exposing a
//! `/datetime` endpoint.
//!
//! The crate wraps a single `GET /datetime` exchange with content-type
//! negotiation and bounded exponential backoff:
//! - [`DateTimeClient::fetch`]
//! - [`DateTimeClient::fetch_as`]
//! - [`DateTimeClient::fetch_from`]

mod client;
mod content_type;
mod decode;
mod endpoint;
mod error;
mod options;
mod retry;
mod wire;

pub use client::DateTimeClient;
pub use content_type::ContentType;
pub use decode::decode_datetime;
pub use endpoint::{Endpoint, ServerSelector, ServerTargets};
pub use error::DateTimeError;
pub use options::ClientOptions;
pub use retry::{Backoff, RetryPolicy};
pub use wire::DateTimeBody;

pub type Result<T> = std::result::Result<T, DateTimeError>;
