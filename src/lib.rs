//! Asynchronous HTTP request client for the Lightbridge API.
//!
//! The crate wraps a single preconfigured [`reqwest::Client`] behind
//! [`HTTPClient`]: base URL, credential header, timeout and TLS policy are
//! fixed at construction, and one generic [`HTTPClient::request`] method
//! issues GET/POST/PUT calls and decodes the JSON response body. Typed
//! per-endpoint requests can be layered on top via [`HTTPRequestType`].
//!
//! There is deliberately no retry, caching or connection management here;
//! all of that is the transport's concern.
#![warn(clippy::shadow_reuse, clippy::shadow_same, clippy::builtin_type_shadow)]

pub mod http_handler;
#[doc(hidden)]
pub mod logger;

pub use http_handler::common::{
    CREDENTIAL_HEADER, ConfigError, RequestError, TIMEOUT_MARGIN_MS, TIMEOUT_THRESHOLD_ENV,
};
pub use http_handler::http_client::HTTPClient;
pub use http_handler::http_request::{HTTPRequestMethod, HTTPRequestType};
