//! Transport layer for the data connector.
//!
//! The service is only reachable over HTTP.

pub mod http;

pub use http::HttpTransport;
