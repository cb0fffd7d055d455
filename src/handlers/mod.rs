//! HTTP request handlers.

pub mod http;
pub mod listings;

pub use http::*;
