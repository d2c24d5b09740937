//! HTTP client and response status handling.

mod client;
mod status;

pub use client::HttpClient;
pub use status::{HttpStatusError, check_status, classify_status};
