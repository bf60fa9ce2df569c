//! REST API client.

mod auth;
mod client;
mod dto;
mod envelope;
mod routines;

pub use client::{ApiClient, DEFAULT_BASE_URL, DEFAULT_COOKIE_NAME, normalize_base_url};
pub use envelope::decode_envelope;
