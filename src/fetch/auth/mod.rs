//! Client wrappers that add upstream credentials to outbound requests.

mod api_key;

pub use api_key::{ApiKey, MTA_KEY_HEADER};
