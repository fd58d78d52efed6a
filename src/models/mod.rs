//! Data models for the Tidio OpenAPI.
//!
//! Responses are passed through as raw JSON, so this module only defines
//! the tool result envelope and the request payloads sent to the API.

mod envelope;
mod ticket;

pub use envelope::*;
pub use ticket::*;
