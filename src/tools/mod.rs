//! MCP tool implementations for the Tidio server.
//!
//! This module contains the input types, validation and operations behind
//! each MCP tool. The server only routes calls here and renders results.

pub mod handlers;
mod inputs;
pub mod validation;

pub use inputs::*;
