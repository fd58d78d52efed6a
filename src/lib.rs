//! # tidio-mcp
//!
//! An MCP (Model Context Protocol) server for the Tidio customer support
//! platform.
//!
//! It exposes Tidio departments, operators, contacts and tickets as MCP
//! tools, so AI assistants can triage and answer support tickets.
//!
//! ## Features
//!
//! - **Read operations**: list departments, operators, contacts and tickets;
//!   view contact and ticket details
//! - **Write operations**: create, update, unassign and delete tickets;
//!   delete contacts
//! - **Messaging**: public replies and internal notes on tickets
//! - **Pagination**: list tools pass Tidio's opaque cursor through unchanged
//! - **Security**: the client secret is never logged or exposed in error messages
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types: tagged API failures and validation violations
//! - [`tidio_client`] - HTTP adapter for the Tidio OpenAPI
//! - [`models`] - Result envelope and request payloads
//! - [`tools`] - Tool inputs, validation and operations
//! - [`server`] - MCP server implementation with tool routing
//!
//! ## Configuration
//!
//! - `TIDIO_CLIENT_ID`: OpenAPI client ID
//! - `TIDIO_CLIENT_SECRET`: OpenAPI client secret
//!
//! Optional:
//! - `TIDIO_API_BASE_URL`: API origin override (default `https://api.tidio.com`)
//! - `RUST_LOG`: Log level (e.g., `tidio_mcp=debug`)
//!
//! ## Example
//!
//! Using the tool operations directly:
//!
//! ```ignore
//! use tidio_mcp::config::Config;
//! use tidio_mcp::tidio_client::TidioClient;
//! use tidio_mcp::tools::{handlers, UpdateTicketInput};
//!
//! async fn example() -> Result<(), tidio_mcp::error::TidioError> {
//!     let config = Config::from_env()?;
//!     let client = TidioClient::new(&config)?;
//!
//!     let input = UpdateTicketInput {
//!         ticket_id: 10009,
//!         status: Some("solved".to_string()),
//!         priority: None,
//!         assigned: None,
//!     };
//!     let envelope = handlers::update_ticket(&client, input).await?;
//!     println!("{}", envelope.to_json_string());
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod error;
pub mod models;
pub mod server;
pub mod tidio_client;
pub mod tools;
