//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! # Input Sanitization
//!
//! Input structs implement `sanitize()`, which trims identifiers and
//! filters, turning blank optional values into `None`. Enumerated values
//! (status, priority) are left untouched so validation sees exactly what
//! the caller sent.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;

/// Helper function to trim an optional string.
fn trim_option(s: &Option<String>) -> Option<String> {
    s.as_ref().map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

/// Input parameters for the get_operators tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListOperatorsInput {
    /// Pagination cursor from a previous response (`meta.cursor`). Omit for the first page.
    #[serde(default)]
    pub cursor: Option<String>,
}

impl ListOperatorsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            cursor: trim_option(&self.cursor),
        }
    }
}

/// Input parameters for the get_contacts tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListContactsInput {
    /// Pagination cursor from a previous response (`meta.cursor`). Omit for the first page.
    #[serde(default)]
    pub cursor: Option<String>,

    /// Filter by email address. Must be a full address (wildcards are not supported).
    #[serde(default)]
    pub email: Option<String>,
}

impl ListContactsInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            cursor: trim_option(&self.cursor),
            email: trim_option(&self.email),
        }
    }
}

/// Input parameters for the get_contact_details and delete_contact tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ContactInput {
    /// The UUID of the contact.
    pub contact_id: String,
}

impl ContactInput {
    /// Sanitizes input by trimming whitespace from all string fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            contact_id: self.contact_id.trim().to_string(),
        }
    }
}

/// Input parameters for tools addressing a single ticket
/// (get_ticket_details, delete_ticket, unassign_ticket).
#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
pub struct TicketInput {
    /// The numeric ID of the ticket.
    pub ticket_id: u64,
}

/// Input parameters for the create_ticket tool.
///
/// The ticket is created from the customer's perspective.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Email of the customer creating the ticket.
    pub contact_email: String,

    /// Subject of the ticket.
    pub subject: String,

    /// Ticket message content from the customer.
    pub message_content: String,

    /// UUID of the department to assign. The General department is used when omitted.
    #[serde(default)]
    pub assigned_department_id: Option<String>,
}

impl CreateTicketInput {
    /// Sanitizes input by trimming whitespace from identifier fields.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            contact_email: self.contact_email.trim().to_string(),
            subject: self.subject,
            message_content: self.message_content,
            assigned_department_id: trim_option(&self.assigned_department_id),
        }
    }
}

/// Input parameters for the update_ticket tool.
///
/// Ticket ID is required. At least one other field must be provided.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTicketInput {
    /// The numeric ID of the ticket to update.
    pub ticket_id: u64,

    /// New status: 'open', 'pending', or 'solved'.
    #[serde(default)]
    pub status: Option<String>,

    /// New priority: 'low', 'normal', or 'urgent'.
    #[serde(default)]
    pub priority: Option<String>,

    /// New assignee as an object with 'type' ('operator' or 'department') and 'id' (UUID string),
    /// e.g. {"type": "operator", "id": "uuid-here"}.
    #[serde(default)]
    pub assigned: Option<serde_json::Value>,
}

impl UpdateTicketInput {
    /// Returns true if at least one field besides ticket_id is set.
    pub fn has_updates(&self) -> bool {
        self.status.is_some() || self.priority.is_some() || self.assigned.is_some()
    }
}

/// Input parameters for the reply_to_a_ticket and add_internal_note_to_a_ticket tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct TicketMessageInput {
    /// The numeric ID of the ticket.
    pub ticket_id: u64,

    /// Message content. Replies may contain HTML; internal notes must be plain text.
    pub content: String,

    /// The UUID of the operator posting the message.
    pub operator_id: String,
}

impl TicketMessageInput {
    /// Trims the operator ID. Content is sent exactly as given.
    #[must_use]
    pub fn sanitize(self) -> Self {
        Self {
            operator_id: self.operator_id.trim().to_string(),
            ..self
        }
    }
}
