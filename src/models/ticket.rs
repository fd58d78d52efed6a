//! Request payloads for the ticket endpoints.

use serde::{Deserialize, Serialize};

/// Ticket status accepted by `PATCH /tickets/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    /// Awaiting an operator.
    Open,
    /// Awaiting the customer.
    Pending,
    /// Resolved.
    Solved,
}

impl TicketStatus {
    /// Parses the wire name (`open`, `pending`, `solved`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "open" => Some(Self::Open),
            "pending" => Some(Self::Pending),
            "solved" => Some(Self::Solved),
            _ => None,
        }
    }
}

/// Ticket priority accepted by `PATCH /tickets/{id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    /// Low priority.
    Low,
    /// Default priority.
    Normal,
    /// Urgent.
    Urgent,
}

impl TicketPriority {
    /// Parses the wire name (`low`, `normal`, `urgent`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "urgent" => Some(Self::Urgent),
            _ => None,
        }
    }
}

/// Who a ticket can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssigneeType {
    /// A single operator.
    Operator,
    /// A department (operator group).
    Department,
}

impl AssigneeType {
    /// Parses the wire name (`operator`, `department`).
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "operator" => Some(Self::Operator),
            "department" => Some(Self::Department),
            _ => None,
        }
    }
}

/// Ticket assignee: `{"type": "operator", "id": "<uuid>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Operator or department.
    #[serde(rename = "type")]
    pub assignee_type: AssigneeType,

    /// UUID of the operator or department.
    pub id: String,
}

/// Body of `PATCH /tickets/{id}`.
///
/// Absent fields are omitted. `assigned: Some(None)` serializes as
/// `"assigned": null`, which unassigns the ticket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TicketUpdate {
    /// New status.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TicketStatus>,

    /// New priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TicketPriority>,

    /// New assignee, or `Some(None)` to clear it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned: Option<Option<Assignment>>,
}

impl TicketUpdate {
    /// An update that only clears the assignee.
    pub fn unassign() -> Self {
        Self {
            assigned: Some(None),
            ..Self::default()
        }
    }
}

/// Body of `POST /tickets/as-contact`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTicket {
    /// Email of the customer the ticket is created for.
    pub contact_email: String,

    /// Ticket subject.
    pub subject: String,

    /// First message, written as the customer.
    pub message_content: String,

    /// Department UUID; the API assigns the General department when omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_department_id: Option<String>,
}

/// Visibility of a message posted to a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    /// Sent to the customer.
    Public,
    /// Visible to operators only.
    Internal,
}

/// Author of a message posted through the API. Only operators can post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorType {
    /// An operator.
    Operator,
}

/// Body of `POST /tickets/{id}/reply`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketReply {
    /// Message body (HTML for public replies, plain text for notes).
    pub content: String,

    /// UUID of the operator posting the message.
    pub operator_id: String,

    /// Public reply or internal note.
    pub message_type: MessageType,

    /// Always `operator`.
    pub author_type: AuthorType,
}

impl TicketReply {
    /// A reply visible to the customer.
    pub fn public(content: impl Into<String>, operator_id: impl Into<String>) -> Self {
        Self::new(content, operator_id, MessageType::Public)
    }

    /// A note visible to operators only.
    pub fn internal(content: impl Into<String>, operator_id: impl Into<String>) -> Self {
        Self::new(content, operator_id, MessageType::Internal)
    }

    fn new(
        content: impl Into<String>,
        operator_id: impl Into<String>,
        message_type: MessageType,
    ) -> Self {
        Self {
            content: content.into(),
            operator_id: operator_id.into(),
            message_type,
            author_type: AuthorType::Operator,
        }
    }
}
