//! Input validation for tools that write to the API.
//!
//! Validators collect every violation instead of stopping at the first,
//! and run before any request is built.

use serde_json::Value;

use crate::error::ValidationErrors;
use crate::models::{AssigneeType, Assignment, TicketPriority, TicketStatus, TicketUpdate};

use super::inputs::UpdateTicketInput;

const INVALID_STATUS: &str = "Status must be one of: open, pending, solved";
const INVALID_PRIORITY: &str = "Priority must be one of: low, normal, urgent";
const ASSIGNED_NOT_OBJECT: &str = "Assigned must be a dictionary object";
const ASSIGNED_MISSING_FIELDS: &str = "Assigned must contain both 'type' and 'id' fields";
const INVALID_ASSIGNEE_TYPE: &str = "Assigned type must be either 'operator' or 'department'";
const ASSIGNEE_ID_NOT_STRING: &str = "Assigned id must be a string";
const NO_UPDATES: &str = "At least one parameter (status, priority, or assigned) must be provided";
const EMPTY_CONTENT: &str = "Content cannot be empty";
const EMPTY_OPERATOR_ID: &str = "Operator ID cannot be empty";

/// Validates an update_ticket call and builds the PATCH body.
///
/// # Errors
///
/// Returns every violated constraint: unknown status or priority, a
/// malformed `assigned` object, or no field to update at all.
pub fn validate_ticket_update(input: &UpdateTicketInput) -> Result<TicketUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let mut update = TicketUpdate::default();

    if let Some(status) = &input.status {
        match TicketStatus::parse(status) {
            Some(status) => update.status = Some(status),
            None => errors.push(INVALID_STATUS),
        }
    }

    if let Some(priority) = &input.priority {
        match TicketPriority::parse(priority) {
            Some(priority) => update.priority = Some(priority),
            None => errors.push(INVALID_PRIORITY),
        }
    }

    if let Some(assigned) = &input.assigned {
        match parse_assignment(assigned) {
            Ok(assignment) => update.assigned = Some(Some(assignment)),
            Err(violations) => {
                for message in violations.messages() {
                    errors.push(message.clone());
                }
            }
        }
    }

    if !input.has_updates() {
        errors.push(NO_UPDATES);
    }

    if errors.is_empty() {
        Ok(update)
    } else {
        Err(errors)
    }
}

/// Checks the shape of an `assigned` value: an object with a known `type`
/// and a string `id`.
pub fn parse_assignment(value: &Value) -> Result<Assignment, ValidationErrors> {
    let Some(object) = value.as_object() else {
        return Err(ASSIGNED_NOT_OBJECT.into());
    };

    let (Some(assignee_type), Some(id)) = (object.get("type"), object.get("id")) else {
        return Err(ASSIGNED_MISSING_FIELDS.into());
    };

    let mut errors = ValidationErrors::new();

    let assignee_type = assignee_type.as_str().and_then(AssigneeType::parse);
    if assignee_type.is_none() {
        errors.push(INVALID_ASSIGNEE_TYPE);
    }

    let id = id.as_str();
    if id.is_none() {
        errors.push(ASSIGNEE_ID_NOT_STRING);
    }

    match (assignee_type, id) {
        (Some(assignee_type), Some(id)) => Ok(Assignment {
            assignee_type,
            id: id.to_string(),
        }),
        _ => Err(errors),
    }
}

/// Validates the content and author of a reply or internal note.
pub fn validate_ticket_message(content: &str, operator_id: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if content.is_empty() {
        errors.push(EMPTY_CONTENT);
    }
    if operator_id.is_empty() {
        errors.push(EMPTY_OPERATOR_ID);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
