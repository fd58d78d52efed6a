//! Tool operations: validate input, build the request, call the API and
//! wrap the result in an [`Envelope`].
//!
//! Every operation sends at most one request. Validation failures return
//! before anything is sent; API failures propagate unchanged.

use url::form_urlencoded;

use crate::error::TidioError;
use crate::models::{Envelope, NewTicket, TicketReply, TicketUpdate};
use crate::tidio_client::TidioClient;

use super::inputs::{
    ContactInput, CreateTicketInput, ListContactsInput, ListOperatorsInput, TicketInput,
    TicketMessageInput, UpdateTicketInput,
};
use super::validation::{validate_ticket_message, validate_ticket_update};

/// Appends the provided query parameters to `path`. Absent values are
/// skipped; with none left, the path is returned without a `?`.
fn with_query(path: &str, params: &[(&str, Option<&str>)]) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    let mut has_params = false;

    for (name, value) in params {
        if let Some(value) = value {
            query.append_pair(name, value);
            has_params = true;
        }
    }

    if has_params {
        format!("{}?{}", path, query.finish())
    } else {
        path.to_string()
    }
}

fn contact_path(contact_id: &str) -> String {
    format!("/contacts/{}", urlencoding::encode(contact_id))
}

fn ticket_path(ticket_id: u64) -> String {
    format!("/tickets/{}", ticket_id)
}

/// Lists departments (operator groups that tickets can be assigned to).
pub async fn get_departments(client: &TidioClient) -> Result<Envelope, TidioError> {
    let data = client.get("/departments").await?;
    Ok(Envelope::ok(data))
}

/// Lists operators, one page at a time.
pub async fn get_operators(
    client: &TidioClient,
    input: ListOperatorsInput,
) -> Result<Envelope, TidioError> {
    let input = input.sanitize();
    let path = with_query("/operators", &[("cursor", input.cursor.as_deref())]);

    let data = client.get(&path).await?;
    Ok(Envelope::ok(data))
}

/// Lists contacts, optionally filtered by exact email, one page at a time.
pub async fn get_contacts(
    client: &TidioClient,
    input: ListContactsInput,
) -> Result<Envelope, TidioError> {
    let input = input.sanitize();
    let path = with_query(
        "/contacts",
        &[
            ("cursor", input.cursor.as_deref()),
            ("email", input.email.as_deref()),
        ],
    );

    let data = client.get(&path).await?;
    Ok(Envelope::ok(data))
}

/// Fetches one contact.
pub async fn get_contact_details(
    client: &TidioClient,
    input: ContactInput,
) -> Result<Envelope, TidioError> {
    let input = input.sanitize();
    let data = client.get(&contact_path(&input.contact_id)).await?;
    Ok(Envelope::ok(data))
}

/// Deletes one contact.
pub async fn delete_contact(
    client: &TidioClient,
    input: ContactInput,
) -> Result<Envelope, TidioError> {
    let input = input.sanitize();
    client.delete(&contact_path(&input.contact_id)).await?;
    Ok(Envelope::empty())
}

/// Lists tickets.
pub async fn get_tickets(client: &TidioClient) -> Result<Envelope, TidioError> {
    let data = client.get("/tickets").await?;
    Ok(Envelope::ok(data))
}

/// Fetches one ticket including its messages.
pub async fn get_ticket_details(
    client: &TidioClient,
    input: TicketInput,
) -> Result<Envelope, TidioError> {
    let data = client.get(&ticket_path(input.ticket_id)).await?;
    Ok(Envelope::ok(data))
}

/// Deletes one ticket.
pub async fn delete_ticket(
    client: &TidioClient,
    input: TicketInput,
) -> Result<Envelope, TidioError> {
    client.delete(&ticket_path(input.ticket_id)).await?;
    Ok(Envelope::empty())
}

/// Creates a ticket on behalf of a contact.
pub async fn create_ticket(
    client: &TidioClient,
    input: CreateTicketInput,
) -> Result<Envelope, TidioError> {
    let input = input.sanitize();
    let ticket = NewTicket {
        contact_email: input.contact_email,
        subject: input.subject,
        message_content: input.message_content,
        assigned_department_id: input.assigned_department_id,
    };

    let data = client.post("/tickets/as-contact", Some(&ticket)).await?;
    Ok(Envelope::ok(data))
}

/// Changes status, priority and/or assignee of a ticket.
///
/// # Errors
///
/// Returns `TidioError::Validation` listing every invalid field, without
/// sending a request.
pub async fn update_ticket(
    client: &TidioClient,
    input: UpdateTicketInput,
) -> Result<Envelope, TidioError> {
    let update = validate_ticket_update(&input).map_err(TidioError::Validation)?;

    client.patch(&ticket_path(input.ticket_id), Some(&update)).await?;
    Ok(Envelope::empty())
}

/// Clears the assignee of a ticket.
pub async fn unassign_ticket(
    client: &TidioClient,
    input: TicketInput,
) -> Result<Envelope, TidioError> {
    client
        .patch(&ticket_path(input.ticket_id), Some(&TicketUpdate::unassign()))
        .await?;
    Ok(Envelope::empty())
}

/// Posts a public reply, visible to and sent to the customer.
pub async fn reply_to_a_ticket(
    client: &TidioClient,
    input: TicketMessageInput,
) -> Result<Envelope, TidioError> {
    let input = input.sanitize();
    validate_ticket_message(&input.content, &input.operator_id)
        .map_err(TidioError::Validation)?;

    let reply = TicketReply::public(input.content, input.operator_id);
    post_message(client, input.ticket_id, &reply).await
}

/// Posts an internal note, visible to operators only.
pub async fn add_internal_note_to_a_ticket(
    client: &TidioClient,
    input: TicketMessageInput,
) -> Result<Envelope, TidioError> {
    let input = input.sanitize();
    validate_ticket_message(&input.content, &input.operator_id)
        .map_err(TidioError::Validation)?;

    let note = TicketReply::internal(input.content, input.operator_id);
    post_message(client, input.ticket_id, &note).await
}

async fn post_message(
    client: &TidioClient,
    ticket_id: u64,
    message: &TicketReply,
) -> Result<Envelope, TidioError> {
    let path = format!("{}/reply", ticket_path(ticket_id));
    let data = client.post(&path, Some(message)).await?;
    Ok(Envelope::ok(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::error::ApiErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const OPERATOR_ID: &str = "fe7df646-6881-4d44-bcd5-639501a32bfe";
    const CONTACT_ID: &str = "a1b2c3d4-e5f6-7890-abcd-ef1234567890";

    fn test_client(server: &MockServer) -> TidioClient {
        let config = Config::new("test_client_id", "test_client_secret")
            .with_base_url(server.uri())
            .unwrap();
        TidioClient::new(&config).unwrap()
    }

    fn envelope_json(envelope: &Envelope) -> Value {
        serde_json::to_value(envelope).unwrap()
    }

    async fn mount_json(server: &MockServer, verb: &str, route: &str, status: u16, body: &Value) {
        Mock::given(method(verb))
            .and(path(route))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .expect(1)
            .mount(server)
            .await;
    }

    fn message_input(content: &str, operator_id: &str) -> TicketMessageInput {
        TicketMessageInput {
            ticket_id: 10009,
            content: content.to_string(),
            operator_id: operator_id.to_string(),
        }
    }

    #[test]
    fn test_with_query_omits_question_mark_when_empty() {
        assert_eq!(with_query("/contacts", &[("cursor", None), ("email", None)]), "/contacts");
    }

    #[test]
    fn test_with_query_encodes_values() {
        assert_eq!(
            with_query(
                "/contacts",
                &[("cursor", Some("abc/+=")), ("email", Some("alice@example.com"))]
            ),
            "/contacts?cursor=abc%2F%2B%3D&email=alice%40example.com"
        );
    }

    #[test]
    fn test_contact_path_encodes_segment() {
        assert_eq!(contact_path(CONTACT_ID), format!("/contacts/{}", CONTACT_ID));
        assert_eq!(contact_path("../tickets"), "/contacts/..%2Ftickets");
    }

    #[tokio::test]
    async fn test_get_departments_wraps_response() {
        let server = MockServer::start().await;
        let departments = json!({
            "departments": [
                {"id": "535eb95e-107c-440a-8720-53649368a26a", "name": "Finances"},
                {"id": "7f14e5f9-1df0-439d-9b39-bd7e1e82fac5", "name": "Sales"}
            ]
        });
        mount_json(&server, "GET", "/departments", 200, &departments).await;

        let result = get_departments(&test_client(&server)).await.unwrap();

        assert_eq!(envelope_json(&result), json!({"status": "ok", "data": departments}));
    }

    #[tokio::test]
    async fn test_get_operators_without_cursor_sends_no_query() {
        let server = MockServer::start().await;
        let operators = json!({"operators": [], "meta": {"cursor": null, "limit": 100}});
        mount_json(&server, "GET", "/operators", 200, &operators).await;

        let result = get_operators(&test_client(&server), ListOperatorsInput::default())
            .await
            .unwrap();

        assert_eq!(result.data, operators);
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
    }

    #[tokio::test]
    async fn test_get_operators_passes_cursor() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/operators"))
            .and(query_param("cursor", "next-page"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"operators": []})))
            .expect(1)
            .mount(&server)
            .await;

        let input = ListOperatorsInput {
            cursor: Some("next-page".to_string()),
        };
        get_operators(&test_client(&server), input).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_contacts_filters_by_email_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("email", "alice@example.com"))
            .and(query_param_is_missing("cursor"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"contacts": []})))
            .expect(1)
            .mount(&server)
            .await;

        let input = ListContactsInput {
            cursor: None,
            email: Some("alice@example.com".to_string()),
        };
        let result = get_contacts(&test_client(&server), input).await.unwrap();

        assert_eq!(result.data, json!({"contacts": []}));
    }

    #[tokio::test]
    async fn test_get_contacts_with_cursor_and_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/contacts"))
            .and(query_param("cursor", "c1"))
            .and(query_param("email", "bob@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"contacts": []})))
            .expect(1)
            .mount(&server)
            .await;

        let input = ListContactsInput {
            cursor: Some("c1".to_string()),
            email: Some("bob@example.com".to_string()),
        };
        get_contacts(&test_client(&server), input).await.unwrap();
    }

    #[tokio::test]
    async fn test_get_contact_details() {
        let server = MockServer::start().await;
        let contact = json!({"id": CONTACT_ID, "email": "alice@example.com"});
        mount_json(&server, "GET", &format!("/contacts/{}", CONTACT_ID), 200, &contact).await;

        let input = ContactInput {
            contact_id: CONTACT_ID.to_string(),
        };
        let result = get_contact_details(&test_client(&server), input).await.unwrap();

        assert_eq!(result.data, contact);
    }

    #[tokio::test]
    async fn test_delete_contact_returns_empty_data() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path(format!("/contacts/{}", CONTACT_ID)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let input = ContactInput {
            contact_id: CONTACT_ID.to_string(),
        };
        let result = delete_contact(&test_client(&server), input).await.unwrap();

        assert_eq!(envelope_json(&result), json!({"status": "ok", "data": {}}));
    }

    #[tokio::test]
    async fn test_get_tickets_and_details() {
        let server = MockServer::start().await;
        let tickets = json!({"tickets": [{"id": 10009, "status": "open"}]});
        let ticket = json!({"id": 10009, "messages": []});
        mount_json(&server, "GET", "/tickets", 200, &tickets).await;
        mount_json(&server, "GET", "/tickets/10009", 200, &ticket).await;

        let client = test_client(&server);
        let list = get_tickets(&client).await.unwrap();
        let details = get_ticket_details(&client, TicketInput { ticket_id: 10009 })
            .await
            .unwrap();

        assert_eq!(list.data, tickets);
        assert_eq!(details.data, ticket);
    }

    #[tokio::test]
    async fn test_delete_ticket_discards_body() {
        let server = MockServer::start().await;
        mount_json(&server, "DELETE", "/tickets/10009", 200, &json!({"deleted": true})).await;

        let result = delete_ticket(&test_client(&server), TicketInput { ticket_id: 10009 })
            .await
            .unwrap();

        assert_eq!(envelope_json(&result), json!({"status": "ok", "data": {}}));
    }

    #[tokio::test]
    async fn test_create_ticket_minimal_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/as-contact"))
            .and(body_json(json!({
                "contact_email": "customer@example.com",
                "subject": "Test",
                "message_content": "msg"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 10010})))
            .expect(1)
            .mount(&server)
            .await;

        let input = CreateTicketInput {
            contact_email: "customer@example.com".to_string(),
            subject: "Test".to_string(),
            message_content: "msg".to_string(),
            assigned_department_id: None,
        };
        let result = create_ticket(&test_client(&server), input).await.unwrap();

        assert_eq!(envelope_json(&result), json!({"status": "ok", "data": {"id": 10010}}));
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_ticket_with_department() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/as-contact"))
            .and(body_json(json!({
                "contact_email": "customer@example.com",
                "subject": "Invoice",
                "message_content": "Where is my invoice?",
                "assigned_department_id": "535eb95e-107c-440a-8720-53649368a26a"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 10011})))
            .expect(1)
            .mount(&server)
            .await;

        let input = CreateTicketInput {
            contact_email: "customer@example.com".to_string(),
            subject: "Invoice".to_string(),
            message_content: "Where is my invoice?".to_string(),
            assigned_department_id: Some("535eb95e-107c-440a-8720-53649368a26a".to_string()),
        };
        let result = create_ticket(&test_client(&server), input).await.unwrap();

        assert_eq!(result.data, json!({"id": 10011}));
    }

    #[tokio::test]
    async fn test_update_ticket_sends_all_fields() {
        let server = MockServer::start().await;
        let assigned = json!({"type": "operator", "id": OPERATOR_ID});
        Mock::given(method("PATCH"))
            .and(path("/tickets/10009"))
            .and(body_json(json!({
                "status": "pending",
                "priority": "urgent",
                "assigned": assigned
            })))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let input = UpdateTicketInput {
            ticket_id: 10009,
            status: Some("pending".to_string()),
            priority: Some("urgent".to_string()),
            assigned: Some(assigned.clone()),
        };
        let result = update_ticket(&test_client(&server), input).await.unwrap();

        assert_eq!(envelope_json(&result), json!({"status": "ok", "data": {}}));
    }

    #[tokio::test]
    async fn test_update_ticket_without_fields_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let input = UpdateTicketInput {
            ticket_id: 10009,
            status: None,
            priority: None,
            assigned: None,
        };
        let err = update_ticket(&test_client(&server), input).await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(
            err.to_string(),
            "At least one parameter (status, priority, or assigned) must be provided"
        );
    }

    #[tokio::test]
    async fn test_update_ticket_invalid_status() {
        let server = MockServer::start().await;

        let input = UpdateTicketInput {
            ticket_id: 10009,
            status: Some("invalid".to_string()),
            priority: None,
            assigned: None,
        };
        let err = update_ticket(&test_client(&server), input).await.unwrap_err();

        assert_eq!(err.to_string(), "Status must be one of: open, pending, solved");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unassign_ticket_sends_null_assignee() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/tickets/10009"))
            .and(body_json(json!({"assigned": null})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let result = unassign_ticket(&test_client(&server), TicketInput { ticket_id: 10009 })
            .await
            .unwrap();

        assert_eq!(envelope_json(&result), json!({"status": "ok", "data": {}}));
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].body, br#"{"assigned":null}"#.to_vec());
    }

    #[tokio::test]
    async fn test_reply_to_a_ticket_posts_public_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/10009/reply"))
            .and(body_json(json!({
                "content": "<p>Thanks, fixed!</p>",
                "operator_id": OPERATOR_ID,
                "message_type": "public",
                "author_type": "operator"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "msg-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let input = message_input("<p>Thanks, fixed!</p>", OPERATOR_ID);
        let result = reply_to_a_ticket(&test_client(&server), input).await.unwrap();

        assert_eq!(envelope_json(&result), json!({"status": "ok", "data": {"id": "msg-1"}}));
    }

    #[tokio::test]
    async fn test_add_internal_note_forces_internal_type() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/10009/reply"))
            .and(body_json(json!({
                "content": "Customer called twice",
                "operator_id": OPERATOR_ID,
                "message_type": "internal",
                "author_type": "operator"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "msg-2"})))
            .expect(1)
            .mount(&server)
            .await;

        let input = message_input("Customer called twice", OPERATOR_ID);
        let result = add_internal_note_to_a_ticket(&test_client(&server), input)
            .await
            .unwrap();

        assert_eq!(result.data, json!({"id": "msg-2"}));
    }

    #[tokio::test]
    async fn test_reply_content_whitespace_is_sent_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/tickets/10009/reply"))
            .and(body_json(json!({
                "content": "  <p>Hi</p>\n",
                "operator_id": OPERATOR_ID,
                "message_type": "public",
                "author_type": "operator"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "msg-3"})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/tickets/10009/reply"))
            .and(body_json(json!({
                "content": "   ",
                "operator_id": OPERATOR_ID,
                "message_type": "internal",
                "author_type": "operator"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "msg-4"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let reply = reply_to_a_ticket(&client, message_input("  <p>Hi</p>\n", OPERATOR_ID))
            .await
            .unwrap();
        let note = add_internal_note_to_a_ticket(&client, message_input("   ", OPERATOR_ID))
            .await
            .unwrap();

        assert_eq!(reply.data, json!({"id": "msg-3"}));
        assert_eq!(note.data, json!({"id": "msg-4"}));
    }

    #[test]
    fn test_reply_with_empty_content_makes_no_request() {
        // Nothing listens on this port; reaching the network would fail differently.
        let config = Config::new("id", "secret")
            .with_base_url("http://127.0.0.1:1")
            .unwrap();
        let client = TidioClient::new(&config).unwrap();

        let cases = [
            (message_input("", "op-id"), "Content cannot be empty"),
            (message_input("Valid content", ""), "Operator ID cannot be empty"),
        ];

        for (input, expected) in cases {
            let reply = tokio_test::block_on(reply_to_a_ticket(&client, input.clone()));
            let note = tokio_test::block_on(add_internal_note_to_a_ticket(&client, input));

            for err in [reply.unwrap_err(), note.unwrap_err()] {
                assert!(err.is_validation());
                assert_eq!(err.to_string(), expected);
            }
        }
    }

    #[tokio::test]
    async fn test_api_errors_propagate_unchanged() {
        let server = MockServer::start().await;
        mount_json(&server, "GET", "/tickets/404", 404, &json!({"error": "Not found"})).await;

        let err = get_ticket_details(&test_client(&server), TicketInput { ticket_id: 404 })
            .await
            .unwrap_err();

        assert_eq!(err.api_kind(), Some(ApiErrorKind::RequestFailed));
        assert!(err.to_string().contains("Not found"));
    }
}
