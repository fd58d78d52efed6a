//! MCP server implementation for Tidio.
//!
//! This module defines the `TidioServer` struct that implements the MCP
//! `ServerHandler` trait, exposing Tidio operations as tools.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};

use crate::error::TidioError;
use crate::models::Envelope;
use crate::tidio_client::TidioClient;
use crate::tools::handlers;
use crate::tools::{
    ContactInput, CreateTicketInput, ListContactsInput, ListOperatorsInput, TicketInput,
    TicketMessageInput, UpdateTicketInput,
};

/// The Tidio MCP server.
///
/// This server exposes Tidio OpenAPI operations as MCP tools.
#[derive(Clone)]
pub struct TidioServer {
    /// Tidio client for API operations.
    client: TidioClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl TidioServer {
    /// Creates a new server instance.
    ///
    /// # Arguments
    ///
    /// * `client` - The Tidio client for API operations
    pub fn new(client: TidioClient) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// A simple ping tool to verify the server is running.
    ///
    /// Returns "pong" without contacting Tidio.
    #[tool(description = "Test connectivity to the Tidio MCP server. Returns 'pong' if the server is running correctly.")]
    fn ping(&self) -> String {
        tracing::debug!("ping tool called");
        "pong".to_string()
    }

    #[tool(description = "Get all departments from Tidio. Departments are agent groups and can be assigned to tickets.")]
    async fn get_departments(&self) -> Result<String, String> {
        tracing::debug!("get_departments tool called");
        let result = handlers::get_departments(&self.client).await;
        self.render("get_departments", result)
    }

    /// List operators, one page per call.
    #[tool(description = "Get operators from Tidio. Operators are agents that manage tickets and talk to customers, and can be assigned to tickets. Paginated: if the response has a non-null meta.cursor, pass it as 'cursor' to fetch the next page; a null meta.cursor means the end of the list.")]
    async fn get_operators(
        &self,
        Parameters(input): Parameters<ListOperatorsInput>,
    ) -> Result<String, String> {
        tracing::debug!(?input, "get_operators tool called");
        let result = handlers::get_operators(&self.client, input).await;
        self.render("get_operators", result)
    }

    /// List contacts, one page per call.
    #[tool(description = "Get contacts from Tidio. Contacts are customers who reached the company via chat or email. Optionally filter by full email address. Paginated: pass a non-null meta.cursor from the previous response as 'cursor' to fetch the next page.")]
    async fn get_contacts(
        &self,
        Parameters(input): Parameters<ListContactsInput>,
    ) -> Result<String, String> {
        tracing::debug!(cursor = ?input.cursor, "get_contacts tool called");
        let result = handlers::get_contacts(&self.client, input).await;
        self.render("get_contacts", result)
    }

    #[tool(description = "Get details of a specific contact (customer) from Tidio by contact UUID.")]
    async fn get_contact_details(
        &self,
        Parameters(input): Parameters<ContactInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = %input.contact_id, "get_contact_details tool called");
        let result = handlers::get_contact_details(&self.client, input).await;
        self.render("get_contact_details", result)
    }

    #[tool(description = "Delete a specific contact (customer) from Tidio by contact UUID.")]
    async fn delete_contact(
        &self,
        Parameters(input): Parameters<ContactInput>,
    ) -> Result<String, String> {
        tracing::debug!(contact_id = %input.contact_id, "delete_contact tool called");
        let result = handlers::delete_contact(&self.client, input).await;
        self.render("delete_contact", result)
    }

    #[tool(description = "Get all tickets from Tidio. Use this for a tickets overview.")]
    async fn get_tickets(&self) -> Result<String, String> {
        tracing::debug!("get_tickets tool called");
        let result = handlers::get_tickets(&self.client).await;
        self.render("get_tickets", result)
    }

    #[tool(description = "Get details of a specific ticket from Tidio, including its messages.")]
    async fn get_ticket_details(
        &self,
        Parameters(input): Parameters<TicketInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "get_ticket_details tool called");
        let result = handlers::get_ticket_details(&self.client, input).await;
        self.render("get_ticket_details", result)
    }

    #[tool(description = "Delete a specific ticket from Tidio.")]
    async fn delete_ticket(
        &self,
        Parameters(input): Parameters<TicketInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "delete_ticket tool called");
        let result = handlers::delete_ticket(&self.client, input).await;
        self.render("delete_ticket", result)
    }

    // ========================================================================
    // Write tools
    // ========================================================================

    /// Create a ticket as if the customer had written in.
    #[tool(description = "Create a new ticket in Tidio from a customer's perspective. Contact email, subject and message content are required. Optionally assign a department by UUID; the General department is used otherwise. Returns the created ticket ID.")]
    async fn create_ticket(
        &self,
        Parameters(input): Parameters<CreateTicketInput>,
    ) -> Result<String, String> {
        tracing::debug!(subject = %input.subject, "create_ticket tool called");
        let result = handlers::create_ticket(&self.client, input).await;
        self.render("create_ticket", result)
    }

    /// Update status, priority or assignee.
    ///
    /// At least one field must be provided.
    #[tool(description = "Update a ticket in Tidio. Provide at least one of: status ('open', 'pending', 'solved'), priority ('low', 'normal', 'urgent'), assigned ({\"type\": \"operator\" or \"department\", \"id\": \"<uuid>\"}).")]
    async fn update_ticket(
        &self,
        Parameters(input): Parameters<UpdateTicketInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "update_ticket tool called");
        let result = handlers::update_ticket(&self.client, input).await;
        self.render("update_ticket", result)
    }

    #[tool(description = "Unassign the operator or department from a ticket in Tidio.")]
    async fn unassign_ticket(
        &self,
        Parameters(input): Parameters<TicketInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "unassign_ticket tool called");
        let result = handlers::unassign_ticket(&self.client, input).await;
        self.render("unassign_ticket", result)
    }

    #[tool(description = "Send a public reply to a ticket in Tidio. The reply is visible to and sent to the customer. Content may be HTML. Requires the UUID of the operator sending it.")]
    async fn reply_to_a_ticket(
        &self,
        Parameters(input): Parameters<TicketMessageInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "reply_to_a_ticket tool called");
        let result = handlers::reply_to_a_ticket(&self.client, input).await;
        self.render("reply_to_a_ticket", result)
    }

    #[tool(description = "Add an internal note to a ticket in Tidio. The note is visible to operators only and is not sent to the customer. Content must be plain text. Requires the UUID of the operator adding it.")]
    async fn add_internal_note_to_a_ticket(
        &self,
        Parameters(input): Parameters<TicketMessageInput>,
    ) -> Result<String, String> {
        tracing::debug!(ticket_id = input.ticket_id, "add_internal_note_to_a_ticket tool called");
        let result = handlers::add_internal_note_to_a_ticket(&self.client, input).await;
        self.render("add_internal_note_to_a_ticket", result)
    }

    /// Renders a tool result: the envelope as JSON, or a sanitized error message.
    fn render(&self, tool: &str, result: Result<Envelope, TidioError>) -> Result<String, String> {
        match result {
            Ok(envelope) => Ok(envelope.to_json_string()),
            Err(e) => {
                let sanitized = self.sanitize_error(&e);
                tracing::error!(tool = tool, kind = ?e.api_kind(), error = %sanitized, "Tool call failed");
                if e.is_validation() {
                    Err(format!("Invalid arguments: {}", sanitized))
                } else {
                    Err(sanitized)
                }
            }
        }
    }

    /// Sanitizes an error message to remove the client secret.
    fn sanitize_error(&self, error: &TidioError) -> String {
        error.sanitized_display(self.client.secret_for_sanitization())
    }
}

#[tool_handler]
impl ServerHandler for TidioServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Tidio MCP server gives access to Tidio departments, operators, contacts and tickets. \
                 Use get_tickets for an overview and get_ticket_details for messages. \
                 Look up assignees with get_operators and get_departments, and customers with \
                 get_contacts. Create tickets with create_ticket, change status, priority or \
                 assignee with update_ticket, clear the assignee with unassign_ticket, answer \
                 customers with reply_to_a_ticket and leave operator-only notes with \
                 add_internal_note_to_a_ticket. List tools are paginated: pass meta.cursor back \
                 as 'cursor'. Start with 'ping' to verify connectivity."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
