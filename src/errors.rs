use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::fmt;

use crate::http::HttpFailure;

/// Which action a failure belongs to, for the generic failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreatePerson,
    UpdateLead,
}

impl Operation {
    fn gerund(&self) -> &'static str {
        match self {
            Operation::CreatePerson => "creating person",
            Operation::UpdateLead => "updating lead",
        }
    }
}

/// Errors raised by the Copper actions.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionError {
    /// Input rejected before any request was built.
    Validation(String),
    /// A lead update where every field was absent or empty.
    NoFieldsProvided,
    /// Copper answered 400. Carries the response body.
    BadRequest(Value),
    /// Copper answered 401.
    AuthenticationFailed,
    /// Copper answered 403.
    AccessForbidden,
    /// Copper answered 404 to a lead update.
    LeadNotFound(String),
    /// Transport failures and every unmapped status.
    Failed {
        operation: Operation,
        message: String,
    },
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::Validation(msg) => write!(f, "{}", msg),
            ActionError::NoFieldsProvided => write!(
                f,
                "No fields provided for update. Please specify at least one field to update."
            ),
            ActionError::BadRequest(body) => write!(f, "Bad request: {}", body),
            ActionError::AuthenticationFailed => write!(
                f,
                "Authentication failed. Please check your API key and user email."
            ),
            ActionError::AccessForbidden => {
                write!(f, "Access forbidden. Please check your permissions.")
            }
            ActionError::LeadNotFound(lead_id) => write!(f, "Lead with ID {} not found.", lead_id),
            ActionError::Failed { operation, message } => {
                write!(f, "Error {}: {}", operation.gerund(), message)
            }
        }
    }
}

impl std::error::Error for ActionError {}

impl ActionError {
    /// Maps a failed Copper request onto the action's error taxonomy.
    ///
    /// `lead_id` is only consulted for 404s on lead updates; a 404 from any
    /// other operation falls through to the generic failure.
    pub fn from_failure(
        operation: Operation,
        failure: HttpFailure,
        lead_id: Option<&str>,
    ) -> Self {
        match (failure.response, operation, lead_id) {
            (Some(response), _, _) if response.status == 400 => {
                ActionError::BadRequest(response.body)
            }
            (Some(response), _, _) if response.status == 401 => ActionError::AuthenticationFailed,
            (Some(response), _, _) if response.status == 403 => ActionError::AccessForbidden,
            (Some(response), Operation::UpdateLead, Some(lead_id)) if response.status == 404 => {
                ActionError::LeadNotFound(lead_id.to_string())
            }
            _ => ActionError::Failed {
                operation,
                message: failure.message,
            },
        }
    }
}

impl IntoResponse for ActionError {
    /// Converts the error into an HTTP response.
    ///
    /// Remote statuses are mirrored where Copper produced them; other remote
    /// failures become 502 and local validation failures 422.
    fn into_response(self) -> Response {
        let status = match &self {
            ActionError::Validation(_) | ActionError::NoFieldsProvided => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ActionError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ActionError::AuthenticationFailed => {
                tracing::warn!("Copper rejected the configured credentials");
                StatusCode::UNAUTHORIZED
            }
            ActionError::AccessForbidden => StatusCode::FORBIDDEN,
            ActionError::LeadNotFound(_) => StatusCode::NOT_FOUND,
            ActionError::Failed { .. } => {
                tracing::error!("Copper request failed: {}", self);
                StatusCode::BAD_GATEWAY
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
