use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tokio::task::JoinError;

use crate::agent::AgentError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Request body is not valid JSON: {0}")]
    MalformedBody(#[source] serde_json::Error),
    #[error("No agent is configured.")]
    NoAgent,
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("Agent task did not finish: {0}")]
    Join(#[from] JoinError),
}

impl ServerError {
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ServerError::NoAgent | ServerError::Agent(_) | ServerError::Join(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        // A bad request is the client's fault, not ours.
        if self.status().is_client_error() {
            tracing::warn!(error = %self, "rejected move request");
        } else {
            tracing::error!(error = %self, "move request failed");
        }
        (self.status(), self.to_string()).into_response()
    }
}
