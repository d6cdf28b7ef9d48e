//! HTTP handlers for chat endpoints.
//!
//! These handlers connect Axum routes to application layer operations.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;
use tracing::{error, warn};

use crate::application::{
    GetHistoryError, GetHistoryHandler, GetHistoryQuery, SendMessageCommand, SendMessageError,
    SendMessageHandler,
};
use crate::domain::chat::{MessageText, StoreKnowledge};
use crate::domain::foundation::ConversationId;
use crate::ports::{AIProvider, ConversationStore};

use super::dto::{
    ErrorResponse, HealthResponse, HistoryEntry, SendMessageRequest, SendMessageResponse,
};

pub const EMPTY_MESSAGE_ERROR: &str = "Empty message";
pub const PROVIDER_FAILURE_ERROR: &str = "AI service timeout. Please try again.";
pub const STORAGE_FAILURE_ERROR: &str = "Database connection lost.";
pub const HISTORY_FAILURE_ERROR: &str = "Could not load history";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for chat handlers.
#[derive(Clone)]
pub struct ChatAppState {
    pub send_message: Arc<SendMessageHandler>,
    pub get_history: Arc<GetHistoryHandler>,
}

impl ChatAppState {
    /// Wires both handlers against the same store.
    pub fn new(
        store: Arc<dyn ConversationStore>,
        ai_provider: Arc<dyn AIProvider>,
        knowledge: Arc<StoreKnowledge>,
    ) -> Self {
        Self {
            send_message: Arc::new(SendMessageHandler::new(
                Arc::clone(&store),
                ai_provider,
                knowledge,
            )),
            get_history: Arc::new(GetHistoryHandler::new(store)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /chat/message
pub async fn post_message(
    State(state): State<ChatAppState>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, ChatApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "rejected unreadable chat request body");
            SendMessageRequest::default()
        }
    };

    let message = request.message.unwrap_or_default();
    if MessageText::parse(&message).is_err() {
        return Err(SendMessageError::EmptyMessage.into());
    }

    let session_id = resolve_session_id(request.session_id.as_ref())?;
    let command = SendMessageCommand::new(message, session_id);

    let result = state.send_message.handle(command).await?;
    Ok(Json(result.into()))
}

/// GET /chat/history/:session_id
pub async fn get_history(
    State(state): State<ChatAppState>,
    Path(session_id): Path<String>,
) -> Result<Json<Vec<HistoryEntry>>, ChatApiError> {
    // Ids that are not UUIDs can never have been issued.
    let Ok(session_id) = session_id.parse::<ConversationId>() else {
        return Ok(Json(Vec::new()));
    };

    let messages = state
        .get_history
        .handle(GetHistoryQuery { session_id })
        .await?;

    Ok(Json(messages.into_iter().map(HistoryEntry::from).collect()))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Null, missing or empty ids start a new conversation.
///
/// Any other value that is not a UUID cannot address a stored conversation.
/// The store would refuse it, so it is reported as a storage failure before
/// anything is written.
fn resolve_session_id(raw: Option<&Value>) -> Result<Option<ConversationId>, ChatApiError> {
    let text = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.is_empty() => return Ok(None),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    };

    text.parse::<ConversationId>().map(Some).map_err(|_| {
        warn!(session_id = %text, "session id cannot address a conversation");
        ChatApiError::Internal {
            message: STORAGE_FAILURE_ERROR,
            cause: format!("invalid conversation id {text}"),
        }
    })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts application errors to HTTP responses.
///
/// Causes are logged where they happen; clients only see fixed texts.
#[derive(Debug)]
pub enum ChatApiError {
    BadRequest(String),
    ServiceUnavailable(String),
    Internal { message: &'static str, cause: String },
}

impl From<SendMessageError> for ChatApiError {
    fn from(err: SendMessageError) -> Self {
        match err {
            SendMessageError::EmptyMessage => {
                ChatApiError::BadRequest(EMPTY_MESSAGE_ERROR.to_string())
            }
            SendMessageError::AIProviderError(cause) => ChatApiError::ServiceUnavailable(cause),
            SendMessageError::StorageError(cause) => ChatApiError::Internal {
                message: STORAGE_FAILURE_ERROR,
                cause,
            },
        }
    }
}

impl From<GetHistoryError> for ChatApiError {
    fn from(err: GetHistoryError) -> Self {
        match err {
            GetHistoryError::StorageError(cause) => ChatApiError::Internal {
                message: HISTORY_FAILURE_ERROR,
                cause,
            },
        }
    }
}

impl IntoResponse for ChatApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ChatApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ChatApiError::ServiceUnavailable(cause) => {
                warn!(%cause, "completion provider failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new(PROVIDER_FAILURE_ERROR),
                )
            }
            ChatApiError::Internal { message, cause } => {
                error!(%cause, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorResponse::new(message))
            }
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod session_id_resolution {
        use super::*;
        use serde_json::json;

        #[test]
        fn absent_null_and_empty_start_new_conversation() {
            assert_eq!(resolve_session_id(None).unwrap(), None);
            assert_eq!(resolve_session_id(Some(&Value::Null)).unwrap(), None);
            assert_eq!(resolve_session_id(Some(&json!(""))).unwrap(), None);
        }

        #[test]
        fn uuid_is_accepted() {
            let id = ConversationId::new();
            let parsed = resolve_session_id(Some(&json!(id.to_string()))).unwrap();
            assert_eq!(parsed, Some(id));
        }

        #[test]
        fn non_uuid_string_is_a_storage_failure() {
            let err = resolve_session_id(Some(&json!("abc"))).unwrap_err();
            assert!(matches!(
                err,
                ChatApiError::Internal { message, .. } if message == STORAGE_FAILURE_ERROR
            ));
        }

        #[test]
        fn non_string_value_is_a_storage_failure() {
            let err = resolve_session_id(Some(&json!(42))).unwrap_err();
            assert!(matches!(
                err,
                ChatApiError::Internal { message, .. } if message == STORAGE_FAILURE_ERROR
            ));
        }
    }

    mod error_mapping {
        use super::*;

        #[test]
        fn empty_message_is_400() {
            let response = ChatApiError::from(SendMessageError::EmptyMessage).into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }

        #[test]
        fn provider_failure_is_503() {
            let err = SendMessageError::AIProviderError("timeout".to_string());
            let response = ChatApiError::from(err).into_response();
            assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        }

        #[test]
        fn storage_failure_is_500() {
            let err = SendMessageError::StorageError("connection refused".to_string());
            let api_err = ChatApiError::from(err);
            assert!(matches!(
                api_err,
                ChatApiError::Internal { message, .. } if message == STORAGE_FAILURE_ERROR
            ));
            assert_eq!(
                api_err.into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR
            );
        }

        #[test]
        fn history_failure_uses_its_own_text() {
            let err = GetHistoryError::StorageError("pool closed".to_string());
            assert!(matches!(
                ChatApiError::from(err),
                ChatApiError::Internal { message, .. } if message == HISTORY_FAILURE_ERROR
            ));
        }
    }
}
