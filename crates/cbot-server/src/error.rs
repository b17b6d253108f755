use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cbot_core::{admin::CardError, chat::BlankMessage, SelectionError};
use serde::Serialize;

/// An error answered with a status code and a `{"message": ...}` body.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
}

impl ApiError {
    /// 400 with the given message.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// 404 with the given message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    /// The response status.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::debug!(status = %self.status, "{}", self.message);
        }
        (
            self.status,
            Json(ErrorBody {
                message: &self.message,
            }),
        )
            .into_response()
    }
}

impl From<SelectionError> for ApiError {
    fn from(error: SelectionError) -> Self {
        Self::bad_request(error.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<BlankMessage> for ApiError {
    fn from(error: BlankMessage) -> Self {
        Self::bad_request(error.to_string())
    }
}

impl From<CardError> for ApiError {
    fn from(error: CardError) -> Self {
        match error {
            CardError::UnknownModule(_) => Self::not_found(error.to_string()),
            CardError::BlankDescription | CardError::NotPositive(_) => {
                Self::bad_request(error.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use cbot_core::admin::{ModuleCardUpdate, ModuleCards};

    use super::*;

    #[test]
    fn unknown_module_maps_to_not_found() {
        let error = ModuleCards::default()
            .update("billing", ModuleCardUpdate::default())
            .unwrap_err();
        assert_eq!(ApiError::from(error).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_update_maps_to_bad_request() {
        let error = ApiError::from(CardError::NotPositive("cpu_test"));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.to_string(), "400 Bad Request: cpu_test must be a positive number");
    }
}
