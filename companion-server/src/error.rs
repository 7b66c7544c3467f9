use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use companion_core::Error;
use serde::Serialize;

/// Every failure leaves the server as `{error, message?, stack?}`
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        ApiError {
            status,
            body: ErrorBody {
                error: error.into(),
                message: None,
                stack: None,
            },
        }
    }

    pub fn bad_request(error: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }

    pub fn internal(error: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, error)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.body.message = Some(message.into());
        self
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }

    /// Map a core error for a route whose failures read as `summary`.
    /// `expose_details` adds the error chain as `stack`.
    pub fn from_core(err: Error, summary: &str, expose_details: bool) -> Self {
        match err {
            Error::Validation(message) => Self::bad_request(message),
            Error::NotFound(message) => Self::new(StatusCode::NOT_FOUND, message),
            Error::AnalysisFailure(_) | Error::Collaborator(_) => {
                tracing::error!("{}: {}", summary, err);
                Self::internal(summary).with_message(err.to_string())
            }
            Error::Storage(_) | Error::Internal(_) => {
                tracing::error!("{}: {}", summary, err);
                let mut api = Self::internal(summary).with_message(err.to_string());
                if expose_details {
                    api.body.stack = Some(format!("{:?}", err));
                }
                api
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let status = match rejection.status() {
            StatusCode::PAYLOAD_TOO_LARGE => StatusCode::PAYLOAD_TOO_LARGE,
            _ => StatusCode::BAD_REQUEST,
        };
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        Self::new(status, "Invalid JSON body").with_message(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
