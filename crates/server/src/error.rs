use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::notion::NotionError;

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found")]
    NotFound,

    #[error("Page not found: {0}")]
    PageNotFound(String),

    #[error("Upstream error: {0}")]
    Upstream(NotionError),

    #[error("Pipeline error: {0}")]
    Pipeline(#[from] dronereport::PipelineError),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::NotFound | ServerError::PageNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ServerError::Pipeline(_)
            | ServerError::Render(_)
            | ServerError::Internal(_)
            | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::NotFound | ServerError::PageNotFound(_) => "NOT_FOUND",
            ServerError::Upstream(_) => "UPSTREAM_ERROR",
            ServerError::Pipeline(_) | ServerError::Render(_) => "RENDER_ERROR",
            ServerError::Internal(_) | ServerError::Config(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }

        let body = Json(json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
            }
        }));

        (status, body).into_response()
    }
}

impl From<NotionError> for ServerError {
    fn from(err: NotionError) -> Self {
        match err {
            NotionError::InvalidPageId(_) => ServerError::BadRequest(err.to_string()),
            err if err.is_not_found() => ServerError::PageNotFound(err.to_string()),
            NotionError::Config(msg) => ServerError::Config(msg),
            other => ServerError::Upstream(other),
        }
    }
}

impl From<handlebars::RenderError> for ServerError {
    fn from(err: handlebars::RenderError) -> Self {
        ServerError::Render(err.to_string())
    }
}

impl From<handlebars::TemplateError> for ServerError {
    fn from(err: handlebars::TemplateError) -> Self {
        ServerError::Config(format!("Invalid report template: {err}"))
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(format!("report worker failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notion_errors_map_to_stable_codes() {
        let cases = [
            (
                ServerError::from(NotionError::InvalidPageId("x".into())),
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
            ),
            (
                ServerError::from(NotionError::Status {
                    status: 404,
                    body: String::new(),
                }),
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                ServerError::from(NotionError::Status {
                    status: 500,
                    body: "boom".into(),
                }),
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
            ),
            (
                ServerError::from(NotionError::MissingProperties("p".into())),
                StatusCode::BAD_GATEWAY,
                "UPSTREAM_ERROR",
            ),
        ];
        for (err, status, code) in cases {
            assert_eq!(err.status_code(), status, "{err}");
            assert_eq!(err.error_code(), code, "{err}");
        }
    }

    #[tokio::test]
    async fn panicked_report_worker_is_internal() {
        let join_err = tokio::task::spawn_blocking(|| panic!("chart raster"))
            .await
            .unwrap_err();
        let err = ServerError::from(join_err);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn render_errors_are_internal() {
        let err = ServerError::Render("missing helper".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "RENDER_ERROR");
    }
}
