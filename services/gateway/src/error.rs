use crate::proxy::ProxyError;
use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No session selected: {0}")]
    NoSessionSelected(String),

    #[error("Bad request: {0}")]
    InvalidInput(String),

    #[error("Upstream unavailable")]
    UpstreamTransport,

    #[error("Upstream response could not be parsed")]
    UpstreamParse,
}

impl From<ProxyError> for AppError {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::NoSessionSelected => {
                AppError::NoSessionSelected("No user selected for session".into())
            }
            ProxyError::InvalidInput(msg) => AppError::InvalidInput(msg),
            // Causes are logged by the proxy; callers only see the category
            ProxyError::UpstreamTransport(_) => AppError::UpstreamTransport,
            ProxyError::UpstreamParse(_) => AppError::UpstreamParse,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidInput(format!("Invalid query string: {}", rejection.body_text()))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::NoSessionSelected(msg) => {
                (StatusCode::BAD_REQUEST, msg, "NO_SESSION_SELECTED")
            }
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg, "INVALID_INPUT"),
            AppError::UpstreamTransport => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error contacting wallet provider".to_string(),
                "UPSTREAM_TRANSPORT_ERROR",
            ),
            AppError::UpstreamParse => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error parsing response".to_string(),
                "UPSTREAM_PARSE_ERROR",
            ),
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamError;

    #[test]
    fn test_taxonomy_status_codes() {
        let cases = [
            (ProxyError::NoSessionSelected, StatusCode::BAD_REQUEST),
            (ProxyError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (
                ProxyError::UpstreamTransport(UpstreamError::Timeout),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ProxyError::UpstreamParse("eof".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn test_transport_cause_not_exposed() {
        let err = AppError::from(ProxyError::UpstreamTransport(UpstreamError::Connect(
            "tcp connect error 10.0.0.5:443".into(),
        )));
        assert!(!err.to_string().contains("10.0.0.5"));
    }
}
