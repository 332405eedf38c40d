use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};
use types::ids::SessionId;

pub const SESSION_HEADER: &str = "x-session-id";

fn session_from_parts(parts: &Parts) -> Result<Option<SessionId>, AppError> {
    match parts.headers.get(SESSION_HEADER) {
        Some(value) => {
            let raw = value
                .to_str()
                .map_err(|_| AppError::InvalidInput("Invalid X-Session-ID header".into()))?;
            Ok(SessionId::parse(raw))
        }
        None => Ok(None),
    }
}

/// Session id supplied via `X-Session-ID`, if any
pub struct OptionalSession(pub Option<SessionId>);

impl<S> FromRequestParts<S> for OptionalSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_parts(parts).map(OptionalSession)
    }
}

/// Session id that must be present on the request
pub struct RequiredSession(pub SessionId);

impl<S> FromRequestParts<S> for RequiredSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_from_parts(parts)?
            .map(RequiredSession)
            .ok_or_else(|| AppError::NoSessionSelected("Session ID required".into()))
    }
}
