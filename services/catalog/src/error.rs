use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::{DbErr, SqlErr};
use validator::ValidationErrors;

use reelhouse_auth_types::token::AuthError;
use reelhouse_core::error::error_response;

/// Catalog service error variants. The message of every non-internal variant
/// is sent to the client verbatim.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    Unauthenticated(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Upstream(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl CatalogError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn invalid_token() -> Self {
        Self::Unauthenticated("Invalid token".to_owned())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Unauthenticated(_) => "UNAUTHENTICATED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::Upstream(_) => "UPSTREAM_FAILURE",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Map a failed insert: unique violations become `Conflict(message)`,
    /// anything else is internal with `context` attached.
    pub fn from_write(err: DbErr, message: &str, context: &'static str) -> Self {
        if let Some(SqlErr::UniqueConstraintViolation(_)) = err.sql_err() {
            return Self::Conflict(message.to_owned());
        }
        Self::Internal(anyhow::Error::new(err).context(context))
    }

    /// Report the first failing field in `fields` order. A `required` error
    /// outranks the other rules on the same field.
    pub fn from_validation(errors: &ValidationErrors, fields: &[&str]) -> Self {
        let field_errors = errors.field_errors();
        let message = fields
            .iter()
            .filter_map(|field| field_errors.get(*field))
            .find_map(|errs| {
                errs.iter()
                    .find(|e| e.code == "required")
                    .or_else(|| errs.first())
                    .and_then(|e| e.message.as_ref())
            })
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid request".to_owned());
        Self::InvalidRequest(message)
    }
}

impl From<AuthError> for CatalogError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(e) => Self::Internal(anyhow::Error::new(e).context("sign session")),
            _ => Self::invalid_token(),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidRequest(_)
            | Self::Unauthenticated(_)
            | Self::Conflict(_)
            | Self::Upstream(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // 4xx are expected client errors; TraceLayer already records them.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = ?e, kind = "INTERNAL", "internal error");
            return error_response(status, "internal server error");
        }
        error_response(status, self.to_string())
    }
}
