//! Route guards. `authenticate` resolves the bearer token to a user and
//! stores it in request extensions; `require_admin` runs after it on
//! admin-only routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use reelhouse_auth_types::bearer::BearerToken;
use reelhouse_auth_types::token::AuthError;

use crate::domain::types::User;
use crate::error::CatalogError;
use crate::state::AppState;
use crate::usecase::access::{AuthenticateUseCase, require_admin as check_admin};

/// The authenticated caller, attached by [`authenticate`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = CatalogError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(CatalogError::invalid_token)
    }
}

pub async fn authenticate(
    State(state): State<AppState>,
    bearer: Result<BearerToken, AuthError>,
    mut req: Request,
    next: Next,
) -> Result<Response, CatalogError> {
    let bearer = bearer?;
    let usecase = AuthenticateUseCase {
        users: state.user_repo(),
        tokens: state.tokens.clone(),
    };
    let user = usecase.execute(&bearer).await?;
    tracing::debug!(user_id = %user.id, "request authenticated");
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

pub async fn require_admin(
    CurrentUser(user): CurrentUser,
    req: Request,
    next: Next,
) -> Result<Response, CatalogError> {
    check_admin(&user)?;
    Ok(next.run(req).await)
}
