//! Session extractor
//!
//! Turns the `Authorization: Bearer` header into a [`Session`].

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use chirp_service::Session;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller session, anonymous when no Authorization header is sent.
///
/// A header that is present but malformed, badly signed or expired is
/// rejected rather than treated as anonymous.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            match TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state).await {
                Ok(header) => header,
                Err(rejection) if rejection.is_missing() => {
                    return Ok(OptionalAuthUser(Session::anonymous()));
                }
                Err(_) => return Err(ApiError::InvalidAuthFormat),
            };

        let app_state = AppState::from_ref(state);
        let user_id = app_state
            .jwt_service()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Invalid session token");
                ApiError::App(e)
            })?;

        Ok(OptionalAuthUser(Session::authenticated(user_id)))
    }
}
