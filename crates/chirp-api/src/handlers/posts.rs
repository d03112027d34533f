//! Post handlers
//!
//! Endpoints for creating and reading posts.

use axum::{extract::State, Json};
use chirp_service::dto::{CreatePostRequest, EnrichedPostResponse, PostResponse};
use chirp_service::PostService;

use crate::extractors::{ApiPath, JsonBody, OptionalAuthUser, PostIdPath, UserIdPath};
use crate::response::{ApiError, ApiResult, Created};
use crate::state::AppState;

/// Create a post as the signed-in caller
///
/// POST /posts
///
/// The session is checked before the body, so an anonymous caller gets
/// `UNAUTHORIZED` whatever it sent.
pub async fn create_post(
    State(state): State<AppState>,
    OptionalAuthUser(session): OptionalAuthUser,
    body: Result<JsonBody<CreatePostRequest>, ApiError>,
) -> ApiResult<Created<Json<PostResponse>>> {
    session.require_user()?;
    let JsonBody(request) = body?;

    let service = PostService::new(state.service_context());
    let post = service.create_post(&session, request).await?;
    Ok(Created(Json(post)))
}

/// Most recent posts
///
/// GET /posts
pub async fn get_posts(State(state): State<AppState>) -> ApiResult<Json<Vec<EnrichedPostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_all_posts().await?))
}

/// Post by id
///
/// GET /posts/{id}
pub async fn get_post(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<PostIdPath>,
) -> ApiResult<Json<EnrichedPostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_post(&path.id).await?))
}

/// Most recent posts by one user
///
/// GET /users/{user_id}/posts
pub async fn get_user_posts(
    State(state): State<AppState>,
    ApiPath(path): ApiPath<UserIdPath>,
) -> ApiResult<Json<Vec<EnrichedPostResponse>>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_posts_by_user(&path.user_id).await?))
}
