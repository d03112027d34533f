//! Post service
//!
//! The create pipeline (authenticate, validate, rate limit, persist) and the
//! enriched read queries.

use chirp_core::traits::PostQuery;
use chirp_core::{PostContent, Snowflake, UserId};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::{CreatePostRequest, EnrichedPostResponse, PostResponse};

use super::context::ServiceContext;
use super::enrichment::enrich_posts;
use super::error::{ServiceError, ServiceResult};
use super::session::Session;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    /// Create a new PostService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a post for the signed-in caller.
    ///
    /// Each step short-circuits: an anonymous session never reaches the
    /// rate limiter, and invalid or rate limited requests never reach the
    /// store.
    #[instrument(skip(self, session, request))]
    pub async fn create_post(
        &self,
        session: &Session,
        request: CreatePostRequest,
    ) -> ServiceResult<PostResponse> {
        let author_id = session.require_user()?;

        request.validate()?;
        let content = PostContent::parse(request.content)
            .map_err(|e| ServiceError::Domain(e.into()))?;

        let decision = self
            .ctx
            .rate_limiter()
            .check_and_consume(author_id.as_str())
            .await?;
        if !decision.allowed {
            warn!(user_id = %author_id, limit = decision.limit, "Post rate limit exceeded");
            return Err(ServiceError::RateLimited {
                retry_after: decision.retry_after,
            });
        }

        let post = self
            .ctx
            .post_repo()
            .create(author_id, &content)
            .await
            .map_err(ServiceError::Persistence)?;

        info!(
            post_id = %post.id,
            user_id = %author_id,
            remaining = decision.remaining,
            "Post created"
        );

        Ok(post.into())
    }

    /// Most recent posts across all authors, newest first
    #[instrument(skip(self))]
    pub async fn get_all_posts(&self) -> ServiceResult<Vec<EnrichedPostResponse>> {
        self.query_posts(PostQuery::latest()).await
    }

    /// A single post by id.
    ///
    /// Ids that are not valid snowflakes cannot name a post and are
    /// reported as not found.
    #[instrument(skip(self))]
    pub async fn get_post(&self, id: &str) -> ServiceResult<EnrichedPostResponse> {
        let post_id =
            Snowflake::parse(id).map_err(|_| ServiceError::not_found("Post", id))?;

        let post = self
            .ctx
            .post_repo()
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Post", id))?;

        let mut enriched = enrich_posts(self.ctx.identity(), vec![post]).await?;
        enriched
            .pop()
            .map(Into::into)
            .ok_or_else(|| ServiceError::internal("enrichment returned no post"))
    }

    /// Most recent posts by one author, newest first
    #[instrument(skip(self))]
    pub async fn get_posts_by_user(&self, user_id: &str) -> ServiceResult<Vec<EnrichedPostResponse>> {
        self.query_posts(PostQuery::by_author(UserId::new(user_id)))
            .await
    }

    async fn query_posts(&self, query: PostQuery) -> ServiceResult<Vec<EnrichedPostResponse>> {
        let posts = self.ctx.post_repo().find_many(&query).await?;
        let enriched = enrich_posts(self.ctx.identity(), posts).await?;
        Ok(enriched.into_iter().map(Into::into).collect())
    }
}
