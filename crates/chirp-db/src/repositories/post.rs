//! PostgreSQL implementation of PostRepository

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use chirp_core::entities::Post;
use chirp_core::error::DomainError;
use chirp_core::traits::{PostQuery, PostRepository, RepoResult};
use chirp_core::value_objects::{PostContent, Snowflake, SnowflakeGenerator, UserId};

use crate::mappers::PostInsert;
use crate::models::PostModel;

use super::error::{map_db_error, map_unique_violation};

/// PostgreSQL implementation of PostRepository.
///
/// Ids come from the shared Snowflake generator; `created_at` is stamped by
/// the database.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
    ids: Arc<SnowflakeGenerator>,
}

impl PgPostRepository {
    /// Create a new PgPostRepository
    pub fn new(pool: PgPool, ids: Arc<SnowflakeGenerator>) -> Self {
        Self { pool, ids }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    #[instrument(skip(self, content), fields(author_id = %author_id))]
    async fn create(&self, author_id: &UserId, content: &PostContent) -> RepoResult<Post> {
        let id = self.ids.generate();
        let insert = PostInsert::new(id, author_id, content.as_str());

        let model = sqlx::query_as::<_, PostModel>(
            r#"
            INSERT INTO posts (id, author_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, author_id, content, created_at
            "#,
        )
        .bind(insert.id)
        .bind(insert.author_id)
        .bind(insert.content)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::InternalError(format!("duplicate post id {id}"))
            })
        })?;

        debug!(post_id = model.id, "Post row inserted");
        Ok(Post::from(model))
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Post>> {
        let result = sqlx::query_as::<_, PostModel>(
            r#"
            SELECT id, author_id, content, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Post::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &PostQuery) -> RepoResult<Vec<Post>> {
        let limit = query.effective_limit();

        let results = match &query.author_id {
            Some(author_id) => {
                sqlx::query_as::<_, PostModel>(
                    r#"
                    SELECT id, author_id, content, created_at
                    FROM posts
                    WHERE author_id = $1
                    ORDER BY created_at DESC, id DESC
                    LIMIT $2
                    "#,
                )
                .bind(author_id.as_str())
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, PostModel>(
                    r#"
                    SELECT id, author_id, content, created_at
                    FROM posts
                    ORDER BY created_at DESC, id DESC
                    LIMIT $1
                    "#,
                )
                .bind(limit)
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Post::from).collect())
    }
}
