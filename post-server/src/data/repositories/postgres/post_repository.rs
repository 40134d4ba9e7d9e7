use async_trait::async_trait;
use sqlx::PgPool;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    content: String,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post::restore(row.id, row.title, row.content)
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn save(&self, post: Post) -> Result<Post, DomainError> {
        let row = match post.id() {
            None => sqlx::query_as::<_, PostRow>(
                r#"
                INSERT INTO posts (title, content)
                VALUES ($1, $2)
                RETURNING id, title, content
                "#,
            )
            .bind(&post.title)
            .bind(&post.content)
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?,
            Some(id) => sqlx::query_as::<_, PostRow>(
                r#"
                UPDATE posts
                SET title = $2,
                    content = $3
                WHERE id = $1
                RETURNING id, title, content
                "#,
            )
            .bind(id)
            .bind(&post.title)
            .bind(&post.content)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?
            .ok_or(DomainError::NotFound)?,
        };

        Ok(row.into())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError> {
        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, title, content
            FROM posts
            ORDER BY id DESC
            LIMIT $1
            OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(rows.into_iter().map(Post::from).collect())
    }

    async fn update(&self, post: &Post) -> Result<bool, DomainError> {
        let id = post.saved_id()?;
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET title = $2,
                content = $3
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&post.title)
        .bind(&post.content)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_all(&self) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM posts")
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(count)
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
