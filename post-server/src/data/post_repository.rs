use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn save(&self, post: Post) -> Result<Post, DomainError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError>;
    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError>;
    async fn update(&self, post: &Post) -> Result<bool, DomainError>;
    async fn delete(&self, id: i64) -> Result<bool, DomainError>;
    async fn delete_all(&self) -> Result<(), DomainError>;
    async fn count(&self) -> Result<i64, DomainError>;
}

pub(crate) type SharedPostRepository = Arc<dyn PostRepository>;

#[async_trait]
impl<T: PostRepository + ?Sized> PostRepository for Arc<T> {
    async fn save(&self, post: Post) -> Result<Post, DomainError> {
        (**self).save(post).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        (**self).find_by_id(id).await
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError> {
        (**self).find_page(limit, offset).await
    }

    async fn update(&self, post: &Post) -> Result<bool, DomainError> {
        (**self).update(post).await
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        (**self).delete(id).await
    }

    async fn delete_all(&self) -> Result<(), DomainError> {
        (**self).delete_all().await
    }

    async fn count(&self) -> Result<i64, DomainError> {
        (**self).count().await
    }
}
