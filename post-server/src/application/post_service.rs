use tracing::{debug, info};

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::{Post, PostCreate, PostEditor, PostSearch};

pub(crate) struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub(crate) fn new(repo: R) -> Self {
        Self { repo }
    }

    pub(crate) async fn write(&self, req: PostCreate) -> Result<i64, DomainError> {
        let req = req.validate()?;

        let saved = self.repo.save(req.into_post()).await?;
        let id = saved.saved_id()?;
        info!(post_id = id, "post written");
        Ok(id)
    }

    pub(crate) async fn find_one(&self, id: i64) -> Result<Post, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    pub(crate) async fn find_page(&self, search: PostSearch) -> Result<Vec<Post>, DomainError> {
        let (limit, offset) = (search.limit(), search.offset());
        debug!(limit, offset, "listing posts");
        self.repo.find_page(limit, offset).await
    }

    pub(crate) async fn update(&self, id: i64, editor: PostEditor) -> Result<(), DomainError> {
        let mut post = self.find_one(id).await?;
        post.edit(editor);

        if !self.repo.update(&post).await? {
            return Err(DomainError::NotFound);
        }
        info!(post_id = id, "post updated");
        Ok(())
    }

    pub(crate) async fn delete(&self, id: i64) -> Result<(), DomainError> {
        let post = self.find_one(id).await?;

        let deleted = self.repo.delete(post.saved_id()?).await?;
        if !deleted {
            return Err(DomainError::NotFound);
        }
        info!(post_id = id, "post deleted");
        Ok(())
    }
}
