use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::data::post_repository::PostRepository;
use crate::domain::error::DomainError;
use crate::domain::post::Post;

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<i64, Post>,
    last_id: i64,
}

#[derive(Debug, Default)]
pub(crate) struct InMemoryPostRepository {
    table: RwLock<Table>,
}

impl InMemoryPostRepository {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn save(&self, mut post: Post) -> Result<Post, DomainError> {
        let mut table = self.table.write().await;
        let id = match post.id() {
            Some(id) => {
                if !table.rows.contains_key(&id) {
                    return Err(DomainError::NotFound);
                }
                id
            }
            None => {
                table.last_id += 1;
                let id = table.last_id;
                post.assign_id(id)?;
                id
            }
        };

        table.rows.insert(id, post.clone());
        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, DomainError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn find_page(&self, limit: i64, offset: i64) -> Result<Vec<Post>, DomainError> {
        let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);

        Ok(self
            .table
            .read()
            .await
            .rows
            .values()
            .rev()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, post: &Post) -> Result<bool, DomainError> {
        let id = post.saved_id()?;
        let mut table = self.table.write().await;
        match table.rows.get_mut(&id) {
            Some(row) => {
                *row = post.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, DomainError> {
        Ok(self.table.write().await.rows.remove(&id).is_some())
    }

    async fn delete_all(&self) -> Result<(), DomainError> {
        self.table.write().await.rows.clear();
        Ok(())
    }

    async fn count(&self) -> Result<i64, DomainError> {
        let len = self.table.read().await.rows.len();
        i64::try_from(len).map_err(|err| DomainError::Unexpected(err.to_string()))
    }
}
