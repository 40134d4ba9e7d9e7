use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::data::post_repository::SharedPostRepository;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: Arc<PostService<SharedPostRepository>>,
}

impl AppState {
    pub(crate) fn new(post_service: Arc<PostService<SharedPostRepository>>) -> Self {
        Self { post_service }
    }
}
