use axum::Router;
use axum::routing::get;

use crate::presentation::AppState;
use crate::presentation::http::handlers::posts::{
    delete_post, find_post, find_posts, update_post, write_post,
};

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(find_posts).post(write_post))
        .route(
            "/{postId}",
            get(find_post).patch(update_post).delete(delete_post),
        )
}
