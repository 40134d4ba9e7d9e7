use utoipa::OpenApi;

use crate::presentation::http::app_error::ErrorResponse;
use crate::presentation::http::handlers::posts::{
    PostCreateDto, PostCreateResponseDto, PostResponseDto, PostSearchQuery, PostUpdateDto,
    PostsResponseDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::http::handlers::posts::write_post,
        crate::presentation::http::handlers::posts::find_post,
        crate::presentation::http::handlers::posts::find_posts,
        crate::presentation::http::handlers::posts::update_post,
        crate::presentation::http::handlers::posts::delete_post
    ),
    components(
        schemas(
            PostCreateDto,
            PostCreateResponseDto,
            PostUpdateDto,
            PostSearchQuery,
            PostResponseDto,
            PostsResponseDto,
            ErrorResponse
        )
    ),
    tags(
        (name = "posts", description = "Post endpoints")
    )
)]
pub(crate) struct ApiDoc;
