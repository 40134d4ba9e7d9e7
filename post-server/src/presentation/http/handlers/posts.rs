use std::{fmt, str::FromStr};

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Deserializer, Serialize, de};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::post::{Post, PostCreate, PostEditor, PostSearch};
use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppResult, ErrorResponse};
use crate::presentation::http::extract::{self, Path, Query, ValidatedJson};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub(crate) struct PostCreateDto {
    #[validate(
        required(message = "제목을 입력해주세요"),
        custom(function = "not_blank", message = "제목을 입력해주세요")
    )]
    pub(crate) title: Option<String>,
    #[validate(
        required(message = "본문을 입력해주세요"),
        custom(function = "not_blank", message = "본문을 입력해주세요")
    )]
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PostUpdateDto {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct PostSearchQuery {
    #[serde(default, deserialize_with = "empty_as_none")]
    pub(crate) page: Option<i64>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub(crate) size: Option<u32>,
}

// `?page=` reads the same as an absent `page`.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(de::Error::custom),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PostCreateResponseDto {
    #[serde(rename = "savedId")]
    pub(crate) saved_id: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PostResponseDto {
    pub(crate) title: String,
    pub(crate) content: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct PostsResponseDto {
    pub(crate) posts: Vec<PostResponseDto>,
}

impl From<Post> for PostResponseDto {
    fn from(post: Post) -> Self {
        Self {
            title: post.title,
            content: post.content,
        }
    }
}

impl From<Vec<Post>> for PostsResponseDto {
    fn from(posts: Vec<Post>) -> Self {
        Self {
            posts: posts.into_iter().map(PostResponseDto::from).collect(),
        }
    }
}

impl From<PostUpdateDto> for PostEditor {
    fn from(dto: PostUpdateDto) -> Self {
        Self {
            title: dto.title,
            content: dto.content,
        }
    }
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "posts",
    request_body = PostCreateDto,
    responses(
        (status = 200, description = "Post created", body = PostCreateResponseDto),
        (status = 400, description = "Missing field or forbidden title", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub(crate) async fn write_post(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<PostCreateDto>,
) -> AppResult<Json<PostCreateResponseDto>> {
    let req = PostCreate {
        title: dto.title.unwrap_or_default(),
        content: dto.content.unwrap_or_default(),
    };

    let saved_id = state.post_service.write(req).await?;
    Ok(Json(PostCreateResponseDto { saved_id }))
}

#[utoipa::path(
    get,
    path = "/posts/{postId}",
    tag = "posts",
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post found", body = PostResponseDto),
        (status = 400, description = "Malformed post id", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub(crate) async fn find_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<Json<PostResponseDto>> {
    let post = state.post_service.find_one(post_id).await?;
    Ok(Json(PostResponseDto::from(post)))
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "posts",
    params(
        ("page" = Option<i64>, Query, description = "1-based page, values below 1 read as 1 (default 1)"),
        ("size" = Option<u32>, Query, description = "Page size, capped at 2000 (default 10)")
    ),
    responses(
        (status = 200, description = "Posts listed newest first", body = PostsResponseDto),
        (status = 400, description = "Malformed query", body = ErrorResponse)
    )
)]
pub(crate) async fn find_posts(
    State(state): State<AppState>,
    Query(query): Query<PostSearchQuery>,
) -> AppResult<Json<PostsResponseDto>> {
    let search = PostSearch::new(query.page, query.size);
    let posts = state.post_service.find_page(search).await?;
    Ok(Json(PostsResponseDto::from(posts)))
}

#[utoipa::path(
    patch,
    path = "/posts/{postId}",
    tag = "posts",
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    request_body = PostUpdateDto,
    responses(
        (status = 200, description = "Post updated"),
        (status = 400, description = "Malformed request", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    extract::Json(dto): extract::Json<PostUpdateDto>,
) -> AppResult<StatusCode> {
    state.post_service.update(post_id, dto.into()).await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/posts/{postId}",
    tag = "posts",
    params(
        ("postId" = i64, Path, description = "Post id")
    ),
    responses(
        (status = 200, description = "Post deleted"),
        (status = 400, description = "Malformed post id", body = ErrorResponse),
        (status = 404, description = "Post not found", body = ErrorResponse)
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> AppResult<StatusCode> {
    state.post_service.delete(post_id).await?;
    Ok(StatusCode::OK)
}
