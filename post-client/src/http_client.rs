use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::error::{PostClientError, PostClientResult};
use crate::models::Post;

#[derive(Debug, Serialize)]
struct PostCreateRequestDto<'a> {
    title: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct PostUpdateRequestDto<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct PostSearchQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    page: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponseDto {
    message: Option<String>,
    #[serde(default)]
    validation: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct PostCreateResponseDto {
    #[serde(rename = "savedId")]
    saved_id: i64,
}

#[derive(Debug, Deserialize)]
struct PostsResponseDto {
    posts: Vec<Post>,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API `post-server`.
pub struct PostClient {
    base_url: String,
    client: Client,
}

impl PostClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> PostClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    /// Базовый URL, с которым был создан клиент.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.endpoint(path))
    }

    async fn decode_error(response: reqwest::Response) -> PostClientError {
        let status = response.status();

        match response.json::<ErrorResponseDto>().await {
            Ok(body) => PostClientError::from_http_status(status, body.message, body.validation),
            Err(_) => PostClientError::from_http_status(status, None, BTreeMap::new()),
        }
    }

    async fn send(request: RequestBuilder) -> PostClientResult<reqwest::Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn send_json<TRes: DeserializeOwned>(request: RequestBuilder) -> PostClientResult<TRes> {
        let response = Self::send(request).await?;
        Ok(response.json::<TRes>().await?)
    }

    /// Создаёт пост и возвращает присвоенный сервером идентификатор.
    pub async fn write(&self, title: &str, content: &str) -> PostClientResult<i64> {
        let payload = PostCreateRequestDto { title, content };
        let dto: PostCreateResponseDto =
            Self::send_json(self.request(Method::POST, "/posts").json(&payload)).await?;
        Ok(dto.saved_id)
    }

    /// Получает пост по идентификатору.
    pub async fn find_one(&self, id: i64) -> PostClientResult<Post> {
        Self::send_json(self.request(Method::GET, &format!("/posts/{id}"))).await
    }

    /// Возвращает страницу постов, новые сначала.
    ///
    /// `None` оставляет значение по умолчанию сервера (`page = 1`, `size = 10`).
    pub async fn find_page(
        &self,
        page: Option<i64>,
        size: Option<u32>,
    ) -> PostClientResult<Vec<Post>> {
        let query = PostSearchQuery { page, size };
        let dto: PostsResponseDto =
            Self::send_json(self.request(Method::GET, "/posts").query(&query)).await?;
        Ok(dto.posts)
    }

    /// Частично обновляет пост: `None` оставляет поле без изменений.
    pub async fn update(
        &self,
        id: i64,
        title: Option<&str>,
        content: Option<&str>,
    ) -> PostClientResult<()> {
        let payload = PostUpdateRequestDto { title, content };
        Self::send(
            self.request(Method::PATCH, &format!("/posts/{id}"))
                .json(&payload),
        )
        .await?;
        Ok(())
    }

    /// Удаляет пост по идентификатору.
    pub async fn delete(&self, id: i64) -> PostClientResult<()> {
        Self::send(self.request(Method::DELETE, &format!("/posts/{id}"))).await?;
        Ok(())
    }
}
