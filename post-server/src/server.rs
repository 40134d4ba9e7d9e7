use axum::Router;
use tokio::net::TcpListener;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::infrastructure::settings::Settings;
use crate::presentation::AppState;
use crate::presentation::http::middleware::cors::apply_cors;
use crate::presentation::http::middleware::limits::apply_limits;
use crate::presentation::http::middleware::trace::apply_trace;
use crate::presentation::http::openapi::ApiDoc;
use crate::presentation::http::routes;

pub(crate) async fn run_http(settings: &Settings, state: AppState) -> anyhow::Result<()> {
    let app = build_router(state);
    let app = apply_limits(app, settings);
    let app = apply_trace(app);
    let app = apply_cors(app, settings)?;

    let listener = TcpListener::bind(&settings.http_addr).await?;

    info!("HTTP server listening on {}", settings.http_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP server stopped");
    Ok(())
}

pub(crate) fn build_router(state: AppState) -> Router {
    routes::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::Router;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::build_router;
    use crate::application::post_service::PostService;
    use crate::data::post_repository::{PostRepository, SharedPostRepository};
    use crate::data::repositories::memory::post_repository::InMemoryPostRepository;
    use crate::domain::post::Post;
    use crate::infrastructure::settings::Settings;
    use crate::presentation::AppState;
    use crate::presentation::http::middleware::limits::apply_limits;

    struct TestApp {
        router: Router,
        repo: SharedPostRepository,
    }

    impl TestApp {
        fn new() -> Self {
            let repo: SharedPostRepository = Arc::new(InMemoryPostRepository::new());
            let state = AppState::new(Arc::new(PostService::new(repo.clone())));
            Self {
                router: build_router(state),
                repo,
            }
        }

        async fn seed(&self, title: &str, content: &str) -> i64 {
            self.repo
                .save(Post::new(title, content))
                .await
                .expect("seed save must succeed")
                .id()
                .expect("seeded post must have an id")
        }

        async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
            let response = self
                .router
                .clone()
                .oneshot(request)
                .await
                .expect("router is infallible");
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("body must be readable");
            let body = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).expect("body must be json")
            };
            (status, body)
        }
    }

    fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request must build")
    }

    fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request must build")
    }

    #[tokio::test]
    async fn write_post_returns_saved_id_and_stores_fields() {
        let app = TestApp::new();

        let (status, body) = app
            .send(json_request(
                Method::POST,
                "/posts",
                json!({"title": "제목입니다.", "content": "내용입니다."}),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        let id = body["savedId"].as_i64().expect("savedId must be a number");

        let stored = app
            .repo
            .find_by_id(id)
            .await
            .expect("find must succeed")
            .expect("post must be stored");
        assert_eq!(stored.title, "제목입니다.");
        assert_eq!(stored.content, "내용입니다.");
        assert_eq!(app.repo.count().await.expect("count must succeed"), 1);
    }

    #[tokio::test]
    async fn write_post_without_title_and_content_reports_both_fields() {
        let app = TestApp::new();

        let (status, body) = app
            .send(json_request(Method::POST, "/posts", json!({})))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "400");
        assert_eq!(body["message"], "잘못된 요청입니다.");
        assert_eq!(body["validation"]["title"], "제목을 입력해주세요");
        assert_eq!(body["validation"]["content"], "본문을 입력해주세요");
        assert_eq!(app.repo.count().await.expect("count must succeed"), 0);
    }

    #[tokio::test]
    async fn write_post_without_content_reports_content_only() {
        let app = TestApp::new();

        let (status, body) = app
            .send(json_request(
                Method::POST,
                "/posts",
                json!({"title": "제목입니다."}),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["validation"]["content"], "본문을 입력해주세요");
        assert!(body["validation"].get("title").is_none());
    }

    #[tokio::test]
    async fn write_post_with_blank_title_is_rejected() {
        let app = TestApp::new();

        let (status, body) = app
            .send(json_request(
                Method::POST,
                "/posts",
                json!({"title": "  ", "content": "내용입니다."}),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["validation"]["title"], "제목을 입력해주세요");
    }

    #[tokio::test]
    async fn write_post_with_forbidden_title_is_rejected_before_saving() {
        let app = TestApp::new();

        let (status, body) = app
            .send(json_request(
                Method::POST,
                "/posts",
                json!({"title": "나는 바보입니다.", "content": "내용입니다."}),
            ))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "400");
        assert_eq!(body["message"], "잘못된 요청입니다.");
        assert_eq!(body["validation"]["title"], "제목에 바보를 포함할 수 없습니다.");
        assert_eq!(app.repo.count().await.expect("count must succeed"), 0);
    }

    #[tokio::test]
    async fn write_post_with_malformed_json_returns_default_error_body() {
        let app = TestApp::new();

        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{\"title\": "))
            .expect("request must build");
        let (status, body) = app.send(request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "400");
        assert_eq!(body["message"], "잘못된 요청입니다.");
        assert_eq!(body["validation"], json!({}));
    }

    #[tokio::test]
    async fn find_post_returns_title_and_content() {
        let app = TestApp::new();
        let id = app.seed("12345678901234567890", "bar").await;

        let (status, body) = app
            .send(empty_request(Method::GET, &format!("/posts/{id}")))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"title": "12345678901234567890", "content": "bar"}));
    }

    #[tokio::test]
    async fn find_post_returns_404_for_unknown_id() {
        let app = TestApp::new();

        let (status, body) = app.send(empty_request(Method::GET, "/posts/1")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "404");
        assert_eq!(body["message"], "존재하지 않는 게시글입니다.");
        assert_eq!(body["validation"], json!({}));
    }

    #[tokio::test]
    async fn find_post_with_non_numeric_id_is_bad_request() {
        let app = TestApp::new();

        let (status, body) = app.send(empty_request(Method::GET, "/posts/abc")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "400");
    }

    #[tokio::test]
    async fn find_posts_returns_newest_first_page() {
        let app = TestApp::new();
        for i in 1..=30 {
            app.seed(&format!("foo{i}"), &format!("bar{i}")).await;
        }

        let (status, body) = app
            .send(empty_request(Method::GET, "/posts?page=1&size=10"))
            .await;

        assert_eq!(status, StatusCode::OK);
        let posts = body["posts"].as_array().expect("posts must be an array");
        assert_eq!(posts.len(), 10);
        assert_eq!(posts[0]["title"], "foo30");
        assert_eq!(posts[0]["content"], "bar30");
        assert_eq!(posts[4]["title"], "foo26");
        assert_eq!(posts[4]["content"], "bar26");
    }

    #[tokio::test]
    async fn find_posts_with_zero_page_reads_first_page() {
        let app = TestApp::new();
        for i in 1..=30 {
            app.seed(&format!("foo{i}"), &format!("bar{i}")).await;
        }

        let (_, first) = app
            .send(empty_request(Method::GET, "/posts?page=1&size=10"))
            .await;
        let (status, zero) = app
            .send(empty_request(Method::GET, "/posts?page=0&size=10"))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(zero, first);
    }

    #[tokio::test]
    async fn find_posts_defaults_to_ten_newest() {
        let app = TestApp::new();
        for i in 1..=15 {
            app.seed(&format!("foo{i}"), &format!("bar{i}")).await;
        }

        let (status, body) = app.send(empty_request(Method::GET, "/posts")).await;

        assert_eq!(status, StatusCode::OK);
        let posts = body["posts"].as_array().expect("posts must be an array");
        assert_eq!(posts.len(), 10);
        assert_eq!(posts[0]["title"], "foo15");
        assert_eq!(posts[9]["title"], "foo6");
    }

    #[tokio::test]
    async fn find_posts_with_empty_params_uses_defaults() {
        let app = TestApp::new();
        for i in 1..=15 {
            app.seed(&format!("foo{i}"), &format!("bar{i}")).await;
        }

        let (_, defaults) = app.send(empty_request(Method::GET, "/posts")).await;
        let (status, empty) = app
            .send(empty_request(Method::GET, "/posts?page=&size="))
            .await;
        let (page_status, empty_page) = app
            .send(empty_request(Method::GET, "/posts?page="))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(empty, defaults);
        assert_eq!(page_status, StatusCode::OK);
        assert_eq!(empty_page, defaults);
    }

    #[tokio::test]
    async fn find_posts_on_empty_store_returns_empty_list() {
        let app = TestApp::new();

        let (status, body) = app.send(empty_request(Method::GET, "/posts")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"posts": []}));
    }

    #[tokio::test]
    async fn find_posts_with_malformed_size_is_bad_request() {
        let app = TestApp::new();

        let (status, body) = app
            .send(empty_request(Method::GET, "/posts?size=-1"))
            .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "잘못된 요청입니다.");
    }

    #[tokio::test]
    async fn update_post_title_keeps_content() {
        let app = TestApp::new();
        let id = app.seed("제목입니다.", "내용입니다.").await;

        let (status, body) = app
            .send(json_request(
                Method::PATCH,
                &format!("/posts/{id}"),
                json!({"title": "새로운 제목입니다."}),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);

        let stored = app
            .repo
            .find_by_id(id)
            .await
            .expect("find must succeed")
            .expect("post must exist");
        assert_eq!(stored.title, "새로운 제목입니다.");
        assert_eq!(stored.content, "내용입니다.");
    }

    #[tokio::test]
    async fn update_post_content_keeps_title() {
        let app = TestApp::new();
        let id = app.seed("제목입니다.", "내용입니다.").await;

        let (status, _) = app
            .send(json_request(
                Method::PATCH,
                &format!("/posts/{id}"),
                json!({"content": "새로운 내용입니다."}),
            ))
            .await;

        assert_eq!(status, StatusCode::OK);
        let stored = app
            .repo
            .find_by_id(id)
            .await
            .expect("find must succeed")
            .expect("post must exist");
        assert_eq!(stored.title, "제목입니다.");
        assert_eq!(stored.content, "새로운 내용입니다.");
    }

    #[tokio::test]
    async fn update_post_returns_404_for_unknown_id() {
        let app = TestApp::new();

        let (status, body) = app
            .send(json_request(
                Method::PATCH,
                "/posts/77",
                json!({"title": "새로운 제목입니다."}),
            ))
            .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "존재하지 않는 게시글입니다.");
    }

    #[tokio::test]
    async fn delete_post_removes_exactly_one_post() {
        let app = TestApp::new();
        let id = app.seed("제목입니다.", "내용입니다.").await;
        app.seed("다른 제목", "다른 내용").await;

        let (status, body) = app
            .send(empty_request(Method::DELETE, &format!("/posts/{id}")))
            .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
        assert_eq!(app.repo.count().await.expect("count must succeed"), 1);

        let (status, _) = app
            .send(empty_request(Method::GET, &format!("/posts/{id}")))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn delete_post_returns_404_for_unknown_id() {
        let app = TestApp::new();

        let (status, body) = app.send(empty_request(Method::DELETE, "/posts/5")).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "404");
    }

    #[tokio::test]
    async fn healthz_reports_ok() {
        let app = TestApp::new();

        let (status, body) = app.send(empty_request(Method::GET, "/healthz")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn body_limit_rejects_oversized_request() {
        let settings = Settings::from_lookup(|key| match key {
            "HTTP_REQUEST_BODY_LIMIT_BYTES" => Some("16".to_string()),
            _ => None,
        })
        .expect("settings must be valid");
        let app = TestApp::new();
        let router = apply_limits(app.router.clone(), &settings);

        let body = json!({"title": "제목입니다.", "content": "내용입니다."}).to_string();
        let request = Request::builder()
            .method(Method::POST)
            .uri("/posts")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::CONTENT_LENGTH, body.len())
            .body(Body::from(body))
            .expect("request must build");

        let response = router.oneshot(request).await.expect("router is infallible");

        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(app.repo.count().await.expect("count must succeed"), 0);
    }
}
