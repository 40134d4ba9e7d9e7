use std::collections::BTreeMap;
use std::time::Duration;

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::{BoxError, Json, Router};
use tower::ServiceBuilder;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{error, warn};

use crate::domain::error::UNEXPECTED_MESSAGE;
use crate::infrastructure::settings::Settings;
use crate::presentation::http::app_error::ErrorResponse;

const TIMEOUT_MESSAGE: &str = "요청 시간이 초과되었습니다.";

pub(crate) fn apply_limits(router: Router, settings: &Settings) -> Router {
    router
        .layer(RequestBodyLimitLayer::new(
            settings.http_request_body_limit_bytes,
        ))
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_middleware_error))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    settings.http_request_timeout_secs,
                )))
                .layer(GlobalConcurrencyLimitLayer::new(
                    settings.http_concurrency_limit,
                )),
        )
}

async fn handle_middleware_error(err: BoxError) -> (StatusCode, Json<ErrorResponse>) {
    let (status, message) = if err.is::<Elapsed>() {
        warn!("request timed out");
        (StatusCode::REQUEST_TIMEOUT, TIMEOUT_MESSAGE)
    } else {
        error!(error = %err, "middleware failure");
        (StatusCode::INTERNAL_SERVER_ERROR, UNEXPECTED_MESSAGE)
    };

    (
        status,
        Json(ErrorResponse::new(status, message, BTreeMap::new())),
    )
}
