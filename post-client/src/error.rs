use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `post-client`.
pub enum PostClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Пост не найден (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Некорректный запрос (HTTP 400) с сообщениями по полям.
    #[error("invalid request: {message}")]
    InvalidRequest {
        /// Общее сообщение сервера.
        message: String,
        /// Сообщения по отдельным полям, например `title`.
        validation: BTreeMap<String, String>,
    },

    /// Любой другой неуспешный статус.
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP-статус ответа.
        status: u16,
        /// Сообщение сервера или описание статуса.
        message: String,
    },
}

/// Результат операций `post-client`.
pub type PostClientResult<T> = Result<T, PostClientError>;

impl PostClientError {
    pub(crate) fn from_http_status(
        status: reqwest::StatusCode,
        message: Option<String>,
        validation: BTreeMap<String, String>,
    ) -> Self {
        let message = message.unwrap_or_else(|| format!("http status {status}"));
        match status {
            reqwest::StatusCode::NOT_FOUND => Self::NotFound(message),
            reqwest::StatusCode::BAD_REQUEST => Self::InvalidRequest {
                message,
                validation,
            },
            _ => Self::Server {
                status: status.as_u16(),
                message,
            },
        }
    }
}
