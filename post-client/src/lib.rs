//! Клиентская библиотека для работы с post-server по HTTP.
//!
//! `PostClient` покрывает весь REST API постов: создание, чтение одного поста,
//! постраничный список (новые сначала), частичное обновление и удаление.
//! Тела ошибок сервера (`code`/`message`/`validation`) разбираются в
//! [`PostClientError`].
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{PostClientError, PostClientResult};
pub use http_client::PostClient;
pub use models::Post;
