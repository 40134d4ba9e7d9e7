use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Публичная модель поста в том виде, в котором её отдаёт сервер.
pub struct Post {
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
}
