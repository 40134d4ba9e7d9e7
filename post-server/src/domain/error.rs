use std::collections::BTreeMap;

use thiserror::Error;

pub(crate) const INVALID_REQUEST_MESSAGE: &str = "잘못된 요청입니다.";
pub(crate) const POST_NOT_FOUND_MESSAGE: &str = "존재하지 않는 게시글입니다.";
pub(crate) const UNEXPECTED_MESSAGE: &str = "서버 내부 오류입니다.";

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("invalid request: {validation:?}")]
    InvalidRequest { validation: BTreeMap<String, String> },

    #[error("post not found")]
    NotFound,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    pub(crate) fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut validation = BTreeMap::new();
        validation.insert(field.into(), message.into());
        Self::InvalidRequest { validation }
    }

    pub(crate) fn status_code(&self) -> u16 {
        match self {
            Self::InvalidRequest { .. } => 400,
            Self::NotFound => 404,
            Self::Unexpected(_) => 500,
        }
    }

    pub(crate) fn message(&self) -> &'static str {
        match self {
            Self::InvalidRequest { .. } => INVALID_REQUEST_MESSAGE,
            Self::NotFound => POST_NOT_FOUND_MESSAGE,
            Self::Unexpected(_) => UNEXPECTED_MESSAGE,
        }
    }

    pub(crate) fn into_validation(self) -> BTreeMap<String, String> {
        match self {
            Self::InvalidRequest { validation } => validation,
            Self::NotFound | Self::Unexpected(_) => BTreeMap::new(),
        }
    }
}
