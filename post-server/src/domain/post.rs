use super::error::DomainError;

pub(crate) const FORBIDDEN_TITLE_WORD: &str = "바보";
pub(crate) const FORBIDDEN_TITLE_MESSAGE: &str = "제목에 바보를 포함할 수 없습니다.";

pub(crate) const DEFAULT_PAGE: i64 = 1;
pub(crate) const DEFAULT_SIZE: u32 = 10;
const MIN_PAGE: i64 = 1;
const MAX_SIZE: u32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Post {
    id: Option<i64>,
    pub(crate) title: String,
    pub(crate) content: String,
}

impl Post {
    pub(crate) fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            content: content.into(),
        }
    }

    pub(crate) fn restore(id: i64, title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            content: content.into(),
        }
    }

    pub(crate) fn id(&self) -> Option<i64> {
        self.id
    }

    pub(crate) fn saved_id(&self) -> Result<i64, DomainError> {
        self.id
            .ok_or_else(|| DomainError::Unexpected("post has no id after save".to_string()))
    }

    pub(crate) fn assign_id(&mut self, id: i64) -> Result<(), DomainError> {
        match self.id {
            None => {
                self.id = Some(id);
                Ok(())
            }
            Some(current) if current == id => Ok(()),
            Some(current) => Err(DomainError::Unexpected(format!(
                "post id is immutable: {current} -> {id}"
            ))),
        }
    }

    pub(crate) fn edit(&mut self, editor: PostEditor) {
        if let Some(title) = editor.title {
            self.title = title;
        }
        if let Some(content) = editor.content {
            self.content = content;
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct PostCreate {
    pub(crate) title: String,
    pub(crate) content: String,
}

impl PostCreate {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        if self.title.contains(FORBIDDEN_TITLE_WORD) {
            return Err(DomainError::invalid_field("title", FORBIDDEN_TITLE_MESSAGE));
        }
        Ok(self)
    }

    pub(crate) fn into_post(self) -> Post {
        Post::new(self.title, self.content)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct PostEditor {
    pub(crate) title: Option<String>,
    pub(crate) content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PostSearch {
    pub(crate) page: i64,
    pub(crate) size: u32,
}

impl Default for PostSearch {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

impl PostSearch {
    pub(crate) fn new(page: Option<i64>, size: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            size: size.unwrap_or(DEFAULT_SIZE),
        }
    }

    pub(crate) fn limit(&self) -> i64 {
        i64::from(self.size.min(MAX_SIZE))
    }

    pub(crate) fn offset(&self) -> i64 {
        (self.page.max(MIN_PAGE) - 1).saturating_mul(self.limit())
    }
}
