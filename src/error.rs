use thiserror::Error;

#[derive(Error, Debug)]
pub enum PromptKeepError {
    #[error("Please fill in {} before saving.", missing_fields(*title, *content))]
    MissingFields { title: bool, content: bool },

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("Ambiguous prompt id '{0}'. Use more characters.")]
    AmbiguousId(String),

    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

fn missing_fields(title: bool, content: bool) -> &'static str {
    match (title, content) {
        (true, true) => "the title and the content",
        (true, false) => "the title",
        _ => "the content",
    }
}

pub type Result<T> = std::result::Result<T, PromptKeepError>;
