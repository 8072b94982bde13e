// src/entity/prompt.rs
use serde::{Deserialize, Serialize};

use super::generate_id;

pub const UNTITLED: &str = "Untitled";
pub const NO_CONTENT: &str = "No content";

/// A saved prompt. Title and content are free-form and may carry markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl Prompt {
    pub fn new(title: String, content: String) -> Self {
        Self {
            id: generate_id(),
            title,
            content,
        }
    }

    /// Replace both fields together. Empty values fall back to placeholders.
    pub fn replace(&mut self, title: String, content: String) {
        self.title = if title.is_empty() {
            UNTITLED.to_string()
        } else {
            title
        };
        self.content = if content.is_empty() {
            NO_CONTENT.to_string()
        } else {
            content
        };
    }
}
