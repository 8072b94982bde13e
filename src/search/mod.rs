//! Title search over the prompt list.

use crate::entity::Prompt;

/// Normalized title query: trimmed and lower-cased once, matched against
/// each lower-cased title.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TitleQuery {
    needle: String,
}

impl TitleQuery {
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// An empty query matches every prompt.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, prompt: &Prompt) -> bool {
        self.is_empty() || prompt.title.to_lowercase().contains(&self.needle)
    }
}

/// Prompts whose title contains `query`, case-insensitively, in list order.
///
/// # Examples
///
/// ```ignore
/// let hits: Vec<_> = filter_by_title(&prompts, "  SQL ").collect();
/// ```
pub fn filter_by_title<'a>(
    prompts: &'a [Prompt],
    query: &str,
) -> impl Iterator<Item = &'a Prompt> + 'a {
    let query = TitleQuery::new(query);
    prompts.iter().filter(move |p| query.matches(p))
}
