//! The prompt store: an ordered prompt list, the current selection, and the
//! round-trip to a single storage key.
//!
//! Every mutation rewrites the whole list. A failed write is logged and
//! reported through [`Committed`], but the in-memory change stands.

use std::collections::HashSet;
use std::iter;

use crate::entity::{generate_id, Prompt};
use crate::error::{PromptKeepError, Result};
use crate::search::filter_by_title;
use crate::storage::{KeyValueStorage, STORAGE_KEY};
use crate::text;

/// Minimum number of id characters shown for a prompt.
pub const SHORT_ID_LEN: usize = 7;

/// What `load` found in storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Nothing stored yet.
    Empty,
    Loaded { count: usize },
    /// The stored value could not be parsed; the list was left empty.
    Corrupt { reason: String },
    /// The backend failed to read; the list was left empty.
    Unreadable { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Saved {
    pub id: String,
    pub action: SaveAction,
}

/// Result of a mutation: its value plus whether the write to storage
/// succeeded.
#[derive(Debug)]
pub struct Committed<T> {
    pub value: T,
    pub persisted: Result<()>,
}

impl<T> Committed<T> {
    pub fn is_persisted(&self) -> bool {
        self.persisted.is_ok()
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

pub struct PromptStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    prompts: Vec<Prompt>,
    selected_id: Option<String>,
}

impl<S: KeyValueStorage> PromptStore<S> {
    /// An empty store over `storage` using the default key. Call
    /// [`load`](Self::load) to read what is already stored.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            prompts: Vec::new(),
            selected_id: None,
        }
    }

    /// Construct and load in one step.
    pub fn open(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::with_key(storage, key);
        store.load();
        store
    }

    /// Give the backend back, ending the session.
    pub fn into_storage(self) -> S {
        self.storage
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the in-memory list with what storage holds and clear the
    /// selection. Never fails: unreadable or malformed data leaves the
    /// list empty.
    pub fn load(&mut self) -> LoadReport {
        self.prompts.clear();
        self.selected_id = None;

        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                tracing::debug!(key = %self.key, "no stored prompts");
                return LoadReport::Empty;
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read stored prompts");
                return LoadReport::Unreadable {
                    reason: e.to_string(),
                };
            }
        };

        let loaded: Vec<Prompt> = match serde_json::from_str(&raw) {
            Ok(prompts) => prompts,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "stored prompts are malformed, starting empty");
                return LoadReport::Corrupt {
                    reason: e.to_string(),
                };
            }
        };

        let mut seen = HashSet::new();
        for prompt in loaded {
            if seen.insert(prompt.id.clone()) {
                self.prompts.push(prompt);
            } else {
                tracing::warn!(id = %prompt.id, "dropping prompt with duplicate id");
            }
        }

        tracing::debug!(key = %self.key, count = self.prompts.len(), "prompts loaded");
        LoadReport::Loaded {
            count: self.prompts.len(),
        }
    }

    /// Write the full list to storage.
    pub fn persist(&mut self) -> Result<()> {
        let result = serde_json::to_string(&self.prompts)
            .map_err(PromptKeepError::from)
            .and_then(|json| self.storage.set_item(&self.key, &json));

        match &result {
            Ok(()) => {
                tracing::debug!(key = %self.key, count = self.prompts.len(), "prompts persisted")
            }
            Err(e) => tracing::warn!(key = %self.key, error = %e, "failed to persist prompts"),
        }
        result
    }

    /// Save the editor contents. Updates the selected prompt in place, or
    /// creates a new one at the front of the list and selects it.
    ///
    /// Both fields are trimmed; if either is blank nothing changes and
    /// `MissingFields` is returned.
    pub fn save(&mut self, title: &str, content: &str) -> Result<Committed<Saved>> {
        let (title, content) = validate(title, content)?;

        let selected = self
            .selected_id
            .as_deref()
            .and_then(|id| self.position(id));

        let saved = match selected {
            Some(index) => {
                let prompt = &mut self.prompts[index];
                prompt.replace(title, content);
                Saved {
                    id: prompt.id.clone(),
                    action: SaveAction::Updated,
                }
            }
            None => {
                let mut prompt = Prompt::new(title, content);
                while self.position(&prompt.id).is_some() {
                    prompt.id = generate_id();
                }
                let id = prompt.id.clone();
                self.prompts.insert(0, prompt);
                self.selected_id = Some(id.clone());
                Saved {
                    id,
                    action: SaveAction::Created,
                }
            }
        };

        Ok(self.commit(saved))
    }

    /// Select `id` and save over it. Unlike `save`, an unknown id is an
    /// error rather than a new prompt.
    pub fn update(&mut self, id: &str, title: &str, content: &str) -> Result<Committed<Saved>> {
        validate(title, content)?;
        if self.select(id).is_none() {
            return Err(PromptKeepError::PromptNotFound(id.to_string()));
        }
        self.save(title, content)
    }

    /// Remove the prompt with `id`, if any, and return to the new-prompt
    /// state.
    pub fn remove(&mut self, id: &str) -> Committed<Option<Prompt>> {
        let removed = self.position(id).map(|index| self.prompts.remove(index));
        self.selected_id = None;
        self.commit(removed)
    }

    /// Select `id` if it exists. Otherwise the selection is unchanged.
    pub fn select(&mut self, id: &str) -> Option<&Prompt> {
        let index = self.position(id)?;
        self.selected_id = Some(id.to_string());
        self.prompts.get(index)
    }

    /// Clear the selection so the next save creates a prompt.
    pub fn start_new(&mut self) {
        self.selected_id = None;
    }

    /// Prompts whose title contains `query`, case-insensitively, in list
    /// order. An empty query yields everything.
    pub fn filter<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a Prompt> + 'a {
        filter_by_title(&self.prompts, query)
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_id.as_deref()
    }

    pub fn selected(&self) -> Option<&Prompt> {
        self.selected_id.as_deref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &str) -> Option<&Prompt> {
        self.prompts.iter().find(|p| p.id == id)
    }

    /// Resolve an exact id, or else a unique id prefix.
    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Prompt> {
        if let Some(prompt) = self.get(prefix) {
            return Ok(prompt);
        }
        if prefix.is_empty() {
            return Err(PromptKeepError::PromptNotFound(prefix.to_string()));
        }

        let mut matches = self.prompts.iter().filter(|p| p.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(prompt), None) => Ok(prompt),
            (Some(_), Some(_)) => Err(PromptKeepError::AmbiguousId(prefix.to_string())),
            (None, _) => Err(PromptKeepError::PromptNotFound(prefix.to_string())),
        }
    }

    /// Shortest prefix of `id`, at least [`SHORT_ID_LEN`] characters, that
    /// no other prompt's id starts with. Falls back to the full id.
    pub fn short_id<'a>(&self, id: &'a str) -> &'a str {
        let boundaries = id
            .char_indices()
            .map(|(idx, _)| idx)
            .skip(SHORT_ID_LEN)
            .chain(iter::once(id.len()));

        for end in boundaries {
            let prefix = &id[..end];
            let shared = self
                .prompts
                .iter()
                .any(|p| p.id != id && p.id.starts_with(prefix));
            if !shared {
                return prefix;
            }
        }
        id
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.prompts.iter().position(|p| p.id == id)
    }

    fn commit<T>(&mut self, value: T) -> Committed<T> {
        let persisted = self.persist();
        Committed { value, persisted }
    }
}

fn validate(title: &str, content: &str) -> Result<(String, String)> {
    let title = text::normalize(title);
    let content = text::normalize(content);

    let missing_title = text::is_blank(&title);
    let missing_content = text::is_blank(&content);
    if missing_title || missing_content {
        return Err(PromptKeepError::MissingFields {
            title: missing_title,
            content: missing_content,
        });
    }

    Ok((title, content))
}
