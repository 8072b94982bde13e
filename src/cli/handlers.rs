use std::io::{self, Read};

use crate::config::StoreConfig;
use crate::entity::Prompt;
use crate::error::{PromptKeepError, Result};
use crate::storage::KeyValueStorage;
use crate::store::{Committed, PromptStore, SaveAction};

const PREVIEW_CHARS: usize = 60;

pub fn handle_list<S: KeyValueStorage>(
    store: &PromptStore<S>,
    query: Option<String>,
    json: bool,
) -> Result<()> {
    let query = query.unwrap_or_default();
    let prompts: Vec<&Prompt> = store.filter(&query).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&prompts)?);
    } else if prompts.is_empty() {
        if query.trim().is_empty() {
            println!("No prompts saved yet.");
        } else {
            println!("No prompts match '{}'.", query.trim());
        }
    } else {
        println!("Prompts:\n");
        for p in prompts {
            println!("  ({}) {}", store.short_id(&p.id), preview(&p.title));
            println!("      {}", preview(&p.content));
        }
    }

    Ok(())
}

pub fn handle_show<S: KeyValueStorage>(
    store: &mut PromptStore<S>,
    id: String,
    json: bool,
) -> Result<()> {
    let full_id = store.find_by_prefix(&id)?.id.clone();
    let prompt = store
        .select(&full_id)
        .ok_or(PromptKeepError::PromptNotFound(id))?;

    if json {
        println!("{}", serde_json::to_string_pretty(prompt)?);
    } else {
        println!("Prompt {}", prompt.id);
        println!("Title: {}", prompt.title);
        println!("\n{}", prompt.content);
    }

    Ok(())
}

pub fn handle_save<S: KeyValueStorage>(
    store: &mut PromptStore<S>,
    title: String,
    content: Option<String>,
    stdin: bool,
    id: Option<String>,
    json: bool,
) -> Result<()> {
    let content = match content {
        Some(content) => content,
        None if stdin => {
            let mut content = String::new();
            io::stdin().read_to_string(&mut content)?;
            content
        }
        None => String::new(),
    };

    let committed = match id {
        Some(prefix) => {
            let full_id = store.find_by_prefix(&prefix)?.id.clone();
            store.update(&full_id, &title, &content)?
        }
        None => {
            store.start_new();
            store.save(&title, &content)?
        }
    };
    let saved = settle(committed)?;

    let prompt = store
        .get(&saved.id)
        .ok_or_else(|| PromptKeepError::Storage("Failed to retrieve saved prompt".to_string()))?;

    if json {
        println!("{}", serde_json::to_string_pretty(prompt)?);
    } else {
        let verb = match saved.action {
            SaveAction::Created => "Created",
            SaveAction::Updated => "Updated",
        };
        println!(
            "{} prompt ({}) - {}",
            verb,
            store.short_id(&prompt.id),
            preview(&prompt.title)
        );
    }

    Ok(())
}

pub fn handle_delete<S: KeyValueStorage>(
    store: &mut PromptStore<S>,
    id: String,
    force: bool,
) -> Result<()> {
    let prompt = store.find_by_prefix(&id)?.clone();
    let short_id = store.short_id(&prompt.id);

    // Confirm deletion unless --force is used
    if !force {
        eprintln!(
            "Delete prompt ({}) - {}? [y/N] ",
            short_id,
            preview(&prompt.title)
        );

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(PromptKeepError::Storage(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    settle(store.remove(&prompt.id))?;

    println!(
        "Deleted prompt ({}) - {}",
        short_id,
        preview(&prompt.title)
    );

    Ok(())
}

pub fn handle_copy<S: KeyValueStorage>(store: &PromptStore<S>, id: String) -> Result<()> {
    let prompt = store.find_by_prefix(&id)?;
    println!("{}", prompt.content.trim());
    Ok(())
}

pub fn handle_path(config: &StoreConfig) -> Result<()> {
    let path = config.storage().path_for(&config.storage_key)?;
    println!("{}", path.display());
    Ok(())
}

/// A change that did not reach storage is lost when the process exits, so
/// the CLI treats it as a failure.
fn settle<T>(committed: Committed<T>) -> Result<T> {
    committed.persisted?;
    Ok(committed.value)
}

/// Single-line, length-limited rendering of a field for list output.
pub fn preview(text: &str) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= PREVIEW_CHARS {
        return line;
    }
    let cut: String = line.chars().take(PREVIEW_CHARS - 3).collect();
    format!("{}...", cut.trim_end())
}
