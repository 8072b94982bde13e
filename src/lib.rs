pub mod cli;
pub mod config;
pub mod entity;
pub mod error;
pub mod search;
pub mod storage;
pub mod store;
pub mod text;

pub use config::StoreConfig;
pub use entity::Prompt;
pub use error::{PromptKeepError, Result};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, STORAGE_KEY};
pub use store::{Committed, LoadReport, PromptStore, SaveAction, Saved};
