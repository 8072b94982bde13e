use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "promptkeep")]
#[command(version, about = "Save, search and reuse short text prompts")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory prompts are stored in
    #[arg(long, global = true, env = "PROMPTKEEP_DIR", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Storage key the prompt list is saved under
    #[arg(long, global = true, env = "PROMPTKEEP_STORAGE_KEY", value_name = "KEY")]
    pub storage_key: Option<String>,

    /// Log debug output to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List prompts, newest first
    List {
        /// Only prompts whose title contains this text (case-insensitive)
        query: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single prompt
    Show {
        /// Prompt ID or unique ID prefix
        id: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Save a prompt: create a new one, or update an existing one with --id
    Save {
        /// Prompt title
        #[arg(long, short = 't')]
        title: String,

        /// Prompt content
        #[arg(long, short = 'c', required_unless_present = "stdin", conflicts_with = "stdin")]
        content: Option<String>,

        /// Read content from stdin
        #[arg(long)]
        stdin: bool,

        /// Update the prompt with this ID instead of creating one
        #[arg(long)]
        id: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a prompt
    Delete {
        /// Prompt ID or unique ID prefix
        id: String,

        /// Skip the confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Print a prompt's content and nothing else, for piping
    Copy {
        /// Prompt ID or unique ID prefix
        id: String,
    },

    /// Print where prompts are stored
    Path,
}
