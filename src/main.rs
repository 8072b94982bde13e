use clap::Parser;
use promptkeep::cli::{
    handle_copy, handle_delete, handle_list, handle_path, handle_save, handle_show, Cli, Commands,
};
use promptkeep::{PromptStore, Result, StoreConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = StoreConfig::resolve(cli.data_dir, cli.storage_key)?;

    if let Commands::Path = cli.command {
        return handle_path(&config);
    }

    let mut store = PromptStore::open(config.storage(), config.storage_key.clone());

    match cli.command {
        Commands::List { query, json } => handle_list(&store, query, json),
        Commands::Show { id, json } => handle_show(&mut store, id, json),
        Commands::Save {
            title,
            content,
            stdin,
            id,
            json,
        } => handle_save(&mut store, title, content, stdin, id, json),
        Commands::Delete { id, force } => handle_delete(&mut store, id, force),
        Commands::Copy { id } => handle_copy(&store, id),
        Commands::Path => handle_path(&config),
    }
}
