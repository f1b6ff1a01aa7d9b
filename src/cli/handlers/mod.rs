use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io::{self, ConfigError};
use crate::model::Config;
use crate::ops::task_ops::{Store, partition};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Run a subcommand against an already-loaded config
pub fn dispatch(
    command: Commands,
    config: &Config,
    empty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::List(args) => cmd_list(args, config, empty),
    }
}

fn load_store(config: &Config, empty: bool) -> Result<Store, ConfigError> {
    let store = config_io::initial_store(config, empty)?;
    tracing::debug!(tasks = store.tasks().len(), "store ready");
    Ok(store)
}

fn cmd_list(
    args: ListArgs,
    config: &Config,
    empty: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = load_store(config, empty)?;
    let groups = partition(store.tasks());
    if args.json {
        println!("{}", serde_json::to_string_pretty(&list_to_json(&groups))?);
    } else {
        for line in format_listing(&groups) {
            println!("{}", line);
        }
    }
    Ok(())
}
