use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "taskpad", about = concat!("[x] taskpad v", env!("CARGO_PKG_VERSION"), " - a small terminal task list"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Read settings and seed tasks from this file instead of ./taskpad.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Start with no tasks, ignoring any seed
    #[arg(long, global = true)]
    pub empty: bool,

    /// Append logs to this file (overrides [log] file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the starting task list and exit
    List(ListArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
