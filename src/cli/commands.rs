use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(name = "tb", about = concat!("taskbook v", env!("CARGO_PKG_VERSION"), " - a task list with undo"), version)]
pub struct Cli {
    /// Config file (default: ./taskbook.toml)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// JSON file of tasks to start with (overrides the config's tasks_file)
    #[arg(long)]
    pub tasks: Option<PathBuf>,

    /// Log engine activity to stderr at debug level
    #[arg(short, long)]
    pub verbose: bool,
}
