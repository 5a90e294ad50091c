use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

use crate::cli::commands::Cli;
use crate::cli::output::format_task_list;
use crate::cli::parser::{ShellCommand, parse_line, usage};
use crate::commands::CommandExecutor;
use crate::io::config_io::{self, CONFIG_FILE_NAME};
use crate::io::task_io;
use crate::model::book::Model;
use crate::model::config::Config;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME));
    let config = config_io::read_config(&config_path)?;
    init_logging(&config, cli.verbose)?;

    let model = build_model(&config, &config_path, cli.tasks.as_deref())?;
    let mut session = Session::new(model);

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_session(&mut session, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Logs go to stderr so stdout carries only command feedback.
/// A bad `log_level` fails startup even when `-v` or `RUST_LOG` overrides it.
fn init_logging(config: &Config, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let configured = config_io::log_filter(config)?;
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or(configured)
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;
    Ok(())
}

/// Seed the store and apply the configured startup filters. A relative
/// `tasks_file` in the config resolves against the config's directory.
fn build_model(
    config: &Config,
    config_path: &Path,
    tasks_override: Option<&Path>,
) -> Result<Model, Box<dyn std::error::Error>> {
    let tasks_path = match (tasks_override, &config.tasks_file) {
        (Some(path), _) => Some(path.to_path_buf()),
        (None, Some(file)) if file.is_relative() => Some(
            config_path
                .parent()
                .unwrap_or_else(|| Path::new(""))
                .join(file),
        ),
        (None, Some(file)) => Some(file.clone()),
        (None, None) => None,
    };

    let mut model = match tasks_path {
        Some(path) => Model::with_tasks(task_io::load_tasks(&path)?),
        None => Model::new(),
    };
    model.set_task_filters(config_io::default_filters(config)?);
    Ok(model)
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// What the shell should do after a line
#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Silent,
    Output(String),
    Exit,
}

/// A model plus its undo slot, driven one line at a time
pub struct Session {
    model: Model,
    executor: CommandExecutor,
}

impl Session {
    pub fn new(model: Model) -> Self {
        Session {
            model,
            executor: CommandExecutor::new(),
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Reply, Box<dyn std::error::Error>> {
        let Some(cmd) = parse_line(line)? else {
            return Ok(Reply::Silent);
        };
        let reply = match cmd {
            ShellCommand::Run(command) => {
                let result = self.executor.execute(command, &mut self.model)?;
                Reply::Output(result.feedback)
            }
            ShellCommand::Undo => Reply::Output(self.executor.undo(&mut self.model)?.feedback),
            ShellCommand::Redo => Reply::Output(self.executor.redo(&mut self.model)?.feedback),
            ShellCommand::List => Reply::Output(format_task_list(&self.model)),
            ShellCommand::Help => Reply::Output(usage()),
            ShellCommand::Exit => Reply::Exit,
        };
        Ok(reply)
    }
}

/// Read lines until EOF or `exit`. Failures are reported and the loop
/// carries on with the model unchanged.
pub fn run_session(
    session: &mut Session,
    input: impl BufRead,
    mut out: impl Write,
) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        match session.handle_line(&line) {
            Ok(Reply::Silent) => {}
            Ok(Reply::Output(text)) => writeln!(out, "{}", text)?,
            Ok(Reply::Exit) => break,
            Err(e) => writeln!(out, "error: {}", e)?,
        }
    }
    out.flush()
}
