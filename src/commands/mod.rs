//! Reversible commands over the task [`Model`].
//!
//! Each command kind captures what it needs to reverse itself while it
//! executes. All validation happens before the first mutation, so a failed
//! `execute` or `undo` leaves the model exactly as it was.

pub mod add;
pub mod clear;
pub mod delete;
pub mod edit;
pub mod executor;
pub mod filter;
pub mod mark;
pub mod purge;

use std::fmt;
use std::rc::Rc;

use crate::model::book::Model;
use crate::model::store::StoreError;
use crate::model::task::Task;

pub use add::AddCommand;
pub use clear::ClearCommand;
pub use delete::DeleteCommand;
pub use edit::EditCommand;
pub use executor::CommandExecutor;
pub use filter::FilterCommand;
pub use mark::MarkCommand;
pub use purge::PurgeCommand;

/// Error type for command execution and undo
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("There are no tasks to purge.")]
    NothingToPurge,
    #[error("There are no tasks to clear.")]
    NothingToClear,
    #[error("{0}")]
    NothingChanged(&'static str),
    #[error("Task {index} is already marked {}.", done_label(.done))]
    AlreadyMarked { index: usize, done: bool },
    #[error("This task already exists in the task list.")]
    DuplicateTask,
    #[error("The task index {0} is invalid.")]
    InvalidIndex(usize),
    #[error("illegal command state: {0}")]
    IllegalCommandState(&'static str),
    #[error("There is no command to undo.")]
    NothingToUndo,
    #[error("There is no command to redo.")]
    NothingToRedo,
    #[error("task list out of sync: {0}")]
    Store(#[from] StoreError),
}

fn done_label(done: &bool) -> &'static str {
    if *done { "done" } else { "not done" }
}

/// Feedback for the user after a command succeeds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        CommandResult {
            feedback: feedback.into(),
        }
    }
}

impl fmt::Display for CommandResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.feedback)
    }
}

/// Where a command instance is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandState {
    #[default]
    Unexecuted,
    Executed,
    /// Undone and ready to be executed again
    Undone,
}

/// Lifecycle guard embedded in every command kind
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: CommandState,
}

impl Lifecycle {
    pub fn state(&self) -> CommandState {
        self.state
    }

    pub fn can_execute(&self) -> Result<(), CommandError> {
        match self.state {
            CommandState::Executed => Err(CommandError::IllegalCommandState(
                "command has already been executed",
            )),
            CommandState::Unexecuted | CommandState::Undone => Ok(()),
        }
    }

    pub fn can_undo(&self) -> Result<(), CommandError> {
        match self.state {
            CommandState::Executed => Ok(()),
            CommandState::Unexecuted => Err(CommandError::IllegalCommandState(
                "command has not been executed",
            )),
            CommandState::Undone => Err(CommandError::IllegalCommandState(
                "command has already been undone",
            )),
        }
    }

    fn mark_executed(&mut self) {
        self.state = CommandState::Executed;
    }

    fn mark_undone(&mut self) {
        self.state = CommandState::Undone;
    }
}

/// One user intent. A closed set: every kind keeps its undo logic next to
/// its forward logic.
///
/// Equality compares what the user asked for, never captured undo state.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    Edit(EditCommand),
    Mark(MarkCommand),
    Filter(FilterCommand),
    Purge(PurgeCommand),
    Clear(ClearCommand),
}

impl Command {
    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        match self {
            Command::Add(c) => c.execute(model),
            Command::Delete(c) => c.execute(model),
            Command::Edit(c) => c.execute(model),
            Command::Mark(c) => c.execute(model),
            Command::Filter(c) => c.execute(model),
            Command::Purge(c) => c.execute(model),
            Command::Clear(c) => c.execute(model),
        }
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        match self {
            Command::Add(c) => c.undo(model),
            Command::Delete(c) => c.undo(model),
            Command::Edit(c) => c.undo(model),
            Command::Mark(c) => c.undo(model),
            Command::Filter(c) => c.undo(model),
            Command::Purge(c) => c.undo(model),
            Command::Clear(c) => c.undo(model),
        }
    }

    fn lifecycle(&self) -> &Lifecycle {
        match self {
            Command::Add(c) => &c.lifecycle,
            Command::Delete(c) => &c.lifecycle,
            Command::Edit(c) => &c.lifecycle,
            Command::Mark(c) => &c.lifecycle,
            Command::Filter(c) => &c.lifecycle,
            Command::Purge(c) => &c.lifecycle,
            Command::Clear(c) => &c.lifecycle,
        }
    }

    pub fn state(&self) -> CommandState {
        self.lifecycle().state()
    }

    pub fn can_execute(&self) -> Result<(), CommandError> {
        self.lifecycle().can_execute()
    }

    pub fn can_undo(&self) -> Result<(), CommandError> {
        self.lifecycle().can_undo()
    }

    /// The word that invokes this command in the shell
    pub fn word(&self) -> &'static str {
        match self {
            Command::Add(_) => add::COMMAND_WORD,
            Command::Delete(_) => delete::COMMAND_WORD,
            Command::Edit(_) => edit::COMMAND_WORD,
            Command::Mark(c) => c.word(),
            Command::Filter(_) => filter::COMMAND_WORD,
            Command::Purge(_) => purge::COMMAND_WORD,
            Command::Clear(_) => clear::COMMAND_WORD,
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Map a 1-based position in the visible list to a store index.
fn resolve_visible(model: &Model, index: usize) -> Result<usize, CommandError> {
    index
        .checked_sub(1)
        .and_then(|position| model.visible_to_store_index(position))
        .ok_or(CommandError::InvalidIndex(index))
}

/// Check that tasks can be put back at `indices` (ascending) one after
/// another into a store currently holding `len` tasks. Each insertion grows
/// the store by one, so the k-th index may be at most `len + k`.
fn check_reinsertion<'a>(
    len: usize,
    indices: impl IntoIterator<Item = &'a usize>,
) -> Result<(), StoreError> {
    for (k, &index) in indices.into_iter().enumerate() {
        if index > len + k {
            return Err(StoreError::IndexOutOfRange { index, len: len + k });
        }
    }
    Ok(())
}

/// Undo state for commands that swap one task for another in place
#[derive(Debug, Clone)]
struct Replaced {
    old: Rc<Task>,
    new: Rc<Task>,
}

impl Replaced {
    /// Put the old task back where the new one now sits.
    fn restore(&self, model: &mut Model) -> Result<usize, CommandError> {
        let index = model.index_of(&self.new)?;
        model.set_task(index, Rc::clone(&self.old))?;
        Ok(index)
    }
}
