use tracing::{info, warn};

use crate::model::book::Model;

use super::{Command, CommandError, CommandResult, CommandState};

/// Runs commands and keeps the most recent successful one for undo.
///
/// Holds a single slot, not a history: executing a new command drops the
/// previous occupant and its undo snapshot. An undone command stays in the
/// slot so it can be redone.
#[derive(Debug, Default)]
pub struct CommandExecutor {
    slot: Option<Command>,
}

impl CommandExecutor {
    pub fn new() -> Self {
        CommandExecutor { slot: None }
    }

    /// Execute `command`. On success it becomes the undo slot occupant; on
    /// failure the slot is left alone.
    pub fn execute(
        &mut self,
        mut command: Command,
        model: &mut Model,
    ) -> Result<CommandResult, CommandError> {
        match command.execute(model) {
            Ok(result) => {
                info!(command = command.word(), "command executed");
                self.slot = Some(command);
                Ok(result)
            }
            Err(e) => {
                warn!(command = command.word(), error = %e, "command rejected");
                Err(e)
            }
        }
    }

    /// Undo the slot occupant.
    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let command = self.slot.as_mut().ok_or(CommandError::NothingToUndo)?;
        let result = command.undo(model).inspect_err(|e| {
            warn!(command = command.word(), error = %e, "undo failed");
        })?;
        info!(command = command.word(), "command undone");
        Ok(result)
    }

    /// Execute the slot occupant again after it was undone.
    pub fn redo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        let command = self
            .slot
            .as_mut()
            .filter(|c| c.state() == CommandState::Undone)
            .ok_or(CommandError::NothingToRedo)?;
        let result = command.execute(model).inspect_err(|e| {
            warn!(command = command.word(), error = %e, "redo failed");
        })?;
        info!(command = command.word(), "command redone");
        Ok(result)
    }

    /// The command currently in the undo slot
    pub fn last(&self) -> Option<&Command> {
        self.slot.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }
}
