use std::rc::Rc;

use crate::model::book::Model;
use crate::model::task::Task;

use super::{CommandError, CommandResult, Lifecycle};

pub const COMMAND_WORD: &str = "add";
pub const MESSAGE_USAGE: &str = "add: Adds a task to the end of the task list.\n\
    Parameters: TITLE [/d DESCRIPTION] [/t TIMESTAMP] [#TAG]...\n\
    Example: add Submit report /d final draft /t 2026-11-02 #work";

/// Appends a task to the store.
#[derive(Debug, Clone)]
pub struct AddCommand {
    pub(super) lifecycle: Lifecycle,
    task: Task,
    /// The handle put into the store, so undo removes that exact entry
    added: Option<Rc<Task>>,
}

impl AddCommand {
    pub fn new(task: Task) -> Self {
        AddCommand {
            lifecycle: Lifecycle::default(),
            task,
            added: None,
        }
    }

    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_execute()?;
        if model.contains_equal(&self.task) {
            return Err(CommandError::DuplicateTask);
        }

        let handle = Rc::new(self.task.clone());
        model.add_task(Rc::clone(&handle));
        self.added = Some(handle);
        self.lifecycle.mark_executed();
        Ok(CommandResult::new(format!(
            "New task added: {}",
            self.task.title()
        )))
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_undo()?;
        let added = self
            .added
            .as_ref()
            .ok_or(CommandError::IllegalCommandState("add has no snapshot"))?;

        let index = model.index_of(added)?;
        model.delete_task(index)?;
        self.added = None;
        self.lifecycle.mark_undone();
        Ok(CommandResult::new(format!(
            "Removed added task: {}",
            self.task.title()
        )))
    }
}

impl PartialEq for AddCommand {
    fn eq(&self, other: &Self) -> bool {
        self.task == other.task
    }
}
