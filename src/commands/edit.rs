use std::rc::Rc;

use crate::model::book::Model;
use crate::model::task::Task;

use super::{CommandError, CommandResult, Lifecycle, Replaced, resolve_visible};

pub const COMMAND_WORD: &str = "edit";
pub const MESSAGE_USAGE: &str = "edit: Replaces the task at INDEX in the displayed task list.\n\
    Parameters: INDEX TITLE [/d DESCRIPTION] [/t TIMESTAMP] [#TAG]...\n\
    Example: edit 1 Submit report #work";

/// Replaces one task, addressed by its position in the filtered list.
#[derive(Debug, Clone)]
pub struct EditCommand {
    pub(super) lifecycle: Lifecycle,
    /// 1-based position in the filtered list
    index: usize,
    task: Task,
    replaced: Option<Replaced>,
}

impl EditCommand {
    pub fn new(index: usize, task: Task) -> Self {
        EditCommand {
            lifecycle: Lifecycle::default(),
            index,
            task,
            replaced: None,
        }
    }

    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_execute()?;
        let store_index = resolve_visible(model, self.index)?;
        if **model.task_at(store_index)? == self.task {
            return Err(CommandError::NothingChanged("The task is unchanged."));
        }
        if model.contains_equal_elsewhere(&self.task, store_index) {
            return Err(CommandError::DuplicateTask);
        }

        let new = Rc::new(self.task.clone());
        let old = model.set_task(store_index, Rc::clone(&new))?;
        self.replaced = Some(Replaced { old, new });
        self.lifecycle.mark_executed();
        Ok(CommandResult::new(format!(
            "Edited task: {}",
            self.task.title()
        )))
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_undo()?;
        let replaced = self
            .replaced
            .take()
            .ok_or(CommandError::IllegalCommandState("edit has no snapshot"))?;

        if let Err(e) = replaced.restore(model) {
            self.replaced = Some(replaced);
            return Err(e);
        }
        self.lifecycle.mark_undone();
        Ok(CommandResult::new(format!(
            "Reverted edit: {}",
            replaced.old.title()
        )))
    }
}

impl PartialEq for EditCommand {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.task == other.task
    }
}
