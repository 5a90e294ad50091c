use std::rc::Rc;

use crate::model::book::Model;
use crate::model::task::Task;

use super::{CommandError, CommandResult, Lifecycle, resolve_visible};

pub const COMMAND_WORD: &str = "delete";
pub const MESSAGE_USAGE: &str = "delete: Deletes the task at INDEX in the displayed task list.\n\
    Parameters: INDEX (a positive integer)\n\
    Example: delete 2";

/// Deletes one task, addressed by its position in the filtered list.
#[derive(Debug, Clone)]
pub struct DeleteCommand {
    pub(super) lifecycle: Lifecycle,
    /// 1-based position in the filtered list
    index: usize,
    /// Store index and task removed by the last execute
    deleted: Option<(usize, Rc<Task>)>,
}

impl DeleteCommand {
    pub fn new(index: usize) -> Self {
        DeleteCommand {
            lifecycle: Lifecycle::default(),
            index,
            deleted: None,
        }
    }

    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_execute()?;
        let store_index = resolve_visible(model, self.index)?;

        let task = model.delete_task(store_index)?;
        let feedback = format!("Deleted task: {}", task.title());
        self.deleted = Some((store_index, task));
        self.lifecycle.mark_executed();
        Ok(CommandResult::new(feedback))
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_undo()?;
        let (store_index, task) = self
            .deleted
            .as_ref()
            .ok_or(CommandError::IllegalCommandState("delete has no snapshot"))?;

        model.insert_task(Rc::clone(task), *store_index)?;
        let feedback = format!("Restored task: {}", task.title());
        self.deleted = None;
        self.lifecycle.mark_undone();
        Ok(CommandResult::new(feedback))
    }
}

impl PartialEq for DeleteCommand {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}
