use std::rc::Rc;

use crate::model::book::Model;
use crate::model::filter::TaskFilter;
use crate::model::task::Task;

use super::{CommandError, CommandResult, Lifecycle, check_reinsertion};

pub const COMMAND_WORD: &str = "clear";
pub const MESSAGE_SUCCESS: &str = "Task list has been cleared!";
pub const MESSAGE_UNDONE: &str = "Task list restored.";
pub const MESSAGE_USAGE: &str = "clear: Deletes every task, visible or not, and removes all filters.\nExample: clear";

/// Empties the store and the filter set.
#[derive(Debug, Clone, Default)]
pub struct ClearCommand {
    pub(super) lifecycle: Lifecycle,
    cleared: Option<(Vec<Rc<Task>>, Vec<TaskFilter>)>,
}

impl ClearCommand {
    pub fn new() -> Self {
        ClearCommand::default()
    }

    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_execute()?;
        if model.task_count() == 0 {
            return Err(CommandError::NothingToClear);
        }

        let filters = model.selected_task_filters().to_vec();
        let tasks = model.clear_tasks();
        model.set_task_filters(Vec::new());
        self.cleared = Some((tasks, filters));
        self.lifecycle.mark_executed();
        Ok(CommandResult::new(MESSAGE_SUCCESS))
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_undo()?;
        let (tasks, filters) = self
            .cleared
            .as_ref()
            .ok_or(CommandError::IllegalCommandState("clear has no snapshot"))?;
        let indices: Vec<usize> = (0..tasks.len()).collect();
        check_reinsertion(model.task_count(), &indices)?;

        model.set_task_filters(filters.clone());
        for (index, task) in tasks.iter().enumerate() {
            model.insert_task(Rc::clone(task), index)?;
        }
        self.cleared = None;
        self.lifecycle.mark_undone();
        Ok(CommandResult::new(MESSAGE_UNDONE))
    }
}

impl PartialEq for ClearCommand {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
