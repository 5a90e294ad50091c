use std::collections::BTreeMap;
use std::rc::Rc;

use crate::model::book::Model;
use crate::model::filter::TaskFilter;
use crate::model::task::Task;

use super::{CommandError, CommandResult, Lifecycle, check_reinsertion};

pub const COMMAND_WORD: &str = "purge";
pub const MESSAGE_SUCCESS: &str = "Tasks purged!";
pub const MESSAGE_UNDONE: &str = "Purged tasks restored.";
pub const MESSAGE_USAGE: &str = "purge: Purges all tasks in the displayed task list.\nExample: purge";

/// What a purge removed: each task keyed by the store index it held, plus
/// the filters that decided what was visible.
#[derive(Debug, Clone)]
struct PurgeSnapshot {
    /// Ascending by index so undo replays insertions in order
    deleted_tasks: BTreeMap<usize, Rc<Task>>,
    filters: Vec<TaskFilter>,
}

/// Deletes every task in the filtered list.
#[derive(Debug, Clone, Default)]
pub struct PurgeCommand {
    pub(super) lifecycle: Lifecycle,
    snapshot: Option<PurgeSnapshot>,
}

impl PurgeCommand {
    pub fn new() -> Self {
        PurgeCommand::default()
    }

    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_execute()?;

        let visible = model.filtered_task_list();
        if visible.is_empty() {
            return Err(CommandError::NothingToPurge);
        }

        // Store indices, read before anything is removed
        let mut deleted_tasks = BTreeMap::new();
        for task in visible {
            let index = model.index_of(&task)?;
            deleted_tasks.insert(index, task);
        }
        let filters = model.selected_task_filters().to_vec();

        model.delete_all_in_filtered_task_list();
        self.snapshot = Some(PurgeSnapshot {
            deleted_tasks,
            filters,
        });
        self.lifecycle.mark_executed();
        Ok(CommandResult::new(MESSAGE_SUCCESS))
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_undo()?;
        let snapshot = self
            .snapshot
            .as_ref()
            .ok_or(CommandError::IllegalCommandState("purge has no snapshot"))?;
        check_reinsertion(model.task_count(), snapshot.deleted_tasks.keys())?;

        // Filters first: the captured indices are store indices and must not
        // be read against a different view.
        model.set_task_filters(snapshot.filters.clone());
        // Ascending: each insertion only shifts tasks after it, so every
        // later captured index still points where it did before the purge.
        for (&index, task) in &snapshot.deleted_tasks {
            model.insert_task(Rc::clone(task), index)?;
        }

        self.snapshot = None;
        self.lifecycle.mark_undone();
        Ok(CommandResult::new(MESSAGE_UNDONE))
    }

    /// Store indices captured by the last execute, ascending.
    pub fn captured_indices(&self) -> Vec<usize> {
        self.snapshot
            .as_ref()
            .map(|s| s.deleted_tasks.keys().copied().collect())
            .unwrap_or_default()
    }
}

impl PartialEq for PurgeCommand {
    /// Purge takes no parameters, so any two purges are the same command
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
