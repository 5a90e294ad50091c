use crate::model::book::Model;
use crate::model::filter::TaskFilter;

use super::{CommandError, CommandResult, Lifecycle};

pub const COMMAND_WORD: &str = "filter";
pub const MESSAGE_USAGE: &str = "filter: Shows only tasks matching every given filter; no filters shows all.\n\
    Parameters: [done | not-done | tag:NAME | keyword:TEXT | before:DATE | after:DATE]...\n\
    Example: filter not-done tag:work";

/// Replaces the active filter set.
#[derive(Debug, Clone)]
pub struct FilterCommand {
    pub(super) lifecycle: Lifecycle,
    filters: Vec<TaskFilter>,
    previous: Option<Vec<TaskFilter>>,
}

impl FilterCommand {
    pub fn new(filters: Vec<TaskFilter>) -> Self {
        FilterCommand {
            lifecycle: Lifecycle::default(),
            filters,
            previous: None,
        }
    }

    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_execute()?;
        if model.selected_task_filters() == self.filters.as_slice() {
            return Err(CommandError::NothingChanged(
                "Those filters are already active.",
            ));
        }

        self.previous = Some(model.selected_task_filters().to_vec());
        model.set_task_filters(self.filters.clone());
        self.lifecycle.mark_executed();
        Ok(CommandResult::new(describe(&self.filters, model)))
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_undo()?;
        let previous = self
            .previous
            .take()
            .ok_or(CommandError::IllegalCommandState("filter has no snapshot"))?;

        model.set_task_filters(previous);
        self.lifecycle.mark_undone();
        Ok(CommandResult::new(describe(
            model.selected_task_filters(),
            model,
        )))
    }
}

fn describe(filters: &[TaskFilter], model: &Model) -> String {
    let shown = model.filtered_task_list().len();
    if filters.is_empty() {
        return format!("Showing all {} tasks.", shown);
    }
    let names: Vec<String> = filters.iter().map(ToString::to_string).collect();
    format!("Showing {} tasks matching: {}", shown, names.join(", "))
}

impl PartialEq for FilterCommand {
    fn eq(&self, other: &Self) -> bool {
        self.filters == other.filters
    }
}
