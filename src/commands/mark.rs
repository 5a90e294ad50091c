use std::rc::Rc;

use crate::model::book::Model;

use super::{CommandError, CommandResult, Lifecycle, Replaced, resolve_visible};

pub const DONE_COMMAND_WORD: &str = "done";
pub const UNDONE_COMMAND_WORD: &str = "undone";
pub const MESSAGE_USAGE: &str = "done / undone: Marks the task at INDEX in the displayed task list as done or not done.\n\
    Parameters: INDEX (a positive integer)\n\
    Example: done 3";

/// Sets the done flag of one task, addressed by its position in the
/// filtered list.
#[derive(Debug, Clone)]
pub struct MarkCommand {
    pub(super) lifecycle: Lifecycle,
    /// 1-based position in the filtered list
    index: usize,
    done: bool,
    replaced: Option<Replaced>,
}

impl MarkCommand {
    pub fn new(index: usize, done: bool) -> Self {
        MarkCommand {
            lifecycle: Lifecycle::default(),
            index,
            done,
            replaced: None,
        }
    }

    pub fn word(&self) -> &'static str {
        if self.done {
            DONE_COMMAND_WORD
        } else {
            UNDONE_COMMAND_WORD
        }
    }

    pub fn execute(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_execute()?;
        let store_index = resolve_visible(model, self.index)?;
        let current = model.task_at(store_index)?;
        if current.is_done() == self.done {
            return Err(CommandError::AlreadyMarked {
                index: self.index,
                done: self.done,
            });
        }

        let marked = (**current).clone().with_done(self.done);
        if model.contains_equal_elsewhere(&marked, store_index) {
            return Err(CommandError::DuplicateTask);
        }

        let new = Rc::new(marked);
        let old = model.set_task(store_index, Rc::clone(&new))?;
        let feedback = format!(
            "Marked task {}: {}",
            if self.done { "done" } else { "not done" },
            new.title()
        );
        self.replaced = Some(Replaced { old, new });
        self.lifecycle.mark_executed();
        Ok(CommandResult::new(feedback))
    }

    pub fn undo(&mut self, model: &mut Model) -> Result<CommandResult, CommandError> {
        self.lifecycle.can_undo()?;
        let replaced = self
            .replaced
            .take()
            .ok_or(CommandError::IllegalCommandState("mark has no snapshot"))?;

        if let Err(e) = replaced.restore(model) {
            self.replaced = Some(replaced);
            return Err(e);
        }
        self.lifecycle.mark_undone();
        Ok(CommandResult::new(format!(
            "Reverted mark: {}",
            replaced.old.title()
        )))
    }
}

impl PartialEq for MarkCommand {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index && self.done == other.done
    }
}
