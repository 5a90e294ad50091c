use std::rc::Rc;

use tracing::debug;

use crate::model::filter::{FilterSet, TaskFilter};
use crate::model::store::{StoreError, TaskStore};
use crate::model::task::Task;

/// The task book: a task store plus the filters that decide which of its
/// tasks are visible. Commands mutate it only through these methods.
///
/// The filtered list is recomputed on every query so it can never drift
/// from the store.
#[derive(Debug, Clone, Default)]
pub struct Model {
    store: TaskStore,
    filters: FilterSet,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    pub fn with_tasks(tasks: impl IntoIterator<Item = Task>) -> Self {
        Model {
            store: tasks.into_iter().collect(),
            filters: FilterSet::new(),
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Tasks passing every active filter, in store order.
    pub fn filtered_task_list(&self) -> Vec<Rc<Task>> {
        self.filters
            .filtered_view(&self.store)
            .map(|(_, task)| Rc::clone(task))
            .collect()
    }

    /// Store index of the visible task at `position` (0-based in the
    /// filtered list).
    pub fn visible_to_store_index(&self, position: usize) -> Option<usize> {
        self.filters
            .filtered_view(&self.store)
            .nth(position)
            .map(|(index, _)| index)
    }

    /// Position of `task` in the full store, not the filtered list.
    pub fn index_of(&self, task: &Rc<Task>) -> Result<usize, StoreError> {
        self.store.index_of(task)
    }

    pub fn task_at(&self, index: usize) -> Result<&Rc<Task>, StoreError> {
        self.store.get(index)
    }

    pub fn contains_equal(&self, task: &Task) -> bool {
        self.store.position_of_equal(task).is_some()
    }

    /// True when a task equal to `task` sits at any store index other than
    /// `index`.
    pub fn contains_equal_elsewhere(&self, task: &Task, index: usize) -> bool {
        self.store
            .iter()
            .enumerate()
            .any(|(i, t)| i != index && **t == *task)
    }

    pub fn task_count(&self) -> usize {
        self.store.len()
    }

    /// Every task in store order, ignoring filters.
    pub fn tasks(&self) -> impl Iterator<Item = &Rc<Task>> {
        self.store.iter()
    }

    // -----------------------------------------------------------------------
    // Store mutations
    // -----------------------------------------------------------------------

    /// Append a task; returns the store index it landed at.
    pub fn add_task(&mut self, task: Rc<Task>) -> usize {
        self.store.push(task);
        debug!(index = self.store.len() - 1, "task appended");
        self.store.len() - 1
    }

    /// Insert at an explicit store index. Used when replaying an undo.
    pub fn insert_task(&mut self, task: Rc<Task>, index: usize) -> Result<(), StoreError> {
        self.store.insert(task, index)?;
        debug!(index, "task inserted");
        Ok(())
    }

    pub fn delete_task(&mut self, index: usize) -> Result<Rc<Task>, StoreError> {
        let task = self.store.delete_at(index)?;
        debug!(index, "task deleted");
        Ok(task)
    }

    /// Replace the task at a store index, returning the previous one.
    pub fn set_task(&mut self, index: usize, task: Rc<Task>) -> Result<Rc<Task>, StoreError> {
        let old = self.store.replace_at(index, task)?;
        debug!(index, "task replaced");
        Ok(old)
    }

    /// Remove every task currently visible. Filters stay as they are.
    /// Returns how many tasks were removed.
    pub fn delete_all_in_filtered_task_list(&mut self) -> usize {
        let filters = &self.filters;
        let removed = self.store.retain(|task| !filters.matches(task));
        debug!(count = removed, "filtered tasks deleted");
        removed
    }

    /// Remove every task regardless of filters.
    pub fn clear_tasks(&mut self) -> Vec<Rc<Task>> {
        let tasks = self.store.drain_all();
        debug!(count = tasks.len(), "store cleared");
        tasks
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    pub fn selected_task_filters(&self) -> &[TaskFilter] {
        self.filters.active_filters()
    }

    pub fn set_task_filters(&mut self, filters: Vec<TaskFilter>) {
        let names: Vec<String> = filters.iter().map(ToString::to_string).collect();
        debug!(filters = %names.join(" "), "filters set");
        self.filters.set_filters(filters);
    }
}
