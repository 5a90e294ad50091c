use std::rc::Rc;

use crate::model::task::Task;

/// Error type for store indexing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("store index {index} out of range (store holds {len} tasks)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("task not found in store: {0}")]
    NotFound(String),
}

/// Ordered task storage. Indices are always `0..len()` with no gaps: removing
/// a task shifts everything after it down by one, inserting shifts up.
///
/// Tasks are held as shared handles so that a task taken out of the store
/// and put back later is the same entity, not merely an equal one.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Rc<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        TaskStore { tasks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Result<&Rc<Task>, StoreError> {
        self.tasks.get(index).ok_or(StoreError::IndexOutOfRange {
            index,
            len: self.tasks.len(),
        })
    }

    /// Insert at `index`, which may equal `len()` (append).
    pub fn insert(&mut self, task: Rc<Task>, index: usize) -> Result<(), StoreError> {
        if index > self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        self.tasks.insert(index, task);
        Ok(())
    }

    pub fn push(&mut self, task: Rc<Task>) {
        self.tasks.push(task);
    }

    pub fn delete_at(&mut self, index: usize) -> Result<Rc<Task>, StoreError> {
        self.check_index(index)?;
        Ok(self.tasks.remove(index))
    }

    /// Swap the handle at `index`, returning the one it replaced.
    pub fn replace_at(&mut self, index: usize, task: Rc<Task>) -> Result<Rc<Task>, StoreError> {
        self.check_index(index)?;
        Ok(std::mem::replace(&mut self.tasks[index], task))
    }

    /// First index holding this exact handle. Equal-valued tasks inserted
    /// separately are different entries and do not match each other.
    pub fn index_of(&self, task: &Rc<Task>) -> Result<usize, StoreError> {
        self.tasks
            .iter()
            .position(|t| Rc::ptr_eq(t, task))
            .ok_or_else(|| StoreError::NotFound(task.title().to_string()))
    }

    /// First index holding a task equal in value to `task`.
    pub fn position_of_equal(&self, task: &Task) -> Option<usize> {
        self.tasks.iter().position(|t| **t == *task)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Task>> {
        self.tasks.iter()
    }

    /// Keep only the tasks for which `keep` returns true, preserving order.
    /// Returns how many were removed.
    pub fn retain(&mut self, mut keep: impl FnMut(&Task) -> bool) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| keep(task));
        before - self.tasks.len()
    }

    /// Remove and return every task, leaving the store empty.
    pub fn drain_all(&mut self) -> Vec<Rc<Task>> {
        std::mem::take(&mut self.tasks)
    }

    fn check_index(&self, index: usize) -> Result<(), StoreError> {
        if index >= self.tasks.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.tasks.len(),
            });
        }
        Ok(())
    }
}

impl FromIterator<Task> for TaskStore {
    fn from_iter<I: IntoIterator<Item = Task>>(iter: I) -> Self {
        TaskStore {
            tasks: iter.into_iter().map(Rc::new).collect(),
        }
    }
}
