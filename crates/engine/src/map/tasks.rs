use crate::error::{CoreError, IndexKind};

use super::SpatialLayout;

/// Completion flags, indexed in lockstep with `SpatialLayout::tasks`.
/// Flags only ever go from `false` to `true`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskRegistry {
    completed: Vec<bool>,
}

impl TaskRegistry {
    pub fn new(task_count: usize) -> Self {
        Self {
            completed: vec![false; task_count],
        }
    }

    pub fn for_layout(layout: &SpatialLayout) -> Self {
        Self::new(layout.tasks().len())
    }

    /// Marks the task done. Returns `true` only when this call flipped the flag.
    pub fn complete(&mut self, task_index: usize) -> Result<bool, CoreError> {
        let len = self.completed.len();
        let flag = self
            .completed
            .get_mut(task_index)
            .ok_or(CoreError::OutOfRange {
                kind: IndexKind::Task,
                index: task_index,
                len,
            })?;
        let newly_completed = !*flag;
        *flag = true;
        Ok(newly_completed)
    }

    pub fn is_complete(&self, task_index: usize) -> bool {
        self.completed.get(task_index).copied().unwrap_or(false)
    }

    pub fn completed_count(&self) -> u32 {
        self.completed.iter().filter(|done| **done).count() as u32
    }

    pub fn is_all_complete(&self, total: u32) -> bool {
        self.completed_count() >= total
    }

    pub fn flags(&self) -> &[bool] {
        &self.completed
    }

    pub fn len(&self) -> usize {
        self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.completed.is_empty()
    }
}
