//! WIP limit checks.
//!
//! Limits are advisory. Nothing here is consulted by the commands; callers
//! read these flags to show a warning badge or to refuse a drop themselves.

use crate::types::{Board, ColumnId};
use serde::Serialize;
use std::num::NonZeroUsize;

/// Task count of one column measured against its WIP limit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCapacity {
    pub column: ColumnId,
    pub count: usize,
    pub limit: Option<NonZeroUsize>,
    pub over_capacity: bool,
}

impl ColumnCapacity {
    /// True when the column holds exactly as many tasks as its limit allows
    pub fn at_capacity(&self) -> bool {
        self.limit.is_some_and(|limit| self.count == limit.get())
    }

    /// Free slots before the limit is reached; `None` for unlimited columns
    pub fn remaining(&self) -> Option<usize> {
        self.limit.map(|limit| limit.get().saturating_sub(self.count))
    }
}

impl Board {
    /// Capacity of a single column, or `None` for an unknown column
    pub fn capacity(&self, column: &ColumnId) -> Option<ColumnCapacity> {
        let limit = self.column(column)?.limit;
        let count = self.column_task_count(column);
        Some(ColumnCapacity {
            column: column.clone(),
            count,
            limit,
            over_capacity: limit.is_some_and(|limit| count > limit.get()),
        })
    }

    /// Capacity of every column, in column order
    pub fn capacity_report(&self) -> Vec<ColumnCapacity> {
        self.column_order()
            .iter()
            .filter_map(|id| self.capacity(id))
            .collect()
    }

    /// True when the column holds more tasks than its limit
    pub fn is_over_capacity(&self, column: &ColumnId) -> bool {
        self.capacity(column).is_some_and(|c| c.over_capacity)
    }

    /// Would adding `incoming` tasks push the column over its limit?
    pub fn would_exceed(&self, column: &ColumnId, incoming: usize) -> bool {
        match self.column(column).and_then(|c| c.limit) {
            Some(limit) => self.column_task_count(column).saturating_add(incoming) > limit.get(),
            None => false,
        }
    }
}
