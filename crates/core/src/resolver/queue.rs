use crate::model::ClassName;
use indexmap::IndexMap;
use std::collections::HashSet;

/// Why a name sits in the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Explicitly requested; it must exist.
    Seed,
    /// Reached through another class's metadata.
    Reference,
}

/// Todo/done bookkeeping for one resolution run.
///
/// A name is processed at most once and never sits in both sets.
#[derive(Debug, Default)]
pub struct WorkQueue {
    todo: IndexMap<ClassName, Origin>,
    done: HashSet<ClassName>,
}

impl WorkQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `name` unless it was already processed. Returns whether it is pending now.
    ///
    /// Re-adding a pending reference as a seed upgrades its origin.
    pub fn add_todo(&mut self, name: ClassName, origin: Origin) -> bool {
        if self.done.contains(&name) {
            return false;
        }
        let slot = self.todo.entry(name).or_insert(origin);
        if origin == Origin::Seed {
            *slot = Origin::Seed;
        }
        true
    }

    /// Oldest pending name.
    pub fn pop(&mut self) -> Option<(ClassName, Origin)> {
        self.todo.shift_remove_index(0)
    }

    pub fn mark_done(&mut self, name: ClassName) {
        self.todo.shift_remove(&name);
        self.done.insert(name);
    }

    pub fn is_done(&self, name: &str) -> bool {
        self.done.contains(name)
    }

    pub fn is_pending(&self, name: &str) -> bool {
        self.todo.contains_key(name)
    }

    pub fn done(&self) -> &HashSet<ClassName> {
        &self.done
    }

    pub fn pending(&self) -> usize {
        self.todo.len()
    }

    pub fn is_drained(&self) -> bool {
        self.todo.is_empty()
    }

    pub fn clear(&mut self) {
        self.todo.clear();
        self.done.clear();
    }
}
