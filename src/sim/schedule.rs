//! Deferred, cancellable actions
//!
//! Stands in for `setTimeout`: actions are queued with a delay in seconds and
//! handed back once enough time has been advanced. Nothing runs on its own;
//! the owner decides what a due action means.

use serde::{Deserialize, Serialize};

/// Handle to a scheduled action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(u64);

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Task<A> {
    id: TaskId,
    remaining_secs: f32,
    action: A,
}

/// Queue of delayed actions, fired in scheduling order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scheduler<A> {
    tasks: Vec<Task<A>>,
    next_id: u64,
}

impl<A> Default for Scheduler<A> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 1,
        }
    }
}

impl<A> Scheduler<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `action` to come due after `delay_secs`
    pub fn schedule(&mut self, delay_secs: f32, action: A) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.tasks.push(Task {
            id,
            remaining_secs: delay_secs.max(0.0),
            action,
        });
        id
    }

    /// Drop a pending action. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        self.tasks.len() != before
    }

    /// Drop every pending action
    pub fn cancel_all(&mut self) {
        if !self.tasks.is_empty() {
            log::debug!("Cancelling {} pending action(s)", self.tasks.len());
        }
        self.tasks.clear();
    }

    pub fn is_pending(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.len()
    }

    /// Advance time and return the actions that came due
    pub fn advance(&mut self, dt_secs: f32) -> Vec<A> {
        let dt_secs = dt_secs.max(0.0);
        let mut due = Vec::new();
        let mut waiting = Vec::with_capacity(self.tasks.len());

        for mut task in self.tasks.drain(..) {
            task.remaining_secs -= dt_secs;
            if task.remaining_secs <= 0.0 {
                due.push(task.action);
            } else {
                waiting.push(task);
            }
        }

        self.tasks = waiting;
        due
    }
}
