//! Per-tick subscription list.
//!
//! The host pumps one tick signal. Each engine task subscribes while it has
//! work and unsubscribes when done; handlers run in registration order.
//! Both operations are idempotent.

use serde::Serialize;

/// A task that hangs off the tick signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TickTask {
    /// Drains regeneration credits.
    Regeneration,
    /// Waits for the watched buff to disappear.
    BuffWatch,
    /// Reverts the outstanding gift-dialogue patch.
    DialogueRevert,
}

/// Ordered, duplicate-free set of subscribed tasks.
#[derive(Debug, Clone, Default)]
pub struct TickSchedule {
    tasks: Vec<TickTask>,
}

impl TickSchedule {
    /// Create an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe `task`. Returns `false` if it was already subscribed.
    pub fn subscribe(&mut self, task: TickTask) -> bool {
        if self.tasks.contains(&task) {
            return false;
        }
        self.tasks.push(task);
        true
    }

    /// Unsubscribe `task`. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, task: TickTask) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| *t != task);
        self.tasks.len() != before
    }

    /// Return `true` if `task` is subscribed.
    pub fn is_subscribed(&self, task: TickTask) -> bool {
        self.tasks.contains(&task)
    }

    /// Snapshot of the subscribed tasks in registration order.
    ///
    /// Handlers may unsubscribe while the snapshot is being walked.
    pub fn snapshot(&self) -> Vec<TickTask> {
        self.tasks.clone()
    }

    /// Number of subscribed tasks.
    pub const fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Return `true` if nothing is subscribed.
    pub const fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drop every subscription.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribe_is_idempotent() {
        let mut schedule = TickSchedule::new();
        assert!(schedule.subscribe(TickTask::Regeneration));
        assert!(!schedule.subscribe(TickTask::Regeneration));
        assert_eq!(schedule.len(), 1);
    }

    #[test]
    fn unsubscribe_twice_is_safe() {
        let mut schedule = TickSchedule::new();
        schedule.subscribe(TickTask::BuffWatch);
        assert!(schedule.unsubscribe(TickTask::BuffWatch));
        assert!(!schedule.unsubscribe(TickTask::BuffWatch));
        assert!(schedule.is_empty());
    }

    #[test]
    fn snapshot_keeps_registration_order() {
        let mut schedule = TickSchedule::new();
        schedule.subscribe(TickTask::DialogueRevert);
        schedule.subscribe(TickTask::Regeneration);
        schedule.subscribe(TickTask::BuffWatch);
        schedule.unsubscribe(TickTask::Regeneration);
        schedule.subscribe(TickTask::Regeneration);
        assert_eq!(
            schedule.snapshot(),
            vec![TickTask::DialogueRevert, TickTask::BuffWatch, TickTask::Regeneration]
        );
    }
}
