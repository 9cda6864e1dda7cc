use crate::domain::Task;
use std::collections::VecDeque;

/// Events the core raises for the UI, in the order they happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// Phase, countdown duration or timer configuration changed
    PhaseChanged,
    /// Tasks were added, edited, removed, reordered or credited
    TaskListChanged,
    /// A task reached its estimate through focus credit
    TaskCompleted(Task),
    /// User input was rejected
    ValidationError(String),
    /// Saving failed; the in-memory state is still correct
    StorageWarning(String),
    /// New settings took effect
    SettingsApplied,
}

/// Queue drained by the UI once per event-loop iteration
#[derive(Debug, Default)]
pub struct Notifications {
    queue: VecDeque<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.queue.push_back(notification);
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        self.queue.drain(..).collect()
    }
}
