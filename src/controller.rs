use crate::domain::{Credit, Phase, Session, Settings, TaskList, TickOutcome};
use crate::error::{CoreError, CoreResult};
use crate::notifications::{Notification, Notifications};
use crate::persistence::{load_or_default, PersistedState, Storage};
use crate::sound::SoundPlayer;
use crate::ticker::Ticker;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Owns the timer session, the task list and the settings, and couples them:
/// finishing a focus phase credits the active task, and every qualifying
/// mutation is written to storage and announced to the UI.
pub struct SessionController {
    settings: Settings,
    tasks: TaskList,
    session: Session,
    ticker: Ticker,
    storage: Box<dyn Storage>,
    sound: Box<dyn SoundPlayer>,
    notifications: Notifications,
}

impl SessionController {
    pub fn new(state: PersistedState, storage: Box<dyn Storage>, sound: Box<dyn SoundPlayer>) -> Self {
        let session = Session::new(&state.settings);
        Self {
            settings: state.settings,
            tasks: TaskList::new(state.tasks),
            session,
            ticker: Ticker::default(),
            storage,
            sound,
            notifications: Notifications::default(),
        }
    }

    /// Load persisted state (or defaults) and start a fresh session
    pub fn load(storage: Box<dyn Storage>, sound: Box<dyn SoundPlayer>) -> Self {
        let state = load_or_default(storage.as_ref());
        info!(tasks = state.tasks.len(), "state loaded");
        Self::new(state, storage, sound)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[cfg(test)]
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_ticking()
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Full state as written to storage
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            settings: self.settings.clone(),
            tasks: self.tasks.tasks().to_vec(),
        }
    }

    // ---- Timer ----

    /// Start the countdown; no-op while running
    pub fn start(&mut self) -> bool {
        if !self.session.start() {
            return false;
        }
        self.ticker.start_ticking(Instant::now());
        debug!(phase = ?self.session.phase(), remaining = self.session.time_remaining(), "timer started");
        true
    }

    /// Pause the countdown; no-op while paused
    pub fn pause(&mut self) -> bool {
        if !self.session.pause() {
            return false;
        }
        self.ticker.stop_ticking();
        debug!(phase = ?self.session.phase(), remaining = self.session.time_remaining(), "timer paused");
        true
    }

    pub fn toggle_timer(&mut self) {
        if self.session.is_running() {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Run every tick that has come due by `now`
    pub fn poll_ticks(&mut self, now: Instant) {
        for _ in 0..self.ticker.due_ticks(now) {
            self.tick();
        }
    }

    /// How long the event loop may block before the next tick
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        self.ticker.poll_timeout(now)
    }

    /// One second elapsed. On expiry the cue plays and the cycle advances.
    pub fn tick(&mut self) {
        match self.session.tick() {
            TickOutcome::Stopped => self.ticker.stop_ticking(),
            TickOutcome::Counting => {}
            TickOutcome::Expired(phase) => {
                self.ticker.stop_ticking();
                info!(phase = ?phase, "phase finished");
                self.sound.play(phase.completion_cue());
                self.advance();
            }
        }
    }

    /// Move to the next phase, crediting the active task when focus ends
    pub fn advance(&mut self) {
        self.ticker.stop_ticking();

        if self.session.phase() == Phase::Focus {
            self.credit_active_task();
        }

        let transition = self.session.advance(&self.settings);
        info!(
            from = ?transition.from,
            to = ?transition.to,
            cycle = self.session.completed_focus_count_in_cycle(),
            "phase changed"
        );
        self.persist();
        self.notifications.push(Notification::PhaseChanged);
    }

    /// End the current phase early, as if it had expired
    pub fn skip(&mut self) {
        self.pause();
        let phase = self.session.phase();
        debug!(phase = ?phase, "phase skipped");
        self.sound.play(phase.completion_cue());
        self.advance();
    }

    /// Jump to a phase without credit or sound
    pub fn switch_mode(&mut self, target: Phase) {
        self.pause();
        self.session.switch_mode(target, &self.settings);
        info!(phase = ?target, "mode switched");
        self.persist();
        self.notifications.push(Notification::PhaseChanged);
    }

    /// Replace the timer configuration and restart at focus
    pub fn apply_settings(&mut self, new_settings: Settings) -> CoreResult<()> {
        if let Err(e) = new_settings.validate() {
            return Err(self.reject(e));
        }
        self.pause();
        self.settings = new_settings;
        self.session.reset(&self.settings);
        info!(settings = ?self.settings, "settings applied");
        self.persist();
        self.notifications.push(Notification::PhaseChanged);
        self.notifications.push(Notification::SettingsApplied);
        Ok(())
    }

    /// Parse settings form text and apply it
    pub fn apply_settings_input(
        &mut self,
        focus: &str,
        short_break: &str,
        long_break: &str,
        long_break_interval: u32,
    ) -> CoreResult<()> {
        match Settings::from_form_input(
            focus,
            short_break,
            long_break,
            long_break_interval,
            self.settings.dark_mode_enabled,
        ) {
            Ok(settings) => self.apply_settings(settings),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Presentation-only flag, persisted with the settings
    pub fn set_dark_mode(&mut self, enabled: bool) {
        if self.settings.dark_mode_enabled == enabled {
            return;
        }
        self.settings.dark_mode_enabled = enabled;
        self.persist();
        self.notifications.push(Notification::PhaseChanged);
    }

    // ---- Tasks ----

    pub fn add_task(&mut self, text: &str, estimated: u32) -> CoreResult<usize> {
        match self.tasks.add_task(text, estimated) {
            Ok(index) => {
                debug!(index, estimated, "task added");
                self.task_list_changed();
                Ok(index)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub fn edit_task(&mut self, index: usize, new_text: &str, new_estimated: u32) -> CoreResult<()> {
        match self.tasks.edit_task(index, new_text, new_estimated) {
            Ok(()) => {
                debug!(index, new_estimated, "task edited");
                self.task_list_changed();
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Remove tasks by position. Returns the number removed.
    pub fn delete_tasks(&mut self, indices: &[usize]) -> usize {
        let removed = self.tasks.delete_tasks(indices);
        if removed > 0 {
            debug!(removed, "tasks deleted");
            self.task_list_changed();
        }
        removed
    }

    pub fn set_active(&mut self, index: usize) -> bool {
        if self.tasks.active_index() == Some(index) {
            return false;
        }
        if !self.tasks.set_active(index) {
            return false;
        }
        self.task_list_changed();
        true
    }

    pub fn set_done(&mut self, index: usize, done: bool) -> bool {
        if !self.tasks.set_done(index, done) {
            return false;
        }
        debug!(index, done, "task done flag changed");
        self.task_list_changed();
        true
    }

    pub fn reorder(&mut self, new_order: &[usize]) -> CoreResult<()> {
        match self.tasks.reorder(new_order) {
            Ok(()) => {
                self.task_list_changed();
                Ok(())
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Move one task and return its new position
    pub fn move_task(&mut self, from: usize, to: usize) -> CoreResult<usize> {
        if from == to {
            return Ok(to);
        }
        let order = match self.tasks.move_order(from, to) {
            Ok(order) => order,
            Err(e) => return Err(self.reject(e)),
        };
        self.reorder(&order)?;
        Ok(to)
    }

    fn credit_active_task(&mut self) {
        match self.tasks.credit_active_task() {
            Some(Credit::Completed(task)) => {
                info!(task = %task.text, completed = task.completed, "task completed");
                self.notifications.push(Notification::TaskListChanged);
                self.notifications.push(Notification::TaskCompleted(task));
            }
            Some(Credit::Progressed { index, completed }) => {
                debug!(index, completed, "task credited");
                self.notifications.push(Notification::TaskListChanged);
            }
            None => {}
        }
    }

    fn task_list_changed(&mut self) {
        self.persist();
        self.notifications.push(Notification::TaskListChanged);
    }

    /// Surface a validation failure to the UI and hand it back to the caller
    fn reject(&mut self, error: CoreError) -> CoreError {
        if let CoreError::Validation(message) = &error {
            debug!(%message, "input rejected");
            self.notifications.push(Notification::ValidationError(message.clone()));
        }
        error
    }

    /// Write the full state now
    pub fn save(&self) -> CoreResult<()> {
        self.storage.save(&self.snapshot())?;
        Ok(())
    }

    /// Write the full state; failures are reported but never abort the operation
    fn persist(&mut self) {
        if let Err(e) = self.save() {
            warn!(error = %e, "failed to save state");
            self.notifications.push(Notification::StorageWarning(e.to_string()));
        }
    }
}
