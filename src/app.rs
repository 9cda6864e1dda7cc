use crate::controller::SessionController;
use crate::domain::{Phase, MAX_LONG_BREAK_INTERVAL, MIN_LONG_BREAK_INTERVAL};
use crate::notifications::Notification;
use std::collections::{BTreeSet, VecDeque};
use tracing::warn;

/// Largest estimate offered when adding a task
pub const MAX_ESTIMATE: u32 = 10;

/// Largest estimate accepted when editing a task
pub const MAX_EDIT_ESTIMATE: u32 = 20;

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    Form,
    Modal,
}

/// What an open form will do on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    AddTask,
    EditTask(usize),
    Settings,
}

/// A single labelled text field
#[derive(Debug, Clone)]
pub struct FormField {
    pub label: &'static str,
    pub value: String,
}

impl FormField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

/// Input form state for adding/editing tasks and editing settings
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub kind: FormKind,
    pub fields: Vec<FormField>,
    pub editing_field: usize,
}

impl InputFormState {
    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::AddTask => " Add Task ",
            FormKind::EditTask(_) => " Edit Task ",
            FormKind::Settings => " Pomodoro Settings ",
        }
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(|f| f.value.as_str()).unwrap_or("")
    }
}

/// What a modal is asking for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalKind {
    Info,
    Error,
    ConfirmDelete(Vec<usize>),
}

/// Modal dialog state
#[derive(Debug, Clone)]
pub struct ModalState {
    pub kind: ModalKind,
    pub title: String,
    pub message: String,
}

/// Main application state: the core controller plus everything the
/// terminal front end needs to render and route keys
pub struct AppState {
    pub controller: SessionController,
    pub selected_index: usize,
    pub marked: BTreeSet<usize>,
    pub ui_mode: UiMode,
    pub input_form: Option<InputFormState>,
    pub modal: Option<ModalState>,
    /// Modals raised while another one is on screen, shown in order on dismiss
    pub pending_modals: VecDeque<ModalState>,
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(controller: SessionController) -> Self {
        Self {
            controller,
            selected_index: 0,
            marked: BTreeSet::new(),
            ui_mode: UiMode::Normal,
            input_form: None,
            modal: None,
            pending_modals: VecDeque::new(),
            status_message: None,
        }
    }

    /// Label under the timer: the task receiving credit
    pub fn current_task_label(&self) -> String {
        match self.controller.tasks().active_task() {
            Some(task) => format!("Doing: {}", task.text),
            None => "No Task Selected".to_string(),
        }
    }

    /// React to everything the core announced since the last call
    pub fn process_notifications(&mut self) {
        for notification in self.controller.drain_notifications() {
            match notification {
                Notification::TaskCompleted(task) => self.show_modal(
                    ModalKind::Info,
                    "Task Completed!",
                    format!("Congratulations! You completed the task:\n'{}'", task.text),
                ),
                Notification::ValidationError(message) => {
                    self.show_modal(ModalKind::Error, "Invalid Input", message)
                }
                Notification::SettingsApplied => {
                    self.show_modal(ModalKind::Info, "Settings Saved", "New settings have been applied!")
                }
                Notification::StorageWarning(message) => {
                    self.status_message = Some(format!("Warning: changes not saved ({})", message));
                }
                Notification::TaskListChanged => self.clamp_selection(),
                Notification::PhaseChanged => {}
            }
        }
    }

    fn show_modal(&mut self, kind: ModalKind, title: &str, message: impl Into<String>) {
        let modal = ModalState {
            kind,
            title: title.to_string(),
            message: message.into(),
        };
        if self.modal.is_some() {
            self.pending_modals.push_back(modal);
            return;
        }
        self.modal = Some(modal);
        self.ui_mode = UiMode::Modal;
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = self.pending_modals.pop_front();
        self.ui_mode = if self.modal.is_some() {
            UiMode::Modal
        } else if self.input_form.is_some() {
            UiMode::Form
        } else {
            UiMode::Normal
        };
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.tasks().len();
        if self.selected_index >= len {
            self.selected_index = len.saturating_sub(1);
        }
        self.marked.retain(|&i| i < len);
    }

    // ---- Timer ----

    pub fn toggle_timer(&mut self) {
        self.controller.toggle_timer();
    }

    pub fn skip_phase(&mut self) {
        self.controller.skip();
    }

    pub fn switch_mode(&mut self, phase: Phase) {
        self.controller.switch_mode(phase);
    }

    pub fn toggle_dark_mode(&mut self) {
        let enabled = !self.controller.settings().dark_mode_enabled;
        self.controller.set_dark_mode(enabled);
    }

    // ---- Task list navigation ----

    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn move_selection_down(&mut self) {
        if self.selected_index + 1 < self.controller.tasks().len() {
            self.selected_index += 1;
        }
    }

    /// Move the selected task up in the list
    pub fn move_task_up(&mut self) {
        if self.selected_index == 0 || self.controller.tasks().is_empty() {
            return;
        }
        if let Ok(to) = self.controller.move_task(self.selected_index, self.selected_index - 1) {
            self.selected_index = to;
            self.marked.clear();
        }
    }

    /// Move the selected task down in the list
    pub fn move_task_down(&mut self) {
        if self.selected_index + 1 >= self.controller.tasks().len() {
            return;
        }
        if let Ok(to) = self.controller.move_task(self.selected_index, self.selected_index + 1) {
            self.selected_index = to;
            self.marked.clear();
        }
    }

    /// Add or remove the selected task from the batch selection
    pub fn toggle_mark(&mut self) {
        if self.selected_index >= self.controller.tasks().len() {
            return;
        }
        if !self.marked.remove(&self.selected_index) {
            self.marked.insert(self.selected_index);
        }
    }

    /// Make the selected task the one credited by focus phases
    pub fn activate_selected(&mut self) {
        self.controller.set_active(self.selected_index);
    }

    /// Check or uncheck the selected task
    pub fn toggle_done_selected(&mut self) {
        if let Some(task) = self.controller.tasks().get(self.selected_index) {
            let done = !task.done;
            self.controller.set_done(self.selected_index, done);
        }
    }

    /// Ask before deleting the marked tasks (or the selected one)
    pub fn request_delete(&mut self) {
        let rows: Vec<usize> = if self.marked.is_empty() {
            if self.selected_index < self.controller.tasks().len() {
                vec![self.selected_index]
            } else {
                Vec::new()
            }
        } else {
            self.marked.iter().copied().collect()
        };
        if rows.is_empty() {
            return;
        }

        let message = format!(
            "Are you sure you want to delete the selected {} task(s)?",
            rows.len()
        );
        self.show_modal(ModalKind::ConfirmDelete(rows), "Confirm Delete", message);
    }

    pub fn confirm_delete(&mut self) {
        if let Some(ModalState {
            kind: ModalKind::ConfirmDelete(rows),
            ..
        }) = self.modal.take()
        {
            self.controller.delete_tasks(&rows);
            self.marked.clear();
            self.clamp_selection();
        }
        self.dismiss_modal();
    }

    // ---- Forms ----

    pub fn start_add_task(&mut self) {
        self.open_form(
            FormKind::AddTask,
            vec![
                FormField::new("What are you working on?", ""),
                FormField::new("Estimated Pomodoros", "1"),
            ],
        );
    }

    pub fn start_edit_task(&mut self) {
        let Some(task) = self.controller.tasks().get(self.selected_index) else {
            return;
        };
        let fields = vec![
            FormField::new("Task", task.text.clone()),
            FormField::new("Estimated Pomodoros", task.estimated.to_string()),
        ];
        self.open_form(FormKind::EditTask(self.selected_index), fields);
    }

    pub fn start_edit_settings(&mut self) {
        self.controller.pause();
        let settings = self.controller.settings();
        let fields = vec![
            FormField::new("Focus Time (minutes)", settings.focus_time_min.to_string()),
            FormField::new("Short Break (minutes)", settings.short_break_time_min.to_string()),
            FormField::new("Long Break (minutes)", settings.long_break_time_min.to_string()),
            FormField::new("Pomodoros before Long Break", settings.long_break_interval.to_string()),
        ];
        self.open_form(FormKind::Settings, fields);
    }

    fn open_form(&mut self, kind: FormKind, fields: Vec<FormField>) {
        self.input_form = Some(InputFormState {
            kind,
            fields,
            editing_field: 0,
        });
        self.ui_mode = UiMode::Form;
    }

    /// Cycle to the next field
    pub fn input_form_toggle_field(&mut self) {
        if let Some(form) = &mut self.input_form {
            form.editing_field = (form.editing_field + 1) % form.fields.len().max(1);
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if let Some(form) = &mut self.input_form {
            if let Some(field) = form.fields.get_mut(form.editing_field) {
                field.value.push(c);
            }
        }
    }

    pub fn input_form_backspace(&mut self) {
        if let Some(form) = &mut self.input_form {
            if let Some(field) = form.fields.get_mut(form.editing_field) {
                field.value.pop();
            }
        }
    }

    /// Submit the open form. The form stays open if the input is rejected.
    pub fn submit_input_form(&mut self) {
        let Some(form) = self.input_form.clone() else {
            return;
        };

        let accepted = match form.kind {
            FormKind::AddTask => match parse_bounded(form.value(1), 1, MAX_ESTIMATE) {
                Some(estimated) => match self.controller.add_task(form.value(0), estimated) {
                    Ok(index) => {
                        self.selected_index = index;
                        true
                    }
                    Err(_) => false,
                },
                None => {
                    self.reject_form_value("Estimated Pomodoros must be a number from 1 to 10.");
                    false
                }
            },
            FormKind::EditTask(index) => match parse_bounded(form.value(1), 1, MAX_EDIT_ESTIMATE) {
                Some(estimated) => self.controller.edit_task(index, form.value(0), estimated).is_ok(),
                None => {
                    self.reject_form_value("Estimated Pomodoros must be a number from 1 to 20.");
                    false
                }
            },
            FormKind::Settings => match form.value(3).trim().parse::<u32>() {
                Ok(interval) => {
                    let interval = interval.clamp(MIN_LONG_BREAK_INTERVAL, MAX_LONG_BREAK_INTERVAL);
                    self.controller
                        .apply_settings_input(form.value(0), form.value(1), form.value(2), interval)
                        .is_ok()
                }
                Err(_) => {
                    self.reject_form_value("Please enter a valid number for the long break interval!");
                    false
                }
            },
        };

        if accepted {
            self.input_form = None;
            if self.ui_mode == UiMode::Form {
                self.ui_mode = UiMode::Normal;
            }
        }
    }

    fn reject_form_value(&mut self, message: &str) {
        warn!(%message, "form value rejected");
        self.show_modal(ModalKind::Error, "Invalid Input", message);
    }

    pub fn cancel_input_form(&mut self) {
        self.input_form = None;
        self.ui_mode = UiMode::Normal;
    }
}

fn parse_bounded(input: &str, min: u32, max: u32) -> Option<u32> {
    input
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|v| (min..=max).contains(v))
}
