use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A to-do entry with its Pomodoro progress
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Identity used to follow a task across reorders (not persisted)
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub text: String,
    /// Target number of completed focus phases
    #[serde(default = "default_estimated")]
    pub estimated: u32,
    /// Focus phases credited so far
    #[serde(default)]
    pub completed: u32,
    #[serde(default)]
    pub done: bool,
}

fn default_estimated() -> u32 {
    1
}

/// Equality covers the persisted fields only; compare `id` to match referents.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
            && self.estimated == other.estimated
            && self.completed == other.completed
            && self.done == other.done
    }
}

impl Eq for Task {}

impl Task {
    pub fn new(text: String, estimated: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            text,
            estimated,
            completed: 0,
            done: false,
        }
    }

    /// Progress label like "2/4"
    pub fn progress_label(&self) -> String {
        format!("{}/{}", self.completed, self.estimated)
    }
}

/// Result of crediting the active task after a focus phase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credit {
    /// The active task gained one focus phase but is not finished yet
    Progressed { index: usize, completed: u32 },
    /// The active task reached its estimate; it is now done and no longer active
    Completed(Task),
}

/// Ordered task sequence plus the weak reference to the active task.
///
/// The active task is tracked by identity, so its position follows the task
/// through reorders and is dropped when the task leaves the list.
#[derive(Debug, Clone, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    active: Option<Uuid>,
}

impl TaskList {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks, active: None }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Task> {
        self.tasks.get(index)
    }

    /// Current position of the active task, if any
    pub fn active_index(&self) -> Option<usize> {
        let id = self.active?;
        self.tasks.iter().position(|t| t.id == id)
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.active_index().and_then(|i| self.tasks.get(i))
    }

    /// Append a new task, returning its index
    pub fn add_task(&mut self, text: &str, estimated: u32) -> CoreResult<usize> {
        let text = validate_text(text)?;
        validate_estimate(estimated)?;
        self.tasks.push(Task::new(text, estimated));
        Ok(self.tasks.len() - 1)
    }

    /// Update text and estimate; raising the estimate past the completed
    /// count reopens a done task.
    pub fn edit_task(&mut self, index: usize, new_text: &str, new_estimated: u32) -> CoreResult<()> {
        let text = validate_text(new_text)?;
        validate_estimate(new_estimated)?;
        let task = self
            .tasks
            .get_mut(index)
            .ok_or_else(|| CoreError::validation(format!("No task at position {}", index + 1)))?;

        task.text = text;
        task.estimated = new_estimated;
        if task.done && new_estimated > task.completed {
            task.done = false;
        }
        Ok(())
    }

    /// Remove the tasks at `indices`, returning how many were removed.
    /// Out-of-range and duplicate positions are ignored.
    pub fn delete_tasks(&mut self, indices: &[usize]) -> usize {
        let mut rows: Vec<usize> = indices.iter().copied().filter(|&i| i < self.tasks.len()).collect();
        rows.sort_unstable_by(|a, b| b.cmp(a));
        rows.dedup();

        for &row in &rows {
            let removed = self.tasks.remove(row);
            if self.active == Some(removed.id) {
                self.active = None;
            }
        }
        rows.len()
    }

    /// Mark the task at `index` active; out-of-range indices are ignored
    pub fn set_active(&mut self, index: usize) -> bool {
        match self.tasks.get(index) {
            Some(task) => {
                self.active = Some(task.id);
                true
            }
            None => false,
        }
    }

    /// Set the done flag by hand. Returns false when nothing changed.
    /// Checking a task credits its full estimate; the active reference is kept.
    pub fn set_done(&mut self, index: usize, done: bool) -> bool {
        let Some(task) = self.tasks.get_mut(index) else {
            return false;
        };
        if task.done == done {
            return false;
        }
        task.done = done;
        if done {
            task.completed = task.estimated;
        }
        true
    }

    /// Credit one completed focus phase to the active task
    pub fn credit_active_task(&mut self) -> Option<Credit> {
        let index = self.active_index()?;
        let task = &mut self.tasks[index];
        if task.done {
            return None;
        }

        task.completed += 1;
        if task.completed >= task.estimated {
            task.done = true;
            let finished = task.clone();
            self.active = None;
            Some(Credit::Completed(finished))
        } else {
            Some(Credit::Progressed {
                index,
                completed: task.completed,
            })
        }
    }

    /// Rearrange tasks so that position `i` holds the task previously at
    /// `new_order[i]`. `new_order` must be a permutation of the current positions.
    pub fn reorder(&mut self, new_order: &[usize]) -> CoreResult<()> {
        if !is_permutation(new_order, self.tasks.len()) {
            return Err(CoreError::validation(
                "Reorder must list every task exactly once",
            ));
        }

        let mut slots: Vec<Option<Task>> = std::mem::take(&mut self.tasks).into_iter().map(Some).collect();
        self.tasks = new_order.iter().filter_map(|&i| slots[i].take()).collect();

        if let Some(id) = self.active {
            if !self.tasks.iter().any(|t| t.id == id) {
                self.active = None;
            }
        }
        Ok(())
    }

    /// Permutation for `reorder` that moves one task to `to`, shifting the others
    pub fn move_order(&self, from: usize, to: usize) -> CoreResult<Vec<usize>> {
        let len = self.tasks.len();
        if from >= len || to >= len {
            return Err(CoreError::validation("Task position out of range"));
        }
        let mut order: Vec<usize> = (0..len).collect();
        let moved = order.remove(from);
        order.insert(to, moved);
        Ok(order)
    }
}

fn validate_text(text: &str) -> CoreResult<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(CoreError::validation("Task description cannot be empty."));
    }
    Ok(trimmed.to_string())
}

fn validate_estimate(estimated: u32) -> CoreResult<()> {
    if estimated == 0 {
        return Err(CoreError::validation("Estimated Pomodoros must be at least 1."));
    }
    Ok(())
}

fn is_permutation(order: &[usize], len: usize) -> bool {
    if order.len() != len {
        return false;
    }
    let mut seen = vec![false; len];
    for &i in order {
        if i >= len || seen[i] {
            return false;
        }
        seen[i] = true;
    }
    true
}
