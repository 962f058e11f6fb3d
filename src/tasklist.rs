use crate::datekey::DateKey;
use crate::model::{Task, TaskStatus, TaskStore};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRow {
    /// 1-based position shown to the user.
    pub serial: usize,
    pub title: String,
    pub status: TaskStatus,
    pub row_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListView {
    pub date: DateKey,
    pub rows: Vec<TaskRow>,
}

/// What a controller call did to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Changed(String),
    Ignored(String),
}

impl Outcome {
    pub fn changed(&self) -> bool {
        matches!(self, Outcome::Changed(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Changed(msg) | Outcome::Ignored(msg) => msg,
        }
    }
}

impl TaskListView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn render(store: &TaskStore, date: &DateKey) -> TaskListView {
    let rows = store
        .tasks_for(date)
        .iter()
        .enumerate()
        .map(|(row_index, task)| TaskRow {
            serial: row_index + 1,
            title: task.title.clone(),
            status: task.status,
            row_index,
        })
        .collect();
    TaskListView {
        date: date.clone(),
        rows,
    }
}

pub fn add_task(store: &mut TaskStore, date: &DateKey, raw_title: &str) -> Outcome {
    match Task::new(raw_title) {
        Some(task) => {
            let msg = format!("Added \"{}\" to {}", task.title, date);
            store.append(date, task);
            Outcome::Changed(msg)
        }
        None => Outcome::Ignored("Task title is empty, nothing added".into()),
    }
}

pub fn change_status(
    store: &mut TaskStore,
    date: &DateKey,
    row_index: usize,
    status: TaskStatus,
) -> Outcome {
    match store.set_status(date, row_index, status) {
        Ok(()) => Outcome::Changed(format!("Task {} is now {}", row_index + 1, status)),
        Err(err) => {
            log::debug!("status change ignored: {}", err);
            Outcome::Ignored(err.to_string())
        }
    }
}

pub fn delete_task(store: &mut TaskStore, date: &DateKey, row_index: usize) -> Outcome {
    match store.remove_at(date, row_index) {
        Ok(task) => Outcome::Changed(format!("Deleted \"{}\"", task.title)),
        Err(err) => {
            log::debug!("delete ignored: {}", err);
            Outcome::Ignored(err.to_string())
        }
    }
}
