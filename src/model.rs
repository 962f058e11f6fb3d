use crate::datekey::DateKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Partial,
    Finished,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Every day's tasks, keyed by date. Lists keep insertion order.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct TaskStore {
    days: BTreeMap<DateKey, Vec<Task>>,
}

/// Aggregate status of one day's tasks, shown as a dot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusDot {
    AllDone,
    Pending,
    Mixed,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum StoreError {
    #[error("no task at row {index} on {date} ({len} task(s))")]
    IndexOutOfRange {
        date: DateKey,
        index: usize,
        len: usize,
    },
}

impl TaskStatus {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::Partial => "Partially finished",
            TaskStatus::Finished => "Finished",
        }
    }

    pub fn next(&self) -> TaskStatus {
        match self {
            TaskStatus::Pending => TaskStatus::Partial,
            TaskStatus::Partial => TaskStatus::Finished,
            TaskStatus::Finished => TaskStatus::Pending,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Partial => "partial",
            TaskStatus::Finished => "finished",
        })
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "partial" => Ok(TaskStatus::Partial),
            "finished" | "done" => Ok(TaskStatus::Finished),
            other => Err(format!(
                "unknown status `{}` (expected pending|partial|finished)",
                other
            )),
        }
    }
}

impl Task {
    /// Returns `None` when the title is blank after trimming.
    pub fn new(raw_title: &str) -> Option<Self> {
        let title = raw_title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Task {
            title: title.to_string(),
            status: TaskStatus::Pending,
        })
    }
}

impl TaskStore {
    pub fn tasks_for(&self, date: &DateKey) -> &[Task] {
        self.days.get(date).map(Vec::as_slice).unwrap_or(&[])
    }

    #[cfg(test)]
    pub fn days(&self) -> impl Iterator<Item = (&DateKey, &[Task])> {
        self.days.iter().map(|(k, v)| (k, v.as_slice()))
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    pub fn append(&mut self, date: &DateKey, task: Task) {
        self.days.entry(date.clone()).or_default().push(task);
    }

    pub fn set_status(
        &mut self,
        date: &DateKey,
        index: usize,
        status: TaskStatus,
    ) -> Result<(), StoreError> {
        let len = self.tasks_for(date).len();
        match self.days.get_mut(date).and_then(|list| list.get_mut(index)) {
            Some(task) => {
                task.status = status;
                Ok(())
            }
            None => Err(StoreError::IndexOutOfRange {
                date: date.clone(),
                index,
                len,
            }),
        }
    }

    /// Removes one row. A day left without tasks loses its key.
    pub fn remove_at(&mut self, date: &DateKey, index: usize) -> Result<Task, StoreError> {
        let len = self.tasks_for(date).len();
        let list = match self.days.get_mut(date) {
            Some(list) if index < list.len() => list,
            _ => {
                return Err(StoreError::IndexOutOfRange {
                    date: date.clone(),
                    index,
                    len,
                })
            }
        };
        let removed = list.remove(index);
        if list.is_empty() {
            self.days.remove(date);
        }
        Ok(removed)
    }

    pub fn prune_empty(&mut self) {
        self.days.retain(|_, list| !list.is_empty());
    }

    pub fn status_dot(&self, date: &DateKey) -> Option<StatusDot> {
        StatusDot::classify(self.tasks_for(date))
    }
}

impl StatusDot {
    pub fn glyph(&self) -> char {
        match self {
            StatusDot::AllDone => '•',
            StatusDot::Pending => '○',
            StatusDot::Mixed => '◐',
        }
    }

    pub fn classify(tasks: &[Task]) -> Option<StatusDot> {
        if tasks.is_empty() {
            return None;
        }
        let count = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
        let finished = count(TaskStatus::Finished);
        let partial = count(TaskStatus::Partial);
        let pending = count(TaskStatus::Pending);
        if finished > 0 && partial == 0 && pending == 0 {
            Some(StatusDot::AllDone)
        } else if pending > 0 && finished == 0 && partial == 0 {
            Some(StatusDot::Pending)
        } else {
            Some(StatusDot::Mixed)
        }
    }
}
