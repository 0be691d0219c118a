use crate::error::TaskError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The two record kinds held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    List,
    Task,
}

impl RecordKind {
    pub fn not_found(self, id: Uuid) -> TaskError {
        match self {
            RecordKind::List => TaskError::ListNotFound(id),
            RecordKind::Task => TaskError::TaskNotFound(id),
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKind::List => f.write_str("list"),
            RecordKind::Task => f.write_str("task"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListRecord {
    pub id: Uuid,
    pub name: String,
    pub category: String,
}

// Enum values stay raw strings so malformed rows survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: Uuid,
    pub list_id: Uuid,
    #[serde(default)]
    pub icon_name: String,
    pub title: String,
    #[serde(default)]
    pub details: String,
    pub due_date: DateTime<Utc>,
    pub status: String,
    #[serde(default)]
    pub category: String,
}

/// Entire store contents, loaded and saved as one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub lists: Vec<ListRecord>,
    #[serde(default)]
    pub tasks: Vec<TaskRecord>,
}

impl Snapshot {
    pub fn is_empty(&self) -> bool {
        self.lists.is_empty() && self.tasks.is_empty()
    }

    pub fn count(&self, kind: RecordKind) -> usize {
        match kind {
            RecordKind::List => self.lists.len(),
            RecordKind::Task => self.tasks.len(),
        }
    }

    pub fn list(&self, id: &Uuid) -> Option<&ListRecord> {
        self.lists.iter().find(|l| &l.id == id)
    }

    pub fn list_mut(&mut self, id: &Uuid) -> Option<&mut ListRecord> {
        self.lists.iter_mut().find(|l| &l.id == id)
    }

    pub fn task(&self, id: &Uuid) -> Option<&TaskRecord> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn task_mut(&mut self, id: &Uuid) -> Option<&mut TaskRecord> {
        self.tasks.iter_mut().find(|t| &t.id == id)
    }

    pub fn contains(&self, kind: RecordKind, id: &Uuid) -> bool {
        match kind {
            RecordKind::List => self.list(id).is_some(),
            RecordKind::Task => self.task(id).is_some(),
        }
    }

    /// Replace the list with the same id, or append it.
    pub fn upsert_list(&mut self, record: ListRecord) {
        match self.list_mut(&record.id) {
            Some(existing) => *existing = record,
            None => self.lists.push(record),
        }
    }

    pub fn upsert_task(&mut self, record: TaskRecord) {
        match self.task_mut(&record.id) {
            Some(existing) => *existing = record,
            None => self.tasks.push(record),
        }
    }

    /// Remove a record; removing a list also removes the tasks that reference it.
    /// Returns the number of cascaded task removals.
    pub fn remove(&mut self, kind: RecordKind, id: &Uuid) -> Result<usize, TaskError> {
        match kind {
            RecordKind::List => {
                let before = self.lists.len();
                self.lists.retain(|l| &l.id != id);
                if self.lists.len() == before {
                    return Err(kind.not_found(*id));
                }
                let tasks_before = self.tasks.len();
                self.tasks.retain(|t| &t.list_id != id);
                Ok(tasks_before - self.tasks.len())
            }
            RecordKind::Task => {
                let before = self.tasks.len();
                self.tasks.retain(|t| &t.id != id);
                if self.tasks.len() == before {
                    return Err(kind.not_found(*id));
                }
                Ok(0)
            }
        }
    }
}
