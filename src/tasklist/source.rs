//! # Data Source
//!
//! CRUD facade over the [`EntityStore`]. It converts persistence records into
//! flat DTOs ([`TaskListData`], [`TaskData`]) and enforces cross-record
//! integrity on every write:
//!
//! - a task can only be added to, or moved into, an existing list
//! - ids are never reused
//! - deleting a list deletes its tasks
//!
//! Each check runs inside the same store transaction as the write it guards,
//! so a rejected write leaves the store untouched.
//!
//! DTOs carry enum values as raw strings; no validation happens here.

use crate::error::{Result, TaskError};
use crate::store::{EntityStore, ListRecord, RecordKind, Snapshot, StorageBackend, TaskRecord};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct TaskListData {
    pub id: Uuid,
    pub name: String,
    pub category_raw: String,
    pub tasks: Vec<TaskData>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskData {
    pub id: Uuid,
    pub list_id: Uuid,
    /// Resolved from the owning list on read; ignored on write.
    pub list_name: String,
    pub icon_name: String,
    pub title: String,
    pub details: String,
    pub due_date: DateTime<Utc>,
    pub status_raw: String,
    pub category_raw: String,
}

impl TaskData {
    fn from_record(record: TaskRecord, list_name: &str) -> Self {
        Self {
            id: record.id,
            list_id: record.list_id,
            list_name: list_name.to_string(),
            icon_name: record.icon_name,
            title: record.title,
            details: record.details,
            due_date: record.due_date,
            status_raw: record.status,
            category_raw: record.category,
        }
    }

    fn into_record(self) -> TaskRecord {
        TaskRecord {
            id: self.id,
            list_id: self.list_id,
            icon_name: self.icon_name,
            title: self.title,
            details: self.details,
            due_date: self.due_date,
            status: self.status_raw,
            category: self.category_raw,
        }
    }
}

impl TaskListData {
    /// Split into records, linking every nested task to this list.
    fn into_records(self) -> (ListRecord, Vec<TaskRecord>) {
        let list_id = self.id;
        let tasks = self
            .tasks
            .into_iter()
            .map(|task| TaskRecord {
                list_id,
                ..task.into_record()
            })
            .collect();
        let list = ListRecord {
            id: self.id,
            name: self.name,
            category: self.category_raw,
        };
        (list, tasks)
    }
}

pub struct TaskDataSource<B: StorageBackend> {
    store: EntityStore<B>,
}

impl<B: StorageBackend> TaskDataSource<B> {
    pub fn new(store: EntityStore<B>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &EntityStore<B> {
        &self.store
    }

    /// Lists sorted by name, each with its tasks sorted by due date.
    pub fn fetch_lists(&self) -> Result<Vec<TaskListData>> {
        let Snapshot { lists, tasks } = self.store.snapshot()?;

        let mut by_list: HashMap<Uuid, Vec<TaskRecord>> = HashMap::new();
        for task in tasks {
            by_list.entry(task.list_id).or_default().push(task);
        }

        let mut result = Vec::with_capacity(lists.len());
        for list in lists {
            let tasks = by_list
                .remove(&list.id)
                .unwrap_or_default()
                .into_iter()
                .map(|t| TaskData::from_record(t, &list.name))
                .collect();
            result.push(TaskListData {
                id: list.id,
                name: list.name,
                category_raw: list.category,
                tasks,
            });
        }

        let orphans: usize = by_list.values().map(Vec::len).sum();
        if orphans > 0 {
            warn!(orphans, "dropping tasks whose list no longer exists");
        }
        Ok(result)
    }

    /// All tasks across lists, sorted by due date.
    pub fn fetch_tasks(&self) -> Result<Vec<TaskData>> {
        let Snapshot { lists, tasks } = self.store.snapshot()?;
        let names: HashMap<Uuid, &str> = lists.iter().map(|l| (l.id, l.name.as_str())).collect();

        let mut result = Vec::with_capacity(tasks.len());
        for task in tasks {
            match names.get(&task.list_id) {
                Some(name) => result.push(TaskData::from_record(task, name)),
                None => warn!(task = %task.id, list = %task.list_id, "dropping orphaned task"),
            }
        }
        Ok(result)
    }

    pub fn get_task(&self, id: &Uuid) -> Result<Option<TaskData>> {
        let snapshot = self.store.snapshot()?;
        let Some(task) = snapshot.task(id) else {
            return Ok(None);
        };
        match snapshot.list(&task.list_id) {
            Some(list) => Ok(Some(TaskData::from_record(task.clone(), &list.name))),
            None => {
                warn!(task = %id, list = %task.list_id, "task references a missing list");
                Ok(None)
            }
        }
    }

    /// Insert a list together with any tasks it already carries.
    pub fn add_list(&self, list: TaskListData) -> Result<()> {
        let (list, tasks) = list.into_records();
        let id = list.id;
        self.store.transaction(move |snapshot| {
            if snapshot.contains(RecordKind::List, &list.id) {
                return Err(TaskError::ListAlreadyExists(list.id));
            }
            if let Some(dup) = tasks.iter().find(|t| snapshot.contains(RecordKind::Task, &t.id)) {
                return Err(TaskError::TaskAlreadyExists(dup.id));
            }
            snapshot.upsert_list(list);
            for task in tasks {
                snapshot.upsert_task(task);
            }
            Ok(())
        })?;
        debug!(list = %id, "list added");
        Ok(())
    }

    /// Overwrite a list's name and category. Its tasks are left alone.
    pub fn update_list(&self, list: TaskListData) -> Result<()> {
        self.store.transaction(|snapshot| {
            let existing = snapshot
                .list_mut(&list.id)
                .ok_or(TaskError::ListNotFound(list.id))?;
            existing.name = list.name;
            existing.category = list.category_raw;
            Ok(())
        })
    }

    pub fn delete_list(&self, id: &Uuid) -> Result<()> {
        self.store.delete(RecordKind::List, id)
    }

    pub fn add_task(&self, task: TaskData) -> Result<()> {
        let record = task.into_record();
        let id = record.id;
        self.store.transaction(move |snapshot| {
            if !snapshot.contains(RecordKind::List, &record.list_id) {
                return Err(TaskError::ListNotFound(record.list_id));
            }
            if snapshot.contains(RecordKind::Task, &record.id) {
                return Err(TaskError::TaskAlreadyExists(record.id));
            }
            snapshot.upsert_task(record);
            Ok(())
        })?;
        debug!(task = %id, "task added");
        Ok(())
    }

    /// Overwrite every field of an existing task, moving it if `list_id` changed.
    pub fn update_task(&self, task: TaskData) -> Result<()> {
        let record = task.into_record();
        self.store.transaction(move |snapshot| {
            let current_list = snapshot
                .task(&record.id)
                .map(|t| t.list_id)
                .ok_or(TaskError::TaskNotFound(record.id))?;

            if current_list != record.list_id {
                if !snapshot.contains(RecordKind::List, &record.list_id) {
                    return Err(TaskError::ListNotFound(record.list_id));
                }
                debug!(task = %record.id, from = %current_list, to = %record.list_id, "task moved");
            }

            snapshot.upsert_task(record);
            Ok(())
        })
    }

    pub fn delete_task(&self, id: &Uuid) -> Result<()> {
        self.store.delete(RecordKind::Task, id)
    }

    /// Seed the store from `factory` when it holds no lists.
    pub fn ensure_initial_data<F>(&self, factory: F) -> Result<bool>
    where
        F: FnOnce() -> Vec<TaskListData>,
    {
        self.store.seed_if_empty(|| {
            let mut lists = Vec::new();
            let mut tasks = Vec::new();
            for data in factory() {
                let (list, list_tasks) = data.into_records();
                lists.push(list);
                tasks.extend(list_tasks);
            }
            (lists, tasks)
        })
    }
}
