//! # Repository
//!
//! The repository is the boundary between persistence and the domain. It turns
//! [`TaskListData`]/[`TaskData`] DTOs into validated [`TaskList`]/[`Task`] values
//! and back.
//!
//! ## Validation on Read
//!
//! Status and category tags are parsed here. A record whose tag is not a known
//! value is **left out** of the result instead of failing the whole read:
//!
//! - a task with a bad status or category disappears from its list
//! - a list with a bad category disappears together with all of its tasks
//!
//! Sibling records are unaffected. Every drop is logged at `warn` and counted in
//! a [`DecodeReport`], available through [`StoreRepository::fetch_lists_with_report`].
//!
//! ## Seeding
//!
//! [`StoreRepository::new`] seeds the store with [`sample::sample_lists`] when it
//! holds no lists. A seeding failure is logged and otherwise ignored; the
//! repository is still usable.

use crate::error::Result;
use crate::model::{Category, Task, TaskList, TaskStatus};
use crate::sample;
use crate::source::{TaskData, TaskDataSource, TaskListData};
use crate::store::StorageBackend;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Everything callers above the data layer may do with lists and tasks.
pub trait TaskListRepository: Send + Sync {
    fn fetch_lists(&self) -> Result<Vec<TaskList>>;
    fn fetch_tasks(&self) -> Result<Vec<Task>>;
    fn add_list(&self, list: &TaskList) -> Result<()>;
    fn update_list(&self, list: &TaskList) -> Result<()>;
    fn delete_list(&self, id: &Uuid) -> Result<()>;
    fn add_task(&self, task: &Task) -> Result<()>;
    fn update_task(&self, task: &Task) -> Result<()>;
    fn delete_task(&self, id: &Uuid) -> Result<()>;
    fn get_task(&self, id: &Uuid) -> Result<Option<Task>>;
}

pub type SharedRepository = Arc<dyn TaskListRepository>;

/// Records left out of a read because their tags did not parse.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeReport {
    pub dropped_lists: usize,
    pub dropped_tasks: usize,
}

impl DecodeReport {
    pub fn is_clean(&self) -> bool {
        self.dropped_lists == 0 && self.dropped_tasks == 0
    }
}

pub struct StoreRepository<B: StorageBackend> {
    source: TaskDataSource<B>,
}

impl<B: StorageBackend> StoreRepository<B> {
    /// Wrap `source`, seeding sample data if the store is empty.
    pub fn new(source: TaskDataSource<B>) -> Self {
        match source.ensure_initial_data(sample::sample_lists) {
            Ok(true) => debug!("sample data inserted"),
            Ok(false) => {}
            Err(e) => warn!(error = %e, "could not seed sample data"),
        }
        Self { source }
    }

    pub fn unseeded(source: TaskDataSource<B>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &TaskDataSource<B> {
        &self.source
    }

    pub fn fetch_lists_with_report(&self) -> Result<(Vec<TaskList>, DecodeReport)> {
        let mut report = DecodeReport::default();
        let lists = self
            .source
            .fetch_lists()?
            .into_iter()
            .filter_map(|data| list_to_domain(data, &mut report))
            .collect();
        Ok((lists, report))
    }

    pub fn fetch_tasks_with_report(&self) -> Result<(Vec<Task>, DecodeReport)> {
        let mut report = DecodeReport::default();
        let tasks = self
            .source
            .fetch_tasks()?
            .into_iter()
            .filter_map(|data| {
                let task = task_to_domain(&data);
                if task.is_none() {
                    report.dropped_tasks += 1;
                }
                task
            })
            .collect();
        Ok((tasks, report))
    }
}

impl<B: StorageBackend> TaskListRepository for StoreRepository<B> {
    fn fetch_lists(&self) -> Result<Vec<TaskList>> {
        self.fetch_lists_with_report().map(|(lists, _)| lists)
    }

    fn fetch_tasks(&self) -> Result<Vec<Task>> {
        self.fetch_tasks_with_report().map(|(tasks, _)| tasks)
    }

    fn add_list(&self, list: &TaskList) -> Result<()> {
        self.source.add_list(list_to_data(list))
    }

    fn update_list(&self, list: &TaskList) -> Result<()> {
        self.source.update_list(list_to_data(list))
    }

    fn delete_list(&self, id: &Uuid) -> Result<()> {
        self.source.delete_list(id)
    }

    fn add_task(&self, task: &Task) -> Result<()> {
        self.source.add_task(task_to_data(task, task.list_id))
    }

    fn update_task(&self, task: &Task) -> Result<()> {
        self.source.update_task(task_to_data(task, task.list_id))
    }

    fn delete_task(&self, id: &Uuid) -> Result<()> {
        self.source.delete_task(id)
    }

    fn get_task(&self, id: &Uuid) -> Result<Option<Task>> {
        Ok(self.source.get_task(id)?.and_then(|data| task_to_domain(&data)))
    }
}

fn list_to_domain(data: TaskListData, report: &mut DecodeReport) -> Option<TaskList> {
    let Ok(category) = data.category_raw.parse::<Category>() else {
        warn!(list = %data.id, category = %data.category_raw, "dropping list with unknown category");
        report.dropped_lists += 1;
        return None;
    };

    let mut tasks = Vec::with_capacity(data.tasks.len());
    for task in &data.tasks {
        match task_to_domain(task) {
            Some(task) => tasks.push(task),
            None => report.dropped_tasks += 1,
        }
    }

    Some(TaskList {
        id: data.id,
        name: data.name,
        category,
        tasks,
    })
}

fn task_to_domain(data: &TaskData) -> Option<Task> {
    let status = data.status_raw.parse::<TaskStatus>();
    let category = data.category_raw.parse::<Category>();
    let (Ok(status), Ok(category)) = (status, category) else {
        warn!(
            task = %data.id,
            status = %data.status_raw,
            category = %data.category_raw,
            "dropping task with unknown status or category"
        );
        return None;
    };

    Some(Task {
        id: data.id,
        list_id: data.list_id,
        icon_name: data.icon_name.clone(),
        title: data.title.clone(),
        details: data.details.clone(),
        due_date: data.due_date,
        status,
        category,
    })
}

fn list_to_data(list: &TaskList) -> TaskListData {
    TaskListData {
        id: list.id,
        name: list.name.clone(),
        category_raw: list.category.as_str().to_string(),
        tasks: list.tasks.iter().map(|t| task_to_data(t, list.id)).collect(),
    }
}

fn task_to_data(task: &Task, list_id: Uuid) -> TaskData {
    TaskData {
        id: task.id,
        list_id,
        list_name: String::new(),
        icon_name: task.icon_name.clone(),
        title: task.title.clone(),
        details: task.details.clone(),
        due_date: task.due_date,
        status_raw: task.status.as_str().to_string(),
        category_raw: task.category.as_str().to_string(),
    }
}
