//! # Use Cases
//!
//! One struct per repository operation. Each holds a shared repository and
//! forwards a single call to it; there is no retrying, caching or validation
//! at this layer. They give every view model a narrow, named dependency.

use crate::error::Result;
use crate::model::{Task, TaskList};
use crate::repository::SharedRepository;
use uuid::Uuid;

macro_rules! use_case {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone)]
        pub struct $name {
            repository: SharedRepository,
        }

        impl $name {
            pub fn new(repository: SharedRepository) -> Self {
                Self { repository }
            }
        }
    };
}

use_case!(
    /// Fetch every list with its tasks.
    FetchTaskLists
);
use_case!(
    /// Fetch every task across lists, soonest due first.
    FetchTasks
);
use_case!(AddTaskList);
use_case!(UpdateTaskList);
use_case!(DeleteTaskList);
use_case!(AddTask);
use_case!(UpdateTask);
use_case!(
    /// Persist a task whose status was changed. Same contract as [`UpdateTask`].
    UpdateTaskStatus
);
use_case!(DeleteTask);
use_case!(GetTaskById);

impl FetchTaskLists {
    pub fn execute(&self) -> Result<Vec<TaskList>> {
        self.repository.fetch_lists()
    }
}

impl FetchTasks {
    pub fn execute(&self) -> Result<Vec<Task>> {
        self.repository.fetch_tasks()
    }
}

impl AddTaskList {
    pub fn execute(&self, list: &TaskList) -> Result<()> {
        self.repository.add_list(list)
    }
}

impl UpdateTaskList {
    pub fn execute(&self, list: &TaskList) -> Result<()> {
        self.repository.update_list(list)
    }
}

impl DeleteTaskList {
    pub fn execute(&self, id: &Uuid) -> Result<()> {
        self.repository.delete_list(id)
    }
}

impl AddTask {
    pub fn execute(&self, task: &Task) -> Result<()> {
        self.repository.add_task(task)
    }
}

impl UpdateTask {
    pub fn execute(&self, task: &Task) -> Result<()> {
        self.repository.update_task(task)
    }
}

impl UpdateTaskStatus {
    pub fn execute(&self, task: &Task) -> Result<()> {
        self.repository.update_task(task)
    }
}

impl DeleteTask {
    pub fn execute(&self, id: &Uuid) -> Result<()> {
        self.repository.delete_task(id)
    }
}

impl GetTaskById {
    pub fn execute(&self, id: &Uuid) -> Result<Option<Task>> {
        self.repository.get_task(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TaskError;
    use crate::model::{Category, TaskStatus};
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// Records calls and replays canned answers.
    #[derive(Default)]
    struct RecordingRepository {
        calls: Mutex<Vec<String>>,
        lists: Vec<TaskList>,
        fail_with_missing_list: bool,
    }

    impl RecordingRepository {
        fn record(&self, call: String) {
            self.calls.lock().push(call);
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    impl crate::repository::TaskListRepository for RecordingRepository {
        fn fetch_lists(&self) -> Result<Vec<TaskList>> {
            self.record("fetch_lists".into());
            Ok(self.lists.clone())
        }

        fn fetch_tasks(&self) -> Result<Vec<Task>> {
            self.record("fetch_tasks".into());
            Ok(self.lists.iter().flat_map(|l| l.tasks.clone()).collect())
        }

        fn add_list(&self, list: &TaskList) -> Result<()> {
            self.record(format!("add_list {}", list.name));
            Ok(())
        }

        fn update_list(&self, list: &TaskList) -> Result<()> {
            self.record(format!("update_list {}", list.name));
            Ok(())
        }

        fn delete_list(&self, id: &Uuid) -> Result<()> {
            self.record(format!("delete_list {}", id));
            Ok(())
        }

        fn add_task(&self, task: &Task) -> Result<()> {
            self.record(format!("add_task {}", task.title));
            if self.fail_with_missing_list {
                return Err(TaskError::ListNotFound(task.list_id));
            }
            Ok(())
        }

        fn update_task(&self, task: &Task) -> Result<()> {
            self.record(format!("update_task {} {}", task.title, task.status));
            Ok(())
        }

        fn delete_task(&self, id: &Uuid) -> Result<()> {
            self.record(format!("delete_task {}", id));
            Ok(())
        }

        fn get_task(&self, id: &Uuid) -> Result<Option<Task>> {
            self.record(format!("get_task {}", id));
            Ok(None)
        }
    }

    fn sample_task(list_id: Uuid) -> Task {
        Task::new(list_id, "Write report".into(), String::new(), chrono::Utc::now(), Category::Work)
    }

    #[test]
    fn each_use_case_forwards_one_call() {
        let repo = Arc::new(RecordingRepository::default());
        let shared: SharedRepository = repo.clone();
        let list = TaskList::new("Work".into(), Category::Work);
        let task = sample_task(list.id).with_status(TaskStatus::Completed);

        FetchTaskLists::new(shared.clone()).execute().unwrap();
        FetchTasks::new(shared.clone()).execute().unwrap();
        AddTaskList::new(shared.clone()).execute(&list).unwrap();
        UpdateTaskList::new(shared.clone()).execute(&list).unwrap();
        DeleteTaskList::new(shared.clone()).execute(&list.id).unwrap();
        AddTask::new(shared.clone()).execute(&task).unwrap();
        UpdateTask::new(shared.clone()).execute(&task).unwrap();
        UpdateTaskStatus::new(shared.clone()).execute(&task).unwrap();
        DeleteTask::new(shared.clone()).execute(&task.id).unwrap();
        assert_eq!(GetTaskById::new(shared).execute(&task.id).unwrap(), None);

        assert_eq!(
            repo.calls(),
            vec![
                "fetch_lists".to_string(),
                "fetch_tasks".to_string(),
                "add_list Work".to_string(),
                "update_list Work".to_string(),
                format!("delete_list {}", list.id),
                "add_task Write report".to_string(),
                "update_task Write report completed".to_string(),
                "update_task Write report completed".to_string(),
                format!("delete_task {}", task.id),
                format!("get_task {}", task.id),
            ]
        );
    }

    #[test]
    fn errors_pass_through() {
        let repo = Arc::new(RecordingRepository {
            fail_with_missing_list: true,
            ..Default::default()
        });
        let task = sample_task(Uuid::new_v4());
        let err = AddTask::new(repo).execute(&task).unwrap_err();
        assert!(matches!(err, TaskError::ListNotFound(id) if id == task.list_id));
    }

    #[test]
    fn fetch_returns_repository_data() {
        let mut list = TaskList::new("Home".into(), Category::Family);
        list.tasks.push(sample_task(list.id));
        let repo = Arc::new(RecordingRepository {
            lists: vec![list.clone()],
            ..Default::default()
        });
        assert_eq!(FetchTaskLists::new(repo.clone()).execute().unwrap(), vec![list]);
        assert_eq!(FetchTasks::new(repo).execute().unwrap().len(), 1);
    }
}
