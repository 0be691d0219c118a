use super::{StateCell, ViewState};
use crate::error::Result;
use crate::model::{Category, Task, TaskList};
use crate::repository::SharedRepository;
use crate::usecases::{
    AddTask, AddTaskList, DeleteTask, DeleteTaskList, FetchTaskLists, UpdateTask, UpdateTaskList,
    UpdateTaskStatus,
};
use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// User input for a task that does not exist yet.
#[derive(Debug, Clone)]
pub struct NewTask {
    /// Falls back to the category's default icon.
    pub icon_name: Option<String>,
    pub title: String,
    pub details: String,
    pub due_date: DateTime<Utc>,
    pub category: Category,
}

/// State for the multi-list screen.
pub struct TaskListViewModel {
    fetch_lists: FetchTaskLists,
    add_list: AddTaskList,
    update_list: UpdateTaskList,
    delete_list: DeleteTaskList,
    add_task: AddTask,
    update_task: UpdateTask,
    update_status: UpdateTaskStatus,
    delete_task: DeleteTask,
    lists: Vec<TaskList>,
    state: StateCell<Vec<TaskList>>,
}

impl TaskListViewModel {
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            fetch_lists: FetchTaskLists::new(repository.clone()),
            add_list: AddTaskList::new(repository.clone()),
            update_list: UpdateTaskList::new(repository.clone()),
            delete_list: DeleteTaskList::new(repository.clone()),
            add_task: AddTask::new(repository.clone()),
            update_task: UpdateTask::new(repository.clone()),
            update_status: UpdateTaskStatus::new(repository.clone()),
            delete_task: DeleteTask::new(repository),
            lists: Vec::new(),
            state: StateCell::new(),
        }
    }

    /// Last successfully loaded lists.
    pub fn lists(&self) -> &[TaskList] {
        &self.lists
    }

    pub fn state(&self) -> ViewState<Vec<TaskList>> {
        self.state.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Vec<TaskList>>> {
        self.state.subscribe()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn load_lists(&mut self) {
        self.state.loading();
        match self.fetch_lists.execute() {
            Ok(lists) => {
                self.lists = lists.clone();
                self.state.loaded(lists);
            }
            Err(e) => self.state.failed(&e),
        }
    }

    pub fn add_list(&mut self, name: &str, category: Category) {
        let list = TaskList::new(name.to_string(), category);
        self.perform(|vm| vm.add_list.execute(&list));
    }

    pub fn update_list(&mut self, list: &TaskList) {
        self.perform(|vm| vm.update_list.execute(list));
    }

    pub fn delete_list(&mut self, list: &TaskList) {
        self.perform(|vm| vm.delete_list.execute(&list.id));
    }

    /// Delete the lists at `offsets` in the current `lists()`. Unknown offsets are skipped.
    pub fn delete_lists(&mut self, offsets: &[usize]) {
        let ids: Vec<_> = offsets
            .iter()
            .filter_map(|&i| self.lists.get(i).map(|l| l.id))
            .collect();
        if ids.is_empty() {
            return;
        }
        self.perform(|vm| {
            for id in &ids {
                vm.delete_list.execute(id)?;
            }
            Ok(())
        });
    }

    pub fn add_task(&mut self, list: &TaskList, new_task: NewTask) {
        let mut task = Task::new(
            list.id,
            new_task.title,
            new_task.details,
            new_task.due_date,
            new_task.category,
        );
        if let Some(icon) = new_task.icon_name {
            task = task.with_icon(icon);
        }
        self.perform(|vm| vm.add_task.execute(&task));
    }

    /// Save every field of `task`; a changed `list_id` moves it.
    pub fn update_task(&mut self, task: &Task) {
        self.perform(|vm| vm.update_task.execute(task));
    }

    pub fn toggle_status(&mut self, task: &Task) {
        let mut updated = task.clone();
        updated.status = task.status.toggled();
        self.perform(|vm| vm.update_status.execute(&updated));
    }

    pub fn delete_task(&mut self, task: &Task) {
        self.perform(|vm| vm.delete_task.execute(&task.id));
    }

    /// Delete the tasks at `offsets` within `list`. Unknown offsets are skipped.
    pub fn delete_tasks(&mut self, list: &TaskList, offsets: &[usize]) {
        let ids: Vec<_> = offsets
            .iter()
            .filter_map(|&i| list.tasks.get(i).map(|t| t.id))
            .collect();
        if ids.is_empty() {
            return;
        }
        self.perform(|vm| {
            for id in &ids {
                vm.delete_task.execute(id)?;
            }
            Ok(())
        });
    }

    fn perform<F>(&mut self, action: F)
    where
        F: FnOnce(&Self) -> Result<()>,
    {
        self.state.loading();
        match action(self) {
            Ok(()) => self.load_lists(),
            Err(e) => self.state.failed(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use crate::viewmodel::test_support::{repository, seeded_repository};
    use chrono::Duration;
    use uuid::Uuid;

    fn new_task(title: &str, days: i64) -> NewTask {
        NewTask {
            icon_name: None,
            title: title.to_string(),
            details: String::new(),
            due_date: Utc::now() + Duration::days(days),
            category: Category::Errands,
        }
    }

    #[test]
    fn load_publishes_seeded_lists() {
        let (shared, _) = seeded_repository();
        let mut vm = TaskListViewModel::new(shared);
        let mut rx = vm.subscribe();
        assert_eq!(vm.state(), ViewState::Idle);

        vm.load_lists();

        assert_eq!(vm.lists().len(), 2);
        assert!(rx.has_changed().unwrap());
        match &*rx.borrow_and_update() {
            ViewState::Loaded(lists) => assert_eq!(lists.len(), 2),
            other => panic!("unexpected state {:?}", other),
        }
        assert_eq!(vm.error_message(), None);
    }

    #[test]
    fn add_list_then_task_then_toggle() {
        let (shared, _) = repository();
        let mut vm = TaskListViewModel::new(shared);

        vm.add_list("Errands", Category::Errands);
        let list = vm.lists()[0].clone();
        assert_eq!(list.name, "Errands");

        vm.add_task(&list, new_task("Post office", 1));
        let task = vm.lists()[0].tasks[0].clone();
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.icon_name, Category::Errands.default_icon());

        vm.toggle_status(&task);
        assert_eq!(vm.lists()[0].tasks[0].status, TaskStatus::Completed);
        let completed = vm.lists()[0].tasks[0].clone();
        vm.toggle_status(&completed);
        assert_eq!(vm.lists()[0].tasks[0].status, TaskStatus::Pending);
    }

    #[test]
    fn custom_icon_is_kept() {
        let (shared, _) = repository();
        let mut vm = TaskListViewModel::new(shared);
        vm.add_list("Home", Category::Family);
        let list = vm.lists()[0].clone();
        vm.add_task(
            &list,
            NewTask {
                icon_name: Some("flame".into()),
                ..new_task("Light the stove", 0)
            },
        );
        assert_eq!(vm.lists()[0].tasks[0].icon_name, "flame");
    }

    #[test]
    fn update_task_moves_it_between_lists() {
        let (shared, _) = repository();
        let mut vm = TaskListViewModel::new(shared);
        vm.add_list("A", Category::Work);
        vm.add_list("B", Category::Hobby);
        let a = vm.lists()[0].clone();
        let b = vm.lists()[1].clone();
        vm.add_task(&a, new_task("Wander", 1));

        let mut task = vm.lists()[0].tasks[0].clone();
        task.list_id = b.id;
        vm.update_task(&task);

        assert!(vm.lists()[0].tasks.is_empty());
        assert_eq!(vm.lists()[1].tasks[0].id, task.id);
    }

    #[test]
    fn delete_by_offsets() {
        let (shared, _) = seeded_repository();
        let mut vm = TaskListViewModel::new(shared);
        vm.load_lists();

        let work = vm.lists().iter().find(|l| l.name == "Work").unwrap().clone();
        vm.delete_tasks(&work, &[0, 1, 9]);
        let work = vm.lists().iter().find(|l| l.name == "Work").unwrap();
        assert!(work.tasks.is_empty());

        vm.delete_lists(&[0, 1]);
        assert!(vm.lists().is_empty());
    }

    #[test]
    fn empty_offsets_do_nothing() {
        let (shared, _) = seeded_repository();
        let mut vm = TaskListViewModel::new(shared);
        vm.load_lists();
        let mut rx = vm.subscribe();
        drop(rx.borrow_and_update());

        vm.delete_lists(&[42]);

        assert!(!rx.has_changed().unwrap());
        assert_eq!(vm.lists().len(), 2);
    }

    #[test]
    fn failure_keeps_previous_lists_and_sets_message() {
        let (shared, repo) = seeded_repository();
        let mut vm = TaskListViewModel::new(shared);
        vm.load_lists();
        let before = vm.lists().to_vec();

        repo.source().store().backend().set_simulate_write_error(true);
        vm.add_list("Never", Category::Study);

        assert_eq!(vm.lists(), before.as_slice());
        let message = vm.error_message().unwrap().to_string();
        assert!(message.contains("Simulated write error"));
        assert_eq!(vm.state(), ViewState::Failed(message));

        repo.source().store().backend().set_simulate_write_error(false);
        vm.load_lists();
        assert_eq!(vm.error_message(), None);
    }

    #[test]
    fn deleting_a_stale_task_reports_not_found() {
        let (shared, _) = seeded_repository();
        let mut vm = TaskListViewModel::new(shared);
        vm.load_lists();
        let task = vm.lists()[0].tasks[0].clone();

        vm.delete_task(&task);
        vm.delete_task(&task);

        assert_eq!(
            vm.error_message(),
            Some(format!("Task not found: {}", task.id).as_str())
        );
    }

    #[test]
    fn adding_to_a_deleted_list_reports_list_not_found() {
        let (shared, _) = repository();
        let mut vm = TaskListViewModel::new(shared);
        let ghost = TaskList {
            id: Uuid::new_v4(),
            name: "Ghost".into(),
            category: Category::Work,
            tasks: Vec::new(),
        };
        vm.add_task(&ghost, new_task("Boo", 0));
        assert!(vm.error_message().unwrap().starts_with("List not found"));
    }
}
