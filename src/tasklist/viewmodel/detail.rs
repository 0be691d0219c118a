use super::{StateCell, ViewState};
use crate::model::Task;
use crate::repository::SharedRepository;
use crate::usecases::{GetTaskById, UpdateTaskStatus};
use tokio::sync::watch;
use uuid::Uuid;

/// State for a single task. `Loaded(None)` means the task no longer exists.
pub struct TaskDetailViewModel {
    task_id: Uuid,
    get_task: GetTaskById,
    update_status: UpdateTaskStatus,
    task: Option<Task>,
    state: StateCell<Option<Task>>,
}

impl TaskDetailViewModel {
    pub fn new(repository: SharedRepository, task_id: Uuid) -> Self {
        Self {
            task_id,
            get_task: GetTaskById::new(repository.clone()),
            update_status: UpdateTaskStatus::new(repository),
            task: None,
            state: StateCell::new(),
        }
    }

    pub fn task_id(&self) -> Uuid {
        self.task_id
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    pub fn state(&self) -> ViewState<Option<Task>> {
        self.state.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Option<Task>>> {
        self.state.subscribe()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn load_task(&mut self) {
        self.state.loading();
        match self.get_task.execute(&self.task_id) {
            Ok(task) => {
                self.task = task.clone();
                self.state.loaded(task);
            }
            Err(e) => self.state.failed(&e),
        }
    }

    /// Flip completion and reload. Does nothing before a task is loaded.
    pub fn toggle_status(&mut self) {
        let Some(task) = &self.task else {
            return;
        };
        let mut updated = task.clone();
        updated.status = task.status.toggled();

        self.state.loading();
        match self.update_status.execute(&updated) {
            Ok(()) => self.load_task(),
            Err(e) => self.state.failed(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use crate::repository::TaskListRepository;
    use crate::viewmodel::test_support::seeded_repository;

    fn first_task(repo: &SharedRepository) -> Task {
        repo.fetch_tasks().unwrap().remove(0)
    }

    #[test]
    fn loads_and_toggles() {
        let (shared, _) = seeded_repository();
        let task = first_task(&shared);
        assert_eq!(task.status, TaskStatus::Pending);

        let mut vm = TaskDetailViewModel::new(shared, task.id);
        assert!(vm.task().is_none());
        vm.load_task();
        assert_eq!(vm.task(), Some(&task));

        vm.toggle_status();
        assert_eq!(vm.task().unwrap().status, TaskStatus::Completed);
        assert_eq!(vm.state(), ViewState::Loaded(vm.task().cloned()));
    }

    #[test]
    fn missing_task_loads_as_none() {
        let (shared, _) = seeded_repository();
        let mut vm = TaskDetailViewModel::new(shared, Uuid::new_v4());
        vm.load_task();
        assert_eq!(vm.state(), ViewState::Loaded(None));
        assert_eq!(vm.error_message(), None);

        // Nothing to toggle.
        vm.toggle_status();
        assert_eq!(vm.state(), ViewState::Loaded(None));
    }

    #[test]
    fn toggle_after_delete_reports_not_found() {
        let (shared, _) = seeded_repository();
        let task = first_task(&shared);
        let mut vm = TaskDetailViewModel::new(shared.clone(), task.id);
        vm.load_task();

        shared.delete_task(&task.id).unwrap();
        vm.toggle_status();

        assert_eq!(
            vm.error_message(),
            Some(format!("Task not found: {}", task.id).as_str())
        );
        assert_eq!(vm.task(), Some(&task));
    }

    #[test]
    fn write_failure_keeps_the_loaded_task() {
        let (shared, repo) = seeded_repository();
        let task = first_task(&shared);
        let mut vm = TaskDetailViewModel::new(shared, task.id);
        vm.load_task();

        repo.source().store().backend().set_simulate_write_error(true);
        vm.toggle_status();

        assert!(vm.state().error().is_some());
        assert_eq!(vm.task().unwrap().status, TaskStatus::Pending);
    }
}
