use super::{StateCell, ViewState};
use crate::model::Task;
use crate::repository::SharedRepository;
use crate::usecases::{DeleteTask, FetchTasks, UpdateTaskStatus};
use tokio::sync::watch;

/// Every task across all lists, soonest due first.
pub struct AgendaViewModel {
    fetch_tasks: FetchTasks,
    delete_task: DeleteTask,
    update_status: UpdateTaskStatus,
    tasks: Vec<Task>,
    state: StateCell<Vec<Task>>,
}

impl AgendaViewModel {
    pub fn new(repository: SharedRepository) -> Self {
        Self {
            fetch_tasks: FetchTasks::new(repository.clone()),
            delete_task: DeleteTask::new(repository.clone()),
            update_status: UpdateTaskStatus::new(repository),
            tasks: Vec::new(),
            state: StateCell::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn state(&self) -> ViewState<Vec<Task>> {
        self.state.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<Vec<Task>>> {
        self.state.subscribe()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.state.error_message()
    }

    pub fn load(&mut self) {
        self.state.loading();
        match self.fetch_tasks.execute() {
            Ok(tasks) => {
                self.tasks = tasks.clone();
                self.state.loaded(tasks);
            }
            Err(e) => self.state.failed(&e),
        }
    }

    /// Delete the task at `offset` in `tasks()`. Out-of-range offsets are ignored.
    pub fn delete(&mut self, offset: usize) {
        let Some(id) = self.tasks.get(offset).map(|t| t.id) else {
            return;
        };
        self.state.loading();
        match self.delete_task.execute(&id) {
            Ok(()) => self.load(),
            Err(e) => self.state.failed(&e),
        }
    }

    pub fn toggle_status(&mut self, offset: usize) {
        let Some(task) = self.tasks.get(offset) else {
            return;
        };
        let mut updated = task.clone();
        updated.status = task.status.toggled();

        self.state.loading();
        match self.update_status.execute(&updated) {
            Ok(()) => self.load(),
            Err(e) => self.state.failed(&e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TaskStatus;
    use crate::viewmodel::test_support::seeded_repository;

    #[test]
    fn load_orders_by_due_date() {
        let (shared, _) = seeded_repository();
        let mut vm = AgendaViewModel::new(shared);
        vm.load();

        let titles: Vec<_> = vm.tasks().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Plan the week", "Take an evening walk", "Review open pull requests"]
        );
        assert!(vm.state().is_loaded());
    }

    #[test]
    fn delete_and_toggle_by_offset() {
        let (shared, _) = seeded_repository();
        let mut vm = AgendaViewModel::new(shared);
        vm.load();

        vm.toggle_status(0);
        assert_eq!(vm.tasks()[0].status, TaskStatus::Completed);

        vm.delete(2);
        assert_eq!(vm.tasks().len(), 2);
        assert!(vm.tasks().iter().all(|t| t.title != "Review open pull requests"));
    }

    #[test]
    fn out_of_range_offsets_are_ignored() {
        let (shared, _) = seeded_repository();
        let mut vm = AgendaViewModel::new(shared);
        vm.load();

        vm.delete(10);
        vm.toggle_status(10);

        assert_eq!(vm.tasks().len(), 3);
        assert_eq!(vm.error_message(), None);
    }

    #[test]
    fn failed_delete_keeps_tasks() {
        let (shared, repo) = seeded_repository();
        let mut vm = AgendaViewModel::new(shared);
        vm.load();

        repo.source().store().backend().set_simulate_write_error(true);
        vm.delete(0);

        assert_eq!(vm.tasks().len(), 3);
        assert!(vm.error_message().unwrap().contains("Simulated write error"));
    }
}
