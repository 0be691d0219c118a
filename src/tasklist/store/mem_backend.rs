use super::backend::StorageBackend;
use super::record::Snapshot;
use crate::error::{Result, TaskError};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory storage backend, used for tests and throwaway sessions.
#[derive(Default)]
pub struct MemBackend {
    snapshot: RwLock<Snapshot>,
    simulate_write_error: AtomicBool,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from existing contents.
    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            simulate_write_error: AtomicBool::new(false),
        }
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.store(simulate, Ordering::SeqCst);
    }
}

impl StorageBackend for MemBackend {
    fn load(&self) -> Result<Snapshot> {
        Ok(self.snapshot.read().clone())
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if self.simulate_write_error.load(Ordering::SeqCst) {
            return Err(TaskError::Store("Simulated write error".to_string()));
        }
        *self.snapshot.write() = snapshot.clone();
        Ok(())
    }

    fn location(&self) -> String {
        "memory://tasks".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::store::record::{ListRecord, TaskRecord};
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    /// Builds raw snapshots, including rows the domain layer would reject.
    #[derive(Default)]
    pub struct SnapshotFixture {
        pub snapshot: Snapshot,
    }

    impl SnapshotFixture {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_list(mut self, name: &str, category: &str) -> Self {
            self.snapshot.lists.push(ListRecord {
                id: Uuid::new_v4(),
                name: name.to_string(),
                category: category.to_string(),
            });
            self
        }

        /// Adds a task to the most recently added list.
        pub fn with_task(mut self, title: &str, status: &str, category: &str, due_in_days: i64) -> Self {
            let list_id = self
                .snapshot
                .lists
                .last()
                .map(|l| l.id)
                .expect("with_task needs a list first");
            self.snapshot.tasks.push(TaskRecord {
                id: Uuid::new_v4(),
                list_id,
                icon_name: "star".to_string(),
                title: title.to_string(),
                details: String::new(),
                due_date: Utc::now() + Duration::days(due_in_days),
                status: status.to_string(),
                category: category.to_string(),
            });
            self
        }

        pub fn list_id(&self, name: &str) -> Uuid {
            self.snapshot
                .lists
                .iter()
                .find(|l| l.name == name)
                .map(|l| l.id)
                .expect("no list with that name")
        }

        pub fn task_id(&self, title: &str) -> Uuid {
            self.snapshot
                .tasks
                .iter()
                .find(|t| t.title == title)
                .map(|t| t.id)
                .expect("no task with that title")
        }

        pub fn backend(&self) -> MemBackend {
            MemBackend::with_snapshot(self.snapshot.clone())
        }
    }
}
