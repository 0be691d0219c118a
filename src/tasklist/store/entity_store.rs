use super::backend::StorageBackend;
use super::record::{ListRecord, RecordKind, Snapshot, TaskRecord};
use crate::error::Result;
use parking_lot::Mutex;
use tracing::debug;
use uuid::Uuid;

pub struct EntityStore<B: StorageBackend> {
    backend: B,
    /// Serializes every load-modify-save cycle issued through this instance.
    write_queue: Mutex<()>,
}

impl<B: StorageBackend> EntityStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            write_queue: Mutex::new(()),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// All lists, sorted by name ascending.
    pub fn lists(&self) -> Result<Vec<ListRecord>> {
        let mut lists = self.backend.load()?.lists;
        lists.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(lists)
    }

    /// All tasks, sorted by due date ascending.
    pub fn tasks(&self) -> Result<Vec<TaskRecord>> {
        let mut tasks = self.backend.load()?.tasks;
        sort_by_due_date(&mut tasks);
        Ok(tasks)
    }

    /// Lists and tasks read from a single load, in the same orders as
    /// [`EntityStore::lists`] and [`EntityStore::tasks`].
    pub fn snapshot(&self) -> Result<Snapshot> {
        let mut snapshot = self.backend.load()?;
        snapshot
            .lists
            .sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        sort_by_due_date(&mut snapshot.tasks);
        Ok(snapshot)
    }

    pub fn list(&self, id: &Uuid) -> Result<Option<ListRecord>> {
        Ok(self.backend.load()?.list(id).cloned())
    }

    pub fn task(&self, id: &Uuid) -> Result<Option<TaskRecord>> {
        Ok(self.backend.load()?.task(id).cloned())
    }

    pub fn count(&self, kind: RecordKind) -> Result<usize> {
        Ok(self.backend.load()?.count(kind))
    }

    pub fn insert_list(&self, record: ListRecord) -> Result<()> {
        self.transaction(|snapshot| {
            snapshot.upsert_list(record);
            Ok(())
        })
    }

    pub fn insert_task(&self, record: TaskRecord) -> Result<()> {
        self.transaction(|snapshot| {
            snapshot.upsert_task(record);
            Ok(())
        })
    }

    /// Delete a record by id. Deleting a list cascades to its tasks.
    pub fn delete(&self, kind: RecordKind, id: &Uuid) -> Result<()> {
        let cascaded = self.transaction(|snapshot| snapshot.remove(kind, id))?;
        debug!(%kind, %id, cascaded, "record deleted");
        Ok(())
    }

    /// Run `f` against freshly loaded contents and persist the result.
    ///
    /// Writers are serialized; if `f` fails nothing is written.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Snapshot) -> Result<T>,
    {
        let _guard = self.write_queue.lock();
        let mut snapshot = self.backend.load()?;
        let out = f(&mut snapshot)?;
        self.backend.save(&snapshot)?;
        Ok(out)
    }

    /// Insert the factory's records if the store holds no lists.
    ///
    /// The count check and the insert happen under one write lock.
    /// Returns whether anything was inserted.
    pub fn seed_if_empty<F>(&self, factory: F) -> Result<bool>
    where
        F: FnOnce() -> (Vec<ListRecord>, Vec<TaskRecord>),
    {
        let _guard = self.write_queue.lock();
        let mut snapshot = self.backend.load()?;
        if snapshot.count(RecordKind::List) > 0 {
            return Ok(false);
        }

        let (lists, tasks) = factory();
        debug!(
            lists = lists.len(),
            tasks = tasks.len(),
            location = %self.backend.location(),
            "seeding empty store"
        );
        for list in lists {
            snapshot.upsert_list(list);
        }
        for task in tasks {
            snapshot.upsert_task(task);
        }
        self.backend.save(&snapshot)?;
        Ok(true)
    }
}

fn sort_by_due_date(tasks: &mut [TaskRecord]) {
    tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date).then_with(|| a.id.cmp(&b.id)));
}
