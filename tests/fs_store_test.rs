use chrono::{Duration, Utc};
use std::fs;
use std::sync::Arc;
use std::thread;
use tasklist::error::TaskError;
use tasklist::model::{Category, Task, TaskList, TaskStatus};
use tasklist::repository::{StoreRepository, TaskListRepository};
use tasklist::source::TaskDataSource;
use tasklist::store::backend::StorageBackend;
use tasklist::store::fs_backend::FsBackend;
use tasklist::store::{EntityStore, RecordKind, Snapshot};
use tempfile::TempDir;

fn setup() -> (TempDir, FsBackend) {
    let dir = TempDir::new().unwrap();
    let backend = FsBackend::new(dir.path().to_path_buf());
    (dir, backend)
}

fn repository(dir: &TempDir) -> StoreRepository<FsBackend> {
    let backend = FsBackend::new(dir.path().to_path_buf());
    StoreRepository::unseeded(TaskDataSource::new(EntityStore::with_backend(backend)))
}

fn assert_no_tmp_files(dir: &TempDir) {
    for entry in fs::read_dir(dir.path()).unwrap() {
        let path = entry.unwrap().path();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(!name.ends_with(".tmp"), "Found leftover tmp file: {}", name);
    }
}

#[test]
fn test_missing_and_blank_files_load_empty() {
    let (dir, backend) = setup();
    assert!(backend.load().unwrap().is_empty());

    fs::write(dir.path().join("tasks.json"), "  \n").unwrap();
    assert!(backend.load().unwrap().is_empty());
}

#[test]
fn test_save_is_atomic_and_leaves_no_artifacts() {
    let (dir, backend) = setup();
    let store = EntityStore::with_backend(backend);
    let list = TaskList::new("Work".into(), Category::Work);
    let repo = StoreRepository::unseeded(TaskDataSource::new(store));
    repo.add_list(&list).unwrap();

    let on_disk = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(on_disk.contains("\"category\": \"work\""));
    assert_no_tmp_files(&dir);
}

#[test]
fn test_save_creates_missing_root() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    let backend = FsBackend::new(nested.clone()).with_file_name("custom.json");

    backend.save(&Snapshot::default()).unwrap();

    assert!(nested.join("custom.json").exists());
    assert_eq!(backend.location(), nested.join("custom.json").display().to_string());
}

#[test]
fn test_failed_save_removes_tmp_file() {
    let (dir, backend) = setup();
    // A non-empty directory where the data file should be makes the rename fail.
    let blocker = dir.path().join("tasks.json");
    fs::create_dir(&blocker).unwrap();
    fs::write(blocker.join("keep"), "x").unwrap();

    let result = backend.save(&Snapshot::default());

    assert!(matches!(result, Err(TaskError::Io(_))));
    assert_no_tmp_files(&dir);
}

#[test]
fn test_corrupt_file_is_a_serialization_error() {
    let (dir, backend) = setup();
    fs::write(dir.path().join("tasks.json"), "{\"lists\": [").unwrap();
    assert!(matches!(backend.load(), Err(TaskError::Serialization(_))));
}

#[test]
fn test_data_survives_reopening() {
    let dir = TempDir::new().unwrap();
    let list = TaskList::new("Errands".into(), Category::Errands);
    let task = Task::new(
        list.id,
        "Return library books".into(),
        "Due at the front desk".into(),
        Utc::now() + Duration::days(2),
        Category::Errands,
    )
    .with_status(TaskStatus::InProgress);

    {
        let repo = repository(&dir);
        repo.add_list(&list).unwrap();
        repo.add_task(&task).unwrap();
    }

    let reopened = repository(&dir);
    assert_eq!(reopened.get_task(&task.id).unwrap(), Some(task.clone()));
    let lists = reopened.fetch_lists().unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].tasks, vec![task]);
}

#[test]
fn test_list_delete_cascades_on_disk() {
    let dir = TempDir::new().unwrap();
    let repo = repository(&dir);
    let list = TaskList::new("Trip".into(), Category::Planning);
    repo.add_list(&list).unwrap();
    for title in ["Book hotel", "Pack"] {
        let task = Task::new(list.id, title.into(), String::new(), Utc::now(), Category::Planning);
        repo.add_task(&task).unwrap();
    }

    repo.delete_list(&list.id).unwrap();

    let reopened = repository(&dir);
    assert!(reopened.fetch_lists().unwrap().is_empty());
    assert!(reopened.fetch_tasks().unwrap().is_empty());
    assert_eq!(
        reopened.source().store().count(RecordKind::Task).unwrap(),
        0
    );
}

#[test]
fn test_unknown_tags_are_skipped_but_kept_on_disk() {
    let dir = TempDir::new().unwrap();
    let list_id = uuid::Uuid::new_v4();
    let raw = format!(
        r#"{{
  "lists": [{{ "id": "{list_id}", "name": "Old", "category": "work" }}],
  "tasks": [
    {{ "id": "{}", "listId": "{list_id}", "iconName": "star", "title": "from the future",
       "details": "", "dueDate": "2030-01-01T00:00:00Z", "status": "archived", "category": "work" }},
    {{ "id": "{}", "listId": "{list_id}", "iconName": "star", "title": "fine",
       "details": "", "dueDate": "2030-01-02T00:00:00Z", "status": "pending", "category": "work" }}
  ]
}}"#,
        uuid::Uuid::new_v4(),
        uuid::Uuid::new_v4()
    );
    fs::write(dir.path().join("tasks.json"), raw).unwrap();

    let repo = repository(&dir);
    let (lists, report) = repo.fetch_lists_with_report().unwrap();
    assert_eq!(lists[0].tasks.len(), 1);
    assert_eq!(report.dropped_tasks, 1);

    // An unrelated write keeps the unreadable record.
    repo.add_list(&TaskList::new("New".into(), Category::Study))
        .unwrap();
    let on_disk = fs::read_to_string(dir.path().join("tasks.json")).unwrap();
    assert!(on_disk.contains("\"archived\""));
}

#[test]
fn test_concurrent_writers_lose_nothing() {
    let dir = TempDir::new().unwrap();
    let repo = Arc::new(repository(&dir));
    let list = TaskList::new("Shared".into(), Category::Work);
    repo.add_list(&list).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let repo = Arc::clone(&repo);
            let list_id = list.id;
            thread::spawn(move || {
                let task = Task::new(
                    list_id,
                    format!("task {}", i),
                    String::new(),
                    Utc::now() + Duration::minutes(i),
                    Category::Work,
                );
                repo.add_task(&task).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(repository(&dir).fetch_tasks().unwrap().len(), 8);
    assert_no_tmp_files(&dir);
}
