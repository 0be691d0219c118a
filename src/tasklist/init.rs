use crate::config::{BackendKind, TaskConfig};
use crate::error::{Result, TaskError};
use crate::repository::{SharedRepository, StoreRepository};
use crate::source::TaskDataSource;
use crate::store::fs_backend::FsBackend;
use crate::store::mem_backend::MemBackend;
use crate::store::{Backend, EntityStore, StorageBackend};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// Overrides the data directory when set.
pub const HOME_ENV: &str = "TASKLIST_HOME";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPaths {
    /// Holds config.json and the store file.
    pub data_dir: PathBuf,
}

impl TaskPaths {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Use `home` when given, otherwise the platform data directory.
    pub fn resolve(home: Option<PathBuf>) -> Result<Self> {
        if let Some(home) = home {
            return Ok(Self::new(home));
        }
        let dirs = ProjectDirs::from("com", "tasklist", "tasklist").ok_or_else(|| {
            TaskError::Api(format!(
                "Could not determine a data directory; set {} or pass --home",
                HOME_ENV
            ))
        })?;
        Ok(Self::new(dirs.data_dir().to_path_buf()))
    }
}

pub struct TaskContext {
    pub repository: SharedRepository,
    pub config: TaskConfig,
    pub paths: TaskPaths,
}

/// Wire backend, store, data source and repository according to `config`.
pub fn open_repository(paths: &TaskPaths, config: &TaskConfig) -> Result<SharedRepository> {
    let backend: Backend = match config.backend {
        BackendKind::File => FsBackend::new(paths.data_dir.clone())
            .with_file_name(&config.data_file)
            .into(),
        BackendKind::Memory => MemBackend::new().into(),
    };
    debug!(location = %backend.location(), seed = config.seed, "opening store");

    let source = TaskDataSource::new(EntityStore::with_backend(backend));
    let repository = if config.seed {
        StoreRepository::new(source)
    } else {
        StoreRepository::unseeded(source)
    };
    Ok(Arc::new(repository))
}

pub fn initialize(home: Option<PathBuf>) -> Result<TaskContext> {
    let paths = TaskPaths::resolve(home)?;
    let config = TaskConfig::load(&paths.data_dir)?;
    let repository = open_repository(&paths, &config)?;
    Ok(TaskContext {
        repository,
        config,
        paths,
    })
}
