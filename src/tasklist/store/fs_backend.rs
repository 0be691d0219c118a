use super::backend::StorageBackend;
use super::record::Snapshot;
use crate::error::{Result, TaskError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

pub const DEFAULT_DATA_FILE: &str = "tasks.json";

/// Flat-file backend: the whole store is one JSON document.
pub struct FsBackend {
    root: PathBuf,
    file_name: String,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_name: DEFAULT_DATA_FILE.to_string(),
        }
    }

    pub fn with_file_name(mut self, name: &str) -> Self {
        self.file_name = name.to_string();
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(&self.file_name)
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(TaskError::Io)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load(&self) -> Result<Snapshot> {
        let data_file = self.data_file();
        if !data_file.exists() {
            return Ok(Snapshot::default());
        }
        let content = fs::read_to_string(&data_file).map_err(TaskError::Io)?;
        if content.trim().is_empty() {
            return Ok(Snapshot::default());
        }
        let snapshot: Snapshot =
            serde_json::from_str(&content).map_err(TaskError::Serialization)?;
        Ok(snapshot)
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.ensure_dir(&self.root)?;

        let content = serde_json::to_string_pretty(snapshot).map_err(TaskError::Serialization)?;

        // Atomic replace
        let tmp_file = self.root.join(format!(".tasks-{}.tmp", Uuid::new_v4()));
        let written = fs::write(&tmp_file, content)
            .and_then(|()| fs::rename(&tmp_file, self.data_file()));
        if let Err(e) = written {
            // A partial write or a failed rename both leave the tmp file.
            let _ = fs::remove_file(&tmp_file);
            return Err(TaskError::Io(e));
        }

        debug!(
            path = %self.data_file().display(),
            lists = snapshot.lists.len(),
            tasks = snapshot.tasks.len(),
            "store saved"
        );
        Ok(())
    }

    fn location(&self) -> String {
        self.data_file().display().to_string()
    }
}
