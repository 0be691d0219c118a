use crate::error::{Result, TaskError};
use crate::store::fs_backend::DEFAULT_DATA_FILE;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

const CONFIG_FILENAME: &str = "config.json";

/// Keys accepted by [`TaskConfig::get`] and [`TaskConfig::set`].
pub const CONFIG_KEYS: [&str; 3] = ["backend", "data-file", "seed"];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    File,
    /// Nothing survives the process. Useful for trying things out.
    Memory,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "file" => Ok(BackendKind::File),
            "memory" => Ok(BackendKind::Memory),
            other => Err(TaskError::Api(format!(
                "Unknown backend '{}' (expected file or memory)",
                other
            ))),
        }
    }
}

/// Configuration for tasklist, stored as config.json in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct TaskConfig {
    #[serde(default)]
    pub backend: BackendKind,

    /// Store file name, relative to the data directory.
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// Insert sample lists into an empty store on startup.
    #[serde(default = "default_seed")]
    pub seed: bool,
}

fn default_data_file() -> String {
    DEFAULT_DATA_FILE.to_string()
}

fn default_seed() -> bool {
    true
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::default(),
            data_file: default_data_file(),
            seed: default_seed(),
        }
    }
}

impl TaskConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "backend" => Ok(self.backend.to_string()),
            "data-file" => Ok(self.data_file.clone()),
            "seed" => Ok(self.seed.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "backend" => self.backend = value.parse()?,
            "data-file" => {
                let value = value.trim();
                if value.is_empty() || value.contains(['/', '\\']) {
                    return Err(TaskError::Api(format!(
                        "Invalid data file name '{}'",
                        value
                    )));
                }
                self.data_file = value.to_string();
            }
            "seed" => {
                self.seed = value
                    .parse()
                    .map_err(|_| TaskError::Api(format!("Expected true or false, got '{}'", value)))?
            }
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }
}

fn unknown_key(key: &str) -> TaskError {
    TaskError::Api(format!(
        "Unknown config key '{}' (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
