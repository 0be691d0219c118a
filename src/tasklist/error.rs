use thiserror::Error;
use uuid::Uuid;

/// Shown to the user when an error carries no description of its own.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Error, Debug)]
pub enum TaskError {
    #[error("List not found: {0}")]
    ListNotFound(Uuid),

    #[error("Task not found: {0}")]
    TaskNotFound(Uuid),

    #[error("A list with id {0} already exists")]
    ListAlreadyExists(Uuid),

    #[error("A task with id {0} already exists")]
    TaskAlreadyExists(Uuid),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("{0}")]
    Api(String),

    #[error("{}", UNKNOWN_ERROR_MESSAGE)]
    Unknown,
}

impl TaskError {
    /// True for failures of the backing store itself (I/O, encoding, backend).
    pub fn is_storage_failure(&self) -> bool {
        matches!(
            self,
            TaskError::Io(_) | TaskError::Serialization(_) | TaskError::Store(_)
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, TaskError::ListNotFound(_) | TaskError::TaskNotFound(_))
    }

    /// Display string for view models, never empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            UNKNOWN_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_storage_failures() {
        let io = TaskError::Io(std::io::Error::other("disk gone"));
        assert!(io.is_storage_failure());
        assert!(TaskError::Store("boom".into()).is_storage_failure());
        assert!(!TaskError::ListNotFound(Uuid::new_v4()).is_storage_failure());
        assert!(!TaskError::Unknown.is_storage_failure());
    }

    #[test]
    fn empty_description_falls_back_to_unknown() {
        assert_eq!(TaskError::Api(String::new()).user_message(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(TaskError::Api("  ".into()).user_message(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(TaskError::Unknown.user_message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn not_found_message_names_the_id() {
        let id = Uuid::new_v4();
        let message = TaskError::TaskNotFound(id).user_message();
        assert_eq!(message, format!("Task not found: {}", id));
    }
}
