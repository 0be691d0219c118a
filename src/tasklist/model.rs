use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Thematic grouping shared by lists and tasks.
///
/// A task's category is independent of the category of the list it lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Work,
    Personal,
    Family,
    Hobby,
    Study,
    Planning,
    Review,
    Wellness,
    Errands,
    Learning,
    Shopping,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Work,
        Category::Personal,
        Category::Family,
        Category::Hobby,
        Category::Study,
        Category::Planning,
        Category::Review,
        Category::Wellness,
        Category::Errands,
        Category::Learning,
        Category::Shopping,
    ];

    /// The persisted string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Family => "family",
            Category::Hobby => "hobby",
            Category::Study => "study",
            Category::Planning => "planning",
            Category::Review => "review",
            Category::Wellness => "wellness",
            Category::Errands => "errands",
            Category::Learning => "learning",
            Category::Shopping => "shopping",
        }
    }

    /// Icon used for new tasks when the caller does not pick one.
    pub fn default_icon(&self) -> &'static str {
        match self {
            Category::Work => "briefcase",
            Category::Personal => "person",
            Category::Family => "house",
            Category::Hobby => "paintpalette",
            Category::Study => "graduationcap",
            Category::Planning => "calendar",
            Category::Review => "checkmark.seal",
            Category::Wellness => "heart",
            Category::Errands => "cart",
            Category::Learning => "book",
            Category::Shopping => "bag",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Unknown category: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "inProgress",
            TaskStatus::Completed => "completed",
        }
    }

    /// Completed tasks reopen as pending; anything else becomes completed.
    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Completed => TaskStatus::Pending,
            TaskStatus::Pending | TaskStatus::InProgress => TaskStatus::Completed,
        }
    }

    pub fn is_completed(&self) -> bool {
        *self == TaskStatus::Completed
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "inProgress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            _ => Err(format!("Unknown status: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub list_id: Uuid,
    pub icon_name: String,
    pub title: String,
    pub details: String,
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub category: Category,
}

impl Task {
    /// A pending task with a fresh id and the category's default icon.
    pub fn new(
        list_id: Uuid,
        title: String,
        details: String,
        due_date: DateTime<Utc>,
        category: Category,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            list_id,
            icon_name: category.default_icon().to_string(),
            title,
            details,
            due_date,
            status: TaskStatus::Pending,
            category,
        }
    }

    pub fn with_icon(mut self, icon_name: impl Into<String>) -> Self {
        self.icon_name = icon_name.into();
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskList {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub tasks: Vec<Task>,
}

impl TaskList {
    pub fn new(name: String, category: Category) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            category,
            tasks: Vec::new(),
        }
    }

    pub fn pending_count(&self) -> usize {
        self.tasks.iter().filter(|t| !t.status.is_completed()).count()
    }
}
