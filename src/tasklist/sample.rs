//! Sample data inserted into an empty store.

use crate::model::{Category, TaskStatus};
use crate::source::{TaskData, TaskListData};
use chrono::{Duration, Utc};
use uuid::Uuid;

pub const WORK_LIST_NAME: &str = "Work";
pub const PERSONAL_LIST_NAME: &str = "Personal";

/// Two lists: "Work" with two tasks and "Personal" with one.
pub fn sample_lists() -> Vec<TaskListData> {
    let today = Utc::now();

    let work = TaskListData {
        id: Uuid::new_v4(),
        name: WORK_LIST_NAME.to_string(),
        category_raw: Category::Work.as_str().to_string(),
        tasks: vec![
            sample_task(
                "tray.full",
                "Plan the week",
                "Block focus time and list the top three goals.",
                today + Duration::days(1),
                TaskStatus::Pending,
                Category::Planning,
            ),
            sample_task(
                "checkmark.circle.fill",
                "Review open pull requests",
                "Leave feedback on everything waiting for review.",
                today + Duration::days(3),
                TaskStatus::Completed,
                Category::Review,
            ),
        ],
    };

    let personal = TaskListData {
        id: Uuid::new_v4(),
        name: PERSONAL_LIST_NAME.to_string(),
        category_raw: Category::Personal.as_str().to_string(),
        tasks: vec![sample_task(
            "star",
            "Take an evening walk",
            "Thirty minutes outside, no phone.",
            today + Duration::days(2),
            TaskStatus::Pending,
            Category::Wellness,
        )],
    };

    vec![work, personal]
}

// The list link is filled in when the list is stored.
fn sample_task(
    icon: &str,
    title: &str,
    details: &str,
    due_date: chrono::DateTime<Utc>,
    status: TaskStatus,
    category: Category,
) -> TaskData {
    TaskData {
        id: Uuid::new_v4(),
        list_id: Uuid::nil(),
        list_name: String::new(),
        icon_name: icon.to_string(),
        title: title.to_string(),
        details: details.to_string(),
        due_date,
        status_raw: status.as_str().to_string(),
        category_raw: category.as_str().to_string(),
    }
}
