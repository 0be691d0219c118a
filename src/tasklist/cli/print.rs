use chrono::{DateTime, Utc};
use colored::Colorize;
use tasklist::index::{list_label, task_label};
use tasklist::model::{Task, TaskList, TaskStatus};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const DUE_WIDTH: usize = 12;

pub(super) fn print_success(message: &str) {
    println!("{}", message.green());
}

pub(super) fn print_error(message: &str) {
    eprintln!("{}", message.red());
}

pub(super) fn print_lists(lists: &[TaskList]) {
    if lists.is_empty() {
        println!("No lists yet. Create one with `tl add-list <name>`.");
        return;
    }

    let now = Utc::now();
    for (i, list) in lists.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!(
            "{} {} {}",
            format!("{}.", list_label(i)).yellow(),
            list.name.bold(),
            format!("[{}] {} pending", list.category, list.pending_count()).dimmed()
        );
        if list.tasks.is_empty() {
            println!("    {}", "(no tasks)".dimmed());
        }
        for (j, task) in list.tasks.iter().enumerate() {
            print_task_line(&task_label(i, j), task, None, now);
        }
    }
}

/// Each entry is a position label, the owning list's name, and the task.
pub(super) fn print_agenda(tasks: &[(String, String, Task)]) {
    if tasks.is_empty() {
        println!("Nothing due.");
        return;
    }
    let now = Utc::now();
    for (label, list_name, task) in tasks {
        print_task_line(label, task, Some(list_name.as_str()), now);
    }
}

pub(super) fn print_task(label: &str, list_name: &str, task: &Task) {
    let now = Utc::now();
    println!("{} {}", label.yellow(), task.title.bold());
    println!("--------------------------------");
    println!("{:<10}{}", "List:", list_name);
    println!("{:<10}{}", "Status:", status_text(task.status));
    println!("{:<10}{}", "Category:", task.category);
    println!(
        "{:<10}{} ({})",
        "Due:",
        task.due_date.format("%Y-%m-%d %H:%M UTC"),
        format_due(task.due_date, now)
    );
    println!("{:<10}{}", "Icon:", task.icon_name);
    println!("{:<10}{}", "Id:", task.id.to_string().dimmed());
    if !task.details.is_empty() {
        println!();
        println!("{}", task.details);
    }
}

pub(super) fn print_config(entries: &[(&str, String)]) {
    for (key, value) in entries {
        println!("{} = {}", key, value);
    }
}

fn print_task_line(label: &str, task: &Task, list_name: Option<&str>, now: DateTime<Utc>) {
    let prefix = format!("    {:<6} {} ", label, status_marker(task.status));
    let suffix = match list_name {
        Some(name) => format!(" {}", name),
        None => String::new(),
    };
    let due = format!("{:>width$}", format_due(task.due_date, now), width = DUE_WIDTH);

    let fixed = prefix.width() + suffix.width() + DUE_WIDTH;
    let available = LINE_WIDTH.saturating_sub(fixed);
    let title = truncate_to_width(&task.title, available);
    let padding = available.saturating_sub(title.width());

    let title = match task.status {
        TaskStatus::Completed => title.dimmed().strikethrough(),
        TaskStatus::InProgress => title.cyan(),
        TaskStatus::Pending => title.normal(),
    };
    let due = if task.due_date < now && !task.status.is_completed() {
        due.red()
    } else {
        due.dimmed()
    };

    println!(
        "{}{}{}{}{}",
        prefix,
        title,
        " ".repeat(padding),
        due,
        suffix.dimmed()
    );
}

fn status_marker(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Completed => "[x]",
    }
}

fn status_text(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in progress",
        TaskStatus::Completed => "completed",
    }
}

/// Calendar-day distance between `due` and `now`, in words.
fn format_due(due: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (due.date_naive() - now.date_naive()).num_days();
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        2..=13 => format!("in {} days", days),
        -13..=-2 => format!("{} days ago", -days),
        _ => due.format("%Y-%m-%d").to_string(),
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
