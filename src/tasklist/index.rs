//! User-facing selectors for lists and tasks.
//!
//! Lists are numbered from 1 in fetch order (name, then id). Tasks are
//! numbered from 1 within their list in the same order they are displayed, so
//! `2.1` is the first task of the second list. Numbers are only stable until
//! the next mutation; a full UUID always works.

use crate::error::{Result, TaskError};
use crate::model::{Task, TaskList};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Selector {
    List(usize),
    Task(usize, usize),
    Id(Uuid),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::List(i) => write!(f, "{}", i),
            Selector::Task(l, t) => write!(f, "{}.{}", l, t),
            Selector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for Selector {
    type Err = TaskError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(Selector::Id(id));
        }

        let invalid = || TaskError::Api(format!("Invalid selector '{}'", s));
        let position = |part: &str| -> Result<usize> {
            match part.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(invalid()),
            }
        };

        match s.split_once('.') {
            Some((list, task)) => Ok(Selector::Task(position(list)?, position(task)?)),
            None => Ok(Selector::List(position(s)?)),
        }
    }
}

/// Position label for the list at zero-based `offset`.
pub fn list_label(offset: usize) -> String {
    Selector::List(offset + 1).to_string()
}

pub fn task_label(list_offset: usize, task_offset: usize) -> String {
    Selector::Task(list_offset + 1, task_offset + 1).to_string()
}

pub fn resolve_list<'a>(lists: &'a [TaskList], selector: &Selector) -> Result<&'a TaskList> {
    match selector {
        Selector::List(i) => i
            .checked_sub(1)
            .and_then(|offset| lists.get(offset))
            .ok_or_else(|| TaskError::Api(format!("No list at position {}", i))),
        Selector::Id(id) => lists
            .iter()
            .find(|l| l.id == *id)
            .ok_or(TaskError::ListNotFound(*id)),
        Selector::Task(..) => Err(TaskError::Api(format!(
            "'{}' selects a task, expected a list",
            selector
        ))),
    }
}

pub fn resolve_task<'a>(lists: &'a [TaskList], selector: &Selector) -> Result<&'a Task> {
    match selector {
        Selector::Task(l, t) => {
            let list = resolve_list(lists, &Selector::List(*l))?;
            t.checked_sub(1)
                .and_then(|offset| list.tasks.get(offset))
                .ok_or_else(|| TaskError::Api(format!("No task at position {}", selector)))
        }
        Selector::Id(id) => lists
            .iter()
            .flat_map(|l| l.tasks.iter())
            .find(|t| t.id == *id)
            .ok_or(TaskError::TaskNotFound(*id)),
        Selector::List(_) => Err(TaskError::Api(format!(
            "'{}' selects a list, expected a task like {}.1",
            selector, selector
        ))),
    }
}
