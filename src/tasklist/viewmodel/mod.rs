//! # View Models
//!
//! View models hold presentation state for a client (the CLI today) and are the
//! only place where errors stop propagating.
//!
//! ## State
//!
//! Each view model publishes a [`ViewState`]:
//!
//! ```text
//! Idle ──load──▶ Loading ──▶ Loaded(data)
//!                       └──▶ Failed(message)
//! ```
//!
//! The cycle restarts on every load and every action. State is available both by
//! polling (`state()`) and by subscribing (`subscribe()`, a `tokio::sync::watch`
//! receiver that works without a runtime).
//!
//! ## Actions
//!
//! Every mutating action calls its use case and then reloads everything from the
//! repository. There is no optimistic or incremental patching.
//!
//! A failed action or load:
//! - stores a display message in `error_message()` and publishes `Failed`
//! - keeps the previously loaded data readable through the accessor
//! - never returns the error and never retries

use crate::error::TaskError;
use tokio::sync::watch;
use tracing::debug;

pub mod agenda;
pub mod detail;
pub mod lists;

pub use agenda::AgendaViewModel;
pub use detail::TaskDetailViewModel;
pub use lists::{NewTask, TaskListViewModel};

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loaded(&self) -> bool {
        matches!(self, ViewState::Loaded(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Current state plus its broadcast channel.
pub(crate) struct StateCell<T> {
    sender: watch::Sender<ViewState<T>>,
    error_message: Option<String>,
}

impl<T: Clone> StateCell<T> {
    pub(crate) fn new() -> Self {
        let (sender, _) = watch::channel(ViewState::Idle);
        Self {
            sender,
            error_message: None,
        }
    }

    pub(crate) fn state(&self) -> ViewState<T> {
        self.sender.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<ViewState<T>> {
        self.sender.subscribe()
    }

    pub(crate) fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub(crate) fn loading(&mut self) {
        self.sender.send_replace(ViewState::Loading);
    }

    pub(crate) fn loaded(&mut self, data: T) {
        self.error_message = None;
        self.sender.send_replace(ViewState::Loaded(data));
    }

    pub(crate) fn failed(&mut self, error: &TaskError) {
        let message = error.user_message();
        debug!(%message, "view model action failed");
        self.error_message = Some(message.clone());
        self.sender.send_replace(ViewState::Failed(message));
    }
}
