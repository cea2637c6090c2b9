//! UI state and the handlers button presses and worker events go through.

use crate::client::{ClientError, EMPTY_QUERY_MESSAGE};
use crate::movie::{render_details, ListName, MovieRecord};
use crate::worker::{WorkerCommand, WorkerEvent};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    fn new(kind: DialogKind, title: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.to_string(),
            message: message.into(),
        }
    }

    fn from_error(err: &ClientError) -> Self {
        if err.is_input() {
            Self::new(DialogKind::Warning, "Input Error", err.to_string())
        } else {
            Self::new(DialogKind::Error, "Error", err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub search_input: String,
    pub details: String,
    pub list_entries: Vec<String>,
    pub current_movie: Option<MovieRecord>,
    /// Query that produced `current_movie`.
    pub movie_query: Option<String>,
    pub dialog: Option<Dialog>,
    pub pending: usize,
    pub user_id: i64,
    pub status: String,
}

impl UiState {
    pub fn new(user_id: i64) -> Self {
        Self {
            search_input: String::new(),
            details: String::new(),
            list_entries: Vec::new(),
            current_movie: None,
            movie_query: None,
            dialog: None,
            pending: 0,
            user_id,
            status: "Ready".to_string(),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending > 0
    }

    pub fn submit_search(&mut self) -> Option<WorkerCommand> {
        let query = self.search_input.trim();
        if query.is_empty() {
            self.show_input_error(EMPTY_QUERY_MESSAGE);
            return None;
        }
        let cmd = WorkerCommand::Search {
            query: query.to_string(),
        };
        self.status = format!("Searching for '{}'...", query);
        self.pending += 1;
        Some(cmd)
    }

    pub fn submit_add_to_list(&mut self, list: ListName) -> Option<WorkerCommand> {
        if self.search_input.trim().is_empty() {
            self.show_input_error(EMPTY_QUERY_MESSAGE);
            return None;
        }
        let shown = self
            .current_movie
            .as_ref()
            .filter(|_| self.movie_query.as_deref() == Some(self.search_input.trim()));
        let Some(movie) = shown else {
            self.show_input_error("Search for a movie first.");
            return None;
        };
        self.status = format!("Adding '{}' to {}...", movie.title, list.label());
        let cmd = WorkerCommand::AddToList {
            user_id: self.user_id,
            movie_id: movie.id,
            list,
        };
        self.pending += 1;
        Some(cmd)
    }

    /// Called when a command could not be handed to the worker.
    pub fn command_rejected(&mut self, reason: impl Into<String>) {
        self.pending = self.pending.saturating_sub(1);
        let reason = reason.into();
        self.status = reason.clone();
        self.dialog = Some(Dialog::new(DialogKind::Error, "Error", reason));
    }

    pub fn apply_event(&mut self, event: WorkerEvent) {
        match event {
            WorkerEvent::SearchCompleted { query, result } => {
                self.pending = self.pending.saturating_sub(1);
                match result {
                    Ok(movie) => {
                        info!("Displaying details for '{}'", movie.title);
                        self.details.clear();
                        self.details.push_str(&render_details(&movie));
                        self.status = format!("Found '{}'", movie.title);
                        self.current_movie = Some(movie);
                        self.movie_query = Some(query);
                    }
                    Err(err) => self.show_error(&err),
                }
            }
            WorkerEvent::ListUpdated { list, result } => {
                self.pending = self.pending.saturating_sub(1);
                match result {
                    Ok((message, entries)) => {
                        self.list_entries = entries;
                        self.status = format!("{} updated", list.label());
                        self.dialog = Some(Dialog::new(DialogKind::Info, "Success", message));
                    }
                    Err(err) => self.show_error(&err),
                }
            }
            WorkerEvent::Failed(reason) => {
                self.pending = 0;
                warn!("Worker failure: {}", reason);
                self.status = reason.clone();
                self.dialog = Some(Dialog::new(DialogKind::Error, "Error", reason));
            }
        }
    }

    pub fn dismiss_dialog(&mut self) {
        self.dialog = None;
    }

    fn show_input_error(&mut self, message: &str) {
        self.dialog = Some(Dialog::new(DialogKind::Warning, "Input Error", message));
    }

    fn show_error(&mut self, err: &ClientError) {
        warn!("Request failed: {}", err);
        self.status = "Request failed".to_string();
        self.dialog = Some(Dialog::from_error(err));
    }
}
