//! Local UI state mirroring the server's todo list.
//!
//! # Design
//! The list only changes once the server has confirmed a request: every
//! `apply_*` method takes the parsed result of a round trip. On success the
//! list is updated from the response body; on failure the list is left as
//! it was and the error's user message is recorded for display.

use crate::error::ApiError;
use crate::types::{Todo, UpdateTodo};

/// Longest draft the client will submit, matching the server's limit.
pub const MAX_TEXT_LEN: usize = 100;

/// Why a draft was refused before any request was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DraftError {
    #[error("Please enter a todo item")]
    Empty,
    #[error("Todo must be less than 100 characters")]
    TooLong,
}

/// Check a draft the same way the server will, returning the trimmed text.
pub fn validate_draft(draft: &str) -> Result<String, DraftError> {
    let trimmed = draft.trim();
    if trimmed.is_empty() {
        return Err(DraftError::Empty);
    }
    if trimmed.chars().count() > MAX_TEXT_LEN {
        return Err(DraftError::TooLong);
    }
    Ok(trimmed.to_string())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoStats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TodoListState {
    todos: Vec<Todo>,
    loading: bool,
    error: Option<String>,
}

impl TodoListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Inline error message from the last failed request, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn get(&self, id: u64) -> Option<&Todo> {
        self.todos.iter().find(|t| t.id == id)
    }

    pub fn begin_fetch(&mut self) {
        self.loading = true;
    }

    /// Replace the list with a fresh fetch, or keep the old one on failure.
    pub fn finish_fetch(&mut self, result: Result<Vec<Todo>, ApiError>) {
        self.loading = false;
        match result {
            Ok(todos) => {
                self.todos = todos;
                self.error = None;
            }
            Err(err) => self.fail("fetch todos", &err),
        }
    }

    /// Append the todo the server created. Returns whether the list changed.
    pub fn apply_created(&mut self, result: Result<Todo, ApiError>) -> bool {
        match result {
            Ok(todo) => {
                self.todos.push(todo);
                self.error = None;
                true
            }
            Err(err) => {
                self.fail("create todo", &err);
                false
            }
        }
    }

    /// Replace the local copy with the server's updated record.
    pub fn apply_updated(&mut self, result: Result<Todo, ApiError>) -> bool {
        match result {
            Ok(todo) => {
                self.error = None;
                match self.todos.iter_mut().find(|t| t.id == todo.id) {
                    Some(slot) => {
                        *slot = todo;
                        true
                    }
                    None => false,
                }
            }
            Err(err) => {
                self.fail("update todo", &err);
                false
            }
        }
    }

    /// Drop `id` locally once the server confirmed the delete.
    pub fn apply_deleted(&mut self, id: u64, result: Result<(), ApiError>) -> bool {
        match result {
            Ok(()) => {
                let before = self.todos.len();
                self.todos.retain(|t| t.id != id);
                self.error = None;
                self.todos.len() != before
            }
            Err(err) => {
                self.fail("delete todo", &err);
                false
            }
        }
    }

    /// Patch that flips the completion state of `id`.
    pub fn toggle_patch(&self, id: u64) -> Option<UpdateTodo> {
        self.get(id).map(|todo| UpdateTodo {
            text: None,
            completed: Some(!todo.completed),
        })
    }

    /// Patch that replaces the text of `id`. A blank draft cancels the edit
    /// and yields `Ok(None)`, as does an unknown id.
    pub fn edit_patch(&self, id: u64, draft: &str) -> Result<Option<UpdateTodo>, DraftError> {
        if self.get(id).is_none() {
            return Ok(None);
        }
        match validate_draft(draft) {
            Ok(text) => Ok(Some(UpdateTodo {
                text: Some(text),
                completed: None,
            })),
            Err(DraftError::Empty) => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub fn active(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| !t.completed).collect()
    }

    pub fn completed(&self) -> Vec<&Todo> {
        self.todos.iter().filter(|t| t.completed).collect()
    }

    pub fn stats(&self) -> TodoStats {
        let completed = self.todos.iter().filter(|t| t.completed).count();
        TodoStats {
            total: self.todos.len(),
            active: self.todos.len() - completed,
            completed,
        }
    }

    fn fail(&mut self, action: &str, err: &ApiError) {
        tracing::warn!(action, error = %err, "todo request failed");
        self.error = Some(err.user_message());
    }
}
