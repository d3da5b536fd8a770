//! In-memory todo store.
//!
//! # Design
//! `TodoStore` is a plain owned value: a `Vec` kept in insertion order plus
//! the next-id counter. Every operation is synchronous and runs to completion;
//! callers that share a store across requests wrap it in a lock (see
//! `service`). Records never leave the store by reference, only as clones.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo record as stored and as serialized on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields that may be merged into an existing record. `None` leaves the
/// field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}

#[derive(Debug)]
pub struct TodoStore {
    todos: Vec<Todo>,
    next_id: u64,
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TodoStore {
    pub fn new() -> Self {
        Self {
            todos: Vec::new(),
            next_id: 1,
        }
    }

    /// All records in insertion order.
    pub fn get_all(&self) -> Vec<Todo> {
        self.todos.clone()
    }

    pub fn create(&mut self, text: String) -> Todo {
        let now = Utc::now();
        let todo = Todo {
            id: self.next_id,
            text,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.next_id += 1;
        self.todos.push(todo.clone());
        tracing::debug!(id = todo.id, total = self.len(), "todo created");
        todo
    }

    /// Merge `patch` into the record with `id`. Returns `None` when no such
    /// record exists.
    pub fn update(&mut self, id: u64, patch: TodoPatch) -> Option<Todo> {
        let todo = self.todos.iter_mut().find(|t| t.id == id)?;
        if let Some(text) = patch.text {
            todo.text = text;
        }
        if let Some(completed) = patch.completed {
            todo.completed = completed;
        }
        // updatedAt must never step backwards, even if the wall clock does.
        todo.updated_at = Utc::now().max(todo.updated_at);
        tracing::debug!(id, "todo updated");
        Some(todo.clone())
    }

    /// Remove the record with `id`. Returns whether anything was removed.
    pub fn delete(&mut self, id: u64) -> bool {
        let Some(index) = self.todos.iter().position(|t| t.id == id) else {
            return false;
        };
        self.todos.remove(index);
        tracing::debug!(id, total = self.len(), "todo deleted");
        true
    }

    /// Drop every record and restart id assignment at 1.
    pub fn reset(&mut self) {
        self.todos.clear();
        self.next_id = 1;
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_empty() {
        let store = TodoStore::new();
        assert!(store.get_all().is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn create_assigns_sequential_ids_and_defaults() {
        let mut store = TodoStore::new();
        let a = store.create("first".to_string());
        let b = store.create("second".to_string());
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert!(!a.completed);
        assert_eq!(a.created_at, a.updated_at);
    }

    #[test]
    fn get_all_keeps_insertion_order() {
        let mut store = TodoStore::new();
        for text in ["a", "b", "c"] {
            store.create(text.to_string());
        }
        let texts: Vec<_> = store.get_all().into_iter().map(|t| t.text).collect();
        assert_eq!(texts, vec!["a", "b", "c"]);
    }

    #[test]
    fn update_merges_only_supplied_fields() {
        let mut store = TodoStore::new();
        let created = store.create("Walk dog".to_string());

        let updated = store
            .update(
                created.id,
                TodoPatch {
                    text: None,
                    completed: Some(true),
                },
            )
            .unwrap();
        assert_eq!(updated.text, "Walk dog");
        assert!(updated.completed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= updated.created_at);

        let updated = store
            .update(
                created.id,
                TodoPatch {
                    text: Some("Walk cat".to_string()),
                    completed: None,
                },
            )
            .unwrap();
        assert_eq!(updated.text, "Walk cat");
        assert!(updated.completed);
        assert_eq!(store.get_all(), vec![updated]);
    }

    #[test]
    fn update_unknown_id_is_none() {
        let mut store = TodoStore::new();
        store.create("x".to_string());
        assert!(store.update(42, TodoPatch::default()).is_none());
    }

    #[test]
    fn delete_twice_reports_missing_second_time() {
        let mut store = TodoStore::new();
        let todo = store.create("x".to_string());
        assert!(store.delete(todo.id));
        assert!(!store.delete(todo.id));
        assert!(store.is_empty());
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut store = TodoStore::new();
        let first = store.create("x".to_string());
        store.delete(first.id);
        let second = store.create("y".to_string());
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn reset_restarts_ids() {
        let mut store = TodoStore::new();
        store.create("x".to_string());
        store.create("y".to_string());
        store.reset();
        assert_eq!(store.len(), 0);
        assert_eq!(store.create("z".to_string()).id, 1);
    }

    #[test]
    fn todo_serializes_with_camel_case_timestamps() {
        let mut store = TodoStore::new();
        let todo = store.create("Test".to_string());
        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["id"], 1);
        assert_eq!(json["text"], "Test");
        assert_eq!(json["completed"], false);
        assert!(json["createdAt"].is_string());
        assert!(json["updatedAt"].is_string());
        assert!(json.get("created_at").is_none());
    }
}
