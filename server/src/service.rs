//! Service layer between the HTTP handlers and the store.
//!
//! Each call takes the lock, runs one synchronous store operation and
//! releases the lock before returning, so no guard is ever held across an
//! await point.

use std::sync::{Mutex, MutexGuard};

use crate::error::{ApiError, ApiResult};
use crate::store::{Todo, TodoPatch, TodoStore};

#[derive(Debug, Default)]
pub struct TodoService {
    store: Mutex<TodoStore>,
}

impl TodoService {
    pub fn new(store: TodoStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }

    pub fn list(&self) -> ApiResult<Vec<Todo>> {
        Ok(self.lock()?.get_all())
    }

    pub fn create(&self, text: String) -> ApiResult<Todo> {
        Ok(self.lock()?.create(text))
    }

    pub fn update(&self, id: u64, patch: TodoPatch) -> ApiResult<Option<Todo>> {
        Ok(self.lock()?.update(id, patch))
    }

    pub fn delete(&self, id: u64) -> ApiResult<bool> {
        Ok(self.lock()?.delete(id))
    }

    pub fn reset(&self) -> ApiResult<()> {
        self.lock()?.reset();
        Ok(())
    }

    fn lock(&self) -> ApiResult<MutexGuard<'_, TodoStore>> {
        self.store
            .lock()
            .map_err(|_| ApiError::Internal("todo store lock poisoned".to_string()))
    }
}
