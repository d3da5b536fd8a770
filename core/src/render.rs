//! Plain-text rendition of `TodoListState`.

use std::fmt::Write;

use crate::state::TodoListState;
use crate::types::Todo;

pub fn render(state: &TodoListState) -> String {
    let mut out = String::new();

    if state.is_loading() && state.todos().is_empty() {
        out.push_str("Loading your todos...\n");
        return out;
    }

    if let Some(error) = state.error() {
        let _ = writeln!(out, "! {error} (retry to reload)");
    }

    if state.todos().is_empty() {
        if state.error().is_none() && !state.is_loading() {
            out.push_str("No todos yet\nAdd your first todo above to get started!\n");
        }
        return out;
    }

    section(&mut out, "Active", &state.active());
    section(&mut out, "Completed", &state.completed());

    let stats = state.stats();
    let _ = writeln!(
        out,
        "Total: {}  Active: {}  Completed: {}",
        stats.total, stats.active, stats.completed
    );
    out
}

fn section(out: &mut String, title: &str, todos: &[&Todo]) {
    if todos.is_empty() {
        return;
    }
    let _ = writeln!(out, "{title} ({})", todos.len());
    for todo in todos {
        let mark = if todo.completed { 'x' } else { ' ' };
        let _ = writeln!(out, "  [{mark}] #{} {}", todo.id, todo.text);
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::error::ApiError;

    fn todo(id: u64, text: &str, completed: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id,
            text: text.to_string(),
            completed,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn first_load_shows_spinner_text() {
        let mut state = TodoListState::new();
        state.begin_fetch();
        assert_eq!(render(&state), "Loading your todos...\n");
    }

    #[test]
    fn empty_list_shows_empty_state() {
        let mut state = TodoListState::new();
        state.finish_fetch(Ok(vec![]));
        assert!(render(&state).starts_with("No todos yet"));
    }

    #[test]
    fn error_replaces_empty_state() {
        let mut state = TodoListState::new();
        state.finish_fetch(Err(ApiError::Network("refused".to_string())));
        assert_eq!(
            render(&state),
            "! Network error. Please check your connection. (retry to reload)\n"
        );
    }

    #[test]
    fn sections_and_stats() {
        let mut state = TodoListState::new();
        state.finish_fetch(Ok(vec![
            todo(1, "Buy milk", false),
            todo(2, "Walk dog", true),
        ]));
        let expected = "\
Active (1)
  [ ] #1 Buy milk
Completed (1)
  [x] #2 Walk dog
Total: 2  Active: 1  Completed: 1
";
        assert_eq!(render(&state), expected);
    }
}
