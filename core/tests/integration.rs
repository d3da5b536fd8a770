//! End-to-end tests against a live todo server.
//!
//! Each test starts the real server on a random port, then exercises the
//! client core over HTTP using ureq as the host transport.

use std::net::SocketAddr;

use todo_core::{
    render, ApiError, CreateTodo, HttpMethod, HttpRequest, HttpResponse, TodoClient,
    TodoListState, UpdateTodo,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's status-code-as-error behavior so 4xx/5xx responses come
/// back as data and the core handles status interpretation. Transport
/// failures become `Timeout` or `Network`.
fn execute(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .timeout_global(Some(req.timeout))
        .build()
        .new_agent();

    let target = format!("{} {}", req.method.as_str(), req.path);
    let result = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    };

    let mut response = result.map_err(|err| match err {
        ureq::Error::Timeout(_) => ApiError::Timeout,
        other => ApiError::Network(format!("{target}: {other}")),
    })?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_string())))
        .collect();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

/// Start a fresh server on a random port and return its address.
fn spawn_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            todo_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn crud_lifecycle() {
    let client = TodoClient::new(&format!("http://{}", spawn_server()));

    // Step 1: list is empty.
    let todos = client
        .parse_list_todos(execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert!(todos.is_empty(), "expected empty list");

    // Step 2: create.
    let input = CreateTodo {
        text: "Buy milk".to_string(),
    };
    let req = client.build_create_todo(&input).unwrap();
    let created = client.parse_create_todo(execute(req).unwrap()).unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.text, "Buy milk");
    assert!(!created.completed);

    // Step 3: list holds exactly that record.
    let todos = client
        .parse_list_todos(execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert_eq!(todos, vec![created.clone()]);

    // Step 4: mark completed.
    let patch = UpdateTodo {
        text: None,
        completed: Some(true),
    };
    let req = client.build_update_todo(created.id, &patch).unwrap();
    let updated = client.parse_update_todo(execute(req).unwrap()).unwrap();
    assert_eq!(updated.text, "Buy milk");
    assert!(updated.completed);
    assert!(updated.updated_at >= created.updated_at);

    // Step 5: delete.
    let req = client.build_delete_todo(created.id);
    client.parse_delete_todo(execute(req).unwrap()).unwrap();

    // Step 6: delete again is NotFound.
    let req = client.build_delete_todo(created.id);
    let err = client.parse_delete_todo(execute(req).unwrap()).unwrap_err();
    assert_eq!(err, ApiError::NotFound);

    // Step 7: update after delete is NotFound.
    let req = client.build_update_todo(created.id, &patch).unwrap();
    let err = client.parse_update_todo(execute(req).unwrap()).unwrap_err();
    assert_eq!(err, ApiError::NotFound);

    // Step 8: list is empty again.
    let todos = client
        .parse_list_todos(execute(client.build_list_todos()).unwrap())
        .unwrap();
    assert!(todos.is_empty(), "expected empty list after delete");
}

#[test]
fn validation_errors_reach_the_client() {
    let client = TodoClient::new(&format!("http://{}", spawn_server()));

    let input = CreateTodo {
        text: "a".repeat(101),
    };
    let req = client.build_create_todo(&input).unwrap();
    let err = client.parse_create_todo(execute(req).unwrap()).unwrap_err();
    assert_eq!(
        err,
        ApiError::Validation(
            "\"text\" length must be less than or equal to 100 characters long".to_string()
        )
    );
}

#[test]
fn health_endpoint_responds() {
    let client = TodoClient::new(&format!("http://{}", spawn_server()));
    let response = execute(client.build_health()).unwrap();
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert_eq!(response.header("X-Content-Type-Options"), Some("nosniff"));
    let health = client.parse_health(response).unwrap();
    assert_eq!(health.status, "OK");
    assert_eq!(health.environment, "development");
}

#[test]
fn ui_state_follows_server_confirmations() {
    let client = TodoClient::new(&format!("http://{}", spawn_server()));
    let mut state = TodoListState::new();

    state.begin_fetch();
    let fetched = execute(client.build_list_todos()).and_then(|r| client.parse_list_todos(r));
    state.finish_fetch(fetched);
    assert!(render(&state).starts_with("No todos yet"));

    for text in ["Buy milk", "Walk dog"] {
        let req = client
            .build_create_todo(&CreateTodo {
                text: text.to_string(),
            })
            .unwrap();
        let created = execute(req).and_then(|r| client.parse_create_todo(r));
        assert!(state.apply_created(created));
    }

    let patch = state.toggle_patch(2).unwrap();
    let req = client.build_update_todo(2, &patch).unwrap();
    assert!(state.apply_updated(execute(req).and_then(|r| client.parse_update_todo(r))));

    // A rejected mutation leaves the list intact and surfaces the message.
    let req = client.build_delete_todo(99);
    let deleted = execute(req).and_then(|r| client.parse_delete_todo(r));
    assert!(!state.apply_deleted(99, deleted));
    assert_eq!(state.error(), Some("Resource not found"));

    let expected = "\
! Resource not found (retry to reload)
Active (1)
  [ ] #1 Buy milk
Completed (1)
  [x] #2 Walk dog
Total: 2  Active: 1  Completed: 1
";
    assert_eq!(render(&state), expected);
}

#[test]
fn unreachable_server_is_a_network_error() {
    // Bind then drop a listener so the port is very likely closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    let client = TodoClient::new(&format!("http://{addr}"));

    let mut state = TodoListState::new();
    state.begin_fetch();
    let fetched = execute(client.build_list_todos()).and_then(|r| client.parse_list_todos(r));
    match &fetched {
        Err(ApiError::Network(cause)) => assert!(cause.starts_with("GET http://"), "{cause}"),
        other => panic!("expected network error, got {other:?}"),
    }
    state.finish_fetch(fetched);
    assert_eq!(state.error(), Some("Network error. Please check your connection."));
    assert!(state.todos().is_empty());
}
