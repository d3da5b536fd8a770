//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes the matching `HttpResponse`; the host runs the round trip
//! in between.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, REQUEST_TIMEOUT};
use crate::types::{CreateTodo, Health, Todo, UpdateTodo};

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/api/todos", None)
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Post, "/api/todos", Some(body)))
    }

    pub fn build_update_todo(&self, id: u64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(self.request(HttpMethod::Put, &format!("/api/todos/{id}"), Some(body)))
    }

    pub fn build_delete_todo(&self, id: u64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/api/todos/{id}"), None)
    }

    pub fn build_health(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/health", None)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<Health, ApiError> {
        parse_json(response, 200)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let headers = if body.is_some() {
            vec![("content-type".to_string(), "application/json".to_string())]
        } else {
            Vec::new()
        };
        HttpRequest {
            method,
            path: format!("{}{path}", self.base_url),
            headers,
            body,
            timeout: REQUEST_TIMEOUT,
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    Err(ApiError::from_status(response.status, &response.body))
}
