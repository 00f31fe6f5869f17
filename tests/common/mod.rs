//! Shared helpers for the mock-server tests.

#![allow(dead_code)]

use github_env_audit::GitHubClient;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "ghp_test_token";

/// Client pointed at the mock server.
pub fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::builder()
        .pat(TOKEN)
        .base_url(server.uri())
        .build()
        .expect("client should build")
}

/// Responds to `GET {route}` with `status` and a JSON body.
pub async fn mount_json(server: &MockServer, route: &str, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// Responds to `GET {route}?page={page}` with `status` and a JSON body.
pub async fn mount_page(server: &MockServer, route: &str, page: u32, status: u16, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .and(query_param("page", page.to_string()))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

/// A repository listing page with `count` repositories numbered from `start`.
pub fn repo_page(owner: &str, start: usize, count: usize) -> Value {
    Value::Array(
        (start..start + count)
            .map(|i| {
                json!({
                    "id": i,
                    "name": format!("repo-{i:03}"),
                    "full_name": format!("{owner}/repo-{i:03}"),
                    "private": false
                })
            })
            .collect(),
    )
}

/// Environment listing body.
pub fn environments(names: &[&str]) -> Value {
    json!({
        "total_count": names.len(),
        "environments": names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({ "id": i + 1, "name": name, "protection_rules": [] }))
            .collect::<Vec<_>>()
    })
}

/// Secret listing body.
pub fn secrets(names: &[&str]) -> Value {
    json!({
        "total_count": names.len(),
        "secrets": names
            .iter()
            .map(|name| json!({
                "name": name,
                "created_at": "2024-01-10T14:59:22Z",
                "updated_at": "2024-01-10T14:59:22Z"
            }))
            .collect::<Vec<_>>()
    })
}

/// Variable listing body.
pub fn variables(pairs: &[(&str, &str)]) -> Value {
    json!({
        "total_count": pairs.len(),
        "variables": pairs
            .iter()
            .map(|(name, value)| json!({ "name": name, "value": value }))
            .collect::<Vec<_>>()
    })
}

/// GitHub-style error body.
pub fn error_body(message: &str) -> Value {
    json!({
        "message": message,
        "documentation_url": "https://docs.github.com/rest"
    })
}
