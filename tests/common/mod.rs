#![allow(dead_code)]

use std::sync::Arc;

use mrgen_console::prelude::*;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Console pointed at the mock server, with an in-memory token store
pub fn console_for(server: &MockServer) -> Console {
    console_with_store(server, Arc::new(MemoryTokenStore::new()))
}

pub fn console_with_store(server: &MockServer, store: Arc<dyn TokenStore>) -> Console {
    Console::with_token_store(
        ConsoleOptions::default().with_backend_url(&server.uri()),
        store,
    )
    .unwrap()
}

pub fn customer_json(pk: i64) -> Value {
    json!({
        "pk": pk,
        "name": format!("Customer {}", pk),
        "watchman_group_id": format!("wm-{}", pk),
        "repairshopr_id": null
    })
}

pub fn customer_page(pks: &[i64], page: u32) -> Value {
    json!({
        "results": pks.iter().map(|pk| customer_json(*pk)).collect::<Vec<_>>(),
        "results_count": pks.len(),
        "page": page,
        "page_count": 1,
        "page_size": 10,
        "page_next": null,
        "page_previous": null
    })
}

pub fn empty_page() -> Value {
    json!({
        "results": [],
        "results_count": 0,
        "page": 1,
        "page_count": 1,
        "page_size": 10,
        "page_next": null,
        "page_previous": null
    })
}

/// Answer schedule and report listings with empty pages
pub async fn mount_empty_details(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/schedule"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/report"))
        .respond_with(ResponseTemplate::new(200).set_body_json(empty_page()))
        .mount(server)
        .await;
}

/// Every request the server received for `url_path`, in arrival order
pub async fn requests_to(server: &MockServer, url_path: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|r| r.url.path() == url_path)
        .collect()
}

pub fn query_value(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub fn body_of(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}
