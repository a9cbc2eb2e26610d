//! Shared PokeAPI fixtures for the integration tests.

#![allow(dead_code)]

use std::time::Duration;

use pokedex_gallery::{Client, ControllerOptions, PageController};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const API_ROOT: &str = "/api/v2";

pub fn client_for(server: &MockServer) -> Client {
    Client::builder()
        .base_url(format!("{}{}", server.uri(), API_ROOT))
        .build()
}

pub fn controller_for(server: &MockServer) -> PageController {
    PageController::new(client_for(server))
}

pub fn controller_with(server: &MockServer, options: ControllerOptions) -> PageController {
    PageController::with_options(client_for(server), options)
}

pub fn detail_path(id: u32) -> String {
    format!("{}/pokemon/{}/", API_ROOT, id)
}

pub fn detail_url(server: &MockServer, id: u32) -> String {
    format!("{}{}", server.uri(), detail_path(id))
}

pub fn detail_json(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "height": 7,
        "weight": 69,
        "sprites": {
            "front_default": format!("https://img/{id}.png"),
            "front_shiny": format!("https://img/shiny/{id}.png"),
            "other": {
                "dream_world": {"front_default": format!("https://img/dream-world/{id}.svg")},
                "official-artwork": {"front_default": format!("https://img/official/{id}.png")}
            }
        },
        "types": [{"slot": 1, "type": {"name": "normal", "url": "https://pokeapi.co/api/v2/type/1/"}}]
    })
}

/// A listing body whose entries point back at `server`.
pub fn listing_json(
    server: &MockServer,
    entries: &[(u32, &str)],
    next: Option<String>,
    previous: Option<String>,
) -> Value {
    let results: Vec<Value> = entries
        .iter()
        .map(|(id, name)| json!({"name": name, "url": detail_url(server, *id)}))
        .collect();
    json!({
        "count": 1302,
        "next": next,
        "previous": previous,
        "results": results,
    })
}

pub async fn mount_detail(server: &MockServer, id: u32, name: &str) {
    mount_detail_delayed(server, id, name, Duration::ZERO).await;
}

pub async fn mount_detail_delayed(server: &MockServer, id: u32, name: &str, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(detail_path(id)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(detail_json(id, name))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

pub async fn mount_details(server: &MockServer, entries: &[(u32, &str)]) {
    for (id, name) in entries {
        mount_detail(server, *id, name).await;
    }
}

pub async fn requests_to(server: &MockServer, request_path: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == request_path)
        .count()
}
