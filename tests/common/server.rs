//! Mock Figma API built on wiremock

use serde_json::{Value, json};
use std::collections::HashSet;
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use super::fixtures::{PROJECT_ID, render_file};

/// Token accepted by the mock server
pub const VALID_TOKEN: &str = "figd_test_token";

/// Behavior knobs for [`start_figma_mock`]
#[derive(Clone, Debug, Default)]
pub struct MockOptions {
    /// Node ids the render endpoint returns `null` for
    pub unrenderable: HashSet<String>,
    /// Node ids whose render download answers 500
    pub broken_downloads: HashSet<String>,
}

/// Start a mock server serving `document` with default options
pub async fn start_figma_mock(document: Value) -> MockServer {
    start_figma_mock_with(document, MockOptions::default()).await
}

/// Start a mock server serving `document`
///
/// - `GET /v1/files/ABC123` returns the document for [`VALID_TOKEN`], 403 otherwise
/// - `GET /v1/images/ABC123?ids=...` returns a render URL per id
/// - `GET /renders/<id>.svg` returns an SVG body naming the id
pub async fn start_figma_mock_with(document: Value, options: MockOptions) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/v1/files/{PROJECT_ID}")))
        .and(header("X-Figma-Token", VALID_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(document))
        .mount(&server)
        .await;

    let base = server.uri();
    let unrenderable = options.unrenderable.clone();
    Mock::given(method("GET"))
        .and(path(format!("/v1/images/{PROJECT_ID}")))
        .and(header("X-Figma-Token", VALID_TOKEN))
        .respond_with(move |request: &Request| {
            let ids = request
                .url
                .query_pairs()
                .find(|(key, _)| key == "ids")
                .map(|(_, value)| value.into_owned())
                .unwrap_or_default();

            let images: serde_json::Map<String, Value> = ids
                .split(',')
                .filter(|id| !id.is_empty())
                .map(|id| {
                    let url = if unrenderable.contains(id) {
                        Value::Null
                    } else {
                        Value::String(format!("{base}/renders/{}", render_file(id)))
                    };
                    (id.to_string(), url)
                })
                .collect();

            ResponseTemplate::new(200).set_body_json(json!({"err": null, "images": images}))
        })
        .mount(&server)
        .await;

    for id in &options.broken_downloads {
        Mock::given(method("GET"))
            .and(path(format!("/renders/{}", render_file(id))))
            .respond_with(ResponseTemplate::new(500))
            .with_priority(1)
            .mount(&server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path_regex(r"^/renders/[^/]+\.svg$"))
        .respond_with(|request: &Request| {
            let file = request.url.path().trim_start_matches("/renders/").to_string();
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/svg+xml")
                .set_body_string(format!("<svg xmlns=\"http://www.w3.org/2000/svg\" data-file=\"{file}\"/>"))
        })
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/v1/"))
        .respond_with(
            ResponseTemplate::new(403).set_body_json(json!({"status": 403, "err": "Invalid token"})),
        )
        .with_priority(10)
        .mount(&server)
        .await;

    server
}

/// Number of requests the server received whose path starts with `prefix`
pub async fn request_count(server: &MockServer, prefix: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path().starts_with(prefix))
        .count()
}
