//! Test configuration helpers

use figma_export::{AccessToken, Config, ExportRequest, Exporter};
use std::path::Path;
use wiremock::MockServer;

use super::fixtures::PROJECT_URL;
use super::server::VALID_TOKEN;

/// Configuration pointing at a mock server
pub fn mock_config(server: &MockServer) -> Config {
    Config {
        api_base: format!("{}/v1/", server.uri()),
        ..Default::default()
    }
}

/// Exporter talking to a mock server
pub fn mock_exporter(server: &MockServer) -> Exporter {
    Exporter::new(mock_config(server)).expect("mock config is valid")
}

/// Request for the fixture project with the valid token
pub fn fixture_request(output: &Path) -> ExportRequest {
    ExportRequest::new(PROJECT_URL, output, AccessToken::new(VALID_TOKEN))
}
