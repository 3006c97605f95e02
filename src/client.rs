//! Figma REST API client
//!
//! [`RemoteApi`] is the seam between the export pipeline and the network: the
//! authenticated document and image endpoints, plus the plain download of a
//! rendered file. [`FigmaClient`] implements it over reqwest; tests drive the
//! pipeline with their own implementations.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::types::{AccessToken, ImageResponse, ProjectDocument, TokenKind};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Header carrying a personal access token
const PERSONAL_TOKEN_HEADER: &str = "X-Figma-Token";

/// Remote collaborators of an export run
#[async_trait]
pub trait RemoteApi: Send + Sync {
    /// Fetch the document tree of a project (`GET files/{project_id}`)
    ///
    /// # Errors
    ///
    /// - [`Error::Auth`] when the token is rejected
    /// - [`Error::NotFound`] when the project does not exist
    /// - [`Error::Network`] on transport failure
    /// - [`Error::Decode`] when the body does not match [`ProjectDocument`]
    async fn fetch_document(&self, project_id: &str, token: &AccessToken)
    -> Result<ProjectDocument>;

    /// Request SVG renders for up to one batch of node ids (`GET images/{project_id}`)
    async fn fetch_images(
        &self,
        project_id: &str,
        ids: &[String],
        token: &AccessToken,
    ) -> Result<ImageResponse>;

    /// Download `url` into `destination`, creating parent directories
    ///
    /// Returns the number of bytes written.
    async fn download(&self, url: &str, destination: &Path) -> Result<u64>;
}

/// Error body returned by the API (`{"status": 403, "err": "Invalid token"}`)
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    err: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed [`RemoteApi`] for the Figma REST API
#[derive(Clone, Debug)]
pub struct FigmaClient {
    http: reqwest::Client,
    api_base: Url,
}

impl FigmaClient {
    /// Build a client from the configuration
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for an invalid `api_base` and
    /// [`Error::Network`] if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let api_base = config.api_base_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { http, api_base })
    }

    /// Base URL every endpoint is resolved against
    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    fn endpoint(&self, resource: &str, project_id: &str) -> Result<Url> {
        let path = format!("{}/{}", resource, urlencoding::encode(project_id));
        self.api_base.join(&path).map_err(|e| Error::Config {
            message: format!("cannot build {resource} endpoint: {e}"),
            key: Some("api_base".to_string()),
        })
    }

    fn authorize(request: reqwest::RequestBuilder, token: &AccessToken) -> reqwest::RequestBuilder {
        match token.kind() {
            TokenKind::Personal => request.header(PERSONAL_TOKEN_HEADER, token.secret()),
            TokenKind::OAuth => request.bearer_auth(token.secret()),
        }
    }

    /// Authenticated GET decoding the JSON body into `T`
    async fn get_json<T: DeserializeOwned>(&self, url: Url, token: &AccessToken) -> Result<T> {
        tracing::debug!(url = %url, "GET");
        let response = Self::authorize(self.http.get(url.clone()), token)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(status_error(status, &body, url.as_str()));
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RemoteApi for FigmaClient {
    async fn fetch_document(
        &self,
        project_id: &str,
        token: &AccessToken,
    ) -> Result<ProjectDocument> {
        let url = self.endpoint("files", project_id)?;
        self.get_json(url, token).await
    }

    async fn fetch_images(
        &self,
        project_id: &str,
        ids: &[String],
        token: &AccessToken,
    ) -> Result<ImageResponse> {
        let mut url = self.endpoint("images", project_id)?;
        url.query_pairs_mut()
            .append_pair("format", "svg")
            .append_pair("ids", &ids.join(","))
            .append_pair("svg_include_id", "true");
        self.get_json(url, token).await
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        let mut response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status, &body, url));
        }

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(destination).await?;
        let mut written = 0u64;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        tracing::debug!(path = %destination.display(), bytes = written, "Downloaded file");
        Ok(written)
    }
}

/// Map a non-success response to an error
fn status_error(status: reqwest::StatusCode, body: &str, url: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.err.or(b.message))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string()
        });

    match status.as_u16() {
        401 | 403 => Error::Auth(message),
        404 => Error::NotFound(url.to_string()),
        code => Error::Api {
            status: code,
            message,
        },
    }
}
