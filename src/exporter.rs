//! Export orchestration
//!
//! [`Exporter::export`] runs one export as a linear sequence of stages:
//!
//! ```text
//! validate source -> validate token -> fetch document -> create folders
//!     -> filter exportable nodes -> fetch render links -> download
//! ```
//!
//! The first failing stage fails the run. Folders and files created before the
//! failure are left in place.

use std::path::PathBuf;

use tokio::sync::broadcast;

use crate::client::{FigmaClient, RemoteApi};
use crate::config::Config;
use crate::downloader::{create_folders, download_all};
use crate::error::{Error, Result};
use crate::names::UniqueNameResolver;
use crate::project_url::{can_parse, parse_project_reference};
use crate::render_links::get_render_links;
use crate::traversal::find_exportable_nodes;
use crate::types::{AccessToken, Event, ExportReport};

/// Capacity of the progress event channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Input of one export run
#[derive(Clone, Debug)]
pub struct ExportRequest {
    /// Figma project URL (or `.figma` file reference)
    pub source: String,
    /// Directory receiving the `frames`, `groups` and `slices` folders
    pub output_dir: PathBuf,
    /// Credential used for every API call of the run
    pub token: Option<AccessToken>,
}

impl ExportRequest {
    /// Request with a token
    pub fn new(
        source: impl Into<String>,
        output_dir: impl Into<PathBuf>,
        token: AccessToken,
    ) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            token: Some(token),
        }
    }
}

/// Exports SVG assets of Figma projects into a local folder tree
///
/// Progress is published as [`Event`]s on a broadcast channel; call
/// [`subscribe`](Exporter::subscribe) before [`export`](Exporter::export) to
/// receive them. Without subscribers the run is only traced.
///
/// # Example
///
/// ```no_run
/// use figma_export::{AccessToken, Config, ExportRequest, Exporter};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let exporter = Exporter::new(Config::default())?;
///
///     let mut events = exporter.subscribe();
///     tokio::spawn(async move {
///         while let Ok(event) = events.recv().await {
///             println!("{}", event.message());
///         }
///     });
///
///     let report = exporter
///         .export(ExportRequest::new(
///             "https://www.figma.com/file/ABC123/Design-System",
///             "./assets",
///             AccessToken::new("figd_..."),
///         ))
///         .await?;
///     println!("wrote {} files", report.files.len());
///     Ok(())
/// }
/// ```
pub struct Exporter<A = FigmaClient> {
    api: A,
    config: Config,
    event_tx: broadcast::Sender<Event>,
}

impl Exporter<FigmaClient> {
    /// Create an exporter talking to the Figma REST API
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let api = FigmaClient::new(&config)?;
        Ok(Self::with_api(config, api))
    }
}

impl<A: RemoteApi> Exporter<A> {
    /// Create an exporter over any [`RemoteApi`] implementation
    pub fn with_api(config: Config, api: A) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            api,
            config,
            event_tx,
        }
    }

    /// Subscribe to progress events
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Active configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Remote API used by this exporter
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run one export
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidSource`] if the source is neither a `.figma` reference nor a project URL
    /// - [`Error::InvalidProjectUrl`] if the source cannot be parsed as a project URL
    /// - [`Error::MissingToken`] if no (or a blank) token is supplied
    /// - [`Error::EmptyProject`] if the document has nothing to export
    /// - [`Error::Download`] naming the element whose download failed
    /// - any error from the remote API or the file system
    pub async fn export(&self, request: ExportRequest) -> Result<ExportReport> {
        let source = request.source.trim();
        if !can_parse(source) {
            return Err(Error::InvalidSource(source.to_string()));
        }
        let project = parse_project_reference(source)
            .ok_or_else(|| Error::InvalidProjectUrl(source.to_string()))?;

        let token = request
            .token
            .as_ref()
            .filter(|token| !token.is_blank())
            .ok_or(Error::MissingToken)?;

        let project_id = project.id.as_str();
        let output_dir = request.output_dir.as_path();

        tracing::info!(project_id, name = %project.display_name, "Fetching document");
        self.emit(Event::FetchingDocument {
            project_id: project.id.clone(),
        });
        let document = self
            .api
            .fetch_document(project_id, token)
            .await
            .inspect_err(|e| tracing::error!(project_id, error = %e, "Document fetch failed"))?;

        create_folders(output_dir).await.inspect_err(
            |e| tracing::error!(output = %output_dir.display(), error = %e, "Folder creation failed"),
        )?;

        let mut resolver = UniqueNameResolver::new();
        let nodes = find_exportable_nodes(&document.document.children, &mut resolver);

        let batch_size = self.config.effective_batch_size();
        tracing::info!(project_id, nodes = nodes.len(), "Fetching render links");
        self.emit(Event::FetchingRenderLinks {
            nodes: nodes.len(),
            batches: nodes.len().div_ceil(batch_size),
        });
        let nodes = get_render_links(&self.api, nodes, project_id, token, batch_size)
            .await
            .inspect_err(|e| tracing::error!(project_id, error = %e, "Render link fetch failed"))?;

        let total = nodes.iter().filter(|node| node.render_url.is_some()).count();
        tracing::info!(project_id, total, "Downloading rendered elements");
        self.emit(Event::Downloading { total });
        let outcome = download_all(
            &self.api,
            &nodes,
            output_dir,
            self.config.download_concurrency,
            &self.event_tx,
        )
        .await
        .inspect_err(|e| tracing::error!(project_id, error = %e, "Download failed"))?;

        tracing::info!(
            project_id,
            written = outcome.files.len(),
            skipped = outcome.skipped.len(),
            "Export complete"
        );
        self.emit(Event::Completed {
            written: outcome.files.len(),
            skipped: outcome.skipped.len(),
        });

        Ok(ExportReport {
            project_id: project.id,
            document_name: document.name,
            version: document.version,
            files: outcome.files,
            skipped: outcome.skipped,
        })
    }

    fn emit(&self, event: Event) {
        self.event_tx.send(event).ok();
    }
}
