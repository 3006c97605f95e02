//! # figma-export
//!
//! Sync the exportable elements of a Figma project into a local folder tree.
//!
//! An export run fetches the project's document tree, selects every frame,
//! group, component and slice (plus any node with export settings), gives each
//! a unique name, asks the API to render them as SVG in batches, and downloads
//! the renders into `frames/`, `groups/` and `slices/` under the output
//! directory.
//!
//! ## Design Philosophy
//!
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Explicit credentials** - The access token travels with each request, there is no global token
//! - **Event-driven** - Consumers subscribe to progress events, no polling required
//! - **Fail fast** - The first failing stage fails the run with a typed error
//!
//! ## Quick Start
//!
//! ```no_run
//! use figma_export::{AccessToken, Config, ExportRequest, Exporter};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let exporter = Exporter::new(Config::default())?;
//!     let token = AccessToken::from_env().ok_or("FIGMA_TOKEN is not set")?;
//!
//!     let report = exporter
//!         .export(ExportRequest::new(
//!             "https://www.figma.com/file/ABC123/Design-System",
//!             "./assets",
//!             token,
//!         ))
//!         .await?;
//!
//!     for file in &report.files {
//!         println!("{}", file.display());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Figma REST API client
pub mod client;
/// Configuration types
pub mod config;
/// Download of rendered images into type folders
pub mod downloader;
/// Error types
pub mod error;
/// Export orchestration
pub mod exporter;
/// Unique name resolution
pub mod names;
/// Project URL parsing
pub mod project_url;
/// Batched render-link fetching
pub mod render_links;
/// Exportable node selection
pub mod traversal;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use client::{FigmaClient, RemoteApi};
pub use config::Config;
pub use error::{Error, Result};
pub use exporter::{ExportRequest, Exporter};
pub use names::UniqueNameResolver;
pub use project_url::{can_parse, looks_like_source_file, parse_project_reference};
pub use types::{
    AccessToken, DocumentNode, Event, ExportReport, ExportableNode, ImageResponse, NodeType,
    ProjectDocument, ProjectReference,
};
