//! Core types for figma-export
//!
//! The API response schemas are decoded at the boundary into these types; a
//! response that does not match surfaces as [`Error::Decode`](crate::Error::Decode).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Kind of a document node, as far as exporting is concerned
///
/// Any node type other than the four exportable ones (pages, vectors,
/// instances, text, ...) decodes as [`NodeType::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeType {
    /// Explicit export region
    Slice,
    /// Group of layers
    Group,
    /// Frame (artboard)
    Frame,
    /// Reusable component
    Component,
    /// Anything else
    #[serde(other)]
    Other,
}

impl NodeType {
    /// Whether nodes of this type are exported regardless of export settings
    pub fn is_exportable(self) -> bool {
        !matches!(self, NodeType::Other)
    }
}

/// Scale or size constraint of an export setting
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportConstraint {
    /// Constraint kind ("SCALE", "WIDTH", "HEIGHT")
    #[serde(rename = "type")]
    pub kind: String,
    /// Constraint value
    pub value: f64,
}

/// Export setting attached to a node in the editor
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportSetting {
    /// File suffix appended by the editor
    #[serde(default)]
    pub suffix: String,
    /// Image format ("SVG", "PNG", "JPG", "PDF")
    #[serde(default)]
    pub format: String,
    /// Optional scale or size constraint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<ExportConstraint>,
}

/// Node of a project's document tree
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentNode {
    /// Node id, unique within the document
    pub id: String,
    /// Display label
    #[serde(default)]
    pub name: String,
    /// Node type
    #[serde(rename = "type")]
    pub node_type: NodeType,
    /// Child nodes in document order
    #[serde(default)]
    pub children: Vec<DocumentNode>,
    /// Export settings configured in the editor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export_settings: Option<Vec<ExportSetting>>,
}

impl DocumentNode {
    /// Whether the node carries a non-empty list of export settings
    pub fn has_export_settings(&self) -> bool {
        self.export_settings
            .as_ref()
            .is_some_and(|settings| !settings.is_empty())
    }

    /// Whether the node is selected for export
    pub fn is_exportable(&self) -> bool {
        self.node_type.is_exportable() || self.has_export_settings()
    }
}

/// Response of `GET files/{id}`
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDocument {
    /// Project name
    #[serde(default)]
    pub name: String,
    /// Last modification time
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
    /// Thumbnail image URL
    #[serde(default, alias = "thumbnailURL")]
    pub thumbnail_url: Option<String>,
    /// Document version id
    #[serde(default)]
    pub version: String,
    /// Root node; its children are the pages
    pub document: DocumentNode,
}

/// Response of `GET images/{id}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ImageResponse {
    /// Error reported by the render service, if any
    #[serde(default)]
    pub err: Option<String>,
    /// Render URL per node id; `None` when the node could not be rendered
    #[serde(default)]
    pub images: HashMap<String, Option<String>>,
}

/// Project identified by a source URL
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectReference {
    /// Project (file) key
    pub id: String,
    /// Display name taken from the URL
    pub display_name: String,
}

/// Node selected for export, with its resolved file name
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportableNode {
    /// Id of the source node, never altered
    pub id: String,
    /// Collision-free name
    pub name: String,
    /// Type of the source node
    pub node_type: NodeType,
    /// Temporary URL of the rendered SVG, once fetched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render_url: Option<String>,
}

/// How an [`AccessToken`] is presented to the API
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    /// Personal access token, sent as `X-Figma-Token`
    Personal,
    /// OAuth access token, sent as `Authorization: Bearer`
    OAuth,
}

/// Credential used for every authenticated request of a run
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    secret: String,
    kind: TokenKind,
}

impl AccessToken {
    /// Environment variable read by [`AccessToken::from_env`]
    pub const ENV_VAR: &'static str = "FIGMA_TOKEN";

    /// Personal access token
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            kind: TokenKind::Personal,
        }
    }

    /// OAuth access token
    pub fn oauth(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            kind: TokenKind::OAuth,
        }
    }

    /// Personal access token from `FIGMA_TOKEN`, if set and not blank
    pub fn from_env() -> Option<Self> {
        std::env::var(Self::ENV_VAR)
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(Self::new)
    }

    /// The raw secret
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// How the token is sent
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Whether the secret is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.secret.trim().is_empty()
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("secret", &"<redacted>")
            .field("kind", &self.kind)
            .finish()
    }
}

/// Progress event emitted during an export run
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// Fetching the document tree
    FetchingDocument {
        /// Project key
        project_id: String,
    },

    /// Requesting render links
    FetchingRenderLinks {
        /// Number of exportable nodes
        nodes: usize,
        /// Number of render requests
        batches: usize,
    },

    /// Downloading rendered images
    Downloading {
        /// Number of nodes with a render link
        total: usize,
    },

    /// One image written to disk
    Exported {
        /// Resolved element name
        name: String,
        /// Destination file
        path: PathBuf,
    },

    /// Export finished
    Completed {
        /// Number of files written
        written: usize,
        /// Number of nodes without a render
        skipped: usize,
    },
}

impl Event {
    /// Human-readable progress line
    pub fn message(&self) -> String {
        match self {
            Event::FetchingDocument { .. } => "Fetching information from Figma.".to_string(),
            Event::FetchingRenderLinks { .. } => "Fetching SVG elements from Figma.".to_string(),
            Event::Downloading { .. } => "Downloading SVG elements.".to_string(),
            Event::Exported { name, .. } => format!("Exported {name}."),
            Event::Completed { written, skipped } => {
                format!("Export complete: {written} written, {skipped} skipped.")
            }
        }
    }
}

/// Summary of a successful export run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportReport {
    /// Project key
    pub project_id: String,
    /// Document name reported by the API
    pub document_name: String,
    /// Document version exported
    pub version: String,
    /// Files written, in completion order
    pub files: Vec<PathBuf>,
    /// Names of nodes skipped because the API returned no render
    pub skipped: Vec<String>,
}
