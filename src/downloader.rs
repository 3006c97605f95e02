//! Download of rendered images into the type-folder layout
//!
//! Every exported element lands in `<output>/<type folder>/<name>.svg`:
//!
//! | Node type            | Folder   |
//! |----------------------|----------|
//! | Frame                | `frames` |
//! | Group, Component     | `groups` |
//! | Slice, anything else | `slices` |

use std::path::{Path, PathBuf};

use futures::stream::{self, StreamExt, TryStreamExt};
use tokio::sync::broadcast;

use crate::client::RemoteApi;
use crate::error::{Error, Result};
use crate::types::{Event, ExportableNode, NodeType};

/// Extension of every exported file
pub const SVG_EXTENSION: &str = "svg";

/// Distinct type folders, in creation order
pub const TYPE_FOLDERS: [&str; 3] = ["slices", "groups", "frames"];

/// Longest file name most file systems accept, in bytes
const MAX_FILE_NAME_BYTES: usize = 255;

/// Stem used when sanitizing leaves nothing
const FALLBACK_FILE_STEM: &str = "untitled";

/// Windows device names that cannot be used as file names
const RESERVED_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Folder a node of `node_type` is written into
#[must_use]
pub fn type_folder(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::Frame => "frames",
        NodeType::Group | NodeType::Component => "groups",
        NodeType::Slice | NodeType::Other => "slices",
    }
}

/// Ensure `root` and every type folder under it exist
///
/// Safe to call on an existing tree.
pub async fn create_folders(root: &Path) -> Result<()> {
    for folder in TYPE_FOLDERS {
        tokio::fs::create_dir_all(root.join(folder)).await?;
    }
    tracing::debug!(root = %root.display(), "Type folders ready");
    Ok(())
}

/// Make `name` safe to use as a file stem on common file systems
///
/// Removes path separators, the characters Windows rejects (`?<>:*|"`) and
/// control characters, strips trailing dots and spaces, prefixes Windows device
/// names with `_`, and truncates to leave room for the `.svg` extension.
/// A name with nothing left becomes `untitled`.
///
/// # Examples
///
/// ```
/// use figma_export::downloader::sanitize_file_name;
///
/// assert_eq!(sanitize_file_name("icons/arrow: left"), "iconsarrow left");
/// assert_eq!(sanitize_file_name("..."), "untitled");
/// ```
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let mut cleaned: String = name
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | '?' | '<' | '>' | ':' | '*' | '|' | '"'))
        .filter(|c| !c.is_control())
        .collect();

    let trimmed_len = cleaned.trim_end_matches(['.', ' ']).len();
    cleaned.truncate(trimmed_len);

    if cleaned.is_empty() {
        return FALLBACK_FILE_STEM.to_string();
    }

    let device = cleaned.split('.').next().unwrap_or_default();
    if RESERVED_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(device))
    {
        cleaned.insert(0, '_');
    }

    let budget = MAX_FILE_NAME_BYTES - SVG_EXTENSION.len() - 1;
    if cleaned.len() > budget {
        let mut cut = budget;
        while !cleaned.is_char_boundary(cut) {
            cut -= 1;
        }
        cleaned.truncate(cut);
    }

    cleaned
}

/// Destination of a node's rendered image under `output_root`
#[must_use]
pub fn destination_for(output_root: &Path, node: &ExportableNode) -> PathBuf {
    output_root
        .join(type_folder(node.node_type))
        .join(format!("{}.{}", sanitize_file_name(&node.name), SVG_EXTENSION))
}

/// Files written and nodes skipped by [`download_all`]
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DownloadOutcome {
    /// Files written, in completion order
    pub files: Vec<PathBuf>,
    /// Names of nodes without a render URL
    pub skipped: Vec<String>,
}

/// Download every node that has a render URL
///
/// Up to `concurrency` downloads run at once. Nodes without a render URL are
/// skipped. The first failing download fails the whole call with
/// [`Error::Download`] naming the element; downloads still in flight are
/// dropped and files already written are left in place.
pub async fn download_all<A>(
    api: &A,
    nodes: &[ExportableNode],
    output_root: &Path,
    concurrency: usize,
    events: &broadcast::Sender<Event>,
) -> Result<DownloadOutcome>
where
    A: RemoteApi + ?Sized,
{
    let mut skipped = Vec::new();
    let mut pending = Vec::with_capacity(nodes.len());
    for node in nodes {
        match node.render_url.as_deref() {
            Some(url) if !url.is_empty() => pending.push((node, url)),
            _ => {
                tracing::warn!(node_id = %node.id, name = %node.name, "No render available, skipping");
                skipped.push(node.name.clone());
            }
        }
    }

    let files = stream::iter(pending)
        .map(|(node, url)| {
            let destination = destination_for(output_root, node);
            async move {
                api.download(url, &destination)
                    .await
                    .map_err(|e| Error::download(node.name.clone(), e))?;

                events
                    .send(Event::Exported {
                        name: node.name.clone(),
                        path: destination.clone(),
                    })
                    .ok();
                Ok::<_, Error>(destination)
            }
        })
        .buffer_unordered(concurrency.max(1))
        .try_collect::<Vec<_>>()
        .await?;

    Ok(DownloadOutcome { files, skipped })
}
