//! Batched render-link fetching
//!
//! The render endpoint accepts a bounded number of node ids per request. Node
//! ids are split into contiguous batches, every batch is requested
//! concurrently, and the per-batch URL maps are merged back onto the nodes in
//! their original order.

use std::collections::HashMap;

use futures::future::try_join_all;

use crate::client::RemoteApi;
use crate::error::{Error, Result};
use crate::types::{AccessToken, ExportableNode};

/// Node ids submitted together in one render request
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportBatch {
    ids: Vec<String>,
}

impl ExportBatch {
    /// Ids in request order
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Number of ids in the batch
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether the batch is empty
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

/// Split `ids` into contiguous batches of at most `batch_size` ids
///
/// A `batch_size` of zero is treated as one.
pub fn partition_batches(ids: &[String], batch_size: usize) -> Vec<ExportBatch> {
    ids.chunks(batch_size.max(1))
        .map(|chunk| ExportBatch {
            ids: chunk.to_vec(),
        })
        .collect()
}

/// Attach render URLs to `nodes`
///
/// Returns the same nodes, in the same order, with `render_url` set from the
/// API response. Nodes the API could not render keep `render_url = None`.
///
/// All batch requests run concurrently and the first failing request fails the
/// whole call; requests still in flight at that point are dropped.
///
/// # Errors
///
/// - [`Error::EmptyProject`] if `nodes` is empty; no request is made
/// - [`Error::Render`] if the API reports an error for a batch
/// - any error from [`RemoteApi::fetch_images`]
pub async fn get_render_links<A>(
    api: &A,
    nodes: Vec<ExportableNode>,
    project_id: &str,
    token: &AccessToken,
    batch_size: usize,
) -> Result<Vec<ExportableNode>>
where
    A: RemoteApi + ?Sized,
{
    if nodes.is_empty() {
        return Err(Error::EmptyProject);
    }

    let ids: Vec<String> = nodes.iter().map(|node| node.id.clone()).collect();
    let batches = partition_batches(&ids, batch_size);
    tracing::debug!(
        project_id,
        nodes = nodes.len(),
        batches = batches.len(),
        "Requesting render links"
    );

    let responses = try_join_all(batches.iter().enumerate().map(|(index, batch)| async move {
        let response = api.fetch_images(project_id, batch.ids(), token).await?;
        if let Some(err) = response.err {
            return Err(Error::Render(err));
        }
        tracing::debug!(batch = index, ids = batch.len(), "Render batch resolved");
        Ok(response.images)
    }))
    .await?;

    let mut links: HashMap<String, Option<String>> = HashMap::with_capacity(ids.len());
    for images in responses {
        links.extend(images);
    }

    Ok(nodes
        .into_iter()
        .map(|mut node| {
            node.render_url = links
                .get(&node.id)
                .cloned()
                .flatten()
                .filter(|url| !url.is_empty());
            node
        })
        .collect())
}
