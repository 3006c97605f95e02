//! Selection of exportable nodes from a document tree

use crate::names::UniqueNameResolver;
use crate::types::{DocumentNode, ExportableNode};

/// Collect every exportable node under `root_children`, in pre-order
///
/// A node is selected when its type is one of Slice, Group, Frame or Component,
/// or when it carries export settings. Children of a selected node are still
/// visited, so a frame nested in a frame yields two entries. Names go through
/// the shared `resolver`, which makes them unique across the whole tree.
///
/// The walk uses an explicit stack, so document depth is not limited by the
/// call stack.
pub fn find_exportable_nodes(
    root_children: &[DocumentNode],
    resolver: &mut UniqueNameResolver,
) -> Vec<ExportableNode> {
    let mut result = Vec::new();
    let mut stack: Vec<&DocumentNode> = root_children.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if node.is_exportable() {
            result.push(ExportableNode {
                id: node.id.clone(),
                name: resolver.get(&node.name),
                node_type: node.node_type,
                render_url: None,
            });
        }

        stack.extend(node.children.iter().rev());
    }

    tracing::debug!(selected = result.len(), "Collected exportable nodes");
    result
}
