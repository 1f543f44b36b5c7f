//! Transform hierarchy refresh system.

use tracing::warn;

use crate::hierarchy::TransformTree;

/// Refresh every stale cache in the tree.
///
/// Walks each root's subtree parent-first, so every node only composes its
/// own local matrix with an already-cached parent. Intended to run once per
/// frame after gameplay code has moved things and before rendering reads
/// the world matrices.
///
/// A node whose world matrix cannot be decomposed is logged and skipped; its
/// matrices stay available through the lazy queries.
pub fn transform_system(tree: &mut TransformTree) {
    let mut stack = tree.roots();
    while let Some(entity) = stack.pop() {
        if let Err(err) = tree.ensure_fresh(entity) {
            warn!("Failed to refresh transform {:?}: {}", entity, err);
        }
        match tree.children(entity) {
            Ok(children) => stack.extend(children),
            Err(err) => warn!("Failed to read children of {:?}: {}", entity, err),
        }
    }
}
