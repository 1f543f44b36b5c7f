//! Shared setup helpers for rein-transform benchmarks.
//!
//! ## Running
//!
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench transform
//!
//! Filter by group:
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench transform -- decompose
//!   cargo bench --manifest-path benchmarks/Cargo.toml --bench transform -- hierarchy

use glam::{DQuat, DVec3};
use rein::ecs::components::transform::Pose;
use rein::TransformTree;

/// A fixed non-trivial pose; `i` varies it so neighbours differ.
pub fn sample_pose(i: usize) -> Pose {
    let t = i as f64;
    Pose {
        translation: DVec3::new(t.sin(), 0.5, t.cos()),
        rotation: DQuat::from_axis_angle(DVec3::new(1.0, 2.0, 3.0).normalize(), 0.1 * t),
        scale: DVec3::new(1.0 + 0.05 * t.sin(), 1.0 + 0.05 * t.cos(), 1.0),
        skew: DVec3::new(0.05, -0.02, 0.01),
    }
}

/// Build a single chain of `depth` nodes. Returns the nodes root first.
pub fn setup_chain(depth: usize) -> (TransformTree, Vec<hecs::Entity>) {
    let mut tree = TransformTree::new();
    let mut nodes = Vec::with_capacity(depth);
    let root = tree.spawn(sample_pose(0)).expect("valid pose");
    nodes.push(root);
    for i in 1..depth {
        let parent = nodes[i - 1];
        nodes.push(tree.spawn_child(parent, sample_pose(i)).expect("valid pose"));
    }
    (tree, nodes)
}

/// Build one root with `n` direct children. Returns `(tree, root, children)`.
pub fn setup_wide(n: usize) -> (TransformTree, hecs::Entity, Vec<hecs::Entity>) {
    let mut tree = TransformTree::new();
    let root = tree.spawn(sample_pose(0)).expect("valid pose");
    let children = (1..=n)
        .map(|i| tree.spawn_child(root, sample_pose(i)).expect("valid pose"))
        .collect();
    (tree, root, children)
}
