//! Hierarchy configuration.

/// Configuration for a [`TransformTree`](crate::TransformTree).
#[derive(Debug, Clone, Copy)]
pub struct HierarchyConfig {
    /// Tolerance used when comparing poses. Default: 1e-5.
    pub epsilon: f64,
    /// Smallest accepted magnitude for a scale component. Default: 1e-9.
    pub min_scale: f64,
}

impl Default for HierarchyConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-5,
            min_scale: 1e-9,
        }
    }
}
