//! Rendering-layer seam.
//!
//! The modify control never draws. It narrates handle and feature changes
//! to an [`EditLayer`] implemented by the host; all methods default to
//! no-ops so a host only implements what its renderer needs.

use featkit_core::{Feature, RenderIntent};

use crate::vertex::VertexHandle;

/// Render and selection sink implemented by the host.
pub trait EditLayer {
    /// Registers freshly materialized handles, already in paint order
    /// (edge midpoints below corners below the translate handle).
    /// `silent` suppresses the per-batch redraw.
    fn add_handles(&mut self, _handles: &[VertexHandle], _silent: bool) {}

    /// Drops handles by id. `silent` suppresses per-removal redraws.
    fn remove_handles(&mut self, _ids: &[u64], _silent: bool) {}

    /// Redraws a feature with the given presentation intent.
    fn draw_feature(&mut self, _feature: &Feature, _intent: RenderIntent) {}

    /// Redraws a single handle.
    fn draw_handle(&mut self, _handle: &VertexHandle) {}

    /// Records the feature in the layer's selection set.
    fn feature_selected(&mut self, _id: u64) {}

    /// Removes the feature from the layer's selection set.
    fn feature_deselected(&mut self, _id: u64) {}
}

/// A layer that ignores every call; useful for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullLayer;

impl EditLayer for NullLayer {}
