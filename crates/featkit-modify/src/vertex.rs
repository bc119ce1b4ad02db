//! Draggable handles over feature geometry.
//!
//! Handles reference geometry through (ring, index) slots, never by
//! owning points; the geometry stays owned by its feature.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use featkit_core::constants::EDGE_HANDLE_OPACITY;
use featkit_core::{Point, RenderIntent, RingId};

/// What a handle is bound to, and how dragging it propagates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HandleKind {
    /// A real ring vertex. Dragging propagates one coordinate to each of
    /// its two neighbors, keeping the ring rectilinear.
    Corner {
        ring: RingId,
        /// Position within the ring's distinct-vertex list.
        index: usize,
    },
    /// Midpoint of the segment in front of ring slot `insertion`.
    /// Dragging moves the whole segment perpendicular to itself; the
    /// handle is never part of the geometry.
    Edge {
        ring: RingId,
        /// Ring slot the midpoint sits in front of. `None` once a prior
        /// structural edit invalidated it; recovered through `anchor`.
        insertion: Option<usize>,
        /// The neighbor vertex used to re-derive `insertion`.
        anchor: Point,
    },
    /// A point of a loose point geometry; moves freely.
    Loose { index: usize },
    /// Centroid handle; dragging translates the whole geometry.
    Translate,
}

impl HandleKind {
    pub fn is_corner(&self) -> bool {
        matches!(self, HandleKind::Corner { .. })
    }

    pub fn is_edge(&self) -> bool {
        matches!(self, HandleKind::Edge { .. })
    }
}

/// A draggable editing handle bound to the selected feature's geometry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexHandle {
    pub id: u64,
    /// Current plane position.
    pub position: Point,
    pub kind: HandleKind,
    /// Always true: marks the handle as an editing affordance rather
    /// than domain data.
    pub sketch: bool,
    pub intent: RenderIntent,
    /// 1.0 for corner handles, reduced for edge midpoints.
    pub opacity: f64,
}

impl VertexHandle {
    /// Handle bound to ring vertex `index`.
    pub fn corner(id: u64, position: Point, ring: RingId, index: usize, intent: RenderIntent) -> Self {
        Self {
            id,
            position,
            kind: HandleKind::Corner { ring, index },
            sketch: true,
            intent,
            opacity: 1.0,
        }
    }

    /// Midpoint handle for the segment `p1 -> p2`, in front of ring slot
    /// `insertion`. Pure function of its inputs; neither endpoint is
    /// touched.
    pub fn edge_between(
        id: u64,
        p1: &Point,
        p2: &Point,
        ring: RingId,
        insertion: usize,
        intent: RenderIntent,
    ) -> Self {
        Self {
            id,
            position: p1.midpoint(p2),
            kind: HandleKind::Edge {
                ring,
                insertion: Some(insertion),
                anchor: *p2,
            },
            sketch: true,
            intent,
            opacity: EDGE_HANDLE_OPACITY,
        }
    }

    /// Handle for a point of a loose point geometry.
    pub fn loose(id: u64, position: Point, index: usize, intent: RenderIntent) -> Self {
        Self {
            id,
            position,
            kind: HandleKind::Loose { index },
            sketch: true,
            intent,
            opacity: 1.0,
        }
    }

    /// Whole-geometry translate handle.
    pub fn translate(id: u64, position: Point, intent: RenderIntent) -> Self {
        Self {
            id,
            position,
            kind: HandleKind::Translate,
            sketch: true,
            intent,
            opacity: 1.0,
        }
    }
}

/// The live handle sets for the selected feature.
///
/// Non-empty only while a feature is selected; rebuilt wholesale after
/// any structural change.
#[derive(Debug, Clone, Default)]
pub struct HandleSet {
    /// Corner and loose handles, in collection order.
    pub corners: SmallVec<[VertexHandle; 8]>,
    /// Edge-midpoint handles. Recomputed, never persisted, across any
    /// geometry mutation.
    pub edges: SmallVec<[VertexHandle; 8]>,
    /// Whole-geometry translate handle.
    pub translate: Option<VertexHandle>,
}

impl HandleSet {
    pub fn clear(&mut self) {
        self.corners.clear();
        self.edges.clear();
        self.translate = None;
    }

    pub fn is_empty(&self) -> bool {
        self.corners.is_empty() && self.edges.is_empty() && self.translate.is_none()
    }

    /// Every live handle id, in paint order.
    pub fn ids(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self
            .edges
            .iter()
            .chain(self.corners.iter())
            .map(|h| h.id)
            .collect();
        if let Some(t) = &self.translate {
            ids.push(t.id);
        }
        ids
    }

    pub fn get(&self, id: u64) -> Option<&VertexHandle> {
        self.corners
            .iter()
            .chain(self.edges.iter())
            .chain(self.translate.iter())
            .find(|h| h.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut VertexHandle> {
        self.corners
            .iter_mut()
            .chain(self.edges.iter_mut())
            .chain(self.translate.iter_mut())
            .find(|h| h.id == id)
    }

    /// The corner handle bound to `(ring, index)`.
    pub fn corner_at_mut(&mut self, ring: RingId, index: usize) -> Option<&mut VertexHandle> {
        self.corners.iter_mut().find(|h| {
            matches!(h.kind, HandleKind::Corner { ring: r, index: i } if r == ring && i == index)
        })
    }

    /// Nearest handle within `tol`. Distance ties go to the handle
    /// painted on top: corners before edges before the translate handle.
    pub fn hit_test(&self, pos: &Point, tol: f64) -> Option<u64> {
        nearest(
            self.corners
                .iter()
                .chain(self.edges.iter())
                .chain(self.translate.iter()),
            pos,
            tol,
        )
    }

    /// Drops every edge handle except `keep`, returning the dropped ids.
    pub fn retain_edges(&mut self, keep: Option<u64>) -> Vec<u64> {
        let mut dropped = Vec::new();
        self.edges.retain(|h| {
            if Some(h.id) == keep {
                true
            } else {
                dropped.push(h.id);
                false
            }
        });
        dropped
    }

    /// Shifts every handle position, for whole-geometry translation.
    pub fn translate_all(&mut self, dx: f64, dy: f64) {
        for h in self
            .corners
            .iter_mut()
            .chain(self.edges.iter_mut())
            .chain(self.translate.iter_mut())
        {
            h.position.translate(dx, dy);
        }
    }
}

fn nearest<'a>(
    handles: impl Iterator<Item = &'a VertexHandle>,
    pos: &Point,
    tol: f64,
) -> Option<u64> {
    let mut best: Option<(u64, f64)> = None;
    for h in handles {
        let d = h.position.distance_to(pos);
        if d <= tol && best.is_none_or(|(_, bd)| d < bd) {
            best = Some((h.id, d));
        }
    }
    best.map(|(id, _)| id)
}
