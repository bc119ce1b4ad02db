//! Handle materialization from feature geometry.
//!
//! After any structural change the live handle set is rebuilt from
//! scratch: silent removal of every current handle, then a fresh
//! depth-first walk of the selected geometry. Nothing about a handle
//! survives a rebuild except its visual position.

use featkit_core::{Bounds, Feature, Geometry, Point, RenderIntent, Ring, RingId};

use crate::spatial_index::SpatialIndex;
use crate::vertex::{HandleSet, VertexHandle};

/// Chooses which edge midpoints materialize as handles.
///
/// The constraint algorithm is identical under every strategy; a strategy
/// only changes which handles exist at a given moment.
pub trait HandleStrategy: std::fmt::Debug {
    /// Ring slots (1-based, one per segment) whose midpoints get an edge
    /// handle for `ring`.
    fn edge_insertions(&self, ring: &Ring, ring_id: RingId) -> Vec<usize>;

    /// Re-index after the selected feature's geometry changed.
    fn geometry_changed(&mut self, _feature: &Feature) {}

    /// Updates the pointer focus; segment-local strategies narrow their
    /// materialized set around it.
    fn set_focus(&mut self, _focus: Point, _radius: f64) {}
}

/// Materializes an edge handle for every segment.
#[derive(Debug, Clone, Copy, Default)]
pub struct FullEdit;

impl HandleStrategy for FullEdit {
    fn edge_insertions(&self, ring: &Ring, _ring_id: RingId) -> Vec<usize> {
        (1..=ring.vertex_count()).collect()
    }
}

/// Materializes edge handles only for segments near the pointer, backed
/// by a quadtree of segment bounds. Suited to rings with many vertices,
/// where a full handle set would drown the surface.
#[derive(Debug)]
pub struct SegmentEdit {
    index: SpatialIndex,
    /// `(ring, insertion)` per indexed segment, addressed by item id.
    segments: Vec<(RingId, usize)>,
    focus: Option<(Point, f64)>,
}

impl SegmentEdit {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            index: SpatialIndex::new(bounds, 8, 16),
            segments: Vec::new(),
            focus: None,
        }
    }
}

impl HandleStrategy for SegmentEdit {
    fn edge_insertions(&self, _ring: &Ring, ring_id: RingId) -> Vec<usize> {
        let Some((focus, radius)) = self.focus else {
            return Vec::new();
        };
        let area = Bounds::new(
            focus.x - radius,
            focus.y - radius,
            focus.x + radius,
            focus.y + radius,
        );
        let mut slots: Vec<usize> = self
            .index
            .query(&area)
            .into_iter()
            .filter_map(|item| self.segments.get(item as usize))
            .filter(|(rid, _)| *rid == ring_id)
            .map(|(_, insertion)| *insertion)
            .collect();
        slots.sort_unstable();
        slots.dedup();
        slots
    }

    fn geometry_changed(&mut self, feature: &Feature) {
        self.index.clear();
        self.segments.clear();
        for (ring_id, ring) in feature.geometry.rings() {
            let pts = ring.closed_points();
            for i in 0..ring.vertex_count() {
                let a = pts[i];
                let b = pts[i + 1];
                let bounds = Bounds::new(
                    a.x.min(b.x),
                    a.y.min(b.y),
                    a.x.max(b.x),
                    a.y.max(b.y),
                );
                let item = self.segments.len() as u64;
                self.segments.push((ring_id, i + 1));
                self.index.insert(item, &bounds);
            }
        }
    }

    fn set_focus(&mut self, focus: Point, radius: f64) {
        self.focus = Some((focus, radius));
    }
}

/// Allocates handle ids. Ids are monotone per control and never reused,
/// so a stale layer reference can always be told from a live one.
#[derive(Debug, Clone, Default)]
pub struct HandleIds {
    next: u64,
}

impl HandleIds {
    pub fn next_id(&mut self) -> u64 {
        self.next += 1;
        self.next
    }
}

/// Walks `feature`'s geometry depth-first and produces its handle set.
///
/// A bare point yields one handle; a loose point collection yields one
/// per point and no edge handles. Each ring yields one corner handle per
/// distinct vertex (the closing duplicate is skipped) followed by one
/// edge handle per segment the strategy admits, tagged with ring slot
/// `i + 1`. A translate handle at the bounds center completes the set.
pub fn collect_handles(
    feature: &Feature,
    strategy: &dyn HandleStrategy,
    ids: &mut HandleIds,
    intent: RenderIntent,
) -> HandleSet {
    let mut set = HandleSet::default();
    match &feature.geometry {
        Geometry::Point(p) => {
            set.corners
                .push(VertexHandle::loose(ids.next_id(), *p, 0, intent));
        }
        Geometry::MultiPoint(points) => {
            for (i, p) in points.iter().enumerate() {
                set.corners
                    .push(VertexHandle::loose(ids.next_id(), *p, i, intent));
            }
        }
        Geometry::Ring(_) | Geometry::Polygon(_) => {
            for (ring_id, ring) in feature.geometry.rings() {
                collect_ring(ring, ring_id, strategy, ids, intent, &mut set);
            }
        }
    }
    set.translate = Some(VertexHandle::translate(
        ids.next_id(),
        feature.geometry.center(),
        intent,
    ));
    set
}

fn collect_ring(
    ring: &Ring,
    ring_id: RingId,
    strategy: &dyn HandleStrategy,
    ids: &mut HandleIds,
    intent: RenderIntent,
    set: &mut HandleSet,
) {
    for (i, v) in ring.vertices().iter().enumerate() {
        set.corners
            .push(VertexHandle::corner(ids.next_id(), *v, ring_id, i, intent));
    }
    let pts = ring.closed_points();
    for insertion in strategy.edge_insertions(ring, ring_id) {
        if insertion == 0 || insertion > ring.vertex_count() {
            continue;
        }
        set.edges.push(VertexHandle::edge_between(
            ids.next_id(),
            &pts[insertion - 1],
            &pts[insertion],
            ring_id,
            insertion,
            intent,
        ));
    }
}
