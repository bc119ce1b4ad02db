//! The modify control: selection lifecycle, drag dispatch, and the
//! constraint step, wired to a host rendering layer.
//!
//! Everything runs synchronously inside the pointer/keyboard handlers the
//! host dispatches; each press/move/release runs to completion before the
//! next event arrives, so every redraw sees a consistent geometry.

use std::collections::HashMap;

use tracing::{debug, trace};

use featkit_core::constants::COORD_TOLERANCE;
use featkit_core::event_bus::{EditEvent, EventBus, FeatureEvent, VertexEvent};
use featkit_core::{
    EditError, Geometry, ModifyListener, ModifyListenerHandle, PixelPoint, Point, RenderIntent,
    Result, RingId,
};

use crate::constraint;
use crate::drag::Interaction;
use crate::feature_store::FeatureStore;
use crate::handles::{collect_handles, FullEdit, HandleIds, HandleStrategy, SegmentEdit};
use crate::layer::EditLayer;
use crate::options::ModifyOptions;
use crate::vertex::{HandleKind, HandleSet, VertexHandle};
use crate::viewport::Viewport;

/// Keyboard code that removes the corner under the last press.
pub const KEY_DELETE: u32 = 46;

/// How far beyond the pick radius the segment-local strategy looks for
/// segments around the pointer.
const SEGMENT_FOCUS_FACTOR: f64 = 2.0;

/// Interactive editor for one feature at a time.
///
/// Owns the feature store, the live handle set, and the interaction state
/// machine. Renders through an [`EditLayer`], and notifies through its
/// [`EventBus`] plus any registered [`ModifyListener`]s.
pub struct ModifyControl {
    store: FeatureStore,
    viewport: Viewport,
    options: ModifyOptions,
    events: EventBus,
    strategy: Box<dyn HandleStrategy>,
    handles: HandleSet,
    handle_ids: HandleIds,
    interaction: Interaction,
    selected: Option<u64>,
    modified: bool,
    /// Pre-edit geometry keyed to the feature it was captured from.
    snapshot: Option<(u64, Geometry)>,
    /// Corner handle under the most recent press, for keyboard edits.
    last_corner: Option<u64>,
    listeners: HashMap<u64, Box<dyn ModifyListener>>,
    next_listener: u64,
}

impl std::fmt::Debug for ModifyControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModifyControl")
            .field("selected", &self.selected)
            .field("interaction", &self.interaction)
            .field("modified", &self.modified)
            .field("features", &self.store.len())
            .finish_non_exhaustive()
    }
}

impl ModifyControl {
    /// Builds a control from options.
    ///
    /// Requesting `by_segment` without `index_bounds` fails here: the
    /// segment index cannot be seeded, and the control would be unusable.
    pub fn new(options: ModifyOptions) -> Result<Self> {
        let strategy: Box<dyn HandleStrategy> = if options.by_segment {
            let bounds = options
                .index_bounds
                .ok_or_else(|| EditError::MissingSegmentIndex {
                    reason: "by_segment requires index_bounds".to_string(),
                })?;
            Box::new(SegmentEdit::new(bounds))
        } else {
            Box::new(FullEdit)
        };
        Ok(Self {
            store: FeatureStore::new(),
            viewport: Viewport::default(),
            options,
            events: EventBus::new(),
            strategy,
            handles: HandleSet::default(),
            handle_ids: HandleIds::default(),
            interaction: Interaction::Idle,
            selected: None,
            modified: false,
            snapshot: None,
            last_corner: None,
            listeners: HashMap::new(),
            next_listener: 0,
        })
    }

    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut FeatureStore {
        &mut self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// The notification bus for this editing surface.
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn options(&self) -> &ModifyOptions {
        &self.options
    }

    /// Id of the feature under edit, if any.
    pub fn selected(&self) -> Option<u64> {
        self.selected
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    /// Whether any geometry edit happened since the current selection
    /// started.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// The live handle set (empty unless a feature is selected).
    pub fn handles(&self) -> &HandleSet {
        &self.handles
    }

    /// Registers a lifecycle listener.
    pub fn add_listener(&mut self, listener: Box<dyn ModifyListener>) -> ModifyListenerHandle {
        self.next_listener += 1;
        self.listeners.insert(self.next_listener, listener);
        ModifyListenerHandle(self.next_listener)
    }

    /// Removes a listener; returns whether it was registered.
    pub fn remove_listener(&mut self, handle: ModifyListenerHandle) -> bool {
        self.listeners.remove(&handle.0).is_some()
    }

    // ---- selection lifecycle ------------------------------------------------

    /// Puts feature `id` under edit.
    ///
    /// No-op when `id` is already selected, when its geometry kind is not
    /// in the configured allow-list, or when a guard cancels the
    /// before-modification notification. In every case the pre-edit
    /// snapshot is captured first if none is recorded yet. Returns
    /// whether the feature ended up selected.
    pub fn select_feature(&mut self, id: u64, layer: &mut dyn EditLayer) -> Result<bool> {
        let Some(feature) = self.store.get(id) else {
            return Err(EditError::FeatureNotFound { id }.into());
        };
        // Baseline for later modification reporting; captured even when
        // the type filter blocks the selection below.
        if feature.original.is_none()
            && self.snapshot.as_ref().map(|(sid, _)| *sid) != Some(id)
        {
            self.snapshot = Some((id, feature.geometry.clone()));
        }
        if self.selected == Some(id) {
            return Ok(true);
        }
        if let Some(allowed) = &self.options.geometry_types {
            if !allowed.contains(&feature.geometry.kind()) {
                debug!(feature = id, "selection ignored: geometry kind not editable");
                return Ok(false);
            }
        }
        if !self
            .events
            .publish_guarded(EditEvent::Feature(FeatureEvent::BeforeModified { feature: id }))
        {
            debug!(feature = id, "selection cancelled by guard");
            return Ok(false);
        }
        if let Some(previous) = self.selected {
            self.unselect_feature(previous, layer);
        }
        self.selected = Some(id);
        layer.feature_selected(id);
        if let Some(feature) = self.store.get(id) {
            layer.draw_feature(feature, RenderIntent::Select);
        }
        self.modified = false;
        self.rebuild_handles(layer);
        if let Some(feature) = self.store.get(id) {
            for listener in self.listeners.values() {
                listener.on_modification_start(feature);
            }
        }
        self.interaction = Interaction::Selected;
        debug!(feature = id, "selection started");
        Ok(true)
    }

    /// Ends editing.
    ///
    /// Tolerates an `id` that is not the current selection: bookkeeping
    /// is cleared for whatever is selected, while `id` only names the
    /// feature in the closing notification.
    pub fn unselect_feature(&mut self, id: u64, layer: &mut dyn EditLayer) {
        self.destroy_handles(layer);
        if let Some(current) = self.selected.take() {
            layer.feature_deselected(current);
            if let Some(feature) = self.store.get(current) {
                layer.draw_feature(feature, RenderIntent::Default);
            }
        }
        self.interaction = Interaction::Idle;
        self.last_corner = None;
        let modified = self.modified;
        if let Some(feature) = self.store.get(id) {
            for listener in self.listeners.values() {
                listener.on_modification_end(feature);
            }
        }
        self.events
            .publish(EditEvent::Feature(FeatureEvent::AfterModified {
                feature: id,
                modified,
            }))
            .ok();
        self.modified = false;
        debug!(feature = id, modified, "selection ended");
    }

    // ---- handle maintenance -------------------------------------------------

    /// Drops every live handle from the layer, silently.
    fn destroy_handles(&mut self, layer: &mut dyn EditLayer) {
        if self.handles.is_empty() {
            return;
        }
        let ids = self.handles.ids();
        layer.remove_handles(&ids, true);
        self.handles.clear();
    }

    /// Rebuilds the handle sets from the selected feature's current
    /// geometry and registers them with the layer in one batch, edge
    /// handles first so corner handles paint on top.
    pub fn rebuild_handles(&mut self, layer: &mut dyn EditLayer) {
        self.destroy_handles(layer);
        let Some(id) = self.selected else {
            return;
        };
        let Some(feature) = self.store.get(id) else {
            return;
        };
        self.strategy.geometry_changed(feature);
        self.handles = collect_handles(
            feature,
            self.strategy.as_ref(),
            &mut self.handle_ids,
            self.options.vertex_render_intent,
        );
        let mut batch: Vec<VertexHandle> =
            Vec::with_capacity(self.handles.edges.len() + self.handles.corners.len() + 1);
        batch.extend(self.handles.edges.iter().cloned());
        batch.extend(self.handles.corners.iter().cloned());
        if let Some(t) = &self.handles.translate {
            batch.push(t.clone());
        }
        layer.add_handles(&batch, false);
    }

    // ---- pointer dispatch ---------------------------------------------------

    /// Press phase of the pointer cycle.
    ///
    /// A drag only begins on a live handle. A press on an unselected
    /// feature's own point selects it first (unless `standalone`); a
    /// press on the selected feature marks it for deselection when
    /// `toggle` is on; a miss marks the selection for deselection when
    /// `clickout` is on.
    pub fn press(&mut self, pixel: PixelPoint, layer: &mut dyn EditLayer) -> Result<()> {
        let pos = self.viewport.pixel_to_plane(&pixel);
        let tol = self.viewport.plane_tolerance(self.options.pick_tolerance);

        if let Some(handle) = self.handles.hit_test(&pos, tol) {
            if self
                .handles
                .get(handle)
                .is_some_and(|h| h.kind.is_corner())
            {
                self.last_corner = Some(handle);
            }
            trace!(handle, "drag started");
            self.interaction = Interaction::Dragging { handle, last: pos };
            return Ok(());
        }

        if let Some(hit) = self.store.feature_at(&pos, tol) {
            if self.selected == Some(hit) {
                if self.options.toggle {
                    self.interaction = Interaction::PendingDeselect;
                }
            } else if !self.options.standalone {
                // An edit drag never starts on an unrelated feature;
                // selection must happen first.
                self.select_feature(hit, layer)?;
            }
            return Ok(());
        }

        if self.options.clickout && self.selected.is_some() {
            self.interaction = Interaction::PendingDeselect;
        }
        Ok(())
    }

    /// Move phase of the pointer cycle.
    ///
    /// Ignored outside the canvas unless `document_drag`. Movement
    /// cancels a pending deselect; with a drag in progress it applies
    /// one constraint step.
    pub fn pointer_move(&mut self, pixel: PixelPoint, layer: &mut dyn EditLayer) -> Result<()> {
        if !self.options.document_drag && !self.viewport.contains_pixel(&pixel) {
            return Ok(());
        }
        let pos = self.viewport.pixel_to_plane(&pixel);
        match self.interaction {
            Interaction::PendingDeselect => {
                self.interaction = Interaction::Selected;
                Ok(())
            }
            Interaction::Dragging { handle, last } => {
                self.drag_step(handle, last, pos, Some(pixel), layer)?;
                self.interaction = Interaction::Dragging { handle, last: pos };
                Ok(())
            }
            _ => {
                // Keep the segment-local strategy centered on the pointer.
                if self.selected.is_some() && self.options.by_segment {
                    let tol = self.viewport.plane_tolerance(self.options.pick_tolerance);
                    self.strategy.set_focus(pos, tol * SEGMENT_FOCUS_FACTOR);
                    self.rebuild_handles(layer);
                }
                Ok(())
            }
        }
    }

    /// Release phase: completes a drag or performs a pending deselect.
    pub fn release(&mut self, _pixel: PixelPoint, layer: &mut dyn EditLayer) -> Result<()> {
        match self.interaction {
            Interaction::PendingDeselect => {
                if let Some(id) = self.selected {
                    self.unselect_feature(id, layer);
                } else {
                    self.interaction = Interaction::Idle;
                }
                Ok(())
            }
            Interaction::Dragging { .. } => {
                self.drag_complete(layer);
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Keyboard dispatch. DELETE removes the corner under the last press
    /// when its ring keeps more than four distinct vertices.
    pub fn key_down(&mut self, code: u32, layer: &mut dyn EditLayer) -> Result<()> {
        if code != KEY_DELETE {
            return Ok(());
        }
        let Some(feature_id) = self.selected else {
            return Ok(());
        };
        let Some(handle_id) = self.last_corner else {
            return Ok(());
        };
        let Some(handle) = self.handles.get(handle_id) else {
            return Ok(());
        };
        let HandleKind::Corner { ring, index } = handle.kind else {
            return Ok(());
        };

        let removed = {
            let Some(feature) = self.store.get_mut(feature_id) else {
                return Ok(());
            };
            let Some(r) = feature.geometry.ring_mut(ring) else {
                return Ok(());
            };
            if r.vertex_count() <= 4 {
                debug!(
                    feature = feature_id,
                    "vertex removal refused: ring at rectangle minimum"
                );
                false
            } else {
                r.remove_vertex(index)?;
                true
            }
        };
        if removed {
            self.modified = true;
            self.last_corner = None;
            self.drag_complete(layer);
        }
        Ok(())
    }

    // ---- constraint dispatch ------------------------------------------------

    /// One constraint step for the dragged handle.
    fn drag_step(
        &mut self,
        handle_id: u64,
        last: Point,
        pos: Point,
        pixel: Option<PixelPoint>,
        layer: &mut dyn EditLayer,
    ) -> Result<()> {
        let Some(feature_id) = self.selected else {
            return Ok(());
        };
        let Some(handle) = self.handles.get(handle_id).cloned() else {
            return Ok(());
        };
        self.modified = true;
        let dx = pos.x - last.x;
        let dy = pos.y - last.y;

        match handle.kind {
            HandleKind::Translate => {
                if let Some(feature) = self.store.get_mut(feature_id) {
                    feature.geometry.translate(dx, dy);
                }
                self.handles.translate_all(dx, dy);
                for h in self.handles.corners.iter().chain(self.handles.edges.iter()) {
                    layer.draw_handle(h);
                }
            }
            HandleKind::Loose { index } => {
                if let Some(feature) = self.store.get_mut(feature_id) {
                    match &mut feature.geometry {
                        Geometry::Point(p) => *p = pos,
                        Geometry::MultiPoint(points) => {
                            if let Some(p) = points.get_mut(index) {
                                *p = pos;
                            }
                        }
                        _ => {}
                    }
                }
                if let Some(h) = self.handles.get_mut(handle_id) {
                    h.position = pos;
                }
                self.events
                    .publish(EditEvent::Vertex(VertexEvent::Modified {
                        feature: feature_id,
                        vertex: pos,
                        pixel,
                    }))
                    .ok();
            }
            HandleKind::Corner { ring, index } => {
                let moved = {
                    let Some(feature) = self.store.get_mut(feature_id) else {
                        return Ok(());
                    };
                    let Some(r) = feature.geometry.ring_mut(ring) else {
                        return Ok(());
                    };
                    constraint::move_corner(r, index, pos, COORD_TOLERANCE)?
                };
                if let Some(h) = self.handles.get_mut(handle_id) {
                    h.position = pos;
                }
                self.sync_corner_handles(feature_id, ring, moved, layer);
                self.events
                    .publish(EditEvent::Vertex(VertexEvent::Modified {
                        feature: feature_id,
                        vertex: pos,
                        pixel,
                    }))
                    .ok();
                // Every edge midpoint is stale the instant a corner moves.
                let dropped = self.handles.retain_edges(None);
                if !dropped.is_empty() {
                    layer.remove_handles(&dropped, true);
                }
            }
            HandleKind::Edge {
                ring,
                insertion,
                anchor,
            } => {
                let slot = match insertion {
                    Some(slot) => slot,
                    None => {
                        // Re-derive a slot invalidated by an earlier edit
                        // from the retained neighbor vertex.
                        let Some(recovered) = self.recover_edge_slot(feature_id, ring, &anchor)
                        else {
                            trace!(handle = handle_id, "stale edge handle had no anchor match");
                            return Ok(());
                        };
                        recovered
                    }
                };
                let moved = {
                    let Some(feature) = self.store.get_mut(feature_id) else {
                        return Ok(());
                    };
                    let Some(r) = feature.geometry.ring_mut(ring) else {
                        return Ok(());
                    };
                    constraint::move_edge(r, slot, pos, COORD_TOLERANCE)?
                };
                let new_anchor = self
                    .store
                    .get(feature_id)
                    .and_then(|f| f.geometry.ring(ring))
                    .and_then(|r| r.vertex(moved.next));
                if let Some(h) = self.handles.get_mut(handle_id) {
                    h.position = pos;
                    if let Some(anchor) = new_anchor {
                        h.kind = HandleKind::Edge {
                            ring,
                            insertion: Some(slot),
                            anchor,
                        };
                    }
                }
                self.sync_corner_handles(feature_id, ring, moved, layer);
                // Sibling edge handles are stale the instant a structural
                // edit occurs; only the dragged one survives until the
                // rebuild at drag completion.
                let dropped = self.handles.retain_edges(Some(handle_id));
                if !dropped.is_empty() {
                    layer.remove_handles(&dropped, true);
                }
            }
        }

        // Parent feature, then the dragged handle on top so it stays
        // available for subsequent pointer-out handling.
        let intent = if self.options.standalone {
            RenderIntent::Default
        } else {
            RenderIntent::Select
        };
        if let Some(feature) = self.store.get(feature_id) {
            layer.draw_feature(feature, intent);
        }
        if let Some(h) = self.handles.get(handle_id) {
            layer.draw_handle(h);
        }
        Ok(())
    }

    /// Finds the ring slot whose vertex coincides with a stale edge
    /// handle's retained neighbor.
    fn recover_edge_slot(&self, feature_id: u64, ring: RingId, anchor: &Point) -> Option<usize> {
        let r = self.store.get(feature_id)?.geometry.ring(ring)?;
        let found = r.find_vertex(anchor, COORD_TOLERANCE)?;
        Some(if found == 0 { r.vertex_count() } else { found })
    }

    /// Refreshes and redraws the corner handles the constraint step moved.
    fn sync_corner_handles(
        &mut self,
        feature_id: u64,
        ring: RingId,
        moved: constraint::Propagated,
        layer: &mut dyn EditLayer,
    ) {
        let Some(r) = self.store.get(feature_id).and_then(|f| f.geometry.ring(ring)) else {
            return;
        };
        for index in [moved.prev, moved.next] {
            let Some(p) = r.vertex(index) else {
                continue;
            };
            if let Some(h) = self.handles.corner_at_mut(ring, index) {
                h.position = p;
                layer.draw_handle(h);
            }
        }
    }

    /// Completes a drag: full handle rebuild, lifecycle transition, and
    /// modification reporting.
    pub fn drag_complete(&mut self, layer: &mut dyn EditLayer) {
        let Some(id) = self.selected else {
            self.interaction = Interaction::Idle;
            return;
        };
        self.rebuild_handles(layer);
        if let Some(feature) = self.store.get_mut(id) {
            feature.mark_updated();
            if self.modified {
                if let Some((sid, geometry)) = self.snapshot.take() {
                    if sid == id && feature.original.is_none() {
                        feature.original = Some(geometry);
                    } else {
                        // captured for a different feature; keep it
                        self.snapshot = Some((sid, geometry));
                    }
                }
            }
        }
        let modified = self.modified;
        if let Some(feature) = self.store.get(id) {
            for listener in self.listeners.values() {
                listener.on_modification(feature);
            }
        }
        self.events
            .publish(EditEvent::Feature(FeatureEvent::Modified {
                feature: id,
                modified,
            }))
            .ok();
        self.interaction = Interaction::Selected;
        debug!(feature = id, "drag complete");
    }
}
