//! Selection lifecycle and notification ordering.

use std::sync::{Arc, Mutex};

use featkit_core::event_bus::{EditEvent, EventFilter, FeatureEvent};
use featkit_core::{Feature, Geometry, GeometryKind, Point, RenderIntent, Ring};
use featkit_modify::{EditLayer, Interaction, ModifyControl, ModifyOptions, VertexHandle};

/// Layer that records every call so tests can assert on the traffic.
#[derive(Debug, Default)]
struct RecordingLayer {
    added: Vec<u64>,
    removed: Vec<u64>,
    drawn: Vec<(u64, RenderIntent)>,
    selection: Vec<u64>,
}

impl EditLayer for RecordingLayer {
    fn add_handles(&mut self, handles: &[VertexHandle], _silent: bool) {
        self.added.extend(handles.iter().map(|h| h.id));
    }

    fn remove_handles(&mut self, ids: &[u64], _silent: bool) {
        self.removed.extend_from_slice(ids);
    }

    fn draw_feature(&mut self, feature: &Feature, intent: RenderIntent) {
        self.drawn.push((feature.id, intent));
    }

    fn feature_selected(&mut self, id: u64) {
        if !self.selection.contains(&id) {
            self.selection.push(id);
        }
    }

    fn feature_deselected(&mut self, id: u64) {
        self.selection.retain(|&fid| fid != id);
    }
}

fn rect_control() -> (ModifyControl, u64) {
    let mut control = ModifyControl::new(ModifyOptions::default()).unwrap();
    let id = control
        .store_mut()
        .add_geometry(Geometry::Ring(Ring::rect(0.0, 0.0, 4.0, 2.0)));
    (control, id)
}

fn record_events(control: &ModifyControl) -> Arc<Mutex<Vec<EditEvent>>> {
    let log = Arc::new(Mutex::new(Vec::new()));
    let sink = log.clone();
    control.events().subscribe(EventFilter::All, move |event| {
        sink.lock().unwrap().push(event);
    });
    log
}

#[test]
fn selecting_b_deselects_a_first() {
    let mut control = ModifyControl::new(ModifyOptions::default()).unwrap();
    let a = control
        .store_mut()
        .add_geometry(Geometry::Ring(Ring::rect(0.0, 0.0, 4.0, 2.0)));
    let b = control
        .store_mut()
        .add_geometry(Geometry::Ring(Ring::rect(10.0, 10.0, 4.0, 2.0)));
    let mut layer = RecordingLayer::default();

    control.select_feature(a, &mut layer).unwrap();
    let a_handles = control.handles().ids();
    control.select_feature(b, &mut layer).unwrap();

    assert_eq!(control.selected(), Some(b));
    assert_eq!(layer.selection, vec![b]);
    // every one of A's handles was destroyed
    for id in a_handles {
        assert!(layer.removed.contains(&id));
    }
}

#[test]
fn unselect_emits_exactly_one_after_modified() {
    let (mut control, id) = rect_control();
    let mut layer = RecordingLayer::default();
    control.select_feature(id, &mut layer).unwrap();
    let log = record_events(&control);

    control.unselect_feature(id, &mut layer);

    let events = log.lock().unwrap();
    let after: Vec<&EditEvent> = events
        .iter()
        .filter(|e| matches!(e, EditEvent::Feature(FeatureEvent::AfterModified { .. })))
        .collect();
    assert_eq!(after.len(), 1);
    if let EditEvent::Feature(FeatureEvent::AfterModified { feature, modified }) = after[0] {
        assert_eq!(*feature, id);
        assert!(!modified, "no drag happened since selection");
    }
}

#[test]
fn guard_cancels_selection_before_any_state_change() {
    let (mut control, id) = rect_control();
    control.events().guard(EventFilter::All, |_| false);
    let mut layer = RecordingLayer::default();

    let selected = control.select_feature(id, &mut layer).unwrap();

    assert!(!selected);
    assert_eq!(control.selected(), None);
    assert!(control.handles().is_empty());
    assert!(layer.added.is_empty());
    assert!(layer.selection.is_empty());
}

#[test]
fn type_filter_silently_ignores_selection() {
    let mut control = ModifyControl::new(ModifyOptions {
        geometry_types: Some(vec![GeometryKind::MultiPoint]),
        ..Default::default()
    })
    .unwrap();
    let id = control
        .store_mut()
        .add_geometry(Geometry::Ring(Ring::rect(0.0, 0.0, 4.0, 2.0)));
    let mut layer = RecordingLayer::default();

    let selected = control.select_feature(id, &mut layer).unwrap();
    assert!(!selected);
    assert_eq!(control.selected(), None);

    // allowed kinds still select
    let mp = control
        .store_mut()
        .add_geometry(Geometry::MultiPoint(vec![Point::new(0.0, 0.0)]));
    assert!(control.select_feature(mp, &mut layer).unwrap());
}

#[test]
fn unselect_with_foreign_id_clears_current_selection() {
    let mut control = ModifyControl::new(ModifyOptions::default()).unwrap();
    let a = control
        .store_mut()
        .add_geometry(Geometry::Ring(Ring::rect(0.0, 0.0, 4.0, 2.0)));
    let b = control
        .store_mut()
        .add_geometry(Geometry::Ring(Ring::rect(10.0, 10.0, 4.0, 2.0)));
    let mut layer = RecordingLayer::default();
    control.select_feature(a, &mut layer).unwrap();
    let log = record_events(&control);

    // passing B only names the notification; A's bookkeeping is cleared
    control.unselect_feature(b, &mut layer);

    assert_eq!(control.selected(), None);
    assert!(control.handles().is_empty());
    let events = log.lock().unwrap();
    assert!(events
        .iter()
        .any(|e| matches!(e, EditEvent::Feature(FeatureEvent::AfterModified { feature, .. }) if *feature == b)));
}

#[test]
fn handle_batch_paints_edges_below_corners() {
    let (mut control, id) = rect_control();
    let mut layer = RecordingLayer::default();
    control.select_feature(id, &mut layer).unwrap();

    // 4 edges + 4 corners + translate, registered in paint order
    assert_eq!(layer.added.len(), 9);
    let edge_ids: Vec<u64> = control.handles().edges.iter().map(|h| h.id).collect();
    let corner_ids: Vec<u64> = control.handles().corners.iter().map(|h| h.id).collect();
    let last_edge_pos = layer
        .added
        .iter()
        .rposition(|id| edge_ids.contains(id))
        .unwrap();
    let first_corner_pos = layer
        .added
        .iter()
        .position(|id| corner_ids.contains(id))
        .unwrap();
    assert!(last_edge_pos < first_corner_pos);
}

#[test]
fn listener_callbacks_bracket_the_selection() {
    struct Tally(Arc<Mutex<Vec<&'static str>>>);
    impl featkit_core::ModifyListener for Tally {
        fn on_modification_start(&self, _f: &Feature) {
            self.0.lock().unwrap().push("start");
        }
        fn on_modification(&self, _f: &Feature) {
            self.0.lock().unwrap().push("modify");
        }
        fn on_modification_end(&self, _f: &Feature) {
            self.0.lock().unwrap().push("end");
        }
    }

    let (mut control, id) = rect_control();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let handle = control.add_listener(Box::new(Tally(calls.clone())));
    let mut layer = RecordingLayer::default();

    control.select_feature(id, &mut layer).unwrap();
    control.drag_complete(&mut layer);
    control.unselect_feature(id, &mut layer);

    assert_eq!(*calls.lock().unwrap(), vec!["start", "modify", "end"]);
    assert!(control.remove_listener(handle));
    assert!(!control.remove_listener(handle));
}

#[test]
fn interaction_returns_to_idle_after_unselect() {
    let (mut control, id) = rect_control();
    let mut layer = RecordingLayer::default();
    control.select_feature(id, &mut layer).unwrap();
    assert_eq!(control.interaction(), Interaction::Selected);
    control.unselect_feature(id, &mut layer);
    assert!(control.interaction().is_idle());
}
