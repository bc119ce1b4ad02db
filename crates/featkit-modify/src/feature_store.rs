//! Feature storage with stable draw order.

use std::collections::HashMap;

use featkit_core::{Feature, Geometry, Point};

/// Owns the features shown on one editing surface.
///
/// Features are addressed by id; insertion order doubles as draw order so
/// hit tests can walk topmost-first.
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    features: HashMap<u64, Feature>,
    draw_order: Vec<u64>,
    next_id: u64,
}

impl FeatureStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            features: HashMap::new(),
            draw_order: Vec::new(),
            next_id: 1,
        }
    }

    /// Generates a new unique ID.
    pub fn generate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Sets the next ID to be generated.
    pub fn set_next_id(&mut self, id: u64) {
        self.next_id = id;
    }

    /// Inserts a feature under `id`, keeping its draw position when the
    /// id already exists.
    pub fn insert(&mut self, id: u64, feature: Feature) {
        if !self.features.contains_key(&id) {
            self.draw_order.push(id);
        }
        self.features.insert(id, feature);
    }

    /// Wraps a geometry in a fresh feature and returns its id.
    pub fn add_geometry(&mut self, geometry: Geometry) -> u64 {
        let id = self.generate_id();
        self.insert(id, Feature::new(id, geometry));
        id
    }

    pub fn get(&self, id: u64) -> Option<&Feature> {
        self.features.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Feature> {
        self.features.get_mut(&id)
    }

    /// Removes and returns a feature.
    pub fn remove(&mut self, id: u64) -> Option<Feature> {
        self.draw_order.retain(|&fid| fid != id);
        self.features.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Features in draw order (bottom first).
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.draw_order
            .iter()
            .filter_map(move |id| self.features.get(id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Feature> {
        self.features.values_mut()
    }

    /// Feature ids in draw order (bottom first).
    pub fn draw_order_iter(&self) -> impl Iterator<Item = u64> + '_ {
        self.draw_order.iter().copied()
    }

    /// Topmost feature whose geometry contains `point`.
    pub fn feature_at(&self, point: &Point, tolerance: f64) -> Option<u64> {
        self.draw_order
            .iter()
            .rev()
            .find(|id| {
                self.features
                    .get(id)
                    .is_some_and(|f| f.geometry.contains(point, tolerance))
            })
            .copied()
    }
}
