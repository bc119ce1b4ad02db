//! Quadtree spatial index.
//!
//! Backs the segment-local handle strategy: segment bounding boxes go in,
//! and pointer-vicinity queries come out without scanning every segment.

use featkit_core::Bounds;

/// Aggregate statistics for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexStats {
    pub total_nodes: usize,
    pub total_items: usize,
}

#[derive(Debug, Clone)]
struct QuadtreeNode {
    bounds: Bounds,
    items: Vec<(u64, Bounds)>,
    children: Option<Box<[QuadtreeNode; 4]>>,
    depth: usize,
}

impl QuadtreeNode {
    fn new(bounds: Bounds, depth: usize) -> Self {
        Self {
            bounds,
            items: Vec::new(),
            children: None,
            depth,
        }
    }

    fn insert(&mut self, id: u64, bounds: &Bounds, max_items: usize, max_depth: usize) {
        if let Some(children) = &mut self.children {
            if let Some(child) = children.iter_mut().find(|c| c.bounds.contains(bounds)) {
                child.insert(id, bounds, max_items, max_depth);
                return;
            }
            // straddles child boundaries; stays at this level
            self.items.push((id, *bounds));
            return;
        }

        self.items.push((id, *bounds));
        if self.items.len() > max_items && self.depth < max_depth {
            self.split(max_items, max_depth);
        }
    }

    fn split(&mut self, max_items: usize, max_depth: usize) {
        let (cx, cy) = self.bounds.center();
        let b = self.bounds;
        let quads = [
            Bounds::new(b.min_x, b.min_y, cx, cy),
            Bounds::new(cx, b.min_y, b.max_x, cy),
            Bounds::new(b.min_x, cy, cx, b.max_y),
            Bounds::new(cx, cy, b.max_x, b.max_y),
        ];
        let mut children = Box::new(quads.map(|q| QuadtreeNode::new(q, self.depth + 1)));

        let items = std::mem::take(&mut self.items);
        for (id, ib) in items {
            if let Some(child) = children.iter_mut().find(|c| c.bounds.contains(&ib)) {
                child.insert(id, &ib, max_items, max_depth);
            } else {
                self.items.push((id, ib));
            }
        }
        self.children = Some(children);
    }

    fn remove(&mut self, id: u64, bounds: &Bounds) -> bool {
        if !self.bounds.intersects(bounds) {
            return false;
        }
        if let Some(pos) = self.items.iter().position(|(iid, _)| *iid == id) {
            self.items.remove(pos);
            return true;
        }
        if let Some(children) = &mut self.children {
            return children.iter_mut().any(|c| c.remove(id, bounds));
        }
        false
    }

    fn query(&self, area: &Bounds, out: &mut Vec<u64>) {
        if !self.bounds.intersects(area) {
            return;
        }
        for (id, ib) in &self.items {
            if ib.intersects(area) {
                out.push(*id);
            }
        }
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.query(area, out);
            }
        }
    }

    fn stats(&self, stats: &mut IndexStats) {
        stats.total_nodes += 1;
        stats.total_items += self.items.len();
        if let Some(children) = &self.children {
            for c in children.iter() {
                c.stats(stats);
            }
        }
    }
}

/// Quadtree over item bounding boxes.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    root: QuadtreeNode,
    max_items: usize,
    max_depth: usize,
}

impl SpatialIndex {
    /// Creates an index over `bounds` that splits nodes holding more than
    /// `max_items`, down to `max_depth` levels.
    pub fn new(bounds: Bounds, max_items: usize, max_depth: usize) -> Self {
        Self {
            root: QuadtreeNode::new(bounds, 0),
            max_items,
            max_depth,
        }
    }

    /// Inserts an item by its bounding box.
    pub fn insert(&mut self, id: u64, bounds: &Bounds) {
        self.root.insert(id, bounds, self.max_items, self.max_depth);
    }

    /// Removes an item previously inserted with `bounds`.
    ///
    /// Returns true if the item was found and removed.
    pub fn remove(&mut self, id: u64, bounds: &Bounds) -> bool {
        self.root.remove(id, bounds)
    }

    /// Ids of items whose bounds intersect `area`.
    pub fn query(&self, area: &Bounds) -> Vec<u64> {
        let mut out = Vec::new();
        self.root.query(area, &mut out);
        out
    }

    /// Ids of items whose bounds cover the point.
    pub fn query_point(&self, x: f64, y: f64) -> Vec<u64> {
        self.query(&Bounds::new(x, y, x, y))
    }

    /// Drops every item, keeping the configured bounds.
    pub fn clear(&mut self) {
        self.root = QuadtreeNode::new(self.root.bounds, 0);
    }

    /// Aggregate node/item counts.
    pub fn stats(&self) -> IndexStats {
        let mut stats = IndexStats {
            total_nodes: 0,
            total_items: 0,
        };
        self.root.stats(&mut stats);
        stats
    }
}

impl Default for SpatialIndex {
    /// Large world bounds so plane coordinates far from the origin still
    /// index correctly.
    fn default() -> Self {
        Self::new(Bounds::new(-1.0e6, -1.0e6, 1.0e6, 1.0e6), 8, 16)
    }
}
