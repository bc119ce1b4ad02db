use featkit_core::Bounds;
use featkit_modify::spatial_index::SpatialIndex;

#[test]
fn test_spatial_index_creation() {
    let index = SpatialIndex::new(Bounds::new(-100.0, -100.0, 100.0, 100.0), 8, 16);
    let stats = index.stats();
    assert_eq!(stats.total_items, 0);
    assert_eq!(stats.total_nodes, 1);
}

#[test]
fn test_spatial_index_insert_and_query() {
    let mut index = SpatialIndex::new(Bounds::new(-100.0, -100.0, 100.0, 100.0), 8, 16);

    let bounds1 = Bounds::new(0.0, 0.0, 10.0, 10.0);
    let bounds2 = Bounds::new(5.0, 5.0, 15.0, 15.0);

    index.insert(0, &bounds1);
    index.insert(1, &bounds2);

    let results = index.query(&Bounds::new(7.0, 7.0, 12.0, 12.0));
    assert!(results.contains(&0));
    assert!(results.contains(&1));

    let far = index.query(&Bounds::new(50.0, 50.0, 60.0, 60.0));
    assert!(far.is_empty());
}

#[test]
fn test_spatial_index_query_point() {
    let mut index = SpatialIndex::new(Bounds::new(-100.0, -100.0, 100.0, 100.0), 8, 16);

    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    index.insert(0, &bounds);

    let results = index.query_point(5.0, 5.0);
    assert!(results.contains(&0));

    // outside the root bounds nothing should match
    let results2 = index.query_point(150.0, 150.0);
    assert!(!results2.contains(&0));
}

#[test]
fn test_spatial_index_remove() {
    let mut index = SpatialIndex::new(Bounds::new(-100.0, -100.0, 100.0, 100.0), 8, 16);

    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    index.insert(7, &bounds);
    assert!(index.remove(7, &bounds));
    assert!(!index.remove(7, &bounds));
    assert!(index.query_point(5.0, 5.0).is_empty());
}

#[test]
fn test_spatial_index_clear() {
    let mut index = SpatialIndex::new(Bounds::new(-100.0, -100.0, 100.0, 100.0), 8, 16);

    let bounds = Bounds::new(0.0, 0.0, 10.0, 10.0);
    index.insert(0, &bounds);
    assert!(!index.query_point(5.0, 5.0).is_empty());

    index.clear();
    assert!(index.query_point(5.0, 5.0).is_empty());
}

#[test]
fn test_spatial_index_stats() {
    let mut index = SpatialIndex::new(Bounds::new(-100.0, -100.0, 100.0, 100.0), 8, 16);

    for i in 0..20 {
        let bounds = Bounds::new(
            (i as f64) * 2.0,
            (i as f64) * 2.0,
            (i as f64) * 2.0 + 5.0,
            (i as f64) * 2.0 + 5.0,
        );
        index.insert(i, &bounds);
    }

    let stats = index.stats();
    assert!(stats.total_nodes > 1);
    assert_eq!(stats.total_items, 20);
}

#[test]
fn test_spatial_index_stress() {
    let mut index = SpatialIndex::new(Bounds::new(-10000.0, -10000.0, 10000.0, 10000.0), 8, 16);

    // Insert 1000 items in a grid
    for i in 0..1000u64 {
        let x = ((i % 50) as f64) * 10.0;
        let y = ((i / 50) as f64) * 10.0;
        let bounds = Bounds::new(x, y, x + 5.0, y + 5.0);
        index.insert(i, &bounds);
    }

    let stats = index.stats();
    assert_eq!(stats.total_items, 1000);

    let query_bounds = Bounds::new(0.0, 0.0, 100.0, 100.0);
    let results = index.query(&query_bounds);
    assert!(!results.is_empty());
    assert!(results.len() < 1000);
}

#[test]
fn test_spatial_index_large_coordinates() {
    let mut index = SpatialIndex::default();

    let bounds = Bounds::new(1000.0, 1000.0, 1010.0, 1010.0);
    index.insert(1, &bounds);

    let results = index.query_point(1005.0, 1005.0);
    assert!(results.contains(&1), "Should find item at (1000, 1000)");

    let bounds2 = Bounds::new(50000.0, -50000.0, 50010.0, -49990.0);
    index.insert(2, &bounds2);

    let results2 = index.query_point(50005.0, -49995.0);
    assert!(results2.contains(&2), "Should find item at (50000, -50000)");
}
