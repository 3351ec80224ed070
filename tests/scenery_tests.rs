//! Scenery recycling validation tests

use road_rage::simulation::{RoadSide, SceneryKind, SceneryPool, SimScenery, ROAD_WIDTH};

#[test]
fn test_scenery_layout() {
    let scenery = SimScenery::new();
    assert_eq!(scenery.pools.len(), 9);
    assert_eq!(scenery.element_count(), 60 + 2 * (30 + 46 + 12 + 18));

    let markings: Vec<_> = scenery.pools_of(SceneryKind::LaneMarking).collect();
    assert_eq!(markings.len(), 1);
    assert_eq!(markings[0].side, RoadSide::Center);
    assert_eq!(markings[0].lateral_x, 0.0);
    assert_eq!(markings[0].span(), 240.0);

    for pool in scenery.pools_of(SceneryKind::Building) {
        let expected = ROAD_WIDTH / 2.0 + 2.25;
        match pool.side {
            RoadSide::Left => assert_eq!(pool.lateral_x, expected),
            RoadSide::Right => assert_eq!(pool.lateral_x, -expected),
            RoadSide::Center => panic!("buildings on the centre line"),
        }
    }
}

#[test]
fn test_right_side_is_staggered() {
    let scenery = SimScenery::new();
    let first_z = |kind: SceneryKind, side: RoadSide| {
        scenery
            .pools_of(kind)
            .find(|p| p.side == side)
            .map(|p| p.elements[0].z)
    };

    let left = first_z(SceneryKind::Building, RoadSide::Left);
    let right = first_z(SceneryKind::Building, RoadSide::Right);
    assert!((right.unwrap_or(0.0) - left.unwrap_or(0.0) - 1.7).abs() < 1e-4);

    // Edge lines are shifted back so both sides line up
    assert_eq!(
        first_z(SceneryKind::EdgeLine, RoadSide::Left),
        first_z(SceneryKind::EdgeLine, RoadSide::Right)
    );
}

#[test]
fn test_fresh_layout_is_in_window() {
    let scenery = SimScenery::new();
    for pool in &scenery.pools {
        assert!(pool.in_window(0.0), "{:?} {:?}", pool.kind, pool.side);
    }

    // The overflowing building panel wrapped to the back of the window
    for pool in scenery.pools_of(SceneryKind::Building) {
        let min_z = pool.elements.iter().map(|e| e.z).fold(f32::MAX, f32::min);
        assert!(min_z < -15.0, "{:?} nothing wrapped", pool.side);
    }
}

#[test]
fn test_scenery_stays_in_window_while_driving() {
    let mut scenery = SimScenery::new();
    let count = scenery.element_count();

    let mut player_z = 0.0;
    while player_z < 5000.0 {
        scenery.update(player_z);
        for pool in &scenery.pools {
            assert!(
                pool.in_window(player_z),
                "{:?} {:?} left its window at z {}",
                pool.kind,
                pool.side,
                player_z
            );
        }
        player_z += 7.3;
    }
    assert_eq!(scenery.element_count(), count);
}

#[test]
fn test_scenery_survives_long_jump() {
    let mut scenery = SimScenery::new();
    scenery.update(100_000.0);
    for pool in &scenery.pools {
        assert!(pool.in_window(100_000.0), "{:?} {:?}", pool.kind, pool.side);
    }

    // And back again
    scenery.update(0.0);
    for pool in &scenery.pools {
        assert!(pool.in_window(0.0), "{:?} {:?}", pool.kind, pool.side);
    }
}

#[test]
fn test_recycle_keeps_slots() {
    let mut pool = SceneryPool::new(SceneryKind::Pole, RoadSide::Left, 3.75, 12, 28.0, 20.0, -15.0);
    pool.recycle(1234.5);

    let mut indices: Vec<_> = pool.elements.iter().map(|e| e.index).collect();
    indices.sort_unstable();
    assert_eq!(indices, (0..12).collect::<Vec<_>>());

    // Spacing between neighbours is preserved modulo the span
    let mut zs: Vec<_> = pool.elements.iter().map(|e| e.z).collect();
    zs.sort_by(|a, b| a.total_cmp(b));
    for pair in zs.windows(2) {
        assert!((pair[1] - pair[0] - 28.0).abs() < 1e-2);
    }
}

#[test]
fn test_recycle_ignores_non_finite_player() {
    let mut pool = SceneryPool::new(SceneryKind::Skyline, RoadSide::Right, 12.25, 18, 14.0, 20.0, -15.0);
    let before: Vec<_> = pool.elements.iter().map(|e| e.z).collect();
    pool.recycle(f32::NAN);
    let after: Vec<_> = pool.elements.iter().map(|e| e.z).collect();
    assert_eq!(before, after);
}
