//! Property tests for road generation and the difficulty curve

use proptest::prelude::*;

use full_throttle::settings::SpeedCurve;
use full_throttle::sim::{ObstacleKind, PickupKind, Rect, Road, RoadConfig, RoadSection, lanes_overlapping};

const SCREEN_H: f32 = 720.0;

/// Lane heights that are whole multiples of the tile size keep tile widths exact
fn road_config() -> impl Strategy<Value = RoadConfig> {
    (2usize..8, 1u32..4).prop_map(|(lanes, k)| RoadConfig {
        lanes,
        height: (16 * k) as f32 * (lanes + 2) as f32,
        ..Default::default()
    })
}

fn build(config: &RoadConfig, seed: u64, speed: f32) -> Road {
    let mut road = Road::new(config, SCREEN_H, seed).unwrap();
    road.set_speed(speed).unwrap();
    road.set_generate_obstacles(true);
    road
}

proptest! {
    #[test]
    fn columns_always_cover_viewport(
        config in road_config(),
        seed in any::<u64>(),
        speed in 0.0f32..600.0,
        width in 200.0f32..1600.0,
        steps in prop::collection::vec(0.0f32..0.1, 1..200),
    ) {
        let viewport = Rect::new(0.0, 0.0, width, SCREEN_H);
        let mut road = build(&config, seed, speed);
        let bound = (width / road.tile_width()).ceil() as usize + 2;

        for dt in steps {
            road.update(&viewport, dt);
            prop_assert!(road.origin().x <= viewport.left);
            prop_assert!(road.right_extent() >= viewport.right());
            prop_assert!(road.right_extent() - road.origin().x >= width);
            prop_assert!(road.column_count() <= bound);
        }
    }

    #[test]
    fn section_changes_add_at_most_four_columns(
        config in road_config(),
        seed in any::<u64>(),
        speed in 50.0f32..600.0,
        steps in prop::collection::vec((0.0f32..0.1, prop::option::of(0usize..3)), 1..200),
    ) {
        let viewport = Rect::new(0.0, 0.0, 1280.0, SCREEN_H);
        let mut road = build(&config, seed, speed);
        road.update(&viewport, 0.0);
        let bound = (viewport.width / road.tile_width()).ceil() as usize + 2;

        for (dt, change) in steps {
            // A new transition only once the previous one has scrolled into view
            if let Some(i) = change {
                if road.column_count() <= bound {
                    road.set_road_section(RoadSection::ALL[i]);
                }
            }
            road.update(&viewport, dt);
            prop_assert!(road.origin().x <= viewport.left);
            prop_assert!(road.right_extent() >= viewport.right());
            prop_assert!(road.column_count() <= bound + 4);
        }
    }

    #[test]
    fn entities_stay_in_their_lanes(
        config in road_config(),
        seed in any::<u64>(),
        speed in 50.0f32..500.0,
        frames in 1usize..400,
    ) {
        let viewport = Rect::new(0.0, 0.0, 1280.0, SCREEN_H);
        let mut road = build(&config, seed, speed);
        for _ in 0..frames {
            road.update(&viewport, 1.0 / 60.0);
        }

        prop_assert_eq!(road.obstacles().len(), config.lanes);
        prop_assert_eq!(road.pickups().len(), config.lanes);
        prop_assert!(road.obstacle_count() <= config.max_obstacles);
        for lane in 0..config.lanes {
            let y = road.lane_pos(lane);
            prop_assert!(road.obstacles()[lane].iter().all(|o| o.pos.y == y));
            prop_assert!(road.pickups()[lane].iter().all(|p| p.pos.y == y));
        }
    }

    #[test]
    fn collisions_only_touch_overlapped_lanes(
        config in road_config(),
        seed in any::<u64>(),
        lane in 0usize..8,
        top_frac in 0.0f32..1.0,
        height in 1.0f32..100.0,
    ) {
        let mut road = build(&config, seed, 0.0);
        road.set_generate_obstacles(false);
        road.update(&Rect::new(0.0, 0.0, 1280.0, SCREEN_H), 0.0);

        // One obstacle and one pickup per lane, stacked at the same x
        for l in 0..config.lanes {
            road.spawn_obstacle(l, ObstacleKind::Car1, 300.0);
            road.spawn_pickup(l, PickupKind::Coin, 600.0);
        }

        let lane = lane % config.lanes;
        let top = road.lane_pos(lane) + top_frac * road.lane_height();
        let query = Rect::new(250.0, top, 400.0, height);
        let candidates = lanes_overlapping(road.top_edge(), road.lane_height(), config.lanes, &query);

        let before: Vec<usize> = road.obstacles().iter().map(Vec::len).collect();
        if road.is_player_colliding(&query) {
            let after: Vec<usize> = road.obstacles().iter().map(Vec::len).collect();
            let hit: Vec<usize> = (0..config.lanes).filter(|&l| after[l] != before[l]).collect();
            prop_assert_eq!(hit.len(), 1);
            prop_assert!(candidates.contains(&hit[0]));
            prop_assert_eq!(after[hit[0]] + 1, before[hit[0]]);
        }

        let before: Vec<usize> = road.pickups().iter().map(Vec::len).collect();
        if road.is_player_on_pickup(&query).is_some() {
            let after: Vec<usize> = road.pickups().iter().map(Vec::len).collect();
            let hit: Vec<usize> = (0..config.lanes).filter(|&l| after[l] != before[l]).collect();
            prop_assert_eq!(hit.len(), 1);
            prop_assert!(candidates.contains(&hit[0]));
        }
    }

    #[test]
    fn lane_bands_are_in_range(
        lanes in 2usize..10,
        lane_height in 8.0f32..64.0,
        top in -200.0f32..900.0,
        height in 0.0f32..300.0,
    ) {
        let query = Rect::new(0.0, top, 10.0, height);
        let range = lanes_overlapping(100.0, lane_height, lanes, &query);
        prop_assert!(range.start <= range.end);
        prop_assert!(range.end <= lanes);
    }

    #[test]
    fn speed_is_monotonic_and_capped(a in 0.0f32..1e6, b in 0.0f32..1e6) {
        let curve = SpeedCurve::default();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(curve.speed_at(lo) <= curve.speed_at(hi));
        prop_assert!(curve.speed_at(hi) <= curve.cap);
        prop_assert!(curve.speed_at(lo) >= curve.base);
    }
}
