//! Lane-partitioned collision queries
//!
//! The road stores obstacles and pickups in one bucket per lane, so a query
//! only has to scan the lanes the player's vertical extent overlaps.

use std::ops::Range;

use super::entity::LaneEntity;
use super::rect::Rect;

/// Lanes whose half-open band `[top, top + lane_height)` overlaps the
/// vertical extent of `bounds`.
///
/// Lane `i` spans `top_edge + i * lane_height` to `top_edge + (i + 1) * lane_height`.
/// A rectangle no taller than a lane yields at most two adjacent lanes;
/// one entirely above or below the road yields an empty range.
pub fn lanes_overlapping(top_edge: f32, lane_height: f32, lanes: usize, bounds: &Rect) -> Range<usize> {
    if lanes == 0 || lane_height <= 0.0 || bounds.height <= 0.0 {
        return 0..0;
    }

    let first = ((bounds.top - top_edge) / lane_height).floor();
    let last = ((bounds.bottom() - top_edge) / lane_height).ceil();

    let first = first.max(0.0).min(lanes as f32) as usize;
    let last = last.max(0.0).min(lanes as f32) as usize;

    first..last.max(first)
}

/// Remove and return the first entity in `lanes` that intersects `bounds`.
///
/// Lanes are scanned top to bottom, each in spawn order. Returns the lane the
/// entity was taken from.
pub fn take_first_hit<T: LaneEntity>(
    buckets: &mut [Vec<T>],
    lanes: Range<usize>,
    bounds: &Rect,
) -> Option<(usize, T)> {
    for lane in lanes {
        let Some(bucket) = buckets.get_mut(lane) else {
            continue;
        };
        if let Some(index) = bucket.iter().position(|e| e.intersects(bounds)) {
            return Some((lane, bucket.remove(index)));
        }
    }
    None
}

/// Move every entity in a lane with `step`, then push each one forward so it
/// does not overlap the trailing edge of the entity spawned before it.
///
/// Entities whose trailing edge ends at or left of x = 0 are dropped.
/// Returns how many were dropped.
pub fn sweep_lane<T: LaneEntity>(bucket: &mut Vec<T>, mut step: impl FnMut(&mut T)) -> usize {
    let mut trailing_edge = f32::NEG_INFINITY;
    for entity in bucket.iter_mut() {
        step(entity);
        let mut pos = entity.pos();
        if pos.x < trailing_edge {
            pos.x = trailing_edge;
            entity.set_pos(pos);
        }
        trailing_edge = pos.x + entity.size().x;
    }

    let before = bucket.len();
    bucket.retain(|e| !e.is_offscreen());
    before - bucket.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Obstacle, ObstacleKind, Pickup, PickupKind};
    use glam::Vec2;

    #[test]
    fn test_single_lane() {
        let lanes = lanes_overlapping(100.0, 50.0, 4, &Rect::new(0.0, 110.0, 10.0, 30.0));
        assert_eq!(lanes, 0..1);
    }

    #[test]
    fn test_straddling_two_lanes() {
        let lanes = lanes_overlapping(100.0, 50.0, 4, &Rect::new(0.0, 140.0, 10.0, 30.0));
        assert_eq!(lanes, 0..2);
    }

    #[test]
    fn test_bottom_on_lane_boundary_is_half_open() {
        // Bottom edge exactly at the top of lane 1 does not enter lane 1
        let lanes = lanes_overlapping(100.0, 50.0, 4, &Rect::new(0.0, 120.0, 10.0, 30.0));
        assert_eq!(lanes, 0..1);
    }

    #[test]
    fn test_outside_road() {
        assert!(lanes_overlapping(100.0, 50.0, 4, &Rect::new(0.0, 0.0, 10.0, 30.0)).is_empty());
        assert!(lanes_overlapping(100.0, 50.0, 4, &Rect::new(0.0, 400.0, 10.0, 30.0)).is_empty());
    }

    #[test]
    fn test_take_first_hit_removes_entity() {
        let mut buckets = vec![
            vec![Obstacle::new(ObstacleKind::Car1, Vec2::new(0.0, 0.0), 1.0)],
            vec![Obstacle::new(ObstacleKind::Car2, Vec2::new(200.0, 32.0), 1.0)],
        ];
        let player = Rect::new(4.0, 4.0, 8.0, 8.0);

        let (lane, hit) = take_first_hit(&mut buckets, 0..2, &player).unwrap();
        assert_eq!(lane, 0);
        assert_eq!(hit.kind, ObstacleKind::Car1);
        assert!(buckets[0].is_empty());
        assert!(take_first_hit(&mut buckets, 0..2, &player).is_none());
    }

    #[test]
    fn test_take_first_hit_ignores_lanes_outside_range() {
        let mut buckets = vec![vec![], vec![Pickup::new(PickupKind::Coin, Vec2::ZERO, 1.0)]];
        let player = Rect::new(0.0, 0.0, 8.0, 8.0);
        assert!(take_first_hit(&mut buckets, 0..1, &player).is_none());
        assert_eq!(buckets[1].len(), 1);
    }

    #[test]
    fn test_sweep_enforces_spacing() {
        let mut bucket = vec![
            Obstacle::new(ObstacleKind::Car1, Vec2::new(100.0, 0.0), 1.0),
            Obstacle::new(ObstacleKind::Car1, Vec2::new(110.0, 0.0), 1.0),
        ];
        sweep_lane(&mut bucket, |o| {
            o.advance(10.0, 0.0);
        });
        assert_eq!(bucket[0].pos.x, 90.0);
        assert!(bucket[1].pos.x >= bucket[0].pos.x + bucket[0].size().x);
    }

    #[test]
    fn test_sweep_drops_offscreen() {
        let mut bucket = vec![
            Pickup::new(PickupKind::Coin, Vec2::new(-20.0, 0.0), 1.0),
            Pickup::new(PickupKind::Fuel, Vec2::new(300.0, 0.0), 1.0),
        ];
        let dropped = sweep_lane(&mut bucket, |p| {
            p.advance(15.0);
        });
        assert_eq!(dropped, 1);
        assert_eq!(bucket.len(), 1);
        assert_eq!(bucket[0].kind, PickupKind::Fuel);
    }
}
