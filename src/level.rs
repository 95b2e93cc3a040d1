//! Level Director: how many of everything a level has and where it spawns.
//!
//! The field is split into four zones that wind around the player's start like a
//! pinwheel, none of them reaching into the exclusion box around the centre:
//!
//! ```text
//!   +-----------------+-------+
//!   |     zone 0      |       |
//!   +-----+-------+---+       |
//!   |     |   @   |  zone 1   |
//!   |  3  |       +---+-------+
//!   |     +-----------+       |
//!   |     |      zone 2       |
//!   +-----+-------------------+
//! ```

use glam::Vec2;
use rand::Rng;

use crate::config::{
    GRUNT_BASE_SPEED, MAX_FAMILY, PLAYER_FRAME_HEIGHT, PLAYER_FRAME_WIDTH, PLAYER_SCALE,
    SPAWN_EXCLUSION_RATIO, SPAWN_MARGIN_RATIO, SPEED_PER_LEVEL, STATUE_BASE_SPEED, Variant,
};
use crate::geometry::Rect;

pub fn grunt_count(level: u32) -> usize {
    level as usize + 9
}

pub fn statue_count(level: u32, variant: Variant) -> usize {
    if variant.has_statues() {
        (level / 3) as usize + 1
    } else {
        0
    }
}

pub fn family_count(level: u32, variant: Variant) -> usize {
    if variant.has_family() {
        level.min(MAX_FAMILY) as usize
    } else {
        0
    }
}

pub fn grunt_speed(level: u32) -> f32 {
    GRUNT_BASE_SPEED + level as f32 * SPEED_PER_LEVEL
}

pub fn statue_speed(level: u32) -> f32 {
    STATUE_BASE_SPEED + level as f32 * SPEED_PER_LEVEL
}

/// Spawn geometry for one field size
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnZones {
    zones: [Option<Rect>; 4],
    margins: Rect,
    exclusion: Rect,
}

impl SpawnZones {
    pub fn new(world_width: f32, world_height: f32) -> Self {
        let x_margin = (world_width * SPAWN_MARGIN_RATIO).floor();
        let y_margin = (world_height * SPAWN_MARGIN_RATIO).floor();
        let margins = Rect::new(
            x_margin,
            y_margin,
            world_width - x_margin * 2.0,
            world_height - y_margin * 2.0,
        );

        let half_w = PLAYER_FRAME_WIDTH / 2.0 * PLAYER_SCALE * SPAWN_EXCLUSION_RATIO;
        let half_h = PLAYER_FRAME_HEIGHT / 2.0 * PLAYER_SCALE * SPAWN_EXCLUSION_RATIO;
        let center = Vec2::new(world_width / 2.0, world_height / 2.0);
        let exclusion = Rect::from_center(center, Vec2::new(half_w * 2.0, half_h * 2.0));

        // Edges are kept unnormalised so a zone squeezed out by a small field ends up
        // with negative extent and drops out in the clip below.
        let raw = [
            edges(
                x_margin,
                y_margin,
                exclusion.right(),
                exclusion.top(),
            ),
            edges(
                exclusion.right(),
                y_margin,
                world_width - x_margin,
                exclusion.bottom(),
            ),
            edges(
                exclusion.left(),
                exclusion.bottom(),
                world_width - x_margin,
                world_height - y_margin,
            ),
            edges(
                x_margin,
                exclusion.top(),
                exclusion.left(),
                world_height - y_margin,
            ),
        ];

        Self {
            zones: raw.map(|zone| zone.intersection(&margins)),
            margins,
            exclusion,
        }
    }

    /// Zone `index % 4`, `None` if the field is too small for it
    pub fn zone(&self, index: usize) -> Option<&Rect> {
        self.zones[index % 4].as_ref()
    }

    pub fn zones(&self) -> &[Option<Rect>; 4] {
        &self.zones
    }

    /// The part of the field kept clear around the player's start
    pub fn exclusion(&self) -> Rect {
        self.exclusion
    }

    /// The field minus its margins
    pub fn margins(&self) -> Rect {
        self.margins
    }

    /// Random point in zone `index % 4`, moving round to the next zone that exists.
    /// Falls back to the margin corner when no zone exists at all.
    pub fn random_point_in_zone<R: Rng>(&self, index: usize, rng: &mut R) -> Vec2 {
        (0..4)
            .find_map(|step| self.zone(index + step))
            .map(|zone| random_point_in(zone, rng))
            .unwrap_or(Vec2::new(self.margins.left(), self.margins.top()))
    }

    /// Random point anywhere inside the field margins
    pub fn random_point_in_margins<R: Rng>(&self, rng: &mut R) -> Vec2 {
        random_point_in(&self.margins, rng)
    }
}

fn edges(left: f32, top: f32, right: f32, bottom: f32) -> Rect {
    Rect::new(left, top, right - left, bottom - top)
}

/// Whole-unit coordinates drawn inclusively from the rectangle
fn random_point_in<R: Rng>(rect: &Rect, rng: &mut R) -> Vec2 {
    Vec2::new(
        random_coordinate(rect.left(), rect.right(), rng),
        random_coordinate(rect.top(), rect.bottom(), rng),
    )
}

fn random_coordinate<R: Rng>(min: f32, max: f32, rng: &mut R) -> f32 {
    let low = min.ceil() as i32;
    let high = max.floor() as i32;
    if low > high {
        // Narrower than one unit
        return (min + max) / 2.0;
    }
    rng.random_range(low..=high) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_level_one_counts() {
        assert_eq!(grunt_count(1), 10);
        assert_eq!(statue_count(1, Variant::Full), 1);
        assert_eq!(family_count(1, Variant::Full), 1);
    }

    #[test]
    fn test_simple_variant_has_only_grunts() {
        assert_eq!(grunt_count(4), 13);
        assert_eq!(statue_count(4, Variant::Simple), 0);
        assert_eq!(family_count(4, Variant::Simple), 0);
    }

    #[test]
    fn test_family_caps_at_five() {
        assert_eq!(family_count(5, Variant::Full), 5);
        assert_eq!(family_count(12, Variant::Full), 5);
    }

    #[test]
    fn test_speeds_grow_with_level() {
        assert_eq!(grunt_speed(1), 23.5);
        assert_eq!(grunt_speed(10), 37.0);
        assert_eq!(statue_speed(1), 16.5);
        assert_eq!(statue_speed(4), 21.0);
    }

    #[test]
    fn test_zones_for_default_field() {
        let zones = SpawnZones::new(800.0, 600.0);
        assert_eq!(zones.zone(0), Some(&Rect::new(16.0, 12.0, 510.0, 141.0)));
        assert_eq!(zones.zone(1), Some(&Rect::new(526.0, 12.0, 258.0, 435.0)));
        assert_eq!(zones.zone(2), Some(&Rect::new(274.0, 447.0, 510.0, 141.0)));
        assert_eq!(zones.zone(3), Some(&Rect::new(16.0, 153.0, 258.0, 435.0)));
        assert_eq!(zones.exclusion(), Rect::new(274.0, 153.0, 252.0, 294.0));
        // Round robin
        assert_eq!(zones.zone(4), zones.zone(0));
    }

    #[test]
    fn test_small_field_drops_zones() {
        let zones = SpawnZones::new(600.0, 200.0);
        // The exclusion box is taller than the field, zones 0 and 2 cannot exist
        assert!(zones.zone(0).is_none());
        assert!(zones.zone(2).is_none());
        assert_eq!(zones.zone(1), Some(&Rect::new(426.0, 4.0, 162.0, 192.0)));
        assert_eq!(zones.zone(3), Some(&Rect::new(12.0, 4.0, 162.0, 192.0)));

        // Placement moves round to the next zone that exists
        let mut rng = StdRng::seed_from_u64(3);
        for i in 0..8 {
            let point = zones.random_point_in_zone(i, &mut rng);
            assert!(zones.margins().contains(point));
            assert!(point.x >= 426.0 || point.x <= 174.0);
        }
    }

    #[test]
    fn test_tiny_field_falls_back_to_margin_corner() {
        let zones = SpawnZones::new(200.0, 200.0);
        assert!(zones.zones().iter().all(Option::is_none));

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(zones.random_point_in_zone(0, &mut rng), Vec2::new(4.0, 4.0));
    }

    #[test]
    fn test_random_points_stay_in_zone() {
        let zones = SpawnZones::new(800.0, 600.0);
        let mut rng = StdRng::seed_from_u64(7);
        for i in 0..200 {
            let point = zones.random_point_in_zone(i, &mut rng);
            let zone = zones.zone(i).copied().unwrap_or(zones.margins());
            assert!(zone.contains(point), "{point} not in zone {}", i % 4);
            assert_eq!(point, point.round());
        }
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_counts_follow_level(level in 1u32..500) {
                prop_assert_eq!(grunt_count(level), level as usize + 9);
                prop_assert_eq!(statue_count(level, Variant::Full), (level / 3) as usize + 1);
                prop_assert_eq!(family_count(level, Variant::Full), level.min(5) as usize);

                // Never shrink from one level to the next
                prop_assert!(grunt_count(level + 1) >= grunt_count(level));
                prop_assert!(statue_count(level + 1, Variant::Full) >= statue_count(level, Variant::Full));
                prop_assert!(family_count(level + 1, Variant::Full) >= family_count(level, Variant::Full));
            }

            #[test]
            fn test_zones_never_overlap_player_start(
                width in 1u32..5000,
                height in 1u32..5000,
                seed in any::<u64>()
            ) {
                let zones = SpawnZones::new(width as f32, height as f32);
                let exclusion = zones.exclusion();
                for zone in zones.zones().iter().flatten() {
                    prop_assert!(!zone.intersects(&exclusion));
                }

                // Zones do not overlap each other either
                let present: Vec<Rect> = zones.zones().iter().flatten().copied().collect();
                for (i, a) in present.iter().enumerate() {
                    for b in &present[i + 1..] {
                        prop_assert!(!a.intersects(b));
                    }
                }

                // Placed enemies stay outside the exclusion interior
                let mut rng = StdRng::seed_from_u64(seed);
                if present.is_empty() {
                    return Ok(());
                }
                for i in 0..8 {
                    let p = zones.random_point_in_zone(i, &mut rng);
                    let inside = p.x > exclusion.left()
                        && p.x < exclusion.right()
                        && p.y > exclusion.top()
                        && p.y < exclusion.bottom();
                    prop_assert!(!inside);
                }
            }
        }
    }
}
