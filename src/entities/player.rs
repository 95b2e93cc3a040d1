use glam::Vec2;
use log::debug;
use std::time::Duration;

use crate::config::{
    INVULNERABILITY_WINDOW, MAX_HEALTH, PLAYER_SCALE, PLAYER_START_HEALTH, TINT_CYCLE_FRAMES,
};
use crate::geometry::Rect;

/// Run loop length and the idle frame shown when standing still
pub const RUN_FRAMES: u8 = 8;
pub const REST_FRAME: u8 = 8;
const RUN_FPS: u128 = 30;

/// Hitbox is 17x24 of the 24x28 sprite cell
const HITBOX: Vec2 = Vec2::new(17.0 * PLAYER_SCALE, 24.0 * PLAYER_SCALE);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    White,
    Red,
    Green,
    Blue,
}

impl Tint {
    /// Next colour of the invulnerability flash
    pub fn next_flash(self) -> Tint {
        match self {
            Tint::Red => Tint::Green,
            Tint::Green => Tint::Blue,
            Tint::Blue | Tint::White => Tint::Red,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

/// Result of an enemy touching the player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitOutcome {
    /// Dead or invulnerable, nothing happened
    Ignored,
    Hurt,
    Killed,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub position: Vec2,
    pub velocity: Vec2,
    pub health: u8,
    pub facing: Facing,
    pub tint: Tint,
    pub invulnerable_until: Option<Duration>,
    pub tint_frame_count: u8,
    /// Animation frame, `REST_FRAME` when idle
    pub frame: u8,
    running_since: Option<Duration>,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            health: PLAYER_START_HEALTH,
            facing: Facing::Right,
            tint: Tint::White,
            invulnerable_until: None,
            tint_frame_count: 0,
            frame: REST_FRAME,
            running_since: None,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn is_invulnerable(&self, now: Duration) -> bool {
        self.invulnerable_until.is_some_and(|until| now < until)
    }

    /// Applies one point of damage unless the player is dead or invulnerable
    pub fn take_hit(&mut self, now: Duration) -> HitOutcome {
        if !self.is_alive() || self.is_invulnerable(now) {
            return HitOutcome::Ignored;
        }

        self.health -= 1;
        if self.is_alive() {
            self.invulnerable_until = Some(now + INVULNERABILITY_WINDOW);
            self.tint_frame_count = 0;
            self.tint = Tint::Red;
            HitOutcome::Hurt
        } else {
            self.invulnerable_until = None;
            self.tint = Tint::White;
            HitOutcome::Killed
        }
    }

    /// Per-frame tick of the invulnerability window and its colour flash
    pub fn update_invulnerability(&mut self, now: Duration) {
        let Some(until) = self.invulnerable_until else {
            return;
        };

        if now >= until {
            self.invulnerable_until = None;
            self.tint_frame_count = 0;
            self.tint = Tint::White;
            return;
        }

        self.tint_frame_count += 1;
        if self.tint_frame_count == TINT_CYCLE_FRAMES {
            self.tint_frame_count = 0;
            self.tint = self.tint.next_flash();
        }
    }

    /// Ends any invulnerability window at once
    pub fn clear_invulnerability(&mut self) {
        self.invulnerable_until = None;
        self.tint_frame_count = 0;
        self.tint = Tint::White;
    }

    /// Heals up to `MAX_HEALTH`; the dead stay dead
    pub fn heal(&mut self, amount: u8) {
        if !self.is_alive() {
            return;
        }
        self.health = self.health.saturating_add(amount).min(MAX_HEALTH);
        debug!("Bonus heart, health now {}", self.health);
    }

    pub fn recenter(&mut self, center: Vec2) {
        self.position = center;
        self.velocity = Vec2::ZERO;
    }

    /// Flips facing by the sign of a horizontal input, zero keeps it
    pub fn face_toward(&mut self, x: f32) {
        if x > 0.0 {
            self.facing = Facing::Right;
        } else if x < 0.0 {
            self.facing = Facing::Left;
        }
    }

    /// Plays the run loop while moving, rests on the idle frame otherwise
    pub fn animate(&mut self, now: Duration) {
        if self.velocity == Vec2::ZERO {
            self.running_since = None;
            self.frame = REST_FRAME;
            return;
        }

        let since = *self.running_since.get_or_insert(now);
        let elapsed = now.saturating_sub(since).as_millis();
        self.frame = (elapsed * RUN_FPS / 1000 % RUN_FRAMES as u128) as u8;
    }

    pub fn is_running(&self) -> bool {
        self.frame != REST_FRAME
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, HITBOX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: Duration = Duration::from_secs(10);

    #[test]
    fn test_player_new() {
        let player = Player::new(Vec2::new(400.0, 300.0));
        assert_eq!(player.position, Vec2::new(400.0, 300.0));
        assert_eq!(player.velocity, Vec2::ZERO);
        assert_eq!(player.health, 3);
        assert_eq!(player.tint, Tint::White);
        assert_eq!(player.frame, REST_FRAME);
        assert!(player.is_alive());
        assert!(!player.is_invulnerable(NOW));
    }

    #[test]
    fn test_player_hit_starts_invulnerability() {
        let mut player = Player::new(Vec2::ZERO);
        assert_eq!(player.take_hit(NOW), HitOutcome::Hurt);
        assert_eq!(player.health, 2);
        assert_eq!(player.tint, Tint::Red);
        assert!(player.is_invulnerable(NOW));

        // Further hits inside the window are ignored
        assert_eq!(
            player.take_hit(NOW + Duration::from_millis(999)),
            HitOutcome::Ignored
        );
        assert_eq!(player.health, 2);

        // Window over
        assert_eq!(player.take_hit(NOW + Duration::from_secs(1)), HitOutcome::Hurt);
        assert_eq!(player.health, 1);
    }

    #[test]
    fn test_player_last_heart() {
        let mut player = Player::new(Vec2::ZERO);
        player.health = 1;
        assert_eq!(player.take_hit(NOW), HitOutcome::Killed);
        assert_eq!(player.health, 0);
        assert!(!player.is_alive());
        assert_eq!(player.take_hit(NOW + Duration::from_secs(5)), HitOutcome::Ignored);
        assert_eq!(player.health, 0);
    }

    #[test]
    fn test_player_tint_cycles_every_three_frames() {
        let mut player = Player::new(Vec2::ZERO);
        player.take_hit(NOW);

        let frame = Duration::from_millis(16);
        let mut now = NOW;
        let mut seen = Vec::new();
        for _ in 0..9 {
            now += frame;
            player.update_invulnerability(now);
            seen.push(player.tint);
        }
        assert_eq!(
            seen,
            vec![
                Tint::Red,
                Tint::Red,
                Tint::Green,
                Tint::Green,
                Tint::Green,
                Tint::Blue,
                Tint::Blue,
                Tint::Blue,
                Tint::Red,
            ]
        );

        player.update_invulnerability(NOW + INVULNERABILITY_WINDOW);
        assert_eq!(player.tint, Tint::White);
        assert_eq!(player.invulnerable_until, None);
    }

    #[test]
    fn test_player_clear_invulnerability() {
        let mut player = Player::new(Vec2::ZERO);
        player.take_hit(NOW);
        player.update_invulnerability(NOW + Duration::from_millis(50));
        player.clear_invulnerability();

        assert!(!player.is_invulnerable(NOW + Duration::from_millis(100)));
        assert_eq!(player.tint, Tint::White);
        assert_eq!(player.tint_frame_count, 0);
        assert_eq!(player.take_hit(NOW + Duration::from_millis(100)), HitOutcome::Hurt);
    }

    #[test]
    fn test_player_heal_capped() {
        let mut player = Player::new(Vec2::ZERO);
        player.heal(1);
        assert_eq!(player.health, 4);

        player.health = MAX_HEALTH;
        player.heal(1);
        assert_eq!(player.health, MAX_HEALTH);

        player.health = 0;
        player.heal(1);
        assert_eq!(player.health, 0);
    }

    #[test]
    fn test_player_facing() {
        let mut player = Player::new(Vec2::ZERO);
        player.face_toward(-0.5);
        assert_eq!(player.facing, Facing::Left);
        player.face_toward(0.0);
        assert_eq!(player.facing, Facing::Left);
        player.face_toward(1.0);
        assert_eq!(player.facing, Facing::Right);
    }

    #[test]
    fn test_player_animation() {
        let mut player = Player::new(Vec2::ZERO);
        player.velocity = Vec2::new(250.0, 0.0);
        player.animate(NOW);
        assert_eq!(player.frame, 0);
        assert!(player.is_running());

        // 30 fps: 100ms is three frames in
        player.animate(NOW + Duration::from_millis(100));
        assert_eq!(player.frame, 3);

        player.velocity = Vec2::ZERO;
        player.animate(NOW + Duration::from_millis(120));
        assert_eq!(player.frame, REST_FRAME);
        assert!(!player.is_running());
    }

    #[test]
    fn test_player_bounds_centered() {
        let player = Player::new(Vec2::new(100.0, 100.0));
        let bounds = player.bounds();
        assert_eq!(bounds.center(), Vec2::new(100.0, 100.0));
        assert_eq!(bounds.width, 51.0);
        assert_eq!(bounds.height, 72.0);
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_health_never_negative(
                gaps_ms in prop::collection::vec(0u64..3000, 0..20)
            ) {
                let mut player = Player::new(Vec2::ZERO);
                let mut now = NOW;
                let mut previous = player.health;
                for gap in gaps_ms {
                    now += Duration::from_millis(gap);
                    player.update_invulnerability(now);
                    player.take_hit(now);
                    // Health falls by at most one per hit
                    prop_assert!(previous - player.health <= 1);
                    previous = player.health;
                }
                prop_assert!(player.health <= PLAYER_START_HEALTH);
            }

            #[test]
            fn test_player_heal_never_exceeds_max(
                start in 1u8..=MAX_HEALTH,
                heals in 0usize..200
            ) {
                let mut player = Player::new(Vec2::ZERO);
                player.health = start;
                for _ in 0..heals {
                    let before = player.health;
                    player.heal(1);
                    prop_assert!(player.health <= before + 1);
                }
                prop_assert!(player.health <= MAX_HEALTH);
            }
        }
    }
}
