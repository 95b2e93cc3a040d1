use glam::Vec2;
use std::time::Duration;

use crate::config::{ARROW_HIT_DURATION, ARROW_SPEED, FIRE_RATE, PLAYER_SCALE};
use crate::geometry::Rect;

/// Full 20x9 arrow cell when flying sideways
const HORIZONTAL_HITBOX: Vec2 = Vec2::new(20.0 * PLAYER_SCALE, 9.0 * PLAYER_SCALE);
/// Squared-off 9x9 box when flying up or down
const VERTICAL_HITBOX: Vec2 = Vec2::new(9.0 * PLAYER_SCALE, 9.0 * PLAYER_SCALE);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrowState {
    /// Back in the quiver
    Idle,
    Flying,
    /// Stuck in a target, playing the hit animation
    Hitting { until: Duration },
}

#[derive(Debug, Clone)]
pub struct Arrow {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Flight direction in radians
    pub angle: f32,
    pub state: ArrowState,
}

impl Arrow {
    fn idle() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            angle: 0.0,
            state: ArrowState::Idle,
        }
    }

    pub fn is_flying(&self) -> bool {
        self.state == ArrowState::Flying
    }

    /// Flying or still showing its hit animation
    pub fn is_active(&self) -> bool {
        self.state != ArrowState::Idle
    }

    fn launch(&mut self, origin: Vec2, angle: f32) {
        self.position = origin;
        self.angle = angle;
        self.velocity = Vec2::from_angle(angle) * ARROW_SPEED;
        self.state = ArrowState::Flying;
    }

    /// Stops the arrow where it is and starts the hit animation, unless it is
    /// already playing
    pub fn hit(&mut self, now: Duration) {
        self.velocity = Vec2::ZERO;
        if !matches!(self.state, ArrowState::Hitting { .. }) {
            self.state = ArrowState::Hitting {
                until: now + ARROW_HIT_DURATION,
            };
        }
    }

    pub fn recall(&mut self) {
        self.velocity = Vec2::ZERO;
        self.state = ArrowState::Idle;
    }

    pub fn bounds(&self) -> Rect {
        let rotation = self.angle.abs();
        let size = if rotation > 0.78 && rotation < 2.3 {
            VERTICAL_HITBOX
        } else {
            HORIZONTAL_HITBOX
        };
        Rect::from_center(self.position, size)
    }

    pub fn update(&mut self, dt: Duration, now: Duration, world: &Rect) {
        match self.state {
            ArrowState::Idle => {}
            ArrowState::Flying => {
                self.position += self.velocity * dt.as_secs_f32();
                if !world.intersects(&self.bounds()) {
                    self.recall();
                }
            }
            ArrowState::Hitting { until } => {
                if now >= until {
                    self.recall();
                }
            }
        }
    }
}

/// Fixed pool of arrows with a shared fire-rate limit
#[derive(Debug, Clone)]
pub struct Quiver {
    arrows: Vec<Arrow>,
    next_fire_at: Duration,
}

impl Quiver {
    pub fn new(capacity: usize) -> Self {
        Self {
            arrows: (0..capacity).map(|_| Arrow::idle()).collect(),
            next_fire_at: Duration::ZERO,
        }
    }

    pub fn can_fire(&self, now: Duration) -> bool {
        now >= self.next_fire_at && self.arrows.iter().any(|a| !a.is_active())
    }

    /// Looses an arrow from `origin` toward `target`, turned by `angle_offset` radians.
    /// Returns false when the fire rate or an empty quiver prevents it.
    pub fn fire_at(&mut self, origin: Vec2, target: Vec2, angle_offset: f32, now: Duration) -> bool {
        if !self.can_fire(now) {
            return false;
        }
        let Some(arrow) = self.arrows.iter_mut().find(|a| !a.is_active()) else {
            return false;
        };

        let aim = target - origin;
        let angle = aim.y.atan2(aim.x) + angle_offset;
        arrow.launch(origin, angle);
        self.next_fire_at = now + FIRE_RATE;
        true
    }

    pub fn update(&mut self, dt: Duration, now: Duration, world: &Rect) {
        for arrow in &mut self.arrows {
            arrow.update(dt, now, world);
        }
    }

    /// Returns every arrow to the quiver
    pub fn recall_all(&mut self) {
        for arrow in &mut self.arrows {
            arrow.recall();
        }
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn arrows_mut(&mut self) -> &mut [Arrow] {
        &mut self.arrows
    }

    pub fn active_count(&self) -> usize {
        self.arrows.iter().filter(|a| a.is_active()).count()
    }
}
