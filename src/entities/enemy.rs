use glam::Vec2;
use std::time::Duration;

use crate::config::{GRUNT_POINTS, PLAYER_SCALE, STATUE_FREEZE};
use crate::geometry::Rect;

/// 20x20 grunt image drawn at 1.2x
const GRUNT_HITBOX: Vec2 = Vec2::new(24.0, 24.0);
/// 18x33 enemy sheet cell drawn slightly smaller than the player
const STATUE_HITBOX: Vec2 = Vec2::new(18.0 * PLAYER_SCALE * 0.9, 33.0 * PLAYER_SCALE * 0.9);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyType {
    Grunt,
    Statue,
}

/// Fodder enemy that always walks at the player
#[derive(Debug, Clone)]
pub struct Grunt {
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
}

impl Grunt {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn kill(&mut self) {
        self.alive = false;
        self.velocity = Vec2::ZERO;
    }

    pub fn revive_at(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.alive = true;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, GRUNT_HITBOX)
    }

    pub fn get_points(&self) -> u32 {
        GRUNT_POINTS
    }
}

/// What a statue is walking toward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatueTarget {
    Player,
    /// Index into the family roster
    Family(usize),
}

/// Unkillable enemy that hunts family members; arrows only freeze it
#[derive(Debug, Clone)]
pub struct Statue {
    pub position: Vec2,
    pub velocity: Vec2,
    pub alive: bool,
    pub target: Option<StatueTarget>,
    pub frozen_until: Duration,
}

impl Statue {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            alive: true,
            target: None,
            frozen_until: Duration::ZERO,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn is_frozen(&self, now: Duration) -> bool {
        self.frozen_until > now
    }

    pub fn freeze(&mut self, now: Duration) {
        self.frozen_until = now + STATUE_FREEZE;
    }

    /// Moves the statue for a new level, thawed and without a target
    pub fn reset_at(&mut self, position: Vec2, now: Duration) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.alive = true;
        self.target = None;
        self.frozen_until = now;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, STATUE_HITBOX)
    }
}
