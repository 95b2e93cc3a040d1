use glam::Vec2;

use crate::config::PLAYER_SCALE;
use crate::geometry::Rect;

/// 16x23 sprite cell at player scale
pub const FAMILY_SIZE: Vec2 = Vec2::new(16.0 * PLAYER_SCALE, 23.0 * PLAYER_SCALE);

/// Rescuable bystander, respawned every level
#[derive(Debug, Clone)]
pub struct FamilyMember {
    pub position: Vec2,
    pub alive: bool,
}

impl FamilyMember {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            alive: true,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Rescued or killed, either way gone until the next level
    pub fn remove(&mut self) {
        self.alive = false;
    }

    pub fn revive_at(&mut self, position: Vec2) {
        self.position = position;
        self.alive = true;
    }

    pub fn bounds(&self) -> Rect {
        Rect::from_center(self.position, FAMILY_SIZE)
    }
}
