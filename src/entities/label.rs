use glam::Vec2;
use std::time::Duration;

use crate::config::{RESCUE_LABEL_LIFETIME, SKULL_LABEL_LIFETIME};

pub const SKULL: &str = "☠";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    /// Points awarded for a rescue
    Score,
    /// Marks where a family member was caught
    Skull,
}

/// Short-lived text floating over the play field
#[derive(Debug, Clone)]
pub struct FloatingLabel {
    pub text: String,
    pub position: Vec2,
    pub kind: LabelKind,
    pub expires_at: Duration,
}

impl FloatingLabel {
    pub fn score(points: u32, position: Vec2, now: Duration) -> Self {
        Self {
            text: points.to_string(),
            position,
            kind: LabelKind::Score,
            expires_at: now + RESCUE_LABEL_LIFETIME,
        }
    }

    pub fn skull(position: Vec2, now: Duration) -> Self {
        Self {
            text: SKULL.to_string(),
            position,
            kind: LabelKind::Skull,
            expires_at: now + SKULL_LABEL_LIFETIME,
        }
    }

    pub fn is_expired(&self, now: Duration) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_label_lives_two_seconds() {
        let now = Duration::from_secs(3);
        let label = FloatingLabel::score(2000, Vec2::new(10.0, 10.0), now);
        assert_eq!(label.text, "2000");
        assert_eq!(label.kind, LabelKind::Score);
        assert!(!label.is_expired(now + Duration::from_millis(1999)));
        assert!(label.is_expired(now + Duration::from_secs(2)));
    }

    #[test]
    fn test_skull_label_lives_three_seconds() {
        let now = Duration::from_secs(3);
        let label = FloatingLabel::skull(Vec2::ZERO, now);
        assert_eq!(label.text, SKULL);
        assert!(!label.is_expired(now + Duration::from_millis(2999)));
        assert!(label.is_expired(now + Duration::from_secs(3)));
    }
}
