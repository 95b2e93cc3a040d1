use crate::config::{FAMILY_POINTS, FREE_HEART_EVERY_POINTS};

/// Score, bonus-heart threshold and the rescue streak of the current level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scoreboard {
    pub score: u32,
    pub next_free_heart: u32,
    pub rescued_on_level: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Scoreboard {
    pub fn new() -> Self {
        Self {
            score: 0,
            next_free_heart: FREE_HEART_EVERY_POINTS,
            rescued_on_level: 0,
        }
    }

    /// Adds points. Returns true when the total crossed the bonus-heart threshold,
    /// which then moves up by one increment.
    pub fn add(&mut self, points: u32) -> bool {
        self.score = self.score.saturating_add(points);
        if self.score >= self.next_free_heart {
            self.next_free_heart = self.next_free_heart.saturating_add(FREE_HEART_EVERY_POINTS);
            return true;
        }
        false
    }

    /// Counts a rescue and returns what it is worth: the Nth rescue of a level
    /// pays N times the base value
    pub fn rescue_points(&mut self) -> u32 {
        self.rescued_on_level += 1;
        FAMILY_POINTS * self.rescued_on_level
    }

    pub fn start_level(&mut self) {
        self.rescued_on_level = 0;
    }

    pub fn hud_line(&self, hearts: u8, level: u32) -> String {
        format!("Hearts: {} - Level {} - Score: {}", hearts, level, self.score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scoreboard_new() {
        let board = Scoreboard::new();
        assert_eq!(board.score, 0);
        assert_eq!(board.next_free_heart, 35_000);
        assert_eq!(board.rescued_on_level, 0);
    }

    #[test]
    fn test_bonus_heart_threshold() {
        let mut board = Scoreboard::new();
        assert!(!board.add(34_900));
        assert!(board.add(100));
        assert_eq!(board.next_free_heart, 70_000);
        assert!(!board.add(100));
    }

    #[test]
    fn test_one_heart_per_add_even_when_jumping_thresholds() {
        let mut board = Scoreboard::new();
        assert!(board.add(80_000));
        assert_eq!(board.next_free_heart, 70_000);
        // Still past the moved threshold, the next add pays out again
        assert!(board.add(0));
        assert_eq!(board.next_free_heart, 105_000);
    }

    #[test]
    fn test_rescue_streak() {
        let mut board = Scoreboard::new();
        assert_eq!(board.rescue_points(), 1000);
        assert_eq!(board.rescue_points(), 2000);
        assert_eq!(board.rescue_points(), 3000);

        board.start_level();
        assert_eq!(board.rescue_points(), 1000);
    }

    #[test]
    fn test_hud_line() {
        let mut board = Scoreboard::new();
        board.add(1200);
        assert_eq!(board.hud_line(3, 2), "Hearts: 3 - Level 2 - Score: 1200");
    }

    // Property-based tests
    #[cfg(test)]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_score_is_monotonic(points in prop::collection::vec(0u32..5000, 0..50)) {
                let mut board = Scoreboard::new();
                let mut hearts = 0u32;
                for p in points {
                    let before = board.score;
                    if board.add(p) {
                        hearts += 1;
                    }
                    prop_assert!(board.score >= before);
                }
                // One heart per threshold crossed, never more
                prop_assert!(hearts <= board.score / FREE_HEART_EVERY_POINTS);
            }

            #[test]
            fn test_nth_rescue_pays_n_times_base(rescues in 1u32..20) {
                let mut board = Scoreboard::new();
                let mut total = 0;
                for n in 1..=rescues {
                    let points = board.rescue_points();
                    prop_assert_eq!(points, FAMILY_POINTS * n);
                    total += points;
                    board.add(points);
                }
                prop_assert_eq!(board.score, total);
            }
        }
    }
}
