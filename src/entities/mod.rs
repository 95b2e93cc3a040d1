mod enemy;
mod family;
mod game_state;
mod label;
mod player;
mod projectile;

// Re-export all public types
pub use enemy::{EnemyType, Grunt, Statue, StatueTarget};
pub use family::{FAMILY_SIZE, FamilyMember};
pub use game_state::GameState;
pub use label::{FloatingLabel, LabelKind, SKULL};
pub use player::{Facing, HitOutcome, Player, REST_FRAME, RUN_FRAMES, Tint};
pub use projectile::{Arrow, ArrowState, Quiver};
