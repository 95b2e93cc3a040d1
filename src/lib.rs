// Library exports for the binary and the integration tests
pub use app::App;
pub use audio::AudioManager;
pub use config::{Cli, GameConfig, Variant};
pub use entities::{
    Arrow, ArrowState, EnemyType, Facing, FamilyMember, FloatingLabel, GameState, Grunt,
    HitOutcome, LabelKind, Player, Quiver, Statue, StatueTarget,
};
pub use game::{FrameReport, Game};
pub use gamepad::GamepadHub;
pub use geometry::Rect;
pub use input::{DirectionKeys, FrameInput, InputAction, InputManager};

pub mod ai;
pub mod app;
pub mod audio;
pub mod clock;
pub mod config;
pub mod entities;
pub mod game;
pub mod gamepad;
pub mod geometry;
pub mod input;
pub mod level;
pub mod renderer;
pub mod score;
