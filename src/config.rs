use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_WORLD_WIDTH: u32 = 800;
pub const DEFAULT_WORLD_HEIGHT: u32 = 600;

/// Player sprite cell is 24x28, drawn at 3x.
pub const PLAYER_FRAME_WIDTH: f32 = 24.0;
pub const PLAYER_FRAME_HEIGHT: f32 = 28.0;
pub const PLAYER_SCALE: f32 = 3.0;
pub const PLAYER_SPEED: f32 = 250.0;
pub const PLAYER_START_HEALTH: u8 = 3;
pub const MAX_HEALTH: u8 = 100;
/// How far inside the world edge the player centre may travel
pub const PLAYER_BOUNDARY_INSET: f32 = 10.0;

/// The higher this ratio, the further from the player enemies spawn
pub const SPAWN_EXCLUSION_RATIO: f32 = 3.5;
/// Field margin as a fraction of each world dimension
pub const SPAWN_MARGIN_RATIO: f32 = 0.02;
pub const MAX_FAMILY: u32 = 5;

pub const GRUNT_BASE_SPEED: f32 = 22.0;
pub const STATUE_BASE_SPEED: f32 = 15.0;
pub const SPEED_PER_LEVEL: f32 = 1.5;

pub const INVULNERABILITY_WINDOW: Duration = Duration::from_secs(1);
/// Tint changes colour every N frames while invulnerable
pub const TINT_CYCLE_FRAMES: u8 = 3;
pub const STATUE_FREEZE: Duration = Duration::from_secs(1);
pub const RESCUE_LABEL_LIFETIME: Duration = Duration::from_secs(2);
pub const SKULL_LABEL_LIFETIME: Duration = Duration::from_secs(3);

pub const GRUNT_POINTS: u32 = 100;
pub const FAMILY_POINTS: u32 = 1000;
pub const FREE_HEART_EVERY_POINTS: u32 = 35_000;

pub const QUIVER_SIZE: usize = 30;
pub const ARROW_SPEED: f32 = 700.0;
pub const FIRE_RATE: Duration = Duration::from_millis(120);
/// Hit animation: 5 frames at 10 fps
pub const ARROW_HIT_DURATION: Duration = Duration::from_millis(500);
pub const MOUSE_FIRE_SPREAD_DEGREES: f32 = 10.0;
pub const STICK_AIM_DISTANCE: f32 = 10.0;

/// Longest step the simulation takes in one frame
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(50);

/// Which of the two game variants to play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Variant {
    /// Grunts, statues and family members
    #[default]
    Full,
    /// Grunts only
    Simple,
}

impl Variant {
    pub fn has_statues(&self) -> bool {
        matches!(self, Variant::Full)
    }

    pub fn has_family(&self) -> bool {
        matches!(self, Variant::Full)
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            Variant::Full => "Full",
            Variant::Simple => "Simple",
        }
    }
}

/// Per-run settings handed to [`crate::Game`]
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub variant: Variant,
    pub world_width: f32,
    pub world_height: f32,
    /// Whether a gamepad backend is available (only changes the instructions text)
    pub gamepads_supported: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            variant: Variant::Full,
            world_width: DEFAULT_WORLD_WIDTH as f32,
            world_height: DEFAULT_WORLD_HEIGHT as f32,
            gamepads_supported: false,
        }
    }
}

/// Top-down arcade shooter for the terminal
#[derive(Debug, Parser)]
#[command(version, about = "Fight the grunts, freeze the statues, rescue the family.")]
pub struct Cli {
    /// Game variant to play
    #[arg(long, value_enum, default_value_t = Variant::Full)]
    pub variant: Variant,

    /// World width in game units
    #[arg(long, default_value_t = DEFAULT_WORLD_WIDTH, value_parser = clap::value_parser!(u32).range(200..=4000))]
    pub width: u32,

    /// World height in game units
    #[arg(long, default_value_t = DEFAULT_WORLD_HEIGHT, value_parser = clap::value_parser!(u32).range(200..=4000))]
    pub height: u32,

    /// Seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable sound effects
    #[arg(long)]
    pub mute: bool,

    /// Sound played when an arrow is fired
    #[arg(long, value_name = "PATH", default_value = "assets/sounds/arrow.wav")]
    pub sound: PathBuf,

    /// Where log output goes (RUST_LOG controls the filter)
    #[arg(long, value_name = "PATH", default_value = "debug.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn game_config(&self, gamepads_supported: bool) -> GameConfig {
        GameConfig {
            variant: self.variant,
            world_width: self.width as f32,
            world_height: self.height as f32,
            gamepads_supported,
        }
    }
}
