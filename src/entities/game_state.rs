/// Phases of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Instructions are up, gameplay input is ignored
    AwaitingStart,
    Playing,
    Paused,
    GameOver,
}
