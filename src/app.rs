use color_eyre::Result;
use log::info;
use ratatui::{Terminal, backend::Backend, layout::Rect};
use std::time::{Duration, Instant};

use crate::audio::AudioManager;
use crate::entities::GameState;
use crate::game::Game;
use crate::gamepad::GamepadHub;
use crate::input::{FrameInput, InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView, Viewport};

/// The main application which owns the game and its devices.
pub struct App {
    running: bool,
    game: Game,
    /// Frames info
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    gamepads: GamepadHub,
    renderer: GameRenderer,
    audio: Option<AudioManager>,
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(
        game: Game,
        input_manager: InputManager,
        gamepads: GamepadHub,
        audio: Option<AudioManager>,
    ) -> Self {
        Self {
            running: true,
            game,
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager,
            gamepads,
            renderer: GameRenderer::new(),
            audio,
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while self.running {
            // Frame delta, also feeds the FPS counter
            let now = Instant::now();
            let frame_time = now.duration_since(self.last_frame_time);
            self.last_frame_time = now;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            // The world is scaled into whatever the terminal currently is
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            let config = self.game.config();
            let viewport = Viewport::new(area, config.world_width, config.world_height);

            terminal.draw(|frame| {
                let view = self.render_view(frame.area(), viewport);
                self.renderer.render(frame, &view);
            })?;

            self.input_manager.poll_events(&self.game.game_state())?;
            self.gamepads.poll();
            let actions = self.input_manager.get_actions();
            self.process_actions(&actions);

            let input = self.frame_input(viewport, now);
            let report = self.game.update(frame_time, &input);
            if let Some(audio) = &self.audio {
                for _ in 0..report.arrows_fired {
                    audio.play_arrow_sound();
                }
            }

            // Small sleep to maintain ~60 FPS and prevent CPU spinning
            std::thread::sleep(Duration::from_millis(8));
        }

        info!(
            "Quit on level {} with {} points at {} fps",
            self.game.level(),
            self.game.score(),
            self.fps
        );
        Ok(())
    }

    fn render_view(&self, area: Rect, viewport: Viewport) -> RenderView<'_> {
        let game = &self.game;
        RenderView {
            game_state: game.game_state(),
            player: game.player(),
            grunts: game.grunts(),
            statues: game.statues(),
            family: game.family(),
            arrows: game.quiver().arrows(),
            labels: game.labels(),
            hud: game.hud_line(),
            gamepad_status: self.gamepads.status_text(),
            gamepads_supported: self.gamepads.is_supported(),
            score: game.score(),
            level: game.level(),
            now: game.now(),
            area,
            viewport,
        }
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Start => {
                    self.game.start();
                }
                InputAction::Pause => {
                    self.game.pause();
                    self.input_manager.release_all();
                }
                InputAction::Resume => {
                    self.game.resume();
                }
                InputAction::Restart => {
                    self.game.restart();
                    self.input_manager.release_all();
                }
            }
        }
    }

    /// Snapshot of the keyboard, mouse and pads for this frame
    fn frame_input(&mut self, viewport: Viewport, now: Instant) -> FrameInput {
        let pointer = self
            .input_manager
            .pointer_cell()
            .and_then(|(column, row)| viewport.to_world(column, row));

        FrameInput {
            keys: self.input_manager.held_directions(now),
            pointer,
            main_stick: self.gamepads.main_stick(),
            second_stick: self.gamepads.second_stick(),
            start_requested: self.gamepads.take_activity()
                && self.game.game_state() == GameState::AwaitingStart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn app() -> App {
        let game = Game::new(GameConfig::default(), StdRng::seed_from_u64(3));
        App::new(game, InputManager::new(true), GamepadHub::disabled(), None)
    }

    #[test]
    fn test_actions_drive_game_state() {
        let mut app = app();
        assert_eq!(app.game.game_state(), GameState::AwaitingStart);

        app.process_actions(&[InputAction::Start]);
        assert_eq!(app.game.game_state(), GameState::Playing);

        app.process_actions(&[InputAction::Pause]);
        assert_eq!(app.game.game_state(), GameState::Paused);

        app.process_actions(&[InputAction::Resume]);
        assert_eq!(app.game.game_state(), GameState::Playing);

        app.process_actions(&[InputAction::Quit]);
        assert!(!app.running);
    }

    #[test]
    fn test_restart_begins_playing_at_level_one() {
        let mut app = app();
        app.game.start();
        app.game.new_level();
        assert_eq!(app.game.level(), 2);

        app.process_actions(&[InputAction::Restart]);
        assert_eq!(app.game.level(), 1);
        assert_eq!(app.game.score(), 0);
        assert_eq!(app.game.game_state(), GameState::Playing);
    }

    #[test]
    fn test_frame_input_without_devices() {
        let mut app = app();
        let viewport = Viewport::new(Rect::new(0, 0, 82, 32), 800.0, 600.0);
        let input = app.frame_input(viewport, Instant::now());
        assert_eq!(input, FrameInput::default());
    }
}
