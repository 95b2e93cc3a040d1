use glam::Vec2;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::f32::consts::PI;
use std::time::Duration;

use crate::entities::{
    Arrow, ArrowState, EnemyType, Facing, FamilyMember, FloatingLabel, GameState, Grunt,
    LabelKind, Player, Statue, Tint,
};

/// Maps world units onto the terminal cells inside the play-field border
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub inner: Rect,
    pub world_width: f32,
    pub world_height: f32,
}

impl Viewport {
    /// Viewport for a bordered play field filling `area`
    pub fn new(area: Rect, world_width: f32, world_height: f32) -> Self {
        Self {
            inner: Block::default().borders(Borders::ALL).inner(area),
            world_width,
            world_height,
        }
    }

    /// Cell containing a world position, `None` outside the world
    pub fn to_cell(&self, position: Vec2) -> Option<(u16, u16)> {
        if self.inner.width == 0 || self.inner.height == 0 {
            return None;
        }
        if position.x < 0.0
            || position.y < 0.0
            || position.x > self.world_width
            || position.y > self.world_height
        {
            return None;
        }

        let column = (position.x / self.world_width * self.inner.width as f32) as u16;
        let row = (position.y / self.world_height * self.inner.height as f32) as u16;
        Some((
            self.inner.x + column.min(self.inner.width - 1),
            self.inner.y + row.min(self.inner.height - 1),
        ))
    }

    /// World position at the centre of a cell, `None` outside the play field
    pub fn to_world(&self, column: u16, row: u16) -> Option<Vec2> {
        let inside = column >= self.inner.x
            && column < self.inner.x + self.inner.width
            && row >= self.inner.y
            && row < self.inner.y + self.inner.height;
        if !inside {
            return None;
        }

        let x = (column - self.inner.x) as f32 + 0.5;
        let y = (row - self.inner.y) as f32 + 0.5;
        Some(Vec2::new(
            x * self.world_width / self.inner.width as f32,
            y * self.world_height / self.inner.height as f32,
        ))
    }
}

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub grunts: &'a [Grunt],
    pub statues: &'a [Statue],
    pub family: &'a [FamilyMember],
    pub arrows: &'a [Arrow],
    pub labels: &'a [FloatingLabel],
    pub hud: String,
    pub gamepad_status: String,
    pub gamepads_supported: bool,
    pub score: u32,
    pub level: u32,
    /// Game clock, drives the frozen-statue colour
    pub now: Duration,
    pub area: Rect,
    pub viewport: Viewport,
}

/// Instructions shown before the first input
pub fn instructions(gamepads_supported: bool) -> Vec<String> {
    let mut lines =
        vec!["Zeldatron can be played with mouse and keyboard or dual-analog gamepad.".to_string()];
    if gamepads_supported {
        lines.push(
            "Connect a gamepad and press any button or move a stick to start.".to_string(),
        );
        lines.push("Move with the left stick, fire in 360° with the right stick.".to_string());
    } else {
        lines.push("Gamepads are not supported on this system.".to_string());
    }
    lines.push(
        "To play with the mouse and keyboard, press any key or click the play field.".to_string(),
    );
    lines.push(
        "Fire by holding down the mouse button and move with WASD or the arrow keys.".to_string(),
    );
    lines
}

fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::White => Color::White,
        Tint::Red => Color::Red,
        Tint::Green => Color::Green,
        Tint::Blue => Color::Blue,
    }
}

fn enemy_glyph(enemy_type: EnemyType) -> &'static str {
    match enemy_type {
        EnemyType::Grunt => "G",
        EnemyType::Statue => "Ω",
    }
}

/// Shaft glyph closest to the flight angle
fn arrow_glyph(arrow: &Arrow) -> &'static str {
    if let ArrowState::Hitting { .. } = arrow.state {
        return "*";
    }
    // Fold into [0, PI): an arrow and its reverse share a glyph
    let angle = arrow.angle.rem_euclid(PI);
    let octant = ((angle / (PI / 4.0)).round() as u8) % 4;
    match octant {
        0 => "-",
        1 => "\\",
        2 => "|",
        _ => "/",
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {}

impl Default for GameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        match view.game_state {
            GameState::AwaitingStart => self.render_instructions(frame, view),
            GameState::Playing => {}
            GameState::Paused => self.render_paused(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    /// Renders the play field, its sprites and the HUD
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray));
        frame.render_widget(block, area);

        let viewport = view.viewport;
        let buffer = frame.buffer_mut();
        let mut put = |position: Vec2, text: &str, style: Style| {
            if let Some((x, y)) = viewport.to_cell(position) {
                let room = (viewport.inner.x + viewport.inner.width).saturating_sub(x) as usize;
                buffer.set_stringn(x, y, text, room, style);
            }
        };

        for member in view.family.iter().filter(|m| m.is_alive()) {
            put(
                member.position,
                "♀",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            );
        }

        for grunt in view.grunts.iter().filter(|g| g.is_alive()) {
            put(
                grunt.position,
                enemy_glyph(EnemyType::Grunt),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            );
        }

        for statue in view.statues.iter().filter(|s| s.is_alive()) {
            // Frozen statues turn icy
            let color = if statue.is_frozen(view.now) {
                Color::Cyan
            } else {
                Color::Yellow
            };
            put(
                statue.position,
                enemy_glyph(EnemyType::Statue),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            );
        }

        for arrow in view.arrows.iter().filter(|a| a.is_active()) {
            put(
                arrow.position,
                arrow_glyph(arrow),
                Style::default().fg(Color::LightYellow),
            );
        }

        if view.player.is_alive() {
            // Bow on the facing side, drawn back on odd run frames
            let bow = if view.player.is_running() && view.player.frame % 2 == 1 {
                "}"
            } else {
                ")"
            };
            let style = Style::default()
                .fg(tint_color(view.player.tint))
                .add_modifier(Modifier::BOLD);
            put(view.player.position, "@", style);
            let cell = viewport.inner.width.max(1) as f32;
            let step = Vec2::new(view.viewport.world_width / cell, 0.0);
            match view.player.facing {
                Facing::Right => put(view.player.position + step, bow, style),
                Facing::Left => put(
                    view.player.position - step,
                    if bow == ")" { "(" } else { "{" },
                    style,
                ),
            }
        }

        for label in view.labels {
            let style = match label.kind {
                LabelKind::Score => Style::default().fg(Color::White),
                LabelKind::Skull => Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            };
            put(label.position, &label.text, style);
        }

        // Connected pads on the left of the top border
        if !view.gamepad_status.is_empty() {
            let status_area = Rect {
                x: area.x + 1,
                y: area.y,
                width: area.width.saturating_sub(2),
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(Span::styled(
                    view.gamepad_status.as_str(),
                    Style::default().fg(Color::DarkGray),
                )),
                status_area,
            );
        }

        // Hearts, level and score centred on the top border
        let hud = Line::from(vec![Span::styled(
            view.hud.as_str(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )]);
        let hud_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: area.height.min(1),
        };
        frame.render_widget(Paragraph::new(hud).centered(), hud_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Mouse: Aim + Fire] [P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: area.height.min(1),
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    fn render_instructions(&self, frame: &mut Frame, view: &RenderView) {
        let lines: Vec<Line> = instructions(view.gamepads_supported)
            .into_iter()
            .map(|line| Line::from(line).centered().white())
            .collect();
        let height = lines.len() as u16 + 2;
        let overlay = centered_rect(view.area, view.area.width.saturating_sub(4), height);

        frame.render_widget(Clear, overlay);
        frame.render_widget(
            Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::White)),
                )
                .alignment(Alignment::Center),
            overlay,
        );
    }

    /// Renders the pause box over the frozen game
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];
        let pause_area = centered_rect(view.area, 30, 6);

        frame.render_widget(Clear, pause_area);
        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over banner over the last frame
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║         GAME OVER         ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .yellow()
                .bold(),
            Line::from(format!("Reached Level: {}", view.level))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];
        let banner_area = centered_rect(view.area, 40, game_over_text.len() as u16 + 2);

        frame.render_widget(Clear, banner_area);
        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            banner_area,
        );
    }
}

/// A `width` x `height` box centred in `area`, shrunk to fit
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
