use glam::Vec2;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

use crate::ai;
use crate::clock::GameClock;
use crate::config::{
    GameConfig, MAX_FRAME_DELTA, MOUSE_FIRE_SPREAD_DEGREES, PLAYER_BOUNDARY_INSET, PLAYER_SPEED,
    QUIVER_SIZE, STICK_AIM_DISTANCE,
};
use crate::entities::{
    FAMILY_SIZE, FamilyMember, FloatingLabel, GameState, Grunt, HitOutcome, Player, Quiver,
    Statue,
};
use crate::geometry::Rect;
use crate::input::FrameInput;
use crate::level::{SpawnZones, family_count, grunt_count, statue_count};
use crate::score::Scoreboard;

/// What happened during one call to [`Game::update`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub arrows_fired: u32,
    pub grunts_killed: u32,
    pub family_rescued: u32,
    pub level_started: bool,
    pub game_over: bool,
}

/// The whole game world and its rules
pub struct Game {
    config: GameConfig,
    game_state: GameState,
    clock: GameClock,
    rng: StdRng,
    level: u32,
    scoreboard: Scoreboard,
    player: Player,
    grunts: Vec<Grunt>,
    statues: Vec<Statue>,
    family: Vec<FamilyMember>,
    quiver: Quiver,
    labels: Vec<FloatingLabel>,
    zones: SpawnZones,
    world: Rect,
    player_area: Rect,
}

impl Game {
    /// A fresh game waiting for the start input, with level 1 already laid out
    pub fn new(mut config: GameConfig, rng: StdRng) -> Self {
        // The player area must keep a non-negative size inside the boundary inset
        let min_size = PLAYER_BOUNDARY_INSET * 2.0;
        let too_small = |size: f32| size.is_nan() || size < min_size;
        if too_small(config.world_width) || too_small(config.world_height) {
            warn!(
                "World {}x{} too small, growing it to at least {min_size}",
                config.world_width, config.world_height
            );
            config.world_width = config.world_width.max(min_size);
            config.world_height = config.world_height.max(min_size);
        }

        let world = Rect::new(0.0, 0.0, config.world_width, config.world_height);
        let player_area = Rect::new(
            PLAYER_BOUNDARY_INSET,
            PLAYER_BOUNDARY_INSET,
            config.world_width - PLAYER_BOUNDARY_INSET * 2.0,
            config.world_height - PLAYER_BOUNDARY_INSET * 2.0,
        );

        let mut game = Self {
            zones: SpawnZones::new(config.world_width, config.world_height),
            player: Player::new(world.center()),
            config,
            game_state: GameState::AwaitingStart,
            clock: GameClock::new(),
            rng,
            level: 0,
            scoreboard: Scoreboard::new(),
            grunts: Vec::new(),
            statues: Vec::new(),
            family: Vec::new(),
            quiver: Quiver::new(QUIVER_SIZE),
            labels: Vec::new(),
            world,
            player_area,
        };
        game.new_level();
        game
    }

    /// Throws the run away and starts playing a new one straight away
    pub fn restart(&mut self) {
        let rng = std::mem::replace(&mut self.rng, StdRng::from_seed([0; 32]));
        *self = Self::new(self.config.clone(), rng);
        self.game_state = GameState::Playing;
        info!("Game restarted");
    }

    pub fn start(&mut self) {
        if self.game_state == GameState::AwaitingStart {
            info!("Game started");
            self.game_state = GameState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.game_state == GameState::Playing {
            self.game_state = GameState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.game_state == GameState::Paused {
            self.game_state = GameState::Playing;
        }
    }

    /// Advances the world by one frame
    pub fn update(&mut self, dt: Duration, input: &FrameInput) -> FrameReport {
        let mut report = FrameReport::default();

        match self.game_state {
            GameState::AwaitingStart => {
                if input.start_requested {
                    self.start();
                }
                return report;
            }
            GameState::Paused | GameState::GameOver => return report,
            GameState::Playing => {}
        }

        let dt = dt.min(MAX_FRAME_DELTA);
        self.clock.advance(dt);
        let now = self.clock.now();

        self.player.update_invulnerability(now);
        self.control_player(input, now, &mut report);

        ai::steer_grunts(&mut self.grunts, self.player.position, self.level);
        ai::steer_statues(
            &mut self.statues,
            &self.family,
            self.player.position,
            self.level,
            now,
        );

        self.integrate(dt);
        self.quiver.update(dt, now, &self.world);
        self.labels.retain(|label| !label.is_expired(now));

        self.resolve_collisions(now, &mut report);
        report
    }

    /// Velocity from the gamepad, keyboard and mouse, in that order, plus firing
    fn control_player(&mut self, input: &FrameInput, now: Duration, report: &mut FrameReport) {
        self.player.velocity = Vec2::ZERO;
        if !self.player.is_alive() {
            return;
        }

        if let Some(stick) = input.main_stick {
            self.player.velocity = stick * PLAYER_SPEED;
            self.player.face_toward(stick.x);
        }
        if let Some(aim) = input.second_stick
            && aim != Vec2::ZERO
        {
            let target = self.player.position + aim * STICK_AIM_DISTANCE;
            self.fire(target, 0.0, now, report);
        }

        let keys = input.keys;
        if keys.left {
            self.player.velocity.x -= PLAYER_SPEED;
            self.player.face_toward(-1.0);
        }
        if keys.right {
            self.player.velocity.x += PLAYER_SPEED;
            self.player.face_toward(1.0);
        }
        if keys.up {
            self.player.velocity.y -= PLAYER_SPEED;
        }
        if keys.down {
            self.player.velocity.y += PLAYER_SPEED;
        }

        if let Some(pointer) = input.pointer {
            let spread = self
                .rng
                .random_range(-MOUSE_FIRE_SPREAD_DEGREES..=MOUSE_FIRE_SPREAD_DEGREES)
                .to_radians();
            self.fire(pointer, spread, now, report);
        }

        self.player.animate(now);
    }

    fn fire(&mut self, target: Vec2, spread: f32, now: Duration, report: &mut FrameReport) {
        if self.quiver.fire_at(self.player.position, target, spread, now) {
            report.arrows_fired += 1;
        }
    }

    fn integrate(&mut self, dt: Duration) {
        let secs = dt.as_secs_f32();

        self.player.position += self.player.velocity * secs;
        self.player.position = self.player_area.clamp(self.player.position);

        for grunt in self.grunts.iter_mut().filter(|g| g.is_alive()) {
            grunt.position += grunt.velocity * secs;
        }
        for statue in self.statues.iter_mut().filter(|s| s.is_alive()) {
            statue.position += statue.velocity * secs;
        }
    }

    fn resolve_collisions(&mut self, now: Duration, report: &mut FrameReport) {
        // Enemies touching the player; invulnerability swallows all but the first
        let player_box = self.player.bounds();
        let touching = self
            .grunts
            .iter()
            .filter(|g| g.is_alive() && g.bounds().intersects(&player_box))
            .count()
            + self
                .statues
                .iter()
                .filter(|s| s.is_alive() && s.bounds().intersects(&player_box))
                .count();
        for _ in 0..touching {
            self.damage_player(now, report);
        }
        if self.game_state == GameState::GameOver {
            return;
        }

        // Arrows freeze every statue they touch; a stopped arrow stays live until
        // its hit animation ends
        for arrow in self.quiver.arrows_mut() {
            if !arrow.is_active() {
                continue;
            }
            let arrow_box = arrow.bounds();
            for statue in self
                .statues
                .iter_mut()
                .filter(|s| s.is_alive() && s.bounds().intersects(&arrow_box))
            {
                arrow.hit(now);
                statue.freeze(now);
                debug!("Statue frozen until {:?}", statue.frozen_until);
            }
        }

        // Arrows kill every grunt they touch
        for arrow in self.quiver.arrows_mut() {
            if !arrow.is_active() {
                continue;
            }
            let arrow_box = arrow.bounds();
            for grunt in self
                .grunts
                .iter_mut()
                .filter(|g| g.is_alive() && g.bounds().intersects(&arrow_box))
            {
                arrow.hit(now);
                grunt.kill();
                report.grunts_killed += 1;
                if self.scoreboard.add(grunt.get_points()) {
                    self.player.heal(1);
                }
            }
        }

        // Family walking into the player is rescued
        let player_box = self.player.bounds();
        for member in self.family.iter_mut() {
            if !member.is_alive() || !member.bounds().intersects(&player_box) {
                continue;
            }
            let points = self.scoreboard.rescue_points();
            if self.scoreboard.add(points) {
                self.player.heal(1);
            }
            let label_at = member.position - Vec2::new(FAMILY_SIZE.x / 2.0, 0.0);
            self.labels.push(FloatingLabel::score(points, label_at, now));
            member.remove();
            report.family_rescued += 1;
            debug!("Family member rescued for {points} points");
        }

        // Family caught by a statue is lost
        for member in self.family.iter_mut().filter(|m| m.is_alive()) {
            let member_box = member.bounds();
            if self
                .statues
                .iter()
                .any(|s| s.is_alive() && s.bounds().intersects(&member_box))
            {
                self.labels.push(FloatingLabel::skull(member.position, now));
                member.remove();
                debug!("Family member caught by a statue");
            }
        }

        if report.grunts_killed > 0 && self.living_grunts() == 0 {
            self.new_level();
            report.level_started = true;
        }
    }

    fn damage_player(&mut self, now: Duration, report: &mut FrameReport) {
        match self.player.take_hit(now) {
            HitOutcome::Ignored => {}
            HitOutcome::Hurt => {
                debug!("Player hit, {} hearts left", self.player.health);
            }
            HitOutcome::Killed => {
                self.player.recenter(self.world.center());
                self.game_state = GameState::GameOver;
                report.game_over = true;
                info!(
                    "Game over on level {} with {} points",
                    self.level, self.scoreboard.score
                );
            }
        }
    }

    /// Level Director: next level's roster, laid out around a recentred player
    pub fn new_level(&mut self) {
        let now = self.clock.now();
        self.player.recenter(self.world.center());
        self.player.clear_invulnerability();
        self.quiver.recall_all();
        self.level += 1;
        self.scoreboard.start_level();

        let variant = self.config.variant;
        let grunts = grunt_count(self.level);
        let statues = statue_count(self.level, variant);
        let family = family_count(self.level, variant);

        // Family first so statues can pick their targets
        while self.family.len() < family {
            self.family.push(FamilyMember::new(Vec2::ZERO));
        }
        for member in &mut self.family {
            member.revive_at(self.zones.random_point_in_margins(&mut self.rng));
        }

        while self.grunts.len() < grunts {
            self.grunts.push(Grunt::new(Vec2::ZERO));
        }
        for (i, grunt) in self.grunts.iter_mut().enumerate() {
            grunt.revive_at(self.zones.random_point_in_zone(i, &mut self.rng));
        }

        while self.statues.len() < statues {
            self.statues.push(Statue::new(Vec2::ZERO));
        }
        for (i, statue) in self.statues.iter_mut().enumerate() {
            statue.reset_at(self.zones.random_point_in_zone(i, &mut self.rng), now);
            statue.target = Some(ai::choose_target(statue.position, &self.family));
        }

        info!(
            "Level {} started: {} grunts, {} statues, {} family",
            self.level, grunts, statues, family
        );
    }

    pub fn living_grunts(&self) -> usize {
        self.grunts.iter().filter(|g| g.is_alive()).count()
    }

    pub fn hud_line(&self) -> String {
        self.scoreboard.hud_line(self.player.health, self.level)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game_state(&self) -> GameState {
        self.game_state
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.scoreboard.score
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn now(&self) -> Duration {
        self.clock.now()
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn grunts(&self) -> &[Grunt] {
        &self.grunts
    }

    pub fn grunts_mut(&mut self) -> &mut [Grunt] {
        &mut self.grunts
    }

    pub fn statues(&self) -> &[Statue] {
        &self.statues
    }

    pub fn statues_mut(&mut self) -> &mut [Statue] {
        &mut self.statues
    }

    pub fn family(&self) -> &[FamilyMember] {
        &self.family
    }

    pub fn family_mut(&mut self) -> &mut [FamilyMember] {
        &mut self.family
    }

    pub fn quiver(&self) -> &Quiver {
        &self.quiver
    }

    pub fn quiver_mut(&mut self) -> &mut Quiver {
        &mut self.quiver
    }

    pub fn labels(&self) -> &[FloatingLabel] {
        &self.labels
    }
}
