//! Game controller
//!
//! Owns the world, the input intent, the camera, the clock and the scheduler,
//! and runs each scheduled task against them. The host only has to feed it
//! time ([`Game::advance_to`]) and input ([`Game::handle_command`] and
//! friends).

use rand::Rng;

use crate::input::{Command, Direction, Intent};
use crate::renderer::{Banner, Frame, HudLine, RenderSurface};
use crate::schedule::{Scheduler, Timer};
use crate::settings::Settings;
use crate::sim::{self, Camera, GamePhase, GameState, TickOutcome};

/// Seed used when the settings don't name one
pub const DEFAULT_SEED: u64 = 0x5EED_B10B;

/// The independently-rated jobs of the game loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Task {
    /// Capture and present a frame
    Graphics,
    /// Collisions, movement, cleanup, camera
    Primary,
    /// Pick what each blob chases
    Targeting,
    /// Add a blob near the player
    Spawner,
    /// Recompute the background shade
    BgColor,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::Graphics,
        Task::Primary,
        Task::Targeting,
        Task::Spawner,
        Task::BgColor,
    ];

    /// Label shown on the HUD
    pub fn name(self) -> &'static str {
        match self {
            Task::Graphics => "Graphics",
            Task::Primary => "Primary",
            Task::Targeting => "Targeting",
            Task::Spawner => "Spawner",
            Task::BgColor => "BG Color",
        }
    }

    fn rate(self, settings: &Settings) -> f64 {
        match self {
            Task::Graphics => settings.rates.graphics,
            Task::Primary => settings.rates.primary,
            Task::Targeting => settings.rates.targeting,
            Task::Spawner => settings.rates.spawner,
            Task::BgColor => settings.rates.bg_color,
        }
    }
}

/// Game instance holding all state
pub struct Game<S: RenderSurface> {
    settings: Settings,
    surface: S,
    state: GameState,
    scheduler: Scheduler<Task>,
    timer: Timer,
    intent: Intent,
    camera: Camera,
}

impl<S: RenderSurface> Game<S> {
    /// Start a new game at virtual time `now_ms`
    pub fn new(surface: S, settings: Settings, now_ms: f64) -> Self {
        let settings = settings.sanitized();
        let seed = settings.seed.unwrap_or(DEFAULT_SEED);
        let state = GameState::new(seed, &settings);
        Self::build(surface, settings, state, now_ms)
    }

    /// Start running an existing world at virtual time `now_ms`
    pub fn with_state(surface: S, settings: Settings, state: GameState, now_ms: f64) -> Self {
        Self::build(surface, settings.sanitized(), state, now_ms)
    }

    fn build(surface: S, settings: Settings, state: GameState, now_ms: f64) -> Self {
        let (width, height) = surface.size();
        let mut game = Self {
            camera: Camera::new(width as f32, height as f32, settings.camera_speed),
            intent: Intent::new(settings.intent_max),
            timer: Timer::new(settings.clock_tps),
            scheduler: Scheduler::new(now_ms),
            settings,
            surface,
            state,
        };
        game.schedule_tasks();
        log::info!("New game (seed {})", game.state.seed);
        game
    }

    fn schedule_tasks(&mut self) {
        let now = self.scheduler.now();
        let mut scheduler = Scheduler::new(now);
        for task in Task::ALL {
            scheduler.add(task.name(), task.rate(&self.settings), task);
        }
        self.scheduler = scheduler;
        self.timer.start(now);
        self.state.phase = GamePhase::Running;
    }

    /// Throw the world away and start over
    fn new_game(&mut self) {
        let seed = self.state.rng().random::<u64>();
        self.state = GameState::new(seed, &self.settings);
        self.intent = Intent::new(self.settings.intent_max);
        let (width, height) = self.surface.size();
        self.camera = Camera::new(width as f32, height as f32, self.settings.camera_speed);
        self.timer = Timer::new(self.settings.clock_tps);
        self.schedule_tasks();
        log::info!("New game (seed {})", seed);
    }

    /// Run every task due up to `now_ms`, in time order
    pub fn advance_to(&mut self, now_ms: f64) {
        while let Some(task) = self.scheduler.next_due(now_ms) {
            self.timer.advance_to(self.scheduler.now());
            self.run_task(task);
        }
        self.timer.advance_to(now_ms);
    }

    /// Jump to `now_ms` after the host stalled; missed ticks are dropped
    pub fn stall_to(&mut self, now_ms: f64) {
        log::debug!("Stalled for {:.0} ms", now_ms - self.scheduler.now());
        self.scheduler.stall_to(now_ms);
        self.timer.stall_to(now_ms);
    }

    /// Run one task body immediately
    pub fn run_task(&mut self, task: Task) {
        match task {
            Task::Graphics => self.render_frame(),
            Task::Primary => {
                let outcome = sim::primary_tick(&mut self.state, &self.intent, &mut self.camera);
                if outcome == TickOutcome::PlayerDefeated {
                    self.game_over();
                }
            }
            Task::Targeting => {
                sim::set_blob_targets(&mut self.state, self.settings.visibility_radius)
            }
            Task::Spawner => {
                sim::spawn_blob(&mut self.state, &self.settings);
            }
            Task::BgColor => {
                sim::update_bg_color(&mut self.state, self.settings.background);
            }
        }
    }

    fn render_frame(&mut self) {
        let frame = self.frame();
        self.surface.present(&frame);
    }

    /// Capture what the screen should show right now
    pub fn frame(&self) -> Frame {
        let canvas = self.surface.size();
        let mut frame = Frame::capture(&self.state, &self.camera, canvas);
        if self.settings.show_hud {
            frame.hud = self.hud(canvas);
        }
        if self.state.is_over() {
            frame.banner = Some(Banner {
                title: "game over".to_string(),
                score: self.state.score,
            });
        }
        frame
    }

    fn hud(&self, canvas: (u32, u32)) -> Vec<HudLine> {
        let player = self.state.player.pos;
        let mut lines = vec![
            HudLine::new("Canvas Size", format!("{} x {}", canvas.0, canvas.1)),
            HudLine::new("Number GameObjects", self.state.blobs.len()),
            HudLine::new("Time", self.timer.time()),
            HudLine::new("Score", self.state.score),
            HudLine::new("Player at", format!("{}, {}", player.x, player.y)),
        ];
        lines.extend(
            self.scheduler
                .intervals()
                .iter()
                .map(|interval| HudLine::new(interval.name(), interval.rate())),
        );
        lines
    }

    /// Apply a decoded player command
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Move(direction) => self.direction(direction),
            Command::TogglePause => self.toggle_pause(),
            Command::Restart => self.restart(),
        }
    }

    /// Handle a legacy `keyCode`; unknown codes are logged and ignored
    pub fn handle_key_code(&mut self, code: u32) {
        match Command::from_key_code(code) {
            Some(command) => self.handle_command(command),
            None => log::warn!("unknown keydown: {}", code),
        }
    }

    /// Handle a `KeyboardEvent.key` name; unknown keys are logged and ignored
    pub fn handle_key(&mut self, key: &str) {
        match Command::from_key(key) {
            Some(command) => self.handle_command(command),
            None => log::warn!("unknown keydown: {:?}", key),
        }
    }

    /// Handle a pan gesture direction code
    pub fn handle_pan(&mut self, code: u32) {
        match Direction::from_pan(code) {
            Some(direction) => self.direction(direction),
            None => log::debug!("ignoring pan direction {}", code),
        }
    }

    /// Nudge the movement intent (ignored once the game is over)
    pub fn direction(&mut self, direction: Direction) {
        if self.state.is_over() {
            return;
        }
        self.intent.apply(direction);
    }

    /// Stop all action until resumed; no-op unless running
    pub fn pause(&mut self) {
        if self.state.phase != GamePhase::Running {
            return;
        }
        self.halt();
        self.state.phase = GamePhase::Paused;
        log::info!("Paused");
    }

    /// Resume a paused game
    pub fn start(&mut self) {
        if self.state.phase != GamePhase::Paused {
            return;
        }
        let now = self.scheduler.now();
        self.scheduler.start();
        self.timer.start(now);
        self.state.phase = GamePhase::Running;
        log::info!("Resumed");
    }

    pub fn toggle_pause(&mut self) {
        match self.state.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.start(),
            GamePhase::GameOver => log::debug!("Game over, press space to restart"),
        }
    }

    fn halt(&mut self) {
        self.scheduler.pause();
        self.timer.pause();
    }

    /// End the game: stop every task, freeze the score, show the final frame
    pub fn game_over(&mut self) {
        if self.state.is_over() {
            return;
        }
        self.halt();
        self.state.phase = GamePhase::GameOver;
        log::info!(
            "Game over: score {} after {}",
            self.state.score,
            self.timer.time()
        );
        self.render_frame();
    }

    /// Start a fresh game from any phase
    pub fn restart(&mut self) {
        self.halt();
        self.new_game();
    }

    /// Track a new canvas size
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width as f32, height as f32);
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn timer(&self) -> &Timer {
        &self.timer
    }

    pub fn scheduler(&self) -> &Scheduler<Task> {
        &self.scheduler
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Measured rate of a task over the last second
    pub fn measured_rate(&self, task: Task) -> Option<u32> {
        self.scheduler
            .intervals()
            .iter()
            .find(|interval| interval.task() == task)
            .map(|interval| interval.rate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    /// Surface that keeps every frame it is given
    struct Recorder {
        frames: Vec<Frame>,
    }

    impl RenderSurface for Recorder {
        fn size(&self) -> (u32, u32) {
            (800, 600)
        }

        fn present(&mut self, frame: &Frame) {
            self.frames.push(frame.clone());
        }
    }

    fn game() -> Game<Recorder> {
        let settings = Settings {
            seed: Some(12345),
            ..Default::default()
        };
        Game::new(Recorder { frames: Vec::new() }, settings, 0.0)
    }

    #[test]
    fn test_new_game_is_running() {
        let game = game();
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.scheduler().is_running());
        assert!(game.timer().is_running());
        assert_eq!(game.scheduler().intervals().len(), 5);
        assert_eq!(game.camera().offset, Vec2::new(-400.0, -300.0));
    }

    #[test]
    fn test_one_second_of_play() {
        let mut game = game();
        game.advance_to(1000.0);

        assert_eq!(game.surface().frames.len(), 30);
        assert_eq!(game.state().blobs.len(), 1);
        assert_eq!(game.timer().seconds(), 1);
        assert_eq!(game.measured_rate(Task::Graphics), Some(30));
        assert_eq!(game.measured_rate(Task::Primary), Some(20));
        assert_eq!(game.measured_rate(Task::Targeting), Some(5));
        assert_eq!(game.measured_rate(Task::Spawner), Some(1));
        assert_eq!(game.measured_rate(Task::BgColor), Some(10));
    }

    #[test]
    fn test_bad_settings_are_corrected() {
        let settings = Settings {
            seed: Some(12345),
            player_radius: f32::NAN,
            rates: crate::settings::TaskRates {
                primary: 0.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut game = Game::new(Recorder { frames: Vec::new() }, settings, 0.0);
        assert_eq!(game.state().player.radius, crate::consts::PLAYER_RADIUS);
        assert_eq!(game.settings().rates.primary, crate::consts::PRIMARY_RATE);

        game.advance_to(1000.0);
        assert_eq!(game.measured_rate(Task::Primary), Some(20));
    }

    #[test]
    fn test_hud_lines() {
        let mut game = game();
        game.advance_to(2000.0);
        let frame = game.frame();
        assert_eq!(frame.hud_value("Canvas Size"), Some("800 x 600"));
        assert_eq!(frame.hud_value("Number GameObjects"), Some("2"));
        assert_eq!(frame.hud_value("Time"), Some("0:02"));
        assert_eq!(frame.hud_value("Score"), Some("0"));
        assert_eq!(frame.hud_value("Player at"), Some("0, 0"));
        assert_eq!(frame.hud_value("Primary"), Some("20"));
        assert_eq!(frame.hud_value("BG Color"), Some("10"));
    }

    #[test]
    fn test_hud_can_be_hidden() {
        let settings = Settings {
            show_hud: false,
            ..Default::default()
        };
        let game = Game::new(Recorder { frames: Vec::new() }, settings, 0.0);
        assert!(game.frame().hud.is_empty());
    }

    #[test]
    fn test_player_moves_by_intent() {
        let mut game = game();
        game.handle_key_code(39); // right
        game.handle_key_code(39);
        game.handle_key_code(87); // w
        game.advance_to(100.0); // two primary ticks
        assert_eq!(game.state().player.pos, Vec2::new(4.0, -2.0));
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut game = game();
        game.handle_key_code(13);
        game.handle_key("Enter");
        game.handle_pan(1);
        assert_eq!(*game.intent(), Intent::default());
        assert_eq!(game.phase(), GamePhase::Running);
    }

    #[test]
    fn test_pause_and_resume() {
        let mut game = game();
        game.advance_to(500.0);
        let frames = game.surface().frames.len();

        game.handle_key_code(27);
        assert_eq!(game.phase(), GamePhase::Paused);
        game.advance_to(5000.0);
        assert_eq!(game.surface().frames.len(), frames);
        assert_eq!(game.timer().seconds(), 0);

        game.handle_key("Escape");
        assert_eq!(game.phase(), GamePhase::Running);
        game.advance_to(6000.0);
        assert_eq!(game.surface().frames.len(), frames + 30);
        assert_eq!(game.timer().seconds(), 1);
    }

    #[test]
    fn test_direction_accepted_while_paused() {
        let mut game = game();
        game.toggle_pause();
        game.handle_pan(4);
        assert_eq!(game.intent().x, 1);
    }

    #[test]
    fn test_game_over_freezes_everything() {
        let mut game = game();
        game.advance_to(1000.0);
        game.state_mut().score = 300;
        let id = game.state_mut().add_blob(Vec2::new(5000.0, 0.0), 5.0, crate::Color::new(1, 1, 1));
        game.state_mut().blobs.iter_mut().for_each(|b| b.alive = b.id != id);
        game.state_mut().player.alive = false;

        game.advance_to(1050.0); // next primary tick
        assert_eq!(game.phase(), GamePhase::GameOver);
        assert!(!game.scheduler().is_running());
        assert!(!game.timer().is_running());

        let last = game.surface().frames.last().cloned();
        let banner = last.and_then(|f| f.banner);
        assert_eq!(banner.map(|b| b.score), Some(300));

        let frames = game.surface().frames.len();
        game.advance_to(10_000.0);
        assert_eq!(game.surface().frames.len(), frames);
        assert_eq!(game.score(), 300);

        // Only restart leaves game over
        game.toggle_pause();
        assert_eq!(game.phase(), GamePhase::GameOver);
        game.handle_key_code(37);
        assert_eq!(game.intent().x, 0);
    }

    #[test]
    fn test_restart() {
        let mut game = game();
        game.handle_key_code(39);
        game.advance_to(3000.0);
        game.state_mut().score = 100;
        game.state_mut().player.alive = false;
        game.advance_to(3050.0);
        assert_eq!(game.phase(), GamePhase::GameOver);

        game.handle_key_code(32);
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.state().blobs.is_empty());
        assert_eq!(game.score(), 0);
        assert_eq!(game.timer().seconds(), 0);
        assert_eq!(*game.intent(), Intent::default());
        assert_eq!(game.state().player.pos, Vec2::ZERO);
        assert!(game.state().player.alive);

        // Tasks restart from the moment of the restart
        game.advance_to(4000.0);
        assert!(game.state().blobs.is_empty());
        game.advance_to(4050.0);
        assert_eq!(game.state().blobs.len(), 1);
        assert_eq!(game.timer().seconds(), 1);
    }

    #[test]
    fn test_restart_from_paused() {
        let mut game = game();
        game.toggle_pause();
        game.restart();
        assert_eq!(game.phase(), GamePhase::Running);
        assert!(game.scheduler().is_running());
    }

    #[test]
    fn test_stall_drops_ticks() {
        let mut game = game();
        game.stall_to(990.0);
        game.advance_to(1000.0);
        // Only the ticks due at exactly 1000 ms survive
        assert_eq!(game.measured_rate(Task::Graphics), Some(1));
        assert_eq!(game.measured_rate(Task::Primary), Some(1));
        assert_eq!(game.timer().seconds(), 1);
    }

    #[test]
    fn test_resize_updates_camera() {
        let mut game = game();
        game.resize(400, 400);
        assert_eq!(game.camera().size, Vec2::new(400.0, 400.0));
    }
}
