use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::constants::LOOP_TIME;
use crate::game::Game;
use crate::level::Level;
use crate::systems::{
    audio::{AudioEvent, AudioSink},
    input::InputProvider,
    render::{RenderFrame, Renderer},
    state::GameOutcome,
};

fn sleep(value: Duration) {
    spin_sleep::sleep(value);
}

/// Converts variable frame times into whole simulation ticks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
    /// Upper bound of ticks per frame, so a stalled host does not spiral.
    max_steps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(LOOP_TIME, 5)
    }
}

impl FixedStep {
    pub fn new(step: Duration, max_steps: u32) -> Self {
        Self {
            step,
            accumulator: Duration::ZERO,
            max_steps,
        }
    }

    /// Adds `elapsed` and returns how many ticks are now due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_steps {
            self.accumulator -= self.step;
            steps += 1;
        }

        if steps == self.max_steps && self.accumulator >= self.step {
            warn!(dropped = ?self.accumulator, "Simulation behind schedule, dropping time");
            self.accumulator = Duration::ZERO;
        }
        steps
    }

    /// Fraction of a tick left in the accumulator, for interpolating renderers.
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }
}

/// Renderer for headless runs: logs a short summary once per simulated second.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames += 1;
        if self.frames % 60 != 0 {
            return;
        }
        debug!(
            camera_x = frame.camera_x,
            sprites = frame.sprites.len(),
            health = frame.hud.health.percentage,
            bottles = frame.hud.bottles.percentage,
            coins = frame.hud.coins.percentage,
            boss = ?frame.hud.boss.map(|b| b.bar.percentage),
            "Frame"
        );
    }
}

/// Audio sink for headless runs.
#[derive(Debug, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, event: AudioEvent) {
        info!(cue = event.as_ref(), "Sound");
    }
}

/// Drives a [`Game`] from an input provider into a renderer and an audio sink.
pub struct App {
    pub game: Game,
    input: Box<dyn InputProvider>,
    renderer: Box<dyn Renderer>,
    audio: Box<dyn AudioSink>,
    step: FixedStep,
    realtime: bool,
    max_ticks: Option<u64>,
    last_frame: Instant,
}

impl App {
    pub fn new(
        level: Level,
        seed: u64,
        input: Box<dyn InputProvider>,
        renderer: Box<dyn Renderer>,
        audio: Box<dyn AudioSink>,
    ) -> Result<Self> {
        let game = Game::new(level, seed)?;

        Ok(Self {
            game,
            input,
            renderer,
            audio,
            step: FixedStep::default(),
            realtime: false,
            max_ticks: None,
            last_frame: Instant::now(),
        })
    }

    /// Pace the simulation against the wall clock instead of running flat out.
    pub fn realtime(mut self, realtime: bool) -> Self {
        self.realtime = realtime;
        self
    }

    /// Stop after this many ticks, whatever the outcome.
    pub fn max_ticks(mut self, ticks: Option<u64>) -> Self {
        self.max_ticks = ticks;
        self
    }

    fn step_once(&mut self) -> GameOutcome {
        let tick = self.game.tick_count() + 1;
        let flags = self.input.sample(tick);
        let outcome = self.game.tick(flags);

        for cue in self.game.drain_audio() {
            self.audio.play(cue);
        }
        outcome
    }

    /// Runs one display frame. Returns false once the session should stop.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let steps = if self.realtime {
            let elapsed = self.last_frame.elapsed();
            self.last_frame = start;
            self.step.advance(elapsed)
        } else {
            1
        };

        let mut outcome = self.game.outcome();
        for _ in 0..steps {
            outcome = self.step_once();
            if outcome.is_over() {
                break;
            }
        }

        self.renderer.render(self.game.frame());

        if outcome.is_over() {
            info!(outcome = outcome.as_ref(), ticks = self.game.tick_count(), "Session finished");
            return false;
        }
        if self.max_ticks.is_some_and(|max| self.game.tick_count() >= max) {
            info!(ticks = self.game.tick_count(), "Tick limit reached");
            return false;
        }

        if self.realtime {
            let spent = start.elapsed();
            if spent < LOOP_TIME {
                sleep(LOOP_TIME - spent);
            } else {
                warn!(behind = ?(spent - LOOP_TIME), "Frame took longer than expected");
            }
        }

        true
    }
}
