use std::{cell::RefCell, rc::Rc, time::Duration};

use pollo::{
    app::{App, FixedStep},
    level::EnemySpawn,
    systems::{
        audio::{AudioEvent, AudioSink},
        components::EntityKind,
        input::ScriptedInput,
        render::{RenderFrame, Renderer},
    },
};
use pretty_assertions::assert_eq;
use speculoos::prelude::*;

mod common;

#[derive(Clone, Default)]
struct Recorder {
    frames: Rc<RefCell<Vec<RenderFrame>>>,
    sounds: Rc<RefCell<Vec<AudioEvent>>>,
}

impl Renderer for Recorder {
    fn render(&mut self, frame: &RenderFrame) {
        self.frames.borrow_mut().push(frame.clone());
    }
}

impl AudioSink for Recorder {
    fn play(&mut self, event: AudioEvent) {
        self.sounds.borrow_mut().push(event);
    }
}

#[test]
fn test_fixed_step_accumulates() {
    let mut step = FixedStep::new(Duration::from_millis(10), 5);

    assert_eq!(step.advance(Duration::from_millis(5)), 0);
    assert_eq!(step.advance(Duration::from_millis(5)), 1);
    assert_eq!(step.advance(Duration::from_millis(25)), 2);
    assert_that(&step.alpha()).is_greater_than(0.49);
}

#[test]
fn test_fixed_step_drops_backlog() {
    let mut step = FixedStep::new(Duration::from_millis(10), 5);

    assert_eq!(step.advance(Duration::from_secs(1)), 5);
    assert_eq!(step.alpha(), 0.0);
    assert_eq!(step.advance(Duration::ZERO), 0);
}

#[test]
fn test_app_stops_at_tick_limit() {
    let recorder = Recorder::default();
    let level = common::test_level(vec![EnemySpawn::new(EntityKind::Chicken, 1500.0)], 2000.0);

    let mut app = App::new(
        level,
        common::TEST_SEED,
        Box::new(ScriptedInput::new()),
        Box::new(recorder.clone()),
        Box::new(recorder.clone()),
    )
    .expect("app should start")
    .max_ticks(Some(10));

    let mut frames = 0;
    while app.run() {
        frames += 1;
    }

    assert_eq!(frames, 9);
    assert_eq!(app.game.tick_count(), 10);
    assert_eq!(recorder.frames.borrow().len(), 10);
    assert_that(&recorder.sounds.borrow().is_empty()).is_true();
}
