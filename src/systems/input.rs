use std::{collections::HashMap, ops::Range};

use bevy_ecs::resource::Resource;
use bitflags::bitflags;
use tracing::trace;

use crate::events::GameCommand;

bitflags! {
    /// The buttons held during one tick.
    #[derive(Default, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct InputFlags: u8 {
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const JUMP = 1 << 2;
        const THROW = 1 << 3;
        const DEBUG_TOGGLE = 1 << 4;
    }
}

/// The input sampled for the current tick, plus the previous tick for edge detection.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputState {
    pub current: InputFlags,
    pub previous: InputFlags,
}

impl InputState {
    pub fn update(&mut self, flags: InputFlags) {
        self.previous = self.current;
        self.current = flags;
    }

    pub fn pressed(&self, flag: InputFlags) -> bool {
        self.current.contains(flag)
    }

    /// Pressed this tick but not the one before.
    pub fn just_pressed(&self, flag: InputFlags) -> bool {
        self.current.contains(flag) && !self.previous.contains(flag)
    }
}

/// Anything that can be asked for the buttons held at a given tick.
pub trait InputProvider {
    fn sample(&mut self, tick: u64) -> InputFlags;
}

/// Maps key and touch-button names to input flags and host commands.
///
/// Key names are lowercase (`"left"`, `"a"`, `"space"`); touch buttons use their element ids.
#[derive(Debug, Clone)]
pub struct Bindings {
    flags: HashMap<&'static str, InputFlags>,
    commands: HashMap<&'static str, GameCommand>,
}

impl Default for Bindings {
    fn default() -> Self {
        let mut flags = HashMap::new();

        // Movement
        flags.insert("left", InputFlags::LEFT);
        flags.insert("a", InputFlags::LEFT);
        flags.insert("right", InputFlags::RIGHT);
        flags.insert("d", InputFlags::RIGHT);
        flags.insert("up", InputFlags::JUMP);
        flags.insert("w", InputFlags::JUMP);
        flags.insert("space", InputFlags::JUMP);

        // Actions
        flags.insert("f", InputFlags::THROW);
        flags.insert("h", InputFlags::DEBUG_TOGGLE);

        // Touch controls
        flags.insert("btn-left", InputFlags::LEFT);
        flags.insert("btn-right", InputFlags::RIGHT);
        flags.insert("btn-jump", InputFlags::JUMP);
        flags.insert("btn-throw", InputFlags::THROW);

        let mut commands = HashMap::new();
        commands.insert("p", GameCommand::TogglePause);
        commands.insert("m", GameCommand::MuteAudio);
        commands.insert("r", GameCommand::ResetLevel);
        commands.insert("period", GameCommand::SingleTick);

        Self { flags, commands }
    }
}

impl Bindings {
    pub fn flag(&self, name: &str) -> Option<InputFlags> {
        self.flags.get(name).copied()
    }

    pub fn command(&self, name: &str) -> Option<GameCommand> {
        self.commands.get(name).copied()
    }
}

/// Key/touch state as reported by a host, one press/release at a time.
#[derive(Debug, Clone, Default)]
pub struct KeyboardInput {
    bindings: Bindings,
    held: InputFlags,
}

impl KeyboardInput {
    pub fn new(bindings: Bindings) -> Self {
        Self {
            bindings,
            held: InputFlags::empty(),
        }
    }

    /// Record a key or button press. Returns the bound host command, if the name has one.
    pub fn press(&mut self, name: &str) -> Option<GameCommand> {
        if let Some(flag) = self.bindings.flag(name) {
            self.held.insert(flag);
        }
        self.bindings.command(name)
    }

    pub fn release(&mut self, name: &str) {
        if let Some(flag) = self.bindings.flag(name) {
            self.held.remove(flag);
        }
    }

    pub fn held(&self) -> InputFlags {
        self.held
    }
}

impl InputProvider for KeyboardInput {
    fn sample(&mut self, _tick: u64) -> InputFlags {
        self.held
    }
}

/// A fixed input timeline, used by the headless driver and the tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    segments: Vec<(Range<u64>, InputFlags)>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold `flags` for every tick in `ticks`.
    pub fn hold(mut self, ticks: Range<u64>, flags: InputFlags) -> Self {
        self.segments.push((ticks, flags));
        self
    }

    /// A script that walks right and throws a bottle every couple of seconds.
    pub fn demo() -> Self {
        Self::new()
            .hold(0..u64::MAX, InputFlags::RIGHT)
            .hold(300..310, InputFlags::JUMP)
            .hold(600..610, InputFlags::THROW)
            .hold(900..910, InputFlags::THROW | InputFlags::JUMP)
    }
}

impl InputProvider for ScriptedInput {
    fn sample(&mut self, tick: u64) -> InputFlags {
        let flags = self
            .segments
            .iter()
            .filter(|(range, _)| range.contains(&tick))
            .fold(InputFlags::empty(), |acc, (_, flags)| acc | *flags);
        trace!(tick, flags = ?flags, "Sampled scripted input");
        flags
    }
}
