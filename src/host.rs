//! Per-frame inputs from the host application.
//!
//! The engine needs two things each step: how much time passed, and whether
//! the player pressed the advance button this frame (edge-triggered, already
//! debounced). Hosts implement [`FrameClock`] and [`AdvanceInput`] over
//! their own timer and input systems; the scripted versions here drive
//! headless runs and tests.

use std::collections::BTreeSet;

/// Frame delta-time provider.
pub trait FrameClock {
    fn elapsed_seconds(&self) -> f32;
}

/// Source of the discrete advance/skip action.
pub trait AdvanceInput {
    /// True on the single frame the action fires.
    fn poll_advance(&mut self) -> bool;
}

/// One processing step's worth of input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepInput {
    pub elapsed_seconds: f32,
    pub advance: bool,
}

impl StepInput {
    pub fn new(elapsed_seconds: f32, advance: bool) -> Self {
        Self { elapsed_seconds, advance }
    }

    /// Time passes, no button.
    pub fn tick(elapsed_seconds: f32) -> Self {
        Self::new(elapsed_seconds, false)
    }

    /// Time passes and the button fires.
    pub fn press(elapsed_seconds: f32) -> Self {
        Self::new(elapsed_seconds, true)
    }

    pub fn sample(clock: &impl FrameClock, input: &mut impl AdvanceInput) -> Self {
        Self::new(clock.elapsed_seconds(), input.poll_advance())
    }
}

/// Clock with a constant frame time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    pub delta: f32,
}

impl FixedClock {
    pub fn new(delta: f32) -> Self {
        Self { delta }
    }
}

impl FrameClock for FixedClock {
    fn elapsed_seconds(&self) -> f32 {
        self.delta
    }
}

/// Advance presses on predetermined frames.
#[derive(Debug, Clone)]
pub struct ScriptedAdvance {
    frame: u64,
    schedule: Schedule,
}

#[derive(Debug, Clone)]
enum Schedule {
    Never,
    Every(u64),
    At(BTreeSet<u64>),
}

impl ScriptedAdvance {
    pub fn never() -> Self {
        Self { frame: 0, schedule: Schedule::Never }
    }

    /// Press on frames `n - 1`, `2n - 1`, ... (every `n`th frame).
    pub fn every(n: u64) -> Self {
        let schedule = if n == 0 { Schedule::Never } else { Schedule::Every(n) };
        Self { frame: 0, schedule }
    }

    /// Press on exactly these (zero-based) frames.
    pub fn at(frames: impl IntoIterator<Item = u64>) -> Self {
        Self { frame: 0, schedule: Schedule::At(frames.into_iter().collect()) }
    }

    /// Frames polled so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }
}

impl AdvanceInput for ScriptedAdvance {
    fn poll_advance(&mut self) -> bool {
        let frame = self.frame;
        self.frame += 1;
        match &self.schedule {
            Schedule::Never => false,
            Schedule::Every(n) => (frame + 1) % n == 0,
            Schedule::At(frames) => frames.contains(&frame),
        }
    }
}
