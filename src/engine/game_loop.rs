/// Fixed-step scene clock
///
/// The level simulates in equal steps while rendering once per frame.
/// Frame durations either come from the wall clock (`begin_frame`) or are
/// handed in by the caller (`advance`), which keeps headless runs
/// deterministic.
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Default simulation rate (60 steps per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Steps a single frame may run before the backlog is dropped
const MAX_STEPS_PER_FRAME: u32 = 5;

/// Frames averaged for the FPS estimate
const FPS_WINDOW: usize = 60;

pub struct GameLoop {
    step: Duration,
    /// Frame time not yet consumed by steps
    pending: Duration,
    /// Wall-clock reading of the previous `begin_frame`
    last_tick: Instant,
    elapsed: Duration,
    paused: bool,
    recent: VecDeque<Duration>,
    frames: u64,
    steps: u64,
}

impl GameLoop {
    pub fn new() -> Self {
        Self::with_timestep(FIXED_TIMESTEP)
    }

    /// Clock stepping `seconds` per update; non-positive values fall back
    /// to [`FIXED_TIMESTEP`]
    pub fn with_timestep(seconds: f32) -> Self {
        let seconds = if seconds > 0.0 { seconds } else { FIXED_TIMESTEP };
        Self {
            step: Duration::from_secs_f32(seconds),
            pending: Duration::ZERO,
            last_tick: Instant::now(),
            elapsed: Duration::ZERO,
            paused: false,
            recent: VecDeque::with_capacity(FPS_WINDOW),
            frames: 0,
            steps: 0,
        }
    }

    /// Start a frame timed by the wall clock; returns how many steps to run
    pub fn begin_frame(&mut self) -> u32 {
        let now = Instant::now();
        let frame_time = now - self.last_tick;
        self.last_tick = now;
        self.advance(frame_time)
    }

    /// Start a frame that lasted `frame_time`; returns how many steps to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frames += 1;
        self.elapsed += frame_time;

        if self.recent.len() == FPS_WINDOW {
            self.recent.pop_front();
        }
        self.recent.push_back(frame_time);

        if self.paused {
            return 0;
        }

        self.pending += frame_time;
        let mut due = 0;
        while self.pending >= self.step && due < MAX_STEPS_PER_FRAME {
            self.pending -= self.step;
            due += 1;
        }
        if due == MAX_STEPS_PER_FRAME {
            self.pending = self.pending.min(self.step);
        }

        self.steps += u64::from(due);
        due
    }

    /// Seconds per simulation step
    pub fn fixed_timestep(&self) -> f32 {
        self.step.as_secs_f32()
    }

    /// How far into the next step the clock is, `0.0..1.0`
    pub fn alpha(&self) -> f32 {
        self.pending.as_secs_f32() / self.step.as_secs_f32()
    }

    /// Average frames per second over the recent window
    pub fn fps(&self) -> f32 {
        let total: Duration = self.recent.iter().sum();
        if total.is_zero() {
            return 0.0;
        }
        self.recent.len() as f32 / total.as_secs_f32()
    }

    /// Total frame time handed to the clock, paused frames included
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }

    pub fn update_count(&self) -> u64 {
        self.steps
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Freeze or unfreeze simulation; frames keep being counted.
    ///
    /// Time left over from before the pause is discarded on resume.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if paused {
            log::info!("Scene paused after {} steps", self.steps);
        } else {
            self.pending = Duration::ZERO;
            log::info!("Scene resumed");
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
