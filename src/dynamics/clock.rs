use std::collections::VecDeque;
use std::time::Instant;

/// Source of timestamps in seconds.
pub trait Clock {
    fn now(&mut self) -> f64;
}

/// Monotonic wall clock, counting from its creation.
pub struct WallClock {
    origin: Instant,
}

impl WallClock {
    pub fn new() -> Self {
        WallClock {
            origin: Instant::now(),
        }
    }
}

impl Default for WallClock {
    fn default() -> Self {
        WallClock::new()
    }
}

impl Clock for WallClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Replays prescribed step durations.
///
/// Calls come in start/end pairs: the start of a step returns the current
/// time, the end advances it by the next duration. Once the durations are
/// used up, steps take no time.
pub struct ScriptedClock {
    durations: VecDeque<f64>,
    time: f64,
    in_step: bool,
}

impl ScriptedClock {
    pub fn new<I: IntoIterator<Item = f64>>(durations: I) -> Self {
        ScriptedClock {
            durations: durations.into_iter().collect(),
            time: 0.0,
            in_step: false,
        }
    }
}

impl Clock for ScriptedClock {
    fn now(&mut self) -> f64 {
        if self.in_step {
            self.time += self.durations.pop_front().unwrap_or(0.0);
        }
        self.in_step = !self.in_step;
        self.time
    }
}
