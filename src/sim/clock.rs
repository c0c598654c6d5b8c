//! Time sources
//!
//! Scare cooldowns are absolute wall-clock timestamps (ms), frame deltas are
//! seconds. Tests drive time with [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;

use crate::consts::MAX_FRAME_DT;

/// Monotonic millisecond clock
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock that only moves when told to. Clones share the same time.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    pub fn set(&self, ms: f64) {
        self.now.set(ms);
    }

    pub fn advance(&self, ms: f64) {
        self.now.set(self.now.get() + ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

/// Real wall clock
#[derive(Debug, Clone)]
pub struct SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    origin: std::time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            origin: std::time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }

    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}

/// Turns successive frame timestamps into a clamped delta time
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameTimer {
    last_ms: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self { last_ms: None }
    }

    /// Seconds since the previous call; 0 on the first frame
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt.clamp(0.0, MAX_FRAME_DT)
    }

    /// Forget the previous timestamp (after a pause, so resume isn't one huge step)
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}
