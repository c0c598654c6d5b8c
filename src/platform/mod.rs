//! Platform abstraction layer
//!
//! The session talks to the outside world only through these traits:
//! - `SoundEffect`: ambient drone and scare sting
//! - `Hud`: counters, screens, final result
//! - `PointerCapture`: pointer lock requests
//! - `FrameSink`: per-frame view for the renderer (read-only)

pub mod headless;

use glam::Vec3;

use crate::sim::{EndReason, SessionPhase};

pub use headless::{LogHud, NoPointerCapture, NullFrameSink, SilentSound};

/// A playable sound. Implementations without audio do nothing.
pub trait SoundEffect {
    fn play(&mut self);
    fn stop(&mut self);
    /// 0.0 - 1.0
    fn set_volume(&mut self, level: f32);
}

/// HUD values published every frame while playing
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub score: u32,
    pub scare_count: u32,
    pub max_scares: u32,
    /// `m:ss`, floor-based
    pub time_remaining: String,
    /// Scare message on screen
    pub scare_active: bool,
}

impl HudSnapshot {
    /// `count/max` label
    pub fn scares_label(&self) -> String {
        format!("{}/{}", self.scare_count, self.max_scares)
    }
}

/// Final result shown when a session ends
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub reason: EndReason,
    pub score: u32,
    pub scare_count: u32,
    pub max_scares: u32,
}

pub trait Hud {
    fn publish(&mut self, hud: &HudSnapshot);
    fn show_summary(&mut self, summary: &SessionSummary);
    /// Screen switching
    fn phase_changed(&mut self, phase: SessionPhase);
}

/// Pointer lock. Acquisition is reported back asynchronously as an input event.
pub trait PointerCapture {
    fn request(&mut self);
    fn release(&mut self);
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameView {
    pub player_position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub antagonist_position: Vec3,
    pub antagonist_visible: bool,
    pub antagonist_yaw: f32,
}

pub trait FrameSink {
    fn present(&mut self, frame: &FrameView);
}

/// Handles to all collaborators, owned by the session
pub struct Collaborators {
    pub ambient: Box<dyn SoundEffect>,
    pub scare_sound: Box<dyn SoundEffect>,
    pub hud: Box<dyn Hud>,
    pub pointer: Box<dyn PointerCapture>,
    pub renderer: Box<dyn FrameSink>,
}

impl Collaborators {
    /// No audio, no screen: logs the result and nothing else
    pub fn headless() -> Self {
        Self {
            ambient: Box::new(SilentSound),
            scare_sound: Box::new(SilentSound),
            hud: Box::new(LogHud),
            pointer: Box::new(NoPointerCapture),
            renderer: Box::new(NullFrameSink),
        }
    }
}
