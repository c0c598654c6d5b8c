//! Collaborators for running without a browser

use super::{FrameSink, FrameView, Hud, HudSnapshot, PointerCapture, SessionSummary, SoundEffect};
use crate::sim::SessionPhase;

/// Used when audio is unavailable
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSound;

impl SoundEffect for SilentSound {
    fn play(&mut self) {}
    fn stop(&mut self) {}
    fn set_volume(&mut self, _level: f32) {}
}

/// Writes HUD updates to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn publish(&mut self, hud: &HudSnapshot) {
        log::trace!(
            "HUD score={} scares={} time={}",
            hud.score,
            hud.scares_label(),
            hud.time_remaining
        );
    }

    fn show_summary(&mut self, summary: &SessionSummary) {
        log::info!(
            "Session over ({}): score {}, scared {}/{}",
            summary.reason,
            summary.score,
            summary.scare_count,
            summary.max_scares
        );
    }

    fn phase_changed(&mut self, phase: SessionPhase) {
        log::debug!("Phase -> {phase:?}");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoPointerCapture;

impl PointerCapture for NoPointerCapture {
    fn request(&mut self) {}
    fn release(&mut self) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NullFrameSink;

impl FrameSink for NullFrameSink {
    fn present(&mut self, _frame: &FrameView) {}
}
