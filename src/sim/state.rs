//! Session and player state
//!
//! Everything a running session mutates lives here. Nothing is persisted:
//! a new session resets it all.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Top-level session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Start screen, nothing simulated
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen until resumed
    Paused,
    /// Session over, result on screen
    Ended,
}

impl SessionPhase {
    /// Phases in which `end()` is a valid transition
    pub fn is_active(self) -> bool {
        matches!(self, SessionPhase::Playing | SessionPhase::Paused)
    }
}

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Scare count hit the configured limit
    ScareLimit,
    /// Time budget ran out
    TimeLimit,
    /// Ended to immediately start a new session
    Restarting,
}

impl EndReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndReason::ScareLimit => "antagonist reached scare limit",
            EndReason::TimeLimit => "time limit reached",
            EndReason::Restarting => "restarting",
        }
    }
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-run counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: SessionPhase,
    /// Never negative: penalties saturate at 0
    pub score: u32,
    pub scare_count: u32,
    /// Seconds left, clamped to 0
    pub time_remaining: f32,
    /// No scare is evaluated before this timestamp (ms)
    pub next_scare_eligible_at: f64,
    /// Timestamp of the latest scare, if any
    pub last_scare_at: Option<f64>,
}

impl SessionState {
    /// Fresh counters, parked in the menu
    pub fn new(duration_seconds: f32) -> Self {
        Self {
            phase: SessionPhase::Menu,
            score: 0,
            scare_count: 0,
            time_remaining: duration_seconds,
            next_scare_eligible_at: 0.0,
            last_scare_at: None,
        }
    }

    /// Reset counters for a new run (phase is left to the caller)
    pub fn reset(&mut self, duration_seconds: f32) {
        let phase = self.phase;
        *self = Self::new(duration_seconds);
        self.phase = phase;
    }

    /// Spend `dt` seconds of the budget. Returns true once the budget is gone.
    pub fn drain_time(&mut self, dt: f32) -> bool {
        if dt > 0.0 {
            self.time_remaining = (self.time_remaining - dt).max(0.0);
        }
        self.time_remaining <= 0.0
    }

    /// Count a scare and apply its score penalty
    pub fn record_scare(&mut self, penalty: u32, now_ms: f64) {
        self.score = self.score.saturating_sub(penalty);
        self.scare_count += 1;
        self.last_scare_at = Some(now_ms);
    }
}

/// The player's body and view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Single source of truth for both movement and camera
    pub position: Vec3,
    /// Radians, unbounded
    pub yaw: f32,
    /// Radians, within [-π/2, π/2]
    pub pitch: f32,
    pub can_move: bool,
    /// Set while a scare is on screen; blocks movement regardless of `can_move`
    pub is_scared: bool,
}

impl PlayerState {
    /// Player standing at `position`, not yet allowed to move
    pub fn at(position: Vec3, yaw: f32) -> Self {
        Self {
            position,
            yaw,
            pitch: 0.0,
            can_move: false,
            is_scared: false,
        }
    }

    /// Whether held keys should move the player this frame
    pub fn can_walk(&self) -> bool {
        self.can_move && !self.is_scared
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_time_clamps() {
        let mut state = SessionState::new(0.005);
        assert!(state.drain_time(0.016));
        assert_eq!(state.time_remaining, 0.0);
        // Further draining stays at zero
        assert!(state.drain_time(1.0));
        assert_eq!(state.time_remaining, 0.0);
    }

    #[test]
    fn test_drain_time_ignores_negative_dt() {
        let mut state = SessionState::new(10.0);
        assert!(!state.drain_time(-5.0));
        assert_eq!(state.time_remaining, 10.0);
    }

    #[test]
    fn test_record_scare_floors_score() {
        let mut state = SessionState::new(300.0);
        state.score = 120;
        state.record_scare(50, 10.0);
        assert_eq!(state.score, 70);
        state.record_scare(50, 20.0);
        state.record_scare(50, 30.0);
        assert_eq!(state.score, 0);
        assert_eq!(state.scare_count, 3);
        assert_eq!(state.last_scare_at, Some(30.0));
    }

    #[test]
    fn test_reset_keeps_phase() {
        let mut state = SessionState::new(300.0);
        state.phase = SessionPhase::Ended;
        state.score = 40;
        state.scare_count = 2;
        state.time_remaining = 1.0;
        state.reset(300.0);
        assert_eq!(state.phase, SessionPhase::Ended);
        assert_eq!(state.score, 0);
        assert_eq!(state.scare_count, 0);
        assert_eq!(state.time_remaining, 300.0);
    }

    #[test]
    fn test_scared_player_cannot_walk() {
        let mut player = PlayerState::at(Vec3::ZERO, 0.0);
        assert!(!player.can_walk());
        player.can_move = true;
        assert!(player.can_walk());
        player.is_scared = true;
        assert!(!player.can_walk());
    }
}
