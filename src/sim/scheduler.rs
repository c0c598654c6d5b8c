//! Scare scheduling
//!
//! Once per frame while playing, decides whether the antagonist jumps out.
//! Gates, in order:
//! 1. nothing while a scare is already on screen
//! 2. cooldown: `now < next_scare_eligible_at`
//! 3. proximity: horizontal distance to the current hiding spot must be
//!    under `scare_distance` (checked again every frame, cooldown untouched)
//! 4. confirmation roll: below 0.75 scares, otherwise the player "dodges"
//!    and a half-length retry window is scheduled

use super::antagonist::AntagonistState;
use super::random::RandomSource;
use super::state::{PlayerState, SessionState};
use crate::config::Config;
use crate::consts::{SCARE_CONFIRM_PROBABILITY, SCARE_DISPLAY_MS, SCARE_PENALTY};
use crate::horizontal_distance;

/// Outcome of one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScareDecision {
    /// A scare is already being displayed
    MidScare,
    /// Still cooling down
    Cooldown,
    /// Time-eligible but the player is too far away
    OutOfRange { distance: f32 },
    /// In range but the roll failed; retry at `retry_at`
    Dodged { retry_at: f64 },
    /// Scare applied; the display ends at `hide_at`
    Triggered { hide_at: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct ScareScheduler {
    pub scare_distance: f32,
    pub interval_ms: f64,
    pub variance_ms: f64,
}

impl ScareScheduler {
    pub fn new(config: &Config) -> Self {
        Self {
            scare_distance: config.scare_distance,
            interval_ms: config.scare_interval_ms,
            variance_ms: config.scare_variance_ms,
        }
    }

    /// Uniform in `[interval - variance, interval + variance]`, clamped to >= 0
    pub fn random_delay(&self, dice: &mut dyn RandomSource) -> f64 {
        let delay = self.interval_ms + (dice.unit() - 0.5) * self.variance_ms * 2.0;
        if delay < 0.0 {
            log::warn!("Scare delay {delay:.0}ms is negative, clamping to 0");
            return 0.0;
        }
        delay
    }

    /// Set the first eligibility time of a fresh session
    pub fn arm(&self, session: &mut SessionState, now: f64, dice: &mut dyn RandomSource) {
        session.next_scare_eligible_at = now + self.random_delay(dice);
    }

    /// Run the gates and, on success, apply the scare to sim state.
    ///
    /// Side effects outside the sim (sound, HUD, the hide timer, ending the
    /// session) are left to the caller.
    pub fn evaluate(
        &self,
        now: f64,
        session: &mut SessionState,
        player: &mut PlayerState,
        antagonist: &mut AntagonistState,
        dice: &mut dyn RandomSource,
    ) -> ScareDecision {
        if player.is_scared || antagonist.visible {
            return ScareDecision::MidScare;
        }
        if now < session.next_scare_eligible_at {
            return ScareDecision::Cooldown;
        }

        let distance = horizontal_distance(player.position, antagonist.hiding_position);
        if distance >= self.scare_distance {
            return ScareDecision::OutOfRange { distance };
        }

        if dice.unit() >= SCARE_CONFIRM_PROBABILITY {
            let retry_at = now + self.random_delay(dice) / 2.0;
            session.next_scare_eligible_at = retry_at;
            log::debug!(
                "Scare dodged at {:.1}m, retry in {:.0}ms",
                distance,
                retry_at - now
            );
            return ScareDecision::Dodged { retry_at };
        }

        antagonist.reveal(player.position);
        player.is_scared = true;
        player.can_move = false;
        session.record_scare(SCARE_PENALTY, now);
        session.next_scare_eligible_at = now + self.random_delay(dice);

        ScareDecision::Triggered {
            hide_at: now + SCARE_DISPLAY_MS,
        }
    }
}
