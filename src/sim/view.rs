//! Mouse look

use std::f32::consts::FRAC_PI_2;

use super::state::PlayerState;

/// Converts raw pointer deltas into yaw/pitch
#[derive(Debug, Clone, Copy)]
pub struct ViewController {
    pub sensitivity: f32,
}

impl ViewController {
    pub fn new(sensitivity: f32) -> Self {
        Self { sensitivity }
    }

    /// Apply one pointer-motion delta. Gating (phase, pointer capture) is the caller's job.
    pub fn apply_look(&self, player: &mut PlayerState, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        player.yaw -= dx * self.sensitivity;
        player.pitch = (player.pitch - dy * self.sensitivity).clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use proptest::prelude::*;

    #[test]
    fn test_look_directions() {
        let view = ViewController::new(0.002);
        let mut player = PlayerState::at(Vec3::ZERO, 0.0);
        // Moving the mouse right turns right (yaw decreases)
        view.apply_look(&mut player, 100.0, 0.0);
        assert!((player.yaw + 0.2).abs() < 1e-6);
        // Moving the mouse down looks down (pitch decreases)
        view.apply_look(&mut player, 0.0, 50.0);
        assert!((player.pitch + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_pitch_clamped_yaw_unbounded() {
        let view = ViewController::new(0.002);
        let mut player = PlayerState::at(Vec3::ZERO, 0.0);
        view.apply_look(&mut player, -10_000.0, -10_000.0);
        assert_eq!(player.pitch, FRAC_PI_2);
        assert!(player.yaw > std::f32::consts::TAU);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let view = ViewController::new(0.002);
        let mut player = PlayerState::at(Vec3::ZERO, 0.3);
        view.apply_look(&mut player, f32::NAN, 1.0);
        view.apply_look(&mut player, 1.0, f32::INFINITY);
        assert_eq!(player.yaw, 0.3);
        assert_eq!(player.pitch, 0.0);
    }

    proptest! {
        #[test]
        fn prop_pitch_stays_clamped(
            deltas in proptest::collection::vec((-5000.0f32..5000.0, -5000.0f32..5000.0), 1..64)
        ) {
            let view = ViewController::new(0.002);
            let mut player = PlayerState::at(Vec3::ZERO, 0.0);
            for (dx, dy) in deltas {
                view.apply_look(&mut player, dx, dy);
                prop_assert!(player.pitch >= -FRAC_PI_2 && player.pitch <= FRAC_PI_2);
            }
        }
    }
}
