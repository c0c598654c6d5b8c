//! Lurker - a first-person hide-and-scare game
//!
//! Core modules:
//! - `sim`: Session simulation (movement, look, scare scheduling)
//! - `session`: Session lifecycle driving the sim and its collaborators
//! - `platform`: Collaborator interfaces (audio, HUD, pointer capture, renderer)
//! - `config`: Gameplay configuration and house layout
//! - `settings`: Player preferences
//! - `input`: Key and pointer event mapping

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use config::{Config, HouseLayout};
pub use error::ConfigError;
pub use session::SessionController;
pub use settings::Settings;

use glam::Vec3;

/// Fixed gameplay constants (not part of the loadable config)
pub mod consts {
    /// Camera height above the floor; movement never changes it
    pub const EYE_HEIGHT: f32 = 1.6;

    /// Score lost per scare (score floors at 0)
    pub const SCARE_PENALTY: u32 = 50;
    /// Chance that an in-range, time-eligible attempt becomes a scare
    pub const SCARE_CONFIRM_PROBABILITY: f64 = 0.75;
    /// How long the antagonist stays revealed (simulated ms)
    pub const SCARE_DISPLAY_MS: f64 = 2000.0;

    /// Ambient drone volume relative to the master slider
    pub const AMBIENT_VOLUME_SCALE: f32 = 0.1;

    /// Largest frame delta fed to the sim (avoids teleporting after a stall)
    pub const MAX_FRAME_DT: f32 = 0.1;
}

/// Distance between two points on the floor plane (Y ignored)
#[inline]
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    (dx * dx + dz * dz).sqrt()
}

/// Yaw (about +Y) that turns an object's +Z axis from `from` toward `to`
#[inline]
pub fn yaw_towards(from: Vec3, to: Vec3) -> f32 {
    let dx = to.x - from.x;
    let dz = to.z - from.z;
    if dx == 0.0 && dz == 0.0 {
        return 0.0;
    }
    dx.atan2(dz)
}

/// Format seconds as `m:ss`, flooring both parts. Negative input shows `0:00`.
pub fn format_clock(seconds: f32) -> String {
    let total = if seconds.is_finite() {
        seconds.max(0.0).floor() as u32
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(300.0), "5:00");
        assert_eq!(format_clock(299.99), "4:59");
        assert_eq!(format_clock(61.5), "1:01");
        assert_eq!(format_clock(9.0), "0:09");
        assert_eq!(format_clock(0.0), "0:00");
        assert_eq!(format_clock(-3.0), "0:00");
    }

    #[test]
    fn test_horizontal_distance_ignores_height() {
        let a = Vec3::new(0.0, 1.6, 0.0);
        let b = Vec3::new(3.0, 0.0, 4.0);
        assert!((horizontal_distance(a, b) - 5.0).abs() < 1e-6);
        assert_eq!(horizontal_distance(a, Vec3::new(0.0, 10.0, 0.0)), 0.0);
    }

    #[test]
    fn test_yaw_towards() {
        use std::f32::consts::{FRAC_PI_2, PI};
        let origin = Vec3::ZERO;
        assert!(yaw_towards(origin, Vec3::new(0.0, 0.0, 5.0)).abs() < 1e-6);
        assert!((yaw_towards(origin, Vec3::new(5.0, 0.0, 0.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((yaw_towards(origin, Vec3::new(0.0, 2.0, -5.0)).abs() - PI).abs() < 1e-6);
        assert_eq!(yaw_towards(origin, Vec3::new(0.0, 3.0, 0.0)), 0.0);
    }
}
