//! Gameplay configuration
//!
//! Loaded once at startup (defaults or JSON) and never changed while running.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::consts::EYE_HEIGHT;
use crate::error::ConfigError;
use crate::sim::{HidingSpot, HouseBounds};

/// Tunable gameplay values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Scares that end the session
    pub max_scares: u32,
    /// Session time budget
    pub session_duration_seconds: f32,
    /// Walking speed, units per second
    pub move_speed: f32,
    /// Radians per pixel of pointer motion
    pub mouse_sensitivity: f32,
    /// Proximity gate radius (horizontal)
    pub scare_distance: f32,
    /// Mean delay between scare attempts
    pub scare_interval_ms: f64,
    /// Half-width of the delay window around the mean
    pub scare_variance_ms: f64,
    /// Pause automatically when pointer capture is lost
    pub pause_on_pointer_loss: bool,
    pub house: HouseLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_scares: 10,
            session_duration_seconds: 300.0,
            move_speed: 5.0,
            mouse_sensitivity: 0.002,
            scare_distance: 4.0,
            scare_interval_ms: 7000.0,
            scare_variance_ms: 4000.0,
            pause_on_pointer_loss: false,
            house: HouseLayout::default(),
        }
    }
}

/// Static house geometry the simulation cares about
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HouseLayout {
    pub spawn: Vec3,
    pub spawn_yaw: f32,
    pub bounds: HouseBounds,
    pub hiding_spots: Vec<HidingSpot>,
}

impl Default for HouseLayout {
    fn default() -> Self {
        Self {
            spawn: Vec3::new(0.0, EYE_HEIGHT, -8.0),
            spawn_yaw: 0.0,
            bounds: HouseBounds::default(),
            hiding_spots: vec![
                HidingSpot::new("Behind Couch", Vec3::new(-5.0, 0.0, 2.0)),
                HidingSpot::new("Kitchen Cabinet", Vec3::new(18.0, 0.0, 3.0)),
                HidingSpot::new("Bedroom Closet", Vec3::new(3.0, 0.0, 15.0)),
                HidingSpot::new("Bathroom Door", Vec3::new(14.0, 0.0, 14.0)),
                HidingSpot::new("Living Room Corner", Vec3::new(-7.0, 0.0, -5.0)),
                HidingSpot::new("End of Hallway", Vec3::new(7.0, 0.0, 10.0)),
                HidingSpot::new("Near Kitchen Entrance", Vec3::new(13.0, 0.0, -2.0)),
            ],
        }
    }
}

impl Config {
    /// Parse and validate a JSON config; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Reject values the simulation can't run with.
    ///
    /// A variance larger than the interval is allowed; negative delays are
    /// clamped at scheduling time.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_scares == 0 {
            return Err(ConfigError::invalid("max_scares", "must be at least 1"));
        }
        if !(self.session_duration_seconds.is_finite() && self.session_duration_seconds > 0.0) {
            return Err(ConfigError::invalid(
                "session_duration_seconds",
                "must be a positive number",
            ));
        }
        non_negative_f32("move_speed", self.move_speed)?;
        non_negative_f32("scare_distance", self.scare_distance)?;
        if !self.mouse_sensitivity.is_finite() {
            return Err(ConfigError::invalid("mouse_sensitivity", "must be finite"));
        }
        non_negative_f64("scare_interval_ms", self.scare_interval_ms)?;
        non_negative_f64("scare_variance_ms", self.scare_variance_ms)?;

        let bounds = &self.house.bounds;
        if !(bounds.min_x <= bounds.max_x && bounds.min_z <= bounds.max_z) {
            return Err(ConfigError::invalid("house.bounds", "min exceeds max"));
        }
        if !bounds.contains(self.house.spawn) {
            return Err(ConfigError::invalid("house.spawn", "outside house bounds"));
        }
        if self.house.hiding_spots.is_empty() {
            return Err(ConfigError::NoHidingSpots);
        }
        Ok(())
    }
}

fn non_negative_f32(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not a non-negative number")))
    }
}

fn non_negative_f64(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} is not a non-negative number")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.house.hiding_spots.len(), 7);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = Config::from_json(r#"{ "max_scares": 3, "scare_distance": 2.5 }"#).unwrap();
        assert_eq!(config.max_scares, 3);
        assert_eq!(config.scare_distance, 2.5);
        assert_eq!(config.session_duration_seconds, 300.0);
        assert_eq!(config.house, HouseLayout::default());
    }

    #[test]
    fn test_json_rejects_empty_hiding_spots() {
        let err = Config::from_json(r#"{ "house": { "hiding_spots": [] } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NoHidingSpots));
    }

    #[test]
    fn test_json_parse_error() {
        let err = Config::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/lurker.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = Config {
            max_scares: 0,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "max_scares", .. })
        ));

        let config = Config {
            move_speed: f32::NAN,
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "move_speed", .. })
        ));

        let mut config = Config::default();
        config.house.spawn = Vec3::new(100.0, EYE_HEIGHT, 0.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "house.spawn", .. })
        ));
    }

    #[test]
    fn test_variance_above_interval_allowed() {
        let config = Config {
            scare_interval_ms: 1000.0,
            scare_variance_ms: 5000.0,
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }
}
