//! Fixed hiding spots the antagonist teleports between

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use crate::error::ConfigError;

/// A named waypoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HidingSpot {
    pub name: String,
    pub position: Vec3,
}

impl HidingSpot {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            name: name.into(),
            position,
        }
    }
}

/// Immutable, non-empty list of hiding spots
#[derive(Debug, Clone)]
pub struct HidingSpotRegistry {
    spots: Vec<HidingSpot>,
}

impl HidingSpotRegistry {
    /// Fails if there is nowhere to hide
    pub fn new(spots: Vec<HidingSpot>) -> Result<Self, ConfigError> {
        if spots.is_empty() {
            return Err(ConfigError::NoHidingSpots);
        }
        Ok(Self { spots })
    }

    pub fn spots(&self) -> &[HidingSpot] {
        &self.spots
    }

    /// Independent uniform draw (repeats allowed)
    pub fn draw(&self, dice: &mut dyn RandomSource) -> &HidingSpot {
        &self.spots[dice.index(self.spots.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{FixedDice, seeded};

    fn two_spots() -> HidingSpotRegistry {
        HidingSpotRegistry::new(vec![
            HidingSpot::new("a", Vec3::new(1.0, 0.0, 1.0)),
            HidingSpot::new("b", Vec3::new(-1.0, 0.0, -1.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_registry_rejected() {
        let err = HidingSpotRegistry::new(Vec::new()).unwrap_err();
        assert!(matches!(err, ConfigError::NoHidingSpots));
    }

    #[test]
    fn test_draw_follows_dice() {
        let registry = two_spots();
        assert_eq!(registry.draw(&mut FixedDice(0.2)).name, "a");
        assert_eq!(registry.draw(&mut FixedDice(0.7)).name, "b");
    }

    #[test]
    fn test_draw_allows_repeats() {
        let registry = two_spots();
        let mut rng = seeded(7);
        let names: Vec<String> = (0..64).map(|_| registry.draw(&mut rng).name.clone()).collect();
        assert!(names.windows(2).any(|w| w[0] == w[1]));
        assert!(names.iter().any(|n| n == "a"));
        assert!(names.iter().any(|n| n == "b"));
    }
}
