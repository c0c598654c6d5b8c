//! The antagonist: hidden at a waypoint, or revealed facing the player

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::hiding::HidingSpotRegistry;
use super::random::RandomSource;
use crate::yaw_towards;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AntagonistState {
    /// Current waypoint (also the render position while visible)
    pub hiding_position: Vec3,
    /// Name of the current waypoint
    pub spot_name: String,
    pub visible: bool,
    /// Yaw fixed at the moment of the last reveal
    pub facing_yaw: f32,
}

impl AntagonistState {
    /// Hidden at the registry's first spot; call `respawn_hidden` before play
    pub fn new(registry: &HidingSpotRegistry) -> Self {
        let first = &registry.spots()[0];
        Self {
            hiding_position: first.position,
            spot_name: first.name.clone(),
            visible: false,
            facing_yaw: 0.0,
        }
    }

    /// Hide at a freshly drawn waypoint
    pub fn respawn_hidden(&mut self, registry: &HidingSpotRegistry, dice: &mut dyn RandomSource) {
        let spot = registry.draw(dice);
        self.hiding_position = spot.position;
        self.spot_name.clone_from(&spot.name);
        self.visible = false;
        log::debug!("Antagonist hides at {}", self.spot_name);
    }

    /// Become visible, turned once toward `target`
    pub fn reveal(&mut self, target: Vec3) {
        self.visible = true;
        self.facing_yaw = yaw_towards(self.hiding_position, target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::hiding::HidingSpot;
    use crate::sim::random::FixedDice;

    fn registry() -> HidingSpotRegistry {
        HidingSpotRegistry::new(vec![
            HidingSpot::new("hall", Vec3::new(0.0, 0.0, 0.0)),
            HidingSpot::new("closet", Vec3::new(10.0, 0.0, 0.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_respawn_hides_at_drawn_spot() {
        let registry = registry();
        let mut antagonist = AntagonistState::new(&registry);
        antagonist.visible = true;
        antagonist.respawn_hidden(&registry, &mut FixedDice(0.9));
        assert!(!antagonist.visible);
        assert_eq!(antagonist.spot_name, "closet");
        assert_eq!(antagonist.hiding_position, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_reveal_faces_target_once() {
        let registry = registry();
        let mut antagonist = AntagonistState::new(&registry);
        antagonist.reveal(Vec3::new(5.0, 1.6, 0.0));
        assert!(antagonist.visible);
        let facing = antagonist.facing_yaw;
        assert!((facing - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        // Position stays at the waypoint
        assert_eq!(antagonist.hiding_position, Vec3::ZERO);
    }
}
