//! WASD movement on the floor plane
//!
//! Local intent: forward = -Z, right = +X. The intent is normalized so
//! diagonals are not faster, rotated by yaw only, then clamped to the house.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::state::PlayerState;

/// Movement directions a key can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
}

/// Which movement keys are currently down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldKeys {
    pub fn set(&mut self, key: MoveKey, down: bool) {
        match key {
            MoveKey::Forward => self.forward = down,
            MoveKey::Back => self.back = down,
            MoveKey::Left => self.left = down,
            MoveKey::Right => self.right = down,
        }
    }

    /// Raw local intent as (x, z); opposite keys cancel
    pub fn intent(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.forward {
            dir.y -= 1.0;
        }
        if self.back {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir
    }
}

/// Axis-aligned walkable rectangle on the floor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HouseBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl Default for HouseBounds {
    fn default() -> Self {
        Self {
            min_x: -15.0,
            max_x: 25.0,
            min_z: -15.0,
            max_z: 25.0,
        }
    }
}

impl HouseBounds {
    /// Clamp X and Z independently; Y untouched
    pub fn clamp(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            p.x.clamp(self.min_x, self.max_x),
            p.y,
            p.z.clamp(self.min_z, self.max_z),
        )
    }

    pub fn contains(&self, p: Vec3) -> bool {
        (self.min_x..=self.max_x).contains(&p.x) && (self.min_z..=self.max_z).contains(&p.z)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MovementIntegrator {
    /// Units per second
    pub speed: f32,
    pub bounds: HouseBounds,
}

impl MovementIntegrator {
    pub fn new(speed: f32, bounds: HouseBounds) -> Self {
        Self { speed, bounds }
    }

    /// World-space displacement for one step, before clamping
    pub fn displacement(&self, keys: HeldKeys, yaw: f32, dt: f32) -> Vec3 {
        let intent = keys.intent().normalize_or_zero();
        if intent == Vec2::ZERO {
            return Vec3::ZERO;
        }
        let (sin, cos) = yaw.sin_cos();
        // Rotation about +Y
        let world = Vec3::new(
            intent.x * cos + intent.y * sin,
            0.0,
            -intent.x * sin + intent.y * cos,
        );
        world * (self.speed * dt)
    }

    /// Advance the player one frame. Returns true if the position changed.
    pub fn step(&self, player: &mut PlayerState, keys: HeldKeys, dt: f32) -> bool {
        if !player.can_walk() || dt <= 0.0 {
            return false;
        }
        let delta = self.displacement(keys, player.yaw, dt);
        if delta == Vec3::ZERO {
            return false;
        }
        let next = self.bounds.clamp(player.position + delta);
        let moved = next != player.position;
        player.position = next;
        moved
    }
}
