//! Platform-independent input events
//!
//! Browser key codes (`KeyboardEvent.code`) map to actions here so the
//! session never sees raw strings.

use crate::sim::MoveKey;

/// Raw input delivered by the platform layer
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    /// Relative pointer motion in pixels
    PointerMotion { dx: f32, dy: f32 },
    /// Pointer lock acquired or lost
    PointerCaptureChanged { captured: bool },
}

/// What a key does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(MoveKey),
    TogglePause,
}

/// Map a `KeyboardEvent.code` to an action
pub fn action_for_code(code: &str) -> Option<KeyAction> {
    match code {
        "KeyW" | "ArrowUp" => Some(KeyAction::Move(MoveKey::Forward)),
        "KeyS" | "ArrowDown" => Some(KeyAction::Move(MoveKey::Back)),
        "KeyA" | "ArrowLeft" => Some(KeyAction::Move(MoveKey::Left)),
        "KeyD" | "ArrowRight" => Some(KeyAction::Move(MoveKey::Right)),
        "Escape" | "KeyP" => Some(KeyAction::TogglePause),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasd_and_arrows() {
        assert_eq!(action_for_code("KeyW"), Some(KeyAction::Move(MoveKey::Forward)));
        assert_eq!(action_for_code("ArrowLeft"), Some(KeyAction::Move(MoveKey::Left)));
        assert_eq!(action_for_code("KeyD"), Some(KeyAction::Move(MoveKey::Right)));
        assert_eq!(action_for_code("Escape"), Some(KeyAction::TogglePause));
        assert_eq!(action_for_code("Space"), None);
        // Codes are layout-independent and case-sensitive
        assert_eq!(action_for_code("keyw"), None);
    }
}
