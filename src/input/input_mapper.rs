//! Translates window events into application actions
//!
//! Only the keys that change application state are handled here. WASD,
//! Space and Shift are fed straight to `CameraController`.

use winit::event::{ElementState, MouseButton};
use winit::keyboard::KeyCode;

/// Application-level actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Escape while the cursor is grabbed
    ReleaseCursor,
    /// Left click while the cursor is free
    CaptureCursor,
    /// Escape while the cursor is free
    Exit,
    /// R
    ResetCamera,
    /// F
    ToggleFullscreen,
    /// G
    ToggleSmoothing,
    /// M: position / fov / fps in the title bar
    ToggleTitleStats,
}

/// Stateless event-to-action lookup
pub struct InputMapper;

impl InputMapper {
    /// Action for a key event, if any
    ///
    /// Releases never trigger actions; Escape depends on the cursor state.
    pub fn map_keyboard(
        key: KeyCode,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        if !state.is_pressed() {
            return None;
        }

        let action = match key {
            KeyCode::Escape if cursor_captured => InputAction::ReleaseCursor,
            KeyCode::Escape => InputAction::Exit,
            KeyCode::KeyR => InputAction::ResetCamera,
            KeyCode::KeyF => InputAction::ToggleFullscreen,
            KeyCode::KeyG => InputAction::ToggleSmoothing,
            KeyCode::KeyM => InputAction::ToggleTitleStats,
            _ => return None,
        };
        Some(action)
    }

    /// Action for a mouse button event, if any
    pub fn map_mouse_button(
        button: MouseButton,
        state: ElementState,
        cursor_captured: bool,
    ) -> Option<InputAction> {
        let grabs = button == MouseButton::Left && state.is_pressed() && !cursor_captured;
        grabs.then_some(InputAction::CaptureCursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(key: KeyCode, captured: bool) -> Option<InputAction> {
        InputMapper::map_keyboard(key, ElementState::Pressed, captured)
    }

    #[test]
    fn test_escape_depends_on_cursor() {
        assert_eq!(press(KeyCode::Escape, true), Some(InputAction::ReleaseCursor));
        assert_eq!(press(KeyCode::Escape, false), Some(InputAction::Exit));
    }

    #[test]
    fn test_action_keys() {
        let table = [
            (KeyCode::KeyR, InputAction::ResetCamera),
            (KeyCode::KeyF, InputAction::ToggleFullscreen),
            (KeyCode::KeyG, InputAction::ToggleSmoothing),
            (KeyCode::KeyM, InputAction::ToggleTitleStats),
        ];
        for (key, action) in table {
            assert_eq!(press(key, true), Some(action), "{:?}", key);
            assert_eq!(press(key, false), Some(action), "{:?}", key);
        }
    }

    #[test]
    fn test_camera_keys_pass_through() {
        for key in [
            KeyCode::KeyW,
            KeyCode::KeyA,
            KeyCode::KeyS,
            KeyCode::KeyD,
            KeyCode::Space,
            KeyCode::ShiftLeft,
        ] {
            assert_eq!(press(key, true), None, "{:?}", key);
        }
    }

    #[test]
    fn test_releases_do_nothing() {
        for key in [KeyCode::Escape, KeyCode::KeyR, KeyCode::KeyM] {
            assert_eq!(
                InputMapper::map_keyboard(key, ElementState::Released, false),
                None
            );
        }
    }

    #[test]
    fn test_left_click_captures_only_when_free() {
        assert_eq!(
            InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed, false),
            Some(InputAction::CaptureCursor)
        );
        assert_eq!(
            InputMapper::map_mouse_button(MouseButton::Left, ElementState::Pressed, true),
            None
        );
    }

    #[test]
    fn test_other_buttons_ignored() {
        assert_eq!(
            InputMapper::map_mouse_button(MouseButton::Right, ElementState::Pressed, false),
            None
        );
        assert_eq!(
            InputMapper::map_mouse_button(MouseButton::Left, ElementState::Released, false),
            None
        );
    }
}
