//! Input state bridge
//!
//! Accumulates asynchronous device events into a present-state snapshot the
//! module queries synchronously once per frame. There is no event queue and
//! no replay: presence in a pressed-set (keys, mouse buttons) and last value
//! (wheel, pointer) are all that is observable.
//!
//! Device codes arrive as winit types and are translated to the stable GLFW
//! numbering the module was compiled against. Unmapped codes are dropped
//! silently rather than crashing the bridge.

use hashbrown::HashSet;
use winit::event::{MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

/// Present-state input snapshot
///
/// Mutated by device event handlers at any time relative to frame ticks;
/// read by the module only via explicit queries.
#[derive(Debug, Default)]
pub struct InputBridge {
    pressed_keys: HashSet<u32>,
    pressed_buttons: HashSet<u32>,
    wheel_move: i32,
    cursor: (f32, f32),
}

impl InputBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: KeyCode) {
        if let Some(key) = glfw_key(code) {
            self.pressed_keys.insert(key);
        }
    }

    pub fn key_up(&mut self, code: KeyCode) {
        if let Some(key) = glfw_key(code) {
            self.pressed_keys.remove(&key);
        }
    }

    pub fn mouse_down(&mut self, button: MouseButton) {
        if let Some(b) = glfw_mouse_button(button) {
            self.pressed_buttons.insert(b);
        }
    }

    pub fn mouse_up(&mut self, button: MouseButton) {
        if let Some(b) = glfw_mouse_button(button) {
            self.pressed_buttons.remove(&b);
        }
    }

    /// Record a wheel movement. `delta_y` is upward-positive; only the sign
    /// of the most recent event is kept, and it is reset solely by the next
    /// overwrite, not per frame.
    pub fn wheel(&mut self, delta_y: f32) {
        self.wheel_move = if delta_y > 0.0 {
            1
        } else if delta_y < 0.0 {
            -1
        } else {
            0
        };
    }

    pub fn wheel_event(&mut self, delta: MouseScrollDelta) {
        // winit reports both variants upward-positive
        match delta {
            MouseScrollDelta::LineDelta(_, y) => self.wheel(y),
            MouseScrollDelta::PixelDelta(pos) => self.wheel(pos.y as f32),
        }
    }

    pub fn cursor_moved(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    pub fn is_key_down(&self, key: u32) -> bool {
        self.pressed_keys.contains(&key)
    }

    pub fn is_mouse_button_down(&self, button: u32) -> bool {
        self.pressed_buttons.contains(&button)
    }

    pub fn wheel_move(&self) -> i32 {
        self.wheel_move
    }

    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    /// Empty both pressed-sets. Called by the module to reset input state,
    /// e.g. after it has sampled a frame or on focus loss.
    pub fn clear_pressed(&mut self) {
        self.pressed_keys.clear();
        self.pressed_buttons.clear();
    }
}

/// Translate a winit mouse button to GLFW numbering
pub fn glfw_mouse_button(button: MouseButton) -> Option<u32> {
    match button {
        MouseButton::Left => Some(0),
        MouseButton::Right => Some(1),
        MouseButton::Middle => Some(2),
        MouseButton::Back => Some(3),
        MouseButton::Forward => Some(4),
        MouseButton::Other(n) if n <= 8 => Some(n as u32),
        MouseButton::Other(_) => None,
    }
}

/// Translate a winit key code to GLFW numbering
///
/// Fixed static table; codes GLFW has no number for return `None` and the
/// event is ignored.
pub fn glfw_key(code: KeyCode) -> Option<u32> {
    let key = match code {
        KeyCode::Space => 32,
        KeyCode::Quote => 39,
        KeyCode::Comma => 44,
        KeyCode::Minus => 45,
        KeyCode::Period => 46,
        KeyCode::Slash => 47,
        KeyCode::Digit0 => 48,
        KeyCode::Digit1 => 49,
        KeyCode::Digit2 => 50,
        KeyCode::Digit3 => 51,
        KeyCode::Digit4 => 52,
        KeyCode::Digit5 => 53,
        KeyCode::Digit6 => 54,
        KeyCode::Digit7 => 55,
        KeyCode::Digit8 => 56,
        KeyCode::Digit9 => 57,
        KeyCode::Semicolon => 59,
        KeyCode::Equal => 61,
        KeyCode::KeyA => 65,
        KeyCode::KeyB => 66,
        KeyCode::KeyC => 67,
        KeyCode::KeyD => 68,
        KeyCode::KeyE => 69,
        KeyCode::KeyF => 70,
        KeyCode::KeyG => 71,
        KeyCode::KeyH => 72,
        KeyCode::KeyI => 73,
        KeyCode::KeyJ => 74,
        KeyCode::KeyK => 75,
        KeyCode::KeyL => 76,
        KeyCode::KeyM => 77,
        KeyCode::KeyN => 78,
        KeyCode::KeyO => 79,
        KeyCode::KeyP => 80,
        KeyCode::KeyQ => 81,
        KeyCode::KeyR => 82,
        KeyCode::KeyS => 83,
        KeyCode::KeyT => 84,
        KeyCode::KeyU => 85,
        KeyCode::KeyV => 86,
        KeyCode::KeyW => 87,
        KeyCode::KeyX => 88,
        KeyCode::KeyY => 89,
        KeyCode::KeyZ => 90,
        KeyCode::BracketLeft => 91,
        KeyCode::Backslash => 92,
        KeyCode::BracketRight => 93,
        KeyCode::Backquote => 96,
        KeyCode::Escape => 256,
        KeyCode::Enter => 257,
        KeyCode::Tab => 258,
        KeyCode::Backspace => 259,
        KeyCode::Insert => 260,
        KeyCode::Delete => 261,
        KeyCode::ArrowRight => 262,
        KeyCode::ArrowLeft => 263,
        KeyCode::ArrowDown => 264,
        KeyCode::ArrowUp => 265,
        KeyCode::PageUp => 266,
        KeyCode::PageDown => 267,
        KeyCode::Home => 268,
        KeyCode::End => 269,
        KeyCode::CapsLock => 280,
        KeyCode::ScrollLock => 281,
        KeyCode::NumLock => 282,
        KeyCode::PrintScreen => 283,
        KeyCode::Pause => 284,
        KeyCode::F1 => 290,
        KeyCode::F2 => 291,
        KeyCode::F3 => 292,
        KeyCode::F4 => 293,
        KeyCode::F5 => 294,
        KeyCode::F6 => 295,
        KeyCode::F7 => 296,
        KeyCode::F8 => 297,
        KeyCode::F9 => 298,
        KeyCode::F10 => 299,
        KeyCode::F11 => 300,
        KeyCode::F12 => 301,
        KeyCode::F13 => 302,
        KeyCode::F14 => 303,
        KeyCode::F15 => 304,
        KeyCode::F16 => 305,
        KeyCode::F17 => 306,
        KeyCode::F18 => 307,
        KeyCode::F19 => 308,
        KeyCode::F20 => 309,
        KeyCode::F21 => 310,
        KeyCode::F22 => 311,
        KeyCode::F23 => 312,
        KeyCode::F24 => 313,
        KeyCode::F25 => 314,
        KeyCode::Numpad0 => 320,
        KeyCode::Numpad1 => 321,
        KeyCode::Numpad2 => 322,
        KeyCode::Numpad3 => 323,
        KeyCode::Numpad4 => 324,
        KeyCode::Numpad5 => 325,
        KeyCode::Numpad6 => 326,
        KeyCode::Numpad7 => 327,
        KeyCode::Numpad8 => 328,
        KeyCode::Numpad9 => 329,
        KeyCode::NumpadDecimal => 330,
        KeyCode::NumpadDivide => 331,
        KeyCode::NumpadMultiply => 332,
        KeyCode::NumpadSubtract => 333,
        KeyCode::NumpadAdd => 334,
        KeyCode::NumpadEnter => 335,
        KeyCode::NumpadEqual => 336,
        KeyCode::ShiftLeft => 340,
        KeyCode::ControlLeft => 341,
        KeyCode::AltLeft => 342,
        KeyCode::SuperLeft => 343,
        KeyCode::ShiftRight => 344,
        KeyCode::ControlRight => 345,
        KeyCode::AltRight => 346,
        KeyCode::SuperRight => 347,
        KeyCode::ContextMenu => 348,
        _ => return None,
    };
    Some(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_down_then_up_tracks_presence() {
        let mut input = InputBridge::new();
        input.key_down(KeyCode::KeyW);
        assert!(input.is_key_down(87));
        input.key_up(KeyCode::KeyW);
        assert!(!input.is_key_down(87));
    }

    #[test]
    fn unmapped_key_is_dropped() {
        let mut input = InputBridge::new();
        // GLFW has no numbering for media keys
        input.key_down(KeyCode::MediaPlayPause);
        assert!(input.pressed_keys.is_empty());
    }

    #[test]
    fn mouse_buttons_tracked_independently_of_keys() {
        let mut input = InputBridge::new();
        input.mouse_down(MouseButton::Left);
        input.key_down(KeyCode::Digit0);
        assert!(input.is_mouse_button_down(0));
        // key 48 and button 0 live in different sets
        assert!(!input.is_mouse_button_down(48));
        assert!(input.is_key_down(48));
    }

    #[test]
    fn wheel_keeps_only_latest_sign() {
        let mut input = InputBridge::new();
        input.wheel(3.0);
        assert_eq!(input.wheel_move(), 1);
        input.wheel(-0.5);
        assert_eq!(input.wheel_move(), -1);
        // Not reset per frame; only an overwrite changes it
        assert_eq!(input.wheel_move(), -1);
    }

    #[test]
    fn cursor_stores_last_position() {
        let mut input = InputBridge::new();
        input.cursor_moved(10.0, 20.0);
        input.cursor_moved(30.0, 40.0);
        assert_eq!(input.cursor(), (30.0, 40.0));
    }

    #[test]
    fn clear_pressed_empties_both_sets() {
        let mut input = InputBridge::new();
        input.key_down(KeyCode::Escape);
        input.mouse_down(MouseButton::Right);
        input.wheel(1.0);
        input.clear_pressed();
        assert!(!input.is_key_down(256));
        assert!(!input.is_mouse_button_down(1));
        // Wheel and cursor are not part of the pressed-sets
        assert_eq!(input.wheel_move(), 1);
    }

    #[test]
    fn glfw_numbering_spot_checks() {
        assert_eq!(glfw_key(KeyCode::Space), Some(32));
        assert_eq!(glfw_key(KeyCode::Escape), Some(256));
        assert_eq!(glfw_key(KeyCode::ArrowUp), Some(265));
        assert_eq!(glfw_key(KeyCode::F12), Some(301));
        assert_eq!(glfw_key(KeyCode::NumpadEnter), Some(335));
        assert_eq!(glfw_mouse_button(MouseButton::Right), Some(1));
        assert_eq!(glfw_mouse_button(MouseButton::Middle), Some(2));
        assert_eq!(glfw_mouse_button(MouseButton::Other(99)), None);
    }
}
