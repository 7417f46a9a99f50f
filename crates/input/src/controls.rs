//! Flight control snapshot and edge detection.

use glam::Vec2;
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::InputState;

/// Throttle up.
pub const THROTTLE_UP_KEYS: [KeyCode; 2] = [KeyCode::KeyW, KeyCode::ShiftLeft];
/// Throttle down.
pub const THROTTLE_DOWN_KEYS: [KeyCode; 2] = [KeyCode::KeyS, KeyCode::ControlLeft];
pub const YAW_LEFT_KEY: KeyCode = KeyCode::KeyA;
pub const YAW_RIGHT_KEY: KeyCode = KeyCode::KeyD;
pub const PITCH_UP_KEY: KeyCode = KeyCode::ArrowUp;
pub const PITCH_DOWN_KEY: KeyCode = KeyCode::ArrowDown;
pub const FIRE_KEY: KeyCode = KeyCode::Space;
pub const FIRE_BUTTON: MouseButton = MouseButton::Left;
pub const DAY_NIGHT_KEY: KeyCode = KeyCode::KeyN;
pub const QUIT_KEY: KeyCode = KeyCode::Escape;

/// Everything the flight scene reads from the input devices in one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlightControls {
    pub throttle_up: bool,
    pub throttle_down: bool,
    pub yaw_left: bool,
    pub yaw_right: bool,
    pub pitch_up: bool,
    pub pitch_down: bool,
    /// Fire held or pressed this frame (level, not edge; the scene latches the rising edge).
    pub fire: bool,
    /// Fire went down this frame, even if it was released again before the poll.
    pub fire_pressed: bool,
    /// Cursor movement for the orbit camera, in pixels. Zero unless the cursor is captured.
    pub look_delta: Vec2,
    /// Scroll lines for camera zoom.
    pub zoom: f32,
    pub toggle_day_night: bool,
    pub quit: bool,
}

impl FlightControls {
    /// Poll the current input state.
    pub fn from_input(input: &InputState) -> Self {
        let any_held = |keys: &[KeyCode]| keys.iter().any(|&k| input.is_key_held(k));
        let fire_pressed = input.is_key_pressed(FIRE_KEY) || input.is_mouse_pressed(FIRE_BUTTON);
        Self {
            throttle_up: any_held(&THROTTLE_UP_KEYS),
            throttle_down: any_held(&THROTTLE_DOWN_KEYS),
            yaw_left: input.is_key_held(YAW_LEFT_KEY),
            yaw_right: input.is_key_held(YAW_RIGHT_KEY),
            pitch_up: input.is_key_held(PITCH_UP_KEY),
            pitch_down: input.is_key_held(PITCH_DOWN_KEY),
            fire: fire_pressed || input.is_key_held(FIRE_KEY) || input.is_mouse_held(FIRE_BUTTON),
            fire_pressed,
            look_delta: if input.is_cursor_locked() {
                input.mouse_delta()
            } else {
                Vec2::ZERO
            },
            zoom: input.scroll_delta(),
            toggle_day_night: input.is_key_pressed(DAY_NIGHT_KEY),
            quit: input.is_key_pressed(QUIT_KEY),
        }
    }

    /// Throttle axis: +1, -1, or 0 when neither or both are held.
    pub fn throttle_axis(&self) -> f32 {
        axis(self.throttle_up, self.throttle_down)
    }

    /// Yaw axis: +1 = left, -1 = right, 0 when neither or both are held.
    pub fn yaw_axis(&self) -> f32 {
        axis(self.yaw_left, self.yaw_right)
    }

    /// Pitch axis: +1 = nose up, -1 = nose down, 0 when neither or both are held.
    pub fn pitch_axis(&self) -> f32 {
        axis(self.pitch_up, self.pitch_down)
    }
}

/// Opposing inputs held together cancel to zero.
fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Detects the frame on which a level signal goes from inactive to active.
#[derive(Debug, Clone, Copy, Default)]
pub struct RisingEdge {
    previous: bool,
}

impl RisingEdge {
    /// Feed the current level; returns `true` only on an inactive → active transition.
    pub fn update(&mut self, current: bool) -> bool {
        let edge = current && !self.previous;
        self.previous = current;
        edge
    }
}
