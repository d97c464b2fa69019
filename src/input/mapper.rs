use glam::Vec2;

use super::controller::{Button, Controller};
use crate::camera::CameraState;

/// Translation per frame for a held movement key, before sensitivity scaling.
/// Applied once per frame, not per second, so speed follows the frame rate.
pub const MOVE_STEP: f32 = 0.02;

/// Screen pixels of drag per degree of orbit.
pub const ORBIT_DIVISOR: f32 = 10.0;

/// Translates held buttons and right-drag cursor motion into camera calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputMapper {
    orbiting: bool,
    previous_cursor: Vec2,
}

impl InputMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button-hold channel: one fixed step per held key per frame.
    pub fn apply_held_buttons(
        &self,
        controller: &dyn Controller,
        camera: &mut CameraState,
        sensitivity: f32,
    ) {
        let step = MOVE_STEP * sensitivity;

        if controller.is_down(Button::KeyW) {
            camera.translate_along_forward(step);
        }
        if controller.is_down(Button::KeyS) {
            camera.translate_along_forward(-step);
        }
        if controller.is_down(Button::KeyD) {
            camera.translate_along_right(step);
        }
        if controller.is_down(Button::KeyA) {
            camera.translate_along_right(-step);
        }
        if controller.is_down(Button::Space) {
            camera.translate_along_up(step);
        }
        if controller.is_down(Button::Shift) {
            camera.translate_along_up(-step);
        }
    }

    pub fn set_orbiting(&mut self, pressed: bool) {
        self.orbiting = pressed;
    }

    pub fn is_orbiting(&self) -> bool {
        self.orbiting
    }

    pub fn previous_cursor(&self) -> Vec2 {
        self.previous_cursor
    }

    /// Drag-orbit channel. The cursor position is recorded on every move so
    /// that pressing the button later does not cause a jump.
    pub fn cursor_moved(&mut self, position: Vec2, camera: &mut CameraState) {
        if self.orbiting {
            let delta = position - self.previous_cursor;
            camera.orbit(delta.x / ORBIT_DIVISOR, delta.y / ORBIT_DIVISOR);
        }
        self.previous_cursor = position;
    }
}
