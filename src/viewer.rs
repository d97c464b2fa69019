use glam::Vec2;

use crate::camera::CameraState;
use crate::input::{Controller, InputMapper};
use crate::tunables::Tunables;
use crate::uniforms::{names, UniformBridge};

/// Everything the render loop mutates between frames, owned in one place and
/// lent to the input mapper and the uniform bridge.
#[derive(Debug, Clone)]
pub struct ViewerState {
    pub camera: CameraState,
    pub tunables: Tunables,
    input: InputMapper,
    window_size: (u32, u32),
}

impl ViewerState {
    pub fn new(window_size: (u32, u32)) -> Self {
        Self {
            camera: CameraState::default(),
            tunables: Tunables::default(),
            input: InputMapper::new(),
            window_size,
        }
    }

    pub fn window_size(&self) -> (u32, u32) {
        self.window_size
    }

    pub fn input(&self) -> &InputMapper {
        &self.input
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.window_size = (width, height);
    }

    /// Apply the button-hold channel for this frame
    pub fn handle_input(&mut self, controller: &dyn Controller) {
        self.input
            .apply_held_buttons(controller, &mut self.camera, self.tunables.sensitivity);
    }

    pub fn set_orbiting(&mut self, pressed: bool) {
        self.input.set_orbiting(pressed);
    }

    pub fn cursor_moved(&mut self, position: Vec2) {
        self.input.cursor_moved(position, &mut self.camera);
    }

    /// Write window size, camera velocity, physical constants and the camera
    /// basis into the bridge. Texture units are exported by their owners.
    pub fn export_uniforms(&self, bridge: &mut dyn UniformBridge) {
        bridge.set_float(names::WINDOW_WIDTH, self.window_size.0 as f32);
        bridge.set_float(names::WINDOW_HEIGHT, self.window_size.1 as f32);
        bridge.set_vec3(names::CAMERA_VELOCITY, self.camera.velocity());
        self.tunables.export_to_uniforms(bridge);
        self.camera.export_to_uniforms(bridge);
    }

    /// Advance camera motion by the wall-clock frame time
    pub fn integrate(&mut self, dt: f32) {
        self.camera.integrate(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use crate::uniforms::FrameUniforms;
    use glam::Vec3;

    struct Held(Vec<Button>);

    impl Controller for Held {
        fn is_down(&self, button: Button) -> bool {
            self.0.contains(&button)
        }
    }

    #[test]
    fn held_key_uses_current_sensitivity() {
        let mut state = ViewerState::new((800, 600));
        state.tunables.sensitivity = 1.0;
        state.handle_input(&Held(vec![Button::KeyW]));

        assert!(state
            .camera
            .position()
            .abs_diff_eq(Vec3::new(0.0, -29.98, 0.0), 1e-5));
    }

    #[test]
    fn export_fills_frame_uniforms() {
        let mut state = ViewerState::new((1920, 1080));
        state.camera.accelerate(Vec3::new(0.0, 0.25, 0.0));

        let mut uniforms = FrameUniforms::new();
        state.export_uniforms(&mut uniforms);
        let block = uniforms.block();

        assert_eq!(block.window_width, 1920.0);
        assert_eq!(block.window_height, 1080.0);
        assert_eq!(block.camera_velocity, [0.0, 0.25, 0.0]);
        assert_eq!(block.camera_origin, [0.0, -30.0, 0.0]);
        assert_eq!(block.camera_forward, [0.0, 1.0, 0.0]);
        assert_eq!(block.camera_right, [1.0, 0.0, 0.0]);
        assert_eq!(block.camera_up, [0.0, 0.0, -1.0]);
        assert_eq!((block.a, block.m, block.q), (0.1, 1.0, 0.5));
    }

    #[test]
    fn resize_updates_window_uniforms() {
        let mut state = ViewerState::new((1920, 1080));
        state.resize(640, 480);

        let mut uniforms = FrameUniforms::new();
        state.export_uniforms(&mut uniforms);
        assert_eq!(uniforms.block().window_width, 640.0);
        assert_eq!(uniforms.block().window_height, 480.0);
    }

    #[test]
    fn export_happens_before_integration() {
        let mut state = ViewerState::new((800, 600));
        state.camera.accelerate(Vec3::new(0.0, 1.0, 0.0));

        let mut uniforms = FrameUniforms::new();
        state.export_uniforms(&mut uniforms);
        state.integrate(0.5);

        assert_eq!(uniforms.block().camera_origin, [0.0, -30.0, 0.0]);
        assert_eq!(state.camera.position(), Vec3::new(0.0, -29.5, 0.0));
    }

    #[test]
    fn right_drag_orbits_camera() {
        let mut state = ViewerState::new((800, 600));
        state.cursor_moved(Vec2::new(10.0, 10.0));
        state.set_orbiting(true);
        state.cursor_moved(Vec2::new(910.0, 10.0));

        // 900 px is 90 degrees of yaw about -Z.
        assert!(state.camera.forward().abs_diff_eq(Vec3::X, 1e-5));
        assert!(state.input().is_orbiting());
    }
}
