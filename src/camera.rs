use glam::{Mat3, Vec3};

use crate::uniforms::{names, UniformBridge};

pub const DEFAULT_POSITION: Vec3 = Vec3::new(0.0, -30.0, 0.0);
pub const DEFAULT_FORWARD: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const DEFAULT_RIGHT: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const DEFAULT_UP: Vec3 = Vec3::new(0.0, 0.0, -1.0);

/// Free-flying camera: a position, a forward/right/up basis and a
/// velocity/acceleration pair integrated with semi-implicit Euler.
///
/// The basis is normalized once at construction. `orbit` rotates the stored
/// vectors in place without renormalizing them, so long orbiting sessions
/// can drift slightly away from orthonormal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    position: Vec3,
    forward: Vec3,
    right: Vec3,
    up: Vec3,
    velocity: Vec3,
    acceleration: Vec3,
}

impl CameraState {
    pub fn new(position: Vec3, forward: Vec3, right: Vec3, up: Vec3) -> Self {
        Self {
            position,
            forward: forward.normalize(),
            right: right.normalize(),
            up: up.normalize(),
            velocity: Vec3::ZERO,
            acceleration: Vec3::ZERO,
        }
    }

    pub fn translate_along_forward(&mut self, distance: f32) {
        self.position += distance * self.forward;
    }

    pub fn translate_along_right(&mut self, distance: f32) {
        self.position += distance * self.right;
    }

    pub fn translate_along_up(&mut self, distance: f32) {
        self.position += distance * self.up;
    }

    /// Rotate the basis by `yaw_degrees` about `up` and `pitch_degrees` about
    /// `right`. Both rotations are composed into one matrix first, and that
    /// same matrix is applied to all three axes.
    pub fn orbit(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        let yaw = Mat3::from_axis_angle(self.up.normalize(), yaw_degrees.to_radians());
        let pitch = Mat3::from_axis_angle(self.right.normalize(), pitch_degrees.to_radians());
        let rotation = yaw * pitch;

        self.forward = rotation * self.forward;
        self.right = rotation * self.right;
        self.up = rotation * self.up;
    }

    /// Replace the acceleration used by `integrate`.
    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.acceleration = acceleration;
    }

    /// Instantaneous velocity kick, independent of frame time.
    pub fn accelerate(&mut self, impulse: Vec3) {
        self.velocity += impulse;
    }

    /// Advance one step of `dt` seconds. Velocity is updated first and the
    /// new velocity moves the position.
    pub fn integrate(&mut self, dt: f32) {
        self.velocity += self.acceleration * dt;
        self.position += self.velocity * dt;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn forward(&self) -> Vec3 {
        self.forward
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn acceleration(&self) -> Vec3 {
        self.acceleration
    }

    /// Speed in units of c, as shown on the parameter panel.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn export_to_uniforms(&self, bridge: &mut dyn UniformBridge) {
        bridge.set_vec3(names::CAMERA_ORIGIN, self.position);
        bridge.set_vec3(names::CAMERA_FORWARD, self.forward);
        bridge.set_vec3(names::CAMERA_RIGHT, self.right);
        bridge.set_vec3(names::CAMERA_UP, self.up);
    }
}

impl Default for CameraState {
    fn default() -> Self {
        Self::new(DEFAULT_POSITION, DEFAULT_FORWARD, DEFAULT_RIGHT, DEFAULT_UP)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-4;

    fn assert_vec_near(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPSILON),
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn new_normalizes_basis() {
        let camera = CameraState::new(
            Vec3::ZERO,
            Vec3::new(0.0, 4.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, -0.5),
        );

        assert_vec_near(camera.forward(), Vec3::Y);
        assert_vec_near(camera.right(), Vec3::X);
        assert_vec_near(camera.up(), Vec3::NEG_Z);
        assert_eq!(camera.velocity(), Vec3::ZERO);
        assert_eq!(camera.acceleration(), Vec3::ZERO);
    }

    #[test]
    fn default_matches_start_pose() {
        let camera = CameraState::default();
        assert_eq!(camera.position(), Vec3::new(0.0, -30.0, 0.0));
        assert_eq!(camera.forward(), Vec3::Y);
        assert_eq!(camera.right(), Vec3::X);
        assert_eq!(camera.up(), Vec3::NEG_Z);
    }

    #[test]
    fn translations_follow_each_axis() {
        let mut camera = CameraState::default();

        camera.translate_along_right(2.0);
        assert_vec_near(camera.position(), Vec3::new(2.0, -30.0, 0.0));

        camera.translate_along_up(3.0);
        assert_vec_near(camera.position(), Vec3::new(2.0, -30.0, -3.0));

        camera.translate_along_forward(-1.0);
        assert_vec_near(camera.position(), Vec3::new(2.0, -31.0, -3.0));
    }

    #[test]
    fn yaw_rotates_forward_about_up() {
        let mut camera = CameraState::default();
        camera.orbit(90.0, 0.0);

        // A quarter turn about -Z takes +Y to +X.
        assert_vec_near(camera.forward(), Vec3::X);
        assert_vec_near(camera.right(), Vec3::NEG_Y);
        assert_vec_near(camera.up(), Vec3::NEG_Z);
    }

    #[test]
    fn pitch_rotates_forward_about_right() {
        let mut camera = CameraState::default();
        camera.orbit(0.0, 90.0);

        assert_vec_near(camera.forward(), Vec3::Z);
        assert_vec_near(camera.right(), Vec3::X);
        assert_vec_near(camera.up(), Vec3::Y);
    }

    #[test]
    fn orbit_uses_one_matrix_for_every_axis() {
        let mut camera = CameraState::default();
        let before = camera;
        camera.orbit(30.0, -20.0);

        let rotation = Mat3::from_axis_angle(before.up(), 30f32.to_radians())
            * Mat3::from_axis_angle(before.right(), (-20f32).to_radians());

        assert_vec_near(camera.forward(), rotation * before.forward());
        assert_vec_near(camera.right(), rotation * before.right());
        assert_vec_near(camera.up(), rotation * before.up());
    }

    #[test]
    fn orbit_does_not_renormalize_basis() {
        let mut camera = CameraState::default();
        camera.forward = Vec3::new(0.0, 2.0, 0.0);
        camera.orbit(45.0, 10.0);

        assert!((camera.forward().length() - 2.0).abs() < EPSILON);
    }

    #[test]
    fn set_acceleration_overwrites() {
        let mut camera = CameraState::default();
        camera.set_acceleration(Vec3::X);
        camera.set_acceleration(Vec3::Y);
        assert_eq!(camera.acceleration(), Vec3::Y);
    }

    #[test]
    fn integrate_is_semi_implicit() {
        let mut camera = CameraState::new(Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::NEG_Z);
        camera.set_acceleration(Vec3::new(2.0, 0.0, 0.0));
        camera.integrate(0.5);

        // Velocity is updated first, then used for the position step.
        assert_vec_near(camera.velocity(), Vec3::new(1.0, 0.0, 0.0));
        assert_vec_near(camera.position(), Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn integrate_does_not_clamp_large_steps() {
        let mut camera = CameraState::new(Vec3::ZERO, Vec3::Y, Vec3::X, Vec3::NEG_Z);
        camera.accelerate(Vec3::new(0.0, 0.0, 1.0));
        camera.integrate(10.0);
        assert_vec_near(camera.position(), Vec3::new(0.0, 0.0, 10.0));
    }

    #[test]
    fn speed_is_velocity_length() {
        let mut camera = CameraState::default();
        camera.accelerate(Vec3::new(0.3, 0.4, 0.0));
        assert!((camera.speed() - 0.5).abs() < EPSILON);
    }
}
