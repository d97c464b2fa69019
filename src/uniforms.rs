use glam::Vec3;

/// Number of texture bind points the scene uniform block can describe.
pub const MAX_TEXTURE_UNITS: usize = 4;

/// Uniform names shared between host code and the shading program.
pub mod names {
    pub const CAMERA_ORIGIN: &str = "cameraOrigin";
    pub const CAMERA_FORWARD: &str = "cameraForward";
    pub const CAMERA_RIGHT: &str = "cameraRight";
    pub const CAMERA_UP: &str = "cameraUp";
    pub const CAMERA_VELOCITY: &str = "cameraVelocity";
    pub const WINDOW_WIDTH: &str = "windowWidth";
    pub const WINDOW_HEIGHT: &str = "windowHeight";
    pub const SPIN: &str = "a";
    pub const MASS: &str = "m";
    pub const CHARGE: &str = "Q";
    pub const TEXTURE_PREFIX: &str = "texture";
}

/// Sink for named per-frame shader inputs.
///
/// Every call is independent and idempotent. Names the program does not
/// declare are ignored, never reported as errors.
pub trait UniformBridge {
    fn set_float(&mut self, name: &str, value: f32);
    fn set_vec3(&mut self, name: &str, value: Vec3);
    fn set_int(&mut self, name: &str, value: i32);
}

/// Scene uniform block for GPU. Field order mirrors `struct Scene` in
/// `shaders/spacetime.wgsl`; each vec3 is packed with a trailing scalar.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniform {
    pub camera_origin: [f32; 3],
    pub window_width: f32,
    pub camera_forward: [f32; 3],
    pub window_height: f32,
    pub camera_right: [f32; 3],
    pub a: f32,
    pub camera_up: [f32; 3],
    pub m: f32,
    pub camera_velocity: [f32; 3],
    pub q: f32,
    pub textures: [i32; MAX_TEXTURE_UNITS],
}

/// Resolved location of a named uniform inside `SceneUniform`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniformSlot {
    CameraOrigin,
    CameraForward,
    CameraRight,
    CameraUp,
    CameraVelocity,
    WindowWidth,
    WindowHeight,
    Spin,
    Mass,
    Charge,
    Texture(usize),
}

impl UniformSlot {
    pub fn from_name(name: &str) -> Option<Self> {
        let slot = match name {
            names::CAMERA_ORIGIN => Self::CameraOrigin,
            names::CAMERA_FORWARD => Self::CameraForward,
            names::CAMERA_RIGHT => Self::CameraRight,
            names::CAMERA_UP => Self::CameraUp,
            names::CAMERA_VELOCITY => Self::CameraVelocity,
            names::WINDOW_WIDTH => Self::WindowWidth,
            names::WINDOW_HEIGHT => Self::WindowHeight,
            names::SPIN => Self::Spin,
            names::MASS => Self::Mass,
            names::CHARGE => Self::Charge,
            _ => {
                let unit = name
                    .strip_prefix(names::TEXTURE_PREFIX)?
                    .parse::<usize>()
                    .ok()?;
                if unit >= MAX_TEXTURE_UNITS {
                    return None;
                }
                Self::Texture(unit)
            }
        };
        Some(slot)
    }
}

/// CPU-side copy of the scene uniform block, filled through `UniformBridge`
/// and uploaded by the renderer once per frame.
#[derive(Debug, Clone, Default)]
pub struct FrameUniforms {
    block: SceneUniform,
}

impl FrameUniforms {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&self) -> &SceneUniform {
        &self.block
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.block)
    }

    fn vec3_field(&mut self, slot: UniformSlot) -> Option<&mut [f32; 3]> {
        match slot {
            UniformSlot::CameraOrigin => Some(&mut self.block.camera_origin),
            UniformSlot::CameraForward => Some(&mut self.block.camera_forward),
            UniformSlot::CameraRight => Some(&mut self.block.camera_right),
            UniformSlot::CameraUp => Some(&mut self.block.camera_up),
            UniformSlot::CameraVelocity => Some(&mut self.block.camera_velocity),
            _ => None,
        }
    }

    fn float_field(&mut self, slot: UniformSlot) -> Option<&mut f32> {
        match slot {
            UniformSlot::WindowWidth => Some(&mut self.block.window_width),
            UniformSlot::WindowHeight => Some(&mut self.block.window_height),
            UniformSlot::Spin => Some(&mut self.block.a),
            UniformSlot::Mass => Some(&mut self.block.m),
            UniformSlot::Charge => Some(&mut self.block.q),
            _ => None,
        }
    }
}

impl UniformBridge for FrameUniforms {
    fn set_float(&mut self, name: &str, value: f32) {
        match UniformSlot::from_name(name).and_then(|slot| self.float_field(slot)) {
            Some(field) => *field = value,
            None => log::trace!("no float uniform named '{}'", name),
        }
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        match UniformSlot::from_name(name).and_then(|slot| self.vec3_field(slot)) {
            Some(field) => *field = value.to_array(),
            None => log::trace!("no vec3 uniform named '{}'", name),
        }
    }

    fn set_int(&mut self, name: &str, value: i32) {
        match UniformSlot::from_name(name) {
            Some(UniformSlot::Texture(unit)) => self.block.textures[unit] = value,
            _ => log::trace!("no int uniform named '{}'", name),
        }
    }
}
