pub mod app;
pub mod camera;
pub mod config;
pub mod input;
pub mod logging;
pub mod panel;
pub mod renderer;
pub mod shader;
pub mod texture;
pub mod timing;
pub mod tunables;
pub mod uniforms;
pub mod viewer;

pub use camera::CameraState;
pub use tunables::Tunables;
pub use viewer::ViewerState;
