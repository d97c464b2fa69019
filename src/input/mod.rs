pub mod controller;
pub mod mapper;
pub mod winit_adapter;

pub use controller::{Button, Controller};
pub use mapper::{InputMapper, MOVE_STEP, ORBIT_DIVISOR};
pub use winit_adapter::WinitController;
