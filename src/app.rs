use std::sync::Arc;

use glam::Vec2;
use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

use crate::config::LaunchConfig;
use crate::input::{Button, WinitController};
use crate::panel::{self, PanelStats};
use crate::renderer::{Renderer, RendererOptions};
use crate::texture::TextureUnit;
use crate::timing::{FpsCounter, FrameClock};
use crate::uniforms::FrameUniforms;
use crate::viewer::ViewerState;

const WINDOW_TITLE: &str = "Spacetime";

/// Render-loop controller. Owns the viewer state and, once resumed, the
/// window and its renderer.
pub struct App {
    // The renderer holds the window's surface and is declared first so it is
    // dropped before the window.
    renderer: Option<Renderer>,
    window: Option<Arc<Window>>,
    state: ViewerState,
    controller: WinitController,
    uniforms: FrameUniforms,
    clock: FrameClock,
    fps: FpsCounter,
    config: LaunchConfig,
}

impl App {
    pub fn new(config: LaunchConfig) -> Self {
        Self {
            renderer: None,
            window: None,
            state: ViewerState::new((config.window_width, config.window_height)),
            controller: WinitController::new(),
            uniforms: FrameUniforms::new(),
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
            config,
        }
    }

    fn renderer_options(&self) -> RendererOptions {
        RendererOptions {
            sky_path: self.config.sky_path.clone(),
            sky_unit: TextureUnit::SKY,
        }
    }

    fn handle_button(&mut self, event_loop: &ActiveEventLoop, event: &WindowEvent) {
        match self.controller.process_event(event) {
            Some((Button::Escape, ElementState::Pressed)) => event_loop.exit(),
            Some((Button::MouseRight, state)) => self.state.set_orbiting(state.is_pressed()),
            _ => {}
        }
    }

    /// One frame: held-key input, panel, uniform export, integration, draw.
    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        if self.fps.record(dt) {
            log::debug!("FPS: {:.1}", self.fps.fps());
        }

        self.state.handle_input(&self.controller);

        let (Some(renderer), Some(window)) = (&mut self.renderer, &self.window) else {
            return;
        };

        let stats = PanelStats {
            fps: self.fps.fps(),
            frame_time_ms: self.fps.frame_time_ms(),
            speed: self.state.camera.speed(),
        };
        let tunables = &mut self.state.tunables;
        let ui_output = renderer.run_ui(window, |ctx| panel::show(ctx, tunables, &stats));

        self.state.export_uniforms(&mut self.uniforms);
        renderer.sky().export_to_uniforms(&mut self.uniforms);

        // Uniforms carry the pre-integration camera for this frame.
        self.state.integrate(dt);

        match renderer.render(window, &self.uniforms, ui_output) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("surface lost, reconfiguring");
                renderer.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("frame skipped: {}", e),
        }
    }
}

/// Whether an event still reaches the viewer after egui has seen it. Cursor
/// motion always does, so the drag channel's previous position stays current
/// while a widget holds the pointer.
fn reaches_viewer(event: &WindowEvent, egui_consumed: bool) -> bool {
    matches!(event, WindowEvent::CursorMoved { .. }) || !egui_consumed
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            Window::default_attributes()
                .with_title(WINDOW_TITLE)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.config.window_width,
                    self.config.window_height,
                )),
        ) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let options = self.renderer_options();
        let renderer = match pollster::block_on(Renderer::new(window.clone(), &options)) {
            Ok(r) => r,
            Err(e) => {
                log::error!("failed to initialize renderer: {e:#}");
                event_loop.exit();
                return;
            }
        };

        if !renderer.has_usable_shader() {
            log::warn!("running without a usable shader program");
        }

        let size = window.inner_size();
        self.state.resize(size.width, size.height);
        self.clock.restart();

        self.renderer = Some(renderer);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        let egui_consumed = match (&mut self.renderer, &self.window) {
            (Some(renderer), Some(window)) => renderer.handle_event(window, &event),
            _ => false,
        };
        if !reaches_viewer(&event, egui_consumed) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(size.width, size.height);
                }
                self.state.resize(size.width, size.height);
            }
            WindowEvent::Focused(false) => {
                self.controller.release_all();
                self.state.set_orbiting(false);
            }
            WindowEvent::KeyboardInput { .. } | WindowEvent::MouseInput { .. } => {
                self.handle_button(event_loop, &event);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state
                    .cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        log::info!("Shutting down");
        self.renderer = None;
        self.window = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;
    use winit::event::{DeviceId, MouseButton};

    fn device_id() -> DeviceId {
        // SAFETY: the dummy id is only carried in the event, never handed back to winit.
        unsafe { DeviceId::dummy() }
    }

    fn cursor_moved(x: f64, y: f64) -> WindowEvent {
        WindowEvent::CursorMoved {
            device_id: device_id(),
            position: PhysicalPosition::new(x, y),
        }
    }

    /// Feed an event through the same routing `window_event` applies
    fn route(state: &mut ViewerState, event: &WindowEvent, egui_consumed: bool) {
        if !reaches_viewer(event, egui_consumed) {
            return;
        }
        if let WindowEvent::CursorMoved { position, .. } = event {
            state.cursor_moved(Vec2::new(position.x as f32, position.y as f32));
        }
    }

    #[test]
    fn test_cursor_motion_reaches_viewer_when_consumed() {
        assert!(reaches_viewer(&cursor_moved(10.0, 20.0), true));
        assert!(reaches_viewer(&cursor_moved(10.0, 20.0), false));
    }

    #[test]
    fn test_consumed_buttons_stop_at_egui() {
        let press = WindowEvent::MouseInput {
            device_id: device_id(),
            state: ElementState::Pressed,
            button: MouseButton::Right,
        };
        assert!(!reaches_viewer(&press, true));
        assert!(reaches_viewer(&press, false));
    }

    #[test]
    fn test_slider_drag_keeps_cursor_current() {
        let mut state = ViewerState::new((1920, 1080));

        // Left-drag over a panel slider: egui consumes every move.
        for step in 0..=20 {
            let p = 100.0 + step as f64 * 10.0;
            route(&mut state, &cursor_moved(p, p), true);
        }
        assert_eq!(state.input().previous_cursor(), Vec2::new(300.0, 300.0));

        // Right-press with no motion in between, then a one-pixel move.
        state.set_orbiting(true);
        route(&mut state, &cursor_moved(301.0, 300.0), false);

        let mut expected = crate::camera::CameraState::default();
        expected.orbit(0.1, 0.0);
        assert!(
            state.camera.forward().abs_diff_eq(expected.forward(), 1e-6),
            "One pixel of drag should orbit 0.1 degrees, got forward {:?}",
            state.camera.forward()
        );
    }
}
