use winit::event_loop::EventLoop;

use spacetime_viewer::app::App;
use spacetime_viewer::config::LaunchConfig;
use spacetime_viewer::logging;

fn main() -> anyhow::Result<()> {
    logging::init();

    let event_loop = EventLoop::new()?;
    let mut app = App::new(LaunchConfig::default());

    log::info!(
        "Spacetime Viewer - Controls: WASD, Space/Shift, right-drag to orbit, Escape to quit"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
