use std::time::Instant;

pub const FPS_UPDATE_INTERVAL: f32 = 1.0;

/// Wall-clock time between consecutive frames
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    previous: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self { previous: start }
    }

    /// Seconds since the previous frame. Stalls are reported in full.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        let dt = now.saturating_duration_since(self.previous).as_secs_f32();
        self.previous = now;
        dt
    }

    /// Restart timing, e.g. after slow startup work
    pub fn restart(&mut self) {
        self.previous = Instant::now();
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Frames-per-second averaged over fixed windows
#[derive(Debug, Clone, Copy, Default)]
pub struct FpsCounter {
    frame_count: u32,
    elapsed: f32,
    fps: f32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one frame. Returns true when a new average was published.
    pub fn record(&mut self, delta: f32) -> bool {
        self.frame_count += 1;
        self.elapsed += delta;

        if self.elapsed >= FPS_UPDATE_INTERVAL {
            self.fps = self.frame_count as f32 / self.elapsed;
            self.frame_count = 0;
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Milliseconds per frame at the current average, zero before the first
    /// window closes.
    pub fn frame_time_ms(&self) -> f32 {
        if self.fps > 0.0 {
            1000.0 / self.fps
        } else {
            0.0
        }
    }
}
