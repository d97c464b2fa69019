use crate::tunables::{Tunables, CHARGE_RANGE, MASS_RANGE, SENSITIVITY_RANGE, SPIN_RANGE};

/// Read-only figures shown on the parameter panel
#[derive(Debug, Clone, Copy, Default)]
pub struct PanelStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub speed: f32,
}

pub fn fps_label(stats: &PanelStats) -> String {
    format!(
        "{} fps ({} ms per frame)",
        stats.fps as i32, stats.frame_time_ms as i32
    )
}

pub fn speed_label(speed: f32) -> String {
    format!("Speed: {:.6}c", speed)
}

/// Draw the "Spacetime" window. Sliders edit `tunables` in place and keep
/// each value inside its range.
pub fn show(ctx: &egui::Context, tunables: &mut Tunables, stats: &PanelStats) {
    egui::Window::new("Spacetime")
        .title_bar(true)
        .resizable(false)
        .default_pos(egui::pos2(10.0, 10.0))
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new(fps_label(stats))
                    .size(14.0)
                    .color(egui::Color32::from_rgb(74, 158, 255)),
            );
            ui.add(
                egui::Slider::new(&mut tunables.sensitivity, SENSITIVITY_RANGE)
                    .text("camera sensitivity"),
            );

            ui.add_space(5.0);
            ui.separator();
            ui.add_space(5.0);

            ui.monospace(speed_label(stats.speed));
            ui.add(egui::Slider::new(&mut tunables.a, SPIN_RANGE).text("a"));
            ui.add(egui::Slider::new(&mut tunables.m, MASS_RANGE).text("m"));
            ui.add(egui::Slider::new(&mut tunables.q, CHARGE_RANGE).text("Q"));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_label_truncates() {
        let stats = PanelStats {
            fps: 59.9,
            frame_time_ms: 16.7,
            speed: 0.0,
        };
        assert_eq!(fps_label(&stats), "59 fps (16 ms per frame)");
    }

    #[test]
    fn speed_label_has_six_decimals() {
        assert_eq!(speed_label(0.25), "Speed: 0.250000c");
    }

    #[test]
    fn headless_frame_leaves_tunables_untouched() {
        let ctx = egui::Context::default();
        let mut tunables = Tunables::default();
        let stats = PanelStats::default();

        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                show(ctx, &mut tunables, &stats);
            });
        }

        assert_eq!(tunables, Tunables::default());
    }
}
