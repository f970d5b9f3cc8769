/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for adjusting simulation parameters.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use nannou_egui::{egui, Egui};

// Update the UI and return whether the herds should be reset, whether the
// herd sizes changed, and if any UI changes occurred
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, bool, bool) {
    let mut should_reset_herds = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Herd Sizes", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_lions, SimulationParams::get_herd_size_range())
                        .text("Lions"),
                );
                ui.add(
                    egui::Slider::new(
                        &mut params.num_antelopes,
                        SimulationParams::get_herd_size_range(),
                    )
                    .text("Antelopes"),
                );

                if ui.button("Reset Herds").clicked() {
                    should_reset_herds = true;
                }
            });

            ui.collapsing("Combat", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.lion_dps, SimulationParams::get_dps_range())
                        .text("Lion Damage/s"),
                );
                ui.add(
                    egui::Slider::new(&mut params.antelope_dps, SimulationParams::get_dps_range())
                        .text("Antelope Damage/s"),
                );
            });

            ui.collapsing("Simulation", |ui| {
                ui.add(
                    egui::Slider::new(
                        &mut params.simulation_speed,
                        SimulationParams::get_simulation_speed_range(),
                    )
                    .text("Speed"),
                );

                ui.separator();

                // Performance metrics
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!(
                    "Frame time: {:.2} ms",
                    debug_info.frame_time.as_secs_f64() * 1000.0
                ));
                ui.label(format!("Ticks: {}", debug_info.ticks));
                ui.label(format!("Lions alive: {}", debug_info.lions_alive));
                ui.label(format!("Antelopes alive: {}", debug_info.antelopes_alive));
            });

            ui.collapsing("Camera Controls", |ui| {
                ui.label("Zoom: Use mouse wheel or trackpad pinch gesture");
                ui.label("Pan: Click and drag or use trackpad with two fingers");
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation (Space)");
        });

    // Detect parameter changes
    let (_, populations_changed, ui_changed) = params.detect_changes();

    // Return the combined result
    (should_reset_herds, populations_changed, ui_changed)
}

// Draw debug information on the screen
pub fn draw_debug_info(
    draw: &nannou::Draw,
    debug_info: &DebugInfo,
    window_rect: nannou::geom::Rect,
    camera_zoom: f32,
) {
    // Create a background panel in the top-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;
    let panel_height = line_height * 6.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    // Draw the background panel
    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    // For left-aligned text in nannou, we need to position each text element
    // at the left edge of our panel plus half the text's width
    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    // Draw each line of text
    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!(
            "Frame time: {:.2} ms",
            debug_info.frame_time.as_secs_f64() * 1000.0
        ),
        format!("Ticks: {}", debug_info.ticks),
        format!("Lions: {}", debug_info.lions_alive),
        format!("Antelopes: {}", debug_info.antelopes_alive),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
