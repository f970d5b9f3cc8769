/*
 * Application Module
 *
 * This module defines the main application model and logic for the savannah
 * simulation. It handles initialization, the per-frame update, and wiring
 * the window event handlers.
 *
 * The simulation advances at a fixed rate: the loop runs at the tick rate
 * and each frame applies at most one tick's worth of time, so a stalled
 * frame slows the simulation down instead of teleporting agents.
 */

use nannou::prelude::*;
use nannou_egui::Egui;

use crate::agent::Team;
use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer;
use crate::scene::Scene;
use crate::ui;
use crate::FIXED_TICK_RATE;

// Main model for the application
pub struct Model {
    pub scene: Scene,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub camera: Camera,
    pub mouse_position: Vec2,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    // Get the primary monitor's dimensions
    let monitor = app.primary_monitor().expect("Failed to get primary monitor");
    let monitor_size = monitor.size();

    // Calculate window size based on monitor size (80% of monitor size)
    let window_width = monitor_size.width as f32 * 0.8;
    let window_height = monitor_size.height as f32 * 0.8;

    // Create the main window with dynamic size
    let window_id = app
        .new_window()
        .title("Savannah Simulation")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .key_pressed(input::key_pressed)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_wheel(input::mouse_wheel)
        .raw_event(input::raw_window_event)
        .build()
        .unwrap();

    // Get the window
    let window = app.window(window_id).unwrap();

    // Create the UI
    let egui = Egui::from_window(&window);

    // Run the frame loop at the simulation's fixed tick rate
    app.set_loop_mode(LoopMode::rate_fps(FIXED_TICK_RATE as f64));

    // Create simulation parameters and the initial scene
    let params = SimulationParams::default();
    let scene = Scene::new(&params);

    Model {
        scene,
        params,
        egui,
        debug_info: DebugInfo::default(),
        camera: Camera::new(),
        mouse_position: Vec2::ZERO,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Update debug info
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    // Update UI and check if the herds need to be rebuilt
    let (should_reset_herds, populations_changed, _ui_changed) =
        ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    // Herd size changes only take effect through a scene rebuild; dps
    // changes flow into the live scene immediately
    if should_reset_herds || populations_changed {
        model.scene = Scene::new(&model.params);
    } else {
        model.scene.set_team_dps(Team::Lion, model.params.lion_dps);
        model
            .scene
            .set_team_dps(Team::Antelope, model.params.antelope_dps);
    }

    // Clamp the frame delta to one tick so a slow frame cannot make agents
    // jump across the grid
    let dt = update.since_last.as_secs_f32().min(1.0 / FIXED_TICK_RATE);

    if !model.params.pause_simulation {
        model.scene.update(dt * model.params.simulation_speed);
        model.debug_info.ticks += 1;
    }

    model.debug_info.lions_alive = model.scene.live_count(Team::Lion);
    model.debug_info.antelopes_alive = model.scene.live_count(Team::Antelope);
}
