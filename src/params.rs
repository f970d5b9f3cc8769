/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains all the
 * adjustable parameters for the savannah simulation. These parameters can be
 * modified through the UI. It also provides methods for parameter change
 * detection and management to improve separation of concerns.
 */

// Parameters for the simulation that can be adjusted via UI
pub struct SimulationParams {
    pub num_lions: usize,
    pub num_antelopes: usize,
    pub lion_dps: f32,
    pub antelope_dps: f32,
    pub simulation_speed: f32,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of parameter values used for change detection
struct ParamSnapshot {
    num_lions: usize,
    num_antelopes: usize,
    lion_dps: f32,
    antelope_dps: f32,
    simulation_speed: f32,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_lions: 75,
            num_antelopes: 300,
            lion_dps: 10.0,
            antelope_dps: 2.6,
            simulation_speed: 1.0,
            show_debug: false,
            pause_simulation: false,
            // Initialize with no previous values
            previous_values: None,
        }
    }
}

impl SimulationParams {
    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            num_lions: self.num_lions,
            num_antelopes: self.num_antelopes,
            lion_dps: self.lion_dps,
            antelope_dps: self.antelope_dps,
            simulation_speed: self.simulation_speed,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Check if any parameters have changed since the last snapshot
    // Returns a tuple of (should_reset_herds, populations_changed, any_ui_changed)
    pub fn detect_changes(&self) -> (bool, bool, bool) {
        let mut populations_changed = false;
        let mut ui_changed = false;

        // If we don't have previous values, nothing has changed
        if let Some(prev) = &self.previous_values {
            if self.num_lions != prev.num_lions || self.num_antelopes != prev.num_antelopes {
                populations_changed = true;
                ui_changed = true;
            }

            if self.lion_dps != prev.lion_dps
                || self.antelope_dps != prev.antelope_dps
                || self.simulation_speed != prev.simulation_speed
                || self.show_debug != prev.show_debug
                || self.pause_simulation != prev.pause_simulation
            {
                ui_changed = true;
            }
        }

        // The first element (should_reset_herds) is set by the UI when the
        // reset button is clicked
        (false, populations_changed, ui_changed)
    }

    // Get parameter ranges for UI sliders
    pub fn get_herd_size_range() -> std::ops::RangeInclusive<usize> {
        0..=1000
    }

    pub fn get_dps_range() -> std::ops::RangeInclusive<f32> {
        0.0..=50.0
    }

    pub fn get_simulation_speed_range() -> std::ops::RangeInclusive<f32> {
        0.1..=5.0
    }
}
