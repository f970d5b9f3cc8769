/*
 * Savannah Simulation
 *
 * Two populations of autonomous agents (lions and antelopes) move, seek,
 * flee, attack, and die on a 2D grid. Each team shares a behavior state
 * machine driven by per-tick spatial attributes: nearest friend, nearest
 * enemy, and local friend density.
 *
 * The simulation includes interactive controls for herd sizes and combat
 * tuning, and displays debug information about the current state.
 */

use savannah::app;

fn main() {
    nannou::app(app::model)
        .update(app::update)
        .run();
}
