/*
 * Savannah Simulation - Module Definitions
 *
 * This file defines the module structure for the lions-versus-antelopes
 * simulation. It organizes the code into logical components for better
 * maintainability.
 */

// Re-export key components for easier access
pub use agent::{Agent, AgentRef, Team};
pub use app::Model;
pub use behavior::Machine;
pub use camera::Camera;
pub use debug::DebugInfo;
pub use params::SimulationParams;
pub use scene::Scene;
pub use spawner::Spawner;

// Define modules
pub mod agent;
pub mod app;
pub mod behavior;
pub mod camera;
pub mod debug;
pub mod input;
pub mod params;
pub mod renderer;
pub mod scene;
pub mod spatial;
pub mod spawner;
pub mod ui;

// Constants
pub const AGENT_SIZE: f32 = 0.8;

// Grid dimensions in cells; the grid is centered on the origin
pub const GRID_CELL_SIZE: f32 = 1.0;
pub const GRID_COLUMNS: u32 = 100;
pub const GRID_ROWS: u32 = 60;

// Proximity thresholds used by the per-tick spatial pass
pub const FRIEND_RADIUS: f32 = 5.0;
pub const OVERLAP_RADIUS: f32 = 0.2;
pub const ATTACK_RADIUS: f32 = 2.5;

// Fixed simulation rate; a frame never advances more than one tick of time
pub const FIXED_TICK_RATE: f32 = 60.0;

// Depth offset applied to agents so they draw above the grid plane
pub const AGENT_DEPTH: f32 = 0.1;
