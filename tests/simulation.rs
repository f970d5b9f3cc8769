/*
 * Simulation Integration Tests
 *
 * These tests drive a Scene headlessly with synthetic time steps and inspect
 * what it emits through a recording render backend, without opening a window.
 */

use nannou::prelude::*;

use savannah::agent::Team;
use savannah::params::SimulationParams;
use savannah::renderer::{MeshHandle, RenderBackend, RenderEntity};
use savannah::scene::Scene;
use savannah::AGENT_DEPTH;

const TICK: f32 = 1.0 / 60.0;

// Backend that records every submitted entity together with the name of the
// mesh it resolved
#[derive(Default)]
struct RecordingBackend {
    meshes: Vec<String>,
    entities: Vec<(String, RenderEntity)>,
    frames_begun: usize,
    frames_ended: usize,
}

impl RecordingBackend {
    fn named(&self, name: &str) -> Vec<&RenderEntity> {
        self.entities
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, e)| e)
            .collect()
    }
}

impl RenderBackend for RecordingBackend {
    fn load_or_get_mesh(&mut self, name: &str) -> MeshHandle {
        if let Some(index) = self.meshes.iter().position(|n| n == name) {
            return MeshHandle(index);
        }
        self.meshes.push(name.to_string());
        MeshHandle(self.meshes.len() - 1)
    }

    fn generate_grid_mesh(&mut self, _cell_size: f32, _columns: u32, _rows: u32) -> MeshHandle {
        self.load_or_get_mesh("Grid")
    }

    fn begin_frame(&mut self) {
        self.frames_begun += 1;
    }

    fn submit(&mut self, entity: &RenderEntity) {
        let name = self.meshes[entity.mesh.0].clone();
        self.entities.push((name, *entity));
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
    }
}

fn scene_with(lions: usize, antelopes: usize) -> Scene {
    let mut params = SimulationParams::default();
    params.num_lions = lions;
    params.num_antelopes = antelopes;
    Scene::new(&params)
}

#[test]
fn render_emits_grid_flags_markers_and_agents() {
    let scene = scene_with(4, 9);
    let mut backend = RecordingBackend::default();
    scene.render(&mut backend);

    assert_eq!(backend.frames_begun, 1);
    assert_eq!(backend.frames_ended, 1);

    assert_eq!(backend.named("Grid").len(), 1);
    // Two flags and two spawner markers
    assert_eq!(backend.named("Diamond").len(), 2);
    assert_eq!(backend.named("Rectangle").len(), 2 + 4); // markers + lions
    assert_eq!(backend.named("Triangle").len(), 9); // antelopes
}

#[test]
fn dead_agents_are_not_rendered() {
    let mut scene = scene_with(2, 2);
    scene.agents_mut(Team::Antelope)[0].health = 0.0;
    scene.update(TICK); // death check removes it

    let mut backend = RecordingBackend::default();
    scene.render(&mut backend);
    assert_eq!(backend.named("Triangle").len(), 1);
}

#[test]
fn flag_positions_and_colors_are_fixed() {
    let mut scene = scene_with(3, 3);
    for _ in 0..120 {
        scene.update(TICK);
    }

    let mut backend = RecordingBackend::default();
    scene.render(&mut backend);

    let flags = backend.named("Diamond");
    assert_eq!(flags[0].position, vec3(-40.0, 20.0, AGENT_DEPTH));
    assert_eq!(flags[0].color, vec4(0.0, 1.0, 0.7, 1.0));
    assert_eq!(flags[1].position, vec3(40.0, 20.0, AGENT_DEPTH));
    assert_eq!(flags[1].color, vec4(1.0, 0.0, 0.0, 1.0));
}

#[test]
fn zero_dt_update_changes_nothing() {
    let mut scene = scene_with(5, 10);
    // Force a contact pair so combat would fire if dt mattered
    scene.agents_mut(Team::Lion)[0].position = vec3(0.0, 0.0, AGENT_DEPTH);
    scene.agents_mut(Team::Antelope)[0].position = vec3(1.0, 0.0, AGENT_DEPTH);

    let lion_positions: Vec<Vec3> = scene.agents(Team::Lion).iter().map(|a| a.position).collect();
    let antelope_health: Vec<f32> = scene
        .agents(Team::Antelope)
        .iter()
        .map(|a| a.health)
        .collect();

    scene.update(0.0);

    let lions_after: Vec<Vec3> = scene.agents(Team::Lion).iter().map(|a| a.position).collect();
    let health_after: Vec<f32> = scene
        .agents(Team::Antelope)
        .iter()
        .map(|a| a.health)
        .collect();
    assert_eq!(lion_positions, lions_after);
    assert_eq!(antelope_health, health_after);
}

#[test]
fn cornered_antelope_is_worn_down_and_killed() {
    let mut scene = scene_with(1, 6);
    // Pin one antelope directly under the lion, far from the rest of the
    // herd: fleeing has no direction at zero distance, so contact holds
    scene.agents_mut(Team::Lion)[0].position = vec3(0.0, 0.0, AGENT_DEPTH);
    scene.agents_mut(Team::Antelope)[0].position = vec3(0.0, 0.0, AGENT_DEPTH);

    // Lion dps 10 against 10 health: roughly a second of contact
    for _ in 0..600 {
        scene.update(TICK);
        if scene.live_count(Team::Antelope) < 6 {
            break;
        }
    }

    assert_eq!(scene.live_count(Team::Antelope), 5);
    assert!(!scene.agents(Team::Antelope)[0].active);
    // The lion survives the exchange with a scratch
    assert_eq!(scene.live_count(Team::Lion), 1);
    assert!(scene.agents(Team::Lion)[0].health < 10.0);
}

#[test]
fn populations_never_grow_during_a_run() {
    let mut scene = scene_with(10, 40);
    for _ in 0..600 {
        scene.update(TICK);
        assert!(scene.live_count(Team::Lion) <= 10);
        assert!(scene.live_count(Team::Antelope) <= 40);
    }
}
