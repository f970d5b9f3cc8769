/*
 * Scene Module
 *
 * The scene owns everything the simulation is made of: one spawner per team,
 * the two shared behavior machines, and the static team flags. Its update
 * runs the two halves of a tick in a fixed order: the spatial pre-update
 * pass over both pools, then the state machine pass over every active agent.
 */

use nannou::prelude::*;

use crate::agent::{Agent, AgentRef, Team, TEAM_COUNT};
use crate::behavior::{self, Machine, NodeId, Perception};
use crate::params::SimulationParams;
use crate::renderer::{RenderBackend, RenderEntity};
use crate::spatial;
use crate::spawner::Spawner;
use crate::{AGENT_DEPTH, GRID_CELL_SIZE, GRID_COLUMNS, GRID_ROWS};

// World-space scale applied to flags and spawner markers
const MARKER_SCALE: f32 = 3.0;

// Static team marker at a fixed grid position. Flags take no part in
// movement or combat.
pub struct Flag {
    pub team: Team,
    pub position: Vec3,
    pub color: Vec4,
}

pub struct Scene {
    spawners: [Spawner; TEAM_COUNT],
    machines: [Machine; TEAM_COUNT],
    flags: [Flag; TEAM_COUNT],
}

impl Scene {
    // Build and populate a fresh scene from the current parameters
    pub fn new(params: &SimulationParams) -> Self {
        let machines = [behavior::lion_machine(), behavior::antelope_machine()];

        let mut spawners = [
            Spawner::new(
                Team::Lion,
                vec3(-40.0, -20.0, AGENT_DEPTH),
                params.num_lions,
                params.lion_dps,
            ),
            Spawner::new(
                Team::Antelope,
                vec3(40.0, -20.0, AGENT_DEPTH),
                params.num_antelopes,
                params.antelope_dps,
            ),
        ];
        for spawner in &mut spawners {
            let root = machines[spawner.team.index()].root();
            spawner.populate(root);
        }

        let flags = [
            Flag {
                team: Team::Lion,
                position: vec3(-40.0, 20.0, AGENT_DEPTH),
                color: vec4(0.0, 1.0, 0.7, 1.0),
            },
            Flag {
                team: Team::Antelope,
                position: vec3(40.0, 20.0, AGENT_DEPTH),
                color: vec4(1.0, 0.0, 0.0, 1.0),
            },
        ];

        Self {
            spawners,
            machines,
            flags,
        }
    }

    pub fn agents(&self, team: Team) -> &[Agent] {
        self.spawners[team.index()].agents()
    }

    pub fn agents_mut(&mut self, team: Team) -> &mut [Agent] {
        self.spawners[team.index()].agents_mut()
    }

    pub fn flag(&self, team: Team) -> &Flag {
        &self.flags[team.index()]
    }

    pub fn live_count(&self, team: Team) -> usize {
        self.spawners[team.index()].live_count()
    }

    // Root node of the team's shared behavior tree; new agents start here
    pub fn state_machine_root(&self, team: Team) -> NodeId {
        self.machines[team.index()].root()
    }

    // Add one agent through the team's spawner; None when the pool is full
    pub fn add_agent(&mut self, team: Team, position: Vec3, active: bool) -> Option<AgentRef> {
        let state = self.machines[team.index()].root();
        self.spawners[team.index()].spawn(position, state, active)
    }

    pub fn set_team_dps(&mut self, team: Team, dps: f32) {
        self.spawners[team.index()].set_dps(dps);
    }

    // Advance the whole simulation by dt seconds
    pub fn update(&mut self, dt: f32) {
        self.spatial_pass(dt);
        self.machine_pass(Team::Lion, dt);
        self.machine_pass(Team::Antelope, dt);
    }

    fn spatial_pass(&mut self, dt: f32) {
        let lion_sink = self.machines[Team::Lion.index()].dead();
        let antelope_sink = self.machines[Team::Antelope.index()].dead();

        // The two pools live in one array; split it to borrow both mutably
        let (lions, antelopes) = self.spawners.split_at_mut(1);
        spatial::pre_update(
            lions[0].agents_mut(),
            antelopes[0].agents_mut(),
            lion_sink,
            antelope_sink,
            dt,
        );
    }

    // Run the team's machine over every active agent: transition first, then
    // the new node's action. Perceptions are resolved for the whole pool
    // before any agent moves, so every decision this tick sees the positions
    // the spatial pass saw.
    fn machine_pass(&mut self, team: Team, dt: f32) {
        let perceptions: Vec<(usize, Perception)> = {
            let friends = self.spawners[team.index()].agents();
            let enemies = self.spawners[team.enemy().index()].agents();
            friends
                .iter()
                .enumerate()
                .filter(|(_, agent)| agent.active)
                .map(|(i, agent)| (i, perceive(agent, friends, enemies)))
                .collect()
        };

        let machine = &self.machines[team.index()];
        let pool = self.spawners[team.index()].agents_mut();
        for (index, perception) in perceptions {
            let agent = &mut pool[index];
            agent.state = machine.advance(agent.state, &perception);
            let action = &machine.node(agent.state).action;
            agent.position = behavior::apply_action(agent.position, action, &perception, dt);
        }
    }

    // Describe the scene to a render backend: grid, flags, spawner markers,
    // then every active agent
    pub fn render(&self, backend: &mut dyn RenderBackend) {
        backend.begin_frame();

        let grid = backend.generate_grid_mesh(GRID_CELL_SIZE, GRID_COLUMNS, GRID_ROWS);
        backend.submit(&RenderEntity {
            mesh: grid,
            position: vec3(0.0, 0.0, 0.0),
            scale: 1.0,
            color: vec4(0.5, 0.5, 0.5, 1.0),
        });

        for flag in &self.flags {
            let mesh = backend.load_or_get_mesh("Diamond");
            backend.submit(&RenderEntity {
                mesh,
                position: flag.position,
                scale: MARKER_SCALE,
                color: flag.color,
            });
        }

        for spawner in &self.spawners {
            let mesh = backend.load_or_get_mesh("Rectangle");
            backend.submit(&RenderEntity {
                mesh,
                position: spawner.home,
                scale: MARKER_SCALE,
                color: spawner.color,
            });

            let agent_mesh = backend.load_or_get_mesh(spawner.team.mesh_name());
            for agent in spawner.agents() {
                if !agent.active {
                    continue;
                }
                backend.submit(&RenderEntity {
                    mesh: agent_mesh,
                    position: agent.position,
                    scale: 1.0,
                    color: agent.team.color(),
                });
            }
        }

        backend.end_frame();
    }
}

// Resolve an agent's spatial attributes into concrete decision inputs,
// dropping references whose target went inactive
fn perceive(agent: &Agent, friends: &[Agent], enemies: &[Agent]) -> Perception {
    let resolve = |reference: Option<AgentRef>, pool: &[Agent]| {
        reference.and_then(|r| {
            let other = &pool[r.index];
            if !other.active {
                return None;
            }
            Some((other.position, agent.position.distance(other.position)))
        })
    };

    Perception {
        health: agent.health,
        friends_next_to_me: agent.spatial.friends_next_to_me,
        nearest_friend: resolve(agent.spatial.nearest_friend, friends),
        nearest_enemy: resolve(agent.spatial.nearest_enemy, enemies),
    }
}
