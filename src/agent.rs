/*
 * Agent Module
 *
 * This module defines the Agent struct: one simulated lion or antelope with
 * a position on the grid, health, damage output, and a reference to its
 * current node in the team's behavior state machine.
 *
 * Spatial attributes (nearest friend, nearest enemy, local friend count) are
 * scratch data recomputed by the spatial pass every tick. Cross-references
 * between agents are index-based handles into the owning spawner's pool, not
 * pointers; they are re-resolved each tick and never retained across ticks.
 */

use nannou::prelude::*;

use crate::behavior::NodeId;

// Health every agent starts with
pub const START_HEALTH: f32 = 10.0;

// The two simulated teams
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Team {
    Lion,
    Antelope,
}

pub const TEAM_COUNT: usize = 2;

impl Team {
    // Index into per-team arrays (spawners, state machines)
    pub fn index(self) -> usize {
        match self {
            Team::Lion => 0,
            Team::Antelope => 1,
        }
    }

    pub fn enemy(self) -> Team {
        match self {
            Team::Lion => Team::Antelope,
            Team::Antelope => Team::Lion,
        }
    }

    pub fn color(self) -> Vec4 {
        match self {
            Team::Lion => vec4(0.8, 0.5, 0.0, 1.0),
            Team::Antelope => vec4(0.8, 0.25, 0.0, 1.0),
        }
    }

    pub fn mesh_name(self) -> &'static str {
        match self {
            Team::Lion => "Rectangle",
            Team::Antelope => "Triangle",
        }
    }
}

// Index-based weak reference to an agent in a team pool. Pools never
// reorder, so the index stays stable; the referenced agent's active flag
// must be revalidated before use.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AgentRef {
    pub team: Team,
    pub index: usize,
}

// Per-tick scratch attributes consumed by the state machine guards
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpatialAttrs {
    pub nearest_friend: Option<AgentRef>,
    pub nearest_enemy: Option<AgentRef>,
    pub friends_next_to_me: u32,
}

impl SpatialAttrs {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

#[derive(Clone, Debug)]
pub struct Agent {
    pub team: Team,
    pub position: Vec3,
    pub health: f32,
    pub dps: f32,
    pub active: bool,
    // Current node in the team's shared behavior tree; the agent never owns
    // or copies the tree itself
    pub state: NodeId,
    pub spatial: SpatialAttrs,
}

impl Agent {
    pub fn new(team: Team, position: Vec3, dps: f32, state: NodeId, active: bool) -> Self {
        Self {
            team,
            position,
            health: START_HEALTH,
            dps,
            active,
            state,
            spatial: SpatialAttrs::default(),
        }
    }

    // Apply incoming damage. Lethal damage takes effect at the next tick's
    // death check, not immediately.
    pub fn hit(&mut self, damage: f32) {
        self.health -= damage;
    }

    // Remove the agent from play: excluded from spatial queries and combat,
    // routed to the machine's terminal node, scratch attributes dropped.
    pub fn die(&mut self, sink: NodeId) {
        self.active = false;
        self.state = sink;
        self.spatial.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_accumulates_without_killing() {
        let mut agent = Agent::new(Team::Lion, vec3(0.0, 0.0, 0.0), 10.0, NodeId(0), true);
        agent.hit(4.0);
        agent.hit(7.0);
        assert!(agent.health < 0.0);
        // Still active: death is resolved by the next pre-update pass
        assert!(agent.active);
    }

    #[test]
    fn die_clears_spatial_attrs_and_deactivates() {
        let mut agent = Agent::new(Team::Antelope, vec3(1.0, 2.0, 0.1), 2.6, NodeId(0), true);
        agent.spatial.friends_next_to_me = 3;
        agent.spatial.nearest_enemy = Some(AgentRef {
            team: Team::Lion,
            index: 0,
        });
        agent.die(NodeId(3));
        assert!(!agent.active);
        assert_eq!(agent.state, NodeId(3));
        assert_eq!(agent.spatial, SpatialAttrs::default());
    }

    #[test]
    fn team_enemy_is_symmetric() {
        assert_eq!(Team::Lion.enemy(), Team::Antelope);
        assert_eq!(Team::Antelope.enemy(), Team::Lion);
    }
}
