/*
 * Spawner Module
 *
 * Each team owns one spawner: a fixed home point on the grid, a capacity,
 * and the pool of agents it has produced. Pools are append-only and never
 * reorder, which is what makes index-based agent references stable for the
 * lifetime of a scene.
 */

use nannou::prelude::*;
use rand::Rng;

use crate::agent::{Agent, AgentRef, Team};
use crate::behavior::NodeId;

// Radius of the square patch around the home point that initial agents are
// scattered over
const PLACEMENT_SPREAD: f32 = 8.0;

pub struct Spawner {
    pub team: Team,
    pub home: Vec3,
    pub capacity: usize,
    pub dps: f32,
    pub color: Vec4,
    agents: Vec<Agent>,
}

impl Spawner {
    pub fn new(team: Team, home: Vec3, capacity: usize, dps: f32) -> Self {
        let color = match team {
            Team::Lion => vec4(0.0, 0.7, 0.1, 1.0),
            Team::Antelope => vec4(0.5, 0.0, 0.7, 1.0),
        };
        Self {
            team,
            home,
            capacity,
            dps,
            color,
            agents: Vec::with_capacity(capacity),
        }
    }

    // Fill the pool up to capacity with active agents scattered around the
    // home point, all starting at the machine's root node
    pub fn populate(&mut self, root: NodeId) {
        let mut rng = rand::thread_rng();
        while self.agents.len() < self.capacity {
            let offset = vec3(
                rng.gen_range(-PLACEMENT_SPREAD..PLACEMENT_SPREAD),
                rng.gen_range(-PLACEMENT_SPREAD..PLACEMENT_SPREAD),
                0.0,
            );
            let position = self.home + offset;
            self.agents
                .push(Agent::new(self.team, position, self.dps, root, true));
        }
    }

    // Add one agent at an explicit position. Returns None once the pool is
    // full; a full spawner refuses silently rather than erroring.
    pub fn spawn(&mut self, position: Vec3, state: NodeId, active: bool) -> Option<AgentRef> {
        if self.agents.len() >= self.capacity {
            return None;
        }
        let index = self.agents.len();
        self.agents
            .push(Agent::new(self.team, position, self.dps, state, active));
        Some(AgentRef {
            team: self.team,
            index,
        })
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut [Agent] {
        &mut self.agents
    }

    pub fn live_count(&self) -> usize {
        self.agents.iter().filter(|a| a.active).count()
    }

    // Push a new damage value to the spawner and every agent it owns
    pub fn set_dps(&mut self, dps: f32) {
        self.dps = dps;
        for agent in &mut self.agents {
            agent.dps = dps;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populate_fills_to_capacity_near_home() {
        let home = vec3(-40.0, -20.0, 0.1);
        let mut spawner = Spawner::new(Team::Lion, home, 20, 10.0);
        spawner.populate(NodeId(0));

        assert_eq!(spawner.agents().len(), 20);
        assert_eq!(spawner.live_count(), 20);
        for agent in spawner.agents() {
            assert!((agent.position.x - home.x).abs() < PLACEMENT_SPREAD);
            assert!((agent.position.y - home.y).abs() < PLACEMENT_SPREAD);
            assert_eq!(agent.position.z, home.z);
        }
    }

    #[test]
    fn spawn_refuses_silently_at_capacity() {
        let mut spawner = Spawner::new(Team::Antelope, vec3(40.0, -20.0, 0.1), 2, 2.6);
        let first = spawner.spawn(vec3(0.0, 0.0, 0.1), NodeId(0), true);
        let second = spawner.spawn(vec3(1.0, 0.0, 0.1), NodeId(0), true);
        let third = spawner.spawn(vec3(2.0, 0.0, 0.1), NodeId(0), true);

        assert_eq!(first.map(|r| r.index), Some(0));
        assert_eq!(second.map(|r| r.index), Some(1));
        assert_eq!(third, None);
        assert_eq!(spawner.agents().len(), 2);
    }

    #[test]
    fn set_dps_reaches_existing_agents() {
        let mut spawner = Spawner::new(Team::Lion, vec3(0.0, 0.0, 0.1), 5, 10.0);
        spawner.populate(NodeId(0));
        spawner.set_dps(25.0);

        assert!(spawner.agents().iter().all(|a| a.dps == 25.0));
    }
}
