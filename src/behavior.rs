/*
 * Behavior Module
 *
 * This module defines the per-team behavior state machines. Each team owns
 * one tree of state nodes, shared read-only across every agent of that team;
 * an agent stores only the index of its current node.
 *
 * Per tick, for each active agent: the current node's transition guards are
 * evaluated in fixed priority order (first matching guard wins); if one
 * fires the agent's node reference switches, and then the current node's
 * action runs against the agent's freshly computed spatial attributes.
 * The machine is a pure function of (current node, perception) with no
 * hidden history beyond the node reference.
 */

use nannou::prelude::*;

// Identifier of a node within a team's behavior tree
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeId(pub usize);

// Steering speeds in world units per second
pub const ANTELOPE_SPEED: f32 = 5.0;
pub const ANTELOPE_FLEE_SPEED: f32 = 7.0;
pub const LION_SPEED: f32 = 6.5;
pub const LION_RETREAT_SPEED: f32 = 5.5;

// Seek slows down inside this radius so agents settle instead of orbiting
pub const ARRIVE_RADIUS: f32 = 1.0;

// What a movement action steers relative to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Target {
    NearestFriend,
    NearestEnemy,
}

// Continuous per-tick action of a state node. Actions whose target cannot
// be resolved this tick do nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    Idle,
    Seek { target: Target, speed: f32 },
    Flee { target: Target, speed: f32 },
}

// Transition predicate over an agent's perception. A missing nearest
// friend/enemy is a valid input: EnemyWithin is false and NoEnemyWithin is
// true when no enemy exists.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Guard {
    HealthBelow(f32),
    EnemyWithin(f32),
    NoEnemyWithin(f32),
    FriendsAtLeast(u32),
    FriendsBelow(u32),
    NoFriend,
}

// Snapshot of one agent's decision inputs, resolved from its spatial
// attributes before the machine runs
#[derive(Clone, Copy, Debug, Default)]
pub struct Perception {
    pub health: f32,
    pub friends_next_to_me: u32,
    // Resolved (position, distance) of the tick's nearest friend/enemy
    pub nearest_friend: Option<(Vec3, f32)>,
    pub nearest_enemy: Option<(Vec3, f32)>,
}

impl Guard {
    pub fn passes(&self, perception: &Perception) -> bool {
        match *self {
            Guard::HealthBelow(threshold) => perception.health < threshold,
            Guard::EnemyWithin(radius) => match perception.nearest_enemy {
                Some((_, distance)) => distance < radius,
                None => false,
            },
            Guard::NoEnemyWithin(radius) => match perception.nearest_enemy {
                Some((_, distance)) => distance >= radius,
                None => true,
            },
            Guard::FriendsAtLeast(count) => perception.friends_next_to_me >= count,
            Guard::FriendsBelow(count) => perception.friends_next_to_me < count,
            Guard::NoFriend => perception.nearest_friend.is_none(),
        }
    }
}

pub struct Transition {
    pub guard: Guard,
    pub to: NodeId,
}

pub struct StateNode {
    pub name: &'static str,
    pub action: Action,
    // Evaluated in order; the first passing guard wins
    pub transitions: Vec<Transition>,
}

// One team's behavior tree. Built once at scene start and shared read-only
// by every agent of the team.
pub struct Machine {
    nodes: Vec<StateNode>,
    root: NodeId,
    dead: NodeId,
}

impl Machine {
    pub fn root(&self) -> NodeId {
        self.root
    }

    // Terminal sink for dead agents: no transitions, no movement
    pub fn dead(&self) -> NodeId {
        self.dead
    }

    pub fn node(&self, id: NodeId) -> &StateNode {
        &self.nodes[id.0]
    }

    // Evaluate the current node's guards in priority order and return the
    // node the agent should occupy this tick
    pub fn advance(&self, current: NodeId, perception: &Perception) -> NodeId {
        for transition in &self.node(current).transitions {
            if transition.guard.passes(perception) {
                return transition.to;
            }
        }
        current
    }
}

// Antelope tree: graze until a lion gets close, flee until clear, and bunch
// up with the herd when isolated
pub fn antelope_machine() -> Machine {
    const GRAZE: NodeId = NodeId(0);
    const REGROUP: NodeId = NodeId(1);
    const FLEE: NodeId = NodeId(2);
    const DEAD: NodeId = NodeId(3);

    let nodes = vec![
        StateNode {
            name: "graze",
            action: Action::Idle,
            transitions: vec![
                Transition {
                    guard: Guard::EnemyWithin(12.0),
                    to: FLEE,
                },
                Transition {
                    guard: Guard::FriendsBelow(2),
                    to: REGROUP,
                },
            ],
        },
        StateNode {
            name: "regroup",
            action: Action::Seek {
                target: Target::NearestFriend,
                speed: ANTELOPE_SPEED,
            },
            transitions: vec![
                Transition {
                    guard: Guard::EnemyWithin(12.0),
                    to: FLEE,
                },
                Transition {
                    guard: Guard::FriendsAtLeast(3),
                    to: GRAZE,
                },
                // No herd left to rejoin
                Transition {
                    guard: Guard::NoFriend,
                    to: GRAZE,
                },
            ],
        },
        StateNode {
            name: "flee",
            action: Action::Flee {
                target: Target::NearestEnemy,
                speed: ANTELOPE_FLEE_SPEED,
            },
            transitions: vec![Transition {
                guard: Guard::NoEnemyWithin(18.0),
                to: GRAZE,
            }],
        },
        StateNode {
            name: "dead",
            action: Action::Idle,
            transitions: Vec::new(),
        },
    ];

    Machine {
        nodes,
        root: GRAZE,
        dead: DEAD,
    }
}

// Lion tree: prowl until an antelope drifts into scent range, chase it
// down, and break off to retreat when badly hurt
pub fn lion_machine() -> Machine {
    const PROWL: NodeId = NodeId(0);
    const HUNT: NodeId = NodeId(1);
    const RETREAT: NodeId = NodeId(2);
    const DEAD: NodeId = NodeId(3);

    let nodes = vec![
        StateNode {
            name: "prowl",
            action: Action::Idle,
            transitions: vec![
                Transition {
                    guard: Guard::HealthBelow(3.0),
                    to: RETREAT,
                },
                Transition {
                    guard: Guard::EnemyWithin(30.0),
                    to: HUNT,
                },
            ],
        },
        StateNode {
            name: "hunt",
            action: Action::Seek {
                target: Target::NearestEnemy,
                speed: LION_SPEED,
            },
            transitions: vec![
                Transition {
                    guard: Guard::HealthBelow(3.0),
                    to: RETREAT,
                },
                Transition {
                    guard: Guard::NoEnemyWithin(40.0),
                    to: PROWL,
                },
            ],
        },
        StateNode {
            name: "retreat",
            action: Action::Flee {
                target: Target::NearestEnemy,
                speed: LION_RETREAT_SPEED,
            },
            transitions: vec![Transition {
                guard: Guard::NoEnemyWithin(15.0),
                to: PROWL,
            }],
        },
        StateNode {
            name: "dead",
            action: Action::Idle,
            transitions: Vec::new(),
        },
    ];

    Machine {
        nodes,
        root: PROWL,
        dead: DEAD,
    }
}

// Move toward a target, slowing inside the arrive radius and never
// overshooting. Agents share a z plane, so the step stays in x/y.
pub fn seek(position: Vec3, target: Vec3, speed: f32, dt: f32) -> Vec3 {
    let to_target = vec2(target.x - position.x, target.y - position.y);
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return position;
    }

    let mut step = speed * dt;
    if distance < ARRIVE_RADIUS {
        step *= distance / ARRIVE_RADIUS;
    }
    step = step.min(distance);

    let direction = to_target / distance;
    position + vec3(direction.x * step, direction.y * step, 0.0)
}

// Move directly away from a threat at full speed
pub fn flee(position: Vec3, threat: Vec3, speed: f32, dt: f32) -> Vec3 {
    let away = vec2(position.x - threat.x, position.y - threat.y);
    let distance = away.length();
    if distance <= f32::EPSILON {
        return position;
    }

    let direction = away / distance;
    let step = speed * dt;
    position + vec3(direction.x * step, direction.y * step, 0.0)
}

// Run a node's action against the agent's perception, returning the new
// position. Unresolved targets leave the agent in place.
pub fn apply_action(position: Vec3, action: &Action, perception: &Perception, dt: f32) -> Vec3 {
    let resolve = |target: Target| match target {
        Target::NearestFriend => perception.nearest_friend,
        Target::NearestEnemy => perception.nearest_enemy,
    };

    match *action {
        Action::Idle => position,
        Action::Seek { target, speed } => match resolve(target) {
            Some((target_position, _)) => seek(position, target_position, speed, dt),
            None => position,
        },
        Action::Flee { target, speed } => match resolve(target) {
            Some((threat_position, _)) => flee(position, threat_position, speed, dt),
            None => position,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perception_with_enemy(distance: f32) -> Perception {
        Perception {
            health: 10.0,
            nearest_enemy: Some((vec3(distance, 0.0, 0.0), distance)),
            ..Perception::default()
        }
    }

    #[test]
    fn guards_treat_missing_enemy_as_valid_input() {
        let perception = Perception::default();
        assert!(!Guard::EnemyWithin(12.0).passes(&perception));
        assert!(Guard::NoEnemyWithin(12.0).passes(&perception));
        assert!(Guard::NoFriend.passes(&perception));
    }

    #[test]
    fn antelope_grazes_until_enemy_closes_in() {
        let machine = antelope_machine();
        let root = machine.root();

        let far = machine.advance(root, &perception_with_enemy(20.0));
        // No enemy within 12 and no friends either: isolated antelopes regroup
        assert_eq!(machine.node(far).name, "regroup");

        let near = machine.advance(root, &perception_with_enemy(5.0));
        assert_eq!(machine.node(near).name, "flee");
    }

    #[test]
    fn first_matching_guard_wins() {
        let machine = antelope_machine();
        // Enemy near AND isolated: the flee transition is listed first
        let perception = perception_with_enemy(3.0);
        let next = machine.advance(machine.root(), &perception);
        assert_eq!(machine.node(next).name, "flee");
    }

    #[test]
    fn fleeing_antelope_calms_down_once_clear() {
        let machine = antelope_machine();
        let flee_node = machine.advance(machine.root(), &perception_with_enemy(5.0));

        // Still too close: stays in flee
        assert_eq!(machine.advance(flee_node, &perception_with_enemy(10.0)), flee_node);
        // Clear of the threat: back to grazing
        let calmed = machine.advance(flee_node, &perception_with_enemy(25.0));
        assert_eq!(machine.node(calmed).name, "graze");
    }

    #[test]
    fn hurt_lion_retreats_before_hunting() {
        let machine = lion_machine();
        let perception = Perception {
            health: 2.0,
            nearest_enemy: Some((vec3(5.0, 0.0, 0.0), 5.0)),
            ..Perception::default()
        };
        let next = machine.advance(machine.root(), &perception);
        assert_eq!(machine.node(next).name, "retreat");
    }

    #[test]
    fn dead_sink_has_no_way_out() {
        for machine in [antelope_machine(), lion_machine()] {
            let dead = machine.dead();
            assert!(machine.node(dead).transitions.is_empty());
            assert_eq!(machine.node(dead).action, Action::Idle);
            assert_eq!(machine.advance(dead, &perception_with_enemy(0.5)), dead);
        }
    }

    #[test]
    fn seek_does_not_overshoot_the_target() {
        let position = vec3(0.0, 0.0, 0.1);
        let target = vec3(0.5, 0.0, 0.1);
        let moved = seek(position, target, 10.0, 1.0);
        assert!((moved.x - 0.5).abs() < 1e-6);
        assert_eq!(moved.y, 0.0);
        // z is a render-depth offset and never changes
        assert_eq!(moved.z, 0.1);
    }

    #[test]
    fn flee_moves_directly_away_from_the_threat() {
        let position = vec3(1.0, 1.0, 0.1);
        let threat = vec3(0.0, 0.0, 0.1);
        let moved = flee(position, threat, 2.0, 0.5);
        assert!(moved.x > position.x);
        assert!(moved.y > position.y);
        let step = vec2(moved.x - position.x, moved.y - position.y).length();
        assert!((step - 1.0).abs() < 1e-5);
    }

    #[test]
    fn actions_with_unresolved_targets_do_nothing() {
        let position = vec3(3.0, 4.0, 0.1);
        let action = Action::Flee {
            target: Target::NearestEnemy,
            speed: 7.0,
        };
        let moved = apply_action(position, &action, &Perception::default(), 1.0);
        assert_eq!(moved, position);
    }
}
