/*
 * Spatial Pass Module
 *
 * This module implements the per-tick pre-update pass over both agent
 * pools. For every active agent it determines whether it dies this tick,
 * its nearest living friend and enemy, and how many friends stand within
 * the friend radius, and it resolves near-zero-distance overlaps between
 * same-team agents with a small symmetric nudge.
 *
 * Precomputing these attributes once per tick keeps the state machine
 * guards from re-scanning every agent per predicate: the pass is O(n²) but
 * amortized across all guard evaluations that tick.
 */

use nannou::prelude::*;

use crate::agent::{Agent, AgentRef};
use crate::behavior::NodeId;
use crate::{ATTACK_RADIUS, FRIEND_RADIUS, OVERLAP_RADIUS};

// Fixed vector used to push overlapping same-team agents apart. The nudge
// is a soft correction applied with opposite sign to each side; repeated
// overlaps resolve gradually over several ticks.
pub fn anti_overlap_nudge() -> Vec3 {
    vec3(0.5, 0.5, 0.0)
}

// Run the full pre-update contract for one tick:
// 1. death check over both pools (before any distance work)
// 2. full spatial-attribute reset for every agent
// 3. antelope pairwise pass (friend count, overlap nudge, nearest friend)
// 4. antelope x lion pass (combat, nearest enemy for both sides)
// 5. lion pairwise pass (friend count and nearest friend only)
pub fn pre_update(
    lions: &mut [Agent],
    antelopes: &mut [Agent],
    lion_sink: NodeId,
    antelope_sink: NodeId,
    dt: f32,
) {
    death_and_reset(antelopes, antelope_sink);
    death_and_reset(lions, lion_sink);

    same_team_pass(antelopes, dt, true);
    cross_team_pass(antelopes, lions, dt);
    same_team_pass(lions, dt, false);
}

// Kill agents whose health ran out during the previous tick, then drop all
// spatial scratch data so the pass never sees stale cross-tick references.
// Dying happens here, before any distance comparison, so dead agents are
// excluded from the rest of the pass.
fn death_and_reset(pool: &mut [Agent], sink: NodeId) {
    for agent in pool.iter_mut() {
        if agent.active && agent.health <= 0.0 {
            agent.die(sink);
        }
        agent.spatial.clear();
    }
}

// Pairwise pass over one team: every unordered pair of active agents is
// visited once (i < j) with effects applied symmetrically to both sides.
// Antelopes additionally receive the anti-overlap nudge.
fn same_team_pass(pool: &mut [Agent], dt: f32, separate_overlaps: bool) {
    for i in 0..pool.len() {
        if !pool[i].active {
            continue;
        }

        for j in (i + 1)..pool.len() {
            if !pool[j].active {
                continue;
            }

            // Re-read both positions: the overlap nudge below may have moved
            // either agent earlier in this pass
            let position_a = pool[i].position;
            let position_b = pool[j].position;
            let distance = position_a.distance(position_b);

            if distance < FRIEND_RADIUS {
                pool[i].spatial.friends_next_to_me += 1;
                pool[j].spatial.friends_next_to_me += 1;
            }

            if separate_overlaps && distance < OVERLAP_RADIUS {
                let nudge = anti_overlap_nudge() * dt;
                pool[j].position = position_b + nudge;
                pool[i].position = position_a - nudge;
            }

            track_nearest_friend(pool, i, j, distance);
            track_nearest_friend(pool, j, i, distance);
        }
    }
}

// One-directional sweep of every active antelope against every active lion:
// mutual damage inside attack range and nearest-enemy tracking for both
// sides in the same pairing.
fn cross_team_pass(antelopes: &mut [Agent], lions: &mut [Agent], dt: f32) {
    for i in 0..antelopes.len() {
        if !antelopes[i].active {
            continue;
        }

        for j in 0..lions.len() {
            if !lions[j].active {
                continue;
            }

            let distance = antelopes[i].position.distance(lions[j].position);

            if distance < ATTACK_RADIUS {
                // Each side damages the other simultaneously based on its
                // own dps; lethal damage kills at the next tick's check
                let lion_dps = lions[j].dps;
                let antelope_dps = antelopes[i].dps;
                antelopes[i].hit(lion_dps * dt);
                lions[j].hit(antelope_dps * dt);
            }

            track_nearest_enemy(antelopes, i, lions, j, distance);
            track_nearest_enemy(lions, j, antelopes, i, distance);
        }
    }
}

// Replace agent a's tracked nearest friend with candidate b when the
// candidate is closer or the tracked agent has gone inactive this tick.
// When the candidate loses, the tracked value is written back unchanged;
// the original update rule is written this way in both directions and the
// no-op is kept deliberately.
fn track_nearest_friend(pool: &mut [Agent], a: usize, b: usize, distance: f32) {
    let candidate = AgentRef {
        team: pool[b].team,
        index: b,
    };

    match pool[a].spatial.nearest_friend {
        Some(tracked) => {
            let tracked_distance = pool[a].position.distance(pool[tracked.index].position);
            if distance < tracked_distance || !pool[tracked.index].active {
                pool[a].spatial.nearest_friend = Some(candidate);
            } else {
                pool[a].spatial.nearest_friend = Some(tracked);
            }
        }
        None => pool[a].spatial.nearest_friend = Some(candidate),
    }
}

// Same replacement rule as track_nearest_friend, with the tracked reference
// resolving into the opposing pool.
fn track_nearest_enemy(
    pool: &mut [Agent],
    a: usize,
    enemies: &[Agent],
    enemy_index: usize,
    distance: f32,
) {
    let candidate = AgentRef {
        team: enemies[enemy_index].team,
        index: enemy_index,
    };

    match pool[a].spatial.nearest_enemy {
        Some(tracked) => {
            let tracked_distance = pool[a].position.distance(enemies[tracked.index].position);
            if distance < tracked_distance || !enemies[tracked.index].active {
                pool[a].spatial.nearest_enemy = Some(candidate);
            } else {
                pool[a].spatial.nearest_enemy = Some(tracked);
            }
        }
        None => pool[a].spatial.nearest_enemy = Some(candidate),
    }
}
