//! Breadth-first reference solver.
//!
//! Uninformed and exhaustive: the distance it returns is the true optimum,
//! which the runner uses to check A* optimality.

use std::collections::{HashMap, HashSet, VecDeque};

use lodestar_search::contract::SearchWorld;

/// Shortest number of moves from `start` to `goal`, or `None` if the goal is
/// unreachable. Explores the whole reachable component in the worst case.
#[must_use]
pub fn bfs_distance<W: SearchWorld>(world: &W, start: &W::State, goal: &W::State) -> Option<u32> {
    if start == goal {
        return Some(0);
    }
    let mut distance: HashMap<W::State, u32> = HashMap::from([(start.clone(), 0)]);
    let mut queue: VecDeque<W::State> = VecDeque::from([start.clone()]);
    while let Some(state) = queue.pop_front() {
        let next_distance = distance[&state] + 1;
        for next in world.successors(&state) {
            if distance.contains_key(&next) {
                continue;
            }
            if &next == goal {
                return Some(next_distance);
            }
            distance.insert(next.clone(), next_distance);
            queue.push_back(next);
        }
    }
    None
}

/// Number of states reachable from `start`, `start` included.
#[must_use]
pub fn reachable_count<W: SearchWorld>(world: &W, start: &W::State) -> usize {
    let mut seen: HashSet<W::State> = HashSet::from([start.clone()]);
    let mut queue: VecDeque<W::State> = VecDeque::from([start.clone()]);
    while let Some(state) = queue.pop_front() {
        for next in world.successors(&state) {
            if seen.insert(next.clone()) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}
