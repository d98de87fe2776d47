//! Plain software BFS over an edge list, used to cross-check the engine.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};

use crate::errors::EngineError;

/// Hop count of the shortest non-empty path `start -> end`, or `None`.
///
/// A path must use at least one edge, so `start == end` is only reachable
/// through a cycle back to `start`.
pub fn shortest_hops(
    num_entries: usize,
    edges: &[(usize, usize)],
    start: usize,
    end: usize,
) -> Result<Option<u64>, EngineError> {
    check(num_entries, start)?;
    check(num_entries, end)?;
    let mut outgoing: AHashMap<usize, Vec<usize>> = AHashMap::new();
    for &(from, to) in edges {
        check(num_entries, from)?;
        check(num_entries, to)?;
        outgoing.entry(from).or_default().push(to);
    }
    let mut queue = VecDeque::new();
    let mut seen = AHashSet::new();
    queue.push_back((start, 0u64));
    seen.insert(start);
    while let Some((node, depth)) = queue.pop_front() {
        let Some(nexts) = outgoing.get(&node) else {
            continue;
        };
        for &next in nexts {
            if next == end {
                return Ok(Some(depth + 1));
            }
            if seen.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }
    Ok(None)
}

/// Every node reachable from `start` with its hop count, in BFS order.
pub fn levels_from(
    num_entries: usize,
    edges: &[(usize, usize)],
    start: usize,
) -> Result<Vec<(usize, u64)>, EngineError> {
    check(num_entries, start)?;
    let mut outgoing: AHashMap<usize, Vec<usize>> = AHashMap::new();
    for &(from, to) in edges {
        check(num_entries, from)?;
        check(num_entries, to)?;
        outgoing.entry(from).or_default().push(to);
    }
    let mut visited = Vec::new();
    let mut seen = AHashSet::new();
    let mut queue = VecDeque::new();
    queue.push_back((start, 0u64));
    seen.insert(start);
    while let Some((node, depth)) = queue.pop_front() {
        visited.push((node, depth));
        for &next in outgoing.get(&node).into_iter().flatten() {
            if seen.insert(next) {
                queue.push_back((next, depth + 1));
            }
        }
    }
    Ok(visited)
}

fn check(num_entries: usize, node: usize) -> Result<(), EngineError> {
    if node >= num_entries {
        return Err(EngineError::NodeOutOfRange { node, num_entries });
    }
    Ok(())
}
