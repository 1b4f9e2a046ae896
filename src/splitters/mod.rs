//! Dummy-arc insertion shared by the nested-set and overlap splitters
//! (§4.7, §4.8).
//!
//! Both splitters find a common predecessor subset `S` shared by several
//! activities and factor it through one new dummy activity. The three
//! moving parts — computing the full closure of `S`, rewriting an existing
//! activity's minimal/full predecessor sets to point at the dummy, and
//! materializing the dummy itself — are identical between the two callers,
//! so they live here.

pub mod nested;
pub mod overlap;

use crate::arena::Arena;
use crate::list::{BitMatrix, FixedList};
use crate::types::FAKE;

/// Computes the transitive closure of a seed predecessor set `members`,
/// reading each member's already-closed `full_dep` entry. Returns the full
/// set (seeds plus everything reachable from them) and a flat membership
/// map over `0..n_max`.
pub fn closure_of(
    arena: &Arena,
    full_dep: &[FixedList<u16>],
    members: &[u16],
) -> (Vec<u16>, Vec<bool>) {
    let n_max = arena.n_max();
    let mut map = vec![false; n_max];
    let mut deps: Vec<u16> = Vec::with_capacity(n_max);
    for &d in members {
        if !map[d as usize] {
            map[d as usize] = true;
            deps.push(d);
        }
    }
    let mut cursor = 0usize;
    while cursor < deps.len() {
        let j = deps[cursor] as usize;
        cursor += 1;
        for &d in full_dep[j].as_slice() {
            if !map[d as usize] {
                map[d as usize] = true;
                deps.push(d);
            }
        }
    }
    (deps, map)
}

/// Rewrites `target`'s predecessor sets so that the common subset `common`
/// is replaced by a single dependency on the dummy at position `dummy`:
/// `full_dep[target]` gains `dummy`, and `min_dep[target]` drops every
/// member of `common` in favor of `dummy`.
pub fn handle_deps(
    n_max: usize,
    target: usize,
    common: &[u16],
    dummy: u16,
    min_dep: &mut [FixedList<u16>],
    min_map: &mut BitMatrix,
    full_dep: &mut [FixedList<u16>],
    full_map: &mut BitMatrix,
) {
    full_map.set(target, dummy as usize, true);
    full_dep[target].push(dummy);

    for &d in common {
        min_map.set(target, d as usize, false);
    }
    min_map.set(target, dummy as usize, true);

    min_dep[target].clear();
    for j in 0..n_max {
        if min_map.get(target, j) {
            min_dep[target].push(j as u16);
        }
    }
}

/// Materializes a new dummy activity at position `n_cur`: `act_id` gets a
/// `FAKE` entry, `act_pos` records its position, and its minimal/full
/// predecessor sets are set to `common`/`closure` respectively.
pub fn add_a_dummy(
    n_max: usize,
    common: &[u16],
    closure: &[u16],
    closure_map: &[bool],
    n_cur: usize,
    act_id: &mut FixedList<u16>,
    act_pos: &mut FixedList<u16>,
    min_dep: &mut [FixedList<u16>],
    min_map: &mut BitMatrix,
    full_dep: &mut [FixedList<u16>],
    full_map: &mut BitMatrix,
) {
    act_id.push(FAKE);
    act_pos.push(n_cur as u16);

    min_dep[n_cur].clear();
    for &d in common {
        min_dep[n_cur].push(d);
        min_map.set(n_cur, d as usize, true);
    }

    full_dep[n_cur].clear();
    for &d in closure {
        full_dep[n_cur].push(d);
    }
    for j in 0..n_max {
        full_map.set(n_cur, j, closure_map[j]);
    }
}
