//! Overlap splitter (§4.8): for activities whose minimal predecessor sets
//! share a non-trivial subset without one nesting inside the other, factors
//! the shared part through a new dummy activity.

use super::{add_a_dummy, closure_of, handle_deps};
use crate::arena::Arena;
use crate::list::{BitMatrix, FixedList};

/// Scans `act_pos[0..n_last]` (where `n_last` is `n_cur` at the start of the
/// pass) for overlapping-but-not-nested minimal predecessor sets, inserting
/// a dummy for each group found. `n_last` is re-snapshotted after each
/// group is processed so newly inserted dummies are not rescanned within
/// the same pass — they can still be picked up by a later call.
#[allow(clippy::too_many_arguments)]
pub fn process(
    arena: &Arena,
    act_id: &mut FixedList<u16>,
    act_pos: &mut FixedList<u16>,
    min_dep: &mut [FixedList<u16>],
    min_map: &mut BitMatrix,
    full_dep: &mut [FixedList<u16>],
    full_map: &mut BitMatrix,
    n_cur: &mut usize,
) {
    let n_max = arena.n_max();
    let mut n_last = *n_cur;

    let mut p = 0usize;
    while p < n_last {
        let i = act_pos[p] as usize;
        if min_dep[i].is_empty() {
            p += 1;
            continue;
        }

        let mut common: Vec<u16> = Vec::new();
        let mut overlapping = false;
        for q in 0..n_last {
            let j = act_pos[q] as usize;
            if min_dep[j].is_empty() {
                continue;
            }

            let candidate: Vec<u16> = min_dep[i]
                .as_slice()
                .iter()
                .copied()
                .filter(|&d| min_map.get(j, d as usize))
                .collect();

            let lmcd = candidate.len();
            let len_i = min_dep[i].len();
            let len_j = min_dep[j].len();

            if lmcd > 0 && len_i != lmcd && len_j != lmcd {
                common = candidate;
                overlapping = true;
                break;
            }
        }

        if !overlapping {
            p += 1;
            continue;
        }

        let (closure, closure_map) = closure_of(arena, full_dep, &common);
        let lmcd = common.len();

        for q in 0..n_last {
            let j = act_pos[q] as usize;
            if min_dep[j].is_empty() {
                continue;
            }
            let com_count = common
                .iter()
                .filter(|&&d| min_map.get(j, d as usize))
                .count();
            if com_count == lmcd && min_dep[j].len() != lmcd {
                let dummy = *n_cur;
                handle_deps(n_max, j, &common, dummy as u16, min_dep, min_map, full_dep, full_map);
                add_a_dummy(
                    n_max, &common, &closure, &closure_map, dummy, act_id, act_pos, min_dep,
                    min_map, full_dep, full_map,
                );
                *n_cur += 1;
            }
        }

        n_last = *n_cur;
        p += 1;
    }
}
