//! Nested-set splitter (§4.7): finds pairs of activities whose minimal
//! predecessor sets nest strictly inside one another and factors the
//! smaller (common) set through a new dummy activity.

use super::{add_a_dummy, closure_of, handle_deps};
use crate::arena::Arena;
use crate::list::{BitMatrix, FixedList};

/// Scans `act_pos[0..n_act]` for nested minimal-predecessor pairs and
/// inserts a dummy for every activity that contains the common subset
/// found for each nesting activity. `n_cur` is the next free position and
/// is advanced by one per dummy inserted.
#[allow(clippy::too_many_arguments)]
pub fn process(
    arena: &Arena,
    n_act: usize,
    act_id: &mut FixedList<u16>,
    act_pos: &mut FixedList<u16>,
    min_dep: &mut [FixedList<u16>],
    min_map: &mut BitMatrix,
    full_dep: &mut [FixedList<u16>],
    full_map: &mut BitMatrix,
    n_cur: &mut usize,
) {
    let n_max = arena.n_max();

    for p in 0..n_act {
        let i = act_pos[p] as usize;
        if min_dep[i].is_empty() {
            continue;
        }

        let mut common: Vec<u16> = Vec::new();
        let mut nested = false;
        for q in p + 1..n_act {
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

            let lcd = candidate.len();
            let len_i = min_dep[i].len();
            let len_j = min_dep[j].len();

            if (len_i == lcd || len_j == lcd) && len_i != len_j && lcd > 0 {
                common = candidate;
                nested = true;
                break;
            }
        }

        if !nested {
            continue;
        }

        let (closure, closure_map) = closure_of(arena, full_dep, &common);
        let lmcd = common.len();

        for q in p + 1..n_act {
            let j = act_pos[q] as usize;
            let len_j = min_dep[j].len();
            if len_j == 0 || len_j == lmcd {
                continue;
            }
            let com_count = common
                .iter()
                .filter(|&&d| min_map.get(j, d as usize))
                .count();
            if com_count != lmcd {
                continue;
            }

            let dummy = *n_cur;
            handle_deps(n_max, j, &common, dummy as u16, min_dep, min_map, full_dep, full_map);
            add_a_dummy(
                n_max, &common, &closure, &closure_map, dummy, act_id, act_pos, min_dep, min_map,
                full_dep, full_map,
            );
            *n_cur += 1;
        }
    }
}
