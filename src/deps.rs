//! Dependency extraction, transitive closure, and Hasse (transitive
//! reduction) minimization — §4.4, §4.5, §4.6.
//!
//! These three stages turn the normalized precedence links into the two
//! predecessor representations every later stage reads: `full_dep`/`full_map`
//! (the complete transitive closure — also the byproduct the CLI's `deps`
//! subcommand reports, per the `ccpm_make_full_map` Open Question in
//! DESIGN.md) and `min_dep`/`min_map` (the Hasse cover, i.e. the transitive
//! reduction).

use crate::arena::Arena;
use crate::list::{BitMatrix, FixedList};
use crate::sort::stable_sort_by_key;
use crate::types::AoaError;

/// The two predecessor representations plus the traversal order used by
/// later stages (ascending by full-closure size, i.e. a valid topological
/// order of the DAG).
pub struct Dependencies {
    pub full_dep: Vec<FixedList<u16>>,
    pub full_map: BitMatrix,
    pub min_dep: Vec<FixedList<u16>>,
    pub min_map: BitMatrix,
    pub order: FixedList<u16>,
}

/// §4.4: populate `full_dep`/`full_map` with *immediate* predecessors only,
/// from the normalized `(src, dst)` links.
pub fn extract_immediate(
    arena: &Arena,
    links: &[(u16, u16)],
) -> Result<(Vec<FixedList<u16>>, BitMatrix), AoaError> {
    let n_max = arena.n_max();
    let mut dep = arena.list_table_u16();
    let mut map = arena.bit_matrix();
    for &(s, d) in links {
        let (s, d) = (s as usize, d as usize);
        if s >= n_max || d >= n_max {
            return Err(AoaError::Invalid("link endpoint position out of range".into()));
        }
        if !map.get(d, s) {
            map.set(d, s, true);
            dep[d].push(s as u16);
        }
    }
    Ok((dep, map))
}

/// §4.5: extend `full_dep`/`full_map` in place so that they hold the
/// complete transitive closure of the immediate-predecessor relation built
/// by [`extract_immediate`].
///
/// The reference engine performs a single linear pass over activity
/// positions `0..n_act`, reusing whatever each predecessor's (possibly still
/// partial) `full_dep` list contains at the time it is visited. That is only
/// a correct fixed point if activity positions already happen to be in
/// topological order; since §3 states transitive closure as a hard
/// invariant regardless of how the caller orders or numbers activities, this
/// implementation instead runs an independent worklist expansion per
/// activity over a frozen snapshot of the immediate-adjacency lists, which
/// reaches the true fixed point for any DAG ordering (see DESIGN.md).
pub fn build_closure(
    n_act: usize,
    full_dep: &mut [FixedList<u16>],
    full_map: &mut BitMatrix,
) -> Result<(), AoaError> {
    let immediate: Vec<Vec<u16>> = full_dep[..n_act]
        .iter()
        .map(|l| l.as_slice().to_vec())
        .collect();

    for i in 0..n_act {
        let mut cursor = 0usize;
        while cursor < full_dep[i].len() {
            let k = full_dep[i].get(cursor) as usize;
            cursor += 1;
            for &m in &immediate[k] {
                if !full_map.get(i, m as usize) {
                    if i == m as usize {
                        return Err(AoaError::Loop);
                    }
                    full_map.set(i, m as usize, true);
                    full_dep[i].push(m);
                }
            }
        }
    }
    Ok(())
}

/// §4.6: build the minimal (Hasse) predecessor sets from a completed
/// transitive closure, plus the traversal order (ascending by closure size)
/// used to drive the reduction and reused by later stages as a topological
/// visiting order.
pub fn reduce(
    arena: &Arena,
    n_act: usize,
    full_dep: &[FixedList<u16>],
    full_map: &BitMatrix,
) -> (Vec<FixedList<u16>>, BitMatrix, FixedList<u16>) {
    let mut order_vec: Vec<u16> = (0..n_act as u16).collect();
    let sizes: Vec<u16> = (0..n_act).map(|i| full_dep[i].len() as u16).collect();
    stable_sort_by_key(&mut order_vec, &sizes);

    let mut min_map = full_map.clone();
    let mut min_dep: Vec<FixedList<u16>> = full_dep.to_vec();

    // Reverse order: largest closure first, so that when activity i is
    // processed every predecessor k it might reduce through already has its
    // final (closure) full_dep contents — closure never changes after §4.5,
    // so this is really about visiting order being immaterial to
    // *correctness* here, only to matching the reference engine's pass
    // direction for determinism parity.
    for &ipos in order_vec.iter().rev() {
        let i = ipos as usize;
        let members: Vec<u16> = full_dep[i].as_slice().to_vec();
        for &j in &members {
            for &k in &members {
                if k == j {
                    continue;
                }
                if full_map.get(k as usize, j as usize) {
                    min_map.set(i, j as usize, false);
                }
            }
        }
    }

    for i in 0..n_act {
        min_dep[i].clear();
        for j in 0..n_act {
            if min_map.get(i, j) {
                min_dep[i].push(j as u16);
            }
        }
    }

    let mut order = arena.list_u16();
    for &p in &order_vec {
        order.push(p);
    }

    (min_dep, min_map, order)
}

/// Computes `Dependencies` end to end: extraction, closure, reduction.
pub fn build(arena: &Arena, n_act: usize, links: &[(u16, u16)]) -> Result<Dependencies, AoaError> {
    let (mut full_dep, mut full_map) = extract_immediate(arena, links)?;
    build_closure(n_act, &mut full_dep, &mut full_map)?;
    let (min_dep, min_map, order) = reduce(arena, n_act, &full_dep, &full_map);
    Ok(Dependencies {
        full_dep,
        full_map,
        min_dep,
        min_map,
        order,
    })
}
