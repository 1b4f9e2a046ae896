//! Parallel-arc resolver (§4.12).
//!
//! After the two glue stages, two surviving real activities can still end
//! up sharing both endpoints (the diamond scenario in §8). A stable sort
//! of `act_pos` by `(dst, src)` brings any such pair adjacent; for each
//! adjacent pair found this mints a fresh event and a dummy arc so that
//! `(src, dst)` uniquely identifies an arc afterward.
//!
//! The reference engine makes one pass over the adjacency produced by the
//! sort, reusing a `to_do`/`started` flag so an activity demoted to a fresh
//! destination is not rechecked against a third parallel sibling in the
//! same pass (documented as a known limitation in DESIGN.md's Open
//! Question resolution — this crate matches it rather than iterating to a
//! fixed point).

use crate::list::FixedList;
use crate::sort::stable_sort_by_key;
use crate::types::FAKE;

/// Scans `act_pos[0..n_cur)` for adjacent surviving activities sharing both
/// endpoints and splits each pair found with a fresh event and dummy arc.
/// `n_cur`/`act_id`/`act_pos`/`act_src`/`act_dst`/`events` are extended in
/// place.
pub fn resolve(
    n_cur: &mut usize,
    act_id: &mut FixedList<u16>,
    act_pos: &mut FixedList<u16>,
    act_src: &mut Vec<u16>,
    act_dst: &mut Vec<u16>,
    events: &mut FixedList<u16>,
) {
    let d = *n_cur;
    let mut evt = events.get(events.len() - 1);

    let mut done = vec![true; d];

    let mut pos: Vec<u16> = act_pos.as_slice().to_vec();
    let mut sort_vals: Vec<u16> = pos.iter().map(|&p| act_dst[p as usize]).collect();
    stable_sort_by_key(&mut pos, &sort_vals);
    sort_vals = pos.iter().map(|&p| act_src[p as usize]).collect();
    stable_sort_by_key(&mut pos, &sort_vals);
    for (slot, &p) in pos.iter().enumerate() {
        act_pos.set(slot, p);
    }

    for i in 0..d {
        let act_i = act_pos.get(i) as usize;
        if act_src[act_i] == FAKE || act_dst[act_i] == FAKE {
            continue;
        }
        if !done[act_i] {
            continue;
        }

        for j in i + 1..d {
            let act_j = act_pos.get(j) as usize;
            if act_src[act_j] == FAKE || act_dst[act_j] == FAKE {
                continue;
            }
            if act_dst[act_i] == act_dst[act_j] && act_src[act_i] == act_src[act_j] {
                done[act_j] = false;

                evt += 1;
                act_dst[act_j] = evt;

                act_pos.push(*n_cur as u16);
                act_id.push(FAKE);
                act_src.push(evt);
                act_dst.push(act_dst[act_i]);
                done.push(false);

                events.push(evt);
                *n_cur += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    #[test]
    fn shared_endpoints_are_split_with_a_dummy() {
        // Two real activities both running from event 1 to event 2.
        let arena = Arena::new(8).unwrap();
        let mut act_id = arena.list_u16();
        act_id.push(1);
        act_id.push(2);
        let mut act_pos = arena.list_u16();
        act_pos.push(0);
        act_pos.push(1);
        let mut act_src = vec![1u16, 1];
        let mut act_dst = vec![2u16, 2];
        let mut events = arena.list_u16_cap(8);
        events.push(1);
        events.push(2);

        let mut n_cur = 2usize;
        resolve(&mut n_cur, &mut act_id, &mut act_pos, &mut act_src, &mut act_dst, &mut events);

        assert_eq!(n_cur, 3, "exactly one dummy should be inserted");
        assert_eq!(act_id.get(2), FAKE);
        // One of the two reals now ends at the freshly minted event, which
        // the dummy carries on to the original shared destination.
        let split = if act_dst[0] != act_dst[1] { 1 } else { 0 };
        let kept = 1 - split;
        assert_eq!(act_dst[kept], 2);
        assert_eq!(act_src[2], act_dst[split]);
        assert_eq!(act_dst[2], 2);
    }

    #[test]
    fn distinct_endpoints_are_left_alone() {
        let arena = Arena::new(8).unwrap();
        let mut act_id = arena.list_u16();
        act_id.push(1);
        act_id.push(2);
        let mut act_pos = arena.list_u16();
        act_pos.push(0);
        act_pos.push(1);
        let mut act_src = vec![1u16, 2];
        let mut act_dst = vec![2u16, 3];
        let mut events = arena.list_u16_cap(8);
        events.push(1);
        events.push(2);
        events.push(3);

        let mut n_cur = 2usize;
        resolve(&mut n_cur, &mut act_id, &mut act_pos, &mut act_src, &mut act_dst, &mut events);

        assert_eq!(n_cur, 2);
    }
}
