//! Finalizer (§4.13): dense event renumbering and emission of the public
//! [`AoaResult`](crate::types::AoaResult).

use crate::list::FixedList;
use crate::sort::stable_sort_by_key;
use crate::types::{AoaResult, FAKE};

/// Renumbers `events` densely (an entry equal to its own 1-based index
/// survives; anything else was already redirected by a glue stage and is
/// dropped), rewrites every surviving activity's endpoints through it, then
/// emits the result sorted by activity id with dummies and collapsed
/// activities omitted.
pub fn finalize(
    n_cur: usize,
    act_id: &FixedList<u16>,
    act_pos: &FixedList<u16>,
    act_src: &[u16],
    act_dst: &[u16],
    events: &mut FixedList<u16>,
) -> AoaResult {
    let num_events = events.len();
    let mut evt = 1u16;
    for i in 0..num_events {
        if events.get(i) != (i + 1) as u16 {
            events.set(i, FAKE);
        } else {
            events.set(i, evt);
            evt += 1;
        }
    }

    let mut final_src = vec![0u16; n_cur];
    let mut final_dst = vec![0u16; n_cur];
    for i in 0..n_cur {
        if act_src[i] == FAKE || act_dst[i] == FAKE {
            continue;
        }
        let src_evt = (act_src[i] - 1) as usize;
        let dst_evt = (act_dst[i] - 1) as usize;
        if events.get(src_evt) == FAKE || events.get(dst_evt) == FAKE {
            continue;
        }
        final_src[i] = events.get(src_evt);
        final_dst[i] = events.get(dst_evt);
    }

    let mut order: Vec<u16> = act_pos.as_slice()[..n_cur].to_vec();
    let ids: Vec<u16> = (0..n_cur).map(|i| act_id.get(i)).collect();
    stable_sort_by_key(&mut order, &ids);

    let mut out = AoaResult::default();
    for &p in &order {
        let i = p as usize;
        if act_id.get(i) == FAKE || final_src[i] == FAKE || final_dst[i] == FAKE {
            continue;
        }
        out.act_id.push(act_id.get(i));
        out.act_src.push(final_src[i]);
        out.act_dst.push(final_dst[i]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::Arena;

    #[test]
    fn chain_emits_sorted_by_id_with_no_dummies() {
        let arena = Arena::new(8).unwrap();
        let mut act_id = arena.list_u16();
        act_id.push(3);
        act_id.push(1);
        act_id.push(2);
        let mut act_pos = arena.list_u16();
        act_pos.push(0);
        act_pos.push(1);
        act_pos.push(2);
        let act_src = vec![3u16, 1, 2];
        let act_dst = vec![4u16, 2, 3];
        let mut events = arena.list_u16_cap(8);
        events.push(1);
        events.push(2);
        events.push(3);
        events.push(4);

        let out = finalize(3, &act_id, &act_pos, &act_src, &act_dst, &mut events);
        assert_eq!(out.act_id, vec![1, 2, 3]);
        assert_eq!(out.act_src, vec![1, 2, 3]);
        assert_eq!(out.act_dst, vec![2, 3, 4]);
    }

    #[test]
    fn collapsed_events_drop_their_activities() {
        let arena = Arena::new(8).unwrap();
        let mut act_id = arena.list_u16();
        act_id.push(1);
        let mut act_pos = arena.list_u16();
        act_pos.push(0);
        let act_src = vec![1u16];
        let act_dst = vec![2u16];
        let mut events = arena.list_u16_cap(8);
        // Event 2 was redirected elsewhere by a glue stage, so it is not
        // its own 1-based index and collapses to FAKE.
        events.push(1);
        events.push(5);

        let out = finalize(1, &act_id, &act_pos, &act_src, &act_dst, &mut events);
        assert!(out.act_id.is_empty());
    }
}
