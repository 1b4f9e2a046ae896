//! Event glue stages 1 and 2 (§4.10, §4.11).
//!
//! Both stages rewrite the `events` redirect table in place and then
//! re-apply it to every surviving activity's endpoints via [`apply_glue`].
//! Deleting a dummy is modeled the same way the reference engine does it:
//! both its `act_src` and `act_dst` are set to [`FAKE`], which every later
//! stage already treats as "this arc is gone".

use crate::list::FixedList;
use crate::types::FAKE;

/// Rewrites every surviving activity's `act_src`/`act_dst` through
/// `events[event - 1]`, turning the redirect table built by a glue stage
/// into canonical event numbers.
pub fn apply_glue(n_cur: usize, act_src: &mut [u16], act_dst: &mut [u16], events: &FixedList<u16>) {
    for k in 0..n_cur {
        if act_src[k] == FAKE || act_dst[k] == FAKE {
            continue;
        }
        let src_evt = (act_src[k] - 1) as usize;
        let dst_evt = (act_dst[k] - 1) as usize;
        act_src[k] = events.get(src_evt);
        act_dst[k] = events.get(dst_evt);
    }
}

/// §4.10: merges events whose only inputs are dummies with an identical
/// predecessor-event set, and collapses events with exactly one dummy
/// input into that dummy's source event.
pub fn stage_1(
    n_cur: usize,
    act_id: &FixedList<u16>,
    act_src: &mut [u16],
    act_dst: &mut [u16],
    events: &mut FixedList<u16>,
) {
    let num_events = events.len();

    // evt_dins[e]: positions of dummy activities whose destination is event e.
    // evt_deps[e]: source events of those dummies.
    let mut evt_dins: Vec<Vec<u16>> = vec![Vec::new(); num_events];
    let mut evt_deps: Vec<Vec<u16>> = vec![Vec::new(); num_events];
    let mut evt_dep_set: Vec<Vec<bool>> = vec![vec![false; num_events]; num_events];
    let mut evt_real = vec![false; num_events];

    for k in 0..n_cur {
        if act_src[k] == FAKE || act_dst[k] == FAKE {
            continue;
        }
        let src_evt = (act_src[k] - 1) as usize;
        let dst_evt = (act_dst[k] - 1) as usize;

        if act_id.get(k) != FAKE {
            evt_real[dst_evt] = true;
            continue;
        }

        evt_dins[dst_evt].push(k as u16);
        evt_deps[dst_evt].push(src_evt as u16);
        evt_dep_set[dst_evt][src_evt] = true;
    }

    for i in 0..num_events {
        if evt_real[i] || evt_deps[i].is_empty() {
            continue;
        }
        for j in i + 1..num_events {
            if evt_real[j] {
                continue;
            }
            if evt_deps[i].len() < 2 {
                continue;
            }
            if evt_deps[i].len() != evt_deps[j].len() {
                continue;
            }
            let match_count = evt_deps[i].iter().filter(|&&d| evt_dep_set[j][d as usize]).count();
            if match_count == evt_deps[i].len() {
                events.set(j, events.get(i));
                for &dummy in &evt_dins[j] {
                    act_src[dummy as usize] = FAKE;
                    act_dst[dummy as usize] = FAKE;
                }
            }
        }
    }

    for i in 0..num_events {
        if evt_real[i] {
            continue;
        }
        if evt_deps[i].len() == 1 {
            let dummy = evt_dins[i][0] as usize;
            events.set(i, act_src[dummy]);
            act_src[dummy] = FAKE;
            act_dst[dummy] = FAKE;
        }
    }

    apply_glue(n_cur, act_src, act_dst, events);
}

/// §4.11: collapses events whose only outgoing activity is a dummy into
/// that dummy's destination event.
pub fn stage_2(
    n_cur: usize,
    act_id: &FixedList<u16>,
    act_src: &mut [u16],
    act_dst: &mut [u16],
    events: &mut FixedList<u16>,
) {
    let num_events = events.len();

    let mut evt_douts: Vec<Vec<u16>> = vec![Vec::new(); num_events];
    let mut evt_nout = vec![0u16; num_events];

    for k in 0..n_cur {
        if act_src[k] == FAKE || act_dst[k] == FAKE {
            continue;
        }
        let src_evt = (act_src[k] - 1) as usize;
        evt_nout[src_evt] += 1;
        if act_id.get(k) == FAKE {
            evt_douts[src_evt].push(k as u16);
        }
    }

    for i in 0..num_events {
        if evt_nout[i] > 1 || evt_douts[i].is_empty() {
            continue;
        }
        let dummy = evt_douts[i][0] as usize;
        events.set(i, act_dst[dummy]);
        act_src[dummy] = FAKE;
        act_dst[dummy] = FAKE;
    }

    apply_glue(n_cur, act_src, act_dst, events);
}
