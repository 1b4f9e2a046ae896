//! Network builder (§4.9): the topological sweep that assigns every
//! activity (real and dummy) a source and destination event.

use crate::arena::Arena;
use crate::list::{BitMatrix, FixedList};
use crate::types::FAKE;

pub struct Network {
    pub act_src: Vec<u16>,
    pub act_dst: Vec<u16>,
    pub events: FixedList<u16>,
}

/// Runs the sweep over the `n_cur` activities named by `act_pos` (real
/// activities plus every dummy the splitters inserted), reading precedence
/// from `min_dep`/`min_map`. Appends any dummy the sweep itself needs (to
/// keep a single terminal event per already-terminated predecessor) to
/// `act_id`/`act_pos`, advancing `n_cur`.
pub fn build(
    arena: &Arena,
    n_cur: &mut usize,
    act_id: &mut FixedList<u16>,
    act_pos: &mut FixedList<u16>,
    min_dep: &[FixedList<u16>],
    min_map: &BitMatrix,
) -> Network {
    let n_max = arena.n_max();
    let dum0 = *n_cur;

    let mut started = vec![false; n_max];
    let mut rem_dep = vec![0u16; n_max];
    let mut act_src = vec![0u16; n_max];
    let mut act_dst = vec![0u16; n_max];
    let mut events = arena.list_u16_cap(2 * n_max);
    let mut chk: Vec<u16> = Vec::with_capacity(n_max);

    for i in 0..dum0 {
        rem_dep[i] = min_dep[i].len() as u16;
    }

    let mut evt: u16 = 1;
    for i in 0..dum0 {
        if rem_dep[i] == 0 && !started[i] {
            started[i] = true;
            act_src[i] = evt;
            chk.push(i as u16);
        }
    }
    events.push(evt);
    evt += 1;

    let mut dum = dum0;
    let mut ci = 0usize;
    while ci < chk.len() {
        let current = chk[ci] as usize;
        ci += 1;

        for j in 0..dum {
            if min_map.get(j, current) {
                rem_dep[j] -= 1;
            }
        }

        let mut start: Vec<u16> = Vec::new();
        for j in 0..dum {
            if rem_dep[j] == 0 && !started[j] {
                started[j] = true;
                act_src[j] = evt;
                start.push(j as u16);
            }
        }

        if !start.is_empty() {
            let first = start[0] as usize;
            for &p in min_dep[first].as_slice() {
                let p = p as usize;
                if act_dst[p] != 0 {
                    act_pos.push(dum as u16);
                    act_id.push(FAKE);
                    started.push(true);
                    rem_dep.push(0);
                    act_src.push(act_dst[p]);
                    act_dst.push(evt);
                    dum += 1;
                } else {
                    act_dst[p] = evt;
                }
            }
            events.push(evt);
            evt += 1;
        }

        chk.extend_from_slice(&start);
    }

    for i in 0..dum {
        if act_dst[i] == 0 {
            act_dst[i] = evt;
        }
    }
    events.push(evt);

    *n_cur = dum;
    act_src.truncate(dum);
    act_dst.truncate(dum);

    Network {
        act_src,
        act_dst,
        events,
    }
}
