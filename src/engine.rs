//! The entry point (§6): `make_aoa` wires together every stage of §2's
//! pipeline over one [`Arena`]-sized set of working tables.

use crate::arena::Arena;
use crate::deps::{self, Dependencies};
use crate::network::{self, glue, parallel};
use crate::splitters::{nested, overlap};
use crate::trace;
use crate::types::{n_max, AoaError, AoaResult, FAKE};
use crate::validate;

/// Converts an Activity-on-Node work breakdown into a minimal
/// Activity-on-Arc network.
///
/// `act_id` must be non-empty and free of duplicates (and of the reserved
/// [`FAKE`] sentinel). `lnk_src[k]`/`lnk_dst[k]` name a precedence
/// `lnk_src[k]` must complete before `lnk_dst[k]` may start; both must
/// reference ids present in `act_id`, and the induced precedence relation
/// must be acyclic.
pub fn make_aoa(act_id: &[u16], lnk_src: &[u16], lnk_dst: &[u16]) -> Result<AoaResult, AoaError> {
    if lnk_src.len() != lnk_dst.len() {
        return Err(AoaError::Invalid(
            "lnk_src and lnk_dst must have the same length".into(),
        ));
    }
    let n_act = act_id.len();
    let n_lnk = lnk_src.len();

    validate::check_act_ids(act_id)?;
    validate::check_links(lnk_src, lnk_dst)?;

    let links = validate::normalize_links(act_id, lnk_src, lnk_dst)?;

    let arena = Arena::new(n_max(n_act, n_lnk))?;
    trace!("n_act: {}  n_max: {}", n_act, arena.n_max());

    let Dependencies {
        mut full_dep,
        mut full_map,
        mut min_dep,
        mut min_map,
        order,
    } = deps::build(&arena, n_act, &links)?;

    let mut act_id_w = arena.list_u16();
    for &id in act_id {
        act_id_w.push(id);
    }
    let mut act_pos = arena.list_u16();
    for &p in order.as_slice() {
        act_pos.push(p);
    }

    let mut n_cur = n_act;

    trace!("processing nested predecessor sets");
    nested::process(
        &arena,
        n_act,
        &mut act_id_w,
        &mut act_pos,
        &mut min_dep,
        &mut min_map,
        &mut full_dep,
        &mut full_map,
        &mut n_cur,
    );

    trace!("processing overlapping predecessor sets");
    overlap::process(
        &arena,
        &mut act_id_w,
        &mut act_pos,
        &mut min_dep,
        &mut min_map,
        &mut full_dep,
        &mut full_map,
        &mut n_cur,
    );

    trace!("building network ({} activities incl. dummies)", n_cur);
    let net = network::build(&arena, &mut n_cur, &mut act_id_w, &mut act_pos, &min_dep, &min_map);
    let mut act_src = net.act_src;
    let mut act_dst = net.act_dst;
    let mut events = net.events;

    trace!("gluing events, stage 1");
    glue::stage_1(n_cur, &act_id_w, &mut act_src, &mut act_dst, &mut events);

    trace!("gluing events, stage 2");
    glue::stage_2(n_cur, &act_id_w, &mut act_src, &mut act_dst, &mut events);

    trace!("resolving parallel arcs");
    parallel::resolve(
        &mut n_cur,
        &mut act_id_w,
        &mut act_pos,
        &mut act_src,
        &mut act_dst,
        &mut events,
    );

    trace!("finalizing network ({} events)", events.len());
    let result = network::finalize::finalize(n_cur, &act_id_w, &act_pos, &act_src, &act_dst, &mut events);

    Ok(result)
}

/// Standalone dependency report (§4.5's byproduct, the `ccpm_make_full_map`
/// Open Question resolved per SPEC_FULL.md/DESIGN.md): runs validation,
/// normalization, extraction, closure, and reduction, then returns the
/// minimal and full predecessor id sets per activity without running the
/// network-building half of the pipeline.
pub struct DependencyReport {
    /// `min_deps[i]`: the minimal (Hasse) predecessor ids of `act_id[i]`.
    pub min_deps: Vec<Vec<u16>>,
    /// `full_deps[i]`: the full (transitive-closure) predecessor ids of `act_id[i]`.
    pub full_deps: Vec<Vec<u16>>,
}

/// Validation-only path (§4.14's `validate` subcommand): runs checks
/// through §4.5's cycle detection but stops before reduction or any
/// dummy-insertion stage, so a caller can confirm an input is well-formed
/// and acyclic without paying for the full network build.
pub fn validate_only(act_id: &[u16], lnk_src: &[u16], lnk_dst: &[u16]) -> Result<(), AoaError> {
    if lnk_src.len() != lnk_dst.len() {
        return Err(AoaError::Invalid(
            "lnk_src and lnk_dst must have the same length".into(),
        ));
    }
    let n_act = act_id.len();
    validate::check_act_ids(act_id)?;
    validate::check_links(lnk_src, lnk_dst)?;
    let links = validate::normalize_links(act_id, lnk_src, lnk_dst)?;

    let arena = Arena::new(n_max(n_act, lnk_src.len()))?;
    let (mut full_dep, mut full_map) = deps::extract_immediate(&arena, &links)?;
    deps::build_closure(n_act, &mut full_dep, &mut full_map)?;
    Ok(())
}

pub fn dependency_report(
    act_id: &[u16],
    lnk_src: &[u16],
    lnk_dst: &[u16],
) -> Result<DependencyReport, AoaError> {
    if lnk_src.len() != lnk_dst.len() {
        return Err(AoaError::Invalid(
            "lnk_src and lnk_dst must have the same length".into(),
        ));
    }
    let n_act = act_id.len();
    validate::check_act_ids(act_id)?;
    validate::check_links(lnk_src, lnk_dst)?;
    let links = validate::normalize_links(act_id, lnk_src, lnk_dst)?;

    let arena = Arena::new(n_max(n_act, lnk_src.len()))?;
    let deps = deps::build(&arena, n_act, &links)?;

    let to_ids = |list: &crate::list::FixedList<u16>| -> Vec<u16> {
        list.as_slice().iter().map(|&p| act_id[p as usize]).collect()
    };

    Ok(DependencyReport {
        min_deps: deps.min_dep[..n_act].iter().map(to_ids).collect(),
        full_deps: deps.full_dep[..n_act].iter().map(to_ids).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arcs(r: &AoaResult) -> Vec<(u16, u16, u16)> {
        let mut v: Vec<(u16, u16, u16)> = r
            .act_id
            .iter()
            .zip(r.act_src.iter())
            .zip(r.act_dst.iter())
            .map(|((&id, &s), &d)| (id, s, d))
            .collect();
        v.sort();
        v
    }

    #[test]
    fn chain_has_no_dummies() {
        let act_id = [1u16, 2, 3];
        let lnk_src = [1u16, 2];
        let lnk_dst = [2u16, 3];
        let r = make_aoa(&act_id, &lnk_src, &lnk_dst).unwrap();
        assert_eq!(arcs(&r), vec![(1, 1, 2), (2, 2, 3), (3, 3, 4)]);
    }

    #[test]
    fn diamond_gets_one_dummy() {
        let act_id = [1u16, 2, 3, 4];
        let lnk_src = [1u16, 1, 2, 3];
        let lnk_dst = [2u16, 3, 4, 4];
        let r = make_aoa(&act_id, &lnk_src, &lnk_dst).unwrap();

        let reals: Vec<_> = arcs(&r).into_iter().filter(|&(id, _, _)| id != FAKE).collect();
        assert_eq!(reals.len(), 4);
        let dummies = r.act_id.iter().filter(|&&id| id == FAKE).count();
        assert_eq!(dummies, 1, "activities 2 and 3 share both endpoints");

        let by_id = |id: u16| *reals.iter().find(|&&(i, _, _)| i == id).unwrap();
        let (_a1_src, a1_dst) = (by_id(1).1, by_id(1).2);
        let (a2_src, a2_dst) = (by_id(2).1, by_id(2).2);
        let (a3_src, a3_dst) = (by_id(3).1, by_id(3).2);
        let (a4_src, _a4_dst) = (by_id(4).1, by_id(4).2);

        assert_eq!(a2_src, a1_dst);
        assert_eq!(a3_src, a1_dst);
        assert_ne!(a2_dst, a3_dst, "the parallel pair was split apart");

        // The dummy bridges whichever of 2/3 was not kept as 4's event to
        // the one that was, so 4 starts where exactly one of them ends.
        assert!(a4_src == a2_dst || a4_src == a3_dst);
        let other_dst = if a4_src == a2_dst { a3_dst } else { a2_dst };
        let dummy_idx = r.act_id.iter().position(|&id| id == FAKE).unwrap();
        assert_eq!(r.act_src[dummy_idx], other_dst);
        assert_eq!(r.act_dst[dummy_idx], a4_src);
    }

    #[test]
    fn overlap_with_equal_sets_only_needs_parallel_resolution() {
        let act_id = [1u16, 2, 3, 4];
        let lnk_src = [1u16, 2, 1, 2];
        let lnk_dst = [3u16, 3, 4, 4];
        let r = make_aoa(&act_id, &lnk_src, &lnk_dst).unwrap();
        let dummies = r.act_id.iter().filter(|&&id| id == FAKE).count();
        assert_eq!(dummies, 1, "3 and 4 share both endpoints after equal-set dedup");
        assert_eq!(r.act_id.iter().filter(|&&id| id != FAKE).count(), 4);
    }

    #[test]
    fn single_activity_no_links() {
        let r = make_aoa(&[1], &[], &[]).unwrap();
        assert_eq!(arcs(&r), vec![(1, 1, 2)]);
    }

    #[test]
    fn k_parallel_activities_need_k_minus_one_dummies() {
        let act_id = [1u16, 2, 3];
        let r = make_aoa(&act_id, &[], &[]).unwrap();
        let dummies = r.act_id.iter().filter(|&&id| id == FAKE).count();
        assert_eq!(dummies, 2);
        assert_eq!(r.act_id.iter().filter(|&&id| id != FAKE).count(), 3);
    }

    #[test]
    fn duplicate_link_is_rejected() {
        let act_id = [1u16, 2];
        let err = make_aoa(&act_id, &[1, 1], &[2, 2]).unwrap_err();
        assert!(matches!(err, AoaError::Invalid(_)));
    }

    #[test]
    fn cycle_is_rejected() {
        let act_id = [1u16, 2];
        let err = make_aoa(&act_id, &[1, 2], &[2, 1]).unwrap_err();
        assert_eq!(err, AoaError::Loop);
    }

    #[test]
    fn unknown_endpoint_is_rejected() {
        let act_id = [1u16, 2];
        let err = make_aoa(&act_id, &[1], &[3]).unwrap_err();
        assert!(matches!(err, AoaError::Invalid(_)));
    }

    #[test]
    fn nested_predecessor_sets_merge_at_one_event() {
        // 4 needs {1,2,3}; 5 needs {2,3}. The common {2,3} factors through a dummy.
        let act_id = [1u16, 2, 3, 4, 5];
        let lnk_src = [1u16, 2, 3, 2, 3];
        let lnk_dst = [4u16, 4, 4, 5, 5];
        let r = make_aoa(&act_id, &lnk_src, &lnk_dst).unwrap();
        assert!(r.act_id.iter().any(|&id| id == FAKE), "a dummy factors {{2,3}}");

        let by_id = |id: u16| {
            let i = r.act_id.iter().position(|&x| x == id).unwrap();
            (r.act_src[i], r.act_dst[i])
        };
        let (_, dst2) = by_id(2);
        let (_, dst3) = by_id(3);
        assert_eq!(dst2, dst3, "2 and 3 terminate at the same event");
    }

    #[test]
    fn determinism_across_repeated_runs() {
        let act_id = [1u16, 2, 3, 4, 5];
        let lnk_src = [1u16, 2, 3, 2, 3];
        let lnk_dst = [4u16, 4, 4, 5, 5];
        let r1 = make_aoa(&act_id, &lnk_src, &lnk_dst).unwrap();
        let r2 = make_aoa(&act_id, &lnk_src, &lnk_dst).unwrap();
        assert_eq!(r1, r2);
    }

    #[test]
    fn validate_only_accepts_acyclic_input_and_rejects_cycles() {
        assert!(validate_only(&[1, 2, 3], &[1, 2], &[2, 3]).is_ok());
        assert_eq!(validate_only(&[1, 2], &[1, 2], &[2, 1]).unwrap_err(), AoaError::Loop);
    }

    #[test]
    fn dependency_report_matches_minimal_and_full_sets() {
        let act_id = [1u16, 2, 3];
        let lnk_src = [1u16, 2];
        let lnk_dst = [2u16, 3];
        let report = dependency_report(&act_id, &lnk_src, &lnk_dst).unwrap();
        assert_eq!(report.min_deps[2], vec![2]);
        let mut full2 = report.full_deps[2].clone();
        full2.sort();
        assert_eq!(full2, vec![1, 2]);
    }
}
