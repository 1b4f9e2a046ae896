//! Input validation and link normalization (§4.2, §4.3).
//!
//! Both uniqueness checks are the pairwise O(n^2)/O(m^2) scans of the
//! reference engine — small inputs (this is a project-network tool, not a
//! big-data one) make the quadratic cost a non-issue and keep the checks
//! trivially obviously correct.

use crate::types::{AoaError, FAKE};

/// Rejects a null/empty id list or any duplicate id. `FAKE` is reserved and
/// may never appear in caller-supplied ids.
pub fn check_act_ids(act_id: &[u16]) -> Result<(), AoaError> {
    if act_id.is_empty() {
        return Err(AoaError::Invalid("activity id list is empty".into()));
    }
    for (i, &a) in act_id.iter().enumerate() {
        if a == FAKE {
            return Err(AoaError::Invalid(format!(
                "activity id at position {} is the reserved FAKE sentinel",
                i
            )));
        }
        for &b in &act_id[i + 1..] {
            if a == b {
                return Err(AoaError::Invalid(format!("duplicate activity id {}", a)));
            }
        }
    }
    Ok(())
}

/// Rejects a duplicate `(src, dst)` link pair.
pub fn check_links(lnk_src: &[u16], lnk_dst: &[u16]) -> Result<(), AoaError> {
    debug_assert_eq!(lnk_src.len(), lnk_dst.len());
    for i in 0..lnk_src.len() {
        for j in i + 1..lnk_src.len() {
            if lnk_src[i] == lnk_src[j] && lnk_dst[i] == lnk_dst[j] {
                return Err(AoaError::Invalid(format!(
                    "duplicate link ({}, {})",
                    lnk_src[i], lnk_dst[i]
                )));
            }
        }
    }
    Ok(())
}

/// Replaces each link endpoint id with the dense activity position it
/// resolves to in `act_id`. Returns the normalized `(src, dst)` position
/// pairs; fails if an endpoint id is not present among `act_id`.
pub fn normalize_links(
    act_id: &[u16],
    lnk_src: &[u16],
    lnk_dst: &[u16],
) -> Result<Vec<(u16, u16)>, AoaError> {
    debug_assert_eq!(lnk_src.len(), lnk_dst.len());
    let mut out = Vec::with_capacity(lnk_src.len());
    for k in 0..lnk_src.len() {
        let s = lookup_position(act_id, lnk_src[k])?;
        let d = lookup_position(act_id, lnk_dst[k])?;
        out.push((s, d));
    }
    Ok(out)
}

fn lookup_position(act_id: &[u16], id: u16) -> Result<u16, AoaError> {
    act_id
        .iter()
        .position(|&a| a == id)
        .map(|p| p as u16)
        .ok_or_else(|| AoaError::Invalid(format!("link endpoint {} is not a known activity id", id)))
}
