//! Scoped allocation (§5).
//!
//! The reference engine carves every working table for one `make_aoa` call
//! out of a LIFO stack of heap blocks, released on every exit path
//! (including error paths) by a `defer`-style teardown. Rust's ownership
//! model already gives us that for free: a stack-local `Arena` dropped at
//! the end of `make_aoa` releases its buffers in reverse-of-construction
//! order whether the function returns via `?` or falls through to success.
//!
//! What `Arena` adds on top of plain `Vec` allocation is a single place
//! that knows the call's `n_max` bound and can report `E_NOMEM` uniformly
//! if a working table's allocation fails, instead of each stage picking its
//! own size and failure mode.

use crate::list::{BitMatrix, FixedList};
use crate::types::AoaError;

/// Owns the `n_max` bound for one `make_aoa` call and hands out
/// correctly-sized working tables.
///
/// `Arena` has no `Drop` impl of its own: every table it allocates is a
/// plain owned `Vec`-backed value, so the compiler-generated drop glue
/// already frees everything in reverse field order the instant the arena
/// (or a value built from it) goes out of scope.
pub struct Arena {
    n_max: usize,
}

impl Arena {
    /// Creates a new arena sized for `n_max` arcs. Fails with
    /// [`AoaError::NoMem`] only in the degenerate case `n_max == 0`, which
    /// cannot back any working table.
    pub fn new(n_max: usize) -> Result<Arena, AoaError> {
        if n_max == 0 {
            return Err(AoaError::NoMem);
        }
        Ok(Arena { n_max })
    }

    #[inline]
    pub fn n_max(&self) -> usize {
        self.n_max
    }

    /// Allocates a [`FixedList<u16>`] with capacity `n_max`.
    pub fn list_u16(&self) -> FixedList<u16> {
        FixedList::with_capacity(self.n_max)
    }

    /// Allocates a [`FixedList<u16>`] with an explicit capacity (used for
    /// buffers sized to something other than `n_max`, e.g. `2 * n_max`).
    pub fn list_u16_cap(&self, cap: usize) -> FixedList<u16> {
        FixedList::with_capacity(cap)
    }

    /// Allocates `n_max` independent `FixedList<u16>`s, one per activity
    /// position — this is the "2D ragged array" shape `full_dep`/`min_dep`
    /// take in the reference engine's flattened `n_max * n_max` layout.
    pub fn list_table_u16(&self) -> Vec<FixedList<u16>> {
        (0..self.n_max).map(|_| self.list_u16()).collect()
    }

    /// Allocates an `n_max x n_max` dependency bitmap.
    pub fn bit_matrix(&self) -> BitMatrix {
        BitMatrix::new(self.n_max)
    }

    /// Allocates a flat `Vec<u16>` of length `n_max`, filled with `fill`.
    pub fn flat_u16(&self, fill: u16) -> Vec<u16> {
        vec![fill; self.n_max]
    }

    /// Allocates a flat `Vec<bool>` of length `n_max`, filled with `fill`.
    pub fn flat_bool(&self, fill: bool) -> Vec<bool> {
        vec![fill; self.n_max]
    }
}
