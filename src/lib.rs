//! `aoaconv`: converts an Activity-on-Node (AoN) project network into a
//! minimal Activity-on-Arc (AoA) network, inserting dummy arcs only where
//! event identity alone cannot capture the input precedence relation.
//!
//! The entry point is [`make_aoa`]; see DESIGN.md for the grounding of
//! each stage in the reference `crazy_cpm` engine this crate reimplements.

#[macro_use]
pub mod trace;

pub mod arena;
pub mod deps;
pub mod engine;
pub mod list;
pub mod network;
pub mod sort;
pub mod splitters;
pub mod types;
pub mod validate;
pub mod wbs;

pub use engine::{dependency_report, make_aoa, validate_only, DependencyReport};
pub use types::{n_max, AoaError, AoaResult, FAKE};
