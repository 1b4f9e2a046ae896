//! The network-building half of the pipeline: topological sweep (§4.9),
//! the two event-glue stages (§4.10, §4.11), the parallel-arc resolver
//! (§4.12), and the finalizer (§4.13).

pub mod build;
pub mod finalize;
pub mod glue;
pub mod parallel;

pub use build::{build, Network};
