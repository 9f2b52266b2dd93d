//! Liveness analysis framework over abstract control-flow graphs.
//!
//! The host compiler exposes its CFG through the [`cfg::Cfg`] trait;
//! [`analyze`] derives per-block gen/kill summaries, iterates a
//! backward fixpoint over the host's postorder, and returns a frozen
//! [`Liveness`] result answering [`Liveness::livein`] and
//! [`Liveness::liveout`] queries.

pub mod analysis;
pub mod cfg;
pub mod debug;
mod errors;
pub mod set;

pub use analysis::liveness::{analyze, BlockEntry, Liveness, LivenessOptions};
pub use analysis::transfer::{live_in_through, Transfer};
pub use errors::*;
pub use set::VarSet;
