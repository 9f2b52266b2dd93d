//! Analyses over the CFG contract.
//!
//! Terminology note: an "analysis" is a readonly pass over a host
//! graph. It does not mutate code; it only traverses the blocks in a
//! certain order, possibly multiple times (to converge), in order to
//! compute some derived information.

pub mod liveness;
pub use liveness::*;
pub mod transfer;
pub use transfer::*;
