//! The control-flow graph contract consumed by the analyses.

use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

pub mod postorder;

/// Read-only view over a host control-flow graph.
///
/// The analysis never inspects the host's block or instruction
/// representation directly; everything it needs comes through this
/// trait. All operations must be pure: repeated calls with the same
/// arguments during one `analyze` call must report the same thing.
pub trait Cfg {
    /// Identifies a basic block within one graph.
    type Label: Copy + Eq + Hash + Debug;
    /// An opaque, totally ordered variable name.
    type Var: Clone + Ord + Debug;
    /// A single instruction, interpreted only through `visit_uses` and
    /// `visit_defs`.
    type Inst;

    /// Depth-first postorder over the reachable blocks, starting from
    /// the entry. Each reachable label appears exactly once.
    /// [`postorder::calculate`] computes this for hosts that do not
    /// track it themselves.
    fn postorder(&self) -> Vec<Self::Label>;

    /// Visits the successors of `label`, in terminator order. The list
    /// may be empty and may repeat a label.
    fn visit_succs<F: FnMut(Self::Label)>(&self, label: Self::Label, f: F);

    /// The instructions of `label`, in execution order.
    fn block_code(&self, label: Self::Label) -> &[Self::Inst];

    /// Visits the variables `inst` reads, before any of its own writes
    /// take effect.
    fn visit_uses<F: FnMut(&Self::Var)>(&self, inst: &Self::Inst, f: F);

    /// Visits the variables `inst` writes.
    fn visit_defs<F: FnMut(&Self::Var)>(&self, inst: &Self::Inst, f: F);
}

/// Snapshots the successor list of `label`.
pub fn succs<C: Cfg>(cfg: &C, label: C::Label) -> SmallVec<[C::Label; 4]> {
    let mut succs = SmallVec::new();
    cfg.visit_succs(label, |s| succs.push(s));
    succs
}
