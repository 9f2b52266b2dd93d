//! Backward liveness analysis.
//!
//! [`analyze`] summarizes every reachable block into a gen/kill
//! [`Transfer`], then sweeps the host's postorder round-robin,
//! recomputing each block's live-in from its successors' live-in sets
//! until a full sweep changes nothing. Postorder visits a block after
//! its successors within one sweep, which is the profitable order for
//! a backward problem: successor updates propagate into the current
//! block immediately.
//!
//! Convergence is guaranteed because live-in sets only grow (union
//! updates) and are bounded by the finite variable universe.

use crate::analysis::transfer::Transfer;
use crate::cfg::Cfg;
use crate::errors::{LivenessError, Result};
use crate::set::VarSet;
use fxhash::FxHashMap;
use smallvec::SmallVec;
use std::fmt::Debug;
use std::hash::Hash;

/// Configuration for one [`analyze`] call.
#[derive(Clone, Debug)]
pub struct LivenessOptions<V: Clone + Ord + Debug> {
    /// Variables considered live past blocks with no successors.
    /// Targets that treat callee-saved or return-value registers as
    /// live at procedure exit populate this; purely symbolic analyses
    /// leave it empty.
    pub exit_live: VarSet<V>,
    /// Track the largest live-in set encountered across all blocks and
    /// sweeps; read back through [`Liveness::max_live_in`]. Does not
    /// affect the analysis results.
    pub collect_max_liveset: bool,
    /// Allow the [`crate::debug`] entry points on the result.
    pub debug_annotate: bool,
}

impl<V: Clone + Ord + Debug> Default for LivenessOptions<V> {
    fn default() -> Self {
        LivenessOptions {
            exit_live: VarSet::new(),
            collect_max_liveset: false,
            debug_annotate: false,
        }
    }
}

/// Per-block analysis state: the block summary, the live-in
/// approximation, and the successor list snapshotted from the adapter
/// at analysis time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockEntry<L, V>
where
    L: Copy + Eq + Hash + Debug,
    V: Clone + Ord + Debug,
{
    pub transfer: Transfer<V>,
    pub live_in: VarSet<V>,
    pub succs: SmallVec<[L; 4]>,
}

/// The frozen result of a liveness analysis: a mapping from block
/// label to [`BlockEntry`]. Built by [`analyze`]; immutable
/// afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Liveness<L, V>
where
    L: Copy + Eq + Hash + Debug,
    V: Clone + Ord + Debug,
{
    entries: FxHashMap<L, BlockEntry<L, V>>,
    exit_live: VarSet<V>,
    max_live_in: Option<usize>,
    debug_enabled: bool,
}

/// Runs the analysis over `cfg`.
///
/// Unreachable blocks (absent from the host's postorder) are not
/// analyzed and are absent from the result; queries for them fail with
/// `UnknownLabel`. An empty CFG yields an empty result.
pub fn analyze<C: Cfg>(
    cfg: &C,
    options: LivenessOptions<C::Var>,
) -> Result<Liveness<C::Label, C::Var>> {
    let postorder = cfg.postorder();

    let mut entries = FxHashMap::default();
    for &label in &postorder {
        let entry = BlockEntry {
            transfer: Transfer::of_block(cfg, label),
            live_in: VarSet::new(),
            succs: crate::cfg::succs(cfg, label),
        };
        if entries.insert(label, entry).is_some() {
            return Err(LivenessError::InvariantViolation(format!(
                "label {:?} appears more than once in the postorder",
                label
            )));
        }
    }
    for (label, entry) in &entries {
        for succ in &entry.succs {
            if !entries.contains_key(succ) {
                return Err(LivenessError::InvariantViolation(format!(
                    "block {:?} names successor {:?}, which has no block",
                    label, succ
                )));
            }
        }
    }

    let mut result = Liveness {
        entries,
        exit_live: options.exit_live,
        max_live_in: options.collect_max_liveset.then_some(0),
        debug_enabled: options.debug_annotate,
    };
    result.run(&postorder);
    Ok(result)
}

impl<L, V> Liveness<L, V>
where
    L: Copy + Eq + Hash + Debug,
    V: Clone + Ord + Debug,
{
    /// Round-robin sweeps over the postorder until no live-in set
    /// changes.
    fn run(&mut self, postorder: &[L]) {
        let mut sweep = 0;
        loop {
            let mut changed = 0;
            for &label in postorder {
                let live_out = self.live_out_of(&self.entries[&label].succs);
                let live_in = self.entries[&label].transfer.apply(&live_out);
                if let Some(max) = self.max_live_in.as_mut() {
                    *max = (*max).max(live_in.len());
                }
                let entry = self
                    .entries
                    .get_mut(&label)
                    .expect("postorder label vanished from the store");
                if live_in != entry.live_in {
                    entry.live_in = live_in;
                    changed += 1;
                }
            }
            log::trace!("liveness: sweep {}: {} blocks changed", sweep, changed);
            sweep += 1;
            if changed == 0 {
                break;
            }
        }
    }

    /// Union of the successors' live-in sets, or the configured exit
    /// set when there are none. Duplicate successor edges cannot
    /// double-count anything.
    fn live_out_of(&self, succs: &[L]) -> VarSet<V> {
        if succs.is_empty() {
            return self.exit_live.clone();
        }
        let mut out = VarSet::new();
        for succ in succs {
            out.union_with(&self.entries[succ].live_in);
        }
        out
    }

    /// The variables live on entry to `label`.
    pub fn livein(&self, label: L) -> Result<&VarSet<V>> {
        Ok(&self.lookup(label)?.live_in)
    }

    /// The variables live on exit from `label`. Recomputed from the
    /// successors' live-in sets on every call; callers needing
    /// repeated access should memoize.
    pub fn liveout(&self, label: L) -> Result<VarSet<V>> {
        let entry = self.lookup(label)?;
        Ok(self.live_out_of(&entry.succs))
    }

    /// The gen/kill summary of `label`.
    pub fn transfer(&self, label: L) -> Result<&Transfer<V>> {
        Ok(&self.lookup(label)?.transfer)
    }

    /// The full per-block entry for `label`.
    pub fn entry(&self, label: L) -> Result<&BlockEntry<L, V>> {
        self.lookup(label)
    }

    /// The largest live-in size seen during iteration, if
    /// `collect_max_liveset` was set.
    pub fn max_live_in(&self) -> Option<usize> {
        self.max_live_in
    }

    pub(crate) fn debug_enabled(&self) -> bool {
        self.debug_enabled
    }

    fn lookup(&self, label: L) -> Result<&BlockEntry<L, V>> {
        self.entries
            .get(&label)
            .ok_or_else(|| LivenessError::UnknownLabel(format!("{:?}", label)))
    }
}
