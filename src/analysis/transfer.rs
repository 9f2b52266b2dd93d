//! Per-block transfer functions: upward-exposed uses and kills.

use crate::cfg::Cfg;
use crate::set::VarSet;
use std::fmt::Debug;

/// The backward transfer function of one basic block, summarized as a
/// gen/kill pair.
///
/// `gen` holds the block's upward-exposed uses: variables read before
/// any redefinition within the block. `kill` holds the variables the
/// block definitely redefines with no exposed use above the
/// definition. The two sets are disjoint by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer<V: Clone + Ord + Debug> {
    pub gen: VarSet<V>,
    pub kill: VarSet<V>,
}

impl<V: Clone + Ord + Debug> Default for Transfer<V> {
    fn default() -> Self {
        Transfer {
            gen: VarSet::new(),
            kill: VarSet::new(),
        }
    }
}

impl<V: Clone + Ord + Debug> Transfer<V> {
    /// Summarizes `label` by folding its instructions last to first:
    ///
    /// ```text
    /// gen  = (gen  \ def) ∪ use
    /// kill = (kill ∪ def) \ use
    /// ```
    ///
    /// A use makes its variable upward-exposed and shadows any kill of
    /// it by a later instruction; a def kills upward liveness unless a
    /// later use in the block already exposed the variable.
    pub fn of_block<C: Cfg<Var = V>>(cfg: &C, label: C::Label) -> Transfer<V> {
        let mut transfer = Transfer::default();
        for inst in cfg.block_code(label).iter().rev() {
            let (uses, defs) = inst_sets(cfg, inst);
            transfer.gen.subtract(&defs);
            transfer.gen.union_with(&uses);
            transfer.kill.union_with(&defs);
            transfer.kill.subtract(&uses);
        }
        transfer
    }

    /// Applies the summary backward: `gen ∪ (live_out \ kill)`.
    pub fn apply(&self, live_out: &VarSet<V>) -> VarSet<V> {
        let mut live_in = live_out.clone();
        live_in.subtract(&self.kill);
        live_in.union_with(&self.gen);
        live_in
    }
}

/// Runs the backward transfer one instruction at a time over `label`,
/// from `live_out` at the block's exit to the live set at its first
/// instruction. Consumers that need per-instruction live ranges can
/// derive them from block-granularity results with this.
pub fn live_in_through<C: Cfg>(
    cfg: &C,
    label: C::Label,
    live_out: &VarSet<C::Var>,
) -> VarSet<C::Var> {
    let mut live = live_out.clone();
    for inst in cfg.block_code(label).iter().rev() {
        let (uses, defs) = inst_sets(cfg, inst);
        live.subtract(&defs);
        live.union_with(&uses);
    }
    live
}

fn inst_sets<C: Cfg>(cfg: &C, inst: &C::Inst) -> (VarSet<C::Var>, VarSet<C::Var>) {
    let mut uses = VarSet::new();
    cfg.visit_uses(inst, |v| uses.insert(v.clone()));
    let mut defs = VarSet::new();
    cfg.visit_defs(inst, |v| defs.insert(v.clone()));
    (uses, defs)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One straight-line block; an instruction is a (reads, writes)
    /// pair.
    struct OneBlock {
        code: Vec<(Vec<&'static str>, Vec<&'static str>)>,
    }

    impl Cfg for OneBlock {
        type Label = u32;
        type Var = &'static str;
        type Inst = (Vec<&'static str>, Vec<&'static str>);

        fn postorder(&self) -> Vec<u32> {
            vec![0]
        }
        fn visit_succs<F: FnMut(u32)>(&self, _label: u32, _f: F) {}
        fn block_code(&self, _label: u32) -> &[Self::Inst] {
            &self.code
        }
        fn visit_uses<F: FnMut(&&'static str)>(&self, inst: &Self::Inst, mut f: F) {
            for u in &inst.0 {
                f(u);
            }
        }
        fn visit_defs<F: FnMut(&&'static str)>(&self, inst: &Self::Inst, mut f: F) {
            for d in &inst.1 {
                f(d);
            }
        }
    }

    fn set(items: &[&'static str]) -> VarSet<&'static str> {
        items.iter().copied().collect()
    }

    #[test]
    fn straight_line_defs_mask_uses() {
        // x := 1; y := x + 1; return y
        let cfg = OneBlock {
            code: vec![
                (vec![], vec!["x"]),
                (vec!["x"], vec!["y"]),
                (vec!["y"], vec![]),
            ],
        };
        let t = Transfer::of_block(&cfg, 0);
        assert_eq!(t.gen, set(&[]));
        assert_eq!(t.kill, set(&["x", "y"]));
    }

    #[test]
    fn use_before_redef_stays_exposed() {
        // t := a + b; a := t; return a
        let cfg = OneBlock {
            code: vec![
                (vec!["a", "b"], vec!["t"]),
                (vec!["t"], vec!["a"]),
                (vec!["a"], vec![]),
            ],
        };
        let t = Transfer::of_block(&cfg, 0);
        assert_eq!(t.gen, set(&["a", "b"]));
        assert_eq!(t.kill, set(&["t"]));
        assert_eq!(t.apply(&VarSet::new()), set(&["a", "b"]));
    }

    #[test]
    fn gen_and_kill_stay_disjoint() {
        let cfg = OneBlock {
            code: vec![
                (vec!["a"], vec!["a"]),
                (vec!["b"], vec!["c"]),
                (vec!["c"], vec!["b"]),
            ],
        };
        let t = Transfer::of_block(&cfg, 0);
        for v in t.gen.iter() {
            assert!(!t.kill.contains(v));
        }
    }

    #[test]
    fn per_instruction_walk_matches_summary() {
        let cfg = OneBlock {
            code: vec![
                (vec!["a", "b"], vec!["t"]),
                (vec!["t"], vec!["a"]),
                (vec!["a", "z"], vec![]),
            ],
        };
        let live_out = set(&["a", "q"]);
        let t = Transfer::of_block(&cfg, 0);
        assert_eq!(live_in_through(&cfg, 0, &live_out), t.apply(&live_out));
    }

    #[test]
    fn empty_block_is_identity() {
        let cfg = OneBlock { code: vec![] };
        let t = Transfer::of_block(&cfg, 0);
        assert_eq!(t, Transfer::default());
        let live_out = set(&["a"]);
        assert_eq!(t.apply(&live_out), live_out);
    }
}
