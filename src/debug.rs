//! Debug output: pretty-printed results and annotated CFGs.
//!
//! Both entry points require the analysis to have run with
//! `debug_annotate` set; on a result analyzed without it they fail
//! with `InvariantViolation`.

use crate::analysis::liveness::Liveness;
use crate::cfg::Cfg;
use crate::errors::{LivenessError, Result};
use crate::set::VarSet;
use std::fmt::Write;

/// Host hooks for rendering and rebuilding blocks. Only the debug
/// surface needs these; the analysis proper interprets instructions
/// exclusively through [`Cfg::visit_uses`] and [`Cfg::visit_defs`].
pub trait DebugCfg: Cfg {
    /// Renders one instruction into `out`.
    fn write_inst(&self, inst: &Self::Inst, out: &mut dyn Write) -> std::fmt::Result;
    /// Builds a pseudo-comment instruction carrying `text`. Comments
    /// must be invisible to `visit_uses`/`visit_defs`.
    fn make_comment(&self, text: &str) -> Self::Inst;
    /// Replaces the code of `label`.
    fn set_block_code(&mut self, label: Self::Label, code: Vec<Self::Inst>);
}

/// Renders `result` into `out`, one block per entry in reverse
/// postorder: label, live-in set, the host-rendered block code, and
/// live-out set.
pub fn pretty_print<C: DebugCfg>(
    result: &Liveness<C::Label, C::Var>,
    cfg: &C,
    out: &mut dyn Write,
) -> Result<()> {
    ensure_enabled(result)?;
    let mut order = cfg.postorder();
    order.reverse();
    for label in order {
        let live_in = result.livein(label)?;
        let live_out = result.liveout(label)?;
        print_block(cfg, label, live_in, &live_out, out).map_err(|_| sink_error())?;
    }
    Ok(())
}

fn print_block<C: DebugCfg>(
    cfg: &C,
    label: C::Label,
    live_in: &VarSet<C::Var>,
    live_out: &VarSet<C::Var>,
    out: &mut dyn Write,
) -> std::fmt::Result {
    writeln!(out, "block {:?}:", label)?;
    writeln!(out, "  live-in: {:?}", live_in)?;
    for inst in cfg.block_code(label) {
        write!(out, "  ")?;
        cfg.write_inst(inst, out)?;
        writeln!(out)?;
    }
    writeln!(out, "  live-out: {:?}", live_out)
}

/// Returns a copy of `cfg` with each block's code prefixed by two
/// pseudo-comments carrying its live-in and live-out sets.
pub fn annotate<C>(cfg: &C, result: &Liveness<C::Label, C::Var>) -> Result<C>
where
    C: DebugCfg + Clone,
    C::Inst: Clone,
{
    ensure_enabled(result)?;
    let mut annotated = cfg.clone();
    for label in cfg.postorder() {
        let live_in = result.livein(label)?;
        let live_out = result.liveout(label)?;
        let mut code = vec![
            cfg.make_comment(&format!("live-in: {:?}", live_in)),
            cfg.make_comment(&format!("live-out: {:?}", live_out)),
        ];
        code.extend(cfg.block_code(label).iter().cloned());
        annotated.set_block_code(label, code);
    }
    Ok(annotated)
}

fn ensure_enabled<L, V>(result: &Liveness<L, V>) -> Result<()>
where
    L: Copy + Eq + std::hash::Hash + std::fmt::Debug,
    V: Clone + Ord + std::fmt::Debug,
{
    if result.debug_enabled() {
        Ok(())
    } else {
        Err(LivenessError::InvariantViolation(
            "debug output requested on a result analyzed without debug_annotate".to_string(),
        ))
    }
}

fn sink_error() -> LivenessError {
    LivenessError::InvariantViolation("output sink failed".to_string())
}
