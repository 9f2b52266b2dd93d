//! Fast postorder computation.

use fxhash::FxHashSet;
use smallvec::{smallvec, SmallVec};
use std::fmt::Debug;
use std::hash::Hash;

/// Computes a depth-first postorder over the blocks reachable from
/// `entry`, following successor edges in the order `succ_blocks`
/// reports them. Hosts can implement [`super::Cfg::postorder`] with
/// this directly.
pub fn calculate<L, I, SuccFn>(entry: L, succ_blocks: SuccFn) -> Vec<L>
where
    L: Copy + Eq + Hash + Debug,
    I: IntoIterator<Item = L>,
    SuccFn: Fn(L) -> I,
{
    let mut ret = vec![];

    // State: visited-block set, and explicit DFS stack.
    let mut visited = FxHashSet::default();

    #[derive(Debug)]
    struct State<L: Debug> {
        block: L,
        succs: SmallVec<[L; 4]>,
        next_succ: usize,
    }
    let mut stack: SmallVec<[State<L>; 64]> = smallvec![];

    visited.insert(entry);
    stack.push(State {
        block: entry,
        succs: succ_blocks(entry).into_iter().collect(),
        next_succ: 0,
    });

    while let Some(ref mut state) = stack.last_mut() {
        log::trace!("postorder: TOS is {:?}", state);
        // Perform one action: push to new succ, skip an already-visited succ, or pop.
        if state.next_succ < state.succs.len() {
            let succ = state.succs[state.next_succ];
            log::trace!(" -> succ {:?}", succ);
            state.next_succ += 1;
            if visited.insert(succ) {
                log::trace!(" -> visiting");
                stack.push(State {
                    block: succ,
                    succs: succ_blocks(succ).into_iter().collect(),
                    next_succ: 0,
                });
            }
        } else {
            log::trace!("retreating from {:?}", state.block);
            ret.push(state.block);
            stack.pop();
        }
    }

    ret
}
