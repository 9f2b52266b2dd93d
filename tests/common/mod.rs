//! A small three-address CFG host used to exercise the analysis.

#![allow(dead_code)]

use liveness::cfg::{postorder, Cfg};
use liveness::debug::DebugCfg;
use std::collections::BTreeMap;
use std::fmt::Write;

pub type Var = &'static str;

#[derive(Clone, Debug)]
pub enum Inst {
    /// `dst := op(srcs)`
    Def { dst: Var, srcs: Vec<Var> },
    /// Reads without writing: returns, branches, stores.
    Use { srcs: Vec<Var> },
    /// Pseudo-comment produced by annotation; invisible to the
    /// analysis.
    Comment(String),
}

pub fn def(dst: Var, srcs: &[Var]) -> Inst {
    Inst::Def {
        dst,
        srcs: srcs.to_vec(),
    }
}

pub fn use_(srcs: &[Var]) -> Inst {
    Inst::Use {
        srcs: srcs.to_vec(),
    }
}

#[derive(Clone, Debug, Default)]
pub struct Block {
    pub code: Vec<Inst>,
    pub succs: Vec<u32>,
}

/// Blocks keyed by label; block 0 is the entry.
#[derive(Clone, Debug, Default)]
pub struct TestCfg {
    pub blocks: BTreeMap<u32, Block>,
}

impl TestCfg {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn block(&mut self, label: u32, code: Vec<Inst>, succs: Vec<u32>) -> &mut Self {
        self.blocks.insert(label, Block { code, succs });
        self
    }
}

impl Cfg for TestCfg {
    type Label = u32;
    type Var = Var;
    type Inst = Inst;

    fn postorder(&self) -> Vec<u32> {
        if self.blocks.is_empty() {
            return vec![];
        }
        postorder::calculate(0, |label| self.blocks[&label].succs.clone())
    }

    fn visit_succs<F: FnMut(u32)>(&self, label: u32, mut f: F) {
        for &succ in &self.blocks[&label].succs {
            f(succ);
        }
    }

    fn block_code(&self, label: u32) -> &[Inst] {
        &self.blocks[&label].code
    }

    fn visit_uses<F: FnMut(&Var)>(&self, inst: &Inst, mut f: F) {
        match inst {
            Inst::Def { srcs, .. } | Inst::Use { srcs } => {
                for v in srcs {
                    f(v);
                }
            }
            Inst::Comment(_) => {}
        }
    }

    fn visit_defs<F: FnMut(&Var)>(&self, inst: &Inst, mut f: F) {
        if let Inst::Def { dst, .. } = inst {
            f(dst);
        }
    }
}

impl DebugCfg for TestCfg {
    fn write_inst(&self, inst: &Inst, out: &mut dyn Write) -> std::fmt::Result {
        match inst {
            Inst::Def { dst, srcs } => write!(out, "{} := op({})", dst, srcs.join(", ")),
            Inst::Use { srcs } => write!(out, "use({})", srcs.join(", ")),
            Inst::Comment(text) => write!(out, "# {}", text),
        }
    }

    fn make_comment(&self, text: &str) -> Inst {
        Inst::Comment(text.to_string())
    }

    fn set_block_code(&mut self, label: u32, code: Vec<Inst>) {
        self.blocks.get_mut(&label).unwrap().code = code;
    }
}
