use arch::{cmp::Cmp, inst::Inst, reg::Reg, Program};

use crate::{
    error::Error,
    label::{Label, Labels},
    value::{Cond, Value},
};

#[derive(Debug, Clone)]
enum Line {
    Inst(Inst<Label>),
    Label(Label),
}

/// Builds one procedure of a single `i32` parameter.
///
/// Blocks may be emitted in any order; [`Assembler::move_blocks_to_start`]
/// moves a placed range to the front so it becomes the entry point.
#[derive(Debug)]
pub struct Assembler {
    labels: Labels,
    lines: Vec<Line>,
    insts: usize,
}

impl Default for Assembler {
    fn default() -> Self {
        Self::new()
    }
}

impl Assembler {
    pub fn new() -> Self {
        Assembler {
            labels: Labels::new(),
            lines: Vec::new(),
            insts: 0,
        }
    }

    /// The procedure argument.
    pub fn param(&self) -> Value {
        Value::Reg(Reg::A0)
    }

    pub fn constant(&mut self, value: i32) -> Value {
        Value::Imm(value)
    }

    pub fn new_label(&mut self) -> Label {
        self.labels.create()
    }

    /// Bind `label` to the position of the next emitted instruction.
    pub fn place(&mut self, label: Label) -> Result<(), Error> {
        self.labels.bind(label)?;
        self.lines.push(Line::Label(label));
        Ok(())
    }

    pub fn cmp(&mut self, op: Cmp, a: Value, b: Value) -> Cond {
        Cond::new(op, a, b)
    }

    pub fn gt(&mut self, a: Value, b: Value) -> Cond {
        self.cmp(Cmp::GT, a, b)
    }

    pub fn eq(&mut self, a: Value, b: Value) -> Cond {
        self.cmp(Cmp::EQ, a, b)
    }

    pub fn ret(&mut self, value: Value) {
        match value {
            Value::Reg(rs) => self.push(Inst::RET(rs)),
            Value::Imm(imm) => self.push(Inst::RETI(imm)),
        }
    }

    pub fn branch(&mut self, label: Label) {
        self.push(Inst::JUMP(label));
    }

    pub fn branch_if(&mut self, cond: Cond, label: Label) {
        match cond {
            Cond::Test(op, rs1, Value::Reg(rs2)) => self.push(Inst::BR(op, rs1, rs2, label)),
            Cond::Test(op, rs, Value::Imm(imm)) => self.push(Inst::BRI(op, rs, imm, label)),
            Cond::Const(true) => self.push(Inst::JUMP(label)),
            Cond::Const(false) => {}
        }
    }

    pub fn branch_if_not(&mut self, cond: Cond, label: Label) {
        self.branch_if(cond.negate(), label);
    }

    pub fn nop(&mut self) {
        self.push(Inst::NOP());
    }

    /// Number of instructions emitted so far.
    pub fn len(&self) -> usize {
        self.insts
    }

    pub fn is_empty(&self) -> bool {
        self.insts == 0
    }

    /// Move everything from `from` (inclusive) up to `to` (exclusive) to the
    /// start of the instruction stream. Both labels must already be placed,
    /// `from` no later than `to`.
    pub fn move_blocks_to_start(&mut self, from: Label, to: Label) -> Result<(), Error> {
        let begin = self.position(from);
        let end = self.position(to);
        let (begin, end) = match (begin, end) {
            (Some(begin), Some(end)) if begin <= end => (begin, end),
            _ => return Err(Error::InvalidRange(from, to)),
        };
        let moved: Vec<Line> = self.lines.drain(begin..end).collect();
        self.lines.splice(0..0, moved);
        Ok(())
    }

    /// Assign addresses and resolve every branch target.
    pub fn finalize(self) -> Result<Program, Error> {
        let mut addrs: Vec<Option<u32>> = vec![None; self.labels.len()];
        let mut pc = 0u32;
        for line in &self.lines {
            match line {
                Line::Label(label) => addrs[label.id()] = Some(pc),
                Line::Inst(_) => pc += 1,
            }
        }

        let labels = &self.labels;
        let mut code = Vec::with_capacity(self.insts);
        for line in self.lines {
            if let Line::Inst(inst) = line {
                code.push(inst.resolve(|label| {
                    labels.check(label)?;
                    addrs[label.id()].ok_or(Error::UnboundLabel(label))
                })?);
            }
        }

        tracing::debug!(insts = code.len(), labels = labels.len(), "finalize");
        Ok(Program::new(code)?)
    }

    fn push(&mut self, inst: Inst<Label>) {
        self.lines.push(Line::Inst(inst));
        self.insts += 1;
    }

    fn position(&self, label: Label) -> Option<usize> {
        if !self.labels.is_bound(label) {
            return None;
        }
        self.lines
            .iter()
            .position(|line| matches!(line, Line::Label(l) if *l == label))
    }
}
