use crate::{error::Error, inst::Inst, op::Op};
use color_print::cformat;

/// A finalized instruction stream. Execution starts at address 0.
///
/// Construction validates that every branch target lies inside the program
/// and that no reachable instruction can run past the last one, so an
/// executor never has to bounds-check the program counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program(Vec<Inst<u32>>);

impl Program {
    pub fn new(code: Vec<Inst<u32>>) -> Result<Self, Error> {
        validate(&code)?;
        Ok(Program(code))
    }

    pub fn code(&self) -> &[Inst<u32>] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, pc: usize) -> Option<&Inst<u32>> {
        self.0.get(pc)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.0.len() * Op::BYTES);
        for inst in &self.0 {
            bytes.extend_from_slice(&inst.to_op().to_bin().to_le_bytes());
        }
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() % Op::BYTES != 0 {
            return Err(Error::Truncated(bytes.len()));
        }
        let mut code = Vec::with_capacity(bytes.len() / Op::BYTES);
        for (addr, chunk) in bytes.chunks_exact(Op::BYTES).enumerate() {
            let mut word = [0u8; Op::BYTES];
            word.copy_from_slice(chunk);
            let op = Op::from_bin(u128::from_le_bytes(word)).map_err(|e| Error::Decode {
                addr,
                source: Box::new(e),
            })?;
            code.push(Inst::from_op(op));
        }
        Program::new(code)
    }

    /// Colored listing, one line per instruction.
    pub fn cformat(&self) -> Vec<String> {
        self.0
            .iter()
            .enumerate()
            .map(|(pc, inst)| cformat!("[<c>{:04X}</>] {}", pc, inst.cformat()))
            .collect()
    }
}

fn validate(code: &[Inst<u32>]) -> Result<(), Error> {
    if code.is_empty() {
        return Err(Error::EmptyProgram);
    }

    for (pc, inst) in code.iter().enumerate() {
        if let Some(&target) = inst.target() {
            if target as usize >= code.len() {
                return Err(Error::TargetOutOfRange(pc, target, code.len()));
            }
        }
    }

    // Walk everything reachable from the entry. A branch followed by its
    // complement is treated as a two-way jump: the second branch is only
    // visited on its own if something else targets it.
    let mut seen = vec![false; code.len()];
    let mut work = vec![0usize];
    while let Some(pc) = work.pop() {
        if std::mem::replace(&mut seen[pc], true) {
            continue;
        }
        let inst = &code[pc];
        if let Some(&target) = inst.target() {
            work.push(target as usize);
        }
        if inst.is_terminator() {
            continue;
        }
        match code.get(pc + 1) {
            None => return Err(Error::FallsOffEnd(pc)),
            Some(next) if inst.complements(next) => {
                if let Some(&target) = next.target() {
                    work.push(target as usize);
                }
            }
            Some(_) => work.push(pc + 1),
        }
    }
    Ok(())
}
