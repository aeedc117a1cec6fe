use arch::{cmp::vcmp, inst::Inst, reg::Reg};

/// Register file and program counter of one call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct State {
    regs: [i32; Reg::COUNT],
    pc: u32,
}

impl State {
    pub fn new(arg: i32) -> Self {
        let mut state = State::default();
        state.set(Reg::A0, arg);
        state
    }

    pub fn get(&self, reg: Reg) -> i32 {
        self.regs[reg.index()]
    }

    pub fn set(&mut self, reg: Reg, val: i32) {
        if reg != Reg::ZERO {
            self.regs[reg.index()] = val;
        }
    }

    pub fn pc(&self) -> u32 {
        self.pc
    }

    /// Execute one instruction. Returns the result when it was a return.
    pub fn exec(&mut self, inst: &Inst<u32>) -> Option<i32> {
        let next = self.pc + 1;
        self.pc = match *inst {
            Inst::NOP() => next,
            Inst::RET(rs) => return Some(self.get(rs)),
            Inst::RETI(imm) => return Some(imm),
            Inst::JUMP(addr) => addr,
            Inst::BR(cmp, rs1, rs2, addr) => match vcmp(cmp, self.get(rs1), self.get(rs2)) {
                true => addr,
                false => next,
            },
            Inst::BRI(cmp, rs, imm, addr) => match vcmp(cmp, self.get(rs), imm) {
                true => addr,
                false => next,
            },
        };
        None
    }
}
