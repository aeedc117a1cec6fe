use crate::{
    cmp::Cmp,
    op::{Op, OpKind},
    reg::Reg,
};
use color_print::cformat;
use std::fmt;

/// Instruction with branch targets of type `L`.
///
/// The assembler builds `Inst<Label>`; finalized programs hold `Inst<u32>`
/// where the target is an absolute instruction address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inst<L> {
    NOP(),
    RET(Reg),
    RETI(i32),
    JUMP(L),
    BR(Cmp, Reg, Reg, L),
    BRI(Cmp, Reg, i32, L),
}

impl<L> Inst<L> {
    pub fn target(&self) -> Option<&L> {
        match self {
            Inst::JUMP(l) | Inst::BR(_, _, _, l) | Inst::BRI(_, _, _, l) => Some(l),
            Inst::NOP() | Inst::RET(_) | Inst::RETI(_) => None,
        }
    }

    /// Never continues with the next instruction.
    pub fn is_terminator(&self) -> bool {
        matches!(self, Inst::RET(_) | Inst::RETI(_) | Inst::JUMP(_))
    }

    /// `self` immediately followed by `next` always branches away.
    pub fn complements<M>(&self, next: &Inst<M>) -> bool {
        match (self, next) {
            (Inst::BR(c1, a1, b1, _), Inst::BR(c2, a2, b2, _)) => {
                c1.negate() == *c2 && a1 == a2 && b1 == b2
            }
            (Inst::BRI(c1, a1, i1, _), Inst::BRI(c2, a2, i2, _)) => {
                c1.negate() == *c2 && a1 == a2 && i1 == i2
            }
            _ => false,
        }
    }

    pub fn resolve<M, E>(self, mut f: impl FnMut(L) -> Result<M, E>) -> Result<Inst<M>, E> {
        Ok(match self {
            Inst::NOP() => Inst::NOP(),
            Inst::RET(rs) => Inst::RET(rs),
            Inst::RETI(imm) => Inst::RETI(imm),
            Inst::JUMP(l) => Inst::JUMP(f(l)?),
            Inst::BR(cmp, rs1, rs2, l) => Inst::BR(cmp, rs1, rs2, f(l)?),
            Inst::BRI(cmp, rs, imm, l) => Inst::BRI(cmp, rs, imm, f(l)?),
        })
    }
}

impl Inst<u32> {
    pub fn to_op(&self) -> Op {
        match *self {
            Inst::NOP() => Op::new(OpKind::NOP),
            Inst::RET(rs) => Op {
                rs1: rs,
                ..Op::new(OpKind::RET)
            },
            Inst::RETI(imm) => Op {
                imm,
                ..Op::new(OpKind::RETI)
            },
            Inst::JUMP(addr) => Op {
                addr,
                ..Op::new(OpKind::JUMP)
            },
            Inst::BR(cmp, rs1, rs2, addr) => Op {
                cmp,
                rs1,
                rs2,
                addr,
                ..Op::new(OpKind::BR)
            },
            Inst::BRI(cmp, rs1, imm, addr) => Op {
                cmp,
                rs1,
                imm,
                addr,
                ..Op::new(OpKind::BRI)
            },
        }
    }

    pub fn from_op(op: Op) -> Inst<u32> {
        match op.kind {
            OpKind::NOP => Inst::NOP(),
            OpKind::RET => Inst::RET(op.rs1),
            OpKind::RETI => Inst::RETI(op.imm),
            OpKind::JUMP => Inst::JUMP(op.addr),
            OpKind::BR => Inst::BR(op.cmp, op.rs1, op.rs2, op.addr),
            OpKind::BRI => Inst::BRI(op.cmp, op.rs1, op.imm, op.addr),
        }
    }

    pub fn cformat(&self) -> String {
        macro_rules! ctrl {
            ($name:expr, $rs1:expr, $rs2:expr, $addr:expr) => {
                cformat!(
                    "<r>{:<6}</><b>{:<4} {:<11}</> <y>0x{:0>4X}</>",
                    $name,
                    $rs1,
                    $rs2,
                    $addr
                )
            };
        }

        match self {
            Inst::NOP() => cformat!("<r>nop</>"),
            Inst::RET(rs) => cformat!("<r>{:<6}</><b>{}</>", "ret", rs),
            Inst::RETI(imm) => cformat!("<r>{:<6}</><y>{}</>", "reti", imm),
            Inst::JUMP(addr) => ctrl!("jump", "", "", addr),
            Inst::BR(cmp, rs1, rs2, addr) => ctrl!(format!("b{cmp}"), rs1, rs2, addr),
            Inst::BRI(cmp, rs, imm, addr) => ctrl!(format!("b{cmp}i"), rs, imm, addr),
        }
    }
}

impl fmt::Display for Inst<u32> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Inst::NOP() => write!(f, "nop"),
            Inst::RET(rs) => write!(f, "ret {rs}"),
            Inst::RETI(imm) => write!(f, "reti {imm}"),
            Inst::JUMP(addr) => write!(f, "jump 0x{addr:04X}"),
            Inst::BR(cmp, rs1, rs2, addr) => write!(f, "b{cmp} {rs1} {rs2} 0x{addr:04X}"),
            Inst::BRI(cmp, rs, imm, addr) => write!(f, "b{cmp}i {rs} {imm} 0x{addr:04X}"),
        }
    }
}
