use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{cmp::Cmp, error::Error, reg::Reg};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Default,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
pub enum OpKind {
    #[default]
    NOP,
    RET,
    RETI,
    JUMP,
    BR,
    BRI,
}

/// Raw instruction fields, one machine word.
///
/// Layout from the low byte up: `[kind:8][cmp:8][rs1:8][rs2:8][imm:32][addr:32]`,
/// the top 32 bits are reserved and must be zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Op {
    pub kind: OpKind,
    pub cmp: Cmp,
    pub rs1: Reg,
    pub rs2: Reg,
    pub imm: i32,
    pub addr: u32,
}

impl Op {
    pub const BYTES: usize = 16;

    pub fn new(kind: OpKind) -> Self {
        Op {
            kind,
            ..Default::default()
        }
    }

    pub fn to_bin(&self) -> u128 {
        (u8::from(self.kind) as u128)
            | (u8::from(self.cmp) as u128) << 8
            | (u8::from(self.rs1) as u128) << 16
            | (u8::from(self.rs2) as u128) << 24
            | (self.imm as u32 as u128) << 32
            | (self.addr as u128) << 64
    }

    pub fn from_bin(bin: u128) -> Result<Op, Error> {
        if bin >> 96 != 0 {
            return Err(Error::ReservedBits);
        }
        let byte = |shift: u32| (bin >> shift) as u8;
        let reg = |b: u8| Reg::try_from(b).map_err(|_| Error::UnknownReg(b));
        Ok(Op {
            kind: OpKind::try_from(byte(0)).map_err(|_| Error::UnknownOpcode(byte(0)))?,
            cmp: Cmp::try_from(byte(8)).map_err(|_| Error::UnknownCmp(byte(8)))?,
            rs1: reg(byte(16))?,
            rs2: reg(byte(24))?,
            imm: (bin >> 32) as u32 as i32,
            addr: (bin >> 64) as u32,
        })
    }
}
