use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown opcode: 0x{0:02X}")]
    UnknownOpcode(u8),

    #[error("Unknown comparison: 0x{0:02X}")]
    UnknownCmp(u8),

    #[error("Unknown register: 0x{0:02X}")]
    UnknownReg(u8),

    #[error("Reserved bits are set")]
    ReservedBits,

    #[error("Cannot decode word at 0x{addr:04X}")]
    Decode {
        addr: usize,
        #[source]
        source: Box<Error>,
    },

    #[error("Truncated binary: {0} bytes is not a whole number of words")]
    Truncated(usize),

    #[error("Program is empty")]
    EmptyProgram,

    #[error("Branch target out of range at 0x{0:04X}: 0x{1:04X} (program length 0x{2:04X})")]
    TargetOutOfRange(usize, u32, usize),

    #[error("Control falls off the end of the program after 0x{0:04X}")]
    FallsOffEnd(usize),
}
