//! Assembler for the branch ISA.
//!
//! Code is emitted as a flat list of instructions and label marks. Labels can
//! be referenced before they are placed; addresses are assigned and every
//! reference resolved in [`Assembler::finalize`].

mod assembler;
mod error;
mod label;
mod value;

pub use assembler::Assembler;
pub use error::Error;
pub use label::Label;
pub use value::{Cond, Value};
