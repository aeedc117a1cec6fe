use arch::{inst::Inst, reg::Reg};
use color_print::cprintln;

use super::Hook;
use crate::model::State;

/// Prints every executed instruction.
#[derive(Debug, Default)]
pub struct Trace;

impl Hook for Trace {
    fn init(&mut self, state: State) -> State {
        cprintln!(" * Trace: <b>a0</>=<y>{}</>", state.get(Reg::A0));
        state
    }
    fn exec(&mut self, time: u64, pc: u32, inst: &Inst<u32>, state: State) -> State {
        cprintln!(
            " {:>6} [<c>{:04X}</>] {} -> <c>{:04X}</>",
            time,
            pc,
            inst.cformat(),
            state.pc()
        );
        state
    }
}
