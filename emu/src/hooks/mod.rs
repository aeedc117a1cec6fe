pub mod steps;
pub mod trace;

use arch::inst::Inst;

use crate::model::State;

/// Side effect run around every executed instruction.
pub trait Hook {
    fn init(&mut self, state: State) -> State {
        state
    }
    /// Called after `inst` at `pc` has executed; `state` already holds the next pc.
    fn exec(&mut self, time: u64, pc: u32, inst: &Inst<u32>, state: State) -> State;
}
