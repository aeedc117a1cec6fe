use arch::inst::Inst;

use super::Hook;
use crate::model::State;

/// Counts executed instructions.
#[derive(Debug, Default)]
pub struct Steps {
    count: u64,
}

impl Steps {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Hook for Steps {
    fn exec(&mut self, _time: u64, _pc: u32, _inst: &Inst<u32>, state: State) -> State {
        self.count += 1;
        state
    }
}
