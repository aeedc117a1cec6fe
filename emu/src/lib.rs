//! Interpreter for finalized branch ISA programs.

pub mod hooks;
pub mod model;

mod error;

use std::path::Path;

use arch::Program;

pub use error::Error;
use hooks::Hook;
use model::State;

/// A compiled procedure of one `i32` argument returning `i32`.
///
/// Owns its program; every call runs on its own [`State`], so a procedure
/// can be shared between threads and called concurrently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Procedure {
    program: Program,
}

impl From<Program> for Procedure {
    fn from(program: Program) -> Self {
        Procedure { program }
    }
}

impl Procedure {
    pub fn new(program: Program) -> Self {
        Procedure { program }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    /// Run the program with `arg` in `a0` until it returns.
    ///
    /// A validated program never runs past its last instruction, so the only
    /// way this does not return is a program that loops.
    pub fn call(&self, arg: i32) -> i32 {
        let code = self.program.code();
        let mut state = State::new(arg);
        loop {
            if let Some(ret) = state.exec(&code[state.pc() as usize]) {
                return ret;
            }
        }
    }

    /// Same as [`Procedure::call`], running `hooks` after every instruction
    /// and giving up after `tmax` steps.
    pub fn call_with(
        &self,
        arg: i32,
        tmax: Option<u64>,
        hooks: &mut [&mut dyn Hook],
    ) -> Result<i32, Error> {
        let code = self.program.code();
        let mut state = hooks
            .iter_mut()
            .fold(State::new(arg), |state, hook| hook.init(state));
        let tmax = tmax.unwrap_or(u64::MAX);
        for time in 0..tmax {
            let pc = state.pc();
            let inst = &code[pc as usize];
            let ret = state.exec(inst);
            state = hooks
                .iter_mut()
                .fold(state, |state, hook| hook.exec(time, pc, inst, state));
            if let Some(ret) = ret {
                return Ok(ret);
            }
        }
        Err(Error::Timeout(tmax))
    }

    /// Load a program written by [`Procedure::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let name = path.display().to_string();
        let bytes = std::fs::read(path).map_err(|e| Error::FileOpen(name.clone(), e))?;
        let program = Program::from_bytes(&bytes).map_err(|e| Error::Load(name, e))?;
        Ok(Procedure::new(program))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        std::fs::write(path, self.program.to_bytes())
            .map_err(|e| Error::FileWrite(path.display().to_string(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arch::{cmp::Cmp, inst::Inst, reg::Reg};
    use crate::hooks::steps::Steps;

    // 5 -> 50, anything else -> -1
    fn single() -> Procedure {
        Procedure::new(
            Program::new(vec![
                Inst::BRI(Cmp::EQ, Reg::A0, 5, 2),
                Inst::BRI(Cmp::NE, Reg::A0, 5, 3),
                Inst::RETI(50),
                Inst::RETI(-1),
            ])
            .unwrap(),
        )
    }

    #[test]
    fn call_returns() {
        let proc = single();
        assert_eq!(proc.call(5), 50);
        assert_eq!(proc.call(4), -1);
        assert_eq!(proc.call(i32::MIN), -1);
    }

    #[test]
    fn call_with_runs_hooks() {
        let proc = single();
        let mut steps = Steps::new();
        assert_eq!(proc.call_with(5, None, &mut [&mut steps]).unwrap(), 50);
        assert_eq!(steps.count(), 2);

        let mut steps = Steps::new();
        assert_eq!(proc.call_with(6, None, &mut [&mut steps]).unwrap(), -1);
        assert_eq!(steps.count(), 3);
    }

    #[test]
    fn call_with_times_out() {
        let spin = Procedure::new(Program::new(vec![Inst::JUMP(0)]).unwrap());
        assert!(matches!(
            spin.call_with(0, Some(100), &mut []),
            Err(Error::Timeout(100))
        ));
    }

    #[test]
    fn save_and_load() {
        let path = std::env::temp_dir().join(format!("emu-save-{}.bin", std::process::id()));
        let proc = single();
        proc.save(&path).unwrap();
        let loaded = Procedure::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, proc);
        assert_eq!(loaded.call(5), 50);
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            Procedure::load("/nonexistent/program.bin"),
            Err(Error::FileOpen(..))
        ));
    }

    #[test]
    fn procedure_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Procedure>();
    }
}
