use crate::error::Error;
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Handle to an instruction position that may not be placed yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Label {
    owner: u32,
    id: u32,
}

impl Label {
    pub(crate) fn id(self) -> usize {
        self.id as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unresolved,
    Bound,
}

/// Every label created by one assembler, in creation order.
#[derive(Debug)]
pub(crate) struct Labels {
    owner: u32,
    states: Vec<State>,
}

impl Labels {
    pub fn new() -> Self {
        static NEXT_OWNER: AtomicU32 = AtomicU32::new(0);
        Labels {
            owner: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
            states: Vec::new(),
        }
    }

    pub fn create(&mut self) -> Label {
        let id = self.states.len() as u32;
        self.states.push(State::Unresolved);
        Label {
            owner: self.owner,
            id,
        }
    }

    pub fn check(&self, label: Label) -> Result<(), Error> {
        if label.owner != self.owner || label.id() >= self.states.len() {
            return Err(Error::UnknownLabel(label));
        }
        Ok(())
    }

    pub fn bind(&mut self, label: Label) -> Result<(), Error> {
        self.check(label)?;
        match std::mem::replace(&mut self.states[label.id()], State::Bound) {
            State::Unresolved => Ok(()),
            State::Bound => Err(Error::RedefinedLabel(label)),
        }
    }

    pub fn is_bound(&self, label: Label) -> bool {
        self.check(label).is_ok() && self.states[label.id()] == State::Bound
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }
}
