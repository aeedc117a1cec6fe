pub mod cmp;
pub mod error;
pub mod inst;
pub mod op;
pub mod program;
pub mod reg;

pub use error::Error;
pub use program::Program;
