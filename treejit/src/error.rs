use crate::compile::Block;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    // Compile errors
    #[error("No label registered for block `{0}`")]
    MissingLabel(Block),

    #[error("Block `{0}` emitted twice")]
    DuplicateBlock(Block),

    #[error(transparent)]
    Backend(#[from] asm::Error),

    // Driver errors
    #[error(transparent)]
    Emu(#[from] emu::Error),

    #[error("Cannot open file `{0}`")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Invalid config `{0}`")]
    Config(String, #[source] serde_yaml::Error),

    #[error("Tree size {0} does not fit in i32 keys")]
    TreeTooLarge(usize),

    #[error("Lookup of {key} returned {actual}, tree has {expected}")]
    Mismatch { key: i32, expected: i32, actual: i32 },
}
