use crate::label::Label;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Undefined label: `{0}`")]
    UnboundLabel(Label),

    #[error("Re-defined label: `{0}`")]
    RedefinedLabel(Label),

    #[error("Label `{0}` belongs to another assembler")]
    UnknownLabel(Label),

    #[error("Cannot move blocks `{0}`..`{1}`: not a placed range")]
    InvalidRange(Label, Label),

    #[error(transparent)]
    Program(#[from] arch::Error),
}
