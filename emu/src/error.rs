use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot open file `{0}`")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Cannot write file `{0}`")]
    FileWrite(String, #[source] std::io::Error),

    #[error("Invalid program in `{0}`")]
    Load(String, #[source] arch::Error),

    #[error("No return within {0} steps")]
    Timeout(u64),
}
