use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocError {
    #[error("docstore: storage error: {0}")]
    Storage(String),

    #[error("docstore: serialization error: {0}")]
    Serialization(String),
}
