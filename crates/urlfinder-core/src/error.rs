use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown search engine: {0}")]
    UnknownEngine(String),

    #[error("engine listed more than once: {0}")]
    DuplicateEngine(String),

    #[error("engine set must not be empty")]
    EmptyEngineSet,
}
