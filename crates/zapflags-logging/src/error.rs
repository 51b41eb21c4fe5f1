use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoggerError {
    #[error("Failed to install logger: {0}")]
    Install(#[from] tracing::dispatcher::SetGlobalDefaultError),
}
