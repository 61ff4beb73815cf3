use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Malformed percentage value '{0}'")]
    MalformedPercentage(String),
}
