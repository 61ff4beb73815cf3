use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Invalid record value: {0}")]
    Record(#[from] CoreError),
}
