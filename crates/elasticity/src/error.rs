use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElasticityError {
    #[error("Invalid input for {0}: {1} (must be a positive number)")]
    InvalidInput(&'static str, f64),

    #[error("Calculation error: Division by zero encountered in metric '{0}'")]
    DivisionByZero(&'static str),
}
