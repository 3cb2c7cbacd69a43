use thiserror::Error;

#[derive(Error, Debug)]
/// Errors raised by the library.
pub enum OError {
    #[error("The following error occurred: {0}")]
    Generic(String),
    #[error("You must provide at least one objective to properly define a problem")]
    NoObjective,
    #[error("The normalisation bounds cannot be calculated: {0}")]
    Normalisation(String),
    #[error("The {0} has {1} dimensions, but {2} were expected")]
    DimensionMismatch(String, usize, usize),
    #[error("An error occurred in the calculation of the '{0}' metric: {1}")]
    Metric(String, String),
    #[error("NaN detected in the {0} at point #{1}")]
    NaN(String, usize),
    #[error("The normaliser configuration is not valid: {0}")]
    Config(String),
}
