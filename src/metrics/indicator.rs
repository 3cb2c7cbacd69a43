use crate::core::{OError, PointSet};

/// A quality indicator that maps a set of points to a single value.
pub trait Indicator {
    /// The indicator name.
    ///
    /// returns: `&str`
    fn name(&self) -> &str;

    /// Calculate the indicator for a set of points.
    ///
    /// # Arguments
    ///
    /// * `points`: The points to evaluate. The set may contain dominated, duplicated or infeasible
    ///   points.
    ///
    /// returns: `Result<f64, OError>`
    fn evaluate(&self, points: &PointSet) -> Result<f64, OError>;
}
