use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::{OError, PointSet};
use crate::utils::vector_range;

/// The smallest range allowed between the minimum and maximum bound of an objective.
pub const EPS: f64 = 1e-10;

/// The minimum and maximum value of each objective used to scale the objectives in the unit
/// hyper-cube. The maximum is the reference (or nadir) point of the hyper-volume.
///
/// The range of every objective must be at least [`EPS`], otherwise the bounds are rejected.
///
/// # Example
/// ```
///  use optirustic_indicators::core::PointSet;
///  use optirustic_indicators::normalisation::Bounds;
///
///  let reference_set = PointSet::from_values(&[vec![0.0, 0.1], vec![10.0, -0.1]]).unwrap();
///  let bounds = Bounds::from_population(&reference_set).unwrap();
///  assert_eq!(bounds.minimum(), &[0.0, -0.1]);
///  assert_eq!(bounds.maximum(), &[10.0, 0.1]);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Bounds {
    /// The minimum (or ideal) value of each objective.
    minimum: Vec<f64>,
    /// The maximum value of each objective.
    maximum: Vec<f64>,
}

impl Bounds {
    /// Create the bounds from explicit values. When the two vectors have different sizes, the
    /// last value of the shorter vector is repeated.
    ///
    /// # Arguments
    ///
    /// * `minimum`: The minimum value of each objective.
    /// * `maximum`: The maximum value of each objective.
    ///
    /// returns: `Result<Bounds, OError>`
    pub fn new(minimum: &[f64], maximum: &[f64]) -> Result<Self, OError> {
        let size = minimum.len().max(maximum.len());
        if minimum.is_empty() {
            return Err(OError::DimensionMismatch(
                "minimum point".to_string(),
                0,
                size.max(1),
            ));
        }
        if maximum.is_empty() {
            return Err(OError::DimensionMismatch(
                "maximum point".to_string(),
                0,
                size.max(1),
            ));
        }

        Self {
            minimum: broadcast(minimum, size),
            maximum: broadcast(maximum, size),
        }
        .validate()
    }

    /// Calculate the bounds from the extreme objective values of the feasible points in a
    /// reference population.
    ///
    /// # Arguments
    ///
    /// * `population`: The reference population. This must contain at least two feasible points.
    ///
    /// returns: `Result<Bounds, OError>`
    pub fn from_population(population: &PointSet) -> Result<Self, OError> {
        Self::extrema(population)?.validate()
    }

    /// Calculate the bounds from the extreme objective values of the feasible points in a
    /// reference population and expand the maximum by a fraction of each objective range. This
    /// ensures that the extreme points of the population contribute to the hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `population`: The reference population. This must contain at least two feasible points.
    /// * `delta`: The fraction of the objective range added to the maximum.
    ///
    /// returns: `Result<Bounds, OError>`
    pub fn from_population_with_delta(population: &PointSet, delta: f64) -> Result<Self, OError> {
        let mut bounds = Self::extrema(population)?;
        for (min, max) in bounds.minimum.iter().zip(bounds.maximum.iter_mut()) {
            *max += delta * (*max - *min);
        }
        bounds.validate()
    }

    /// Calculate the minimum from the feasible points in a reference population and use the
    /// given reference point as maximum. If the reference point has fewer coordinates than the
    /// number of objectives, its last value is repeated.
    ///
    /// # Arguments
    ///
    /// * `population`: The reference population. This must contain at least two feasible points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<Bounds, OError>`
    pub fn from_population_with_reference_point(
        population: &PointSet,
        reference_point: &[f64],
    ) -> Result<Self, OError> {
        let mut bounds = Self::extrema(population)?;
        if reference_point.is_empty() {
            return Err(OError::DimensionMismatch(
                "reference point".to_string(),
                0,
                bounds.number_of_objectives(),
            ));
        }
        bounds.maximum = broadcast(reference_point, bounds.number_of_objectives());
        bounds.validate()
    }

    /// Get the minimum value of each objective.
    ///
    /// returns: `&[f64]`
    pub fn minimum(&self) -> &[f64] {
        &self.minimum
    }

    /// Get the maximum value of each objective.
    ///
    /// returns: `&[f64]`
    pub fn maximum(&self) -> &[f64] {
        &self.maximum
    }

    /// The number of objectives the bounds are defined for.
    ///
    /// returns: `usize`
    pub fn number_of_objectives(&self) -> usize {
        self.minimum.len()
    }

    /// Repeat the last bound values so that the bounds cover `number_of_objectives` objectives.
    /// This returns an error if the bounds already have more values than `number_of_objectives`.
    ///
    /// # Arguments
    ///
    /// * `number_of_objectives`: The number of objectives.
    ///
    /// returns: `Result<Bounds, OError>`
    pub fn expand(&self, number_of_objectives: usize) -> Result<Self, OError> {
        if self.number_of_objectives() > number_of_objectives {
            return Err(OError::DimensionMismatch(
                "normalisation bounds".to_string(),
                self.number_of_objectives(),
                number_of_objectives,
            ));
        }
        Ok(Self {
            minimum: broadcast(&self.minimum, number_of_objectives),
            maximum: broadcast(&self.maximum, number_of_objectives),
        })
    }

    /// Scale the objective values of a point. If the point has more objectives than the bounds,
    /// the last bounds are used for the extra objectives.
    ///
    /// # Arguments
    ///
    /// * `objectives`: The objective values.
    ///
    /// returns: `Vec<f64>`
    pub fn normalise(&self, objectives: &[f64]) -> Vec<f64> {
        let last = self.number_of_objectives() - 1;
        objectives
            .iter()
            .enumerate()
            .map(|(d, value)| {
                let d = d.min(last);
                (value - self.minimum[d]) / (self.maximum[d] - self.minimum[d])
            })
            .collect()
    }

    /// Get the minimum and maximum of each objective from the feasible points.
    fn extrema(population: &PointSet) -> Result<Self, OError> {
        let feasible_count = population.feasible().count();
        if feasible_count < 2 {
            return Err(OError::Normalisation(format!(
                "insufficient data to infer the bounds: at least 2 feasible points are needed, but {} were found",
                feasible_count
            )));
        }

        // number_of_objectives is always set when there is at least one point
        let number_of_objectives = population.number_of_objectives().unwrap_or_default();
        if number_of_objectives == 0 {
            return Err(OError::NoObjective);
        }
        let mut minimum = Vec::with_capacity(number_of_objectives);
        let mut maximum = Vec::with_capacity(number_of_objectives);
        for d in 0..number_of_objectives {
            let (min, max) = vector_range(&population.feasible_objective_values(d))?;
            minimum.push(min);
            maximum.push(max);
        }

        Ok(Self { minimum, maximum })
    }

    /// Check that the bounds are finite and that the range of each objective is not degenerate.
    fn validate(self) -> Result<Self, OError> {
        for (d, (min, max)) in self.minimum.iter().zip(&self.maximum).enumerate() {
            if !min.is_finite() || !max.is_finite() {
                return Err(OError::Normalisation(format!(
                    "non-finite bound at dimension {}: the minimum ({}) and maximum ({}) must be finite (minimum = {:?}, maximum = {:?})",
                    d, min, max, self.minimum, self.maximum
                )));
            }
            if (max - min).abs() < EPS {
                return Err(OError::Normalisation(format!(
                    "degenerate objective range at dimension {}: the minimum ({}) and maximum ({}) must differ by at least {} (minimum = {:?}, maximum = {:?})",
                    d, min, max, EPS, self.minimum, self.maximum
                )));
            }
        }
        debug!(
            "Using normalisation bounds minimum = {:?}, maximum = {:?}",
            self.minimum, self.maximum
        );
        Ok(self)
    }
}

/// Resize `values` to `size` by repeating its last item. `values` must not be empty.
fn broadcast(values: &[f64], size: usize) -> Vec<f64> {
    let last = values[values.len() - 1];
    (0..size)
        .map(|i| values.get(i).copied().unwrap_or(last))
        .collect()
}
