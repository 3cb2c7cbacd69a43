use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::core::PointSet;
use crate::normalisation::Normaliser;

/// Prepare a set of points for the hyper-volume algorithms. The points are normalised, and those
/// with any coordinate beyond the nadir point (larger than `1` after the normalisation) are
/// removed.
///
/// When the transform is inverted, the coordinates of the remaining points are clamped to
/// `[0, 1]` and reflected with `1 - v`. All the objectives are then maximised and the reference
/// point is the origin, so that each coordinate equals the distance from the nadir bound. When the
/// transform is not inverted, the points are left in the minimisation space and the reference
/// point is `[1, ..., 1]`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ReferenceTransform {
    inverted: bool,
}

impl ReferenceTransform {
    /// Reflect the points so that all objectives are maximised.
    pub fn inverted() -> Self {
        Self { inverted: true }
    }

    /// Keep the points in the minimisation space.
    pub fn non_inverted() -> Self {
        Self { inverted: false }
    }

    /// Whether the points are reflected.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Get the reference point for the transformed points.
    ///
    /// # Arguments
    ///
    /// * `number_of_objectives`: The number of objectives.
    ///
    /// returns: `Vec<f64>`
    pub fn reference_point(&self, number_of_objectives: usize) -> Vec<f64> {
        let nadir = if self.inverted { 0.0 } else { 1.0 };
        vec![nadir; number_of_objectives]
    }

    /// Normalise, prune and (optionally) reflect the points.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    /// * `normaliser`: The normaliser used to scale the objectives.
    /// * `number_of_objectives`: The number of objectives.
    ///
    /// returns: `(Vec<Vec<f64>>, Vec<f64>)`: the transformed objective values and the reference
    /// point.
    pub fn prepare(
        &self,
        points: &PointSet,
        normaliser: &Normaliser,
        number_of_objectives: usize,
    ) -> (Vec<Vec<f64>>, Vec<f64>) {
        let normalised = normaliser.normalise(points);

        let mut pruned = 0;
        let mut values = Vec::with_capacity(normalised.len());
        for point in normalised.iter() {
            if point.objectives().iter().any(|v| *v > 1.0) {
                pruned += 1;
                continue;
            }
            let objectives = if self.inverted {
                point
                    .objectives()
                    .iter()
                    .map(|v| 1.0 - v.clamp(0.0, 1.0))
                    .collect()
            } else {
                point.objectives().to_vec()
            };
            values.push(objectives);
        }

        if pruned > 0 {
            warn!(
                "{} points beyond the reference point were removed from the set",
                pruned
            );
        }
        debug!(
            "{} points are used to calculate the hyper-volume",
            values.len()
        );

        (values, self.reference_point(number_of_objectives))
    }
}
