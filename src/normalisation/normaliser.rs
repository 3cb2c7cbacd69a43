use log::warn;
use serde::{Deserialize, Serialize};

use crate::core::PointSet;
use crate::normalisation::Bounds;

/// Scale the objectives of a point set in the unit hyper-cube.
///
/// # Example
/// ```
///  use optirustic_indicators::core::PointSet;
///  use optirustic_indicators::normalisation::{Bounds, Normaliser};
///
///  let reference_set = PointSet::from_values(&[vec![0.0, 0.1], vec![10.0, -0.1]]).unwrap();
///  let normaliser = Normaliser::Bounded(Bounds::from_population(&reference_set).unwrap());
///
///  let set = PointSet::from_values(&[vec![5.0, 0.0]]).unwrap();
///  assert_eq!(normaliser.normalise(&set).points()[0].objectives(), &[0.5, 0.5]);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub enum Normaliser {
    /// Scale each objective using the minimum and maximum bounds. Infeasible points are removed.
    Bounded(Bounds),
    /// The normalisation is disabled and the points are returned as they are. This should be used
    /// when the objectives are already in the unit hyper-cube.
    Disabled,
}

impl Normaliser {
    /// Normalise the points. This returns a new set and leaves `points` untouched.
    ///
    /// # Arguments
    ///
    /// * `points`: The points to normalise.
    ///
    /// returns: `PointSet`
    pub fn normalise(&self, points: &PointSet) -> PointSet {
        match self {
            Normaliser::Bounded(bounds) => {
                let infeasible = points.len() - points.feasible().count();
                if infeasible > 0 {
                    warn!("{} infeasible points were removed from the set", infeasible);
                }
                PointSet::from_points_unchecked(
                    points
                        .feasible()
                        .map(|p| p.with_objectives(bounds.normalise(p.objectives())))
                        .collect(),
                )
            }
            Normaliser::Disabled => points.clone(),
        }
    }

    /// Get the normalisation bounds. This is `None` when the normalisation is disabled.
    ///
    /// returns: `Option<&Bounds>`
    pub fn bounds(&self) -> Option<&Bounds> {
        match self {
            Normaliser::Bounded(bounds) => Some(bounds),
            Normaliser::Disabled => None,
        }
    }
}
