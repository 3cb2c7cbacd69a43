use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::core::OError;

/// A point in the objective space. This stores the objective values of a solution and whether the
/// solution meets all the problem constraints.
///
/// # Example
/// ```
///  use optirustic_indicators::core::Point;
///
///  let feasible = Point::new(vec![0.2, 0.4]);
///  assert!(feasible.is_feasible());
///
///  let infeasible = Point::with_constraints(vec![0.2, 0.4], &[0.0, -1.5]);
///  assert!(!infeasible.is_feasible());
///  assert_eq!(infeasible.constraint_violation(), 1.5);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Point {
    /// The objective values.
    objectives: Vec<f64>,
    /// The overall amount of violation of the constraints. This is `0` when the point is feasible.
    #[serde(default)]
    constraint_violation: f64,
}

impl Point {
    /// Create a new feasible point.
    ///
    /// # Arguments
    ///
    /// * `objectives`: The objective values.
    ///
    /// returns: `Point`
    pub fn new(objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            constraint_violation: 0.0,
        }
    }

    /// Create a new point with the constraint values. A constraint is met when its value is `0`;
    /// any other value is a violation and its magnitude is added to the overall violation.
    ///
    /// # Arguments
    ///
    /// * `objectives`: The objective values.
    /// * `constraints`: The constraint values.
    ///
    /// returns: `Point`
    pub fn with_constraints(objectives: Vec<f64>, constraints: &[f64]) -> Self {
        Self {
            objectives,
            constraint_violation: constraints.iter().map(|c| c.abs()).sum(),
        }
    }

    /// Get the objective values.
    ///
    /// returns: `&[f64]`
    pub fn objectives(&self) -> &[f64] {
        &self.objectives
    }

    /// Get the number of objectives (or dimensions) of the point.
    ///
    /// returns: `usize`
    pub fn number_of_objectives(&self) -> usize {
        self.objectives.len()
    }

    /// Get the overall amount of constraint violation.
    ///
    /// returns: `f64`
    pub fn constraint_violation(&self) -> f64 {
        self.constraint_violation
    }

    /// Whether the point meets all the constraints.
    ///
    /// returns: `bool`
    pub fn is_feasible(&self) -> bool {
        self.constraint_violation == 0.0
    }

    /// Create a new point with different objective values and the same constraint violation.
    pub(crate) fn with_objectives(&self, objectives: Vec<f64>) -> Self {
        Self {
            objectives,
            constraint_violation: self.constraint_violation,
        }
    }
}

impl From<Vec<f64>> for Point {
    fn from(objectives: Vec<f64>) -> Self {
        Point::new(objectives)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Point(objectives={:?}, constraint_violation={})",
            self.objectives, self.constraint_violation
        )
    }
}

/// An unordered collection of points with the same number of objectives. The set may contain
/// dominated, duplicated or infeasible points.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PointSet(Vec<Point>);

impl PointSet {
    /// Create a new set. This returns an error if the points do not have the same number of
    /// objectives or if any objective is NaN.
    ///
    /// # Arguments
    ///
    /// * `points`: The points.
    ///
    /// returns: `Result<PointSet, OError>`
    pub fn new(points: Vec<Point>) -> Result<Self, OError> {
        if let Some(first) = points.first() {
            let expected = first.number_of_objectives();
            for (idx, point) in points.iter().enumerate() {
                if point.number_of_objectives() != expected {
                    return Err(OError::DimensionMismatch(
                        format!("point #{}", idx),
                        point.number_of_objectives(),
                        expected,
                    ));
                }
                if point.objectives.iter().any(|v| v.is_nan()) {
                    return Err(OError::NaN("point set".to_string(), idx));
                }
            }
        }
        Ok(Self(points))
    }

    /// Create a set of feasible points from their objective values.
    ///
    /// # Arguments
    ///
    /// * `values`: The objective values. Each item is a point.
    ///
    /// returns: `Result<PointSet, OError>`
    pub fn from_values(values: &[Vec<f64>]) -> Result<Self, OError> {
        Self::new(values.iter().map(|v| Point::new(v.clone())).collect())
    }

    /// Create a set without checking the points. This is used when the points are derived from
    /// an already validated set.
    pub(crate) fn from_points_unchecked(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Get the points in the set.
    ///
    /// returns: `&[Point]`
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Iterate over the points.
    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }

    /// Iterate over the feasible points only.
    pub fn feasible(&self) -> impl Iterator<Item = &Point> {
        self.0.iter().filter(|p| p.is_feasible())
    }

    /// The number of points in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set has no points.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of objectives of the points in the set. This is `None` when the set is empty.
    ///
    /// returns: `Option<usize>`
    pub fn number_of_objectives(&self) -> Option<usize> {
        self.0.first().map(|p| p.number_of_objectives())
    }

    /// Collect the values of an objective from the feasible points.
    ///
    /// # Arguments
    ///
    /// * `index`: The objective index.
    ///
    /// returns: `Vec<f64>`
    pub fn feasible_objective_values(&self, index: usize) -> Vec<f64> {
        self.feasible()
            .filter_map(|p| p.objectives.get(index).copied())
            .collect()
    }
}

impl<'a> IntoIterator for &'a PointSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod test {
    use crate::core::{OError, Point, PointSet};

    #[test]
    /// Points with a different number of objectives are rejected.
    fn test_dimension_mismatch() {
        let err = PointSet::from_values(&[vec![0.0, 1.0], vec![1.0, 0.0, 2.0]]).unwrap_err();
        assert!(matches!(err, OError::DimensionMismatch(_, 3, 2)));
        assert_eq!(
            err.to_string(),
            "The point #1 has 3 dimensions, but 2 were expected"
        );
    }

    #[test]
    fn test_nan() {
        let err = PointSet::from_values(&[vec![0.0, 1.0], vec![f64::NAN, 0.0]]).unwrap_err();
        assert!(matches!(err, OError::NaN(_, 1)));
    }

    #[test]
    /// Only feasible values are collected.
    fn test_feasible_values() {
        let set = PointSet::new(vec![
            Point::new(vec![0.0, 1.0]),
            Point::with_constraints(vec![5.0, 5.0], &[2.0]),
            Point::new(vec![1.0, 0.0]),
        ])
        .unwrap();

        assert_eq!(set.len(), 3);
        assert_eq!(set.feasible().count(), 2);
        assert_eq!(set.feasible_objective_values(0), vec![0.0, 1.0]);
        assert_eq!(set.feasible_objective_values(1), vec![1.0, 0.0]);
        assert_eq!(set.number_of_objectives(), Some(2));
        assert_eq!(PointSet::default().number_of_objectives(), None);
    }
}
