use std::cmp::Ordering;

use crate::utils::non_dominated_front;

/// This struct implements the slicing algorithm by While et al. (2012) to calculate the exact
/// hyper-volume of a set of points. All the objectives are maximised and the reference point must
/// be weakly dominated by every point (see [`crate::metrics::ReferenceTransform`]).
///
/// The points are sorted so that the worst value in the last objective comes first. The volume is
/// then the sum, for each point, of its distance from the reference in the last objective
/// multiplied by its exclusive hyper-volume in the remaining objectives, relative to the points
/// that follow it. Sets with one or two objectives are calculated in closed form.
///
/// The set may contain dominated or duplicated points; these are removed before the calculation.
///
/// > Lyndon While, Lucas Bradstreet, and Luigi Barone. A Fast Way of Calculating Exact
/// > Hypervolumes. IEEE Transactions on Evolutionary Computation 16(1), 2012.
///
/// # Example
/// ```
///  use optirustic_indicators::metrics::Wfg;
///
///  let points = vec![vec![1.0, 0.5], vec![0.5, 1.0]];
///  let hv = Wfg::new(&points, &[0.0, 0.0]);
///  assert_eq!(hv.calculate(), 0.75);
/// ```
pub struct Wfg {
    /// The reference point.
    reference_point: Vec<f64>,
    /// The objective values of the points.
    points: Vec<Vec<f64>>,
}

impl Wfg {
    /// Initialise the `Wfg` structure to calculate hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `points`: The objective values. Each item is a point with size equal to the number of
    ///   coordinates of the reference point.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Wfg`
    pub fn new(points: &[Vec<f64>], reference_point: &[f64]) -> Self {
        Self {
            reference_point: reference_point.to_vec(),
            points: points.to_vec(),
        }
    }

    /// Calculate the hyper-volume. This is `0` when there are no points.
    ///
    /// returns: `f64`
    pub fn calculate(&self) -> f64 {
        let obj_count = self.reference_point.len();
        if obj_count == 0 || self.points.is_empty() {
            return 0.0;
        }
        // the 2D sweep needs non-dominated points
        let front = non_dominated_front(self.points.clone());
        self.volume(front, obj_count)
    }

    /// Calculate the hyper-volume of a non-dominated `front` using its first `obj_count`
    /// objectives.
    ///
    /// # Arguments
    ///
    /// * `front`: The front being processed.
    /// * `obj_count`: The number of objectives.
    ///
    /// returns: `f64`
    fn volume(&self, mut front: Vec<Vec<f64>>, obj_count: usize) -> f64 {
        if front.is_empty() {
            return 0.0;
        }
        if obj_count == 1 {
            return front
                .iter()
                .map(|point| self.distance(point[0], 0))
                .fold(0.0, f64::max);
        }

        sort(&mut front, obj_count);
        if obj_count == 2 {
            return self.volume_2d(&front);
        }

        let last = obj_count - 1;
        let mut volume = 0.0;
        for i in (0..front.len()).rev() {
            volume += self.distance(front[i][last], last) * self.exclusive_hv(&front, i, last);
        }
        volume
    }

    /// Return the hyper-volume for a sorted 2D front.
    ///
    /// # Arguments
    ///
    /// * `front`: The front with the objective values.
    ///
    /// returns: `f64`
    fn volume_2d(&self, front: &[Vec<f64>]) -> f64 {
        let mut volume = self.distance(front[0][0], 0) * self.distance(front[0][1], 1);
        for i in 1..front.len() {
            volume += self.distance(front[i][0], 0) * (front[i][1] - front[i - 1][1]).abs();
        }
        volume
    }

    /// Calculate the exclusive hyper-volume of the point at `index` in the `front`, relative to
    /// the points that follow it.
    ///
    /// # Arguments
    ///
    /// * `front`: The sorted front.
    /// * `index`: The point index.
    /// * `obj_count`: The number of objectives.
    ///
    /// returns: `f64`
    fn exclusive_hv(&self, front: &[Vec<f64>], index: usize, obj_count: usize) -> f64 {
        let mut volume = self.inclusive_hv(&front[index], obj_count);
        if index + 1 < front.len() {
            volume -= self.volume(self.limit_set(front, index, obj_count), obj_count);
        }
        volume
    }

    /// Calculate the inclusive hyper-volume of a point (the volume of the box between the point
    /// and the reference point).
    ///
    /// # Arguments
    ///
    /// * `point`: The point.
    /// * `obj_count`: The number of objectives.
    ///
    /// returns: `f64`
    fn inclusive_hv(&self, point: &[f64], obj_count: usize) -> f64 {
        (0..obj_count)
            .map(|d| self.distance(point[d], d))
            .product()
    }

    /// Build the non-dominated limit set of the point at `index`. Each point that follows it is
    /// replaced with the worse value between the two points in each of the first `obj_count`
    /// objectives.
    ///
    /// # Arguments
    ///
    /// * `front`: The sorted front.
    /// * `index`: The point index.
    /// * `obj_count`: The number of objectives.
    ///
    /// returns: `Vec<Vec<f64>>`
    fn limit_set(&self, front: &[Vec<f64>], index: usize, obj_count: usize) -> Vec<Vec<f64>> {
        let point = &front[index];
        let limited: Vec<Vec<f64>> = front[index + 1..]
            .iter()
            .map(|other| (0..obj_count).map(|d| point[d].min(other[d])).collect())
            .collect();
        non_dominated_front(limited)
    }

    /// The distance of an objective value from the reference point.
    ///
    /// # Arguments
    ///
    /// * `value`: The objective value.
    /// * `objective`: The objective index.
    ///
    /// returns: `f64`
    fn distance(&self, value: f64, objective: usize) -> f64 {
        (value - self.reference_point[objective]).abs()
    }
}

/// Sort the points by the objective at `obj_count - 1` in ascending order. Ties are broken by
/// the preceding objectives in decreasing index order.
///
/// # Arguments
///
/// * `front`: The points to sort.
/// * `obj_count`: The number of objectives to process.
///
/// returns: `()`
fn sort(front: &mut [Vec<f64>], obj_count: usize) {
    front.sort_by(|a, b| {
        for i in (0..obj_count).rev() {
            match a[i].total_cmp(&b[i]) {
                Ordering::Equal => continue,
                ordering => return ordering,
            }
        }
        Ordering::Equal
    });
}
