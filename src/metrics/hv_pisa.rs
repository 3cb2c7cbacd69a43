use crate::utils::dominates;

/// Calculate the exact hyper-volume with the brute-force algorithm used by PISA. The set is
/// repeatedly filtered to the points that are non-dominated in all but the last objective; the
/// volume of this subset is multiplied by the distance up to the smallest value of the last
/// objective, and the points that do not extend beyond that value are then removed.
///
/// This is much slower than [`crate::metrics::Wfg`] and is mainly used to cross-check it. All the
/// objectives are maximised and the reference point is the origin.
///
/// > Eckart Zitzler and Lothar Thiele. Multiobjective Evolutionary Algorithms: A Comparative Case
/// > Study and the Strength Pareto Approach. IEEE Transactions on Evolutionary Computation 3(4),
/// > 1999.
pub struct Pisa {
    /// The objective values of the points.
    points: Vec<Vec<f64>>,
    /// The number of objectives.
    number_of_objectives: usize,
}

impl Pisa {
    /// Initialise the `Pisa` structure to calculate hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `points`: The objective values. These must not be negative.
    /// * `number_of_objectives`: The number of objectives.
    ///
    /// returns: `Pisa`
    pub fn new(points: &[Vec<f64>], number_of_objectives: usize) -> Self {
        Self {
            points: points.to_vec(),
            number_of_objectives,
        }
    }

    /// Calculate the hyper-volume. This is `0` when there are no points.
    ///
    /// returns: `f64`
    pub fn calculate(&self) -> f64 {
        match self.number_of_objectives {
            0 => 0.0,
            1 => self.points.iter().map(|p| p[0]).fold(0.0, f64::max),
            obj_count => {
                let mut population = self.points.clone();
                calculate_volume(&mut population, obj_count)
            }
        }
    }
}

/// Calculate the volume of the `population` using the first `obj_count` objectives. The points
/// are reordered in place.
fn calculate_volume(population: &mut [Vec<f64>], obj_count: usize) -> f64 {
    let last = obj_count - 1;
    let mut volume = 0.0;
    let mut distance = 0.0;
    let mut n = population.len();

    while n > 0 {
        let non_dominated = filter_non_dominated(&mut population[..n], last);
        let slice_volume = if obj_count < 3 {
            population[0][0]
        } else {
            calculate_volume(&mut population[..non_dominated], last)
        };

        let slice_distance = population[..n]
            .iter()
            .map(|p| p[last])
            .fold(f64::INFINITY, f64::min);
        volume += slice_volume * (slice_distance - distance);
        distance = slice_distance;
        n = remove_below(&mut population[..n], last, distance);
    }
    volume
}

/// Move the non-dominated points, using the first `obj_count` objectives, to the front of the
/// population and return their number.
fn filter_non_dominated(population: &mut [Vec<f64>], obj_count: usize) -> usize {
    let mut i = 0;
    let mut n = population.len();
    while i < n {
        let mut j = i + 1;
        let mut keep_i = true;
        while j < n {
            if dominates(&population[i][..obj_count], &population[j][..obj_count]) {
                n -= 1;
                population.swap(j, n);
            } else if dominates(&population[j][..obj_count], &population[i][..obj_count]) {
                // the point moved to i is checked again
                n -= 1;
                population.swap(i, n);
                keep_i = false;
                break;
            } else {
                j += 1;
            }
        }
        if keep_i {
            i += 1;
        }
    }
    n
}

/// Move the points whose `objective` is at most `threshold` to the end of the population and
/// return the number of remaining points.
fn remove_below(population: &mut [Vec<f64>], objective: usize, threshold: f64) -> usize {
    let mut i = 0;
    let mut n = population.len();
    while i < n {
        if population[i][objective] <= threshold {
            n -= 1;
            population.swap(i, n);
        } else {
            i += 1;
        }
    }
    n
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::metrics::Pisa;

    #[test]
    fn test_2d() {
        let hv = Pisa::new(&[vec![1.0, 0.5], vec![0.5, 1.0], vec![0.4, 0.4]], 2);
        assert_approx_eq!(f64, hv.calculate(), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_3d() {
        let points = vec![
            vec![1.0, 0.5, 0.5],
            vec![0.5, 1.0, 0.5],
            vec![0.5, 0.5, 1.0],
            vec![0.5, 0.5, 1.0],
        ];
        assert_approx_eq!(f64, Pisa::new(&points, 3).calculate(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(Pisa::new(&[], 3).calculate(), 0.0);
        assert_eq!(Pisa::new(&[vec![0.3], vec![0.7]], 1).calculate(), 0.7);
        assert_eq!(Pisa::new(&[vec![0.0, 0.0]], 2).calculate(), 0.0);
    }
}
