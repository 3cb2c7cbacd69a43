use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::core::{OError, PointSet, Problem};
use crate::metrics::{Indicator, NativeCommand, Pisa, ReferenceTransform, Wfg};
use crate::normalisation::{Bounds, Normaliser, NormaliserConfig, EPS};

/// The algorithm used to calculate the exact hyper-volume.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub enum HyperVolumeAlgorithm {
    /// The slicing algorithm by While et al. (2012). See [`Wfg`].
    #[default]
    Wfg,
    /// The brute-force algorithm used by PISA. See [`Pisa`].
    Pisa,
    /// An external executable. See [`NativeCommand`].
    Native(NativeCommand),
}

impl HyperVolumeAlgorithm {
    /// The transform to apply to the normalised points before the calculation.
    ///
    /// returns: `ReferenceTransform`
    pub fn reference_transform(&self) -> ReferenceTransform {
        match self {
            HyperVolumeAlgorithm::Wfg | HyperVolumeAlgorithm::Pisa => {
                ReferenceTransform::inverted()
            }
            HyperVolumeAlgorithm::Native(command) => command.reference_transform(),
        }
    }

    /// Calculate the hyper-volume of the transformed points.
    ///
    /// # Arguments
    ///
    /// * `points`: The objective values returned by [`ReferenceTransform::prepare`].
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, OError>`
    pub fn calculate(&self, points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, OError> {
        match self {
            HyperVolumeAlgorithm::Wfg => Ok(Wfg::new(points, reference_point).calculate()),
            HyperVolumeAlgorithm::Pisa => Ok(Pisa::new(points, reference_point.len()).calculate()),
            HyperVolumeAlgorithm::Native(command) => command.calculate(points, reference_point),
        }
    }
}

/// Calculate the exact hyper-volume of a set of points for minimisation problems. The objectives
/// are first scaled in the unit hyper-cube, using bounds derived from a reference set or given
/// explicitly, so that the hyper-volume is always between `0` and `1`. The maximum bound is the
/// reference (or nadir) point.
///
/// Infeasible points and points beyond the reference point do not contribute to the
/// hyper-volume. The bounds are calculated once, when the indicator is created.
///
/// The indicator can be created from:
/// - a reference set using [`HyperVolume::from_reference_set`];
/// - a reference set and a reference point using [`HyperVolume::from_reference_point`];
/// - explicit bounds using [`HyperVolume::from_bounds`];
/// - a [`NormaliserConfig`] using [`HyperVolume::from_config`].
///
/// # Example
/// ```
///  use optirustic_indicators::core::PointSet;
///  use optirustic_indicators::metrics::{HyperVolume, HyperVolumeAlgorithm, Indicator};
///
///  let hv = HyperVolume::from_bounds(&[0.0, 0.0], &[2.0, 2.0])
///     .unwrap()
///     .with_algorithm(HyperVolumeAlgorithm::Pisa);
///  let set = PointSet::from_values(&[vec![0.5, 0.5]]).unwrap();
///  assert!((hv.evaluate(&set).unwrap() - 0.5625).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct HyperVolume {
    /// The number of objectives.
    number_of_objectives: usize,
    /// The normaliser.
    normaliser: Normaliser,
    /// The algorithm.
    algorithm: HyperVolumeAlgorithm,
    /// Whether the hyper-volume is calculated.
    enabled: bool,
}

impl HyperVolume {
    /// Create the indicator with the bounds calculated from a reference set. The maximum of each
    /// objective is expanded by a small fraction of its range ([`EPS`]), so that the extreme
    /// points of the reference set contribute to the hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `reference_set`: The reference set. This must contain at least two feasible points.
    ///
    /// returns: `Result<HyperVolume, OError>`
    pub fn from_reference_set(reference_set: &PointSet) -> Result<Self, OError> {
        let bounds = Bounds::from_population_with_delta(reference_set, EPS)?;
        Ok(Self::new(
            bounds.number_of_objectives(),
            Normaliser::Bounded(bounds),
            true,
        ))
    }

    /// Create the indicator with the minimum calculated from a reference set and an explicit
    /// reference point. When the reference point has fewer coordinates than the number of
    /// objectives, its last value is repeated.
    ///
    /// # Arguments
    ///
    /// * `reference_set`: The reference set. This must contain at least two feasible points.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<HyperVolume, OError>`
    pub fn from_reference_point(
        reference_set: &PointSet,
        reference_point: &[f64],
    ) -> Result<Self, OError> {
        let bounds = Bounds::from_population_with_reference_point(reference_set, reference_point)?;
        Ok(Self::new(
            bounds.number_of_objectives(),
            Normaliser::Bounded(bounds),
            true,
        ))
    }

    /// Create the indicator with explicit bounds. The number of objectives is the size of the
    /// longer vector.
    ///
    /// # Arguments
    ///
    /// * `minimum`: The minimum (or ideal) value of each objective.
    /// * `maximum`: The maximum value of each objective. This is the reference point.
    ///
    /// returns: `Result<HyperVolume, OError>`
    pub fn from_bounds(minimum: &[f64], maximum: &[f64]) -> Result<Self, OError> {
        let bounds = Bounds::new(minimum, maximum)?;
        Ok(Self::new(
            bounds.number_of_objectives(),
            Normaliser::Bounded(bounds),
            true,
        ))
    }

    /// Create the indicator for a problem using the normaliser resolved by the configuration.
    /// See [`NormaliserConfig::hypervolume_normaliser`]. When the hyper-volume is disabled in the
    /// configuration, the normaliser is not resolved and the indicator always returns `NaN`.
    ///
    /// # Arguments
    ///
    /// * `problem`: The problem.
    /// * `reference_set`: The reference set.
    /// * `config`: The configuration.
    ///
    /// returns: `Result<HyperVolume, OError>`
    pub fn from_config(
        problem: &Problem,
        reference_set: &PointSet,
        config: &NormaliserConfig,
    ) -> Result<Self, OError> {
        let enabled = config.is_hypervolume_enabled();
        let normaliser = if enabled {
            config.hypervolume_normaliser(problem, reference_set)?
        } else {
            info!("The hyper-volume is disabled for {}", problem.name());
            Normaliser::Disabled
        };
        Ok(Self::new(
            problem.number_of_objectives(),
            normaliser,
            enabled,
        ))
    }

    /// Use a different algorithm. [`HyperVolumeAlgorithm::Wfg`] is used by default.
    ///
    /// # Arguments
    ///
    /// * `algorithm`: The algorithm.
    ///
    /// returns: `HyperVolume`
    pub fn with_algorithm(mut self, algorithm: HyperVolumeAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Get the number of objectives.
    pub fn number_of_objectives(&self) -> usize {
        self.number_of_objectives
    }

    /// Get the normaliser.
    pub fn normaliser(&self) -> &Normaliser {
        &self.normaliser
    }

    /// Get the algorithm.
    pub fn algorithm(&self) -> &HyperVolumeAlgorithm {
        &self.algorithm
    }

    /// Calculate the hyper-volume of many sets in parallel.
    ///
    /// # Arguments
    ///
    /// * `sets`: The sets of points.
    ///
    /// returns: `Result<Vec<f64>, OError>`: the hyper-volume of each set in the same order.
    pub fn evaluate_all(&self, sets: &[PointSet]) -> Result<Vec<f64>, OError> {
        sets.par_iter().map(|set| self.evaluate(set)).collect()
    }

    fn new(number_of_objectives: usize, normaliser: Normaliser, enabled: bool) -> Self {
        if let Some(bounds) = normaliser.bounds() {
            info!(
                "Hyper-volume indicator for {} objectives with minimum = {:?} and reference point = {:?}",
                number_of_objectives,
                bounds.minimum(),
                bounds.maximum()
            );
        }
        Self {
            number_of_objectives,
            normaliser,
            algorithm: HyperVolumeAlgorithm::default(),
            enabled,
        }
    }
}

impl Indicator for HyperVolume {
    fn name(&self) -> &str {
        "Hyper-volume"
    }

    fn evaluate(&self, points: &PointSet) -> Result<f64, OError> {
        if !self.enabled {
            return Ok(f64::NAN);
        }
        if let Some(n) = points.number_of_objectives() {
            if n != self.number_of_objectives {
                return Err(OError::DimensionMismatch(
                    "candidate set".to_string(),
                    n,
                    self.number_of_objectives,
                ));
            }
        }

        let transform = self.algorithm.reference_transform();
        let (values, reference_point) =
            transform.prepare(points, &self.normaliser, self.number_of_objectives);
        self.algorithm.calculate(&values, &reference_point)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;
    use rand::prelude::SliceRandom;

    use crate::core::test_utils::{get_rng, init_logger, random_points, random_spherical_front};
    use crate::core::{OError, Point, PointSet, Problem};
    use crate::metrics::{HyperVolume, HyperVolumeAlgorithm, Indicator};
    use crate::normalisation::{NormaliserConfig, ProblemSettings};

    fn set(values: &[Vec<f64>]) -> PointSet {
        PointSet::from_values(values).unwrap()
    }

    fn assert_hv(hv: &HyperVolume, values: &[Vec<f64>], expected: f64) {
        assert_approx_eq!(
            f64,
            hv.evaluate(&set(values)).unwrap(),
            expected,
            epsilon = 1e-8
        );
    }

    /// Check the values for the default bounds, with the reference point at `[1, 1]`.
    fn check_default_bounds(hv: &HyperVolume) {
        assert_eq!(hv.evaluate(&PointSet::default()).unwrap(), 0.0);
        assert_hv(hv, &[vec![0.5, 0.5]], 0.25);
        assert_hv(hv, &[vec![0.0, 0.0]], 1.0);
        assert_hv(hv, &[vec![1.0, 1.0]], 0.0);
        assert_hv(hv, &[vec![2.0, 2.0]], 0.0);
        assert_hv(hv, &[vec![-0.5, -0.5]], 1.0);
        assert_hv(hv, &[vec![0.5, 0.0], vec![0.0, 0.5]], 0.75);
    }

    /// Check the values for the expanded bounds, with the reference point at `[2, 2]`.
    fn check_expanded_bounds(hv: &HyperVolume) {
        assert_hv(hv, &[vec![0.5, 0.5]], 0.5625);
        assert_hv(hv, &[vec![0.0, 0.0]], 1.0);
        assert_hv(hv, &[vec![1.0, 1.0]], 0.25);
        assert_hv(hv, &[vec![2.0, 2.0]], 0.0);
    }

    fn reference_set() -> PointSet {
        set(&[vec![0.0, 1.0], vec![1.0, 0.0]])
    }

    #[test]
    fn test_default_bounds() {
        init_logger();
        check_default_bounds(&HyperVolume::from_reference_set(&reference_set()).unwrap());
        check_default_bounds(&HyperVolume::from_bounds(&[0.0, 0.0], &[1.0, 1.0]).unwrap());
        check_default_bounds(
            &HyperVolume::from_reference_set(&reference_set())
                .unwrap()
                .with_algorithm(HyperVolumeAlgorithm::Pisa),
        );
    }

    #[test]
    fn test_expanded_bounds() {
        check_expanded_bounds(&HyperVolume::from_bounds(&[0.0, 0.0], &[2.0, 2.0]).unwrap());
        check_expanded_bounds(&HyperVolume::from_bounds(&[0.0], &[2.0, 2.0]).unwrap());
        check_expanded_bounds(
            &HyperVolume::from_reference_point(&reference_set(), &[2.0, 2.0]).unwrap(),
        );
    }

    #[test]
    /// The bounds are taken from the problem settings when the reference set is empty.
    fn test_from_config() {
        let problem = Problem::new("MockProblem", 2).unwrap();
        let config = NormaliserConfig::default().with_problem_settings(ProblemSettings {
            problem: "mockproblem".to_string(),
            ideal_point: Some(vec![0.0]),
            reference_point: Some(vec![2.0]),
            ..ProblemSettings::default()
        });
        let hv = HyperVolume::from_config(&problem, &PointSet::default(), &config).unwrap();
        assert_eq!(hv.number_of_objectives(), 2);
        check_expanded_bounds(&hv);

        let hv =
            HyperVolume::from_config(&problem, &reference_set(), &NormaliserConfig::default())
                .unwrap();
        check_default_bounds(&hv);

        let mut config = NormaliserConfig::default();
        config.disable_normalisation("MockProblem");
        let hv = HyperVolume::from_config(&problem, &PointSet::default(), &config).unwrap();
        assert_hv(&hv, &[vec![0.5, 0.5]], 0.25);
    }

    #[test]
    /// A disabled hyper-volume is NaN and does not need the reference set.
    fn test_disabled() {
        let problem = Problem::new("MockProblem", 2).unwrap();
        let config = NormaliserConfig::default().with_hypervolume_enabled(false);
        let hv = HyperVolume::from_config(&problem, &PointSet::default(), &config).unwrap();
        assert!(hv.evaluate(&set(&[vec![0.5, 0.5]])).unwrap().is_nan());
    }

    #[test]
    fn test_errors() {
        let err = HyperVolume::from_reference_set(&set(&[vec![0.0, 1.0]])).unwrap_err();
        assert!(matches!(err, OError::Normalisation(_)));

        let err = HyperVolume::from_bounds(&[0.0, 1.0], &[1.0, 1.0]).unwrap_err();
        assert!(matches!(err, OError::Normalisation(_)));

        // non-finite bounds
        let err = HyperVolume::from_bounds(&[0.0, 0.0], &[1.0, f64::NAN]).unwrap_err();
        assert!(matches!(err, OError::Normalisation(_)));
        let infinite = set(&[vec![0.0, 0.0], vec![1.0, f64::INFINITY]]);
        let err = HyperVolume::from_reference_set(&infinite).unwrap_err();
        assert!(matches!(err, OError::Normalisation(_)));

        // points without objectives
        let err = HyperVolume::from_reference_set(&set(&[vec![], vec![]])).unwrap_err();
        assert!(matches!(err, OError::NoObjective));

        let hv = HyperVolume::from_reference_set(&reference_set()).unwrap();
        let err = hv.evaluate(&set(&[vec![0.5, 0.5, 0.5]])).unwrap_err();
        assert!(matches!(err, OError::DimensionMismatch(_, 3, 2)));
    }

    #[test]
    fn test_infeasible() {
        let hv = HyperVolume::from_reference_set(&reference_set()).unwrap();
        let points = PointSet::new(vec![Point::with_constraints(vec![0.0, 0.0], &[1.0])]).unwrap();
        assert_eq!(hv.evaluate(&points).unwrap(), 0.0);
    }

    #[test]
    fn test_1d() {
        let hv = HyperVolume::from_bounds(&[0.0], &[1.0]).unwrap();
        assert_hv(&hv, &[vec![0.3]], 0.7);
        assert_hv(&hv, &[vec![0.3], vec![0.6], vec![1.5]], 0.7);
    }

    #[test]
    /// Points beyond the reference point are removed.
    fn test_pruning() {
        let hv = HyperVolume::from_bounds(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        assert_hv(&hv, &[vec![0.5, 0.5], vec![-1.0, 1.5], vec![1.5, -1.0]], 0.25);
    }

    #[test]
    /// The hyper-volume does not depend on the order of the points and is not changed by
    /// dominated points.
    fn test_order_and_dominated_points() {
        let mut rng = get_rng(1);
        for number_of_objectives in 2..=4 {
            let minimum = vec![0.0; number_of_objectives];
            let maximum = vec![1.0; number_of_objectives];
            let hv = HyperVolume::from_bounds(&minimum, &maximum).unwrap();

            let front = random_spherical_front(&mut rng, 15, number_of_objectives);
            let expected = hv.evaluate(&front).unwrap();
            assert!(expected > 0.0);

            let mut points = front.points().to_vec();
            points.shuffle(&mut rng);
            let shuffled = PointSet::new(points.clone()).unwrap();
            assert_approx_eq!(f64, hv.evaluate(&shuffled).unwrap(), expected, epsilon = 1e-12);

            // worse copies of the points
            for p in front.iter() {
                points.push(Point::new(
                    p.objectives().iter().map(|v| (v + 0.05).min(1.0)).collect(),
                ));
            }
            let with_dominated = PointSet::new(points).unwrap();
            assert_approx_eq!(
                f64,
                hv.evaluate(&with_dominated).unwrap(),
                expected,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    /// The hyper-volume is always between 0 and 1 and the algorithms agree.
    fn test_range_and_algorithms() {
        let mut rng = get_rng(5);
        for number_of_objectives in 2..=5 {
            let reference_set = set(&random_points(&mut rng, 10, number_of_objectives));
            let wfg = HyperVolume::from_reference_set(&reference_set).unwrap();
            let pisa = wfg.clone().with_algorithm(HyperVolumeAlgorithm::Pisa);

            for _ in 0..5 {
                let values: Vec<Vec<f64>> = random_points(&mut rng, 12, number_of_objectives)
                    .into_iter()
                    .map(|p| p.iter().map(|v| 2.0 * v - 0.5).collect())
                    .collect();
                let candidates = set(&values);
                let value = wfg.evaluate(&candidates).unwrap();
                assert!((0.0..=1.0).contains(&value), "{}", value);
                assert_approx_eq!(
                    f64,
                    value,
                    pisa.evaluate(&candidates).unwrap(),
                    epsilon = 1e-10
                );
            }

            // the reference set dominates a positive volume and the algorithms agree on it
            let value = wfg.evaluate(&reference_set).unwrap();
            assert!(value > 0.0 && value <= 1.0, "{}", value);
            assert_approx_eq!(
                f64,
                value,
                pisa.evaluate(&reference_set).unwrap(),
                epsilon = 1e-10
            );
        }
    }

    #[test]
    fn test_evaluate_all() {
        let hv = HyperVolume::from_bounds(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
        let sets = vec![
            set(&[vec![0.5, 0.5]]),
            PointSet::default(),
            set(&[vec![0.5, 0.0], vec![0.0, 0.5]]),
        ];
        let values = hv.evaluate_all(&sets).unwrap();
        assert_eq!(values.len(), 3);
        assert_approx_eq!(f64, values[0], 0.25, epsilon = 1e-12);
        assert_eq!(values[1], 0.0);
        assert_approx_eq!(f64, values[2], 0.75, epsilon = 1e-12);

        let err = hv.evaluate_all(&[set(&[vec![0.5]])]).unwrap_err();
        assert!(matches!(err, OError::DimensionMismatch(_, 1, 2)));
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HyperVolume>();
    }

    #[cfg(unix)]
    #[test]
    fn test_native() {
        let hv = HyperVolume::from_bounds(&[0.0, 0.0], &[1.0, 1.0])
            .unwrap()
            .with_algorithm(HyperVolumeAlgorithm::Native(
                crate::metrics::NativeCommand::new("echo {1} 0.42", true),
            ));
        assert_eq!(hv.evaluate(&set(&[vec![0.5, 0.5]])).unwrap(), 0.42);
        assert_eq!(hv.name(), "Hyper-volume");
    }
}
