use float_cmp::{approx_eq, F64Margin};
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::PointSet;

/// Install the logger for the tests. This can be called more than once.
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Get the seeded random number generator.
///
/// # Arguments
///
/// * `seed`: The seed number.
///
/// returns: `ChaCha8Rng`
pub(crate) fn get_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Generate random points in the unit hyper-cube.
///
/// # Arguments
///
/// * `rng`: The random number generator.
/// * `number_of_points`: The number of points to generate.
/// * `number_of_objectives`: The size of each point.
///
/// returns: `Vec<Vec<f64>>`
pub(crate) fn random_points(
    rng: &mut dyn RngCore,
    number_of_points: usize,
    number_of_objectives: usize,
) -> Vec<Vec<f64>> {
    (0..number_of_points)
        .map(|_| {
            (0..number_of_objectives)
                .map(|_| rng.gen_range(0.0..1.0))
                .collect()
        })
        .collect()
}

/// Generate random points lying on the positive unit sphere, so that no point dominates another.
///
/// # Arguments
///
/// * `rng`: The random number generator.
/// * `number_of_points`: The number of points to generate.
/// * `number_of_objectives`: The size of each point.
///
/// returns: `PointSet`
pub(crate) fn random_spherical_front(
    rng: &mut dyn RngCore,
    number_of_points: usize,
    number_of_objectives: usize,
) -> PointSet {
    let values: Vec<Vec<f64>> = random_points(rng, number_of_points, number_of_objectives)
        .into_iter()
        .map(|p| {
            let norm = p.iter().map(|v| v * v).sum::<f64>().sqrt().max(f64::EPSILON);
            p.iter().map(|v| v / norm).collect()
        })
        .collect();
    PointSet::from_values(&values).unwrap()
}

/// Compare two arrays of f64
pub(crate) fn assert_approx_array_eq(calculated_values: &[f64], expected_values: &[f64]) {
    assert_eq!(calculated_values.len(), expected_values.len());
    let margins = F64Margin {
        epsilon: 1e-6,
        ulps: 4,
    };
    for (i, (calculated, expected)) in calculated_values.iter().zip(expected_values).enumerate() {
        if !approx_eq!(f64, *calculated, *expected, margins) {
            panic!(
                r#"assertion failed on item #{i:?}
                    actual: `{calculated:?}`,
                    expected: `{expected:?}`"#,
            )
        }
    }
}
