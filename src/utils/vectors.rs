use crate::core::OError;

/// Get the smallest and largest value in a vector.
///
/// # Arguments
///
/// * `v`: The vector.
///
/// returns: `Result<(f64, f64), OError>`: the minimum and maximum.
pub fn vector_range(v: &[f64]) -> Result<(f64, f64), OError> {
    let first = *v.first().ok_or(OError::Generic(
        "Cannot calculate the range of an empty vector".to_string(),
    ))?;
    Ok(v.iter()
        .fold((first, first), |(min, max), value| {
            (min.min(*value), max.max(*value))
        }))
}
