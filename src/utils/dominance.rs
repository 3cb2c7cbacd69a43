//! Pareto dominance for points whose coordinates are all maximised. This is the orientation the
//! hyper-volume algorithms work with, once the objectives have been reflected by
//! [`crate::metrics::ReferenceTransform`].

/// Check whether the point `a` dominates `b`: `a` is not worse than `b` in any coordinate and
/// strictly better in at least one. Only the first `min(a.len(), b.len())` coordinates are
/// compared.
///
/// # Arguments
///
/// * `a`: The first point.
/// * `b`: The second point.
///
/// returns: `bool`
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut better_in_any = false;
    for (va, vb) in a.iter().zip(b) {
        if va < vb {
            return false;
        } else if va > vb {
            better_in_any = true;
        }
    }
    better_in_any
}

/// Check whether the point `a` weakly dominates `b`: `a` is not worse than `b` in any coordinate.
/// Identical points weakly dominate each other.
///
/// # Arguments
///
/// * `a`: The first point.
/// * `b`: The second point.
///
/// returns: `bool`
pub fn weakly_dominates(a: &[f64], b: &[f64]) -> bool {
    a.iter().zip(b).all(|(va, vb)| va >= vb)
}

/// Get the non-dominated points of a set. Dominated points are removed and, when the same point
/// appears more than once, only its first occurrence is kept. The order of the retained points is
/// preserved.
///
/// # Arguments
///
/// * `points`: The points to filter.
///
/// returns: `Vec<Vec<f64>>`
pub fn non_dominated_front(points: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let mut front: Vec<Vec<f64>> = Vec::with_capacity(points.len());
    for point in points {
        if front.iter().any(|kept| weakly_dominates(kept, &point)) {
            continue;
        }
        front.retain(|kept| !weakly_dominates(&point, kept));
        front.push(point);
    }
    front
}

#[cfg(test)]
mod test {
    use crate::utils::{dominates, non_dominated_front, weakly_dominates};

    #[test]
    fn test_dominance() {
        assert!(dominates(&[1.0, 0.5], &[0.5, 0.5]));
        assert!(!dominates(&[0.5, 0.5], &[0.5, 0.5]));
        assert!(!dominates(&[1.0, 0.0], &[0.0, 1.0]));
        assert!(weakly_dominates(&[0.5, 0.5], &[0.5, 0.5]));
        assert!(!weakly_dominates(&[1.0, 0.0], &[0.0, 1.0]));
    }

    #[test]
    /// Dominated points and duplicates are removed.
    fn test_non_dominated_front() {
        let points = vec![
            vec![0.2, 0.2],
            vec![1.0, 0.5],
            vec![0.5, 1.0],
            vec![1.0, 0.5],
            vec![0.4, 0.9],
            vec![0.0, 1.0],
        ];
        assert_eq!(
            non_dominated_front(points),
            vec![vec![1.0, 0.5], vec![0.5, 1.0]]
        );
        assert!(non_dominated_front(vec![]).is_empty());
    }
}
