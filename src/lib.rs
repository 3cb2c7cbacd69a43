//! Exact hyper-volume indicator for multi-objective optimisation benchmarks.
//!
//! The hyper-volume measures the volume of the objective space dominated by a set of points and
//! bounded by a reference (or nadir) point. The calculation is split in three stages:
//!
//! 1. [`normalisation`]: the objectives are scaled into the unit hyper-cube using bounds derived
//!    from a reference set (or given explicitly).
//! 2. [`metrics::ReferenceTransform`]: points beyond the nadir point are pruned and the remaining
//!    coordinates are reflected so that all objectives are maximised and the reference point is
//!    the origin.
//! 3. [`metrics::Wfg`]: the exact hyper-volume is calculated with the slicing algorithm by While
//!    et al. (2012).
//!
//! [`metrics::HyperVolume`] puts these stages together behind the [`metrics::Indicator`] trait.
//!
//! # Example
//! ```
//! use optirustic_indicators::core::PointSet;
//! use optirustic_indicators::metrics::{HyperVolume, Indicator};
//!
//! let hv = HyperVolume::from_bounds(&[0.0, 0.0], &[1.0, 1.0]).unwrap();
//! let front = PointSet::from_values(&[vec![0.0, 0.5], vec![0.5, 0.0]]).unwrap();
//! assert!((hv.evaluate(&front).unwrap() - 0.75).abs() < 1e-12);
//! ```
pub mod core;
pub mod metrics;
pub mod normalisation;
pub mod utils;
