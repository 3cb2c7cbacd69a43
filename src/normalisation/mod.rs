//! Scale the objectives of a point set into the unit hyper-cube. The bounds are either derived
//! from a reference set or given explicitly; [`NormaliserConfig`] resolves which normaliser to use
//! for a problem.
pub use bounds::{Bounds, EPS};
pub use config::{NormaliserConfig, NormaliserOverride, ProblemOverride, ProblemSettings};
pub use normaliser::Normaliser;

mod bounds;
mod config;
mod normaliser;
