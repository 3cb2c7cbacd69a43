pub use error::OError;
pub use point::{Point, PointSet};
pub use problem::Problem;

pub mod error;
pub mod point;
pub mod problem;
#[cfg(test)]
pub(crate) mod test_utils;
