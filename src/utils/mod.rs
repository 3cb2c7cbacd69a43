pub use dominance::{dominates, non_dominated_front, weakly_dominates};
pub use vectors::vector_range;

mod dominance;
mod vectors;
