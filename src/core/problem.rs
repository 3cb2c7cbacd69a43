use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::core::OError;

/// The problem the point sets are calculated for. The indicators only need the problem name, to
/// look up any problem-specific normalisation setting, and the number of objectives.
///
/// # Example
/// ```
///  use optirustic_indicators::core::Problem;
///
///  let problem = Problem::new("DTLZ2", 3).unwrap();
///  assert!(problem.matches("dtlz2"));
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Problem {
    /// The problem name.
    name: String,
    /// The number of objectives.
    number_of_objectives: usize,
}

impl Problem {
    /// Create a new problem.
    ///
    /// # Arguments
    ///
    /// * `name`: The problem name.
    /// * `number_of_objectives`: The number of objectives. This must be at least 1.
    ///
    /// returns: `Result<Problem, OError>`
    pub fn new(name: &str, number_of_objectives: usize) -> Result<Self, OError> {
        if number_of_objectives == 0 {
            return Err(OError::NoObjective);
        }
        Ok(Self {
            name: name.to_string(),
            number_of_objectives,
        })
    }

    /// Get the problem name.
    ///
    /// returns: `&str`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of objectives.
    ///
    /// returns: `usize`
    pub fn number_of_objectives(&self) -> usize {
        self.number_of_objectives
    }

    /// Whether the problem name matches `name`, ignoring the case.
    ///
    /// # Arguments
    ///
    /// * `name`: The name to check.
    ///
    /// returns: `bool`
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

impl Display for Problem {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Problem '{}' with {} objectives",
            self.name, self.number_of_objectives
        )
    }
}
