use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::{OError, PointSet, Problem};
use crate::normalisation::{Bounds, Normaliser, EPS};

/// A normaliser set by the user for a problem.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NormaliserOverride {
    /// Do not normalise the objectives.
    Disabled,
    /// Normalise the objectives using explicit bounds. When a vector is shorter than the number
    /// of objectives, its last value is repeated.
    Bounds {
        minimum: Vec<f64>,
        maximum: Vec<f64>,
    },
}

/// A [`NormaliserOverride`] assigned to a problem name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ProblemOverride {
    /// The problem name. This is matched ignoring the case.
    pub problem: String,
    /// The normaliser to use.
    pub normaliser: NormaliserOverride,
}

/// The normalisation settings for a problem.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProblemSettings {
    /// The problem name. This is matched ignoring the case.
    pub problem: String,
    /// Whether the normalisation is disabled.
    #[serde(default)]
    pub disable_normalisation: bool,
    /// The ideal point used as minimum bound.
    #[serde(default)]
    pub ideal_point: Option<Vec<f64>>,
    /// The reference point used as maximum bound.
    #[serde(default)]
    pub reference_point: Option<Vec<f64>>,
    /// The delta applied to the maximum of the reference set for the hyper-volume.
    #[serde(default)]
    pub hypervolume_delta: Option<f64>,
}

fn default_hypervolume_delta() -> f64 {
    EPS
}

fn default_true() -> bool {
    true
}

/// The configuration used to pick the [`Normaliser`] for a problem. The normaliser is resolved in
/// this order:
///
/// 1. the overrides, from the most recently added. See [`NormaliserConfig::override_bounds`] and
///    [`NormaliserConfig::disable_normalisation`];
/// 2. the problem settings, when the normalisation is disabled or when both the ideal and the
///    reference points are given;
/// 3. the bounds computed from the reference set. For the hyper-volume, the maximum is either the
///    reference point in the problem settings or the maximum of the reference set expanded by the
///    hyper-volume delta.
///
/// The configuration can be loaded from JSON:
/// ```
///  use optirustic_indicators::core::{PointSet, Problem};
///  use optirustic_indicators::normalisation::NormaliserConfig;
///
///  let config = NormaliserConfig::from_json(r#"{
///     "problems": [{ "problem": "DTLZ2", "ideal_point": [0.0], "reference_point": [2.0] }]
///  }"#).unwrap();
///  let problem = Problem::new("DTLZ2", 2).unwrap();
///  let normaliser = config.hypervolume_normaliser(&problem, &PointSet::default()).unwrap();
///  assert_eq!(normaliser.bounds().unwrap().maximum(), &[2.0, 2.0]);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NormaliserConfig {
    /// The user overrides. The first matching item is used.
    #[serde(default)]
    overrides: Vec<ProblemOverride>,
    /// The settings for each problem.
    #[serde(default)]
    problems: Vec<ProblemSettings>,
    /// The delta applied to the maximum of the reference set for the hyper-volume when a problem
    /// does not define its own.
    #[serde(default = "default_hypervolume_delta")]
    hypervolume_delta: f64,
    /// Whether the hyper-volume is calculated.
    #[serde(default = "default_true")]
    hypervolume_enabled: bool,
}

impl Default for NormaliserConfig {
    fn default() -> Self {
        Self {
            overrides: Vec::new(),
            problems: Vec::new(),
            hypervolume_delta: default_hypervolume_delta(),
            hypervolume_enabled: true,
        }
    }
}

impl NormaliserConfig {
    /// Load the configuration from a JSON string.
    ///
    /// # Arguments
    ///
    /// * `json`: The JSON string.
    ///
    /// returns: `Result<NormaliserConfig, OError>`
    pub fn from_json(json: &str) -> Result<Self, OError> {
        serde_json::from_str(json).map_err(|e| OError::Config(e.to_string()))
    }

    /// Use explicit bounds for a problem. This takes precedence over the overrides added before.
    ///
    /// # Arguments
    ///
    /// * `problem_name`: The problem name.
    /// * `minimum`: The minimum value of each objective.
    /// * `maximum`: The maximum value of each objective.
    ///
    /// returns: `()`
    pub fn override_bounds(&mut self, problem_name: &str, minimum: Vec<f64>, maximum: Vec<f64>) {
        self.overrides.insert(
            0,
            ProblemOverride {
                problem: problem_name.to_string(),
                normaliser: NormaliserOverride::Bounds { minimum, maximum },
            },
        );
    }

    /// Disable the normalisation for a problem. This takes precedence over the overrides added
    /// before.
    ///
    /// # Arguments
    ///
    /// * `problem_name`: The problem name.
    ///
    /// returns: `()`
    pub fn disable_normalisation(&mut self, problem_name: &str) {
        self.overrides.insert(
            0,
            ProblemOverride {
                problem: problem_name.to_string(),
                normaliser: NormaliserOverride::Disabled,
            },
        );
    }

    /// Remove all the overrides.
    pub fn clear_overrides(&mut self) {
        self.overrides.clear();
    }

    /// Add the normalisation settings for a problem.
    ///
    /// # Arguments
    ///
    /// * `settings`: The problem settings.
    ///
    /// returns: `NormaliserConfig`
    pub fn with_problem_settings(mut self, settings: ProblemSettings) -> Self {
        self.problems.push(settings);
        self
    }

    /// Set the default delta for the hyper-volume.
    pub fn with_hypervolume_delta(mut self, delta: f64) -> Self {
        self.hypervolume_delta = delta;
        self
    }

    /// Enable or disable the hyper-volume calculation.
    pub fn with_hypervolume_enabled(mut self, enabled: bool) -> Self {
        self.hypervolume_enabled = enabled;
        self
    }

    /// Whether the hyper-volume is calculated. When disabled, the hyper-volume is `NaN`.
    pub fn is_hypervolume_enabled(&self) -> bool {
        self.hypervolume_enabled
    }

    /// Get the delta applied to the reference set maximum when calculating the hyper-volume for a
    /// problem.
    ///
    /// # Arguments
    ///
    /// * `problem`: The problem.
    ///
    /// returns: `f64`
    pub fn hypervolume_delta(&self, problem: &Problem) -> f64 {
        self.problem_settings(problem)
            .and_then(|s| s.hypervolume_delta)
            .unwrap_or(self.hypervolume_delta)
    }

    /// Get the normaliser for a generic indicator.
    ///
    /// # Arguments
    ///
    /// * `problem`: The problem.
    /// * `reference_set`: The reference set used to compute the bounds when no override or
    ///   setting applies.
    ///
    /// returns: `Result<Normaliser, OError>`
    pub fn normaliser(
        &self,
        problem: &Problem,
        reference_set: &PointSet,
    ) -> Result<Normaliser, OError> {
        if let Some(normaliser) = self.find_override(problem)? {
            return Ok(normaliser);
        }
        check_reference_set(problem, reference_set)?;
        Ok(Normaliser::Bounded(Bounds::from_population(reference_set)?))
    }

    /// Get the normaliser for the hyper-volume.
    ///
    /// # Arguments
    ///
    /// * `problem`: The problem.
    /// * `reference_set`: The reference set used to compute the bounds when no override or
    ///   setting applies.
    ///
    /// returns: `Result<Normaliser, OError>`
    pub fn hypervolume_normaliser(
        &self,
        problem: &Problem,
        reference_set: &PointSet,
    ) -> Result<Normaliser, OError> {
        if let Some(normaliser) = self.find_override(problem)? {
            return Ok(normaliser);
        }
        check_reference_set(problem, reference_set)?;

        if let Some(reference_point) = self
            .problem_settings(problem)
            .and_then(|s| s.reference_point.as_ref())
        {
            info!(
                "Using the configured reference point {:?} for {}",
                reference_point,
                problem.name()
            );
            return Ok(Normaliser::Bounded(
                Bounds::from_population_with_reference_point(reference_set, reference_point)?,
            ));
        }

        let delta = self.hypervolume_delta(problem);
        debug!("Using hyper-volume delta {} for {}", delta, problem.name());
        Ok(Normaliser::Bounded(Bounds::from_population_with_delta(
            reference_set,
            delta,
        )?))
    }

    /// Get the first settings matching the problem name.
    fn problem_settings(&self, problem: &Problem) -> Option<&ProblemSettings> {
        self.problems.iter().find(|s| problem.matches(&s.problem))
    }

    /// Find a normaliser set by the user either with an override or with the problem settings.
    fn find_override(&self, problem: &Problem) -> Result<Option<Normaliser>, OError> {
        if let Some(o) = self.overrides.iter().find(|o| problem.matches(&o.problem)) {
            let normaliser = match &o.normaliser {
                NormaliserOverride::Disabled => {
                    info!("Normalisation is disabled by user for {}", problem.name());
                    Normaliser::Disabled
                }
                NormaliserOverride::Bounds { minimum, maximum } => {
                    info!("Using user-provided normaliser for {}", problem.name());
                    Normaliser::Bounded(
                        Bounds::new(minimum, maximum)?.expand(problem.number_of_objectives())?,
                    )
                }
            };
            return Ok(Some(normaliser));
        }

        if let Some(settings) = self.problem_settings(problem) {
            if settings.disable_normalisation {
                info!("Normalisation is disabled by user for {}", problem.name());
                return Ok(Some(Normaliser::Disabled));
            }
            if let (Some(ideal_point), Some(reference_point)) =
                (&settings.ideal_point, &settings.reference_point)
            {
                info!(
                    "Using the configured ideal and reference points for {}",
                    problem.name()
                );
                return Ok(Some(Normaliser::Bounded(
                    Bounds::new(ideal_point, reference_point)?
                        .expand(problem.number_of_objectives())?,
                )));
            }
        }

        Ok(None)
    }
}

/// Check that the reference set has the same number of objectives as the problem.
fn check_reference_set(problem: &Problem, reference_set: &PointSet) -> Result<(), OError> {
    match reference_set.number_of_objectives() {
        Some(n) if n != problem.number_of_objectives() => Err(OError::DimensionMismatch(
            "reference set".to_string(),
            n,
            problem.number_of_objectives(),
        )),
        _ => Ok(()),
    }
}
