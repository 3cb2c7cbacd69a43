use std::io::Write;
use std::process::{Command, Stdio};

use log::debug;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::core::OError;
use crate::metrics::ReferenceTransform;

const METRIC_NAME: &str = "Native hyper-volume";

/// Calculate the hyper-volume with an external executable. The points are written to a temporary
/// file, one point per line with space-separated objective values, and the executable is invoked
/// with a command built from a template. The following placeholders are replaced in the
/// template:
///
/// - `{0}`: the number of objectives;
/// - `{1}`: the number of points;
/// - `{2}`: the path of the file with the points;
/// - `{3}`: the path of a file with the reference point;
/// - `{4}`: the reference point as space-separated values.
///
/// The hyper-volume is read from the last token of the last line the executable prints. Double
/// quotes group arguments containing spaces and `""` is a literal quote.
///
/// When the command is inverted, the points are reflected so that all the objectives are
/// maximised and the reference point is the origin; otherwise the normalised points are used as
/// they are with the reference point `[1, ..., 1]`.
///
/// # Example
/// ```no_run
///  use optirustic_indicators::metrics::{HyperVolumeAlgorithm, NativeCommand};
///
///  let command = NativeCommand::new("wfg {2} {4}", true);
///  let algorithm = HyperVolumeAlgorithm::Native(command);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NativeCommand {
    /// The command template.
    command: String,
    /// Whether the executable expects maximised objectives.
    #[serde(default)]
    inverted: bool,
}

impl NativeCommand {
    /// Create a new command.
    ///
    /// # Arguments
    ///
    /// * `command`: The command template.
    /// * `inverted`: Whether the executable expects maximised objectives.
    ///
    /// returns: `NativeCommand`
    pub fn new(command: &str, inverted: bool) -> Self {
        Self {
            command: command.to_string(),
            inverted,
        }
    }

    /// Get the command template.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// The transform to apply to the points before calling [`NativeCommand::calculate`].
    ///
    /// returns: `ReferenceTransform`
    pub fn reference_transform(&self) -> ReferenceTransform {
        if self.inverted {
            ReferenceTransform::inverted()
        } else {
            ReferenceTransform::non_inverted()
        }
    }

    /// Run the executable and return the hyper-volume it prints.
    ///
    /// # Arguments
    ///
    /// * `points`: The transformed objective values.
    /// * `reference_point`: The reference point.
    ///
    /// returns: `Result<f64, OError>`
    pub fn calculate(&self, points: &[Vec<f64>], reference_point: &[f64]) -> Result<f64, OError> {
        let mut approximation_set = temp_file("approximation_set")?;
        for point in points {
            writeln!(approximation_set, "{}", format_point(point)).map_err(metric_error)?;
        }
        approximation_set.flush().map_err(metric_error)?;

        // keep the file alive until the command completes
        let mut reference_point_file = None;
        let mut reference_point_path = String::new();
        if self.command.contains("{3}") {
            let mut file = temp_file("reference_point")?;
            writeln!(file, "{}", format_point(reference_point)).map_err(metric_error)?;
            file.flush().map_err(metric_error)?;
            reference_point_path = file.path().display().to_string();
            reference_point_file = Some(file);
        }

        let command = self
            .command
            .replace("{0}", &reference_point.len().to_string())
            .replace("{1}", &points.len().to_string())
            .replace("{2}", &approximation_set.path().display().to_string())
            .replace("{3}", &reference_point_path)
            .replace("{4}", &format_point(reference_point));
        let value = run(&command);

        drop(reference_point_file);
        value
    }
}

/// Run the command and parse the value in its output.
fn run(command: &str) -> Result<f64, OError> {
    let tokens = parse_command(command);
    let (program, args) = tokens
        .split_first()
        .ok_or_else(|| OError::Metric(METRIC_NAME.to_string(), "The command is empty".to_string()))?;
    debug!("Running '{}'", command);

    let output = Command::new(program)
        .args(args)
        .stderr(Stdio::inherit())
        .output()
        .map_err(|e| {
            OError::Metric(
                METRIC_NAME.to_string(),
                format!("Cannot run '{}': {}", command, e),
            )
        })?;
    if !output.status.success() {
        return Err(OError::Metric(
            METRIC_NAME.to_string(),
            format!("The command '{}' failed with {}", command, output.status),
        ));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let token = stdout
        .lines()
        .last()
        .and_then(|line| line.split_whitespace().last())
        .ok_or_else(|| {
            OError::Metric(
                METRIC_NAME.to_string(),
                format!("The command '{}' did not return any value", command),
            )
        })?;
    token.parse::<f64>().map_err(|e| {
        OError::Metric(
            METRIC_NAME.to_string(),
            format!("Cannot parse the hyper-volume '{}': {}", token, e),
        )
    })
}

/// Split a command into its arguments.
///
/// # Arguments
///
/// * `command`: The command.
///
/// returns: `Vec<String>`
fn parse_command(command: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut token = String::new();
    let mut in_token = false;
    let mut quoted = false;

    let mut chars = command.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if chars.peek() == Some(&'"') => {
                chars.next();
                token.push('"');
                in_token = true;
            }
            '"' => {
                quoted = !quoted;
                in_token = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_token {
                    tokens.push(std::mem::take(&mut token));
                    in_token = false;
                }
            }
            c => {
                token.push(c);
                in_token = true;
            }
        }
    }
    if in_token {
        tokens.push(token);
    }
    tokens
}

/// Format the values of a point separated by a space.
fn format_point(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| format!("{:?}", v))
        .collect::<Vec<String>>()
        .join(" ")
}

fn temp_file(prefix: &str) -> Result<NamedTempFile, OError> {
    tempfile::Builder::new()
        .prefix(prefix)
        .tempfile()
        .map_err(metric_error)
}

fn metric_error(e: std::io::Error) -> OError {
    OError::Metric(METRIC_NAME.to_string(), e.to_string())
}
