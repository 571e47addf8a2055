use std::fmt::{self, Write};

use crate::descriptors::FingerprintScheme;
use crate::model::ModelPaths;

/// Validation stage, in the order stages run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    /// Both files of the pair exist
    Structure,
    /// The estimator file decodes and its metadata is plausible
    Estimator,
    /// The schema file reads and lists each column once
    Schema,
    /// Estimator and schema describe the same columns
    Consistency,
}

impl Stage {
    /// Every stage, in run order
    pub const ALL: [Stage; 4] = [Stage::Structure, Stage::Estimator, Stage::Schema, Stage::Consistency];

    /// Heading used in the rendered report
    pub fn title(self) -> &'static str {
        match self {
            Stage::Structure => "Structure",
            Stage::Estimator => "Estimator",
            Stage::Schema => "Schema",
            Stage::Consistency => "Consistency",
        }
    }
}

/// Result of one check
#[derive(Debug, Clone, PartialEq)]
pub enum CheckStatus {
    /// Check passed
    Ok,
    /// Check passed with warnings
    Warning(String),
    /// Check failed
    Failed(String),
}

impl CheckStatus {
    /// True for [`CheckStatus::Failed`]
    pub fn is_failed(&self) -> bool {
        matches!(self, CheckStatus::Failed(_))
    }
}

/// A named check, the stage it belongs to and its result
#[derive(Debug, Clone)]
pub struct ValidationCheck {
    /// Stage that ran the check
    pub stage: Stage,
    /// Name of the check
    pub name: String,
    /// Outcome
    pub status: CheckStatus,
}

/// Outcome of validating one stored model pair
#[derive(Debug)]
pub struct ValidationReport {
    /// Name of the validated model
    pub model: String,
    /// Files that were checked
    pub paths: ModelPaths,
    /// Scheme recorded in the estimator, once it has decoded
    pub scheme: Option<FingerprintScheme>,
    /// Check results in the order they ran
    pub checks: Vec<ValidationCheck>,
}

impl ValidationReport {
    /// Empty report for the pair `model` stored at `paths`
    pub fn new(model: impl Into<String>, paths: ModelPaths) -> Self {
        Self {
            model: model.into(),
            paths,
            scheme: None,
            checks: Vec::new(),
        }
    }

    fn record(&mut self, stage: Stage, name: impl Into<String>, status: CheckStatus) {
        self.checks.push(ValidationCheck {
            stage,
            name: name.into(),
            status,
        });
    }

    /// Record a passed check
    pub fn pass(&mut self, stage: Stage, name: impl Into<String>) {
        self.record(stage, name, CheckStatus::Ok);
    }

    /// Record a check that passed with a caveat
    pub fn warn(&mut self, stage: Stage, name: impl Into<String>, message: impl Into<String>) {
        self.record(stage, name, CheckStatus::Warning(message.into()));
    }

    /// Record a failed check
    pub fn fail(&mut self, stage: Stage, name: impl Into<String>, message: impl Into<String>) {
        self.record(stage, name, CheckStatus::Failed(message.into()));
    }

    /// Checks run by `stage`
    pub fn stage(&self, stage: Stage) -> impl Iterator<Item = &ValidationCheck> + '_ {
        self.checks.iter().filter(move |c| c.stage == stage)
    }

    /// Names of the failed checks, in run order
    pub fn failures(&self) -> Vec<&str> {
        self.checks
            .iter()
            .filter(|c| c.status.is_failed())
            .map(|c| c.name.as_str())
            .collect()
    }

    /// True when the model must not be used
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Passed checks
    pub fn success_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Ok))
    }

    /// Checks that passed with a caveat
    pub fn warning_count(&self) -> usize {
        self.count(|s| matches!(s, CheckStatus::Warning(_)))
    }

    /// Failed checks
    pub fn failure_count(&self) -> usize {
        self.count(CheckStatus::is_failed)
    }

    fn count(&self, keep: impl Fn(&CheckStatus) -> bool) -> usize {
        self.checks.iter().filter(|c| keep(&c.status)).count()
    }

    fn verdict(&self) -> (Tone, &'static str) {
        if self.has_failures() {
            (Tone::Bad, "Validation FAILED")
        } else if self.warning_count() > 0 {
            (Tone::Warn, "Validation PASSED with warnings")
        } else {
            (Tone::Good, "Validation PASSED")
        }
    }

    /// Render with colours when the `colorized_output` feature is enabled
    pub fn format_colored(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.render(&mut out, paint);
        out
    }

    fn render(&self, out: &mut impl Write, paint: fn(Tone, &str) -> String) -> fmt::Result {
        writeln!(out, "{}", paint(Tone::Heading, &format!("Model: {}", self.model)))?;
        writeln!(out, "  estimator: {}", self.paths.estimator.display())?;
        writeln!(out, "  schema:    {}", self.paths.schema.display())?;
        match self.scheme {
            Some(scheme) => writeln!(out, "  scheme:    {scheme}")?,
            None => writeln!(out, "  scheme:    unknown")?,
        }

        for stage in Stage::ALL {
            let mut checks = self.stage(stage).peekable();
            if checks.peek().is_none() {
                continue;
            }
            writeln!(out)?;
            writeln!(out, "{}", paint(Tone::Heading, stage.title()))?;
            for check in checks {
                let (tone, symbol) = match &check.status {
                    CheckStatus::Ok => (Tone::Good, "✓"),
                    CheckStatus::Warning(_) => (Tone::Warn, "⚠"),
                    CheckStatus::Failed(_) => (Tone::Bad, "✗"),
                };
                write!(out, "  {} {}", paint(tone, symbol), check.name)?;
                match &check.status {
                    CheckStatus::Ok => writeln!(out)?,
                    CheckStatus::Warning(msg) | CheckStatus::Failed(msg) => {
                        writeln!(out, ": {}", paint(tone, msg))?
                    }
                }
            }
        }

        writeln!(out)?;
        writeln!(
            out,
            "{} passed, {} warnings, {} failed",
            self.success_count(),
            self.warning_count(),
            self.failure_count()
        )?;
        let (tone, verdict) = self.verdict();
        writeln!(out, "{}", paint(tone, verdict))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, plain)
    }
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Heading,
    Good,
    Warn,
    Bad,
}

fn plain(_: Tone, text: &str) -> String {
    text.to_string()
}

#[cfg(feature = "colorized_output")]
fn paint(tone: Tone, text: &str) -> String {
    use console::style;

    match tone {
        Tone::Heading => style(text).bold().cyan().to_string(),
        Tone::Good => style(text).green().to_string(),
        Tone::Warn => style(text).yellow().to_string(),
        Tone::Bad => style(text).red().bold().to_string(),
    }
}

#[cfg(not(feature = "colorized_output"))]
fn paint(tone: Tone, text: &str) -> String {
    plain(tone, text)
}
