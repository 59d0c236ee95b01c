use crate::catalog::FormatEntry;
use serde::{Deserialize, Serialize};

mod formatter;

pub use formatter::PlanFormatter;

/// The file is in `format`, having just been produced (or, for the first step of a plan,
/// supplied) by `handler`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionStep {
    /// Handler name. Callers resolve it to a live handler themselves.
    pub handler: String,
    pub format: FormatEntry,
}

impl ConversionStep {
    pub fn new(handler: &str, format: FormatEntry) -> Self {
        Self {
            handler: handler.to_string(),
            format,
        }
    }

    pub fn mime(&self) -> &str {
        &self.format.mime
    }
}

/// An ordered, non-empty chain of steps from the input format to the requested output.
///
/// Each pair of adjacent steps corresponds to exactly one handler conversion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionPlan {
    steps: Vec<ConversionStep>,
    cost: f64,
}

impl ConversionPlan {
    pub(crate) fn new(steps: Vec<ConversionStep>, cost: f64) -> Self {
        debug_assert!(!steps.is_empty());
        Self { steps, cost }
    }

    pub fn steps(&self) -> &[ConversionStep] {
        &self.steps
    }

    /// Sum of the costs of every traversed edge.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// The step the plan starts from, as supplied by the caller.
    pub fn origin(&self) -> &ConversionStep {
        &self.steps[0]
    }

    /// The step producing the requested output format.
    pub fn destination(&self) -> &ConversionStep {
        &self.steps[self.steps.len() - 1]
    }

    /// Number of conversions the plan performs.
    pub fn hops(&self) -> usize {
        self.steps.len() - 1
    }

    /// Handler names in execution order, excluding the origin.
    pub fn handlers(&self) -> impl Iterator<Item = &str> {
        self.steps[1..].iter().map(|s| s.handler.as_str())
    }

    pub fn into_steps(self) -> Vec<ConversionStep> {
        self.steps
    }
}
