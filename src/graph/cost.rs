use crate::catalog::FormatEntry;
use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Extra cost for converting from one category into another.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPenalty {
    pub from: String,
    pub to: String,
    pub cost: f64,
}

impl CategoryPenalty {
    pub fn new(from: &str, to: &str, cost: f64) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            cost,
        }
    }

    fn matches(&self, from: &[String], to: &[String]) -> bool {
        from.contains(&self.from) && to.contains(&self.to)
    }
}

/// The tunable constants of the edge cost function.
///
/// Every field can be omitted when loading from JSON; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostPolicy {
    /// Charge every configured category rule instead of only the cheapest matching one.
    pub hard_category_search: bool,
    pub category_penalties: Vec<CategoryPenalty>,
    /// Penalty for a category change with no matching rule.
    pub default_category_penalty: f64,
    /// Multiplier applied when the produced format is lossy.
    pub lossy_factor: f64,
    /// Cost per position of the input format in its handler's format list.
    pub priority_weight: f64,
}

impl Default for CostPolicy {
    fn default() -> Self {
        Self {
            hard_category_search: false,
            category_penalties: vec![
                CategoryPenalty::new("image", "video", 1.0),
                CategoryPenalty::new("video", "image", 2.0),
                CategoryPenalty::new("image", "audio", 10.0),
                CategoryPenalty::new("audio", "image", 7.0),
            ],
            default_category_penalty: 3.0,
            lossy_factor: 2.0,
            priority_weight: 0.025,
        }
    }
}

impl CostPolicy {
    pub fn from_json(json: &str) -> Result<Self, PolicyError> {
        let policy: Self =
            serde_json::from_str(json).map_err(|e| PolicyError::JsonParseError(e.to_string()))?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, PolicyError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| PolicyError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn with_hard_category_search(mut self, enabled: bool) -> Self {
        self.hard_category_search = enabled;
        self
    }

    pub fn with_category_penalty(mut self, from: &str, to: &str, cost: f64) -> Self {
        self.category_penalties
            .push(CategoryPenalty::new(from, to, cost));
        self
    }

    /// Ensures no constant can produce a negative or non-finite edge cost.
    pub fn validate(&self) -> Result<(), PolicyError> {
        let constants = [
            ("default_category_penalty", self.default_category_penalty),
            ("lossy_factor", self.lossy_factor),
            ("priority_weight", self.priority_weight),
        ];
        for (name, value) in constants {
            if !value.is_finite() || value < 0.0 {
                return Err(PolicyError::InvalidConstant {
                    name: name.to_string(),
                    value,
                });
            }
        }
        for rule in &self.category_penalties {
            if !rule.cost.is_finite() || rule.cost < 0.0 {
                return Err(PolicyError::InvalidCategoryPenalty {
                    from: rule.from.clone(),
                    to: rule.to.clone(),
                    value: rule.cost,
                });
            }
        }
        Ok(())
    }

    /// Cost of converting `from` into `to` within one handler.
    ///
    /// `priority_index` is the position of `from` in its handler's full format list. The
    /// lossy multiplier is applied last, so it scales the category and priority terms too.
    pub fn edge_cost(&self, from: &FormatEntry, to: &FormatEntry, priority_index: usize) -> f64 {
        let mut cost = 1.0;
        cost += self.category_penalty(&from.categories, &to.categories);
        cost += self.priority_weight * priority_index as f64;
        if !to.lossless {
            cost *= self.lossy_factor;
        }
        cost
    }

    fn category_penalty(&self, from: &[String], to: &[String]) -> f64 {
        match (from.is_empty(), to.is_empty()) {
            (true, true) => 0.0,
            (true, false) | (false, true) => self.default_category_penalty,
            (false, false) if self.hard_category_search => self
                .category_penalties
                .iter()
                .map(|rule| {
                    if rule.matches(from, to) {
                        rule.cost
                    } else {
                        self.default_category_penalty
                    }
                })
                .sum::<f64>(),
            (false, false) if from.iter().any(|c| to.contains(c)) => 0.0,
            (false, false) => self
                .category_penalties
                .iter()
                .filter(|rule| rule.matches(from, to))
                .map(|rule| rule.cost)
                .reduce(f64::min)
                .unwrap_or(self.default_category_penalty),
        }
    }
}
