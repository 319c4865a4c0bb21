//! Validation rule and result types.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use super::presets::Preset;
use crate::error::CoreError;

/// A caller-supplied check run after the built-in constraints.
pub type CustomCheck = Arc<dyn Fn(Option<&Value>) -> Option<String> + Send + Sync>;

/// Declarative constraints for one field.
///
/// Every constraint is optional; an unset constraint is not checked. Build
/// with the chained setters:
///
/// ```
/// use repay_core::validation::rules::FieldRule;
///
/// let rule = FieldRule::new().required().length(2, 100);
/// assert!(rule.required);
/// ```
#[derive(Clone, Default)]
pub struct FieldRule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub custom: Option<CustomCheck>,
}

impl FieldRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn length(self, min: usize, max: usize) -> Self {
        self.min_length(min).max_length(max)
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn custom<F>(mut self, check: F) -> Self
    where
        F: Fn(Option<&Value>) -> Option<String> + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(check));
        self
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("required", &self.required)
            .field("min_length", &self.min_length)
            .field("max_length", &self.max_length)
            .field("pattern", &self.pattern.as_ref().map(Regex::as_str))
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Outcome of an aggregate validation.
///
/// `is_valid` is derived from `errors` at construction and cannot drift
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct ValidationResult {
    is_valid: bool,
    errors: Vec<String>,
}

impl ValidationResult {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }

    pub fn valid() -> Self {
        Self::from_errors(Vec::new())
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

impl FromIterator<String> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self::from_errors(iter.into_iter().collect())
    }
}

/// JSON form of a [`FieldRule`], as submitted by form clients.
///
/// A `preset` supplies the starting rule; explicit fields override it.
/// Custom checks cannot be expressed in JSON and only arrive via presets.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[serde(default, deny_unknown_fields)]
#[ts(export)]
pub struct RuleSpec {
    #[ts(optional)]
    pub preset: Option<Preset>,
    #[ts(optional)]
    pub required: Option<bool>,
    #[ts(optional)]
    pub min_length: Option<usize>,
    #[ts(optional)]
    pub max_length: Option<usize>,
    #[ts(optional)]
    pub pattern: Option<String>,
}

impl RuleSpec {
    /// Compile into an evaluable rule.
    ///
    /// Fails with [`CoreError::Validation`] for an invalid regex or
    /// inverted length bounds.
    pub fn compile(&self) -> Result<FieldRule, CoreError> {
        let mut rule = self.preset.map(Preset::rule).unwrap_or_default();

        if let Some(required) = self.required {
            rule.required = required;
        }
        if self.min_length.is_some() {
            rule.min_length = self.min_length;
        }
        if self.max_length.is_some() {
            rule.max_length = self.max_length;
        }
        if let (Some(min), Some(max)) = (rule.min_length, rule.max_length) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "min_length ({min}) must not exceed max_length ({max})"
                )));
            }
        }
        if let Some(pattern) = &self.pattern {
            let re = Regex::new(pattern).map_err(|e| {
                CoreError::Validation(format!("Invalid pattern '{pattern}': {e}"))
            })?;
            rule.pattern = Some(re);
        }

        Ok(rule)
    }
}

/// Compile a whole form's rule specs, keeping their order.
pub fn compile_rules(
    specs: &IndexMap<String, RuleSpec>,
) -> Result<IndexMap<String, FieldRule>, CoreError> {
    specs
        .iter()
        .map(|(field, spec)| {
            spec.compile()
                .map(|rule| (field.clone(), rule))
                .map_err(|CoreError::Validation(msg)| {
                    CoreError::Validation(format!("{field}: {msg}"))
                })
        })
        .collect()
}
