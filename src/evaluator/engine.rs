use crate::ast::{Condition, EvaluationTrace, VariantValue};
use crate::data::BuildConfiguration;
use crate::error::ConfigurationError;
use crate::version::MovingVersionPolicy;
use ahash::{AHashMap, AHashSet};

/// Evaluates guard conditions against one validated configuration.
///
/// `variants` holds the effective value of every declared variant (configured value
/// or default). `enabled` is the set of dependencies whose declarations have fired.
pub(super) struct ConditionEngine<'a> {
    configuration: &'a BuildConfiguration,
    variants: AHashMap<&'a str, &'a VariantValue>,
    enabled: AHashSet<&'a str>,
    policy: MovingVersionPolicy,
}

impl<'a> ConditionEngine<'a> {
    pub(super) fn new(
        configuration: &'a BuildConfiguration,
        variants: AHashMap<&'a str, &'a VariantValue>,
        policy: MovingVersionPolicy,
    ) -> Self {
        Self {
            configuration,
            variants,
            enabled: AHashSet::new(),
            policy,
        }
    }

    pub(super) fn enable(&mut self, dependency: &'a str) {
        self.enabled.insert(dependency);
    }

    pub(super) fn is_enabled(&self, dependency: &str) -> bool {
        self.enabled.contains(dependency)
    }

    pub(super) fn holds(&self, condition: &Condition) -> bool {
        self.evaluate(condition).get_outcome()
    }

    /// Fails if evaluating `condition` would reach a `^dep@range` term for an enabled
    /// dependency that has no supplied version. Follows the short-circuit path of
    /// `evaluate`, so terms behind a false conjunct are not checked.
    pub(super) fn require_versions(&self, condition: &Condition) -> Result<(), ConfigurationError> {
        match condition {
            Condition::Dependency {
                name,
                range: Some(range),
            } if self.is_enabled(name) && self.configuration.dependency_version(name).is_none() => {
                Err(ConfigurationError::UnsatisfiedDependencyVersion {
                    dependency: name.clone(),
                    constraint: range.to_string(),
                    supplied: None,
                })
            }
            Condition::And(l, r) => {
                self.require_versions(l)?;
                if self.holds(l) {
                    self.require_versions(r)
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Evaluates the condition and returns a trace of the execution. `And`
    /// short-circuits, leaving the right side `NotEvaluated`.
    pub(super) fn evaluate(&self, condition: &Condition) -> EvaluationTrace {
        match condition {
            Condition::Always => EvaluationTrace::Leaf {
                source: condition.to_string(),
                observed: None,
                outcome: true,
            },
            Condition::Variant { name, value } => {
                let current = self.variants.get(name.as_str()).copied();
                EvaluationTrace::Leaf {
                    source: condition.to_string(),
                    observed: current.map(VariantValue::to_string),
                    outcome: current == Some(value),
                }
            }
            Condition::SelfVersion(range) => {
                let version = self.configuration.version();
                EvaluationTrace::Leaf {
                    source: condition.to_string(),
                    observed: Some(version.to_string()),
                    outcome: range.contains(version, self.policy),
                }
            }
            Condition::Dependency { name, range } => {
                let supplied = self.configuration.dependency_version(name);
                let (observed, outcome) = if !self.is_enabled(name) {
                    ("not required".to_string(), false)
                } else {
                    match (range, supplied) {
                        (None, Some(v)) => (v.to_string(), true),
                        (None, None) => ("required".to_string(), true),
                        (Some(range), Some(v)) => (v.to_string(), range.contains(v, self.policy)),
                        (Some(_), None) => ("unspecified".to_string(), false),
                    }
                };
                EvaluationTrace::Leaf {
                    source: condition.to_string(),
                    observed: Some(observed),
                    outcome,
                }
            }
            Condition::And(l, r) => {
                let left = self.evaluate(l);
                if !left.get_outcome() {
                    return EvaluationTrace::BinaryOp {
                        op_symbol: "AND",
                        left: Box::new(left),
                        right: Box::new(EvaluationTrace::NotEvaluated),
                        outcome: false,
                    };
                }
                let right = self.evaluate(r);
                EvaluationTrace::BinaryOp {
                    op_symbol: "AND",
                    outcome: right.get_outcome(),
                    left: Box::new(left),
                    right: Box::new(right),
                }
            }
        }
    }
}
