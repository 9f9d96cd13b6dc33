use crate::ast::{EvaluationTrace, VariantValue};
use crate::data::BuildConfiguration;
use crate::error::ConfigurationError;
use crate::recipe::{ArgumentRule, Conflict, Dependency, DependencyType, Recipe};
use crate::trace::TraceFormatter;
use crate::version::MovingVersionPolicy;
use ahash::AHashMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, trace};

mod engine;
mod plan;

use engine::ConditionEngine;
pub use plan::{BuildPlan, ConflictViolation, Explanation, ResolvedDependency, RuleReport};

/// Resolves build configurations against a compiled recipe.
///
/// An `Evaluator` holds no state besides the immutable recipe and its options, so it
/// can be shared across threads and called concurrently with different configurations.
pub struct Evaluator {
    recipe: Recipe,
    policy: MovingVersionPolicy,
}

pub struct EvaluatorBuilder {
    recipe: Recipe,
    policy: MovingVersionPolicy,
}

impl EvaluatorBuilder {
    /// How moving versions (branch tips) relate to lower-bound-only ranges.
    pub fn moving_versions(mut self, policy: MovingVersionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> Evaluator {
        Evaluator {
            recipe: self.recipe,
            policy: self.policy,
        }
    }
}

/// Dependency declarations that fired, with the engine that evaluated them.
struct Resolution<'a> {
    engine: ConditionEngine<'a>,
    active: Vec<bool>,
}

impl Evaluator {
    /// Creates an evaluator with the default moving-version policy.
    pub fn new(recipe: Recipe) -> Self {
        Self::builder(recipe).build()
    }

    pub fn builder(recipe: Recipe) -> EvaluatorBuilder {
        EvaluatorBuilder {
            recipe,
            policy: MovingVersionPolicy::default(),
        }
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn policy(&self) -> MovingVersionPolicy {
        self.policy
    }

    /// Derives the build plan for `configuration`.
    ///
    /// Steps run in a fixed order: variant domain validation, conflict evaluation,
    /// dependency version checks, argument derivation. The first failure aborts the
    /// call; no partial plan is ever returned.
    ///
    /// A guard that tests `^dep@range` for a required dependency needs that
    /// dependency's version. If the configuration leaves it out, resolution fails
    /// instead of treating the guard as false.
    ///
    /// # Returns
    ///
    /// * `Ok(BuildPlan)`: the dependency set and the ordered argument list.
    /// * `Err(ConfigurationError)`: an undeclared variant or out-of-domain value, the
    ///   first conflict in declaration order, or an unsatisfied dependency version.
    pub fn resolve(
        &self,
        configuration: &BuildConfiguration,
    ) -> Result<BuildPlan, ConfigurationError> {
        debug!(
            package = %self.recipe.name(),
            version = %configuration.version(),
            "resolving build configuration"
        );
        let resolution = self.prepare(configuration)?;
        let engine = &resolution.engine;
        for dependency in &self.recipe.dependencies {
            engine.require_versions(&dependency.when)?;
        }

        for conflict in &self.recipe.conflicts {
            if let Some(violation) = self.strict_conflict(engine, conflict)? {
                debug!(rule = %violation.rule, "conflict detected");
                return Err(violation.into());
            }
        }

        let dependencies = self.resolve_dependencies(&resolution, configuration)?;

        let mut arguments = Vec::new();
        for (i, rule) in self.recipe.arguments.iter().enumerate() {
            require_argument_versions(engine, rule)?;
            let label = format!("argument rule #{}", i + 1);
            self.apply_argument_rule(engine, rule, &label, &mut arguments, None);
        }

        debug!(
            dependencies = dependencies.len(),
            arguments = arguments.len(),
            "resolved build plan"
        );
        Ok(BuildPlan {
            package: self.recipe.name().to_string(),
            version: configuration.version().clone(),
            build_system: self.recipe.metadata.build_system.clone(),
            dependencies,
            arguments,
        })
    }

    /// Every conflict the configuration triggers, in declaration order. Fails like
    /// `resolve` when a conflict tests the version of a required dependency that
    /// was not supplied.
    pub fn conflicts(
        &self,
        configuration: &BuildConfiguration,
    ) -> Result<Vec<ConflictViolation>, ConfigurationError> {
        let resolution = self.prepare(configuration)?;
        let mut violations = Vec::new();
        for conflict in &self.recipe.conflicts {
            violations.extend(self.strict_conflict(&resolution.engine, conflict)?);
        }
        Ok(violations)
    }

    /// Evaluates every rule and reports whether it fired and why. Only domain
    /// validation can fail; conflicts and version mismatches show up in the report.
    pub fn explain(
        &self,
        configuration: &BuildConfiguration,
    ) -> Result<Explanation, ConfigurationError> {
        let resolution = self.prepare(configuration)?;
        let engine = &resolution.engine;

        let dependencies = self
            .recipe
            .dependencies
            .iter()
            .zip(&resolution.active)
            .map(|(dependency, &fired)| RuleReport {
                rule: format!("dependency '{}'", dependency.identity()),
                fired,
                reason: TraceFormatter::format_trace(&engine.evaluate(&dependency.when)),
            })
            .collect();

        let conflicts = self
            .recipe
            .conflicts
            .iter()
            .map(|conflict| {
                let trace = conflict_trace(engine, conflict);
                RuleReport {
                    rule: format!("conflict '{}'", conflict.identity()),
                    fired: trace.get_outcome(),
                    reason: TraceFormatter::format_trace(&trace),
                }
            })
            .collect();

        let mut arguments = Vec::new();
        let mut reports = Vec::new();
        for (i, rule) in self.recipe.arguments.iter().enumerate() {
            let label = format!("argument rule #{}", i + 1);
            self.apply_argument_rule(engine, rule, &label, &mut arguments, Some(&mut reports));
        }

        Ok(Explanation {
            dependencies,
            conflicts,
            arguments: reports,
        })
    }

    /// Validates variant values and computes the enabled dependency set.
    fn prepare<'a>(
        &'a self,
        configuration: &'a BuildConfiguration,
    ) -> Result<Resolution<'a>, ConfigurationError> {
        let variants = self.effective_variants(configuration)?;
        let mut engine = ConditionEngine::new(configuration, variants, self.policy);

        // Guards may reference other dependencies (`^dep`), so declarations are
        // re-evaluated until no further one fires. Fired declarations stay active.
        let dependencies = &self.recipe.dependencies;
        let mut active = vec![false; dependencies.len()];
        loop {
            let mut changed = false;
            for (i, dependency) in dependencies.iter().enumerate() {
                if !active[i] && engine.holds(&dependency.when) {
                    trace!(dependency = %dependency.name, "dependency enabled");
                    active[i] = true;
                    engine.enable(&dependency.name);
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }

        Ok(Resolution { engine, active })
    }

    /// The value of every declared variant: configured if present, default otherwise.
    /// Configured variants are checked in name order so the reported error is stable.
    fn effective_variants<'a>(
        &'a self,
        configuration: &'a BuildConfiguration,
    ) -> Result<AHashMap<&'a str, &'a VariantValue>, ConfigurationError> {
        let mut values: AHashMap<&str, &VariantValue> = self
            .recipe
            .variants
            .iter()
            .map(|v| (v.name.as_str(), &v.default))
            .collect();

        for (name, value) in configuration.variants() {
            let variant = self
                .recipe
                .variant(name)
                .ok_or_else(|| ConfigurationError::UndeclaredVariant(name.to_string()))?;
            if !variant.admits(value) {
                return Err(ConfigurationError::UnknownVariantValue {
                    variant: name.to_string(),
                    value: value.to_string(),
                    allowed: variant.allowed(),
                });
            }
            values.insert(name, value);
        }
        Ok(values)
    }

    fn check_conflict(
        &self,
        engine: &ConditionEngine<'_>,
        conflict: &Conflict,
    ) -> Option<ConflictViolation> {
        let trace = conflict_trace(engine, conflict);
        trace.get_outcome().then(|| ConflictViolation {
            rule: conflict.identity(),
            message: conflict.message.clone(),
            reason: TraceFormatter::format_trace(&trace),
        })
    }

    fn strict_conflict(
        &self,
        engine: &ConditionEngine<'_>,
        conflict: &Conflict,
    ) -> Result<Option<ConflictViolation>, ConfigurationError> {
        engine.require_versions(&conflict.spec)?;
        if engine.holds(&conflict.spec) {
            engine.require_versions(&conflict.when)?;
        }
        Ok(self.check_conflict(engine, conflict))
    }

    fn resolve_dependencies(
        &self,
        resolution: &Resolution<'_>,
        configuration: &BuildConfiguration,
    ) -> Result<Vec<ResolvedDependency>, ConfigurationError> {
        let mut merged: BTreeMap<&str, BTreeSet<DependencyType>> = BTreeMap::new();
        let active = self
            .recipe
            .dependencies
            .iter()
            .zip(&resolution.active)
            .filter(|(_, fired)| **fired)
            .map(|(dependency, _)| dependency);

        for dependency in active {
            self.check_constraint(dependency, configuration)?;
            merged
                .entry(&dependency.name)
                .or_default()
                .extend(dependency.types.iter().copied());
        }

        Ok(merged
            .into_iter()
            .map(|(name, types)| ResolvedDependency {
                name: name.to_string(),
                types: types.into_iter().collect(),
                version: configuration.dependency_version(name).cloned(),
            })
            .collect())
    }

    fn check_constraint(
        &self,
        dependency: &Dependency,
        configuration: &BuildConfiguration,
    ) -> Result<(), ConfigurationError> {
        let Some(constraint) = &dependency.constraint else {
            return Ok(());
        };
        let supplied = configuration.dependency_version(&dependency.name);
        match supplied {
            Some(version) if constraint.contains(version, self.policy) => Ok(()),
            _ => Err(ConfigurationError::UnsatisfiedDependencyVersion {
                dependency: dependency.name.clone(),
                constraint: constraint.to_string(),
                supplied: supplied.map(ToString::to_string),
            }),
        }
    }

    /// Applies one argument rule: if its guard holds, appends its tokens and then the
    /// first `select` branch whose guard holds. Returns whether the guard held.
    fn apply_argument_rule(
        &self,
        engine: &ConditionEngine<'_>,
        rule: &ArgumentRule,
        label: &str,
        arguments: &mut Vec<String>,
        mut reports: Option<&mut Vec<RuleReport>>,
    ) -> bool {
        let guard = engine.evaluate(&rule.when);
        let fired = guard.get_outcome();
        if let Some(reports) = reports.as_deref_mut() {
            reports.push(RuleReport {
                rule: label.to_string(),
                fired,
                reason: TraceFormatter::format_trace(&guard),
            });
        }
        if !fired {
            return false;
        }

        trace!(rule = label, args = ?rule.args, "argument rule fired");
        arguments.extend(rule.args.iter().cloned());
        for (i, branch) in rule.select.iter().enumerate() {
            let branch_label = format!("{}.{}", label, i + 1);
            if self.apply_argument_rule(engine, branch, &branch_label, arguments, reports.as_deref_mut()) {
                break;
            }
        }
        true
    }
}

/// Walks the guards `apply_argument_rule` would evaluate, failing on the first
/// version-gated term whose dependency version is missing.
fn require_argument_versions(
    engine: &ConditionEngine<'_>,
    rule: &ArgumentRule,
) -> Result<(), ConfigurationError> {
    engine.require_versions(&rule.when)?;
    if !engine.holds(&rule.when) {
        return Ok(());
    }
    for branch in &rule.select {
        require_argument_versions(engine, branch)?;
        if engine.holds(&branch.when) {
            break;
        }
    }
    Ok(())
}

/// A conflict holds when both its spec and its `when` guard hold.
fn conflict_trace(engine: &ConditionEngine<'_>, conflict: &Conflict) -> EvaluationTrace {
    let spec = engine.evaluate(&conflict.spec);
    if conflict.when.is_always() {
        return spec;
    }
    if !spec.get_outcome() {
        return EvaluationTrace::BinaryOp {
            op_symbol: "AND",
            left: Box::new(spec),
            right: Box::new(EvaluationTrace::NotEvaluated),
            outcome: false,
        };
    }
    let when = engine.evaluate(&conflict.when);
    EvaluationTrace::BinaryOp {
        op_symbol: "AND",
        outcome: when.get_outcome(),
        left: Box::new(spec),
        right: Box::new(when),
    }
}
