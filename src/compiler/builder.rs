use crate::ast::{Condition, VariantValue};
use crate::compiler::parsing::{ConditionParser, ParseFailure};
use crate::error::RecipeError;
use crate::recipe::{
    ArgumentRule, ArgumentRuleDefinition, Conflict, DeclaredVersion, Dependency, DependencyType,
    RecipeDefinition, Variant, VariantDomain,
};
use crate::version::{Version, VersionKind};
use ahash::{AHashMap, AHashSet};
use std::collections::HashSet;

/// Builds the typed rule tables of a recipe from its raw `RecipeDefinition`.
///
/// Every table is checked against the declared variants and dependencies; the first
/// problem found is returned as a `RecipeError`.
pub(super) struct RecipeBuilder<'a> {
    definition: &'a RecipeDefinition,
    parser: ConditionParser<'a>,
    variants: Vec<Variant>,
    variant_index: AHashMap<String, usize>,
    declared_dependencies: AHashSet<String>,
    allow_undeclared_dependencies: bool,
}

impl<'a> RecipeBuilder<'a> {
    pub(super) fn new(definition: &'a RecipeDefinition, allow_undeclared_dependencies: bool) -> Self {
        Self {
            definition,
            parser: ConditionParser::new(&definition.name),
            variants: Vec::new(),
            variant_index: AHashMap::new(),
            declared_dependencies: AHashSet::new(),
            allow_undeclared_dependencies,
        }
    }

    pub(super) fn build_variants(&mut self) -> Result<(), RecipeError> {
        for def in &self.definition.variants {
            if self.variant_index.contains_key(&def.name) {
                return Err(RecipeError::DuplicateVariant(def.name.clone()));
            }

            let domain = match &def.values {
                Some(values) if values.is_empty() => {
                    return Err(RecipeError::EmptyVariantDomain(def.name.clone()));
                }
                Some(values) => VariantDomain::Values(values.clone()),
                None => VariantDomain::Bool,
            };
            let mut variant = Variant {
                name: def.name.clone(),
                description: def.description.clone(),
                domain,
                default: VariantValue::Bool(false),
            };

            let invalid_default = || RecipeError::InvalidVariantDefault {
                variant: def.name.clone(),
                default: def.default.to_string(),
            };
            let default = VariantValue::from_json(&def.default).ok_or_else(invalid_default)?;
            let default = variant.normalize(default);
            if !variant.admits(&default) {
                return Err(invalid_default());
            }
            variant.default = default;

            self.variant_index
                .insert(variant.name.clone(), self.variants.len());
            self.variants.push(variant);
        }
        Ok(())
    }

    pub(super) fn build_versions(&self) -> Result<Vec<DeclaredVersion>, RecipeError> {
        let mut seen = HashSet::new();
        let mut versions = Vec::with_capacity(self.definition.versions.len());
        for def in &self.definition.versions {
            let rule = format!("version '{}'", def.version);
            let kind = if def.branch.is_some() {
                VersionKind::Moving
            } else {
                VersionKind::Fixed
            };
            let version = match kind {
                VersionKind::Moving => Version::parse_as(&def.version, kind),
                // Without a branch the spelling decides, so `master` stays moving.
                VersionKind::Fixed => Version::parse(&def.version),
            }
            .map_err(|source| RecipeError::InvalidVersion { rule, source })?;

            if !seen.insert(version.clone()) {
                return Err(RecipeError::DuplicateVersion(def.version.clone()));
            }
            versions.push(DeclaredVersion {
                version,
                sha256: def.sha256.clone(),
                branch: def.branch.clone(),
                preferred: def.preferred,
            });
        }
        Ok(versions)
    }

    pub(super) fn build_dependencies(&mut self) -> Result<Vec<Dependency>, RecipeError> {
        let definition = self.definition;
        // Names first, so guards may reference dependencies declared later.
        let mut specs = Vec::with_capacity(definition.dependencies.len());
        for def in &definition.dependencies {
            let rule = format!("dependency '{}'", def.spec);
            let (name, constraint) = self
                .parser
                .parse_dependency(&def.spec)
                .map_err(|e| parse_error(&rule, &def.spec, e))?;
            self.declared_dependencies.insert(name.clone());
            specs.push((rule, name, constraint));
        }

        let mut dependencies = Vec::with_capacity(specs.len());
        for ((rule, name, constraint), def) in specs.into_iter().zip(&definition.dependencies)
        {
            let types = if def.types.is_empty() {
                DependencyType::DEFAULT.to_vec()
            } else {
                let mut types = def
                    .types
                    .iter()
                    .map(|t| {
                        t.parse::<DependencyType>()
                            .map_err(|message| RecipeError::InvalidCondition {
                                rule: rule.clone(),
                                condition: t.clone(),
                                message,
                            })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                types.sort();
                types.dedup();
                types
            };
            let when = self.condition(&rule, def.when.as_deref())?;
            dependencies.push(Dependency {
                name,
                types,
                when,
                constraint,
            });
        }
        Ok(dependencies)
    }

    pub(super) fn build_conflicts(&self) -> Result<Vec<Conflict>, RecipeError> {
        self.definition
            .conflicts
            .iter()
            .map(|def| {
                let rule = format!("conflict '{}'", def.spec);
                Ok(Conflict {
                    spec: self.condition(&rule, Some(&def.spec))?,
                    when: self.condition(&rule, def.when.as_deref())?,
                    message: def.msg.clone(),
                })
            })
            .collect()
    }

    pub(super) fn build_arguments(&self) -> Result<Vec<ArgumentRule>, RecipeError> {
        self.definition
            .arguments
            .iter()
            .enumerate()
            .map(|(i, def)| self.build_argument_rule(&format!("argument rule #{}", i + 1), def))
            .collect()
    }

    fn build_argument_rule(
        &self,
        rule: &str,
        def: &ArgumentRuleDefinition,
    ) -> Result<ArgumentRule, RecipeError> {
        let select = def
            .select
            .iter()
            .enumerate()
            .map(|(i, branch)| self.build_argument_rule(&format!("{}.{}", rule, i + 1), branch))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ArgumentRule {
            when: self.condition(rule, def.when.as_deref())?,
            args: def.args.clone(),
            select,
        })
    }

    pub(super) fn finish(self) -> (Vec<Variant>, AHashMap<String, usize>) {
        (self.variants, self.variant_index)
    }

    /// Parses a guard and checks every variant and dependency it references.
    fn condition(&self, rule: &str, text: Option<&str>) -> Result<Condition, RecipeError> {
        let Some(text) = text else {
            return Ok(Condition::Always);
        };
        let parsed = self
            .parser
            .parse(text)
            .map_err(|e| parse_error(rule, text, e))?;

        if !self.allow_undeclared_dependencies {
            let mut dependencies = HashSet::new();
            parsed.referenced_dependencies(&mut dependencies);
            if let Some(missing) = dependencies
                .into_iter()
                .find(|d| !self.declared_dependencies.contains(*d))
            {
                return Err(RecipeError::UndeclaredDependency {
                    dependency: missing.to_string(),
                    rule: rule.to_string(),
                });
            }
        }

        self.type_variants(rule, text, parsed)
    }

    /// Checks variant references against the declared table and coerces their values
    /// into each variant's domain.
    fn type_variants(
        &self,
        rule: &str,
        text: &str,
        condition: Condition,
    ) -> Result<Condition, RecipeError> {
        match condition {
            Condition::Variant { name, value } => {
                let variant = self
                    .variant_index
                    .get(&name)
                    .and_then(|&i| self.variants.get(i))
                    .ok_or_else(|| RecipeError::UndeclaredVariant {
                        variant: name.clone(),
                        rule: rule.to_string(),
                    })?;
                let value = variant.normalize(value);
                if !variant.admits(&value) {
                    return Err(RecipeError::InvalidCondition {
                        rule: rule.to_string(),
                        condition: text.to_string(),
                        message: format!(
                            "'{}' is not a valid value for variant '{}' (expected one of: {})",
                            value,
                            name,
                            variant.allowed()
                        ),
                    });
                }
                Ok(Condition::Variant { name, value })
            }
            Condition::And(l, r) => Ok(Condition::And(
                Box::new(self.type_variants(rule, text, *l)?),
                Box::new(self.type_variants(rule, text, *r)?),
            )),
            other => Ok(other),
        }
    }
}

fn parse_error(rule: &str, text: &str, failure: ParseFailure) -> RecipeError {
    match failure {
        ParseFailure::Syntax(message) => RecipeError::InvalidCondition {
            rule: rule.to_string(),
            condition: text.to_string(),
            message,
        },
        ParseFailure::Version(source) => RecipeError::InvalidVersion {
            rule: rule.to_string(),
            source,
        },
    }
}
