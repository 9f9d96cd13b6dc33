//! Tests for configuration resolution: dependencies, conflicts and argument derivation.
mod common;
use common::*;
use kumitate::prelude::*;

#[test]
fn test_rootless_with_legacy_libfuse() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = rootless_configuration("0.7.0", "2.9.0");

    let plan = evaluator.resolve(&configuration).unwrap();
    assert_eq!(plan.arguments, vec!["-Drootless=true", "-Dfuse_version=fuse"]);
    assert_eq!(plan.dependency_names(), vec!["libfuse", "squashfuse", "util-linux"]);
    assert_eq!(plan.dependency("libfuse").unwrap().version, Some(v("2.9.0")));
}

#[test]
fn test_rootless_with_libfuse3() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = rootless_configuration("0.7.0", "3.1.0");

    let plan = evaluator.resolve(&configuration).unwrap();
    assert_eq!(plan.arguments, vec!["-Drootless=true", "-Dfuse_version=fuse3"]);
    assert_eq!(plan.dependency_names(), vec!["libfuse", "squashfuse", "util-linux"]);
}

#[test]
fn test_setuid_build_needs_only_util_linux() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = BuildConfiguration::new(v("0.7.0")).with_variant("rootless", false);

    let plan = evaluator.resolve(&configuration).unwrap();
    assert!(plan.arguments.is_empty());
    assert_eq!(plan.dependency_names(), vec!["util-linux"]);

    let util_linux = plan.dependency("util-linux").unwrap();
    assert_eq!(util_linux.types, vec![DependencyType::Link]);
    assert_eq!(util_linux.version, None);
}

#[test]
fn test_rootless_conflicts_with_old_release() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = rootless_configuration("0.5.0", "3.1.0");

    let err = evaluator.resolve(&configuration).unwrap_err();
    match err {
        ConfigurationError::ConflictDetected {
            rule,
            message,
            reason,
        } => {
            assert_eq!(rule, "+rootless when @:0.6");
            assert_eq!(reason, "+rootless (was true) AND @:0.6 (was 0.5.0)");
            assert_eq!(
                message.as_deref(),
                Some("rootless mode requires squashfs-mount 0.7 or newer")
            );
        }
        other => panic!("Expected ConflictDetected, got {:?}", other),
    }
}

#[test]
fn test_upper_bound_admits_versions_it_prefixes() {
    let evaluator = squashfs_mount_evaluator();
    // `:0.6` contains every 0.6.x release.
    let configuration = rootless_configuration("0.6.3", "3.1.0");
    assert!(matches!(
        evaluator.resolve(&configuration),
        Err(ConfigurationError::ConflictDetected { .. })
    ));
}

#[test]
fn test_moving_version_escapes_upper_bound_conflict() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = rootless_configuration("master", "3.1.0");

    let plan = evaluator.resolve(&configuration).unwrap();
    assert_eq!(plan.arguments, vec!["-Drootless=true", "-Dfuse_version=fuse3"]);
    assert!(plan.version.is_moving());
}

#[test]
fn test_setuid_build_on_old_release_has_no_conflict() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = BuildConfiguration::new(v("0.5.0")).with_variant("rootless", false);

    let plan = evaluator.resolve(&configuration).unwrap();
    assert_eq!(plan.dependency_names(), vec!["util-linux"]);
}

#[test]
fn test_unset_variants_take_their_default() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = BuildConfiguration::new(v("0.7.0")).with_dependency("libfuse", v("3.1.0"));

    let plan = evaluator.resolve(&configuration).unwrap();
    // `rootless` defaults to true.
    assert_eq!(plan.arguments, vec!["-Drootless=true", "-Dfuse_version=fuse3"]);

    let explicit = BuildConfiguration::with_defaults(evaluator.recipe(), v("0.7.0"))
        .with_dependency("libfuse", v("3.1.0"));
    assert_eq!(evaluator.resolve(&explicit).unwrap(), plan);
}

#[test]
fn test_missing_version_for_version_gated_branch_is_an_error() {
    let evaluator = squashfs_mount_evaluator();
    let expected = ConfigurationError::UnsatisfiedDependencyVersion {
        dependency: "libfuse".to_string(),
        constraint: ":2.9.99".to_string(),
        supplied: None,
    };

    // libfuse is required by the default `+rootless`, and the select branch tests
    // its version, so leaving it out must not fall through to the fuse3 branch.
    let configuration = BuildConfiguration::new(v("0.7.0"));
    assert_eq!(evaluator.resolve(&configuration).unwrap_err(), expected);

    let explicit = BuildConfiguration::with_defaults(evaluator.recipe(), v("0.7.0"));
    assert_eq!(evaluator.resolve(&explicit).unwrap_err(), expected);

    // Explaining reports the missing version instead of failing.
    let explanation = evaluator.explain(&configuration).unwrap();
    assert!(!explanation.arguments[1].fired);
    assert_eq!(explanation.arguments[1].reason, "^libfuse@:2.9.99 (was unspecified)");
}

#[test]
fn test_missing_version_in_guards_and_conflicts_is_an_error() {
    let recipe = Compiler::from_json(
        r#"{
            "name": "demo",
            "variants": [{ "name": "mpi", "default": true }],
            "dependencies": [
                { "spec": "openmpi", "when": "+mpi" },
                { "spec": "hwloc", "when": "^openmpi@4:" }
            ],
            "conflicts": [{ "spec": "^openmpi@:2", "msg": "openmpi 2 is unsupported" }]
        }"#,
    )
    .unwrap();
    let evaluator = Evaluator::new(recipe);

    let err = evaluator.resolve(&BuildConfiguration::new(v("1.0"))).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnsatisfiedDependencyVersion {
            dependency: "openmpi".to_string(),
            constraint: "4:".to_string(),
            supplied: None,
        }
    );
    assert_eq!(
        evaluator.conflicts(&BuildConfiguration::new(v("1.0"))),
        Err(ConfigurationError::UnsatisfiedDependencyVersion {
            dependency: "openmpi".to_string(),
            constraint: ":2".to_string(),
            supplied: None,
        })
    );

    // A dependency that is not required needs no version.
    let plan = evaluator
        .resolve(&BuildConfiguration::new(v("1.0")).with_variant("mpi", false))
        .unwrap();
    assert!(plan.dependencies.is_empty());

    let plan = evaluator
        .resolve(&BuildConfiguration::new(v("1.0")).with_dependency("openmpi", v("4.1.6")))
        .unwrap();
    assert_eq!(plan.dependency_names(), vec!["hwloc", "openmpi"]);
}

#[test]
fn test_unreached_version_terms_need_no_version() {
    let recipe = Compiler::from_json(
        r#"{
            "name": "demo",
            "variants": [{ "name": "mpi", "default": true }],
            "dependencies": [{ "spec": "openmpi", "when": "+mpi" }],
            "arguments": [
                { "when": "~mpi ^openmpi@:3", "args": ["-Dlegacy=true"] },
                {
                    "select": [
                        { "when": "+mpi", "args": ["-Dmpi=true"] },
                        { "when": "^openmpi@:3", "args": ["-Dmpi=legacy"] }
                    ]
                }
            ]
        }"#,
    )
    .unwrap();
    let evaluator = Evaluator::new(recipe);

    // The first guard fails on `~mpi` and the second branch is never tried.
    let plan = evaluator.resolve(&BuildConfiguration::new(v("1.0"))).unwrap();
    assert_eq!(plan.arguments, vec!["-Dmpi=true"]);
}

#[test]
fn test_undeclared_variant_is_rejected() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = rootless_configuration("0.7.0", "3.1.0").with_variant("debug", true);

    let err = evaluator.resolve(&configuration).unwrap_err();
    assert_eq!(err, ConfigurationError::UndeclaredVariant("debug".to_string()));
}

#[test]
fn test_domain_check_runs_before_conflicts() {
    let evaluator = squashfs_mount_evaluator();
    // Would conflict at 0.5.0, but the value itself is invalid.
    let configuration = BuildConfiguration::new(v("0.5.0")).with_variant("rootless", "maybe");

    let err = evaluator.resolve(&configuration).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnknownVariantValue {
            variant: "rootless".to_string(),
            value: "maybe".to_string(),
            allowed: "true, false".to_string(),
        }
    );
}

#[test]
fn test_domain_errors_are_reported_in_name_order() {
    let evaluator = toolkit_evaluator();
    let configuration = BuildConfiguration::new(v("1.4.2"))
        .with_variant("zz-unknown", true)
        .with_variant("backend", "qt")
        .with_variant("aa-unknown", true);

    for _ in 0..5 {
        let err = evaluator.resolve(&configuration).unwrap_err();
        assert_eq!(err, ConfigurationError::UndeclaredVariant("aa-unknown".to_string()));
    }

    let configuration = BuildConfiguration::new(v("1.4.2"))
        .with_variant("zz-unknown", true)
        .with_variant("backend", "qt");
    let err = evaluator.resolve(&configuration).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnknownVariantValue {
            variant: "backend".to_string(),
            value: "qt".to_string(),
            allowed: "x11, wayland".to_string(),
        }
    );
}

#[test]
fn test_enumerated_variant_selects_dependencies() {
    let evaluator = toolkit_evaluator();
    let configuration = BuildConfiguration::new(v("1.4.2")).with_variant("backend", "x11");

    let plan = evaluator.resolve(&configuration).unwrap();
    assert_eq!(plan.dependency_names(), vec!["libx11", "zlib"]);
    assert_eq!(plan.arguments, vec!["-Ddefault_library=shared", "-Dbackend=x11"]);
}

#[test]
fn test_select_takes_first_matching_branch() {
    let evaluator = toolkit_evaluator();

    let current = BuildConfiguration::new(v("2.0.0")).with_dependency("wayland", v("1.22.0"));
    let plan = evaluator.resolve(&current).unwrap();
    assert_eq!(plan.arguments, vec!["-Ddefault_library=shared", "-Dbackend=wayland"]);

    let legacy = BuildConfiguration::new(v("2.0.0")).with_dependency("wayland", v("1.21.0"));
    let plan = evaluator.resolve(&legacy).unwrap();
    assert_eq!(
        plan.arguments,
        vec![
            "-Ddefault_library=shared",
            "-Dbackend=wayland",
            "-Dlegacy_protocols=true"
        ]
    );
}

#[test]
fn test_arguments_follow_declaration_order() {
    let evaluator = toolkit_evaluator();
    let configuration = BuildConfiguration::new(v("2.0.0"))
        .with_variant("shared", false)
        .with_variant("debug", true)
        .with_dependency("wayland", v("1.22.0"));

    let plan = evaluator.resolve(&configuration).unwrap();
    assert_eq!(
        plan.arguments,
        vec!["-Ddebug=true", "-Ddefault_library=static", "-Dbackend=wayland"]
    );

    let gdb = plan.dependency("gdb").unwrap();
    assert_eq!(gdb.types, vec![DependencyType::Build]);
}

#[test]
fn test_dependency_version_must_satisfy_constraint() {
    let evaluator = toolkit_evaluator();
    let configuration = BuildConfiguration::new(v("2.0.0")).with_dependency("wayland", v("1.18"));

    let err = evaluator.resolve(&configuration).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnsatisfiedDependencyVersion {
            dependency: "wayland".to_string(),
            constraint: "1.20:".to_string(),
            supplied: Some("1.18".to_string()),
        }
    );
}

#[test]
fn test_missing_version_does_not_satisfy_constraint() {
    let evaluator = toolkit_evaluator();
    let configuration = BuildConfiguration::new(v("2.0.0"));

    let err = evaluator.resolve(&configuration).unwrap_err();
    assert_eq!(
        err,
        ConfigurationError::UnsatisfiedDependencyVersion {
            dependency: "wayland".to_string(),
            constraint: "1.20:".to_string(),
            supplied: None,
        }
    );
}

#[test]
fn test_constraints_only_apply_to_enabled_dependencies() {
    let evaluator = toolkit_evaluator();
    // wayland is not required with the X11 backend, so its bad version is ignored.
    let configuration = BuildConfiguration::new(v("1.4.2"))
        .with_variant("backend", "x11")
        .with_dependency("wayland", v("1.0"));

    assert!(evaluator.resolve(&configuration).is_ok());
}

#[test]
fn test_conflict_on_enumerated_value() {
    let evaluator = toolkit_evaluator();
    let configuration = BuildConfiguration::new(v("2.0.0")).with_variant("backend", "x11");

    let err = evaluator.resolve(&configuration).unwrap_err();
    match err {
        ConfigurationError::ConflictDetected { rule, reason, .. } => {
            assert_eq!(rule, "backend=x11 when @2:");
            assert_eq!(reason, "backend=x11 (was x11) AND @2: (was 2.0.0)");
        }
        other => panic!("Expected ConflictDetected, got {:?}", other),
    }
}

#[test]
fn test_moving_version_policy_for_lower_bounds() {
    let configuration = BuildConfiguration::new(v("2.0.0"))
        .with_dependency("wayland", Version::moving("main").unwrap());

    let default_policy = toolkit_evaluator();
    assert_eq!(default_policy.policy(), MovingVersionPolicy::SatisfiesLowerBounds);
    let plan = default_policy.resolve(&configuration).unwrap();
    // A moving version never satisfies the `:1.21` upper bound.
    assert_eq!(plan.arguments, vec!["-Ddefault_library=shared", "-Dbackend=wayland"]);

    let strict = Evaluator::builder(toolkit_evaluator().recipe().clone())
        .moving_versions(MovingVersionPolicy::Unordered)
        .build();
    assert!(matches!(
        strict.resolve(&configuration),
        Err(ConfigurationError::UnsatisfiedDependencyVersion { .. })
    ));
}

#[test]
fn test_moving_package_version_against_lower_bound_conflict() {
    let configuration = BuildConfiguration::new(v("develop")).with_variant("backend", "x11");

    let default_policy = toolkit_evaluator();
    assert!(matches!(
        default_policy.resolve(&configuration),
        Err(ConfigurationError::ConflictDetected { .. })
    ));

    let strict = Evaluator::builder(default_policy.recipe().clone())
        .moving_versions(MovingVersionPolicy::Unordered)
        .build();
    let plan = strict.resolve(&configuration).unwrap();
    assert_eq!(plan.dependency_names(), vec!["libx11", "zlib"]);
}

#[test]
fn test_all_conflicts_are_reported_in_order() {
    let recipe = Compiler::from_json(
        r#"{
            "name": "demo",
            "variants": [
                { "name": "mpi", "default": true },
                { "name": "cuda", "default": false }
            ],
            "conflicts": [
                { "spec": "+cuda", "when": "@:1" },
                { "spec": "+mpi", "when": "@:1.5", "msg": "mpi needs 2.0" },
                { "spec": "~mpi" }
            ]
        }"#,
    )
    .unwrap();
    let evaluator = Evaluator::new(recipe);
    let configuration = BuildConfiguration::new(v("1.2")).with_variant("cuda", true);

    let violations = evaluator.conflicts(&configuration).unwrap();
    let rules: Vec<_> = violations.iter().map(|c| c.rule.as_str()).collect();
    assert_eq!(rules, vec!["+cuda when @:1", "+mpi when @:1.5"]);
    assert_eq!(violations[1].message.as_deref(), Some("mpi needs 2.0"));

    match evaluator.resolve(&configuration).unwrap_err() {
        ConfigurationError::ConflictDetected { rule, .. } => assert_eq!(rule, "+cuda when @:1"),
        other => panic!("Expected ConflictDetected, got {:?}", other),
    }

    let clean = BuildConfiguration::new(v("2.0"));
    assert!(evaluator.conflicts(&clean).unwrap().is_empty());
}

#[test]
fn test_dependency_guards_may_reference_other_dependencies() {
    let recipe = Compiler::from_json(
        r#"{
            "name": "demo",
            "variants": [{ "name": "python", "default": false }],
            "dependencies": [
                { "spec": "py-setuptools", "type": ["build"], "when": "^python" },
                { "spec": "python", "when": "+python" },
                { "spec": "a", "when": "^b" },
                { "spec": "b", "when": "^a" }
            ]
        }"#,
    )
    .unwrap();
    let evaluator = Evaluator::new(recipe);

    let plan = evaluator
        .resolve(&BuildConfiguration::new(v("1.0")).with_variant("python", true))
        .unwrap();
    // Mutual references with nothing enabling either side stay disabled.
    assert_eq!(plan.dependency_names(), vec!["py-setuptools", "python"]);

    let plan = evaluator.resolve(&BuildConfiguration::new(v("1.0"))).unwrap();
    assert!(plan.dependencies.is_empty());
}

#[test]
fn test_repeated_declarations_merge_types() {
    let recipe = Compiler::from_json(
        r#"{
            "name": "demo",
            "variants": [{ "name": "docs", "default": false }],
            "dependencies": [
                { "spec": "cmake", "type": ["build"] },
                { "spec": "cmake@3.20:", "type": ["run"], "when": "+docs" }
            ]
        }"#,
    )
    .unwrap();
    let evaluator = Evaluator::new(recipe);

    let plan = evaluator.resolve(&BuildConfiguration::new(v("1.0"))).unwrap();
    assert_eq!(plan.dependency("cmake").unwrap().types, vec![DependencyType::Build]);

    let configuration = BuildConfiguration::new(v("1.0"))
        .with_variant("docs", true)
        .with_dependency("cmake", v("3.27.1"));
    let plan = evaluator.resolve(&configuration).unwrap();
    assert_eq!(plan.dependencies.len(), 1);
    assert_eq!(
        plan.dependency("cmake").unwrap().types,
        vec![DependencyType::Build, DependencyType::Run]
    );

    let too_old = configuration.with_dependency("cmake", v("3.16"));
    assert!(matches!(
        evaluator.resolve(&too_old),
        Err(ConfigurationError::UnsatisfiedDependencyVersion { .. })
    ));
}

#[test]
fn test_recipe_without_rules_resolves_to_empty_plan() {
    let recipe = Compiler::from_json(r#"{ "name": "empty" }"#).unwrap();
    let evaluator = Evaluator::new(recipe);

    let plan = evaluator.resolve(&BuildConfiguration::new(v("1.0"))).unwrap();
    assert_eq!(plan.package, "empty");
    assert!(plan.dependencies.is_empty());
    assert!(plan.arguments.is_empty());
    assert_eq!(plan.build_system, None);
}

#[test]
fn test_resolution_is_deterministic() {
    let evaluator = toolkit_evaluator();
    let first = BuildConfiguration::new(v("1.4.2"))
        .with_variant("debug", true)
        .with_variant("backend", "x11")
        .with_dependency("zlib", v("1.3"));
    let second = BuildConfiguration::new(v("1.4.2"))
        .with_dependency("zlib", v("1.3"))
        .with_variant("backend", "x11")
        .with_variant("debug", true);

    let expected = evaluator.resolve(&first).unwrap();
    for _ in 0..10 {
        assert_eq!(evaluator.resolve(&first).unwrap(), expected);
        assert_eq!(evaluator.resolve(&second).unwrap(), expected);
    }
}

#[test]
fn test_explain_reports_every_rule() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = rootless_configuration("0.5.0", "3.16.2");

    // Explaining never fails on conflicts.
    let explanation = evaluator.explain(&configuration).unwrap();

    let dependencies: Vec<_> = explanation
        .dependencies
        .iter()
        .map(|r| (r.rule.as_str(), r.fired, r.reason.as_str()))
        .collect();
    assert_eq!(
        dependencies,
        vec![
            ("dependency 'util-linux'", true, "always"),
            ("dependency 'libfuse'", true, "+rootless (was true)"),
            ("dependency 'squashfuse'", true, "+rootless (was true)"),
        ]
    );

    assert_eq!(explanation.conflicts.len(), 1);
    assert!(explanation.conflicts[0].fired);
    assert_eq!(explanation.conflicts[0].rule, "conflict '+rootless when @:0.6'");
    assert_eq!(
        explanation.conflicts[0].reason,
        "+rootless (was true) AND @:0.6 (was 0.5.0)"
    );

    let arguments: Vec<_> = explanation
        .arguments
        .iter()
        .map(|r| (r.rule.as_str(), r.fired))
        .collect();
    assert_eq!(
        arguments,
        vec![
            ("argument rule #1", true),
            ("argument rule #1.1", false),
            ("argument rule #1.2", true),
        ]
    );
    assert_eq!(explanation.arguments[1].reason, "^libfuse@:2.9.99 (was 3.16.2)");
}

#[test]
fn test_explain_skips_branches_of_rules_that_did_not_fire() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = BuildConfiguration::new(v("0.7.0")).with_variant("rootless", false);

    let explanation = evaluator.explain(&configuration).unwrap();
    assert_eq!(explanation.arguments.len(), 1);
    assert!(!explanation.arguments[0].fired);
    assert_eq!(explanation.arguments[0].reason, "+rootless (was false)");
    assert!(!explanation.conflicts[0].fired);
    assert_eq!(explanation.conflicts[0].reason, "+rootless (was false)");
}

#[test]
fn test_explain_still_validates_domain() {
    let evaluator = squashfs_mount_evaluator();
    let configuration = BuildConfiguration::new(v("0.7.0")).with_variant("static", true);
    assert!(matches!(
        evaluator.explain(&configuration),
        Err(ConfigurationError::UndeclaredVariant(_))
    ));
}

#[test]
fn test_swapping_argument_rules_swaps_their_tokens() {
    let configuration = BuildConfiguration::new(v("2.0.0"))
        .with_variant("debug", true)
        .with_variant("shared", true)
        .with_dependency("wayland", v("1.22.0"));

    let plan = toolkit_evaluator().resolve(&configuration).unwrap();
    assert_eq!(
        plan.arguments,
        vec!["-Ddebug=true", "-Ddefault_library=shared", "-Dbackend=wayland"]
    );

    let mut definition = create_toolkit_definition();
    definition.arguments.swap(0, 1);
    let swapped = Evaluator::new(Compiler::builder(definition).build().compile().unwrap());
    let swapped_plan = swapped.resolve(&configuration).unwrap();
    assert_eq!(
        swapped_plan.arguments,
        vec!["-Ddefault_library=shared", "-Ddebug=true", "-Dbackend=wayland"]
    );
    assert_eq!(swapped_plan.dependencies, plan.dependencies);
}

#[test]
fn test_chained_version_gated_guards_reach_a_fixpoint() {
    let declarations = [
        r#"{ "spec": "py-wheel", "type": ["build"], "when": "^py-setuptools@60:" }"#,
        r#"{ "spec": "py-setuptools", "type": ["build"], "when": "^python@3:" }"#,
        r#"{ "spec": "python", "when": "+python" }"#,
    ];
    let recipe = |order: &[usize]| {
        let dependencies: Vec<_> = order.iter().map(|&i| declarations[i]).collect();
        let json = format!(
            r#"{{ "name": "demo", "variants": [{{ "name": "python", "default": true }}], "dependencies": [{}] }}"#,
            dependencies.join(", ")
        );
        Evaluator::new(Compiler::from_json(&json).unwrap())
    };

    let old_setuptools = BuildConfiguration::new(v("1.0"))
        .with_dependency("python", v("3.11"))
        .with_dependency("py-setuptools", v("59.8"));
    let new_setuptools = old_setuptools.clone().with_dependency("py-setuptools", v("68.0"));

    for order in [[0, 1, 2], [2, 1, 0], [1, 0, 2]] {
        let evaluator = recipe(&order);
        assert_eq!(
            evaluator.resolve(&old_setuptools).unwrap().dependency_names(),
            vec!["py-setuptools", "python"]
        );
        assert_eq!(
            evaluator.resolve(&new_setuptools).unwrap().dependency_names(),
            vec!["py-setuptools", "py-wheel", "python"]
        );

        // Every declaration that fired still holds in the final state, and every one
        // that did not fire still fails.
        let explanation = evaluator.explain(&new_setuptools).unwrap();
        assert!(explanation.dependencies.iter().all(|r| r.fired));
        let explanation = evaluator.explain(&old_setuptools).unwrap();
        for report in &explanation.dependencies {
            assert_eq!(report.fired, !report.rule.contains("py-wheel"), "{}", report.reason);
        }
    }

    let evaluator = recipe(&[0, 1, 2]);
    assert!(matches!(
        evaluator.resolve(&BuildConfiguration::new(v("1.0")).with_dependency("python", v("3.11"))),
        Err(ConfigurationError::UnsatisfiedDependencyVersion { supplied: None, .. })
    ));
}
