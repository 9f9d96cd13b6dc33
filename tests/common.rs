//! Common test utilities for building recipes and configurations.
use kumitate::prelude::*;

/// The squashfs-mount recipe shipped in `data/`.
#[allow(dead_code)]
pub const SQUASHFS_MOUNT_JSON: &str = include_str!("../data/squashfs-mount.json");

#[allow(dead_code)]
pub fn v(version: &str) -> Version {
    Version::parse(version).expect("test versions are well-formed")
}

#[allow(dead_code)]
pub fn squashfs_mount_definition() -> RecipeDefinition {
    RecipeDefinition::from_json(SQUASHFS_MOUNT_JSON).expect("Failed to parse recipe JSON")
}

#[allow(dead_code)]
pub fn squashfs_mount_recipe() -> Recipe {
    Compiler::builder(squashfs_mount_definition())
        .build()
        .compile()
        .expect("Failed to compile recipe")
}

#[allow(dead_code)]
pub fn squashfs_mount_evaluator() -> Evaluator {
    Evaluator::new(squashfs_mount_recipe())
}

/// `+rootless` at `version`, with libfuse at `libfuse`.
#[allow(dead_code)]
pub fn rootless_configuration(version: &str, libfuse: &str) -> BuildConfiguration {
    BuildConfiguration::new(v(version))
        .with_variant("rootless", true)
        .with_dependency("libfuse", v(libfuse))
}

#[allow(dead_code)]
pub fn variant(name: &str, default: serde_json::Value) -> VariantDefinition {
    VariantDefinition {
        name: name.to_string(),
        default,
        values: None,
        description: None,
    }
}

#[allow(dead_code)]
pub fn dependency(spec: &str, when: Option<&str>) -> DependencyDefinition {
    DependencyDefinition {
        spec: spec.to_string(),
        types: vec![],
        when: when.map(str::to_string),
    }
}

#[allow(dead_code)]
pub fn argument(when: Option<&str>, args: &[&str]) -> ArgumentRuleDefinition {
    ArgumentRuleDefinition {
        when: when.map(str::to_string),
        args: args.iter().map(|a| a.to_string()).collect(),
        select: vec![],
    }
}

/// A recipe with several independent rules.
///
/// Variants: `debug` (default off), `shared` (default on), `backend` in
/// {`x11`, `wayland`} (default `wayland`).
#[allow(dead_code)]
pub fn create_toolkit_definition() -> RecipeDefinition {
    RecipeDefinition {
        name: "toolkit".to_string(),
        build_system: Some("meson".to_string()),
        versions: vec![
            VersionDefinition {
                version: "1.4.2".to_string(),
                ..Default::default()
            },
            VersionDefinition {
                version: "2.0.0".to_string(),
                preferred: true,
                ..Default::default()
            },
            VersionDefinition {
                version: "develop".to_string(),
                branch: Some("develop".to_string()),
                ..Default::default()
            },
        ],
        variants: vec![
            variant("debug", serde_json::json!(false)),
            variant("shared", serde_json::json!(true)),
            VariantDefinition {
                name: "backend".to_string(),
                default: serde_json::json!("wayland"),
                values: Some(vec!["x11".to_string(), "wayland".to_string()]),
                description: Some("windowing backend".to_string()),
            },
        ],
        dependencies: vec![
            dependency("zlib", None),
            dependency("libx11", Some("backend=x11")),
            dependency("wayland@1.20:", Some("backend=wayland")),
            DependencyDefinition {
                spec: "gdb".to_string(),
                types: vec!["build".to_string()],
                when: Some("+debug".to_string()),
            },
        ],
        conflicts: vec![ConflictDefinition {
            spec: "backend=x11".to_string(),
            when: Some("@2:".to_string()),
            msg: Some("the X11 backend was removed in 2.0".to_string()),
        }],
        arguments: vec![
            argument(Some("+debug"), &["-Ddebug=true"]),
            argument(Some("+shared"), &["-Ddefault_library=shared"]),
            argument(Some("~shared"), &["-Ddefault_library=static"]),
            ArgumentRuleDefinition {
                when: None,
                args: vec![],
                select: vec![
                    argument(Some("backend=x11"), &["-Dbackend=x11"]),
                    argument(Some("^wayland@:1.21"), &["-Dbackend=wayland", "-Dlegacy_protocols=true"]),
                    argument(None, &["-Dbackend=wayland"]),
                ],
            },
        ],
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn toolkit_evaluator() -> Evaluator {
    let recipe = Compiler::builder(create_toolkit_definition())
        .build()
        .compile()
        .expect("Failed to compile toolkit recipe");
    Evaluator::new(recipe)
}
