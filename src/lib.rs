//! # Kumitate - Build-Recipe Resolution Engine
//!
//! **Kumitate** resolves declarative package build recipes. A recipe declares variants
//! (build options), versioned dependencies, conflicts and conditional build-tool
//! arguments. Given a concrete build configuration, the engine deterministically derives
//! the required dependency set and the exact, ordered argument list for the build tool,
//! or reports why the configuration cannot be built.
//!
//! ## Core Workflow
//!
//! 1.  **Load a Recipe**: Parse a JSON recipe into a `RecipeDefinition`, or implement
//!     the `IntoRecipe` trait to translate your own format.
//! 2.  **Compile**: Use `Compiler::builder` to validate the definition and turn its
//!     condition strings (`+rootless`, `@:0.6`, `^libfuse@:2.9.99`) into typed rules.
//! 3.  **Resolve**: Create an `Evaluator` from the compiled `Recipe` and call `resolve`
//!     with as many `BuildConfiguration`s as you like.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kumitate::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let recipe = Compiler::from_json(r#"{
//!         "name": "squashfs-mount",
//!         "build_system": "meson",
//!         "versions": [{ "version": "master", "branch": "master" }, { "version": "0.7.0" }],
//!         "variants": [{ "name": "rootless", "default": true }],
//!         "dependencies": [
//!             { "spec": "util-linux", "type": ["link"] },
//!             { "spec": "libfuse", "when": "+rootless" },
//!             { "spec": "squashfuse", "when": "+rootless" }
//!         ],
//!         "conflicts": [{ "spec": "+rootless", "when": "@:0.6" }],
//!         "arguments": [{
//!             "when": "+rootless",
//!             "args": ["-Drootless=true"],
//!             "select": [
//!                 { "when": "^libfuse@:2.9.99", "args": ["-Dfuse_version=fuse"] },
//!                 { "args": ["-Dfuse_version=fuse3"] }
//!             ]
//!         }]
//!     }"#)?;
//!
//!     let evaluator = Evaluator::new(recipe);
//!     let configuration = BuildConfiguration::new(Version::parse("0.7.0")?)
//!         .with_variant("rootless", true)
//!         .with_dependency("libfuse", Version::parse("3.1.0")?);
//!
//!     let plan = evaluator.resolve(&configuration)?;
//!     println!("meson {}", plan.arguments.join(" "));
//!     Ok(())
//! }
//! ```

pub mod ast;
pub mod compiler;
pub mod data;
pub mod error;
pub mod evaluator;
pub mod prelude;
pub mod provider;
pub mod recipe;
pub mod trace;
pub mod version;
