use clap::{Parser, ValueEnum};
use kumitate::evaluator::RuleReport;
use kumitate::prelude::*;
use std::time::Instant;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MovingVersions {
    SatisfiesLowerBounds,
    Unordered,
}

/// Resolve a build configuration against a package recipe
#[derive(Parser, Debug)]
#[command(about, long_about = None)]
struct Cli {
    /// Path to the recipe, either JSON or a compiled `.bin` artifact
    recipe_path: String,
    /// Optional path to a build request JSON file
    request_path: Option<String>,

    /// Override a variant: `+name`, `~name` or `name=value`
    #[arg(short, long = "set", value_name = "VARIANT")]
    set: Vec<String>,

    /// The package version to build
    #[arg(long)]
    version: Option<String>,

    /// Supply a dependency version as `name@version`
    #[arg(short, long = "dep", value_name = "NAME@VERSION")]
    dep: Vec<String>,

    /// Write the compiled recipe to this path
    #[arg(long, value_name = "OUT")]
    compile: Option<String>,

    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Report how every rule evaluated instead of resolving
    #[arg(long)]
    explain: bool,

    /// How branch versions relate to lower-bound-only ranges
    #[arg(long, value_enum, default_value = "satisfies-lower-bounds")]
    moving_versions: MovingVersions,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Whether any configuration input was given. `--compile` alone only writes the
    /// artifact.
    fn requests_resolution(&self) -> bool {
        self.request_path.is_some()
            || !self.set.is_empty()
            || self.version.is_some()
            || !self.dep.is_empty()
            || self.explain
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .without_time()
        .init();

    run(cli);
}

fn run(cli: Cli) {
    let total_start = Instant::now();

    // --- 1. Recipe Loading ---
    let load_start = Instant::now();
    let recipe = load_recipe(&cli.recipe_path);
    let load_duration = load_start.elapsed();
    info!(recipe = %recipe.name(), "loaded recipe");

    if let Some(out) = &cli.compile {
        recipe
            .save(out)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to write artifact: {}", e)));
        println!("Compiled recipe '{}' written to '{}'", recipe.name(), out);
        if !cli.requests_resolution() {
            return;
        }
    }

    // --- 2. Configuration ---
    let mut request = match &cli.request_path {
        Some(path) => BuildRequest::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load request: {}", e))),
        None => BuildRequest::default(),
    };
    apply_overrides(&cli, &mut request);

    let provider = StaticVersionProvider::from_recipe(&recipe);
    let configuration = request
        .into_configuration(&recipe, &provider)
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid build request: {}", e)));
    debug!(version = %configuration.version(), "built configuration");

    let policy = match cli.moving_versions {
        MovingVersions::SatisfiesLowerBounds => MovingVersionPolicy::SatisfiesLowerBounds,
        MovingVersions::Unordered => MovingVersionPolicy::Unordered,
    };
    let evaluator = Evaluator::builder(recipe).moving_versions(policy).build();

    // --- 3. Resolution ---
    let eval_start = Instant::now();
    if cli.explain {
        let explanation = evaluator
            .explain(&configuration)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        let eval_duration = eval_start.elapsed();
        print_explanation(&explanation, cli.format);
        print_timing(load_duration, eval_duration, total_start);
        return;
    }

    let plan = evaluator
        .resolve(&configuration)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let eval_duration = eval_start.elapsed();

    match cli.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&plan.to_json()) {
            Ok(json) => println!("{}", json),
            Err(e) => exit_with_error(&format!("Failed to serialize plan: {}", e)),
        },
        OutputFormat::Text => {
            println!("\nResolution Finished!");
            println!("  -> Package: {}@{}", plan.package, plan.version);
            println!("  -> Dependencies:");
            for line in plan.dependency_summary().lines() {
                println!("       {}", line);
            }
            let tool = plan.build_system.as_deref().unwrap_or("build");
            println!("  -> Command: {} {}", tool, plan.arguments.join(" "));
            print_timing(load_duration, eval_duration, total_start);
        }
    }
}

fn load_recipe(path: &str) -> Recipe {
    if path.ends_with(".bin") {
        return Recipe::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load artifact: {}", e)));
    }
    let definition = RecipeDefinition::from_file(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load recipe: {}", e)));
    Compiler::builder(definition)
        .build()
        .compile()
        .unwrap_or_else(|e| exit_with_error(&format!("Recipe compilation failed: {}", e)))
}

/// Command-line flags win over the request file.
fn apply_overrides(cli: &Cli, request: &mut BuildRequest) {
    if let Some(version) = &cli.version {
        request.version = Some(version.clone());
    }
    for term in &cli.set {
        let (name, value) = if let Some(name) = term.strip_prefix('+') {
            (name, serde_json::Value::Bool(true))
        } else if let Some(name) = term.strip_prefix('~') {
            (name, serde_json::Value::Bool(false))
        } else if let Some((name, value)) = term.split_once('=') {
            (name, serde_json::Value::String(value.to_string()))
        } else {
            exit_with_error(&format!(
                "Invalid variant override '{}' (expected +name, ~name or name=value)",
                term
            ))
        };
        request.variants.insert(name.to_string(), value);
    }
    for spec in &cli.dep {
        let Some((name, version)) = spec.split_once('@') else {
            exit_with_error(&format!("Invalid dependency '{}' (expected name@version)", spec));
        };
        request
            .dependencies
            .insert(name.to_string(), version.to_string());
    }
}

fn print_explanation(explanation: &Explanation, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let json = serde_json::json!({
                "dependencies": reports_json(&explanation.dependencies),
                "conflicts": reports_json(&explanation.conflicts),
                "arguments": reports_json(&explanation.arguments),
            });
            match serde_json::to_string_pretty(&json) {
                Ok(text) => println!("{}", text),
                Err(e) => exit_with_error(&format!("Failed to serialize explanation: {}", e)),
            }
        }
        OutputFormat::Text => {
            for (title, reports) in [
                ("Dependencies", &explanation.dependencies),
                ("Conflicts", &explanation.conflicts),
                ("Arguments", &explanation.arguments),
            ] {
                println!("\n{}:", title);
                for report in reports {
                    let mark = if report.fired { "fired" } else { "skipped" };
                    println!("  [{:>7}] {}: {}", mark, report.rule, report.reason);
                }
            }
        }
    }
}

fn reports_json(reports: &[RuleReport]) -> Vec<serde_json::Value> {
    reports
        .iter()
        .map(|r| serde_json::json!({ "rule": r.rule, "fired": r.fired, "reason": r.reason }))
        .collect()
}

fn print_timing(
    load_duration: std::time::Duration,
    eval_duration: std::time::Duration,
    total_start: Instant,
) {
    println!("\n--- Performance Summary ---");
    println!("Recipe Loading:       {:?}", load_duration);
    println!("Resolution:           {:?}", eval_duration);
    println!("-----------------------------");
    println!("Total Execution:      {:?}", total_start.elapsed());
    println!();
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
