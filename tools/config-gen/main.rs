use clap::Parser;
use kumitate::prelude::*;
use kumitate::recipe::VariantDomain;
use rand::seq::IndexedRandom;
use rand::{Rng, rngs::ThreadRng};
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// A CLI tool to generate random build requests for a recipe
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the recipe JSON file
    recipe_path: String,

    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_request.json")]
    output: String,

    /// The number of requests to generate; more than one writes a JSON array
    #[arg(short, long, default_value_t = 1)]
    count: usize,

    /// Probability that a dependency version is left out of a request
    #[arg(long, default_value_t = 0.1)]
    omit: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .without_time()
        .init();

    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.count == 0 {
        eprintln!("Error: --count must be at least 1");
        std::process::exit(1);
    }
    if !(0.0..=1.0).contains(&cli.omit) {
        eprintln!("Error: --omit ({}) must be between 0 and 1", cli.omit);
        std::process::exit(1);
    }

    let definition = RecipeDefinition::from_file(&cli.recipe_path)?;
    let recipe = Compiler::builder(definition).build().compile()?;
    info!(recipe = %recipe.name(), count = cli.count, "generating build requests");

    let requests: Vec<BuildRequest> = (0..cli.count)
        .map(|_| generate_request(&mut rng, &recipe, cli.omit))
        .collect();

    let json_output = if requests.len() == 1 {
        serde_json::to_string_pretty(&requests[0])?
    } else {
        serde_json::to_string_pretty(&requests)?
    };
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated {} request(s) for '{}' and saved them to '{}'",
        requests.len(),
        recipe.name(),
        cli.output
    );

    Ok(())
}

fn generate_request(rng: &mut ThreadRng, recipe: &Recipe, omit: f64) -> BuildRequest {
    let mut request = BuildRequest {
        version: recipe
            .versions()
            .choose(rng)
            .map(|declared| declared.version.to_string()),
        ..Default::default()
    };

    for variant in recipe.variants() {
        let value = match &variant.domain {
            VariantDomain::Bool => serde_json::Value::Bool(rng.random_bool(0.5)),
            VariantDomain::Values(values) => match values.choose(rng) {
                Some(value) => serde_json::Value::String(value.clone()),
                None => continue,
            },
        };
        request.variants.insert(variant.name.clone(), value);
    }

    for name in recipe.dependency_names() {
        if rng.random_bool(omit) {
            continue;
        }
        request
            .dependencies
            .insert(name.to_string(), generate_version(rng));
    }

    request
}

/// A release such as `3.16.2`, biased towards small components.
fn generate_version(rng: &mut ThreadRng) -> String {
    let major = rng.random_range(0..=4);
    let minor = rng.random_range(0..=20);
    if rng.random_bool(0.3) {
        format!("{}.{}", major, minor)
    } else {
        format!("{}.{}.{}", major, minor, rng.random_range(0..=99))
    }
}
