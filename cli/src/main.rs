mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tadka_core::{
    builtin_recipes, create_generator_from_env, search_recipes, Catalogue, DietPreference, Matcher,
    TadkaConfig, VarietySearch,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "tadka")]
#[command(about = "Find dish varieties and pantry recipes", long_about = None)]
struct Cli {
    /// Catalogue JSON file (overrides TADKA_CATALOGUE_PATH)
    #[arg(long, global = true)]
    catalogue: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match a dish name against the catalogue
    Match {
        query: String,
        /// Diet preference: veg, non-veg or none (default: TADKA_DIET)
        #[arg(long)]
        diet: Option<DietPreference>,
        /// Use substring matching instead of scored word matching
        #[arg(long)]
        loose: bool,
    },
    /// Find varieties, falling back to the generator and generic suggestions
    Search {
        query: String,
        /// Diet preference: veg, non-veg or none (default: TADKA_DIET)
        #[arg(long)]
        diet: Option<DietPreference>,
        /// Skip the generator disk cache
        #[arg(long)]
        no_cache: bool,
    },
    /// Rank built-in recipes by comma-separated pantry ingredients
    Pantry { ingredients: String },
    /// List catalogue keys in match order
    Keys,
    /// Load and validate a catalogue file
    Validate { path: PathBuf },
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = TadkaConfig::from_env()?;
    if cli.catalogue.is_some() {
        config.catalogue_path = cli.catalogue.clone();
    }

    match cli.command {
        Commands::Match { query, diet, loose } => {
            let loaded = load_catalogue(&config)?;
            let catalogue = catalogue_or_builtin(&loaded);
            let diet = diet.unwrap_or(config.default_diet);
            run_match(catalogue, &query, diet, loose, cli.json)?;
        }
        Commands::Search {
            query,
            diet,
            no_cache,
        } => {
            if no_cache {
                config.cache_enabled = false;
            }
            let loaded = load_catalogue(&config)?;
            let catalogue = catalogue_or_builtin(&loaded);
            let generator = create_generator_from_env(&config);
            tracing::debug!(
                generator = generator.generator_name(),
                cache_enabled = config.cache_enabled,
                "Search generator ready"
            );
            let search = VarietySearch::new(catalogue, generator.as_ref());

            let outcome = search
                .find(&query, diet.unwrap_or(config.default_diet))
                .await?;
            output::print_search(&outcome, cli.json)?;
        }
        Commands::Pantry { ingredients } => {
            let results = search_recipes(builtin_recipes(), &ingredients);
            output::print_pantry(&results, cli.json)?;
        }
        Commands::Keys => {
            let loaded = load_catalogue(&config)?;
            let catalogue = catalogue_or_builtin(&loaded);
            output::print_keys(catalogue, cli.json)?;
        }
        Commands::Validate { path } => {
            let catalogue = load_from(&path)?;
            output::print_validation(&path, &catalogue, cli.json)?;
        }
    }

    Ok(())
}

/// Load the configured catalogue file, or `None` for the embedded one.
fn load_catalogue(config: &TadkaConfig) -> Result<Option<Catalogue>> {
    config
        .catalogue_path
        .as_deref()
        .map(load_from)
        .transpose()
}

fn catalogue_or_builtin(loaded: &Option<Catalogue>) -> &Catalogue {
    match loaded {
        Some(catalogue) => catalogue,
        None => Catalogue::builtin(),
    }
}

fn load_from(path: &Path) -> Result<Catalogue> {
    Catalogue::load(path).with_context(|| format!("Failed to load catalogue {}", path.display()))
}

fn run_match(
    catalogue: &Catalogue,
    query: &str,
    diet: DietPreference,
    loose: bool,
    json: bool,
) -> Result<()> {
    match find_match(catalogue, query, diet, loose) {
        Some(report) => output::print_match(&report, json),
        None => output::print_no_match(query, json),
    }
}

fn find_match(
    catalogue: &Catalogue,
    query: &str,
    diet: DietPreference,
    loose: bool,
) -> Option<output::MatchReport> {
    let matcher = Matcher::new(catalogue);

    if loose {
        matcher
            .loose_lookup(query)
            .map(|m| output::MatchReport::loose(&m, diet))
    } else {
        matcher
            .strict_lookup(query)
            .map(|m| output::MatchReport::strict(&m, diet))
    }
}
