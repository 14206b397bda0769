use clap::Parser;
use dishx_similarity::{Preference, QueryBuilder, RecommendResponse};
use dishx_storage::{Recommender, RecommenderConfig};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommend restaurants from a CSV catalog
#[derive(Parser, Debug)]
#[command(name = "dishx")]
#[command(about = "A content-based restaurant recommender", long_about = None)]
struct Args {
    /// Path to the restaurant catalog CSV
    #[arg(short, long)]
    catalog: PathBuf,

    /// Preferred city
    #[arg(long)]
    city: Option<String>,

    /// Preferred cuisine, e.g. "North Indian, Chinese"
    #[arg(long)]
    cuisine: Option<String>,

    /// Minimum acceptable rating
    #[arg(long)]
    min_rating: Option<f64>,

    /// Maximum cost for two
    #[arg(long)]
    max_budget: Option<f64>,

    /// Number of recommendations (overrides the config file)
    #[arg(short = 'k', long)]
    top_k: Option<usize>,

    /// Path to a JSON config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,

    /// List cities, cuisines and value ranges, then exit
    #[arg(long)]
    list: bool,

    /// Print the fitted feature schema, then exit
    #[arg(long)]
    schema: bool,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,
}

/// What the catalog offers to choose from
#[derive(Debug, Serialize)]
struct CatalogChoices {
    cities: Vec<String>,
    cuisines: Vec<String>,
    rating: Option<(f64, f64)>,
    cost: Option<(f64, f64)>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting dishx v{}", env!("CARGO_PKG_VERSION"));
    info!("Catalog: {:?}", args.catalog);

    let mut config = match &args.config {
        Some(path) => RecommenderConfig::from_json_file(path)?,
        None => RecommenderConfig::default(),
    };
    if let Some(top_k) = args.top_k {
        config.top_k = top_k;
    }

    let recommender = Recommender::open(&args.catalog, config)?;
    let state = recommender.snapshot();

    if args.list {
        let catalog = state.catalog();
        let choices = CatalogChoices {
            cities: catalog.distinct_cities(),
            cuisines: catalog.distinct_cuisines(),
            rating: catalog.rating_summary().map(|s| (s.min, s.max)),
            cost: catalog.cost_summary().map(|s| (s.min, s.max)),
        };
        if args.json {
            println!("{}", serde_json::to_string_pretty(&choices)?);
        } else {
            print_choices(&choices);
        }
        return Ok(());
    }

    if args.schema {
        println!("{}", serde_json::to_string_pretty(state.encoder().schema())?);
        return Ok(());
    }

    let defaults = QueryBuilder::new(state.catalog())
        .defaults()
        .ok_or_else(|| anyhow::anyhow!("catalog {:?} has no restaurants", args.catalog))?;
    let preference = Preference {
        city: args.city.unwrap_or(defaults.city),
        cuisine: args.cuisine.unwrap_or(defaults.cuisine),
        min_rating: args.min_rating.unwrap_or(defaults.min_rating),
        max_budget: args.max_budget.unwrap_or(defaults.max_budget),
    };
    info!("Preference: {:?}", preference);

    let response = recommender.recommend(&preference)?;
    if args.json {
        println!("{}", response.to_json()?);
    } else {
        print_response(&preference, &response);
    }

    Ok(())
}

fn print_choices(choices: &CatalogChoices) {
    println!("Cities ({}):", choices.cities.len());
    for city in &choices.cities {
        println!("  {}", city);
    }
    println!("Cuisines ({}):", choices.cuisines.len());
    for cuisine in &choices.cuisines {
        println!("  {}", cuisine);
    }
    if let Some((min, max)) = choices.rating {
        println!("Rating: {:.1} - {:.1}", min, max);
    }
    if let Some((min, max)) = choices.cost {
        println!("Cost for two: {:.0} - {:.0}", min, max);
    }
}

fn print_response(preference: &Preference, response: &RecommendResponse) {
    println!(
        "Top picks in {} for \"{}\" (rating >= {:.1}, budget <= {:.0})",
        preference.city, preference.cuisine, preference.min_rating, preference.max_budget
    );
    println!();

    if let Some(message) = &response.message {
        println!("{}", message);
    } else {
        println!(
            "{:<4} {:<30} {:<28} {:>6} {:>7} {:>6} {:<8} {}",
            "#", "Name", "Cuisine", "Rating", "Cost", "Score", "Match", "Address"
        );
        for (i, rec) in response.result.iter().enumerate() {
            let cost = rec
                .cost
                .map(|c| format!("{:.0}", c))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<4} {:<30} {:<28} {:>6.1} {:>7} {:>6.3} {:<8} {}",
                i + 1,
                truncate(&rec.name, 30),
                truncate(&rec.cuisine, 28),
                rec.rating,
                cost,
                rec.score,
                rec.explain.top_block().unwrap_or("-"),
                rec.address
            );
        }
    }

    let summary = &response.summary;
    println!();
    println!("Restaurants analyzed: {}", summary.total);
    println!("Matching filters:     {}", summary.matching);
    println!("Recommendations:      {}", summary.returned);
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let cut: String = text.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
