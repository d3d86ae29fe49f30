use std::path::Path;

use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cinematch::catalog::Catalog;
use cinematch::config::Config;
use cinematch::recommend::{fingerprint_file, SimilarityModel};
use cinematch::ServerError;

#[derive(Parser, Debug)]
#[command(name = "cinematch-train")]
#[command(about = "Build the movie similarity model", long_about = None)]
struct Args {
    #[arg(short, long, default_value = "cinematch.yaml")]
    config: String,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cinematch=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    if let Err(e) = train(&args.config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn train(config_path: &str) -> Result<(), ServerError> {
    let config = Config::from_file(config_path)?;

    let dataset_path = Path::new(&config.catalog.dataset);
    let catalog = Catalog::load(dataset_path)?;
    let fingerprint = fingerprint_file(dataset_path)?;

    let model = SimilarityModel::build(&catalog, config.model.top_k, fingerprint);

    let model_path = Path::new(&config.model.path);
    model.save(model_path)?;

    info!(
        "Model ready: top-{} neighbors for {} movies, saved to {}",
        model.top_k,
        model.movie_count,
        model_path.display()
    );
    Ok(())
}
