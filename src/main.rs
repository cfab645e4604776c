mod cli;

use starsphere::{RunOptions, SceneConfig};
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVE: &str = "starsphere=info";

fn main() {
    let args = cli::parse();

    let log_directive = args.log_level.as_deref().unwrap_or(DEFAULT_LOG_DIRECTIVE);
    let directive: Directive = log_directive.parse().unwrap_or_else(|_| {
        eprintln!("ignoring invalid log directive {log_directive:?}");
        DEFAULT_LOG_DIRECTIVE
            .parse()
            .unwrap_or_else(|_| LevelFilter::INFO.into())
    });
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive))
        .init();

    tracing::info!("starsphere v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = match &args.config {
        Some(path) => {
            tracing::info!("Loading scene config from {}", path.display());
            SceneConfig::load(path)
        }
        None => {
            let profile = args.device_profile();
            tracing::info!("Using built-in {profile:?} profile");
            Ok(SceneConfig::for_profile(profile))
        }
    };
    let config = match config.and_then(|c| c.validate().map(|()| c)) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            std::process::exit(1);
        }
    };

    if args.dump_config {
        match config.to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                tracing::error!("{e}");
                std::process::exit(1);
            }
        }
        return;
    }

    let options = RunOptions {
        width: args.width,
        height: args.height,
        seed: args.seed,
        ..RunOptions::default()
    };

    if let Err(e) = starsphere::run(config, options) {
        tracing::error!("{e}");
        std::process::exit(1);
    }
    tracing::info!("Shutdown complete");
}
