use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use quran_vocab::cli::{self, Cli};
use quran_vocab::{config, db};

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quran_vocab=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let db_path = config::load_database_path();
    let pool = match db::init_db(&db_path) {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to open corpus database {}: {}", db_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    tracing::debug!("Using corpus database {}", db_path.display());

    match cli::run(cli.command, pool, config::load_quiz_defaults()) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
