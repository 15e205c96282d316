use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fittrack::cli::{self, Cli};
use fittrack::config::Config;
use fittrack::db;
use fittrack::error::AppError;
use fittrack::migrations::run_migrations;
use fittrack::repositories::{UserRepository, WorkoutRepository};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let args = Cli::parse();
    let config = Config::from_env().with_database_url(args.database.clone());

    // Logs go to stderr so command output stays on stdout
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!("Opening database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;
    run_migrations(&pool)?;

    let user_repo = UserRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Err(err) = cli::run(&args.command, &user_repo, &workout_repo, &mut out) {
        drop(out);
        report(&err);
        std::process::exit(err.exit_code());
    }

    Ok(())
}

fn report(err: &AppError) {
    match err {
        AppError::Database(e) => tracing::error!("Database error: {:?}", e),
        AppError::Pool(e) => tracing::error!("Pool error: {:?}", e),
        AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
        _ => {}
    }
    eprintln!("Error: {}", err);
}
