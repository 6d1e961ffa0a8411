use crate::api::{router, AppState};
use crate::cli::args::{Cli, Commands, DatasetArgs};
use crate::config::Settings;
use crate::processors::IntegrityChecker;
use crate::readers::DatasetLoader;
use crate::store::DatasetStore;
use crate::utils::progress::ProgressReporter;
use anyhow::Context;
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, error, info, warn};
use validator::Validate;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_logging(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Serve {
            dataset,
            host,
            port,
            workers,
        } => {
            let mut settings = load_settings(&dataset)?;
            if let Some(host) = host {
                settings.server.host = host;
            }
            if let Some(port) = port {
                settings.server.port = port;
            }
            if let Some(workers) = workers {
                settings.server.worker_threads = workers;
            }
            settings
                .validate()
                .context("Invalid server settings")?;

            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(settings.server.worker_threads)
                .enable_all()
                .build()
                .context("Failed to create async runtime")?;

            runtime.block_on(serve(settings))
        }

        Commands::Validate { dataset } => {
            let settings = load_settings(&dataset)?;
            let runtime = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;

            runtime.block_on(validate(settings))
        }
    }
}

/// Defaults and config file first, then the command line on top
fn load_settings(args: &DatasetArgs) -> anyhow::Result<Settings> {
    let mut settings = Settings::load(args.config.as_deref()).with_context(|| match &args.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to build default configuration".to_string(),
    })?;

    if let Some(dir) = &args.data_dir {
        settings.data.dir = dir.clone();
    }
    if let Some(stations) = &args.stations {
        settings.data.stations_file = Some(stations.clone());
    }
    if let Some(measurements) = &args.measurements {
        settings.data.measurements_file = Some(measurements.clone());
    }
    settings.data.use_mmap |= args.mmap;
    settings.data.strict_validation |= args.strict;

    debug!(?settings, "Configuration loaded");
    Ok(settings)
}

async fn load_dataset(settings: &Settings) -> anyhow::Result<DatasetStore> {
    let stations_path = settings.stations_path();
    let measurements_path = settings.measurements_path();
    info!(
        stations = %stations_path.display(),
        measurements = %measurements_path.display(),
        "Loading dataset"
    );

    let progress = ProgressReporter::new_spinner("Loading dataset...", !std::io::stderr().is_terminal());

    let store = DatasetLoader::new()
        .with_mmap(settings.data.use_mmap)
        .with_strict_validation(settings.data.strict_validation)
        .load(&stations_path, &measurements_path)
        .await
        .context("Failed to load dataset")?;

    progress.finish_with_message(&format!(
        "Loaded {} stations and {} measurements",
        store.station_count(),
        store.measurement_count()
    ));

    Ok(store)
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    let store = load_dataset(&settings).await?;

    let report = IntegrityChecker::new().check(&store);
    info!(
        measurements = report.measurement_count,
        first_date = ?report.first_date,
        last_date = ?report.last_date,
        "Dataset ready"
    );
    if !report.is_clean() {
        warn!(
            issues = report.issues.len(),
            duplicate_rows = report.duplicate_rows,
            orphaned_measurements = report.orphaned_measurements,
            "Dataset has integrity issues; run `surfsup validate` for details"
        );
    }
    if store.is_empty() {
        warn!("Dataset has no measurements; measurement queries will fail");
    }

    // The store is complete before the listener exists.
    let app = router(AppState::new(store));

    let address = settings.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!(address = %listener.local_addr()?, "Serving climate API");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn validate(settings: Settings) -> anyhow::Result<()> {
    let store = load_dataset(&settings).await?;

    let checker = IntegrityChecker::new();
    let report = checker.check(&store);
    println!("\n{}", checker.generate_summary(&report));

    if report.is_clean() {
        println!("✅ Dataset passed all integrity checks");
    } else {
        println!("⚠️  Found {} integrity issues", report.issues.len());
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install CTRL+C handler");
        std::future::pending::<()>().await;
    }
    info!("Received CTRL+C, shutting down gracefully...");
}

/// Set up structured logging
fn setup_logging(verbose: bool, log_file: Option<&Path>) -> anyhow::Result<()> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let log_level = if verbose { "debug" } else { "info" };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("surfsup={},tower_http={}", log_level, log_level))
    });

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_level(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    fmt::layer()
                        .with_target(false)
                        .with_level(true)
                        .with_timer(fmt::time::uptime())
                        .with_writer(std::io::stderr),
                )
                .try_init()?;
        }
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
