//! Park-It CLI kiosk
//!
//! Interactive console front end for the parking facility.
//!
//! ```sh
//! # Run with default config (~/.config/park-it/config.toml)
//! parkit
//!
//! # Custom config path
//! parkit --config /etc/park-it/config.toml
//!
//! # Use another database
//! parkit --database-url sqlite://./lot.db?mode=rwc
//!
//! # Validate config without starting
//! parkit --check
//!
//! # Write the effective config (defaults plus overrides) to the config path
//! parkit --write-config
//!
//! # Keep a JSON-lines journal of every notice
//! parkit --event-log ./events.jsonl
//! ```

mod console;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info, warn};

use parkit::application::ParkingService;
use parkit::config::AppConfig;
use parkit::domain::{format_price, ErrorKind};
use parkit::notifications::spawn_event_journal;
use parkit::server::{init_tracing, ServerHandle, ServerOptions};

use console::{ConsoleInput, ConsoleSink};

/// Park-It: console kiosk for a small parking facility.
#[derive(Parser, Debug)]
#[command(
    name = "parkit",
    version,
    about = "Console kiosk for issuing parking tickets and collecting fares",
    long_about = "Park-It: assigns parking spots, issues tickets and prices exits.\n\n\
                  Default config: ~/.config/park-it/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "PARKIT_CONFIG")]
    config: Option<PathBuf>,

    /// Override the database URL.
    #[arg(long)]
    database_url: Option<String>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Validate the configuration file and exit without starting the kiosk.
    #[arg(long)]
    check: bool,

    /// Skip database migrations on startup.
    #[arg(long)]
    no_migrate: bool,

    /// Write the effective configuration to the config path and exit.
    #[arg(long, conflicts_with = "check")]
    write_config: bool,

    /// Append every notice as a JSON line to this file.
    #[arg(long, env = "PARKIT_EVENT_LOG")]
    event_log: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────────
    let config_path = cli.config.unwrap_or_else(parkit::default_config_path);

    let (mut config, loaded) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, true),
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            (AppConfig::default(), false)
        }
    };

    // ── Apply CLI overrides ────────────────────────────────────────
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    if let Some(url) = cli.database_url {
        info!("CLI override: database_url = {}", url);
        config.database.url = url;
    }

    // ── Config write mode ──────────────────────────────────────────
    if cli.write_config {
        if !loaded {
            return Err(format!(
                "refusing to overwrite unreadable config {}",
                config_path.display()
            )
            .into());
        }
        config.fares.validate()?;
        config.save(&config_path)?;
        println!("Configuration written to {}", config_path.display());
        return Ok(());
    }

    // ── Config validation mode ─────────────────────────────────────
    if cli.check {
        config.fares.validate()?;
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!(
            "   Spots       : {} car, {} bike",
            config.facility.car_spots, config.facility.bike_spots
        );
        println!(
            "   Rates/hour  : car {}, bike {}",
            format_price(config.fares.car_rate_per_hour),
            format_price(config.fares.bike_rate_per_hour)
        );
        return Ok(());
    }

    // ── Start facility ─────────────────────────────────────────────
    let handle = ServerHandle::start(ServerOptions {
        config,
        auto_migrate: !cli.no_migrate,
        ..Default::default()
    })
    .await?;

    let journal = cli.event_log.map(|path| {
        info!("Journaling notices to {}", path.display());
        spawn_event_journal(handle.event_bus.subscribe(), path)
    });

    let input = Arc::new(ConsoleInput::new());
    let sink = Arc::new(ConsoleSink::new(handle.event_bus.clone()));
    let service = handle.parking_service(input.clone(), sink);

    tokio::select! {
        result = run_kiosk(&service, &input) => {
            if let Err(e) = result {
                error!(error = %e, "Kiosk input failed");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Ctrl+C received");
        }
    }

    // last bus handles go with the service and the facility
    drop(service);
    handle.shutdown().await;

    if let Some(journal) = journal {
        match journal.await {
            Ok(Ok(lines)) => info!(lines, "Event journal flushed"),
            Ok(Err(e)) => error!(error = %e, "Event journal failed"),
            Err(e) => error!(error = %e, "Event journal task panicked"),
        }
    }
    Ok(())
}

async fn run_kiosk(service: &ParkingService, input: &ConsoleInput) -> std::io::Result<()> {
    println!("Welcome to Park-It!");

    loop {
        print_availability(service).await;
        println!("Please select an option. Enter a number.");
        println!("1 New Vehicle Entering");
        println!("2 Vehicle Exiting");
        println!("3 Shutdown System");

        let Some(choice) = input.read_line().await? else {
            info!("Input closed, shutting down");
            return Ok(());
        };

        let outcome = match choice.as_str() {
            "1" => service.process_incoming_vehicle().await.map(|_| ()),
            "2" => service.process_exiting_vehicle().await.map(|_| ()),
            "3" => {
                println!("Exiting from the system!");
                return Ok(());
            }
            other => {
                println!("Unsupported option '{}'. Please enter 1, 2 or 3.", other);
                continue;
            }
        };

        if let Err(e) = outcome {
            if e.kind() == ErrorKind::Storage {
                error!(error = %e, "Parking operation failed");
            } else {
                warn!(error = %e, "Parking operation rejected");
            }
            println!("{}", e.user_message());
        }
    }
}

async fn print_availability(service: &ParkingService) {
    match service.availability().await {
        Ok(counts) => {
            let parts: Vec<String> = counts
                .iter()
                .map(|(category, free)| format!("{}: {} free", category, free))
                .collect();
            println!("[{}]", parts.join(" | "));
        }
        Err(e) => warn!(error = %e, "Could not read spot availability"),
    }
}
