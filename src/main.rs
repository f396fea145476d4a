//! EXIF Probe - camera metadata from JPEG files.
//!
//! This binary runs the HTTP server or inspects files from the command line.

use clap::Parser;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use exif_probe::{
    config::{Cli, Command, InspectConfig, OutputFormat, ServeConfig},
    metadata::ImageMetadata,
    probe::probe_file,
    server::{create_router, RouterConfig},
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Serve(config) => run_serve(config).await,
        Command::Inspect(config) => run_inspect(config),
    }
}

// =============================================================================
// Serve Command
// =============================================================================

async fn run_serve(config: ServeConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("EXIF Probe v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration:");
    info!("  Max upload: {} bytes", config.max_upload_bytes);
    match &config.cors_origins {
        Some(origins) => info!("  CORS origins: {}", origins.join(", ")),
        None => info!("  CORS origins: any"),
    }

    let router = create_router(build_router_config(&config));
    let addr = config.bind_address();

    info!("");
    info!("  Server listening on: http://{}", addr);
    info!("");
    info!("  Try these endpoints:");
    info!("    curl http://{}/health", addr);
    info!("    curl -F image=@photo.jpg http://{}/api/exif", addr);
    info!("");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to {}: {}", addr, e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = axum::serve(listener, router).await {
        error!("Server error: {}", e);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "exif_probe=debug,tower_http=debug"
    } else {
        "exif_probe=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Build RouterConfig from the application ServeConfig.
fn build_router_config(config: &ServeConfig) -> RouterConfig {
    let mut router_config = RouterConfig::new().with_max_upload_bytes(config.max_upload_bytes);

    if let Some(ref origins) = config.cors_origins {
        router_config = router_config.with_cors_origins(origins.clone());
    }

    router_config.with_tracing(!config.no_tracing)
}

// =============================================================================
// Inspect Command
// =============================================================================

fn run_inspect(config: InspectConfig) -> ExitCode {
    if config.verbose {
        init_logging(true);
    }

    if let Err(e) = config.validate() {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    let mut probed = Vec::with_capacity(config.paths.len());
    let mut failed = false;

    for path in &config.paths {
        match probe_file(path) {
            Ok(metadata) => probed.push(metadata),
            Err(e) => {
                eprintln!("Error: {}", e);
                failed = true;
            }
        }
    }

    match config.format {
        OutputFormat::Text => {
            for (index, metadata) in probed.iter().enumerate() {
                if index > 0 {
                    println!();
                }
                print_text(metadata);
            }
        }
        OutputFormat::Json => match serde_json::to_string_pretty(&probed) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: failed to serialize metadata: {}", e);
                return ExitCode::FAILURE;
            }
        },
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Print one file's metadata grouped into sections.
fn print_text(metadata: &ImageMetadata) {
    for section in metadata.sections() {
        println!("{}", section.title);
        println!("{}", "─".repeat(section.title.chars().count()));

        let width = section
            .rows
            .iter()
            .map(|(label, _)| label.chars().count())
            .max()
            .unwrap_or(0);

        for (label, value) in &section.rows {
            println!("  {:<width$}  {}", label, value, width = width);
        }
        println!();
    }
}
