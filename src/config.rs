//! Configuration management for EXIF Probe.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `EXIF_` prefix for the server
//! - Sensible defaults for all optional settings
//!
//! # Example
//!
//! ```ignore
//! use exif_probe::config::{Cli, Command};
//!
//! let cli = Cli::parse();
//! match cli.command {
//!     Command::Serve(config) => println!("Listening on {}", config.bind_address()),
//!     Command::Inspect(config) => println!("{} file(s)", config.paths.len()),
//! }
//! ```
//!
//! # Environment Variables
//!
//! - `EXIF_HOST` - Server bind address (default: 0.0.0.0)
//! - `EXIF_PORT` - Server port (default: 3000)
//! - `EXIF_MAX_UPLOAD_BYTES` - Largest accepted upload (default: 20 MiB)
//! - `EXIF_CORS_ORIGINS` - Allowed CORS origins, comma-separated (default: any)

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default upload limit in bytes (20 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

// =============================================================================
// CLI Arguments
// =============================================================================

/// EXIF Probe - camera metadata from JPEG files.
///
/// Decodes the EXIF block of JPEG images and reports file attributes
/// together with camera settings, from the command line or over HTTP.
#[derive(Parser, Debug, Clone)]
#[command(name = "exif-probe")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Consume the CLI and return the selected command.
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Start the HTTP server.
    Serve(ServeConfig),

    /// Print the metadata of one or more image files.
    Inspect(InspectConfig),
}

// =============================================================================
// Serve Configuration
// =============================================================================

/// Options for the `serve` command.
#[derive(Parser, Debug, Clone)]
pub struct ServeConfig {
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "EXIF_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "EXIF_PORT")]
    pub port: u16,

    /// Largest accepted request body in bytes.
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES, env = "EXIF_MAX_UPLOAD_BYTES")]
    pub max_upload_bytes: usize,

    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "EXIF_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl ServeConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("Host must not be empty. Set --host or EXIF_HOST".to_string());
        }

        if self.port == 0 {
            return Err("Port must be greater than 0".to_string());
        }

        if self.max_upload_bytes == 0 {
            return Err("max_upload_bytes must be greater than 0".to_string());
        }

        if let Some(origins) = &self.cors_origins {
            if origins.iter().any(|origin| origin.trim().is_empty()) {
                return Err("CORS origins must not contain empty entries".to_string());
            }
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Inspect Configuration
// =============================================================================

/// Output format for the `inspect` command.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Grouped, human-readable text
    #[default]
    Text,

    /// A JSON array with one object per file
    Json,
}

/// Options for the `inspect` command.
#[derive(Parser, Debug, Clone)]
pub struct InspectConfig {
    /// Image files to inspect.
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl InspectConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.paths.is_empty() {
            return Err("At least one file path is required".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
