//! CLI for devicepulse — record per-app performance telemetry over adb.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "devicepulse")]
#[command(about = "devicepulse — per-app performance telemetry over adb")]
#[command(version = devicepulse_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the device: app liveness, status probes, and the sampler set
    Scan {
        /// Target application package identifier
        #[arg(long)]
        package: String,

        /// Device serial (adb -s); default is the only attached device
        #[arg(long)]
        serial: Option<String>,

        /// Path to the adb client
        #[arg(long, default_value = "adb")]
        adb: String,
    },

    /// Record per-metric CSV time series while the app stays alive
    Record {
        /// Target application package identifier
        #[arg(long)]
        package: String,

        /// Device serial (adb -s); default is the only attached device
        #[arg(long)]
        serial: Option<String>,

        /// Path to the adb client
        #[arg(long, default_value = "adb")]
        adb: String,

        /// Output directory for the CSV files and session.json
        #[arg(long, default_value = "telemetry")]
        output: String,

        /// Sample interval per metric (e.g. "500ms", "1s", "2s")
        #[arg(long, default_value = "1s")]
        interval: String,

        /// Metadata tags as key:value pairs
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Session note
        #[arg(long)]
        note: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scan {
            package,
            serial,
            adb,
        } => commands::scan::run(&package, serial.as_deref(), &adb),
        Commands::Record {
            package,
            serial,
            adb,
            output,
            interval,
            tags,
            note,
        } => commands::record::run(
            &package,
            serial.as_deref(),
            &adb,
            &output,
            &interval,
            &tags,
            note.as_deref(),
        ),
    }
}
