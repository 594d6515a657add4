use std::path::PathBuf;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;
use ws_sim::shutdown::{cancel_on_shutdown, ShutdownSignal};
use ws_sim::{
    serial, simulate, Config, Constant, IntervalPacer, MeasurementConfig, MeasurementSource, Ramp,
    RunSummary,
};

#[derive(Parser)]
#[command(name = "watersensor_sim")]
#[command(about = "Emulates a water sensor streaming binary frames over a serial port")]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "watersensor-sim.toml")]
    config: PathBuf,

    /// Serial device path, overrides the configuration file
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate, overrides the configuration file
    #[arg(short, long)]
    baud: Option<u32>,

    /// Delay between packets in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Constant measurement value to report
    #[arg(long, allow_hyphen_values = true)]
    measurement: Option<i32>,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

// The main entry point for the command-line simulator application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "watersensor_sim=info,ws_sim=info".to_owned());
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    if cli.list_ports {
        return list_ports();
    }

    let mut config = if cli.config.exists() {
        info!(path = ?cli.config, "Loading configuration");
        Config::load(&cli.config)?
    } else {
        info!("No configuration file found, using defaults");
        Config::default()
    };
    apply_overrides(&mut config, &cli);
    config.validate()?;

    info!(
        port = %config.serial.path,
        baud_rate = config.serial.baud_rate,
        interval_ms = config.emitter.interval_ms,
        measurement = ?config.emitter.measurement,
        "Starting water sensor simulator"
    );

    // Listen before the port is opened so an early Ctrl+C still shuts down cleanly.
    let cancel = CancellationToken::new();
    cancel_on_shutdown(ShutdownSignal::register()?, cancel.clone());

    let summary = match config.emitter.measurement {
        MeasurementConfig::Constant { value } => {
            run_simulator(&config, Constant(value), &cancel).await?
        }
        MeasurementConfig::Ramp { start, step } => {
            run_simulator(&config, Ramp::new(start, step), &cancel).await?
        }
    };

    info!(
        packets_sent = summary.packets_sent,
        "Water sensor simulator shut down"
    );
    println!("\nSimulation terminated.");
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(port) = &cli.port {
        config.serial.path = port.clone();
    }
    if let Some(baud) = cli.baud {
        config.serial.baud_rate = baud;
    }
    if let Some(interval_ms) = cli.interval_ms {
        config.emitter.interval_ms = interval_ms;
    }
    if let Some(value) = cli.measurement {
        config.emitter.measurement = MeasurementConfig::Constant { value };
    }
}

async fn run_simulator<S: MeasurementSource>(
    config: &Config,
    source: S,
    cancel: &CancellationToken,
) -> color_eyre::Result<RunSummary> {
    let port = serial::open(&config.serial)?;
    let mut pacer = IntervalPacer::new(config.emitter.interval());

    let summary = simulate(port, source, &mut pacer, cancel).await?;
    Ok(summary)
}

fn list_ports() -> color_eyre::Result<()> {
    let ports = serial::list_ports()?;

    if ports.is_empty() {
        println!("No serial ports found.");
        return Ok(());
    }

    println!("Available serial ports:");
    for port in ports {
        println!("  {}", port.port_name);
    }
    Ok(())
}
