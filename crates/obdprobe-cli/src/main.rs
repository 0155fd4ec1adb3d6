//! obdprobe command-line tool
//!
//! Connects to an OBD adapter and polls it in a loop: sensor readings,
//! stored DTCs, and optionally a clear request each cycle.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

use obdprobe_core::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "obdprobe", version, about = "Poll an OBD adapter over a serial link")]
struct Args {
    /// Serial device path
    #[arg(long, default_value = obdprobe_core::protocol::DEFAULT_PORT)]
    port: String,

    /// Baud rate
    #[arg(long, default_value_t = obdprobe_core::protocol::DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Seconds to wait between polling cycles
    #[arg(long, default_value_t = 5)]
    interval: u64,

    /// Number of polling cycles to run (0 = run until interrupted)
    #[arg(long, default_value_t = 0)]
    count: u64,

    /// Send a clear-DTCs request each cycle
    #[arg(long)]
    clear: bool,

    /// Print sensor readings as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// List available serial ports and exit
    #[arg(long)]
    list_ports: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    if args.list_ports {
        for port in list_ports() {
            match (&port.manufacturer, &port.product) {
                (Some(manufacturer), Some(product)) => {
                    println!("{}  {} {}", port.name, manufacturer, product)
                }
                _ => println!("{}", port.name),
            }
        }
        return Ok(());
    }

    let config = SessionConfig {
        port_name: args.port.clone(),
        baud_rate: args.baud,
        ..SessionConfig::default()
    };

    let mut session = Session::new(config);
    session
        .connect()
        .with_context(|| format!("failed to connect to {}", args.port))?;

    let mut cycle = 0u64;
    loop {
        match session.read_sensors() {
            Ok(reading) => print_reading(&reading, args.json)?,
            Err(e) => error!("sensor read failed: {e}"),
        }

        match session.read_dtcs() {
            Ok(codes) if codes.is_empty() => println!("DTCs: none"),
            Ok(codes) => println!("DTCs: {codes}"),
            Err(e) => error!("DTC read failed: {e}"),
        }

        if args.clear {
            match session.clear_dtcs() {
                Ok(ClearAck::Cleared) => println!("DTCs cleared"),
                Ok(ClearAck::Refused) => warn!("adapter declined to clear DTCs"),
                Err(e) => error!("clear failed: {e}"),
            }
        }

        cycle += 1;
        if args.count != 0 && cycle >= args.count {
            break;
        }
        std::thread::sleep(Duration::from_secs(args.interval));
    }

    Ok(())
}

fn print_reading(reading: &SensorReading, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(reading)?);
    } else {
        println!("Coolant Temp:  {} °C", reading.coolant_temp);
        println!("Engine RPM:    {} RPM", reading.engine_rpm);
        println!("Vehicle Speed: {} km/h", reading.vehicle_speed);
        println!("Tire Pressure: {} PSI", reading.tire_pressure);
        println!("MAF:           {} g/s", reading.maf);
    }
    Ok(())
}
