/*!
 * Round-Robin CPU Simulator - Main Entry Point
 *
 * Usage: rr-sim [config.json]
 *
 * Settings can be overridden with RR_SIM_* environment variables.
 * Set RR_SIM_REPORT_JSON=1 to print the report as JSON.
 */

use miette::{IntoDiagnostic, Result};
use rr_cpu_sim::{init_tracing, SimulationConfig, Simulator};
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<()> {
    init_tracing();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = SimulationConfig::load(config_path.as_deref())?;

    let mut simulator = Simulator::new(config)?;
    let report = simulator.run()?;

    let as_json = std::env::var("RR_SIM_REPORT_JSON")
        .map(|v| v == "1" || v == "true")
        .unwrap_or(false);

    if as_json {
        let json = serde_json::to_string_pretty(&report).into_diagnostic()?;
        println!("{}", json);
    } else {
        println!("{}", report);
    }

    info!("Simulator exiting");
    Ok(())
}
