use std::io;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use rocks_workload::config::{Args, WorkloadConfig};
use rocks_workload::workload::Driver;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // --help and --version
        Err(e) if !e.use_stderr() => {
            let _ = e.print();
            return ExitCode::SUCCESS;
        }
        Err(e) => {
            let _ = e.print();
            println!("{}", Args::command().render_long_help());
            return ExitCode::from(1);
        }
    };
    init_logging();

    let config = WorkloadConfig::from(args);
    let mut driver = match Driver::open(config) {
        Ok(driver) => driver,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };

    let measurement = match driver.run() {
        Ok(measurement) => measurement,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::from(1);
        }
    };
    driver.close();

    if let Err(e) = measurement.report(&mut io::stdout().lock()) {
        eprintln!("failed to print report: {}", e);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}
