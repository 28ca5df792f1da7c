use std::fs;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use constellation_access::access::{LatitudeAccess, LatitudeAccessParams};
use constellation_access::config::Config;
use constellation_access::perturbation::{
    calculate_detailed_perturbation_rates, format_perturbation_rates, OrbitalElements,
    PerturbationSource,
};
use constellation_access::report::visibility_report;
use constellation_access::satellite::ShellParameter;
use constellation_access::stats::{
    availability_metrics, station_statistics, AvailabilityMetric, StationStatistic,
};
use constellation_access::sweep::{
    baseline_shell, run_sweep, shell_parameter_jobs, SweepJob, SweepOutcome,
};
use constellation_access::visibility::sample;
use constellation_access::web::{run_server, AppState};

#[derive(Parser)]
#[command(name = "constellation-access")]
#[command(about = "Satellite constellation visibility and access analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a configuration file
    Validate { config: String },
    /// Write the CSV visibility report
    Report {
        config: String,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Print station statistics and availability as JSON
    Stats { config: String },
    /// Print secular perturbation rates for every satellite
    Perturbation {
        config: String,
        #[arg(long, value_enum, default_value_t = PerturbationSource::Total)]
        source: PerturbationSource,
    },
    /// Sample several configurations concurrently
    Sweep {
        #[arg(required = true)]
        configs: Vec<String>,
        #[arg(short, long, default_value_t = 4)]
        workers: usize,
    },
    /// Sweep one constellation shell parameter, other parameters held fixed
    ShellSweep {
        config: String,
        #[arg(short, long, value_enum)]
        parameter: ShellParameter,
        /// Comma-separated values; a stock list is used when omitted
        #[arg(long, value_delimiter = ',')]
        values: Vec<f64>,
        #[arg(short, long, default_value_t = 4)]
        workers: usize,
    },
    /// Sample one station per degree of latitude over 24 hours
    LatReport {
        config: String,
        #[arg(long, default_value_t = 10.0)]
        min_elevation: f64,
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        longitude: f64,
        #[arg(long, default_value_t = 60.0)]
        step: f64,
        #[arg(long, default_value_t = -90, allow_hyphen_values = true)]
        from_lat: i32,
        #[arg(long, default_value_t = 90, allow_hyphen_values = true)]
        to_lat: i32,
        /// Print station statistics as JSON instead of the CSV report
        #[arg(long)]
        json: bool,
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Serve the HTTP API
    Serve { config: String },
}

#[derive(Serialize)]
struct StatsOutput {
    statistics: Vec<StationStatistic>,
    availability: Vec<AvailabilityMetric>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Validate { config } => validate(&config),
        Commands::Report { config, output } => report(&config, output.as_deref()),
        Commands::Stats { config } => stats(&config),
        Commands::Perturbation { config, source } => perturbation(&config, source),
        Commands::Sweep { configs, workers } => sweep(&configs, workers),
        Commands::ShellSweep {
            config,
            parameter,
            values,
            workers,
        } => shell_sweep(&config, parameter, &values, workers),
        Commands::LatReport {
            config,
            min_elevation,
            longitude,
            step,
            from_lat,
            to_lat,
            json,
            output,
        } => {
            let params = LatitudeAccessParams {
                longitude_deg: longitude,
                min_elevation_deg: min_elevation,
                step_seconds: step,
                from_latitude: from_lat,
                to_latitude: to_lat,
            };
            lat_report(&config, &params, json, output.as_deref())
        }
        Commands::Serve { config } => serve(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn validate(path: &str) -> CliResult {
    let config = Config::from_file(path)?;
    let propagators = config.propagators()?;
    let window = config.window()?;
    println!(
        "Configuration is valid ({} satellites, {} ground stations, {} samples)",
        propagators.len(),
        config.ground_stations.len(),
        window.sample_count()
    );
    Ok(())
}

fn report(path: &str, output: Option<&str>) -> CliResult {
    let config = Config::from_file(path)?;
    let window = config.window()?;
    let samples = sample(&config.propagators()?, &config.ground_stations, &window);
    let csv = visibility_report(&config.ground_stations, &samples);

    match output {
        Some(file) => {
            fs::write(file, csv)?;
            println!("Wrote {} rows to {}", samples.len(), file);
        }
        None => println!("{}", csv),
    }
    Ok(())
}

fn stats(path: &str) -> CliResult {
    let config = Config::from_file(path)?;
    let window = config.window()?;
    let samples = sample(&config.propagators()?, &config.ground_stations, &window);
    let output = StatsOutput {
        statistics: station_statistics(&samples),
        availability: availability_metrics(&samples, window.step_seconds()),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn perturbation(path: &str, source: PerturbationSource) -> CliResult {
    let config = Config::from_file(path)?;
    let bc = config.perturbation.ballistic_coefficient;

    for propagator in config.propagators()? {
        let elements = OrbitalElements::from(&propagator.classical_elements());
        let rates = calculate_detailed_perturbation_rates(&elements, bc);
        println!("{} ({})", propagator.name(), source);
        for line in format_perturbation_rates(rates.source(source)) {
            println!("  {}", line);
        }
    }
    Ok(())
}

fn sweep(paths: &[String], workers: usize) -> CliResult {
    let mut jobs = Vec::new();
    let mut failed = 0;
    for path in paths {
        match Config::from_file(path) {
            Ok(config) => jobs.push(SweepJob {
                id: path.clone(),
                config,
            }),
            Err(e) => {
                eprintln!("{}: error: {}", path, e);
                failed += 1;
            }
        }
    }

    failed += print_outcomes(run_sweep(jobs, workers));
    if failed > 0 {
        return Err(format!("{} of {} configurations failed", failed, paths.len()).into());
    }
    Ok(())
}

fn shell_sweep(path: &str, parameter: ShellParameter, values: &[f64], workers: usize) -> CliResult {
    let config = Config::from_file(path)?;
    let values = if values.is_empty() {
        parameter.default_values()
    } else {
        values
    };
    let jobs = shell_parameter_jobs(&config, &baseline_shell(&config), parameter, values);

    let failed = print_outcomes(run_sweep(jobs, workers));
    if failed > 0 {
        return Err(format!("{} of {} variants failed", failed, values.len()).into());
    }
    Ok(())
}

/// Print one line per outcome, returning how many failed
fn print_outcomes(outcomes: Vec<SweepOutcome>) -> usize {
    let mut failed = 0;
    for outcome in outcomes {
        match outcome.result {
            Ok(summary) => {
                let averages: Vec<String> = summary
                    .statistics
                    .iter()
                    .map(|s| format!("{}={:.3}", s.name, s.average_visible))
                    .collect();
                println!(
                    "{}: {} samples, {}",
                    outcome.id,
                    summary.samples,
                    averages.join(", ")
                );
            }
            Err(e) => {
                eprintln!("{}: error: {}", outcome.id, e);
                failed += 1;
            }
        }
    }
    failed
}

fn lat_report(
    path: &str,
    params: &LatitudeAccessParams,
    json: bool,
    output: Option<&str>,
) -> CliResult {
    let config = Config::from_file(path)?;
    let propagators = config.propagators()?;
    let access = LatitudeAccess::run(&propagators, config.simulation.start, params)?;

    let text = if json {
        serde_json::to_string_pretty(&access.statistics())?
    } else {
        access.report()
    };
    match output {
        Some(file) => {
            fs::write(file, text)?;
            println!("Wrote {} stations to {}", access.stations.len(), file);
        }
        None => println!("{}", text),
    }
    Ok(())
}

fn serve(path: &str) -> CliResult {
    let config = Config::from_file(path)?;
    let state = AppState::new(config)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_server(state))?;
    Ok(())
}
