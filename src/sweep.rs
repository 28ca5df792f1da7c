//! Runs many independent sampling configurations on a bounded rayon pool.
//! Each job either completes or fails on its own.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::satellite::{ConstellationSpec, SatelliteError, Shell, ShellParameter};
use crate::stats::{
    availability_metrics, station_statistics, AvailabilityMetric, StationStatistic,
};
use crate::visibility::{sample, WindowError};

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid window: {0}")]
    Window(#[from] WindowError),
    #[error("satellite error: {0}")]
    Satellite(#[from] SatelliteError),
    #[error("job panicked: {0}")]
    Panicked(String),
}

#[derive(Debug, Clone)]
pub struct SweepJob {
    pub id: String,
    pub config: Config,
}

#[derive(Debug, Clone, Serialize)]
pub struct SweepSummary {
    pub samples: usize,
    pub statistics: Vec<StationStatistic>,
    pub availability: Vec<AvailabilityMetric>,
}

#[derive(Debug)]
pub struct SweepOutcome {
    pub id: String,
    pub result: Result<SweepSummary, SweepError>,
}

/// Run every job, at most `workers` at a time. Outcomes come back in input
/// order.
pub fn run_sweep(jobs: Vec<SweepJob>, workers: usize) -> Vec<SweepOutcome> {
    let ids: Vec<String> = jobs.iter().map(|j| j.id.clone()).collect();
    log::info!(
        "Starting sweep of {} jobs on {} workers",
        jobs.len(),
        workers.max(1)
    );

    let results = run_pool(jobs, workers, |job: SweepJob| {
        let started = Instant::now();
        log::info!("Sweep job {} started", job.id);
        let result = run_job(&job.config);
        match &result {
            Ok(summary) => log::info!(
                "Sweep job {} finished: {} samples in {:.1?}",
                job.id,
                summary.samples,
                started.elapsed()
            ),
            Err(e) => log::error!("Sweep job {} failed: {}", job.id, e),
        }
        result
    });

    ids.into_iter()
        .zip(results)
        .map(|(id, result)| SweepOutcome { id, result })
        .collect()
}

/// Shell a parameter sweep starts from: the first configured shell, or the
/// stock baseline when the config has none.
pub fn baseline_shell(config: &Config) -> Shell {
    config
        .constellation
        .as_ref()
        .and_then(|c| c.shells.first())
        .cloned()
        .unwrap_or_default()
}

/// One job per value. Each job samples `config`'s stations against a single
/// generated shell that differs from `base` only in `parameter`; listed
/// satellites are left out.
pub fn shell_parameter_jobs(
    config: &Config,
    base: &Shell,
    parameter: ShellParameter,
    values: &[f64],
) -> Vec<SweepJob> {
    let epoch = config
        .constellation
        .as_ref()
        .map(|c| c.epoch)
        .unwrap_or(config.simulation.start);

    values
        .iter()
        .map(|&value| {
            let constellation = ConstellationSpec {
                epoch,
                shells: vec![parameter.apply(base, value)],
            };
            let mut variant = config.clone();
            variant.satellites = constellation.generate();
            variant.constellation = Some(constellation);
            SweepJob {
                id: format!("{}={}", parameter, value),
                config: variant,
            }
        })
        .collect()
}

/// One complete, self-contained sampling run
pub fn run_job(config: &Config) -> Result<SweepSummary, SweepError> {
    config.validate()?;
    let window = config.window()?;
    let propagators = config.propagators()?;

    let samples = sample(&propagators, &config.ground_stations, &window);
    Ok(SweepSummary {
        samples: samples.len(),
        statistics: station_statistics(&samples),
        availability: availability_metrics(&samples, window.step_seconds()),
    })
}

/// Map `work` over `items` on a dedicated pool of `workers` threads. A
/// panicking item becomes a `Panicked` error for that item only.
fn run_pool<T, R, F>(items: Vec<T>, workers: usize, work: F) -> Vec<Result<R, SweepError>>
where
    T: Send,
    R: Send,
    F: Fn(T) -> Result<R, SweepError> + Sync,
{
    let run = |items: Vec<T>| -> Vec<Result<R, SweepError>> {
        items
            .into_par_iter()
            .map(|item| {
                panic::catch_unwind(AssertUnwindSafe(|| work(item)))
                    .unwrap_or_else(|payload| Err(SweepError::Panicked(panic_message(payload))))
            })
            .collect()
    };

    match ThreadPoolBuilder::new().num_threads(workers.max(1)).build() {
        Ok(pool) => pool.install(|| run(items)),
        Err(e) => {
            log::warn!("Could not build sweep pool ({}), using the global pool", e);
            run(items)
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
