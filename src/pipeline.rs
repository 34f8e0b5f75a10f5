//! Pipeline driver: luminance, color push, gradient, gradient push, twice.
//!
//! Each stage consumes the previous stage's output and the previous buffer is
//! dropped as soon as the next one exists. Stages never overlap; parallelism
//! lives inside each stage.
//!
//! # Example
//!
//! ```
//! use anime4k::{Pipeline, Pixel, PixelBuffer, Strength};
//!
//! let input = PixelBuffer::filled(8, 8, Pixel::rgb(40, 80, 120)).unwrap();
//! let output = Pipeline::new(Strength::new(85), Strength::MAX).run(input.clone());
//! assert_eq!(output, input);
//! ```

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::stages::{compute_gradient, compute_luminance, push_color, push_gradient, Stage};
use crate::strength::Strength;
use log::{debug, warn};
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::Serialize;
use std::convert::Infallible;
use std::time::{Duration, Instant};

/// Number of times the four-stage group runs. Fixed: a second pass is what
/// gives the lines their final sharpness.
pub const PASSES: usize = 2;

/// Run the full pipeline on the global rayon pool.
pub fn run(image: PixelBuffer, color_strength: Strength, gradient_strength: Strength) -> PixelBuffer {
    Pipeline::new(color_strength, gradient_strength).run(image)
}

/// A stage result handed to an observer.
#[derive(Debug, Clone, Copy)]
pub struct StageOutput<'a> {
    /// Zero-based pass index, below [`PASSES`].
    pub pass: usize,
    pub stage: Stage,
    pub buffer: &'a PixelBuffer,
}

/// Wall time of one stage.
#[derive(Debug, Clone, Serialize)]
pub struct StageTiming {
    pub pass: usize,
    pub stage: Stage,
    #[serde(rename = "ms", serialize_with = "serialize_ms")]
    pub duration: Duration,
}

/// Timings collected over a pipeline run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineReport {
    pub stages: Vec<StageTiming>,
    #[serde(rename = "total_ms", serialize_with = "serialize_ms")]
    pub total: Duration,
}

impl PipelineReport {
    /// Summed time spent in one kind of stage across all passes.
    pub fn time_in(&self, stage: Stage) -> Duration {
        self.stages.iter().filter(|t| t.stage == stage).map(|t| t.duration).sum()
    }
}

fn ignore_stage(_: StageOutput<'_>) -> std::result::Result<(), Infallible> {
    Ok(())
}

fn serialize_ms<S: serde::Serializer>(duration: &Duration, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_f64(duration.as_secs_f64() * 1000.0)
}

/// Pipeline configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pipeline {
    color_strength: Strength,
    gradient_strength: Strength,
    threads: Option<usize>,
}

impl Pipeline {
    pub fn new(color_strength: Strength, gradient_strength: Strength) -> Self {
        Self { color_strength, gradient_strength, threads: None }
    }

    /// Run stages on a dedicated pool with this many workers.
    ///
    /// `0` keeps the global pool. Output does not depend on the worker count.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = if threads == 0 { None } else { Some(threads) };
        self
    }

    pub fn color_strength(&self) -> Strength {
        self.color_strength
    }

    pub fn gradient_strength(&self) -> Strength {
        self.gradient_strength
    }

    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Run with the configured worker count.
    ///
    /// If the dedicated pool cannot be created the run falls back to the
    /// global pool, which yields the same output.
    pub fn run(&self, image: PixelBuffer) -> PixelBuffer {
        let pool = self.pool().unwrap_or_else(|e| {
            warn!("{}, using the global pool", e);
            None
        });
        let result = match &pool {
            Some(pool) => pool.install(|| self.execute(image, &mut ignore_stage)),
            None => self.execute(image, &mut ignore_stage),
        };
        match result {
            Ok((output, _)) => output,
            Err(never) => match never {},
        }
    }

    /// Run with the configured worker count and collect timings.
    pub fn run_with_report(&self, image: PixelBuffer) -> Result<(PixelBuffer, PipelineReport)> {
        self.run_observed(image, |_| Ok(()))
    }

    /// Run and hand every stage's output to `observer` before moving on.
    ///
    /// An observer error aborts the run.
    pub fn run_observed<F>(&self, image: PixelBuffer, mut observer: F) -> Result<(PixelBuffer, PipelineReport)>
    where
        F: FnMut(StageOutput<'_>) -> Result<()> + Send,
    {
        self.on_pool(|| self.execute(image, &mut observer))?
    }

    /// Run `job` on a dedicated pool when a worker count is set, otherwise on
    /// the current one.
    fn on_pool<R, J>(&self, job: J) -> Result<R>
    where
        R: Send,
        J: FnOnce() -> R + Send,
    {
        match self.pool()? {
            Some(pool) => Ok(pool.install(job)),
            None => Ok(job()),
        }
    }

    /// Dedicated pool for the configured worker count, if any.
    fn pool(&self) -> Result<Option<ThreadPool>> {
        let Some(threads) = self.threads else {
            return Ok(None);
        };
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        debug!("running pipeline on {} worker threads", threads);
        Ok(Some(pool))
    }

    fn execute<E, F>(
        &self,
        image: PixelBuffer,
        observer: &mut F,
    ) -> std::result::Result<(PixelBuffer, PipelineReport), E>
    where
        F: FnMut(StageOutput<'_>) -> std::result::Result<(), E>,
    {
        let (width, height) = image.dimensions();
        debug!(
            "pipeline start: {}x{}, color strength {}, gradient strength {}",
            width, height, self.color_strength, self.gradient_strength
        );

        let started = Instant::now();
        let mut report = PipelineReport::default();
        let mut current = image;

        for pass in 0..PASSES {
            for stage in Stage::ORDER {
                let stage_start = Instant::now();
                current = self.apply(stage, current);
                let duration = stage_start.elapsed();
                debug!("pass {} {}: {:.3} ms", pass, stage, duration.as_secs_f64() * 1000.0);

                report.stages.push(StageTiming { pass, stage, duration });
                observer(StageOutput { pass, stage, buffer: &current })?;
            }
        }

        report.total = started.elapsed();
        debug!("pipeline done in {:.3} ms", report.total.as_secs_f64() * 1000.0);
        Ok((current, report))
    }

    fn apply(&self, stage: Stage, mut buffer: PixelBuffer) -> PixelBuffer {
        match stage {
            Stage::Luminance => {
                compute_luminance(&mut buffer);
                buffer
            }
            Stage::PushColor => push_color(&buffer, self.color_strength),
            Stage::Gradient => compute_gradient(&buffer),
            Stage::PushGradient => push_gradient(&buffer, self.gradient_strength),
        }
    }
}
