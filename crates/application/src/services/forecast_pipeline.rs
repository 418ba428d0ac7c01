//! Forecast pipeline
//!
//! One cycle = fetch the forecast for the configured position, then write
//! its horizon to the sink. Cycles are serialized: a manual run requested
//! over HTTP waits for an in-flight scheduled cycle and vice versa.

use std::{sync::Arc, time::Instant};

use domain::Position;
use tokio::sync::Mutex;
use tracing::instrument;

use super::{PipelineStatus, TimeSeriesWriter};
use crate::{
    error::PipelineError,
    ports::{CycleTrigger, ForecastPort, PipelineObserver, TracingPipelineObserver},
};

/// Fetch-then-write pipeline for a fixed position
pub struct ForecastPipeline {
    forecasts: Arc<dyn ForecastPort>,
    writer: TimeSeriesWriter,
    position: Position,
    observer: Arc<dyn PipelineObserver>,
    status: Arc<PipelineStatus>,
    cycle_gate: Mutex<()>,
}

impl std::fmt::Debug for ForecastPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForecastPipeline")
            .field("position", &self.position)
            .field("writer", &self.writer)
            .field("observer", &self.observer)
            .finish_non_exhaustive()
    }
}

impl ForecastPipeline {
    /// Create a pipeline reporting to the `tracing` observer
    pub fn new(forecasts: Arc<dyn ForecastPort>, writer: TimeSeriesWriter, position: Position) -> Self {
        Self {
            forecasts,
            writer,
            position,
            observer: Arc::new(TracingPipelineObserver),
            status: Arc::new(PipelineStatus::new()),
            cycle_gate: Mutex::new(()),
        }
    }

    /// Replace the observer
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Position forecasts are requested for
    #[must_use]
    pub const fn position(&self) -> &Position {
        &self.position
    }

    /// Shared status handle
    #[must_use]
    pub fn status(&self) -> Arc<PipelineStatus> {
        Arc::clone(&self.status)
    }

    /// Observer receiving pipeline events
    #[must_use]
    pub fn observer(&self) -> &dyn PipelineObserver {
        self.observer.as_ref()
    }

    /// Run one fetch-then-write cycle
    ///
    /// Returns the number of points written. Dropping the returned future
    /// aborts the in-flight request; an aborted cycle is not recorded.
    #[instrument(skip(self), fields(position = %self.position))]
    pub async fn run_cycle(&self, trigger: CycleTrigger) -> Result<usize, PipelineError> {
        let _guard = self.cycle_gate.lock().await;

        self.observer.cycle_started(trigger);
        let started = Instant::now();

        let result = match self.forecasts.fetch_forecast(&self.position).await {
            Ok(forecast) => self.writer.write(&forecast).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(points) => {
                self.status.record_success(*points);
                self.observer
                    .cycle_completed(trigger, *points, started.elapsed());
            },
            Err(e) => {
                self.status.record_failure(e);
                self.observer.cycle_failed(trigger, e);
            },
        }

        result
    }
}
