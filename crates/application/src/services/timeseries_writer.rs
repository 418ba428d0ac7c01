//! Time-series writer
//!
//! Turns the leading horizon of a forecast into points and writes them to
//! the sink one at a time.

use std::sync::Arc;

use domain::{DataPoint, Forecast};
use tracing::{debug, instrument};

use crate::{error::PipelineError, ports::PointSinkPort};

/// Number of leading samples persisted per cycle
pub const DEFAULT_HORIZON: usize = 24;

/// Measurement name of every written point
pub const MEASUREMENT: &str = "forecast";

/// Field name for a horizon slot
///
/// Each slot gets its own field regardless of the wall-clock time it
/// represents, so successive samples are never merged into one point.
#[must_use]
pub fn slot_field_name(index: usize) -> String {
    format!("Temperature_{index}")
}

/// Build the points for the first `horizon` samples of `forecast`
///
/// # Errors
///
/// Returns `PipelineError::InsufficientData` if the forecast holds fewer
/// samples than `horizon`. The forecast is never truncated or padded.
pub fn horizon_points(forecast: &Forecast, horizon: usize) -> Result<Vec<DataPoint>, PipelineError> {
    let samples = forecast.samples();
    if samples.len() < horizon {
        return Err(PipelineError::InsufficientData {
            required: horizon,
            available: samples.len(),
        });
    }

    Ok(samples[..horizon]
        .iter()
        .enumerate()
        .map(|(index, sample)| {
            DataPoint::new(MEASUREMENT, sample.time)
                .with_field(slot_field_name(index), sample.details().air_temperature)
        })
        .collect())
}

/// Writes forecast horizons to a time-series sink
pub struct TimeSeriesWriter {
    sink: Arc<dyn PointSinkPort>,
    horizon: usize,
}

impl std::fmt::Debug for TimeSeriesWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimeSeriesWriter")
            .field("horizon", &self.horizon)
            .finish_non_exhaustive()
    }
}

impl TimeSeriesWriter {
    /// Create a writer with the default horizon
    pub fn new(sink: Arc<dyn PointSinkPort>) -> Self {
        Self::with_horizon(sink, DEFAULT_HORIZON)
    }

    /// Create a writer with a custom horizon
    pub fn with_horizon(sink: Arc<dyn PointSinkPort>, horizon: usize) -> Self {
        Self { sink, horizon }
    }

    /// Configured horizon
    #[must_use]
    pub const fn horizon(&self) -> usize {
        self.horizon
    }

    /// Write the horizon of `forecast`, returning the number of points written
    ///
    /// Writes happen in ascending sample order. The first failed write aborts
    /// the remaining ones; points already written are left in place.
    #[instrument(skip_all, fields(horizon = self.horizon, samples = forecast.samples().len()))]
    pub async fn write(&self, forecast: &Forecast) -> Result<usize, PipelineError> {
        let points = horizon_points(forecast, self.horizon)?;

        for (index, point) in points.iter().enumerate() {
            self.sink
                .write_point(point)
                .await
                .map_err(|e| PipelineError::SinkWrite {
                    index,
                    reason: e.to_string(),
                })?;
        }

        debug!(points = points.len(), "Horizon written");
        Ok(points.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{MockPointSinkPort, SinkError};
    use chrono::{Duration, TimeZone, Utc};
    use domain::{Properties, Sample};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn forecast_with(samples: usize) -> Forecast {
        let start = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let timeseries = (0..samples)
            .map(|i| {
                let mut sample = Sample {
                    time: start + Duration::hours(i64::try_from(i).unwrap()),
                    ..Default::default()
                };
                #[allow(clippy::cast_precision_loss)]
                {
                    sample.data.instant.details.air_temperature = i as f64 / 2.0;
                }
                sample
            })
            .collect();

        Forecast {
            properties: Properties {
                timeseries,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn slot_names_encode_ordinal() {
        assert_eq!(slot_field_name(0), "Temperature_0");
        assert_eq!(slot_field_name(23), "Temperature_23");
    }

    #[test]
    fn horizon_points_take_leading_samples_only() {
        let forecast = forecast_with(30);
        let points = horizon_points(&forecast, 24).unwrap();

        assert_eq!(points.len(), 24);
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.measurement(), MEASUREMENT);
            assert!(point.tags().is_empty());
            assert_eq!(point.fields().len(), 1);
            assert_eq!(point.timestamp(), forecast.samples()[i].time);
            let value = point.fields()[&slot_field_name(i)];
            assert!((value - forecast.samples()[i].details().air_temperature).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn horizon_points_reject_short_forecast() {
        let result = horizon_points(&forecast_with(23), 24);
        assert_eq!(
            result.unwrap_err(),
            PipelineError::InsufficientData {
                required: 24,
                available: 23
            }
        );
    }

    #[tokio::test]
    async fn short_forecast_performs_zero_writes() {
        let mut sink = MockPointSinkPort::new();
        sink.expect_write_point().times(0);

        let writer = TimeSeriesWriter::new(Arc::new(sink));
        let result = writer.write(&forecast_with(5)).await;

        assert!(matches!(
            result,
            Err(PipelineError::InsufficientData {
                required: 24,
                available: 5
            })
        ));
    }

    #[tokio::test]
    async fn writes_every_slot_in_order() {
        let next = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&next);

        let mut sink = MockPointSinkPort::new();
        sink.expect_write_point().times(24).returning(move |point| {
            let expected = seen.fetch_add(1, Ordering::SeqCst);
            assert!(point.fields().contains_key(&slot_field_name(expected)));
            Ok(())
        });

        let writer = TimeSeriesWriter::new(Arc::new(sink));
        let written = writer.write(&forecast_with(48)).await.unwrap();

        assert_eq!(written, 24);
        assert_eq!(next.load(Ordering::SeqCst), 24);
    }

    #[tokio::test]
    async fn first_failure_aborts_remaining_writes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut sink = MockPointSinkPort::new();
        sink.expect_write_point().returning(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            if n == 4 {
                Err(SinkError::Rejected("disk full".to_string()))
            } else {
                Ok(())
            }
        });

        let writer = TimeSeriesWriter::new(Arc::new(sink));
        let result = writer.write(&forecast_with(24)).await;

        match result {
            Err(PipelineError::SinkWrite { index, reason }) => {
                assert_eq!(index, 4);
                assert!(reason.contains("disk full"));
            },
            other => unreachable!("unexpected result: {other:?}"),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn custom_horizon_is_honoured() {
        let mut sink = MockPointSinkPort::new();
        sink.expect_write_point().times(3).returning(|_| Ok(()));

        let writer = TimeSeriesWriter::with_horizon(Arc::new(sink), 3);
        assert_eq!(writer.horizon(), 3);
        assert_eq!(writer.write(&forecast_with(3)).await.unwrap(), 3);
    }
}
