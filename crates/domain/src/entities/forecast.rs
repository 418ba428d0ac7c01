//! Forecast model
//!
//! Mirrors the GeoJSON document returned by the Met.no locationforecast
//! `complete` product. Every field falls back to its zero value when absent
//! or `null`, so a document with missing sections still decodes.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// A decoded forecast response
///
/// Built fresh for every poll and consumed by the writer; never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Forecast {
    /// GeoJSON object type (normally "Feature")
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Point the forecast was computed for
    #[serde(deserialize_with = "null_as_default")]
    pub geometry: Geometry,
    /// Metadata and the forecast time series
    #[serde(deserialize_with = "null_as_default")]
    pub properties: Properties,
}

impl Forecast {
    /// Samples in the order returned by the remote service
    #[must_use]
    pub fn samples(&self) -> &[Sample] {
        &self.properties.timeseries
    }
}

/// GeoJSON point geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Geometry {
    /// GeoJSON geometry type (normally "Point")
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    /// Longitude, latitude and altitude as reported by the service
    #[serde(deserialize_with = "null_as_default")]
    pub coordinates: Vec<f64>,
}

/// Forecast properties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Properties {
    #[serde(deserialize_with = "null_as_default")]
    pub meta: ForecastMeta,
    #[serde(deserialize_with = "null_as_default")]
    pub timeseries: Vec<Sample>,
}

/// Forecast metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastMeta {
    /// When the model run behind this forecast was published
    #[serde(deserialize_with = "null_as_default")]
    pub updated_at: DateTime<Utc>,
    /// Unit string per field name, e.g. `air_temperature` -> `celsius`
    #[serde(deserialize_with = "null_as_default")]
    pub units: BTreeMap<String, String>,
}

/// One entry of the forecast time series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sample {
    #[serde(deserialize_with = "null_as_default")]
    pub time: DateTime<Utc>,
    #[serde(deserialize_with = "null_as_default")]
    pub data: SampleData,
}

impl Sample {
    /// Shortcut to the instantaneous weather values
    #[must_use]
    pub const fn details(&self) -> &WeatherDetails {
        &self.data.instant.details
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleData {
    #[serde(deserialize_with = "null_as_default")]
    pub instant: InstantData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstantData {
    #[serde(deserialize_with = "null_as_default")]
    pub details: WeatherDetails,
}

/// Instantaneous weather values of a sample
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherDetails {
    /// hPa
    #[serde(deserialize_with = "null_as_default")]
    pub air_pressure_at_sea_level: f64,
    /// Celsius
    #[serde(deserialize_with = "null_as_default")]
    pub air_temperature: f64,
    #[serde(rename = "air_temperature_percentile_10", deserialize_with = "null_as_default")]
    pub air_temperature_p10: f64,
    #[serde(rename = "air_temperature_percentile_90", deserialize_with = "null_as_default")]
    pub air_temperature_p90: f64,
    /// Percent
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_area_fraction: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_area_fraction_high: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_area_fraction_low: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub cloud_area_fraction_medium: f64,
    /// Celsius
    #[serde(deserialize_with = "null_as_default")]
    pub dew_point_temperature: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub fog_area_fraction: f64,
    /// Percent
    #[serde(deserialize_with = "null_as_default")]
    pub relative_humidity: f64,
    #[serde(rename = "ultraviolet_index_clear_sky", deserialize_with = "null_as_default")]
    pub uv_index_clear_sky: f64,
    /// Degrees
    #[serde(deserialize_with = "null_as_default")]
    pub wind_from_direction: f64,
    /// m/s
    #[serde(deserialize_with = "null_as_default")]
    pub wind_speed: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub wind_speed_of_gust: f64,
    #[serde(rename = "wind_speed_percentile_10", deserialize_with = "null_as_default")]
    pub wind_speed_p10: f64,
    #[serde(rename = "wind_speed_percentile_90", deserialize_with = "null_as_default")]
    pub wind_speed_p90: f64,
}

/// Decode `null` as the zero value of `T`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_document() -> serde_json::Value {
        serde_json::json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [10.7522, 59.9139, 23] },
            "properties": {
                "meta": {
                    "updated_at": "2024-01-15T11:04:12Z",
                    "units": { "air_temperature": "celsius", "wind_speed": "m/s" }
                },
                "timeseries": [
                    {
                        "time": "2024-01-15T12:00:00Z",
                        "data": {
                            "instant": {
                                "details": {
                                    "air_pressure_at_sea_level": 1013.2,
                                    "air_temperature": -4.5,
                                    "air_temperature_percentile_10": -5.1,
                                    "air_temperature_percentile_90": -3.9,
                                    "ultraviolet_index_clear_sky": 0.1,
                                    "wind_speed": 3.4,
                                    "wind_speed_percentile_90": 4.8
                                }
                            },
                            "next_1_hours": { "summary": { "symbol_code": "cloudy" } }
                        }
                    },
                    { "time": "2024-01-15T13:00:00Z", "data": { "instant": { "details": {} } } }
                ]
            }
        })
    }

    #[test]
    fn decodes_complete_document() {
        let forecast: Forecast =
            serde_json::from_value(sample_document()).expect("should deserialize");

        assert_eq!(forecast.kind, "Feature");
        assert_eq!(forecast.geometry.coordinates, vec![10.7522, 59.9139, 23.0]);
        assert_eq!(
            forecast.properties.meta.units.get("air_temperature"),
            Some(&"celsius".to_string())
        );
        assert_eq!(forecast.samples().len(), 2);

        let first = &forecast.samples()[0];
        assert_eq!(
            first.time,
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap()
        );
        assert!((first.details().air_temperature + 4.5).abs() < f64::EPSILON);
        assert!((first.details().air_temperature_p10 + 5.1).abs() < f64::EPSILON);
        assert!((first.details().uv_index_clear_sky - 0.1).abs() < f64::EPSILON);
        assert!((first.details().wind_speed_p90 - 4.8).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_fields_fall_back_to_zero_values() {
        let forecast: Forecast = serde_json::from_str("{}").expect("should deserialize");
        assert_eq!(forecast, Forecast::default());

        let forecast: Forecast =
            serde_json::from_value(sample_document()).expect("should deserialize");
        assert_eq!(forecast.samples()[1].details(), &WeatherDetails::default());
    }

    #[test]
    fn null_values_fall_back_to_zero_values() {
        let forecast: Forecast = serde_json::from_value(serde_json::json!({
            "type": null,
            "geometry": { "type": "Point", "coordinates": null },
            "properties": {
                "meta": { "updated_at": null, "units": null },
                "timeseries": [
                    { "time": "2024-01-15T12:00:00Z", "data": { "instant": { "details": {
                        "air_temperature": null,
                        "wind_speed": 3.4
                    } } } },
                    { "time": null, "data": null }
                ]
            }
        }))
        .expect("should deserialize");

        assert!(forecast.kind.is_empty());
        assert!(forecast.geometry.coordinates.is_empty());
        assert_eq!(forecast.properties.meta, ForecastMeta::default());
        assert_eq!(forecast.samples().len(), 2);

        let first = forecast.samples()[0].details();
        assert!(first.air_temperature.abs() < f64::EPSILON);
        assert!((first.wind_speed - 3.4).abs() < f64::EPSILON);
        assert_eq!(forecast.samples()[1], Sample::default());
    }

    #[test]
    fn serializes_with_wire_field_names() {
        let forecast = Forecast {
            geometry: Geometry {
                kind: "Point".to_string(),
                coordinates: vec![1.0, 2.0, 3.0],
            },
            ..Default::default()
        };
        let json = serde_json::to_value(&forecast).expect("should serialize");
        assert_eq!(json["geometry"]["type"], "Point");
        assert_eq!(json["geometry"]["coordinates"][2], 3.0);
        assert!(json["properties"]["timeseries"].is_array());
    }
}
