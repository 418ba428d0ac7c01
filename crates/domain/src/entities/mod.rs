//! Domain entities

mod forecast;

pub use forecast::{
    Forecast, ForecastMeta, Geometry, InstantData, Properties, Sample, SampleData, WeatherDetails,
};
