//! InfluxDB line protocol encoding
//!
//! `measurement[,tag=value...] field=value[,field=value...] timestamp`
//! with the timestamp in nanoseconds.

use std::fmt::Write;

use domain::DataPoint;

use crate::InfluxError;

/// Encode a point as a single line (without trailing newline)
///
/// # Errors
///
/// Returns `InfluxError::InvalidPoint` if the point fails validation or its
/// timestamp is outside the nanosecond range.
pub fn encode_point(point: &DataPoint) -> Result<String, InfluxError> {
    point
        .validate()
        .map_err(|e| InfluxError::InvalidPoint(e.to_string()))?;

    let nanos = point.timestamp().timestamp_nanos_opt().ok_or_else(|| {
        InfluxError::InvalidPoint(format!(
            "timestamp {} out of nanosecond range",
            point.timestamp()
        ))
    })?;

    let mut line = escape(point.measurement(), &[',', ' ']);

    for (key, value) in point.tags() {
        let _ = write!(
            line,
            ",{}={}",
            escape(key, &[',', '=', ' ']),
            escape(value, &[',', '=', ' '])
        );
    }

    let fields = point
        .fields()
        .iter()
        .map(|(key, value)| format!("{}={value}", escape(key, &[',', '=', ' '])))
        .collect::<Vec<_>>()
        .join(",");

    let _ = write!(line, " {fields} {nanos}");
    Ok(line)
}

fn escape(raw: &str, special: &[char]) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '\\' || special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
