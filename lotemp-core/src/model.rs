use std::fmt;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Longest coordinate string accepted; bounds the request URL.
pub const MAX_COORD_LEN: usize = 8;

/// A latitude or longitude kept in its original decimal text form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinate(String);

impl Coordinate {
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();

        if value.chars().count() > MAX_COORD_LEN {
            return Err(Error::CoordinateTooLong { value, max: MAX_COORD_LEN });
        }

        if !is_plain_decimal(&value) {
            return Err(Error::InvalidCoordinate(value));
        }

        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn degrees(&self) -> f64 {
        // Checked in `new`.
        self.0.parse().unwrap_or_default()
    }
}

/// `-?digits[.digits]`, which is safe to place in a query string unescaped.
fn is_plain_decimal(value: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    let unsigned = value.strip_prefix('-').unwrap_or(value);
    match unsigned.split_once('.') {
        Some((int, frac)) => all_digits(int) && all_digits(frac),
        None => all_digits(unsigned),
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Coordinates {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

impl Coordinates {
    /// Central Helsinki, used when no other source is requested.
    pub const DEFAULT_LATITUDE: &'static str = "60.17116";
    pub const DEFAULT_LONGITUDE: &'static str = "24.93265";

    pub fn new(latitude: impl Into<String>, longitude: impl Into<String>) -> Result<Self> {
        let latitude = Coordinate::new(latitude)?;
        let longitude = Coordinate::new(longitude)?;

        check_range("Latitude", &latitude, 90)?;
        check_range("Longitude", &longitude, 180)?;

        Ok(Self { latitude, longitude })
    }

    pub fn helsinki() -> Self {
        Self {
            latitude: Coordinate(Self::DEFAULT_LATITUDE.to_string()),
            longitude: Coordinate(Self::DEFAULT_LONGITUDE.to_string()),
        }
    }
}

fn check_range(axis: &'static str, coord: &Coordinate, limit: u8) -> Result<()> {
    if coord.degrees().abs() > f64::from(limit) {
        return Err(Error::CoordinateOutOfRange {
            axis,
            value: coord.as_str().to_string(),
            limit,
        });
    }
    Ok(())
}

/// Current conditions as reported by the forecast endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    /// Local observation time exactly as the API returned it.
    pub time: String,
    pub temperature_c: f64,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: CurrentBlock,
}

#[derive(Debug, Deserialize)]
struct CurrentBlock {
    time: String,
    temperature_2m: f64,
}

impl Reading {
    /// Decode a forecast response body, reading only `current.time` and
    /// `current.temperature_2m`.
    pub fn from_json(body: &[u8]) -> Result<Self> {
        let parsed: ForecastResponse = serde_json::from_slice(body)?;

        Ok(Self {
            time: parsed.current.time,
            temperature_c: parsed.current.temperature_2m,
        })
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} // {:.1}°C", self.time, self.temperature_c)
    }
}
