// src/geo.rs
//! Site map-link positions → latitude/longitude.
//!
//! The search site encodes building positions in its own planar units. A fixed
//! linear mapping per axis brings them back to degrees; there is no bounds
//! checking, so odd inputs give odd (but finite) coordinates.

use serde::Serialize;

use crate::error::TransformError;

pub const LAT_SCALE: f64 = 33000.0;
pub const LON_SCALE: f64 = 27380.0;
pub const LAT_OFFSET: f64 = 16.8;
pub const LON_OFFSET: f64 = 112.91;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Map raw site units to degrees.
pub fn transform(lat_raw: f64, lon_raw: f64) -> Coordinates {
    Coordinates {
        latitude: (lat_raw / LAT_SCALE) + LAT_OFFSET,
        longitude: (lon_raw / LON_SCALE) + LON_OFFSET,
    }
}

/// Parse the two positional tokens (signed decimals) and transform them.
pub fn from_tokens(lat_token: &str, lon_token: &str) -> Result<Coordinates, TransformError> {
    let lat = parse_token(lat_token)?;
    let lon = parse_token(lon_token)?;
    Ok(transform(lat, lon))
}

fn parse_token(token: &str) -> Result<f64, TransformError> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TransformError { token: s!(token) })
}
