//! Asteroid data API
//!
//! The backend is an external collaborator reached over plain HTTP with JSON
//! bodies. [`AsteroidApi`] is the seam the rest of the crate talks to;
//! [`HttpAsteroidClient`] is the blocking HTTP implementation.

pub mod client;
pub mod models;

pub use client::HttpAsteroidClient;
pub use models::{AsteroidRecord, ImpactAssessment, MeteorSimInput, Severity, TerrainSample};

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Asteroid API errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Connection, DNS or timeout failure
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// Server answered with a non-success status
    #[error("Server returned status {code}: {message}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Status text or response body
        message: String,
    },

    /// Reading the response body failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Body was not the expected JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Endpoint reported an error in its JSON body
    #[error("Remote error: {0}")]
    Remote(String),
}

/// Operations offered by the asteroid backend
pub trait AsteroidApi {
    /// Near-Earth objects approaching in the next few days
    fn fetch_asteroids(&self) -> Result<Vec<AsteroidRecord>, ApiError>;

    /// Run the impact model for one object
    ///
    /// The response is returned as raw JSON; [`ImpactAssessment::from_value`]
    /// gives a typed view of the usual shape.
    fn simulate(&self, input: &MeteorSimInput) -> Result<serde_json::Value, ApiError>;

    /// Ground elevation at a coordinate
    fn terrain(&self, lat: f64, lng: f64) -> Result<TerrainSample, ApiError>;
}

/// Parse a response body, surfacing `{"error": "..."}` objects as [`ApiError::Remote`]
pub fn parse_response<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    check_remote_error(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Fail with [`ApiError::Remote`] when `value` is an error object
pub fn check_remote_error(value: &serde_json::Value) -> Result<(), ApiError> {
    match value.get("error") {
        Some(serde_json::Value::String(message)) => Err(ApiError::Remote(message.clone())),
        Some(other) => Err(ApiError::Remote(other.to_string())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_object_becomes_remote_error() {
        let body = r#"{"error": "Failed to fetch NASA data: timeout"}"#;
        let result: Result<Vec<AsteroidRecord>, _> = parse_response(body);
        assert!(matches!(result, Err(ApiError::Remote(m)) if m.contains("timeout")));
    }

    #[test]
    fn test_list_body_parses() {
        let body = r#"[
            {"name": "A", "diameter_km": 0.3, "velocity_kms": 12.0, "distance_km": 1000.5, "hazardous": false},
            {"name": "B", "diameter_km": 1.1, "velocity_kms": 25.3, "distance_km": 75000.0, "hazardous": true}
        ]"#;
        let records: Vec<AsteroidRecord> = parse_response(body).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].name, "B");
    }

    #[test]
    fn test_malformed_body_is_json_error() {
        let result: Result<TerrainSample, _> = parse_response("<html>502</html>");
        assert!(matches!(result, Err(ApiError::Json(_))));
    }

    #[test]
    fn test_terrain_body_parses() {
        let body = r#"{"latitude": 40.0, "longitude": -105.0, "elevation_meters": 1655.2}"#;
        let sample: TerrainSample = parse_response(body).unwrap();
        assert!((sample.elevation_meters - 1655.2).abs() < 1e-9);
    }
}
