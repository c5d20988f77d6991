//! Asteroid API payloads

use std::fmt;

use serde::{Deserialize, Serialize};

/// Near-Earth object summary from `/nasa-asteroids`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidRecord {
    /// Designation
    pub name: String,
    /// Estimated maximum diameter in kilometers
    pub diameter_km: f64,
    /// Relative velocity at close approach in km/s
    pub velocity_kms: f64,
    /// Miss distance in kilometers
    pub distance_km: f64,
    /// Flagged as potentially hazardous
    pub hazardous: bool,
}

/// Request body for `/simulate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeteorSimInput {
    /// Object name
    pub name: String,
    /// Impact latitude in degrees
    pub lat: f64,
    /// Impact longitude in degrees
    pub lng: f64,
    /// Object radius in kilometers
    pub radius: f64,
    /// Impact velocity in km/s
    pub velocity: f64,
}

/// Impact severity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Under one megaton
    Low,
    /// Under ten megatons
    Moderate,
    /// Under a hundred megatons
    High,
    /// Everything above
    Catastrophic,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "Low",
            Self::Moderate => "Moderate",
            Self::High => "High",
            Self::Catastrophic => "Catastrophic",
        };
        f.write_str(name)
    }
}

/// Typed view of a `/simulate` response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactAssessment {
    /// Object name echoed back
    pub name: String,
    /// Released energy in megatons of TNT
    pub energy_tnt: f64,
    /// Affected radius in kilometers
    pub impact_radius_km: f64,
    /// Severity class
    pub severity: Severity,
}

impl ImpactAssessment {
    /// Interpret a raw `/simulate` response
    pub fn from_value(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        Self::deserialize(value)
    }
}

impl fmt::Display for ImpactAssessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2} Mt TNT, {:.2} km radius, {} severity",
            self.name, self.energy_tnt, self.impact_radius_km, self.severity
        )
    }
}

/// Ground elevation at a coordinate from `/terrain`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainSample {
    /// Latitude in degrees
    pub latitude: f64,
    /// Longitude in degrees
    pub longitude: f64,
    /// Elevation above sea level in meters
    pub elevation_meters: f64,
}
