//! Text cards for asteroid records

use std::fmt;

use crate::api::{ApiError, AsteroidApi, AsteroidRecord, ImpactAssessment, MeteorSimInput};

/// Printable summary of one asteroid with a "Simulate Impact" action
#[derive(Debug, Clone, PartialEq)]
pub struct AsteroidCard<'a> {
    record: &'a AsteroidRecord,
}

impl<'a> AsteroidCard<'a> {
    /// Card for `record`
    pub fn new(record: &'a AsteroidRecord) -> Self {
        Self { record }
    }

    /// Simulation request for an impact at `(lat, lng)`
    ///
    /// The record's diameter is halved to give the radius.
    pub fn simulate_input(&self, lat: f64, lng: f64) -> MeteorSimInput {
        MeteorSimInput {
            name: self.record.name.clone(),
            lat,
            lng,
            radius: self.record.diameter_km / 2.0,
            velocity: self.record.velocity_kms,
        }
    }

    /// Run the backend impact model for this asteroid striking `(lat, lng)`
    pub fn simulate_impact(&self, api: &dyn AsteroidApi, lat: f64, lng: f64) -> Result<ImpactOutcome, ApiError> {
        let value = api.simulate(&self.simulate_input(lat, lng))?;
        Ok(match ImpactAssessment::from_value(&value) {
            Ok(assessment) => ImpactOutcome::Assessed(assessment),
            Err(e) => {
                log::debug!("Unrecognized simulate response ({}), keeping raw JSON", e);
                ImpactOutcome::Raw(value)
            }
        })
    }
}

/// Result of a "Simulate Impact" request
#[derive(Debug, Clone, PartialEq)]
pub enum ImpactOutcome {
    /// Response in the usual shape
    Assessed(ImpactAssessment),
    /// Any other JSON the backend returned
    Raw(serde_json::Value),
}

impl fmt::Display for ImpactOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assessed(assessment) => fmt::Display::fmt(assessment, f),
            Self::Raw(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Display for AsteroidCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.record;
        writeln!(f, "{}", r.name)?;
        writeln!(f, "  Diameter: {} km", r.diameter_km)?;
        writeln!(f, "  Velocity: {} km/s", r.velocity_kms)?;
        writeln!(f, "  Distance: {} km", group_thousands(r.distance_km))?;
        write!(f, "  Hazard: {}", if r.hazardous { "Yes" } else { "No" })
    }
}

/// Format with comma thousands separators and at most two decimals
pub fn group_thousands(value: f64) -> String {
    let text = format!("{:.2}", value.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    if value < 0.0 {
        grouped.push('-');
    }
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let frac = frac_part.trim_end_matches('0');
    if !frac.is_empty() {
        grouped.push('.');
        grouped.push_str(frac);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Severity, TerrainSample};
    use serde_json::json;
    use std::cell::RefCell;

    struct FakeApi {
        response: serde_json::Value,
        requests: RefCell<Vec<MeteorSimInput>>,
    }

    impl AsteroidApi for FakeApi {
        fn fetch_asteroids(&self) -> Result<Vec<AsteroidRecord>, ApiError> {
            Ok(Vec::new())
        }

        fn simulate(&self, input: &MeteorSimInput) -> Result<serde_json::Value, ApiError> {
            self.requests.borrow_mut().push(input.clone());
            crate::api::check_remote_error(&self.response)?;
            Ok(self.response.clone())
        }

        fn terrain(&self, lat: f64, lng: f64) -> Result<TerrainSample, ApiError> {
            Ok(TerrainSample {
                latitude: lat,
                longitude: lng,
                elevation_meters: 0.0,
            })
        }
    }

    fn fake(response: serde_json::Value) -> FakeApi {
        FakeApi {
            response,
            requests: RefCell::new(Vec::new()),
        }
    }

    fn record(hazardous: bool) -> AsteroidRecord {
        AsteroidRecord {
            name: "(2019 XY)".to_string(),
            diameter_km: 0.42,
            velocity_kms: 21.5,
            distance_km: 4_512_345.67,
            hazardous,
        }
    }

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(group_thousands(4_512_345.67), "4,512,345.67");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.5), "1,000.5");
        assert_eq!(group_thousands(-12_345.0), "-12,345");
        assert_eq!(group_thousands(0.0), "0");
    }

    #[test]
    fn test_card_text() {
        let rock = record(true);
        let text = AsteroidCard::new(&rock).to_string();
        assert_eq!(
            text,
            "(2019 XY)\n  Diameter: 0.42 km\n  Velocity: 21.5 km/s\n  Distance: 4,512,345.67 km\n  Hazard: Yes"
        );

        let safe = record(false);
        assert!(AsteroidCard::new(&safe).to_string().ends_with("Hazard: No"));
    }

    #[test]
    fn test_simulate_input_uses_half_diameter() {
        let rock = record(false);
        let input = AsteroidCard::new(&rock).simulate_input(12.0, 34.0);
        assert_eq!(input.name, "(2019 XY)");
        assert!((input.radius - 0.21).abs() < 1e-12);
        assert!((input.velocity - 21.5).abs() < 1e-12);
        assert!((input.lat - 12.0).abs() < 1e-12);
    }

    #[test]
    fn test_simulate_impact_sends_card_input() {
        let api = fake(json!({
            "name": "(2019 XY)",
            "energy_tnt": 0.84,
            "impact_radius_km": 9.44,
            "severity": "Low"
        }));
        let rock = record(true);
        let outcome = AsteroidCard::new(&rock).simulate_impact(&api, 1.5, 2.5).unwrap();

        assert!(matches!(&outcome, ImpactOutcome::Assessed(a) if a.severity == Severity::Low));
        let sent = api.requests.borrow();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].name, "(2019 XY)");
        assert!((sent[0].lng - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_unusual_response_is_kept_raw() {
        let api = fake(json!({"message": "queued"}));
        let rock = record(false);
        let outcome = AsteroidCard::new(&rock).simulate_impact(&api, 0.0, 0.0).unwrap();
        assert_eq!(outcome.to_string(), r#"{"message":"queued"}"#);
    }

    #[test]
    fn test_remote_error_propagates() {
        let api = fake(json!({"error": "model offline"}));
        let rock = record(false);
        let result = AsteroidCard::new(&rock).simulate_impact(&api, 0.0, 0.0);
        assert!(matches!(result, Err(ApiError::Remote(m)) if m == "model offline"));
    }
}
