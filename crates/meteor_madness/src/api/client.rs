//! Blocking HTTP client for the asteroid backend

use std::time::Duration;

use serde::de::DeserializeOwned;

use crate::api::{check_remote_error, parse_response, ApiError, AsteroidApi};
use crate::api::models::{AsteroidRecord, MeteorSimInput, TerrainSample};
use crate::config::ApiConfig;

/// [`AsteroidApi`] over HTTP
pub struct HttpAsteroidClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpAsteroidClient {
    /// Create a client for the configured endpoint
    pub fn new(config: &ApiConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();

        Self {
            agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn read<T: DeserializeOwned>(result: Result<ureq::Response, ureq::Error>) -> Result<T, ApiError> {
        let body = read_body(result)?;
        parse_response(&body)
    }
}

fn read_body(result: Result<ureq::Response, ureq::Error>) -> Result<String, ApiError> {
    match result {
        Ok(response) => Ok(response.into_string()?),
        Err(ureq::Error::Status(code, response)) => {
            let message = response
                .into_string()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            Err(ApiError::Status { code, message })
        }
        Err(ureq::Error::Transport(transport)) => Err(ApiError::Http(transport.to_string())),
    }
}

impl AsteroidApi for HttpAsteroidClient {
    fn fetch_asteroids(&self) -> Result<Vec<AsteroidRecord>, ApiError> {
        let url = self.url("/nasa-asteroids");
        log::debug!("GET {}", url);
        let records: Vec<AsteroidRecord> = Self::read(self.agent.get(&url).call())?;
        log::info!("Fetched {} asteroids", records.len());
        Ok(records)
    }

    fn simulate(&self, input: &MeteorSimInput) -> Result<serde_json::Value, ApiError> {
        let url = self.url("/simulate");
        log::debug!("POST {} ({})", url, input.name);
        let payload = serde_json::to_string(input)?;
        let body = read_body(
            self.agent
                .post(&url)
                .set("Content-Type", "application/json")
                .send_string(&payload),
        )?;
        let value: serde_json::Value = serde_json::from_str(&body)?;
        check_remote_error(&value)?;
        Ok(value)
    }

    fn terrain(&self, lat: f64, lng: f64) -> Result<TerrainSample, ApiError> {
        let url = self.url("/terrain");
        log::debug!("GET {} lat={} lng={}", url, lat, lng);
        Self::read(
            self.agent
                .get(&url)
                .query("lat", &lat.to_string())
                .query("lng", &lng.to_string())
                .call(),
        )
    }
}
