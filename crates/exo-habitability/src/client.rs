//! Blocking HTTP client for the habitability scorer.

use std::time::Duration;

use exo_config::HabitabilityConfig;
use thiserror::Error;

use crate::request::{HabitabilityRequest, HabitabilityResult};

#[derive(Debug, Error)]
pub enum HabitabilityError {
    #[error("habitability service returned HTTP {0}")]
    Status(u16),

    #[error("habitability request failed: {0}")]
    Transport(String),

    #[error("failed to read habitability response: {0}")]
    Body(#[from] std::io::Error),

    #[error("habitability response is not JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

impl From<ureq::Error> for HabitabilityError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, _) => HabitabilityError::Status(code),
            ureq::Error::Transport(transport) => HabitabilityError::Transport(transport.to_string()),
        }
    }
}

/// Anything that can score a parameter set. One attempt per call.
pub trait HabitabilityService: Send {
    fn score(&self, request: &HabitabilityRequest) -> Result<HabitabilityResult, HabitabilityError>;
}

pub struct HttpHabitabilityClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl HttpHabitabilityClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn from_config(config: &HabitabilityConfig) -> Self {
        Self::new(
            config.endpoint.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl HabitabilityService for HttpHabitabilityClient {
    fn score(&self, request: &HabitabilityRequest) -> Result<HabitabilityResult, HabitabilityError> {
        let response = self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .send_json(request)?;
        let body = response.into_string()?;
        Ok(HabitabilityResult::from_body(&body)?)
    }
}

/// Score, logging any failure and answering zeros in its place.
pub fn score_or_zero(
    service: &dyn HabitabilityService,
    request: &HabitabilityRequest,
) -> (HabitabilityResult, bool) {
    match service.score(request) {
        Ok(result) => {
            tracing::debug!(
                score = result.habitability_score,
                vegetation = result.vegetation,
                sea_level = result.sea_level,
                "Habitability scored"
            );
            (result, true)
        }
        Err(e) => {
            tracing::warn!("Habitability check failed: {e}");
            (HabitabilityResult::zero(), false)
        }
    }
}
