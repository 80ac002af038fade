//! Planet Q&A backed by a hosted generative model.

use std::time::Duration;

use exo_config::AssistantConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shown in place of an answer whenever the model call fails.
pub const APOLOGY: &str = "Sorry, there was an error processing your question. Please try again.";

#[derive(Debug, Error)]
pub enum AssistantError {
    #[error("assistant API key not set (environment variable {0})")]
    MissingApiKey(String),

    #[error("assistant service returned HTTP {0}")]
    Status(u16),

    #[error("assistant request failed: {0}")]
    Transport(String),

    #[error("failed to read assistant response: {0}")]
    Body(#[from] std::io::Error),

    #[error("assistant response is malformed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("assistant response contained no text")]
    EmptyAnswer,
}

impl From<ureq::Error> for AssistantError {
    fn from(error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(code, _) => AssistantError::Status(code),
            ureq::Error::Transport(transport) => AssistantError::Transport(transport.to_string()),
        }
    }
}

/// Question answering about the selected planet.
pub trait AssistantClient: Send {
    fn ask(&self, question: &str, planet: &str) -> Result<String, AssistantError>;

    /// Answer a question, or `None` for a blank one. Failures become the
    /// apology text.
    fn answer(&self, question: &str, planet: &str) -> Option<String> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        match self.ask(question, planet) {
            Ok(answer) => Some(answer),
            Err(e) => {
                tracing::warn!(planet, "Assistant request failed: {e}");
                Some(APOLOGY.to_string())
            }
        }
    }
}

pub fn build_prompt(planet: &str, question: &str) -> String {
    format!(
        "You are an AI assistant called ExoBot specializing in exoplanets. \
         The user is asking about {planet}. \
         Please provide a concise and informative answer to the following question: {question}"
    )
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CandidatePart {
    text: String,
}

/// `generateContent` client for the hosted model.
pub struct GenerativeAssistant {
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    agent: ureq::Agent,
}

impl GenerativeAssistant {
    /// Reads the API key from the configured environment variable.
    pub fn from_config(config: &AssistantConfig) -> Self {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty());
        if api_key.is_none() {
            tracing::info!(
                "{} is not set; assistant answers will fall back to an apology",
                config.api_key_env
            );
        }
        Self {
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
            agent: ureq::AgentBuilder::new()
                .timeout(Duration::from_secs(config.timeout_seconds))
                .build(),
        }
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }
}

impl AssistantClient for GenerativeAssistant {
    fn ask(&self, question: &str, planet: &str) -> Result<String, AssistantError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AssistantError::MissingApiKey(self.api_key_env.clone()))?;
        let prompt = build_prompt(planet, question);
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };

        let response = self
            .agent
            .post(&self.url())
            .set("Content-Type", "application/json")
            .set("x-goog-api-key", key)
            .send_json(&body)?;
        let parsed: GenerateResponse = serde_json::from_str(&response.into_string()?)?;

        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Err(AssistantError::EmptyAnswer);
        }
        Ok(text)
    }
}
