//! Wire types for the habitability scorer.

use exo_planet::PhysicalParameters;
use serde::{Deserialize, Deserializer, Serialize};

/// POST body sent to the scorer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HabitabilityRequest {
    pub distance: f32,
    pub mass: f32,
    pub radius: f32,
    #[serde(rename = "orbitalPeriod")]
    pub orbital_period: f32,
    #[serde(rename = "StellarMass")]
    pub stellar_mass: f32,
    #[serde(rename = "StellarRadius")]
    pub stellar_radius: f32,
    pub temp: f32,
    #[serde(rename = "ETemp")]
    pub equilibrium_temperature: f32,
    #[serde(rename = "SystemAge")]
    pub system_age: f32,
    #[serde(rename = "atmosphericthickness")]
    pub atmospheric_thickness: f32,
    #[serde(rename = "magneticfield")]
    pub magnetic_field: f32,
    pub oxygen: f32,
    pub nitrogen: f32,
    pub carbon: f32,
    pub size: f32,
}

impl From<&PhysicalParameters> for HabitabilityRequest {
    fn from(params: &PhysicalParameters) -> Self {
        let value = |key: &str| params.get(key).unwrap_or(0.0);
        Self {
            distance: value("distance"),
            mass: value("mass"),
            radius: value("radius"),
            orbital_period: value("orbitalPeriod"),
            stellar_mass: value("stellarMass"),
            stellar_radius: value("stellarRadius"),
            temp: value("temp"),
            equilibrium_temperature: value("ETemp"),
            system_age: value("SystemAge"),
            atmospheric_thickness: value("atmosphericThickness"),
            magnetic_field: value("magneticField"),
            oxygen: value("oxygen"),
            nitrogen: value("nitrogen"),
            carbon: value("carbon"),
            size: value("size"),
        }
    }
}

/// Scorer answer. Fields may arrive as numbers or numeric strings; anything
/// missing or unparseable reads as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HabitabilityResult {
    #[serde(deserialize_with = "lenient_number")]
    pub habitability_score: f32,
    #[serde(deserialize_with = "lenient_number")]
    pub vegetation: f32,
    #[serde(deserialize_with = "lenient_number")]
    pub sea_level: f32,
}

impl HabitabilityResult {
    pub fn zero() -> Self {
        Self::default()
    }

    /// Parse a response body, tolerating any shape.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }
}

fn lenient_number<'de, D>(deserializer: D) -> Result<f32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let number = match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0) as f32,
        serde_json::Value::String(s) => s.trim().parse::<f32>().unwrap_or(0.0),
        _ => 0.0,
    };
    Ok(if number.is_finite() { number } else { 0.0 })
}
