//! Responses of the remote `/predict` classifier and the risk levels derived from them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictedClass {
    Phishing,
    Legitimate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class: PredictedClass,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    pub text: String,
    pub predictions: Vec<Prediction>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    Ok(PredictionResponse),
    Err { error: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Safe,
    Moderate,
    High,
}

impl RiskLevel {
    pub fn from_probability(probability: f64) -> Self {
        if probability < 0.5 {
            RiskLevel::Safe
        } else if probability < 0.7 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }
}

/// Risk summary attached to an analysis when a prediction is available.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskAssessment {
    pub class: PredictedClass,
    pub probability: f64,
    pub level: RiskLevel,
}

impl PredictionResponse {
    /// Parses a `/predict` response body; a service-side `error` payload becomes an error.
    pub fn parse(body: &str) -> Result<Self> {
        let payload: Payload =
            serde_json::from_str(body).context("Failed to parse prediction response")?;
        match payload {
            Payload::Ok(response) => Ok(response),
            Payload::Err { error } => anyhow::bail!("Prediction service error: {}", error),
        }
    }

    /// Assessment of the first prediction, if any.
    pub fn risk(&self) -> Option<RiskAssessment> {
        self.predictions.first().map(|p| RiskAssessment {
            class: p.class,
            probability: p.probability,
            level: RiskLevel::from_probability(p.probability),
        })
    }
}
