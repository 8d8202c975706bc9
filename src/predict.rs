use std::future::Future;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use crate::models::{AssessmentFactors, AssessmentResult, SeverityCategory};

pub const DEFAULT_ENDPOINT: &str = "https://pcod-predictor.ngrok-free.app/predict";

/// Tells the tunnel in front of the predictor to skip its browser interstitial.
pub const SKIP_BROWSER_WARNING_HEADER: &str = "ngrok-skip-browser-warning";

#[derive(Debug, thiserror::Error)]
pub enum PredictError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("prediction endpoint returned {status}")]
    Status { status: StatusCode },
    #[error("prediction response was not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("prediction response carried neither a severity nor a prediction flag")]
    MissingSeverity,
}

/// Anything that can turn submitted factors into a severity prediction.
pub trait Predictor {
    fn predict(
        &self,
        factors: &AssessmentFactors,
    ) -> impl Future<Output = Result<AssessmentResult, PredictError>> + Send;
}

/// Single-attempt JSON client for the external prediction endpoint.
pub struct HttpPredictor {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpPredictor {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, PredictError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(PredictError::Client)?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Predictor for HttpPredictor {
    async fn predict(&self, factors: &AssessmentFactors) -> Result<AssessmentResult, PredictError> {
        debug!(endpoint = %self.endpoint, ?factors, "submitting assessment");

        let response = self
            .client
            .post(&self.endpoint)
            .header(SKIP_BROWSER_WARNING_HEADER, "true")
            .header(ACCEPT, "application/json")
            .json(factors)
            .send()
            .await
            .map_err(|source| PredictError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PredictError::Status { status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| PredictError::Transport {
                url: self.endpoint.clone(),
                source,
            })?;
        debug!(%status, body = %body, "prediction response received");

        parse_prediction(&body)
    }
}

#[derive(Debug, Deserialize)]
struct PredictionBody {
    #[serde(alias = "category")]
    severity: Option<String>,
    insights: Option<String>,
    prediction: Option<i64>,
}

pub fn parse_prediction(body: &str) -> Result<AssessmentResult, PredictError> {
    let parsed: PredictionBody = serde_json::from_str(body).map_err(PredictError::Malformed)?;

    let category = match (parsed.severity, parsed.prediction) {
        (Some(label), _) => SeverityCategory::parse(&label),
        (None, Some(flag)) => SeverityCategory::from_prediction_flag(flag),
        (None, None) => return Err(PredictError::MissingSeverity),
    };

    Ok(AssessmentResult::new(
        category,
        parsed.insights.unwrap_or_default(),
    ))
}
