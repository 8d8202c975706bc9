use std::fmt;

use serde::Serialize;

use crate::predict::PredictError;

/// Self-reported metrics tracked for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct SymptomSnapshot {
    pub acne_days: i32,
    pub sleep_quality: i32,
    pub exercise_minutes: i32,
    pub weight: f64,
    pub mood: f64,
}

impl SymptomSnapshot {
    pub fn demo() -> Self {
        Self {
            acne_days: 2,
            sleep_quality: 7,
            exercise_minutes: 30,
            weight: 65.0,
            mood: 6.0,
        }
    }
}

impl Default for SymptomSnapshot {
    fn default() -> Self {
        Self::demo()
    }
}

/// Raw factor text as typed into the assessment form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactorForm {
    pub age: String,
    pub bmi: String,
    pub cycle_length: String,
    pub acne_days: String,
    pub weight_gain: String,
    pub hormone_level: String,
    pub exercise_today: String,
    pub sleep_quality: String,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FactorError {
    #[error("{field} must be numeric, got '{value}'")]
    NotNumeric { field: &'static str, value: String },
}

/// Health factors submitted to the prediction endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AssessmentFactors {
    pub age: f64,
    pub bmi: f64,
    pub cycle_length: f64,
    pub acne_days: f64,
    pub weight_gain: f64,
    pub hormone_level: f64,
    pub exercise_today: f64,
    pub sleep_quality: f64,
}

impl AssessmentFactors {
    /// Coerces every form field to a number. Blank fields count as zero;
    /// anything else that is not a finite number is rejected.
    pub fn parse(form: &FactorForm) -> Result<Self, FactorError> {
        Ok(Self {
            age: parse_field("age", &form.age)?,
            bmi: parse_field("bmi", &form.bmi)?,
            cycle_length: parse_field("cycle_length", &form.cycle_length)?,
            acne_days: parse_field("acne_days", &form.acne_days)?,
            weight_gain: parse_field("weight_gain", &form.weight_gain)?,
            hormone_level: parse_field("hormone_level", &form.hormone_level)?,
            exercise_today: parse_field("exercise_today", &form.exercise_today)?,
            sleep_quality: parse_field("sleep_quality", &form.sleep_quality)?,
        })
    }
}

fn parse_field(field: &'static str, raw: &str) -> Result<f64, FactorError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(FactorError::NotNumeric {
            field,
            value: raw.to_string(),
        }),
    }
}

/// Coarse label returned by the predictor or derived by the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeverityCategory {
    High,
    Medium,
    Low,
    HighRisk,
    LowRisk,
    Unrecognized(String),
}

impl SeverityCategory {
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            "low" => Self::Low,
            "high risk" => Self::HighRisk,
            "low risk" => Self::LowRisk,
            _ => Self::Unrecognized(label.to_string()),
        }
    }

    pub fn from_prediction_flag(flag: i64) -> Self {
        match flag {
            1 => Self::HighRisk,
            0 => Self::LowRisk,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::HighRisk => "High Risk",
            Self::LowRisk => "Low Risk",
            Self::Unrecognized(label) => label,
        }
    }

    /// Fixed category lookup; unknown labels land on the midpoint.
    pub fn score(&self) -> i32 {
        match self {
            Self::High | Self::HighRisk => 90,
            Self::Medium => 70,
            Self::Low | Self::LowRisk => 40,
            Self::Unrecognized(_) => 50,
        }
    }
}

impl fmt::Display for SeverityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A prediction returned by the remote endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentResult {
    pub category: SeverityCategory,
    pub insights: String,
    pub score: i32,
}

impl AssessmentResult {
    pub fn new(category: SeverityCategory, insights: impl Into<String>) -> Self {
        let score = category.score();
        Self {
            category,
            insights: insights.into(),
            score,
        }
    }
}

/// Outcome of the local substitute scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct FallbackResult {
    pub category: SeverityCategory,
    pub score: i32,
}

/// Where an assessment came from. Fallbacks keep the error they masked.
#[derive(Debug)]
pub enum Assessment {
    Remote(AssessmentResult),
    Fallback {
        result: FallbackResult,
        cause: PredictError,
    },
}

impl Assessment {
    pub fn category(&self) -> &SeverityCategory {
        match self {
            Assessment::Remote(result) => &result.category,
            Assessment::Fallback { result, .. } => &result.category,
        }
    }

    pub fn score(&self) -> i32 {
        match self {
            Assessment::Remote(result) => result.score,
            Assessment::Fallback { result, .. } => result.score,
        }
    }

    pub fn insights(&self) -> Option<&str> {
        match self {
            Assessment::Remote(result) => Some(result.insights.as_str()),
            Assessment::Fallback { .. } => None,
        }
    }

    #[cfg(test)]
    pub fn is_fallback(&self) -> bool {
        matches!(self, Assessment::Fallback { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    DemoMode,
}

/// User-facing notice raised when an assessment completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn for_assessment(assessment: &Assessment) -> Self {
        match assessment {
            Assessment::Remote(result) => Self {
                kind: NotificationKind::Success,
                message: format!("Assessment complete: {} severity", result.category),
            },
            Assessment::Fallback { result, .. } => Self {
                kind: NotificationKind::DemoMode,
                message: format!(
                    "Demo mode: estimated {} severity from local factors",
                    result.category
                ),
            },
        }
    }
}
