use crate::models::{AssessmentFactors, FallbackResult, SeverityCategory};

const BASE_SCORE: f64 = 50.0;
const MIN_SCORE: f64 = 40.0;
const MAX_SCORE: f64 = 100.0;

/// Local stand-in for the remote predictor, used only when that call fails.
///
/// Zero is how a blank form field arrives, so age and cycle length only
/// count once they were actually filled in.
pub fn mock_severity(factors: &AssessmentFactors) -> FallbackResult {
    let mut score = BASE_SCORE;

    if factors.age > 0.0 && (factors.age < 20.0 || factors.age > 40.0) {
        score += 5.0;
    }

    if factors.bmi > 30.0 {
        score += 10.0;
    } else if factors.bmi > 25.0 {
        score += 5.0;
    }

    if factors.cycle_length > 0.0 && (factors.cycle_length > 35.0 || factors.cycle_length < 21.0) {
        score += 10.0;
    }

    score += factors.acne_days * 2.0;

    if factors.weight_gain > 0.0 {
        score += 5.0;
    }

    score += factors.hormone_level;

    if factors.exercise_today <= 0.0 {
        score += 10.0;
    }

    if factors.sleep_quality < 5.0 {
        score += 10.0;
    }

    let score = score.clamp(MIN_SCORE, MAX_SCORE).round() as i32;
    FallbackResult {
        category: category_for(score),
        score,
    }
}

pub fn category_for(score: i32) -> SeverityCategory {
    if score >= 80 {
        SeverityCategory::High
    } else if score >= 60 {
        SeverityCategory::Medium
    } else {
        SeverityCategory::Low
    }
}
