use crate::models::SymptomSnapshot;

/// Display classification of a score, shared by the CLI and the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Neutral,
    Attention,
}

pub fn compute_score(snapshot: &SymptomSnapshot) -> i32 {
    let acne_score = (10.0 - snapshot.acne_days as f64).max(0.0);
    let sleep_score = snapshot.sleep_quality as f64;
    let exercise_score = (snapshot.exercise_minutes as f64 / 3.0).min(10.0);
    let mood_score = snapshot.mood;

    round_half_up((acne_score + sleep_score + exercise_score + mood_score) / 4.0 * 10.0)
}

// Halves round towards positive infinity, so 77.5 -> 78 and -2.5 -> -2.
fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

pub fn score_badge(score: i32) -> &'static str {
    match score_tone(score) {
        Tone::Positive => "Excellent",
        Tone::Neutral => "Good",
        Tone::Attention => "Needs Attention",
    }
}

pub fn score_tone(score: i32) -> Tone {
    if score >= 80 {
        Tone::Positive
    } else if score >= 60 {
        Tone::Neutral
    } else {
        Tone::Attention
    }
}
