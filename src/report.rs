use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{SeverityCategory, SymptomSnapshot};
use crate::risk::{self, Tone};

pub const REPORT_TITLE: &str = "PCOD Health Report";
pub const APP_NAME: &str = "PCOD Care";
pub const TAGLINE: &str = "Your personalized journey to better health";

#[derive(Debug, Clone, PartialEq)]
pub struct MetricRow {
    pub label: &'static str,
    pub value: String,
    pub status: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrendLine {
    pub metric: &'static str,
    pub detail: &'static str,
    pub improving: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverallScore {
    pub score: i32,
    pub badge: &'static str,
    pub tone: Tone,
    pub category: Option<String>,
}

/// Everything the exported report shows, independent of output format.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    pub title: &'static str,
    pub generated_on: NaiveDate,
    pub overall: OverallScore,
    pub metrics: Vec<MetricRow>,
    pub trends: Vec<TrendLine>,
    pub recommendations: [&'static str; 3],
}

const TRENDS: [TrendLine; 3] = [
    TrendLine {
        metric: "Sleep Quality",
        detail: "Improved by 15%",
        improving: true,
    },
    TrendLine {
        metric: "Exercise",
        detail: "Up by 20 min/day",
        improving: true,
    },
    TrendLine {
        metric: "Acne Days",
        detail: "2 days this week",
        improving: false,
    },
];

pub fn build_report(
    snapshot: &SymptomSnapshot,
    score: i32,
    category: Option<&SeverityCategory>,
    generated_on: NaiveDate,
) -> ReportDocument {
    ReportDocument {
        title: REPORT_TITLE,
        generated_on,
        overall: OverallScore {
            score,
            badge: risk::score_badge(score),
            tone: risk::score_tone(score),
            category: category.map(|category| category.label().to_string()),
        },
        metrics: metric_rows(snapshot),
        trends: TRENDS.to_vec(),
        recommendations: recommendations(score),
    }
}

pub fn metric_rows(snapshot: &SymptomSnapshot) -> Vec<MetricRow> {
    let rows = [
        (
            "Acne Days",
            format!("{}/7 days", snapshot.acne_days),
            if snapshot.acne_days <= 2 { "Good" } else { "Needs Attention" },
        ),
        (
            "Sleep Quality",
            format!("{}/10", snapshot.sleep_quality),
            if snapshot.sleep_quality >= 7 { "Excellent" } else { "Fair" },
        ),
        (
            "Exercise",
            format!("{} min/day", snapshot.exercise_minutes),
            if snapshot.exercise_minutes >= 30 { "Great" } else { "Increase" },
        ),
        ("Weight", format!("{} kg", snapshot.weight), "Stable"),
        (
            "Mood",
            format!("{}/10", snapshot.mood),
            if snapshot.mood >= 7.0 { "Positive" } else { "Monitor" },
        ),
    ];

    rows.into_iter()
        .map(|(label, value, status)| MetricRow {
            label,
            value,
            status,
            tone: status_tone(status),
        })
        .collect()
}

pub fn status_tone(status: &str) -> Tone {
    match status {
        "Good" | "Excellent" | "Great" | "Positive" => Tone::Positive,
        "Needs Attention" | "Increase" => Tone::Attention,
        _ => Tone::Neutral,
    }
}

pub fn recommendations(score: i32) -> [&'static str; 3] {
    if score < 60 {
        [
            "Book a consultation with your gynecologist to review symptoms",
            "Log symptoms daily so patterns are easier to spot",
            "Aim for 7-8 hours of sleep and gentle daily movement",
        ]
    } else if score < 80 {
        [
            "Build towards 30 minutes of exercise every day",
            "Add more fibre and protein to balanced meals",
            "Practise stress management such as yoga or meditation",
        ]
    } else {
        [
            "Keep up your current routine, it is working",
            "Continue regular check-ups every 3-6 months",
            "Share what works for you with the community",
        ]
    }
}

/// `<label>-<month-day-year>.<extension>`, with separators made path-safe.
pub fn export_file_name(label: &str, date: NaiveDate, extension: &str) -> String {
    let date_part = date.format("%-m/%-d/%Y").to_string().replace('/', "-");
    let label = label.replace(['/', '\\'], "-");
    format!("{label}-{date_part}.{extension}")
}

pub fn render_markdown(report: &ReportDocument) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "# {}", report.title);
    let _ = writeln!(output, "{} - {}", APP_NAME, TAGLINE);
    let _ = writeln!(output, "Generated on {}", report.generated_on.format("%B %-d, %Y"));
    let _ = writeln!(output);

    let _ = writeln!(output, "## Overall Health Score");
    let _ = writeln!(
        output,
        "**{}%** ({})",
        report.overall.score, report.overall.badge
    );
    match &report.overall.category {
        Some(category) => {
            let _ = writeln!(output, "Latest assessment: {} severity", category);
        }
        None => {
            let _ = writeln!(output, "No assessment submitted this session.");
        }
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Health Metrics");
    let _ = writeln!(output, "| Metric | Value | Status |");
    let _ = writeln!(output, "| --- | --- | --- |");
    for row in report.metrics.iter() {
        let _ = writeln!(output, "| {} | {} | {} |", row.label, row.value, row.status);
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Weekly Trends");
    for trend in report.trends.iter() {
        let arrow = if trend.improving { "up" } else { "down" };
        let _ = writeln!(output, "- {} ({}): {}", trend.metric, arrow, trend.detail);
    }
    let _ = writeln!(output);

    let _ = writeln!(output, "## Recommendations");
    for line in report.recommendations.iter() {
        let _ = writeln!(output, "- {}", line);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 7).expect("valid date")
    }

    #[test]
    fn demo_snapshot_metrics_and_statuses() {
        let rows = metric_rows(&SymptomSnapshot::demo());
        let statuses: Vec<_> = rows.iter().map(|row| row.status).collect();
        assert_eq!(statuses, vec!["Good", "Excellent", "Great", "Stable", "Monitor"]);
        assert_eq!(rows[0].value, "2/7 days");
        assert_eq!(rows[3].value, "65 kg");
        assert_eq!(rows[4].tone, Tone::Neutral);
    }

    #[test]
    fn struggling_snapshot_needs_attention() {
        let snapshot = SymptomSnapshot {
            acne_days: 5,
            sleep_quality: 4,
            exercise_minutes: 10,
            weight: 72.5,
            mood: 7.5,
        };
        let rows = metric_rows(&snapshot);
        let statuses: Vec<_> = rows.iter().map(|row| row.status).collect();
        assert_eq!(statuses, vec!["Needs Attention", "Fair", "Increase", "Stable", "Positive"]);
        assert_eq!(rows[0].tone, Tone::Attention);
        assert_eq!(rows[2].tone, Tone::Attention);
        assert_eq!(rows[4].tone, Tone::Positive);
        assert_eq!(rows[4].value, "7.5/10");
    }

    #[test]
    fn recommendations_follow_score_bands() {
        assert_eq!(recommendations(59)[0], recommendations(10)[0]);
        assert_ne!(recommendations(59)[0], recommendations(60)[0]);
        assert_eq!(recommendations(60)[0], recommendations(79)[0]);
        assert_ne!(recommendations(79)[0], recommendations(80)[0]);
        assert_eq!(recommendations(80)[0], recommendations(100)[0]);
    }

    #[test]
    fn file_name_embeds_dashed_date() {
        assert_eq!(
            export_file_name("PCOD-Health-Report", report_date(), "pdf"),
            "PCOD-Health-Report-3-7-2026.pdf"
        );
        assert_eq!(
            export_file_name("team/weekly", report_date(), "md"),
            "team-weekly-3-7-2026.md"
        );
    }

    #[test]
    fn report_is_deterministic_for_unchanged_input() {
        let snapshot = SymptomSnapshot::demo();
        let category = SeverityCategory::Medium;
        let first = build_report(&snapshot, 78, Some(&category), report_date());
        let second = build_report(&snapshot, 78, Some(&category), report_date());
        assert_eq!(first, second);
        assert_eq!(render_markdown(&first), render_markdown(&second));
    }

    #[test]
    fn markdown_contains_every_section() {
        let report = build_report(&SymptomSnapshot::demo(), 78, None, report_date());
        let markdown = render_markdown(&report);
        assert!(markdown.contains("# PCOD Health Report"));
        assert!(markdown.contains("Generated on March 7, 2026"));
        assert!(markdown.contains("**78%** (Good)"));
        assert!(markdown.contains("No assessment submitted this session."));
        assert!(markdown.contains("| Sleep Quality | 7/10 | Excellent |"));
        assert!(markdown.contains("- Exercise (up): Up by 20 min/day"));
        assert!(markdown.contains("Build towards 30 minutes of exercise every day"));
    }
}
