use std::path::PathBuf;

use anyhow::Context;
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use tracing::info;

mod config;
mod export;
mod fallback;
mod journal;
mod models;
mod predict;
mod report;
mod risk;
mod session;
mod streak;
mod telemetry;

use config::AppConfig;
use export::ExportFormat;
use models::{Assessment, FactorForm, SeverityCategory, SymptomSnapshot};
use predict::HttpPredictor;
use session::Session;
use streak::ExercisePlan;

#[derive(Parser)]
#[command(name = "wellness-pulse")]
#[command(about = "PCOD wellness scoring, severity assessment and health reports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the local health score for a snapshot or journal
    Score {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },
    /// Submit health factors to the prediction endpoint
    Assess {
        #[command(flatten)]
        factors: FactorArgs,
        /// CSV symptom journal whose latest entry seeds the session
        #[arg(long)]
        journal: Option<PathBuf>,
        /// Override the configured prediction endpoint
        #[arg(long)]
        endpoint: Option<String>,
        /// Export a report once the assessment completes
        #[arg(long = "report")]
        with_report: bool,
        #[arg(long, value_enum, default_value_t = ExportFormat::Pdf)]
        format: ExportFormat,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Export a health report for a snapshot
    Report {
        #[command(flatten)]
        snapshot: SnapshotArgs,
        #[arg(long, value_enum, default_value_t = ExportFormat::Pdf)]
        format: ExportFormat,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Walk the demo exercise plan
    Streak {
        /// Number of days to complete
        #[arg(long, default_value_t = 0)]
        complete: u32,
    },
}

#[derive(Args)]
struct SnapshotArgs {
    #[arg(long, default_value_t = 2)]
    acne_days: i32,
    #[arg(long, default_value_t = 7)]
    sleep_quality: i32,
    #[arg(long, default_value_t = 30)]
    exercise_minutes: i32,
    #[arg(long, default_value_t = 65.0)]
    weight: f64,
    #[arg(long, default_value_t = 6.0)]
    mood: f64,
    /// CSV symptom journal; its latest entry replaces the flags above
    #[arg(long)]
    journal: Option<PathBuf>,
}

impl SnapshotArgs {
    fn to_snapshot(&self) -> SymptomSnapshot {
        SymptomSnapshot {
            acne_days: self.acne_days,
            sleep_quality: self.sleep_quality,
            exercise_minutes: self.exercise_minutes,
            weight: self.weight,
            mood: self.mood,
        }
    }

    fn resolve(&self) -> anyhow::Result<SymptomSnapshot> {
        match &self.journal {
            Some(path) => Ok(journal::load_latest(path)?.snapshot),
            None => Ok(self.to_snapshot()),
        }
    }
}

/// Raw form values; parsed and validated at submission.
#[derive(Args)]
struct FactorArgs {
    #[arg(long, default_value = "")]
    age: String,
    #[arg(long, default_value = "")]
    bmi: String,
    #[arg(long, default_value = "")]
    cycle_length: String,
    #[arg(long, default_value = "")]
    acne_days: String,
    #[arg(long, default_value = "")]
    weight_gain: String,
    #[arg(long, default_value = "")]
    hormone_level: String,
    #[arg(long, default_value = "")]
    exercise_today: String,
    #[arg(long, default_value = "")]
    sleep_quality: String,
}

impl FactorArgs {
    fn into_form(self) -> FactorForm {
        FactorForm {
            age: self.age,
            bmi: self.bmi,
            cycle_length: self.cycle_length,
            acne_days: self.acne_days,
            weight_gain: self.weight_gain,
            hormone_level: self.hormone_level,
            exercise_today: self.exercise_today,
            sleep_quality: self.sleep_quality,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load().context("invalid configuration")?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Commands::Score { snapshot } => {
            if let Some(path) = &snapshot.journal {
                let entries = journal::load_csv(path)?;
                println!("Daily health scores:");
                for entry in entries.iter() {
                    let score = risk::compute_score(&entry.snapshot);
                    println!("- {} score {}% ({})", entry.date, score, risk::score_badge(score));
                }
                return Ok(());
            }

            let score = risk::compute_score(&snapshot.to_snapshot());
            println!("Health score {}% ({})", score, risk::score_badge(score));
        }
        Commands::Assess {
            factors,
            journal: journal_path,
            endpoint,
            with_report,
            format,
            out_dir,
        } => {
            let endpoint = endpoint.unwrap_or_else(|| config.predictor.endpoint.clone());
            let predictor = HttpPredictor::new(endpoint, config.predictor.timeout)?;
            info!(endpoint = predictor.endpoint(), "assessing");

            let snapshot = match &journal_path {
                Some(path) => journal::load_latest(path)?.snapshot,
                None => SymptomSnapshot::demo(),
            };
            let mut session = Session::new(predictor, snapshot);
            session.open_form(factors.into_form());
            let notification = session.submit().await?;
            println!("{}", notification.message);

            let mut category: Option<SeverityCategory> = None;
            if let Some(assessment) = session.last_assessment() {
                match assessment {
                    Assessment::Fallback { cause, .. } => {
                        println!("Source: local estimate (prediction endpoint unavailable)");
                        println!("Cause: {cause}");
                    }
                    Assessment::Remote(_) => println!("Source: prediction endpoint"),
                }
                if let Some(insights) = assessment.insights().filter(|text| !text.is_empty()) {
                    println!("Insights: {insights}");
                }
                println!("Severity score: {}", assessment.score());
                category = Some(assessment.category().clone());
            }
            println!("Mood updated to {}/10", session.snapshot().mood);

            if with_report {
                let snapshot = session.snapshot();
                let document = report::build_report(
                    snapshot,
                    risk::compute_score(snapshot),
                    category.as_ref(),
                    Local::now().date_naive(),
                );
                let dir = out_dir.unwrap_or_else(|| config.report.directory.clone());
                let path = export::export_report(&document, &config.report.label, &dir, format)?;
                println!("Report written to {}.", path.display());
            }
        }
        Commands::Report {
            snapshot,
            format,
            out_dir,
        } => {
            let snapshot = snapshot.resolve()?;
            let document = report::build_report(
                &snapshot,
                risk::compute_score(&snapshot),
                None,
                Local::now().date_naive(),
            );
            let dir = out_dir.unwrap_or_else(|| config.report.directory.clone());
            let path = export::export_report(&document, &config.report.label, &dir, format)?;
            println!("Report written to {}.", path.display());
        }
        Commands::Streak { complete } => {
            let mut plan = ExercisePlan::demo();
            for _ in 0..complete {
                match plan.complete_current_day() {
                    Some(coins) => println!("Day complete, +{coins} coins"),
                    None => {
                        println!("This week's plan is already finished.");
                        break;
                    }
                }
            }

            println!(
                "Streak {} days, {} coins, {:.0}% of the week done",
                plan.streak,
                plan.total_coins,
                plan.progress_percent()
            );
            if let Some(day) = plan.current_day() {
                println!("Up next: day {} ({} coins)", day.day, day.coins);
            }
        }
    }

    Ok(())
}
