use tracing::{info, warn};

use crate::fallback;
use crate::models::{
    Assessment, AssessmentFactors, FactorError, FactorForm, Notification, SymptomSnapshot,
};
use crate::predict::Predictor;

/// Owns the session snapshot. Assessments are the only writer.
#[derive(Debug, Clone, Default)]
pub struct SymptomStore {
    snapshot: SymptomSnapshot,
}

impl SymptomStore {
    pub fn new(snapshot: SymptomSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &SymptomSnapshot {
        &self.snapshot
    }

    pub fn record(&mut self, assessment: &Assessment) {
        self.snapshot.mood = assessment.score() as f64 / 10.0;
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no assessment form is open")]
    NoPendingForm,
    #[error(transparent)]
    InvalidFactors(#[from] FactorError),
}

/// Asks the predictor first and falls back to the local heuristic on any
/// failure. Never fails; the tag on the result says which path answered.
pub async fn assess<P: Predictor>(predictor: &P, factors: &AssessmentFactors) -> Assessment {
    match predictor.predict(factors).await {
        Ok(result) => {
            info!(category = %result.category, score = result.score, "remote assessment received");
            Assessment::Remote(result)
        }
        Err(cause) => {
            let result = fallback::mock_severity(factors);
            warn!(
                error = %cause,
                category = %result.category,
                score = result.score,
                "prediction endpoint unavailable, using local estimate"
            );
            Assessment::Fallback { result, cause }
        }
    }
}

/// One user session: the snapshot, the pending form and the latest outcome.
///
/// `submit` borrows the session mutably for the whole request, so a second
/// submission cannot start while one is in flight.
pub struct Session<P> {
    predictor: P,
    store: SymptomStore,
    form: Option<FactorForm>,
    last: Option<Assessment>,
}

impl<P: Predictor> Session<P> {
    pub fn new(predictor: P, snapshot: SymptomSnapshot) -> Self {
        Self {
            predictor,
            store: SymptomStore::new(snapshot),
            form: None,
            last: None,
        }
    }

    pub fn snapshot(&self) -> &SymptomSnapshot {
        self.store.snapshot()
    }

    pub fn open_form(&mut self, form: FactorForm) {
        self.form = Some(form);
    }

    #[cfg(test)]
    pub fn form(&self) -> Option<&FactorForm> {
        self.form.as_ref()
    }

    pub fn last_assessment(&self) -> Option<&Assessment> {
        self.last.as_ref()
    }

    /// Validation failures leave the form open; every other path completes,
    /// updates mood and closes the form.
    pub async fn submit(&mut self) -> Result<Notification, SubmitError> {
        let form = self.form.as_ref().ok_or(SubmitError::NoPendingForm)?;
        let factors = AssessmentFactors::parse(form)?;

        info!("assessment submitted");
        let assessment = assess(&self.predictor, &factors).await;

        self.store.record(&assessment);
        self.form = None;
        let notification = Notification::for_assessment(&assessment);
        self.last = Some(assessment);

        Ok(notification)
    }
}
