use std::future::Future;

use super::{parse_number, FormPhase, StatusMessage};
use crate::error::ApiResult;

pub const INVALID_WEIGHT: &str = "Please enter a valid weight.";
pub const WEIGHT_SUBMITTED: &str = "Weight submitted!";
pub const WEIGHT_FAILED: &str = "Failed to submit weight.";

#[derive(Debug, Default)]
pub struct WeightForm {
    input: String,
    phase: FormPhase,
    status: Option<StatusMessage>,
}

impl WeightForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, value: impl Into<String>) {
        self.input = value.into();
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// The submit button is disabled while the input is blank.
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty() && self.phase != FormPhase::Submitting
    }

    /// Validates locally, then hands the weight to `on_submit`. Returns the
    /// weight once the backend acknowledged it. Invalid input never reaches
    /// `on_submit`.
    pub async fn submit<F, Fut>(&mut self, on_submit: F) -> Option<f64>
    where
        F: FnOnce(f64) -> Fut,
        Fut: Future<Output = ApiResult<()>>,
    {
        if !self.can_submit() {
            return None;
        }

        let Some(weight) = parse_number(&self.input) else {
            self.status = Some(StatusMessage::error(INVALID_WEIGHT));
            return None;
        };

        self.phase = FormPhase::Submitting;
        let result = on_submit(weight).await;
        self.phase = FormPhase::Editing;

        match result {
            Ok(()) => {
                self.status = Some(StatusMessage::info(WEIGHT_SUBMITTED));
                self.input.clear();
                Some(weight)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Weight submission failed");
                self.status = Some(StatusMessage::error(WEIGHT_FAILED));
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Enter Today's Weight\n");
        out.push_str(&format!("Weight: {}\n", self.input));
        if let Some(status) = &self.status {
            out.push_str(&status.text);
            out.push('\n');
        }
        out
    }
}
