use std::future::Future;

use validator::Validate;

use super::{parse_number, FormPhase, StatusMessage};
use crate::error::ApiResult;
use crate::models::meal::MealEntry;

pub const INVALID_MEAL: &str = "Please fill all fields with valid numbers.";
pub const MEAL_LOGGED: &str = "Meal logged!";
pub const MEAL_FAILED: &str = "Failed to log meal.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MealField {
    Name,
    Protein,
    Carbs,
    Fat,
    Calories,
    Servings,
}

impl MealField {
    pub const ALL: [MealField; 6] = [
        MealField::Name,
        MealField::Protein,
        MealField::Carbs,
        MealField::Fat,
        MealField::Calories,
        MealField::Servings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MealField::Name => "Meal Name",
            MealField::Protein => "Protein per Serving",
            MealField::Carbs => "Carbs per Serving",
            MealField::Fat => "Fat per Serving",
            MealField::Calories => "Calories per Serving",
            MealField::Servings => "Servings",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Default)]
pub struct MealForm {
    fields: [String; 6],
    phase: FormPhase,
    status: Option<StatusMessage>,
}

impl MealForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(&self, field: MealField) -> &str {
        &self.fields[field.index()]
    }

    pub fn set_field(&mut self, field: MealField, value: impl Into<String>) {
        self.fields[field.index()] = value.into();
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    /// Disabled while any field is blank.
    pub fn can_submit(&self) -> bool {
        self.phase != FormPhase::Submitting && self.fields.iter().all(|f| !f.trim().is_empty())
    }

    /// Builds a meal from the current inputs, or `None` if any numeric field
    /// does not parse or the name is empty.
    pub fn parse(&self) -> Option<MealEntry> {
        let number = |field: MealField| parse_number(self.field(field));

        let meal = MealEntry {
            name: self.field(MealField::Name).trim().to_string(),
            protein: number(MealField::Protein)?,
            carbs: number(MealField::Carbs)?,
            fat: number(MealField::Fat)?,
            calories: number(MealField::Calories)?,
            servings: number(MealField::Servings)?,
        };

        meal.validate().ok().map(|_| meal)
    }

    pub async fn submit<F, Fut>(&mut self, on_submit: F) -> Option<MealEntry>
    where
        F: FnOnce(MealEntry) -> Fut,
        Fut: Future<Output = ApiResult<()>>,
    {
        if !self.can_submit() {
            return None;
        }

        let Some(meal) = self.parse() else {
            self.status = Some(StatusMessage::error(INVALID_MEAL));
            return None;
        };

        self.phase = FormPhase::Submitting;
        let result = on_submit(meal.clone()).await;
        self.phase = FormPhase::Editing;

        match result {
            Ok(()) => {
                self.status = Some(StatusMessage::info(MEAL_LOGGED));
                self.fields.iter_mut().for_each(String::clear);
                Some(meal)
            }
            Err(e) => {
                tracing::warn!(error = %e, meal = %meal.name, "Meal submission failed");
                self.status = Some(StatusMessage::error(MEAL_FAILED));
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Log a Meal\n");
        for field in MealField::ALL {
            out.push_str(&format!("  {}: {}\n", field.label(), self.field(field)));
        }
        if let Some(status) = &self.status {
            out.push_str(&status.text);
            out.push('\n');
        }
        out
    }
}
