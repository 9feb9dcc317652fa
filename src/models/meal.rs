use serde::{Deserialize, Serialize};
use validator::Validate;

/// One logged meal as the UI sees it: bare macro names, already scaled by
/// servings when it comes back from the list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MealEntry {
    #[validate(length(min = 1, message = "Meal name is required"))]
    pub name: String,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
    pub servings: f64,
}

/// Server-computed sums over today's meals. Always replaced wholesale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyTotals {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub calories: f64,
}
