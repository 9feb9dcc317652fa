//! # MacroTrack — Wire DTOs
//!
//! Every JSON shape exchanged with the tracker backend lives here.
//!
//! Conventions:
//! - `*Request`  → serialized into an outbound request body
//! - `*Response` → deserialized from a backend response body
//! - The UI's `protein/carbs/fat/calories` become `*_per_serving` on the
//!   way out and come back as bare names from the list endpoint
//! - Serde defaults stand in for fields the backend may omit

use serde::{Deserialize, Serialize};

use crate::models::meal::{DailyTotals, MealEntry};

// ============================================================================
// Weight
// ============================================================================

/// POST /weight
#[derive(Debug, Serialize)]
pub struct WeightRequest {
    pub weight: f64,
}

// ============================================================================
// Meals
// ============================================================================

/// POST /meals
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MealRequest {
    pub name: String,
    pub protein_per_serving: f64,
    pub carbs_per_serving: f64,
    pub fat_per_serving: f64,
    pub calories_per_serving: f64,
    pub servings: f64,
}

impl From<&MealEntry> for MealRequest {
    fn from(meal: &MealEntry) -> Self {
        Self {
            name: meal.name.clone(),
            protein_per_serving: meal.protein,
            carbs_per_serving: meal.carbs,
            fat_per_serving: meal.fat,
            calories_per_serving: meal.calories,
            servings: meal.servings,
        }
    }
}

/// GET /meals/today
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MealsTodayResponse {
    #[serde(default)]
    pub meals: Vec<MealEntry>,
    #[serde(default)]
    pub total_protein: f64,
    #[serde(default)]
    pub total_carbs: f64,
    #[serde(default)]
    pub total_fat: f64,
    #[serde(default)]
    pub total_calories: f64,
}

impl MealsTodayResponse {
    pub fn totals(&self) -> DailyTotals {
        DailyTotals {
            protein: self.total_protein,
            carbs: self.total_carbs,
            fat: self.total_fat,
            calories: self.total_calories,
        }
    }
}

// ============================================================================
// Nutrition label
// ============================================================================

/// POST /nutrition-label
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NutritionLabelResponse {
    pub name: String,
    pub protein_per_serving: f64,
    pub carbs_per_serving: f64,
    pub fat_per_serving: f64,
    pub calories_per_serving: f64,
    pub servings: f64,
}

impl From<NutritionLabelResponse> for MealEntry {
    fn from(parsed: NutritionLabelResponse) -> Self {
        Self {
            name: parsed.name,
            protein: parsed.protein_per_serving,
            carbs: parsed.carbs_per_serving,
            fat: parsed.fat_per_serving,
            calories: parsed.calories_per_serving,
            servings: parsed.servings,
        }
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Error envelope the backend sends with non-2xx responses: `{"detail": ...}`.
/// `detail` is not always a string (validation errors send a list), so it is
/// kept loose and only used when it is one.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn detail_text(&self) -> Option<String> {
        self.detail
            .as_ref()
            .and_then(|d| d.as_str())
            .map(str::to_owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_request_renames_fields_per_serving() {
        let meal = MealEntry {
            name: "Eggs".into(),
            protein: 12.0,
            carbs: 1.0,
            fat: 10.0,
            calories: 140.0,
            servings: 2.0,
        };
        let json = serde_json::to_value(MealRequest::from(&meal)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "Eggs",
                "protein_per_serving": 12.0,
                "carbs_per_serving": 1.0,
                "fat_per_serving": 10.0,
                "calories_per_serving": 140.0,
                "servings": 2.0,
            })
        );
        assert!(json.get("protein").is_none());
    }

    #[test]
    fn test_meals_today_missing_fields_default_to_empty() {
        let resp: MealsTodayResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.meals.is_empty());
        assert_eq!(resp.totals(), DailyTotals::default());
    }

    #[test]
    fn test_meals_today_totals_mapping() {
        let json = r#"{
            "meals": [{"name":"Oats","protein":5,"carbs":27,"fat":3,"calories":150,"servings":1}],
            "total_protein": 5, "total_carbs": 27, "total_fat": 3, "total_calories": 150
        }"#;
        let resp: MealsTodayResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.meals.len(), 1);
        let totals = resp.totals();
        assert_eq!(totals.carbs, 27.0);
        assert_eq!(totals.calories, 150.0);
    }

    #[test]
    fn test_label_response_maps_to_bare_macro_names() {
        let parsed = NutritionLabelResponse {
            name: "Scanned Label".into(),
            protein_per_serving: 8.0,
            carbs_per_serving: 30.0,
            fat_per_serving: 2.5,
            calories_per_serving: 170.0,
            servings: 1.0,
        };
        let meal = MealEntry::from(parsed);
        assert_eq!(meal.name, "Scanned Label");
        assert_eq!(meal.protein, 8.0);
        assert_eq!(meal.carbs, 30.0);
        assert_eq!(meal.fat, 2.5);
        assert_eq!(meal.calories, 170.0);
        assert_eq!(meal.servings, 1.0);
    }

    #[test]
    fn test_error_detail_only_used_when_text() {
        let text: ErrorResponse = serde_json::from_str(r#"{"detail":"Empty image file"}"#).unwrap();
        assert_eq!(text.detail_text().as_deref(), Some("Empty image file"));

        let list: ErrorResponse = serde_json::from_str(r#"{"detail":[{"loc":["body"]}]}"#).unwrap();
        assert!(list.detail_text().is_none());
    }
}
