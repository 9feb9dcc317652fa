use crate::models::meal::{DailyTotals, MealEntry};

pub const NO_MEALS: &str = "No meals logged today.";

/// Renders meals in the order received, followed by the daily totals.
pub fn render(meals: &[MealEntry], totals: &DailyTotals) -> String {
    let mut out = String::from("Today's Meals\n");

    if meals.is_empty() {
        out.push_str(NO_MEALS);
        out.push('\n');
    } else {
        for meal in meals {
            out.push_str(&format!(
                "  {}\n    Protein: {}g, Carbs: {}g, Fat: {}g\n    Calories: {}, Servings: {}\n",
                meal.name, meal.protein, meal.carbs, meal.fat, meal.calories, meal.servings
            ));
        }
    }

    out.push_str("\nDaily Totals\n");
    out.push_str(&format!(
        "  Protein: {}g \u{2022} Carbs: {}g \u{2022} Fat: {}g\n  Calories: {}\n",
        totals.protein, totals.carbs, totals.fat, totals.calories
    ));
    out
}
