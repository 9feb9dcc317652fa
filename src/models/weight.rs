use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    pub weight: f64,
    pub date: NaiveDate,
}

impl WeightEntry {
    /// A row only counts for today if the server's date matches the local
    /// calendar date.
    pub fn is_for(&self, today: NaiveDate) -> bool {
        self.date == today
    }
}
