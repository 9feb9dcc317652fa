use async_trait::async_trait;

use crate::dto::{MealsTodayResponse, NutritionLabelResponse};
use crate::error::ApiResult;
use crate::models::meal::MealEntry;
use crate::models::weight::WeightEntry;
use crate::platform::picker::PickedImage;

pub mod client;

pub use client::HttpTrackerApi;

/// The tracker backend. One method per endpoint; no caching or retries.
#[async_trait]
pub trait TrackerApi: Send + Sync {
    /// GET /weight/today. `Ok(None)` when no row exists for the server's today.
    async fn get_today_weight(&self) -> ApiResult<Option<WeightEntry>>;

    /// GET /meals/today
    async fn get_today_meals(&self) -> ApiResult<MealsTodayResponse>;

    /// POST /weight
    async fn submit_weight(&self, weight: f64) -> ApiResult<()>;

    /// POST /meals, renamed to the per-serving wire shape.
    async fn submit_meal(&self, meal: &MealEntry) -> ApiResult<()>;

    /// POST /nutrition-label as multipart. Bounded by the upload timeout.
    async fn submit_nutrition_label(&self, image: PickedImage) -> ApiResult<NutritionLabelResponse>;
}
