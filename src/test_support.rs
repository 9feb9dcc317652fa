//! In-memory backend and picker used by controller and component tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::NaiveDate;
use reqwest::StatusCode;
use tokio::sync::{Mutex, Notify};

use crate::api::TrackerApi;
use crate::dto::{MealRequest, MealsTodayResponse, NutritionLabelResponse};
use crate::error::{ApiError, ApiResult, PickError};
use crate::models::meal::MealEntry;
use crate::models::weight::WeightEntry;
use crate::platform::picker::{ImagePicker, PermissionStatus, PickedImage};

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetWeight,
    GetMeals,
    SubmitWeight(f64),
    SubmitMeal(MealRequest),
    UploadLabel(String),
}

/// Behaves like the tracker backend: stores meals scaled by servings and
/// sums them on read.
///
/// A read with a gate set does not answer until the gate is notified.
#[derive(Default)]
pub struct FakeBackend {
    pub weight: Mutex<Option<WeightEntry>>,
    pub meals: Mutex<Vec<MealEntry>>,
    pub reads_fail: bool,
    pub writes_fail: bool,
    pub label_status: Option<StatusCode>,
    pub weight_gate: Option<Arc<Notify>>,
    pub meals_gate: Option<Arc<Notify>>,
    pub calls: Mutex<Vec<Call>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weight(self, weight: f64, date: NaiveDate) -> Self {
        Self {
            weight: Mutex::new(Some(WeightEntry { weight, date })),
            ..self
        }
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.calls.lock().await.clone()
    }

    pub async fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().await.iter().filter(|c| pred(c)).count()
    }

    /// Holds the weight read until the returned gate is notified.
    pub fn hold_weight(self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let backend = Self {
            weight_gate: Some(gate.clone()),
            ..self
        };
        (backend, gate)
    }

    pub fn hold_meals(self) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let backend = Self {
            meals_gate: Some(gate.clone()),
            ..self
        };
        (backend, gate)
    }

    async fn record(&self, call: Call) {
        self.calls.lock().await.push(call);
    }

    fn unavailable() -> ApiError {
        ApiError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            detail: None,
        }
    }
}

#[async_trait]
impl TrackerApi for FakeBackend {
    async fn get_today_weight(&self) -> ApiResult<Option<WeightEntry>> {
        self.record(Call::GetWeight).await;
        if let Some(gate) = &self.weight_gate {
            gate.notified().await;
        }
        if self.reads_fail {
            return Err(Self::unavailable());
        }
        Ok(self.weight.lock().await.clone())
    }

    async fn get_today_meals(&self) -> ApiResult<MealsTodayResponse> {
        self.record(Call::GetMeals).await;
        if let Some(gate) = &self.meals_gate {
            gate.notified().await;
        }
        if self.reads_fail {
            return Err(Self::unavailable());
        }

        let meals = self.meals.lock().await.clone();
        Ok(MealsTodayResponse {
            total_protein: meals.iter().map(|m| m.protein).sum(),
            total_carbs: meals.iter().map(|m| m.carbs).sum(),
            total_fat: meals.iter().map(|m| m.fat).sum(),
            total_calories: meals.iter().map(|m| m.calories).sum(),
            meals,
        })
    }

    async fn submit_weight(&self, weight: f64) -> ApiResult<()> {
        self.record(Call::SubmitWeight(weight)).await;
        if self.writes_fail {
            return Err(Self::unavailable());
        }
        *self.weight.lock().await = Some(WeightEntry {
            weight,
            date: fixed_today(),
        });
        Ok(())
    }

    async fn submit_meal(&self, meal: &MealEntry) -> ApiResult<()> {
        self.record(Call::SubmitMeal(MealRequest::from(meal))).await;
        if self.writes_fail {
            return Err(Self::unavailable());
        }
        self.meals.lock().await.push(MealEntry {
            name: meal.name.clone(),
            protein: meal.protein * meal.servings,
            carbs: meal.carbs * meal.servings,
            fat: meal.fat * meal.servings,
            calories: meal.calories * meal.servings,
            servings: meal.servings,
        });
        Ok(())
    }

    async fn submit_nutrition_label(&self, image: PickedImage) -> ApiResult<NutritionLabelResponse> {
        self.record(Call::UploadLabel(image.file_name)).await;
        if let Some(status) = self.label_status {
            return Err(ApiError::Status {
                status,
                detail: None,
            });
        }
        Ok(NutritionLabelResponse {
            name: "Scanned Label".into(),
            protein_per_serving: 3.0,
            carbs_per_serving: 20.0,
            fat_per_serving: 1.0,
            calories_per_serving: 100.0,
            servings: 1.0,
        })
    }
}

pub struct StubPicker {
    pub permission: PermissionStatus,
    pub image: Option<PickedImage>,
    pub fail: bool,
    pub launches: AtomicUsize,
}

impl StubPicker {
    pub fn with_image() -> Self {
        Self {
            permission: PermissionStatus::Granted,
            image: Some(PickedImage {
                file_name: "label.jpg".into(),
                bytes: Bytes::from_static(b"jpeg"),
            }),
            fail: false,
            launches: AtomicUsize::new(0),
        }
    }

    pub fn launches(&self) -> usize {
        self.launches.load(Ordering::SeqCst)
    }

    fn launch(&self) -> Result<Option<PickedImage>, PickError> {
        self.launches.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(PickError::Camera("capture failed".into()));
        }
        Ok(self.image.clone())
    }
}

#[async_trait]
impl ImagePicker for StubPicker {
    async fn request_camera_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn launch_camera(&self) -> Result<Option<PickedImage>, PickError> {
        self.launch()
    }

    async fn launch_library(&self) -> Result<Option<PickedImage>, PickError> {
        self.launch()
    }
}
