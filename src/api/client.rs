use std::time::Duration;

use async_trait::async_trait;
use reqwest::{multipart, Response, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::TrackerApi;
use crate::config::Config;
use crate::dto::{
    ErrorResponse, MealRequest, MealsTodayResponse, NutritionLabelResponse, WeightRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::models::meal::MealEntry;
use crate::models::weight::WeightEntry;
use crate::platform::picker::PickedImage;

const LABEL_MIME: &str = "image/jpeg";

pub struct HttpTrackerApi {
    http: reqwest::Client,
    base_url: Url,
    upload_timeout: Duration,
}

impl HttpTrackerApi {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("macrotrack/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            upload_timeout: config.upload_timeout,
        })
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        let raw = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{raw}: {e}")))
    }
}

/// Turns a non-2xx response into `ApiError::Status`, keeping the backend's
/// `detail` text when it sent one.
async fn check(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.bytes().await.unwrap_or_default();
    let detail = serde_json::from_slice::<ErrorResponse>(&body)
        .ok()
        .and_then(|e| e.detail_text());

    Err(ApiError::Status { status, detail })
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    let body = response.bytes().await?;
    Ok(serde_json::from_slice(&body)?)
}

#[async_trait]
impl TrackerApi for HttpTrackerApi {
    async fn get_today_weight(&self) -> ApiResult<Option<WeightEntry>> {
        let url = self.endpoint("/weight/today")?;
        tracing::debug!(method = "GET", path = url.path(), "Fetching today's weight");

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = check(response).await?.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        Ok(serde_json::from_slice::<Option<WeightEntry>>(&body)?)
    }

    async fn get_today_meals(&self) -> ApiResult<MealsTodayResponse> {
        let url = self.endpoint("/meals/today")?;
        tracing::debug!(method = "GET", path = url.path(), "Fetching today's meals");

        let response = self.http.get(url).send().await?;
        decode(check(response).await?).await
    }

    async fn submit_weight(&self, weight: f64) -> ApiResult<()> {
        let url = self.endpoint("/weight")?;
        tracing::debug!(method = "POST", path = url.path(), weight, "Submitting weight");

        let response = self
            .http
            .post(url)
            .json(&WeightRequest { weight })
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn submit_meal(&self, meal: &MealEntry) -> ApiResult<()> {
        let url = self.endpoint("/meals")?;
        tracing::debug!(method = "POST", path = url.path(), name = %meal.name, "Submitting meal");

        let response = self
            .http
            .post(url)
            .json(&MealRequest::from(meal))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    async fn submit_nutrition_label(&self, image: PickedImage) -> ApiResult<NutritionLabelResponse> {
        let url = self.endpoint("/nutrition-label")?;
        tracing::debug!(
            method = "POST",
            path = url.path(),
            file_name = %image.file_name,
            bytes = image.bytes.len(),
            "Uploading nutrition label"
        );

        let part = multipart::Part::bytes(image.bytes.to_vec())
            .file_name(image.file_name)
            .mime_str(LABEL_MIME)?;
        let form = multipart::Form::new().part("image", part);

        let response = self
            .http
            .post(url)
            .multipart(form)
            .timeout(self.upload_timeout)
            .send()
            .await?;

        decode(check(response).await?).await
    }
}
