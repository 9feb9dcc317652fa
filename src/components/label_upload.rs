use reqwest::StatusCode;

use crate::api::TrackerApi;
use crate::error::ApiError;
use crate::models::meal::MealEntry;
use crate::platform::picker::{ImagePicker, PermissionStatus};

pub const PARSE_SUCCEEDED: &str = "Nutrition label parsed successfully!";
pub const INVALID_IMAGE: &str = "Invalid image format or empty image. Please try again.";
pub const UNREADABLE_IMAGE: &str =
    "Failed to process image. Please ensure the image is clear and contains readable nutrition information.";
pub const NETWORK_ERROR: &str =
    "Network error: Unable to connect to server. Please check your connection.";
pub const PARSE_FAILED: &str =
    "Failed to parse nutrition label. Please try again or enter manually.";
pub const CAMERA_PERMISSION_REQUIRED: &str = "Camera permission is required to take photos";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    Camera,
    Library,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadPhase {
    #[default]
    Idle,
    Picking,
    Uploading,
}

/// Modal title + message, the terminal rendition of a platform alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new("Error", message)
    }
}

/// User-facing text for a failed label upload, by what came back.
pub fn upload_error_message(err: &ApiError) -> String {
    match err {
        ApiError::Status { status, detail } if *status == StatusCode::BAD_REQUEST => detail
            .clone()
            .unwrap_or_else(|| INVALID_IMAGE.to_string()),
        ApiError::Status { status, .. } if *status == StatusCode::INTERNAL_SERVER_ERROR => {
            UNREADABLE_IMAGE.to_string()
        }
        ApiError::Status { status, detail } => format!(
            "Server error: {} - {}",
            status.as_u16(),
            detail.as_deref().unwrap_or("Unknown error")
        ),
        ApiError::Transport(_) => NETWORK_ERROR.to_string(),
        ApiError::Decode(_) | ApiError::InvalidUrl(_) => PARSE_FAILED.to_string(),
    }
}

#[derive(Debug, Default)]
pub struct LabelUpload {
    phase: UploadPhase,
    alert: Option<Alert>,
}

impl LabelUpload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        self.phase
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn set_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn is_busy(&self) -> bool {
        self.phase != UploadPhase::Idle
    }

    /// Picks an image, uploads it and returns the parsed label as a meal.
    /// Always ends back in `Idle`; failures leave an alert instead of a meal.
    pub async fn scan(
        &mut self,
        source: ImageSource,
        picker: &dyn ImagePicker,
        api: &dyn TrackerApi,
    ) -> Option<MealEntry> {
        self.alert = None;

        let meal = self.run(source, picker, api).await;
        self.phase = UploadPhase::Idle;
        meal
    }

    async fn run(
        &mut self,
        source: ImageSource,
        picker: &dyn ImagePicker,
        api: &dyn TrackerApi,
    ) -> Option<MealEntry> {
        self.phase = UploadPhase::Picking;

        let picked = match source {
            ImageSource::Camera => {
                if picker.request_camera_permission().await != PermissionStatus::Granted {
                    self.alert = Some(Alert::new("Permission needed", CAMERA_PERMISSION_REQUIRED));
                    return None;
                }
                picker.launch_camera().await
            }
            ImageSource::Library => picker.launch_library().await,
        };

        let image = match picked {
            Ok(Some(image)) => image,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(error = %e, source = ?source, "Image pick failed");
                let message = match source {
                    ImageSource::Camera => "Failed to take photo",
                    ImageSource::Library => "Failed to pick image",
                };
                self.alert = Some(Alert::error(message));
                return None;
            }
        };

        self.phase = UploadPhase::Uploading;
        match api.submit_nutrition_label(image).await {
            Ok(parsed) => {
                self.alert = Some(Alert::new("Success", PARSE_SUCCEEDED));
                Some(MealEntry::from(parsed))
            }
            Err(e) => {
                tracing::warn!(error = %e, status = ?e.status(), "Nutrition label upload failed");
                self.alert = Some(Alert::error(upload_error_message(&e)));
                None
            }
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::from(
            "Take a photo or select an image of a nutrition label to automatically parse the nutrition information.\n",
        );
        if self.is_busy() {
            out.push_str("Parsing nutrition label...\n");
        } else {
            out.push_str("[c] Take Photo   [g] Choose Image\n");
        }
        if let Some(alert) = &self.alert {
            out.push_str(&format!("{}: {}\n", alert.title, alert.message));
        }
        out
    }
}
