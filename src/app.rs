use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{Local, NaiveDate};

use crate::api::TrackerApi;
use crate::components::label_upload::{Alert, ImageSource, LabelUpload};
use crate::components::meal_entry::{MealForm, MEAL_FAILED};
use crate::components::meal_list;
use crate::components::weight_entry::WeightForm;
use crate::dto::MealsTodayResponse;
use crate::error::ApiResult;
use crate::models::meal::{DailyTotals, MealEntry};
use crate::models::weight::WeightEntry;
use crate::platform::picker::ImagePicker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryMode {
    #[default]
    Manual,
    Scan,
}

impl EntryMode {
    pub fn toggled(self) -> Self {
        match self {
            EntryMode::Manual => EntryMode::Scan,
            EntryMode::Scan => EntryMode::Manual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    WeightEntry,
    Main,
}

/// Today's snapshot of server state plus the local entry-mode toggle.
/// Nothing here outlives the process.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub today_weight: Option<f64>,
    pub is_loading: bool,
    pub meals: Vec<MealEntry>,
    pub totals: DailyTotals,
    pub entry_mode: EntryMode,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            today_weight: None,
            is_loading: true,
            meals: Vec::new(),
            totals: DailyTotals::default(),
            entry_mode: EntryMode::Manual,
        }
    }
}

type MealsFetch = Pin<Box<dyn Future<Output = ApiResult<MealsTodayResponse>> + Send>>;

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Root controller. Owns all screen state; each form owns its own
/// submission sub-state.
pub struct App {
    api: Arc<dyn TrackerApi>,
    picker: Arc<dyn ImagePicker>,
    today: fn() -> NaiveDate,
    state: AppState,
    pending_meals: Option<MealsFetch>,
    weight_form: WeightForm,
    meal_form: MealForm,
    label_upload: LabelUpload,
}

impl App {
    pub fn new(api: Arc<dyn TrackerApi>, picker: Arc<dyn ImagePicker>) -> Self {
        Self {
            api,
            picker,
            today: local_today,
            state: AppState::default(),
            pending_meals: None,
            weight_form: WeightForm::new(),
            meal_form: MealForm::new(),
            label_upload: LabelUpload::new(),
        }
    }

    /// Overrides the local calendar used for the weight freshness check.
    pub fn with_clock(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn screen(&self) -> Screen {
        if self.state.is_loading {
            Screen::Loading
        } else if self.state.today_weight.is_none() {
            Screen::WeightEntry
        } else {
            Screen::Main
        }
    }

    pub fn weight_form(&self) -> &WeightForm {
        &self.weight_form
    }

    pub fn weight_form_mut(&mut self) -> &mut WeightForm {
        &mut self.weight_form
    }

    pub fn meal_form(&self) -> &MealForm {
        &self.meal_form
    }

    pub fn meal_form_mut(&mut self) -> &mut MealForm {
        &mut self.meal_form
    }

    pub fn label_upload(&self) -> &LabelUpload {
        &self.label_upload
    }

    pub fn toggle_entry_mode(&mut self) {
        self.state.entry_mode = self.state.entry_mode.toggled();
    }

    /// Initial load. Weight and meals are requested together and each
    /// result lands in its own fields as soon as it arrives.
    ///
    /// Returns once the weight is known. A meals read still in flight at
    /// that point is kept and applied by [`App::settle_meals`].
    pub async fn mount(&mut self) {
        let api = Arc::clone(&self.api);
        let mut weight = api.get_today_weight();

        let mut meals: MealsFetch = {
            let api = Arc::clone(&self.api);
            Box::pin(async move { api.get_today_meals().await })
        };

        tokio::select! {
            result = &mut weight => {
                self.apply_weight(result);
                self.pending_meals = Some(meals);
            }
            result = &mut meals => {
                self.apply_meals(result);
                let result = weight.await;
                self.apply_weight(result);
            }
        }
    }

    pub fn has_pending_meals(&self) -> bool {
        self.pending_meals.is_some()
    }

    /// Waits for the initial meals read, if one is still outstanding.
    /// Cancel-safe: dropping this future leaves the read in place.
    pub async fn settle_meals(&mut self) {
        let Some(pending) = self.pending_meals.as_mut() else {
            return;
        };
        let result = pending.await;
        self.pending_meals = None;
        self.apply_meals(result);
    }

    pub async fn refresh_meals(&mut self) {
        // A newer read supersedes the initial one.
        self.pending_meals = None;
        let meals = self.api.get_today_meals().await;
        self.apply_meals(meals);
    }

    fn apply_weight(&mut self, result: ApiResult<Option<WeightEntry>>) {
        let today = (self.today)();
        match result {
            Ok(Some(entry)) if entry.is_for(today) => {
                self.state.today_weight = Some(entry.weight);
            }
            Ok(Some(entry)) => {
                tracing::info!(date = %entry.date, today = %today, "Ignoring weight from another day");
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Could not load today's weight");
            }
        }
        self.state.is_loading = false;
    }

    fn apply_meals(&mut self, result: ApiResult<MealsTodayResponse>) {
        let resp = result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not load today's meals");
            MealsTodayResponse::default()
        });
        self.state.totals = resp.totals();
        self.state.meals = resp.meals;
    }

    pub async fn submit_weight(&mut self) {
        let api = Arc::clone(&self.api);
        let submitted = self
            .weight_form
            .submit(|weight| async move { api.submit_weight(weight).await })
            .await;

        if let Some(weight) = submitted {
            self.state.today_weight = Some(weight);
        }
    }

    /// Manual meal entry. The list and totals are re-fetched after the
    /// backend acknowledges, never patched locally.
    pub async fn submit_meal(&mut self) {
        let api = Arc::clone(&self.api);
        let logged = self
            .meal_form
            .submit(|meal| async move { api.submit_meal(&meal).await })
            .await;

        if logged.is_some() {
            self.refresh_meals().await;
        }
    }

    /// Scans a nutrition label and logs it as a new meal through the same
    /// submit path as manual entry.
    pub async fn scan_label(&mut self, source: ImageSource) {
        let parsed = self
            .label_upload
            .scan(source, self.picker.as_ref(), self.api.as_ref())
            .await;
        let Some(meal) = parsed else {
            return;
        };

        match self.api.submit_meal(&meal).await {
            Ok(()) => self.refresh_meals().await,
            Err(e) => {
                tracing::warn!(error = %e, meal = %meal.name, "Scanned meal submission failed");
                self.label_upload.set_alert(Alert::error(MEAL_FAILED));
            }
        }
    }

    pub fn render(&self) -> String {
        match self.screen() {
            Screen::Loading => "Loading...\n".to_string(),
            Screen::WeightEntry => self.weight_form.render(),
            Screen::Main => self.render_main(),
        }
    }

    fn render_main(&self) -> String {
        let mut out = String::from("Today's Weight\n");
        if let Some(weight) = self.state.today_weight {
            out.push_str(&format!("  {weight} lbs\n"));
        }

        out.push_str("\n----------------------------------------\n");
        let (manual, scan) = match self.state.entry_mode {
            EntryMode::Manual => ("[Manual Entry]", "Scan Label"),
            EntryMode::Scan => ("Manual Entry", "[Scan Label]"),
        };
        out.push_str(&format!("{manual}  {scan}\n\n"));
        match self.state.entry_mode {
            EntryMode::Manual => out.push_str(&self.meal_form.render()),
            EntryMode::Scan => out.push_str(&self.label_upload.render()),
        }

        out.push_str("----------------------------------------\n");
        out.push_str(&meal_list::render(&self.state.meals, &self.state.totals));
        out
    }
}
