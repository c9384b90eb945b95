use crate::config::Config;
use crate::data::regions::{region_index, REGIONS};
use crate::data::samples::{self, FEEDBACK, MARKET_PRICES, SOIL_SAMPLES};
use crate::error::Result;
use crate::logic::chatbot::{Chatbot, QUICK_QUESTIONS};
use crate::logic::search::{markets, MarketFilter};
use crate::logic::{ConditionsAdvisor, ConnectionStatus};
use crate::models::{
    CropForm, EnvironmentReading, Feedback, FeedbackCategory, FeedbackField, FeedbackForm,
    FieldAlert, FormField, Pest, PredictionRequest, PredictionResult, RegionalRecommendation,
    SoilReading, SoilSample, WeatherForecast,
};
use chrono::Local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Weather,
    Soil,
    Crops,
    Pests,
    Market,
    Chat,
    Feedback,
}

impl Screen {
    pub fn from_key(c: char) -> Option<Self> {
        match c {
            '1' => Some(Screen::Dashboard),
            '2' => Some(Screen::Weather),
            '3' => Some(Screen::Soil),
            '4' => Some(Screen::Crops),
            '5' => Some(Screen::Pests),
            '6' => Some(Screen::Market),
            '7' => Some(Screen::Chat),
            '8' => Some(Screen::Feedback),
            _ => None,
        }
    }
}

/// Monotonic request counter. Results carry the generation they were
/// requested under and are dropped unless it is still the latest.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: u64,
}

impl RequestTracker {
    pub fn bump(&mut self) -> u64 {
        self.current += 1;
        self.current
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_current(&self, generation: u64) -> bool {
        generation == self.current
    }
}

pub struct RegionState {
    pub selected: usize,
}

impl RegionState {
    pub fn new(default_region: &str) -> Self {
        Self {
            selected: region_index(default_region).unwrap_or(0),
        }
    }

    pub fn name(&self) -> &'static str {
        REGIONS[self.selected % REGIONS.len()].name
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % REGIONS.len();
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + REGIONS.len() - 1) % REGIONS.len();
    }
}

pub struct SoilState {
    pub sample_index: usize,
}

impl SoilState {
    pub fn new() -> Self {
        Self { sample_index: 0 }
    }

    pub fn sample(&self) -> &'static SoilSample {
        &SOIL_SAMPLES[self.sample_index % SOIL_SAMPLES.len()]
    }

    pub fn next(&mut self) {
        self.sample_index = (self.sample_index + 1) % SOIL_SAMPLES.len();
    }

    pub fn prev(&mut self) {
        self.sample_index = (self.sample_index + SOIL_SAMPLES.len() - 1) % SOIL_SAMPLES.len();
    }
}

pub struct CropFormState {
    pub form: CropForm,
    pub focused: FormField,
    pub editing: bool,
    pub submitting: bool,
    pub result: Option<PredictionResult>,
    pub error: Option<String>,
    pub tracker: RequestTracker,
}

impl CropFormState {
    pub fn new() -> Self {
        Self {
            form: CropForm::default(),
            focused: FormField::Nitrogen,
            editing: false,
            submitting: false,
            result: None,
            error: None,
            tracker: RequestTracker::default(),
        }
    }

    pub fn push_char(&mut self, c: char) {
        let mut value = self.form.get(self.focused).to_string();
        value.push(c);
        self.form.set(self.focused, value);
    }

    pub fn pop_char(&mut self) {
        let mut value = self.form.get(self.focused).to_string();
        value.pop();
        self.form.set(self.focused, value);
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev();
    }
}

/// Free-text filter with list selection, used by the pest library.
pub struct SearchState {
    pub query: String,
    pub editing: bool,
    pub selected_index: usize,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            editing: false,
            selected_index: 0,
        }
    }

    pub fn next(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    pub fn prev(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
        self.selected_index = 0;
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
        self.selected_index = 0;
    }
}

pub struct MarketState {
    pub search: SearchState,
    pub filter: MarketFilter,
}

impl MarketState {
    pub fn new() -> Self {
        Self {
            search: SearchState::new(),
            filter: MarketFilter::All,
        }
    }

    /// All markets, then each market in table order, then back to all.
    pub fn cycle_market(&mut self) {
        let names = markets(MARKET_PRICES);
        self.filter = match &self.filter {
            MarketFilter::All => names
                .first()
                .map(|m| MarketFilter::Market(m.to_string()))
                .unwrap_or(MarketFilter::All),
            MarketFilter::Market(current) => names
                .iter()
                .position(|m| *m == current.as_str())
                .and_then(|i| names.get(i + 1))
                .map(|m| MarketFilter::Market(m.to_string()))
                .unwrap_or(MarketFilter::All),
        };
        self.search.selected_index = 0;
    }
}

pub struct ChatState {
    pub bot: Chatbot,
    pub input: String,
    pub quick_index: Option<usize>,
}

impl ChatState {
    pub fn new(config: &Config) -> Self {
        Self {
            bot: Chatbot::new(config.dashboard.language),
            input: String::new(),
            quick_index: None,
        }
    }

    pub fn send(&mut self) {
        let input = std::mem::take(&mut self.input);
        self.quick_index = None;
        self.bot.send(&input);
    }

    /// Replaces the input with the next suggested question.
    pub fn next_quick_question(&mut self) {
        let next = self.quick_index.map_or(0, |i| (i + 1) % QUICK_QUESTIONS.len());
        self.quick_index = Some(next);
        self.input = QUICK_QUESTIONS[next].to_string();
    }

    pub fn prev_quick_question(&mut self) {
        let len = QUICK_QUESTIONS.len();
        let prev = self.quick_index.map_or(len - 1, |i| (i + len - 1) % len);
        self.quick_index = Some(prev);
        self.input = QUICK_QUESTIONS[prev].to_string();
    }

    pub fn cycle_language(&mut self) {
        self.bot.language = self.bot.language.next();
    }
}

/// Simulated pest detection on the pests screen.
#[derive(Default)]
pub struct DetectionState {
    pub analyzing: bool,
    pub result: Option<&'static Pest>,
    pub tracker: RequestTracker,
}

pub struct FeedbackState {
    pub form: FeedbackForm,
    pub focused: FeedbackField,
    pub editing: bool,
    pub error: Option<String>,
    /// Community feedback, newest first
    pub entries: Vec<Feedback>,
}

impl FeedbackState {
    pub fn new() -> Self {
        Self {
            form: FeedbackForm::default(),
            focused: FeedbackField::Name,
            editing: false,
            error: None,
            entries: FEEDBACK.iter().rev().map(Feedback::from).collect(),
        }
    }

    pub fn next_field(&mut self) {
        self.focused = self.focused.next();
    }

    pub fn prev_field(&mut self) {
        self.focused = self.focused.prev();
    }

    /// Starts typing into the focused field if it takes text.
    pub fn start_editing(&mut self) {
        self.editing = self.focused.is_text();
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.form.text_mut(self.focused) {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.form.text_mut(self.focused) {
            text.pop();
        }
    }

    /// ←→ on the category or rating picker.
    pub fn adjust(&mut self, forward: bool) {
        match self.focused {
            FeedbackField::Category => {
                self.form.category = FeedbackCategory::cycle(self.form.category, forward);
            }
            FeedbackField::Rating => {
                let rating = if forward {
                    self.form.rating.saturating_add(1)
                } else {
                    self.form.rating.saturating_sub(1)
                };
                self.form.set_rating(rating);
            }
            _ => {}
        }
    }
}

/// Work the event loop should start on the app's behalf.
#[derive(Debug, Clone)]
pub enum FetchRequest {
    Conditions { region: String, generation: u64 },
    Forecast { region: String, generation: u64 },
    Regional { state: String, generation: u64 },
    Prediction { request: PredictionRequest, generation: u64 },
    AllRegions { generation: u64 },
    Detection { generation: u64 },
    Connections,
}

#[derive(Debug)]
pub enum FetchResult {
    Conditions(EnvironmentReading),
    Forecast(WeatherForecast),
    Regional(Result<RegionalRecommendation>),
    Prediction(Result<PredictionResult>),
    AllRegions(Vec<EnvironmentReading>),
    Detection(Option<&'static Pest>),
    Connections(ConnectionStatus),
}

#[derive(Debug)]
pub struct FetchMessage {
    pub generation: u64,
    pub result: FetchResult,
}

pub struct App {
    pub screen: Screen,
    pub should_quit: bool,
    pub weather_configured: bool,

    // Data
    pub conditions: Option<EnvironmentReading>,
    pub forecast: Option<WeatherForecast>,
    pub regional: Option<RegionalRecommendation>,
    pub regional_error: Option<String>,
    pub all_regions: Vec<EnvironmentReading>,
    pub alerts: Vec<FieldAlert>,

    // Screen states
    pub region: RegionState,
    pub region_tracker: RequestTracker,
    /// The region list does not depend on the selected region
    pub all_regions_tracker: RequestTracker,
    pub soil_state: SoilState,
    pub crop_state: CropFormState,
    pub pest_state: SearchState,
    pub detection: DetectionState,
    pub market_state: MarketState,
    pub chat_state: ChatState,
    pub feedback_state: FeedbackState,

    // UI state
    pub status_message: Option<String>,
    pub loading: bool,
    pending: Vec<FetchRequest>,
}

impl App {
    pub fn new(config: &Config, weather_configured: bool) -> Self {
        Self {
            screen: Screen::Dashboard,
            should_quit: false,
            weather_configured,
            conditions: None,
            forecast: None,
            regional: None,
            regional_error: None,
            all_regions: Vec::new(),
            alerts: Vec::new(),
            region: RegionState::new(&config.dashboard.default_region),
            region_tracker: RequestTracker::default(),
            all_regions_tracker: RequestTracker::default(),
            soil_state: SoilState::new(),
            crop_state: CropFormState::new(),
            pest_state: SearchState::new(),
            detection: DetectionState::default(),
            market_state: MarketState::new(),
            chat_state: ChatState::new(config),
            feedback_state: FeedbackState::new(),
            status_message: None,
            loading: false,
            pending: Vec::new(),
        }
    }

    pub fn switch_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn set_status(&mut self, message: &str) {
        self.status_message = Some(message.to_string());
    }

    /// True while keystrokes go into a text field rather than acting as
    /// shortcuts.
    pub fn is_editing(&self) -> bool {
        match self.screen {
            Screen::Crops => self.crop_state.editing,
            Screen::Pests => self.pest_state.editing,
            Screen::Market => self.market_state.search.editing,
            Screen::Chat => true,
            Screen::Feedback => self.feedback_state.editing,
            _ => false,
        }
    }

    pub fn region_name(&self) -> &'static str {
        self.region.name()
    }

    /// Soil sample for the selected region, if the sample set has one.
    pub fn region_soil(&self) -> Option<&'static SoilSample> {
        samples::soil_sample(self.region_name())
    }

    pub fn next_region(&mut self) {
        self.region.next();
        self.request_refresh();
    }

    pub fn prev_region(&mut self) {
        self.region.prev();
        self.request_refresh();
    }

    /// Queue fresh conditions, forecast and regional suggestion for the
    /// selected region. Anything still in flight becomes stale.
    pub fn request_refresh(&mut self) {
        let generation = self.region_tracker.bump();
        let region = self.region_name().to_string();

        self.pending.push(FetchRequest::Conditions {
            region: region.clone(),
            generation,
        });
        self.pending.push(FetchRequest::Forecast {
            region: region.clone(),
            generation,
        });
        self.pending.push(FetchRequest::Regional {
            state: region.clone(),
            generation,
        });

        self.loading = true;
        self.set_status(&format!("Loading {}...", region));
    }

    pub fn request_all_regions(&mut self) {
        let generation = self.all_regions_tracker.bump();
        self.pending.push(FetchRequest::AllRegions { generation });
        self.set_status("Loading all regions...");
    }

    /// Starts a simulated detection. A running one is superseded.
    pub fn request_detection(&mut self) {
        let generation = self.detection.tracker.bump();
        self.detection.analyzing = true;
        self.detection.result = None;
        self.pending.push(FetchRequest::Detection { generation });
        self.set_status("Analyzing plant image...");
    }

    /// Drops the shown result and anything still being analyzed.
    pub fn clear_detection(&mut self) {
        self.detection.tracker.bump();
        self.detection.analyzing = false;
        self.detection.result = None;
    }

    /// Validates the feedback form. Accepted feedback goes to the top of the
    /// community list and the form is reset.
    pub fn submit_feedback(&mut self) {
        let state = &mut self.feedback_state;
        state.editing = false;
        match state.form.submit(Local::now().date_naive()) {
            Ok(feedback) => {
                tracing::info!(
                    "Feedback from {} ({} stars)",
                    feedback.farmer_name,
                    feedback.rating
                );
                state.entries.insert(0, feedback);
                state.form = FeedbackForm::default();
                state.focused = FeedbackField::Name;
                state.error = None;
                self.set_status("Feedback submitted. Thank you!");
            }
            Err(e) => {
                let message = e.to_string();
                state.error = Some(message.clone());
                self.set_status(&message);
            }
        }
    }

    pub fn request_connection_check(&mut self) {
        self.pending.push(FetchRequest::Connections);
    }

    /// Validates the crop form and queues a prediction. Validation errors
    /// are shown immediately and nothing is sent.
    pub fn submit_crop_form(&mut self) {
        match self.crop_state.form.to_request() {
            Ok(request) => {
                let generation = self.crop_state.tracker.bump();
                self.crop_state.error = None;
                self.crop_state.submitting = true;
                self.crop_state.editing = false;
                self.pending.push(FetchRequest::Prediction {
                    request,
                    generation,
                });
                self.set_status("Requesting crop recommendation...");
            }
            Err(e) => {
                let message = e.to_string();
                self.crop_state.error = Some(message.clone());
                self.set_status(&message);
            }
        }
    }

    /// Prefills the crop form from a soil sample and the current conditions.
    pub fn fill_crop_form(&mut self, soil: &SoilReading) {
        let Some(env) = self.conditions.as_ref() else {
            self.set_status("No weather conditions loaded yet");
            return;
        };
        let request = PredictionRequest::from_readings(soil, env);
        self.crop_state.form.fill_from(&request);
        self.crop_state.error = None;
        self.set_status("Crop form filled from soil sample and current weather");
    }

    pub fn take_requests(&mut self) -> Vec<FetchRequest> {
        std::mem::take(&mut self.pending)
    }

    /// Applies a finished fetch. Returns false if it was stale and dropped.
    pub fn apply(&mut self, message: FetchMessage) -> bool {
        let FetchMessage { generation, result } = message;

        match result {
            FetchResult::Prediction(result) => {
                if !self.crop_state.tracker.is_current(generation) {
                    return false;
                }
                self.crop_state.submitting = false;
                match result {
                    Ok(prediction) => {
                        self.set_status(&format!(
                            "Recommended crop: {}",
                            prediction.primary_recommendation
                        ));
                        self.crop_state.result = Some(prediction);
                    }
                    Err(e) => {
                        let message = e.to_string();
                        tracing::warn!("Crop recommendation failed: {}", message);
                        self.crop_state.error = Some(message.clone());
                        self.set_status(&format!("Recommendation failed: {}", message));
                    }
                }
                true
            }
            FetchResult::AllRegions(readings) => {
                if !self.all_regions_tracker.is_current(generation) {
                    return false;
                }
                self.set_status(&format!("Loaded {} regions", readings.len()));
                self.all_regions = readings;
                true
            }
            FetchResult::Detection(pest) => {
                if !self.detection.tracker.is_current(generation) {
                    return false;
                }
                self.detection.analyzing = false;
                self.detection.result = pest;
                match pest {
                    Some(p) => self.set_status(&format!("Detected: {}", p.name)),
                    None => self.set_status("Nothing detected"),
                }
                true
            }
            FetchResult::Connections(status) => {
                let summary = status.summary(self.weather_configured);
                self.set_status(&summary);
                true
            }
            region_scoped => {
                if !self.region_tracker.is_current(generation) {
                    tracing::debug!("Dropping stale result for generation {}", generation);
                    return false;
                }
                self.apply_region_result(region_scoped);
                true
            }
        }
    }

    fn apply_region_result(&mut self, result: FetchResult) {
        match result {
            FetchResult::Conditions(reading) => {
                self.loading = false;
                self.set_status(&format!("{} conditions from {}", reading.region, reading.origin));
                self.conditions = Some(reading);
                self.evaluate_alerts();
            }
            FetchResult::Forecast(forecast) => {
                self.forecast = Some(forecast);
            }
            FetchResult::Regional(Ok(regional)) => {
                self.regional = Some(regional);
                self.regional_error = None;
            }
            FetchResult::Regional(Err(e)) => {
                self.regional = None;
                self.regional_error = Some(e.to_string());
            }
            FetchResult::Prediction(_)
            | FetchResult::AllRegions(_)
            | FetchResult::Detection(_)
            | FetchResult::Connections(_) => {}
        }
    }

    pub fn evaluate_alerts(&mut self) {
        if let Some(ref env) = self.conditions {
            let soil = self.region_soil().map(|s| &s.reading);
            self.alerts = ConditionsAdvisor::assess(env, soil);
        }
    }
}
