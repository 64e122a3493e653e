//! UI state shared by every flow, and the per-flow in-flight guard.
//!
//! The page has one error surface and one result surface. Flows never touch
//! them directly; they emit [`UiAction`]s which [`UiState`] applies as a
//! reducer, so a completed flow updates everything in a single step.

use log::debug;
use serde::Deserialize;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use yew::Reducible;

use crate::config::{
    ANALYTICS_PATH, ANALYZE_WEBSITE_PATH, MSG_BACKEND_FAILURE, PREDICT_CSV_PATH, PREDICT_PATH,
};
use crate::error::{RemoteError, ValidationError};
use crate::models::{
    AnalyticsResponse, CsvSummaryResponse, PredictionResponse, WebsiteAnalysisResponse,
};
use crate::render::{self, Banner, PieChartSpec};

/// One user-triggered input → dispatch → render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flow {
    WebsiteAnalysis,
    CsvUpload,
    SessionPrediction,
    Analytics,
}

impl Flow {
    pub fn path(self) -> &'static str {
        match self {
            Flow::WebsiteAnalysis => ANALYZE_WEBSITE_PATH,
            Flow::CsvUpload => PREDICT_CSV_PATH,
            Flow::SessionPrediction => PREDICT_PATH,
            Flow::Analytics => ANALYTICS_PATH,
        }
    }
}

/// Where a flow currently sits in its cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowPhase {
    #[default]
    Idle,
    Validating,
    Rejected,
    Dispatching,
    Succeeded,
    Failed,
}

/// A decoded successful response, tagged by flow.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowResult {
    Website(WebsiteAnalysisResponse),
    Csv(CsvSummaryResponse),
    Prediction(PredictionResponse),
    Analytics(AnalyticsResponse),
}

impl FlowResult {
    /// Text banner for the result surface. Website analysis renders as a chart.
    pub fn banner(&self) -> Option<Banner> {
        match self {
            FlowResult::Website(_) => None,
            FlowResult::Csv(resp) => Some(render::csv_banner(resp)),
            FlowResult::Prediction(resp) => Some(render::prediction_banner(resp)),
            FlowResult::Analytics(resp) => Some(render::analytics_banner(resp)),
        }
    }

    pub fn chart(&self) -> Option<PieChartSpec> {
        match self {
            FlowResult::Website(resp) => Some(render::website_chart(resp)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FlowOutcome {
    Rejected(ValidationError),
    Succeeded(FlowResult),
    Failed(RemoteError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiAction {
    /// Clear both surfaces before validating fresh input.
    Begin(Flow),
    /// Input passed validation; the request is on the wire.
    Dispatching(Flow),
    Finish(Flow, FlowOutcome),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UiState {
    pub error_message: Option<String>,
    pub result: Option<FlowResult>,
    /// Last chart drawn on the canvas. Survives surface resets like the canvas does.
    pub chart: Option<PieChartSpec>,
    /// Bumped on every chart-producing success so the view can redraw.
    pub chart_revision: u64,
    phases: HashMap<Flow, FlowPhase>,
}

impl UiState {
    pub fn phase(&self, flow: Flow) -> FlowPhase {
        self.phases.get(&flow).copied().unwrap_or_default()
    }

    pub fn is_busy(&self, flow: Flow) -> bool {
        self.phase(flow) == FlowPhase::Dispatching
    }

    /// Apply one action in place.
    pub fn apply(&mut self, action: UiAction) {
        match action {
            UiAction::Begin(flow) => {
                self.error_message = None;
                self.result = None;
                self.phases.insert(flow, FlowPhase::Validating);
            }
            UiAction::Dispatching(flow) => {
                self.phases.insert(flow, FlowPhase::Dispatching);
            }
            UiAction::Finish(flow, FlowOutcome::Rejected(err)) => {
                self.error_message = Some(err.to_string());
                self.phases.insert(flow, FlowPhase::Rejected);
            }
            UiAction::Finish(flow, FlowOutcome::Succeeded(result)) => {
                if let Some(spec) = result.chart() {
                    self.chart = Some(spec);
                    self.chart_revision = self.chart_revision.wrapping_add(1);
                }
                self.error_message = None;
                self.result = Some(result);
                self.phases.insert(flow, FlowPhase::Succeeded);
            }
            UiAction::Finish(flow, FlowOutcome::Failed(_)) => {
                self.error_message = Some(MSG_BACKEND_FAILURE.to_string());
                self.phases.insert(flow, FlowPhase::Failed);
            }
        }
    }
}

impl Reducible for UiState {
    type Action = UiAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

/// Flows with a request currently outstanding.
///
/// A flow is claimed before its input is read and released once its request
/// settles, so a second trigger in between yields no second request even
/// before the UI has re-rendered with disabled buttons.
#[derive(Debug, Default)]
pub struct InFlight {
    active: RefCell<HashSet<Flow>>,
}

impl InFlight {
    /// Claim `flow`, or `None` if it is already running.
    pub fn try_acquire(self: &Rc<Self>, flow: Flow) -> Option<InFlightGuard> {
        if !self.active.borrow_mut().insert(flow) {
            debug!("{:?} already in flight, ignoring trigger", flow);
            return None;
        }
        Some(InFlightGuard {
            owner: Rc::clone(self),
            flow,
        })
    }

    pub fn contains(&self, flow: Flow) -> bool {
        self.active.borrow().contains(&flow)
    }
}

/// Releases its flow when dropped, on success and failure alike.
pub struct InFlightGuard {
    owner: Rc<InFlight>,
    flow: Flow,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.owner.active.borrow_mut().remove(&self.flow);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NORMAL_GRADIENT, SUSPICIOUS_GRADIENT};

    fn website(normal: f64, suspicious: f64) -> FlowResult {
        FlowResult::Website(WebsiteAnalysisResponse {
            normal_percent: normal,
            suspicious_percent: suspicious,
            website: None,
            total_users: None,
            note: None,
        })
    }

    fn prediction(label: &str, confidence: &str) -> FlowResult {
        FlowResult::Prediction(PredictionResponse {
            prediction: label.into(),
            confidence: serde_json::Value::String(confidence.into()),
        })
    }

    #[test]
    fn begin_clears_both_surfaces() {
        let mut state = UiState::default();
        state.apply(UiAction::Finish(Flow::SessionPrediction, FlowOutcome::Succeeded(prediction("Normal", "0.9"))));
        state.error_message = Some("stale".into());

        state.apply(UiAction::Begin(Flow::SessionPrediction));
        assert!(state.error_message.is_none());
        assert!(state.result.is_none());
        assert_eq!(state.phase(Flow::SessionPrediction), FlowPhase::Validating);
    }

    #[test]
    fn rejection_shows_message_and_no_result() {
        let mut state = UiState::default();
        state.apply(UiAction::Begin(Flow::WebsiteAnalysis));
        state.apply(UiAction::Finish(
            Flow::WebsiteAnalysis,
            FlowOutcome::Rejected(ValidationError::InvalidWebsite),
        ));
        assert_eq!(
            state.error_message.as_deref(),
            Some("⚠️ Please enter a valid website URL and user count")
        );
        assert!(state.result.is_none());
        assert_eq!(state.phase(Flow::WebsiteAnalysis), FlowPhase::Rejected);
    }

    #[test]
    fn remote_failure_shows_generic_message() {
        let mut state = UiState::default();
        state.apply(UiAction::Begin(Flow::SessionPrediction));
        state.apply(UiAction::Dispatching(Flow::SessionPrediction));
        assert!(state.is_busy(Flow::SessionPrediction));

        state.apply(UiAction::Finish(
            Flow::SessionPrediction,
            FlowOutcome::Failed(RemoteError::Status(500)),
        ));
        assert_eq!(
            state.error_message.as_deref(),
            Some("❌ Backend not reachable or error occurred")
        );
        assert!(state.result.is_none());
        assert!(!state.is_busy(Flow::SessionPrediction));
    }

    #[test]
    fn prediction_gradient_follows_label() {
        let suspicious = prediction("Suspicious", "0.92").banner().unwrap();
        assert_eq!(suspicious.background, SUSPICIOUS_GRADIENT);

        let normal = prediction("Normal", "0.99").banner().unwrap();
        assert_eq!(normal.background, NORMAL_GRADIENT);
    }

    #[test]
    fn website_success_bumps_chart_revision() {
        let mut state = UiState::default();
        state.apply(UiAction::Finish(Flow::WebsiteAnalysis, FlowOutcome::Succeeded(website(80.0, 20.0))));
        assert_eq!(state.chart_revision, 1);
        assert_eq!(state.chart.as_ref().unwrap().values, vec![80.0, 20.0]);

        state.apply(UiAction::Begin(Flow::WebsiteAnalysis));
        assert!(state.chart.is_some(), "canvas keeps its chart until replaced");

        state.apply(UiAction::Finish(Flow::WebsiteAnalysis, FlowOutcome::Succeeded(website(60.0, 40.0))));
        assert_eq!(state.chart_revision, 2);
        assert_eq!(state.chart.as_ref().unwrap().values, vec![60.0, 40.0]);
    }

    #[test]
    fn reducer_leaves_previous_state_untouched() {
        let before = Rc::new(UiState::default());
        let after = Rc::clone(&before).reduce(UiAction::Begin(Flow::Analytics));
        assert_eq!(before.phase(Flow::Analytics), FlowPhase::Idle);
        assert_eq!(after.phase(Flow::Analytics), FlowPhase::Validating);
    }

    #[test]
    fn in_flight_guard_releases_on_drop() {
        let in_flight = Rc::new(InFlight::default());
        let guard = in_flight.try_acquire(Flow::CsvUpload).unwrap();
        assert!(in_flight.contains(Flow::CsvUpload));
        assert!(in_flight.try_acquire(Flow::CsvUpload).is_none());
        assert!(in_flight.try_acquire(Flow::WebsiteAnalysis).is_some());

        drop(guard);
        assert!(!in_flight.contains(Flow::CsvUpload));
        assert!(in_flight.try_acquire(Flow::CsvUpload).is_some());
    }
}
