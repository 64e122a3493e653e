//! Main module for the fingerprinting console using Yew.
//! Wires panels, shared UI state, and the chart canvas.

use fingerprint_console::browser::read_selected_files;
use fingerprint_console::collect::{CsvForm, SessionForm, WebsiteForm};
use fingerprint_console::config::CHART_CANVAS_ID;
use fingerprint_console::flows::FlowInput;
use fingerprint_console::logging;
use fingerprint_console::state::{FlowResult, UiState};
use fingerprint_console::Flow;
use log::LevelFilter;
use web_sys::FileList;
use yew::prelude::*;

mod chart;
mod components;
mod hooks;

use chart::{CanvasChart, ChartSlot};
use components::{
    AnalyticsPanel, CsvUploadPanel, ErrorBanner, ResultBanner, SessionPredictionPanel,
    WebsiteAnalysisPanel,
};
use hooks::use_flow_launcher;

/// Primary application component wiring state, effects, and UI elements.
#[function_component]
pub fn App() -> Html {
    let state = use_reducer(UiState::default);
    let launcher = use_flow_launcher(state.clone());
    let chart_slot = use_mut_ref(|| ChartSlot::new(CanvasChart::new(CHART_CANVAS_ID)));

    // Redraw the pie whenever a website analysis succeeds
    {
        let state = state.clone();
        let chart_slot = chart_slot.clone();
        use_effect_with(state.chart_revision, move |_| {
            if let Some(spec) = state.chart.as_ref() {
                chart_slot.borrow_mut().replace(spec);
            }
            || ()
        });
    }

    let on_website = {
        let launcher = launcher.clone();
        Callback::from(move |form: WebsiteForm| launcher.launch(FlowInput::Website(form)))
    };

    let on_csv = {
        let launcher = launcher.clone();
        Callback::from(move |files: Option<FileList>| {
            launcher.launch_with(Flow::CsvUpload, async move {
                FlowInput::Csv(CsvForm {
                    files: read_selected_files(files).await,
                })
            })
        })
    };

    let on_session = {
        let launcher = launcher.clone();
        Callback::from(move |form: SessionForm| launcher.launch(FlowInput::Session(form)))
    };

    let on_analytics = {
        let launcher = launcher.clone();
        Callback::from(move |_: ()| launcher.launch(FlowInput::Analytics))
    };

    let banner = state.result.as_ref().and_then(FlowResult::banner);

    html! {
        <div class="container">
            <h1>{ "Behavioral Fingerprinting Console" }</h1>
            <ErrorBanner message={state.error_message.clone()} />
            <ResultBanner {banner} />
            <div class="panels">
                <WebsiteAnalysisPanel busy={state.is_busy(Flow::WebsiteAnalysis)} on_submit={on_website} />
                <CsvUploadPanel busy={state.is_busy(Flow::CsvUpload)} on_submit={on_csv} />
                <SessionPredictionPanel busy={state.is_busy(Flow::SessionPrediction)} on_submit={on_session} />
                <AnalyticsPanel busy={state.is_busy(Flow::Analytics)} on_refresh={on_analytics} />
            </div>
        </div>
    }
}

/// Entry point: installs logging and renders the App.
fn main() {
    logging::init(LevelFilter::Debug);
    yew::Renderer::<App>::new().render();
}
