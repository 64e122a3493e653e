//! Yew view components for the fingerprinting console.
//!
//! Panels own their form text and hand a raw form snapshot to `on_submit`;
//! validation and dispatch happen in the library's flow runner.

use fingerprint_console::collect::{SessionForm, WebsiteForm};
use fingerprint_console::config::*;
use fingerprint_console::render::Banner;
use web_sys::{FileList, HtmlInputElement};
use yew::prelude::*;

use crate::hooks::use_text_field;

#[derive(Properties, PartialEq)]
pub struct ErrorBannerProps {
    pub message: Option<String>,
}

/// The single error surface shared by all flows.
#[function_component(ErrorBanner)]
pub fn error_banner(props: &ErrorBannerProps) -> Html {
    match &props.message {
        Some(message) => html! { <div id="errorBox" class="error-box">{ message }</div> },
        None => html! {},
    }
}

#[derive(Properties, PartialEq)]
pub struct ResultBannerProps {
    pub banner: Option<Banner>,
}

/// The result surface for text outcomes.
#[function_component(ResultBanner)]
pub fn result_banner(props: &ResultBannerProps) -> Html {
    let Some(banner) = &props.banner else {
        return html! {};
    };

    let last = banner.lines.len().saturating_sub(1);
    html! {
        <div id="result" class="result-box" style={format!("background: {}", banner.background)}>
            { banner.lines.iter().enumerate().map(|(idx, line)| html! {
                <>
                    { line }
                    if idx < last { <br /> }
                </>
            }).collect::<Html>() }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct LoaderProps {
    pub visible: bool,
}

#[function_component(Loader)]
pub fn loader(props: &LoaderProps) -> Html {
    if props.visible {
        html! { <div id="loader" class="loader">{ "Scanning…" }</div> }
    } else {
        html! {}
    }
}

#[derive(Properties, PartialEq)]
pub struct WebsiteAnalysisPanelProps {
    pub busy: bool,
    pub on_submit: Callback<WebsiteForm>,
}

#[function_component(WebsiteAnalysisPanel)]
pub fn website_analysis_panel(props: &WebsiteAnalysisPanelProps) -> Html {
    let website = use_text_field("");
    let num_users = use_text_field(DEFAULT_NUM_USERS);

    let onclick = {
        let on_submit = props.on_submit.clone();
        let website = website.text.clone();
        let num_users = num_users.text.clone();
        Callback::from(move |_: MouseEvent| {
            on_submit.emit(WebsiteForm {
                website: website.clone(),
                num_users: num_users.clone(),
            })
        })
    };

    html! {
        <section class="panel">
            <h2>{ "Website Analysis" }</h2>
            <div class="form-group">
                <label for="website">{ "Website URL:" }</label>
                <input id="website" type="text" placeholder="https://example.com"
                    value={website.text.clone()} oninput={website.on_input.clone()} />
            </div>
            <div class="form-group">
                <label for="num_users">{ "Simulated Users:" }</label>
                <input id="num_users" type="number" min="1"
                    value={num_users.text.clone()} oninput={num_users.on_input.clone()} />
            </div>
            <button class="primary" disabled={props.busy} {onclick}>{ "Analyze Website" }</button>
            <div class="chart-container">
                <canvas id={CHART_CANVAS_ID}></canvas>
            </div>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct CsvUploadPanelProps {
    pub busy: bool,
    pub on_submit: Callback<Option<FileList>>,
}

#[function_component(CsvUploadPanel)]
pub fn csv_upload_panel(props: &CsvUploadPanelProps) -> Html {
    let file_input = use_node_ref();

    let onclick = {
        let on_submit = props.on_submit.clone();
        let file_input = file_input.clone();
        Callback::from(move |_: MouseEvent| {
            let files = file_input
                .cast::<HtmlInputElement>()
                .and_then(|input| input.files());
            on_submit.emit(files)
        })
    };

    html! {
        <section class="panel">
            <h2>{ "Bulk CSV Prediction" }</h2>
            <div class="form-group">
                <label for="csvFile">{ "Session log CSV:" }</label>
                <input id="csvFile" type="file" accept=".csv,text/csv" ref={file_input} />
            </div>
            <p class="hint">{ format!("Columns: {}", REQUIRED_CSV_COLUMNS.join(", ")) }</p>
            <button class="primary" disabled={props.busy} {onclick}>{ "Upload CSV" }</button>
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct SessionPredictionPanelProps {
    pub busy: bool,
    pub on_submit: Callback<SessionForm>,
}

#[function_component(SessionPredictionPanel)]
pub fn session_prediction_panel(props: &SessionPredictionPanelProps) -> Html {
    let login_hour = use_text_field(DEFAULT_LOGIN_HOUR);
    let session_duration = use_text_field(DEFAULT_SESSION_DURATION);
    let failed_logins = use_text_field(DEFAULT_FAILED_LOGINS);
    let typing_speed = use_text_field(DEFAULT_TYPING_SPEED);
    let commands_count = use_text_field(DEFAULT_COMMANDS_COUNT);
    let protocol = use_text_field(PROTOCOLS[0]);

    let onclick = {
        let on_submit = props.on_submit.clone();
        let form = SessionForm {
            login_hour: login_hour.text.clone(),
            session_duration: session_duration.text.clone(),
            failed_logins: failed_logins.text.clone(),
            typing_speed: typing_speed.text.clone(),
            protocol: protocol.text.clone(),
            commands_count: commands_count.text.clone(),
        };
        Callback::from(move |_: MouseEvent| on_submit.emit(form.clone()))
    };

    let number_field = |id: &'static str, label: &'static str, field: &crate::hooks::TextField| {
        html! {
            <div class="form-group">
                <label for={id}>{ label }</label>
                <input id={id} type="number" value={field.text.clone()} oninput={field.on_input.clone()} />
            </div>
        }
    };

    html! {
        <section class="panel">
            <h2>{ "Session Prediction" }</h2>
            { number_field("login_hour", "Login Hour (0-23):", &login_hour) }
            { number_field("session_duration", "Session Duration (min):", &session_duration) }
            { number_field("failed_logins", "Failed Logins:", &failed_logins) }
            { number_field("typing_speed", "Typing Speed (WPM):", &typing_speed) }
            { number_field("commands", "Commands Executed:", &commands_count) }
            <div class="form-group">
                <label for="protocol">{ "Protocol:" }</label>
                <select id="protocol" onchange={protocol.on_change.clone()}>
                    { PROTOCOLS.iter().map(|p| html! {
                        <option value={*p} selected={protocol.text == *p}>{ *p }</option>
                    }).collect::<Html>() }
                </select>
            </div>
            <button id="scanBtn" class="primary" disabled={props.busy} {onclick}>{ "Scan Session" }</button>
            <Loader visible={props.busy} />
        </section>
    }
}

#[derive(Properties, PartialEq)]
pub struct AnalyticsPanelProps {
    pub busy: bool,
    pub on_refresh: Callback<()>,
}

/// Aggregate totals of every prediction the backend has stored.
#[function_component(AnalyticsPanel)]
pub fn analytics_panel(props: &AnalyticsPanelProps) -> Html {
    let onclick = props.on_refresh.reform(|_: MouseEvent| ());
    html! {
        <section class="panel">
            <h2>{ "Analytics" }</h2>
            <button class="secondary" disabled={props.busy} {onclick}>{ "Load Summary" }</button>
        </section>
    }
}
