//! The validate → dispatch → report cycle shared by every flow.

use log::{info, warn};
use std::future::Future;
use std::rc::Rc;

use crate::collect::{self, CsvForm, SessionForm, WebsiteForm};
use crate::dispatch::{Dispatcher, Transport};
use crate::error::{RemoteError, ValidationError};
use crate::models::{CsvAttachment, SessionFeatures, WebsiteAnalysisRequest};
use crate::state::{FlowOutcome, FlowResult, InFlight, UiAction};
use crate::Flow;

/// Raw form state captured when the user pressed a trigger.
#[derive(Debug, Clone, PartialEq)]
pub enum FlowInput {
    Website(WebsiteForm),
    Csv(CsvForm),
    Session(SessionForm),
    Analytics,
}

/// A validated payload ready to go on the wire.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedRequest {
    Website(WebsiteAnalysisRequest),
    Csv(CsvAttachment),
    Session(SessionFeatures),
    Analytics,
}

impl FlowInput {
    pub fn flow(&self) -> Flow {
        match self {
            FlowInput::Website(_) => Flow::WebsiteAnalysis,
            FlowInput::Csv(_) => Flow::CsvUpload,
            FlowInput::Session(_) => Flow::SessionPrediction,
            FlowInput::Analytics => Flow::Analytics,
        }
    }

    pub fn prepare(&self) -> Result<PreparedRequest, ValidationError> {
        Ok(match self {
            FlowInput::Website(form) => PreparedRequest::Website(collect::collect_website(form)?),
            FlowInput::Csv(form) => PreparedRequest::Csv(collect::collect_csv(form)?),
            FlowInput::Session(form) => PreparedRequest::Session(collect::collect_session(form)?),
            FlowInput::Analytics => PreparedRequest::Analytics,
        })
    }
}

impl PreparedRequest {
    pub async fn dispatch<T: Transport>(
        &self,
        dispatcher: &Dispatcher<T>,
    ) -> Result<FlowResult, RemoteError> {
        Ok(match self {
            PreparedRequest::Website(req) => FlowResult::Website(dispatcher.analyze_website(req).await?),
            PreparedRequest::Csv(file) => FlowResult::Csv(dispatcher.upload_csv(file).await?),
            PreparedRequest::Session(features) => FlowResult::Prediction(dispatcher.predict(features).await?),
            PreparedRequest::Analytics => FlowResult::Analytics(dispatcher.analytics().await?),
        })
    }
}

/// Run one flow to completion, reporting each state change through `report`.
///
/// A trigger for a flow that is already in flight is dropped without any
/// report. The in-flight claim is released before the final report, whatever
/// the outcome.
pub async fn run_flow<T, F>(
    input: FlowInput,
    dispatcher: &Dispatcher<T>,
    in_flight: &Rc<InFlight>,
    report: F,
) where
    T: Transport,
    F: FnMut(UiAction),
{
    run_flow_with(input.flow(), async move { input }, dispatcher, in_flight, report).await;
}

/// [`run_flow`] for input that is still being gathered, such as file contents.
///
/// `flow` is claimed before `input` is polled, so a repeated trigger is
/// dropped even while the first one is still reading its input.
pub async fn run_flow_with<T, I, F>(
    flow: Flow,
    input: I,
    dispatcher: &Dispatcher<T>,
    in_flight: &Rc<InFlight>,
    mut report: F,
) where
    T: Transport,
    I: Future<Output = FlowInput>,
    F: FnMut(UiAction),
{
    let Some(guard) = in_flight.try_acquire(flow) else {
        return;
    };

    let input = input.await;
    debug_assert_eq!(input.flow(), flow);
    report(UiAction::Begin(flow));

    let prepared = match input.prepare() {
        Ok(prepared) => prepared,
        Err(err) => {
            drop(guard);
            report(UiAction::Finish(flow, FlowOutcome::Rejected(err)));
            return;
        }
    };

    report(UiAction::Dispatching(flow));
    let outcome = match prepared.dispatch(dispatcher).await {
        Ok(result) => {
            info!("{:?} completed", flow);
            FlowOutcome::Succeeded(result)
        }
        Err(err) => {
            warn!("{:?} failed: {}", flow, err);
            FlowOutcome::Failed(err)
        }
    };
    drop(guard);
    report(UiAction::Finish(flow, outcome));
}
