use std::future::Future;
use std::rc::Rc;

use fingerprint_console::browser::FetchTransport;
use fingerprint_console::config::EndpointConfig;
use fingerprint_console::dispatch::Dispatcher;
use fingerprint_console::flows::{run_flow_with, FlowInput};
use fingerprint_console::Flow;
use fingerprint_console::state::{InFlight, UiState};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

/// Current text of a form control plus the callbacks that keep it in sync.
#[derive(Clone, PartialEq)]
pub struct TextField {
    pub text: String,
    /// For `<input>` elements.
    pub on_input: Callback<InputEvent>,
    /// For `<select>` elements.
    pub on_change: Callback<Event>,
}

#[hook]
pub fn use_text_field(initial: &'static str) -> TextField {
    let text = use_state(|| initial.to_string());

    let on_input = {
        let text = text.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            text.set(input.value());
        })
    };

    let on_change = {
        let text = text.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            text.set(select.value());
        })
    };

    TextField {
        text: (*text).clone(),
        on_input,
        on_change,
    }
}

/// Starts flows against the page's shared UI state.
#[derive(Clone)]
pub struct FlowLauncher {
    dispatcher: Rc<Dispatcher<FetchTransport>>,
    in_flight: Rc<InFlight>,
    state: UseReducerHandle<UiState>,
}

impl FlowLauncher {
    pub fn launch(&self, input: FlowInput) {
        let flow = input.flow();
        self.launch_with(flow, async move { input });
    }

    /// Like [`launch`](Self::launch) for input that has to be gathered
    /// asynchronously first, such as file contents. `flow` is claimed before
    /// `input` starts.
    pub fn launch_with<F>(&self, flow: Flow, input: F)
    where
        F: Future<Output = FlowInput> + 'static,
    {
        let launcher = self.clone();
        spawn_local(async move {
            let state = launcher.state.clone();
            run_flow_with(flow, input, &*launcher.dispatcher, &launcher.in_flight, move |action| {
                state.dispatch(action)
            })
            .await;
        });
    }
}

#[hook]
pub fn use_flow_launcher(state: UseReducerHandle<UiState>) -> FlowLauncher {
    let dispatcher = use_memo((), |_| {
        Dispatcher::new(FetchTransport, EndpointConfig::from_document())
    });
    let in_flight = use_memo((), |_| InFlight::default());

    FlowLauncher {
        dispatcher,
        in_flight,
        state,
    }
}
