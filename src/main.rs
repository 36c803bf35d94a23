//! CricketAI front-end: Yew app wiring the three prediction views.

use std::rc::Rc;

use cricket_ai::batting::BattingForecast;
use cricket_ai::bowling::BowlingForecast;
use cricket_ai::config::AppConfig;
use cricket_ai::winner::WinnerForecast;
use cricket_ai::{Prediction, PredictionKind};
use log::{error, info};
use yew::prelude::*;

mod components;
mod hooks;

use components::{InsightPanel, LoadErrorPanel, LoadingPanel, NavTabs, ResultPanel, SelectField};
use hooks::{use_prediction_form, FormPhase};

#[derive(Properties, PartialEq)]
pub struct PredictionViewProps {
    pub config: Rc<AppConfig>,
}

/// One prediction form with its result panel.
#[function_component(PredictionView)]
pub fn prediction_view<P>(props: &PredictionViewProps) -> Html
where
    P: Prediction,
{
    let handle = use_prediction_form::<P>(props.config.clone());

    let form = match &handle.phase {
        FormPhase::Loading => return html! { <LoadingPanel /> },
        FormPhase::Failed(message) => {
            return html! { <LoadErrorPanel message={message.clone()} /> }
        }
        FormPhase::Ready(form) => form.borrow(),
    };

    let loading = form.is_loading();
    let on_reset = P::SUPPORTS_RESET.then(|| handle.on_reset.clone());

    html! {
        <div class="prediction-grid">
            <div class="parameters">
                <h2>{ "MATCH PARAMETERS" }</h2>
                { for form.fields().into_iter().map(|field| {
                    let key = field.key;
                    html! { <SelectField key={key} {field} onchange={handle.on_change.clone()} /> }
                }) }
                <button class="btn-primary"
                    disabled={!form.can_submit()}
                    onclick={handle.on_submit.reform(|_| ())}
                >
                    { if loading { "PROCESSING..." } else { P::SUBMIT_LABEL } }
                </button>
                if loading {
                    <p class="status">{ "Predicting..." }</p>
                }
                if let Some(err) = form.error() {
                    <div class="current-error">{ err }</div>
                }
            </div>
            <div class="results-area">
                if let Some(rows) = form.result_rows() {
                    <ResultPanel {rows} {on_reset} />
                } else {
                    <InsightPanel insight={P::insight()} />
                }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub config: Rc<AppConfig>,
}

/// Page chrome plus whichever prediction view is selected.
#[function_component(App)]
pub fn app(props: &AppProps) -> Html {
    let active = use_state(|| PredictionKind::Winner);
    let onselect = {
        let active = active.clone();
        Callback::from(move |kind: PredictionKind| active.set(kind))
    };
    let config = props.config.clone();

    html! {
        <div class="app">
            <header class="header">
                <div class="brand">{ "CricketAI" }</div>
                <NavTabs active={*active} {onselect} />
            </header>
            <section class="hero">
                <h1>{ "READY TO PREDICT" }</h1>
                <p>
                    { "Advanced AI-powered cricket performance prediction system that analyzes \
                       player data to forecast match outcomes with exceptional accuracy." }
                </p>
            </section>
            <main>
                {
                    match *active {
                        PredictionKind::Winner => html! { <PredictionView<WinnerForecast> {config} /> },
                        PredictionKind::Batting => html! { <PredictionView<BattingForecast> {config} /> },
                        PredictionKind::Bowling => html! { <PredictionView<BowlingForecast> {config} /> },
                    }
                }
            </main>
            <footer class="footer">
                <div class="brand">{ "CricketAI" }</div>
                <div class="copyright">{ "© 2023 CricketAI. All rights reserved." }</div>
            </footer>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct StartupErrorProps {
    pub message: AttrValue,
}

#[function_component(StartupError)]
fn startup_error(props: &StartupErrorProps) -> Html {
    html! { <LoadErrorPanel message={props.message.clone()} /> }
}

/// Entry point: installs logging and mounts the app.
fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::new(log::Level::Debug));

    match AppConfig::from_window() {
        Ok(config) => {
            info!("Assets served from {}", config.assets_base);
            yew::Renderer::<App>::with_props(AppProps {
                config: Rc::new(config),
            })
            .render();
        }
        Err(err) => {
            error!("Invalid configuration: {}", err);
            yew::Renderer::<StartupError>::with_props(StartupErrorProps {
                message: err.to_string().into(),
            })
            .render();
        }
    }
}
