//! Pure Yew view components for the prediction UI.
//!
//! Everything here renders from props only; state lives in the
//! `use_prediction_form` hook.

use cricket_ai::results::{Emphasis, Insight, ResultRow};
use cricket_ai::{Field, PredictionKind};
use web_sys::HtmlSelectElement;
use yew::prelude::*;

/// A labelled dropdown bound to one selection field.
#[derive(Properties, PartialEq)]
pub struct SelectFieldProps {
    pub field: Field,
    pub onchange: Callback<(&'static str, String)>,
}

#[function_component(SelectField)]
pub fn select_field(props: &SelectFieldProps) -> Html {
    let field = &props.field;
    let onchange = {
        let key = field.key;
        props.onchange.reform(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            (key, select.value())
        })
    };

    html! {
        <div class="form-group">
            <label for={field.key}>{ field.label }</label>
            <select id={field.key} {onchange}>
                <option value="" disabled={true} selected={field.value.is_empty()}>
                    { field.placeholder }
                </option>
                { for field.choices.iter().map(|choice| html! {
                    <option key={choice.clone()} value={choice.clone()} selected={*choice == field.value}>
                        { choice }
                    </option>
                }) }
            </select>
        </div>
    }
}

/// Last successful prediction, row by row.
#[derive(Properties, PartialEq)]
pub struct ResultPanelProps {
    pub rows: Vec<ResultRow>,
    /// Present on forms that can clear their result.
    #[prop_or_default]
    pub on_reset: Option<Callback<()>>,
}

#[function_component(ResultPanel)]
pub fn result_panel(props: &ResultPanelProps) -> Html {
    let row_class = |emphasis: Emphasis| match emphasis {
        Emphasis::Headline => "result-row headline",
        Emphasis::Context => "result-row context",
        Emphasis::Figure => "result-row figure",
    };

    html! {
        <div class="results">
            <h2>{ "PREDICTION RESULT" }</h2>
            { for props.rows.iter().map(|row| html! {
                <div class={row_class(row.emphasis)}>
                    <div class="result-label">{ row.label }</div>
                    <div class="result-value">{ &row.value }</div>
                </div>
            }) }
            if let Some(on_reset) = &props.on_reset {
                <button class="btn-secondary" onclick={on_reset.reform(|_| ())}>
                    { "Reset" }
                </button>
            }
        </div>
    }
}

/// Placeholder panel shown until a prediction exists.
#[derive(Properties, PartialEq)]
pub struct InsightPanelProps {
    pub insight: Insight,
}

#[function_component(InsightPanel)]
pub fn insight_panel(props: &InsightPanelProps) -> Html {
    let insight = &props.insight;
    html! {
        <div class="insight">
            <h2>{ insight.title }</h2>
            <p>{ insight.blurb }</p>
            if !insight.stats.is_empty() {
                <div class="insight-stats">
                    { for insight.stats.iter().map(|(label, value)| html! {
                        <div class="insight-stat">
                            <div class="result-label">{ *label }</div>
                            <div class="result-value">{ *value }</div>
                        </div>
                    }) }
                </div>
            }
        </div>
    }
}

/// Full-screen panel replacing a view whose options failed to load.
#[derive(Properties, PartialEq)]
pub struct LoadErrorPanelProps {
    pub message: AttrValue,
}

#[function_component(LoadErrorPanel)]
pub fn load_error_panel(props: &LoadErrorPanelProps) -> Html {
    html! {
        <div class="fullscreen-panel load-error">
            <p>{ "Error:" }</p>
            <pre>{ props.message.clone() }</pre>
        </div>
    }
}

#[function_component(LoadingPanel)]
pub fn loading_panel() -> Html {
    html! {
        <div class="fullscreen-panel">
            <div class="loading">{ "Loading options…" }</div>
        </div>
    }
}

/// Tabs switching between the three prediction views.
#[derive(Properties, PartialEq)]
pub struct NavTabsProps {
    pub active: PredictionKind,
    pub onselect: Callback<PredictionKind>,
}

#[function_component(NavTabs)]
pub fn nav_tabs(props: &NavTabsProps) -> Html {
    html! {
        <nav class="tabs">
            { for PredictionKind::ALL.iter().map(|&kind| {
                let class = if kind == props.active { "tab active" } else { "tab" };
                html! {
                    <button {class} onclick={props.onselect.reform(move |_| kind)}>
                        { kind.label() }
                    </button>
                }
            }) }
        </nav>
    }
}
