use std::cell::RefCell;
use std::rc::Rc;

use cricket_ai::client::PredictionClient;
use cricket_ai::config::AppConfig;
use cricket_ai::form::{submit, FormController};
use cricket_ai::options::OptionsLoader;
use cricket_ai::transport::ReqwestTransport;
use cricket_ai::Prediction;
use log::{debug, warn};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// Where a prediction view is in its life.
pub enum FormPhase<P: Prediction> {
    /// Options are still being fetched.
    Loading,
    /// Options could not be loaded; the form is never shown.
    Failed(String),
    Ready(Rc<RefCell<FormController<P>>>),
}

/// State and callbacks for one prediction view.
pub struct PredictionFormHandle<P: Prediction> {
    pub phase: FormPhase<P>,
    /// `(field key, new value)` from a dropdown.
    pub on_change: Callback<(&'static str, String)>,
    pub on_submit: Callback<()>,
    pub on_reset: Callback<()>,
}

/// Custom hook owning a form's options, selection and request lifecycle.
///
/// Options are fetched once on mount; neither submitting nor resetting
/// fetches them again.
#[hook]
pub fn use_prediction_form<P>(config: Rc<AppConfig>) -> PredictionFormHandle<P>
where
    P: Prediction,
{
    let form = use_state(|| None::<Rc<RefCell<FormController<P>>>>);
    let load_error = use_state(|| None::<String>);
    let redraw = use_force_update();
    let client = use_memo(config.clone(), |config| {
        PredictionClient::new(ReqwestTransport::new(), (**config).clone())
    });

    // Load options on mount
    {
        let form = form.clone();
        let load_error = load_error.clone();
        let config = config.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let loader = OptionsLoader::new(ReqwestTransport::new(), config.assets_base.clone());
                match P::load_options(&loader, &config).await {
                    Ok(options) => {
                        debug!("{} options ready", P::KIND);
                        form.set(Some(Rc::new(RefCell::new(FormController::new(options)))));
                    }
                    Err(err) => {
                        warn!("Error loading {} options: {}", P::KIND, err);
                        load_error.set(Some(err.to_string()));
                    }
                }
            });
            || ()
        });
    }

    let on_change = {
        let form = (*form).clone();
        let redraw = redraw.clone();
        Callback::from(move |(key, value): (&'static str, String)| {
            if let Some(form) = &form {
                form.borrow_mut().set_field(key, value);
                redraw.force_update();
            }
        })
    };

    let on_submit = {
        let form = (*form).clone();
        let redraw = redraw.clone();
        let client = client.clone();
        Callback::from(move |_: ()| {
            let Some(form) = form.clone() else {
                return;
            };
            let redraw = redraw.clone();
            let client = client.clone();
            spawn_local(async move {
                submit(&*form, &*client, || redraw.force_update()).await;
            });
        })
    };

    let on_reset = {
        let form = (*form).clone();
        let redraw = redraw.clone();
        Callback::from(move |_: ()| {
            if let Some(form) = &form {
                if form.borrow_mut().reset() {
                    redraw.force_update();
                }
            }
        })
    };

    let phase = match (&*load_error, &*form) {
        (Some(err), _) => FormPhase::Failed(err.clone()),
        (None, Some(form)) => FormPhase::Ready(form.clone()),
        (None, None) => FormPhase::Loading,
    };

    PredictionFormHandle {
        phase,
        on_change,
        on_submit,
        on_reset,
    }
}
