// client.rs - Outbound generation request
//
// POST the JSON body, expect an image back, hand out an object URL for
// it. Any non-2xx, transport error or timeout is a failure.

use std::time::Duration;

use gloo::timers::callback::Timeout;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, Blob, DomException, Headers, Request, RequestInit, Response, Url};

use super::timer_millis;
use crate::config::Config;
use crate::error::GenerateError;
use crate::studio::OutfitRequest;

/// Issue the request. Aborting `abort` from outside ends it early; the
/// timeout aborts it through the same controller.
pub async fn generate(
    config: &Config,
    request: &OutfitRequest,
    abort: &AbortController,
) -> Result<String, GenerateError> {
    let body = request.to_json()?;
    let window = web_sys::window().ok_or_else(|| GenerateError::Transport("no window".to_string()))?;

    let headers = Headers::new().map_err(transport)?;
    headers.set("Content-Type", "application/json").map_err(transport)?;

    let init = RequestInit::new();
    init.set_method("POST");
    init.set_headers(&headers);
    init.set_body(&JsValue::from_str(&body));
    init.set_signal(Some(&abort.signal()));

    let req = Request::new_with_str_and_init(&config.endpoint, &init).map_err(transport)?;

    // Dropped on every exit path, which clears the timer.
    let _deadline = {
        let abort = abort.clone();
        let wait = Duration::try_from_secs_f32(config.request_timeout).unwrap_or(Duration::ZERO);
        Timeout::new(timer_millis(wait), move || abort.abort())
    };

    let resp: Response = JsFuture::from(window.fetch_with_request(&req))
        .await
        .map_err(classify)?
        .dyn_into()
        .map_err(transport)?;

    if !resp.ok() {
        return Err(GenerateError::Status(resp.status()));
    }

    let blob: Blob = JsFuture::from(resp.blob().map_err(transport)?)
        .await
        .map_err(classify)?
        .dyn_into()
        .map_err(transport)?;

    Url::create_object_url_with_blob(&blob).map_err(transport)
}

/// Release an object URL handed out by [`generate`].
pub fn controller() -> Result<AbortController, GenerateError> {
    AbortController::new().map_err(transport)
}

pub fn revoke(url: &str) {
    if Url::revoke_object_url(url).is_err() {
        log::warn!("failed to revoke {}", url);
    }
}

fn classify(err: JsValue) -> GenerateError {
    match err.dyn_ref::<DomException>() {
        Some(e) if e.name() == "AbortError" => GenerateError::Timeout,
        _ => transport(err),
    }
}

fn transport(err: JsValue) -> GenerateError {
    GenerateError::Transport(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}
