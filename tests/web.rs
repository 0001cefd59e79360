#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use styly_engine::Stage;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn add_canvas(id: &str) -> web_sys::HtmlCanvasElement {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("canvas").unwrap();
    el.set_id(id);
    document.body().unwrap().append_child(&el).unwrap();
    el.dyn_into().unwrap()
}

const QUICK: &str = r#"{ "intro_dwell": 0.05, "transition_dwell": 0.05 }"#;

/// Hook that records every `(phase, effect)` call.
fn recording_hook() -> (Closure<dyn FnMut(JsValue, JsValue)>, Rc<RefCell<Vec<String>>>) {
    let calls = Rc::new(RefCell::new(Vec::new()));
    let sink = calls.clone();
    let hook = Closure::<dyn FnMut(JsValue, JsValue)>::new(move |phase: JsValue, _effect: JsValue| {
        sink.borrow_mut().push(phase.as_string().unwrap());
    });
    (hook, calls)
}

#[wasm_bindgen_test]
fn missing_elements_are_skipped() {
    let stage = Stage::new("nope-a", "nope-b", "nope-c", "nope-d", None).unwrap();
    assert_eq!(stage.layer_count(), 0);
    assert_eq!(stage.phase(), "intro");
}

#[wasm_bindgen_test]
fn canvases_sized_to_viewport() {
    let particles = add_canvas("t-particles");
    let rain = add_canvas("t-rain");
    let stage = Stage::new("t-particles", "t-rain", "t-trail", "t-bg", None).unwrap();

    let window = web_sys::window().unwrap();
    let w = window.inner_width().unwrap().as_f64().unwrap() as u32;
    assert_eq!(stage.layer_count(), 2);
    assert_eq!(particles.width(), w);
    assert_eq!(rain.width(), w);
    drop(stage);
}

#[wasm_bindgen_test]
fn enter_starts_transition() {
    let stage = Stage::new("x1", "x2", "x3", "x4", Some(r#"{ "auto_enter": false, "transition_dwell": 0.0 }"#.into()))
        .unwrap();
    assert_eq!(stage.phase(), "intro");
    stage.enter();
    assert_eq!(stage.phase(), "transitioning");
    assert_eq!(stage.select_tab("wardrobe").unwrap(), false);
}

#[wasm_bindgen_test]
fn bad_config_is_rejected() {
    assert!(Stage::new("a", "b", "c", "d", Some("{ \"trail_len\": 0 }".into())).is_err());
}

#[wasm_bindgen_test(async)]
async fn submit_without_image_rejects() {
    let stage = Stage::new("s1", "s2", "s3", "s4", None).unwrap();
    let result = wasm_bindgen_futures::JsFuture::from(stage.submit()).await;
    let message = result.unwrap_err().as_string().unwrap();
    assert!(message.contains("select an image"));
    assert_eq!(stage.wardrobe_len(), 0);
    assert!(!stage.in_flight());
}

#[wasm_bindgen_test(async)]
async fn timers_drive_intro_to_form() {
    let stage = Stage::new("q1", "q2", "q3", "q4", Some(QUICK.into())).unwrap();
    let (hook, calls) = recording_hook();
    stage.on_phase(hook.as_ref().unchecked_ref::<js_sys::Function>().clone());

    TimeoutFuture::new(400).await;
    assert_eq!(stage.phase(), "form");
    assert_eq!(*calls.borrow(), vec!["transitioning".to_string(), "form".to_string()]);
    assert_eq!(stage.select_tab("wardrobe").unwrap(), true);
}

#[wasm_bindgen_test(async)]
async fn dropped_stage_never_fires_pending_dwell() {
    let stage = Stage::new("p1", "p2", "p3", "p4", Some(QUICK.into())).unwrap();
    let (hook, calls) = recording_hook();
    stage.on_phase(hook.as_ref().unchecked_ref::<js_sys::Function>().clone());
    drop(stage);

    TimeoutFuture::new(300).await;
    assert!(calls.borrow().is_empty());
}

#[wasm_bindgen_test(async)]
async fn dropped_stage_stops_drawing() {
    let rain = add_canvas("f-rain");
    let stage = Stage::new("f-particles", "f-rain", "f-trail", "f-bg", None).unwrap();
    assert_eq!(stage.layer_count(), 1);

    let before = rain.to_data_url().unwrap();
    TimeoutFuture::new(200).await;
    let running = rain.to_data_url().unwrap();
    assert_ne!(before, running);

    drop(stage);
    let frozen = rain.to_data_url().unwrap();
    TimeoutFuture::new(200).await;
    assert_eq!(frozen, rain.to_data_url().unwrap());
}

#[wasm_bindgen_test(async)]
async fn resize_event_refits_canvases() {
    let rain = add_canvas("r-rain");
    let stage = Stage::new("r-particles", "r-rain", "r-trail", "r-bg", None).unwrap();
    let window = web_sys::window().unwrap();
    let w = window.inner_width().unwrap().as_f64().unwrap() as u32;

    rain.set_width(1);
    window.dispatch_event(&web_sys::Event::new("resize").unwrap()).unwrap();
    assert_eq!(rain.width(), w);

    // The loop keeps drawing into the refitted canvas.
    let before = rain.to_data_url().unwrap();
    TimeoutFuture::new(200).await;
    assert_ne!(before, rain.to_data_url().unwrap());
    drop(stage);
}
