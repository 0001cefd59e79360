// stage.rs - Page host exported to JavaScript
//
// Owns every browser resource the engine holds: canvas layers, window
// listeners, the dwell timer. Freeing the stage releases all of them.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use js_sys::{Function, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{AbortController, Document, Event, HtmlCanvasElement, HtmlElement, MouseEvent, Window};

use super::canvas::{Canvas2d, Layer};
use super::{client, timer_millis};
use crate::config::Config;
use crate::input::{Parallax, Point, Trail};
use crate::sim::{Particles, Rain};
use crate::studio::{Gender, Occasion};
use crate::view::{Effect, Sequencer, Tab};

struct Pointer {
    trail: Trail,
    parallax: Parallax,
    surface: Option<Canvas2d>,
    background: Option<HtmlElement>,
    viewport: (f32, f32),
}

impl Pointer {
    fn sample(&mut self, point: Point) {
        self.trail.push(point);
        if let Some(surface) = self.surface.as_mut() {
            self.trail.render(surface);
        }
        if let Some(bg) = &self.background {
            let offset = self.parallax.offset(point, self.viewport);
            if bg.style().set_property("transform", &offset.css_transform()).is_err() {
                log::warn!("parallax transform rejected");
            }
        }
    }
}

/// Sequencer plus the timer that drives it and the request it awaits.
struct Director {
    sequencer: RefCell<Sequencer>,
    timer: RefCell<Option<Timeout>>,
    hook: RefCell<Option<Function>>,
    request: RefCell<Option<AbortController>>,
}

impl Director {
    fn apply(&self, effect: Option<Effect>) {
        let Some(effect) = effect else { return };
        let hook = self.hook.borrow().clone();
        if let Some(hook) = hook {
            let phase = JsValue::from_str(effect.phase().as_str());
            let name = JsValue::from_str(effect.as_str());
            if let Err(e) = hook.call2(&JsValue::NULL, &phase, &name) {
                log::error!("phase hook threw: {:?}", e);
            }
        }
    }
}

/// Arm the host timer for whatever dwell the sequencer has pending.
fn arm(director: &Rc<Director>) {
    let Some(wait) = director.sequencer.borrow().dwell_remaining() else {
        director.timer.borrow_mut().take();
        return;
    };
    let weak: Weak<Director> = Rc::downgrade(director);
    let timeout = Timeout::new(timer_millis(wait), move || {
        let Some(director) = weak.upgrade() else { return };
        let effect = director.sequencer.borrow_mut().expire();
        director.apply(effect);
        arm(&director);
    });
    *director.timer.borrow_mut() = Some(timeout);
}

#[wasm_bindgen]
pub struct Stage {
    config: Rc<Config>,
    director: Rc<Director>,
    pointer: Rc<RefCell<Pointer>>,
    layers: Rc<Vec<Layer>>,
    listeners: Vec<EventListener>,
}

#[wasm_bindgen]
impl Stage {
    /// Mount the landing page.
    ///
    /// Element ids that are missing, or canvases without a 2D context,
    /// are skipped: the rest of the page keeps working.
    #[wasm_bindgen(constructor)]
    pub fn new(
        particles_id: &str,
        rain_id: &str,
        trail_id: &str,
        background_id: &str,
        config: Option<String>,
    ) -> Result<Stage, JsValue> {
        let config = match config {
            Some(json) => Config::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Config::default(),
        };
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let (w, h) = viewport(&window);

        let mut layers = Vec::new();
        if let Some(surface) = canvas(&document, particles_id, w, h) {
            let sim = Particles::with_count(config.particles, w, h, entropy());
            layers.push(Layer::mount(Box::new(sim), surface));
        }
        if let Some(surface) = canvas(&document, rain_id, w, h) {
            let sim = Rain::with_count(config.drops, w, h, entropy());
            layers.push(Layer::mount(Box::new(sim), surface));
        }
        let layers = Rc::new(layers);

        let pointer = Rc::new(RefCell::new(Pointer {
            trail: Trail::new(config.trail_len),
            parallax: Parallax::new(config.parallax_strength),
            surface: canvas(&document, trail_id, w, h),
            background: element(&document, background_id),
            viewport: (w as f32, h as f32),
        }));

        let director = Rc::new(Director {
            sequencer: RefCell::new(Sequencer::new(&config)),
            timer: RefCell::new(None),
            hook: RefCell::new(None),
            request: RefCell::new(None),
        });
        arm(&director);

        let listeners = vec![
            {
                let pointer = pointer.clone();
                EventListener::new(&window, "mousemove", move |event: &Event| {
                    let Some(event) = event.dyn_ref::<MouseEvent>() else { return };
                    let point = Point::new(event.client_x() as f32, event.client_y() as f32);
                    pointer.borrow_mut().sample(point);
                })
            },
            {
                let pointer = pointer.clone();
                let layers = layers.clone();
                EventListener::new(&window, "resize", move |_event: &Event| {
                    let Some(window) = web_sys::window() else { return };
                    let (w, h) = viewport(&window);
                    for layer in layers.iter() {
                        layer.resize(w, h);
                    }
                    let mut p = pointer.borrow_mut();
                    p.viewport = (w as f32, h as f32);
                    if let Some(surface) = p.surface.as_mut() {
                        surface.resize(w, h);
                    }
                })
            },
        ];

        log::info!("stage mounted: {}x{}, {} canvas layers", w, h, layers.len());

        Ok(Stage { config: Rc::new(config), director, pointer, layers, listeners })
    }

    /// `hook(phase, effect)` is called on every phase change.
    #[wasm_bindgen(js_name = onPhase)]
    pub fn on_phase(&self, hook: Function) {
        *self.director.hook.borrow_mut() = Some(hook);
    }

    pub fn phase(&self) -> String {
        self.director.sequencer.borrow().phase().as_str().to_string()
    }

    pub fn tab(&self) -> String {
        self.director.sequencer.borrow().tab().as_str().to_string()
    }

    pub fn enter(&self) {
        let effect = self.director.sequencer.borrow_mut().enter();
        if effect.is_some() {
            self.director.apply(effect);
            arm(&self.director);
        }
    }

    #[wasm_bindgen(js_name = selectTab)]
    pub fn select_tab(&self, tab: &str) -> Result<bool, JsValue> {
        let tab = Tab::parse(tab).ok_or_else(|| JsValue::from_str(&format!("unknown tab {:?}", tab)))?;
        Ok(self.director.sequencer.borrow_mut().select_tab(tab))
    }

    // ------------------------------------------------------------------
    // Form
    // ------------------------------------------------------------------

    #[wasm_bindgen(js_name = selectImage)]
    pub fn select_image(&self, bytes: Vec<u8>) {
        self.director.sequencer.borrow_mut().studio_mut().select_image(bytes);
    }

    #[wasm_bindgen(js_name = setOccasion)]
    pub fn set_occasion(&self, occasion: &str) -> Result<(), JsValue> {
        let occasion: Occasion = occasion.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.director.sequencer.borrow_mut().studio_mut().set_occasion(occasion);
        Ok(())
    }

    #[wasm_bindgen(js_name = setGender)]
    pub fn set_gender(&self, gender: &str) -> Result<(), JsValue> {
        let gender: Gender = gender.parse().map_err(|e: String| JsValue::from_str(&e))?;
        self.director.sequencer.borrow_mut().studio_mut().set_gender(gender);
        Ok(())
    }

    #[wasm_bindgen(js_name = setBirthday)]
    pub fn set_birthday(&self, birthday: &str) {
        self.director.sequencer.borrow_mut().studio_mut().set_birthday(birthday);
    }

    #[wasm_bindgen(js_name = setStyle)]
    pub fn set_style(&self, style: &str) {
        self.director.sequencer.borrow_mut().studio_mut().set_style(style);
    }

    /// Resolves to the object URL of the generated outfit, rejects with
    /// the user-visible error text.
    pub fn submit(&self) -> Promise {
        let director = self.director.clone();
        let config = self.config.clone();
        future_to_promise(async move {
            let request = director
                .sequencer
                .borrow_mut()
                .studio_mut()
                .begin_submit()
                .map_err(|e| JsValue::from_str(e.user_message()))?;

            let outcome = match client::controller() {
                Ok(abort) => {
                    *director.request.borrow_mut() = Some(abort.clone());
                    let outcome = client::generate(&config, &request, &abort).await;
                    director.request.borrow_mut().take();
                    outcome
                }
                Err(e) => Err(e),
            };

            let mut seq = director.sequencer.borrow_mut();
            if seq.is_torn_down() {
                if let Ok(url) = &outcome {
                    client::revoke(url);
                }
            }
            let settled = match seq.studio_mut().complete(outcome) {
                Ok(entry) => Ok(JsValue::from_str(&entry.image)),
                Err(e) => Err(JsValue::from_str(e.user_message())),
            };
            settled
        })
    }

    #[wasm_bindgen(js_name = inFlight)]
    pub fn in_flight(&self) -> bool {
        self.director.sequencer.borrow().studio().in_flight()
    }

    pub fn error(&self) -> Option<String> {
        self.director.sequencer.borrow().studio().error().map(str::to_string)
    }

    pub fn result(&self) -> Option<String> {
        self.director.sequencer.borrow().studio().result().map(|e| e.image.clone())
    }

    #[wasm_bindgen(js_name = wardrobeLen)]
    pub fn wardrobe_len(&self) -> usize {
        self.director.sequencer.borrow().studio().wardrobe().len()
    }

    #[wasm_bindgen(js_name = wardrobeImage)]
    pub fn wardrobe_image(&self, index: usize) -> Option<String> {
        self.director.sequencer.borrow().studio().wardrobe().get(index).map(|e| e.image.clone())
    }

    #[wasm_bindgen(js_name = wardrobeDescription)]
    pub fn wardrobe_description(&self, index: usize) -> Option<String> {
        self.director.sequencer.borrow().studio().wardrobe().get(index).map(|e| e.description.clone())
    }

    #[wasm_bindgen(js_name = layerCount)]
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    #[wasm_bindgen(js_name = trailLen)]
    pub fn trail_len(&self) -> usize {
        self.pointer.borrow().trail.len()
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        self.listeners.clear();
        self.director.timer.borrow_mut().take();
        if let Some(abort) = self.director.request.borrow_mut().take() {
            abort.abort();
        }
        let mut seq = self.director.sequencer.borrow_mut();
        seq.teardown();
        for entry in seq.studio().wardrobe() {
            client::revoke(&entry.image);
        }
        log::info!("stage torn down");
    }
}

fn viewport(window: &Window) -> (u32, u32) {
    let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32;
    (dim(window.inner_width()), dim(window.inner_height()))
}

fn element(document: &Document, id: &str) -> Option<HtmlElement> {
    let el = document.get_element_by_id(id);
    if el.is_none() {
        log::warn!("#{} not found, skipping", id);
    }
    el?.dyn_into::<HtmlElement>().ok()
}

fn canvas(document: &Document, id: &str, w: u32, h: u32) -> Option<Canvas2d> {
    let canvas = element(document, id)?.dyn_into::<HtmlCanvasElement>().ok()?;
    let surface = Canvas2d::attach(canvas, w, h);
    if surface.is_none() {
        log::warn!("#{} has no 2d context, skipping", id);
    }
    surface
}

fn entropy() -> u32 {
    (js_sys::Math::random() * u32::MAX as f64) as u32
}
