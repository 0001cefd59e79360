// canvas.rs - 2D canvas surface and frame loop
//
// A `Layer` pairs one simulation with one canvas and keeps a
// self-rescheduling animation frame alive. Dropping the layer drops the
// pending `AnimationFrame`, which cancels it.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo::render::{AnimationFrame, request_animation_frame};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::render::{Rgba, Surface};
use crate::sim::{Animated, FRAME_RATE};

// Long gaps (background tab) are not replayed.
const MAX_FRAME_DT: f32 = 0.1;

pub struct Canvas2d {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    w: f64,
    h: f64,
}

impl Canvas2d {
    /// Size `canvas` to the viewport and grab its 2D context. `None` when
    /// the context is unavailable; callers skip the layer.
    pub fn attach(canvas: HtmlCanvasElement, w: u32, h: u32) -> Option<Self> {
        canvas.set_width(w);
        canvas.set_height(h);
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, ctx, w: w as f64, h: h as f64 })
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        self.w = w as f64;
        self.h = h as f64;
    }
}

impl Surface for Canvas2d {
    fn clear(&mut self) {
        self.ctx.clear_rect(0.0, 0.0, self.w, self.h);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgba) {
        self.ctx.begin_path();
        if self.ctx.arc(x as f64, y as f64, radius.max(0.0) as f64, 0.0, TAU).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        self.ctx.begin_path();
        self.ctx.move_to(from.0 as f64, from.1 as f64);
        self.ctx.line_to(to.0 as f64, to.1 as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }
}

struct LayerState {
    sim: Box<dyn Animated>,
    surface: Canvas2d,
    frame: Option<AnimationFrame>,
    last: Option<f64>,
}

pub struct Layer {
    state: Rc<RefCell<LayerState>>,
}

impl Layer {
    pub fn mount(sim: Box<dyn Animated>, surface: Canvas2d) -> Self {
        let state = Rc::new(RefCell::new(LayerState { sim, surface, frame: None, last: None }));
        schedule(&state);
        Self { state }
    }

    /// Resize the canvas and re-seed the simulation for the new bounds.
    pub fn resize(&self, w: u32, h: u32) {
        let mut s = self.state.borrow_mut();
        s.surface.resize(w, h);
        s.sim.resize(w, h);
    }
}

impl Drop for Layer {
    fn drop(&mut self) {
        // Cancels the pending frame; the callback only holds a Weak.
        self.state.borrow_mut().frame.take();
    }
}

fn schedule(state: &Rc<RefCell<LayerState>>) {
    let weak = Rc::downgrade(state);
    let handle = request_animation_frame(move |now| {
        let Some(state) = weak.upgrade() else { return };
        {
            let mut s = state.borrow_mut();
            s.frame.take();

            let dt = match s.last {
                Some(last) => (((now - last) / 1000.0) as f32).clamp(0.0, MAX_FRAME_DT),
                None => 1.0 / FRAME_RATE,
            };
            s.last = Some(now);

            let LayerState { sim, surface, .. } = &mut *s;
            sim.frame(dt, surface);
        }
        schedule(&state);
    });
    state.borrow_mut().frame = Some(handle);
}
