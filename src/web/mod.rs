// web/ - Browser host (wasm32 only)

mod canvas;
mod client;
mod stage;

pub use stage::Stage;

use std::time::Duration;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
    // Redirect panic messages to console.error
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("styly-engine loaded");
}

/// Clamp to the range `setTimeout` honours.
fn timer_millis(wait: Duration) -> u32 {
    wait.as_millis().min(i32::MAX as u128) as u32
}
