mod utils;

pub mod backdrop;
pub mod canvas;
pub mod color;
pub mod config;
pub mod field;
pub mod nav;
pub mod particle;
pub mod runtime;
pub mod scroll;
pub mod sky;
pub mod stars;
pub mod state;
pub mod surface;
pub mod surge;
pub mod trail;

use log::{info, Level};
use wasm_bindgen::prelude::*;
use web_sys::console;

pub use backdrop::Backdrop;
pub use color::Color;
pub use config::{BackdropConfig, BackdropOptions};
pub use runtime::{autoplay_muted, mount, BackdropHandle};
pub use sky::SkyTheme;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
    let _ = console_log::init_with_level(Level::Debug);
    info!("studio-backdrop initialized");
}

/// Interpolates two `#RRGGBB` colors and returns `rgb(r, g, b)`.
#[wasm_bindgen]
pub fn lerp_color(from: &str, to: &str, t: f64) -> Result<String, JsValue> {
    let from = Color::from_hex(from)?;
    let to = Color::from_hex(to)?;
    Ok(from.lerp(to, t).to_css())
}

#[wasm_bindgen]
pub fn scroll_progress(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    scroll::scroll_progress(scroll_y, document_height, viewport_height)
}

pub struct Timer<'a> {
    name: &'a str,
}

impl<'a> Timer<'a> {
    pub fn new(name: &'a str) -> Timer<'a> {
        console::time_with_label(name);
        Timer { name }
    }
}

impl<'a> Drop for Timer<'a> {
    fn drop(&mut self) {
        console::time_end_with_label(self.name);
    }
}
