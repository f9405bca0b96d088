/// DevProxy - Chrome Extension popup for local virtual hosts
/// Built with Rust + WASM + Yew

pub mod changes;
pub mod collapse;
pub mod grouping;
pub mod notify;
pub mod prefs;
pub mod session;
pub mod vhost;
pub mod ui;

use wasm_bindgen::prelude::*;

// Set up panic hook for better error messages in the browser console
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
}

// Re-export base-domain extraction for JavaScript access
#[wasm_bindgen]
pub fn base_domain(hostname: &str) -> String {
    grouping::base_domain(hostname)
}

// Start the Yew app for the popup
#[wasm_bindgen]
pub fn start_popup() {
    yew::Renderer::<ui::popup::App>::new().render();
}
