mod callbacks;
mod console;
mod dom;
mod mount;

use std::cell::RefCell;

use shared::SparklesConfig;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::Element;

pub use mount::{SparklesError, SparklesHandle};

/// Containers carrying this attribute are mounted on start. Its value is an optional JSON
/// configuration object.
const AUTO_MOUNT_ATTRIBUTE: &str = "data-sparkles";

thread_local! {
    static AUTO_MOUNTED: RefCell<Vec<SparklesHandle>> = RefCell::new(Vec::new());
}

fn window() -> web_sys::Window {
    web_sys::window().expect("no global `window` exists")
}

fn document() -> web_sys::Document {
    window()
        .document()
        .expect("should have a document on window")
}

fn auto_mount(element: &Element) -> Result<SparklesHandle, SparklesError> {
    let config = match element.get_attribute(AUTO_MOUNT_ATTRIBUTE) {
        Some(json) if !json.trim().is_empty() => SparklesConfig::from_json(&json)?,
        _ => SparklesConfig::default(),
    };

    SparklesHandle::mount_with(element, config)
}

#[wasm_bindgen(start)]
fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console::init();

    let containers = document().query_selector_all(&format!("[{AUTO_MOUNT_ATTRIBUTE}]"))?;

    for index in 0..containers.length() {
        let Some(element) = containers
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };

        match auto_mount(&element) {
            Ok(handle) => AUTO_MOUNTED.with(|mounted| mounted.borrow_mut().push(handle)),
            Err(error) => log::warn!("could not mount sparkles: {error}"),
        }
    }

    Ok(())
}
