use std::{cell::RefCell, rc::Weak};

use shared::{PointerSlot, Sparkles};
use wasm_bindgen::JsCast;
use web_sys::{Event, HtmlCanvasElement, MouseEvent, TouchEvent};

use crate::dom::DomHost;

pub type SparklesRef = Weak<RefCell<Sparkles<DomHost>>>;

pub fn on_resize(sparkles: &SparklesRef) {
    if let Some(sparkles) = sparkles.upgrade() {
        sparkles.borrow_mut().on_resize();
    }
}

pub fn on_frame(sparkles: &SparklesRef) {
    if let Some(sparkles) = sparkles.upgrade() {
        let mut sparkles = sparkles.borrow_mut();

        if let Some(handle) = sparkles.host_mut().take_pending() {
            sparkles.on_frame(handle);
        }
    }
}

fn publish_relative(pointer: &PointerSlot, canvas: &HtmlCanvasElement, client: (i32, i32)) {
    let bound = canvas.get_bounding_client_rect();

    pointer.publish((
        client.0 as f64 - bound.left(),
        client.1 as f64 - bound.top(),
    ));
}

pub fn on_mouse_move(pointer: &PointerSlot, canvas: &HtmlCanvasElement, event: Event) {
    if let Some(event) = event.dyn_ref::<MouseEvent>() {
        publish_relative(pointer, canvas, (event.client_x(), event.client_y()));
    }
}

pub fn on_touch_move(pointer: &PointerSlot, canvas: &HtmlCanvasElement, event: Event) {
    if let Some(event) = event.dyn_ref::<TouchEvent>() {
        if let Some(touch) = event.touches().item(0) {
            publish_relative(pointer, canvas, (touch.client_x(), touch.client_y()));
        }
    }
}
