use std::{cell::RefCell, fmt, rc::Rc};

use shared::{ConfigError, PointerSlot, Sparkles, SparklesConfig};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Element, Event, HtmlCanvasElement, HtmlElement};

use crate::{
    callbacks::{on_frame, on_mouse_move, on_resize, on_touch_move},
    document,
    dom::{DomHost, Listener},
    window,
};

const CANVAS_CLASS: &str = "block w-full h-full";

/// Errors concerning mounting or configuring a [`SparklesHandle`].
#[derive(Debug)]
pub struct SparklesError(pub String);

impl fmt::Display for SparklesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<ConfigError> for SparklesError {
    fn from(config_error: ConfigError) -> Self {
        SparklesError(config_error.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for SparklesError {
    fn from(error: serde_wasm_bindgen::Error) -> Self {
        SparklesError(format!("invalid sparkles configuration: {error}"))
    }
}

impl From<JsValue> for SparklesError {
    fn from(value: JsValue) -> Self {
        SparklesError(format!("{value:?}"))
    }
}

impl From<Element> for SparklesError {
    fn from(element: Element) -> Self {
        SparklesError(format!("<{}> is not a canvas", element.tag_name()))
    }
}

impl From<SparklesError> for JsValue {
    fn from(error: SparklesError) -> Self {
        js_sys::Error::new(&error.0).into()
    }
}

fn parse_config(value: JsValue) -> Result<SparklesConfig, SparklesError> {
    if value.is_undefined() || value.is_null() {
        Ok(SparklesConfig::default())
    } else {
        Ok(serde_wasm_bindgen::from_value(value)?)
    }
}

fn random_seed() -> u64 {
    (js_sys::Math::random() * (1u64 << 53) as f64) as u64
}

/// A mounted sparkles background, exported to JavaScript as `Sparkles`.
#[wasm_bindgen(js_name = Sparkles)]
pub struct SparklesHandle {
    sparkles: Option<Rc<RefCell<Sparkles<DomHost>>>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen(js_class = Sparkles)]
impl SparklesHandle {
    /// Creates the canvas inside `container` and starts the effect.
    pub fn mount(container: &HtmlElement, config: JsValue) -> Result<SparklesHandle, JsValue> {
        Ok(SparklesHandle::mount_with(container, parse_config(config)?)?)
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: JsValue) -> Result<(), JsValue> {
        let config = parse_config(config)?;

        if let Some(sparkles) = &self.sparkles {
            sparkles.borrow_mut().set_config(config);
        }

        Ok(())
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.sparkles
            .as_ref()
            .map_or(0, |sparkles| sparkles.borrow().particle_count())
    }

    /// Stops the loop, removes every listener and the canvas. Idempotent.
    pub fn destroy(&mut self) {
        self.listeners.clear();

        if let Some(sparkles) = self.sparkles.take() {
            let mut sparkles = sparkles.borrow_mut();

            sparkles.unmount();
            sparkles.host().canvas().remove();
        }
    }
}

impl SparklesHandle {
    pub fn mount_with(
        container: &Element,
        config: SparklesConfig,
    ) -> Result<SparklesHandle, SparklesError> {
        if document().get_element_by_id(&config.id).is_some() {
            log::warn!(
                "an element with id {:?} already exists; sparkles instances sharing it will draw into the same surface",
                config.id
            );
        }

        let canvas = document()
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_id(&config.id);
        canvas.set_class_name(format!("{CANVAS_CLASS} {}", config.class_name).trim_end());
        container.append_child(&canvas)?;

        let pointer = PointerSlot::new();
        let host = DomHost::new(container.clone(), canvas.clone(), &config.id);
        let sparkles = Rc::new(RefCell::new(Sparkles::new(
            host,
            config,
            pointer.clone(),
            random_seed(),
        )));

        {
            let weak = Rc::downgrade(&sparkles);
            let resize = Listener::new(
                &window(),
                "resize",
                Closure::<dyn FnMut(Event)>::new(move |_: Event| on_resize(&weak)),
            );

            let weak = Rc::downgrade(&sparkles);
            let frame = Closure::<dyn FnMut()>::new(move || on_frame(&weak));

            sparkles.borrow_mut().host_mut().install(resize, frame);
        }

        let mut listeners = Vec::new();

        {
            let pointer = pointer.clone();
            let canvas = canvas.clone();

            listeners.push(Listener::new(
                &document(),
                "mousemove",
                Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                    on_mouse_move(&pointer, &canvas, event)
                }),
            ));
        }

        {
            let pointer = pointer.clone();
            let canvas = canvas.clone();

            listeners.push(Listener::new(
                &document(),
                "touchmove",
                Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                    on_touch_move(&pointer, &canvas, event)
                }),
            ));
        }

        for listener in listeners.iter_mut() {
            listener.attach()?;
        }

        sparkles.borrow_mut().mount();

        log::debug!(
            "mounted {:?} with {} particles",
            sparkles.borrow().config().id,
            sparkles.borrow().particle_count()
        );

        Ok(SparklesHandle {
            sparkles: Some(sparkles),
            listeners,
        })
    }
}

impl Drop for SparklesHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}
