use shared::{Dimensions, FrameHandle, Host, Surface};
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{CanvasRenderingContext2d, Element, Event, EventTarget, HtmlCanvasElement};

use crate::{document, window};

/// An event listener that stays registered only while attached; dropping it detaches it.
pub struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
    attached: bool,
}

impl Listener {
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Listener {
        Listener {
            target: target.clone(),
            kind,
            closure,
            attached: false,
        }
    }

    pub fn attach(&mut self) -> Result<(), JsValue> {
        if !self.attached {
            self.target.add_event_listener_with_callback(
                self.kind,
                self.closure.as_ref().unchecked_ref(),
            )?;
            self.attached = true;
        }

        Ok(())
    }

    pub fn detach(&mut self) -> Result<(), JsValue> {
        if self.attached {
            self.target.remove_event_listener_with_callback(
                self.kind,
                self.closure.as_ref().unchecked_ref(),
            )?;
            self.attached = false;
        }

        Ok(())
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(error) = self.detach() {
            log::warn!("could not remove {} listener: {:?}", self.kind, error);
        }
    }
}

/// The `<canvas>` 2D context a mounted instance paints into.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Looks the canvas up by element id. `None` if it is missing, not a canvas, or has
    /// no 2D context.
    pub fn lookup(identifier: &str) -> Option<CanvasSurface> {
        let canvas = document()
            .get_element_by_id(identifier)?
            .dyn_into::<HtmlCanvasElement>()
            .ok()?;

        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;

        Some(CanvasSurface { canvas, context })
    }

    pub fn is_connected(&self) -> bool {
        self.canvas.is_connected()
    }
}

impl Surface for CanvasSurface {
    type Error = JsValue;

    fn resize(&mut self, dimensions: Dimensions) -> Result<(), JsValue> {
        self.canvas.set_width(dimensions.width);
        self.canvas.set_height(dimensions.height);

        Ok(())
    }

    fn paint_background(&mut self, dimensions: Dimensions, color: &str) -> Result<(), JsValue> {
        let (width, height) = (dimensions.width as f64, dimensions.height as f64);

        self.context.clear_rect(0.0, 0.0, width, height);
        #[allow(deprecated)]
        self.context.set_fill_style(&JsValue::from_str(color));
        self.context.fill_rect(0.0, 0.0, width, height);

        Ok(())
    }

    fn fill_circle(&mut self, center: (f64, f64), radius: f64, color: &str) -> Result<(), JsValue> {
        self.context.begin_path();
        self.context
            .arc(center.0, center.1, radius, 0.0, std::f64::consts::PI * 2.0)?;
        #[allow(deprecated)]
        self.context.set_fill_style(&JsValue::from_str(color));
        self.context.fill();

        Ok(())
    }

    fn set_blur(&mut self, radius: f64) -> Result<(), JsValue> {
        self.context.set_filter(&format!("blur({radius}px)"));

        Ok(())
    }

    fn reset_filter(&mut self) -> Result<(), JsValue> {
        self.context.set_filter("none");

        Ok(())
    }
}

/// [`Host`] backed by the DOM: a container element, a canvas found by id, the window
/// `resize` event and `requestAnimationFrame`.
pub struct DomHost {
    container: Element,
    canvas: HtmlCanvasElement,
    identifier: String,
    surface: Option<CanvasSurface>,
    resize: Option<Listener>,
    frame: Option<Closure<dyn FnMut()>>,
    pending: Option<FrameHandle>,
}

impl DomHost {
    pub fn new(container: Element, canvas: HtmlCanvasElement, identifier: &str) -> DomHost {
        DomHost {
            container,
            canvas,
            identifier: identifier.to_string(),
            surface: None,
            resize: None,
            frame: None,
            pending: None,
        }
    }

    /// Installs the callbacks that deliver resize notifications and frames back to the
    /// owning instance.
    pub fn install(&mut self, resize: Listener, frame: Closure<dyn FnMut()>) {
        self.resize = Some(resize);
        self.frame = Some(frame);
    }

    /// The handle of the frame that just fired.
    pub fn take_pending(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Host for DomHost {
    type Surface = CanvasSurface;

    fn measure_container(&self) -> Option<Dimensions> {
        if !self.container.is_connected() {
            return None;
        }

        Some(Dimensions::new(
            self.container.client_width().max(0) as u32,
            self.container.client_height().max(0) as u32,
        ))
    }

    fn surface(&mut self) -> Option<&mut CanvasSurface> {
        if !self.surface.as_ref().is_some_and(CanvasSurface::is_connected) {
            self.surface = CanvasSurface::lookup(&self.identifier);
        }

        self.surface.as_mut()
    }

    fn subscribe_resize(&mut self) {
        if let Some(resize) = self.resize.as_mut() {
            if let Err(error) = resize.attach() {
                log::warn!("could not subscribe to resize: {error:?}");
            }
        }
    }

    fn unsubscribe_resize(&mut self) {
        if let Some(resize) = self.resize.as_mut() {
            if let Err(error) = resize.detach() {
                log::warn!("could not unsubscribe from resize: {error:?}");
            }
        }
    }

    fn request_frame(&mut self) -> Option<FrameHandle> {
        let frame = self.frame.as_ref()?;

        match window().request_animation_frame(frame.as_ref().unchecked_ref()) {
            Ok(id) => {
                let handle = FrameHandle(id);
                self.pending = Some(handle);

                Some(handle)
            }
            Err(error) => {
                log::warn!("requestAnimationFrame failed: {error:?}");

                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if let Err(error) = window().cancel_animation_frame(handle.0) {
            log::warn!("cancelAnimationFrame failed: {error:?}");
        }

        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
