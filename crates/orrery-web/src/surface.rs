//! Output surface: the canvas inside the host container plus its DOM
//! listeners. Listeners only queue input; the engine applies it at the start
//! of the next frame.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, EventTarget, HtmlCanvasElement, HtmlElement, MouseEvent, WheelEvent};

use orrery_engine::{InputEvent, ViewportRect};

/// Element id given to the canvas so the TypeScript renderer can find it.
pub const CANVAS_ID: &str = "orrery-canvas";

type Listener = Closure<dyn FnMut(Event)>;

pub struct Surface {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    listeners: Vec<(EventTarget, &'static str, Listener)>,
}

impl Surface {
    /// Create a canvas inside the element with id `container_id`.
    pub fn create(container_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window.document().ok_or_else(|| JsValue::from_str("no document"))?;
        let container: HtmlElement = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{container_id}")))?
            .dyn_into()?;
        let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
        canvas.set_id(CANVAS_ID);
        container.append_child(&canvas)?;
        Ok(Self {
            container,
            canvas,
            listeners: Vec::new(),
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Container rectangle in client coordinates.
    pub fn rect(&self) -> ViewportRect {
        container_rect(&self.container)
    }

    pub fn pixel_ratio() -> f32 {
        web_sys::window().map_or(1.0, |w| w.device_pixel_ratio() as f32)
    }

    /// Size the canvas backing store for `rect` at `pixel_ratio`.
    pub fn fit(&self, rect: &ViewportRect, pixel_ratio: f32) {
        self.canvas.set_width((rect.width * pixel_ratio).round() as u32);
        self.canvas.set_height((rect.height * pixel_ratio).round() as u32);
    }

    /// Register pointer, wheel and window resize listeners. `sink` receives
    /// every event plus the current container rectangle.
    pub fn listen(&mut self, sink: impl Fn(InputEvent, ViewportRect) + Clone + 'static) -> Result<(), JsValue> {
        let canvas: EventTarget = self.canvas.clone().into();

        for (name, make) in [
            ("mousedown", pointer_down as fn(f32, f32) -> InputEvent),
            ("mousemove", pointer_move),
            ("mouseup", pointer_up),
        ] {
            let container = self.container.clone();
            let sink = sink.clone();
            let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    let input = make(mouse.client_x() as f32, mouse.client_y() as f32);
                    sink(input, container_rect(&container));
                }
            });
            self.add(canvas.clone(), name, listener)?;
        }

        {
            let container = self.container.clone();
            let sink = sink.clone();
            let listener = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
                if let Some(wheel) = event.dyn_ref::<WheelEvent>() {
                    event.prevent_default();
                    sink(
                        InputEvent::Wheel {
                            delta_y: wheel.delta_y() as f32,
                        },
                        container_rect(&container),
                    );
                }
            });
            self.add(canvas, "wheel", listener)?;
        }

        {
            let window: EventTarget = web_sys::window()
                .ok_or_else(|| JsValue::from_str("no window"))?
                .into();
            let container = self.container.clone();
            let canvas = self.canvas.clone();
            let listener = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                let rect = container_rect(&container);
                let pixel_ratio = Self::pixel_ratio();
                canvas.set_width((rect.width * pixel_ratio).round() as u32);
                canvas.set_height((rect.height * pixel_ratio).round() as u32);
                sink(
                    InputEvent::Resize {
                        width: rect.width,
                        height: rect.height,
                        pixel_ratio,
                    },
                    rect,
                );
            });
            self.add(window, "resize", listener)?;
        }

        log::debug!("surface: {} listeners registered", self.listeners.len());
        Ok(())
    }

    fn add(&mut self, target: EventTarget, name: &'static str, listener: Listener) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(name, listener.as_ref().unchecked_ref())?;
        self.listeners.push((target, name, listener));
        Ok(())
    }

    /// Remove every listener and the canvas.
    pub fn destroy(mut self) {
        for (target, name, listener) in self.listeners.drain(..) {
            if let Err(e) = target.remove_event_listener_with_callback(name, listener.as_ref().unchecked_ref()) {
                log::warn!("surface: removing {} listener failed: {:?}", name, e);
            }
        }
        self.canvas.remove();
        log::debug!("surface destroyed");
    }
}

fn container_rect(container: &HtmlElement) -> ViewportRect {
    let r = container.get_bounding_client_rect();
    ViewportRect::new(r.left() as f32, r.top() as f32, r.width() as f32, r.height() as f32)
}

fn pointer_down(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerDown { x, y }
}

fn pointer_move(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMove { x, y }
}

fn pointer_up(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerUp { x, y }
}
