pub mod runner;
pub mod storage;
pub mod surface;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

use orrery_engine::{EngineConfig, InputEvent, PropertyValue, ViewportRect};

pub use runner::{EngineRunner, HostEvent};
pub use storage::LocalStorageStore;
pub use surface::Surface;

/// `localStorage` key holding saved configurations.
pub const STORAGE_KEY: &str = "orrery.configurations";

thread_local! {
    static RUNNER: RefCell<Option<EngineRunner<LocalStorageStore>>> = RefCell::new(None);
    static SURFACE: RefCell<Option<Surface>> = RefCell::new(None);
}

fn with_runner<R>(f: impl FnOnce(&mut EngineRunner<LocalStorageStore>) -> R) -> R {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        let runner = borrow.as_mut().expect("Engine not initialized. Call orrery_init() first.");
        f(runner)
    })
}

fn js_err(e: impl ToString) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Create the engine. `config_json` may be a partial `EngineConfig`;
/// `log_level` is one of error/warn/info/debug/trace (default info).
#[wasm_bindgen]
pub fn orrery_init(config_json: Option<String>, log_level: Option<String>) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let level = log_level
        .and_then(|l| l.parse::<log::Level>().ok())
        .unwrap_or(log::Level::Info);
    let _ = console_log::init_with_level(level);

    let config = match config_json {
        Some(json) => EngineConfig::from_json(&json).map_err(js_err)?,
        None => EngineConfig::default(),
    };
    let runner = EngineRunner::new(config, LocalStorageStore::new(STORAGE_KEY)).map_err(js_err)?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("orrery: initialized");
    Ok(())
}

/// Attach a canvas to `#container_id` and start the scene. The host then
/// calls `orrery_frame` from `requestAnimationFrame` until it returns false.
#[wasm_bindgen]
pub fn orrery_mount(container_id: &str) -> Result<(), JsValue> {
    let mut surface = Surface::create(container_id)?;
    let rect = surface.rect();
    let pixel_ratio = Surface::pixel_ratio();

    if let Err(e) = with_runner(|r| r.mount(rect, pixel_ratio)) {
        surface.destroy();
        return Err(js_err(e));
    }
    surface.fit(&rect, pixel_ratio);
    surface.listen(|event, rect: ViewportRect| {
        with_runner(|r| {
            r.set_viewport_origin(rect.left, rect.top);
            r.push_input(event);
        })
    })?;

    SURFACE.with(|cell| {
        if let Some(old) = cell.borrow_mut().replace(surface) {
            old.destroy();
        }
    });
    Ok(())
}

/// Stop the frame loop, release resources and remove the canvas.
#[wasm_bindgen]
pub fn orrery_unmount() {
    if let Some(surface) = SURFACE.with(|cell| cell.borrow_mut().take()) {
        surface.destroy();
    }
    with_runner(|r| r.unmount());
}

#[wasm_bindgen]
pub fn orrery_canvas() -> Option<web_sys::HtmlCanvasElement> {
    SURFACE.with(|cell| cell.borrow().as_ref().map(|s| s.canvas().clone()))
}

/// Run one frame. Returns whether another frame should be requested.
#[wasm_bindgen]
pub fn orrery_frame() -> bool {
    with_runner(|r| r.frame(js_sys::Date::now()))
}

// ---- Input (for hosts that deliver events themselves) ----

#[wasm_bindgen]
pub fn orrery_pointer_down(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_move(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
}

#[wasm_bindgen]
pub fn orrery_pointer_up(x: f32, y: f32) {
    with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
}

#[wasm_bindgen]
pub fn orrery_wheel(delta_y: f32) {
    with_runner(|r| r.push_input(InputEvent::Wheel { delta_y }));
}

#[wasm_bindgen]
pub fn orrery_resize(width: f32, height: f32, pixel_ratio: f32) {
    with_runner(|r| {
        r.push_input(InputEvent::Resize {
            width,
            height,
            pixel_ratio,
        })
    });
}

// ---- Body editing and selection ----

#[wasm_bindgen]
pub fn orrery_set_number_property(body_id: &str, property: &str, value: f32) -> Result<(), JsValue> {
    with_runner(|r| r.set_property(body_id, property, PropertyValue::Number(value))).map_err(js_err)
}

#[wasm_bindgen]
pub fn orrery_set_text_property(body_id: &str, property: &str, value: &str) -> Result<(), JsValue> {
    with_runner(|r| r.set_property(body_id, property, PropertyValue::Text(value.to_string()))).map_err(js_err)
}

#[wasm_bindgen]
pub fn orrery_select(body_id: Option<String>) -> Result<(), JsValue> {
    with_runner(|r| r.select(body_id.as_deref())).map_err(js_err)
}

#[wasm_bindgen]
pub fn orrery_selected_body() -> Option<String> {
    with_runner(|r| r.selected_body())
}

#[wasm_bindgen]
pub fn orrery_selected_body_json() -> String {
    with_runner(|r| r.selected_descriptor_json())
}

#[wasm_bindgen]
pub fn orrery_bodies_json() -> String {
    with_runner(|r| r.bodies_json())
}

// ---- Saved configurations ----

#[wasm_bindgen]
pub fn orrery_save_configuration(name: &str) -> String {
    with_runner(|r| r.save(name).to_json())
}

#[wasm_bindgen]
pub fn orrery_list_configurations() -> String {
    with_runner(|r| r.list().to_json())
}

#[wasm_bindgen]
pub fn orrery_load_configuration(id: &str) -> String {
    with_runner(|r| r.load(id).to_json())
}

#[wasm_bindgen]
pub fn orrery_save_status() -> String {
    with_runner(|r| r.save_status_json())
}

// ---- Host queues ----

#[wasm_bindgen]
pub fn orrery_drain_commands() -> String {
    with_runner(|r| r.drain_commands_json())
}

#[wasm_bindgen]
pub fn orrery_drain_events() -> String {
    with_runner(|r| r.drain_events_json())
}

// ---- Frame buffer accessors ----

#[wasm_bindgen]
pub fn get_buffer_ptr() -> *const f32 {
    with_runner(|r| r.buffer_ptr())
}

#[wasm_bindgen]
pub fn get_buffer_total_floats() -> u32 {
    with_runner(|r| r.buffer_total_floats())
}

#[wasm_bindgen]
pub fn get_max_instances() -> u32 {
    with_runner(|r| r.max_instances())
}

#[wasm_bindgen]
pub fn get_max_lights() -> u32 {
    with_runner(|r| r.max_lights())
}

#[wasm_bindgen]
pub fn get_frame_counter() -> f64 {
    with_runner(|r| r.frame_counter())
}
