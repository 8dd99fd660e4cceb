//! Browser entry point: binds the room workflow to the page and to the
//! Daily call widget loaded by `index.html`.

use client_core::{HttpRoomEndpoints, Spawn, ViewController};
use futures::future::LocalBoxFuture;
use tracing::{error, info};
use url::Url;
use wasm_bindgen::{prelude::*, JsCast};

mod daily;
mod dom;

pub use daily::{DailyFrame, DailyWidget};
pub use dom::DomDisplay;

/// Spawns onto the browser's microtask queue.
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

impl Spawn for WasmSpawner {
    fn spawn_local(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

pub type PageController = ViewController<HttpRoomEndpoints, DailyWidget, DomDisplay, WasmSpawner>;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::<dyn FnMut()>::new(boot);
        document.add_event_listener_with_callback(
            "DOMContentLoaded",
            on_ready.as_ref().unchecked_ref(),
        )?;
        on_ready.forget();
    } else {
        boot();
    }
    Ok(())
}

fn boot() {
    match page_controller() {
        Ok(controller) => wasm_bindgen_futures::spawn_local(async move {
            let startup = controller.initialize().await;
            info!(?startup, "page initialized");
        }),
        Err(err) => error!(error = ?err, "failed to set up the page"),
    }
}

fn page_controller() -> Result<PageController, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let location = window.location();

    let page_url = Url::parse(&location.href()?)
        .map_err(|e| JsValue::from_str(&format!("invalid page url: {e}")))?;
    let origin = Url::parse(&location.origin()?)
        .map_err(|e| JsValue::from_str(&format!("invalid page origin: {e}")))?;

    Ok(ViewController::new(
        HttpRoomEndpoints::new(origin),
        DailyWidget::new(document.clone()),
        DomDisplay::new(document),
        WasmSpawner,
        page_url,
    ))
}
