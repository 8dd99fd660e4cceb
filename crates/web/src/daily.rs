//! `window.DailyIframe` bindings behind the [`CallWidget`] contract.

use std::cell::RefCell;

use call_widget::{
    joined_channel, CallFrame, CallFrameConfig, CallWidget, JoinedSignal, WidgetError,
};
use serde::Serialize;
use tracing::{debug, error};
use wasm_bindgen::{prelude::*, JsCast};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlElement};

const JOINED_MEETING_EVENT: &str = "joined-meeting";

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = DailyIframe)]
    type DailyIframe;

    #[wasm_bindgen(static_method_of = DailyIframe, js_name = createFrame, catch)]
    fn create_frame(
        container: &HtmlElement,
        properties: &JsValue,
    ) -> Result<DailyIframe, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn join(this: &DailyIframe, options: &JsValue) -> Result<js_sys::Promise, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &DailyIframe, event: &str, handler: &js_sys::Function);
}

#[derive(Serialize)]
struct JoinOptions<'a> {
    url: &'a str,
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| e.to_string())
}

fn describe(value: &JsValue) -> String {
    value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{value:?}"))
}

pub struct DailyWidget {
    document: Document,
}

impl DailyWidget {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl CallWidget for DailyWidget {
    type Frame = DailyFrame;

    fn create_frame(
        &self,
        container_id: &str,
        config: &CallFrameConfig,
    ) -> Result<DailyFrame, WidgetError> {
        let container = self
            .document
            .get_element_by_id(container_id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| WidgetError::MissingContainer(container_id.to_string()))?;
        let properties = to_js(config).map_err(WidgetError::Create)?;
        let frame = DailyIframe::create_frame(&container, &properties)
            .map_err(|e| WidgetError::Create(describe(&e)))?;
        debug!(container_id, "call frame created");
        Ok(DailyFrame {
            frame,
            listeners: RefCell::new(Vec::new()),
        })
    }
}

/// A mounted call frame. Event listeners live as long as the frame does.
pub struct DailyFrame {
    frame: DailyIframe,
    listeners: RefCell<Vec<Closure<dyn FnMut(JsValue)>>>,
}

impl CallFrame for DailyFrame {
    fn join(&self, room_url: &str) -> Result<(), WidgetError> {
        let join_error = |reason: String| WidgetError::Join {
            url: room_url.to_string(),
            reason,
        };
        let options = to_js(&JoinOptions { url: room_url }).map_err(join_error)?;
        let pending = self
            .frame
            .join(&options)
            .map_err(|e| join_error(describe(&e)))?;

        let url = room_url.to_string();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = JsFuture::from(pending).await {
                error!(room_url = %url, reason = %describe(&e), "call frame failed to join");
            }
        });
        Ok(())
    }

    fn on_joined(&self) -> JoinedSignal {
        let (mut notifier, signal) = joined_channel();
        let listener = Closure::<dyn FnMut(JsValue)>::new(move |_event: JsValue| {
            if notifier.notify() {
                debug!("local participant joined the call");
            }
        });
        self.frame
            .on(JOINED_MEETING_EVENT, listener.as_ref().unchecked_ref());
        self.listeners.borrow_mut().push(listener);
        signal
    }
}
