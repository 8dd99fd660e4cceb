//! Renders [`ViewState`] onto the page's elements.

use client_core::{CreateHandler, Display, ViewState};
use tracing::warn;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement};

const HIDDEN_CLASS: &str = "hidden";

const ENTRY_ID: &str = "entry";
const CALL_ID: &str = "call";
const PRESENCE_ID: &str = "presence";
const PARTICIPANTS_ID: &str = "participants";
const CREATE_BUTTON_ID: &str = "createRoom";
const INVITE_ID: &str = "invite";

pub struct DomDisplay {
    document: Document,
    create_listener: Option<Closure<dyn FnMut()>>,
}

impl DomDisplay {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            create_listener: None,
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        let element = self.document.get_element_by_id(id);
        if element.is_none() {
            warn!(id, "page element not found");
        }
        element
    }

    fn set_hidden(&self, id: &str, hidden: bool) {
        let Some(element) = self.element(id) else {
            return;
        };
        if let Err(e) = element
            .class_list()
            .toggle_with_force(HIDDEN_CLASS, hidden)
        {
            warn!(id, error = ?e, "failed to toggle visibility");
        }
    }

    fn render_participants(&self, labels: &[String]) -> Result<(), JsValue> {
        let Some(list) = self.element(PARTICIPANTS_ID) else {
            return Ok(());
        };
        list.set_text_content(None);
        for label in labels {
            let item = self.document.create_element("li")?;
            item.set_text_content(Some(label));
            list.append_child(&item)?;
        }
        Ok(())
    }

    fn render_invite(&self, view: &ViewState) {
        let Some(invite) = view.invite() else {
            self.set_hidden(INVITE_ID, true);
            return;
        };
        let Some(anchor) = self
            .element(INVITE_ID)
            .and_then(|el| el.dyn_into::<HtmlAnchorElement>().ok())
        else {
            return;
        };
        anchor.set_href(&invite.href);
        anchor.set_text_content(Some(&invite.label));
        self.set_hidden(INVITE_ID, false);
    }
}

impl Display for DomDisplay {
    fn set_create_handler(&mut self, handler: CreateHandler) {
        let listener = Closure::<dyn FnMut()>::new(move || handler());
        match self
            .element(CREATE_BUTTON_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            Some(button) => button.set_onclick(Some(listener.as_ref().unchecked_ref())),
            None => warn!("room creation control is missing; nothing to wire"),
        }
        self.create_listener = Some(listener);
    }

    fn render(&mut self, view: &ViewState) {
        self.set_hidden(ENTRY_ID, !view.is_entry_visible());
        self.set_hidden(CALL_ID, !view.is_call_visible());
        self.set_hidden(PRESENCE_ID, !view.is_presence_visible());
        if let Err(e) = self.render_participants(view.participants()) {
            warn!(error = ?e, "failed to render participant list");
        }
        self.render_invite(view);
    }
}
