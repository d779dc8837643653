use crate::dom::{self, Document, TRIGGER_CLASS, TRIGGER_STYLE, fill_target};
use crate::generator::generate;
use tracing::warn;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventInit, HtmlElement, HtmlInputElement};

const ATTACHED_KEY: &str = "generatorAttached";

#[derive(Clone)]
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn current() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self { document })
    }
}

fn report<T>(what: &str, result: Result<T, JsValue>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!(error = ?err, "{} failed", what);
            None
        }
    }
}

impl Document for WebDocument {
    type Element = HtmlElement;

    fn element_by_id(&self, id: &str) -> Option<HtmlElement> {
        self.document.get_element_by_id(id)?.dyn_into().ok()
    }

    fn is_attached(&self, element: &HtmlElement) -> bool {
        element.dataset().get(ATTACHED_KEY).as_deref() == Some("1")
    }

    fn mark_attached(&mut self, element: &HtmlElement) {
        report("mark", element.dataset().set(ATTACHED_KEY, "1"));
    }

    fn create_trigger(&mut self, label: &str) -> Option<HtmlElement> {
        let button: HtmlElement = report("create", self.document.create_element("button"))?
            .dyn_into()
            .ok()?;
        report("set type", button.set_attribute("type", "button"))?;
        button.set_class_name(TRIGGER_CLASS);
        button.set_text_content(Some(label));
        let style = button.style();
        for (property, value) in TRIGGER_STYLE {
            report("style", style.set_property(property, value));
        }
        Some(button)
    }

    fn insert_after(&mut self, anchor: &HtmlElement, element: &HtmlElement) {
        report("insert", anchor.insert_adjacent_element("afterend", element));
    }

    fn bind_trigger(&mut self, trigger: &HtmlElement, target: &HtmlElement) {
        let mut doc = self.clone();
        let target = target.clone();
        let handler = Closure::<dyn FnMut()>::new(move || {
            fill_target(&mut doc, &target);
        });
        report(
            "bind",
            trigger.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref()),
        );
        handler.forget();
    }

    fn set_value(&mut self, element: &HtmlElement, value: &str) {
        if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        }
    }

    fn focus(&mut self, element: &HtmlElement) {
        report("focus", element.focus());
    }

    fn dispatch_change(&mut self, element: &HtmlElement) {
        let init = EventInit::new();
        init.set_bubbles(true);
        if let Some(event) = report("change", Event::new_with_event_init_dict("change", &init)) {
            report("dispatch", element.dispatch_event(&event));
        }
    }
}

#[wasm_bindgen(start)]
pub fn install() {
    let Some(mut doc) = WebDocument::current() else {
        return;
    };

    if doc.document.ready_state() != "loading" {
        dom::install_defaults(&mut doc);
        return;
    }

    let target = doc.document.clone();
    let handler = Closure::<dyn FnMut()>::new(move || {
        dom::install_defaults(&mut doc);
    });
    report(
        "defer",
        target.add_event_listener_with_callback("DOMContentLoaded", handler.as_ref().unchecked_ref()),
    );
    handler.forget();
}

#[wasm_bindgen(js_name = generatePassword)]
pub fn generate_password() -> String {
    let password = generate();
    if !password.is_secure() {
        warn!("password generated without a secure random source");
    }
    password.to_string()
}

#[wasm_bindgen(js_name = attachTrigger)]
pub fn attach_trigger(target_id: &str, label: &str) -> bool {
    WebDocument::current()
        .map(|mut doc| dom::attach(&mut doc, target_id, label).is_some())
        .unwrap_or(false)
}
