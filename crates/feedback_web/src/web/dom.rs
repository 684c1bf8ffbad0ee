use std::str::FromStr;

use feedback::error::{FeedbackError, Result};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, EventTarget, HtmlElement, NodeList, Window};

pub(super) fn js_err(context: &str, v: JsValue) -> FeedbackError {
    FeedbackError::Dom(format!("{context}: {}", describe(&v)))
}

pub(super) fn describe(v: &JsValue) -> String {
    v.as_string().unwrap_or_else(|| format!("{v:?}"))
}

pub(super) fn window() -> Result<Window> {
    web_sys::window().ok_or_else(|| FeedbackError::Dom("no window".to_string()))
}

pub(super) fn document() -> Result<Document> {
    window()?
        .document()
        .ok_or_else(|| FeedbackError::Dom("no document".to_string()))
}

pub(super) fn by_id(doc: &Document, id: &str) -> Option<Element> {
    doc.get_element_by_id(id)
}

pub(super) fn require_id(doc: &Document, id: &str) -> Result<Element> {
    by_id(doc, id).ok_or_else(|| FeedbackError::Dom(format!("missing #{id}")))
}

pub(super) fn query_first(doc: &Document, selector: &str) -> Option<Element> {
    doc.query_selector(selector).ok().flatten()
}

pub(super) fn query_all(doc: &Document, selector: &str) -> Vec<Element> {
    doc.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

pub(super) fn query_all_in(root: &Element, selector: &str) -> Vec<Element> {
    root.query_selector_all(selector)
        .map(elements)
        .unwrap_or_default()
}

fn elements(list: NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|n| n.dyn_into::<Element>().ok())
        .collect()
}

pub(super) fn create(doc: &Document, tag: &str) -> Result<Element> {
    doc.create_element(tag)
        .map_err(|e| js_err(&format!("create_element({tag})"), e))
}

pub(super) fn append(parent: &Element, child: &Element) -> Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| js_err("append_child", e))
}

pub(super) fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

pub(super) fn remove_class(el: &Element, class: &str) {
    let _ = el.class_list().remove_1(class);
}

pub(super) fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

pub(super) fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

pub(super) fn clear_children(el: &Element) {
    el.set_text_content(None);
}

pub(super) fn set_color(el: &Element, color: &str) {
    if let Some(h) = el.dyn_ref::<HtmlElement>() {
        let _ = h.style().set_property("color", color);
    }
}

/// Blocking alert; the only user-facing error surface on these pages.
pub(super) fn alert(message: &str) {
    if let Some(w) = web_sys::window() {
        let _ = w.alert_with_message(message);
    }
}

/// Attaches a listener for the life of the page. The closure is leaked, so
/// only use this on elements that are never rebuilt; rebuilt children go
/// through [`delegate`].
pub(super) fn listen<F>(target: &EventTarget, event: &str, f: F) -> Result<()>
where
    F: FnMut(web_sys::Event) + 'static,
{
    let cb = Closure::wrap(Box::new(f) as Box<dyn FnMut(web_sys::Event)>);
    target
        .add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())
        .map_err(|e| js_err(&format!("add_event_listener({event})"), e))?;
    cb.forget();
    Ok(())
}

/// One listener on `container` serving every current and future descendant
/// matching `selector`. `f` receives the matched element.
pub(super) fn delegate<F>(container: &Element, event: &str, selector: &str, mut f: F) -> Result<()>
where
    F: FnMut(Element) + 'static,
{
    let root = container.clone();
    let selector = selector.to_string();
    listen(container, event, move |e| {
        let hit = e
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .and_then(|t| t.closest(&selector).ok().flatten())
            .filter(|el| root.contains(Some(el.as_ref())));
        if let Some(el) = hit {
            f(el);
        }
    })
}

/// Typed `data-*` value; `None` when absent or unparsable.
pub(super) fn data<T: FromStr>(el: &Element, name: &str) -> Option<T> {
    el.get_attribute(name)?.parse().ok()
}

pub(super) fn listen_once<F>(target: &EventTarget, event: &str, f: F) -> Result<()>
where
    F: FnOnce() + 'static,
{
    let cb = Closure::once_into_js(f);
    target
        .add_event_listener_with_callback(event, cb.unchecked_ref())
        .map_err(|e| js_err(&format!("add_event_listener({event})"), e))
}

pub(super) fn set_timeout<F>(ms: u32, f: F) -> Result<i32>
where
    F: FnOnce() + 'static,
{
    let cb = Closure::once_into_js(f);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), ms as i32)
        .map_err(|e| js_err("setTimeout", e))
}

pub(super) fn clear_timeout(handle: i32) {
    if let Some(w) = web_sys::window() {
        w.clear_timeout_with_handle(handle);
    }
}

pub(super) fn viewport_width() -> f64 {
    web_sys::window()
        .and_then(|w| w.inner_width().ok())
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}
