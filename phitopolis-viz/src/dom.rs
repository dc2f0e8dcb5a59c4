use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, Window};

pub fn window() -> Window {
    web_sys::window().expect("no global window")
}

pub fn document() -> Document {
    window().document().expect("no document")
}

/// Look up an element by id
pub fn get_el(id: &str) -> Result<HtmlElement, JsValue> {
    document()
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("no #{id}")))?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{id} not HtmlElement")))
}

/// Look up an element by id and cast it to a specific element type
pub fn get_typed<T: JsCast>(id: &str) -> Result<T, JsValue> {
    get_el(id)?
        .dyn_into()
        .map_err(|_| JsValue::from_str(&format!("#{id} has unexpected element type")))
}

pub fn set_text(id: &str, text: &str) {
    if let Some(el) = document().get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(id: &str, style: &str) {
    if let Some(el) = document().get_element_by_id(id) {
        el.set_attribute("style", style).ok();
    }
}

/// All elements matching a CSS selector
pub fn query_all(selector: &str) -> Vec<Element> {
    let Ok(list) = document().query_selector_all(selector) else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

pub fn toggle_class(el: &Element, class: &str, on: bool) {
    el.class_list().toggle_with_force(class, on).ok();
}

/// Wire a click handler that lives as long as the page
pub fn on_click(el: &HtmlElement, handler: impl FnMut() + 'static) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut()>);
    el.set_onclick(Some(cb.as_ref().unchecked_ref()));
    cb.forget();
}

pub fn request_animation_frame(f: &Closure<dyn FnMut()>) -> Result<i32, JsValue> {
    window().request_animation_frame(f.as_ref().unchecked_ref())
}

pub fn log(message: &str) {
    web_sys::console::log_1(&message.into());
}

pub fn warn(message: &str) {
    web_sys::console::warn_1(&message.into());
}
