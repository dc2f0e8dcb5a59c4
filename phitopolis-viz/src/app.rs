//! DOM wiring for the generated page
//!
//! Element ids and `data-*` attributes used here are produced by the site
//! templates in the root crate.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlButtonElement, HtmlCanvasElement, HtmlElement, HtmlInputElement, KeyboardEvent};

use crate::assistant::AssistantController;
use crate::background::{AnimationLoop, Background};
use crate::chat_client;
use crate::dom;
use crate::field::FieldConfig;
use crate::navigation::{CareerTab, Navigator, Page};
use crate::signals::{SignalMetrics, UPDATE_INTERVAL_MS};
use crate::surface::Canvas2DSurface;

/// Seeded from `Math.random()`; the simulation needs variety, not security
fn browser_rng() -> SmallRng {
    SmallRng::seed_from_u64((js_sys::Math::random() * u64::MAX as f64) as u64)
}

// ---------------------------------------------------------------------------
// Network background
// ---------------------------------------------------------------------------

/// A mounted network background
#[wasm_bindgen]
pub struct BackgroundHandle {
    container: HtmlElement,
    background: Rc<RefCell<Background<Canvas2DSurface>>>,
    animation: AnimationLoop,
    resize_cb: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl BackgroundHandle {
    /// Re-read the container size
    pub fn resize(&self) {
        resize_to_container(&self.container, &self.background);
    }

    /// Stop the animation, drop the resize listener and clear the canvas
    pub fn unmount(&self) {
        self.animation.cancel();
        dom::window()
            .remove_event_listener_with_callback("resize", self.resize_cb.as_ref().unchecked_ref())
            .ok();
        self.background.borrow_mut().unmount();
    }
}

fn container_size(container: &HtmlElement) -> (f64, f64) {
    (
        container.client_width() as f64,
        container.client_height() as f64,
    )
}

fn resize_to_container(container: &HtmlElement, background: &RefCell<Background<Canvas2DSurface>>) {
    let (width, height) = container_size(container);
    background.borrow_mut().on_resize(width, height);
}

/// Create a canvas inside `container` and start the animated background
#[wasm_bindgen]
pub fn mount_background(container: HtmlElement) -> Result<BackgroundHandle, JsValue> {
    let canvas: HtmlCanvasElement = dom::document().create_element("canvas")?.dyn_into()?;
    canvas.set_class_name("network-canvas");
    container.append_child(&canvas)?;

    let surface = Canvas2DSurface::new(canvas).map_err(|e| JsValue::from_str(&e))?;
    let (width, height) = container_size(&container);
    let background = Rc::new(RefCell::new(Background::mount(
        width,
        height,
        surface,
        FieldConfig::default(),
        browser_rng(),
    )));

    let bg = background.clone();
    let animation = AnimationLoop::start(move || {
        bg.borrow_mut().advance();
    })?;

    let bg = background.clone();
    let observed = container.clone();
    let resize_cb = Closure::wrap(Box::new(move || {
        resize_to_container(&observed, &bg);
    }) as Box<dyn FnMut()>);
    dom::window().add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())?;

    Ok(BackgroundHandle {
        container,
        background,
        animation,
        resize_cb,
    })
}

// ---------------------------------------------------------------------------
// Chat assistant
// ---------------------------------------------------------------------------

/// A mounted chat widget
#[wasm_bindgen]
pub struct AssistantHandle {
    controller: Rc<RefCell<AssistantController>>,
}

#[wasm_bindgen]
impl AssistantHandle {
    /// Detach the widget; replies still in flight are discarded
    pub fn unmount(&self) {
        self.controller.borrow_mut().close();
    }

    /// Number of transcript entries (including the greeting)
    pub fn transcript_len(&self) -> usize {
        self.controller.borrow().transcript().len()
    }
}

fn render_transcript(controller: &AssistantController) {
    let Ok(list) = dom::get_el("chat-messages") else {
        return;
    };
    list.set_text_content(None);

    let doc = dom::document();
    for message in controller.transcript() {
        let Ok(bubble) = doc.create_element("div") else {
            continue;
        };
        bubble.set_class_name(&format!("msg {}", message.role.as_str()));
        // Text only: replies are never interpreted as markup
        bubble.set_text_content(Some(&message.text));
        list.append_child(&bubble).ok();
    }

    let loading = controller.is_loading();
    if let Ok(indicator) = dom::get_el("chat-loading") {
        indicator.set_hidden(!loading);
    }
    if let Ok(input) = dom::get_typed::<HtmlInputElement>("chat-input") {
        input.set_disabled(loading);
    }
    if let Ok(button) = dom::get_typed::<HtmlButtonElement>("chat-send") {
        button.set_disabled(loading);
    }

    list.set_scroll_top(list.scroll_height());
}

/// Wire the chat widget to `endpoint`
#[wasm_bindgen]
pub fn mount_assistant(endpoint: &str) -> Result<AssistantHandle, JsValue> {
    let controller = Rc::new(RefCell::new(AssistantController::new(Box::new(
        js_sys::Date::now,
    ))));
    render_transcript(&controller.borrow());

    let input: HtmlInputElement = dom::get_typed("chat-input")?;
    let endpoint = endpoint.to_string();

    let send: Rc<dyn Fn()> = {
        let controller = controller.clone();
        let input = input.clone();
        Rc::new(move || {
            controller.borrow_mut().set_input(input.value());
            let Some(request) = controller.borrow_mut().submit() else {
                return;
            };
            input.set_value("");
            render_transcript(&controller.borrow());

            let controller = controller.clone();
            let endpoint = endpoint.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let outcome = chat_client::send(&endpoint, &request).await;
                if let Err(e) = &outcome {
                    dom::warn(&format!("chat request failed: {e}"));
                }
                let applied = controller.borrow_mut().resolve(outcome);
                if applied {
                    render_transcript(&controller.borrow());
                }
            });
        })
    };

    let send_fn = send.clone();
    dom::on_click(&dom::get_el("chat-send")?, move || send_fn());

    let send_fn = send.clone();
    let keydown_cb = Closure::wrap(Box::new(move |e: KeyboardEvent| {
        if e.key() == "Enter" {
            send_fn();
        }
    }) as Box<dyn FnMut(KeyboardEvent)>);
    input.set_onkeydown(Some(keydown_cb.as_ref().unchecked_ref()));
    keydown_cb.forget();

    let chat_window = dom::get_el("chat-window")?;
    dom::on_click(&dom::get_el("chat-toggle")?, move || {
        chat_window.set_hidden(!chat_window.hidden());
    });
    let chat_window = dom::get_el("chat-window")?;
    dom::on_click(&dom::get_el("chat-close")?, move || {
        chat_window.set_hidden(true);
    });

    Ok(AssistantHandle { controller })
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

fn show_page(page: Page) {
    let view = page.view().as_str();
    for section in dom::query_all("[data-view]") {
        let visible = section.get_attribute("data-view").as_deref() == Some(view);
        section.toggle_attribute_with_force("hidden", !visible).ok();
    }
    for link in dom::query_all("nav [data-page]") {
        let active = link.get_attribute("data-page").as_deref() == Some(page.as_str());
        dom::toggle_class(&link, "active", active);
    }
    if let Ok(menu) = dom::get_el("mobile-menu") {
        menu.set_hidden(true);
    }
    dom::window().scroll_to_with_x_and_y(0.0, 0.0);
}

fn show_tab(tab: CareerTab) {
    for panel in dom::query_all("[data-tab-panel]") {
        let visible = panel.get_attribute("data-tab-panel").as_deref() == Some(tab.as_str());
        panel.toggle_attribute_with_force("hidden", !visible).ok();
    }
    for button in dom::query_all("[data-tab]") {
        let active = button.get_attribute("data-tab").as_deref() == Some(tab.as_str());
        dom::toggle_class(&button, "active", active);
    }
}

/// Wire `[data-page]` links, career tabs and the mobile menu
#[wasm_bindgen]
pub fn mount_navigation() -> Result<(), JsValue> {
    let pages = Rc::new(RefCell::new(Navigator::new(Page::Home, show_page)));
    pages.borrow_mut().refresh();

    for el in dom::query_all("[data-page]") {
        let Some(page) = el.get_attribute("data-page").and_then(|s| Page::parse(&s)) else {
            continue;
        };
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            continue;
        };
        let pages = pages.clone();
        dom::on_click(&el, move || {
            pages.borrow_mut().set(page);
        });
    }

    let tabs = Rc::new(RefCell::new(Navigator::new(CareerTab::default(), show_tab)));
    tabs.borrow_mut().refresh();

    for el in dom::query_all("[data-tab]") {
        let Some(tab) = el.get_attribute("data-tab").and_then(|s| CareerTab::parse(&s)) else {
            continue;
        };
        let Ok(el) = el.dyn_into::<HtmlElement>() else {
            continue;
        };
        let tabs = tabs.clone();
        dom::on_click(&el, move || {
            tabs.borrow_mut().set(tab);
        });
    }

    if let (Ok(toggle), Ok(menu)) = (dom::get_el("menu-toggle"), dom::get_el("mobile-menu")) {
        dom::on_click(&toggle, move || menu.set_hidden(!menu.hidden()));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Signal widget
// ---------------------------------------------------------------------------

fn render_signals(metrics: &SignalMetrics) {
    dom::set_text("signal-latency", &metrics.latency_label());
    dom::set_text("signal-alpha", &metrics.alpha_label());
    dom::set_style(
        "signal-latency-bar",
        &format!("width:{:.1}%", metrics.latency_bar_percent()),
    );
}

/// Start the once-a-second metric updates. Returns the interval id.
#[wasm_bindgen]
pub fn start_signals() -> Result<i32, JsValue> {
    let metrics = Rc::new(RefCell::new(SignalMetrics::default()));
    render_signals(&metrics.borrow());

    let mut rng = browser_rng();
    let cb = Closure::wrap(Box::new(move || {
        let mut m = metrics.borrow_mut();
        m.step(&mut rng);
        render_signals(&m);
    }) as Box<dyn FnMut()>);

    let id = dom::window().set_interval_with_callback_and_timeout_and_arguments_0(
        cb.as_ref().unchecked_ref(),
        UPDATE_INTERVAL_MS,
    )?;
    cb.forget();
    Ok(id)
}

// ---------------------------------------------------------------------------
// Page entry point
// ---------------------------------------------------------------------------

/// Everything mounted by [`boot`]
#[wasm_bindgen]
pub struct Site {
    background: Option<BackgroundHandle>,
    assistant: Option<AssistantHandle>,
}

#[wasm_bindgen]
impl Site {
    /// Tear down the background and detach the chat widget
    pub fn unmount(&self) {
        if let Some(bg) = &self.background {
            bg.unmount();
        }
        if let Some(assistant) = &self.assistant {
            assistant.unmount();
        }
    }
}

/// Mount every widget present on the page.
///
/// Missing elements only disable the matching widget.
#[wasm_bindgen]
pub fn boot() -> Site {
    if let Err(e) = mount_navigation() {
        dom::warn(&format!("navigation: {e:?}"));
    }
    if let Err(e) = start_signals() {
        dom::warn(&format!("signals: {e:?}"));
    }

    let background = dom::get_el("network-background")
        .and_then(mount_background)
        .map_err(|e| dom::warn(&format!("background: {e:?}")))
        .ok();

    let assistant = mount_assistant(chat_client::CHAT_ENDPOINT)
        .map_err(|e| dom::warn(&format!("assistant: {e:?}")))
        .ok();

    dom::log("phitopolis: site ready");
    Site {
        background,
        assistant,
    }
}
