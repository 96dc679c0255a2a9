use crate::constants::{FILTER_BUTTON_SELECTOR, THEME_REREAD_DELAY_MS, THEME_TOGGLE_SELECTOR};
use crate::dom;
use crate::frame::FrameContext;
use globe_core::Theme;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Hook the globe into the page's existing controls: theme toggle, gallery
/// filter buttons and window resizes.
pub fn wire_page_handlers(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    wire_theme_toggle(document, ctx.clone());
    wire_filter_buttons(document, ctx.clone());
    wire_window_resize(ctx);
}

fn wire_theme_toggle(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    dom::add_click_listeners(document, THEME_TOGGLE_SELECTOR, move |_| {
        let ctx = ctx.clone();
        // The page flips `body.dark-theme` in its own handler.
        dom::set_timeout(
            move || {
                if let Some(doc) = dom::window_document() {
                    let theme = Theme::from_dark_flag(dom::body_is_dark(&doc));
                    ctx.borrow_mut().apply_theme(theme);
                }
            },
            THEME_REREAD_DELAY_MS,
        );
    });
}

fn wire_filter_buttons(document: &web::Document, ctx: Rc<RefCell<FrameContext>>) {
    let wired = dom::add_click_listeners(document, FILTER_BUTTON_SELECTOR, move |button| {
        let key = filter_key(button);
        ctx.borrow_mut().gallery.apply_filter(&key);
    });
    log::info!("[page] {} filter buttons wired", wired);
}

fn wire_window_resize(ctx: Rc<RefCell<FrameContext>>) {
    let closure = Closure::wrap(Box::new(move || {
        ctx.borrow_mut().resize();
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

fn filter_key(button: &web::Element) -> String {
    button
        .get_attribute("data-filter")
        .unwrap_or_else(|| "all".to_string())
}

/// Filter selected by the page's `.gallery-filter.active` button, if any.
pub fn active_filter(document: &web::Document) -> Option<String> {
    let selector = format!("{}.active", FILTER_BUTTON_SELECTOR);
    document
        .query_selector(&selector)
        .ok()
        .flatten()
        .map(|el| filter_key(&el))
}
