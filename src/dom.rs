use crate::constants::DARK_THEME_CLASS;
use std::str::FromStr;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Attach `handler` to every element matching `selector`. The handler gets
/// the element that was clicked.
pub fn add_click_listeners(
    document: &web::Document,
    selector: &str,
    handler: impl Fn(&web::Element) + Clone + 'static,
) -> usize {
    let Ok(nodes) = document.query_selector_all(selector) else {
        return 0;
    };
    let mut wired = 0;
    for i in 0..nodes.length() {
        let Some(el) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<web::Element>().ok())
        else {
            continue;
        };
        let handler = handler.clone();
        let target = el.clone();
        let closure = Closure::wrap(Box::new(move || handler(&target)) as Box<dyn FnMut()>);
        _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
        wired += 1;
    }
    wired
}

/// Size of `el` in CSS pixels.
#[inline]
pub fn css_size(el: &web::Element) -> (f64, f64) {
    let rect = el.get_bounding_client_rect();
    (rect.width(), rect.height())
}

/// Match the canvas backing store to `width` x `height` CSS pixels times the
/// device pixel ratio. Returns the backing size.
pub fn sync_canvas_backing_size(
    canvas: &web::HtmlCanvasElement,
    width: f64,
    height: f64,
) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let w_px = ((width * dpr) as u32).max(1);
    let h_px = ((height * dpr) as u32).max(1);
    if canvas.width() != w_px {
        canvas.set_width(w_px);
    }
    if canvas.height() != h_px {
        canvas.set_height(h_px);
    }
    (w_px, h_px)
}

pub fn body_is_dark(document: &web::Document) -> bool {
    document
        .body()
        .map(|b| b.class_list().contains(DARK_THEME_CLASS))
        .unwrap_or(false)
}

pub fn set_cursor(el: &web::HtmlElement, cursor: &str) {
    _ = el.style().set_property("cursor", cursor);
}

/// Parse a numeric data attribute; absent or malformed values yield `None`.
pub fn parse_attr<T: FromStr>(el: &web::Element, name: &str) -> Option<T> {
    el.get_attribute(name)?.trim().parse().ok()
}

/// `"off"`, `"false"` and `"0"` switch a flag attribute off; anything else,
/// including absence, leaves `default`.
pub fn flag_attr(el: &web::Element, name: &str, default: bool) -> bool {
    match el.get_attribute(name) {
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "off" | "false" | "0"
        ),
        None => default,
    }
}

/// Run `f` once after `delay_ms`.
pub fn set_timeout(f: impl FnOnce() + 'static, delay_ms: i32) {
    let Some(window) = web::window() else {
        return;
    };
    let cb = Closure::once_into_js(f);
    _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(cb.unchecked_ref(), delay_ms);
}
