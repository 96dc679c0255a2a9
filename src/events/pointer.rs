use crate::frame::FrameContext;
use crate::input;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type PointerClosure = Closure<dyn FnMut(web::PointerEvent)>;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: Rc<RefCell<FrameContext>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_pointerdown(&w);
    wire_pointerup(&w);
    wire_pointerleave(&w);
    wire_click(&w);
}

fn listen(canvas: &web::HtmlCanvasElement, event: &str, closure: PointerClosure) {
    _ = canvas.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (local, size) = input::pointer_local_px(&ev, &w.canvas);
        let mut ctx = w.ctx.borrow_mut();
        ctx.pointer.moved(local);
        ctx.gallery.set_pointer(input::local_to_ndc(local, size));
        if let Some(orbit) = ctx.gallery.orbit_mut() {
            orbit.drag_to(local, size.y);
        }
    }) as Box<dyn FnMut(_)>);
    listen(&canvas, "pointermove", closure);
}

fn wire_pointerdown(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let (local, _) = input::pointer_local_px(&ev, &w.canvas);
        {
            let mut ctx = w.ctx.borrow_mut();
            ctx.pointer.press(local);
            if let Some(orbit) = ctx.gallery.orbit_mut() {
                orbit.begin_drag(local);
            }
        }
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    listen(&canvas, "pointerdown", closure);
}

fn wire_pointerup(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        {
            let mut ctx = w.ctx.borrow_mut();
            let travel = ctx.pointer.release();
            if let Some(orbit) = ctx.gallery.orbit_mut() {
                orbit.end_drag();
            }
            if !input::is_click(travel) {
                log::debug!("[pointer] drag of {:.1}px, click suppressed", travel);
            }
        }
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
    }) as Box<dyn FnMut(_)>);
    listen(&canvas, "pointerup", closure);
}

fn wire_pointerleave(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
        let mut ctx = w.ctx.borrow_mut();
        // A captured drag keeps reporting moves outside the canvas.
        if !ctx.pointer.down {
            ctx.gallery.set_pointer(None);
        }
    }) as Box<dyn FnMut(_)>);
    listen(&canvas, "pointerleave", closure);
}

/// Forward a click on an item to the page element it came from.
fn wire_click(w: &InputWiring) {
    let w = w.clone();
    let canvas = w.canvas.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        let target = {
            let ctx = w.ctx.borrow();
            if !input::is_click(ctx.pointer.travel) {
                return;
            }
            input::pointer_ndc(&ev, &w.canvas)
                .and_then(|ndc| ctx.gallery.pick_at(ndc))
                .and_then(|i| ctx.gallery.item(i))
                .map(|item| {
                    let name = format!("{} [{}]", item.title, item.label);
                    (name, item.source.clone())
                })
        };
        // The page's own handler may call back into the gallery, so the
        // borrow above is released first.
        if let Some((name, el)) = target {
            log::debug!("[click] forwarding {}", name);
            el.click();
        }
    }) as Box<dyn FnMut(_)>);
    _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
    closure.forget();
}
