use crate::constants::MAX_FRAME_DT_SEC;
use crate::dom;
use crate::input;
use crate::render;
use crate::texture::DecodedImage;
use globe_core::{Gallery, Theme};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Everything one running globe gallery owns. Shared between the frame loop,
/// the DOM event closures and the exported handle.
pub struct FrameContext {
    pub gallery: Gallery<web::HtmlElement>,
    pub gpu: render::GpuState,
    pub container: web::HtmlElement,
    pub canvas: web::HtmlCanvasElement,
    pub pointer: input::PointerState,
    pub last_instant: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) -> anyhow::Result<()> {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant)
            .as_secs_f32()
            .min(MAX_FRAME_DT_SEC);
        self.last_instant = now;

        let outcome = self.gallery.step(dt_sec);
        if let Some(cursor) = outcome.cursor {
            dom::set_cursor(&self.container, cursor.as_css());
        }

        self.gpu
            .resize_if_needed(self.canvas.width(), self.canvas.height());
        self.gpu
            .render(&self.gallery)
            .map_err(|e| anyhow::anyhow!("render error: {:?}", e))
    }

    /// Follow the container's current size. Repeated calls with an unchanged
    /// layout change nothing.
    pub fn resize(&mut self) {
        let (w, h) = dom::css_size(&self.container);
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        let (w_px, h_px) = dom::sync_canvas_backing_size(&self.canvas, w, h);
        self.gallery.set_viewport(w as f32, h as f32);
        self.gpu.resize_if_needed(w_px, h_px);
    }

    pub fn apply_theme(&mut self, theme: Theme) {
        self.gpu.set_palette(theme.palette());
        log::debug!("[theme] {:?}", theme);
    }

    /// Upload a loaded image and give its item a quad.
    pub fn install_texture(&mut self, index: usize, image: &DecodedImage) {
        if let Err(e) = self
            .gallery
            .install_mesh(index, image.natural_width, image.natural_height)
        {
            log::error!("[texture] item {}: {}", index, e);
            return;
        }
        self.gpu.upload_item_texture(index, image);
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        match frame_ctx.try_borrow_mut() {
            Ok(mut ctx) => {
                if let Err(e) = ctx.frame() {
                    log::error!("[frame] {:?}", e);
                }
            }
            Err(_) => log::warn!("[frame] state busy, frame skipped"),
        }
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    let Some(w) = web::window() else {
        return;
    };
    if let Some(cb) = tick.borrow().as_ref() {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
