#![cfg(target_arch = "wasm32")]
//! WASM front-end that turns a page's `.gallery-item` entries into a WebGPU
//! globe gallery.
//!
//! Pages with a `#globe-gallery-container` element get a gallery on module
//! start; others can call `initGlobeGallery(containerId)` themselves.
use crate::constants::{
    ATTR_ORBIT, ATTR_READY, ATTR_ROTATION_SPEED, ATTR_SPHERE_RADIUS, DEFAULT_CONTAINER_ID,
};
use crate::frame::FrameContext;
use globe_core::{Gallery, GalleryConfig, Theme};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod render;
mod texture;

/// Handle to a running gallery, returned to JavaScript.
#[wasm_bindgen]
pub struct GlobeGallery {
    ctx: Rc<RefCell<FrameContext>>,
}

#[wasm_bindgen]
impl GlobeGallery {
    /// Show only items whose category matches `filter` (`"all"` shows every
    /// item) and re-layout the visible ones. Returns the visible count.
    #[wasm_bindgen(js_name = updateVisibleItems)]
    pub fn update_visible_items(&self, filter: &str) -> usize {
        self.ctx.borrow_mut().gallery.apply_filter(filter)
    }

    pub fn resize(&self) {
        self.ctx.borrow_mut().resize();
    }

    #[wasm_bindgen(js_name = itemCount)]
    pub fn item_count(&self) -> usize {
        self.ctx.borrow().gallery.len()
    }

    #[wasm_bindgen(js_name = visibleCount)]
    pub fn visible_count(&self) -> usize {
        self.ctx.borrow().gallery.visible_count()
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("globe-web starting");

    let Some(document) = dom::window_document() else {
        return Ok(());
    };
    if document.ready_state() == "loading" {
        let closure = Closure::once_into_js(auto_start);
        document.add_event_listener_with_callback("DOMContentLoaded", closure.unchecked_ref())?;
    } else {
        auto_start();
    }
    Ok(())
}

fn auto_start() {
    let present = dom::window_document()
        .and_then(|d| d.get_element_by_id(DEFAULT_CONTAINER_ID))
        .is_some();
    if !present {
        log::debug!("no #{} on this page", DEFAULT_CONTAINER_ID);
        return;
    }
    spawn_local(async move {
        if let Err(e) = init(DEFAULT_CONTAINER_ID).await {
            log::error!("init error: {:?}", e);
        }
    });
}

/// Build a globe gallery inside the element with id `containerId`.
#[wasm_bindgen(js_name = initGlobeGallery)]
pub async fn init_globe_gallery(container_id: String) -> Result<GlobeGallery, JsValue> {
    init(&container_id).await.map_err(|e| {
        log::error!("init error: {:?}", e);
        JsValue::from_str(&format!("{:#}", e))
    })
}

fn read_config(container: &web::Element) -> GalleryConfig {
    let mut config = GalleryConfig::default();
    if let Some(radius) =
        dom::parse_attr::<f32>(container, ATTR_SPHERE_RADIUS).filter(|r| r.is_finite() && *r > 0.0)
    {
        config.sphere_radius = radius;
    }
    if let Some(speed) =
        dom::parse_attr::<f32>(container, ATTR_ROTATION_SPEED).filter(|s| s.is_finite())
    {
        config.rotation_speed = speed;
    }
    config.orbit = dom::flag_attr(container, ATTR_ORBIT, config.orbit);
    config
}

fn create_canvas(
    document: &web::Document,
    container: &web::HtmlElement,
) -> anyhow::Result<web::HtmlCanvasElement> {
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let style = canvas.style();
    _ = style.set_property("display", "block");
    _ = style.set_property("width", "100%");
    _ = style.set_property("height", "100%");
    _ = style.set_property("touch-action", "none");
    container
        .append_child(&canvas)
        .map_err(|e| anyhow::anyhow!("append canvas: {:?}", e))?;
    Ok(canvas)
}

async fn init(container_id: &str) -> anyhow::Result<GlobeGallery> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let container: web::HtmlElement = document
        .get_element_by_id(container_id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", container_id))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if container.has_attribute(ATTR_READY) {
        anyhow::bail!("#{} already hosts a globe gallery", container_id);
    }
    _ = container.set_attribute(ATTR_READY, "pending");
    match build(&document, &container, container_id).await {
        Ok(gallery) => {
            _ = container.set_attribute(ATTR_READY, "true");
            Ok(gallery)
        }
        Err(e) => {
            // A failed init leaves the container free for another attempt.
            _ = container.remove_attribute(ATTR_READY);
            Err(e)
        }
    }
}

async fn build(
    document: &web::Document,
    container: &web::HtmlElement,
    container_id: &str,
) -> anyhow::Result<GlobeGallery> {
    let config = read_config(container);
    let entries = loader::collect_entries(document)?;
    let canvas = create_canvas(document, container)?;
    let (w, h) = dom::css_size(container);
    dom::sync_canvas_backing_size(&canvas, w, h);

    let theme = Theme::from_dark_flag(dom::body_is_dark(document));
    let gpu = match render::GpuState::new(&canvas, theme).await {
        Ok(g) => g,
        Err(e) => {
            canvas.remove();
            return Err(e.context("WebGPU init"));
        }
    };

    let aspect = if h > 0.0 { (w / h) as f32 } else { 1.0 };
    let gallery = Gallery::new(entries, config, aspect);
    log::info!(
        "[init] #{} items={} orbit={} radius={:.2}",
        container_id,
        gallery.len(),
        gallery.config().orbit,
        gallery.config().sphere_radius
    );
    let ctx = Rc::new(RefCell::new(FrameContext {
        gallery,
        gpu,
        container: container.clone(),
        canvas: canvas.clone(),
        pointer: Default::default(),
        last_instant: Instant::now(),
    }));

    events::wire_input_handlers(events::InputWiring {
        canvas,
        ctx: ctx.clone(),
    });
    events::wire_page_handlers(document, ctx.clone());
    if let Some(key) = events::active_filter(document).filter(|k| k != "all") {
        ctx.borrow_mut().gallery.apply_filter(&key);
    }
    spawn_texture_loads(&ctx);
    frame::start_loop(ctx.clone());
    Ok(GlobeGallery { ctx })
}

/// One future per item; each installs its quad when the image arrives.
fn spawn_texture_loads(ctx: &Rc<RefCell<FrameContext>>) {
    let sources: Vec<(usize, String)> = ctx
        .borrow()
        .gallery
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| (i, item.image_source.clone()))
        .collect();
    for (index, src) in sources {
        let ctx = ctx.clone();
        spawn_local(async move {
            match texture::load_image(&src).await {
                Ok(image) => ctx.borrow_mut().install_texture(index, &image),
                Err(e) => log::error!("[texture] item {}: {:?}", index, e),
            }
        });
    }
}
