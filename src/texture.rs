use crate::constants::MAX_TEXTURE_DIM;
use crate::dom;
use globe_core::texture_extent;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// RGBA8 pixels of one loaded gallery image.
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Size of the source image before any downscale.
    pub natural_width: u32,
    pub natural_height: u32,
    pub rgba: Vec<u8>,
}

/// Load `src` through an `<img>` element and read its pixels back through a
/// 2D canvas, downscaled so neither edge exceeds [`MAX_TEXTURE_DIM`].
pub async fn load_image(src: &str) -> anyhow::Result<DecodedImage> {
    let img = web::HtmlImageElement::new().map_err(|e| anyhow::anyhow!("{:?}", e))?;
    img.set_cross_origin(Some("anonymous"));
    let loaded = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(src);
    let result = JsFuture::from(loaded).await;
    img.set_onload(None);
    img.set_onerror(None);
    result.map_err(|_| anyhow::anyhow!("image failed to load: {}", src))?;

    let natural_width = img.natural_width();
    let natural_height = img.natural_height();
    if natural_width == 0 || natural_height == 0 {
        anyhow::bail!("image has no size: {}", src);
    }
    let (width, height) = texture_extent(natural_width, natural_height, MAX_TEXTURE_DIM);

    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas: web::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    canvas.set_width(width);
    canvas.set_height(height);
    let ctx: web::CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("no 2d context"))?
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    ctx.draw_image_with_html_image_element_and_dw_and_dh(
        &img,
        0.0,
        0.0,
        width as f64,
        height as f64,
    )
    .map_err(|e| anyhow::anyhow!("draw_image: {:?}", e))?;
    let data = ctx
        .get_image_data(0.0, 0.0, width as f64, height as f64)
        .map_err(|e| anyhow::anyhow!("get_image_data ({}): {:?}", src, e))?;

    Ok(DecodedImage {
        width,
        height,
        natural_width,
        natural_height,
        rgba: data.data().0,
    })
}
