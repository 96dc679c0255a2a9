use crate::constants::{CATEGORY_LABEL_SELECTOR, GALLERY_ITEM_SELECTOR, TITLE_SELECTOR};
use globe_core::ItemEntry;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Gallery entry whose back-reference is the page element it came from.
pub type PageEntry = ItemEntry<web::HtmlElement>;

/// Collect every `.gallery-item` in document order. Items without an image
/// are skipped with a warning.
pub fn collect_entries(document: &web::Document) -> anyhow::Result<Vec<PageEntry>> {
    let nodes = document
        .query_selector_all(GALLERY_ITEM_SELECTOR)
        .map_err(|e| anyhow::anyhow!("query {}: {:?}", GALLERY_ITEM_SELECTOR, e))?;
    let mut entries = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(el) = nodes
            .item(i)
            .and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        match entry_from_element(el) {
            Some(entry) => entries.push(entry),
            None => log::warn!("[loader] gallery item {} has no image, skipped", i),
        }
    }
    log::info!("[loader] loaded {} gallery items", entries.len());
    Ok(entries)
}

fn entry_from_element(el: web::HtmlElement) -> Option<PageEntry> {
    let img = el
        .query_selector("img")
        .ok()
        .flatten()
        .and_then(|n| n.dyn_into::<web::HtmlImageElement>().ok())?;
    let label = child_text(&el, CATEGORY_LABEL_SELECTOR).unwrap_or_default();
    let title = child_text(&el, TITLE_SELECTOR).unwrap_or_else(|| img.alt());
    let category = el.get_attribute("data-category").unwrap_or_default();
    Some(ItemEntry {
        image_source: img.src(),
        title,
        category,
        label,
        source: el,
    })
}

fn child_text(el: &web::Element, selector: &str) -> Option<String> {
    el.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|n| n.text_content())
        .filter(|t| !t.is_empty())
}
