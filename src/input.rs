use glam::Vec2;
use web_sys as web;

/// Pointer travel, in CSS pixels, above which a press counts as a drag and
/// the release is not forwarded as a click.
pub const CLICK_SLOP_PX: f32 = 4.0;

/// Press tracking for one pointer over the gallery canvas.
#[derive(Default, Clone, Copy, Debug)]
pub struct PointerState {
    pub last_px: Vec2,
    pub down: bool,
    pub travel: f32,
}

impl PointerState {
    pub fn press(&mut self, px: Vec2) {
        self.last_px = px;
        self.down = true;
        self.travel = 0.0;
    }

    pub fn moved(&mut self, px: Vec2) {
        if self.down {
            self.travel += (px - self.last_px).length();
        }
        self.last_px = px;
    }

    /// End the press and return how far the pointer travelled.
    pub fn release(&mut self) -> f32 {
        self.down = false;
        self.travel
    }
}

#[inline]
pub fn is_click(travel_px: f32) -> bool {
    travel_px <= CLICK_SLOP_PX
}

/// Map a point relative to the element's top-left corner to normalized
/// device coordinates (`[-1, 1]`, +Y up). `None` for an element with no size.
#[inline]
pub fn local_to_ndc(local: Vec2, size: Vec2) -> Option<Vec2> {
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        local.x / size.x * 2.0 - 1.0,
        -(local.y / size.y) * 2.0 + 1.0,
    ))
}

// ---------------- DOM event helpers ----------------
/// Pointer position relative to `el` and the element's CSS size.
#[inline]
pub fn pointer_local_px(ev: &web::MouseEvent, el: &web::Element) -> (Vec2, Vec2) {
    let rect = el.get_bounding_client_rect();
    let local = Vec2::new(
        ev.client_x() as f32 - rect.left() as f32,
        ev.client_y() as f32 - rect.top() as f32,
    );
    (local, Vec2::new(rect.width() as f32, rect.height() as f32))
}

#[inline]
pub fn pointer_ndc(ev: &web::MouseEvent, el: &web::Element) -> Option<Vec2> {
    let (local, size) = pointer_local_px(ev, el);
    local_to_ndc(local, size)
}
