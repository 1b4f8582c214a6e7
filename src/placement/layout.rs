//! Target rectangles computed from a monitor's work area

use crate::display::Rect;

/// Size used for `Normal` placement when the window's rectangle is unknown
pub const FALLBACK_NORMAL_SIZE: (i32, i32) = (1000, 700);

/// Offset of a `Normal` window from the work area's top-left corner
pub const NORMAL_INSET: i32 = 20;

/// Medium-size rectangle fully inside the work area
///
/// Moving a window here before maximizing makes Windows associate it with the
/// target monitor; maximizing a window that straddles two monitors picks
/// whichever holds most of it.
pub fn park_rect(work_area: Rect) -> Rect {
    let wa_w = work_area.width();
    let wa_h = work_area.height();
    let width = (wa_w - 200).max(800).min(1200);
    let height = (wa_h - 200).max(600).min(900);
    let x = work_area.left + ((wa_w - width) / 2).max(20);
    let y = work_area.top + ((wa_h - height) / 3).max(20);
    Rect::from_origin_size(x, y, width, height)
}

/// Rectangle for `Normal` placement: current size, clamped to fit, near the
/// work area's top-left corner
pub fn normal_rect(work_area: Rect, current: Option<Rect>) -> Rect {
    let (width, height) = match current {
        Some(cur) => (
            cur.width().min(work_area.width() - 40).max(300),
            cur.height().min(work_area.height() - 40).max(200),
        ),
        None => FALLBACK_NORMAL_SIZE,
    };
    Rect::from_origin_size(
        work_area.left + NORMAL_INSET,
        work_area.top + NORMAL_INSET,
        width,
        height,
    )
}
