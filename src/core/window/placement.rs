//! Where the popup goes: just above the pointer, or below it when there is
//! no room above, always inside the work area of the display under the pointer.

use crate::shared::types::{Display, Point, Rect, Size, WindowPlacement};

/// Display containing `cursor`, otherwise the one whose bounds are closest to it.
pub fn nearest_display(displays: &[Display], cursor: Point) -> Option<&Display> {
    displays
        .iter()
        .find(|display| display.bounds.contains(cursor))
        .or_else(|| {
            displays.iter().min_by(|a, b| {
                a.bounds
                    .distance_to(cursor)
                    .total_cmp(&b.bounds.distance_to(cursor))
            })
        })
}

/// Converts a pointer position in logical points to physical pixels, using the
/// scale factor of the monitor it falls on. `monitors` pairs physical bounds
/// with scale factors; a point on no monitor is returned unchanged.
pub fn logical_to_physical(point: Point, monitors: &[(Rect, f64)]) -> Point {
    monitors
        .iter()
        .find_map(|(bounds, scale)| {
            let logical = Rect::new(
                bounds.x / scale,
                bounds.y / scale,
                bounds.width / scale,
                bounds.height / scale,
            );
            logical
                .contains(point)
                .then(|| Point::new(point.x * scale, point.y * scale))
        })
        .unwrap_or(point)
}

pub fn compute_placement(cursor: Point, window: Size, work_area: Rect, offset: f64) -> WindowPlacement {
    let mut y = cursor.y - window.height - offset;
    if y < work_area.y {
        y = cursor.y + offset;
    }
    // Top edge wins when the window is taller than the work area.
    let y = y.min(work_area.bottom() - window.height).max(work_area.y);

    // Same order for X: right edge first, then the left edge wins.
    let x = (cursor.x - window.width / 2.0)
        .min(work_area.right() - window.width)
        .max(work_area.x);

    WindowPlacement { x, y }
}
