mod driver_tests;
mod tiling_tests;

use pivotmap_rs::Rect;

/// Area of the overlap between two rectangles (0 when they only touch).
pub fn overlap(a: &Rect, b: &Rect) -> f64 {
    let w = (a.x + a.w).min(b.x + b.w) - a.x.max(b.x);
    let h = (a.y + a.h).min(b.y + b.h) - a.y.max(b.y);
    if w > 0.0 && h > 0.0 {
        w * h
    } else {
        0.0
    }
}

/// Whether `inner` lies within `outer`, allowing `eps` of slack.
pub fn contains(outer: &Rect, inner: &Rect, eps: f64) -> bool {
    inner.x >= outer.x - eps
        && inner.y >= outer.y - eps
        && inner.x + inner.w <= outer.x + outer.w + eps
        && inner.y + inner.h <= outer.y + outer.h + eps
}
