use super::{normalize, Rect, Rounding};

/// Lay out `weights` as a single row or column that tiles `target` exactly.
///
/// Cells stack vertically when the target is at least as tall as it is wide,
/// horizontally otherwise. Each size is rounded on its own and the offsets
/// follow the rounded sizes, so cells are contiguous; the last cell absorbs
/// the rounding error accumulated by the others. That makes the last cell of
/// a band up to a few rounding units larger or smaller than its share.
///
/// An empty or zero-sum vector yields no rectangles.
pub fn slice(weights: &[f64], target: Rect, rounding: Rounding) -> Vec<Rect> {
    let Some(factors) = normalize(weights) else {
        return Vec::new();
    };
    let mut out = Vec::with_capacity(factors.len());
    slice_factors(&factors, target, rounding, &mut out);
    out
}

/// Slice one band of a larger partition. Unlike [`slice`], a zero-sum band
/// still gets one rectangle per weight (split evenly) so callers keep a
/// rectangle for every input.
pub(crate) fn slice_band(weights: &[f64], target: Rect, rounding: Rounding, out: &mut Vec<Rect>) {
    if weights.is_empty() {
        return;
    }
    match normalize(weights) {
        Some(factors) => slice_factors(&factors, target, rounding, out),
        None => {
            let even = vec![1.0 / weights.len() as f64; weights.len()];
            slice_factors(&even, target, rounding, out);
        }
    }
}

fn slice_factors(factors: &[f64], target: Rect, rounding: Rounding, out: &mut Vec<Rect>) {
    let vertical = target.w <= target.h;
    let extent = if vertical { target.h } else { target.w };
    let last = factors.len() - 1;

    let mut offset = 0.0;
    for (i, &factor) in factors.iter().enumerate() {
        let remaining = (extent - offset).max(0.0);
        // Last cell takes what the rounded sizes before it left over.
        let size = if i == last {
            remaining
        } else {
            rounding.apply(extent * factor).min(remaining)
        };

        let rect = if vertical {
            Rect::new(target.x, target.y + offset, target.w, size)
        } else {
            Rect::new(target.x + offset, target.y, size, target.h)
        };
        out.push(rect);
        offset += size;
    }
}
