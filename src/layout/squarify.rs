use super::slice::{slice, slice_band};
use super::{normalize, Rect, Rounding};

/// Squarified layout: one rectangle per weight, tiling `target`, in input order.
///
/// Each step picks how many of the leading weights go into the next band along
/// the long axis, choosing the count whose worst cell aspect ratio is
/// smallest. The band is sliced with [`slice`] and the loop continues on the
/// remaining weights and the remaining space.
pub fn squarify(weights: &[f64], target: Rect, rounding: Rounding) -> Vec<Rect> {
    if weights.len() < 2 {
        return slice(weights, target, rounding);
    }
    if normalize(weights).is_none() {
        return Vec::new();
    }

    let mut result = Vec::with_capacity(weights.len());
    let mut remaining = weights;
    let mut area = target;

    while !remaining.is_empty() {
        // A single trailing weight, or a zero-sum tail, fills what is left.
        let factors = match normalize(remaining) {
            Some(factors) if remaining.len() > 1 => factors,
            _ => {
                slice_band(remaining, area, rounding, &mut result);
                break;
            }
        };

        let mid = best_split(&factors, area);
        let (band, rest) = if mid + 1 == remaining.len() {
            (area, Rect::new(area.x, area.y, 0.0, 0.0))
        } else {
            let accum: f64 = factors[..=mid].iter().sum();
            area.split(accum, rounding)
        };

        slice_band(&remaining[..=mid], band, rounding, &mut result);
        remaining = &remaining[mid + 1..];
        area = rest;
    }

    result
}

/// Score of every candidate split of `weights` inside `target`.
///
/// Entry `i` is the worst normalized aspect ratio (1.0 = square) among the
/// cells the band `[0..=i]` would hold. Degenerate cells score infinity.
pub fn split_scores(weights: &[f64], target: Rect) -> Vec<f64> {
    normalize(weights)
        .map(|factors| scores(&factors, target).collect())
        .unwrap_or_default()
}

/// Index of the last weight in the first band; ties go to the lowest index.
pub fn best_split(factors: &[f64], target: Rect) -> usize {
    let mut best = 0;
    let mut best_score = f64::INFINITY;
    for (i, score) in scores(factors, target).enumerate() {
        if score < best_score {
            best = i;
            best_score = score;
        }
    }
    best
}

fn scores(factors: &[f64], target: Rect) -> impl Iterator<Item = f64> + '_ {
    let (long, short) = if target.is_portrait() {
        (target.h, target.w)
    } else {
        (target.w, target.h)
    };

    let mut accum = 0.0;
    let mut min_f = f64::INFINITY;
    let mut max_f = 0.0_f64;
    factors.iter().map(move |&f| {
        accum += f;
        min_f = min_f.min(f);
        max_f = max_f.max(f);
        // The normalized ratio is quasi-convex in the cell's factor, so the
        // worst cell is either the smallest or the largest one.
        norm_aspect(long, short, accum, min_f).max(norm_aspect(long, short, accum, max_f))
    })
}

/// Aspect ratio of a cell holding `factor` inside a band holding `accum`,
/// folded so it is always >= 1.
fn norm_aspect(long: f64, short: f64, accum: f64, factor: f64) -> f64 {
    let ratio = (long * accum) / (short * factor / accum);
    if !ratio.is_finite() || ratio <= 0.0 {
        return f64::INFINITY;
    }
    if ratio < 1.0 {
        1.0 / ratio
    } else {
        ratio
    }
}
