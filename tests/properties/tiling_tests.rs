//! Property tests for single-node layout: slicing and squarifying

use pivotmap_rs::layout::{slice, squarify};
use pivotmap_rs::{Rect, Rounding};
use proptest::prelude::*;

use super::{contains, overlap};

/// Strategy for strictly positive weight vectors
fn weights_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1u32..1_000, 1..30)
        .prop_map(|ws| ws.into_iter().map(f64::from).collect())
}

/// Strategy for integer-aligned target rectangles
fn target_strategy() -> impl Strategy<Value = Rect> {
    (0u32..200, 0u32..200, 1u32..600, 1u32..600).prop_map(|(x, y, w, h)| {
        Rect::new(f64::from(x), f64::from(y), f64::from(w), f64::from(h))
    })
}

fn assert_exact_tiling(rects: &[Rect], target: &Rect) -> Result<(), TestCaseError> {
    let area: f64 = rects.iter().map(Rect::area).sum();
    prop_assert_eq!(area, target.area());
    for (i, a) in rects.iter().enumerate() {
        prop_assert!(a.w >= 0.0 && a.h >= 0.0);
        prop_assert!(contains(target, a, 0.0), "{:?} escapes {:?}", a, target);
        for b in &rects[i + 1..] {
            prop_assert_eq!(overlap(a, b), 0.0, "{:?} overlaps {:?}", a, b);
        }
    }
    Ok(())
}

proptest! {
    /// Property: slicing tiles the target exactly on the pixel grid
    #[test]
    fn slice_tiles_exactly(weights in weights_strategy(), target in target_strategy()) {
        let rects = slice(&weights, target, Rounding::Pixel);
        prop_assert_eq!(rects.len(), weights.len());
        assert_exact_tiling(&rects, &target)?;
    }

    /// Property: squarifying tiles the target exactly on the pixel grid
    #[test]
    fn squarify_tiles_exactly(weights in weights_strategy(), target in target_strategy()) {
        let rects = squarify(&weights, target, Rounding::Pixel);
        prop_assert_eq!(rects.len(), weights.len());
        assert_exact_tiling(&rects, &target)?;
    }

    /// Property: every slice except the last is within half a pixel of its share
    #[test]
    fn slice_sizes_track_weights(weights in weights_strategy(), target in target_strategy()) {
        let rects = slice(&weights, target, Rounding::Pixel);
        let total: f64 = weights.iter().sum();
        let vertical = target.w <= target.h;
        let extent = if vertical { target.h } else { target.w };
        for (rect, weight) in rects.iter().zip(&weights).take(weights.len() - 1) {
            let (start, size) = if vertical {
                (rect.y - target.y, rect.h)
            } else {
                (rect.x - target.x, rect.w)
            };
            // Cells clamped against the end of the target are exempt.
            if start + size < extent {
                prop_assert!((size - extent * weight / total).abs() <= 0.5);
            }
        }
    }

    /// Property: with exact rounding each cell's area matches its share
    #[test]
    fn squarify_areas_are_proportional(weights in weights_strategy(), target in target_strategy()) {
        let rects = squarify(&weights, target, Rounding::Exact);
        let total: f64 = weights.iter().sum();
        for (rect, weight) in rects.iter().zip(&weights) {
            let expected = target.area() * weight / total;
            prop_assert!(
                (rect.area() - expected).abs() <= 1e-6 * target.area().max(1.0),
                "area {} expected {}", rect.area(), expected
            );
        }
    }

    /// Property: with pixel rounding each cell stays near its share
    ///
    /// Every band split and every cell cut moves at most half a pixel along
    /// a side no longer than the target's longest side. There are at most
    /// `n` of each, so no cell drifts more than `n` times that side.
    #[test]
    fn squarify_pixel_areas_stay_near_share(weights in weights_strategy(), target in target_strategy()) {
        let rects = squarify(&weights, target, Rounding::Pixel);
        let total: f64 = weights.iter().sum();
        let bound = weights.len() as f64 * target.w.max(target.h);
        for (rect, weight) in rects.iter().zip(&weights) {
            let expected = target.area() * weight / total;
            prop_assert!(
                (rect.area() - expected).abs() <= bound,
                "area {} expected {} bound {}", rect.area(), expected, bound
            );
        }
    }

    /// Property: output order follows input order
    #[test]
    fn squarify_preserves_order(weights in weights_strategy(), target in target_strategy()) {
        // Give every weight a distinct share so cells can be told apart.
        let distinct: Vec<f64> = weights.iter().enumerate().map(|(i, w)| w * 1_000.0 + i as f64).collect();
        let rects = squarify(&distinct, target, Rounding::Exact);
        let total: f64 = distinct.iter().sum();
        for (rect, weight) in rects.iter().zip(&distinct) {
            let share = rect.area() / target.area();
            prop_assert!((share - weight / total).abs() < 1e-9);
        }
    }

    /// Property: layout is a pure function of its inputs
    #[test]
    fn squarify_is_idempotent(weights in weights_strategy(), target in target_strategy()) {
        prop_assert_eq!(
            squarify(&weights, target, Rounding::Pixel),
            squarify(&weights, target, Rounding::Pixel)
        );
    }
}

#[test]
fn empty_weights_give_no_rectangles() {
    let target = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert!(slice(&[], target, Rounding::Pixel).is_empty());
    assert!(squarify(&[], target, Rounding::Pixel).is_empty());
}

#[test]
fn single_weight_is_the_target() {
    let target = Rect::new(10.0, 20.0, 80.0, 40.0);
    assert_eq!(squarify(&[5.0], target, Rounding::Pixel), vec![target]);
    assert_eq!(slice(&[5.0], target, Rounding::Pixel), vec![target]);
}
