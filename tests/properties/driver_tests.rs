//! Property tests for whole-tree layouts built from pivot rows

use pivotmap_rs::render::colors::DivergingColorMap;
use pivotmap_rs::tree::build_tree;
use pivotmap_rs::tree::row::PivotRow;
use pivotmap_rs::{compute_layout, Rect, Style, StyleConfig, TreeSource};
use proptest::prelude::*;

use super::contains;

/// Strategy for three-level pivot rows with positive weights
fn rows_strategy() -> impl Strategy<Value = Vec<PivotRow>> {
    prop::collection::vec(
        (0u8..3, 0u8..3, 0u8..6, 1u32..1_000, -0.2f64..0.2),
        1..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .map(|(g, s, n, weight, value)| {
                PivotRow::new(
                    &[format!("g{g}"), format!("s{s}"), format!("n{n}")],
                    f64::from(weight),
                    value,
                )
            })
            .collect()
    })
}

fn style_strategy() -> impl Strategy<Value = Style> {
    prop_oneof![Just(Style::Classic), Just(Style::Clustered)]
}

proptest! {
    /// Property: the outermost level tiles the root exactly
    #[test]
    fn top_level_tiles_root(
        rows in rows_strategy(),
        style in style_strategy(),
        w in 50u32..1_200,
        h in 50u32..900,
    ) {
        let tree = build_tree(&rows);
        let root = Rect::new(1.0, 1.0, f64::from(w), f64::from(h));
        let config = StyleConfig { style, ..StyleConfig::default() };
        let cache = compute_layout(&tree, root, &config, &DivergingColorMap::default()).unwrap();

        let area: f64 = cache.depth(1).iter().map(|e| e.rect.area()).sum();
        prop_assert_eq!(area, root.area());
        prop_assert_eq!(cache.max_depth(), tree.max_depth());
    }

    /// Property: every nested cell sits inside a cell one level up
    #[test]
    fn nested_cells_stay_inside_parents(
        rows in rows_strategy(),
        style in style_strategy(),
        w in 50u32..1_200,
        h in 50u32..900,
    ) {
        let tree = build_tree(&rows);
        let root = Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
        let config = StyleConfig { style, ..StyleConfig::default() };
        let cache = compute_layout(&tree, root, &config, &DivergingColorMap::default()).unwrap();

        for depth in 2..=cache.max_depth() {
            for child in cache.depth(depth) {
                let inside = cache
                    .depth(depth - 1)
                    .iter()
                    .any(|parent| contains(&parent.rect, &child.rect, 1e-9));
                prop_assert!(inside, "{} at depth {} has no parent", child.label, depth);
            }
        }
    }

    /// Property: re-running layout on the same tree gives the same cache
    #[test]
    fn layout_is_idempotent(rows in rows_strategy(), w in 50u32..1_200, h in 50u32..900) {
        let tree = build_tree(&rows);
        let root = Rect::new(0.0, 0.0, f64::from(w), f64::from(h));
        let config = StyleConfig::default();
        let colormap = DivergingColorMap::default();
        let first = compute_layout(&tree, root, &config, &colormap).unwrap();
        let second = compute_layout(&tree, root, &config, &colormap).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Property: one cell per distinct row path at the deepest level
    #[test]
    fn every_row_gets_a_cell(rows in rows_strategy()) {
        let tree = build_tree(&rows);
        let root = Rect::new(0.0, 0.0, 800.0, 600.0);
        let cache = compute_layout(&tree, root, &StyleConfig::default(), &DivergingColorMap::default()).unwrap();

        let mut paths: Vec<_> = rows.iter().map(|r| r.path.clone()).collect();
        paths.sort();
        paths.dedup();
        prop_assert_eq!(cache.depth(3).len(), paths.len());
    }
}
