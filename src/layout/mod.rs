pub mod cache;
pub mod driver;
pub mod slice;
pub mod squarify;
pub mod style;

pub use cache::{LayoutCache, LayoutEntry};
pub use driver::{compute_layout, TraversalCursor};
pub use slice::slice;
pub use squarify::squarify;
pub use style::{Insets, LineHeights, Style, StyleConfig, Tiling};

/// An axis-aligned rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Taller than wide. Square rectangles count as landscape.
    pub fn is_portrait(&self) -> bool {
        self.w < self.h
    }

    /// Shrink by `insets`. Too-small rectangles collapse to zero size without
    /// leaving their original bounds.
    pub fn inset(&self, insets: &Insets) -> Self {
        Self {
            x: self.x + insets.left.min(self.w),
            y: self.y + insets.top.min(self.h),
            w: (self.w - insets.left - insets.right).max(0.0),
            h: (self.h - insets.top - insets.bottom).max(0.0),
        }
    }

    /// Split along the long axis at `fraction` of the extent.
    ///
    /// The leading part gets `rounding.apply(extent * fraction)` and the
    /// trailing part gets whatever is left, so the two always tile `self`.
    pub fn split(&self, fraction: f64, rounding: Rounding) -> (Self, Self) {
        if self.is_portrait() {
            let head = rounding.apply(self.h * fraction).clamp(0.0, self.h);
            (
                Self::new(self.x, self.y, self.w, head),
                Self::new(self.x, self.y + head, self.w, self.h - head),
            )
        } else {
            let head = rounding.apply(self.w * fraction).clamp(0.0, self.w);
            (
                Self::new(self.x, self.y, head, self.h),
                Self::new(self.x + head, self.y, self.w - head, self.h),
            )
        }
    }
}

/// How cell sizes snap before they are placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rounding {
    /// Round every size to whole pixels.
    #[default]
    Pixel,
    /// Keep fractional sizes.
    Exact,
}

impl Rounding {
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Rounding::Pixel => value.round(),
            Rounding::Exact => value,
        }
    }
}

/// Normalize weights into fractions of their sum.
///
/// Returns `None` for an empty or zero-sum vector.
pub(crate) fn normalize(weights: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = weights.iter().sum();
    if weights.is_empty() || total <= 0.0 || !total.is_finite() {
        return None;
    }
    Some(weights.iter().map(|w| w / total).collect())
}
