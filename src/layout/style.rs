use std::collections::BTreeMap;
use std::str::FromStr;

use super::Rounding;
use crate::error::ConfigError;

/// Extra space between a label header's text line and the cells below it.
const HEADER_GAP: f64 = 6.0;
/// Horizontal and bottom margin around nested cells under a header.
const HEADER_MARGIN: f64 = 5.0;

/// Presentation style. Each variant fixes how nested cells are inset and
/// which depths carry labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Style {
    /// Header only on the outermost depth; plain padding below it.
    Classic,
    /// Every depth reserves a label header and nests uniformly.
    #[default]
    Clustered,
}

impl Style {
    pub fn name(self) -> &'static str {
        match self {
            Style::Classic => "classic",
            Style::Clustered => "clustered",
        }
    }

    /// Inset applied to a cell at `depth` before its children are laid out.
    pub fn child_insets(self, depth: usize, config: &StyleConfig) -> Insets {
        let header = Insets {
            left: HEADER_MARGIN,
            top: config.line_heights.get(depth) + HEADER_GAP,
            right: HEADER_MARGIN,
            bottom: HEADER_MARGIN,
        };
        match self {
            Style::Clustered => header,
            Style::Classic if depth <= 1 => header,
            Style::Classic => Insets::uniform(config.padding),
        }
    }

    /// Whether cells at `depth` get a text label when `render_depth` levels
    /// are shown.
    pub fn shows_label(self, depth: usize, render_depth: usize) -> bool {
        if depth == 0 || depth > render_depth {
            return false;
        }
        match self {
            Style::Clustered => true,
            Style::Classic => depth == 1 || depth == render_depth,
        }
    }
}

impl FromStr for Style {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(Style::Classic),
            "clustered" => Ok(Style::Clustered),
            other => Err(ConfigError::UnknownStyle(other.to_string())),
        }
    }
}

/// Space removed from each side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Insets {
    pub const fn uniform(pad: f64) -> Self {
        Self {
            left: pad,
            top: pad,
            right: pad,
            bottom: pad,
        }
    }
}

/// Label line height in pixels, per depth. Values are checked on insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct LineHeights {
    by_depth: BTreeMap<usize, f64>,
    fallback: f64,
}

impl LineHeights {
    pub fn new(fallback: f64) -> Result<Self, ConfigError> {
        check_line_height(usize::MAX, fallback)?;
        Ok(Self {
            by_depth: BTreeMap::new(),
            fallback,
        })
    }

    /// Override the line height used for one depth.
    pub fn with_depth(mut self, depth: usize, height: f64) -> Result<Self, ConfigError> {
        check_line_height(depth, height)?;
        self.by_depth.insert(depth, height);
        Ok(self)
    }

    pub fn get(&self, depth: usize) -> f64 {
        self.by_depth.get(&depth).copied().unwrap_or(self.fallback)
    }
}

impl Default for LineHeights {
    fn default() -> Self {
        // 9pt text on the two outer levels, 8pt below.
        Self {
            by_depth: BTreeMap::from([(0, 15.0), (1, 15.0)]),
            fallback: 13.0,
        }
    }
}

fn check_line_height(depth: usize, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidLineHeight { depth, value })
    }
}

/// Which algorithm lays out one node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tiling {
    #[default]
    Squarified,
    /// Plain single row/column slicing.
    Sliced,
}

/// Everything that shapes a layout pass apart from the data and viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub style: Style,
    pub line_heights: LineHeights,
    /// Uniform padding used by [`Style::Classic`] below the outermost depth.
    pub padding: f64,
    pub tiling: Tiling,
    pub rounding: Rounding,
    /// Gap between the viewport edge and the root rectangle.
    pub frame_margin: f64,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            style: Style::default(),
            line_heights: LineHeights::default(),
            padding: 2.0,
            tiling: Tiling::default(),
            rounding: Rounding::default(),
            frame_margin: 1.0,
        }
    }
}

impl StyleConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(ConfigError::InvalidPadding(self.padding));
        }
        if !(self.frame_margin.is_finite() && self.frame_margin >= 0.0) {
            return Err(ConfigError::InvalidFrameMargin(self.frame_margin));
        }
        Ok(())
    }
}
