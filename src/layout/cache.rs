use std::collections::BTreeMap;

use compact_str::CompactString;

use super::Rect;
use crate::render::colors::Rgba8;

/// One rendered cell.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEntry {
    pub label: CompactString,
    pub rect: Rect,
    /// Secondary aggregate the color was derived from.
    pub value: f64,
    pub color: Rgba8,
}

/// Layout results keyed by depth (root's children at depth 1), each depth in
/// breadth-first visiting order.
///
/// Built in one go by [`compute_layout`](super::compute_layout); there is no
/// way to patch a single entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutCache {
    depths: BTreeMap<usize, Vec<LayoutEntry>>,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn extend<I>(&mut self, depth: usize, entries: I)
    where
        I: IntoIterator<Item = LayoutEntry>,
    {
        self.depths.entry(depth).or_default().extend(entries);
    }

    /// Entries at one depth (empty if that depth holds nothing).
    pub fn depth(&self, depth: usize) -> &[LayoutEntry] {
        self.depths.get(&depth).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Deepest depth holding at least one entry, 0 when empty.
    pub fn max_depth(&self) -> usize {
        self.depths
            .iter()
            .rev()
            .find(|(_, entries)| !entries.is_empty())
            .map(|(&depth, _)| depth)
            .unwrap_or(0)
    }

    /// Total number of entries across all depths.
    pub fn len(&self) -> usize {
        self.depths.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries, depth ascending.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &LayoutEntry)> {
        self.depths
            .iter()
            .flat_map(|(&depth, entries)| entries.iter().map(move |e| (depth, e)))
    }

    /// Entries from depth 1 through `render_depth`, in paint order.
    pub fn visible(&self, render_depth: usize) -> impl Iterator<Item = (usize, &LayoutEntry)> {
        self.depths
            .iter()
            .take_while(move |&(&depth, _)| depth <= render_depth)
            .filter(|&(&depth, _)| depth >= 1)
            .flat_map(|(&depth, entries)| entries.iter().map(move |e| (depth, e)))
    }
}
