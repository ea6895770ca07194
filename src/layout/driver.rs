use std::collections::{BTreeMap, VecDeque};

use super::cache::{LayoutCache, LayoutEntry};
use super::slice::slice;
use super::squarify::squarify;
use super::style::{StyleConfig, Tiling};
use super::Rect;
use crate::error::{LayoutError, ProtocolViolation};
use crate::render::colors::{to_rgba8, ColorMap};
use crate::tree::{NodeFrame, TreeSource};

/// Pulls frames from a tree source in lock-step with the layout queue.
///
/// Every pop from the queue is matched by exactly one [`advance`](Self::advance);
/// [`finish`](Self::finish) checks that the source has nothing left over.
pub struct TraversalCursor<'a> {
    frames: Box<dyn Iterator<Item = NodeFrame> + 'a>,
    /// Rectangles queued per depth
    expected: BTreeMap<usize, usize>,
    /// Frames consumed per depth
    consumed: BTreeMap<usize, usize>,
}

impl<'a> TraversalCursor<'a> {
    /// Start a traversal; the root rectangle is expected at depth 1.
    pub fn new(frames: Box<dyn Iterator<Item = NodeFrame> + 'a>) -> Self {
        Self {
            frames,
            expected: BTreeMap::from([(1, 1)]),
            consumed: BTreeMap::new(),
        }
    }

    /// Record that `count` rectangles were queued at `depth`.
    pub fn expect(&mut self, depth: usize, count: usize) {
        *self.expected.entry(depth).or_default() += count;
    }

    /// Take the frame for the rectangle just popped at `depth`.
    /// `pending` counts that rectangle plus everything still queued.
    pub fn advance(&mut self, depth: usize, pending: usize) -> Result<NodeFrame, ProtocolViolation> {
        let frame = self
            .frames
            .next()
            .ok_or(ProtocolViolation::SourceExhausted { depth, pending })?;

        let (labels, weights, values) = (frame.labels.len(), frame.weights.len(), frame.values.len());
        if labels != weights || weights != values {
            return Err(ProtocolViolation::MisalignedFrame {
                depth,
                labels,
                weights,
                values,
            });
        }
        if let Some((index, &value)) = frame
            .weights
            .iter()
            .enumerate()
            .find(|(_, w)| !(w.is_finite() && **w >= 0.0))
        {
            return Err(ProtocolViolation::InvalidWeight { depth, index, value });
        }

        *self.consumed.entry(depth).or_default() += 1;
        Ok(frame)
    }

    /// End the traversal once the queue has drained.
    pub fn finish(self) -> Result<(), ProtocolViolation> {
        let extra = self.frames.count();
        if extra > 0 {
            return Err(ProtocolViolation::UnconsumedNodes { extra });
        }
        debug_assert_eq!(
            self.expected, self.consumed,
            "frames consumed per depth must match rectangles queued per depth"
        );
        Ok(())
    }
}

/// Lay out a whole tree breadth-first inside `root`.
///
/// Cells of the root's children land at depth 1. Children of a non-leaf node
/// are laid out inside that node's cell shrunk by the style's inset for its
/// depth. Nodes whose weights are empty or sum to zero produce no cells.
pub fn compute_layout(
    source: &dyn TreeSource,
    root: Rect,
    style: &StyleConfig,
    colormap: &dyn ColorMap,
) -> Result<LayoutCache, LayoutError> {
    let mut cache = LayoutCache::new();
    let mut cursor = TraversalCursor::new(source.walk());
    let mut pending: VecDeque<(Rect, usize)> = VecDeque::from([(root, 1)]);
    let mut frames = 0usize;

    while let Some((rect, depth)) = pending.pop_front() {
        let frame = cursor.advance(depth, pending.len() + 1)?;
        frames += 1;

        let rects = match style.tiling {
            Tiling::Squarified => squarify(&frame.weights, rect, style.rounding),
            Tiling::Sliced => slice(&frame.weights, rect, style.rounding),
        };
        if rects.is_empty() {
            if !frame.weights.is_empty() {
                tracing::debug!(
                    "Skipping {} zero-weight children at depth {}",
                    frame.weights.len(),
                    depth
                );
            }
            continue;
        }

        if !frame.is_leaf {
            let insets = style.style.child_insets(depth, style);
            cursor.expect(depth + 1, rects.len());
            pending.extend(rects.iter().map(|r| (r.inset(&insets), depth + 1)));
        }

        let colors = to_rgba8(&colormap.map(&frame.values));
        let entries = frame
            .labels
            .into_iter()
            .zip(rects)
            .zip(frame.values)
            .zip(colors)
            .map(|(((label, rect), value), color)| LayoutEntry {
                label,
                rect,
                value,
                color,
            });
        cache.extend(depth, entries);
    }

    cursor.finish()?;

    tracing::debug!(
        "Laid out {} nodes into {} cells across {} depths in {:.0}x{:.0} area",
        frames,
        cache.len(),
        cache.max_depth(),
        root.w,
        root.h
    );

    Ok(cache)
}
