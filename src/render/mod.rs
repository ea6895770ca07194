pub mod colors;

use bytemuck::{Pod, Zeroable};

use crate::layout::LayoutCache;

/// One cell as a renderer would upload it into an instance buffer.
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct CellInstance {
    /// x, y, width, height
    pub rect: [f32; 4],
    pub color: [u8; 4],
    pub depth: u32,
}

/// Flatten the visible part of `cache` in paint order (outer depths first,
/// so nested cells draw over their parents).
pub fn cell_instances(cache: &LayoutCache, render_depth: usize) -> Vec<CellInstance> {
    cache
        .visible(render_depth)
        .map(|(depth, entry)| CellInstance {
            rect: [
                entry.rect.x as f32,
                entry.rect.y as f32,
                entry.rect.w as f32,
                entry.rect.h as f32,
            ],
            color: bytemuck::cast(entry.color),
            depth: depth as u32,
        })
        .collect()
}
