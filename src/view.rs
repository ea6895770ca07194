use std::sync::mpsc;
use std::sync::Arc;

use crate::error::{ConfigError, LayoutError};
use crate::layout::{self, LayoutCache, LayoutEntry, Rect, StyleConfig};
use crate::render::colors::{ColorMap, DivergingColorMap};
use crate::tree::TreeSource;

/// A tree source shared with background layout threads.
pub type SharedSource = Arc<dyn TreeSource + Send + Sync>;
/// A color map shared with background layout threads.
pub type SharedColorMap = Arc<dyn ColorMap + Send + Sync>;

/// One cell the renderer should draw.
#[derive(Debug, Clone, Copy)]
pub struct VisibleCell<'a> {
    pub depth: usize,
    pub entry: &'a LayoutEntry,
    /// Whether the style wants this cell's label drawn.
    pub show_label: bool,
}

/// A finished background layout, tagged with the request it answers.
struct LayoutResult {
    generation: u64,
    result: Result<LayoutCache, LayoutError>,
}

/// Owns everything a treemap view needs to lay itself out.
///
/// The cache is only ever replaced as a whole, so an `Arc` obtained from
/// [`cache`](Self::cache) never changes under the reader.
pub struct TreemapView {
    source: Option<SharedSource>,
    style: StyleConfig,
    colormap: SharedColorMap,
    render_depth: usize,
    viewport_width: f64,
    viewport_height: f64,
    cache: Arc<LayoutCache>,

    // Background layout state
    generation: u64,
    layout_rx: Option<mpsc::Receiver<LayoutResult>>,
}

impl Default for TreemapView {
    fn default() -> Self {
        Self::new()
    }
}

impl TreemapView {
    pub fn new() -> Self {
        Self {
            source: None,
            style: StyleConfig::default(),
            colormap: Arc::new(DivergingColorMap::default()),
            render_depth: 0,
            viewport_width: 0.0,
            viewport_height: 0.0,
            cache: Arc::new(LayoutCache::new()),
            generation: 0,
            layout_rx: None,
        }
    }

    pub fn source(&self) -> Option<&SharedSource> {
        self.source.as_ref()
    }

    /// Attach a new tree source, show all of its levels, and relayout.
    ///
    /// The source is only attached once its layout succeeds; on error the
    /// view keeps its previous source, render depth and cache.
    pub fn set_source(&mut self, source: SharedSource) -> Result<(), LayoutError> {
        let cache = self.compute(&source)?;
        self.generation += 1;
        self.layout_rx = None;
        self.render_depth = source.max_depth();
        self.source = Some(source);
        self.cache = Arc::new(cache);
        Ok(())
    }

    pub fn render_depth(&self) -> usize {
        self.render_depth
    }

    /// Change how many levels are shown. Only filters the existing cache.
    pub fn set_render_depth(&mut self, depth: usize) -> Result<(), ConfigError> {
        let max = self.source.as_ref().map(|s| s.max_depth()).unwrap_or(0);
        if depth > max {
            return Err(ConfigError::RenderDepthOutOfRange {
                requested: depth,
                max,
            });
        }
        self.render_depth = depth;
        Ok(())
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Replace the style configuration and relayout. Invalid configurations
    /// are rejected before anything changes.
    pub fn set_style(&mut self, style: StyleConfig) -> Result<(), LayoutError> {
        style.validate()?;
        self.style = style;
        self.relayout()
    }

    pub fn set_color_map(&mut self, colormap: SharedColorMap) -> Result<(), LayoutError> {
        self.colormap = colormap;
        self.relayout()
    }

    pub fn viewport(&self) -> (f64, f64) {
        (self.viewport_width, self.viewport_height)
    }

    /// Handle a viewport resize.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), LayoutError> {
        self.viewport_width = width.max(0.0);
        self.viewport_height = height.max(0.0);
        self.relayout()
    }

    /// The latest complete layout.
    pub fn cache(&self) -> Arc<LayoutCache> {
        Arc::clone(&self.cache)
    }

    /// Cells up to the render depth, in paint order.
    pub fn visible_cells(&self) -> impl Iterator<Item = VisibleCell<'_>> {
        let style = self.style.style;
        let render_depth = self.render_depth;
        self.cache
            .visible(render_depth)
            .map(move |(depth, entry)| VisibleCell {
                depth,
                entry,
                show_label: style.shows_label(depth, render_depth),
            })
    }

    /// Root rectangle: the viewport minus the frame margin on every side.
    fn root_rect(&self) -> Rect {
        let m = self.style.frame_margin;
        Rect::new(
            m,
            m,
            (self.viewport_width - 2.0 * m).max(0.0),
            (self.viewport_height - 2.0 * m).max(0.0),
        )
    }

    /// Recompute the layout for the current viewport, style and source.
    ///
    /// On error the previous cache is kept.
    pub fn relayout(&mut self) -> Result<(), LayoutError> {
        // A synchronous result supersedes anything still running.
        self.generation += 1;
        self.layout_rx = None;

        let cache = match &self.source {
            Some(source) => self.compute(source)?,
            None => LayoutCache::new(),
        };
        self.cache = Arc::new(cache);
        Ok(())
    }

    fn compute(&self, source: &SharedSource) -> Result<LayoutCache, LayoutError> {
        tracing::debug!(
            "Computing {} layout for viewport {}x{}",
            self.style.style.name(),
            self.viewport_width,
            self.viewport_height
        );

        let cache = layout::compute_layout(
            source.as_ref(),
            self.root_rect(),
            &self.style,
            self.colormap.as_ref(),
        )?;
        tracing::info!(
            "Layout computed: {} cells across {} depths",
            cache.len(),
            cache.max_depth()
        );
        Ok(cache)
    }

    /// Start a relayout on a worker thread. A newer request (background or
    /// synchronous) makes any older result obsolete.
    pub fn relayout_in_background(&mut self) {
        self.generation += 1;
        let generation = self.generation;

        let Some(source) = self.source.clone() else {
            self.layout_rx = None;
            self.cache = Arc::new(LayoutCache::new());
            return;
        };

        let (tx, rx) = mpsc::channel();
        self.layout_rx = Some(rx);

        let root = self.root_rect();
        let style = self.style.clone();
        let colormap = Arc::clone(&self.colormap);
        std::thread::spawn(move || {
            let result = layout::compute_layout(source.as_ref(), root, &style, colormap.as_ref());
            // The view may have moved on and dropped the receiver.
            let _ = tx.send(LayoutResult { generation, result });
        });
    }

    /// Install a finished background layout, if one is ready.
    ///
    /// Returns `None` while nothing new is available, `Some(Ok(()))` once the
    /// cache has been replaced, and `Some(Err(_))` if the layout failed (the
    /// previous cache is kept).
    pub fn poll_layout(&mut self) -> Option<Result<(), LayoutError>> {
        let rx = self.layout_rx.as_ref()?;
        let message = match rx.try_recv() {
            Ok(message) => message,
            Err(mpsc::TryRecvError::Empty) => return None,
            Err(mpsc::TryRecvError::Disconnected) => {
                tracing::warn!("Background layout thread exited without a result");
                self.layout_rx = None;
                return None;
            }
        };
        self.layout_rx = None;

        if message.generation != self.generation {
            tracing::warn!(
                "Discarding stale layout (generation {}, current {})",
                message.generation,
                self.generation
            );
            return None;
        }

        Some(match message.result {
            Ok(cache) => {
                tracing::info!("Background layout installed: {} cells", cache.len());
                self.cache = Arc::new(cache);
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Background layout failed: {}", e);
                Err(e)
            }
        })
    }

    /// Block until the pending background layout (if any) has been handled.
    pub fn wait_for_layout(&mut self) -> Option<Result<(), LayoutError>> {
        let rx = self.layout_rx.take()?;
        let message = rx.recv().ok()?;
        if message.generation != self.generation {
            return None;
        }
        Some(message.result.map(|cache| {
            self.cache = Arc::new(cache);
        }))
    }
}
