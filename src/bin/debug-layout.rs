/// Diagnostic tool to verify rows → tree → layout pipeline
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use pivotmap_rs::layout::{StyleConfig, Tiling};
use pivotmap_rs::render::cell_instances;
use pivotmap_rs::tree::{self, aggregate, row, TreeSource};
use pivotmap_rs::view::TreemapView;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pivotmap_rs=debug".parse()?),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let mut rows_path: Option<PathBuf> = None;
    let mut size: Vec<f64> = Vec::new();
    let mut style = StyleConfig::default();
    let mut sorted = false;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--style" => {
                let name = args.next().context("--style needs a value")?;
                style.style = name.parse()?;
            }
            "--sliced" => style.tiling = Tiling::Sliced,
            "--sorted" => sorted = true,
            other if rows_path.is_none() => rows_path = Some(PathBuf::from(other)),
            other => size.push(
                other
                    .parse()
                    .with_context(|| format!("bad viewport dimension '{other}'"))?,
            ),
        }
    }

    let rows_path = rows_path.context(
        "usage: debug-layout <rows.tsv> [width] [height] [--style classic|clustered] [--sorted] [--sliced]",
    )?;
    let width = size.first().copied().unwrap_or(870.0);
    let height = size.get(1).copied().unwrap_or(705.0);

    println!("=== DIAGNOSTIC: Rows → Tree → Layout ===");
    println!("Reading: {}", rows_path.display());

    let text = std::fs::read_to_string(&rows_path)
        .with_context(|| format!("reading {}", rows_path.display()))?;
    let rows = row::parse_rows(&text)?;
    println!("\n[1] Parsed {} rows", rows.len());

    let mut pivot = tree::build_tree(&rows);
    if sorted {
        aggregate::sort_children_by_weight(&mut pivot);
    }
    let root = pivot.get(pivot.root);
    println!(
        "\n[2] Tree built: {} nodes, max depth {}, total weight {:.2}",
        pivot.len(),
        pivot.max_depth(),
        root.weight
    );

    let mut view = TreemapView::new();
    view.set_style(style)?;
    view.resize(width, height)?;
    view.set_source(Arc::new(pivot))?;
    let cache = view.cache();

    println!(
        "\n[3] Layout computed ({} style): {} cells",
        view.style().style.name(),
        cache.len()
    );
    for depth in 1..=cache.max_depth() {
        let cells = cache.depth(depth);
        let area: f64 = cells.iter().map(|e| e.rect.area()).sum();
        println!("    depth {}: {} cells, {:.0}px² covered", depth, cells.len(), area);
    }

    println!("\n[4] Top 10 largest cells at depth 1:");
    let mut top: Vec<_> = cache.depth(1).iter().collect();
    top.sort_by(|a, b| b.rect.area().total_cmp(&a.rect.area()));
    for (i, entry) in top.iter().take(10).enumerate() {
        let r = entry.rect;
        println!(
            "    [{}] '{}' - {:.0}x{:.0} at ({:.0}, {:.0}), value {:+.4}, rgba {:?}",
            i, entry.label, r.w, r.h, r.x, r.y, entry.value, entry.color
        );
    }

    println!("\n[5] Checking for anomalies:");
    let (vw, vh) = view.viewport();
    let margin = view.style().frame_margin;
    let root_area = (vw - 2.0 * margin).max(0.0) * (vh - 2.0 * margin).max(0.0);
    let top_area: f64 = cache.depth(1).iter().map(|e| e.rect.area()).sum();
    println!("    Root area:        {:.0}px²", root_area);
    println!("    Depth-1 coverage: {:.0}px²", top_area);
    let degenerate = cache
        .iter()
        .filter(|(_, e)| e.rect.w < 1.0 || e.rect.h < 1.0)
        .count();
    println!("    Cells under 1px:  {}", degenerate);

    let instances = cell_instances(&cache, view.render_depth());
    println!(
        "\n[6] Instance buffer: {} cells, {} bytes",
        instances.len(),
        bytemuck::cast_slice::<_, u8>(&instances).len()
    );

    Ok(())
}
