pub mod aggregate;
pub mod arena;
pub mod row;

use std::collections::HashMap;

use compact_str::CompactString;

use self::arena::{NodeId, PivotNode, PivotTree};
use self::row::PivotRow;

/// What the layout driver learns about one node: its children, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeFrame {
    /// True when the driver should not descend into these children.
    pub is_leaf: bool,
    pub labels: Vec<CompactString>,
    /// Primary aggregate per child; drives area.
    pub weights: Vec<f64>,
    /// Secondary aggregate per child; drives color only.
    pub values: Vec<f64>,
}

/// A read-only hierarchical data source.
///
/// `walk` must yield one frame per rectangle the driver queues, in the same
/// breadth-first order: the root first, then, for every frame that is not a
/// leaf, one frame per child at the next level. A frame whose weights sum to
/// zero lays out no cells and must be marked leaf.
pub trait TreeSource {
    /// Number of levels below the root.
    fn max_depth(&self) -> usize;

    fn walk(&self) -> Box<dyn Iterator<Item = NodeFrame> + '_>;
}

/// Build a PivotTree from a flat list of rows.
///
/// Groups are created on first sight and keep that order; rows landing on
/// the same path are merged (weights summed, values averaged). Aggregates
/// are computed before returning.
pub fn build_tree(rows: &[PivotRow]) -> PivotTree {
    let mut tree = PivotTree::new("(all)");
    if rows.is_empty() {
        return tree;
    }

    tracing::info!("Building pivot tree from {} rows", rows.len());

    // (parent, label) -> child, for group lookups
    let mut index: HashMap<(NodeId, CompactString), NodeId> = HashMap::new();

    for row in rows {
        let id = ensure_path(&mut tree, &mut index, &row.path);
        let node = tree.get_mut(id);
        let merged = node.leaf_count + 1;
        node.value += (row.value - node.value) / merged as f64;
        node.weight += row.weight;
        node.leaf_count = merged;
    }

    for node in tree.nodes.iter().filter(|n| n.has_children() && n.leaf_count > 0) {
        tracing::warn!(
            "Row '{}' is also a group; its children's totals replace its own measures",
            node.label
        );
    }

    aggregate::aggregate(&mut tree);

    tracing::info!(
        "Pivot tree built: {} nodes, {} groups under the root, max depth {}",
        tree.len(),
        tree.children(tree.root).count(),
        tree.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    );

    tree
}

/// Walk `path` from the root, creating missing groups along the way.
fn ensure_path(
    tree: &mut PivotTree,
    index: &mut HashMap<(NodeId, CompactString), NodeId>,
    path: &[CompactString],
) -> NodeId {
    let mut parent = tree.root;
    for label in path {
        parent = *index
            .entry((parent, label.clone()))
            .or_insert_with(|| tree.add_child(parent, PivotNode::group(label)));
    }
    parent
}
