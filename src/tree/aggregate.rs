use super::arena::{NodeId, PivotTree};

/// Compute aggregates for all group nodes (bottom-up).
///
/// After this, each group's `weight` is the sum of its children's weights and
/// its `value` is the mean of every row value below it.
pub fn aggregate(tree: &mut PivotTree) {
    // Children always have higher indices than their parents in the arena,
    // so a reverse sweep sees every child before its parent.
    let len = tree.nodes.len();
    for i in (0..len).rev() {
        let node = &tree.nodes[i];
        if !node.has_children() {
            continue;
        }
        let mut weight = 0.0;
        let mut value_sum = 0.0;
        let mut rows: u32 = 0;
        let mut child = node.first_child;
        while let Some(child_id) = child {
            let c = &tree.nodes[child_id.index()];
            weight += c.weight;
            value_sum += c.value * c.leaf_count as f64;
            rows += c.leaf_count;
            child = c.next_sibling;
        }

        let node = &mut tree.nodes[i];
        node.weight = weight;
        node.value = if rows > 0 { value_sum / rows as f64 } else { 0.0 };
        node.leaf_count = rows;
    }
}

/// Sort children of each group by weight (descending).
/// Squarified layout gives squarer cells when large items come first.
/// This re-links the sibling list without moving nodes in the arena.
pub fn sort_children_by_weight(tree: &mut PivotTree) {
    let len = tree.nodes.len();
    for i in 0..len {
        if !tree.nodes[i].has_children() {
            continue;
        }

        let mut children: Vec<NodeId> = Vec::new();
        let mut child = tree.nodes[i].first_child;
        while let Some(child_id) = child {
            children.push(child_id);
            child = tree.nodes[child_id.index()].next_sibling;
        }

        // Stable, so equal weights keep their input order.
        children.sort_by(|a, b| {
            tree.nodes[b.index()]
                .weight
                .total_cmp(&tree.nodes[a.index()].weight)
        });

        let (Some(&first), Some(&last)) = (children.first(), children.last()) else {
            continue;
        };
        tree.nodes[i].first_child = Some(first);
        tree.nodes[i].last_child = Some(last);
        for w in children.windows(2) {
            tree.nodes[w[0].index()].next_sibling = Some(w[1]);
        }
        tree.nodes[last.index()].next_sibling = None;
    }
}
