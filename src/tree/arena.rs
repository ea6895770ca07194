use std::collections::VecDeque;

use compact_str::CompactString;

use super::{NodeFrame, TreeSource};

/// Index into the arena `Vec<PivotNode>`. Uses u32 to save memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single group or row in the pivot tree, stored in a flat arena.
/// Uses sibling-list representation: each node has `first_child` and `next_sibling`.
#[derive(Debug, Clone)]
pub struct PivotNode {
    /// Group key or row name
    pub label: CompactString,
    /// Primary aggregate (sum). Drives cell area.
    pub weight: f64,
    /// Secondary aggregate (mean over the rows below). Drives cell color.
    pub value: f64,
    /// Number of input rows folded into this node
    pub leaf_count: u32,
    /// Parent node index (None for root)
    pub parent: Option<NodeId>,
    pub first_child: Option<NodeId>,
    /// Tail of the child list, for O(1) appends
    pub last_child: Option<NodeId>,
    pub next_sibling: Option<NodeId>,
    /// Depth in the tree (root = 0)
    pub depth: u16,
}

impl PivotNode {
    /// An empty group; its aggregates are filled in by
    /// [`aggregate`](super::aggregate::aggregate).
    pub fn group(label: &str) -> Self {
        Self {
            label: CompactString::new(label),
            weight: 0.0,
            value: 0.0,
            leaf_count: 0,
            parent: None,
            first_child: None,
            last_child: None,
            next_sibling: None,
            depth: 0,
        }
    }

    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }
}

/// The pivot tree stored as a flat arena of nodes.
///
/// Children always have higher indices than their parents.
#[derive(Debug, Clone)]
pub struct PivotTree {
    pub nodes: Vec<PivotNode>,
    pub root: NodeId,
}

impl PivotTree {
    pub fn new(root_label: &str) -> Self {
        PivotTree {
            nodes: vec![PivotNode::group(root_label)],
            root: NodeId(0),
        }
    }

    /// Append a child under `parent`, after its existing children.
    pub fn add_child(&mut self, parent: NodeId, mut node: PivotNode) -> NodeId {
        let new_id = NodeId(self.nodes.len() as u32);
        node.parent = Some(parent);
        node.depth = self.nodes[parent.index()].depth + 1;
        node.next_sibling = None;

        match self.nodes[parent.index()].last_child {
            Some(tail) => self.nodes[tail.index()].next_sibling = Some(new_id),
            None => self.nodes[parent.index()].first_child = Some(new_id),
        }
        self.nodes[parent.index()].last_child = Some(new_id);

        self.nodes.push(node);
        new_id
    }

    pub fn get(&self, id: NodeId) -> &PivotNode {
        &self.nodes[id.index()]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut PivotNode {
        &mut self.nodes[id.index()]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree is empty (only root).
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn children(&self, parent: NodeId) -> ChildIter<'_> {
        ChildIter {
            tree: self,
            current: self.nodes[parent.index()].first_child,
        }
    }

    /// Frame describing `id`'s children, as the layout driver consumes it.
    ///
    /// A node whose children are all leaves, or whose children weigh nothing
    /// in total, is reported as a leaf so its children are not visited.
    fn frame(&self, id: NodeId) -> NodeFrame {
        let mut frame = NodeFrame::default();
        let mut any_group = false;
        for child_id in self.children(id) {
            let child = self.get(child_id);
            any_group |= child.has_children();
            frame.labels.push(child.label.clone());
            frame.weights.push(child.weight);
            frame.values.push(child.value);
        }
        let total: f64 = frame.weights.iter().sum();
        frame.is_leaf = !any_group || total <= 0.0;
        frame
    }
}

impl TreeSource for PivotTree {
    fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth as usize).max().unwrap_or(0)
    }

    fn walk(&self) -> Box<dyn Iterator<Item = NodeFrame> + '_> {
        Box::new(BreadthFirst {
            tree: self,
            queue: VecDeque::from([self.root]),
        })
    }
}

/// Iterator over the children of a node.
pub struct ChildIter<'a> {
    tree: &'a PivotTree,
    current: Option<NodeId>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.current?;
        self.current = self.tree.nodes[id.index()].next_sibling;
        Some(id)
    }
}

/// Breadth-first frame iterator. Mirrors the driver's queue: every child of
/// a non-leaf frame is visited, in order, one level later.
struct BreadthFirst<'a> {
    tree: &'a PivotTree,
    queue: VecDeque<NodeId>,
}

impl<'a> Iterator for BreadthFirst<'a> {
    type Item = NodeFrame;

    fn next(&mut self) -> Option<NodeFrame> {
        let id = self.queue.pop_front()?;
        let frame = self.tree.frame(id);
        if !frame.is_leaf {
            self.queue.extend(self.tree.children(id));
        }
        Some(frame)
    }
}
