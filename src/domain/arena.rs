use generational_arena::{Arena, Index};
use tracing::instrument;

use crate::domain::entities::{Lead, Salesperson};

/// Which child slot of a parent a node occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Left,
    Right,
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct RepNode {
    /// Salesperson identity for this node
    pub data: Salesperson,
    /// Index of the manager in the arena, None for the root
    pub parent: Option<Index>,
    pub left: Option<Index>,
    pub right: Option<Index>,
    /// Lead currently being worked on, set once on assignment
    pub current_lead: Option<Lead>,
}

impl RepNode {
    fn new(data: Salesperson, parent: Option<Index>) -> Self {
        Self {
            data,
            parent,
            left: None,
            right: None,
            current_lead: None,
        }
    }

    /// Children in left-then-right order, skipping empty slots.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = Index> {
        [self.left, self.right].into_iter().flatten()
    }

    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Arena-based binary tree holding the sales hierarchy.
///
/// Parent links are plain indices, so the up-pointers never own anything.
/// Nodes are only ever added, so indices stay valid for the arena's lifetime.
#[derive(Debug)]
pub struct HierarchyArena {
    arena: Arena<RepNode>,
    root: Option<Index>,
}

impl Default for HierarchyArena {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    /// Insert the root node. Replaces nothing: an arena has exactly one root.
    #[instrument(level = "trace", skip(self))]
    pub fn insert_root(&mut self, data: Salesperson) -> Index {
        let idx = self.arena.insert(RepNode::new(data, None));
        self.root = Some(idx);
        idx
    }

    /// Attach `data` under `parent`, filling the left slot first, then the right.
    ///
    /// Returns `None` without touching the arena when both slots are taken
    /// or the parent does not exist.
    #[instrument(level = "trace", skip(self))]
    pub fn attach_child(&mut self, parent: Index, data: Salesperson) -> Option<Index> {
        let slot = self.free_slot(parent)?;
        let child = self.arena.insert(RepNode::new(data, Some(parent)));
        let parent_node = self.arena.get_mut(parent)?;
        match slot {
            Slot::Left => parent_node.left = Some(child),
            Slot::Right => parent_node.right = Some(child),
        }
        Some(child)
    }

    /// First empty child slot of `idx`, left before right.
    pub fn free_slot(&self, idx: Index) -> Option<Slot> {
        let node = self.get_node(idx)?;
        if node.left.is_none() {
            Some(Slot::Left)
        } else if node.right.is_none() {
            Some(Slot::Right)
        } else {
            None
        }
    }

    pub fn get_node(&self, idx: Index) -> Option<&RepNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut RepNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn parent(&self, idx: Index) -> Option<Index> {
        self.get_node(idx).and_then(|n| n.parent)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Pre-order traversal: node, left subtree, right subtree.
    pub fn iter(&self) -> PreOrderIterator {
        PreOrderIterator::new(self)
    }

    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.root.map_or(0, |root| self.calculate_depth(root))
    }

    fn calculate_depth(&self, node_idx: Index) -> usize {
        if let Some(node) = self.get_node(node_idx) {
            1 + node
                .children()
                .map(|child| self.calculate_depth(child))
                .max()
                .unwrap_or(0)
        } else {
            0
        }
    }

    /// Names of all reps without reports, in pre-order.
    pub fn leaf_names(&self) -> Vec<String> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(_, node)| node.data.name.clone())
            .collect()
    }
}

pub struct PreOrderIterator<'a> {
    arena: &'a HierarchyArena,
    stack: Vec<Index>,
}

impl<'a> PreOrderIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PreOrderIterator<'a> {
    type Item = (Index, &'a RepNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for child in node.children().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}
