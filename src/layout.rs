//! Radial partition layout.
//!
//! Every node of the score tree gets an angular interval `[x0, x1)` whose
//! share of its parent's interval equals its share of the parent's leaves,
//! and a radial band `[y0, y1)` fixed by depth alone. Nodes are stored in
//! pre-order in a flat arena; parents and children refer to each other by
//! index.

use std::collections::BTreeSet;

use crate::profile::{ProfileTree, ScoreNode};
use crate::types::{Angle, Dimensions, Radius};

/// Chart radius is the shorter side of the drawing area divided by this
pub const RADIUS_DIVISOR: f64 = 3.2;

/// A positioned node of the chart
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutNode {
    /// Path of ancestor ids joined by `/`; unique within a layout
    pub key: String,
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub score: f64,
    pub perc_neu: Option<f64>,
    pub depth: usize,
    pub x0: Angle,
    pub x1: Angle,
    pub y0: Radius,
    pub y1: Radius,
    /// Number of leaves in this subtree
    pub weight: usize,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
    /// Category id inherited from the depth-1 ancestor
    pub color_key: String,
    pub expanded: bool,
    pub visible: bool,
}

impl LayoutNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Angular width of the sector before padding
    pub fn span(&self) -> Angle {
        self.x1 - self.x0
    }

    pub fn mid_angle(&self) -> Angle {
        (self.x0 + self.x1) / 2.0
    }

    /// Radial thickness of the ring this node sits in
    pub fn band(&self) -> Radius {
        self.y1 - self.y0
    }
}

/// The positioned nodes of one render pass, root first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Layout {
    nodes: Vec<LayoutNode>,
}

impl Layout {
    pub fn nodes(&self) -> &[LayoutNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LayoutNode> {
        self.nodes.get(index)
    }

    pub fn root(&self) -> Option<&LayoutNode> {
        self.nodes.first()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.key == key)
    }

    pub fn find(&self, key: &str) -> Option<&LayoutNode> {
        self.nodes.iter().find(|n| n.key == key)
    }

    /// Ancestor `generations` levels up (1 = parent, 2 = grandparent, ...)
    pub fn ancestor(&self, index: usize, generations: usize) -> Option<&LayoutNode> {
        let mut current = self.nodes.get(index)?;
        for _ in 0..generations {
            current = self.nodes.get(current.parent?)?;
        }
        Some(current)
    }

    pub fn children(&self, index: usize) -> impl Iterator<Item = &LayoutNode> {
        self.nodes
            .get(index)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(|&c| self.nodes.get(c))
    }

    /// Indices of every node below `index`, in pre-order
    pub fn descendants(&self, index: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = match self.nodes.get(index) {
            Some(n) => n.children.iter().rev().copied().collect(),
            None => return out,
        };
        while let Some(i) = stack.pop() {
            out.push(i);
            stack.extend(self.nodes[i].children.iter().rev().copied());
        }
        out
    }

    pub fn visible(&self) -> impl Iterator<Item = &LayoutNode> {
        self.nodes.iter().filter(|n| n.visible)
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Overwrite the interaction state of one node
    pub fn set_state(&mut self, index: usize, expanded: bool, visible: bool) {
        if let Some(node) = self.nodes.get_mut(index) {
            node.expanded = expanded;
            node.visible = visible;
        }
    }

    /// Copy `expanded`/`visible` from a previous layout for nodes with the same key.
    pub fn carry_state_from(&mut self, previous: &Layout) {
        for node in &mut self.nodes {
            if let Some(old) = previous.find(&node.key) {
                node.expanded = old.expanded;
                node.visible = old.visible;
            }
        }
    }
}

/// Computes [`Layout`]s for a fixed outer radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEngine {
    outer_radius: Radius,
}

impl LayoutEngine {
    pub fn new(outer_radius: Radius) -> Self {
        Self { outer_radius }
    }

    /// Engine sized for a drawing area, leaving room for leaf bars and labels
    pub fn for_dimensions(dims: Dimensions) -> Self {
        Self::new(Radius(dims.shorter_side() / RADIUS_DIVISOR))
    }

    pub fn outer_radius(&self) -> Radius {
        self.outer_radius
    }

    /// Lay out `tree`, dropping depth-1 branches whose id is in `excluded`.
    pub fn layout(&self, tree: &ProfileTree, excluded: &BTreeSet<String>) -> Layout {
        let children: Vec<&ScoreNode> = tree
            .root
            .children
            .iter()
            .filter(|c| !excluded.contains(&c.id))
            .collect();

        let depth_below = children.iter().map(|c| 1 + subtree_height(c)).max().unwrap_or(0);
        let levels = depth_below + 1;
        let ring = self.outer_radius / levels as f64;

        let mut builder = Builder {
            nodes: Vec::new(),
            ring,
        };
        builder.place_root(&tree.root, &children);

        crate::log::debug!(
            nodes = builder.nodes.len(),
            levels,
            ring = ring.raw(),
            "radial layout computed"
        );
        Layout {
            nodes: builder.nodes,
        }
    }
}

fn subtree_height(node: &ScoreNode) -> usize {
    node.children.iter().map(|c| 1 + subtree_height(c)).max().unwrap_or(0)
}

struct Builder {
    nodes: Vec<LayoutNode>,
    ring: Radius,
}

impl Builder {
    fn place_root(&mut self, root: &ScoreNode, children: &[&ScoreNode]) {
        let weight = children.iter().map(|c| c.leaf_count()).sum::<usize>().max(1);
        let index = self.push(root, root.id.clone(), 0, Angle::ZERO, Angle::FULL_TURN, weight, None);
        self.place_children(index, children);
    }

    fn place(&mut self, node: &ScoreNode, parent: usize, x0: Angle, x1: Angle) {
        let (key, depth) = {
            let p = &self.nodes[parent];
            (format!("{}/{}", p.key, node.id), p.depth + 1)
        };
        let index = self.push(node, key, depth, x0, x1, node.leaf_count(), Some(parent));
        let children: Vec<&ScoreNode> = node.children.iter().collect();
        self.place_children(index, &children);
    }

    /// Split the parent's interval contiguously, in child order
    fn place_children(&mut self, parent: usize, children: &[&ScoreNode]) {
        let (x0, x1, weight) = {
            let p = &self.nodes[parent];
            (p.x0, p.x1, p.weight as f64)
        };
        let span = x1 - x0;
        let mut cursor = x0;
        let mut consumed = 0usize;
        for (i, child) in children.iter().enumerate() {
            consumed += child.leaf_count();
            // Last child ends exactly at the parent's edge
            let end = if i + 1 == children.len() {
                x1
            } else {
                x0 + span * (consumed as f64 / weight)
            };
            let child_index = self.nodes.len();
            self.nodes[parent].children.push(child_index);
            self.place(child, parent, cursor, end);
            cursor = end;
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn push(
        &mut self,
        node: &ScoreNode,
        key: String,
        depth: usize,
        x0: Angle,
        x1: Angle,
        weight: usize,
        parent: Option<usize>,
    ) -> usize {
        let color_key = match parent {
            Some(p) if depth >= 2 => self.nodes[p].color_key.clone(),
            _ => node.id.clone(),
        };
        let index = self.nodes.len();
        self.nodes.push(LayoutNode {
            key,
            id: node.id.clone(),
            name: node.name.clone(),
            category: node.category.clone(),
            score: node.score,
            perc_neu: node.perc_neu,
            depth,
            x0,
            x1,
            y0: self.ring * depth as f64,
            y1: self.ring * (depth + 1) as f64,
            weight,
            parent,
            children: Vec::new(),
            color_key,
            expanded: depth <= 1,
            visible: depth == 2,
        });
        index
    }
}
