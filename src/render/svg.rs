//! SVG drawing surface

use std::collections::BTreeMap;

use facet_svg::facet_xml::SerializeOptions;
use facet_svg::{Group, SVG_NS, Svg, SvgNode, facet_xml};

use super::geometry::fmt_num;
use super::primitive::{DrawingPrimitive, Primitive, PrimitiveKind};
use super::DrawingSurface;
use crate::errors::RenderError;
use crate::layout::LayoutNode;
use crate::types::Dimensions;

/// Element cache key: one element per node and primitive kind
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementKey {
    pub node: String,
    pub kind: PrimitiveKind,
}

impl ElementKey {
    pub fn new(node: impl Into<String>, kind: PrimitiveKind) -> Self {
        Self {
            node: node.into(),
            kind,
        }
    }
}

/// The `<g class="sector">` of one node
#[derive(Debug, Clone, Default)]
struct SectorGroup {
    visible: bool,
    /// Kinds in the order they were first drawn
    kinds: Vec<PrimitiveKind>,
}

/// Builds an SVG document, reusing elements across render passes.
#[derive(Debug, Clone, Default)]
pub struct SvgSurface {
    dims: Option<Dimensions>,
    /// Node keys drawn in the current pass, in draw order
    order: Vec<String>,
    groups: BTreeMap<String, SectorGroup>,
    elements: BTreeMap<ElementKey, SvgNode>,
    reused: usize,
}

impl SvgSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget every cached element, e.g. when the chart gets new data
    pub fn clear(&mut self) {
        self.order.clear();
        self.groups.clear();
        self.elements.clear();
        self.reused = 0;
    }

    pub fn element(&self, node: &str, kind: PrimitiveKind) -> Option<&SvgNode> {
        self.elements.get(&ElementKey::new(node, kind))
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// How many draws updated an existing element instead of creating one
    pub fn reused_count(&self) -> usize {
        self.reused
    }

    pub fn is_visible(&self, node: &str) -> Option<bool> {
        self.groups.get(node).map(|g| g.visible)
    }

    /// Serialize the current state of the surface.
    pub fn to_svg_string(&self) -> Result<String, RenderError> {
        let dims = self.dims.ok_or(RenderError::NotRendered)?;
        let center = dims.center();

        let sectors: Vec<SvgNode> = self
            .order
            .iter()
            .filter_map(|key| self.groups.get(key).map(|group| (key, group)))
            .map(|(key, group)| {
                let children = group
                    .kinds
                    .iter()
                    .filter_map(|&kind| self.elements.get(&ElementKey::new(key.as_str(), kind)))
                    .cloned()
                    .collect();
                SvgNode::G(Group {
                    class: Some("sector".to_string()),
                    visibility: Some(if group.visible { "visible" } else { "hidden" }.to_string()),
                    children,
                    ..Default::default()
                })
            })
            .collect();

        let svg = Svg {
            xmlns: Some(SVG_NS.to_string()),
            width: Some(fmt_num(dims.width)),
            height: Some(fmt_num(dims.height)),
            view_box: Some(format!(
                "0 0 {} {}",
                fmt_num(dims.width),
                fmt_num(dims.height)
            )),
            children: vec![SvgNode::G(Group {
                transform: Some(format!(
                    "translate({},{})",
                    fmt_num(center.x),
                    fmt_num(center.y)
                )),
                children: vec![SvgNode::G(Group {
                    children: sectors,
                    ..Default::default()
                })],
                ..Default::default()
            })],
            ..Default::default()
        };

        facet_xml::to_string_with_options(&svg, &SerializeOptions::default()).map_err(|e| {
            RenderError::Serialize {
                message: e.to_string(),
            }
        })
    }
}

impl DrawingSurface for SvgSurface {
    /// Starts a new document; cached elements stay available for reuse.
    fn begin(&mut self, dims: Dimensions) {
        self.dims = Some(dims);
        self.order.clear();
    }

    fn draw_sector(&mut self, node: &LayoutNode, primitives: Vec<DrawingPrimitive>) {
        if !self.order.iter().any(|k| k == &node.key) {
            self.order.push(node.key.clone());
        }
        let group = self.groups.entry(node.key.clone()).or_default();
        group.visible = node.visible;

        for primitive in primitives {
            let kind = primitive.kind();
            let key = ElementKey::new(node.key.as_str(), kind);
            match self.elements.get_mut(&key) {
                Some(existing) => {
                    primitive.update(existing);
                    self.reused += 1;
                }
                None => {
                    self.elements.insert(key, primitive.to_svg());
                    group.kinds.push(kind);
                }
            }
        }
    }

    fn set_visibility(&mut self, key: &str, visible: bool) {
        if let Some(group) = self.groups.get_mut(key) {
            group.visible = visible;
        }
    }
}
