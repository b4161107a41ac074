//! Per-node score encoding.
//!
//! Branch sectors show their score as two adjacent arcs, the achieved part
//! and the faded remainder, like an odometer. Leaves show theirs as a bar
//! growing outward from the ring.

use facet_svg::{Color, SvgStyle};

use super::defaults::{
    LEAF_BAR_SCALE, NUMBER_LABEL_SIZE, POTENTIAL_FILL_OPACITY, SECTOR_BOTTOM_PAD, SECTOR_RIGHT_PAD,
};
use super::element_id;
use super::label::{branch_label_size, percent_text, place_branch_labels, place_leaf_label};
use super::primitive::{CurvedLabel, DrawingPrimitive, LabelPath, PrimitiveKind, SectorArc};
use crate::host::{BottomPredicate, WidgetHost};
use crate::layout::{Layout, LayoutNode};
use crate::profile::Category;
use crate::types::{Angle, Radius};

/// Gap left at the end of a sector at `depth`
pub fn right_pad(depth: usize) -> Angle {
    if depth > 0 {
        SECTOR_RIGHT_PAD / (3.0 * depth as f64)
    } else {
        SECTOR_RIGHT_PAD
    }
}

/// Score magnitude in `[0, 1]`; NaN counts as zero
pub fn score_magnitude(score: f64) -> f64 {
    if score.is_nan() { 0.0 } else { score.abs().min(1.0) }
}

/// Angular extents of the two arcs of a branch sector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcEncoding {
    /// Pad actually applied; zero when the neutral share absorbed it
    pub pad: Angle,
    /// Fraction of the sector the second arc reaches before padding
    pub potential: f64,
    pub arc1: (Angle, Angle),
    pub arc2: (Angle, Angle),
}

/// Split a branch sector into achieved and potential arcs.
///
/// A node carrying a neutral share ends its potential arc at
/// `score + perc_neu` instead of the full width, provided that point falls
/// short of the padded end.
pub fn encode_branch(node: &LayoutNode, score: f64) -> ArcEncoding {
    let x0 = node.x0;
    let width = node.span();
    let mut pad = right_pad(node.depth);
    let mut potential = 1.0;

    if let Some(neutral) = node.perc_neu {
        if node.depth > 0 {
            let combined = score + neutral;
            if width.raw() * combined < (width - right_pad(node.depth)).raw() {
                potential = score_magnitude(combined);
                pad = Angle::ZERO;
            }
        }
    }

    let arc1_extent = (width * score_magnitude(score) - pad).max(Angle::ZERO);
    let arc1_end = x0 + arc1_extent;
    let arc2_end = (x0 + width * potential - pad).max(arc1_end);

    ArcEncoding {
        pad,
        potential,
        arc1: (x0, arc1_end),
        arc2: (arc1_end, arc2_end),
    }
}

/// Multiplier for a leaf bar's length.
///
/// Need and value leaves and personality facets are drawn at full scale;
/// any other leaf is stretched by `10 / (depth - 2)`.
pub fn bar_length_factor(layout: &Layout, index: usize) -> f64 {
    let Some(node) = layout.get(index) else {
        return 1.0;
    };
    if node.depth <= 2 {
        return 1.0;
    }

    let grandparent = layout.ancestor(index, 2).map(|n| n.id.as_str());
    let great_grandparent = layout.ancestor(index, 3).map(|n| n.id.as_str());
    if matches!(grandparent, Some(id) if id == Category::Needs.id() || id == Category::Values.id())
        || great_grandparent == Some(Category::Personality.id())
    {
        1.0
    } else {
        LEAF_BAR_SCALE / (node.depth - 2) as f64
    }
}

/// Radial extent of a leaf bar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarEncoding {
    pub inner: Radius,
    pub outer: Radius,
}

pub fn encode_leaf(layout: &Layout, index: usize, score: f64) -> Option<BarEncoding> {
    let node = layout.get(index)?;
    let inner = SECTOR_BOTTOM_PAD + node.y0;
    let factor = bar_length_factor(layout, index);
    Some(BarEncoding {
        inner,
        outer: inner + node.band() * (factor * score_magnitude(score)),
    })
}

fn solid(color: &str) -> SvgStyle {
    let color = Color::parse(color);
    SvgStyle::new().fill(color.clone()).stroke(color)
}

/// Turns layout nodes into drawing primitives.
pub struct SectorRenderer<'a, H: ?Sized, B: ?Sized> {
    host: &'a H,
    bottom: &'a B,
}

impl<'a, H, B> SectorRenderer<'a, H, B>
where
    H: WidgetHost + ?Sized,
    B: BottomPredicate + ?Sized,
{
    pub fn new(host: &'a H, bottom: &'a B) -> Self {
        Self { host, bottom }
    }

    /// Primitives for the node at `index`, empty if there is none.
    pub fn render_sector(&self, layout: &Layout, index: usize) -> Vec<DrawingPrimitive> {
        let Some(node) = layout.get(index) else {
            return Vec::new();
        };
        let score = self.host.score(node);
        if node.is_leaf() {
            self.leaf(layout, index, node, score)
        } else {
            self.branch(node, score)
        }
    }

    fn id(&self, node: &LayoutNode, kind: PrimitiveKind) -> String {
        element_id(self.host.id(), &node.key, kind)
    }

    fn branch(&self, node: &LayoutNode, score: f64) -> Vec<DrawingPrimitive> {
        let family = self.host.palette().family(&node.color_key);
        let fill = if node.depth < 2 { family.light } else { family.dark };
        let encoding = encode_branch(node, score);
        let inner = SECTOR_BOTTOM_PAD + node.y0;

        let mut out: Vec<DrawingPrimitive> = vec![
            SectorArc {
                kind: PrimitiveKind::Arc1,
                id: self.id(node, PrimitiveKind::Arc1),
                start: encoding.arc1.0,
                end: encoding.arc1.1,
                inner,
                outer: node.y1,
                style: solid(fill),
            }
            .into(),
            SectorArc {
                kind: PrimitiveKind::Arc2,
                id: self.id(node, PrimitiveKind::Arc2),
                start: encoding.arc2.0,
                end: encoding.arc2.1,
                inner,
                outer: node.y1,
                style: solid(fill).fill_opacity(POTENTIAL_FILL_OPACITY),
            }
            .into(),
        ];

        let bottom = self.bottom.is_bottom(node);
        let labels = place_branch_labels(node, encoding.pad, bottom);
        let label_path = self.id(node, PrimitiveKind::ArcForLabel);
        out.push(
            LabelPath {
                kind: PrimitiveKind::ArcForLabel,
                id: label_path.clone(),
                curve: labels.label,
            }
            .into(),
        );
        out.push(
            CurvedLabel {
                kind: PrimitiveKind::SectorLabel,
                path_id: label_path,
                text: node.name.clone(),
                font_size: branch_label_size(node.depth),
                position: labels.label_position,
                always_visible: node.depth == 1,
            }
            .into(),
        );

        if node.depth > 1 {
            let number_path = self.id(node, PrimitiveKind::ArcForLabelNumber);
            out.push(
                LabelPath {
                    kind: PrimitiveKind::ArcForLabelNumber,
                    id: number_path.clone(),
                    curve: labels.number,
                }
                .into(),
            );
            out.push(
                CurvedLabel {
                    kind: PrimitiveKind::SectorLabelNumber,
                    path_id: number_path,
                    text: percent_text(score_magnitude(score)),
                    font_size: NUMBER_LABEL_SIZE,
                    position: labels.number_position,
                    always_visible: false,
                }
                .into(),
            );
        }
        out
    }

    fn leaf(
        &self,
        layout: &Layout,
        index: usize,
        node: &LayoutNode,
        score: f64,
    ) -> Vec<DrawingPrimitive> {
        let Some(bar) = encode_leaf(layout, index, score) else {
            return Vec::new();
        };
        let family = self.host.palette().family(&node.color_key);
        vec![
            SectorArc {
                kind: PrimitiveKind::Bar,
                id: self.id(node, PrimitiveKind::Bar),
                start: node.x0,
                end: node.x1,
                inner: bar.inner,
                outer: bar.outer,
                style: solid(family.outer_ring),
            }
            .into(),
            place_leaf_label(node, bar.outer).into(),
        ]
    }
}
