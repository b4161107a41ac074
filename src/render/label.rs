//! Label placement: curved branch labels and rotated leaf labels.

use std::f64::consts::PI;

use super::defaults::{
    BRANCH_LABEL_SIZE, LEAF_LABEL_FALLBACK_SIZE, LEAF_LABEL_GAP, LEAF_LABEL_MAX_SIZE,
    SECTOR_BOTTOM_PAD,
};
use super::primitive::{LabelCurve, LeafLabel, SectorPosition, TextAnchor};
use crate::layout::LayoutNode;
use crate::types::{Angle, Radius, polar};

/// Curves and positions of both text lines of a branch sector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BranchLabels {
    pub label: LabelCurve,
    pub label_position: SectorPosition,
    pub number: LabelCurve,
    pub number_position: SectorPosition,
}

/// Place the name and score labels of a branch sector.
///
/// `pad` is the right pad the sector was drawn with; labels stop where the
/// arcs stop.
pub fn place_branch_labels(node: &LayoutNode, pad: Angle, bottom: bool) -> BranchLabels {
    let y0 = node.y0;
    let y1 = node.y1;
    let band = y1 - SECTOR_BOTTOM_PAD - y0;
    let base = SECTOR_BOTTOM_PAD + y0;

    let (label, number) = if bottom {
        let (label_r, number_r) = if node.depth == 1 {
            (y1 - band / 6.0, y1 - band / 8.0)
        } else {
            (base + band * (5.0 / 12.0), y1 - band / 7.0)
        };
        // Reversed curve in standard-position angles reads upright
        let start = node.x1 - pad - Angle::QUARTER_TURN;
        let end = node.x0 - Angle::QUARTER_TURN;
        (
            LabelCurve::Reversed { start, end, radius: label_r },
            LabelCurve::Reversed { start, end, radius: number_r },
        )
    } else {
        let (label_r, number_r) = if node.depth == 1 {
            (y1 - band / 3.0, y1 - band / 3.0)
        } else {
            (base + band * (3.0 / 5.0), base + band / 5.0)
        };
        let start = node.x0;
        let end = node.x1 - pad;
        (
            LabelCurve::Forward { start, end, radius: label_r },
            LabelCurve::Forward { start, end, radius: number_r },
        )
    };

    let label_position = if node.depth <= 1 {
        SectorPosition::Center
    } else if bottom {
        SectorPosition::Inner
    } else {
        SectorPosition::Outer
    };
    let number_position = if bottom {
        SectorPosition::Outer
    } else {
        SectorPosition::Inner
    };

    BranchLabels {
        label,
        label_position,
        number,
        number_position,
    }
}

/// Font size of a branch name, shrinking with depth
pub fn branch_label_size(depth: usize) -> f64 {
    BRANCH_LABEL_SIZE / ((depth + 1) as f64).sqrt()
}

/// Score as a rounded percentage, e.g. `81%`
pub fn percent_text(magnitude: f64) -> String {
    format!("{}%", (magnitude * 100.0).round() as i64)
}

/// Rotated label just past the end of a leaf bar at `bar_end`.
///
/// Text on the left half of the chart is anchored at its end so it never
/// reads upside down.
pub fn place_leaf_label(node: &LayoutNode, bar_end: Radius) -> LeafLabel {
    let width = node.span().raw();
    let spread = width * 20.0 * PI;

    let (rotate, anchor, dy) = if node.x0.raw() > PI {
        (node.x0.to_degrees() + 90.0, TextAnchor::End, -spread)
    } else {
        (node.x0.to_degrees() - 90.0, TextAnchor::Start, 5.0 + spread)
    };

    let font_size = if 7.5 + 15.0 * PI * width > LEAF_LABEL_MAX_SIZE {
        LEAF_LABEL_MAX_SIZE
    } else {
        LEAF_LABEL_FALLBACK_SIZE
    };

    LeafLabel {
        text: node.name.clone(),
        font_size,
        anchor,
        dy,
        position: polar(node.x0, bar_end + LEAF_LABEL_GAP),
        rotate,
    }
}
