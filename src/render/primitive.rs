//! Drawing primitives produced per sector.
//!
//! Each primitive knows its [`PrimitiveKind`] (the second half of its
//! element-cache key) and how to turn itself into an SVG node. Redraws hand
//! the cached node back to [`Primitive::update`] instead of building a new one.

use enum_dispatch::enum_dispatch;
use facet_svg::{Path, SvgNode, SvgStyle, Text, TextChild, TextPath, Tspan};
use glam::DVec2;

use super::geometry::{PathData, annular_sector, fmt_num, reversed_arc, single_arc};
use crate::types::{Angle, Radius};

/// What a primitive is within its sector
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PrimitiveKind {
    /// Achieved part of a branch score
    Arc1,
    /// Remaining potential of a branch score
    Arc2,
    /// Leaf score bar
    Bar,
    ArcForLabel,
    ArcForLabelNumber,
    SectorLabel,
    SectorLabelNumber,
    SectorLeafText,
}

impl PrimitiveKind {
    /// Name used for the element class and id suffix
    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Arc1 => "arc1",
            PrimitiveKind::Arc2 => "arc2",
            PrimitiveKind::Bar => "_bar",
            PrimitiveKind::ArcForLabel => "arc_for_label",
            PrimitiveKind::ArcForLabelNumber => "arc_for_label_number",
            PrimitiveKind::SectorLabel => "sector_label",
            PrimitiveKind::SectorLabelNumber => "sector_label_number",
            PrimitiveKind::SectorLeafText => "sector_leaf_text",
        }
    }
}

/// Where text sits radially inside its sector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectorPosition {
    Center,
    Inner,
    Outer,
}

impl SectorPosition {
    pub fn as_str(self) -> &'static str {
        match self {
            SectorPosition::Center => "center",
            SectorPosition::Inner => "inner",
            SectorPosition::Outer => "outer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_str(self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

/// The invisible curve a label's text rides on
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LabelCurve {
    /// Clockwise along the sector, chart angles
    Forward { start: Angle, end: Angle, radius: Radius },
    /// Counter-clockwise, standard-position angles (0 at 3 o'clock)
    Reversed { start: Angle, end: Angle, radius: Radius },
}

impl LabelCurve {
    pub fn radius(&self) -> Radius {
        match *self {
            LabelCurve::Forward { radius, .. } | LabelCurve::Reversed { radius, .. } => radius,
        }
    }

    pub fn path(&self) -> PathData {
        match *self {
            LabelCurve::Forward { start, end, radius } => single_arc(start, end, radius),
            LabelCurve::Reversed { start, end, radius } => reversed_arc(start, end, radius),
        }
    }
}

/// Common behavior of everything drawn for a sector
#[enum_dispatch]
pub trait Primitive {
    fn kind(&self) -> PrimitiveKind;

    /// Build a fresh SVG node
    fn to_svg(&self) -> SvgNode;

    /// Bring a previously built node up to date
    fn update(&self, node: &mut SvgNode) {
        *node = self.to_svg();
    }
}

/// Filled ring segment: score arcs and leaf bars
#[derive(Debug, Clone, PartialEq)]
pub struct SectorArc {
    pub kind: PrimitiveKind,
    pub id: String,
    pub start: Angle,
    pub end: Angle,
    pub inner: Radius,
    pub outer: Radius,
    pub style: SvgStyle,
}

impl SectorArc {
    fn path_data(&self) -> String {
        annular_sector(self.start, self.end, self.inner, self.outer).to_string()
    }
}

impl Primitive for SectorArc {
    fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    fn to_svg(&self) -> SvgNode {
        SvgNode::Path(Path {
            id: Some(self.id.clone()),
            class: Some(self.kind.as_str().to_string()),
            d: Some(self.path_data()),
            style: Some(self.style.to_string()),
        })
    }

    fn update(&self, node: &mut SvgNode) {
        match node {
            SvgNode::Path(path) => {
                path.d = Some(self.path_data());
                path.style = Some(self.style.to_string());
            }
            other => *other = self.to_svg(),
        }
    }
}

/// Hidden path referenced by a curved label
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPath {
    pub kind: PrimitiveKind,
    pub id: String,
    pub curve: LabelCurve,
}

impl Primitive for LabelPath {
    fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    fn to_svg(&self) -> SvgNode {
        SvgNode::Path(Path {
            id: Some(self.id.clone()),
            class: Some(self.kind.as_str().to_string()),
            d: Some(self.curve.path().to_string()),
            style: Some(SvgStyle::new().fill_opacity(0.0).stroke_opacity(0.0).to_string()),
        })
    }
}

/// Text laid along a [`LabelPath`]
#[derive(Debug, Clone, PartialEq)]
pub struct CurvedLabel {
    pub kind: PrimitiveKind,
    /// Id of the path the text follows
    pub path_id: String,
    pub text: String,
    pub font_size: f64,
    pub position: SectorPosition,
    /// Forces visibility regardless of the enclosing group
    pub always_visible: bool,
}

impl Primitive for CurvedLabel {
    fn kind(&self) -> PrimitiveKind {
        self.kind
    }

    fn to_svg(&self) -> SvgNode {
        SvgNode::Text(Text {
            class: Some(self.kind.as_str().to_string()),
            visibility: self.always_visible.then(|| "visible".to_string()),
            children: vec![TextChild::TextPath(TextPath {
                class: Some(format!("{}_path", self.kind.as_str())),
                href: Some(format!("#{}", self.path_id)),
                // Both label lines may share one curve; this tells them apart
                position_in_sector: Some(self.position.as_str().to_string()),
                font_size: Some(fmt_num(self.font_size)),
                content: self.text.clone(),
            })],
            ..Default::default()
        })
    }
}

/// Straight, rotated text past the end of a leaf bar
#[derive(Debug, Clone, PartialEq)]
pub struct LeafLabel {
    pub text: String,
    pub font_size: f64,
    pub anchor: TextAnchor,
    pub dy: f64,
    pub position: DVec2,
    /// Rotation in degrees
    pub rotate: f64,
}

impl Primitive for LeafLabel {
    fn kind(&self) -> PrimitiveKind {
        PrimitiveKind::SectorLeafText
    }

    fn to_svg(&self) -> SvgNode {
        SvgNode::Text(Text {
            class: Some(PrimitiveKind::SectorLeafText.as_str().to_string()),
            dy: Some(fmt_num(self.dy)),
            font_size: Some(fmt_num(self.font_size)),
            text_anchor: Some(self.anchor.as_str().to_string()),
            transform: Some(format!(
                "translate({},{}) rotate({})",
                fmt_num(self.position.x),
                fmt_num(self.position.y),
                fmt_num(self.rotate)
            )),
            children: vec![TextChild::Tspan(Tspan {
                content: self.text.clone(),
            })],
            ..Default::default()
        })
    }
}

/// Any primitive a sector can produce
#[enum_dispatch(Primitive)]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingPrimitive {
    Sector(SectorArc),
    LabelPath(LabelPath),
    CurvedLabel(CurvedLabel),
    LeafLabel(LeafLabel),
}

#[cfg(test)]
mod tests {
    use super::*;
    use facet_svg::Color;
    use glam::dvec2;
    use std::f64::consts::FRAC_PI_2;

    fn arc() -> SectorArc {
        SectorArc {
            kind: PrimitiveKind::Arc1,
            id: "c_root-needs.arc1".into(),
            start: Angle::ZERO,
            end: Angle(FRAC_PI_2),
            inner: Radius(5.0),
            outer: Radius(10.0),
            style: SvgStyle::new()
                .fill(Color::parse("#000000"))
                .stroke(Color::parse("#000000")),
        }
    }

    #[test]
    fn sector_arc_builds_styled_path() {
        let SvgNode::Path(path) = arc().to_svg() else {
            panic!("expected a path");
        };
        assert_eq!(path.class.as_deref(), Some("arc1"));
        assert_eq!(path.style.as_deref(), Some("fill:rgb(0,0,0);stroke:rgb(0,0,0);"));
        assert_eq!(
            path.d.as_deref(),
            Some("M0,-10A10,10,0,0,1,10,0L5,0A5,5,0,0,0,0,-5Z")
        );
    }

    #[test]
    fn update_keeps_element_identity() {
        let mut node = arc().to_svg();
        let mut wider = arc();
        wider.outer = Radius(20.0);
        DrawingPrimitive::from(wider).update(&mut node);
        let SvgNode::Path(path) = node else {
            panic!("expected a path");
        };
        assert_eq!(path.id.as_deref(), Some("c_root-needs.arc1"));
        assert!(path.d.unwrap().starts_with("M0,-20"));
    }

    #[test]
    fn curved_label_references_its_path() {
        let label = CurvedLabel {
            kind: PrimitiveKind::SectorLabel,
            path_id: "c_root-needs.arc_for_label".into(),
            text: "Needs".into(),
            font_size: 21.2,
            position: SectorPosition::Center,
            always_visible: true,
        };
        let SvgNode::Text(text) = label.to_svg() else {
            panic!("expected text");
        };
        assert_eq!(text.visibility.as_deref(), Some("visible"));
        assert_eq!(text.content(), "Needs");
        let TextChild::TextPath(tp) = &text.children[0] else {
            panic!("expected a textPath");
        };
        assert_eq!(tp.href.as_deref(), Some("#c_root-needs.arc_for_label"));
        assert_eq!(tp.position_in_sector.as_deref(), Some("center"));
        assert_eq!(tp.class.as_deref(), Some("sector_label_path"));
        assert_eq!(tp.font_size.as_deref(), Some("21.2"));
    }

    #[test]
    fn leaf_label_transform() {
        let label = LeafLabel {
            text: "Curiosity".into(),
            font_size: 13.0,
            anchor: TextAnchor::Start,
            dy: 5.5,
            position: dvec2(0.0, -105.0),
            rotate: -90.0,
        };
        assert_eq!(label.kind(), PrimitiveKind::SectorLeafText);
        let SvgNode::Text(text) = label.to_svg() else {
            panic!("expected text");
        };
        assert_eq!(text.transform.as_deref(), Some("translate(0,-105) rotate(-90)"));
        assert_eq!(text.text_anchor.as_deref(), Some("start"));
    }

    #[test]
    fn kinds_have_stable_names() {
        assert_eq!(PrimitiveKind::Bar.as_str(), "_bar");
        assert_eq!(PrimitiveKind::ArcForLabelNumber.as_str(), "arc_for_label_number");
    }
}
