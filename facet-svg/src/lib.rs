//! Facet-derived SVG element types for sunburst chart output.
//!
//! Only the handful of elements a radial chart needs are modelled: nested
//! groups, paths, and text whose content is either a `<textPath>` riding
//! an invisible arc or a plain `<tspan>`. Numeric attributes are carried as
//! pre-formatted strings so callers control precision.
//!
//! # Example
//!
//! ```rust,ignore
//! use facet_svg::{Group, Path, Svg, SvgNode};
//!
//! let svg = Svg {
//!     xmlns: Some(facet_svg::SVG_NS.to_string()),
//!     width: Some("100".into()),
//!     height: Some("100".into()),
//!     children: vec![SvgNode::G(Group {
//!         class: Some("sector".into()),
//!         children: vec![SvgNode::Path(Path {
//!             d: Some("M0,-10A10,10,0,0,1,10,0L0,0Z".into()),
//!             ..Default::default()
//!         })],
//!         ..Default::default()
//!     })],
//!     ..Default::default()
//! };
//! let xml = facet_svg::facet_xml::to_string(&svg).unwrap();
//! ```

use facet::Facet;
use facet_xml as xml;

pub mod style;

pub use style::{Color, SvgStyle};

/// SVG namespace URI
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Root SVG element
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Svg {
    #[facet(xml::attribute)]
    pub xmlns: Option<String>,
    #[facet(xml::attribute)]
    pub width: Option<String>,
    #[facet(xml::attribute)]
    pub height: Option<String>,
    #[facet(xml::attribute, rename = "viewBox")]
    pub view_box: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

/// Any SVG node a sunburst chart emits
#[derive(Facet, Debug, Clone)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
#[repr(u8)]
pub enum SvgNode {
    #[facet(rename = "g")]
    G(Group),
    #[facet(rename = "path")]
    Path(Path),
    #[facet(rename = "text")]
    Text(Text),
}

/// SVG group element (`<g>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Group {
    #[facet(xml::attribute)]
    pub id: Option<String>,
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::attribute)]
    pub transform: Option<String>,
    #[facet(xml::attribute)]
    pub visibility: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<SvgNode>,
}

/// SVG path element (`<path>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Path {
    #[facet(xml::attribute)]
    pub id: Option<String>,
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::attribute)]
    pub d: Option<String>,
    #[facet(xml::attribute)]
    pub style: Option<String>,
}

/// SVG text element (`<text>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Text {
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::attribute)]
    pub dy: Option<String>,
    #[facet(xml::attribute, rename = "font-size")]
    pub font_size: Option<String>,
    #[facet(xml::attribute, rename = "text-anchor")]
    pub text_anchor: Option<String>,
    #[facet(xml::attribute)]
    pub transform: Option<String>,
    #[facet(xml::attribute)]
    pub visibility: Option<String>,
    #[facet(xml::elements)]
    pub children: Vec<TextChild>,
}

/// Content of a `<text>` element
#[derive(Facet, Debug, Clone)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
#[repr(u8)]
pub enum TextChild {
    #[facet(rename = "textPath")]
    TextPath(TextPath),
    #[facet(rename = "tspan")]
    Tspan(Tspan),
}

/// Text laid along a referenced path (`<textPath>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct TextPath {
    #[facet(xml::attribute)]
    pub class: Option<String>,
    #[facet(xml::attribute)]
    pub href: Option<String>,
    #[facet(xml::attribute, rename = "position-in-sector")]
    pub position_in_sector: Option<String>,
    #[facet(xml::attribute, rename = "font-size")]
    pub font_size: Option<String>,
    #[facet(xml::text)]
    pub content: String,
}

/// Plain text run (`<tspan>`)
#[derive(Facet, Debug, Clone, Default)]
#[facet(xml::ns_all = "http://www.w3.org/2000/svg")]
pub struct Tspan {
    #[facet(xml::text)]
    pub content: String,
}

impl Text {
    /// Concatenated character content of all runs
    pub fn content(&self) -> String {
        self.children
            .iter()
            .map(|child| match child {
                TextChild::TextPath(p) => p.content.as_str(),
                TextChild::Tspan(s) => s.content.as_str(),
            })
            .collect()
    }
}

// Re-export facet_xml for convenience
pub use facet_xml;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_content_joins_runs() {
        let text = Text {
            children: vec![
                TextChild::TextPath(TextPath {
                    content: "Openness".into(),
                    ..Default::default()
                }),
                TextChild::Tspan(Tspan {
                    content: " 81%".into(),
                }),
            ],
            ..Default::default()
        };
        assert_eq!(text.content(), "Openness 81%");
    }
}
