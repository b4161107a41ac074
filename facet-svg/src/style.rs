//! SVG style attribute parsing and structured representation.

use std::fmt;

/// A color value
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// No color (transparent)
    None,
    /// RGB color
    Rgb { r: u8, g: u8, b: u8 },
    /// Named color
    Named(String),
}

impl Color {
    /// Parse a color from a string
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.eq_ignore_ascii_case("none") {
            return Color::None;
        }

        if let Some(inner) = s.strip_prefix("rgb(").and_then(|s| s.strip_suffix(')')) {
            let parts: Vec<&str> = inner.split(',').collect();
            if parts.len() == 3 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    parts[0].trim().parse::<u8>(),
                    parts[1].trim().parse::<u8>(),
                    parts[2].trim().parse::<u8>(),
                ) {
                    return Color::Rgb { r, g, b };
                }
            }
        }

        if let Some(hex) = s.strip_prefix('#') {
            if hex.len() == 6 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..2], 16),
                    u8::from_str_radix(&hex[2..4], 16),
                    u8::from_str_radix(&hex[4..6], 16),
                ) {
                    return Color::Rgb { r, g, b };
                }
            } else if hex.len() == 3 {
                if let (Ok(r), Ok(g), Ok(b)) = (
                    u8::from_str_radix(&hex[0..1], 16),
                    u8::from_str_radix(&hex[1..2], 16),
                    u8::from_str_radix(&hex[2..3], 16),
                ) {
                    // #abc -> #aabbcc
                    return Color::Rgb {
                        r: r * 17,
                        g: g * 17,
                        b: b * 17,
                    };
                }
            }
        }

        Color::Named(s.to_lowercase())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::None => write!(f, "none"),
            Color::Rgb { r, g, b } => write!(f, "rgb({},{},{})", r, g, b),
            Color::Named(n) => write!(f, "{}", n),
        }
    }
}

/// Structured SVG style attribute for chart sectors
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SvgStyle {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    pub fill_opacity: Option<f64>,
    pub stroke_opacity: Option<f64>,
}

impl SvgStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = Some(color);
        self
    }

    pub fn stroke(mut self, color: Color) -> Self {
        self.stroke = Some(color);
        self
    }

    pub fn fill_opacity(mut self, opacity: f64) -> Self {
        self.fill_opacity = Some(opacity);
        self
    }

    pub fn stroke_opacity(mut self, opacity: f64) -> Self {
        self.stroke_opacity = Some(opacity);
        self
    }
}

impl fmt::Display for SvgStyle {
    /// CSS-like string with trailing semicolon, empty when nothing is set
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(ref fill) = self.fill {
            parts.push(format!("fill:{}", fill));
        }
        if let Some(ref stroke) = self.stroke {
            parts.push(format!("stroke:{}", stroke));
        }
        if let Some(opacity) = self.fill_opacity {
            parts.push(format!("fill-opacity:{}", fmt_num(opacity)));
        }
        if let Some(opacity) = self.stroke_opacity {
            parts.push(format!("stroke-opacity:{}", fmt_num(opacity)));
        }

        if parts.is_empty() {
            Ok(())
        } else {
            write!(f, "{};", parts.join(";"))
        }
    }
}

fn fmt_num(v: f64) -> String {
    let s = format!("{:.6}", v);
    let s = s.trim_end_matches('0');
    let s = s.trim_end_matches('.');
    s.to_string()
}
