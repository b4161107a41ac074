//! Path data for annular sectors and label curves.
//!
//! Sector outlines follow d3-shape's `arc()` (no corner radius, no pad
//! angle): angles are measured clockwise from 12 o'clock and the sweep
//! direction follows the sign of `end - start`.

use std::f64::consts::PI;
use std::fmt;

use glam::{DVec2, dvec2};

use crate::types::{Angle, Radius, polar};

/// Radii and spans below this are treated as zero
const EPSILON: f64 = 1e-12;

/// Builder for SVG path data strings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathData {
    commands: Vec<String>,
}

impl PathData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: DVec2) -> Self {
        self.commands.push(format!("M{},{}", fmt_num(p.x), fmt_num(p.y)));
        self
    }

    pub fn line_to(mut self, p: DVec2) -> Self {
        self.commands.push(format!("L{},{}", fmt_num(p.x), fmt_num(p.y)));
        self
    }

    /// Circular arc of radius `r` to `p`
    pub fn arc_to(mut self, r: f64, large_arc: bool, sweep: bool, p: DVec2) -> Self {
        self.commands.push(format!(
            "A{},{},0,{},{},{},{}",
            fmt_num(r),
            fmt_num(r),
            u8::from(large_arc),
            u8::from(sweep),
            fmt_num(p.x),
            fmt_num(p.y)
        ));
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push("Z".to_string());
        self
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            f.write_str(cmd)?;
        }
        Ok(())
    }
}

/// Outline of the ring segment between two angles and two radii.
pub fn annular_sector(start: Angle, end: Angle, inner: Radius, outer: Radius) -> PathData {
    let (inner, outer) = if outer < inner { (outer, inner) } else { (inner, outer) };
    let r0 = inner.raw();
    let r1 = outer.raw();
    let span = (end - start).abs().raw();
    let clockwise = end > start;

    if r1 <= EPSILON {
        return PathData::new().move_to(DVec2::ZERO).close();
    }

    if span >= std::f64::consts::TAU - EPSILON {
        // Full ring: two half-circle arcs per edge
        let mut path = PathData::new()
            .move_to(polar(start, outer))
            .arc_to(r1, true, clockwise, polar(start + Angle::HALF_TURN, outer))
            .arc_to(r1, true, clockwise, polar(start, outer));
        if r0 > EPSILON {
            path = path
                .move_to(polar(start, inner))
                .arc_to(r0, true, !clockwise, polar(start + Angle::HALF_TURN, inner))
                .arc_to(r0, true, !clockwise, polar(start, inner));
        }
        return path.close();
    }

    let large_arc = span >= PI;
    let path = PathData::new()
        .move_to(polar(start, outer))
        .arc_to(r1, large_arc, clockwise, polar(end, outer));
    let path = if r0 > EPSILON {
        path.line_to(polar(end, inner))
            .arc_to(r0, large_arc, !clockwise, polar(start, inner))
    } else {
        path.line_to(DVec2::ZERO)
    };
    path.close()
}

/// Open clockwise arc along a single radius, used to carry label text.
pub fn single_arc(start: Angle, end: Angle, radius: Radius) -> PathData {
    let large_arc = (end - start).raw() > PI;
    PathData::new()
        .move_to(polar(start, radius))
        .arc_to(radius.raw(), large_arc, true, polar(end, radius))
}

/// Open arc between two standard-position angles (0 at 3 o'clock).
///
/// With `start > end` the arc runs counter-clockwise on screen, so text laid
/// on it reads upright in the lower half of the chart.
pub fn reversed_arc(start: Angle, end: Angle, radius: Radius) -> PathData {
    let r = radius.raw();
    let from = dvec2(r * start.cos(), r * start.sin());
    let to = dvec2(r * end.cos(), r * end.sin());
    let large_arc = (end - start).abs().raw() > PI;
    PathData::new()
        .move_to(from)
        .arc_to(r, large_arc, end > start, to)
}

/// Format a number with 6 significant figures, trailing zeros trimmed.
pub(crate) fn fmt_num(value: f64) -> String {
    fmt_num_precision(value, 6)
}

/// Values closer to zero than this print as `0`
const ZERO_SNAP: f64 = 1e-9;

/// Format a number with specified significant figures, trailing zeros trimmed.
fn fmt_num_precision(value: f64, sig_figs: i32) -> String {
    if value.abs() < ZERO_SNAP || !value.is_finite() {
        return "0".to_string();
    }

    let abs_val = value.abs();
    let magnitude = abs_val.log10().floor() as i32;
    let scale = 10_f64.powi(sig_figs - 1 - magnitude);
    let rounded = (value * scale).round() / scale;

    let decimals = (sig_figs - 1 - magnitude).max(0) as usize;
    let s = format!("{:.prec$}", rounded, prec = decimals);
    let s = if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s.as_str()
    };
    if s == "-0" { "0".to_string() } else { s.to_string() }
}
