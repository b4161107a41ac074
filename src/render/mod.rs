//! Sector rendering for sunburst charts
//!
//! This module is organized into submodules:
//! - `defaults`: Default sizes and settings
//! - `palette`: Category color families
//! - `geometry`: Arc and label-curve path data
//! - `primitive`: Drawing primitives and their SVG form
//! - `sector`: Per-node score encoding (SectorRenderer)
//! - `label`: Label curves, sizes and leaf label placement
//! - `svg`: SVG drawing surface with a per-node element cache

pub mod defaults;
pub mod geometry;
pub mod label;
pub mod palette;
pub mod primitive;
pub mod sector;
pub mod svg;

pub use palette::Palette;
pub use primitive::{DrawingPrimitive, Primitive, PrimitiveKind};
pub use sector::SectorRenderer;
pub use svg::SvgSurface;

use crate::errors::RenderError;
use crate::layout::LayoutNode;
use crate::types::Dimensions;

/// Where sectors are drawn.
///
/// A render pass calls [`begin`](DrawingSurface::begin) once, then
/// [`draw_sector`](DrawingSurface::draw_sector) for each node in layout
/// order. Surfaces keep whatever they built between passes so that redraws
/// after an interaction can reuse elements.
pub trait DrawingSurface {
    /// Prepare for a pass over a drawing area of the given size
    fn begin(&mut self, dims: Dimensions);

    fn draw_sector(&mut self, node: &LayoutNode, primitives: Vec<DrawingPrimitive>);

    /// Show or hide everything drawn for a node
    fn set_visibility(&mut self, key: &str, visible: bool);

    /// Called after the last sector of a pass
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Why a render pass drew nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No profile has been supplied
    NoData,
    /// Every category was excluded
    EmptyTree,
    /// The host's drawing surface is not attached yet
    HostNotReady,
}

/// Result of a render pass that did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    Rendered { sectors: usize, visible: usize },
    Skipped(SkipReason),
}

impl RenderOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, RenderOutcome::Rendered { .. })
    }
}

/// Document-unique id of one element of a sector
pub fn element_id(chart_id: &str, key: &str, kind: PrimitiveKind) -> String {
    format!("{}_{}.{}", chart_id, key.replace('/', "-"), kind.as_str())
}
