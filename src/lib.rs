//! Sunburst charts for personality profiles.
//!
//! A profile (Big Five traits with their facets, needs, values and optional
//! social behaviors) becomes a radial chart: one ring per tree level, each
//! sector's angle proportional to its leaf count, and each score drawn as
//! an odometer-style pair of arcs or as a bar on the outer ring.
//!
//! ```rust,ignore
//! let svg = persona_sunburst::render_profile(json, &ChartOptions::default())?;
//! ```

pub mod chart;
pub mod errors;
pub mod host;
pub mod interaction;
pub mod layout;
pub mod log;
pub mod profile;
pub mod render;
pub mod types;

pub use chart::Chart;
pub use errors::{ParseError, RenderError, ValidationError};
pub use host::{BottomPredicate, ChartOptions, LowerHalf, StaticHost, WidgetHost};
pub use interaction::{ChartEvent, toggle_expansion};
pub use layout::{Layout, LayoutEngine, LayoutNode};
pub use profile::{ProfileRecord, ProfileTree, build_tree};
pub use render::{RenderOutcome, SvgSurface};

/// Output of [`render_profile`] when there is nothing to draw
pub const EMPTY_CHART: &str = "<!-- empty persona chart -->";

/// Render profile JSON to an SVG document.
///
/// Returns the SVG string on success, or an error with diagnostics.
pub fn render_profile(json: &str, options: &ChartOptions) -> Result<String, miette::Report> {
    let profile = ProfileRecord::from_json(json)?;
    let tree = build_tree(&profile)?;

    let mut chart = Chart::new(StaticHost::new(options.clone()));
    chart.set_data(tree);

    let mut surface = SvgSurface::new();
    match chart.render(&mut surface)? {
        RenderOutcome::Rendered { .. } => Ok(surface.to_svg_string()?),
        RenderOutcome::Skipped(_) => Ok(EMPTY_CHART.to_string()),
    }
}
