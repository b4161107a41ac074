//! Collaborators the chart talks to: the widget host and the bottom predicate.
//!
//! A chart never owns a window or a DOM. Everything environmental
//! (dimensions, palette, tooltips, category suppression) comes through
//! [`WidgetHost`]. [`StaticHost`] is a headless host built from
//! [`ChartOptions`] that records what the chart asked of it.

use std::collections::BTreeSet;
use std::f64::consts::FRAC_PI_2;

use serde::Deserialize;

use crate::errors::{ParseError, SourceContext};
use crate::layout::LayoutNode;
use crate::render::palette::Palette;

/// Lifecycle phase reported to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// New data arrived and has not been drawn yet
    Loading,
    /// A render pass is about to lay out the tree
    Rendering,
}

/// Data shown when hovering a sector
#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub key: String,
    pub id: String,
    pub name: String,
    pub score: f64,
    pub perc_neu: Option<f64>,
    pub depth: usize,
    /// Element id of the sector the tooltip is anchored to
    pub anchor: String,
}

/// The environment a chart is embedded in
pub trait WidgetHost {
    /// Chart id, used as the prefix of element ids
    fn id(&self) -> &str;

    /// Raw `(width, height)` of the drawing area in pixels
    fn dimensions(&self) -> (f64, f64);

    /// Whether the drawing surface can be used yet
    fn is_ready(&self) -> bool {
        true
    }

    /// Called once per render pass, before layout
    fn switch_state(&mut self, phase: Phase);

    /// `None` hides the tooltip
    fn show_tooltip(&mut self, tooltip: Option<Tooltip>);

    /// User-visible warning
    fn alert(&mut self, message: &str);

    /// Category ids to leave out of the chart
    fn exclude(&self) -> &BTreeSet<String>;

    fn palette(&self) -> &Palette;

    /// Score used for encoding a node
    fn score(&self, node: &LayoutNode) -> f64 {
        node.score
    }
}

/// Decides whether a sector sits in the lower part of the chart, where
/// labels are laid on a reversed curve so they read upright.
pub trait BottomPredicate {
    fn is_bottom(&self, node: &LayoutNode) -> bool;
}

impl<F> BottomPredicate for F
where
    F: Fn(&LayoutNode) -> bool,
{
    fn is_bottom(&self, node: &LayoutNode) -> bool {
        self(node)
    }
}

/// Sectors starting past 3 o'clock and ending before roughly 10 o'clock
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowerHalf;

impl LowerHalf {
    /// End angle (radians) a bottom sector must stay under
    pub const END_LIMIT: f64 = 5.0;
}

impl BottomPredicate for LowerHalf {
    fn is_bottom(&self, node: &LayoutNode) -> bool {
        node.x0.raw() > FRAC_PI_2 && node.x1.raw() < Self::END_LIMIT
    }
}

/// Chart configuration supplied by the embedding application
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub id: String,
    pub width: f64,
    pub height: f64,
    /// Category ids (`personality`, `needs`, `values`, `sbh`) to omit
    pub exclude: BTreeSet<String>,
    pub palette: Palette,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            id: "persona".to_string(),
            width: 640.0,
            height: 640.0,
            exclude: BTreeSet::new(),
            palette: Palette::default(),
        }
    }
}

impl ChartOptions {
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_exclude<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(source: &str) -> Result<Self, ParseError> {
        serde_json::from_str(source)
            .map_err(|e| ParseError::options(&SourceContext::new("<options>", source), &e))
    }
}

/// Headless host that records every callback it receives
#[derive(Debug, Clone)]
pub struct StaticHost {
    options: ChartOptions,
    ready: bool,
    pub phases: Vec<Phase>,
    pub tooltip: Option<Tooltip>,
    pub alerts: Vec<String>,
}

impl StaticHost {
    pub fn new(options: ChartOptions) -> Self {
        Self {
            options,
            ready: true,
            phases: Vec::new(),
            tooltip: None,
            alerts: Vec::new(),
        }
    }

    /// Host whose drawing surface has not been attached yet
    pub fn not_ready(options: ChartOptions) -> Self {
        Self {
            ready: false,
            ..Self::new(options)
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }
}

impl WidgetHost for StaticHost {
    fn id(&self) -> &str {
        &self.options.id
    }

    fn dimensions(&self) -> (f64, f64) {
        (self.options.width, self.options.height)
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn switch_state(&mut self, phase: Phase) {
        self.phases.push(phase);
    }

    fn show_tooltip(&mut self, tooltip: Option<Tooltip>) {
        self.tooltip = tooltip;
    }

    fn alert(&mut self, message: &str) {
        crate::log::warn!(alert = message, "host alert");
        self.alerts.push(message.to_string());
    }

    fn exclude(&self) -> &BTreeSet<String> {
        &self.options.exclude
    }

    fn palette(&self) -> &Palette {
        &self.options.palette
    }
}
