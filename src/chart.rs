//! One chart instance: data, host, layout state and event handling.

use crate::errors::{RenderError, ValidationError};
use crate::host::{BottomPredicate, LowerHalf, Phase, Tooltip, WidgetHost};
use crate::interaction::{ChartEvent, apply_changes, toggle_expansion};
use crate::layout::{Layout, LayoutEngine};
use crate::profile::{ProfileRecord, ProfileTree, build_tree};
use crate::render::{
    DrawingSurface, PrimitiveKind, RenderOutcome, SectorRenderer, SkipReason, element_id,
};
use crate::types::Dimensions;

/// Shown to the host when it asks for a render before it can draw
pub const NOT_READY_ALERT: &str = "Widget is not fully initialized, cannot render chart";

/// A sunburst chart bound to a host.
///
/// The chart keeps the layout of its last render pass; events are resolved
/// against it and expansion state carries over to the next pass.
pub struct Chart<H, B = LowerHalf> {
    host: H,
    bottom: B,
    tree: Option<ProfileTree>,
    layout: Option<Layout>,
}

impl<H: WidgetHost> Chart<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            bottom: LowerHalf,
            tree: None,
            layout: None,
        }
    }
}

impl<H: WidgetHost, B: BottomPredicate> Chart<H, B> {
    /// Replace the predicate that decides which labels are drawn reversed
    pub fn with_bottom_predicate<P: BottomPredicate>(self, bottom: P) -> Chart<H, P> {
        Chart {
            host: self.host,
            bottom,
            tree: self.tree,
            layout: self.layout,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Layout of the last successful render pass
    pub fn layout(&self) -> Option<&Layout> {
        self.layout.as_ref()
    }

    /// Replace the chart's data; the host sees [`Phase::Loading`] until the next render.
    pub fn set_data(&mut self, tree: ProfileTree) {
        self.tree = Some(tree);
        self.host.switch_state(Phase::Loading);
    }

    /// Build the tree from a profile record and use it as the chart's data.
    pub fn set_profile(&mut self, profile: &ProfileRecord) -> Result<(), ValidationError> {
        self.set_data(build_tree(profile)?);
        Ok(())
    }

    /// Lay out the data and draw every sector onto `surface`.
    ///
    /// Missing data, an empty tree and an unready host skip the pass
    /// without drawing anything.
    pub fn render<S: DrawingSurface + ?Sized>(
        &mut self,
        surface: &mut S,
    ) -> Result<RenderOutcome, RenderError> {
        let Some(tree) = self.tree.as_ref() else {
            crate::log::error!("no profile data to render");
            return Ok(RenderOutcome::Skipped(SkipReason::NoData));
        };

        let excluded = self.host.exclude();
        if tree.categories().all(|c| excluded.contains(&c.id)) {
            crate::log::warn!("every category is excluded, nothing to render");
            return Ok(RenderOutcome::Skipped(SkipReason::EmptyTree));
        }

        if !self.host.is_ready() {
            self.host.alert(NOT_READY_ALERT);
            return Ok(RenderOutcome::Skipped(SkipReason::HostNotReady));
        }

        self.host.switch_state(Phase::Rendering);

        let (width, height) = self.host.dimensions();
        let dims = Dimensions::try_new(width, height)
            .map_err(|_| RenderError::InvalidDimensions { width, height })?;

        let mut layout = LayoutEngine::for_dimensions(dims).layout(tree, self.host.exclude());
        if let Some(previous) = &self.layout {
            layout.carry_state_from(previous);
        }

        let renderer = SectorRenderer::new(&self.host, &self.bottom);
        surface.begin(dims);
        for (index, node) in layout.nodes().iter().enumerate() {
            surface.draw_sector(node, renderer.render_sector(&layout, index));
        }
        surface.finish()?;

        let sectors = layout.len();
        let visible = layout.visible().count();
        crate::log::info!(sectors, visible, "rendered chart");
        self.layout = Some(layout);
        Ok(RenderOutcome::Rendered { sectors, visible })
    }

    /// React to a user event on the last rendered layout.
    pub fn dispatch<S: DrawingSurface + ?Sized>(
        &mut self,
        event: ChartEvent,
        surface: &mut S,
    ) -> Result<(), RenderError> {
        let Chart {
            host,
            bottom,
            layout,
            ..
        } = self;
        let layout = layout.as_mut().ok_or(RenderError::NotRendered)?;

        match event {
            ChartEvent::Click(key) => {
                let changes = toggle_expansion(layout, &key)?;
                if changes.is_empty() {
                    return Ok(());
                }
                apply_changes(layout, &changes);
                for change in &changes {
                    surface.set_visibility(&change.key, change.visible);
                }

                let renderer = SectorRenderer::new(&*host, &*bottom);
                for (index, node) in layout.nodes().iter().enumerate() {
                    if node.visible {
                        surface.draw_sector(node, renderer.render_sector(layout, index));
                    }
                }
                surface.finish()
            }
            ChartEvent::HoverIn(key) => {
                let node = layout
                    .find(&key)
                    .ok_or_else(|| RenderError::UnknownNode { key: key.clone() })?;
                let kind = if node.is_leaf() {
                    PrimitiveKind::Bar
                } else {
                    PrimitiveKind::Arc1
                };
                let tooltip = Tooltip {
                    key: node.key.clone(),
                    id: node.id.clone(),
                    name: node.name.clone(),
                    score: host.score(node),
                    perc_neu: node.perc_neu,
                    depth: node.depth,
                    anchor: element_id(host.id(), &node.key, kind),
                };
                host.show_tooltip(Some(tooltip));
                Ok(())
            }
            ChartEvent::HoverOut => {
                host.show_tooltip(None);
                Ok(())
            }
        }
    }
}
