//! Expand/fold state transitions and chart events.
//!
//! Clicking a sector toggles it between collapsed and expanded. Expanding
//! reveals its direct children; folding hides every descendant and folds
//! them too, so a later expand starts from a clean slate. Category sectors
//! and the root are always expanded and ignore clicks.

use crate::errors::RenderError;
use crate::layout::Layout;

/// Expansion state of one node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Collapsed,
    Expanded,
}

impl Expansion {
    pub fn from_flag(expanded: bool) -> Self {
        if expanded {
            Expansion::Expanded
        } else {
            Expansion::Collapsed
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Expansion::Expanded
    }
}

/// New state for one node, produced by [`toggle_expansion`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityChange {
    pub key: String,
    pub expansion: Expansion,
    pub visible: bool,
}

/// Input events a chart reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartEvent {
    Click(String),
    HoverIn(String),
    HoverOut,
}

/// Work out what a click on `key` changes, without changing anything.
pub fn toggle_expansion(layout: &Layout, key: &str) -> Result<Vec<VisibilityChange>, RenderError> {
    let index = layout.index_of(key).ok_or_else(|| RenderError::UnknownNode {
        key: key.to_string(),
    })?;
    let Some(node) = layout.get(index) else {
        return Ok(Vec::new());
    };
    if node.depth <= 1 {
        return Ok(Vec::new());
    }

    let mut changes = Vec::new();
    if node.expanded {
        changes.push(VisibilityChange {
            key: node.key.clone(),
            expansion: Expansion::Collapsed,
            visible: node.visible,
        });
        for below in layout.descendants(index) {
            if let Some(child) = layout.get(below) {
                changes.push(VisibilityChange {
                    key: child.key.clone(),
                    expansion: Expansion::Collapsed,
                    visible: false,
                });
            }
        }
    } else {
        changes.push(VisibilityChange {
            key: node.key.clone(),
            expansion: Expansion::Expanded,
            visible: node.visible,
        });
        for child in layout.children(index) {
            changes.push(VisibilityChange {
                key: child.key.clone(),
                expansion: Expansion::from_flag(child.expanded),
                visible: true,
            });
        }
    }

    crate::log::debug!(
        key,
        expanded = !node.expanded,
        changes = changes.len(),
        "toggled sector"
    );
    Ok(changes)
}

/// Write changes back into the layout, returning how many nodes they touched.
pub fn apply_changes(layout: &mut Layout, changes: &[VisibilityChange]) -> usize {
    let mut applied = 0;
    for change in changes {
        if let Some(index) = layout.index_of(&change.key) {
            layout.set_state(index, change.expansion.is_expanded(), change.visible);
            applied += 1;
        }
    }
    applied
}
