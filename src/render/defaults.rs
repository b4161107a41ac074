//! Default sizes and settings (angles in radians, radii in layout units)

use std::f64::consts::TAU;

use crate::types::{Angle, Radius};

/// Gap left at the end of every depth-1 sector; deeper sectors use a fraction
pub const SECTOR_RIGHT_PAD: Angle = Angle::radians(0.04 * TAU);
/// Gap between a ring's inner edge and the arcs drawn in it
pub const SECTOR_BOTTOM_PAD: Radius = Radius::units(5.0);
/// Fill opacity of the "potential" arc
pub const POTENTIAL_FILL_OPACITY: f64 = 0.15;
/// Numerator of the default leaf bar length factor `10 / (depth - 2)`
pub const LEAF_BAR_SCALE: f64 = 10.0;

pub const BRANCH_LABEL_SIZE: f64 = 30.0;
pub const NUMBER_LABEL_SIZE: f64 = 10.0;
pub const LEAF_LABEL_MAX_SIZE: f64 = 13.0;
pub const LEAF_LABEL_FALLBACK_SIZE: f64 = 10.0;
/// Distance between the end of a leaf bar and its label
pub const LEAF_LABEL_GAP: Radius = Radius::units(5.0);
