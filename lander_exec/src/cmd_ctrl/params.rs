//! Parameters structure for CmdCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;
use crate::kinematics::NUM_FIXING_POINTS;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for command control.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Params {

    /// Fixing points at startup, until they are calibrated with `M131`-`M133`.
    ///
    /// Units: millimeters
    pub fixing_points_mm: [[f64; 3]; NUM_FIXING_POINTS],

    /// Feed rate at startup, until it is set by a `G1` command.
    pub displacement_speed: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            fixing_points_mm: [[0.0; 3]; NUM_FIXING_POINTS],
            displacement_speed: 1.0,
        }
    }
}
