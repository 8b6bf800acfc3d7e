//! # Axes Equipment Commands
//!
//! Messages sent to the downstream axis driver which winds the three cables.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Serialize, Deserialize};
use std::fmt;

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// A block of axis-control commands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum AxesCtrl {
    /// Move the axes to the given cable lengths in absolute mode, then go back to relative mode.
    ///
    /// Lengths are truncated towards zero when written.
    ///
    /// Units: millimeters
    MoveAbs {
        lengths_mm: [f64; 3]
    },

    /// Stop the axes for good.
    Stop
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl AxesCtrl {
    /// The lines of the block, without line terminators.
    pub fn lines(&self) -> Vec<String> {
        match self {
            AxesCtrl::MoveAbs { lengths_mm } => vec![
                String::from("G90"),
                format!(
                    "G0 x{} y{} z{}",
                    lengths_mm[0].trunc() as i64,
                    lengths_mm[1].trunc() as i64,
                    lengths_mm[2].trunc() as i64
                ),
                String::from("G91")
            ],
            AxesCtrl::Stop => vec![String::from("M00")]
        }
    }
}

impl fmt::Display for AxesCtrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_move_abs_block() {
        let ctrl = AxesCtrl::MoveAbs {
            lengths_mm: [519.6, 0.99, 1200.0]
        };

        assert_eq!(ctrl.to_string(), "G90\nG0 x519 y0 z1200\nG91");
    }

    #[test]
    fn test_stop_block() {
        assert_eq!(AxesCtrl::Stop.lines(), vec![String::from("M00")]);
        assert_eq!(AxesCtrl::Stop.to_string(), "M00");
    }
}
