//! Command control module
//!
//! Holds the commanded state of the lander and executes G-code telecommands against it,
//! producing the reply for the controller and the demands for the axis driver.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;
pub mod words;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::tc::{Tc, TcParseError};

// Internal
pub use params::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Id of the `M` command setting the first fixing point. The following ids set the next ones.
pub const FIRST_FIXING_POINT_ID: u32 = 131;

/// Id of the `M` command setting the last fixing point.
pub const LAST_FIXING_POINT_ID: u32 =
    FIRST_FIXING_POINT_ID + crate::kinematics::NUM_FIXING_POINTS as u32 - 1;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during CmdCtrl operation.
///
/// None of these change the state, they are reported to the controller as `KO`.
#[derive(Debug, thiserror::Error)]
pub enum CmdCtrlError {
    #[error("Could not parse the TC: {0}")]
    InvalidTc(TcParseError),

    #[error("TC is not supported: {0}")]
    UnknownCommand(Tc),

    #[error("TC has invalid parameters: {0}")]
    InvalidParams(TcParseError),

    #[error("Cannot dwell for {0} s")]
    InvalidDwell(f64),

    #[error("Cable lengths {0:?} are not finite")]
    InvalidLengths([f64; 3]),

    #[error("Invalid initialisation parameters: {0}")]
    InvalidInitParams(String),

    #[error("Work has stopped, no more TCs can be executed")]
    Stopped,
}
