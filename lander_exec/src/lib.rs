//! # Lander library.
//!
//! Motion-control core of the three-cable lander. Command lines from the controller are executed
//! against the lander's commanded state, and the resulting cable lengths are sent to the axis
//! driver.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Command control - the G-code state machine holding the commanded position
pub mod cmd_ctrl;

/// Command servers - the channels to the controller and axis driver
pub mod cmd_server;

/// Session loop - ties a command server to command control
pub mod exec_loop;

/// Kinematics - converts positions into cable lengths
pub mod kinematics;

/// Parameters of the lander executable
pub mod params;
