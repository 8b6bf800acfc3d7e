//! # Communications interface crate.
//!
//! Provides the line protocols spoken by the lander: telecommands coming from the controller,
//! replies going back to it, and axis-control blocks going to the axis driver.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Telecommand parsing and responses
pub mod tc;

/// Command definitions for equipment (the cable axes)
pub mod eqpt;
