//! # Command Server Module
//!
//! This module abstracts over the channels of the lander executable. A server gives access to
//! the command lines sent by the controller, and sends back the replies and the axis-control
//! blocks.
//!
//! Two servers are available:
//! - [`PipeServer`]: three named pipes, one per channel,
//! - [`StreamServer`]: one input and one output stream, replies and axis-control blocks are
//!   interleaved on the output.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

mod pipe_server;
mod stream_server;

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::axes::AxesCtrl, tc::TcResponse};
use log::warn;
use std::io::BufRead;

pub use pipe_server::PipeServer;
pub use stream_server::StreamServer;

// ------------------------------------------------------------------------------------------------
// TRAITS
// ------------------------------------------------------------------------------------------------

/// A server connecting the lander to its controller and axis driver.
pub trait CmdServer {
    /// Block until a line is received from the controller.
    ///
    /// `None` is returned at the end of the stream.
    fn get_cmd_line(&mut self) -> Result<Option<String>, CmdServerError>;

    /// Send a block to the axis driver.
    fn send_axes_ctrl(&mut self, axes_ctrl: &AxesCtrl) -> Result<(), CmdServerError>;

    /// Send the reply for the last line to the controller.
    fn send_response(&mut self, response: TcResponse) -> Result<(), CmdServerError>;

    /// Flush and close all channels.
    fn close(self) -> Result<(), CmdServerError>;
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Errors which can occur in a [`CmdServer`]
#[derive(thiserror::Error, Debug)]
pub enum CmdServerError {
    #[error("Could not open the {0} channel ({1:?}): {2}")]
    OpenError(&'static str, std::path::PathBuf, std::io::Error),

    #[error("Could not read from the command channel: {0}")]
    RecvError(std::io::Error),

    #[error("Could not send data on the {0} channel: {1}")]
    SendError(&'static str, std::io::Error),

    #[error("Could not close the {0} channel: {1}")]
    CloseError(&'static str, std::io::Error),
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Read one line from the command channel, including its terminator.
///
/// Bytes which are not valid UTF-8 are replaced rather than failing the read, so that a garbled
/// line reaches the parser and gets rejected like any other invalid command.
fn read_cmd_line<R: BufRead>(reader: &mut R) -> Result<Option<String>, CmdServerError> {
    let mut buf = Vec::new();

    match reader.read_until(b'\n', &mut buf) {
        Ok(0) => Ok(None),
        Ok(_) => match String::from_utf8(buf) {
            Ok(line) => Ok(Some(line)),
            Err(e) => {
                warn!("Command line is not valid UTF-8");
                Ok(Some(String::from_utf8_lossy(e.as_bytes()).into_owned()))
            }
        },
        Err(e) => Err(CmdServerError::RecvError(e))
    }
}
