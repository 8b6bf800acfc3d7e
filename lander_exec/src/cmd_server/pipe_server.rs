//! # Pipe server
//!
//! Three channel variant of the command server. Each channel is a named pipe (or any file) which
//! stays open for the whole session.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::axes::AxesCtrl, tc::TcResponse};
use log::{debug, info};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use super::{read_cmd_line, CmdServer, CmdServerError};
use crate::params::LanderExecParams;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A server with separate command, reply and axis-control channels.
pub struct PipeServer {
    /// Lines from the controller
    cmd_reader: BufReader<File>,

    /// Replies to the controller
    reply_writer: BufWriter<File>,

    /// Blocks to the axis driver
    axes_writer: BufWriter<File>,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl PipeServer {

    /// Open the channels given in the parameters.
    ///
    /// The command channel is opened first, then the reply channel, then the axis channel.
    /// Opening a named pipe blocks until its other end is opened, so the peers must open their
    /// ends in the same order.
    pub fn open(params: &LanderExecParams) -> Result<Self, CmdServerError> {
        let cmd_path = params.cmd_pipe_path();
        let reply_path = params.reply_pipe_path();
        let axes_path = params.axes_pipe_path();

        info!("Opening command channel {:?}", cmd_path);
        let cmd_file = File::open(&cmd_path)
            .map_err(|e| CmdServerError::OpenError("command", cmd_path.clone(), e))?;

        info!("Opening reply channel {:?}", reply_path);
        let reply_file = create(&reply_path, "reply")?;

        info!("Opening axis channel {:?}", axes_path);
        let axes_file = create(&axes_path, "axis")?;

        Ok(Self {
            cmd_reader: BufReader::new(cmd_file),
            reply_writer: BufWriter::new(reply_file),
            axes_writer: BufWriter::new(axes_file),
        })
    }
}

impl CmdServer for PipeServer {
    fn get_cmd_line(&mut self) -> Result<Option<String>, CmdServerError> {
        read_cmd_line(&mut self.cmd_reader)
    }

    fn send_axes_ctrl(&mut self, axes_ctrl: &AxesCtrl) -> Result<(), CmdServerError> {
        writeln!(self.axes_writer, "{}", axes_ctrl)
            .and_then(|_| self.axes_writer.flush())
            .map_err(|e| CmdServerError::SendError("axis", e))
    }

    fn send_response(&mut self, response: TcResponse) -> Result<(), CmdServerError> {
        writeln!(self.reply_writer, "{}", response)
            .and_then(|_| self.reply_writer.flush())
            .map_err(|e| CmdServerError::SendError("reply", e))
    }

    /// Close the command, reply and axis channels, in that order.
    fn close(self) -> Result<(), CmdServerError> {
        let PipeServer { cmd_reader, reply_writer, axes_writer } = self;

        drop(cmd_reader);
        debug!("Command channel closed");

        let reply_file = reply_writer
            .into_inner()
            .map_err(|e| CmdServerError::CloseError("reply", e.into_error()))?;
        drop(reply_file);
        debug!("Reply channel closed");

        let axes_file = axes_writer
            .into_inner()
            .map_err(|e| CmdServerError::CloseError("axis", e.into_error()))?;
        drop(axes_file);
        debug!("Axis channel closed");

        Ok(())
    }
}

// ------------------------------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Open an output channel for writing, creating it as a plain file if it doesn't exist.
fn create(path: &Path, name: &'static str) -> Result<File, CmdServerError> {
    File::create(path).map_err(|e| CmdServerError::OpenError(name, path.to_path_buf(), e))
}
