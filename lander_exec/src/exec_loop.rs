//! # Session loop
//!
//! Reads command lines from a [`CmdServer`] one at a time, executes them with [`CmdCtrl`] and
//! sends the outputs back through the server.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::{info, warn};

use crate::{
    cmd_ctrl::{CmdCtrl, WorkStatus},
    cmd_server::{CmdServer, CmdServerError},
};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCause {
    /// A stop command was executed
    StopCmd,

    /// The command channel reached end of stream
    EndOfStream,
}

// ------------------------------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ------------------------------------------------------------------------------------------------

/// Run the session loop until work stops or the command stream ends.
///
/// End of stream is a graceful stop: the state becomes stopped but nothing is sent on any
/// channel. Only channel errors abort the loop, rejected commands are answered with `KO`.
pub fn run<S: CmdServer>(
    cmd_ctrl: &mut CmdCtrl,
    server: &mut S
) -> Result<ExitCause, CmdServerError> {

    while cmd_ctrl.status() == WorkStatus::Running {
        let line = match server.get_cmd_line()? {
            Some(l) => l,
            None => {
                warn!("End of the command stream, stopping");
                cmd_ctrl.stop();
                return Ok(ExitCause::EndOfStream)
            }
        };

        let dispatch = match cmd_ctrl.exec_line(&line) {
            Some(d) => d,
            None => continue
        };

        if let Some(ref axes_ctrl) = dispatch.axes_ctrl {
            server.send_axes_ctrl(axes_ctrl)?;
        }
        server.send_response(dispatch.response)?;
    }

    info!("Work stopped");

    Ok(ExitCause::StopCmd)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cmd_server::StreamServer;
    use nalgebra::Vector3;
    use std::io::Cursor;

    fn run_script(script: &str) -> (CmdCtrl, ExitCause, String, String) {
        let mut cmd_ctrl = CmdCtrl::default();
        let mut server = StreamServer::new(Cursor::new(script.to_string()), Vec::new());

        let cause = run(&mut cmd_ctrl, &mut server).unwrap();

        let (input, output) = server.into_inner().unwrap();
        let remaining = input.get_ref()[input.position() as usize..].to_string();

        (cmd_ctrl, cause, String::from_utf8(output).unwrap(), remaining)
    }

    #[test]
    fn test_session() {
        let (cmd_ctrl, cause, output, remaining) = run_script(
            "; calibration\n\
             M131 x0 y0 z300\n\
             \n\
             g1 x10 y20 z30 f50 ; move\n\
             zz\n\
             g28\n\
             m0\n\
             g1 x99\n"
        );

        assert_eq!(cause, ExitCause::StopCmd);
        assert_eq!(cmd_ctrl.status(), WorkStatus::Stopped);

        // Home lengths for (0, 0, 100/3) against (0, 0, 300) and two points at the origin
        let expected = format!(
            "OK\nOK\nKO\nG90\nG0 x0 y0 z{}\nG91\nOK\nM00\nOK\n",
            ((300.0f64 - 100.0 / 3.0).powi(2) + 2.0 * (100.0f64 / 3.0).powi(2)).sqrt().trunc()
        );
        assert_eq!(output, expected);

        // Lines after the stop command are never read
        assert_eq!(remaining, "g1 x99\n");
    }

    #[test]
    fn test_end_of_stream() {
        let (cmd_ctrl, cause, output, _) = run_script("g91\ng0 x1\ng0 y2");

        assert_eq!(cause, ExitCause::EndOfStream);
        assert_eq!(cmd_ctrl.status(), WorkStatus::Stopped);
        assert_eq!(output, "OK\nOK\nOK\n");
        assert_eq!(cmd_ctrl.position_mm(), &Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_invalid_utf8_line() {
        let mut cmd_ctrl = CmdCtrl::default();
        let input = Cursor::new(b"g90\ng1 x\xff1\n\xff\ng91\nm0\n".to_vec());
        let mut server = StreamServer::new(input, Vec::new());

        assert_eq!(run(&mut cmd_ctrl, &mut server).unwrap(), ExitCause::StopCmd);

        let (_, output) = server.into_inner().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "OK\nKO\nKO\nOK\nM00\nOK\n");
        assert_eq!(cmd_ctrl.position_mm(), &Vector3::zeros());
    }

    #[test]
    fn test_empty_stream() {
        let (_, cause, output, _) = run_script("");

        assert_eq!(cause, ExitCause::EndOfStream);
        assert_eq!(output, "");
    }
}
