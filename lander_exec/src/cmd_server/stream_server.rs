//! # Stream server
//!
//! Single stream variant of the command server, typically over stdin/stdout.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::{eqpt::axes::AxesCtrl, tc::TcResponse};
use std::io::{BufRead, Write};

use super::{read_cmd_line, CmdServer, CmdServerError};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// A server reading commands from one stream and writing everything to another.
///
/// There is no separate axis channel: axis-control blocks are written to the output just before
/// the reply of the command which produced them.
pub struct StreamServer<R, W> {
    input: R,
    output: W,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl<R: BufRead, W: Write> StreamServer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Flush the output and give back both streams.
    pub fn into_inner(mut self) -> Result<(R, W), CmdServerError> {
        self.output
            .flush()
            .map_err(|e| CmdServerError::CloseError("output", e))?;

        Ok((self.input, self.output))
    }

    fn write_line(&mut self, line: &str) -> Result<(), CmdServerError> {
        writeln!(self.output, "{}", line)
            .and_then(|_| self.output.flush())
            .map_err(|e| CmdServerError::SendError("output", e))
    }
}

impl<R: BufRead, W: Write> CmdServer for StreamServer<R, W> {
    fn get_cmd_line(&mut self) -> Result<Option<String>, CmdServerError> {
        read_cmd_line(&mut self.input)
    }

    fn send_axes_ctrl(&mut self, axes_ctrl: &AxesCtrl) -> Result<(), CmdServerError> {
        self.write_line(&axes_ctrl.to_string())
    }

    fn send_response(&mut self, response: TcResponse) -> Result<(), CmdServerError> {
        self.write_line(&response.to_string())
    }

    fn close(self) -> Result<(), CmdServerError> {
        self.into_inner().map(|_| ())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_lines() {
        let mut server = StreamServer::new(Cursor::new("g1 x1\n\ng28"), Vec::new());

        assert_eq!(server.get_cmd_line().unwrap(), Some(String::from("g1 x1\n")));
        assert_eq!(server.get_cmd_line().unwrap(), Some(String::from("\n")));
        assert_eq!(server.get_cmd_line().unwrap(), Some(String::from("g28")));
        assert_eq!(server.get_cmd_line().unwrap(), None);
    }

    #[test]
    fn test_read_invalid_utf8() {
        let mut server = StreamServer::new(Cursor::new(b"g1 x\xff1\ng90\n".to_vec()), Vec::new());

        assert_eq!(server.get_cmd_line().unwrap(), Some(String::from("g1 x\u{fffd}1\n")));
        assert_eq!(server.get_cmd_line().unwrap(), Some(String::from("g90\n")));
        assert_eq!(server.get_cmd_line().unwrap(), None);
    }

    #[test]
    fn test_interleaved_output() {
        let mut server = StreamServer::new(Cursor::new(""), Vec::new());

        server.send_response(TcResponse::Ok).unwrap();
        server.send_axes_ctrl(&AxesCtrl::Stop).unwrap();
        server.send_response(TcResponse::Ko).unwrap();

        let (_, output) = server.into_inner().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "OK\nM00\nKO\n");
    }
}
