//! # Telecommand module
//!
//! Telecommands are the G-code lines sent to the lander by the upstream controller. This module
//! turns a raw line into a [`Tc`] and defines the [`TcResponse`] sent back for each of them.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod word;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Serialize, Deserialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// Internal
pub use word::Word;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Character starting a trailing comment.
pub const COMMENT_CHAR: char = ';';

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A telecommand, i.e. one G-code line sent to the lander by the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tc {
    /// The kind of the command, the leading letter of the code
    pub kind: TcKind,

    /// The numeric identifier following the kind (`1` for `g1`)
    pub id: u32,

    /// The raw parameter string, possibly empty. Parameters are only decoded by the commands
    /// which use them, see [`Word::parse_all`].
    pub params: String
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Telecommand kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TcKind {
    /// `G` codes: positioning functions
    Positioning,

    /// `M` codes: miscellaneous functions
    Miscellaneous
}

/// The reply sent to the controller for every non-empty line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TcResponse {
    /// The command was executed
    Ok,

    /// The command was rejected and had no effect
    Ko
}

/// Possible parsing errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TcParseError {
    #[error("TC has an unrecognised kind ({0:?})")]
    UnknownKind(char),

    #[error("TC code {0:?} does not contain a valid numeric id")]
    InvalidId(String),

    #[error("TC parameter {0:?} does not contain a valid numeric value")]
    InvalidWord(String)
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Normalise a raw line read from the controller.
///
/// Anything from the first [`COMMENT_CHAR`] onwards is dropped, trailing whitespace is trimmed
/// and the result is lower-cased. `None` is returned when nothing is left, blank lines get no
/// reply.
pub fn strip_line(raw: &str) -> Option<String> {
    let code = match raw.find(COMMENT_CHAR) {
        Some(i) => &raw[..i],
        None => raw
    };

    let code = code.trim_end().to_lowercase();

    if code.is_empty() {
        None
    }
    else {
        Some(code)
    }
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl FromStr for Tc {
    type Err = TcParseError;

    /// Parse a TC from a line already normalised by [`strip_line`].
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        // Split the code from the parameters on the first space only
        let mut parts = line.splitn(2, ' ');
        let code = parts.next().unwrap_or("");
        let params = parts.next().unwrap_or("");

        let mut chars = code.chars();
        let kind_char = match chars.next() {
            Some(c) => c,
            None => return Err(TcParseError::InvalidId(code.to_string()))
        };

        // The id must parse whatever the kind, so check it first
        let id: u32 = match chars.as_str().parse() {
            Ok(i) => i,
            Err(_) => return Err(TcParseError::InvalidId(code.to_string()))
        };

        let kind = match TcKind::from_char(kind_char) {
            Some(k) => k,
            None => return Err(TcParseError::UnknownKind(kind_char))
        };

        Ok(Tc {
            kind,
            id,
            params: params.to_string()
        })
    }
}

impl fmt::Display for Tc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.to_char(), self.id)?;

        if !self.params.is_empty() {
            write!(f, " {}", self.params)?;
        }

        Ok(())
    }
}

impl TcKind {
    fn from_char(c: char) -> Option<Self> {
        match c {
            'g' => Some(TcKind::Positioning),
            'm' => Some(TcKind::Miscellaneous),
            _ => None
        }
    }

    fn to_char(self) -> char {
        match self {
            TcKind::Positioning => 'g',
            TcKind::Miscellaneous => 'm'
        }
    }
}

impl fmt::Display for TcResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TcResponse::Ok => write!(f, "OK"),
            TcResponse::Ko => write!(f, "KO")
        }
    }
}
