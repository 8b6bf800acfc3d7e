//! # Parameter words
//!
//! A parameter string is a list of space separated `<letter><number>` words, for instance
//! `x10 y0 z5 f200`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::{Serialize, Deserialize};

use super::TcParseError;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A single decoded parameter word.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Word {
    /// X axis coordinate
    X(f64),

    /// Y axis coordinate
    Y(f64),

    /// Z axis coordinate
    Z(f64),

    /// Feed rate
    F(f64),

    /// Time in seconds
    S(f64),

    /// Time in milliseconds
    P(f64),

    /// A well formed word whose letter no command uses. Commands ignore it.
    Unknown(char, f64)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Word {
    /// Decode a single word.
    ///
    /// The value must be a valid float whatever the letter.
    pub fn parse(token: &str) -> Result<Self, TcParseError> {
        let mut chars = token.chars();

        let letter = match chars.next() {
            Some(c) => c,
            None => return Err(TcParseError::InvalidWord(token.to_string()))
        };

        let value: f64 = match chars.as_str().parse() {
            Ok(v) => v,
            Err(_) => return Err(TcParseError::InvalidWord(token.to_string()))
        };

        Ok(match letter {
            'x' => Word::X(value),
            'y' => Word::Y(value),
            'z' => Word::Z(value),
            'f' => Word::F(value),
            's' => Word::S(value),
            'p' => Word::P(value),
            c => Word::Unknown(c, value)
        })
    }

    /// Decode all words of a parameter string.
    ///
    /// Empty tokens left by repeated spaces are skipped. The first invalid word aborts decoding.
    pub fn parse_all(params: &str) -> Result<Vec<Self>, TcParseError> {
        params
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(Word::parse)
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_word() {
        assert_eq!(Word::parse("x10"), Ok(Word::X(10.0)));
        assert_eq!(Word::parse("y-2.5"), Ok(Word::Y(-2.5)));
        assert_eq!(Word::parse("z.5"), Ok(Word::Z(0.5)));
        assert_eq!(Word::parse("f1e3"), Ok(Word::F(1000.0)));
        assert_eq!(Word::parse("p250"), Ok(Word::P(250.0)));
        assert_eq!(Word::parse("q4"), Ok(Word::Unknown('q', 4.0)));
    }

    #[test]
    fn test_parse_word_errors() {
        assert_eq!(
            Word::parse("x"),
            Err(TcParseError::InvalidWord(String::from("x")))
        );
        assert_eq!(
            Word::parse("xabc"),
            Err(TcParseError::InvalidWord(String::from("xabc")))
        );
        // Unknown letters still need a valid value
        assert_eq!(
            Word::parse("qq"),
            Err(TcParseError::InvalidWord(String::from("qq")))
        );
    }

    #[test]
    fn test_parse_all() {
        assert_eq!(
            Word::parse_all("x10  y0 z5 f200"),
            Ok(vec![Word::X(10.0), Word::Y(0.0), Word::Z(5.0), Word::F(200.0)])
        );
        assert_eq!(Word::parse_all(""), Ok(vec![]));
        assert_eq!(
            Word::parse_all("x1 y2 bad"),
            Err(TcParseError::InvalidWord(String::from("bad")))
        );
    }
}
