//! Extraction of coordinates, feed rate and dwell time from TC parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use comms_if::tc::{TcParseError, Word};
use nalgebra::Vector3;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Number of seconds in a millisecond, `p` words are given in milliseconds.
const SECONDS_PER_MILLI: f64 = 1.0E-3;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Extract a coordinate triplet from the parameters.
///
/// `x`, `y` and `z` words override the matching axis. Axes which are not given take the value
/// from [`unset_axes_default`].
pub fn coordinates(
    params: &str,
    fallback: &Vector3<f64>
) -> Result<Vector3<f64>, TcParseError> {
    let mut coords = unset_axes_default(fallback);

    for word in Word::parse_all(params)? {
        match word {
            Word::X(v) => coords[0] = v,
            Word::Y(v) => coords[1] = v,
            Word::Z(v) => coords[2] = v,
            Word::F(_) | Word::S(_) | Word::P(_) | Word::Unknown(..) => ()
        }
    }

    Ok(coords)
}

/// The value of the axes missing from a coordinate command.
///
/// Every missing axis takes the first (x) component of `fallback`, not its own component. The
/// axis driver and the controller scripts rely on this, so keep it as is.
pub fn unset_axes_default(fallback: &Vector3<f64>) -> Vector3<f64> {
    Vector3::repeat(fallback[0])
}

/// Extract the feed rate from the parameters, or `fallback` if there is no `f` word.
pub fn speed(params: &str, fallback: f64) -> Result<f64, TcParseError> {
    let mut speed = fallback;

    for word in Word::parse_all(params)? {
        match word {
            Word::F(v) => speed = v,
            Word::X(_) | Word::Y(_) | Word::Z(_) | Word::S(_) | Word::P(_) | Word::Unknown(..) => ()
        }
    }

    Ok(speed)
}

/// Extract a duration in seconds from the parameters.
///
/// `s` words are seconds and `p` words milliseconds. All of them are summed.
pub fn time_s(params: &str) -> Result<f64, TcParseError> {
    let mut time_s = 0.0;

    for word in Word::parse_all(params)? {
        match word {
            Word::S(v) => time_s += v,
            Word::P(v) => time_s += v * SECONDS_PER_MILLI,
            Word::X(_) | Word::Y(_) | Word::Z(_) | Word::F(_) | Word::Unknown(..) => ()
        }
    }

    Ok(time_s)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_coordinates_all_axes() {
        let c = coordinates("x1 y2 z3", &Vector3::new(7.0, 8.0, 9.0)).unwrap();
        assert_eq!(c, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_coordinates_fallback_broadcast() {
        let fallback = Vector3::new(7.0, 8.0, 9.0);

        // Missing axes take the fallback's first component, not their own
        assert_eq!(coordinates("", &fallback).unwrap(), Vector3::new(7.0, 7.0, 7.0));
        assert_eq!(coordinates("y2", &fallback).unwrap(), Vector3::new(7.0, 2.0, 7.0));
        assert_eq!(coordinates("x1", &fallback).unwrap(), Vector3::new(1.0, 7.0, 7.0));
        assert_eq!(coordinates("z3 x1", &fallback).unwrap(), Vector3::new(1.0, 7.0, 3.0));
        assert_eq!(unset_axes_default(&fallback), Vector3::new(7.0, 7.0, 7.0));
    }

    #[test]
    fn test_coordinates_ignores_other_words() {
        let c = coordinates("x1 f200 q5 s2 y2 z3", &Vector3::zeros()).unwrap();
        assert_eq!(c, Vector3::new(1.0, 2.0, 3.0));

        // Later words override earlier ones
        let c = coordinates("x1 x4", &Vector3::zeros()).unwrap();
        assert_eq!(c, Vector3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn test_coordinates_invalid() {
        assert_eq!(
            coordinates("x1 yfoo", &Vector3::zeros()),
            Err(TcParseError::InvalidWord(String::from("yfoo")))
        );
    }

    #[test]
    fn test_speed() {
        assert_eq!(speed("x1 y2", 1.0), Ok(1.0));
        assert_eq!(speed("x1 f50", 1.0), Ok(50.0));
        assert_eq!(speed("f50 f20", 1.0), Ok(20.0));
        assert_eq!(
            speed("f", 1.0),
            Err(TcParseError::InvalidWord(String::from("f")))
        );
    }

    #[test]
    fn test_time_s() {
        assert_eq!(time_s(""), Ok(0.0));
        assert_eq!(time_s("s2"), Ok(2.0));
        assert_eq!(time_s("p500"), Ok(0.5));
        assert_eq!(time_s("s1 s2 p250 p250"), Ok(3.5));
        assert_eq!(time_s("x10 s1"), Ok(1.0));
        assert_eq!(
            time_s("s1 p?"),
            Err(TcParseError::InvalidWord(String::from("p?")))
        );
    }
}
