//! Generic parameters functions

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::de::DeserializeOwned;
use std::fs::read_to_string;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toml;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// An error that occurs during loading of a parameter file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot find the software root directory: {0}")]
    SwRootNotFound(std::io::Error),

    #[error("Cannot load the parmeter file: {0}")]
    FileLoadError(std::io::Error),

    #[error("Cannot read the parameter file: {0}")]
    DeserialiseError(toml::de::Error)
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl LoadError {
    /// True if the parameter file does not exist. Any other error means the file is there but
    /// unusable.
    pub fn is_not_found(&self) -> bool {
        match self {
            LoadError::FileLoadError(e) => e.kind() == std::io::ErrorKind::NotFound,
            _ => false
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Load a parameter file
///
/// The file path is relative to the "params" directory of the software root
pub fn load<P>(param_file_path: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    load_path(path(param_file_path)?)
}

/// Get the full path of a parameter file relative to the "params" directory.
pub fn path(param_file_path: &str) -> Result<PathBuf, LoadError> {
    let mut path = crate::host::get_lander_sw_root()
        .map_err(LoadError::SwRootNotFound)?;
    path.push("params");
    path.push(param_file_path);

    Ok(path)
}

/// Load a parameter file from an explicit path.
pub fn load_path<P, F>(path: F) -> Result<P, LoadError>
where
    P: DeserializeOwned,
    F: AsRef<Path>
{
    // Load the file into a string
    let params_str = match read_to_string(path) {
        Ok(s) => s,
        Err(e) => return Err(LoadError::FileLoadError(e))
    };

    from_toml_str(params_str.as_str())
}

/// Parse parameters from a TOML string.
pub fn from_toml_str<P>(params_str: &str) -> Result<P, LoadError>
where
    P: DeserializeOwned
{
    match toml::from_str(params_str) {
        Ok(p) => Ok(p),
        Err(e) => Err(LoadError::DeserialiseError(e))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct TestParams {
        name: String,
        gains: [f64; 3]
    }

    #[test]
    fn test_from_toml_str() {
        let p: TestParams = from_toml_str("name = \"a\"\ngains = [1.0, 2.0, 3.5]").unwrap();
        assert_eq!(p, TestParams { name: String::from("a"), gains: [1.0, 2.0, 3.5] });

        match from_toml_str::<TestParams>("name = 3") {
            Err(LoadError::DeserialiseError(_)) => (),
            _ => panic!("Expected a deserialise error")
        }
    }

    #[test]
    fn test_load_path_missing() {
        match load_path::<TestParams, _>("/nonexistent/lander/params.toml") {
            Err(e @ LoadError::FileLoadError(_)) => assert!(e.is_not_found()),
            _ => panic!("Expected a file load error")
        }
    }

    #[test]
    fn test_malformed_is_not_missing() {
        match from_toml_str::<TestParams>("name = \"a\"\ngains = [1.0,") {
            Err(e) => assert!(!e.is_not_found()),
            Ok(_) => panic!("Expected a deserialise error")
        }
    }
}
