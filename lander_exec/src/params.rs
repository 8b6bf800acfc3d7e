//! # Lander Executable Parameters

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use log::warn;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use util::params::LoadError;

use crate::cmd_ctrl;

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LanderExecParams {

    /// Directory holding the named pipes
    pub pipes_dir: PathBuf,

    /// Pipe carrying the command lines from the controller
    pub cmd_pipe: String,

    /// Pipe carrying the replies to the controller
    pub reply_pipe: String,

    /// Pipe carrying the axis-control blocks to the axis driver
    pub axes_pipe: String,

    /// Command control parameters
    pub cmd_ctrl: cmd_ctrl::Params,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl LanderExecParams {
    /// Load the parameters from the given file, or use the defaults if it does not exist.
    ///
    /// A file which exists but cannot be read or parsed is an error.
    pub fn load_or_default<F: AsRef<Path>>(path: F) -> Result<Self, LoadError> {
        match util::params::load_path::<Self, _>(path.as_ref()) {
            Ok(p) => Ok(p),
            Err(e) if e.is_not_found() => {
                warn!("{:?} not found, using default parameters", path.as_ref());
                Ok(Self::default())
            },
            Err(e) => Err(e)
        }
    }

    pub fn cmd_pipe_path(&self) -> PathBuf {
        self.pipes_dir.join(&self.cmd_pipe)
    }

    pub fn reply_pipe_path(&self) -> PathBuf {
        self.pipes_dir.join(&self.reply_pipe)
    }

    pub fn axes_pipe_path(&self) -> PathBuf {
        self.pipes_dir.join(&self.axes_pipe)
    }
}

impl Default for LanderExecParams {
    fn default() -> Self {
        Self {
            pipes_dir: PathBuf::from("/tmp/lander"),
            cmd_pipe: String::from("controlToCalculator"),
            reply_pipe: String::from("calculatorToControl"),
            axes_pipe: String::from("calculatorToAxes"),
            cmd_ctrl: cmd_ctrl::Params::default(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_paths() {
        let params = LanderExecParams::default();

        assert_eq!(params.cmd_pipe_path(), PathBuf::from("/tmp/lander/controlToCalculator"));
        assert_eq!(params.reply_pipe_path(), PathBuf::from("/tmp/lander/calculatorToControl"));
        assert_eq!(params.axes_pipe_path(), PathBuf::from("/tmp/lander/calculatorToAxes"));
    }

    #[test]
    fn test_load_or_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lander_exec.toml");

        // Missing file
        let params = LanderExecParams::load_or_default(&path).unwrap();
        assert_eq!(params.cmd_pipe_path(), LanderExecParams::default().cmd_pipe_path());

        std::fs::write(&path, "[cmd_ctrl]\nfixing_points_mm = [[0.0, 0.0, 900.0]]\n").unwrap();
        match LanderExecParams::load_or_default(&path) {
            Err(LoadError::DeserialiseError(_)) => (),
            other => panic!("Expected a deserialise error, got {:?}", other.map(|_| ()))
        }

        std::fs::write(&path, "[cmd_ctrl]\ndisplacement_speed = 12.5\n").unwrap();
        let params = LanderExecParams::load_or_default(&path).unwrap();
        assert_eq!(params.cmd_ctrl.displacement_speed, 12.5);
    }

    #[test]
    fn test_partial_params_file() {
        let params: LanderExecParams = util::params::from_toml_str(
            "pipes_dir = \"/run/lander\"\n\
             \n\
             [cmd_ctrl]\n\
             displacement_speed = 25.0\n"
        ).unwrap();

        assert_eq!(params.cmd_pipe_path(), PathBuf::from("/run/lander/controlToCalculator"));
        assert_eq!(params.cmd_ctrl.displacement_speed, 25.0);
        assert_eq!(params.cmd_ctrl.fixing_points_mm, [[0.0; 3]; 3]);
    }
}
