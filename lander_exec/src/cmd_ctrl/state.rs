//! Implementations for the CmdCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use comms_if::{
    eqpt::axes::AxesCtrl,
    tc::{strip_line, Tc, TcKind, TcResponse}
};
use log::{debug, info, trace, warn};
use nalgebra::Vector3;
use serde::Serialize;
use std::thread;
use std::time::Duration;

// Internal
use super::{
    words, CmdCtrlError, Params,
    FIRST_FIXING_POINT_ID, LAST_FIXING_POINT_ID
};
use crate::kinematics::{self, NUM_FIXING_POINTS};
use util::module::State;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command control module state.
///
/// This is the only place the commanded state of the lander lives. It is owned by the exec and
/// handed to the session loop by exclusive reference.
#[derive(Debug, Clone)]
pub struct CmdCtrl {
    pub(crate) mode: MotionMode,
    pub(crate) status: WorkStatus,

    /// Units: millimeters
    pub(crate) position_mm: Vector3<f64>,

    /// Last computed move, informational only.
    ///
    /// Units: millimeters
    pub(crate) displacement_mm: Vector3<f64>,

    /// Derived from the fixing points, see [`kinematics::start_position`].
    ///
    /// Units: millimeters
    pub(crate) start_position_mm: Vector3<f64>,

    /// Units: millimeters
    pub(crate) fixing_points_mm: [Vector3<f64>; NUM_FIXING_POINTS],

    /// Feed rate. Tracked but not used to ramp motion.
    pub(crate) displacement_speed: f64,
}

/// Snapshot of the observable state of CmdCtrl.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatusReport {
    pub mode: MotionMode,
    pub status: WorkStatus,
    pub position_mm: Vector3<f64>,
    pub displacement_mm: Vector3<f64>,
    pub start_position_mm: Vector3<f64>,
    pub fixing_points_mm: [Vector3<f64>; NUM_FIXING_POINTS],
    pub displacement_speed: f64,
}

/// Outcome of executing one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Dispatch {
    /// The reply to send to the controller
    pub response: TcResponse,

    /// A block to send to the axis driver, if any
    pub axes_ctrl: Option<AxesCtrl>,
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// How coordinates in move commands are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MotionMode {
    /// Coordinates are the target position (`G90`)
    Absolute,

    /// Coordinates are added to the current position (`G91`)
    Relative,
}

/// Whether the lander still accepts commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WorkStatus {
    Running,

    /// Terminal, reached with `M0` or at the end of the command stream
    Stopped,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for CmdCtrl {
    fn default() -> Self {
        Self::new(Params::default())
    }
}

impl State for CmdCtrl {
    type InitData = Params;
    type InitError = CmdCtrlError;

    type InputData = Tc;
    type OutputData = Option<AxesCtrl>;
    type StatusReport = StatusReport;
    type ProcError = CmdCtrlError;

    /// Initialise the CmdCtrl module, resetting all state from the given parameters.
    fn init(&mut self, init_data: Self::InitData) -> Result<(), Self::InitError> {
        let all_finite = init_data
            .fixing_points_mm
            .iter()
            .flatten()
            .all(|v| v.is_finite());

        if !all_finite {
            return Err(CmdCtrlError::InvalidInitParams(
                String::from("fixing points must be finite")
            ));
        }
        if !init_data.displacement_speed.is_finite() {
            return Err(CmdCtrlError::InvalidInitParams(
                String::from("displacement speed must be finite")
            ));
        }

        *self = Self::new(init_data);

        debug!("CmdCtrl initialised: {:?}", self.report());

        Ok(())
    }

    /// Execute a single TC.
    ///
    /// On error the state is left untouched.
    fn proc(&mut self, tc: &Self::InputData)
        -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError>
    {
        if self.status == WorkStatus::Stopped {
            return Err(CmdCtrlError::Stopped)
        }

        let axes_ctrl = match (tc.kind, tc.id) {
            // Move
            (TcKind::Positioning, 0) | (TcKind::Positioning, 1) => {
                self.exec_move(tc)?;
                None
            },
            // Dwell
            (TcKind::Positioning, 4) => {
                self.exec_dwell(tc)?;
                None
            },
            // Go to the start position
            (TcKind::Positioning, 28) => Some(self.exec_home()?),
            (TcKind::Positioning, 90) => {
                debug!("Entering absolute mode");
                self.mode = MotionMode::Absolute;
                None
            },
            (TcKind::Positioning, 91) => {
                debug!("Entering relative mode");
                self.mode = MotionMode::Relative;
                None
            },
            // Machine stop
            (TcKind::Miscellaneous, 0) => {
                debug!("Stopping the machine");
                self.status = WorkStatus::Stopped;
                Some(AxesCtrl::Stop)
            },
            // Fixing point calibration
            (TcKind::Miscellaneous, id @ FIRST_FIXING_POINT_ID..=LAST_FIXING_POINT_ID) => {
                self.exec_set_fixing_point((id - FIRST_FIXING_POINT_ID) as usize, tc)?;
                None
            },
            _ => return Err(CmdCtrlError::UnknownCommand(tc.clone()))
        };

        let report = self.report();
        trace!("CmdCtrl status: {:?}", report);

        Ok((axes_ctrl, report))
    }
}

impl CmdCtrl {

    /// Create a new instance in the initial state (absolute mode, running, at the origin).
    pub fn new(params: Params) -> Self {
        let mut fixing_points_mm = [Vector3::zeros(); NUM_FIXING_POINTS];
        for (fp, p) in fixing_points_mm.iter_mut().zip(params.fixing_points_mm.iter()) {
            *fp = Vector3::new(p[0], p[1], p[2]);
        }

        Self {
            mode: MotionMode::Absolute,
            status: WorkStatus::Running,
            position_mm: Vector3::zeros(),
            displacement_mm: Vector3::zeros(),
            start_position_mm: kinematics::start_position(&fixing_points_mm),
            fixing_points_mm,
            displacement_speed: params.displacement_speed,
        }
    }

    /// Execute one raw line from the controller.
    ///
    /// Returns `None` for blank or comment-only lines, which get no reply. Any error is turned
    /// into a `KO` reply here and never goes further.
    pub fn exec_line(&mut self, raw: &str) -> Option<Dispatch> {
        let line = strip_line(raw)?;

        info!("{}", line);

        let result = line
            .parse::<Tc>()
            .map_err(CmdCtrlError::InvalidTc)
            .and_then(|tc| self.proc(&tc));

        let dispatch = match result {
            Ok((axes_ctrl, _)) => Dispatch {
                response: TcResponse::Ok,
                axes_ctrl
            },
            Err(e) => {
                warn!("Rejected \"{}\": {}", line, e);
                Dispatch {
                    response: TcResponse::Ko,
                    axes_ctrl: None
                }
            }
        };

        if let Some(ref axes_ctrl) = dispatch.axes_ctrl {
            for axes_line in axes_ctrl.lines() {
                info!("        {}", axes_line);
            }
        }
        info!("  {} {}", dispatch.response, line);

        Some(dispatch)
    }

    /// Stop work without a stop command, used when the command stream ends.
    pub fn stop(&mut self) {
        self.status = WorkStatus::Stopped;
    }

    /// Get a snapshot of the observable state.
    pub fn report(&self) -> StatusReport {
        StatusReport {
            mode: self.mode,
            status: self.status,
            position_mm: self.position_mm,
            displacement_mm: self.displacement_mm,
            start_position_mm: self.start_position_mm,
            fixing_points_mm: self.fixing_points_mm,
            displacement_speed: self.displacement_speed,
        }
    }

    pub fn mode(&self) -> MotionMode {
        self.mode
    }

    pub fn status(&self) -> WorkStatus {
        self.status
    }

    pub fn position_mm(&self) -> &Vector3<f64> {
        &self.position_mm
    }

    pub fn fixing_points_mm(&self) -> &[Vector3<f64>; NUM_FIXING_POINTS] {
        &self.fixing_points_mm
    }

    /// Perform a `G0`/`G1` move.
    ///
    /// Nothing is committed until all parameters have been extracted.
    fn exec_move(&mut self, tc: &Tc) -> Result<(), CmdCtrlError> {
        let (position_mm, displacement_mm) = match self.mode {
            MotionMode::Absolute => {
                let target = words::coordinates(&tc.params, &self.position_mm)
                    .map_err(CmdCtrlError::InvalidParams)?;
                (target, target - self.position_mm)
            },
            MotionMode::Relative => {
                let displacement = words::coordinates(&tc.params, &Vector3::zeros())
                    .map_err(CmdCtrlError::InvalidParams)?;
                (self.position_mm + displacement, displacement)
            }
        };

        let displacement_speed = match tc.id {
            1 => words::speed(&tc.params, self.displacement_speed)
                .map_err(CmdCtrlError::InvalidParams)?,
            _ => self.displacement_speed
        };

        self.position_mm = position_mm;
        self.displacement_mm = displacement_mm;
        self.displacement_speed = displacement_speed;

        debug!(
            "Moving to position ({}, {}, {}), displacement is ({}, {}, {})",
            position_mm[0], position_mm[1], position_mm[2],
            displacement_mm[0], displacement_mm[1], displacement_mm[2]
        );

        Ok(())
    }

    /// Perform a `G4` dwell.
    ///
    /// This blocks the calling thread, and so the whole session loop, for the requested time.
    fn exec_dwell(&self, tc: &Tc) -> Result<(), CmdCtrlError> {
        let dwell_s = words::time_s(&tc.params).map_err(CmdCtrlError::InvalidParams)?;

        let dwell = Duration::try_from_secs_f64(dwell_s)
            .map_err(|_| CmdCtrlError::InvalidDwell(dwell_s))?;

        debug!("Waiting for {:.3} s", dwell_s);

        thread::sleep(dwell);

        Ok(())
    }

    /// Perform a `G28` move to the start position and build the absolute move for the axes.
    ///
    /// Fails without moving if the cable lengths cannot be represented.
    fn exec_home(&mut self) -> Result<AxesCtrl, CmdCtrlError> {
        let lengths_mm = kinematics::position_to_lengths(
            &self.start_position_mm,
            &self.fixing_points_mm
        );
        let lengths_mm = [lengths_mm[0], lengths_mm[1], lengths_mm[2]];

        if !lengths_mm.iter().all(|l| l.is_finite()) {
            return Err(CmdCtrlError::InvalidLengths(lengths_mm))
        }

        self.displacement_mm = self.start_position_mm - self.position_mm;
        self.position_mm = self.start_position_mm;

        debug!(
            "Moving to start position ({}, {}, {})",
            self.position_mm[0], self.position_mm[1], self.position_mm[2]
        );

        Ok(AxesCtrl::MoveAbs { lengths_mm })
    }

    /// Perform a `M131`-`M133` fixing point calibration.
    fn exec_set_fixing_point(&mut self, index: usize, tc: &Tc) -> Result<(), CmdCtrlError> {
        let fixing_point = words::coordinates(&tc.params, &self.fixing_points_mm[index])
            .map_err(CmdCtrlError::InvalidParams)?;

        self.fixing_points_mm[index] = fixing_point;
        self.start_position_mm = kinematics::start_position(&self.fixing_points_mm);

        debug!(
            "New fixing point {}: ({}, {}, {})",
            index, fixing_point[0], fixing_point[1], fixing_point[2]
        );
        debug!(
            "New start position: ({}, {}, {})",
            self.start_position_mm[0], self.start_position_mm[1], self.start_position_mm[2]
        );

        Ok(())
    }
}
