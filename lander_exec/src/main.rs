//! # Lander Executable
//!
//! This executable is the motion-control core of the three-cable lander:
//! - Receives G-code command lines from the controller
//! - Replies `OK` or `KO` to each of them
//! - Sends the cable lengths to reach to the axis driver
//!
//! Two channel layouts are available, see `lander_exec --help`.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

// External
use color_eyre::{Result, eyre::WrapErr};
use log::{info, warn};
use std::io;
use std::path::PathBuf;
use structopt::StructOpt;

// Internal
use lander_lib::{
    cmd_ctrl::CmdCtrl,
    cmd_server::{CmdServer, PipeServer, StreamServer},
    exec_loop,
    params::LanderExecParams,
};
use util::{
    logger::{logger_init, verbosity_to_level},
    module::State,
    session::Session,
};

// ------------------------------------------------------------------------------------------------
// CONSTANTS
// ------------------------------------------------------------------------------------------------

/// Default parameter file, relative to the params directory.
const PARAMS_FILE: &str = "lander_exec.toml";

/// Archive path of the state snapshot written on exit.
const FINAL_STATE_ARCH_PATH: &str = "cmd_ctrl/final_state.json";

// ------------------------------------------------------------------------------------------------
// CLI
// ------------------------------------------------------------------------------------------------

#[derive(Debug, StructOpt)]
#[structopt(name = "lander_exec", about = "Motion-control core of the cable lander")]
struct Opts {
    /// Increase the log verbosity (-v for debug, -vv for trace)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,

    /// Parameter file to use instead of `params/lander_exec.toml`
    #[structopt(long, parse(from_os_str))]
    params: Option<PathBuf>,

    #[structopt(subcommand)]
    channels: Channels,
}

/// Channel layouts.
#[derive(Debug, StructOpt)]
enum Channels {
    /// Use separate named pipes for commands, replies and axis control
    #[structopt(name = "pipes")]
    Pipes,

    /// Read commands from stdin, write replies and axis control to stdout
    #[structopt(name = "stream")]
    Stream,
}

// ------------------------------------------------------------------------------------------------
// MAIN
// ------------------------------------------------------------------------------------------------

fn main() -> Result<()> {

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "lander_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(verbosity_to_level(opts.verbose), &session)
        .wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Lander Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    info!("Initialising...");

    // ---- LOAD PARAMETERS ----

    let params: LanderExecParams = match opts.params {
        Some(ref path) => util::params::load_path::<LanderExecParams, _>(path)
            .wrap_err_with(|| format!("Could not load parameters from {:?}", path))?,
        None => {
            let path = util::params::path(PARAMS_FILE)
                .wrap_err("Could not locate the parameters directory")?;
            LanderExecParams::load_or_default(&path)
                .wrap_err_with(|| format!("Could not load parameters from {:?}", path))?
        }
    };

    info!("Parameters loaded");

    // ---- MODULE INITIALISATION ----

    let mut cmd_ctrl = CmdCtrl::default();
    cmd_ctrl.init(params.cmd_ctrl.clone())
        .wrap_err("Failed to initialise CmdCtrl")?;

    info!("CmdCtrl initialised");

    // ---- MAIN LOOP ----

    let exit_cause = match opts.channels {
        Channels::Pipes => {
            let mut server = PipeServer::open(&params)
                .wrap_err("Failed to open the pipes")?;

            info!("Pipes open, entering main loop");

            let exit_cause = exec_loop::run(&mut cmd_ctrl, &mut server)
                .wrap_err("Session loop failed")?;
            server.close().wrap_err("Failed to close the pipes")?;

            exit_cause
        },
        Channels::Stream => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let mut server = StreamServer::new(stdin.lock(), stdout.lock());

            info!("Entering main loop on stdin/stdout");

            let exit_cause = exec_loop::run(&mut cmd_ctrl, &mut server)
                .wrap_err("Session loop failed")?;
            server.close().wrap_err("Failed to close the streams")?;

            exit_cause
        }
    };

    info!("Main loop exited ({:?})", exit_cause);

    // ---- SHUTDOWN ----

    match session.save_json(FINAL_STATE_ARCH_PATH, &cmd_ctrl.report()) {
        Ok(path) => info!("Final state saved to {:?}", path),
        Err(e) => warn!("Could not save the final state: {}", e)
    }

    info!("Done");

    Ok(())
}
