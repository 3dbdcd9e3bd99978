// Replay Runtime - drives the flight mapper from a recorded input track
//
// Each frame of the track is pushed into a simulated controller, the mapper
// ticks once, and the simulated avatar integrates the thrust it received. The
// resulting pose is printed as one JSON line per frame.

mod track;

use std::{io::Write, path::PathBuf};

use clap::Parser;
use engine::{logging::init_logging, profile, util};
use hydra_flight::{
    FlightConfig, GestureMapper, Handedness,
    sim::{SimAvatar, SimController},
};
use serde_json::{Value, json};
use tracing::info;

use crate::track::InputTrack;

#[derive(Parser)]
#[command(name = "replay_runtime")]
#[command(about = "Replay recorded controller input through the flight mapper")]
struct Args {
    /// Input track to replay (JSON)
    #[arg(short, long)]
    track: PathBuf,

    /// Flight configuration (TOML); defaults to ./hydra.toml when present
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override every frame's delta time, in seconds
    #[arg(long)]
    fixed_dt: Option<f32>,

    /// Only print the final pose
    #[arg(long)]
    summary: bool,
}

fn main() -> anyhow::Result<()> {
    init_logging("HYDRA_LOG");

    let args = Args::parse();

    let config = FlightConfig::load(args.config.as_deref())?;
    let track = InputTrack::load(&args.track)?;
    info!(
        "Replaying {} frames from {}",
        track.frames.len(),
        args.track.display()
    );

    let stdout = std::io::stdout();
    replay(&track, config, &args, &mut stdout.lock())?;
    Ok(())
}

/// Run every frame through a fresh mapper, writing one JSON pose per line to `out`
fn replay(
    track: &InputTrack,
    config: FlightConfig,
    args: &Args,
    out: &mut impl Write,
) -> anyhow::Result<SimAvatar> {
    let mut controller = SimController::new();
    let mut avatar = SimAvatar::new();
    let mut mapper = GestureMapper::start(config, &mut controller);

    let mut elapsed = 0.0f32;
    for (index, frame) in track.frames.iter().enumerate() {
        let delta_time = args.fixed_dt.unwrap_or(frame.dt);

        frame.apply(&mut controller, &mapper.config().bindings);
        profile!(
            "mapper.tick",
            mapper.on_tick(delta_time, &controller, &mut avatar)
        );
        avatar.step(delta_time);
        avatar.drain_commands();
        elapsed += delta_time.max(0.0);

        if !args.summary {
            writeln!(out, "{}", pose_line(index, elapsed, &avatar, &mapper))?;
        }
    }

    if args.summary {
        writeln!(
            out,
            "{}",
            pose_line(track.frames.len(), elapsed, &avatar, &mapper)
        )?;
    }

    mapper.shutdown(&mut controller);
    Ok(avatar)
}

fn pose_line(frame: usize, elapsed: f32, avatar: &SimAvatar, mapper: &GestureMapper) -> Value {
    let eulers = util::safe_euler_angles(avatar.orientation);
    json!({
        "frame": frame,
        "time": elapsed,
        "position": [avatar.position.x, avatar.position.y, avatar.position.z],
        "velocity": [avatar.velocity.x, avatar.velocity.y, avatar.velocity.z],
        "yaw": eulers.y,
        "head_pitch": avatar.head_pitch,
        "thrust_multiplier": mapper.thrust_multiplier(),
        "grabbing": {
            "left": format!("{:?}", mapper.grab_phase(Handedness::Left)),
            "right": format!("{:?}", mapper.grab_phase(Handedness::Right)),
        },
    })
}
