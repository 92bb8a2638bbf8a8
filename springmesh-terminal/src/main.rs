/// Springmesh Terminal Demo - Relaxing Spring Mesh
///
/// Scatters the vertices of a mesh at random, then lets the springs pull
/// every edge toward unit length while the camera looks on.
/// Controls:
///   - Click / Shift-click, +/-: Zoom in / out
///   - Left / Right: Yaw
///   - Up / Down: Roll
///   - W / S: Pitch
///   - Space: Pause
///   - Q/ESC: Quit
///
/// Logs go to stderr; redirect them (`2>springmesh.log`) to keep the screen
/// clean.
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::terminal;
use rand::rngs::StdRng;
use rand::SeedableRng;
use springmesh_core::{scatter_positions, Camera, SceneConfig, Simulator, TopologySpec};
use springmesh_terminal::presets::Preset;
use springmesh_terminal::TerminalApp;

#[derive(Parser, Debug)]
#[command(version, about = "Spring mesh relaxation in the terminal")]
struct Args {
    /// Topology file (`vertices N` then one polygon per line)
    #[arg(short, long)]
    topology: Option<PathBuf>,

    /// Built-in topology, used when no file is given
    #[arg(short, long, value_enum, default_value_t = Preset::HexQuad)]
    preset: Preset,

    /// JSON scene config with `view` and `simulation` sections
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulation tick period in milliseconds
    #[arg(long, default_value_t = 10)]
    tick_ms: u64,

    /// Seed for the initial vertex positions
    #[arg(long)]
    seed: Option<u64>,
}

fn invalid_data(e: springmesh_core::Error) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, e)
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let topology = match &args.topology {
        Some(path) => TopologySpec::load(path),
        None => args.preset.topology(),
    }
    .map_err(invalid_data)?;

    let config = match &args.config {
        Some(path) => SceneConfig::load(path).map_err(invalid_data)?,
        None => SceneConfig::default(),
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let positions = scatter_positions(topology.vertex_count, &mut rng);
    let mesh = topology.build(positions).map_err(invalid_data)?;
    log::info!(
        "starting with {} vertices and {} edges",
        mesh.vertex_count(),
        mesh.edge_count()
    );

    let simulator = Simulator::new(config.simulation).map_err(invalid_data)?;
    let camera = Camera::new(config.view).map_err(invalid_data)?;

    let mut app = TerminalApp::new(
        mesh,
        simulator,
        camera,
        Duration::from_millis(args.tick_ms.max(1)),
        terminal::size()?,
    );
    app.run()
}
