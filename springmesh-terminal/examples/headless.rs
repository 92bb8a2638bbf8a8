/// Example: relax a mesh without a terminal UI and print where each vertex
/// lands on screen
///
/// Usage: cargo run --example headless -- [ticks] [seed]
use std::env;
use std::io;

use rand::rngs::StdRng;
use rand::SeedableRng;
use springmesh_core::{scatter_positions, Camera, Simulator, ViewParameters};
use springmesh_terminal::presets::Preset;

fn main() -> io::Result<()> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();
    let ticks: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(1000);
    let seed: u64 = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(0);

    let to_io = |e: springmesh_core::Error| io::Error::new(io::ErrorKind::InvalidData, e);

    let topology = Preset::HexQuad.topology().map_err(to_io)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let mut mesh = topology
        .build(scatter_positions(topology.vertex_count, &mut rng))
        .map_err(to_io)?;

    let simulator = Simulator::default();
    for tick in 0..ticks {
        let report = simulator.step(&mut mesh);
        if tick % 100 == 0 {
            println!("tick {:>6}  edge error {:.6}", tick, report.mean_abs_deviation);
        }
    }

    let camera = Camera::new(ViewParameters::default()).map_err(to_io)?;
    for (i, pos) in mesh.positions().enumerate() {
        match camera.project(pos) {
            Ok((x, y)) => println!("vertices[{}] = ({:.2}, {:.2})", i, x, y),
            Err(e) => println!("vertices[{}] not visible: {}", i, e),
        }
    }
    Ok(())
}
