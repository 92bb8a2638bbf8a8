//! End-to-end behaviour of the relaxation and projection pipeline.

use rand::rngs::StdRng;
use rand::SeedableRng;
use springmesh_core::{
    scatter_positions, Camera, Edge, Mesh, SimulationParams, Simulator, TopologySpec, Vector3,
    ViewParameters,
};

const CUBE: &str = "\
# the 1-skeleton of a cube
vertices 8
0 1 3 2
4 5 7 6
0 4
1 5
2 6
3 7
";

#[test]
fn two_vertices_converge_to_natural_length() {
    let mut mesh = Mesh::new(
        vec![Vector3::ZERO, Vector3::new(2.0, 0.0, 0.0)],
        vec![Edge::new(0, 1)],
    )
    .unwrap();
    let sim = Simulator::new(SimulationParams {
        repel_constant: 0.0,
        ..SimulationParams::default()
    })
    .unwrap();

    sim.step(&mut mesh);
    assert!(mesh.edge_length(0) < 2.0);

    let mut last = mesh.edge_length(0);
    for _ in 0..5000 {
        sim.step(&mut mesh);
        let len = mesh.edge_length(0);
        // approaches from above without overshooting
        assert!(len <= last && len >= 1.0);
        last = len;
    }
    assert!((last - 1.0).abs() < 1e-2, "length {}", last);
}

#[test]
fn springs_at_rest_only_feel_repulsion() {
    let positions = vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 0.0, 0.0),
        Vector3::new(1.0, 1.0, 0.0),
        Vector3::new(0.0, 1.0, 0.0),
    ];
    let mut with_springs = Mesh::from_polygons(positions.clone(), &[vec![0, 1, 2, 3]]).unwrap();
    let mut without_springs = Mesh::new(positions, vec![]).unwrap();

    let sim = Simulator::default();
    let report = sim.step(&mut with_springs);
    sim.step(&mut without_springs);

    assert_eq!(report.mean_abs_deviation, 0.0);
    for (a, b) in with_springs.positions().zip(without_springs.positions()) {
        assert_eq!(a, b);
    }
}

#[test]
fn cube_settles_to_a_steady_state() {
    let spec = TopologySpec::parse(CUBE).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let mut mesh = spec.build(scatter_positions(spec.vertex_count, &mut rng)).unwrap();
    assert_eq!(mesh.edge_count(), 12);

    let sim = Simulator::default();
    let mut last = sim.step(&mut mesh).mean_abs_deviation;
    let mut change = f64::INFINITY;
    for _ in 0..3000 {
        let next = sim.step(&mut mesh).mean_abs_deviation;
        change = (next - last).abs();
        last = next;
    }

    assert!(mesh.positions().all(|p| p.is_finite()));
    // repulsion holds every edge a little past its natural length
    assert!(change < 1e-6, "still moving by {}", change);
    assert!(last > 0.2 && last < 0.45, "mean edge error {}", last);
}

#[test]
fn relaxed_mesh_projects_into_viewport() {
    let spec = TopologySpec::parse(CUBE).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let mut mesh = spec.build(scatter_positions(spec.vertex_count, &mut rng)).unwrap();
    let sim = Simulator::default();
    for _ in 0..200 {
        sim.step(&mut mesh);
    }

    let centroid = mesh.positions().fold(Vector3::ZERO, |acc, p| acc + p) * (1.0 / 8.0);
    let camera = Camera::new(ViewParameters {
        target: centroid,
        side: 10.0,
        ..ViewParameters::default()
    })
    .unwrap();

    for (a, b) in mesh.segments() {
        for p in [a, b] {
            let (x, y) = camera.project(p).unwrap();
            assert!((0.0..=500.0).contains(&x), "x = {}", x);
            assert!((0.0..=500.0).contains(&y), "y = {}", y);
        }
    }
}
