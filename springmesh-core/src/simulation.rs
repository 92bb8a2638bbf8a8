/// Force-directed relaxation of mesh vertex positions
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Mesh;
use crate::vector::Vector3;

/// Constants of the relaxation.
///
/// `min_repel_distance` bounds the repulsion magnitude: pairs closer than
/// this are pushed as if they were exactly this far apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParams {
    pub natural_length: f64,
    pub spring_constant: f64,
    pub repel_constant: f64,
    pub min_repel_distance: f64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            natural_length: 1.0,
            spring_constant: 0.1,
            repel_constant: 0.01,
            min_repel_distance: 0.1,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("natural_length", self.natural_length),
            ("spring_constant", self.spring_constant),
            ("repel_constant", self.repel_constant),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::InvalidSimulation(format!(
                    "{} must be non-negative, got {}",
                    name, value
                )));
            }
        }
        if !(self.min_repel_distance.is_finite() && self.min_repel_distance > 0.0) {
            return Err(Error::InvalidSimulation(format!(
                "min_repel_distance must be positive, got {}",
                self.min_repel_distance
            )));
        }
        Ok(())
    }
}

/// What one tick did
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    /// Mean of |length - natural_length| over all edges, measured as each
    /// edge was visited.
    pub mean_abs_deviation: f64,
    /// Edges whose endpoints coincided, so had no direction to act along.
    pub skipped_edges: usize,
    /// Vertex pairs that coincided or produced a non-finite push.
    pub skipped_pairs: usize,
}

/// Spring relaxation plus all-pairs repulsion, one tick at a time.
///
/// Both passes update positions in place as they go, so later edges and
/// pairs in a tick see the effect of earlier ones.
#[derive(Debug, Clone, Default)]
pub struct Simulator {
    params: SimulationParams,
}

impl Simulator {
    pub fn new(params: SimulationParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Run the spring pass, then the repulsion pass.
    pub fn step(&self, mesh: &mut Mesh) -> StepReport {
        let (mean_abs_deviation, skipped_edges) = self.spring_pass(mesh);
        let skipped_pairs = self.repel_pass(mesh);

        log::debug!("mean edge error = {:.6}", mean_abs_deviation);
        if skipped_edges + skipped_pairs > 0 {
            log::warn!(
                "skipped {} degenerate edges and {} degenerate pairs",
                skipped_edges,
                skipped_pairs
            );
        }

        StepReport {
            mean_abs_deviation,
            skipped_edges,
            skipped_pairs,
        }
    }

    /// Move each edge's endpoints toward the natural length.
    ///
    /// The push is `spring_constant * delta^2` along the edge: inward for a
    /// stretched edge, outward for a compressed one. Returns the mean
    /// absolute deviation and the number of skipped edges.
    pub fn spring_pass(&self, mesh: &mut Mesh) -> (f64, usize) {
        let p = &self.params;
        let mut abs_delta_sum = 0.0;
        let mut skipped = 0;

        for e in 0..mesh.edge_count() {
            let edge = mesh.edges()[e];
            let a = mesh.position(edge.v1);
            let b = mesh.position(edge.v2);

            let delta = a.distance(b) - p.natural_length;
            abs_delta_sum += delta.abs();
            if delta == 0.0 {
                continue;
            }

            let direction = match (b - a).normalize() {
                Ok(direction) => direction,
                Err(_) => {
                    skipped += 1;
                    continue;
                }
            };
            let du = direction * (delta * delta * p.spring_constant);
            let (a, b) = if delta > 0.0 { (a + du, b - du) } else { (a - du, b + du) };
            if !(a.is_finite() && b.is_finite()) {
                skipped += 1;
                continue;
            }
            mesh.set_position(edge.v1, a);
            mesh.set_position(edge.v2, b);
        }

        let mean = if mesh.edge_count() == 0 {
            0.0
        } else {
            abs_delta_sum / mesh.edge_count() as f64
        };
        (mean, skipped)
    }

    /// Push every pair of vertices apart with magnitude
    /// `repel_constant / distance^2`, adjacent or not.
    ///
    /// Returns the number of skipped pairs.
    pub fn repel_pass(&self, mesh: &mut Mesh) -> usize {
        let mut skipped = 0;
        let n = mesh.vertex_count();
        for i in 0..n {
            for j in (i + 1)..n {
                let a = mesh.position(i);
                let b = mesh.position(j);
                match self.repulsion(a, b) {
                    Some(step) => {
                        mesh.set_position(i, a - step);
                        mesh.set_position(j, b + step);
                    }
                    None => skipped += 1,
                }
            }
        }
        skipped
    }

    /// Displacement applied to `b` (and negated for `a`), or `None` when
    /// the pair has no usable direction.
    fn repulsion(&self, a: Vector3, b: Vector3) -> Option<Vector3> {
        let p = &self.params;
        let delta = b - a;
        let len = delta.length().max(p.min_repel_distance);
        let step = delta.normalize().ok()? * (p.repel_constant / (len * len));
        if !((a - step).is_finite() && (b + step).is_finite()) {
            return None;
        }
        Some(step)
    }
}
