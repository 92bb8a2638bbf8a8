/// Springmesh Core Library - spring relaxation and camera projection
///
/// This library provides the mesh of point masses, the per-tick physics
/// update that relaxes every edge toward its natural length, and the
/// camera pipeline that maps world positions to viewport pixels.
/// Scheduling, input and drawing are left to the caller.

pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod simulation;
pub mod topology;
pub mod transform;
pub mod vector;

// Re-export commonly used types
pub use config::SceneConfig;
pub use error::{Error, Result};
pub use geometry::{scatter_positions, Edge, EdgeId, Mesh, Vertex, VertexId};
pub use projection::{Camera, ViewParameters};
pub use simulation::{SimulationParams, Simulator, StepReport};
pub use topology::TopologySpec;
pub use transform::Matrix4;
pub use vector::{Axis, Vector3};
