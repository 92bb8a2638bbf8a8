/// Error types for mesh construction, camera derivation and configuration
use thiserror::Error;

/// The error type for springmesh operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A zero-length (or non-finite) vector was normalized.
    #[error("cannot normalize a vector of length {0}")]
    ZeroLengthVector(f64),

    /// The up vector is parallel to the viewing direction, or eye == target.
    #[error("degenerate view: up vector is parallel to the viewing direction")]
    DegenerateView,

    /// A point transformed to homogeneous w == 0.
    #[error("degenerate projection: homogeneous w is {0}")]
    DegenerateProjection(f64),

    /// An edge endpoint is not a vertex of the mesh.
    #[error("edge {edge} references vertex {vertex}, but the mesh has {count} vertices")]
    VertexOutOfRange {
        edge: usize,
        vertex: usize,
        count: usize,
    },

    /// An edge connects a vertex to itself.
    #[error("edge {edge} is a self-loop on vertex {vertex}")]
    SelfLoop { edge: usize, vertex: usize },

    /// A polygon in a topology has fewer than two vertices.
    #[error("polygon {0} has fewer than two vertices")]
    ShortPolygon(usize),

    /// A topology was built with the wrong number of positions.
    #[error("topology declares {expected} vertices, got {actual} positions")]
    VertexCountMismatch { expected: usize, actual: usize },

    /// View parameters that cannot produce a camera.
    #[error("invalid view parameters: {0}")]
    InvalidView(String),

    /// Simulation constants that cannot drive a simulation.
    #[error("invalid simulation parameters: {0}")]
    InvalidSimulation(String),

    /// Malformed topology text.
    #[error("failed to parse topology: {0}")]
    Parse(String),

    /// JSON configuration error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for the numerical failures: zero vectors, bad up vectors, w == 0.
    pub fn is_degenerate_geometry(&self) -> bool {
        matches!(
            self,
            Error::ZeroLengthVector(_) | Error::DegenerateView | Error::DegenerateProjection(_)
        )
    }

    /// True for construction-time mesh connectivity failures.
    pub fn is_invalid_topology(&self) -> bool {
        matches!(
            self,
            Error::VertexOutOfRange { .. }
                | Error::SelfLoop { .. }
                | Error::ShortPolygon(_)
                | Error::VertexCountMismatch { .. }
        )
    }
}

/// A specialized Result type for springmesh operations.
pub type Result<T> = std::result::Result<T, Error>;
