/// Mesh of point masses joined by spring edges
use rand::Rng;

use crate::error::{Error, Result};
use crate::vector::Vector3;

/// Index of a vertex in its mesh
pub type VertexId = usize;
/// Index of an edge in its mesh
pub type EdgeId = usize;

/// A point mass with the ids of the edges that touch it
#[derive(Debug, Clone)]
pub struct Vertex {
    pub pos: Vector3,
    edges: Vec<EdgeId>,
}

impl Vertex {
    pub fn new(pos: Vector3) -> Self {
        Self {
            pos,
            edges: Vec::new(),
        }
    }

    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn degree(&self) -> usize {
        self.edges.len()
    }
}

/// A spring between two distinct vertices of the same mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub v1: VertexId,
    pub v2: VertexId,
}

impl Edge {
    pub fn new(v1: VertexId, v2: VertexId) -> Self {
        Self { v1, v2 }
    }

    pub fn length(&self, mesh: &Mesh) -> f64 {
        mesh.position(self.v1).distance(mesh.position(self.v2))
    }

    /// The endpoint across the edge from `v`, if `v` is an endpoint.
    pub fn opposite(&self, v: VertexId) -> Option<VertexId> {
        if v == self.v1 {
            Some(self.v2)
        } else if v == self.v2 {
            Some(self.v1)
        } else {
            None
        }
    }
}

/// Vertices and edges forming an undirected graph.
///
/// The topology is checked once in [`Mesh::new`] and cannot change
/// afterwards; only vertex positions are mutable.
#[derive(Debug, Clone)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Mesh {
    pub fn new(positions: Vec<Vector3>, edges: Vec<Edge>) -> Result<Self> {
        let count = positions.len();
        let mut vertices: Vec<Vertex> = positions.into_iter().map(Vertex::new).collect();

        for (id, edge) in edges.iter().enumerate() {
            for vertex in [edge.v1, edge.v2] {
                if vertex >= count {
                    return Err(Error::VertexOutOfRange {
                        edge: id,
                        vertex,
                        count,
                    });
                }
            }
            if edge.v1 == edge.v2 {
                return Err(Error::SelfLoop {
                    edge: id,
                    vertex: edge.v1,
                });
            }
            vertices[edge.v1].edges.push(id);
            vertices[edge.v2].edges.push(id);
        }

        log::debug!("built mesh with {} vertices and {} edges", count, edges.len());
        Ok(Self { vertices, edges })
    }

    /// Build a mesh whose edges are the sides of `polygons`.
    ///
    /// Polygons with more than two vertices are closed back to their first
    /// vertex; a two-vertex polygon is a single edge. A side shared by two
    /// polygons becomes two parallel edges.
    pub fn from_polygons(positions: Vec<Vector3>, polygons: &[Vec<VertexId>]) -> Result<Self> {
        let mut edges = Vec::new();
        for (index, polygon) in polygons.iter().enumerate() {
            if polygon.len() < 2 {
                return Err(Error::ShortPolygon(index));
            }
            for pair in polygon.windows(2) {
                edges.push(Edge::new(pair[0], pair[1]));
            }
            if polygon.len() > 2 {
                edges.push(Edge::new(polygon[polygon.len() - 1], polygon[0]));
            }
        }
        Self::new(positions, edges)
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn position(&self, v: VertexId) -> Vector3 {
        self.vertices[v].pos
    }

    pub fn set_position(&mut self, v: VertexId, pos: Vector3) {
        self.vertices[v].pos = pos;
    }

    pub fn positions(&self) -> impl Iterator<Item = Vector3> + '_ {
        self.vertices.iter().map(|v| v.pos)
    }

    /// Euclidean distance between the endpoints of edge `e`.
    pub fn edge_length(&self, e: EdgeId) -> f64 {
        self.edges[e].length(self)
    }

    /// Vertices sharing an edge with `v`, once per edge.
    pub fn neighbors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices[v]
            .edges
            .iter()
            .filter_map(move |&e| self.edges[e].opposite(v))
    }

    /// Endpoint positions of every edge, in edge order.
    pub fn segments(&self) -> impl Iterator<Item = (Vector3, Vector3)> + '_ {
        self.edges
            .iter()
            .map(|e| (self.position(e.v1), self.position(e.v2)))
    }

    pub fn mean_edge_length(&self) -> f64 {
        if self.edges.is_empty() {
            return 0.0;
        }
        let total: f64 = (0..self.edges.len()).map(|e| self.edge_length(e)).sum();
        total / self.edges.len() as f64
    }
}

/// `count` positions drawn uniformly from the unit cube
pub fn scatter_positions<R: Rng>(count: usize, rng: &mut R) -> Vec<Vector3> {
    (0..count)
        .map(|_| Vector3::new(rng.gen(), rng.gen(), rng.gen()))
        .collect()
}
