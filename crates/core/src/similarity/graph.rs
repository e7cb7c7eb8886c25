//! Weighted undirected graph over recipe ordinals.
//!
//! The vertex set is fixed at construction (`0..capacity`). Edges are only
//! ever appended: there is no removal and no deduplication, so the same pair
//! may be linked again by a later insertion. Each edge is stored once in an
//! arena and referenced from both endpoints' adjacency lists.

use crate::error::{RecipeBookError, Result};

/// An undirected weighted edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub a: u32,
    pub b: u32,
    pub weight: f64,
}

impl Edge {
    pub fn new(a: u32, b: u32, weight: f64) -> Self {
        Self { a, b, weight }
    }

    /// The endpoint that is not `vertex`.
    #[inline]
    pub fn other(&self, vertex: u32) -> u32 {
        if vertex == self.a {
            self.b
        } else {
            self.a
        }
    }
}

/// Similarity graph with a fixed vertex capacity.
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    edges: Vec<Edge>,
    // adjacency[vertex] = indices into `edges`, in insertion order
    adjacency: Vec<Vec<u32>>,
}

impl SimilarityGraph {
    pub fn new(capacity: usize) -> Self {
        Self {
            edges: Vec::new(),
            adjacency: vec![Vec::new(); capacity],
        }
    }

    /// Number of vertices.
    pub fn capacity(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns `Capacity` if `vertex` is not a valid vertex id.
    pub fn check_vertex(&self, vertex: u32) -> Result<()> {
        if (vertex as usize) < self.adjacency.len() {
            Ok(())
        } else {
            Err(RecipeBookError::Capacity {
                ordinal: vertex as usize,
                capacity: self.adjacency.len(),
            })
        }
    }

    /// Appends an undirected edge. Weight is not validated; callers filter.
    pub fn add_edge(&mut self, a: u32, b: u32, weight: f64) -> Result<()> {
        self.check_vertex(a)?;
        self.check_vertex(b)?;
        let idx = self.edges.len() as u32;
        self.edges.push(Edge::new(a, b, weight));
        self.adjacency[a as usize].push(idx);
        if a != b {
            self.adjacency[b as usize].push(idx);
        }
        Ok(())
    }

    /// Edges touching `vertex`, in insertion order. Empty for unknown vertices.
    pub fn incident_edges(&self, vertex: u32) -> impl Iterator<Item = &Edge> + '_ {
        self.adjacency
            .get(vertex as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
            .iter()
            .map(move |&idx| &self.edges[idx as usize])
    }

    pub fn degree(&self, vertex: u32) -> usize {
        self.adjacency.get(vertex as usize).map_or(0, Vec::len)
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
}
