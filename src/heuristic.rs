//! Distance estimators used to guide A*-style and greedy strategies.
//!
//! All of these only look at vertex positions. [ManhattanDistance] is admissible on a
//! 4-neighbourhood with costs of at least one, [ChebyshevDistance] also on an 8-neighbourhood.
use std::f64::consts::SQRT_2;

use crate::error::{PathfindingError, Result};
use crate::graph::Vertex;

pub trait Heuristic {
    /// Estimated cost of moving from `vertex` to `target`.
    fn calculate(&self, vertex: &Vertex, target: &Vertex) -> f64;
}

impl<H: Heuristic + ?Sized> Heuristic for &H {
    fn calculate(&self, vertex: &Vertex, target: &Vertex) -> f64 {
        (**self).calculate(vertex, target)
    }
}

fn deltas(vertex: &Vertex, target: &Vertex) -> (f64, f64) {
    let (p1, p2) = (vertex.position(), target.position());
    (((p1.x - p2.x).abs()) as f64, ((p1.y - p2.y).abs()) as f64)
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ManhattanDistance;

impl Heuristic for ManhattanDistance {
    fn calculate(&self, vertex: &Vertex, target: &Vertex) -> f64 {
        let (dx, dy) = deltas(vertex, target);
        dx + dy
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EuclideanDistance;

impl Heuristic for EuclideanDistance {
    fn calculate(&self, vertex: &Vertex, target: &Vertex) -> f64 {
        let (dx, dy) = deltas(vertex, target);
        dx.hypot(dy)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ChebyshevDistance;

impl Heuristic for ChebyshevDistance {
    fn calculate(&self, vertex: &Vertex, target: &Vertex) -> f64 {
        let (dx, dy) = deltas(vertex, target);
        dx.max(dy)
    }
}

/// Octile distance: the cost of taking as many diagonal steps as possible (each costing
/// √2) before going straight.
#[derive(Clone, Copy, Debug, Default)]
pub struct DiagonalDistance;

impl Heuristic for DiagonalDistance {
    fn calculate(&self, vertex: &Vertex, target: &Vertex) -> f64 {
        let (dx, dy) = deltas(vertex, target);
        dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
    }
}

/// Scales another heuristic. Factors above one turn A* into weighted A*, which expands fewer
/// vertices at the price of optimality.
#[derive(Clone, Copy, Debug)]
pub struct Weighted<H> {
    inner: H,
    factor: f64,
}

impl<H: Heuristic> Weighted<H> {
    pub fn new(inner: H, factor: f64) -> Result<Weighted<H>> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(PathfindingError::InvalidHeuristicFactor(factor));
        }
        Ok(Weighted { inner, factor })
    }
    pub fn factor(&self) -> f64 {
        self.factor
    }
}

impl<H: Heuristic> Heuristic for Weighted<H> {
    fn calculate(&self, vertex: &Vertex, target: &Vertex) -> f64 {
        self.inner.calculate(vertex, target) * self.factor
    }
}
