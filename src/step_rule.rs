//! Step rules decide what moving from one vertex to an adjacent one costs.
use crate::graph::Vertex;

pub trait StepRule {
    /// Cost of moving from `current` onto `next`.
    fn calculate_step_cost(&self, next: &Vertex, current: &Vertex) -> f64;
}

impl<R: StepRule + ?Sized> StepRule for &R {
    fn calculate_step_cost(&self, next: &Vertex, current: &Vertex) -> f64 {
        (**self).calculate_step_cost(next, current)
    }
}

/// Entering a vertex costs its configured cost.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultStepRule;

impl StepRule for DefaultStepRule {
    fn calculate_step_cost(&self, next: &Vertex, _current: &Vertex) -> f64 {
        next.cost().current() as f64
    }
}

/// Like [DefaultStepRule], but climbing or descending between vertices of different cost is
/// charged the height difference on top.
#[derive(Clone, Copy, Debug, Default)]
pub struct LandscapeStepRule;

impl StepRule for LandscapeStepRule {
    fn calculate_step_cost(&self, next: &Vertex, current: &Vertex) -> f64 {
        let (n, c) = (next.cost().current(), current.cost().current());
        n as f64 + (n - c).abs() as f64
    }
}

/// Every step costs one, regardless of the vertex costs.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnitStepRule;

impl StepRule for UnitStepRule {
    fn calculate_step_cost(&self, _next: &Vertex, _current: &Vertex) -> f64 {
        1.0
    }
}
