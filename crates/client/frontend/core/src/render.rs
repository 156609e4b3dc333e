//! Boundary towards the renderer.
use game_core::{Simulation, Subject};

/// Screen-space position in renderer units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Coordinate lookup the renderer provides to the interaction layer.
pub trait Renderer: Send {
    /// Current screen position of `subject`, `None` if it is off-screen or gone.
    fn anchor(&self, subject: Subject, world: &dyn Simulation) -> Option<Point>;
}
