//! Screen layout used when no graphical renderer is attached.
use client_frontend_core::{Point, Renderer};
use game_core::{Cell, Simulation, Subject};

/// Pointy-top hex layout in abstract screen units.
///
/// Parts are stacked above their creature's cell centre, one slot per part
/// id, so floating text for different parts does not overlap.
#[derive(Clone, Debug)]
pub struct HeadlessRenderer {
    hex_size: f32,
}

impl HeadlessRenderer {
    pub fn new(hex_size: f32) -> Self {
        Self { hex_size }
    }

    pub fn center(&self, cell: Cell) -> Point {
        let q = cell.q as f32;
        let r = cell.r as f32;
        Point::new(
            self.hex_size * 3f32.sqrt() * (q + r / 2.0),
            self.hex_size * 1.5 * r,
        )
    }
}

impl Default for HeadlessRenderer {
    fn default() -> Self {
        Self::new(16.0)
    }
}

impl Renderer for HeadlessRenderer {
    fn anchor(&self, subject: Subject, world: &dyn Simulation) -> Option<Point> {
        match subject {
            Subject::Creature(id) => Some(self.center(world.creature(id)?.cell)),
            Subject::Part(target) => {
                let creature = world.creature(target.creature)?;
                creature.part(target.part)?;
                let base = self.center(creature.cell);
                let slot = target.part.0 as f32 + 1.0;
                Some(Point::new(base.x, base.y - slot * self.hex_size * 0.5))
            }
            Subject::Cell(cell) => world.contains(cell).then(|| self.center(cell)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandbox::SandboxEngine;
    use game_core::{CreatureId, PartId, PartTarget};

    #[test]
    fn origin_maps_to_screen_origin() {
        let renderer = HeadlessRenderer::default();
        assert_eq!(renderer.center(Cell::ORIGIN), Point::new(0.0, 0.0));
        assert_eq!(renderer.center(Cell::new(0, 2)).y, 48.0);
    }

    #[test]
    fn unresolvable_subjects_have_no_anchor() {
        let engine = SandboxEngine::skirmish(4).unwrap();
        let renderer = HeadlessRenderer::default();

        assert!(renderer.anchor(Subject::Creature(CreatureId(99)), &engine).is_none());
        assert!(
            renderer
                .anchor(Subject::Part(PartTarget::new(CreatureId(1), PartId(9))), &engine)
                .is_none()
        );
        assert!(renderer.anchor(Subject::Cell(Cell::new(9, 9)), &engine).is_none());
    }

    #[test]
    fn parts_float_above_their_creature() {
        let engine = SandboxEngine::skirmish(4).unwrap();
        let renderer = HeadlessRenderer::default();
        let body = renderer.anchor(Subject::Creature(CreatureId(1)), &engine).unwrap();
        let head = renderer
            .anchor(Subject::Part(PartTarget::new(CreatureId(1), PartId(0))), &engine)
            .unwrap();
        let torso = renderer
            .anchor(Subject::Part(PartTarget::new(CreatureId(1), PartId(1))), &engine)
            .unwrap();

        assert_eq!(head.x, body.x);
        assert!(torso.y < head.y && head.y < body.y);
    }
}
