//! Projection of hypothetical events into deltas and annotations.
//!
//! [`Preview::set_events`] rebuilds the whole chunk from one batch: stat and
//! HP deltas accumulate within the batch, never across batches.
use std::collections::BTreeMap;

use game_core::{Cell, CreatureId, Event, FloatStyle, PartId, PartTarget, Simulation, Stat};
use tracing::trace;

use crate::render::{Point, Renderer};

/// Text floating above a subject.
#[derive(Clone, Debug, PartialEq)]
pub struct FloatText {
    pub at: Point,
    pub text: String,
    pub style: Option<FloatStyle>,
}

/// Store chunk with the net effect of a speculative action.
#[derive(Clone, Debug, Default)]
pub struct Preview {
    stats: BTreeMap<CreatureId, BTreeMap<Stat, i32>>,
    hp: BTreeMap<CreatureId, BTreeMap<PartId, i32>>,
    floats: Vec<FloatText>,
    throb: Vec<Cell>,
}

impl Preview {
    /// Replaces the preview with the projection of `events`.
    ///
    /// Annotations whose subject has no screen anchor are dropped.
    pub fn set_events(
        &mut self,
        events: &[Event],
        renderer: &dyn Renderer,
        world: &dyn Simulation,
    ) {
        self.clear();

        for event in events {
            match event {
                Event::StatChanged {
                    creature,
                    stat,
                    delta,
                    ..
                } => {
                    *self
                        .stats
                        .entry(*creature)
                        .or_default()
                        .entry(*stat)
                        .or_insert(0) += delta;
                }
                Event::PartHpChanged {
                    creature,
                    part,
                    delta,
                    ..
                } => {
                    *self
                        .hp
                        .entry(*creature)
                        .or_default()
                        .entry(*part)
                        .or_insert(0) += delta;
                }
                Event::Moved { from, to, .. } => {
                    self.throb.push(*from);
                    self.throb.push(*to);
                }
                Event::Destroyed { .. } | Event::Message { .. } => {}
            }

            if let Some(note) = event.note() {
                let subject = event.subject();
                match renderer.anchor(subject, world) {
                    Some(at) => self.floats.push(FloatText {
                        at,
                        text: note.text.clone(),
                        style: note.style,
                    }),
                    None => {
                        trace!(
                            target: "frontend::preview",
                            ?subject,
                            "dropping unanchored annotation"
                        );
                    }
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.stats.clear();
        self.hp.clear();
        self.floats.clear();
        self.throb.clear();
    }

    pub fn stats(&self) -> &BTreeMap<CreatureId, BTreeMap<Stat, i32>> {
        &self.stats
    }

    pub fn stat_delta(&self, creature: CreatureId, stat: Stat) -> Option<i32> {
        self.stats.get(&creature)?.get(&stat).copied()
    }

    pub fn hp(&self) -> &BTreeMap<CreatureId, BTreeMap<PartId, i32>> {
        &self.hp
    }

    pub fn hp_delta(&self, target: PartTarget) -> Option<i32> {
        self.hp.get(&target.creature)?.get(&target.part).copied()
    }

    pub fn floats(&self) -> &[FloatText] {
        &self.floats
    }

    pub fn throb(&self) -> &[Cell] {
        &self.throb
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
            && self.hp.is_empty()
            && self.floats.is_empty()
            && self.throb.is_empty()
    }
}
