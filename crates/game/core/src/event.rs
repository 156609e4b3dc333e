//! Events produced by resolving or simulating an action.
use crate::{Cell, CreatureId, PartId, PartTarget, Stat};

/// Visual treatment hint for floating text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum FloatStyle {
    Damage,
    Heal,
    Cost,
    Info,
}

/// Display text attached to an event.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Note {
    pub text: String,
    pub style: Option<FloatStyle>,
}

impl Note {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: None,
        }
    }

    pub fn styled(text: impl Into<String>, style: FloatStyle) -> Self {
        Self {
            text: text.into(),
            style: Some(style),
        }
    }
}

/// Thing an event is about; used to anchor annotations on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Subject {
    Creature(CreatureId),
    Part(PartTarget),
    Cell(Cell),
}

/// A single observable consequence of an action.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    StatChanged {
        creature: CreatureId,
        stat: Stat,
        delta: i32,
        note: Option<Note>,
    },
    PartHpChanged {
        creature: CreatureId,
        part: PartId,
        delta: i32,
        note: Option<Note>,
    },
    Moved {
        creature: CreatureId,
        from: Cell,
        to: Cell,
    },
    Destroyed {
        creature: CreatureId,
        note: Option<Note>,
    },
    Message {
        at: Cell,
        note: Note,
    },
}

impl Event {
    pub fn stat_changed(creature: CreatureId, stat: Stat, delta: i32) -> Self {
        Event::StatChanged {
            creature,
            stat,
            delta,
            note: None,
        }
    }

    pub fn part_hp_changed(creature: CreatureId, part: PartId, delta: i32) -> Self {
        Event::PartHpChanged {
            creature,
            part,
            delta,
            note: None,
        }
    }

    pub fn moved(creature: CreatureId, from: Cell, to: Cell) -> Self {
        Event::Moved { creature, from, to }
    }

    /// Attaches display text. `Moved` events carry no text and are returned unchanged.
    pub fn with_note(mut self, value: Note) -> Self {
        match &mut self {
            Event::StatChanged { note, .. }
            | Event::PartHpChanged { note, .. }
            | Event::Destroyed { note, .. } => *note = Some(value),
            Event::Message { note, .. } => *note = value,
            Event::Moved { .. } => {}
        }
        self
    }

    pub fn subject(&self) -> Subject {
        match self {
            Event::StatChanged { creature, .. }
            | Event::Moved { creature, .. }
            | Event::Destroyed { creature, .. } => Subject::Creature(*creature),
            Event::PartHpChanged { creature, part, .. } => {
                Subject::Part(PartTarget::new(*creature, *part))
            }
            Event::Message { at, .. } => Subject::Cell(*at),
        }
    }

    pub fn note(&self) -> Option<&Note> {
        match self {
            Event::StatChanged { note, .. }
            | Event::PartHpChanged { note, .. }
            | Event::Destroyed { note, .. } => note.as_ref(),
            Event::Message { note, .. } => Some(note),
            Event::Moved { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part_events_anchor_on_the_part() {
        let event = Event::part_hp_changed(CreatureId(3), PartId(1), -4);
        assert_eq!(
            event.subject(),
            Subject::Part(PartTarget::new(CreatureId(3), PartId(1)))
        );
    }

    #[test]
    fn notes_attach_to_everything_but_moves() {
        let hit = Event::stat_changed(CreatureId(1), Stat::ActionPoints, -2)
            .with_note(Note::styled("-2 AP", FloatStyle::Cost));
        assert_eq!(hit.note().map(|n| n.text.as_str()), Some("-2 AP"));

        let step = Event::moved(CreatureId(1), Cell::ORIGIN, Cell::new(1, 0))
            .with_note(Note::new("ignored"));
        assert!(step.note().is_none());
    }
}
