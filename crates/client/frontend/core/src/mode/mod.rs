//! Interaction modes and the context they run in.
//!
//! A [`Mode`] is one state of the interaction stack. Every hook has a no-op
//! default, so a mode only overrides what it reacts to. Hooks never touch the
//! stack directly; they queue a [`Transition`] on the [`ModeContext`] and the
//! [`ModeStack`] applies queued transitions in order once the current hook
//! returns.
//!
//! # Hook order
//!
//! - push: deactivate old top, append, `on_pushed`, `on_activated`
//! - pop: `on_deactivated`, `on_popped`, remove, new top `on_activated(payload)`
//! - swap: `on_deactivated`, `on_popped`, remove, append, `on_pushed`, `on_activated`
mod stack;

pub use stack::ModeStack;

use std::any::Any;
use std::collections::VecDeque;
use std::time::Duration;

use game_core::{Cell, Simulation};

use crate::config::InteractionConfig;
use crate::error::Result;
use crate::focus::Focus;
use crate::highlight::Highlight;
use crate::preview::Preview;
use crate::render::Renderer;
use crate::store::Draft;

/// Value handed to the mode revealed by a pop.
pub type Payload = Box<dyn Any + Send>;

/// One state of the interaction stack.
pub trait Mode: Send {
    /// Short name used in logs and diagnostics.
    fn name(&self) -> &'static str;

    fn on_pushed(&mut self, _ctx: &mut ModeContext<'_>) {}

    fn on_popped(&mut self, _ctx: &mut ModeContext<'_>) {}

    /// The mode became the top of the stack.
    ///
    /// `payload` is only ever `Some` when the mode was revealed by a pop that
    /// carried one.
    fn on_activated(&mut self, _ctx: &mut ModeContext<'_>, _payload: Option<Payload>) {}

    fn on_deactivated(&mut self, _ctx: &mut ModeContext<'_>) {}

    /// A tile was clicked.
    ///
    /// Click targets are validated by the caller, so a target the mode cannot
    /// act on is reported as an error.
    fn on_tile_clicked(&mut self, _ctx: &mut ModeContext<'_>, _cell: Cell) -> Result<()> {
        Ok(())
    }

    fn on_tile_entered(&mut self, _ctx: &mut ModeContext<'_>, _cell: Cell) {}

    fn on_tile_exited(&mut self, _ctx: &mut ModeContext<'_>, _cell: Cell) {}

    /// Host frame tick; `dt` is the time since the previous tick.
    fn on_frame(&mut self, _ctx: &mut ModeContext<'_>, _dt: Duration) {}

    /// Whether the turn may end while this mode is on the stack.
    fn accepts_turn_end(&self) -> bool {
        true
    }
}

/// Stack change requested from inside a hook.
pub enum Transition {
    Push(Box<dyn Mode>),
    Pop(Option<Payload>),
    Swap(Box<dyn Mode>),
}

impl Transition {
    pub fn kind(&self) -> &'static str {
        match self {
            Transition::Push(_) => "push",
            Transition::Pop(_) => "pop",
            Transition::Swap(_) => "swap",
        }
    }
}

impl std::fmt::Debug for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transition::Push(mode) => write!(f, "Push({})", mode.name()),
            Transition::Pop(payload) => write!(f, "Pop(payload: {})", payload.is_some()),
            Transition::Swap(mode) => write!(f, "Swap({})", mode.name()),
        }
    }
}

/// Everything a hook may read or write.
///
/// A context lives for exactly one store transaction. `data` is the draft of
/// that transaction, so nothing a hook writes is visible to the renderer
/// until the whole input has been processed.
pub struct ModeContext<'a> {
    pub data: &'a mut Draft,
    pub engine: &'a mut dyn Simulation,
    pub renderer: &'a dyn Renderer,
    pub config: &'a InteractionConfig,
    transitions: VecDeque<Transition>,
}

impl<'a> ModeContext<'a> {
    pub fn new(
        data: &'a mut Draft,
        engine: &'a mut dyn Simulation,
        renderer: &'a dyn Renderer,
        config: &'a InteractionConfig,
    ) -> Self {
        Self {
            data,
            engine,
            renderer,
            config,
            transitions: VecDeque::new(),
        }
    }

    pub fn push(&mut self, mode: impl Mode + 'static) {
        self.transitions.push_back(Transition::Push(Box::new(mode)));
    }

    pub fn pop(&mut self, payload: Option<Payload>) {
        self.transitions.push_back(Transition::Pop(payload));
    }

    pub fn swap(&mut self, mode: impl Mode + 'static) {
        self.transitions.push_back(Transition::Swap(Box::new(mode)));
    }

    /// Transitions queued but not yet applied.
    pub fn pending(&self) -> usize {
        self.transitions.len()
    }

    pub(crate) fn next_transition(&mut self) -> Option<Transition> {
        self.transitions.pop_front()
    }

    pub(crate) fn discard_transitions(&mut self) -> usize {
        let dropped = self.transitions.len();
        self.transitions.clear();
        dropped
    }

    /// Hard-resets the chunks owned by whichever mode is active.
    ///
    /// Modes call this from `on_deactivated`, so counts a mode forgot to
    /// decrement never outlive it.
    pub fn reset_overlays(&mut self) {
        self.data.set(Highlight::default());
        self.data.set(Focus::default());
        self.data.set(Preview::default());
    }

    pub fn highlight(&mut self) -> &mut Highlight {
        self.data.build(Highlight::default)
    }

    pub fn preview(&mut self) -> &mut Preview {
        self.data.build(Preview::default)
    }

    /// Projects hypothetical `events` into the [`Preview`] chunk.
    pub fn show_preview(&mut self, events: &[game_core::Event]) {
        let renderer = self.renderer;
        let world: &dyn Simulation = &*self.engine;
        self.data
            .build(Preview::default)
            .set_events(events, renderer, world);
    }

    pub fn clear_preview(&mut self) {
        self.data.build(Preview::default).clear();
    }
}
