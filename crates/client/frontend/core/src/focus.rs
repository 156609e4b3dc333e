//! Hover/click handler registry for creature and part targets.
//!
//! The active mode assigns a [`Handlers`] set per target kind. Every slot
//! wraps its handlers in a small adapter that remembers the value the pointer
//! last entered, so a mode that replaces the handlers mid-hover does not lose
//! track of what is currently under the pointer: the following leave still
//! clears the remembered value and reaches whichever handlers are assigned by
//! then.
use std::fmt;
use std::sync::Arc;

use game_core::{CreatureId, PartTarget};

use crate::error::Result;
use crate::mode::ModeContext;

pub type Callback<V> = Arc<dyn Fn(&mut ModeContext<'_>, V) + Send + Sync>;
pub type ClickCallback<V> = Arc<dyn Fn(&mut ModeContext<'_>, V) -> Result<()> + Send + Sync>;

/// Optional enter/leave/click callbacks for one target kind.
pub struct Handlers<V> {
    enter: Option<Callback<V>>,
    leave: Option<Callback<V>>,
    click: Option<ClickCallback<V>>,
}

impl<V> Handlers<V> {
    pub fn new() -> Self {
        Self {
            enter: None,
            leave: None,
            click: None,
        }
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ModeContext<'_>, V) + Send + Sync + 'static,
    {
        self.enter = Some(Arc::new(f));
        self
    }

    pub fn on_leave<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ModeContext<'_>, V) + Send + Sync + 'static,
    {
        self.leave = Some(Arc::new(f));
        self
    }

    pub fn on_click<F>(mut self, f: F) -> Self
    where
        F: Fn(&mut ModeContext<'_>, V) -> Result<()> + Send + Sync + 'static,
    {
        self.click = Some(Arc::new(f));
        self
    }
}

impl<V> Default for Handlers<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Clone for Handlers<V> {
    fn clone(&self) -> Self {
        Self {
            enter: self.enter.clone(),
            leave: self.leave.clone(),
            click: self.click.clone(),
        }
    }
}

/// Stateful adapter around the handlers assigned to one target kind.
pub struct FocusSlot<V> {
    current: Option<V>,
    handlers: Handlers<V>,
}

impl<V: Copy> FocusSlot<V> {
    /// Replaces the handlers, keeping the remembered value.
    pub fn assign(&mut self, handlers: Handlers<V>) {
        self.handlers = handlers;
    }

    pub fn current(&self) -> Option<V> {
        self.current
    }

    /// Records `value` as current and returns the handler to forward to.
    pub fn enter(&mut self, value: V) -> Option<Callback<V>> {
        self.current = Some(value);
        self.handlers.enter.clone()
    }

    /// Clears the current value and returns the handler to forward to.
    pub fn leave(&mut self) -> Option<Callback<V>> {
        self.current = None;
        self.handlers.leave.clone()
    }

    pub fn click(&self) -> Option<ClickCallback<V>> {
        self.handlers.click.clone()
    }
}

impl<V> Default for FocusSlot<V> {
    fn default() -> Self {
        Self {
            current: None,
            handlers: Handlers::new(),
        }
    }
}

impl<V: Clone> Clone for FocusSlot<V> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            handlers: self.handlers.clone(),
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for FocusSlot<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FocusSlot")
            .field("current", &self.current)
            .field("enter", &self.handlers.enter.is_some())
            .field("leave", &self.handlers.leave.is_some())
            .field("click", &self.handlers.click.is_some())
            .finish()
    }
}

/// Store chunk holding the creature and part handler slots.
#[derive(Clone, Debug, Default)]
pub struct Focus {
    creature: FocusSlot<CreatureId>,
    part: FocusSlot<PartTarget>,
}

impl Focus {
    pub fn assign<V: FocusTarget>(&mut self, handlers: Handlers<V>) {
        V::slot_mut(self).assign(handlers);
    }

    pub fn current<V: FocusTarget>(&self) -> Option<V> {
        V::slot(self).current()
    }

    pub fn current_creature(&self) -> Option<CreatureId> {
        self.creature.current()
    }

    pub fn current_part(&self) -> Option<PartTarget> {
        self.part.current()
    }

    pub fn slot_mut<V: FocusTarget>(&mut self) -> &mut FocusSlot<V> {
        V::slot_mut(self)
    }
}

/// Target kinds that own a slot in [`Focus`].
pub trait FocusTarget: Copy + fmt::Debug + Send + Sync + 'static {
    fn slot(focus: &Focus) -> &FocusSlot<Self>;
    fn slot_mut(focus: &mut Focus) -> &mut FocusSlot<Self>;
}

impl FocusTarget for CreatureId {
    fn slot(focus: &Focus) -> &FocusSlot<Self> {
        &focus.creature
    }

    fn slot_mut(focus: &mut Focus) -> &mut FocusSlot<Self> {
        &mut focus.creature
    }
}

impl FocusTarget for PartTarget {
    fn slot(focus: &Focus) -> &FocusSlot<Self> {
        &focus.part
    }

    fn slot_mut(focus: &mut Focus) -> &mut FocusSlot<Self> {
        &mut focus.part
    }
}

/// Pointer entered `value`.
pub fn enter<V: FocusTarget>(ctx: &mut ModeContext<'_>, value: V) {
    let callback = ctx.data.build(Focus::default).slot_mut::<V>().enter(value);
    if let Some(callback) = callback {
        callback(ctx, value);
    }
}

/// Pointer left `value`.
pub fn leave<V: FocusTarget>(ctx: &mut ModeContext<'_>, value: V) {
    let callback = ctx.data.build(Focus::default).slot_mut::<V>().leave();
    if let Some(callback) = callback {
        callback(ctx, value);
    }
}

/// Leaves whatever the slot currently remembers, if anything.
pub fn leave_current<V: FocusTarget>(ctx: &mut ModeContext<'_>) {
    let current = ctx.data.get::<Focus>().and_then(Focus::current::<V>);
    if let Some(value) = current {
        leave(ctx, value);
    }
}

pub fn click<V: FocusTarget>(ctx: &mut ModeContext<'_>, value: V) -> Result<()> {
    let callback = ctx.data.build(Focus::default).slot_mut::<V>().click();
    match callback {
        Some(callback) => callback(ctx, value),
        None => Ok(()),
    }
}
