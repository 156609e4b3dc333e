//! Owner of the mode stack, the data store and the collaborators.
//!
//! Every input runs as one store transaction: the active mode reacts, queued
//! transitions settle, and only then is a new snapshot published. A click
//! that fails publishes nothing.
use std::time::Duration;

use game_core::{Action, Cell, CreatureId, PartTarget, Simulation};
use tracing::{debug, info};

use crate::config::InteractionConfig;
use crate::error::{InteractionError, Result};
use crate::focus;
use crate::mode::{Mode, ModeContext, ModeStack, Payload};
use crate::modes::AnimatingMode;
use crate::render::Renderer;
use crate::store::{DataStore, Snapshot};

pub struct Session<E, R> {
    stack: ModeStack,
    store: DataStore,
    engine: E,
    renderer: R,
    config: InteractionConfig,
}

impl<E: Simulation, R: Renderer> Session<E, R> {
    /// Creates a session with `initial` as its bootstrap mode.
    pub fn bootstrap(
        initial: impl Mode + 'static,
        engine: E,
        renderer: R,
        config: InteractionConfig,
    ) -> Self {
        let mut session = Self {
            stack: ModeStack::new(),
            store: DataStore::new(),
            engine,
            renderer,
            config,
        };
        let name = initial.name();
        session.push(initial);
        info!(
            target: "frontend::mode",
            mode = name,
            revision = session.engine.revision(),
            "session started"
        );
        session
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn active_mode(&self) -> Option<&'static str> {
        self.stack.active_name()
    }

    pub fn mode_names(&self) -> Vec<&'static str> {
        self.stack.names()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable engine access for hosts that also feed it from elsewhere,
    /// such as turns taken by a remote player.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn push(&mut self, mode: impl Mode + 'static) {
        self.update(|stack, ctx| stack.push(ctx, Box::new(mode)));
    }

    pub fn pop(&mut self, payload: Option<Payload>) -> bool {
        self.update(|stack, ctx| stack.pop(ctx, payload))
    }

    pub fn swap(&mut self, mode: impl Mode + 'static) -> bool {
        self.update(|stack, ctx| stack.swap(ctx, Box::new(mode)))
    }

    pub fn tile_clicked(&mut self, cell: Cell) -> Result<()> {
        self.transact(|stack, ctx| stack.dispatch_tile_clicked(ctx, cell))
    }

    pub fn tile_entered(&mut self, cell: Cell) {
        self.update(|stack, ctx| stack.dispatch_tile_entered(ctx, cell));
    }

    pub fn tile_exited(&mut self, cell: Cell) {
        self.update(|stack, ctx| stack.dispatch_tile_exited(ctx, cell));
    }

    pub fn creature_entered(&mut self, id: CreatureId) {
        self.update(|stack, ctx| {
            focus::enter(ctx, id);
            stack.settle(ctx);
        });
    }

    pub fn creature_left(&mut self, id: CreatureId) {
        self.update(|stack, ctx| {
            focus::leave(ctx, id);
            stack.settle(ctx);
        });
    }

    pub fn creature_clicked(&mut self, id: CreatureId) -> Result<()> {
        self.transact(|stack, ctx| {
            focus::click(ctx, id)?;
            stack.settle(ctx);
            Ok(())
        })
    }

    pub fn part_entered(&mut self, target: PartTarget) {
        self.update(|stack, ctx| {
            focus::enter(ctx, target);
            stack.settle(ctx);
        });
    }

    pub fn part_left(&mut self, target: PartTarget) {
        self.update(|stack, ctx| {
            focus::leave(ctx, target);
            stack.settle(ctx);
        });
    }

    pub fn part_clicked(&mut self, target: PartTarget) -> Result<()> {
        self.transact(|stack, ctx| {
            focus::click(ctx, target)?;
            stack.settle(ctx);
            Ok(())
        })
    }

    /// Ends the current turn, animating it over whatever mode is active.
    ///
    /// Refused with [`InteractionError::Busy`] while a mode on the stack,
    /// such as a running animation, still has an action to commit.
    pub fn end_turn(&mut self) -> Result<()> {
        self.transact(|stack, ctx| {
            if let Some(mode) = stack.turn_end_blocker() {
                info!(target: "frontend::mode", mode, "end of turn refused");
                return Err(InteractionError::Busy { mode });
            }
            let resolution = ctx.engine.resolve(&Action::EndTurn)?;
            debug!(target: "frontend::mode", events = resolution.events.len(), "ending turn");
            let animation = AnimatingMode::new(resolution, &ctx.config.animation);
            stack.push(ctx, Box::new(animation));
            Ok(())
        })
    }

    /// Forwards a host frame tick to the active mode.
    pub fn advance(&mut self, dt: Duration) {
        self.update(|stack, ctx| stack.dispatch_frame(ctx, dt));
    }

    fn transact<T>(
        &mut self,
        f: impl FnOnce(&mut ModeStack, &mut ModeContext<'_>) -> Result<T>,
    ) -> Result<T> {
        let Self {
            stack,
            store,
            engine,
            renderer,
            config,
        } = self;
        store.transact(|data| {
            let mut ctx = ModeContext::new(data, engine, &*renderer, &*config);
            f(stack, &mut ctx)
        })
    }

    fn update<T>(&mut self, f: impl FnOnce(&mut ModeStack, &mut ModeContext<'_>) -> T) -> T {
        let Self {
            stack,
            store,
            engine,
            renderer,
            config,
        } = self;
        store.update(|data| {
            let mut ctx = ModeContext::new(data, engine, &*renderer, &*config);
            f(stack, &mut ctx)
        })
    }
}

impl<E, R> std::fmt::Debug for Session<E, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("stack", &self.stack)
            .field("generation", &self.store.generation())
            .finish_non_exhaustive()
    }
}
