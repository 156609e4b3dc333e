use game_core::{Cell, CreatureId, Faction, Stat};
use tracing::debug;

use super::{Committed, SelectedMode};
use crate::error::{InteractionError, Result};
use crate::focus::{self, Focus, Handlers};
use crate::mode::{Mode, ModeContext, Payload};

/// Nothing selected.
#[derive(Debug, Default)]
pub struct IdleMode;

impl IdleMode {
    pub fn new() -> Self {
        Self
    }
}

impl Mode for IdleMode {
    fn name(&self) -> &'static str {
        "idle"
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_>, payload: Option<Payload>) {
        ctx.data.build(Focus::default).assign(
            Handlers::<CreatureId>::new()
                .on_enter(|ctx, id| {
                    ctx.highlight().throb.creatures.inc(id);
                })
                .on_leave(|ctx, id| {
                    ctx.highlight().throb.creatures.dec(&id);
                })
                .on_click(select),
        );

        // keep the actor selected while it can still act
        let Some(committed) = payload.and_then(|p| p.downcast::<Committed>().ok()) else {
            return;
        };
        let Some(actor) = committed.actor else {
            return;
        };
        match ctx.engine.creature(actor) {
            Some(view) if view.faction == Faction::Player && view.stat(Stat::ActionPoints) > 0 => {
                debug!(target: "frontend::mode", creature = %actor, "reselecting after commit");
                ctx.push(SelectedMode::new(actor));
            }
            _ => {}
        }
    }

    fn on_deactivated(&mut self, ctx: &mut ModeContext<'_>) {
        ctx.reset_overlays();
    }

    fn on_tile_clicked(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) -> Result<()> {
        if !ctx.engine.contains(cell) {
            return Err(InteractionError::InvalidTarget {
                mode: self.name(),
                cell,
            });
        }
        match ctx.engine.creature_at(cell) {
            Some(view) => focus::click(ctx, view.id),
            None => Ok(()),
        }
    }

    fn on_tile_entered(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) {
        focus::leave_current::<CreatureId>(ctx);
        if let Some(view) = ctx.engine.creature_at(cell) {
            focus::enter(ctx, view.id);
        }
    }

    fn on_tile_exited(&mut self, ctx: &mut ModeContext<'_>, _cell: Cell) {
        focus::leave_current::<CreatureId>(ctx);
    }
}

fn select(ctx: &mut ModeContext<'_>, id: CreatureId) -> Result<()> {
    let view = ctx
        .engine
        .creature(id)
        .ok_or(InteractionError::UnknownCreature(id))?;
    if view.faction == Faction::Player {
        ctx.push(SelectedMode::new(id));
    }
    Ok(())
}
