use game_core::{Action, Cell, CreatureId, Faction, PartTarget};
use tracing::{debug, info, warn};

use super::AnimatingMode;
use crate::error::{InteractionError, Result};
use crate::focus::{self, Focus, Handlers};
use crate::mode::{Mode, ModeContext, Payload};

/// A friendly creature is selected and awaiting orders.
///
/// Hovering a reachable cell previews the move; hovering an enemy part
/// previews a strike on it. Clicking either resolves the action and hands it
/// to [`AnimatingMode`]. Clicking the selected creature again deselects it.
#[derive(Debug)]
pub struct SelectedMode {
    creature: CreatureId,
    range: Vec<Cell>,
}

impl SelectedMode {
    pub fn new(creature: CreatureId) -> Self {
        Self {
            creature,
            range: Vec::new(),
        }
    }

    pub fn creature(&self) -> CreatureId {
        self.creature
    }

    fn walk_to(&self, ctx: &mut ModeContext<'_>, to: Cell) {
        let action = Action::Move {
            creature: self.creature,
            to,
        };
        match ctx.engine.resolve(&action) {
            Ok(resolution) => {
                let animation = AnimatingMode::new(resolution, &ctx.config.animation);
                ctx.swap(animation);
            }
            Err(rejection) => {
                info!(
                    target: "frontend::mode",
                    creature = %self.creature,
                    %to,
                    %rejection,
                    "move rejected"
                );
                ctx.clear_preview();
            }
        }
    }
}

impl Mode for SelectedMode {
    fn name(&self) -> &'static str {
        "selected"
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_>, _payload: Option<Payload>) {
        if ctx.engine.creature(self.creature).is_none() {
            warn!(target: "frontend::mode", creature = %self.creature, "selected creature is gone");
            ctx.pop(None);
            return;
        }

        // the world may have changed while another mode was on top
        self.range = ctx.engine.legal_range(self.creature);

        let highlight = ctx.highlight();
        highlight.statics.creatures.inc(self.creature);
        highlight.set_region(&self.range);

        let actor = self.creature;
        let focus = ctx.data.build(Focus::default);
        focus.assign(
            Handlers::<CreatureId>::new()
                .on_enter(|ctx, id| {
                    ctx.highlight().throb.creatures.inc(id);
                })
                .on_leave(|ctx, id| {
                    ctx.highlight().throb.creatures.dec(&id);
                })
                .on_click(move |ctx, id| reselect(ctx, actor, id)),
        );
        focus.assign(
            Handlers::<PartTarget>::new()
                .on_enter(move |ctx, target| preview_strike(ctx, actor, target))
                .on_leave(|ctx, target| {
                    ctx.highlight().throb.parts.dec(&target);
                    ctx.clear_preview();
                })
                .on_click(move |ctx, target| strike(ctx, actor, target)),
        );
    }

    fn on_deactivated(&mut self, ctx: &mut ModeContext<'_>) {
        ctx.reset_overlays();
    }

    fn on_tile_clicked(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) -> Result<()> {
        if let Some(view) = ctx.engine.creature_at(cell) {
            return focus::click(ctx, view.id);
        }
        if self.range.contains(&cell) {
            self.walk_to(ctx, cell);
            return Ok(());
        }
        Err(InteractionError::InvalidTarget {
            mode: self.name(),
            cell,
        })
    }

    fn on_tile_entered(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) {
        focus::leave_current::<CreatureId>(ctx);
        if let Some(view) = ctx.engine.creature_at(cell) {
            focus::enter(ctx, view.id);
            return;
        }
        if !self.range.contains(&cell) || !ctx.config.preview.on_hover {
            return;
        }

        let action = Action::Move {
            creature: self.creature,
            to: cell,
        };
        match ctx.engine.simulate(&action) {
            Ok(events) => ctx.show_preview(&events),
            Err(rejection) => {
                debug!(target: "frontend::preview", %cell, %rejection, "no move preview");
                ctx.clear_preview();
            }
        }
    }

    fn on_tile_exited(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) {
        focus::leave_current::<CreatureId>(ctx);
        if self.range.contains(&cell) {
            ctx.clear_preview();
        }
    }
}

/// Click on a creature while `actor` is selected.
fn reselect(ctx: &mut ModeContext<'_>, actor: CreatureId, id: CreatureId) -> Result<()> {
    if id == actor {
        ctx.pop(None);
        return Ok(());
    }
    let view = ctx
        .engine
        .creature(id)
        .ok_or(InteractionError::UnknownCreature(id))?;
    if view.faction == Faction::Player {
        ctx.swap(SelectedMode::new(id));
    }
    Ok(())
}

fn preview_strike(ctx: &mut ModeContext<'_>, actor: CreatureId, target: PartTarget) {
    ctx.highlight().throb.parts.inc(target);
    if !ctx.config.preview.on_hover || target.creature == actor {
        return;
    }

    let action = Action::Strike {
        creature: actor,
        target,
    };
    match ctx.engine.simulate(&action) {
        Ok(events) => ctx.show_preview(&events),
        Err(rejection) => {
            debug!(target: "frontend::preview", %target, %rejection, "no strike preview");
            ctx.clear_preview();
        }
    }
}

fn strike(ctx: &mut ModeContext<'_>, actor: CreatureId, target: PartTarget) -> Result<()> {
    let view = ctx
        .engine
        .creature(target.creature)
        .ok_or(InteractionError::UnknownCreature(target.creature))?;
    if view.part(target.part).is_none() {
        return Err(InteractionError::UnknownPart(target));
    }

    let action = Action::Strike {
        creature: actor,
        target,
    };
    match ctx.engine.resolve(&action) {
        Ok(resolution) => {
            let animation = AnimatingMode::new(resolution, &ctx.config.animation);
            ctx.swap(animation);
        }
        Err(rejection) => {
            info!(
                target: "frontend::mode",
                creature = %actor,
                %target,
                %rejection,
                "strike rejected"
            );
            ctx.clear_preview();
        }
    }
    Ok(())
}
