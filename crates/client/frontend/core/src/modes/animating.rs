use std::collections::VecDeque;
use std::time::Duration;

use game_core::{Action, Event, Resolution};
use tracing::{debug, warn};

use super::Committed;
use crate::animation::{Motion, Tween};
use crate::config::AnimationConfig;
use crate::mode::{Mode, ModeContext, Payload};

/// One timed segment of an animation.
#[derive(Debug)]
struct Step {
    motion: Option<Motion>,
    tween: Tween,
}

/// Plays a resolved action, then commits it and pops.
///
/// Walks animate hop by hop, strikes hold for a fixed time. The committed
/// events are handed to the revealed mode as a [`Committed`] payload. Input
/// is ignored while the animation runs.
#[derive(Debug)]
pub struct AnimatingMode {
    resolution: Option<Resolution>,
    steps: VecDeque<Step>,
}

impl AnimatingMode {
    pub fn new(resolution: Resolution, config: &AnimationConfig) -> Self {
        let mut steps: VecDeque<Step> = resolution
            .events
            .iter()
            .filter_map(|event| match event {
                Event::Moved { creature, from, to } => Some(Step {
                    motion: Some(Motion {
                        creature: *creature,
                        from: *from,
                        to: *to,
                        progress: 0.0,
                    }),
                    tween: Tween::new(config.step),
                }),
                _ => None,
            })
            .collect();

        if matches!(resolution.action, Action::Strike { .. }) {
            steps.push_back(Step {
                motion: None,
                tween: Tween::new(config.strike),
            });
        }

        Self {
            resolution: Some(resolution),
            steps,
        }
    }

    /// Time left until the commit, assuming no further steps are added.
    pub fn remaining(&self) -> Duration {
        self.steps
            .iter()
            .map(|step| step.tween.remaining())
            .sum()
    }

    fn publish(ctx: &mut ModeContext<'_>, step: &Step) {
        match step.motion {
            Some(motion) => {
                ctx.data.set(Motion {
                    progress: step.tween.ratio(),
                    ..motion
                });
            }
            None => {
                ctx.data.remove::<Motion>();
            }
        }
    }

    fn finish(&mut self, ctx: &mut ModeContext<'_>) {
        let Some(resolution) = self.resolution.take() else {
            return;
        };
        let actor = resolution.action.actor();

        match ctx.engine.commit(resolution) {
            Ok(events) => {
                debug!(target: "frontend::mode", events = events.len(), "action committed");
                ctx.pop(Some(Box::new(Committed { actor, events })));
            }
            Err(rejection) => {
                warn!(target: "frontend::mode", %rejection, "engine refused to commit");
                ctx.pop(None);
            }
        }
    }
}

impl Mode for AnimatingMode {
    fn name(&self) -> &'static str {
        "animating"
    }

    fn on_activated(&mut self, ctx: &mut ModeContext<'_>, _payload: Option<Payload>) {
        if let Some(resolution) = &self.resolution {
            ctx.show_preview(&resolution.events);
        }
        match self.steps.front() {
            Some(step) => Self::publish(ctx, step),
            None => self.finish(ctx),
        }
    }

    fn on_deactivated(&mut self, ctx: &mut ModeContext<'_>) {
        ctx.reset_overlays();
        ctx.data.remove::<Motion>();
    }

    // the pending resolution would go stale under the end-of-turn commit
    fn accepts_turn_end(&self) -> bool {
        false
    }

    fn on_frame(&mut self, ctx: &mut ModeContext<'_>, dt: Duration) {
        let mut budget = dt;
        while let Some(step) = self.steps.front_mut() {
            let carry = step.tween.overshoot(budget);
            step.tween.advance(budget);
            Self::publish(ctx, step);
            if !step.tween.is_done() {
                return;
            }
            self.steps.pop_front();
            budget = carry;
        }
        self.finish(ctx);
    }
}
