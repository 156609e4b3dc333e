use std::time::Duration;

use game_core::Cell;
use tracing::{debug, warn};

use super::{Mode, ModeContext, Payload, Transition};
use crate::error::Result;

/// Ordered stack of modes; only the top receives input.
///
/// The first mode pushed is the bootstrap mode and can never be popped.
/// Underflowing pops and swaps are logged and ignored so the UI stays
/// interactive even when a caller's bookkeeping is wrong.
#[derive(Default)]
pub struct ModeStack {
    modes: Vec<Box<dyn Mode>>,
}

impl ModeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }

    pub fn active_name(&self) -> Option<&'static str> {
        self.modes.last().map(|mode| mode.name())
    }

    /// Mode names from bottom to top.
    pub fn names(&self) -> Vec<&'static str> {
        self.modes.iter().map(|mode| mode.name()).collect()
    }

    /// Topmost mode that refuses to let the turn end, if any.
    pub fn turn_end_blocker(&self) -> Option<&'static str> {
        self.modes
            .iter()
            .rev()
            .find(|mode| !mode.accepts_turn_end())
            .map(|mode| mode.name())
    }

    pub fn push(&mut self, ctx: &mut ModeContext<'_>, mode: Box<dyn Mode>) {
        self.apply_push(ctx, mode);
        self.settle(ctx);
    }

    /// Returns `false` when the pop was refused.
    pub fn pop(&mut self, ctx: &mut ModeContext<'_>, payload: Option<Payload>) -> bool {
        let popped = self.apply_pop(ctx, payload);
        self.settle(ctx);
        popped
    }

    /// Returns `false` when the swap was refused.
    pub fn swap(&mut self, ctx: &mut ModeContext<'_>, mode: Box<dyn Mode>) -> bool {
        let swapped = self.apply_swap(ctx, mode);
        self.settle(ctx);
        swapped
    }

    /// Forwards a click to the active mode.
    ///
    /// If the mode fails, transitions it queued before failing are dropped
    /// along with the rest of its work.
    pub fn dispatch_tile_clicked(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) -> Result<()> {
        let Some(top) = self.modes.last_mut() else {
            return Ok(());
        };

        if let Err(error) = top.on_tile_clicked(ctx, cell) {
            let dropped = ctx.discard_transitions();
            debug!(
                target: "frontend::mode",
                mode = top.name(),
                %cell,
                dropped,
                %error,
                "click rejected"
            );
            return Err(error);
        }

        self.settle(ctx);
        Ok(())
    }

    pub fn dispatch_tile_entered(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) {
        if let Some(top) = self.modes.last_mut() {
            top.on_tile_entered(ctx, cell);
            self.settle(ctx);
        }
    }

    pub fn dispatch_tile_exited(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) {
        if let Some(top) = self.modes.last_mut() {
            top.on_tile_exited(ctx, cell);
            self.settle(ctx);
        }
    }

    pub fn dispatch_frame(&mut self, ctx: &mut ModeContext<'_>, dt: Duration) {
        if let Some(top) = self.modes.last_mut() {
            top.on_frame(ctx, dt);
            self.settle(ctx);
        }
    }

    /// Applies queued transitions first-in first-out, including any queued
    /// by the hooks those transitions run.
    pub fn settle(&mut self, ctx: &mut ModeContext<'_>) {
        while let Some(transition) = ctx.next_transition() {
            debug!(
                target: "frontend::mode",
                kind = transition.kind(),
                "applying queued transition"
            );
            match transition {
                Transition::Push(mode) => self.apply_push(ctx, mode),
                Transition::Pop(payload) => {
                    self.apply_pop(ctx, payload);
                }
                Transition::Swap(mode) => {
                    self.apply_swap(ctx, mode);
                }
            }
        }
    }

    fn apply_push(&mut self, ctx: &mut ModeContext<'_>, mode: Box<dyn Mode>) {
        if let Some(top) = self.modes.last_mut() {
            top.on_deactivated(ctx);
        }
        self.enter(ctx, mode);
    }

    fn apply_pop(&mut self, ctx: &mut ModeContext<'_>, payload: Option<Payload>) -> bool {
        if self.modes.len() < 2 {
            warn!(
                target: "frontend::mode",
                depth = self.modes.len(),
                "pop refused: the bootstrap mode cannot be removed"
            );
            return false;
        }

        self.leave(ctx);
        if let Some(top) = self.modes.last_mut() {
            debug!(target: "frontend::mode", mode = top.name(), "reactivated");
            top.on_activated(ctx, payload);
        }
        true
    }

    fn apply_swap(&mut self, ctx: &mut ModeContext<'_>, mode: Box<dyn Mode>) -> bool {
        if self.modes.is_empty() {
            warn!(
                target: "frontend::mode",
                incoming = mode.name(),
                "swap refused: stack is empty"
            );
            return false;
        }

        self.leave(ctx);
        self.enter(ctx, mode);
        true
    }

    fn enter(&mut self, ctx: &mut ModeContext<'_>, mode: Box<dyn Mode>) {
        debug!(
            target: "frontend::mode",
            mode = mode.name(),
            depth = self.modes.len() + 1,
            "pushed"
        );
        self.modes.push(mode);
        if let Some(top) = self.modes.last_mut() {
            top.on_pushed(ctx);
            top.on_activated(ctx, None);
        }
    }

    fn leave(&mut self, ctx: &mut ModeContext<'_>) {
        if let Some(mut top) = self.modes.pop() {
            top.on_deactivated(ctx);
            top.on_popped(ctx);
            debug!(target: "frontend::mode", mode = top.name(), depth = self.modes.len(), "popped");
        }
    }
}

impl std::fmt::Debug for ModeStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::error::InteractionError;
    use crate::test_support::Harness;
    use proptest::prelude::*;

    type Log = Arc<Mutex<Vec<String>>>;

    /// Mode that records every hook call as `"<name>:<hook>"`.
    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Recorder {
        fn boxed(name: &'static str, log: &Log) -> Box<dyn Mode> {
            Box::new(Self {
                name,
                log: Arc::clone(log),
            })
        }

        fn record(&self, hook: &str) {
            self.log.lock().unwrap().push(format!("{}:{hook}", self.name));
        }
    }

    impl Mode for Recorder {
        fn name(&self) -> &'static str {
            self.name
        }

        fn on_pushed(&mut self, _ctx: &mut ModeContext<'_>) {
            self.record("pushed");
        }

        fn on_popped(&mut self, _ctx: &mut ModeContext<'_>) {
            self.record("popped");
        }

        fn on_activated(&mut self, _ctx: &mut ModeContext<'_>, payload: Option<Payload>) {
            match payload.and_then(|p| p.downcast::<u32>().ok()) {
                Some(value) => self.record(&format!("activated({value})")),
                None => self.record("activated"),
            }
        }

        fn on_deactivated(&mut self, _ctx: &mut ModeContext<'_>) {
            self.record("deactivated");
        }

        fn on_tile_clicked(&mut self, ctx: &mut ModeContext<'_>, cell: Cell) -> Result<()> {
            self.record("clicked");
            if cell == Cell::ORIGIN {
                ctx.pop(None);
                return Err(InteractionError::InvalidTarget {
                    mode: self.name,
                    cell,
                });
            }
            Ok(())
        }
    }

    fn drain(log: &Log) -> Vec<String> {
        std::mem::take(&mut *log.lock().unwrap())
    }

    #[test]
    fn push_deactivates_old_top_before_new_one_arrives() {
        let log = Log::default();
        let mut harness = Harness::default();
        let mut stack = ModeStack::new();

        harness.run(|ctx| {
            stack.push(ctx, Recorder::boxed("a", &log));
            stack.push(ctx, Recorder::boxed("b", &log));
        });

        assert_eq!(
            drain(&log),
            ["a:pushed", "a:activated", "a:deactivated", "b:pushed", "b:activated"]
        );
        assert_eq!(stack.names(), ["a", "b"]);
    }

    #[test]
    fn pop_hands_payload_to_revealed_mode() {
        let log = Log::default();
        let mut harness = Harness::default();
        let mut stack = ModeStack::new();

        harness.run(|ctx| {
            stack.push(ctx, Recorder::boxed("a", &log));
            stack.push(ctx, Recorder::boxed("b", &log));
            drain(&log);
            assert!(stack.pop(ctx, Some(Box::new(7u32))));
        });

        assert_eq!(drain(&log), ["b:deactivated", "b:popped", "a:activated(7)"]);
        assert_eq!(stack.active_name(), Some("a"));
    }

    #[test]
    fn swap_does_not_reactivate_the_mode_underneath() {
        let log = Log::default();
        let mut harness = Harness::default();
        let mut stack = ModeStack::new();

        harness.run(|ctx| {
            stack.push(ctx, Recorder::boxed("a", &log));
            stack.push(ctx, Recorder::boxed("b", &log));
            drain(&log);
            assert!(stack.swap(ctx, Recorder::boxed("c", &log)));
        });

        assert_eq!(
            drain(&log),
            ["b:deactivated", "b:popped", "c:pushed", "c:activated"]
        );
        assert_eq!(stack.names(), ["a", "c"]);
    }

    #[test]
    fn underflow_is_ignored() {
        let log = Log::default();
        let mut harness = Harness::default();
        let mut stack = ModeStack::new();

        harness.run(|ctx| {
            assert!(!stack.pop(ctx, None));
            assert!(!stack.swap(ctx, Recorder::boxed("ghost", &log)));
            stack.push(ctx, Recorder::boxed("root", &log));
            drain(&log);
            assert!(!stack.pop(ctx, None));
        });

        assert!(drain(&log).is_empty());
        assert_eq!(stack.names(), ["root"]);
    }

    #[test]
    fn failed_click_drops_queued_transitions() {
        let log = Log::default();
        let mut harness = Harness::default();
        let mut stack = ModeStack::new();

        let result = harness.run(|ctx| {
            stack.push(ctx, Recorder::boxed("a", &log));
            stack.push(ctx, Recorder::boxed("b", &log));
            drain(&log);
            stack.dispatch_tile_clicked(ctx, Cell::ORIGIN)
        });

        assert!(matches!(result, Err(InteractionError::InvalidTarget { .. })));
        assert_eq!(drain(&log), ["b:clicked"]);
        assert_eq!(stack.len(), 2);
    }

    #[test]
    fn dispatch_on_empty_stack_is_a_no_op() {
        let mut harness = Harness::default();
        let mut stack = ModeStack::new();
        harness.run(|ctx| {
            stack.dispatch_tile_entered(ctx, Cell::ORIGIN);
            stack.dispatch_tile_exited(ctx, Cell::ORIGIN);
            assert!(stack.dispatch_tile_clicked(ctx, Cell::ORIGIN).is_ok());
        });
        assert!(stack.is_empty());
    }

    /// Mode that pops itself as soon as it becomes active.
    struct Bounce;

    impl Mode for Bounce {
        fn name(&self) -> &'static str {
            "bounce"
        }

        fn on_activated(&mut self, ctx: &mut ModeContext<'_>, _payload: Option<Payload>) {
            ctx.pop(Some(Box::new(1u32)));
        }
    }

    #[test]
    fn transitions_queued_by_hooks_run_after_the_hook_returns() {
        let log = Log::default();
        let mut harness = Harness::default();
        let mut stack = ModeStack::new();

        harness.run(|ctx| {
            stack.push(ctx, Recorder::boxed("a", &log));
            drain(&log);
            stack.push(ctx, Box::new(Bounce));
        });

        assert_eq!(drain(&log), ["a:deactivated", "a:activated(1)"]);
        assert_eq!(stack.names(), ["a"]);
    }

    #[derive(Clone, Copy, Debug)]
    enum Op {
        Push,
        Pop,
        Swap,
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![Just(Op::Push), Just(Op::Pop), Just(Op::Swap)]
    }

    fn hook(entry: &str) -> &str {
        entry.split_once(':').map(|(_, hook)| hook).unwrap_or(entry)
    }

    proptest! {
        #[test]
        fn every_deactivation_is_followed_by_exactly_one_activation(
            ops in prop::collection::vec(op(), 0..40)
        ) {
            let log = Log::default();
            let mut harness = Harness::default();
            let mut stack = ModeStack::new();
            let names = ["m0", "m1", "m2", "m3", "m4", "m5", "m6", "m7"];

            harness.run(|ctx| stack.push(ctx, Recorder::boxed("root", &log)));
            drain(&log);

            for (i, op) in ops.into_iter().enumerate() {
                let name = names[i % names.len()];
                let depth = stack.len();
                harness.run(|ctx| match op {
                    Op::Push => stack.push(ctx, Recorder::boxed(name, &log)),
                    Op::Pop => {
                        stack.pop(ctx, None);
                    }
                    Op::Swap => {
                        stack.swap(ctx, Recorder::boxed(name, &log));
                    }
                });

                let entries = drain(&log);
                let deactivations = entries
                    .iter()
                    .filter(|e| hook(e) == "deactivated")
                    .count();
                let activations = entries
                    .iter()
                    .filter(|e| hook(e).starts_with("activated"))
                    .count();

                if matches!(op, Op::Pop) && depth < 2 {
                    prop_assert!(entries.is_empty());
                    prop_assert_eq!(stack.len(), depth);
                    continue;
                }

                prop_assert_eq!(deactivations, 1);
                prop_assert_eq!(activations, 1);
                let deactivated_at = entries.iter().position(|e| hook(e) == "deactivated");
                let activated_at = entries.iter().position(|e| hook(e).starts_with("activated"));
                prop_assert!(deactivated_at < activated_at);
                prop_assert_eq!(
                    entries.last().map(|e| hook(e).starts_with("activated")),
                    Some(true)
                );
                prop_assert!(stack.len() >= 1);
            }
        }
    }
}
