//! The engine: walks a program against a stream of input events.

use crate::core::{Action, BufferRule, EventRule, Program, ReturnTarget};
use crate::engine::frame::Frame;
use crate::engine::host::HostTable;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// The rule actually applied to a transition: the matched event rule's
/// fields, possibly overridden field by field by a matching buffer rule.
struct AppliedRule<'p, A> {
    target: Option<&'p str>,
    propagate: bool,
    action: Option<&'p Action<A>>,
    delay_finish: bool,
    returns: Option<&'p ReturnTarget>,
    error_action: Option<&'p Action<A>>,
    keep_origin: bool,
    merge_buffer: bool,
}

impl<'p, A> AppliedRule<'p, A> {
    fn from_rule<T>(rule: &'p EventRule<T, A>) -> Self {
        Self {
            target: rule.target.as_deref(),
            propagate: rule.propagate,
            action: rule.action.as_ref(),
            delay_finish: rule.delay_finish,
            returns: rule.returns.as_ref(),
            error_action: rule.error_action.as_ref(),
            keep_origin: rule.keep_origin,
            merge_buffer: rule.merge_buffer,
        }
    }

    fn merge(&mut self, over: &'p BufferRule<A>) {
        if let Some(target) = &over.target {
            self.target = Some(target.as_str());
        }
        if let Some(value) = over.propagate {
            self.propagate = value;
        }
        if let Some(action) = &over.action {
            self.action = Some(action);
        }
        if let Some(value) = over.delay_finish {
            self.delay_finish = value;
        }
        if let Some(returns) = &over.returns {
            self.returns = Some(returns);
        }
        if let Some(action) = &over.error_action {
            self.error_action = Some(action);
        }
        if let Some(value) = over.keep_origin {
            self.keep_origin = value;
        }
        if let Some(value) = over.merge_buffer {
            self.merge_buffer = value;
        }
    }
}

/// Incremental interpreter for a [`Program`].
///
/// The engine consumes one input symbol at a time through
/// [`push_event`](Self::push_event) and invokes host methods as its only
/// side effect. It owns nothing but its frame stack; the text being
/// classified, the meaning of contexts, and the effects of actions all
/// belong to the caller.
///
/// Type parameters: `T` is the input symbol (string-like), `C` the opaque
/// per-event context forwarded to host methods, `A` the action argument
/// payload.
///
/// The engine is single threaded and fully synchronous. Host methods must
/// not call back into the same engine, and events must be delivered in
/// document order.
pub struct Engine<T, C, A> {
    pub(crate) program: Arc<Program<T, A>>,
    host: HostTable<C, A>,
    pub(crate) stack: Vec<Frame<C>>,
}

impl<T, C, A> Engine<T, C, A> {
    /// Create an engine over a program and a host-method table, starting
    /// in the program's initial state.
    pub fn new(program: Program<T, A>, host: HostTable<C, A>) -> Self {
        Self::from_shared(Arc::new(program), host)
    }

    /// Create an engine over an already shared program. Lets several
    /// engines interpret the same program without cloning it.
    pub fn from_shared(program: Arc<Program<T, A>>, host: HostTable<C, A>) -> Self {
        let mut engine = Self {
            program,
            host,
            stack: Vec::new(),
        };
        engine.reset();
        engine
    }

    /// Discard all frames and return to a single bottom frame in the
    /// program's initial state. No host side effects. Callable at any
    /// time, including mid-stream.
    pub fn reset(&mut self) {
        let initial = self.program.initial().to_owned();
        let mut frame = Frame::new(initial);
        if self.program.expect_state(&frame.state).buffers() {
            frame.buffer = Some(String::new());
        }
        self.stack.clear();
        self.stack.push(frame);
        debug!(target: "lexion::engine", state = %self.program.initial(), "reset to initial state");
    }

    /// Current stack depth; 1 means no sub-program is active.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Name of the state the top frame is in.
    pub fn current_state(&self) -> &str {
        &self.top().state
    }

    /// The interpreted program.
    pub fn program(&self) -> &Program<T, A> {
        &self.program
    }

    fn top(&self) -> &Frame<C> {
        self.stack.last().expect("frame stack is never empty")
    }

    fn top_mut(&mut self) -> &mut Frame<C> {
        self.stack.last_mut().expect("frame stack is never empty")
    }
}

impl<T, C, A> Engine<T, C, A>
where
    T: AsRef<str> + PartialEq + fmt::Debug,
    C: Clone,
    A: Clone,
{
    /// Process one input symbol with its caller-owned context.
    ///
    /// Runs the matching loop against the top frame, applies at most one
    /// transition per iteration (re-entering the loop only when the
    /// applied rule propagates), dispatches trigger or error actions as
    /// they resolve, and ends with exactly one finishing action: the one
    /// armed by a delay rule, or the finishing action of whatever state is
    /// current once the loop exits. The finishing action runs on every
    /// call, matched or not; that is how each symbol gets its default
    /// classification.
    ///
    /// Panics if a taken transition targets a state the program does not
    /// define (a program-authoring error).
    pub fn push_event(&mut self, event: T, ctx: C) {
        let program = Arc::clone(&self.program);
        // Armed by a delay rule. `Some(None)` means the state that armed
        // it had no finishing action, so the call must end silently.
        let mut delayed_finish: Option<Option<Action<A>>> = None;

        loop {
            let state_name = self.top().state.clone();
            let state_def = program.expect_state(&state_name);

            let Some(rule) = state_def.rules.iter().find(|r| r.when.matches(&event)) else {
                break;
            };

            let wants_return = rule.returns.is_some();
            let switches =
                wants_return || rule.target.as_deref().is_some_and(|t| t != state_name);

            if !switches {
                // Matched in place: the run continues.
                self.absorb_in_place(state_def.buffers(), &event, &ctx);
                if let Some(action) = &rule.action {
                    self.host.run(action, &ctx, None, None);
                }
                break;
            }

            // Leaving the state: the finished run's buffer gets one chance
            // to reclassify the transition before it is applied.
            let mut applied = AppliedRule::from_rule(rule);
            let mut action_buffer: Option<String> = None;
            let mut alt_ctx: Option<C> = None;
            if let (Some(buffer_rules), Some(buf)) = (&state_def.buffer, &self.top().buffer) {
                if let Some(overriding) = buffer_rules.iter().find(|br| br.when.matches(buf)) {
                    applied.merge(overriding);
                }
                action_buffer = Some(buf.clone());
                alt_ctx = self.top().origin.clone();
            }

            if applied.delay_finish {
                delayed_finish = Some(state_def.finish.clone());
            }

            let mut mismatch = false;
            let mut transitioned = false;

            if let Some(returns) = applied.returns {
                if self.stack.len() > 1 {
                    let popped = self.stack.pop().expect("frame stack is never empty");
                    if let ReturnTarget::Expect(expected) = returns {
                        if self.top().entered_state.as_deref() != Some(expected.as_str()) {
                            mismatch = true;
                            trace!(
                                target: "lexion::engine",
                                expected = %expected,
                                entered = self.top().entered_state.as_deref().unwrap_or("<none>"),
                                "return target mismatch"
                            );
                        }
                    }
                    let resumed_state = self.top().state.clone();
                    let resumed_buffers = program.expect_state(&resumed_state).buffers();
                    let frame = self.top_mut();
                    alt_ctx = frame.entered_ctx.take();
                    frame.entered_state = None;
                    frame.shift_ctx(ctx.clone());
                    if !applied.keep_origin {
                        frame.origin = Some(ctx.clone());
                    }
                    frame.buffer = if resumed_buffers {
                        let mut fresh = String::new();
                        if applied.merge_buffer {
                            if let Some(trailing) = &popped.buffer {
                                fresh.push_str(trailing);
                            }
                        }
                        fresh.push_str(event.as_ref());
                        Some(fresh)
                    } else {
                        None
                    };
                    transitioned = true;
                } else {
                    // Nothing to pop: same error route as a wrong-state
                    // return. The rule's own target transition, if any,
                    // still completes.
                    mismatch = true;
                    trace!(target: "lexion::engine", state = %state_name, "return with no sub-program active");
                    if let Some(target) = applied.target {
                        self.switch_within_frame(&program, target, applied.keep_origin, &event, &ctx);
                        transitioned = true;
                    } else {
                        self.absorb_in_place(state_def.buffers(), &event, &ctx);
                    }
                }
            } else {
                let target = applied
                    .target
                    .expect("a switching rule without a return carries a target");
                if program.expect_state(target).is_sub_program {
                    self.enter_sub_program(&program, target, applied.keep_origin, &event, &ctx);
                } else {
                    self.switch_within_frame(&program, target, applied.keep_origin, &event, &ctx);
                }
                transitioned = true;
            }

            let action = if mismatch {
                applied.error_action
            } else {
                applied.action
            };
            if let Some(action) = action {
                self.host
                    .run(action, &ctx, alt_ctx.as_ref(), action_buffer.as_deref());
            }

            trace!(
                target: "lexion::engine",
                event = ?event,
                from = %state_name,
                to = %self.top().state,
                depth = self.stack.len(),
                mismatch,
                "rule applied"
            );

            if !(transitioned && applied.propagate) {
                break;
            }
        }

        let finish = match delayed_finish {
            Some(armed) => armed,
            None => program.expect_state(&self.top().state).finish.clone(),
        };
        if let Some(action) = &finish {
            self.host.run(action, &ctx, None, None);
        }
    }

    /// Absorb the event without leaving the state: extend the buffer and
    /// rotate the contexts.
    fn absorb_in_place(&mut self, buffering: bool, event: &T, ctx: &C) {
        let frame = self.top_mut();
        if buffering {
            frame
                .buffer
                .get_or_insert_with(String::new)
                .push_str(event.as_ref());
        }
        frame.shift_ctx(ctx.clone());
    }

    /// In-frame state switch: new state, fresh buffer seeded with the
    /// event if the destination buffers.
    fn switch_within_frame(
        &mut self,
        program: &Program<T, A>,
        target: &str,
        keep_origin: bool,
        event: &T,
        ctx: &C,
    ) {
        let dest_buffers = program.expect_state(target).buffers();
        let frame = self.top_mut();
        frame.state = target.to_owned();
        frame.shift_ctx(ctx.clone());
        if !keep_origin {
            frame.origin = Some(ctx.clone());
        }
        frame.buffer = dest_buffers.then(|| event.as_ref().to_owned());
    }

    /// Push a new frame for a sub-program state, recording the entry on
    /// the frame below for later return validation.
    fn enter_sub_program(
        &mut self,
        program: &Program<T, A>,
        target: &str,
        keep_origin: bool,
        event: &T,
        ctx: &C,
    ) {
        let dest_buffers = program.expect_state(target).buffers();
        let origin = if keep_origin {
            self.top().origin.clone()
        } else {
            Some(ctx.clone())
        };

        let parent = self.top_mut();
        parent.entered_state = Some(target.to_owned());
        parent.entered_ctx = Some(ctx.clone());

        let mut frame = Frame::new(target.to_owned());
        frame.ctx = Some(ctx.clone());
        frame.origin = origin;
        if dest_buffers {
            frame.buffer = Some(event.as_ref().to_owned());
        }
        self.stack.push(frame);
    }
}

impl<T, C, A> fmt::Debug for Engine<T, C, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.top().state)
            .field("depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}
