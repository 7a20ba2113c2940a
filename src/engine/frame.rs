//! One level of the engine's runtime stack.

use crate::core::StateName;

/// Runtime record for one active (possibly nested) sub-program.
///
/// Frames live in a plain vector owned by the engine; pushing a
/// sub-program frame and popping it on return are the only structural
/// mutations. The bottom frame always exists and holds the program's
/// outermost run.
#[derive(Clone, Debug)]
pub struct Frame<C> {
    /// Current state in this frame.
    pub(crate) state: StateName,
    /// Accumulated text, present exactly while the current state buffers.
    pub(crate) buffer: Option<String>,
    /// Context of the most recent event processed in this frame.
    pub(crate) ctx: Option<C>,
    /// Context of the event before that.
    pub(crate) prev_ctx: Option<C>,
    /// Context captured when the current run began; span-painting actions
    /// use it to reach back to the run's first symbol.
    pub(crate) origin: Option<C>,
    /// Sub-program state this frame last entered, kept for validating the
    /// matching return.
    pub(crate) entered_state: Option<StateName>,
    /// Context at the moment that sub-program was entered.
    pub(crate) entered_ctx: Option<C>,
}

impl<C> Frame<C> {
    pub(crate) fn new(state: StateName) -> Self {
        Self {
            state,
            buffer: None,
            ctx: None,
            prev_ctx: None,
            origin: None,
            entered_state: None,
            entered_ctx: None,
        }
    }

    /// Name of the state this frame is in.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// Accumulated buffer text, if the current state buffers.
    pub fn buffer(&self) -> Option<&str> {
        self.buffer.as_deref()
    }

    /// Record one more processed event: the current context becomes the
    /// previous one.
    pub(crate) fn shift_ctx(&mut self, ctx: C) {
        self.prev_ctx = self.ctx.take();
        self.ctx = Some(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_frame_is_empty() {
        let frame: Frame<usize> = Frame::new("plain".to_string());
        assert_eq!(frame.state(), "plain");
        assert!(frame.buffer().is_none());
        assert!(frame.ctx.is_none());
        assert!(frame.prev_ctx.is_none());
        assert!(frame.origin.is_none());
    }

    #[test]
    fn shift_ctx_rotates_contexts() {
        let mut frame: Frame<usize> = Frame::new("plain".to_string());
        frame.shift_ctx(1);
        assert_eq!(frame.ctx, Some(1));
        assert_eq!(frame.prev_ctx, None);

        frame.shift_ctx(2);
        assert_eq!(frame.ctx, Some(2));
        assert_eq!(frame.prev_ctx, Some(1));
    }
}
