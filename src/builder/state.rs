//! Builders for states and their rules.

use crate::core::{Action, BufferRule, EventRule, Predicate, ReturnTarget, StateDef, StateName};

/// Builder for one event rule, with a fluent API.
///
/// # Example
///
/// ```rust
/// use lexion::builder::RuleBuilder;
/// use lexion::core::Predicate;
///
/// let rule = RuleBuilder::<String, u8>::when(Predicate::literal("{".to_string()))
///     .to("block")
///     .propagate()
///     .build();
/// assert_eq!(rule.target.as_deref(), Some("block"));
/// assert!(rule.propagate);
/// ```
pub struct RuleBuilder<T, A> {
    rule: EventRule<T, A>,
}

impl<T, A> RuleBuilder<T, A> {
    /// Start a rule from its predicate (the only required part).
    pub fn when(predicate: Predicate<T>) -> Self {
        Self {
            rule: EventRule::new(predicate),
        }
    }

    /// Transition to the named state when the rule fires.
    pub fn to(mut self, state: impl Into<StateName>) -> Self {
        self.rule.target = Some(state.into());
        self
    }

    /// Re-evaluate the same event against the destination state.
    pub fn propagate(mut self) -> Self {
        self.rule.propagate = true;
        self
    }

    /// Action to execute when the rule fires.
    pub fn action(mut self, action: impl Into<Action<A>>) -> Self {
        self.rule.action = Some(action.into());
        self
    }

    /// Run the finishing action of the state being left instead of the
    /// destination's.
    pub fn delay_finish(mut self) -> Self {
        self.rule.delay_finish = true;
        self
    }

    /// Pop the active sub-program frame unconditionally.
    pub fn returns(mut self) -> Self {
        self.rule.returns = Some(ReturnTarget::Any);
        self
    }

    /// Pop the active sub-program frame and assert it was entered through
    /// the named state.
    pub fn returns_expecting(mut self, state: impl Into<StateName>) -> Self {
        self.rule.returns = Some(ReturnTarget::Expect(state.into()));
        self
    }

    /// Action to execute instead of the trigger action on a return mismatch.
    pub fn error_action(mut self, action: impl Into<Action<A>>) -> Self {
        self.rule.error_action = Some(action.into());
        self
    }

    /// Keep the frame's origin context across the transition.
    pub fn keep_origin(mut self) -> Self {
        self.rule.keep_origin = true;
        self
    }

    /// When returning, carry the popped frame's trailing buffer into the
    /// parent's buffer.
    pub fn merge_buffer(mut self) -> Self {
        self.rule.merge_buffer = true;
        self
    }

    /// Finish the rule.
    pub fn build(self) -> EventRule<T, A> {
        self.rule
    }
}

/// Builder for one buffer rule. Setters record overrides; anything left
/// unset falls through to the triggering event rule's field.
pub struct BufferRuleBuilder<A> {
    rule: BufferRule<A>,
}

impl<A> BufferRuleBuilder<A> {
    /// Start an override rule from its predicate over the buffer text.
    pub fn when(predicate: Predicate<String>) -> Self {
        Self {
            rule: BufferRule::new(predicate),
        }
    }

    /// Override the destination state.
    pub fn to(mut self, state: impl Into<StateName>) -> Self {
        self.rule.target = Some(state.into());
        self
    }

    /// Override the propagate flag.
    pub fn propagate(mut self, value: bool) -> Self {
        self.rule.propagate = Some(value);
        self
    }

    /// Override the trigger action.
    pub fn action(mut self, action: impl Into<Action<A>>) -> Self {
        self.rule.action = Some(action.into());
        self
    }

    /// Override the delay-finish flag.
    pub fn delay_finish(mut self, value: bool) -> Self {
        self.rule.delay_finish = Some(value);
        self
    }

    /// Override the return request.
    pub fn returns(mut self, target: ReturnTarget) -> Self {
        self.rule.returns = Some(target);
        self
    }

    /// Override the error action.
    pub fn error_action(mut self, action: impl Into<Action<A>>) -> Self {
        self.rule.error_action = Some(action.into());
        self
    }

    /// Override the keep-origin flag.
    pub fn keep_origin(mut self, value: bool) -> Self {
        self.rule.keep_origin = Some(value);
        self
    }

    /// Override the merge-buffer flag.
    pub fn merge_buffer(mut self, value: bool) -> Self {
        self.rule.merge_buffer = Some(value);
        self
    }

    /// Finish the override rule.
    pub fn build(self) -> BufferRule<A> {
        self.rule
    }
}

/// Builder for one named state.
pub struct StateBuilder<T, A> {
    name: StateName,
    def: StateDef<T, A>,
}

impl<T, A> StateBuilder<T, A> {
    /// Start a state with the given name.
    pub fn new(name: impl Into<StateName>) -> Self {
        Self {
            name: name.into(),
            def: StateDef::new(),
        }
    }

    /// Finishing action, executed once per processed event while this state
    /// is current at the end of the call.
    pub fn finish(mut self, action: impl Into<Action<A>>) -> Self {
        self.def.finish = Some(action.into());
        self
    }

    /// Entering this state pushes a new frame.
    pub fn sub_program(mut self) -> Self {
        self.def.is_sub_program = true;
        self
    }

    /// Accumulate a buffer in this state, without any reclassifying rules.
    pub fn buffered(mut self) -> Self {
        self.def.buffer.get_or_insert_with(Vec::new);
        self
    }

    /// Add a buffer rule; implies the state buffers.
    pub fn buffer_rule(mut self, rule: BufferRuleBuilder<A>) -> Self {
        self.def
            .buffer
            .get_or_insert_with(Vec::new)
            .push(rule.build());
        self
    }

    /// Add an event rule. Rules keep their insertion order; the first match
    /// wins.
    pub fn rule(mut self, rule: RuleBuilder<T, A>) -> Self {
        self.def.rules.push(rule.build());
        self
    }

    pub(crate) fn into_parts(self) -> (StateName, StateDef<T, A>) {
        (self.name, self.def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_builder_sets_all_fields() {
        let rule = RuleBuilder::<String, u8>::when(Predicate::always())
            .to("next")
            .propagate()
            .delay_finish()
            .keep_origin()
            .merge_buffer()
            .returns_expecting("block")
            .build();

        assert_eq!(rule.target.as_deref(), Some("next"));
        assert!(rule.propagate);
        assert!(rule.delay_finish);
        assert!(rule.keep_origin);
        assert!(rule.merge_buffer);
        assert_eq!(
            rule.returns,
            Some(ReturnTarget::Expect("block".to_string()))
        );
    }

    #[test]
    fn buffer_rule_builder_records_overrides_only() {
        let rule = BufferRuleBuilder::<u8>::when(Predicate::always())
            .propagate(false)
            .to("reclassified")
            .build();

        assert_eq!(rule.target.as_deref(), Some("reclassified"));
        assert_eq!(rule.propagate, Some(false));
        assert!(rule.delay_finish.is_none());
        assert!(rule.keep_origin.is_none());
    }

    #[test]
    fn state_builder_collects_rules_in_order() {
        let (name, def) = StateBuilder::<String, u8>::new("word")
            .rule(RuleBuilder::when(Predicate::literal("a".to_string())))
            .rule(RuleBuilder::when(Predicate::always()).to("plain"))
            .into_parts();

        assert_eq!(name, "word");
        assert_eq!(def.rules.len(), 2);
        assert!(def.rules[0].target.is_none());
        assert_eq!(def.rules[1].target.as_deref(), Some("plain"));
    }

    #[test]
    fn buffer_rule_implies_buffering() {
        let (_, def) = StateBuilder::<String, u8>::new("word")
            .buffer_rule(BufferRuleBuilder::when(Predicate::always()))
            .into_parts();
        assert!(def.buffers());
        assert_eq!(def.buffer.as_ref().unwrap().len(), 1);
    }

    #[test]
    fn buffered_without_rules_still_buffers() {
        let (_, def) = StateBuilder::<String, u8>::new("word").buffered().into_parts();
        assert!(def.buffers());
        assert!(def.buffer.as_ref().unwrap().is_empty());
    }
}
