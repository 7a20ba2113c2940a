//! Whole-program validation.
//!
//! The engine deliberately fails fast at runtime when a taken transition
//! names an undefined state. This pass lets a caller find every such
//! problem up front instead: it walks the whole program and accumulates
//! all violations rather than stopping at the first one.

mod violations;

pub use violations::ProgramViolation;

use crate::core::{Program, ReturnTarget};
use std::collections::{HashMap, HashSet, VecDeque};

/// Check every cross-reference in a program.
///
/// Returns all violations found, in a stable order (states sorted by
/// name, rules in list order). A program that passes this check can never
/// hit the engine's undefined-state panic.
///
/// # Example
///
/// ```rust
/// use lexion::builder::{ProgramBuilder, RuleBuilder, StateBuilder};
/// use lexion::core::Predicate;
/// use lexion::validate;
///
/// let program = ProgramBuilder::<String, u8>::new()
///     .initial("plain")
///     .state(
///         StateBuilder::new("plain")
///             .rule(RuleBuilder::when(Predicate::always()).to("missing")),
///     )
///     .build()
///     .unwrap();
///
/// let violations = validate::check(&program).unwrap_err();
/// assert_eq!(violations.len(), 1);
/// ```
pub fn check<T, A>(program: &Program<T, A>) -> Result<(), Vec<ProgramViolation>> {
    let mut violations = Vec::new();

    let mut names: Vec<&str> = program.states().map(|(name, _)| name).collect();
    names.sort_unstable();

    for &name in &names {
        let def = program
            .state(name)
            .expect("iterated state names are defined");

        for (index, rule) in def.rules.iter().enumerate() {
            if let Some(target) = &rule.target {
                if program.state(target).is_none() {
                    violations.push(ProgramViolation::DanglingTarget {
                        state: name.to_string(),
                        rule: index,
                        target: target.clone(),
                    });
                }
            }
            if let Some(ReturnTarget::Expect(target)) = &rule.returns {
                if program.state(target).is_none() {
                    violations.push(ProgramViolation::DanglingReturnTarget {
                        state: name.to_string(),
                        rule: index,
                        target: target.clone(),
                    });
                }
            }
        }

        for (index, rule) in def.buffer.iter().flatten().enumerate() {
            if let Some(target) = &rule.target {
                if program.state(target).is_none() {
                    violations.push(ProgramViolation::DanglingBufferTarget {
                        state: name.to_string(),
                        rule: index,
                        target: target.clone(),
                    });
                }
            }
        }
    }

    let reachable = reachable_states(program);
    for &name in &names {
        if !reachable.contains(name) {
            violations.push(ProgramViolation::Unreachable {
                state: name.to_string(),
                initial: program.initial().to_string(),
            });
        }
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// States reachable from the initial state by following event-rule
/// targets and buffer-rule target overrides.
fn reachable_states<T, A>(program: &Program<T, A>) -> HashSet<&str> {
    let defs: HashMap<&str, _> = program.states().collect();

    let mut reachable = HashSet::new();
    let mut queue = VecDeque::new();
    if defs.contains_key(program.initial()) {
        reachable.insert(program.initial());
        queue.push_back(program.initial());
    }

    while let Some(name) = queue.pop_front() {
        let def = defs[name];
        let rule_targets = def.rules.iter().filter_map(|r| r.target.as_deref());
        let buffer_targets = def
            .buffer
            .iter()
            .flatten()
            .filter_map(|r| r.target.as_deref());
        for target in rule_targets.chain(buffer_targets) {
            if defs.contains_key(target) && reachable.insert(target) {
                queue.push_back(target);
            }
        }
    }

    reachable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BufferRuleBuilder, ProgramBuilder, RuleBuilder, StateBuilder};
    use crate::core::Predicate;

    type P = Program<String, u8>;

    fn two_state_program() -> P {
        ProgramBuilder::new()
            .initial("plain")
            .state(
                StateBuilder::new("plain")
                    .rule(RuleBuilder::when(Predicate::always()).to("word")),
            )
            .state(
                StateBuilder::new("word")
                    .rule(RuleBuilder::when(Predicate::always()).to("plain")),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn well_formed_program_passes() {
        assert!(check(&two_state_program()).is_ok());
    }

    #[test]
    fn dangling_rule_target_is_reported() {
        let program: P = ProgramBuilder::new()
            .initial("plain")
            .state(
                StateBuilder::new("plain")
                    .rule(RuleBuilder::when(Predicate::always()).to("ghost")),
            )
            .build()
            .unwrap();

        let violations = check(&program).unwrap_err();
        assert_eq!(
            violations,
            vec![ProgramViolation::DanglingTarget {
                state: "plain".to_string(),
                rule: 0,
                target: "ghost".to_string(),
            }]
        );
    }

    #[test]
    fn all_violations_accumulate() {
        let program: P = ProgramBuilder::new()
            .initial("plain")
            .state(
                StateBuilder::new("plain")
                    .buffer_rule(
                        BufferRuleBuilder::when(Predicate::always()).to("nowhere"),
                    )
                    .rule(RuleBuilder::when(Predicate::always()).to("ghost"))
                    .rule(
                        RuleBuilder::when(Predicate::literal("x".to_string()))
                            .returns_expecting("phantom"),
                    ),
            )
            .state(StateBuilder::new("island"))
            .build()
            .unwrap();

        let violations = check(&program).unwrap_err();
        assert_eq!(violations.len(), 4);
        assert!(violations.iter().any(|v| matches!(
            v,
            ProgramViolation::DanglingTarget { target, .. } if target == "ghost"
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            ProgramViolation::DanglingReturnTarget { target, .. } if target == "phantom"
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            ProgramViolation::DanglingBufferTarget { target, .. } if target == "nowhere"
        )));
        assert!(violations.iter().any(|v| matches!(
            v,
            ProgramViolation::Unreachable { state, .. } if state == "island"
        )));
    }

    #[test]
    fn buffer_override_targets_count_as_reachable() {
        let program: P = ProgramBuilder::new()
            .initial("word")
            .state(
                StateBuilder::new("word")
                    .buffer_rule(
                        BufferRuleBuilder::when(Predicate::always()).to("keyword"),
                    )
                    .rule(RuleBuilder::when(Predicate::always()).to("word")),
            )
            .state(
                StateBuilder::new("keyword")
                    .rule(RuleBuilder::when(Predicate::always()).to("word")),
            )
            .build()
            .unwrap();

        assert!(check(&program).is_ok());
    }

    #[test]
    fn violations_display_names_the_problem() {
        let violation = ProgramViolation::DanglingTarget {
            state: "plain".to_string(),
            rule: 2,
            target: "ghost".to_string(),
        };
        let message = violation.to_string();
        assert!(message.contains("plain"));
        assert!(message.contains("#2"));
        assert!(message.contains("ghost"));
    }
}
