//! Property-based tests for the engine.
//!
//! These tests use proptest to verify properties hold across many
//! randomly generated event streams.

use lexion::action;
use lexion::builder::{BufferRuleBuilder, ProgramBuilder, RuleBuilder, StateBuilder};
use lexion::core::{Predicate, Program};
use lexion::engine::{Engine, HostTable, Invocation};
use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;
type DemoEngine = Engine<String, usize, &'static str>;

/// Host table whose methods append `name@ctx[~alt][:buffer][+arg..]`
/// trace lines, so whole invocation sequences can be compared.
fn recording_host(log: &Log) -> HostTable<usize, &'static str> {
    let mut host = HostTable::new();
    for name in ["paint", "kw", "close", "err"] {
        let sink = Rc::clone(log);
        host.register(name, move |inv: Invocation<'_, usize, &'static str>| {
            let mut entry = format!("{name}@{}", inv.ctx);
            if let Some(alt) = inv.alt {
                entry.push_str(&format!("~{alt}"));
            }
            if let Some(buffer) = inv.buffer {
                entry.push_str(&format!(":{buffer}"));
            }
            for arg in inv.args {
                entry.push_str(&format!("+{arg}"));
            }
            sink.borrow_mut().push(entry);
        });
    }
    host
}

/// Words with keyword reclassification, numbers, and nested brace
/// sub-programs with mismatch reporting.
fn demo_program() -> Program<String, &'static str> {
    ProgramBuilder::new()
        .initial("plain")
        .state(
            StateBuilder::new("plain")
                .finish(action!("paint", "plain"))
                .rule(RuleBuilder::when(Predicate::regex("^[a-z]$").unwrap()).to("word"))
                .rule(RuleBuilder::when(Predicate::regex("^[0-9]$").unwrap()).to("number"))
                .rule(
                    RuleBuilder::when(Predicate::literal("{".to_string()))
                        .to("open")
                        .propagate(),
                )
                .rule(
                    RuleBuilder::when(Predicate::literal("}".to_string()))
                        .to("close")
                        .propagate(),
                ),
        )
        .state(
            StateBuilder::new("word")
                .finish(action!("paint", "word"))
                .buffer_rule(
                    BufferRuleBuilder::when(Predicate::one_of(["if", "for"].map(str::to_string)))
                        .action(action!("kw")),
                )
                .rule(RuleBuilder::when(Predicate::regex("^[a-z]$").unwrap()))
                .rule(RuleBuilder::when(Predicate::always()).to("plain").propagate()),
        )
        .state(
            StateBuilder::new("number")
                .finish(action!("paint", "number"))
                .rule(RuleBuilder::when(Predicate::regex("^[0-9]$").unwrap()))
                .rule(RuleBuilder::when(Predicate::always()).to("plain").propagate()),
        )
        .state(
            StateBuilder::new("open")
                .sub_program()
                .rule(RuleBuilder::when(Predicate::always()).to("plain")),
        )
        .state(
            StateBuilder::new("close").rule(
                RuleBuilder::when(Predicate::always())
                    .returns_expecting("open")
                    .to("plain")
                    .action(action!("close"))
                    .error_action(action!("err")),
            ),
        )
        .build()
        .unwrap()
}

fn demo_engine(log: &Log) -> DemoEngine {
    Engine::new(demo_program(), recording_host(log))
}

fn feed_from(engine: &mut DemoEngine, text: &str, start: usize) {
    for (offset, ch) in text.chars().enumerate() {
        engine.push_event(ch.to_string(), start + offset);
    }
}

proptest! {
    #[test]
    fn identical_inputs_produce_identical_invocations(text in "[a-z0-9{} ]{0,40}") {
        let first = Log::default();
        let mut one = demo_engine(&first);
        feed_from(&mut one, &text, 0);

        let second = Log::default();
        let mut two = demo_engine(&second);
        feed_from(&mut two, &text, 0);

        prop_assert_eq!(&*first.borrow(), &*second.borrow());
    }

    #[test]
    fn every_event_gets_exactly_one_finishing_invocation(text in "[a-z0-9{} ]{0,40}") {
        let log = Log::default();
        let mut engine = demo_engine(&log);
        feed_from(&mut engine, &text, 0);

        // Every state of the demo program carries a `paint` finishing
        // action, and trigger actions use other names, so the paint count
        // is the finishing count.
        let finishing = log.borrow().iter().filter(|e| e.starts_with("paint@")).count();
        prop_assert_eq!(finishing, text.chars().count());
    }

    #[test]
    fn balanced_nesting_returns_to_depth_one(depth in 0usize..6, inner in "[a-z ]{0,12}") {
        let log = Log::default();
        let mut engine = demo_engine(&log);
        let text = format!("{}{}{}", "{".repeat(depth), inner, "}".repeat(depth));
        feed_from(&mut engine, &text, 0);

        prop_assert_eq!(engine.depth(), 1);
        let errors = log.borrow().iter().filter(|e| e.starts_with("err@")).count();
        prop_assert_eq!(errors, 0);
        let closes = log.borrow().iter().filter(|e| e.starts_with("close@")).count();
        prop_assert_eq!(closes, depth);
    }

    #[test]
    fn unmatched_opens_grow_the_stack(opens in 1usize..8) {
        let log = Log::default();
        let mut engine = demo_engine(&log);
        feed_from(&mut engine, &"{".repeat(opens), 0);
        prop_assert_eq!(engine.depth(), opens + 1);
    }

    #[test]
    fn reset_replays_like_a_fresh_engine(
        prefix in "[a-z0-9{} ]{0,20}",
        suffix in "[a-z0-9{} ]{0,20}",
    ) {
        let log = Log::default();
        let mut engine = demo_engine(&log);
        feed_from(&mut engine, &prefix, 0);
        engine.reset();
        log.borrow_mut().clear();
        feed_from(&mut engine, &suffix, 0);

        let fresh_log = Log::default();
        let mut fresh = demo_engine(&fresh_log);
        feed_from(&mut fresh, &suffix, 0);

        prop_assert_eq!(&*log.borrow(), &*fresh_log.borrow());
    }

    #[test]
    fn checkpoint_restore_continues_identically(
        text in "[a-z0-9{} ]{1,40}",
        split in 0usize..41,
    ) {
        let split = split.min(text.len());

        let full_log = Log::default();
        let mut uninterrupted = demo_engine(&full_log);
        feed_from(&mut uninterrupted, &text, 0);

        let head_log = Log::default();
        let mut head = demo_engine(&head_log);
        feed_from(&mut head, &text[..split], 0);
        let checkpoint = head.checkpoint();

        let tail_log = Log::default();
        let mut tail = demo_engine(&tail_log);
        tail.restore(&checkpoint).unwrap();
        feed_from(&mut tail, &text[split..], split);

        let mut combined = head_log.borrow().clone();
        combined.extend(tail_log.borrow().iter().cloned());
        prop_assert_eq!(&*full_log.borrow(), &combined);
    }

    #[test]
    fn first_matching_rule_wins(digit in 0u8..10) {
        let program: Program<String, &'static str> = ProgramBuilder::new()
            .initial("start")
            .state(
                StateBuilder::new("start")
                    .rule(
                        RuleBuilder::when(Predicate::regex("^[0-9]$").unwrap())
                            .action(action!("paint", "first")),
                    )
                    .rule(RuleBuilder::when(Predicate::always()).action(action!("paint", "second"))),
            )
            .build()
            .unwrap();

        let log = Log::default();
        let mut engine = Engine::new(program, recording_host(&log));
        engine.push_event(digit.to_string(), 0usize);

        prop_assert_eq!(&*log.borrow(), &vec![format!("paint@0+first")]);
    }
}
