//! Delimiter matching with sub-programs
//!
//! Each opening delimiter pushes a nested sub-program frame; the matching
//! closer pops it and hands the host both positions, so a whole pair can
//! be painted at once. A closer with no opener, or the wrong kind of
//! opener, routes to the rule's error action instead.
//!
//! Run with: cargo run --example brace_matching

use lexion::action;
use lexion::builder::{ProgramBuilder, RuleBuilder, StateBuilder};
use lexion::core::{Predicate, Program};
use lexion::engine::{Engine, HostTable};

fn delimiter_program() -> Program<String, &'static str> {
    ProgramBuilder::new()
        .initial("code")
        .state(
            StateBuilder::new("code")
                .rule(
                    RuleBuilder::when(Predicate::literal("{".to_string()))
                        .to("open_brace")
                        .propagate(),
                )
                .rule(
                    RuleBuilder::when(Predicate::literal("(".to_string()))
                        .to("open_paren")
                        .propagate(),
                )
                .rule(
                    RuleBuilder::when(Predicate::literal("}".to_string()))
                        .to("close_brace")
                        .propagate(),
                )
                .rule(
                    RuleBuilder::when(Predicate::literal(")".to_string()))
                        .to("close_paren")
                        .propagate(),
                ),
        )
        .state(
            StateBuilder::new("open_brace")
                .sub_program()
                .rule(RuleBuilder::when(Predicate::always()).to("code")),
        )
        .state(
            StateBuilder::new("open_paren")
                .sub_program()
                .rule(RuleBuilder::when(Predicate::always()).to("code")),
        )
        .state(
            StateBuilder::new("close_brace").rule(
                RuleBuilder::when(Predicate::always())
                    .returns_expecting("open_brace")
                    .to("code")
                    .action(action!("matched", "{}"))
                    .error_action(action!("mismatch", "}")),
            ),
        )
        .state(
            StateBuilder::new("close_paren").rule(
                RuleBuilder::when(Predicate::always())
                    .returns_expecting("open_paren")
                    .to("code")
                    .action(action!("matched", "()"))
                    .error_action(action!("mismatch", ")")),
            ),
        )
        .build()
        .unwrap()
}

fn main() {
    // RUST_LOG=lexion=trace surfaces the engine's transition events.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let text = "f(a{b}c)d}";

    let mut host: HostTable<usize, &'static str> = HostTable::new();
    host.register("matched", |inv| {
        let opened = inv.alt.copied().map_or_else(|| "?".to_string(), |a| a.to_string());
        println!("  pair {:<3} opened at {opened:>2}, closed at {:>2}", inv.args[0], inv.ctx);
    });
    host.register("mismatch", |inv| {
        println!("  stray {:<3} at {:>2} closes nothing that is open", inv.args[0], inv.ctx);
    });

    let mut engine = Engine::new(delimiter_program(), host);

    println!("=== Delimiter Matching ===\n");
    println!("{text}\n");
    for (at, ch) in text.chars().enumerate() {
        engine.push_event(ch.to_string(), at);
    }

    println!("\nFinal stack depth: {} (1 means balanced)", engine.depth());
}
