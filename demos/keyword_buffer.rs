//! Retroactive keyword reclassification
//!
//! A buffering state cannot know whether "i", "if", "ifx" is a keyword
//! until the run ends. Each character is painted as an identifier as it
//! arrives; when a non-word character closes the run, a buffer rule tests
//! the whole accumulated word and repaints it if it is a keyword.
//!
//! Run with: cargo run --example keyword_buffer

use lexion::action;
use lexion::builder::{BufferRuleBuilder, ProgramBuilder, RuleBuilder, StateBuilder};
use lexion::core::{Predicate, Program};
use lexion::engine::{Engine, HostTable};

fn word_program() -> Program<String, &'static str> {
    ProgramBuilder::new()
        .initial("plain")
        .state(
            StateBuilder::new("plain")
                .rule(RuleBuilder::when(Predicate::regex("^[a-z]$").unwrap()).to("word")),
        )
        .state(
            StateBuilder::new("word")
                .buffer_rule(
                    BufferRuleBuilder::when(Predicate::one_of(
                        ["if", "else", "while"].map(str::to_string),
                    ))
                    .action(action!("classified", "keyword")),
                )
                .buffer_rule(
                    BufferRuleBuilder::when(Predicate::always())
                        .action(action!("classified", "identifier")),
                )
                .rule(RuleBuilder::when(Predicate::regex("^[a-z]$").unwrap()))
                .rule(RuleBuilder::when(Predicate::always()).to("plain").propagate()),
        )
        .build()
        .unwrap()
}

fn main() {
    let text = "if ifx while whilex else ";

    let mut host: HostTable<usize, &'static str> = HostTable::new();
    host.register("classified", |inv| {
        println!(
            "  {:<10} {:?} (run started at {})",
            inv.args[0],
            inv.buffer.unwrap_or(""),
            inv.alt.copied().unwrap_or(0),
        );
    });

    let mut engine = Engine::new(word_program(), host);

    println!("=== Keyword Reclassification ===\n");
    println!("{text}\n");
    for (at, ch) in text.chars().enumerate() {
        engine.push_event(ch.to_string(), at);
    }

    println!("\nEvery word was classified once, at the moment its run ended.");
    println!("A catch-all buffer rule classified the non-keywords.");
}
