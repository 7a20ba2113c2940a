//! Checkpoint and resume
//!
//! An editor re-highlighting a document on every keystroke does not need
//! to start from the top: snapshot the engine at the end of each line and
//! restart from the nearest snapshot. This matters when multi-line
//! constructs (an unterminated string here) carry state across lines.
//!
//! Run with: cargo run --example checkpoint_resume

use lexion::action;
use lexion::builder::{ProgramBuilder, RuleBuilder, StateBuilder};
use lexion::core::{Predicate, Program};
use lexion::engine::{Engine, HostTable, Invocation};
use std::cell::RefCell;
use std::rc::Rc;

fn string_program() -> Program<String, &'static str> {
    ProgramBuilder::new()
        .initial("plain")
        .state(
            StateBuilder::new("plain")
                .finish(action!("style", "plain"))
                .rule(RuleBuilder::when(Predicate::literal("\"".to_string())).to("string")),
        )
        .state(
            StateBuilder::new("string")
                .finish(action!("style", "string"))
                .rule(
                    RuleBuilder::when(Predicate::literal("\"".to_string()))
                        .to("plain")
                        .delay_finish(),
                )
                .rule(RuleBuilder::when(Predicate::always())),
        )
        .build()
        .unwrap()
}

type Cells = Rc<RefCell<Vec<(usize, &'static str)>>>;

fn painting_host(cells: &Cells) -> HostTable<usize, &'static str> {
    let sink = Rc::clone(cells);
    HostTable::new().with("style", move |inv: Invocation<'_, usize, &'static str>| {
        sink.borrow_mut().push((*inv.ctx, inv.args[0]));
    })
}

fn feed(engine: &mut Engine<String, usize, &'static str>, text: &str, start: usize) {
    for (offset, ch) in text.chars().enumerate() {
        engine.push_event(ch.to_string(), start + offset);
    }
}

fn summarize(label: &str, cells: &Cells) {
    let cells = cells.borrow();
    let strings = cells.iter().filter(|(_, class)| *class == "string").count();
    println!("  {label}: {} chars painted, {strings} as string", cells.len());
}

fn main() {
    let line_one = "greet = \"hello ";
    let line_two_before = "world\" + name";
    let line_two_after = "there\" + name";

    println!("=== Checkpoint / Resume ===\n");

    let cells: Cells = Cells::default();
    let mut engine = Engine::new(string_program(), painting_host(&cells));

    // First pass over both lines; the string stays open across the line
    // break, so line two starts in the `string` state.
    feed(&mut engine, line_one, 0);
    let end_of_line_one = engine.checkpoint();
    println!(
        "checkpoint at end of line one: state `{}`, depth {}",
        engine.current_state(),
        engine.depth()
    );

    feed(&mut engine, line_two_before, line_one.len());
    summarize("full pass", &cells);

    // Snapshots survive serialization; an editor can keep one per line.
    let encoded = end_of_line_one.to_json().unwrap();
    println!("checkpoint serializes to {} bytes of JSON", encoded.len());

    // Line two changes. Restore the end-of-line-one snapshot and re-run
    // only the edited line.
    cells.borrow_mut().clear();
    engine.restore(&end_of_line_one).unwrap();
    feed(&mut engine, line_two_after, line_one.len());
    summarize("resumed pass (line two only)", &cells);

    println!(
        "\nLine one was never re-fed; the engine resumed in state `string`\n\
         and still closed the literal at the quote in line two."
    );
}
