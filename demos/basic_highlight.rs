//! Basic syntax highlighting
//!
//! This demo runs a small JavaScript-flavored program over one line of
//! code and paints a class per character into caller-owned storage.
//!
//! Key concepts:
//! - Per-character finishing actions (the default classification)
//! - Retroactive keyword reclassification through buffer rules
//! - Host methods writing into caller-owned state
//!
//! Run with: cargo run --example basic_highlight

use lexion::action;
use lexion::builder::{BufferRuleBuilder, ProgramBuilder, RuleBuilder, StateBuilder};
use lexion::core::{Predicate, Program};
use lexion::engine::{Engine, HostTable};
use std::cell::RefCell;
use std::rc::Rc;

const KEYWORDS: [&str; 9] = [
    "var", "let", "const", "function", "return", "if", "else", "for", "while",
];
const CONSTANTS: [&str; 4] = ["true", "false", "null", "undefined"];

fn javascript_like() -> Program<String, &'static str> {
    ProgramBuilder::new()
        .initial("plain")
        .state(
            StateBuilder::new("plain")
                .finish(action!("style", "plain"))
                .rule(RuleBuilder::when(Predicate::regex("^[A-Za-z_$]$").unwrap()).to("identifier"))
                .rule(RuleBuilder::when(Predicate::regex("^[0-9]$").unwrap()).to("number"))
                .rule(RuleBuilder::when(Predicate::literal("\"".to_string())).to("string")),
        )
        .state(
            StateBuilder::new("identifier")
                .finish(action!("style", "identifier"))
                .buffer_rule(
                    BufferRuleBuilder::when(Predicate::one_of(KEYWORDS.map(str::to_string)))
                        .action(action!("restyle", "keyword")),
                )
                .buffer_rule(
                    BufferRuleBuilder::when(Predicate::one_of(CONSTANTS.map(str::to_string)))
                        .action(action!("restyle", "constant")),
                )
                .rule(RuleBuilder::when(Predicate::regex("^[A-Za-z0-9_$]$").unwrap()))
                .rule(RuleBuilder::when(Predicate::always()).to("plain").propagate()),
        )
        .state(
            StateBuilder::new("number")
                .finish(action!("style", "number"))
                .rule(RuleBuilder::when(Predicate::regex("^[0-9.]$").unwrap()))
                .rule(RuleBuilder::when(Predicate::always()).to("plain").propagate()),
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

fn main() {
    let text = "let ready = true; if (count) { msg = \"hi\" + 42.5 }";
    let length = text.chars().count();

    let cells: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(vec!["plain"; length]));

    let mut host: HostTable<usize, &'static str> = HostTable::new();
    let style_cells = Rc::clone(&cells);
    host.register("style", move |inv| {
        style_cells.borrow_mut()[*inv.ctx] = inv.args[0];
    });
    let restyle_cells = Rc::clone(&cells);
    host.register("restyle", move |inv| {
        if let Some(&start) = inv.alt {
            for cell in &mut restyle_cells.borrow_mut()[start..*inv.ctx] {
                *cell = inv.args[0];
            }
        }
    });

    let mut engine = Engine::new(javascript_like(), host);
    for (at, ch) in text.chars().enumerate() {
        engine.push_event(ch.to_string(), at);
    }

    println!("=== Basic Highlighting ===\n");
    println!("{text}\n");

    // Group consecutive characters of the same class into runs.
    let cells = cells.borrow();
    let chars: Vec<char> = text.chars().collect();
    let mut start = 0;
    while start < length {
        let mut end = start + 1;
        while end < length && cells[end] == cells[start] {
            end += 1;
        }
        let snippet: String = chars[start..end].iter().collect();
        if !snippet.trim().is_empty() {
            println!("{:>3}..{:<3} {:<10} {:?}", start, end, cells[start], snippet);
        }
        start = end;
    }
}
