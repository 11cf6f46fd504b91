//! Builds the seven-state structure from the README incrementally and
//! checks a handful of CTL formulas against it.

use ctl_rs::checking::{self, holds};
use ctl_rs::{KripkeStruct, StateSet};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Debug,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut ks = KripkeStruct::new();
    ks.set_atoms(["a", "b", "c", "d"])?;
    ks.add_states([
        ("s1", 0b0001),
        ("s2", 0b0011),
        ("s3", 0b0110),
        ("s4", 0b1110),
        ("s5", 0b0010),
        ("s6", 0b0100),
        ("s7", 0b1000),
    ])?;
    ks.set_starts(["s1"])?;
    for (from, to) in [
        ("s1", "s2"),
        ("s2", "s3"),
        ("s2", "s4"),
        ("s3", "s4"),
        ("s4", "s7"),
        ("s5", "s6"),
        ("s6", "s7"),
        ("s6", "s5"),
        ("s7", "s5"),
    ] {
        ks.add_transition(from, to)?;
    }
    println!("{}", ks);
    println!();

    let a = checking::sat_atom(&ks, "a")?;
    let b = checking::sat_atom(&ks, "b")?;
    let d = checking::sat_atom(&ks, "d")?;

    report(&ks, "EX a", &checking::sat_ex(&ks, &a));
    report(&ks, "E[a U b]", &checking::sat_eu(&ks, &a, &b));
    report(&ks, "EF d", &checking::sat_ef(&ks, &d));
    report(&ks, "EG a", &checking::sat_eg(&ks, &a));
    report(&ks, "AF b", &checking::sat_af(&ks, &b));
    report(&ks, "AG (a -> EX b)", &checking::sat_ag(&ks, &checking::sat_implies(&ks, &a, &checking::sat_ex(&ks, &b))));

    Ok(())
}

fn report(ks: &KripkeStruct, formula: &str, sat: &StateSet) {
    let mut names: Vec<&str> = sat.iter().map(String::as_str).collect();
    names.sort_unstable();
    let verdict = if holds(ks, sat) { "SAT" } else { "NOT-SAT" };
    println!("{}: {{{}}} -> {}", formula, names.join(", "), verdict);
}
