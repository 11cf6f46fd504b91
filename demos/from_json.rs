//! Loads a Kripke structure from a JSON model literal and checks the
//! reachability formula `EF atom` against it.

use std::path::PathBuf;

use clap::Parser;

use ctl_rs::checking::{holds, sat_atom, sat_ef};
use ctl_rs::KripkeModel;

#[derive(Debug, Parser)]
#[command(author, version)]
struct Cli {
    /// Path to a JSON model literal.
    #[arg(value_name = "FILE", default_value = "demos/model.json")]
    model: PathBuf,

    /// Atom whose reachability (EF atom) is checked.
    #[clap(long, value_name = "ATOM", default_value = "d")]
    atom: String,

    /// Print the structure as a Graphviz digraph with the satisfying
    /// states filled, instead of the satisfaction set.
    #[clap(long)]
    dot: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    simplelog::TermLogger::init(
        simplelog::LevelFilter::Info,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let args = Cli::parse();

    let json = std::fs::read_to_string(&args.model)?;
    let ks = KripkeModel::from_json(&json)?.build()?;

    let sat = sat_ef(&ks, &sat_atom(&ks, &args.atom)?);

    if args.dot {
        print!("{}", ks.to_dot_highlighting(&sat)?);
        return Ok(());
    }

    let mut names: Vec<&str> = sat.iter().map(String::as_str).collect();
    names.sort_unstable();
    println!("EF {}: {{{}}}", args.atom, names.join(", "));
    println!("verdict: {}", if holds(&ks, &sat) { "SAT" } else { "NOT-SAT" });

    Ok(())
}
