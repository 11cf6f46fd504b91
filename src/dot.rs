//! Kripke structure to DOT (Graphviz) conversion.
//!
//! The generated output follows these conventions:
//! - states are circles labeled with the state name and its atom set;
//! - start states are double circles;
//! - states belonging to a highlighted satisfaction set are filled;
//! - output is deterministic: states are emitted in name order, edges in
//!   declaration order within each source.
//!
//! # Examples
//!
//! ```
//! use ctl_rs::KripkeStruct;
//!
//! let mut ks = KripkeStruct::new();
//! ks.set_atoms(["p"]).unwrap();
//! ks.add_state("s0", 0b1).unwrap();
//! ks.add_state("s1", 0b0).unwrap();
//! ks.add_transition("s0", "s1").unwrap();
//!
//! let dot = ks.to_dot().unwrap();
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write;

use crate::kripke::{KripkeStruct, StateSet};

impl KripkeStruct {
    /// Renders the structure as a Graphviz digraph.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_highlighting(&StateSet::new())
    }

    /// Renders the structure as a Graphviz digraph, filling every state
    /// that belongs to `sat`. Feeding an operator's satisfaction set here
    /// visualizes where a formula holds.
    pub fn to_dot_highlighting(&self, sat: &StateSet) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph kripke {{")?;
        writeln!(dot, "node [shape=circle];")?;

        let mut names: Vec<&String> = self.states().keys().collect();
        names.sort();
        for name in &names {
            let mut attrs = format!("label=\"{}\\n{{{}}}\"", name, self.atom_list(name));
            if self.starts().contains(*name) {
                attrs.push_str(", shape=doublecircle");
            }
            if sat.contains(*name) {
                attrs.push_str(", style=filled");
            }
            writeln!(dot, "\"{}\" [{}];", name, attrs)?;
        }

        for name in &names {
            for next in self.successors(name) {
                writeln!(dot, "\"{}\" -> \"{}\";", name, next)?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }

    // The atoms a state satisfies, in bit-position order.
    fn atom_list(&self, name: &str) -> String {
        let label = self.states().get(name).copied().unwrap_or(0);
        self.atoms()
            .iter()
            .enumerate()
            .filter(|(i, _)| label & (1u64 << i) != 0)
            .map(|(_, atom)| atom.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
