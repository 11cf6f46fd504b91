//! # ctl-rs: Explicit-state CTL model checking in Rust
//!
//! **`ctl-rs`** is a small, safe library for checking **Computation Tree Logic (CTL)**
//! formulas against finite **Kripke structures**: transition graphs whose states are
//! labeled with Boolean atomic propositions.
//!
//! ## What is CTL model checking?
//!
//! CTL combines path quantifiers (E = exists a path, A = for all paths) with temporal
//! operators (X = next, F = eventually, G = globally, U = until). Given a structure and
//! a formula, the checker computes the formula's **satisfaction set** --- the set of
//! states where the formula holds. The structure as a whole satisfies the formula iff
//! its start states all lie in that set.
//!
//! ## Key Features
//!
//! - **One value type everywhere**: every operator consumes and produces a
//!   [`StateSet`], so satisfaction sets compose positionally into arbitrary formulas ---
//!   no formula AST, no parser.
//! - **Explicit-state semantics**: the three primitive temporal operators
//!   ([`sat_ex`][checking::sat_ex], [`sat_eu`][checking::sat_eu],
//!   [`sat_eg`][checking::sat_eg]) are equality-terminated fixpoint iterations over
//!   named state sets; the universal operators are derived from them by duality.
//! - **Checked construction**: [`KripkeStruct`] mutators enforce referential integrity
//!   (unique state names, frozen atom positions, declared transition endpoints) at
//!   mutation time, so queries never have to re-validate.
//! - **Literal front-end**: [`KripkeModel`] builds a structure in one shot from a
//!   serde-decoded description.
//!
//! ## Basic Usage
//!
//! ```rust
//! use ctl_rs::checking::{holds, sat_atom, sat_eu, sat_ex};
//! use ctl_rs::KripkeStruct;
//!
//! // Two states on a ring: s0 satisfies p, s1 satisfies q.
//! // Atom bit positions follow insertion order: p is bit 0, q is bit 1.
//! let mut ks = KripkeStruct::new();
//! ks.set_atoms(["p", "q"]).unwrap();
//! ks.add_state("s0", 0b01).unwrap();
//! ks.add_state("s1", 0b10).unwrap();
//! ks.set_starts(["s0"]).unwrap();
//! ks.add_transition("s0", "s1").unwrap();
//! ks.add_transition("s1", "s0").unwrap();
//!
//! // EX p: which states have a successor satisfying p?
//! let sat = sat_ex(&ks, &sat_atom(&ks, "p").unwrap());
//! assert!(sat.contains("s1"));
//! assert!(!holds(&ks, &sat)); // the start state s0 is not in the set
//!
//! // E[p U q] holds in the start state.
//! let p = sat_atom(&ks, "p").unwrap();
//! let q = sat_atom(&ks, "q").unwrap();
//! assert!(holds(&ks, &sat_eu(&ks, &p, &q)));
//! ```
//!
//! ## Core Components
//!
//! - **[`kripke`]**: the [`KripkeStruct`] structure model and its invariants.
//! - **[`checking`]**: the satisfaction engine --- atomic lookup, propositional
//!   connectives, and the temporal operators.
//! - **[`model`]**: one-shot construction from a nested literal.
//! - **[`dot`]**: visualizing structures and satisfaction sets with Graphviz.

pub mod checking;
pub mod dot;
pub mod kripke;
pub mod model;

pub use kripke::{KripkeError, KripkeStruct, StateSet};
pub use model::KripkeModel;
