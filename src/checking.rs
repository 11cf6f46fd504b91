//! Satisfaction procedures for CTL operators.
//!
//! Every operator takes a [`KripkeStruct`] (read-only) plus zero, one, or two
//! satisfaction sets and returns a freshly allocated [`StateSet`]; nothing is
//! mutated in place. Formulas are expressed by nesting calls, with any
//! operator's result feeding any other operator's argument. For example,
//! `EX (p AND EX q)` is:
//!
//! ```
//! # use ctl_rs::checking::{sat_and, sat_atom, sat_ex};
//! # use ctl_rs::KripkeStruct;
//! # let mut ks = KripkeStruct::new();
//! # ks.set_atoms(["p", "q"]).unwrap();
//! # ks.add_state("s0", 0b01).unwrap();
//! # ks.add_state("s1", 0b10).unwrap();
//! # ks.add_transition("s0", "s1").unwrap();
//! # ks.add_transition("s1", "s0").unwrap();
//! let p = sat_atom(&ks, "p").unwrap();
//! let q = sat_atom(&ks, "q").unwrap();
//! let sat = sat_ex(&ks, &sat_and(&p, &sat_ex(&ks, &q)));
//! # assert!(sat.contains("s1"));
//! ```
//!
//! The primitive temporal operators are the existential `sat_ex`, `sat_eu`,
//! and `sat_eg`; the universal-path operators are derived from them by
//! duality. A structure satisfies a formula iff its start set is a non-empty
//! subset of the formula's satisfaction set; see [`holds`].

use log::debug;

use crate::kripke::{KripkeError, KripkeStruct, StateSet};

/// The set of states whose label has the bit of `atom` set.
///
/// Fails with [`KripkeError::UnknownAtom`] if the atom was never registered.
pub fn sat_atom(ks: &KripkeStruct, atom: &str) -> Result<StateSet, KripkeError> {
    let index = ks
        .atom_index(atom)
        .ok_or_else(|| KripkeError::UnknownAtom(atom.to_string()))?;
    let mask = 1u64 << index;
    Ok(ks
        .states()
        .iter()
        .filter(|(_, &label)| label & mask != 0)
        .map(|(name, _)| name.clone())
        .collect())
}

/// The constant `true`: the full state set.
pub fn sat_true(ks: &KripkeStruct) -> StateSet {
    ks.state_set()
}

/// The constant `false`: the empty set.
pub fn sat_false() -> StateSet {
    StateSet::new()
}

/// NOT: the complement of `s` with respect to the full state set.
pub fn sat_not(ks: &KripkeStruct, s: &StateSet) -> StateSet {
    ks.states()
        .keys()
        .filter(|name| !s.contains(*name))
        .cloned()
        .collect()
}

/// AND: intersection.
pub fn sat_and(s1: &StateSet, s2: &StateSet) -> StateSet {
    s1.intersection(s2).cloned().collect()
}

/// OR: union.
pub fn sat_or(s1: &StateSet, s2: &StateSet) -> StateSet {
    s1.union(s2).cloned().collect()
}

/// IMPLIES: `¬s1 ∨ s2`.
pub fn sat_implies(ks: &KripkeStruct, s1: &StateSet, s2: &StateSet) -> StateSet {
    sat_or(&sat_not(ks, s1), s2)
}

/// IFF: `(s1 ∧ s2) ∨ (¬s1 ∧ ¬s2)`.
pub fn sat_iff(ks: &KripkeStruct, s1: &StateSet, s2: &StateSet) -> StateSet {
    sat_or(
        &sat_and(s1, s2),
        &sat_and(&sat_not(ks, s1), &sat_not(ks, s2)),
    )
}

/// EX: states with at least one direct successor in `s`.
///
/// The pre-image of `s` under the transition relation; a single backward
/// step, no fixpoint. A state without successors is never in the result.
pub fn sat_ex(ks: &KripkeStruct, s: &StateSet) -> StateSet {
    let mut sat = StateSet::new();
    for state in ks.states().keys() {
        if ks.successors(state).iter().any(|next| s.contains(next)) {
            sat.insert(state.clone());
        }
    }
    sat
}

/// AX: states whose successors all lie in `s`.
///
/// `AX s = ¬EX ¬s`. A state without successors satisfies this vacuously.
pub fn sat_ax(ks: &KripkeStruct, s: &StateSet) -> StateSet {
    sat_not(ks, &sat_ex(ks, &sat_not(ks, s)))
}

/// EU: states from which some finite path stays in `s1` until it reaches
/// a state in `s2` (formally `E[s1 U s2]`).
///
/// Least fixpoint: `R₀ = s2`, `Rₙ₊₁ = Rₙ ∪ (s1 ∩ EX Rₙ)`. The sequence
/// grows monotonically within the finite state set, so it converges in at
/// most |states| rounds. An empty `s2` yields an empty result.
pub fn sat_eu(ks: &KripkeStruct, s1: &StateSet, s2: &StateSet) -> StateSet {
    let mut sat = s2.clone();
    let mut round = 0;
    loop {
        let next = sat_or(&sat, &sat_and(s1, &sat_ex(ks, &sat)));
        if next == sat {
            debug!("eu: fixpoint of {} states after {} rounds", sat.len(), round);
            return sat;
        }
        sat = next;
        round += 1;
    }
}

/// EF: states from which some path eventually reaches `s`.
///
/// `EF s = E[true U s]`.
pub fn sat_ef(ks: &KripkeStruct, s: &StateSet) -> StateSet {
    sat_eu(ks, &sat_true(ks), s)
}

/// EG: states from which some infinite path stays entirely in `s`.
///
/// Greatest fixpoint: `R₀ = s`, `Rₙ₊₁ = Rₙ ∩ EX Rₙ`. The sequence shrinks
/// monotonically, so it converges in at most |s| rounds. A state without
/// successors cannot support an infinite path and drops out on the first
/// round that reaches it.
pub fn sat_eg(ks: &KripkeStruct, s: &StateSet) -> StateSet {
    let mut sat = s.clone();
    let mut round = 0;
    loop {
        let next = sat_and(&sat, &sat_ex(ks, &sat));
        if next == sat {
            debug!("eg: fixpoint of {} states after {} rounds", sat.len(), round);
            return sat;
        }
        sat = next;
        round += 1;
    }
}

/// AG: states from which `s` holds on every path, forever.
///
/// `AG s = ¬EF ¬s`.
pub fn sat_ag(ks: &KripkeStruct, s: &StateSet) -> StateSet {
    sat_not(ks, &sat_ef(ks, &sat_not(ks, s)))
}

/// AF: states from which every path eventually reaches `s`.
///
/// `AF s = ¬EG ¬s`.
pub fn sat_af(ks: &KripkeStruct, s: &StateSet) -> StateSet {
    sat_not(ks, &sat_eg(ks, &sat_not(ks, s)))
}

/// AU: states from which every path stays in `s1` until it reaches `s2`
/// (formally `A[s1 U s2]`).
///
/// `A[s1 U s2] = ¬(E[¬s2 U (¬s1 ∧ ¬s2)] ∨ EG ¬s2)`.
pub fn sat_au(ks: &KripkeStruct, s1: &StateSet, s2: &StateSet) -> StateSet {
    let not_s1 = sat_not(ks, s1);
    let not_s2 = sat_not(ks, s2);
    sat_not(
        ks,
        &sat_or(
            &sat_eu(ks, &not_s2, &sat_and(&not_s1, &not_s2)),
            &sat_eg(ks, &not_s2),
        ),
    )
}

/// Whether the structure as a whole satisfies a formula, given the
/// formula's satisfaction set: true iff the start set is a non-empty
/// subset of `sat`.
pub fn holds(ks: &KripkeStruct, sat: &StateSet) -> bool {
    !ks.starts().is_empty() && ks.starts().iter().all(|start| sat.contains(start))
}
