//! Kripke structures: finite transition graphs with Boolean-labeled states.
//!
//! A [`KripkeStruct`] is built once, either incrementally through the mutators
//! here or in one shot from a [`KripkeModel`][crate::model::KripkeModel], and
//! is then treated as read-only input by the satisfaction procedures in
//! [`checking`][crate::checking]. Mutators enforce referential integrity at
//! mutation time: atoms freeze once states exist, state names are unique, and
//! every start or transition endpoint must name a declared state.

use std::collections::{HashMap, HashSet};
use std::fmt;

use thiserror::Error;

/// Errors raised by [`KripkeStruct`] mutators and by atom lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KripkeError {
    /// The atom was never registered with [`KripkeStruct::set_atoms`].
    #[error("unknown atom `{0}`")]
    UnknownAtom(String),
    /// A start or transition declaration references an undeclared state.
    #[error("unknown state `{0}`")]
    UnknownState(String),
    /// A state with this name already exists.
    #[error("duplicate state `{0}`")]
    DuplicateState(String),
    /// Atoms cannot be reset after states are created.
    #[error("atoms cannot be reset after states are created")]
    AtomsFrozen,
    /// The label sets a bit at or above the declared atom count.
    #[error("label {label:#b} uses bits beyond the {atoms} declared atoms")]
    LabelOutOfRange { label: u64, atoms: usize },
}

/// A set of state names.
///
/// This is the universal input and output type of every satisfaction
/// operator in [`checking`][crate::checking]: any operator's result can feed
/// any other operator's argument.
pub type StateSet = HashSet<String>;

/// A finite Kripke structure.
///
/// States are identified by unique names and carry a `u64` label bitmask:
/// bit `i` is set iff the state satisfies atom `i`, where atom positions are
/// fixed by their insertion order in [`set_atoms`][KripkeStruct::set_atoms].
/// The inverted transition relation is maintained alongside the forward one
/// so that state removal can clean up both directions.
#[derive(Debug, Clone, Default)]
pub struct KripkeStruct {
    atoms: Vec<String>,
    states: HashMap<String, u64>,
    starts: HashSet<String>,
    trans: HashMap<String, Vec<String>>,
    trans_inverted: HashMap<String, Vec<String>>,
}

impl KripkeStruct {
    /// Creates an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the atomic propositions.
    ///
    /// Atom positions are fixed by insertion order and are never renumbered,
    /// so this fails with [`KripkeError::AtomsFrozen`] once any state exists.
    ///
    /// # Panics
    ///
    /// Panics if more than 64 atoms are given (labels are `u64` bitmasks).
    pub fn set_atoms<S: Into<String>>(
        &mut self,
        atoms: impl IntoIterator<Item = S>,
    ) -> Result<(), KripkeError> {
        if !self.states.is_empty() {
            return Err(KripkeError::AtomsFrozen);
        }
        let atoms: Vec<String> = atoms.into_iter().map(Into::into).collect();
        assert!(atoms.len() <= 64, "Labels are u64 bitmasks, so at most 64 atoms are supported");
        self.atoms = atoms;
        Ok(())
    }

    /// The registered atoms, in bit-position order.
    pub fn atoms(&self) -> &[String] {
        &self.atoms
    }

    /// The bit position of an atom, or `None` if it was never registered.
    pub fn atom_index(&self, atom: &str) -> Option<usize> {
        self.atoms.iter().position(|a| a == atom)
    }

    /// Adds a state with the given name and label bitmask.
    ///
    /// Fails with [`KripkeError::DuplicateState`] if the name is taken and
    /// with [`KripkeError::LabelOutOfRange`] if the label sets a bit at or
    /// above the declared atom count (out-of-range labels are rejected, not
    /// truncated). Two states may carry the same label.
    pub fn add_state(&mut self, name: impl Into<String>, label: u64) -> Result<(), KripkeError> {
        let name = name.into();
        if self.states.contains_key(&name) {
            return Err(KripkeError::DuplicateState(name));
        }
        if self.atoms.len() < 64 && label >> self.atoms.len() != 0 {
            return Err(KripkeError::LabelOutOfRange {
                label,
                atoms: self.atoms.len(),
            });
        }
        self.states.insert(name, label);
        Ok(())
    }

    /// Adds multiple states; stops at the first error.
    pub fn add_states<S: Into<String>>(
        &mut self,
        states: impl IntoIterator<Item = (S, u64)>,
    ) -> Result<(), KripkeError> {
        for (name, label) in states {
            self.add_state(name, label)?;
        }
        Ok(())
    }

    /// Removes a state together with all its incident transitions and its
    /// start membership. Removing an unknown name has no effect.
    pub fn remove_state(&mut self, name: &str) {
        if self.states.remove(name).is_none() {
            return;
        }
        self.starts.remove(name);
        if let Some(next_states) = self.trans.remove(name) {
            for next in next_states {
                if let Some(sources) = self.trans_inverted.get_mut(&next) {
                    if let Some(pos) = sources.iter().position(|s| s == name) {
                        sources.remove(pos);
                    }
                }
            }
        }
        if let Some(prev_states) = self.trans_inverted.remove(name) {
            for prev in prev_states {
                if let Some(targets) = self.trans.get_mut(&prev) {
                    if let Some(pos) = targets.iter().position(|t| t == name) {
                        targets.remove(pos);
                    }
                }
            }
        }
    }

    /// Removes multiple states.
    pub fn remove_states<'a>(&mut self, names: impl IntoIterator<Item = &'a str>) {
        for name in names {
            self.remove_state(name);
        }
    }

    /// The states and their labels.
    pub fn states(&self) -> &HashMap<String, u64> {
        &self.states
    }

    /// The full state-name set, freshly allocated.
    pub fn state_set(&self) -> StateSet {
        self.states.keys().cloned().collect()
    }

    /// The label bitmask of a state.
    pub fn label(&self, state: &str) -> Result<u64, KripkeError> {
        self.states
            .get(state)
            .copied()
            .ok_or_else(|| KripkeError::UnknownState(state.to_string()))
    }

    /// The set of atom names a state satisfies.
    ///
    /// For example, with atoms `["a", "b", "c", "d"]` and label `0b0110`,
    /// the result is `{"b", "c"}`.
    pub fn label_set(&self, state: &str) -> Result<HashSet<String>, KripkeError> {
        let label = self.label(state)?;
        Ok(self
            .atoms
            .iter()
            .enumerate()
            .filter(|(i, _)| label & (1u64 << i) != 0)
            .map(|(_, atom)| atom.clone())
            .collect())
    }

    /// Declares the start states, replacing any previous start set.
    ///
    /// Every name must be a declared state. The start set may be empty and
    /// may hold more than one state.
    pub fn set_starts<S: Into<String>>(
        &mut self,
        starts: impl IntoIterator<Item = S>,
    ) -> Result<(), KripkeError> {
        let starts: Vec<String> = starts.into_iter().map(Into::into).collect();
        for start in &starts {
            if !self.states.contains_key(start) {
                return Err(KripkeError::UnknownState(start.clone()));
            }
        }
        self.starts = starts.into_iter().collect();
        Ok(())
    }

    /// The start states.
    pub fn starts(&self) -> &HashSet<String> {
        &self.starts
    }

    /// Adds a transition edge. Both endpoints must be declared states;
    /// duplicate edges are legal.
    pub fn add_transition(&mut self, from: &str, to: &str) -> Result<(), KripkeError> {
        if !self.states.contains_key(from) {
            return Err(KripkeError::UnknownState(from.to_string()));
        }
        if !self.states.contains_key(to) {
            return Err(KripkeError::UnknownState(to.to_string()));
        }
        self.trans.entry(from.to_string()).or_default().push(to.to_string());
        self.trans_inverted.entry(to.to_string()).or_default().push(from.to_string());
        Ok(())
    }

    /// Removes one occurrence of an edge from both the forward and the
    /// inverted relation. Removing an absent edge has no effect.
    pub fn remove_transition(&mut self, from: &str, to: &str) {
        match self.trans.get_mut(from) {
            Some(targets) => match targets.iter().position(|t| t == to) {
                Some(pos) => {
                    targets.remove(pos);
                }
                None => return,
            },
            None => return,
        }
        if let Some(sources) = self.trans_inverted.get_mut(to) {
            if let Some(pos) = sources.iter().position(|s| s == from) {
                sources.remove(pos);
            }
        }
    }

    /// The successor list of a state; empty if none were declared.
    pub fn successors(&self, state: &str) -> &[String] {
        self.trans.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The predecessor list of a state; empty if none exist.
    pub fn predecessors(&self, state: &str) -> &[String] {
        self.trans_inverted.get(state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The forward transition relation.
    pub fn trans(&self) -> &HashMap<String, Vec<String>> {
        &self.trans
    }

    /// The inverted transition relation.
    pub fn trans_inverted(&self) -> &HashMap<String, Vec<String>> {
        &self.trans_inverted
    }

    /// All strongly connected components, via Kosaraju's algorithm.
    ///
    /// Both passes run on explicit work stacks, so the depth of the graph
    /// does not translate into call-stack depth. The partition is returned
    /// in no particular order.
    pub fn sccs(&self) -> Vec<HashSet<String>> {
        // First pass: forward DFS, recording states in finish order.
        let mut order: Vec<String> = Vec::with_capacity(self.states.len());
        let mut visited: HashSet<String> = HashSet::with_capacity(self.states.len());
        for root in self.states.keys() {
            if visited.contains(root) {
                continue;
            }
            visited.insert(root.clone());
            let mut stack: Vec<(String, usize)> = vec![(root.clone(), 0)];
            while let Some((state, index)) = stack.pop() {
                let successors = self.successors(&state);
                if index < successors.len() {
                    let next = successors[index].clone();
                    stack.push((state, index + 1));
                    if !visited.contains(&next) {
                        visited.insert(next.clone());
                        stack.push((next, 0));
                    }
                } else {
                    order.push(state);
                }
            }
        }

        // Second pass: backward DFS in reverse finish order; each round
        // collects exactly one component.
        let mut sccs: Vec<HashSet<String>> = Vec::new();
        let mut assigned: HashSet<String> = HashSet::with_capacity(self.states.len());
        for root in order.iter().rev() {
            if assigned.contains(root) {
                continue;
            }
            assigned.insert(root.clone());
            let mut component: HashSet<String> = HashSet::new();
            let mut stack: Vec<String> = vec![root.clone()];
            while let Some(state) = stack.pop() {
                for prev in self.predecessors(&state) {
                    if !assigned.contains(prev) {
                        assigned.insert(prev.clone());
                        stack.push(prev.clone());
                    }
                }
                component.insert(state);
            }
            sccs.push(component);
        }
        sccs
    }
}

impl fmt::Display for KripkeStruct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Atoms: [{}]", self.atoms.join(", "))?;

        let mut states: Vec<_> = self.states.iter().collect();
        states.sort();
        let states: Vec<String> = states
            .iter()
            .map(|(name, label)| format!("{}: {:#b}", name, label))
            .collect();
        writeln!(f, "States: {{{}}}", states.join(", "))?;

        let mut starts: Vec<_> = self.starts.iter().map(String::as_str).collect();
        starts.sort_unstable();
        writeln!(f, "Starts: {{{}}}", starts.join(", "))?;

        let mut trans: Vec<_> = self.trans.iter().collect();
        trans.sort();
        let trans: Vec<String> = trans
            .iter()
            .map(|(from, targets)| format!("{} -> [{}]", from, targets.join(", ")))
            .collect();
        write!(f, "Trans: {{{}}}", trans.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn set(names: &[&str]) -> HashSet<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    // Atoms a, b, c, d; four states on a cycle.
    fn small_graph() -> KripkeStruct {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a", "b", "c", "d"]).unwrap();
        ks.add_states([
            ("s1", 0b0001),
            ("s2", 0b0011),
            ("s3", 0b0110),
            ("s4", 0b1110),
        ])
        .unwrap();
        ks.set_starts(["s1"]).unwrap();
        for (from, to) in [
            ("s1", "s2"),
            ("s2", "s3"),
            ("s2", "s4"),
            ("s3", "s4"),
            ("s3", "s1"),
            ("s4", "s2"),
        ] {
            ks.add_transition(from, to).unwrap();
        }
        ks
    }

    #[test]
    fn test_default_is_empty() {
        let ks = KripkeStruct::new();
        assert!(ks.atoms().is_empty());
        assert!(ks.states().is_empty());
        assert!(ks.starts().is_empty());
        assert!(ks.trans().is_empty());
        assert!(ks.trans_inverted().is_empty());
    }

    #[test]
    fn test_set_atoms() {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a", "b", "c", "d"]).unwrap();
        assert_eq!(ks.atoms(), ["a", "b", "c", "d"]);
        assert_eq!(ks.atom_index("a"), Some(0));
        assert_eq!(ks.atom_index("d"), Some(3));
        assert_eq!(ks.atom_index("e"), None);
    }

    #[test]
    fn test_atoms_frozen_once_states_exist() {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a", "b"]).unwrap();
        ks.add_state("s1", 0b01).unwrap();
        assert_eq!(ks.set_atoms(["a"]), Err(KripkeError::AtomsFrozen));
        assert_eq!(ks.atoms(), ["a", "b"]);
    }

    #[test]
    fn test_add_state() {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a", "b", "c", "d"]).unwrap();
        ks.add_state("s1", 0b1000).unwrap();
        assert_eq!(ks.label("s1"), Ok(0b1000));

        assert_eq!(
            ks.add_state("s1", 0b1111),
            Err(KripkeError::DuplicateState("s1".to_string()))
        );
    }

    #[test]
    fn test_add_state_label_out_of_range() {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a", "b"]).unwrap();
        assert_eq!(
            ks.add_state("s1", 0b100),
            Err(KripkeError::LabelOutOfRange { label: 0b100, atoms: 2 })
        );
        // With no atoms declared, only the empty label is valid.
        let mut ks = KripkeStruct::new();
        assert_eq!(
            ks.add_state("s1", 1),
            Err(KripkeError::LabelOutOfRange { label: 1, atoms: 0 })
        );
        ks.add_state("s2", 0).unwrap();
    }

    #[test]
    fn test_duplicate_labels_are_legal() {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a"]).unwrap();
        ks.add_state("s1", 0b1).unwrap();
        ks.add_state("s2", 0b1).unwrap();
        assert_eq!(ks.label("s1"), Ok(0b1));
        assert_eq!(ks.label("s2"), Ok(0b1));
    }

    #[test]
    fn test_label_set() {
        let ks = small_graph();
        assert_eq!(ks.label_set("s1").unwrap(), set(&["a"]));
        assert_eq!(ks.label_set("s3").unwrap(), set(&["b", "c"]));
        assert_eq!(ks.label_set("s4").unwrap(), set(&["b", "c", "d"]));
        assert_eq!(
            ks.label_set("s9"),
            Err(KripkeError::UnknownState("s9".to_string()))
        );
    }

    #[test]
    fn test_set_starts() {
        let mut ks = small_graph();
        ks.set_starts(["s1", "s4"]).unwrap();
        assert_eq!(*ks.starts(), set(&["s1", "s4"]));

        // Resetting the start states is allowed.
        ks.set_starts(["s1"]).unwrap();
        assert_eq!(*ks.starts(), set(&["s1"]));

        assert_eq!(
            ks.set_starts(["s5"]),
            Err(KripkeError::UnknownState("s5".to_string()))
        );
    }

    #[test]
    fn test_add_transition_unknown_endpoints() {
        let mut ks = small_graph();
        assert_eq!(
            ks.add_transition("s7", "s1"),
            Err(KripkeError::UnknownState("s7".to_string()))
        );
        assert_eq!(
            ks.add_transition("s1", "s7"),
            Err(KripkeError::UnknownState("s7".to_string()))
        );
    }

    #[test]
    fn test_successors_and_predecessors() {
        let ks = small_graph();
        assert_eq!(ks.successors("s2"), &["s3", "s4"]);
        assert_eq!(ks.predecessors("s4"), &["s2", "s3"]);
        // Absent entries mean no successors, not an error.
        assert_eq!(ks.successors("s9"), &[] as &[String]);
    }

    #[test]
    fn test_remove_transition() {
        let mut ks = small_graph();
        ks.remove_transition("s2", "s4");
        assert_eq!(ks.successors("s2"), &["s3"]);
        assert_eq!(ks.predecessors("s4"), &["s3"]);

        // Removing an absent edge has no effect.
        ks.remove_transition("s2", "s4");
        assert_eq!(ks.successors("s2"), &["s3"]);
    }

    #[test]
    fn test_remove_state_cleans_up() {
        let mut ks = small_graph();
        ks.set_starts(["s1", "s2"]).unwrap();
        ks.remove_state("s2");

        assert!(!ks.states().contains_key("s2"));
        assert_eq!(*ks.starts(), set(&["s1"]));
        assert_eq!(ks.successors("s1"), &[] as &[String]);
        assert_eq!(ks.predecessors("s4"), &["s3"]);
        assert_eq!(ks.successors("s4"), &[] as &[String]);

        // Removing an unknown state has no effect.
        ks.remove_state("s9");
        assert_eq!(ks.states().len(), 3);
    }

    #[test]
    fn test_sccs_single_component() {
        let ks = small_graph();
        // s1 -> s2 -> s3 -> s1 and s2 <-> s4: one component.
        let sccs: BTreeSet<BTreeSet<String>> = ks
            .sccs()
            .into_iter()
            .map(|component| component.into_iter().collect())
            .collect();
        let expected: BTreeSet<BTreeSet<String>> =
            [["s1", "s2", "s3", "s4"]].iter().map(|c| c.iter().map(|s| s.to_string()).collect()).collect();
        assert_eq!(sccs, expected);
    }

    #[test]
    fn test_sccs_partition() {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a"]).unwrap();
        ks.add_states([("s1", 0), ("s2", 0), ("s3", 0), ("s4", 1)]).unwrap();
        for (from, to) in [("s1", "s2"), ("s2", "s3"), ("s3", "s2"), ("s3", "s4")] {
            ks.add_transition(from, to).unwrap();
        }
        let sccs: BTreeSet<BTreeSet<String>> = ks
            .sccs()
            .into_iter()
            .map(|component| component.into_iter().collect())
            .collect();
        let expected: BTreeSet<BTreeSet<String>> = [
            vec!["s1"],
            vec!["s2", "s3"],
            vec!["s4"],
        ]
        .iter()
        .map(|c| c.iter().map(|s| s.to_string()).collect())
        .collect();
        assert_eq!(sccs, expected);
    }

    #[test]
    fn test_display() {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(["a", "b", "c", "d"]).unwrap();
        ks.add_states([("s1", 0b0001), ("s2", 0b0011), ("s3", 0b0110)]).unwrap();
        ks.set_starts(["s1"]).unwrap();
        ks.add_transition("s1", "s2").unwrap();
        ks.add_transition("s2", "s3").unwrap();
        ks.add_transition("s2", "s1").unwrap();
        assert_eq!(
            ks.to_string(),
            "Atoms: [a, b, c, d]\n\
             States: {s1: 0b1, s2: 0b11, s3: 0b110}\n\
             Starts: {s1}\n\
             Trans: {s1 -> [s2], s2 -> [s3, s1]}"
        );
    }
}
