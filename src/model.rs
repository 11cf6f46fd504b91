//! One-shot construction of Kripke structures from a nested literal.
//!
//! [`KripkeModel`] is the serializable description a front-end hands to the
//! engine: atom names, a map from state name to integer label, the start
//! states, and the transition map. [`KripkeModel::build`] drives the
//! incremental mutators of [`KripkeStruct`] in order, so a structure built
//! from a literal and one built by hand with equivalent content behave
//! identically under every query. Reading the literal from a file is left to
//! the caller; this module only decodes and builds.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kripke::{KripkeError, KripkeStruct};

/// A nested literal describing a Kripke structure.
///
/// The field names follow the JSON model format:
///
/// ```json
/// {
///     "Atoms": ["a", "b"],
///     "States": {"s0": 1, "s1": 2},
///     "Starts": ["s0"],
///     "Trans": {"s0": ["s1"], "s1": ["s0"]}
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KripkeModel {
    #[serde(rename = "Atoms")]
    pub atoms: Vec<String>,
    #[serde(rename = "States")]
    pub states: BTreeMap<String, u64>,
    #[serde(rename = "Starts")]
    pub starts: Vec<String>,
    #[serde(rename = "Trans", default)]
    pub trans: BTreeMap<String, Vec<String>>,
}

impl KripkeModel {
    /// Decodes a model literal from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Encodes the model literal as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Builds a [`KripkeStruct`] from the literal.
    ///
    /// Atoms, states, starts, and transitions are applied in that order, so
    /// the same referential-integrity errors surface as with hand-driven
    /// mutator calls.
    pub fn build(&self) -> Result<KripkeStruct, KripkeError> {
        let mut ks = KripkeStruct::new();
        ks.set_atoms(self.atoms.iter().cloned())?;
        for (name, &label) in &self.states {
            ks.add_state(name.clone(), label)?;
        }
        ks.set_starts(self.starts.iter().cloned())?;
        for (from, targets) in &self.trans {
            for to in targets {
                ks.add_transition(from, to)?;
            }
        }
        Ok(ks)
    }
}

impl TryFrom<&KripkeModel> for KripkeStruct {
    type Error = KripkeError;

    fn try_from(model: &KripkeModel) -> Result<Self, Self::Error> {
        model.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RING: &str = r#"{
        "Atoms": ["p", "q"],
        "States": {"s0": 1, "s1": 2},
        "Starts": ["s0"],
        "Trans": {"s0": ["s1"], "s1": ["s0"]}
    }"#;

    #[test]
    fn test_from_json() {
        let model = KripkeModel::from_json(RING).unwrap();
        assert_eq!(model.atoms, ["p", "q"]);
        assert_eq!(model.states["s0"], 1);
        assert_eq!(model.states["s1"], 2);
        assert_eq!(model.starts, ["s0"]);
        assert_eq!(model.trans["s0"], ["s1"]);
    }

    #[test]
    fn test_build() {
        let ks = KripkeModel::from_json(RING).unwrap().build().unwrap();
        assert_eq!(ks.atoms(), ["p", "q"]);
        assert_eq!(ks.label("s0"), Ok(1));
        assert_eq!(ks.successors("s0"), &["s1"]);
        assert_eq!(ks.successors("s1"), &["s0"]);
        assert!(ks.starts().contains("s0"));
    }

    #[test]
    fn test_trans_defaults_empty() {
        let model = KripkeModel::from_json(
            r#"{"Atoms": ["p"], "States": {"s0": 1}, "Starts": ["s0"]}"#,
        )
        .unwrap();
        let ks = model.build().unwrap();
        assert!(ks.trans().is_empty());
    }

    #[test]
    fn test_build_rejects_malformed_literals() {
        // Start state never declared.
        let model = KripkeModel::from_json(
            r#"{"Atoms": ["p"], "States": {"s0": 1}, "Starts": ["s9"], "Trans": {}}"#,
        )
        .unwrap();
        assert_eq!(
            model.build().unwrap_err(),
            KripkeError::UnknownState("s9".to_string())
        );

        // Transition target never declared.
        let model = KripkeModel::from_json(
            r#"{"Atoms": ["p"], "States": {"s0": 1}, "Starts": ["s0"], "Trans": {"s0": ["s9"]}}"#,
        )
        .unwrap();
        assert_eq!(
            model.build().unwrap_err(),
            KripkeError::UnknownState("s9".to_string())
        );

        // Label out of range for the declared atoms.
        let model = KripkeModel::from_json(
            r#"{"Atoms": ["p"], "States": {"s0": 2}, "Starts": ["s0"], "Trans": {}}"#,
        )
        .unwrap();
        assert_eq!(
            model.build().unwrap_err(),
            KripkeError::LabelOutOfRange { label: 2, atoms: 1 }
        );
    }

    #[test]
    fn test_json_round_trip() {
        let model = KripkeModel::from_json(RING).unwrap();
        let json = model.to_json().unwrap();
        assert_eq!(KripkeModel::from_json(&json).unwrap(), model);
    }
}
