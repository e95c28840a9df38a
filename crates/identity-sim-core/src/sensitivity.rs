use crate::role::Role;
use crate::stimulus::StimulusKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-role weights converting stimulus intensity into an energy delta.
///
/// Keys are closed enums, so a table that deserialized successfully never
/// contains an unknown role or stimulus kind. Missing `(role, kind)` pairs fall
/// back to the caller's default weight at lookup time.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SensitivityTable {
    weights: BTreeMap<Role, BTreeMap<StimulusKind, f64>>,
}

impl SensitivityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, replacing any existing weight for the pair.
    pub fn with(mut self, role: Role, kind: StimulusKind, weight: f64) -> Self {
        self.insert(role, kind, weight);
        self
    }

    pub fn insert(&mut self, role: Role, kind: StimulusKind, weight: f64) {
        self.weights.entry(role).or_default().insert(kind, weight);
    }

    /// Register a role with no explicit weights; all its lookups use the default.
    pub fn insert_role(&mut self, role: Role) {
        self.weights.entry(role).or_default();
    }

    pub fn contains_role(&self, role: Role) -> bool {
        self.weights.contains_key(&role)
    }

    pub fn get(&self, role: Role, kind: StimulusKind) -> Option<f64> {
        self.weights.get(&role)?.get(&kind).copied()
    }

    pub fn lookup(&self, role: Role, kind: StimulusKind, default: f64) -> f64 {
        self.get(role, kind).unwrap_or(default)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, StimulusKind, f64)> + '_ {
        self.weights
            .iter()
            .flat_map(|(role, row)| row.iter().map(move |(kind, w)| (*role, *kind, *w)))
    }

    /// Stock weights for every [`Role`].
    pub fn stock() -> Self {
        Self::new()
            .with(Role::Interface, StimulusKind::Emotional, 0.5)
            .with(Role::Interface, StimulusKind::Logical, 0.5)
            .with(Role::Interface, StimulusKind::Sensory, 0.4)
            .with(Role::Interface, StimulusKind::Social, 0.9)
            .with(Role::Strategist, StimulusKind::Emotional, 0.2)
            .with(Role::Strategist, StimulusKind::Logical, 0.9)
            .with(Role::Strategist, StimulusKind::Social, 0.5)
            .with(Role::Protector, StimulusKind::Emotional, 0.9)
            .with(Role::Protector, StimulusKind::Sensory, 0.6)
            .with(Role::Protector, StimulusKind::Social, 0.4)
            .with(Role::Sensory, StimulusKind::Emotional, 0.6)
            .with(Role::Sensory, StimulusKind::Sensory, 0.9)
            .with(Role::Ecstatic, StimulusKind::Emotional, 0.8)
            .with(Role::Ecstatic, StimulusKind::Sensory, 0.7)
            .with(Role::Ecstatic, StimulusKind::Social, 0.6)
            .with(Role::Anchor, StimulusKind::Emotional, 0.3)
            .with(Role::Anchor, StimulusKind::Logical, 0.4)
            .with(Role::Anchor, StimulusKind::Social, 0.3)
            .with(Role::Analyst, StimulusKind::Logical, 0.9)
            .with(Role::Analyst, StimulusKind::Sensory, 0.3)
            .with(Role::Sentinel, StimulusKind::Emotional, 0.7)
            .with(Role::Sentinel, StimulusKind::Sensory, 0.8)
            .with(Role::Sentinel, StimulusKind::Social, 0.2)
    }
}
