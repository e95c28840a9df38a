use crate::agent::{Agent, Trigger};
use crate::constants;
use crate::role::Role;
use crate::sensitivity::SensitivityTable;
use crate::stimulus::StimulusKind;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

/// One roster entry: an agent as it exists before the first tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub name: String,
    pub role: Role,
    pub energy: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub triggers: Vec<Trigger>,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, role: Role, energy: f64) -> Self {
        Self {
            name: name.into(),
            role,
            energy,
            triggers: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for the stimulus stream.
    pub seed: u64,
    /// Number of ticks to run. Signed so that a negative value in a config
    /// file is representable and rejected by [`SimConfig::validate`].
    pub ticks: i64,
    /// Post-stimulus energy at or above which an agent is a fronting candidate.
    pub front_threshold: f64,
    /// Scale of the winner's inhibition on peers.
    pub inhibition_rate: f64,
    /// Energy added per unit of field intensity each tick.
    pub kernel_boost: f64,
    /// Uniform per-tick energy loss.
    pub energy_decay: f64,
    /// Weight for `(role, kind)` pairs missing from `sensitivity`.
    pub default_sensitivity: f64,
    /// Intensity of the global modulating field.
    pub field_intensity: f64,
    pub sensitivity: SensitivityTable,
    /// Population in registration order. Order decides arbitration ties.
    pub roster: Vec<AgentSpec>,
    /// Agent name -> peer name -> access weight in [0, 1].
    pub memory_access: BTreeMap<String, BTreeMap<String, f64>>,
}

fn stock_roster() -> Vec<AgentSpec> {
    vec![
        AgentSpec::new("Nichole", Role::Interface, 0.5),
        AgentSpec::new("Victoria", Role::Strategist, 0.3),
        AgentSpec::new("Natalia", Role::Protector, 0.4),
        AgentSpec::new("Jeanine", Role::Sensory, 0.2),
        AgentSpec::new("Maria", Role::Ecstatic, 0.1),
        AgentSpec::new("Jasmine", Role::Anchor, 0.1),
        AgentSpec::new("Marina", Role::Analyst, 0.2),
        AgentSpec::new("Natasha", Role::Sentinel, 0.05),
    ]
}

fn stock_memory_access() -> BTreeMap<String, BTreeMap<String, f64>> {
    let edges: [(&str, &[(&str, f64)]); 2] = [
        (
            "Natalia",
            &[("Maria", 0.8), ("Jeanine", 0.9), ("Victoria", 0.5)],
        ),
        ("Maria", &[("Natalia", 0.8), ("Jasmine", 0.3)]),
    ];
    edges
        .iter()
        .map(|(owner, peers)| {
            let row: BTreeMap<String, f64> = peers
                .iter()
                .map(|(peer, w)| ((*peer).to_owned(), *w))
                .collect();
            ((*owner).to_owned(), row)
        })
        .collect()
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: constants::DEFAULT_SEED,
            ticks: constants::DEFAULT_TICKS,
            front_threshold: constants::FRONT_THRESHOLD,
            inhibition_rate: constants::INHIBITION_RATE,
            kernel_boost: constants::KERNEL_BOOST,
            energy_decay: constants::ENERGY_DECAY,
            default_sensitivity: constants::DEFAULT_SENSITIVITY,
            field_intensity: constants::DEFAULT_FIELD_INTENSITY,
            sensitivity: SensitivityTable::stock(),
            roster: stock_roster(),
            memory_access: stock_memory_access(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimConfigError {
    #[error("ticks must be non-negative (got {ticks})")]
    NegativeTicks { ticks: i64 },
    #[error("ticks ({actual}) exceeds supported maximum ({max})")]
    TooManyTicks { max: i64, actual: i64 },
    #[error("front_threshold must be finite and positive")]
    InvalidFrontThreshold,
    #[error("inhibition_rate must be finite and non-negative")]
    InvalidInhibitionRate,
    #[error("kernel_boost must be finite and non-negative")]
    InvalidKernelBoost,
    #[error("energy_decay must be finite and non-negative")]
    InvalidEnergyDecay,
    #[error("default_sensitivity must be finite and non-negative")]
    InvalidDefaultSensitivity,
    #[error("field_intensity must be finite and non-negative")]
    InvalidFieldIntensity,
    #[error("sensitivity weight for {role}/{kind} must be finite and non-negative")]
    InvalidSensitivityWeight { role: Role, kind: StimulusKind },
    #[error("roster must contain at least one agent")]
    EmptyPopulation,
    #[error("roster entry {index} has an empty name")]
    EmptyAgentName { index: usize },
    #[error("agent name {name:?} appears more than once in the roster")]
    DuplicateAgentName { name: String },
    #[error("initial energy of {name:?} must be finite and non-negative")]
    InvalidInitialEnergy { name: String },
    #[error("role {role} of {name:?} has no entry in the sensitivity table")]
    UnknownRole { name: String, role: Role },
    #[error("trigger threshold on {name:?} must be finite")]
    InvalidTriggerThreshold { name: String },
    #[error("memory_access names unknown agent {name:?}")]
    UnknownMemoryOwner { name: String },
    #[error("memory_access of {owner:?} names unknown peer {peer:?}")]
    UnknownMemoryPeer { owner: String, peer: String },
    #[error("memory_access weight {owner:?} -> {peer:?} must be within [0,1]")]
    InvalidMemoryWeight { owner: String, peer: String },
}

fn finite_non_negative(x: f64) -> bool {
    x.is_finite() && x >= 0.0
}

impl SimConfig {
    pub const MAX_TICKS: i64 = 10_000_000;

    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_ticks()?;
        self.validate_tunables()?;
        self.validate_sensitivity()?;
        self.validate_roster()?;
        self.validate_memory_access()?;
        Ok(())
    }

    fn validate_ticks(&self) -> Result<(), SimConfigError> {
        if self.ticks < 0 {
            return Err(SimConfigError::NegativeTicks { ticks: self.ticks });
        }
        if self.ticks > Self::MAX_TICKS {
            return Err(SimConfigError::TooManyTicks {
                max: Self::MAX_TICKS,
                actual: self.ticks,
            });
        }
        Ok(())
    }

    fn validate_tunables(&self) -> Result<(), SimConfigError> {
        if !self.front_threshold.is_finite() || self.front_threshold <= 0.0 {
            return Err(SimConfigError::InvalidFrontThreshold);
        }
        if !finite_non_negative(self.inhibition_rate) {
            return Err(SimConfigError::InvalidInhibitionRate);
        }
        if !finite_non_negative(self.kernel_boost) {
            return Err(SimConfigError::InvalidKernelBoost);
        }
        if !finite_non_negative(self.energy_decay) {
            return Err(SimConfigError::InvalidEnergyDecay);
        }
        if !finite_non_negative(self.default_sensitivity) {
            return Err(SimConfigError::InvalidDefaultSensitivity);
        }
        if !finite_non_negative(self.field_intensity) {
            return Err(SimConfigError::InvalidFieldIntensity);
        }
        Ok(())
    }

    fn validate_sensitivity(&self) -> Result<(), SimConfigError> {
        match self
            .sensitivity
            .iter()
            .find(|(_, _, w)| !finite_non_negative(*w))
        {
            Some((role, kind, _)) => Err(SimConfigError::InvalidSensitivityWeight { role, kind }),
            None => Ok(()),
        }
    }

    fn validate_roster(&self) -> Result<(), SimConfigError> {
        if self.roster.is_empty() {
            return Err(SimConfigError::EmptyPopulation);
        }
        let mut seen = HashSet::with_capacity(self.roster.len());
        for (index, spec) in self.roster.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(SimConfigError::EmptyAgentName { index });
            }
            if !seen.insert(spec.name.as_str()) {
                return Err(SimConfigError::DuplicateAgentName {
                    name: spec.name.clone(),
                });
            }
            if !finite_non_negative(spec.energy) {
                return Err(SimConfigError::InvalidInitialEnergy {
                    name: spec.name.clone(),
                });
            }
            if !self.sensitivity.contains_role(spec.role) {
                return Err(SimConfigError::UnknownRole {
                    name: spec.name.clone(),
                    role: spec.role,
                });
            }
            if spec.triggers.iter().any(|t| !t.threshold.is_finite()) {
                return Err(SimConfigError::InvalidTriggerThreshold {
                    name: spec.name.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_memory_access(&self) -> Result<(), SimConfigError> {
        let names: HashSet<&str> = self.roster.iter().map(|s| s.name.as_str()).collect();
        for (owner, row) in &self.memory_access {
            if !names.contains(owner.as_str()) {
                return Err(SimConfigError::UnknownMemoryOwner {
                    name: owner.clone(),
                });
            }
            for (peer, weight) in row {
                if !names.contains(peer.as_str()) {
                    return Err(SimConfigError::UnknownMemoryPeer {
                        owner: owner.clone(),
                        peer: peer.clone(),
                    });
                }
                if !weight.is_finite() || !(0.0..=1.0).contains(weight) {
                    return Err(SimConfigError::InvalidMemoryWeight {
                        owner: owner.clone(),
                        peer: peer.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Instantiate the roster in registration order, attaching memory-access rows.
    pub fn build_population(&self) -> Vec<Agent> {
        self.roster
            .iter()
            .map(|spec| {
                let access = self.memory_access.get(&spec.name).cloned().unwrap_or_default();
                Agent::new(spec.name.clone(), spec.role, spec.energy)
                    .with_memory_access(access)
                    .with_triggers(spec.triggers.clone())
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_default() {
        let config = SimConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_ticks() {
        let config = SimConfig {
            ticks: -1,
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::NegativeTicks { ticks: -1 })
        );
    }

    #[test]
    fn zero_ticks_is_valid() {
        let config = SimConfig {
            ticks: 0,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_population() {
        let config = SimConfig {
            roster: Vec::new(),
            memory_access: BTreeMap::new(),
            ..SimConfig::default()
        };
        assert_eq!(config.validate(), Err(SimConfigError::EmptyPopulation));
    }

    #[test]
    fn validate_rejects_duplicate_names() {
        let config = SimConfig {
            roster: vec![
                AgentSpec::new("A", Role::Interface, 0.1),
                AgentSpec::new("A", Role::Anchor, 0.2),
            ],
            memory_access: BTreeMap::new(),
            ..SimConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::DuplicateAgentName { name }) if name == "A"
        ));
    }

    #[test]
    fn validate_rejects_role_missing_from_table() {
        let config = SimConfig {
            sensitivity: SensitivityTable::new().with(Role::Interface, StimulusKind::Social, 0.9),
            roster: vec![
                AgentSpec::new("A", Role::Interface, 0.1),
                AgentSpec::new("B", Role::Sentinel, 0.1),
            ],
            memory_access: BTreeMap::new(),
            ..SimConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(SimConfigError::UnknownRole {
                name: "B".into(),
                role: Role::Sentinel
            })
        );
    }

    #[test]
    fn validate_rejects_bad_tunables() {
        let cases = [
            (
                SimConfig {
                    front_threshold: 0.0,
                    ..SimConfig::default()
                },
                SimConfigError::InvalidFrontThreshold,
            ),
            (
                SimConfig {
                    inhibition_rate: f64::NAN,
                    ..SimConfig::default()
                },
                SimConfigError::InvalidInhibitionRate,
            ),
            (
                SimConfig {
                    energy_decay: -0.1,
                    ..SimConfig::default()
                },
                SimConfigError::InvalidEnergyDecay,
            ),
            (
                SimConfig {
                    field_intensity: f64::INFINITY,
                    ..SimConfig::default()
                },
                SimConfigError::InvalidFieldIntensity,
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }

    #[test]
    fn validate_rejects_negative_sensitivity_weight() {
        let mut config = SimConfig::default();
        config
            .sensitivity
            .insert(Role::Anchor, StimulusKind::Logical, -0.4);
        assert_eq!(
            config.validate(),
            Err(SimConfigError::InvalidSensitivityWeight {
                role: Role::Anchor,
                kind: StimulusKind::Logical
            })
        );
    }

    #[test]
    fn validate_rejects_unknown_memory_peer() {
        let mut config = SimConfig::default();
        config
            .memory_access
            .entry("Maria".into())
            .or_default()
            .insert("Nobody".into(), 0.5);
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::UnknownMemoryPeer { peer, .. }) if peer == "Nobody"
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_memory_weight() {
        let mut config = SimConfig::default();
        config
            .memory_access
            .entry("Maria".into())
            .or_default()
            .insert("Natalia".into(), 1.5);
        assert!(matches!(
            config.validate(),
            Err(SimConfigError::InvalidMemoryWeight { .. })
        ));
    }

    #[test]
    fn trigger_target_need_not_exist() {
        let mut config = SimConfig::default();
        config.roster[0].triggers.push(Trigger {
            stimulus_kind: StimulusKind::Sensory,
            target: "Absent".into(),
            threshold: 0.4,
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn build_population_preserves_order_and_attaches_memory() {
        let config = SimConfig::default();
        let agents = config.build_population();
        assert_eq!(agents.len(), 8);
        assert_eq!(agents[0].name(), "Nichole");
        assert_eq!(agents[7].name(), "Natasha");
        let natalia = agents.iter().find(|a| a.name() == "Natalia").unwrap();
        assert_eq!(natalia.memory_access().get("Jeanine"), Some(&0.9));
        assert!(agents[0].memory_access().is_empty());
    }

    #[test]
    fn partial_config_json_deserializes_with_defaults() {
        let json = r#"{
            "ticks": 10,
            "front_threshold": 0.5,
            "roster": [
                {"name": "A", "role": "Protector", "energy": 0.9},
                {"name": "B", "role": "Analyst", "energy": 0.1,
                 "triggers": [{"stimulus_kind": "logical", "target": "A", "threshold": 0.3}]}
            ],
            "memory_access": {}
        }"#;
        let cfg: SimConfig = serde_json::from_str(json).expect("partial config should parse");
        assert_eq!(cfg.ticks, 10);
        assert_eq!(cfg.seed, constants::DEFAULT_SEED);
        assert_eq!(cfg.inhibition_rate, constants::INHIBITION_RATE);
        assert_eq!(cfg.roster[1].triggers.len(), 1);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn unknown_stimulus_key_fails_to_load() {
        let json = r#"{ "sensitivity": { "Protector": { "sonic": 0.9 } } }"#;
        assert!(serde_json::from_str::<SimConfig>(json).is_err());
    }

    #[test]
    fn negative_ticks_in_json_fail_validation() {
        let cfg: SimConfig = serde_json::from_str(r#"{ "ticks": -3 }"#).unwrap();
        assert!(matches!(
            cfg.validate(),
            Err(SimConfigError::NegativeTicks { ticks: -3 })
        ));
    }
}
