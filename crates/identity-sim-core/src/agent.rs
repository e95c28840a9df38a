use crate::metrics::FrontEvent;
use crate::role::Role;
use crate::sensitivity::SensitivityTable;
use crate::stimulus::{Stimulus, StimulusKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Associates a stimulus kind with a target agent and an activation threshold.
///
/// `target` is a by-name reference; the named agent need not exist. The
/// activation loop carries triggers as static data and never reads them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trigger {
    pub stimulus_kind: StimulusKind,
    pub target: String,
    pub threshold: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    name: String,
    role: Role,
    pub energy: f64,
    /// Peer name -> access weight in [0, 1]. Inert relational data.
    memory_access: BTreeMap<String, f64>,
    triggers: Vec<Trigger>,
}

impl Agent {
    pub fn new(name: impl Into<String>, role: Role, energy: f64) -> Self {
        Self {
            name: name.into(),
            role,
            energy,
            memory_access: BTreeMap::new(),
            triggers: Vec::new(),
        }
    }

    pub fn with_memory_access(mut self, memory_access: BTreeMap<String, f64>) -> Self {
        self.memory_access = memory_access;
        self
    }

    pub fn with_triggers(mut self, triggers: Vec<Trigger>) -> Self {
        self.triggers = triggers;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn memory_access(&self) -> &BTreeMap<String, f64> {
        &self.memory_access
    }

    pub fn triggers(&self) -> &[Trigger] {
        &self.triggers
    }

    /// Add `intensity * sensitivity` to energy and report whether the updated
    /// energy reached `front_threshold`.
    pub fn receive_stimulus(
        &mut self,
        stimulus: &Stimulus,
        sensitivity: &SensitivityTable,
        default_sensitivity: f64,
        front_threshold: f64,
    ) -> bool {
        let weight = sensitivity.lookup(self.role, stimulus.kind, default_sensitivity);
        self.energy += stimulus.intensity * weight;
        self.energy >= front_threshold
    }
}

/// Apply the winner's competitive inhibition to every other agent.
///
/// Each peer's energy is scaled by `1 - winner.energy * inhibition_rate`,
/// clamped at zero so a strong winner drives peers to zero rather than
/// flipping their sign. The winner's own energy is untouched.
pub fn front(agents: &mut [Agent], winner: usize, inhibition_rate: f64) -> FrontEvent {
    let event = FrontEvent {
        index: winner,
        name: agents[winner].name.clone(),
        energy: agents[winner].energy,
    };
    let multiplier = (1.0 - event.energy * inhibition_rate).max(0.0);
    for (idx, other) in agents.iter_mut().enumerate() {
        if idx != winner {
            other.energy *= multiplier;
        }
    }
    tracing::info!("{} fronts with energy {:.2}", event.name, event.energy);
    event
}

/// Subtract `amount` from every agent's energy, flooring at zero.
pub fn decay(agents: &mut [Agent], amount: f64) {
    for agent in agents {
        agent.energy = (agent.energy - amount).max(0.0);
    }
}
