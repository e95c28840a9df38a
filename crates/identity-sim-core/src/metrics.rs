use crate::agent::Agent;
use crate::stimulus::Stimulus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Emitted once per tick by the arbitration winner, before inhibition is applied.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrontEvent {
    pub index: usize,
    pub name: String,
    pub energy: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentEnergy {
    pub name: String,
    pub energy: f64,
}

/// State of the population at the end of one tick, after decay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TickObservation {
    pub tick: u64,
    pub stimulus: Stimulus,
    /// Number of agents at or above the front threshold after intake.
    pub candidates: usize,
    pub front: Option<FrontEvent>,
    pub energies: Vec<AgentEnergy>,
}

impl TickObservation {
    pub(crate) fn capture(
        tick: u64,
        stimulus: Stimulus,
        candidates: usize,
        front: Option<FrontEvent>,
        agents: &[Agent],
    ) -> Self {
        Self {
            tick,
            stimulus,
            candidates,
            front,
            energies: agents
                .iter()
                .map(|a| AgentEnergy {
                    name: a.name().to_owned(),
                    energy: a.energy,
                })
                .collect(),
        }
    }
}

impl fmt::Display for TickObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[t={:03}] ", self.tick)?;
        for (i, entry) in self.energies.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}:{:.2}", entry.name, entry.energy)?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontCount {
    pub name: String,
    pub count: usize,
}

fn default_schema_version() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub ticks: u64,
    pub seed: u64,
    /// Ticks on which no agent reached the threshold.
    pub idle_ticks: u64,
    pub front_counts: Vec<FrontCount>,
    /// Winner name per tick; `None` on idle ticks.
    pub winners: Vec<Option<String>>,
    pub final_energies: Vec<AgentEnergy>,
}

impl RunSummary {
    /// Agent with the most fronting ticks; ties go to the earlier agent.
    pub fn dominant(&self) -> Option<&FrontCount> {
        self.front_counts
            .iter()
            .filter(|c| c.count > 0)
            .fold(None, |best: Option<&FrontCount>, c| match best {
                Some(b) if b.count >= c.count => Some(b),
                _ => Some(c),
            })
    }
}
