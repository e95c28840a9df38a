use crate::agent::Agent;

/// Process-wide scalar that lifts every agent's energy uniformly each tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Field {
    pub intensity: f64,
}

impl Field {
    pub fn new(intensity: f64) -> Self {
        Self { intensity }
    }

    /// Energy added to each agent per tick for a given boost constant.
    pub fn boost(&self, kernel_boost: f64) -> f64 {
        self.intensity * kernel_boost
    }

    /// Add `intensity * kernel_boost` to every agent. Independent per agent.
    pub fn modulate(&self, agents: &mut [Agent], kernel_boost: f64) {
        let boost = self.boost(kernel_boost);
        for agent in agents {
            agent.energy += boost;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;

    #[test]
    fn modulate_adds_same_boost_to_every_agent() {
        let mut agents = vec![
            Agent::new("A", Role::Interface, 0.0),
            Agent::new("B", Role::Anchor, 0.4),
        ];
        Field::new(0.6).modulate(&mut agents, 0.5);
        assert!((agents[0].energy - 0.3).abs() < 1e-12);
        assert!((agents[1].energy - 0.7).abs() < 1e-12);
    }

    #[test]
    fn zero_intensity_is_a_no_op() {
        let mut agents = vec![Agent::new("A", Role::Interface, 0.2)];
        Field::new(0.0).modulate(&mut agents, 0.5);
        assert_eq!(agents[0].energy, 0.2);
    }

    #[test]
    fn order_of_agents_does_not_change_result() {
        let mut forward = vec![
            Agent::new("A", Role::Interface, 0.1),
            Agent::new("B", Role::Anchor, 0.2),
        ];
        let mut reversed: Vec<Agent> = forward.iter().rev().cloned().collect();
        let field = Field::new(0.3);
        field.modulate(&mut forward, 0.2);
        field.modulate(&mut reversed, 0.2);
        assert_eq!(forward[0].energy, reversed[1].energy);
        assert_eq!(forward[1].energy, reversed[0].energy);
    }
}
