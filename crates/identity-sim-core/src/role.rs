use serde::{Deserialize, Serialize};
use std::fmt;

/// Behavioural category of an agent. Keys the sensitivity table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Role {
    Interface,
    Strategist,
    Protector,
    Sensory,
    Ecstatic,
    Anchor,
    Analyst,
    Sentinel,
}

impl Role {
    pub const ALL: [Role; 8] = [
        Role::Interface,
        Role::Strategist,
        Role::Protector,
        Role::Sensory,
        Role::Ecstatic,
        Role::Anchor,
        Role::Analyst,
        Role::Sentinel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Interface => "Interface",
            Role::Strategist => "Strategist",
            Role::Protector => "Protector",
            Role::Sensory => "Sensory",
            Role::Ecstatic => "Ecstatic",
            Role::Anchor => "Anchor",
            Role::Analyst => "Analyst",
            Role::Sentinel => "Sentinel",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_uses_variant_names() {
        assert_eq!(serde_json::to_string(&Role::Sentinel).unwrap(), "\"Sentinel\"");
        let role: Role = serde_json::from_str("\"Anchor\"").unwrap();
        assert_eq!(role, Role::Anchor);
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"Gatekeeper\"").is_err());
    }
}
