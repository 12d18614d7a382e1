use std::fmt;

/// One of the two agents taking turns in the game tree.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash, PartialOrd, Ord)]
pub enum Agent {
    /// Agent 0, the maximizing player.
    Player = 0,
    /// Agent 1, the adversary or chance process.
    Opponent = 1,
}

impl Agent {
    pub const ALL: [Agent; 2] = [Agent::Player, Agent::Opponent];

    pub fn opposite(&self) -> Self {
        match self {
            Agent::Player => Agent::Opponent,
            Agent::Opponent => Agent::Player,
        }
    }

    pub fn maximize_score(&self) -> bool {
        match self {
            Agent::Player => true,
            Agent::Opponent => false,
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl From<Agent> for u8 {
    fn from(agent: Agent) -> Self {
        agent as u8
    }
}

impl fmt::Display for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let agent_str = match self {
            Agent::Player => "player",
            Agent::Opponent => "opponent",
        };
        write!(f, "{}", agent_str)
    }
}
