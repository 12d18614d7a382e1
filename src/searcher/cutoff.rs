//! Decides where recursion stops.

use crate::agent::Agent;

use super::GameState;

/// Returns true when the ply budget is exhausted or neither agent can move.
///
/// The traversal stops at every node where this holds, and also at any node whose
/// acting agent has no legal action even though the other agent could still move.
/// Those extra nodes report `false` here but are still scored by the evaluation
/// function, exactly once each.
pub fn is_cutoff<S: GameState>(state: &S, remaining_plies: u16) -> bool {
    remaining_plies == 0
        || Agent::ALL
            .iter()
            .all(|agent| state.legal_actions(*agent).is_empty())
}

/// How the search treats a node for the agent about to act.
pub(crate) enum Expansion<A> {
    Cutoff,
    Expand(Vec<A>),
}

/// Classifies a node, generating the acting agent's actions at most once.
///
/// A node whose acting agent is stuck is scored as a cutoff. When the other agent is
/// stuck too this is exactly `is_cutoff`; otherwise it stops the stuck agent from
/// reporting an infinite bound.
pub(crate) fn expand<S: GameState>(
    state: &S,
    remaining_plies: u16,
    agent: Agent,
) -> Expansion<S::Action> {
    if remaining_plies == 0 {
        return Expansion::Cutoff;
    }

    let actions = state.legal_actions(agent);
    if actions.is_empty() {
        Expansion::Cutoff
    } else {
        Expansion::Expand(actions)
    }
}
