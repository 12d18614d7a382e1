//! One-ply greedy selection.

use log::debug;
use rand::seq::SliceRandom;

use crate::agent::Agent;

use super::{Evaluator, GameAction, GameState, SearchContext, SearchError};

/// Scores the successor of every legal player action and picks uniformly at random
/// among the best. Returns the stop action when the player cannot move.
pub fn reflex_action<S, E>(
    context: &mut SearchContext,
    state: &S,
    evaluator: &E,
) -> Result<S::Action, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    context.reset_stats();
    let actions = state.legal_actions(Agent::Player);

    let mut scores = Vec::with_capacity(actions.len());
    for action in actions.iter() {
        let successor = state.successor(Agent::Player, action)?;
        scores.push(context.evaluate(&successor, evaluator)?);
    }

    let best_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let best_actions: Vec<&S::Action> = actions
        .iter()
        .zip(scores.iter())
        .filter(|(_, score)| **score == best_score)
        .map(|(action, _)| action)
        .collect();

    let chosen = best_actions
        .choose(context.rng())
        .map(|action| (*action).clone())
        .unwrap_or_else(S::Action::stop);
    debug!(
        "reflex chose {:?} among {} best of {} actions (score {})",
        chosen,
        best_actions.len(),
        actions.len(),
        best_score
    );

    Ok(chosen)
}
