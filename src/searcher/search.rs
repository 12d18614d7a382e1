//! Depth-limited adversarial search.
//!
//! # Core Algorithm
//!
//! The tree alternates the player (agent 0, maximizing) and the opponent (agent 1).
//! A logical search depth `d` is expanded to `2d` plies so both agents move `d` times
//! before the evaluation function scores the frontier. Every node returns a
//! [`SearchResult`]: the best value reachable from it and the action that reaches it.
//!
//! One recursive traversal serves all three strategies. The [`Propagation`] policy
//! decides how opponent nodes combine their children (minimum or mean) and whether a
//! node may skip its remaining siblings.
//!
//! ## Tie-breaking
//! A child replaces the current best only when its value is strictly better, so the
//! first action in generation order wins ties. Alpha-beta can lock in an earlier
//! tied action at a pruned node, so the action it reports may differ from minimax
//! while the root value never does.
//!
//! ## Chance nodes
//! Under expectimax the opponent is a uniform random process. Its node is worth the
//! mean of its children, and the action it reports is a random legal action. Only
//! the value of a chance node is ever consumed.
//!
//! ## Deadlines
//! A caller may attach a deadline to the [`SearchContext`]. It is checked before
//! each cutoff evaluation; once passed the search aborts with
//! [`SearchError::DeadlineExceeded`].

use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

use crate::agent::Agent;

use super::cutoff::{expand, Expansion};
use super::strategy::{
    expected_value, AlphaBetaPolicy, ExpectimaxPolicy, MinimaxPolicy, OpponentModel,
    Propagation, Strategy, Window,
};
use super::{Evaluator, GameAction, GameState, InvalidAction};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    #[error("depth must be at least 1")]
    DepthTooLow,
    #[error("invalid action: {0}")]
    InvalidAction(#[from] InvalidAction),
    #[error("evaluation function returned {value}")]
    InvalidEvaluation { value: f64 },
    #[error("search deadline exceeded")]
    DeadlineExceeded,
}

/// The value of a node and the action, taken at that node, that achieves it.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchResult<A> {
    pub value: f64,
    pub action: A,
}

impl<A> SearchResult<A> {
    pub fn new(value: f64, action: A) -> Self {
        Self { value, action }
    }
}

/// Statistics collected during search.
#[derive(Clone, Copy, Default, Debug)]
struct SearchStats {
    nodes: usize,
    evaluations: usize,
    prunes: usize,
    chance_nodes: usize,
    last_score: Option<f64>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_result(&mut self, score: f64, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Per-search bookkeeping: statistics, an optional deadline, and the RNG used for the
/// placeholder action at chance nodes.
pub struct SearchContext {
    stats: SearchStats,
    deadline: Option<Instant>,
    rng: StdRng,
}

impl Default for SearchContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchContext {
    pub fn new() -> Self {
        Self {
            stats: SearchStats::default(),
            deadline: None,
            rng: StdRng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            stats: SearchStats::default(),
            deadline: None,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn set_deadline(&mut self, deadline: Option<Instant>) {
        self.deadline = deadline;
    }

    /// Sets the deadline `limit` from now.
    pub fn set_time_limit(&mut self, limit: Duration) {
        self.deadline = Some(Instant::now() + limit);
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.nodes
    }

    /// Number of times the evaluation function was invoked.
    pub fn evaluation_count(&self) -> usize {
        self.stats.evaluations
    }

    /// Number of nodes that skipped at least one sibling.
    pub fn prune_count(&self) -> usize {
        self.stats.prunes
    }

    pub fn chance_node_count(&self) -> usize {
        self.stats.chance_nodes
    }

    pub fn last_score(&self) -> Option<f64> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }

    pub(crate) fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Scores a state with the evaluation function, honoring the deadline.
    pub(crate) fn evaluate<S, E>(&mut self, state: &S, evaluator: &E) -> Result<f64, SearchError>
    where
        S: GameState,
        E: Evaluator<S>,
    {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                warn!(
                    "search deadline exceeded after {} evaluations",
                    self.stats.evaluations
                );
                return Err(SearchError::DeadlineExceeded);
            }
        }

        self.stats.evaluations += 1;
        let value = evaluator.evaluate(state);
        if value.is_nan() {
            return Err(SearchError::InvalidEvaluation { value });
        }
        Ok(value)
    }
}

/// Returns the action the player should take from `root`.
///
/// Searches `depth` rounds (`2 * depth` plies) with the given strategy. Returns the
/// stop action when the player has no legal action at the root.
///
/// # Examples
///
/// ```
/// use tile_search::action::Action;
/// use tile_search::board::Board;
/// use tile_search::evaluate::ScoreEvaluator;
/// use tile_search::searcher::{choose_action, Strategy};
///
/// let board: Board = "2,2,0,0/0,0,0,0/0,0,0,0/0,0,0,0".parse().unwrap();
/// let action = choose_action(&board, 1, Strategy::AlphaBeta, &ScoreEvaluator).unwrap();
/// assert_eq!(action.direction(), Action::Left);
/// ```
pub fn choose_action<S, E>(
    root: &S,
    depth: u8,
    strategy: Strategy,
    evaluator: &E,
) -> Result<S::Action, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    let mut context = SearchContext::new();
    search_best_action(&mut context, root, depth, strategy, evaluator).map(|result| result.action)
}

/// Like [`choose_action`], but reuses `context` and returns the root value too.
///
/// # Returns
///
/// - `Ok(result)` - The root value and the player's best action
/// - `Err(SearchError::DepthTooLow)` - If depth is < 1
/// - `Err(SearchError::InvalidAction)` - If the game state rejected one of its own legal actions
/// - `Err(SearchError::InvalidEvaluation)` - If the evaluation function returned NaN
/// - `Err(SearchError::DeadlineExceeded)` - If the context deadline passed mid-search
#[must_use = "search returns the best action found"]
pub fn search_best_action<S, E>(
    context: &mut SearchContext,
    root: &S,
    depth: u8,
    strategy: Strategy,
    evaluator: &E,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
{
    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    context.reset_stats();
    let start = Instant::now();
    let plies = u16::from(depth) * 2;
    debug!("{} search depth: {} ({} plies)", strategy, depth, plies);

    let result = if root.legal_actions(Agent::Player).is_empty() {
        debug!("no legal actions at root, stopping");
        let value = context.evaluate(root, evaluator)?;
        SearchResult::new(value, S::Action::stop())
    } else {
        match strategy {
            Strategy::Minimax => search_node(
                context,
                root,
                evaluator,
                &MinimaxPolicy,
                plies,
                Agent::Player,
                Window::full(),
            )?,
            Strategy::AlphaBeta => search_node(
                context,
                root,
                evaluator,
                &AlphaBetaPolicy,
                plies,
                Agent::Player,
                Window::full(),
            )?,
            Strategy::Expectimax => search_node(
                context,
                root,
                evaluator,
                &ExpectimaxPolicy,
                plies,
                Agent::Player,
                Window::full(),
            )?,
        }
    };

    context.stats.record_result(result.value, start.elapsed());
    debug!(
        "{} chose {:?} (value {}) after {} nodes, {} evaluations, {} prunes",
        strategy,
        result.action,
        result.value,
        context.searched_position_count(),
        context.evaluation_count(),
        context.prune_count()
    );

    Ok(result)
}

/// Shared recursive traversal.
///
/// `agent` is the agent about to act; the player maximizes, and the opponent
/// minimizes or averages depending on the policy.
fn search_node<S, E, P>(
    context: &mut SearchContext,
    state: &S,
    evaluator: &E,
    policy: &P,
    remaining_plies: u16,
    agent: Agent,
    mut window: Window,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
    P: Propagation,
{
    context.stats.nodes += 1;

    let actions = match expand(state, remaining_plies, agent) {
        Expansion::Cutoff => {
            let value = context.evaluate(state, evaluator)?;
            trace!("cutoff with {} plies left: {}", remaining_plies, value);
            return Ok(SearchResult::new(value, S::Action::stop()));
        }
        Expansion::Expand(actions) => actions,
    };

    if agent == Agent::Opponent && policy.opponent_model() == OpponentModel::Chance {
        return chance_node(context, state, evaluator, policy, remaining_plies, actions);
    }

    let maximizing = agent.maximize_score();
    let mut best: Option<SearchResult<S::Action>> = None;

    for (index, action) in actions.iter().enumerate() {
        let child = state.successor(agent, action)?;
        let value = search_node(
            context,
            &child,
            evaluator,
            policy,
            remaining_plies - 1,
            agent.opposite(),
            window,
        )?
        .value;

        let is_better = match &best {
            None => true,
            Some(current) if maximizing => value > current.value,
            Some(current) => value < current.value,
        };
        if is_better {
            best = Some(SearchResult::new(value, action.clone()));
        }

        if maximizing {
            window.raise_alpha(value);
        } else {
            window.lower_beta(value);
        }

        if policy.should_prune(&window) {
            if index + 1 < actions.len() {
                context.stats.prunes += 1;
                trace!(
                    "pruned {} siblings at [{}, {}]",
                    actions.len() - index - 1,
                    window.alpha,
                    window.beta
                );
            }
            break;
        }
    }

    match best {
        Some(result) => Ok(result),
        None => Ok(SearchResult::new(
            context.evaluate(state, evaluator)?,
            S::Action::stop(),
        )),
    }
}

/// An opponent node under the chance model: worth the mean of its children.
fn chance_node<S, E, P>(
    context: &mut SearchContext,
    state: &S,
    evaluator: &E,
    policy: &P,
    remaining_plies: u16,
    actions: Vec<S::Action>,
) -> Result<SearchResult<S::Action>, SearchError>
where
    S: GameState,
    E: Evaluator<S>,
    P: Propagation,
{
    context.stats.chance_nodes += 1;

    let mut values = Vec::with_capacity(actions.len());
    for action in actions.iter() {
        let child = state.successor(Agent::Opponent, action)?;
        let result = search_node(
            context,
            &child,
            evaluator,
            policy,
            remaining_plies - 1,
            Agent::Player,
            Window::full(),
        )?;
        values.push(result.value);
    }

    let action = actions
        .choose(context.rng())
        .cloned()
        .unwrap_or_else(S::Action::stop);

    Ok(SearchResult::new(expected_value(&values), action))
}
