//! Domain-agnostic tests for the search strategies using explicit game trees.
//!
//! Test coverage:
//! - Minimax and alpha-beta root values agree (hand-built and random trees)
//! - Pruning reduces evaluations without changing the value
//! - Expectimax averaging at chance nodes
//! - Cutoff handling, stuck agents, terminal roots
//! - Determinism, tie-breaking, depth scaling
//! - Error handling (zero depth, invalid actions, NaN evaluations, deadlines)
//! - Reflex selection

use super::*;
use crate::action::Action;
use crate::agent::Agent;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::time::{Duration, Instant};

#[derive(Clone, Debug, Default)]
struct TreeNode {
    value: f64,
    player: Vec<usize>,
    opponent: Vec<usize>,
    /// Advertises one more player action than there are children.
    phantom_action: bool,
}

/// A position in an explicit game tree. Action `i` in `Action::DIRECTIONS` leads to
/// the agent's `i`th child.
#[derive(Clone, Debug)]
struct TreeState {
    nodes: Rc<Vec<TreeNode>>,
    current: usize,
}

impl PartialEq for TreeState {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
    }
}

impl Eq for TreeState {}

impl Hash for TreeState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.current.hash(state);
    }
}

impl TreeState {
    fn node(&self) -> &TreeNode {
        &self.nodes[self.current]
    }

    fn children(&self, agent: Agent) -> &[usize] {
        match agent {
            Agent::Player => &self.node().player,
            Agent::Opponent => &self.node().opponent,
        }
    }
}

impl GameState for TreeState {
    type Action = Action;

    fn legal_actions(&self, agent: Agent) -> Vec<Action> {
        let mut count = self.children(agent).len();
        if agent == Agent::Player && self.node().phantom_action {
            count += 1;
        }
        Action::DIRECTIONS.iter().copied().take(count).collect()
    }

    fn successor(&self, agent: Agent, action: &Action) -> Result<Self, InvalidAction> {
        let index = Action::DIRECTIONS
            .iter()
            .position(|direction| direction == action)
            .ok_or_else(|| InvalidAction::new(agent, action))?;
        let child = *self
            .children(agent)
            .get(index)
            .ok_or_else(|| InvalidAction::new(agent, action))?;
        Ok(Self {
            nodes: Rc::clone(&self.nodes),
            current: child,
        })
    }

    fn score(&self) -> f64 {
        self.node().value
    }

    fn max_tile(&self) -> u32 {
        0
    }
}

#[derive(Default)]
struct TreeBuilder {
    nodes: Vec<TreeNode>,
}

impl TreeBuilder {
    fn push(&mut self, node: TreeNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn leaf(&mut self, value: f64) -> usize {
        self.push(TreeNode {
            value,
            ..TreeNode::default()
        })
    }

    fn leaves(&mut self, values: &[f64]) -> Vec<usize> {
        values.iter().map(|&value| self.leaf(value)).collect()
    }

    /// A node where the player moves to `children`.
    fn player(&mut self, value: f64, children: Vec<usize>) -> usize {
        self.push(TreeNode {
            value,
            player: children,
            ..TreeNode::default()
        })
    }

    /// A node where the opponent moves to `children`.
    fn opponent(&mut self, value: f64, children: Vec<usize>) -> usize {
        self.push(TreeNode {
            value,
            opponent: children,
            ..TreeNode::default()
        })
    }

    fn build(self, root: usize) -> TreeState {
        TreeState {
            nodes: Rc::new(self.nodes),
            current: root,
        }
    }
}

fn node_value(state: &TreeState) -> f64 {
    state.score()
}

/// The textbook two-ply tree: min values 3, 2, 2; minimax picks the first branch.
fn textbook_tree() -> TreeState {
    let mut builder = TreeBuilder::default();
    let a = builder.leaves(&[3.0, 12.0, 8.0]);
    let b = builder.leaves(&[2.0, 4.0, 6.0]);
    let c = builder.leaves(&[14.0, 5.0, 2.0]);
    let a = builder.opponent(0.0, a);
    let b = builder.opponent(0.0, b);
    let c = builder.opponent(0.0, c);
    let root = builder.player(0.0, vec![a, b, c]);
    builder.build(root)
}

/// Builds a random alternating tree with `plies` levels below the root.
fn random_tree(rng: &mut StdRng, plies: u8) -> TreeState {
    fn grow(builder: &mut TreeBuilder, rng: &mut StdRng, plies: u8, agent: Agent) -> usize {
        let value = rng.gen_range(-50..50) as f64;
        if plies == 0 {
            return builder.leaf(value);
        }
        let width = rng.gen_range(1..=4);
        let children = (0..width)
            .map(|_| grow(builder, rng, plies - 1, agent.opposite()))
            .collect();
        match agent {
            Agent::Player => builder.player(value, children),
            Agent::Opponent => builder.opponent(value, children),
        }
    }

    let mut builder = TreeBuilder::default();
    let root = grow(&mut builder, rng, plies, Agent::Player);
    builder.build(root)
}

fn search(
    state: &TreeState,
    depth: u8,
    strategy: Strategy,
) -> (SearchResult<Action>, SearchContext) {
    let mut context = SearchContext::with_seed(7);
    let result = search_best_action(&mut context, state, depth, strategy, &node_value).unwrap();
    (result, context)
}

#[test]
fn test_minimax_textbook_tree() {
    let (result, context) = search(&textbook_tree(), 1, Strategy::Minimax);

    assert_eq!(result, SearchResult::new(3.0, Action::Up));
    assert_eq!(context.evaluation_count(), 9);
    assert_eq!(context.prune_count(), 0);
}

#[test]
fn test_alpha_beta_prunes_textbook_tree() {
    let (minimax, minimax_context) = search(&textbook_tree(), 1, Strategy::Minimax);
    let (alpha_beta, alpha_beta_context) = search(&textbook_tree(), 1, Strategy::AlphaBeta);

    assert_eq!(alpha_beta.value, minimax.value);
    assert_eq!(alpha_beta.action, Action::Up);
    assert_eq!(alpha_beta_context.evaluation_count(), 7);
    assert!(
        alpha_beta_context.evaluation_count() < minimax_context.evaluation_count(),
        "alpha-beta should evaluate fewer leaves ({} vs {})",
        alpha_beta_context.evaluation_count(),
        minimax_context.evaluation_count()
    );
    assert_eq!(alpha_beta_context.prune_count(), 1);
}

#[test]
fn test_alpha_beta_prunes_deeper_tree() {
    // Three plies: the second player subtree is refuted by its first grandchild.
    let mut builder = TreeBuilder::default();
    let left_leaves = builder.leaves(&[10.0, 9.0]);
    let left = builder.player(0.0, left_leaves);
    let right_leaves = builder.leaves(&[8.0, 7.0]);
    let right = builder.player(0.0, right_leaves);
    let first = builder.opponent(0.0, vec![left, right]);

    let refuted_leaves = builder.leaves(&[1.0, 2.0]);
    let refuted = builder.player(0.0, refuted_leaves);
    let unexplored_leaves = builder.leaves(&[100.0, 200.0]);
    let unexplored = builder.player(0.0, unexplored_leaves);
    let second = builder.opponent(0.0, vec![refuted, unexplored]);

    let root = builder.player(0.0, vec![first, second]);
    let state = builder.build(root);

    let (minimax, minimax_context) = search(&state, 2, Strategy::Minimax);
    let (alpha_beta, alpha_beta_context) = search(&state, 2, Strategy::AlphaBeta);

    assert_eq!(minimax.value, 8.0);
    assert_eq!(alpha_beta.value, minimax.value);
    assert_eq!(alpha_beta.action, Action::Up);
    assert!(alpha_beta_context.evaluation_count() < minimax_context.evaluation_count());
    assert!(alpha_beta_context.searched_position_count() < minimax_context.searched_position_count());
}

#[test]
fn test_alpha_beta_matches_minimax_on_random_trees() {
    let mut rng = StdRng::seed_from_u64(2048);

    for _ in 0..200 {
        let plies = rng.gen_range(1..=6);
        let state = random_tree(&mut rng, plies);

        for depth in 1..=3 {
            let (minimax, _) = search(&state, depth, Strategy::Minimax);
            let (alpha_beta, _) = search(&state, depth, Strategy::AlphaBeta);
            assert_eq!(
                alpha_beta.value, minimax.value,
                "alpha-beta and minimax disagree at depth {}",
                depth
            );
        }
    }
}

#[test]
fn test_minimax_and_alpha_beta_are_deterministic() {
    let mut rng = StdRng::seed_from_u64(99);
    let state = random_tree(&mut rng, 6);

    for strategy in [Strategy::Minimax, Strategy::AlphaBeta].iter() {
        let mut first_context = SearchContext::with_seed(1);
        let mut second_context = SearchContext::with_seed(2);
        let first =
            search_best_action(&mut first_context, &state, 3, *strategy, &node_value).unwrap();
        let second =
            search_best_action(&mut second_context, &state, 3, *strategy, &node_value).unwrap();
        assert_eq!(first, second, "{} is not deterministic", strategy);
    }
}

#[test]
fn test_expectimax_averages_chance_node() {
    let mut builder = TreeBuilder::default();
    let leaves = builder.leaves(&[1.0, 2.0, 6.0]);
    let chance = builder.opponent(0.0, leaves);
    let root = builder.player(0.0, vec![chance]);
    let state = builder.build(root);

    let (result, context) = search(&state, 1, Strategy::Expectimax);

    assert_eq!(result.value, 3.0);
    assert_eq!(result.action, Action::Up);
    assert_eq!(context.chance_node_count(), 1);
}

#[test]
fn test_expectimax_textbook_tree() {
    let (result, context) = search(&textbook_tree(), 1, Strategy::Expectimax);

    assert!((result.value - 23.0 / 3.0).abs() < 1e-9);
    assert_eq!(result.action, Action::Up);
    assert_eq!(context.evaluation_count(), 9);
    assert_eq!(context.chance_node_count(), 3);
}

#[test]
fn test_expectimax_prefers_risky_branch_minimax_avoids() {
    let mut builder = TreeBuilder::default();
    let safe_leaves = builder.leaves(&[5.0, 5.0]);
    let safe = builder.opponent(0.0, safe_leaves);
    let risky_leaves = builder.leaves(&[0.0, 20.0]);
    let risky = builder.opponent(0.0, risky_leaves);
    let root = builder.player(0.0, vec![safe, risky]);
    let state = builder.build(root);

    let (minimax, _) = search(&state, 1, Strategy::Minimax);
    let (expectimax, _) = search(&state, 1, Strategy::Expectimax);

    assert_eq!(minimax, SearchResult::new(5.0, Action::Up));
    assert_eq!(expectimax, SearchResult::new(10.0, Action::Down));
}

#[test]
fn test_single_action_with_stuck_opponent() {
    let mut builder = TreeBuilder::default();
    let grandchild = builder.leaf(100.0);
    // The opponent has nothing to play here, though the player still could.
    let child = builder.player(42.0, vec![grandchild]);
    let root = builder.player(0.0, vec![child]);
    let state = builder.build(root);

    for strategy in Strategy::ALL.iter() {
        let (result, context) = search(&state, 1, *strategy);
        let successor = state.successor(Agent::Player, &Action::Up).unwrap();
        assert_eq!(result.action, Action::Up);
        assert_eq!(result.value, node_value(&successor));
        assert_eq!(context.evaluation_count(), 1);
    }
}

#[test]
fn test_no_legal_player_action_returns_stop() {
    let mut builder = TreeBuilder::default();
    let leaves = builder.leaves(&[1.0, 2.0]);
    let root = builder.opponent(7.0, leaves);
    let state = builder.build(root);

    for strategy in Strategy::ALL.iter() {
        for depth in 1..=4 {
            let action = choose_action(&state, depth, *strategy, &node_value).unwrap();
            assert_eq!(action, Action::Stop, "{} at depth {}", strategy, depth);
        }
    }
}

#[test]
fn test_terminal_root_is_cutoff() {
    let state = {
        let mut builder = TreeBuilder::default();
        let root = builder.leaf(5.0);
        builder.build(root)
    };

    assert!(is_cutoff(&state, 4));
    let (result, context) = search(&state, 2, Strategy::AlphaBeta);
    assert_eq!(result, SearchResult::new(5.0, Action::Stop));
    assert_eq!(context.evaluation_count(), 1);
}

#[test]
fn test_is_cutoff() {
    let state = textbook_tree();

    assert!(is_cutoff(&state, 0));
    assert!(!is_cutoff(&state, 1));

    let stuck_player = {
        let mut builder = TreeBuilder::default();
        let leaf = builder.leaf(1.0);
        let root = builder.opponent(0.0, vec![leaf]);
        builder.build(root)
    };
    assert!(!is_cutoff(&stuck_player, 2), "opponent can still move");
}

#[test]
fn test_stuck_player_below_root_is_scored() {
    let mut builder = TreeBuilder::default();
    let leaf = builder.leaf(1.0);
    // The player cannot move here, but the opponent still could.
    let stuck = builder.opponent(30.0, vec![leaf]);
    let reply = builder.opponent(0.0, vec![stuck]);
    let root = builder.player(0.0, vec![reply]);
    let state = builder.build(root);

    let stuck_state = state
        .successor(Agent::Player, &Action::Up)
        .and_then(|reply| reply.successor(Agent::Opponent, &Action::Up))
        .unwrap();
    assert!(!is_cutoff(&stuck_state, 2));

    for strategy in Strategy::ALL.iter() {
        let (result, context) = search(&state, 2, *strategy);
        assert_eq!(result, SearchResult::new(30.0, Action::Up), "{}", strategy);
        assert_eq!(context.evaluation_count(), 1, "{}", strategy);
    }
}

#[test]
fn test_ties_go_to_first_action() {
    let mut builder = TreeBuilder::default();
    let leaves = builder.leaves(&[4.0, 4.0, 4.0]);
    let branches = leaves
        .into_iter()
        .map(|leaf| builder.opponent(0.0, vec![leaf]))
        .collect();
    let root = builder.player(0.0, branches);
    let state = builder.build(root);

    for strategy in Strategy::ALL.iter() {
        let (result, _) = search(&state, 1, *strategy);
        assert_eq!(result, SearchResult::new(4.0, Action::Up), "{}", strategy);
    }
}

/// An opponent node whose replies are player nodes, each with leaf follow-ups.
fn branch(builder: &mut TreeBuilder, replies: &[(f64, [f64; 2])]) -> usize {
    let replies = replies
        .iter()
        .map(|(value, follow_ups)| {
            let leaves = builder.leaves(follow_ups);
            builder.player(*value, leaves)
        })
        .collect();
    builder.opponent(0.0, replies)
}

#[test]
fn test_deeper_search_does_not_lower_value() {
    // One round sees only the opponent's replies. Two rounds also see the player's
    // follow-up, which can only be at least as good as standing on the reply.
    let mut builder = TreeBuilder::default();
    let left = branch(&mut builder, &[(3.0, [3.0, 6.0]), (5.0, [5.0, 9.0])]);
    let right = branch(&mut builder, &[(4.0, [4.0, 4.0]), (2.0, [2.0, 8.0])]);
    let root = builder.player(0.0, vec![left, right]);
    let state = builder.build(root);

    for strategy in Strategy::ALL.iter() {
        let (shallow, _) = search(&state, 1, *strategy);
        let (deep, _) = search(&state, 2, *strategy);
        assert!(
            deep.value >= shallow.value,
            "{}: depth 2 value {} is worse than depth 1 value {}",
            strategy,
            deep.value,
            shallow.value
        );
    }
}

#[test]
fn test_search_returns_error_for_zero_depth() {
    let state = textbook_tree();

    for strategy in Strategy::ALL.iter() {
        let result = choose_action(&state, 0, *strategy, &node_value);
        assert!(matches!(result, Err(SearchError::DepthTooLow)));
    }
}

#[test]
fn test_invalid_action_is_propagated() {
    let mut builder = TreeBuilder::default();
    let leaf = builder.leaf(1.0);
    let child = builder.opponent(0.0, vec![leaf]);
    let root = builder.push(TreeNode {
        player: vec![child],
        phantom_action: true,
        ..TreeNode::default()
    });
    let state = builder.build(root);

    let result = choose_action(&state, 1, Strategy::Minimax, &node_value);
    match result {
        Err(SearchError::InvalidAction(error)) => assert_eq!(error.agent, Agent::Player),
        other => panic!("expected an invalid action error, got {:?}", other),
    }
}

#[test]
fn test_nan_evaluation_is_an_error() {
    let state = textbook_tree();
    let broken = |_: &TreeState| f64::NAN;

    for strategy in Strategy::ALL.iter() {
        let result = choose_action(&state, 1, *strategy, &broken);
        assert!(matches!(result, Err(SearchError::InvalidEvaluation { .. })));
    }
}

#[test]
fn test_passed_deadline_aborts_search() {
    let state = textbook_tree();
    let mut context = SearchContext::with_seed(0);
    context.set_deadline(Some(Instant::now()));

    let result = search_best_action(&mut context, &state, 1, Strategy::Minimax, &node_value);
    assert!(matches!(result, Err(SearchError::DeadlineExceeded)));
    assert_eq!(context.evaluation_count(), 0);
}

#[test]
fn test_generous_deadline_does_not_change_result() {
    let state = textbook_tree();
    let mut context = SearchContext::with_seed(0);
    context.set_time_limit(Duration::from_secs(60));

    let result =
        search_best_action(&mut context, &state, 1, Strategy::AlphaBeta, &node_value).unwrap();
    assert_eq!(result, SearchResult::new(3.0, Action::Up));
}

#[test]
fn test_stats_are_recorded_and_reset() {
    let state = textbook_tree();
    let mut context = SearchContext::with_seed(0);

    let result =
        search_best_action(&mut context, &state, 1, Strategy::Minimax, &node_value).unwrap();
    assert_eq!(context.last_score(), Some(result.value));
    assert!(context.last_search_duration().is_some());
    // root + three opponent nodes + nine leaves
    assert_eq!(context.searched_position_count(), 13);

    context.reset_stats();
    assert_eq!(context.searched_position_count(), 0);
    assert_eq!(context.evaluation_count(), 0);
    assert_eq!(context.last_score(), None);
}

#[test]
fn test_reflex_picks_best_successor() {
    let mut builder = TreeBuilder::default();
    let children = builder.leaves(&[1.0, 9.0, 4.0]);
    let root = builder.player(0.0, children);
    let state = builder.build(root);

    let mut context = SearchContext::with_seed(0);
    let action = reflex_action(&mut context, &state, &node_value).unwrap();
    assert_eq!(action, Action::Down);
    assert_eq!(context.evaluation_count(), 3);
}

#[test]
fn test_reflex_breaks_ties_among_best_only() {
    let mut builder = TreeBuilder::default();
    let children = builder.leaves(&[9.0, 1.0, 9.0]);
    let root = builder.player(0.0, children);
    let state = builder.build(root);

    let mut seen_up = false;
    let mut seen_left = false;
    for seed in 0..64 {
        let mut context = SearchContext::with_seed(seed);
        match reflex_action(&mut context, &state, &node_value).unwrap() {
            Action::Up => seen_up = true,
            Action::Left => seen_left = true,
            other => panic!("{:?} is not among the best actions", other),
        }
    }
    assert!(seen_up && seen_left);
}

#[test]
fn test_reflex_without_moves_returns_stop() {
    let state = {
        let mut builder = TreeBuilder::default();
        let root = builder.leaf(0.0);
        builder.build(root)
    };

    let mut context = SearchContext::with_seed(0);
    assert_eq!(reflex_action(&mut context, &state, &node_value).unwrap(), Action::Stop);
}
