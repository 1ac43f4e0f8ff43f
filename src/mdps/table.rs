use super::*;
use itertools::Itertools;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Largest accepted distance between an action's total probability and 1.
pub const PROBABILITY_TOLERANCE: f64 = 1e-3;

/// MDP described by explicit transition and reward tables.
#[derive(Debug, Clone)]
pub struct TableMdp<S: Key, A: Key> {
    init: S,
    actions: Actions<S, A>,
    terminals: HashSet<S>,
    transitions: Option<Transitions<S, A>>,
    reward: HashMap<S, f64>,
    states: HashSet<S>,
    gamma: f64,
    warnings: Vec<MdpWarning>,
}

impl<S: Key, A: Key> TableMdp<S, A> {
    /// Build a model from its tables.
    ///
    /// `states` is derived from `transitions` when not given. Rewards default to 0 and
    /// `gamma` to [`DEFAULT_GAMMA`]. A model without transitions is legal for reward-only
    /// use; it is flagged with [`MdpWarning::EmptyTransitions`].
    pub fn new(
        init: S,
        actions: Actions<S, A>,
        terminals: HashSet<S>,
        transitions: Option<Transitions<S, A>>,
        reward: Option<HashMap<S, f64>>,
        states: Option<HashSet<S>>,
        gamma: Option<f64>,
    ) -> Result<Self> {
        let gamma = validate_gamma(gamma.unwrap_or(DEFAULT_GAMMA))?;
        let transitions = transitions.filter(|t| !t.is_empty());

        let states = match states {
            Some(states) => states,
            None => transitions.as_ref().map(derive_states).ok_or_else(|| {
                MdpError::MissingData(
                    "No states given and no transitions to derive them from.".to_string(),
                )
            })?,
        };

        let mut warnings = vec![];
        if transitions.is_none() {
            warn!(
                n_s = states.len(),
                "Transition table is empty, only reward queries will succeed."
            );
            warnings.push(MdpWarning::EmptyTransitions);
        }

        let reward =
            reward.unwrap_or_else(|| states.iter().map(|s| (s.clone(), 0.)).collect());

        debug!(
            n_s = states.len(),
            n_terminals = terminals.len(),
            gamma,
            "Built table MDP."
        );

        Ok(Self {
            init,
            actions,
            terminals,
            transitions,
            reward,
            states,
            gamma,
            warnings,
        })
    }

    pub fn transitions(&self) -> Option<&Transitions<S, A>> {
        self.transitions.as_ref()
    }

    pub fn rewards(&self) -> &HashMap<S, f64> {
        &self.reward
    }

    pub fn warnings(&self) -> &[MdpWarning] {
        &self.warnings
    }

    /// Table lookup behind [`Mdp::transition`].
    pub fn lookup(&self, s: &S, a: Option<&A>) -> Result<&[Transition<S>]> {
        let transitions = self
            .transitions
            .as_ref()
            .ok_or_else(|| MdpError::MissingData("Transition model is missing.".to_string()))?;
        let by_action = transitions
            .get(s)
            .ok_or_else(|| MdpError::unknown_state(s))?;

        match a {
            Some(a) => by_action
                .get(a)
                .map(Vec::as_slice)
                .ok_or_else(|| MdpError::unknown_action(s, a)),
            None => Err(MdpError::unknown_action(s, &a)),
        }
    }
}

impl<S: Key, A: Key> Mdp<S, A> for TableMdp<S, A> {
    fn init(&self) -> &S {
        &self.init
    }

    fn states(&self) -> &HashSet<S> {
        &self.states
    }

    fn terminals(&self) -> &HashSet<S> {
        &self.terminals
    }

    fn gamma(&self) -> f64 {
        self.gamma
    }

    fn reward(&self, s: &S) -> Result<f64> {
        self.reward
            .get(s)
            .copied()
            .ok_or_else(|| MdpError::unknown_state(s))
    }

    fn transition(&self, s: &S, a: Option<&A>) -> Result<Cow<'_, [Transition<S>]>> {
        self.lookup(s, a).map(Cow::Borrowed)
    }

    fn actions(&self, s: &S) -> Vec<Option<A>> {
        if self.terminals.contains(s) {
            vec![None]
        } else {
            self.actions.for_state(s).into_iter().map(Some).collect()
        }
    }

    fn check_consistency(&self) -> Result<()> {
        let derived = self
            .transitions
            .as_ref()
            .map(derive_states)
            .unwrap_or_default();
        if derived != self.states {
            return Err(ConsistencyError::StateSetMismatch {
                undeclared: describe(derived.difference(&self.states)),
                unreached: describe(self.states.difference(&derived)),
            }
            .into());
        }

        if !self.states.contains(&self.init) {
            return Err(ConsistencyError::InvalidInitialState(format!("{:?}", self.init)).into());
        }

        let keys = self.reward.keys().collect::<HashSet<_>>();
        let states = self.states.iter().collect::<HashSet<_>>();
        if keys != states {
            return Err(ConsistencyError::RewardKeyMismatch {
                extra: describe(keys.difference(&states).copied()),
                missing: describe(states.difference(&keys).copied()),
            }
            .into());
        }

        if let Some(t) = self.terminals.iter().find(|&t| !self.states.contains(t)) {
            return Err(ConsistencyError::InvalidTerminal(format!("{t:?}")).into());
        }

        for (s, by_action) in self.transitions.iter().flatten() {
            for (a, outcomes) in by_action {
                let sum = outcomes.iter().map(|t| t.probability).sum::<f64>();
                if !sums_to_one(sum) {
                    return Err(ConsistencyError::ProbabilitySum {
                        state: format!("{s:?}"),
                        action: format!("{a:?}"),
                        sum,
                    }
                    .into());
                }
            }
        }

        Ok(())
    }
}

/// Every state keyed in `transitions` plus every successor any action can reach.
pub fn derive_states<S: Key, A>(transitions: &Transitions<S, A>) -> HashSet<S> {
    transitions
        .keys()
        .cloned()
        .chain(
            transitions
                .values()
                .flat_map(|by_action| by_action.values())
                .flatten()
                .map(|t| t.next_state.clone()),
        )
        .collect()
}

/// Discount factor must lie in (0, 1].
pub fn validate_gamma(gamma: f64) -> Result<f64> {
    if gamma > 0. && gamma <= 1. {
        Ok(gamma)
    } else {
        Err(MdpError::InvalidConfiguration(format!(
            "Gamma must be greater than 0 and at most 1, got {gamma}."
        )))
    }
}

/// Boundary is inclusive, allowing for f64 rounding of the sum.
pub fn sums_to_one(sum: f64) -> bool {
    (sum - 1.).abs() - PROBABILITY_TOLERANCE <= f64::EPSILON
}

fn describe<'a, S: Key + 'a>(states: impl Iterator<Item = &'a S>) -> String {
    states.map(|s| format!("{s:?}")).sorted().join(", ")
}
