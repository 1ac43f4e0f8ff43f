use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub const DEFAULT_GAMMA: f64 = 0.9;

/// Anything usable as a state or an action label.
pub trait Key: Eq + Hash + Clone + Debug {}

impl<T: Eq + Hash + Clone + Debug> Key for T {}

/// One outcome of taking an action: land in `next_state` with `probability`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition<S> {
    pub probability: f64,
    pub next_state: S,
}

impl<S> Transition<S> {
    pub fn new(probability: f64, next_state: S) -> Self {
        Self {
            probability,
            next_state,
        }
    }
}

impl<S> From<(f64, S)> for Transition<S> {
    fn from((probability, next_state): (f64, S)) -> Self {
        Self::new(probability, next_state)
    }
}

/// state -> action -> [(p, s')]
pub type Transitions<S, A> = HashMap<S, HashMap<A, Vec<Transition<S>>>>;

/// Actions available in non-terminal states.
#[derive(Debug, Clone, PartialEq)]
pub enum Actions<S: Key, A> {
    /// Every non-terminal state offers the same list.
    Shared(Vec<A>),
    /// Each state has its own list. States missing from the map have none.
    PerState(HashMap<S, Vec<A>>),
}

impl<S: Key, A: Clone> Actions<S, A> {
    pub fn for_state(&self, s: &S) -> Vec<A> {
        match self {
            Actions::Shared(actions) => actions.clone(),
            Actions::PerState(actions) => actions.get(s).cloned().unwrap_or_default(),
        }
    }
}

/// Mapping from state to the chosen action. `None` means "no action", as in terminal states.
pub trait Policy<S, A> {
    fn action(&self, s: &S) -> Option<A>;
}

impl<S: Key, A: Clone> Policy<S, A> for HashMap<S, Option<A>> {
    fn action(&self, s: &S) -> Option<A> {
        self.get(s).cloned().flatten()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EpisodeEvent<S> {
    pub s: S,
    pub r: f64,
}
