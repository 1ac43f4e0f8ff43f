pub mod grid;
pub mod simulator;
pub mod table;
pub mod terminal;

use crate::common::defs::*;
use crate::errors::*;
use std::borrow::Cow;
use std::collections::HashSet;

/// Markov Decision Process - Sutton & Barto 2018.
///
/// Models are built once and only read afterwards, so a shared reference can
/// be handed to any number of planners.
pub trait Mdp<S: Key, A: Key> {
    fn init(&self) -> &S;

    fn states(&self) -> &HashSet<S>;

    fn terminals(&self) -> &HashSet<S>;

    fn gamma(&self) -> f64;

    /// Numeric reward for being in `s`.
    fn reward(&self, s: &S) -> Result<f64>;

    /// Outcome distribution for taking `a` in `s`. `None` is the no-action marker of terminal states.
    fn transition(&self, s: &S, a: Option<&A>) -> Result<Cow<'_, [Transition<S>]>>;

    /// Actions available in `s`; terminal states only offer `None`.
    fn actions(&self, s: &S) -> Vec<Option<A>>;

    fn check_consistency(&self) -> Result<()>;

    fn is_terminal(&self, s: &S) -> bool {
        self.terminals().contains(s)
    }
}

/// Zero-weight self-loop answered for the no-action marker.
pub fn terminal_placeholder<S: Clone>(s: &S) -> Vec<Transition<S>> {
    vec![Transition::new(0.0, s.clone())]
}
