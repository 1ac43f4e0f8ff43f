use super::*;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use tracing::trace;

/// Sample a successor from an outcome distribution.
pub fn pick_next<S: Clone, R: Rng + ?Sized>(rng: &mut R, ts: &[Transition<S>]) -> Result<S> {
    let dist = WeightedIndex::new(ts.iter().map(|t| t.probability))?;
    Ok(ts[dist.sample(rng)].next_state.clone())
}

/// Take `a` in `s`; returns the successor and its reward.
pub fn step<S, A, M, R>(mdp: &M, rng: &mut R, s: &S, a: Option<&A>) -> Result<(S, f64)>
where
    S: Key,
    A: Key,
    M: Mdp<S, A> + ?Sized,
    R: Rng + ?Sized,
{
    let next = pick_next(rng, &mdp.transition(s, a)?)?;
    let r = mdp.reward(&next)?;
    trace!(from = ?s, action = ?a, to = ?next, r, "Step.");

    Ok((next, r))
}

/// Roll out `policy` from the initial state.
///
/// Stops on a terminal state, when the policy has no action, or after `max_steps` moves.
/// The first event carries the reward of the initial state.
pub fn episode<S, A, M, P, R>(
    mdp: &M,
    rng: &mut R,
    policy: &P,
    max_steps: usize,
) -> Result<Vec<EpisodeEvent<S>>>
where
    S: Key,
    A: Key,
    M: Mdp<S, A> + ?Sized,
    P: Policy<S, A> + ?Sized,
    R: Rng + ?Sized,
{
    let mut s = mdp.init().clone();
    let mut ep = vec![EpisodeEvent {
        r: mdp.reward(&s)?,
        s: s.clone(),
    }];

    for _ in 0..max_steps {
        if mdp.is_terminal(&s) {
            break;
        }
        let Some(a) = policy.action(&s) else {
            break;
        };

        let (next, r) = step(mdp, rng, &s, Some(&a))?;
        ep.push(EpisodeEvent { s: next.clone(), r });
        s = next;
    }

    Ok(ep)
}
