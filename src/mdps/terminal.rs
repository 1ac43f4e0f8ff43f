use super::table::*;
use super::*;

/// Table MDP that answers the no-action marker with a zero-weight self-loop
/// instead of a table lookup, so planners can query terminal states uniformly.
#[derive(Debug, Clone)]
pub struct TerminalAwareMdp<S: Key, A: Key> {
    inner: TableMdp<S, A>,
}

impl<S: Key, A: Key> TerminalAwareMdp<S, A> {
    pub fn new(inner: TableMdp<S, A>) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &TableMdp<S, A> {
        &self.inner
    }
}

impl<S: Key, A: Key> From<TableMdp<S, A>> for TerminalAwareMdp<S, A> {
    fn from(inner: TableMdp<S, A>) -> Self {
        Self::new(inner)
    }
}

impl<S: Key, A: Key> Mdp<S, A> for TerminalAwareMdp<S, A> {
    fn init(&self) -> &S {
        self.inner.init()
    }

    fn states(&self) -> &HashSet<S> {
        self.inner.states()
    }

    fn terminals(&self) -> &HashSet<S> {
        self.inner.terminals()
    }

    fn gamma(&self) -> f64 {
        self.inner.gamma()
    }

    fn reward(&self, s: &S) -> Result<f64> {
        self.inner.reward(s)
    }

    fn transition(&self, s: &S, a: Option<&A>) -> Result<Cow<'_, [Transition<S>]>> {
        match a {
            Some(_) => self.inner.transition(s, a),
            None => Ok(Cow::Owned(terminal_placeholder(s))),
        }
    }

    fn actions(&self, s: &S) -> Vec<Option<A>> {
        self.inner.actions(s)
    }

    fn check_consistency(&self) -> Result<()> {
        self.inner.check_consistency()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::*;
    use std::collections::HashMap;

    fn golf() -> TerminalAwareMdp<u8, u8> {
        let transitions: Transitions<u8, u8> = Transitions::from([
            (
                0,
                HashMap::from([(
                    0,
                    vec![Transition::new(0.9, 1), Transition::new(0.1, 0)],
                )]),
            ),
            (
                1,
                HashMap::from([
                    (1, vec![Transition::new(0.9, 0), Transition::new(0.1, 1)]),
                    (2, vec![Transition::new(0.9, 2), Transition::new(0.1, 1)]),
                ]),
            ),
        ]);

        TableMdp::new(
            0,
            Actions::PerState(HashMap::from([(0, vec![0]), (1, vec![1, 2])])),
            HashSet::from([2]),
            Some(transitions),
            Some(HashMap::from([(0, 0.), (1, 0.), (2, 10.)])),
            None,
            Some(0.9),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn no_action_yields_zero_weight_self_loop() {
        let mdp = golf();

        for s in [0, 1, 2] {
            let ts = mdp.transition(&s, None).unwrap();
            assert_eq!(ts.len(), 1);
            assert_eq!(ts[0].next_state, s);
            assert_float_eq!(ts[0].probability, 0., abs <= 0.);
        }
    }

    #[test]
    fn actions_still_use_the_table() {
        let mdp = golf();

        let ts = mdp.transition(&1, Some(&2)).unwrap();

        assert_eq!(ts.as_ref(), mdp.inner().lookup(&1, Some(&2)).unwrap());
        assert!(matches!(
            mdp.transition(&1, Some(&0)),
            Err(MdpError::UnknownAction { .. })
        ));
    }

    #[test]
    fn queries_delegate_to_table() {
        let mdp = golf();

        assert_eq!(mdp.actions(&2), vec![None]);
        assert_eq!(mdp.actions(&1), vec![Some(1), Some(2)]);
        assert_float_eq!(mdp.reward(&2).unwrap(), 10., abs <= 0.);
        assert_float_eq!(mdp.gamma(), 0.9, abs <= 0.);
        assert_eq!(mdp.init(), &0);
        mdp.check_consistency().unwrap();
    }
}
