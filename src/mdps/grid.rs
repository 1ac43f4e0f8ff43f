use super::table::*;
use super::*;
use crate::common::geometry::*;
use crate::common::utils::*;
use crate::config::GridConfig;
use itertools::iproduct;
use std::collections::HashMap;
use tracing::debug;

/// Probability that the intended move happens.
pub const P_INTENDED: f64 = 0.8;
/// Probability of slipping a quarter turn to either side.
pub const P_SLIP: f64 = 0.1;

/// Reward rows as authored, top row first. `None` marks a wall.
pub type Grid = Vec<Vec<Option<f64>>>;

/// 2-D grid world with noisy moves.
///
/// The intended direction is taken with probability 0.8, otherwise the agent
/// moves as if turned right or left (0.1 each). Moving into a wall or off the
/// grid leaves the agent in place.
#[derive(Debug, Clone)]
pub struct GridMdp {
    inner: TableMdp<Cell, Direction>,
    rows: usize,
    cols: usize,
}

impl GridMdp {
    pub fn new(
        grid: &[Vec<Option<f64>>],
        terminals: HashSet<Cell>,
        init: Option<Cell>,
        gamma: Option<f64>,
    ) -> Result<Self> {
        let cols = grid.first().map(Vec::len).unwrap_or_default();
        if cols == 0 {
            return Err(MdpError::InvalidConfiguration(
                "Grid must have at least one row and one column.".to_string(),
            ));
        }
        if let Some(y) = grid.iter().position(|row| row.len() != cols) {
            return Err(MdpError::InvalidConfiguration(format!(
                "Grid is not rectangular: row {y} has {} cells, expected {cols}.",
                grid[y].len()
            )));
        }
        let rows = grid.len();

        // Row 0 is the bottom row from here on.
        let grid = flip_rows(grid);
        let reward = iproduct!(0..cols, 0..rows)
            .filter_map(|(x, y)| grid[y][x].map(|r| ((x as i32, y as i32), r)))
            .collect::<HashMap<Cell, f64>>();
        let states = reward.keys().copied().collect::<HashSet<_>>();

        let transitions = states
            .iter()
            .map(|&s| {
                let by_action = ORIENTATIONS
                    .into_iter()
                    .map(|a| (a, calculate_t(&states, s, a)))
                    .collect::<HashMap<_, _>>();
                (s, by_action)
            })
            .collect::<Transitions<_, _>>();

        let inner = TableMdp::new(
            init.unwrap_or_default(),
            Actions::Shared(ORIENTATIONS.to_vec()),
            terminals,
            Some(transitions),
            Some(reward),
            Some(states),
            gamma,
        )?;
        debug!(rows, cols, n_s = inner.states().len(), "Built grid MDP.");

        Ok(Self { inner, rows, cols })
    }

    pub fn from_config(config: &GridConfig) -> Result<Self> {
        Self::new(
            &config.grid,
            config.terminals.iter().copied().collect(),
            Some(config.init),
            Some(config.gamma),
        )
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn inner(&self) -> &TableMdp<Cell, Direction> {
        &self.inner
    }

    /// The state that results from going in `direction` from `s`.
    pub fn go(&self, s: Cell, direction: Direction) -> Cell {
        go(self.inner.states(), s, direction)
    }

    /// Lay out a per-state mapping the way the grid was authored, top row first.
    pub fn to_grid<T: Clone>(&self, mapping: &HashMap<Cell, T>) -> Vec<Vec<Option<T>>> {
        (0..self.rows)
            .rev()
            .map(|y| {
                (0..self.cols)
                    .map(|x| mapping.get(&(x as i32, y as i32)).cloned())
                    .collect()
            })
            .collect()
    }

    /// Lay out a policy as arrow glyphs; `.` marks "no action".
    pub fn to_arrows(&self, policy: &HashMap<Cell, Option<Direction>>) -> Vec<Vec<Option<char>>> {
        let glyphs = policy
            .iter()
            .map(|(&s, a)| (s, a.map_or(NO_ACTION_GLYPH, Direction::glyph)))
            .collect::<HashMap<_, _>>();

        self.to_grid(&glyphs)
    }
}

impl Mdp<Cell, Direction> for GridMdp {
    fn init(&self) -> &Cell {
        self.inner.init()
    }

    fn states(&self) -> &HashSet<Cell> {
        self.inner.states()
    }

    fn terminals(&self) -> &HashSet<Cell> {
        self.inner.terminals()
    }

    fn gamma(&self) -> f64 {
        self.inner.gamma()
    }

    fn reward(&self, s: &Cell) -> Result<f64> {
        self.inner.reward(s)
    }

    fn transition(&self, s: &Cell, a: Option<&Direction>) -> Result<Cow<'_, [Transition<Cell>]>> {
        match a {
            Some(_) => self.inner.transition(s, a),
            None => Ok(Cow::Owned(terminal_placeholder(s))),
        }
    }

    fn actions(&self, s: &Cell) -> Vec<Option<Direction>> {
        self.inner.actions(s)
    }

    fn check_consistency(&self) -> Result<()> {
        self.inner.check_consistency()
    }
}

/// `s + direction` when that cell is traversable, else `s`.
pub fn go(states: &HashSet<Cell>, s: Cell, direction: Direction) -> Cell {
    let s1 = vector_add(s, direction.vector());
    if states.contains(&s1) {
        s1
    } else {
        s
    }
}

fn calculate_t(states: &HashSet<Cell>, s: Cell, a: Direction) -> Vec<Transition<Cell>> {
    vec![
        Transition::new(P_INTENDED, go(states, s, a)),
        Transition::new(P_SLIP, go(states, s, turn_right(a))),
        Transition::new(P_SLIP, go(states, s, turn_left(a))),
    ]
}
