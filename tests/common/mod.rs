use gridmdp::*;
use std::collections::{HashMap, HashSet};

/// 3x3 world with a wall in the middle, authored top row first.
#[allow(dead_code)]
pub fn three_by_three() -> GridMdp {
    GridMdp::new(
        &[
            vec![Some(-0.04), Some(-0.04), Some(-0.04)],
            vec![Some(-0.04), None, Some(-0.04)],
            vec![Some(-0.04), Some(-0.04), Some(1.)],
        ],
        HashSet::from([(2, 0)]),
        None,
        Some(0.9),
    )
    .unwrap()
}

/// Russell & Norvig's 4x3 world.
#[allow(dead_code)]
pub fn four_by_three() -> GridMdp {
    GridMdp::new(
        &[
            vec![Some(-0.04), Some(-0.04), Some(-0.04), Some(1.)],
            vec![Some(-0.04), None, Some(-0.04), Some(-1.)],
            vec![Some(-0.04), Some(-0.04), Some(-0.04), Some(-0.04)],
        ],
        HashSet::from([(3, 2), (3, 1)]),
        Some((0, 0)),
        None,
    )
    .unwrap()
}

/// Undo `to_grid`: top row first back to `(x, y)` keys, dropping empty cells.
#[allow(dead_code)]
pub fn flatten<T: Clone>(grid: &[Vec<Option<T>>]) -> HashMap<Cell, T> {
    let rows = grid.len() as i32;
    grid.iter()
        .enumerate()
        .flat_map(|(i, row)| {
            let y = rows - 1 - i as i32;
            row.iter()
                .enumerate()
                .filter_map(move |(x, v)| v.clone().map(|v| ((x as i32, y), v)))
        })
        .collect()
}
