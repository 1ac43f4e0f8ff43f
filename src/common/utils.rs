use itertools::Itertools;
use std::fmt::Display;

/// Reverse the row order so that row 0 is the bottom row as authored.
///
/// Grids are authored top row first, while cells are addressed with `y` growing
/// upward. The input is left untouched.
pub fn flip_rows<T: Clone>(grid: &[Vec<T>]) -> Vec<Vec<T>> {
    grid.iter().rev().cloned().collect()
}

/// Render a grid one row per line, cells separated by a space. Missing cells print as `empty`.
pub fn format_grid<T: Display>(grid: &[Vec<Option<T>>], empty: &str) -> String {
    grid.iter()
        .map(|row| {
            row.iter()
                .map(|c| match c {
                    Some(v) => v.to_string(),
                    None => empty.to_string(),
                })
                .join(" ")
        })
        .join("\n")
}
