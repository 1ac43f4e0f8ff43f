use serde::{Deserialize, Serialize};

/// Grid coordinate `(x, y)`; `y` grows upward.
pub type Cell = (i32, i32);

/// Cardinal unit vector an agent can move along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    North,
    West,
    South,
}

/// Counter-clockwise order, starting east.
pub const ORIENTATIONS: [Direction; 4] = [
    Direction::East,
    Direction::North,
    Direction::West,
    Direction::South,
];

impl Direction {
    pub fn vector(self) -> Cell {
        match self {
            Direction::East => (1, 0),
            Direction::North => (0, 1),
            Direction::West => (-1, 0),
            Direction::South => (0, -1),
        }
    }

    pub fn from_vector(v: Cell) -> Option<Self> {
        ORIENTATIONS.into_iter().find(|d| d.vector() == v)
    }

    pub fn glyph(self) -> char {
        match self {
            Direction::East => '>',
            Direction::North => '^',
            Direction::West => '<',
            Direction::South => 'v',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Glyph for the "no action" marker of terminal states.
pub const NO_ACTION_GLYPH: char = '.';

pub fn vector_add(a: Cell, b: Cell) -> Cell {
    (a.0 + b.0, a.1 + b.1)
}

/// 90° clockwise.
pub fn turn_right(d: Direction) -> Direction {
    ORIENTATIONS[(d.index() + ORIENTATIONS.len() - 1) % ORIENTATIONS.len()]
}

/// 90° counter-clockwise.
pub fn turn_left(d: Direction) -> Direction {
    ORIENTATIONS[(d.index() + 1) % ORIENTATIONS.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case(Direction::East, Direction::South, Direction::North)]
    #[case(Direction::North, Direction::East, Direction::West)]
    #[case(Direction::West, Direction::North, Direction::South)]
    #[case(Direction::South, Direction::West, Direction::East)]
    fn turns_rotate_by_quarter(
        #[case] d: Direction,
        #[case] right: Direction,
        #[case] left: Direction,
    ) {
        assert_eq!(turn_right(d), right);
        assert_eq!(turn_left(d), left);
        assert_eq!(turn_left(turn_right(d)), d);
    }

    #[test]
    fn vector_add_is_coordinate_wise() {
        assert_eq!(vector_add((2, 3), Direction::West.vector()), (1, 3));
        assert_eq!(vector_add((-1, 4), (3, -5)), (2, -1));
    }

    #[test]
    fn vectors_round_trip_through_directions() {
        for d in ORIENTATIONS {
            assert_eq!(Direction::from_vector(d.vector()), Some(d));
        }
        assert_eq!(Direction::from_vector((1, 1)), None);
    }
}
