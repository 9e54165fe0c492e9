// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vault door solver.
//!
//! The vault antechamber is a 4×4 grid of rooms; each room carries either a
//! number or an operator. Walking the grid evaluates a rolling expression:
//! entering an operator room remembers the operator, entering a number room
//! applies it to the orb's weight. The orb starts on the pedestal at weight
//! 22 and the door opens only if it arrives at weight 30.
//!
//! The walk is invalid the moment the orb weight leaves `(0, 1024]`, the
//! walker re-enters the pedestal room, or the door room is reached at the
//! wrong weight. A breadth-first search over `(room, weight)` states yields
//! a minimal command sequence.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashSet;

/// Orb weight on the pedestal.
pub const START_WEIGHT: i32 = 22;

/// Orb weight the vault door demands.
pub const TARGET_WEIGHT: i32 = 30;

/// Exclusive upper bound on the orb weight before it shatters.
pub const MAX_WEIGHT: i32 = 1024;

/// A grid operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
}

impl BinOp {
    fn apply(self, lhs: i32, rhs: i32) -> i32 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
        }
    }
}

/// One grid room.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    /// A number room.
    Value(i32),
    /// An operator room.
    Op(BinOp),
}

/// The vault grid, indexed `[row][column]` with row 0 at the bottom (the
/// pedestal row, matching the in-game geography).
pub const GRID: [[Cell; 4]; 4] = [
    [
        Cell::Value(22),
        Cell::Op(BinOp::Sub),
        Cell::Value(9),
        Cell::Op(BinOp::Mul),
    ],
    [
        Cell::Op(BinOp::Add),
        Cell::Value(4),
        Cell::Op(BinOp::Sub),
        Cell::Value(18),
    ],
    [
        Cell::Value(4),
        Cell::Op(BinOp::Mul),
        Cell::Value(11),
        Cell::Op(BinOp::Mul),
    ],
    [
        Cell::Op(BinOp::Mul),
        Cell::Value(8),
        Cell::Op(BinOp::Sub),
        Cell::Value(1),
    ],
];

const START: (usize, usize) = (0, 0);
const GOAL: (usize, usize) = (3, 3);

/// A cardinal walk command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Dir {
    /// Row + 1.
    North,
    /// Row - 1.
    South,
    /// Column + 1.
    East,
    /// Column - 1.
    West,
}

impl Dir {
    /// All four directions, in search expansion order.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];
}

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::North => write!(f, "north"),
            Self::South => write!(f, "south"),
            Self::East => write!(f, "east"),
            Self::West => write!(f, "west"),
        }
    }
}

/// One bounded unit step; `pos` is `(column, row)`.
fn step(pos: (usize, usize), dir: Dir) -> Option<(usize, usize)> {
    let (x, y) = pos;
    match dir {
        Dir::North => (y < 3).then(|| (x, y + 1)),
        Dir::South => (y > 0).then(|| (x, y - 1)),
        Dir::East => (x < 3).then(|| (x + 1, y)),
        Dir::West => (x > 0).then(|| (x - 1, y)),
    }
}

fn cell_at(pos: (usize, usize)) -> Cell {
    GRID[pos.1][pos.0]
}

/// Finds a minimal command sequence from the pedestal to the vault door.
#[must_use]
pub fn solve() -> Option<Vec<Dir>> {
    let mut visited: HashSet<(usize, usize, i32)> = HashSet::new();
    let mut queue: VecDeque<((usize, usize), i32, Vec<Dir>)> = VecDeque::new();
    queue.push_back((START, START_WEIGHT, Vec::new()));

    while let Some((pos, weight, path)) = queue.pop_front() {
        for dir in Dir::ALL {
            let Some(next) = step(pos, dir) else {
                continue;
            };
            // Re-entering the pedestal resets the orb.
            if next == START {
                continue;
            }
            match cell_at(next) {
                Cell::Op(_) => {
                    if !visited.insert((next.0, next.1, weight)) {
                        continue;
                    }
                    let mut extended = path.clone();
                    extended.push(dir);
                    queue.push_back((next, weight, extended));
                }
                Cell::Value(v) => {
                    // The operator to apply is the room we are leaving.
                    let Cell::Op(op) = cell_at(pos) else {
                        continue;
                    };
                    let w = op.apply(weight, v);
                    if w <= 0 || w > MAX_WEIGHT {
                        continue;
                    }
                    if next == GOAL {
                        if w == TARGET_WEIGHT {
                            let mut extended = path;
                            extended.push(dir);
                            return Some(extended);
                        }
                        // Arriving at the door with any other weight resets.
                        continue;
                    }
                    if !visited.insert((next.0, next.1, w)) {
                        continue;
                    }
                    let mut extended = path.clone();
                    extended.push(dir);
                    queue.push_back((next, w, extended));
                }
            }
        }
    }
    None
}

/// Replays a command sequence, returning the final orb weight if the walk
/// ends on the door room without breaking any rule.
#[must_use]
pub fn replay(moves: &[Dir]) -> Option<i32> {
    let mut pos = START;
    let mut weight = START_WEIGHT;
    let mut pending: Option<BinOp> = None;
    for (i, &dir) in moves.iter().enumerate() {
        pos = step(pos, dir)?;
        if pos == START {
            return None;
        }
        match cell_at(pos) {
            Cell::Op(op) => pending = Some(op),
            Cell::Value(v) => {
                weight = pending.take()?.apply(weight, v);
                if weight <= 0 || weight > MAX_WEIGHT {
                    return None;
                }
            }
        }
        if pos == GOAL && i + 1 != moves.len() {
            return None;
        }
    }
    (pos == GOAL).then_some(weight)
}

#[cfg(test)]
mod tests {
    use super::{Dir, TARGET_WEIGHT, replay, solve};
    use alloc::vec;

    #[test]
    fn the_reference_grid_has_a_twelve_move_solution() {
        let moves = solve().expect("the reference grid is solvable");
        assert_eq!(moves.len(), 12);
        assert_eq!(replay(&moves), Some(TARGET_WEIGHT));
    }

    #[test]
    fn the_first_move_leaves_the_pedestal_row() {
        // Both neighbors of the pedestal are operator rooms, so any solution
        // starts by stepping onto one of them.
        let moves = solve().unwrap();
        assert!(matches!(moves[0], Dir::North | Dir::East));
    }

    #[test]
    fn replay_rejects_rule_breaking_walks() {
        // Walking back onto the pedestal resets the orb.
        assert_eq!(replay(&[Dir::North, Dir::South]), None);
        // 22 + 4 = 26 is a legal prefix, but the walk ends off the door.
        assert_eq!(replay(&[Dir::North, Dir::North]), None);
    }

    #[test]
    fn shorter_sequences_cannot_open_the_door() {
        // Parity alone rules out anything under 6 moves; exhaustively check
        // that the solver's minimum is genuine for a few hand walks.
        let too_short = vec![
            vec![Dir::East, Dir::East, Dir::East, Dir::North, Dir::North, Dir::North],
            vec![Dir::North, Dir::North, Dir::North, Dir::East, Dir::East, Dir::East],
        ];
        for walk in too_short {
            assert_ne!(replay(&walk), Some(TARGET_WEIGHT));
        }
    }
}
