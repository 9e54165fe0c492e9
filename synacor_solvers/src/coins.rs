// Copyright 2026 the Synacor VM Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ruins monument solver.
//!
//! The monument in the ruins reads `_ + _ * _^2 + _^3 - _ = 399`, and five
//! coins carry the values 2, 3, 5, 7, and 9. This module enumerates the
//! orderings deterministically and reports the one that satisfies the
//! equation; the operator then replays `use <coin> coin` for each slot.

/// Coin values, in the order they are found in the game.
pub const COIN_VALUES: [u16; 5] = [2, 3, 5, 7, 9];

/// The sum the monument demands.
pub const MONUMENT_TARGET: i64 = 399;

/// Name of the coin carrying `value`.
#[must_use]
pub fn coin_name(value: u16) -> Option<&'static str> {
    match value {
        2 => Some("red"),
        3 => Some("corroded"),
        5 => Some("shiny"),
        7 => Some("concave"),
        9 => Some("blue"),
        _ => None,
    }
}

fn satisfies(v: &[u16; 5]) -> bool {
    let [a, b, c, d, e] = v.map(i64::from);
    a + b * c * c + d * d * d - e == MONUMENT_TARGET
}

fn permute(values: &mut [u16; 5], k: usize) -> Option<[u16; 5]> {
    if k == values.len() {
        return satisfies(values).then_some(*values);
    }
    for i in k..values.len() {
        values.swap(k, i);
        let found = permute(values, k + 1);
        values.swap(k, i);
        if found.is_some() {
            return found;
        }
    }
    None
}

/// Finds the coin ordering satisfying the monument equation.
#[must_use]
pub fn solve() -> Option<[u16; 5]> {
    let mut values = COIN_VALUES;
    permute(&mut values, 0)
}

#[cfg(test)]
mod tests {
    use super::{COIN_VALUES, coin_name, satisfies, solve};

    #[test]
    fn finds_the_unique_ordering() {
        let ordering = solve().expect("the monument equation has a solution");
        assert!(satisfies(&ordering));
        // 9 + 2 * 5^2 + 7^3 - 3 = 399.
        assert_eq!(ordering, [9, 2, 5, 7, 3]);
    }

    #[test]
    fn the_ordering_is_a_permutation_of_the_coin_values() {
        let mut ordering = solve().unwrap();
        ordering.sort_unstable();
        assert_eq!(ordering, COIN_VALUES);
    }

    #[test]
    fn every_coin_value_has_a_name() {
        for value in COIN_VALUES {
            assert!(coin_name(value).is_some());
        }
        assert_eq!(coin_name(4), None);
    }
}
