//! Exact negamax search with memoization.
//!
//! Used for the classic 3×3 board, where the whole game tree is small enough
//! to solve on every CPU turn. A fresh [`Memo`] is built per top-level call.

use std::collections::HashMap;

use log::debug;

use crate::game::{cells_of, WinningMasks};

/// Snapshot of a position from the side to move. `free` is the ordered set of
/// empty cells, one bit per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SearchState {
    pub me: u128,
    pub other: u128,
    pub free: u128,
    pub maximizing: bool,
}

impl SearchState {
    pub fn new(me: u128, other: u128, free: u128) -> Self {
        SearchState {
            me,
            other,
            free,
            maximizing: true,
        }
    }

    fn play(&self, cell: usize) -> SearchState {
        let bit = 1u128 << cell;
        SearchState {
            me: self.other,
            other: self.me | bit,
            free: self.free & !bit,
            maximizing: !self.maximizing,
        }
    }
}

/// `value` is 1 for a forced win of the side to move, -1 for a forced loss
/// and 0 for a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub value: i32,
    pub best_move: Option<usize>,
}

pub type Memo = HashMap<SearchState, SearchResult>;

pub fn negamax(state: SearchState, masks: &WinningMasks, memo: &mut Memo) -> SearchResult {
    if let Some(&result) = memo.get(&state) {
        return result;
    }

    let result = if masks.is_win(state.me) {
        SearchResult {
            value: 1,
            best_move: None,
        }
    } else if masks.is_win(state.other) {
        SearchResult {
            value: -1,
            best_move: None,
        }
    } else if state.free == 0 {
        SearchResult {
            value: 0,
            best_move: None,
        }
    } else {
        let mut best = SearchResult {
            value: i32::MIN,
            best_move: None,
        };
        for cell in cells_of(state.free) {
            let value = -negamax(state.play(cell), masks, memo).value;
            if value > best.value {
                best = SearchResult {
                    value,
                    best_move: Some(cell),
                };
            }
            if best.value == 1 {
                break;
            }
        }
        best
    };

    memo.insert(state, result);
    result
}

/// Solves the position for the side owning `me`.
pub fn solve(me: u128, other: u128, free: u128, masks: &WinningMasks) -> SearchResult {
    let mut memo = Memo::new();
    let result = negamax(SearchState::new(me, other, free), masks, &mut memo);
    debug!(
        "exact search: value {} move {:?} ({} positions)",
        result.value,
        result.best_move,
        memo.len()
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::generate_winning_masks;

    const FULL: u128 = 0b111_111_111;

    fn free(me: u128, other: u128) -> u128 {
        FULL & !(me | other)
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let masks = generate_winning_masks(3).unwrap();
        let result = solve(0, 0, FULL, &masks);
        assert_eq!(result.value, 0);
        assert!(result.best_move.is_some());
    }

    #[test]
    fn test_finishes_open_row() {
        let masks = generate_winning_masks(3).unwrap();
        let me = 1 << 0 | 1 << 1;
        let other = 1 << 3 | 1 << 4;
        let result = solve(me, other, free(me, other), &masks);
        assert_eq!(
            result,
            SearchResult {
                value: 1,
                best_move: Some(2)
            }
        );
    }

    #[test]
    fn test_blocks_forced_loss() {
        let masks = generate_winning_masks(3).unwrap();
        // opponent threatens 6 via column 0; blocking holds the draw
        let me = 1 << 4;
        let other = 1 << 0 | 1 << 3;
        let result = solve(me, other, free(me, other), &masks);
        assert_eq!(result.best_move, Some(6));
        assert!(result.value >= 0);
    }

    #[test]
    fn test_fork_is_lost() {
        let masks = generate_winning_masks(3).unwrap();
        // opponent threatens both 2 (row 0) and 6 (column 0)
        let me = 1 << 4 | 1 << 8;
        let other = 1 << 0 | 1 << 1 | 1 << 3;
        let result = solve(me, other, free(me, other), &masks);
        assert_eq!(result.value, -1);
    }

    #[test]
    fn test_terminal_positions() {
        let masks = generate_winning_masks(3).unwrap();
        let mut memo = Memo::new();

        let won = SearchState::new(0b111, 0b011_000, free(0b111, 0b011_000));
        assert_eq!(negamax(won, &masks, &mut memo).value, 1);

        let lost = SearchState::new(0b011_000, 0b111, free(0b111, 0b011_000));
        assert_eq!(negamax(lost, &masks, &mut memo).value, -1);

        // O X O / O X X / X O O, nobody on move can change anything
        let o = 1 << 0 | 1 << 2 | 1 << 3 | 1 << 7 | 1 << 8;
        let x = 1 << 1 | 1 << 4 | 1 << 5 | 1 << 6;
        let full = SearchState::new(o, x, 0);
        assert_eq!(
            negamax(full, &masks, &mut memo),
            SearchResult {
                value: 0,
                best_move: None
            }
        );
    }

    #[test]
    fn test_memo_is_filled() {
        let masks = generate_winning_masks(3).unwrap();
        let mut memo = Memo::new();
        let state = SearchState::new(1 << 4, 0, FULL & !(1 << 4));
        let first = negamax(state, &masks, &mut memo);
        assert!(memo.contains_key(&state));
        let size = memo.len();
        assert_eq!(negamax(state, &masks, &mut memo), first);
        assert_eq!(memo.len(), size);
    }
}
