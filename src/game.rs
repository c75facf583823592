use std::{fmt, iter};

use log::trace;
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::error::{GameError, Result};

// #############################
// #                           #
// #      Fixed Constants      #
// #                           #
// #############################

/// Largest board whose cells still fit into a single `u128` bitboard.
pub const MAX_BOARD_SIZE: usize = 11;

// #############################
// #                           #
// #       PlayerMarker        #
// #                           #
// #############################

/// The two sides. `O` is player 0 and always moves first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlayerMarker {
    O,
    X,
}

impl PlayerMarker {
    pub fn index(&self) -> usize {
        match self {
            PlayerMarker::O => 0,
            PlayerMarker::X => 1,
        }
    }

    pub fn other(&self) -> PlayerMarker {
        match self {
            PlayerMarker::O => PlayerMarker::X,
            PlayerMarker::X => PlayerMarker::O,
        }
    }

    pub fn to_char(&self) -> char {
        match self {
            PlayerMarker::O => 'O',
            PlayerMarker::X => 'X',
        }
    }
}

impl fmt::Display for PlayerMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl Distribution<PlayerMarker> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PlayerMarker {
        if rng.gen() {
            PlayerMarker::X
        } else {
            PlayerMarker::O
        }
    }
}

/// Iterates the indices of the set bits of `bits`, lowest first.
pub fn cells_of(mut bits: u128) -> impl Iterator<Item = usize> {
    iter::from_fn(move || {
        if bits == 0 {
            return None;
        }
        let index = bits.trailing_zeros() as usize;
        bits &= bits - 1;
        Some(index)
    })
}

// #############################
// #                           #
// #       WinningMasks        #
// #                           #
// #############################

/// Every winning line of an N×N board, in generation order: rows, columns,
/// the main diagonal, then the anti-diagonal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WinningMasks {
    masks: Vec<u128>,
}

pub fn generate_winning_masks(size: usize) -> Result<WinningMasks> {
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(GameError::InvalidBoardSize { size });
    }

    let bit = |row: usize, col: usize| 1u128 << (row * size + col);
    let mut masks = Vec::with_capacity(2 * size + 2);

    // rows
    for i in 0..size {
        masks.push((0..size).fold(0, |mask, j| mask | bit(i, j)));
    }
    // columns
    for j in 0..size {
        masks.push((0..size).fold(0, |mask, i| mask | bit(i, j)));
    }
    masks.push((0..size).fold(0, |mask, i| mask | bit(i, i)));
    masks.push((0..size).fold(0, |mask, i| mask | bit(i, size - 1 - i)));

    Ok(WinningMasks { masks })
}

impl WinningMasks {
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = u128> + '_ {
        self.masks.iter().copied()
    }

    /// First mask fully covered by `bits`.
    pub fn first_complete(&self, bits: u128) -> Option<u128> {
        self.iter().find(|&mask| bits & mask == mask)
    }

    pub fn is_win(&self, bits: u128) -> bool {
        self.first_complete(bits).is_some()
    }

    /// Whether claiming `cell` on top of `bits` completes a line.
    pub fn completes(&self, bits: u128, cell: usize) -> bool {
        self.is_win(bits | 1 << cell)
    }
}

// #############################
// #                           #
// #         BitBoard          #
// #                           #
// #############################

/// Occupancy of both players, one bit per cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BitBoard {
    o: u128,
    x: u128,
}

impl BitBoard {
    pub fn new() -> Self {
        BitBoard { o: 0, x: 0 }
    }

    pub fn get(&self, player: PlayerMarker) -> u128 {
        match player {
            PlayerMarker::O => self.o,
            PlayerMarker::X => self.x,
        }
    }

    pub fn occupied(&self) -> u128 {
        self.o | self.x
    }

    fn set(&mut self, player: PlayerMarker, position: usize) {
        let mask = 1 << position;
        match player {
            PlayerMarker::O => self.o |= mask,
            PlayerMarker::X => self.x |= mask,
        }
    }
}

// #############################
// #                           #
// #          Outcome          #
// #                           #
// #############################

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win(PlayerMarker),
    Draw,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        *self != Outcome::InProgress
    }
}

// #############################
// #                           #
// #           Board           #
// #                           #
// #############################

#[derive(Clone, Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Option<PlayerMarker>>,
    bits: BitBoard,
    masks: WinningMasks,
    last_move: Option<usize>,
}

impl Board {
    pub fn new(size: usize) -> Result<Self> {
        let masks = generate_winning_masks(size)?;
        Ok(Board {
            size,
            cells: vec![None; size * size],
            bits: BitBoard::new(),
            masks,
            last_move: None,
        })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Option<PlayerMarker>] {
        &self.cells
    }

    pub fn get(&self, cell: usize) -> Option<PlayerMarker> {
        self.cells.get(cell).copied().flatten()
    }

    pub fn bitboard(&self, player: PlayerMarker) -> u128 {
        self.bits.get(player)
    }

    /// Bitset of every empty cell.
    pub fn free_cells(&self) -> u128 {
        ((1u128 << self.cell_count()) - 1) & !self.bits.occupied()
    }

    pub fn masks(&self) -> &WinningMasks {
        &self.masks
    }

    pub fn last_move(&self) -> Option<usize> {
        self.last_move
    }

    pub fn is_legal(&self, cell: usize) -> bool {
        cell < self.cell_count() && self.cells[cell].is_none()
    }

    /// Places `player`'s mark on `cell`. An illegal cell is rejected and the
    /// board is left untouched.
    pub fn apply(&mut self, cell: usize, player: PlayerMarker) -> Result<Outcome> {
        if cell >= self.cell_count() {
            return Err(GameError::CellOutOfRange {
                cell,
                cells: self.cell_count(),
            });
        }
        if self.cells[cell].is_some() {
            return Err(GameError::CellOccupied { cell });
        }

        self.cells[cell] = Some(player);
        self.bits.set(player, cell);
        self.last_move = Some(cell);
        trace!("{} placed on cell {}", player, cell);

        Ok(if self.is_win(player) {
            Outcome::Win(player)
        } else if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        })
    }

    pub fn is_win(&self, player: PlayerMarker) -> bool {
        self.masks.is_win(self.bitboard(player))
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    pub fn outcome(&self) -> Outcome {
        for player in [PlayerMarker::O, PlayerMarker::X] {
            if self.is_win(player) {
                return Outcome::Win(player);
            }
        }
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    /// Cells of the first winning line `player` has completed, scanning rows,
    /// columns, then diagonals.
    pub fn winning_cells(&self, player: PlayerMarker) -> Vec<usize> {
        self.masks
            .first_complete(self.bitboard(player))
            .map(|mask| cells_of(mask).collect())
            .unwrap_or_default()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        (0..self.cell_count())
            .filter(|&cell| self.cells[cell].is_none())
            .collect()
    }
}

// ############################################################################
// # Tests
// ############################################################################
