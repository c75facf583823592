use clap::ValueEnum;
use log::debug;
use rand::{seq::SliceRandom, Rng};

use crate::{
    eval::evaluate,
    game::{Board, PlayerMarker},
    search,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Difficulty {
    /// Plays a random legal move
    Easy,
    /// Wins, blocks, solves 3x3 exactly and falls back to heuristics
    Hard,
}

/// Picks the CPU's next cell. Returns `None` only when the board has no legal
/// move left.
pub fn cpu_select_move<R: Rng + ?Sized>(
    board: &Board,
    cpu: PlayerMarker,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    let legal_moves = board.legal_moves();
    if legal_moves.is_empty() {
        return None;
    }

    if difficulty == Difficulty::Easy {
        return legal_moves.choose(rng).copied();
    }

    let me = board.bitboard(cpu);
    let opponent = board.bitboard(cpu.other());
    let masks = board.masks();

    if let Some(cell) = completing_move(board, &legal_moves, me) {
        debug!("{} wins on cell {}", cpu, cell);
        return Some(cell);
    }

    if let Some(cell) = completing_move(board, &legal_moves, opponent) {
        debug!("{} blocks cell {}", cpu, cell);
        return Some(cell);
    }

    let size = board.size();
    if size == 3 {
        if let Some(cell) = search::solve(me, opponent, board.free_cells(), masks).best_move {
            return Some(cell);
        }
    }

    if size % 2 == 1 {
        let center = board.cell_count() / 2;
        if board.is_legal(center) {
            debug!("{} takes the centre", cpu);
            return Some(center);
        }
    }

    let mut corners = [0, size - 1, size * (size - 1), size * size - 1];
    corners.shuffle(rng);
    if let Some(&cell) = corners.iter().find(|&&cell| board.is_legal(cell)) {
        debug!("{} takes corner {}", cpu, cell);
        return Some(cell);
    }

    let mut candidates = legal_moves.clone();
    candidates.shuffle(rng);
    let mut best: Option<(i32, usize)> = None;
    for &cell in &candidates {
        let score = evaluate(me | 1 << cell, opponent, masks);
        if best.map_or(true, |(best_score, _)| score > best_score) {
            best = Some((score, cell));
        }
    }
    match best {
        Some((score, cell)) => {
            debug!("{} plays cell {} with heuristic score {}", cpu, cell, score);
            Some(cell)
        }
        None => legal_moves.choose(rng).copied(),
    }
}

fn completing_move(board: &Board, legal_moves: &[usize], bits: u128) -> Option<usize> {
    legal_moves
        .iter()
        .copied()
        .find(|&cell| board.masks().completes(bits, cell))
}
