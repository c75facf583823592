use std::{
    cell::RefCell,
    io::{self, BufRead, Write},
    rc::Rc,
};

use colored::Colorize;
use rand::Rng;

use crate::{
    error::{GameError, Result},
    game::{Board, PlayerMarker, MAX_BOARD_SIZE},
    policy::{cpu_select_move, Difficulty},
};

pub trait Player {
    fn get_move(&mut self, board: &Board, marker: PlayerMarker) -> Result<usize>;
}

impl<P: Player + ?Sized> Player for Rc<RefCell<P>> {
    fn get_move(&mut self, board: &Board, marker: PlayerMarker) -> Result<usize> {
        self.borrow_mut().get_move(board, marker)
    }
}

// ######################################
// # Input parsing
// ######################################

pub fn parse_board_size(input: &str) -> Result<usize> {
    let input = input.trim();
    let size: usize = input.parse().map_err(|_| GameError::NotANumber {
        input: input.to_string(),
    })?;
    if size == 0 || size > MAX_BOARD_SIZE {
        return Err(GameError::InvalidBoardSize { size });
    }
    Ok(size)
}

/// Turns a 1-based cell number into a legal 0-based index.
pub fn parse_cell(input: &str, board: &Board) -> Result<usize> {
    let input = input.trim();
    let cells = board.cell_count();
    let number: usize = input.parse().map_err(|_| GameError::NotANumber {
        input: input.to_string(),
    })?;
    if number == 0 || number > cells {
        return Err(GameError::CellOutOfRange {
            cell: number,
            cells,
        });
    }
    let cell = number - 1;
    if !board.is_legal(cell) {
        return Err(GameError::CellOccupied { cell });
    }
    Ok(cell)
}

fn read_line<R: BufRead>(input: &mut R, prompt: &str) -> Result<String> {
    print!("{}", prompt);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(GameError::InputClosed);
    }
    Ok(line)
}

/// Asks for a board size until a valid one is entered.
pub fn read_board_size<R: BufRead>(input: &mut R) -> Result<usize> {
    loop {
        let line = read_line(input, "Enter board size N (e.g., 3 for 3x3): ")?;
        match parse_board_size(&line) {
            Ok(size) => return Ok(size),
            Err(e) => println!("{}", e.to_string().red()),
        }
    }
}

// ######################################
// # HumanPlayer
// ######################################

pub struct HumanPlayer<R> {
    input: R,
}

impl<R: BufRead> HumanPlayer<R> {
    pub fn new(input: R) -> Self {
        HumanPlayer { input }
    }
}

impl<R: BufRead> Player for HumanPlayer<R> {
    fn get_move(&mut self, board: &Board, marker: PlayerMarker) -> Result<usize> {
        let prompt = format!(
            "Where do you want to place your {} (1-{}): ",
            marker,
            board.cell_count()
        );
        loop {
            let line = read_line(&mut self.input, &prompt)?;
            match parse_cell(&line, board) {
                Ok(cell) => return Ok(cell),
                Err(GameError::NotANumber { .. }) => println!(
                    "{}",
                    format!("Invalid input. Enter a number between 1 and {}.", board.cell_count()).red()
                ),
                Err(e) => println!("{}", e.to_string().red()),
            }
        }
    }
}

// ######################################
// # CpuPlayer
// ######################################

pub struct CpuPlayer<R> {
    difficulty: Difficulty,
    rng: R,
}

impl<R: Rng> CpuPlayer<R> {
    pub fn new(difficulty: Difficulty, rng: R) -> Self {
        CpuPlayer { difficulty, rng }
    }
}

impl<R: Rng> Player for CpuPlayer<R> {
    fn get_move(&mut self, board: &Board, marker: PlayerMarker) -> Result<usize> {
        cpu_select_move(board, marker, self.difficulty, &mut self.rng).ok_or(GameError::NoLegalMoves)
    }
}
